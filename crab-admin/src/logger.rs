//! Logging Infrastructure
//!
//! Console logging for the admin client. `RUST_LOG` overrides the
//! configured level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines (true) or human-readable output (false)
///
/// # Examples
/// ```no_run
/// crab_admin::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_writer(std::io::stderr);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
