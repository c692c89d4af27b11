//! crab-admin: command-line front end for tenant administration
//!
//! ```text
//! crab-admin list users --search ana --ordering -username
//! crab-admin deactivate users 4 7 9
//! crab-admin delete coupons 12 --search SUMMER
//! ```
//!
//! Bulk commands select the given ids among the rows of the current page
//! (same query options as `list`), so ids that are not loaded, or the
//! signed-in user, are never acted on.
//!
//! Rule lists also take the rule axes as filters:
//!
//! ```text
//! crab-admin list discount-rules --scope STORE --store 3 --target PRODUCT --stackable true
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crab_admin::{
    AdminConfig, BulkAction, BulkMutationCoordinator, EntityQuery, EntityTab, LoadState,
    NetworkHttpClient, Notice, NoticeLevel, Notifier, Ordering, Resource, ResourceApi, Toggle,
    current_user, logger,
};
use shared::models::{Coupon, DiscountRule, Register, Store, TaxCategory, TaxRule, User};
use shared::rule::{self, ApplyScope, DiscountTarget, RuleBasis, RuleFilter, RuleScope, WindowStatus};

#[derive(Debug, Parser)]
#[command(name = "crab-admin", version, about = "Tenant administration client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of records
    List {
        resource: ResourceKind,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Activate the given records
    Activate(BulkArgs),
    /// Deactivate the given records
    Deactivate(BulkArgs),
    /// Delete the given records
    Delete(BulkArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Users,
    Stores,
    Registers,
    TaxCategories,
    TaxRules,
    DiscountRules,
    Coupons,
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,
    /// Sort field, "-" prefix for descending
    #[arg(long, allow_hyphen_values = true)]
    ordering: Option<String>,
    /// Only active (true) or inactive (false) records
    #[arg(long)]
    active: Option<bool>,
    /// Page number (1-based)
    #[arg(long)]
    page: Option<u32>,
    #[command(flatten)]
    rules: RuleArgs,
}

/// Axis filters, tax-rules and discount-rules only
#[derive(Debug, Args)]
struct RuleArgs {
    /// GLOBAL or STORE
    #[arg(long)]
    scope: Option<RuleScope>,
    /// Store id of store-scoped rules
    #[arg(long)]
    store: Option<i64>,
    /// PCT or FLAT
    #[arg(long)]
    basis: Option<RuleBasis>,
    /// LINE or RECEIPT
    #[arg(long)]
    apply_scope: Option<ApplyScope>,
    /// ALL, CATEGORY, PRODUCT or VARIANT (discount rules)
    #[arg(long)]
    target: Option<DiscountTarget>,
    /// Stackable discount rules only (true) or exclusive ones (false)
    #[arg(long)]
    stackable: Option<bool>,
}

impl RuleArgs {
    fn filter(&self) -> RuleFilter {
        RuleFilter {
            scope: self.scope,
            store: self.store,
            basis: self.basis,
            apply_scope: self.apply_scope,
            target: self.target,
            stackable: self.stackable,
        }
    }

    /// Rule filters only make sense on the rule lists
    fn check(&self, kind: ResourceKind) -> anyhow::Result<()> {
        let filter = self.filter();
        match kind {
            ResourceKind::DiscountRules => Ok(()),
            ResourceKind::TaxRules if filter.target.is_none() && filter.stackable.is_none() => Ok(()),
            ResourceKind::TaxRules => anyhow::bail!("--target and --stackable apply to discount-rules only"),
            _ if filter.is_empty() => Ok(()),
            _ => anyhow::bail!("rule filters apply to tax-rules and discount-rules only"),
        }
    }
}

#[derive(Debug, Args)]
struct BulkArgs {
    resource: ResourceKind,
    #[arg(required = true)]
    ids: Vec<i64>,
    #[command(flatten)]
    query: QueryArgs,
}

/// One-line rendering of a record for terminal output
trait Summary {
    fn summary(&self) -> String;
}

fn active_mark(active: bool) -> &'static str {
    if active { "active" } else { "inactive" }
}

impl Summary for User {
    fn summary(&self) -> String {
        format!("{} ({}) role={} {}", self.username, self.display_name(), self.role, active_mark(self.is_active))
    }
}

impl Summary for Store {
    fn summary(&self) -> String {
        format!("{} {} {}", self.code, self.name, active_mark(self.is_active))
    }
}

impl Summary for Register {
    fn summary(&self) -> String {
        format!("{} {} store={} {}", self.code, self.name, self.store, active_mark(self.is_active))
    }
}

impl Summary for TaxCategory {
    fn summary(&self) -> String {
        format!("{} {} {}", self.code, self.name, active_mark(self.is_active))
    }
}

impl Summary for TaxRule {
    fn summary(&self) -> String {
        format!(
            "{} {} {} {} {} prio={} {} {}",
            self.code,
            self.name,
            self.scope,
            rule::format_value(self.basis, self.rate, self.amount),
            self.apply_scope,
            self.priority,
            WindowStatus::at(self.start_at, self.end_at, Utc::now()).label(),
            active_mark(self.is_active)
        )
    }
}

impl Summary for DiscountRule {
    fn summary(&self) -> String {
        let target = rule::target_label(
            self.target,
            self.category_ids.is_empty(),
            self.category_ids.len(),
            self.product_ids.len(),
            self.variant_ids.len(),
        );
        format!(
            "{} {} {} {} {} [{}] prio={}{} {} {}",
            self.code,
            self.name,
            self.scope,
            rule::format_value(self.basis, self.rate, self.amount),
            self.apply_scope,
            target,
            self.priority,
            if self.stackable { " stackable" } else { "" },
            WindowStatus::at(self.start_at, self.end_at, Utc::now()).label(),
            active_mark(self.is_active)
        )
    }
}

impl Summary for Coupon {
    fn summary(&self) -> String {
        let uses = match self.remaining_uses() {
            Some(left) => format!("{left} left"),
            None => "unlimited".to_string(),
        };
        format!(
            "{} rule={} {} {} {}",
            self.code,
            self.discount_rule,
            uses,
            WindowStatus::at(self.start_at, self.end_at, Utc::now()).label(),
            active_mark(self.is_active)
        )
    }
}

/// Prints notices to the terminal
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("{}", notice.message),
        }
    }
}

struct App {
    config: AdminConfig,
    http: NetworkHttpClient,
    notifier: Arc<dyn Notifier>,
}

fn build_query<R: Resource>(args: &QueryArgs, page_size: u32) -> anyhow::Result<EntityQuery> {
    let mut query = EntityQuery::new().active(args.active);
    if let Some(search) = &args.search {
        query = query.search(search);
    }
    if let Some(raw) = &args.ordering {
        query = query.order_by(Ordering::parse(raw, R::SORTABLE)?);
    }
    query = query.paginate(args.page.unwrap_or(1), page_size);
    Ok(args.rules.filter().apply(query))
}

/// Load the page; `None` when the load failed (the notifier already reported it)
async fn open_tab<R>(ctx: &App, args: &QueryArgs, protected: Option<i64>) -> anyhow::Result<Option<EntityTab<R>>>
where
    R: Resource,
{
    let api = ResourceApi::<R>::new(ctx.http.clone());
    let mut tab = EntityTab::<R>::with_protected(ctx.notifier.clone(), protected)
        .with_coordinator(BulkMutationCoordinator::with_concurrency(ctx.config.bulk_concurrency));
    let ticket = tab.set_query(build_query::<R>(args, ctx.config.page_size)?);
    let result = api.list(ticket.query()).await;
    if tab.finish_load(ticket, result) == LoadState::Failed {
        return Ok(None);
    }
    Ok(Some(tab))
}

async fn list<R: Resource + Summary>(ctx: &App, args: &QueryArgs) -> anyhow::Result<ExitCode> {
    let Some(tab) = open_tab::<R>(ctx, args, None).await? else {
        return Ok(ExitCode::FAILURE);
    };
    for row in tab.rows() {
        println!("{:>6}  {}", row.id(), row.summary());
    }
    match tab.total() {
        Some(total) => println!("{} of {total} {}(s)", tab.rows().len(), R::NOUN),
        None => println!("{} {}(s)", tab.rows().len(), R::NOUN),
    }
    Ok(ExitCode::SUCCESS)
}

async fn bulk<R: Resource>(
    ctx: &App,
    action: BulkAction,
    args: &BulkArgs,
    protected: Option<i64>,
) -> anyhow::Result<ExitCode> {
    let api = ResourceApi::<R>::new(ctx.http.clone());
    let Some(mut tab) = open_tab::<R>(ctx, &args.query, protected).await? else {
        return Ok(ExitCode::FAILURE);
    };

    for &id in &args.ids {
        match tab.toggle_one(id) {
            Toggle::Selected => {}
            Toggle::Deselected => {
                // listed twice; keep it selected
                tab.toggle_one(id);
            }
            // the tab has already reported it
            Toggle::Protected => {}
            Toggle::NotVisible => eprintln!("skipping {id}: not on the current page"),
        }
    }

    // the tab reports the aggregate notice
    let outcome = tab.bulk(&api, action).await;
    if outcome.is_empty() {
        println!("Nothing to {}", action.as_str());
    }
    if outcome.failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Still selected (failed): {:?}", tab.selected_ids());
        Ok(ExitCode::FAILURE)
    }
}

async fn dispatch_bulk(ctx: &App, action: BulkAction, args: &BulkArgs) -> anyhow::Result<ExitCode> {
    args.query.rules.check(args.resource)?;
    match args.resource {
        ResourceKind::Users => {
            let protected = match ctx.config.current_user_id {
                Some(id) => Some(id),
                None => Some(
                    current_user(&ctx.http)
                        .await
                        .context("could not determine the signed-in user")?
                        .id,
                ),
            };
            bulk::<User>(ctx, action, args, protected).await
        }
        ResourceKind::Stores => bulk::<Store>(ctx, action, args, None).await,
        ResourceKind::Registers => bulk::<Register>(ctx, action, args, None).await,
        ResourceKind::TaxCategories => bulk::<TaxCategory>(ctx, action, args, None).await,
        ResourceKind::TaxRules => bulk::<TaxRule>(ctx, action, args, None).await,
        ResourceKind::DiscountRules => bulk::<DiscountRule>(ctx, action, args, None).await,
        ResourceKind::Coupons => bulk::<Coupon>(ctx, action, args, None).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AdminConfig::from_env()?;
    logger::init_logger(&config.log_level, config.log_json)?;

    tracing::info!(base_url = %config.base_url, "Starting crab-admin");

    let http = config.build_http_client()?;
    let ctx = App {
        config,
        http,
        notifier: Arc::new(ConsoleNotifier),
    };

    match &cli.command {
        Command::List { resource, query } => {
            query.rules.check(*resource)?;
            match resource {
                ResourceKind::Users => list::<User>(&ctx, query).await,
                ResourceKind::Stores => list::<Store>(&ctx, query).await,
                ResourceKind::Registers => list::<Register>(&ctx, query).await,
                ResourceKind::TaxCategories => list::<TaxCategory>(&ctx, query).await,
                ResourceKind::TaxRules => list::<TaxRule>(&ctx, query).await,
                ResourceKind::DiscountRules => list::<DiscountRule>(&ctx, query).await,
                ResourceKind::Coupons => list::<Coupon>(&ctx, query).await,
            }
        }
        Command::Activate(args) => dispatch_bulk(&ctx, BulkAction::Activate, args).await,
        Command::Deactivate(args) => dispatch_bulk(&ctx, BulkAction::Deactivate, args).await,
        Command::Delete(args) => dispatch_bulk(&ctx, BulkAction::Delete, args).await,
    }
}
