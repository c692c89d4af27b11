//! Derived display values for rule lists and editors

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::axes::{DiscountTarget, RuleBasis};
use super::normalize::fixed;

/// Where `now` falls relative to a rule's activity window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    /// No window configured
    Always,
    /// Starts in the future
    Scheduled,
    /// Inside the window
    Running,
    /// Ended
    Expired,
}

impl WindowStatus {
    pub fn at(
        start_at: Option<DateTime<Utc>>,
        end_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        match (start_at, end_at) {
            (None, None) => Self::Always,
            (Some(start), _) if now < start => Self::Scheduled,
            (_, Some(end)) if now > end => Self::Expired,
            _ => Self::Running,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::Scheduled => "Scheduled",
            Self::Running => "Running",
            Self::Expired => "Expired",
        }
    }
}

/// "8.25%" for a 0.0825 rate, "5.00" for a flat amount, "-" when missing
pub fn format_value(basis: RuleBasis, rate: Option<Decimal>, amount: Option<Decimal>) -> String {
    match (basis, rate, amount) {
        (RuleBasis::Pct, Some(rate), _) => match rate.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => format!("{}%", percent.normalize()),
            None => "-".to_string(),
        },
        (RuleBasis::Flat, _, Some(amount)) => fixed(amount, 2),
        _ => "-".to_string(),
    }
}

pub fn target_label(
    target: DiscountTarget,
    all_categories: bool,
    categories: usize,
    products: usize,
    variants: usize,
) -> String {
    match target {
        DiscountTarget::All => "All items".to_string(),
        DiscountTarget::Category if all_categories => "All categories".to_string(),
        DiscountTarget::Category => format!("{categories} category(ies)"),
        DiscountTarget::Product => format!("{products} product(s)"),
        DiscountTarget::Variant => format!("{variants} variant(s)"),
    }
}
