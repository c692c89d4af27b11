//! Rule-targeting schema for tax and discount rules
//!
//! A rule is described by a closed set of orthogonal axes:
//! scope (GLOBAL / STORE), basis (PCT / FLAT), apply scope (LINE / RECEIPT),
//! target (discount rules only), priority, stackability and an optional
//! activity window. [`RuleTargetSchema`] is the editor-side value of those
//! axes; it is validated before submission and turned into an immutable
//! create payload on save.

mod axes;
mod display;
mod filter;
mod normalize;
mod schema;
mod validate;

pub use axes::{ApplyScope, AxisParseError, DiscountTarget, RuleBasis, RuleKind, RuleScope};
pub use display::{WindowStatus, format_value, target_label};
pub use filter::RuleFilter;
pub use normalize::{normalize_amount, normalize_rate, parse_decimal};
pub use schema::RuleTargetSchema;

/// Default rule priority (lower runs first)
pub const DEFAULT_PRIORITY: i32 = 100;

/// Sortable fields shared by the tax and discount rule lists
pub const RULE_SORTABLE: &[&str] = &["id", "code", "name", "priority", "start_at", "end_at"];

pub(crate) fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}
