//! Shared types for Crab admin
//!
//! Wire/data types used by the admin client: entity records, list queries,
//! page normalization and the rule-targeting schema for tax and discount rules.

pub mod models;
pub mod page;
pub mod query;
pub mod rule;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::Record;
pub use page::{ListResponse, PageResult};
pub use query::{EntityQuery, Ordering, QueryError};
pub use rule::{RuleFilter, RuleKind, RuleTargetSchema};
