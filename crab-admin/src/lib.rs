//! Crab Admin - tenant administration client
//!
//! Headless core of the tenant admin panels (users, stores, registers, tax
//! categories, tax rules, discount rules, coupons): a typed REST client,
//! per-tab list state with row selection, and the bulk
//! activate/deactivate/delete coordinator.

pub mod api;
pub mod bulk;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod notice;
pub mod selection;
pub mod tab;

pub use api::{CurrentUser, Resource, ResourceApi, current_user};
pub use bulk::{BulkAction, BulkMutationCoordinator, BulkOutcome};
pub use config::AdminConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use selection::{SelectionModel, Toggle};
pub use tab::{
    CouponsTab, DiscountRulesTab, EntityTab, LoadState, LoadTicket, RegistersTab, StoresTab,
    TaxCategoriesTab, TaxRulesTab, UsersTab,
};

// Re-export shared types for convenience
pub use shared::{EntityQuery, Ordering, PageResult, Record};
