//! Data models
//!
//! Records as returned by the tenant REST API. All IDs are `i64`.
//! Every record carries `is_active`, which is what bulk activate/deactivate
//! flips.

pub mod coupon;
pub mod discount_rule;
pub mod register;
pub mod store;
pub mod tax_category;
pub mod tax_rule;
pub mod user;

// Re-exports
pub use coupon::*;
pub use discount_rule::*;
pub use register::*;
pub use store::*;
pub use tax_category::*;
pub use tax_rule::*;
pub use user::*;

/// Common surface of every entity record.
///
/// `set_active` is the optimistic patch applied after a successful
/// activate/deactivate, so the list can be updated without a reload.
pub trait Record {
    fn id(&self) -> i64;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Implement [`Record`] for a struct with `id: i64` and `is_active: bool` fields.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::models::Record for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn is_active(&self) -> bool {
                    self.is_active
                }

                fn set_active(&mut self, active: bool) {
                    self.is_active = active;
                }
            }
        )+
    };
}

impl_record!(User, Store, Register, TaxCategory, TaxRule, DiscountRule, Coupon);
