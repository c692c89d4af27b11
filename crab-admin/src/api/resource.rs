//! Resource descriptors

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::Record;
use shared::models::{
    Coupon, CouponCreate, CouponUpdate, DiscountRule, DiscountRuleCreate, DiscountRuleUpdate,
    Register, RegisterCreate, RegisterUpdate, Store, StoreCreate, StoreUpdate, TaxCategory,
    TaxCategoryCreate, TaxCategoryUpdate, TaxRule, TaxRuleCreate, TaxRuleUpdate, User, UserCreate,
    UserUpdate,
};
use shared::rule::RULE_SORTABLE;

/// A record type served by the REST API
pub trait Resource: Record + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path, without slashes (e.g. "users")
    const PATH: &'static str;
    /// Singular noun for notices ("Activated 3 user(s)")
    const NOUN: &'static str;
    /// Fields accepted in `ordering`
    const SORTABLE: &'static [&'static str];

    type Create: Serialize + Send + Sync;
    type Update: Serialize + Default + Send + Sync;

    fn activation_patch(active: bool) -> Self::Update;
}

macro_rules! resource {
    ($ty:ty, $path:literal, $noun:literal, $sortable:expr, $create:ty, $update:ty) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NOUN: &'static str = $noun;
            const SORTABLE: &'static [&'static str] = $sortable;

            type Create = $create;
            type Update = $update;

            fn activation_patch(active: bool) -> Self::Update {
                <$update>::default().activate(active)
            }
        }
    };
}

trait Activate {
    fn activate(self, active: bool) -> Self;
}

macro_rules! activate {
    ($($ty:ty),+) => {
        $(
            impl Activate for $ty {
                fn activate(mut self, active: bool) -> Self {
                    self.is_active = Some(active);
                    self
                }
            }
        )+
    };
}

activate!(
    UserUpdate,
    StoreUpdate,
    RegisterUpdate,
    TaxCategoryUpdate,
    TaxRuleUpdate,
    DiscountRuleUpdate,
    CouponUpdate
);

resource!(
    User,
    "users",
    "user",
    &["id", "username", "email", "last_name", "role"],
    UserCreate,
    UserUpdate
);
resource!(
    Store,
    "stores",
    "store",
    &["id", "code", "name"],
    StoreCreate,
    StoreUpdate
);
resource!(
    Register,
    "registers",
    "register",
    &["id", "code", "name", "store"],
    RegisterCreate,
    RegisterUpdate
);
resource!(
    TaxCategory,
    "tax-categories",
    "tax category",
    &["id", "code", "name"],
    TaxCategoryCreate,
    TaxCategoryUpdate
);
resource!(
    TaxRule,
    "tax-rules",
    "tax rule",
    RULE_SORTABLE,
    TaxRuleCreate,
    TaxRuleUpdate
);
resource!(
    DiscountRule,
    "discount-rules",
    "discount rule",
    RULE_SORTABLE,
    DiscountRuleCreate,
    DiscountRuleUpdate
);
resource!(
    Coupon,
    "coupons",
    "coupon",
    &["id", "code", "name", "start_at", "end_at"],
    CouponCreate,
    CouponUpdate
);
