//! Coupon Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Redeemable coupon code backed by a discount rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Discount rule applied when the coupon is redeemed
    pub discount_rule: i64,
    /// Redemption cap (None = unlimited)
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Coupon {
    /// Remaining redemptions, or None when unlimited
    pub fn remaining_uses(&self) -> Option<u32> {
        self.max_uses.map(|max| max.saturating_sub(self.used_count))
    }
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub name: String,
    pub discount_rule: i64,
    pub max_uses: Option<u32>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rule: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
