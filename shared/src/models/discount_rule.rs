//! Discount Rule Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rule::{ApplyScope, DiscountTarget, RuleBasis, RuleScope, default_priority};

/// Discount rule entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRule {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub scope: RuleScope,
    #[serde(default)]
    pub store: Option<i64>,
    pub basis: RuleBasis,
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    pub apply_scope: ApplyScope,
    pub target: DiscountTarget,
    /// Empty with `target == Category` means "every category"
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub variant_ids: Vec<i64>,
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Whether this rule can combine with other discounts
    #[serde(default)]
    pub stackable: bool,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Create discount rule payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRuleCreate {
    pub code: String,
    pub name: String,
    pub scope: RuleScope,
    pub store: Option<i64>,
    pub basis: RuleBasis,
    pub rate: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub apply_scope: ApplyScope,
    pub target: DiscountTarget,
    pub category_ids: Vec<i64>,
    pub product_ids: Vec<i64>,
    pub variant_ids: Vec<i64>,
    pub priority: i32,
    pub stackable: bool,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Update discount rule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountRuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<RuleScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<RuleBasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_scope: Option<ApplyScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<DiscountTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stackable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
