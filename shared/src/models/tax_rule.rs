//! Tax Rule Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rule::{ApplyScope, RuleBasis, RuleScope, default_priority};

/// Tax rule entity
///
/// Evaluation against a sale happens server-side; the admin client only
/// edits the targeting axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRule {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub scope: RuleScope,
    /// Required when `scope == Store`
    #[serde(default)]
    pub store: Option<i64>,
    pub basis: RuleBasis,
    /// Decimal fraction for PCT basis (0.0825 = 8.25%)
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Currency amount for FLAT basis
    #[serde(default)]
    pub amount: Option<Decimal>,
    pub apply_scope: ApplyScope,
    /// Lower runs first
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    /// Tax categories this rule applies to
    #[serde(default)]
    pub tax_categories: Vec<i64>,
    pub is_active: bool,
}

/// Create tax rule payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRuleCreate {
    pub code: String,
    pub name: String,
    pub scope: RuleScope,
    pub store: Option<i64>,
    pub basis: RuleBasis,
    pub rate: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub apply_scope: ApplyScope,
    pub priority: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub tax_categories: Vec<i64>,
    pub is_active: bool,
}

/// Update tax rule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRuleUpdate {
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
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_categories: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
