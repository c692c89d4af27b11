//! Editor-side rule schema

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::axes::{ApplyScope, DiscountTarget, RuleBasis, RuleKind, RuleScope};
use super::normalize::{self, normalize_amount, normalize_rate, parse_decimal};
use super::{DEFAULT_PRIORITY, display};
use crate::models::{DiscountRule, DiscountRuleCreate, TaxRule, TaxRuleCreate};

/// Targeting axes of a tax or discount rule, as held by the editor
///
/// `rate` and `amount` keep the operator's raw text; they are normalized on
/// blur and parsed on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTargetSchema {
    pub kind: RuleKind,
    pub code: String,
    pub name: String,
    pub scope: RuleScope,
    pub store: Option<i64>,
    pub basis: RuleBasis,
    pub rate: String,
    pub amount: String,
    pub apply_scope: ApplyScope,
    /// Discount rules only
    pub target: DiscountTarget,
    /// Explicit "every category" (distinct from "none chosen yet")
    pub all_categories: bool,
    pub category_ids: Vec<i64>,
    pub product_ids: Vec<i64>,
    pub variant_ids: Vec<i64>,
    /// Tax rules only
    pub tax_categories: Vec<i64>,
    pub priority: i32,
    /// Discount rules only
    pub stackable: bool,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl RuleTargetSchema {
    /// Empty schema with defaults, for a "new rule" editor
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            code: String::new(),
            name: String::new(),
            scope: RuleScope::Global,
            store: None,
            basis: RuleBasis::Pct,
            rate: String::new(),
            amount: String::new(),
            apply_scope: ApplyScope::Line,
            target: DiscountTarget::All,
            all_categories: false,
            category_ids: Vec::new(),
            product_ids: Vec::new(),
            variant_ids: Vec::new(),
            tax_categories: Vec::new(),
            priority: DEFAULT_PRIORITY,
            stackable: false,
            start_at: None,
            end_at: None,
            is_active: true,
        }
    }

    pub fn from_tax_rule(rule: &TaxRule) -> Self {
        Self {
            code: rule.code.clone(),
            name: rule.name.clone(),
            scope: rule.scope,
            store: rule.store,
            basis: rule.basis,
            rate: decimal_text(rule.rate, 4),
            amount: decimal_text(rule.amount, 2),
            apply_scope: rule.apply_scope,
            tax_categories: rule.tax_categories.clone(),
            priority: rule.priority,
            start_at: rule.start_at,
            end_at: rule.end_at,
            is_active: rule.is_active,
            ..Self::new(RuleKind::Tax)
        }
    }

    /// A CATEGORY target stored with no categories is the "all categories" mode.
    pub fn from_discount_rule(rule: &DiscountRule) -> Self {
        Self {
            code: rule.code.clone(),
            name: rule.name.clone(),
            scope: rule.scope,
            store: rule.store,
            basis: rule.basis,
            rate: decimal_text(rule.rate, 4),
            amount: decimal_text(rule.amount, 2),
            apply_scope: rule.apply_scope,
            target: rule.target,
            all_categories: rule.target == DiscountTarget::Category && rule.category_ids.is_empty(),
            category_ids: rule.category_ids.clone(),
            product_ids: rule.product_ids.clone(),
            variant_ids: rule.variant_ids.clone(),
            priority: rule.priority,
            stackable: rule.stackable,
            start_at: rule.start_at,
            end_at: rule.end_at,
            is_active: rule.is_active,
            ..Self::new(RuleKind::Discount)
        }
    }

    /// Rate field lost focus
    pub fn blur_rate(&mut self) {
        if self.basis == RuleBasis::Pct {
            self.rate = normalize_rate(&self.rate);
        }
    }

    /// Amount field lost focus
    pub fn blur_amount(&mut self) {
        if self.basis == RuleBasis::Flat {
            self.amount = normalize_amount(&self.amount);
        }
    }

    /// Switching to "all categories" drops any hand-picked categories.
    pub fn set_all_categories(&mut self, all: bool) {
        self.all_categories = all;
        if all {
            self.category_ids.clear();
        }
    }

    /// "8.25%" / "5.00"
    pub fn value_label(&self) -> String {
        display::format_value(
            self.basis,
            parse_decimal(&normalize_rate(&self.rate)),
            parse_decimal(&self.amount),
        )
    }

    pub fn target_label(&self) -> String {
        match self.kind {
            RuleKind::Tax => "All items".to_string(),
            RuleKind::Discount => display::target_label(
                self.target,
                self.all_categories,
                self.category_ids.len(),
                self.product_ids.len(),
                self.variant_ids.len(),
            ),
        }
    }

    pub fn window_status(&self, now: DateTime<Utc>) -> display::WindowStatus {
        display::WindowStatus::at(self.start_at, self.end_at, now)
    }

    /// Validated create payload for a tax rule
    pub fn to_tax_payload(&self) -> Result<TaxRuleCreate, Vec<String>> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(violations);
        }
        let (rate, amount) = self.value_pair();
        Ok(TaxRuleCreate {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            scope: self.scope,
            store: self.scoped_store(),
            basis: self.basis,
            rate,
            amount,
            apply_scope: self.apply_scope,
            priority: self.priority,
            start_at: self.start_at,
            end_at: self.end_at,
            tax_categories: self.tax_categories.clone(),
            is_active: self.is_active,
        })
    }

    /// Validated create payload for a discount rule
    ///
    /// Only the id set matching the target is sent; "all categories" is sent
    /// as CATEGORY with an empty set.
    pub fn to_discount_payload(&self) -> Result<DiscountRuleCreate, Vec<String>> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(violations);
        }
        let (rate, amount) = self.value_pair();
        let pick = |target: DiscountTarget, ids: &Vec<i64>| {
            if self.target == target {
                ids.clone()
            } else {
                Vec::new()
            }
        };
        let category_ids = if self.all_categories {
            Vec::new()
        } else {
            pick(DiscountTarget::Category, &self.category_ids)
        };
        Ok(DiscountRuleCreate {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            scope: self.scope,
            store: self.scoped_store(),
            basis: self.basis,
            rate,
            amount,
            apply_scope: self.apply_scope,
            target: self.target,
            category_ids,
            product_ids: pick(DiscountTarget::Product, &self.product_ids),
            variant_ids: pick(DiscountTarget::Variant, &self.variant_ids),
            priority: self.priority,
            stackable: self.stackable,
            start_at: self.start_at,
            end_at: self.end_at,
            is_active: self.is_active,
        })
    }

    fn scoped_store(&self) -> Option<i64> {
        match self.scope {
            RuleScope::Global => None,
            RuleScope::Store => self.store,
        }
    }

    /// Rate/amount for the payload; the value not matching the basis is dropped.
    fn value_pair(&self) -> (Option<Decimal>, Option<Decimal>) {
        match self.basis {
            RuleBasis::Pct => (parse_decimal(&normalize_rate(&self.rate)), None),
            RuleBasis::Flat => (None, parse_decimal(&normalize_amount(&self.amount))),
        }
    }
}

fn decimal_text(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| normalize::fixed(v, dp))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn discount_rule() -> DiscountRule {
        DiscountRule {
            id: 9,
            code: "SUMMER".to_string(),
            name: "Summer sale".to_string(),
            scope: RuleScope::Store,
            store: Some(3),
            basis: RuleBasis::Pct,
            rate: Some(Decimal::new(15, 2)),
            amount: None,
            apply_scope: ApplyScope::Line,
            target: DiscountTarget::Category,
            category_ids: vec![],
            product_ids: vec![44],
            variant_ids: vec![],
            priority: 50,
            stackable: true,
            start_at: None,
            end_at: None,
            is_active: true,
        }
    }

    #[test]
    fn test_new_applies_defaults() {
        let schema = RuleTargetSchema::new(RuleKind::Discount);
        assert_eq!(schema.scope, RuleScope::Global);
        assert_eq!(schema.basis, RuleBasis::Pct);
        assert_eq!(schema.apply_scope, ApplyScope::Line);
        assert_eq!(schema.target, DiscountTarget::All);
        assert_eq!(schema.priority, 100);
        assert!(!schema.stackable);
        assert!(schema.is_active);
    }

    #[test]
    fn test_from_discount_rule_detects_all_categories() {
        let schema = RuleTargetSchema::from_discount_rule(&discount_rule());
        assert!(schema.all_categories);
        assert_eq!(schema.rate, "0.1500");
        assert_eq!(schema.amount, "");
        assert_eq!(schema.target_label(), "All categories");
        assert_eq!(schema.value_label(), "15%");
    }

    #[test]
    fn test_blur_only_touches_matching_basis() {
        let mut schema = RuleTargetSchema::new(RuleKind::Tax);
        schema.rate = "8.25".to_string();
        schema.amount = "3".to_string();
        schema.blur_rate();
        schema.blur_amount();
        assert_eq!(schema.rate, "0.0825");
        assert_eq!(schema.amount, "3");

        schema.basis = RuleBasis::Flat;
        schema.blur_amount();
        assert_eq!(schema.amount, "3.00");
    }

    #[test]
    fn test_tax_payload() {
        let mut schema = RuleTargetSchema::new(RuleKind::Tax);
        schema.code = "  VAT ".to_string();
        schema.name = "Standard VAT".to_string();
        schema.store = Some(4); // ignored for GLOBAL
        schema.rate = "21".to_string();
        schema.amount = "9.99".to_string();
        schema.tax_categories = vec![1, 2];

        let payload = schema.to_tax_payload().unwrap();
        assert_eq!(payload.code, "VAT");
        assert_eq!(payload.store, None);
        assert_eq!(payload.rate, Some(Decimal::new(21, 2)));
        assert_eq!(payload.amount, None);
        assert_eq!(payload.tax_categories, vec![1, 2]);
    }

    #[test]
    fn test_discount_payload_keeps_only_target_ids() {
        let mut schema = RuleTargetSchema::new(RuleKind::Discount);
        schema.code = "BOGO".to_string();
        schema.name = "Bogo".to_string();
        schema.basis = RuleBasis::Flat;
        schema.amount = "2.5".to_string();
        schema.target = DiscountTarget::Product;
        schema.product_ids = vec![10, 11];
        schema.category_ids = vec![3];
        schema.variant_ids = vec![7];

        let payload = schema.to_discount_payload().unwrap();
        assert_eq!(payload.product_ids, vec![10, 11]);
        assert!(payload.category_ids.is_empty());
        assert!(payload.variant_ids.is_empty());
        assert_eq!(payload.amount, Some(Decimal::new(250, 2)));
        assert_eq!(payload.rate, None);
    }

    #[test]
    fn test_payload_rejected_with_violations() {
        let schema = RuleTargetSchema::new(RuleKind::Discount);
        let errors = schema.to_discount_payload().unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_window_status() {
        let mut schema = RuleTargetSchema::new(RuleKind::Tax);
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(schema.window_status(now), display::WindowStatus::Always);
        schema.start_at = Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(schema.window_status(now), display::WindowStatus::Scheduled);
    }
}
