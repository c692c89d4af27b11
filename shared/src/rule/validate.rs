//! Rule schema validation
//!
//! Every check runs independently so the editor can show all problems at
//! once rather than one per submit.

use super::axes::{DiscountTarget, RuleBasis, RuleKind, RuleScope};
use super::normalize::parse_decimal;
use super::schema::RuleTargetSchema;

impl RuleTargetSchema {
    /// Human-readable violations; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.code.trim().is_empty() {
            errors.push("Code is required".to_string());
        }
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }

        if self.scope == RuleScope::Store && !self.store.is_some_and(|id| id > 0) {
            errors.push("Store is required for store-scoped rules".to_string());
        }

        if self.kind == RuleKind::Discount {
            match self.target {
                DiscountTarget::All => {}
                DiscountTarget::Product if self.product_ids.is_empty() => {
                    errors.push("Select at least one product".to_string());
                }
                DiscountTarget::Variant if self.variant_ids.is_empty() => {
                    errors.push("Select at least one variant".to_string());
                }
                DiscountTarget::Category if !self.all_categories && self.category_ids.is_empty() => {
                    errors.push("Select at least one category or choose all categories".to_string());
                }
                DiscountTarget::Product | DiscountTarget::Variant | DiscountTarget::Category => {}
            }
        }

        match self.basis {
            RuleBasis::Pct if parse_decimal(&self.rate).is_none() => {
                errors.push("Rate must be a number".to_string());
            }
            RuleBasis::Flat if parse_decimal(&self.amount).is_none() => {
                errors.push("Amount must be a number".to_string());
            }
            RuleBasis::Pct | RuleBasis::Flat => {}
        }

        if let (Some(start), Some(end)) = (self.start_at, self.end_at)
            && end < start
        {
            errors.push("End time must not be before start time".to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
