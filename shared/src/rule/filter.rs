//! List-view filters over the rule axes

use super::axes::{ApplyScope, DiscountTarget, RuleBasis, RuleScope};
use crate::query::EntityQuery;

/// Axis filters for the tax / discount rule lists
///
/// Keys match the editor fields one-to-one so a list filtered by
/// `scope=STORE&store=3` shows exactly the rules the editor would save with
/// those values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub scope: Option<RuleScope>,
    pub store: Option<i64>,
    pub basis: Option<RuleBasis>,
    pub apply_scope: Option<ApplyScope>,
    /// Discount rules only
    pub target: Option<DiscountTarget>,
    /// Discount rules only
    pub stackable: Option<bool>,
}

impl RuleFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Add the set axes to `query` as filter keys
    pub fn apply(&self, mut query: EntityQuery) -> EntityQuery {
        if let Some(scope) = self.scope {
            query = query.filter("scope", scope.as_str());
        }
        if let Some(store) = self.store {
            query = query.filter("store", store);
        }
        if let Some(basis) = self.basis {
            query = query.filter("basis", basis.as_str());
        }
        if let Some(apply_scope) = self.apply_scope {
            query = query.filter("apply_scope", apply_scope.as_str());
        }
        if let Some(target) = self.target {
            query = query.filter("target", target.as_str());
        }
        if let Some(stackable) = self.stackable {
            query = query.filter("stackable", stackable);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_leaves_query_untouched() {
        let filter = RuleFilter::default();
        assert!(filter.is_empty());
        let query = filter.apply(EntityQuery::new().search("vat"));
        assert_eq!(query, EntityQuery::new().search("vat"));
    }

    #[test]
    fn test_axes_become_query_keys() {
        let filter = RuleFilter {
            scope: Some(RuleScope::Store),
            store: Some(3),
            basis: Some(RuleBasis::Flat),
            apply_scope: Some(ApplyScope::Receipt),
            target: Some(DiscountTarget::Variant),
            stackable: Some(false),
        };
        let pairs = filter.apply(EntityQuery::new()).to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("apply_scope".to_string(), "RECEIPT".to_string()),
                ("basis".to_string(), "FLAT".to_string()),
                ("scope".to_string(), "STORE".to_string()),
                ("stackable".to_string(), "false".to_string()),
                ("store".to_string(), "3".to_string()),
                ("target".to_string(), "VARIANT".to_string()),
            ]
        );
    }
}
