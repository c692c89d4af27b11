//! Rule axes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown wire name for a rule axis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {axis} '{value}' (expected one of: {expected})")]
pub struct AxisParseError {
    pub axis: &'static str,
    pub value: String,
    pub expected: String,
}

/// Which record a schema is edited for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Tax,
    Discount,
}

/// Tenant-wide or single-store
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    #[default]
    Global,
    Store,
}

/// Percentage of the base or a fixed currency amount
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleBasis {
    #[default]
    Pct,
    Flat,
}

/// Per line item or once per receipt
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyScope {
    #[default]
    Line,
    Receipt,
}

/// Catalog entities a discount applies to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountTarget {
    #[default]
    All,
    Category,
    Product,
    Variant,
}

impl RuleScope {
    pub const ALL: [Self; 2] = [Self::Global, Self::Store];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Store => "STORE",
        }
    }
}

impl RuleBasis {
    pub const ALL: [Self; 2] = [Self::Pct, Self::Flat];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pct => "PCT",
            Self::Flat => "FLAT",
        }
    }
}

impl ApplyScope {
    pub const ALL: [Self; 2] = [Self::Line, Self::Receipt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "LINE",
            Self::Receipt => "RECEIPT",
        }
    }
}

impl DiscountTarget {
    pub const ALL: [Self; 4] = [Self::All, Self::Category, Self::Product, Self::Variant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Category => "CATEGORY",
            Self::Product => "PRODUCT",
            Self::Variant => "VARIANT",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(RuleScope, RuleBasis, ApplyScope, DiscountTarget);

/// Case-insensitive parse of the wire name ("store", "STORE")
macro_rules! from_str_by_name {
    ($($ty:ty => $axis:literal),+) => {
        $(
            impl FromStr for $ty {
                type Err = AxisParseError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let raw = s.trim();
                    Self::ALL
                        .into_iter()
                        .find(|v| v.as_str().eq_ignore_ascii_case(raw))
                        .ok_or_else(|| AxisParseError {
                            axis: $axis,
                            value: raw.to_string(),
                            expected: Self::ALL.map(|v| v.as_str()).join(", "),
                        })
                }
            }
        )+
    };
}

from_str_by_name!(
    RuleScope => "scope",
    RuleBasis => "basis",
    ApplyScope => "apply scope",
    DiscountTarget => "target"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_as_str() {
        for scope in [RuleScope::Global, RuleScope::Store] {
            assert_eq!(
                serde_json::to_value(scope).unwrap(),
                serde_json::Value::String(scope.as_str().to_string())
            );
        }
        for target in [
            DiscountTarget::All,
            DiscountTarget::Category,
            DiscountTarget::Product,
            DiscountTarget::Variant,
        ] {
            assert_eq!(
                serde_json::to_value(target).unwrap(),
                serde_json::Value::String(target.as_str().to_string())
            );
        }
        let basis: RuleBasis = serde_json::from_str(r#""FLAT""#).unwrap();
        assert_eq!(basis, RuleBasis::Flat);
        let apply: ApplyScope = serde_json::from_str(r#""RECEIPT""#).unwrap();
        assert_eq!(apply.to_string(), "RECEIPT");
    }

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("store".parse::<RuleScope>(), Ok(RuleScope::Store));
        assert_eq!(" FLAT ".parse::<RuleBasis>(), Ok(RuleBasis::Flat));
        assert_eq!("Receipt".parse::<ApplyScope>(), Ok(ApplyScope::Receipt));
        assert_eq!("PRODUCT".parse::<DiscountTarget>(), Ok(DiscountTarget::Product));

        let err = "brand".parse::<DiscountTarget>().unwrap_err();
        assert_eq!(err.axis, "target");
        assert_eq!(
            err.to_string(),
            "Unknown target 'brand' (expected one of: ALL, CATEGORY, PRODUCT, VARIANT)"
        );
    }
}
