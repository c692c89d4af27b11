//! Tax Category Model

use serde::{Deserialize, Serialize};

/// Tax category (e.g. "Food", "Alcohol") referenced by tax rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxCategory {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create tax category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCategoryCreate {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Update tax category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxCategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
