//! Register Model

use serde::{Deserialize, Serialize};

/// Cash register (POS terminal) bound to a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Register {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Owning store ID
    pub store: i64,
    pub is_active: bool,
}

/// Create register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCreate {
    pub code: String,
    pub name: String,
    pub store: i64,
}

/// Update register payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
