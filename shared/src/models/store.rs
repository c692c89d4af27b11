//! Store Model

use serde::{Deserialize, Serialize};

/// Physical store (location) of the tenant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    /// IANA timezone name (e.g. "Europe/Madrid")
    #[serde(default)]
    pub timezone: Option<String>,
    pub is_active: bool,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub timezone: Option<String>,
}

/// Update store payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
