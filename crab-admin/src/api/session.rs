//! Authenticated session lookup

use serde::{Deserialize, Serialize};

use crate::{ClientResult, HttpClient};

/// Who the bearer token belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// `GET /auth/me/`
pub async fn current_user<H: HttpClient>(http: &H) -> ClientResult<CurrentUser> {
    http.get("auth/me/").await
}
