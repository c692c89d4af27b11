//! HTTP client for the tenant REST API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{AdminConfig, ClientError, ClientResult};

/// HTTP client trait
///
/// Implemented over reqwest by [`NetworkHttpClient`]; the token attached to
/// each request is owned by the implementation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_query(path, &[]).await
    }
    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T>;
    /// 2xx with an empty body is success; the body is never parsed.
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn token(&self) -> Option<&str>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &AdminConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.send_json(req).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        self.send_json(req).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<T> {
        let req = self.client.patch(self.url(path)).json(body);
        self.send_json(req).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let req = self.client.delete(self.url(path));
        self.send(req).await?;
        Ok(())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Map a non-2xx response to a [`ClientError`]
pub fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let message = error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Error text for a non-2xx body
///
/// JSON body: its `detail` field, or the raw JSON. Otherwise the raw text,
/// or the status reason when the body is empty.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let text = body.trim();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        return match json.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(detail) => detail.to_string(),
            None => json.to_string(),
        };
    }
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
