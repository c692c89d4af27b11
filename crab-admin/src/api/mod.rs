//! Typed REST API over the tenant resources
//!
//! Every resource follows one convention:
//! - `GET    /<resource>/?search=&ordering=&<filters>` → bare array or `{count, results}`
//! - `POST   /<resource>/`       → created record
//! - `PATCH  /<resource>/<id>/`  → updated record
//! - `DELETE /<resource>/<id>/`  → 2xx, empty body

mod resource;
mod rules;
mod session;

pub use resource::Resource;
pub use session::{CurrentUser, current_user};

use std::marker::PhantomData;

use shared::{EntityQuery, ListResponse, PageResult};

use crate::{ClientResult, HttpClient, NetworkHttpClient};

/// CRUD client for one resource type
#[derive(Debug, Clone)]
pub struct ResourceApi<R, H = NetworkHttpClient> {
    http: H,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, H: HttpClient> ResourceApi<R, H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub(crate) fn list_path() -> String {
        format!("{}/", R::PATH)
    }

    pub(crate) fn item_path(id: i64) -> String {
        format!("{}/{}/", R::PATH, id)
    }

    /// Fetch one page of rows matching `query`
    ///
    /// An ordering outside `R::SORTABLE` fails without a request.
    pub async fn list(&self, query: &EntityQuery) -> ClientResult<PageResult<R>> {
        query.check_ordering(R::SORTABLE)?;
        let resp: ListResponse<R> = self
            .http
            .get_query(&Self::list_path(), &query.to_pairs())
            .await?;
        Ok(resp.into_page())
    }

    pub async fn get(&self, id: i64) -> ClientResult<R> {
        self.http.get(&Self::item_path(id)).await
    }

    pub async fn create(&self, payload: &R::Create) -> ClientResult<R> {
        self.http.post(&Self::list_path(), payload).await
    }

    pub async fn update(&self, id: i64, patch: &R::Update) -> ClientResult<R> {
        self.http.patch(&Self::item_path(id), patch).await
    }

    /// `PATCH {"is_active": ...}`
    pub async fn set_active(&self, id: i64, active: bool) -> ClientResult<R> {
        self.update(id, &R::activation_patch(active)).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&Self::item_path(id)).await
    }
}
