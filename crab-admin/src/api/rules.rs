//! Saving rule editor state

use shared::RuleTargetSchema;
use shared::models::{DiscountRule, TaxRule};

use super::ResourceApi;
use crate::{ClientError, ClientResult, HttpClient};

impl<H: HttpClient> ResourceApi<TaxRule, H> {
    /// Validate and submit; `id = None` creates, `Some` updates in place.
    ///
    /// Nothing is sent when validation fails.
    pub async fn save_schema(&self, id: Option<i64>, schema: &RuleTargetSchema) -> ClientResult<TaxRule> {
        let payload = schema.to_tax_payload().map_err(ClientError::InvalidInput)?;
        match id {
            None => self.create(&payload).await,
            Some(id) => self.http().patch(&Self::item_path(id), &payload).await,
        }
    }
}

impl<H: HttpClient> ResourceApi<DiscountRule, H> {
    /// Validate and submit; `id = None` creates, `Some` updates in place.
    ///
    /// Nothing is sent when validation fails.
    pub async fn save_schema(
        &self,
        id: Option<i64>,
        schema: &RuleTargetSchema,
    ) -> ClientResult<DiscountRule> {
        let payload = schema.to_discount_payload().map_err(ClientError::InvalidInput)?;
        match id {
            None => self.create(&payload).await,
            Some(id) => self.http().patch(&Self::item_path(id), &payload).await,
        }
    }
}
