// ── Next / previous record ──
//
// Navigation follows the cached backend order exactly; no sort is
// applied on this side.

use serde_json::Value;

use adminkit_api::HttpClient;

use super::ItemStore;
use crate::cache_key::QueryParams;
use crate::error::CoreError;
use crate::record::{ID_FIELD, Record};

impl<C: HttpClient> ItemStore<C> {
    /// The record `direction` positions away from the one whose id is
    /// `current_id`, or `None` if that record is unknown or the offset
    /// leaves the collection.
    pub async fn get_adjacent(
        &self,
        endpoint: &str,
        current_id: &Value,
        direction: isize,
        params: &QueryParams,
        force: bool,
    ) -> Result<Option<Record>, CoreError> {
        let items = self.list(endpoint, params, force).await?;

        let Some(index) = items
            .iter()
            .position(|item| item.get(ID_FIELD) == Some(current_id))
        else {
            return Ok(None);
        };

        Ok(index
            .checked_add_signed(direction)
            .and_then(|target| items.get(target))
            .cloned())
    }

    pub async fn next_item(
        &self,
        endpoint: &str,
        current_id: &Value,
        params: &QueryParams,
    ) -> Result<Option<Record>, CoreError> {
        self.get_adjacent(endpoint, current_id, 1, params, false)
            .await
    }

    pub async fn previous_item(
        &self,
        endpoint: &str,
        current_id: &Value,
        params: &QueryParams,
    ) -> Result<Option<Record>, CoreError> {
        self.get_adjacent(endpoint, current_id, -1, params, false)
            .await
    }
}
