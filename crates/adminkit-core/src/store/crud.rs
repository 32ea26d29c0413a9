// ── CRUD orchestration ──
//
// Reads go through the resource cache; every mutation is followed by a
// forced re-fetch of the endpoint's list. Nothing is patched locally.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use adminkit_api::HttpClient;

use super::ItemStore;
use crate::cache_key::{CacheKey, QueryParams};
use crate::error::CoreError;
use crate::record::{Filter, Record, canonical};

impl<C: HttpClient> ItemStore<C> {
    /// Records of `endpoint`, from cache unless missing or `force`.
    pub async fn list(
        &self,
        endpoint: &str,
        params: &QueryParams,
        force: bool,
    ) -> Result<Arc<Vec<Record>>, CoreError> {
        let key = CacheKey::new(endpoint, params);

        if !force {
            if let Some(items) = self.inner.cache.get(&key) {
                debug!(cache_key = %key, count = items.len(), "serving list from cache");
                return Ok(items);
            }
        }

        let url = self.list_url(endpoint, params);
        debug!(cache_key = %key, force, "fetching list");

        let body = self
            .inner
            .http
            .get(&url)
            .await
            .map_err(|e| CoreError::api(&url, e))?;
        let records: Vec<Record> =
            serde_json::from_value(body).map_err(|e| CoreError::UnexpectedPayload {
                url: url.clone(),
                message: format!("expected an array of objects: {e}"),
            })?;

        Ok(self.inner.cache.store(key, records))
    }

    /// First cached record matching `filter` (lenient null handling).
    pub async fn find_one(
        &self,
        endpoint: &str,
        filter: &Filter,
        params: &QueryParams,
        force: bool,
    ) -> Result<Option<Record>, CoreError> {
        let items = self.list(endpoint, params, force).await?;
        Ok(items
            .iter()
            .find(|item| filter.matches_lenient(item))
            .cloned())
    }

    /// All cached records matching `filter` (strict null handling).
    pub async fn find_many(
        &self,
        endpoint: &str,
        filter: &Filter,
        params: &QueryParams,
        force: bool,
    ) -> Result<Vec<Record>, CoreError> {
        let items = self.list(endpoint, params, force).await?;
        Ok(items
            .iter()
            .filter(|item| filter.matches_strict(item))
            .cloned()
            .collect())
    }

    /// Delete record `id`, then re-fetch the endpoint's list.
    pub async fn remove(&self, endpoint: &str, id: &Value) -> Result<(), CoreError> {
        let segment = canonical(id).ok_or_else(|| CoreError::MissingIdentity {
            endpoint: endpoint.to_owned(),
        })?;
        let url = format!("{endpoint}{segment}");
        debug!(%url, "deleting record");

        self.inner
            .http
            .delete(&url)
            .await
            .map_err(|e| CoreError::api(&url, e))?;

        self.list(endpoint, &QueryParams::new(), true).await?;
        Ok(())
    }

    /// Create or partially update `record`, then re-fetch the endpoint's list.
    ///
    /// Records with an identity are PATCHed, others are POSTed. The session's
    /// `saving_item` flag is held for the whole call and released on every
    /// exit path. Returns the backend's response body.
    pub async fn upsert(&self, endpoint: &str, record: &Record) -> Result<Value, CoreError> {
        let _saving = self.inner.session.begin_save();
        let body = record.to_value();

        let saved = match record.id().and_then(canonical) {
            Some(id) => {
                let url = format!("{endpoint}{id}/");
                debug!(%url, "updating record");
                self.inner
                    .http
                    .patch(&url, &body)
                    .await
                    .map_err(|e| CoreError::api(&url, e))?
            }
            None => {
                debug!(endpoint, "creating record");
                self.inner
                    .http
                    .post(endpoint, &body)
                    .await
                    .map_err(|e| CoreError::api(endpoint, e))?
            }
        };

        self.list(endpoint, &QueryParams::new(), true).await?;
        Ok(saved)
    }

    /// `endpoint?ordering=<heuristic>[&<params>]`
    fn list_url(&self, endpoint: &str, params: &QueryParams) -> String {
        let ordering = self.inner.config.ordering.ordering_for(endpoint);
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("ordering", ordering)
            .extend_pairs(params.iter())
            .finish();
        format!("{endpoint}?{query}")
    }
}
