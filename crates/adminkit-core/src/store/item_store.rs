// ── ItemStore facade ──
//
// One store per backend: it owns the resource cache, the schema document
// and the edit session, and routes every request through the injected
// HTTP client.

use std::sync::Arc;

use adminkit_api::HttpClient;

use super::cache::ResourceCache;
use crate::config::StoreConfig;
use crate::schema::{SchemaDocument, SchemaStore};
use crate::session::EditSession;

/// The data layer's entry point.
///
/// Cheaply cloneable via `Arc<StoreInner>`; clones share the same cache,
/// schema and session.
pub struct ItemStore<C> {
    pub(crate) inner: Arc<StoreInner<C>>,
}

pub(crate) struct StoreInner<C> {
    pub(crate) http: C,
    pub(crate) config: StoreConfig,
    pub(crate) cache: ResourceCache,
    pub(crate) schema: SchemaStore,
    pub(crate) session: EditSession,
}

impl<C> Clone for ItemStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: HttpClient> ItemStore<C> {
    /// Create a store. Nothing is fetched until the first request.
    pub fn new(http: C, config: StoreConfig) -> Self {
        Self::with_schema_store(http, config, SchemaStore::new())
    }

    /// Create a store whose schema document is already known.
    pub fn with_schema(http: C, config: StoreConfig, document: SchemaDocument) -> Self {
        Self::with_schema_store(http, config, SchemaStore::preloaded(document))
    }

    fn with_schema_store(http: C, config: StoreConfig, schema: SchemaStore) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                http,
                config,
                cache: ResourceCache::new(),
                schema,
                session: EditSession::new(),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn http(&self) -> &C {
        &self.inner.http
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.inner.cache
    }

    pub fn schema(&self) -> &SchemaStore {
        &self.inner.schema
    }

    pub fn session(&self) -> &EditSession {
        &self.inner.session
    }
}
