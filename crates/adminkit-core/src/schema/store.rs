// ── Lazily loaded schema document ──
//
// The OpenAPI document is fetched at most once per store. Concurrent
// first callers share a single pending load; a failed load leaves the
// cell empty so the next caller tries again.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use adminkit_api::HttpClient;

use super::document::SchemaDocument;
use crate::error::CoreError;

/// Holder for the process-lifetime schema document.
#[derive(Default)]
pub struct SchemaStore {
    document: OnceCell<Arc<SchemaDocument>>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out with `document` already loaded.
    pub fn preloaded(document: SchemaDocument) -> Self {
        Self {
            document: OnceCell::new_with(Some(Arc::new(document))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.initialized()
    }

    /// The document, if it has been loaded.
    pub fn document(&self) -> Option<Arc<SchemaDocument>> {
        self.document.get().map(Arc::clone)
    }

    /// Fetch `path` through `http` unless the document is already loaded.
    pub async fn ensure_loaded<C: HttpClient>(
        &self,
        http: &C,
        path: &str,
    ) -> Result<Arc<SchemaDocument>, CoreError> {
        let document = self
            .document
            .get_or_try_init(|| async {
                info!(path, "loading schema document");
                let body = http.get(path).await.map_err(|e| CoreError::api(path, e))?;
                let document = SchemaDocument::from_openapi(body)?;
                debug!(
                    types = document.types().len(),
                    paths = document.paths().len(),
                    "schema document loaded"
                );
                Ok::<_, CoreError>(Arc::new(document))
            })
            .await?;
        Ok(Arc::clone(document))
    }
}
