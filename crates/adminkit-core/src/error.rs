// ── Core error types ──
//
// Transport failures are wrapped, never swallowed: `CoreError::Api` keeps
// the original `adminkit_api::Error` as its source. "Not found" lookups are
// not errors at all; they surface as `None` or empty results.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Backend ──────────────────────────────────────────────────────
    #[error("Request to {url} failed: {source}")]
    Api {
        url: String,
        #[source]
        source: adminkit_api::Error,
    },

    #[error("Unexpected payload from {url}: {message}")]
    UnexpectedPayload { url: String, message: String },

    #[error("Cannot address a record of {endpoint} with a null id")]
    MissingIdentity { endpoint: String },

    // ── Schema ───────────────────────────────────────────────────────
    #[error("Malformed schema document: {message}")]
    MalformedSchema { message: String },

    #[error("Schema type not found: {name}")]
    UnknownType { name: String },

    #[error("No list endpoint returns items of type {type_name}")]
    NoListEndpoint { type_name: String },
}

impl CoreError {
    pub(crate) fn api(url: &str, source: adminkit_api::Error) -> Self {
        Self::Api {
            url: url.to_owned(),
            source,
        }
    }

    /// The underlying transport error, if this is one.
    pub fn api_error(&self) -> Option<&adminkit_api::Error> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// HTTP status of a backend rejection, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(adminkit_api::Error::status)
    }
}
