//! Schema-driven data layer between `adminkit-api` and admin UI consumers.
//!
//! This crate owns everything a generic admin front end needs to render any
//! resource type without per-resource code:
//!
//! - **[`ItemStore`]**: central facade. Lists collections through the
//!   [`ResourceCache`] (keyed by [`CacheKey`]), finds records with
//!   [`Filter`]s, navigates to adjacent records, and performs
//!   `upsert`/`remove` followed by a forced re-fetch of the collection.
//!
//! - **[`SchemaStore`]**: holds the OpenAPI document, fetched at most once
//!   per store. [`ItemStore::get_type_def`] looks types up by name or by list
//!   endpoint and optionally resolves their references into renderable
//!   [`Choice`] lists.
//!
//! - **[`EditSession`]**: observable add/edit/saving state for the UI. The
//!   saving flag is owned by `upsert` and always released.
//!
//! The HTTP transport is injected through [`adminkit_api::HttpClient`].

pub mod cache_key;
pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache_key::{CacheKey, QueryParams};
pub use config::{DEFAULT_SCHEMA_PATH, OrderingPolicy, OrderingRule, StoreConfig};
pub use error::CoreError;
pub use record::{Filter, ID_FIELD, Record};
pub use schema::{Choice, Property, SchemaDocument, SchemaStore, TypeDefinition, TypeSelector};
pub use session::{EditSession, EditState};
pub use store::{ItemStore, ResourceCache};

pub use adminkit_api::HttpClient;
