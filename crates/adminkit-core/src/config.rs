// ── Runtime data-layer configuration ──
//
// Describes how the store talks to the backend: where the schema lives,
// how list requests are ordered, and how foreign-key choices are labelled.
// Never touches disk; `adminkit-config` builds one from files and env.

use serde::{Deserialize, Serialize};

/// Default OpenAPI introspection path.
pub const DEFAULT_SCHEMA_PATH: &str = "/back/api/schema/?format=json";

// ── Ordering ────────────────────────────────────────────────────────

/// Picks the `ordering` parameter for an endpoint by substring match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingRule {
    /// Substring the endpoint must contain (e.g. `"/people/"`).
    pub contains: String,
    /// Ordering directive sent to the backend (e.g. `"first_name"`).
    pub ordering: String,
}

/// Fixed ordering heuristic for list requests.
///
/// Rules are tried in order; the first whose `contains` occurs in the
/// endpoint wins. Everything else uses `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingPolicy {
    #[serde(default)]
    pub rules: Vec<OrderingRule>,
    #[serde(default = "default_ordering")]
    pub default: String,
}

fn default_ordering() -> String {
    "-updated_date".into()
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self {
            rules: vec![OrderingRule {
                contains: "/people/".into(),
                ordering: "first_name".into(),
            }],
            default: default_ordering(),
        }
    }
}

impl OrderingPolicy {
    pub fn ordering_for(&self, endpoint: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| endpoint.contains(rule.contains.as_str()))
            .map_or(self.default.as_str(), |rule| rule.ordering.as_str())
    }
}

// ── StoreConfig ─────────────────────────────────────────────────────

/// Configuration for an [`ItemStore`](crate::ItemStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the OpenAPI document, relative to the client's base URL.
    pub schema_path: String,
    /// Ordering heuristic applied to every list request.
    pub ordering: OrderingPolicy,
    /// Record field used as the label of foreign-key choices.
    pub label_field: String,
    /// How many levels of `$ref` indirection the resolver expands.
    pub max_resolve_depth: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            schema_path: DEFAULT_SCHEMA_PATH.into(),
            ordering: OrderingPolicy::default(),
            label_field: "name".into(),
            max_resolve_depth: 1,
        }
    }
}
