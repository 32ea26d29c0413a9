// ── Request identity ──
//
// A cached collection is identified by its endpoint plus the query
// parameters it was fetched with. Parameters are kept sorted so the
// same set always encodes to the same string.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

// ── QueryParams ─────────────────────────────────────────────────────

/// Caller-supplied query parameters for a collection request.
///
/// Backed by a `BTreeMap`, so iteration and encoding are in key order
/// no matter how the parameters were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` encoding, keys in sorted order.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── CacheKey ────────────────────────────────────────────────────────

/// Stable identity of an `(endpoint, params)` request.
///
/// The endpoint is concatenated with the canonical parameter encoding,
/// with no separator. Endpoints or values containing reserved encoding
/// characters can collide with one another; such inputs are not
/// expected from an admin UI and are accepted as a known limitation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(endpoint: &str, params: &QueryParams) -> Self {
        let mut key = String::with_capacity(endpoint.len() + params.len() * 16);
        key.push_str(endpoint);
        key.push_str(&params.encode());
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_without_params_is_endpoint() {
        let key = CacheKey::new("/back/api/people/", &QueryParams::new());
        assert_eq!(key.as_str(), "/back/api/people/");
    }

    #[test]
    fn key_is_stable_under_param_order() {
        let a = QueryParams::new().with("status", "2").with("topic", "7");
        let b = QueryParams::new().with("topic", "7").with("status", "2");

        assert_eq!(
            CacheKey::new("/back/api/items/", &a),
            CacheKey::new("/back/api/items/", &b)
        );
        assert_eq!(
            CacheKey::new("/back/api/items/", &a).as_str(),
            "/back/api/items/status=2&topic=7"
        );
    }

    #[test]
    fn distinct_params_give_distinct_keys() {
        let a = QueryParams::from_iter([("status", "2")]);
        let b = QueryParams::from_iter([("status", "3")]);

        assert_ne!(
            CacheKey::new("/back/api/items/", &a),
            CacheKey::new("/back/api/items/", &b)
        );
    }

    #[test]
    fn values_are_form_encoded() {
        let params = QueryParams::from_iter([("q", "hello world&more")]);
        assert_eq!(params.encode(), "q=hello+world%26more");
    }

    #[test]
    fn insert_replaces_value() {
        let mut params = QueryParams::new();
        params.insert("page", "1").insert("page", "2");
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.len(), 1);
    }
}
