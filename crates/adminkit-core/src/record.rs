// ── Resource records and filter matching ──
//
// Records are heterogeneous: whatever fields the backend returns, kept in
// backend order. Matching works on the tagged JSON values directly and
// compares through an explicit canonical string form.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Name of the identity field on persisted records.
pub const ID_FIELD: &str = "id";

// ── Record ──────────────────────────────────────────────────────────

/// A single resource as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The record's identity, if it has a usable one.
    ///
    /// Missing, `null`, `false` and empty-string ids all mean "not yet
    /// persisted".
    pub fn id(&self) -> Option<&Value> {
        match self.0.get(ID_FIELD)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            id => Some(id),
        }
    }

    pub fn has_identity(&self) -> bool {
        self.id().is_some()
    }

    /// The record as a JSON object value, for request bodies.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

// ── Canonical form ──────────────────────────────────────────────────

/// Canonical string form used when comparing field values to filters.
///
/// `null` has no canonical form. Strings are themselves and booleans use
/// their JSON spelling. Integral floats drop the fraction, so `2.0` and `2`
/// agree. Arrays join their elements with commas (null elements become
/// empty) and objects use compact JSON.
pub fn canonical(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(canonical_number(n))),
        Value::Array(items) => Some(Cow::Owned(
            items
                .iter()
                .map(|v| canonical(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        )),
        Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

fn canonical_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

// ── Filter ──────────────────────────────────────────────────────────

/// Field-equality filter; every entry must match (logical AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Vec<(String, Value)>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` (compared in canonical form).
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((field.into(), value.into()));
        self
    }

    /// Require `field` to be `null`.
    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.equals(field, Value::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lenient match, used by `find_one`.
    ///
    /// A `null` filter value matches only a `null` field. A non-null filter
    /// value matches an equal canonical form, and also matches a field that
    /// is present and `null`. An absent field matches only a `null` filter.
    pub fn matches_lenient(&self, record: &Record) -> bool {
        self.0.iter().all(|(field, expected)| match record.get(field) {
            None => expected.is_null(),
            Some(Value::Null) => true,
            Some(_) if expected.is_null() => false,
            Some(actual) => canonical(actual) == canonical(expected),
        })
    }

    /// Strict match, used by `find_many`.
    ///
    /// Same as [`matches_lenient`](Self::matches_lenient) except that a
    /// `null` field paired with a non-null filter value does not match.
    pub fn matches_strict(&self, record: &Record) -> bool {
        self.0.iter().all(|(field, expected)| {
            let actual = record.get(field).unwrap_or(&Value::Null);
            match (actual.is_null(), expected.is_null()) {
                (true, true) => true,
                (true, false) | (false, true) => false,
                (false, false) => canonical(actual) == canonical(expected),
            }
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
