// ── OpenAPI schema document ──
//
// Only the two parts the data layer reads are modelled: the type
// definitions under `components.schemas` and the `paths` index.
// Unknown keys are carried through untouched so resolved definitions
// serialize back out with everything the UI expects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::record::{ID_FIELD, Record};

/// JSON pointer, inside a path item, to the item `$ref` of a GET list response.
const LIST_ITEM_REF_POINTER: &str =
    "/get/responses/200/content/application~1json/schema/items/$ref";

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Last segment of a `$ref` (`"#/components/schemas/Person"` -> `"Person"`).
pub fn ref_name(reference: &str) -> &str {
    reference
        .rsplit_once('/')
        .map_or(reference, |(_, name)| name)
}

// ── Type definitions ────────────────────────────────────────────────

/// A `{ "$ref": ... }` reference, possibly with sibling keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One renderable `(label, value)` option for a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: Value,
    pub value: Value,
}

impl Choice {
    /// Enum literal used as both label and value.
    pub fn literal(value: Value) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Foreign-key option: label from `label_field`, value from the id.
    pub fn from_record(record: &Record, label_field: &str) -> Self {
        Self {
            label: record.get(label_field).cloned().unwrap_or(Value::Null),
            value: record.get(ID_FIELD).cloned().unwrap_or(Value::Null),
        }
    }
}

/// A property of a type definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Direct reference to another type.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Array element schema; may itself be a reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaRef>,
    /// Options attached by reference resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Expanded target type, when resolving more than one level deep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Box<TypeDefinition>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    /// The type this property points at, directly or as an array of it.
    pub fn target_ref(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .or_else(|| self.items.as_ref()?.reference.as_deref())
    }
}

/// A named shape from `components.schemas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Property>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeDefinition {
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    pub fn is_object(&self) -> bool {
        self.kind.as_deref() == Some("object")
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.as_ref()?.get(name)
    }
}

// ── Document ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OpenApi {
    components: Components,
    paths: IndexMap<String, Value>,
}

#[derive(Deserialize)]
struct Components {
    schemas: IndexMap<String, TypeDefinition>,
}

/// The loaded API schema: type definitions plus the path index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    types: IndexMap<String, TypeDefinition>,
    paths: IndexMap<String, Value>,
}

impl SchemaDocument {
    pub fn new(types: IndexMap<String, TypeDefinition>, paths: IndexMap<String, Value>) -> Self {
        Self { types, paths }
    }

    /// Parse an OpenAPI document body.
    pub fn from_openapi(body: Value) -> Result<Self, CoreError> {
        let doc: OpenApi =
            serde_json::from_value(body).map_err(|e| CoreError::MalformedSchema {
                message: e.to_string(),
            })?;
        Ok(Self::new(doc.components.schemas, doc.paths))
    }

    pub fn types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    pub fn paths(&self) -> &IndexMap<String, Value> {
        &self.paths
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Type name of the items returned by a GET on `path`.
    pub fn type_name_for_path(&self, path: &str) -> Option<&str> {
        let reference = self.paths.get(path)?.pointer(LIST_ITEM_REF_POINTER)?;
        reference.as_str().map(ref_name)
    }

    /// First path, in document order, whose GET lists items of `type_name`.
    pub fn path_for_type(&self, type_name: &str) -> Option<&str> {
        self.paths.iter().find_map(|(path, item)| {
            let reference = item.pointer(LIST_ITEM_REF_POINTER)?.as_str()?;
            let name = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
            (name == type_name).then_some(path.as_str())
        })
    }
}
