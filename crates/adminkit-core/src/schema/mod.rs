// ── Schema layer ──
//
// Lazily loaded OpenAPI document plus the resolver that turns `$ref`
// and `enum` declarations into renderable choice lists.

mod document;
mod resolver;
mod store;

pub use document::{Choice, Property, SchemaDocument, SchemaRef, TypeDefinition, ref_name};
pub use resolver::TypeSelector;
pub use store::SchemaStore;
