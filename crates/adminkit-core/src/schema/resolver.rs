// ── Reference resolution ──
//
// Walks a type definition and attaches `choices` to every property that
// points at another type: enum literals for enumerations, `(label, id)`
// pairs fetched from the list endpoint for object types. Expansion is
// bounded by an explicit depth and a visited set of type names on the
// current path, so cyclic type graphs terminate.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use adminkit_api::HttpClient;

use super::document::{Choice, SchemaDocument, TypeDefinition, ref_name};
use crate::cache_key::QueryParams;
use crate::error::CoreError;
use crate::store::ItemStore;

/// How a caller names the type it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSelector<'a> {
    /// Explicit `components.schemas` name.
    Name(&'a str),
    /// List endpoint path; the type is that of its items.
    Path(&'a str),
}

impl<C: HttpClient> ItemStore<C> {
    /// Load the schema document unless it is already loaded.
    pub async fn ensure_loaded(&self) -> Result<Arc<SchemaDocument>, CoreError> {
        self.inner
            .schema
            .ensure_loaded(&self.inner.http, &self.inner.config.schema_path)
            .await
    }

    /// Type name of the items listed at `path`.
    pub async fn get_type_name(&self, path: &str) -> Result<Option<String>, CoreError> {
        let document = self.ensure_loaded().await?;
        Ok(document.type_name_for_path(path).map(str::to_owned))
    }

    /// List endpoint whose items are of type `type_name`.
    pub async fn get_path_for_type(&self, type_name: &str) -> Result<Option<String>, CoreError> {
        let document = self.ensure_loaded().await?;
        Ok(document.path_for_type(type_name).map(str::to_owned))
    }

    /// A copy of the selected type definition, optionally with references
    /// resolved to the configured depth. `None` if no such type exists.
    pub async fn get_type_def(
        &self,
        selector: TypeSelector<'_>,
        resolve_refs: bool,
    ) -> Result<Option<TypeDefinition>, CoreError> {
        self.get_type_def_with_depth(selector, resolve_refs, self.inner.config.max_resolve_depth)
            .await
    }

    /// Like [`get_type_def`](Self::get_type_def) with an explicit depth.
    pub async fn get_type_def_with_depth(
        &self,
        selector: TypeSelector<'_>,
        resolve_refs: bool,
        max_depth: usize,
    ) -> Result<Option<TypeDefinition>, CoreError> {
        let document = self.ensure_loaded().await?;

        let name = match selector {
            TypeSelector::Name(name) => Some(name),
            TypeSelector::Path(path) => document.type_name_for_path(path),
        };
        let Some((name, definition)) =
            name.and_then(|name| Some((name, document.type_def(name)?.clone())))
        else {
            return Ok(None);
        };

        if !resolve_refs {
            return Ok(Some(definition));
        }

        let mut visited = HashSet::from([name.to_owned()]);
        self.resolve_level(&document, definition, 0, max_depth, &mut visited)
            .await
            .map(Some)
    }

    fn resolve_level<'a>(
        &'a self,
        document: &'a SchemaDocument,
        mut definition: TypeDefinition,
        depth: usize,
        max_depth: usize,
        visited: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Result<TypeDefinition, CoreError>> {
        Box::pin(async move {
            if depth >= max_depth {
                return Ok(definition);
            }

            if definition.properties.is_none() {
                adopt_first_alternative(document, &mut definition)?;
            }
            let Some(properties) = definition.properties.as_mut() else {
                warn!("type definition has neither properties nor oneOf; skipping resolution");
                return Ok(definition);
            };

            for (prop_name, property) in properties.iter_mut() {
                let Some(reference) = property.target_ref() else {
                    continue;
                };
                let target_name = ref_name(reference).to_owned();
                let target = document
                    .type_def(&target_name)
                    .ok_or_else(|| CoreError::UnknownType {
                        name: target_name.clone(),
                    })?;

                if let Some(values) = &target.enum_values {
                    property.choices = Some(values.iter().cloned().map(Choice::literal).collect());
                } else if target.is_object() {
                    let path = document.path_for_type(&target_name).ok_or_else(|| {
                        CoreError::NoListEndpoint {
                            type_name: target_name.clone(),
                        }
                    })?;
                    let records = self.list(path, &QueryParams::new(), true).await?;
                    let label_field = &self.inner.config.label_field;
                    property.choices = Some(
                        records
                            .iter()
                            .map(|record| Choice::from_record(record, label_field))
                            .collect(),
                    );
                }
                debug!(
                    property = %prop_name,
                    target = %target_name,
                    choices = property.choices.as_ref().map_or(0, Vec::len),
                    "resolved reference"
                );

                if target.is_object()
                    && depth + 1 < max_depth
                    && visited.insert(target_name.clone())
                {
                    let nested = self
                        .resolve_level(document, target.clone(), depth + 1, max_depth, visited)
                        .await;
                    visited.remove(&target_name);
                    property.resolved = Some(Box::new(nested?));
                }
            }

            Ok(definition)
        })
    }
}

/// Give a properties-less union the shape of its first alternative.
fn adopt_first_alternative(
    document: &SchemaDocument,
    definition: &mut TypeDefinition,
) -> Result<(), CoreError> {
    let Some(reference) = definition
        .one_of
        .first()
        .and_then(|alt| alt.reference.as_deref())
    else {
        return Ok(());
    };

    let name = ref_name(reference);
    let alternative = document
        .type_def(name)
        .ok_or_else(|| CoreError::UnknownType {
            name: name.to_owned(),
        })?;

    definition.properties.clone_from(&alternative.properties);
    definition.required.clone_from(&alternative.required);
    if definition.kind.is_none() {
        definition.kind.clone_from(&alternative.kind);
    }
    Ok(())
}
