//! Schema command handlers.

use tabled::Tabled;

use adminkit_api::RestClient;
use adminkit_core::{ItemStore, Property, TypeDefinition, TypeSelector};

use crate::cli::{GlobalOpts, SchemaArgs, SchemaCommand};
use crate::error::CliError;
use crate::output;

type Store = ItemStore<RestClient>;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "References")]
    target: String,
    #[tabled(rename = "Choices")]
    choices: String,
}

impl PropertyRow {
    fn new(name: &str, property: &Property, required: bool) -> Self {
        let kind = property
            .extra
            .get("type")
            .map(output::cell)
            .unwrap_or_default();
        let choices = property
            .choices
            .as_ref()
            .map(|choices| {
                choices
                    .iter()
                    .map(|c| output::cell(&c.label))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        Self {
            name: name.to_owned(),
            kind,
            required: if required { "yes".into() } else { String::new() },
            target: property
                .target_ref()
                .map(adminkit_core::schema::ref_name)
                .unwrap_or_default()
                .to_owned(),
            choices,
        }
    }
}

fn definition_table(definition: &TypeDefinition) -> String {
    if let Some(values) = &definition.enum_values {
        return values.iter().map(output::cell).collect::<Vec<_>>().join("\n");
    }
    let rows: Vec<PropertyRow> = definition
        .properties
        .iter()
        .flatten()
        .map(|(name, property)| {
            PropertyRow::new(name, property, definition.required.contains(name))
        })
        .collect();
    output::render_table(&rows)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match args.command {
        SchemaCommand::Types => {
            let document = store.ensure_loaded().await?;
            let names: Vec<&str> = document.types().keys().map(String::as_str).collect();
            output::render_with(global.format(), &names, |n| n.join("\n"), |n| n.join("\n"))?
        }

        SchemaCommand::Type {
            name,
            path,
            resolve,
            depth,
        } => {
            let selector = match (&name, &path) {
                (_, Some(path)) => TypeSelector::Path(path),
                (Some(name), None) => TypeSelector::Name(name),
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "name".into(),
                        reason: "pass a type name or --path".into(),
                    });
                }
            };
            let resolve = resolve || depth.is_some();
            let depth = depth.unwrap_or(store.config().max_resolve_depth);

            let definition = store
                .get_type_def_with_depth(selector, resolve, depth)
                .await?
                .ok_or_else(|| CliError::Schema {
                    message: format!(
                        "no type for {}",
                        path.as_deref().or(name.as_deref()).unwrap_or_default()
                    ),
                })?;
            output::render_with(global.format(), &definition, definition_table, |d| {
                d.properties
                    .iter()
                    .flatten()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?
        }

        SchemaCommand::Name { path } => {
            let name = store
                .get_type_name(&path)
                .await?
                .ok_or_else(|| CliError::Schema {
                    message: format!("{path} is not a list endpoint"),
                })?;
            output::render_with(global.format(), &name, Clone::clone, Clone::clone)?
        }

        SchemaCommand::Path { name } => {
            let path = store
                .get_path_for_type(&name)
                .await?
                .ok_or_else(|| CliError::Schema {
                    message: format!("no list endpoint returns '{name}' items"),
                })?;
            output::render_with(global.format(), &path, Clone::clone, Clone::clone)?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
