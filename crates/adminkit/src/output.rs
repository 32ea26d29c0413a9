//! Output formatting: table, JSON, YAML, plain.
//!
//! Records are schemaless JSON objects, so tables are built column by
//! column from the keys actually present. Structured formats use serde,
//! plain emits one id per line.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled, builder::Builder, settings::Style};

use adminkit_core::Record;
use adminkit_core::record::canonical;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of records in the chosen format.
///
/// - `table`: one column per field, in order of first appearance
/// - `json` / `json-compact` / `yaml`: the records as received
/// - `plain`: one id per line
pub fn render_records(format: OutputFormat, records: &[Record]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(records_table(records)),
        OutputFormat::Plain => Ok(records
            .iter()
            .map(|r| r.id().and_then(canonical).unwrap_or_default().into_owned())
            .collect::<Vec<_>>()
            .join("\n")),
        structured => render_structured(structured, records),
    }
}

/// Render one record; tables show it as field/value pairs.
pub fn render_record(format: OutputFormat, record: &Record) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (field, value) in record.fields() {
                builder.push_record([field.to_owned(), cell(value)]);
            }
            Ok(styled(builder.build()))
        }
        OutputFormat::Plain => Ok(record
            .id()
            .and_then(canonical)
            .unwrap_or_default()
            .into_owned()),
        structured => render_structured(structured, record),
    }
}

/// Render any serializable value; `table` and `plain` fall back to
/// `table_fn` and `plain_fn`.
pub fn render_with<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
    table_fn: impl FnOnce(&T) -> String,
    plain_fn: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(table_fn(data)),
        OutputFormat::Plain => Ok(plain_fn(data)),
        structured => render_structured(structured, data),
    }
}

/// Table from `Tabled` rows.
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    styled(Table::new(rows))
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Display form of a JSON value inside a table cell.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_structured<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Plain => {
            serde_json::to_string_pretty(data)?
        }
    })
}

fn records_table(records: &[Record]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for (field, _) in record.fields() {
            if !columns.contains(&field) {
                columns.push(field);
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());
    for record in records {
        builder.push_record(
            columns
                .iter()
                .map(|column| record.get(column).map(cell).unwrap_or_default()),
        );
    }
    styled(builder.build())
}

fn styled(mut table: Table) -> String {
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Record> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Al" },
            { "id": 2, "name": "Bo", "email": null, "tags": [3, 4] }
        ]))
        .unwrap()
    }

    #[test]
    fn table_has_union_of_columns() {
        let out = render_records(OutputFormat::Table, &sample()).unwrap();
        let header = out.lines().nth(1).unwrap();

        assert!(header.contains("id"));
        assert!(header.contains("email"));
        assert!(header.contains("tags"));
        assert!(out.contains("[3,4]"));
    }

    #[test]
    fn plain_lists_ids() {
        let out = render_records(OutputFormat::Plain, &sample()).unwrap();
        assert_eq!(out, "1\n2");
    }

    #[test]
    fn compact_json_keeps_field_order() {
        let out = render_records(OutputFormat::JsonCompact, &sample()[..1]).unwrap();
        assert_eq!(out, r#"[{"id":1,"name":"Al"}]"#);
    }

    #[test]
    fn null_cells_are_blank() {
        assert_eq!(cell(&Value::Null), "");
        assert_eq!(cell(&json!("x")), "x");
        assert_eq!(cell(&json!(true)), "true");
    }
}
