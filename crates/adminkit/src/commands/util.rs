//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::Value;

use adminkit_core::{Filter, QueryParams};

use crate::error::CliError;

/// Split `key=value`; the key must be non-empty.
pub fn split_pair<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(CliError::Validation {
            field: flag.into(),
            reason: format!("expected KEY=VALUE, got '{raw}'"),
        }),
    }
}

/// Query parameters from repeated `--param key=value` flags.
pub fn query_params(raw: &[String]) -> Result<QueryParams, CliError> {
    let mut params = QueryParams::new();
    for pair in raw {
        let (key, value) = split_pair(pair, "param")?;
        params.insert(key, value);
    }
    Ok(params)
}

/// Read a command-line value as JSON when it parses, else as a string.
///
/// `3` is a number, `null` is null, `"3"` and `abc` are strings.
pub fn loose_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Filter from repeated `--where field=value` flags.
pub fn filter(conditions: &[String]) -> Result<Filter, CliError> {
    conditions
        .iter()
        .map(|raw| split_pair(raw, "where").map(|(field, value)| (field, loose_value(value))))
        .collect()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: message.into(),
        })?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}
