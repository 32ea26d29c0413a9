//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use adminkit_config::ConfigError;
use adminkit_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(adminkit::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: adminkit_api::Error,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(adminkit::tls_error),
        help(
            "Use --insecure (-k) to accept self-signed certificates,\n\
             or point ca_cert in your profile at a readable PEM file."
        )
    )]
    TlsError { reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(adminkit::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { url: String },

    // ── Backend responses ────────────────────────────────────────────

    #[error("Access to {url} was refused (HTTP {status}): {message}")]
    #[diagnostic(code(adminkit::forbidden))]
    Forbidden {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Nothing found at {url}")]
    #[diagnostic(
        code(adminkit::not_found),
        help("Run: adminkit list <endpoint> to see available records")
    )]
    NotFound { url: String },

    #[error("Backend rejected {url} (HTTP {status}): {message}")]
    #[diagnostic(code(adminkit::rejected))]
    Rejected {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {url}: {message}")]
    #[diagnostic(code(adminkit::unexpected_payload))]
    UnexpectedPayload { url: String, message: String },

    // ── Schema ───────────────────────────────────────────────────────

    #[error("Schema error: {message}")]
    #[diagnostic(
        code(adminkit::schema),
        help("Check the schema_path setting of your profile.")
    )]
    Schema { message: String },

    #[error("No record matched")]
    #[diagnostic(code(adminkit::no_match))]
    NoMatch,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(adminkit::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(adminkit::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: adminkit config init --url <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(adminkit::no_config),
        help(
            "Pass --base-url, set ADMINKIT_BASE_URL, or create a profile with:\n\
             adminkit config init --url <URL>\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(adminkit::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(adminkit::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(adminkit::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(adminkit::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Forbidden { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NoMatch => exit_code::NOT_FOUND,
            Self::Rejected { status: 409, .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api { url, source } => from_api(url, source),

            CoreError::UnexpectedPayload { url, message } => {
                CliError::UnexpectedPayload { url, message }
            }

            CoreError::MissingIdentity { endpoint } => CliError::Validation {
                field: "id".into(),
                reason: format!("a record of {endpoint} needs a non-null id"),
            },

            CoreError::MalformedSchema { message } => CliError::Schema { message },

            CoreError::UnknownType { name } => CliError::Schema {
                message: format!("type '{name}' is referenced but not defined"),
            },

            CoreError::NoListEndpoint { type_name } => CliError::Schema {
                message: format!("no list endpoint returns '{type_name}' items"),
            },
        }
    }
}

fn from_api(url: String, source: adminkit_api::Error) -> CliError {
    match source {
        adminkit_api::Error::Status { status: 404, .. } => CliError::NotFound { url },
        adminkit_api::Error::Status {
            status: status @ (401 | 403),
            message,
        } => CliError::Forbidden {
            url,
            status,
            message,
        },
        adminkit_api::Error::Status { status, message } => CliError::Rejected {
            url,
            status,
            message,
        },
        adminkit_api::Error::Deserialization { message, .. } => {
            CliError::UnexpectedPayload { url, message }
        }
        adminkit_api::Error::Tls(reason) => CliError::TlsError { reason },
        adminkit_api::Error::InvalidUrl(e) => CliError::Validation {
            field: "url".into(),
            reason: format!("{url}: {e}"),
        },
        adminkit_api::Error::Transport(ref e) if e.is_timeout() => CliError::Timeout { url },
        source @ adminkit_api::Error::Transport(_) => CliError::ConnectionFailed { url, source },
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

impl From<adminkit_api::Error> for CliError {
    fn from(err: adminkit_api::Error) -> Self {
        from_api(String::new(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> CoreError {
        CoreError::Api {
            url: "/back/api/topics/".into(),
            source: adminkit_api::Error::Status {
                status,
                message: "nope".into(),
            },
        }
    }

    #[test]
    fn status_codes_map_to_exit_codes() {
        assert_eq!(CliError::from(api(404)).exit_code(), exit_code::NOT_FOUND);
        assert_eq!(CliError::from(api(403)).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(api(409)).exit_code(), exit_code::CONFLICT);
        assert_eq!(CliError::from(api(500)).exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn schema_errors_are_general() {
        let err = CliError::from(CoreError::NoListEndpoint {
            type_name: "Orphan".into(),
        });
        assert!(err.to_string().contains("Orphan"));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn missing_identity_is_usage() {
        let err = CliError::from(CoreError::MissingIdentity {
            endpoint: "/back/api/topics/".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
