//! Shared configuration for adminkit front ends.
//!
//! TOML profiles (one per backend), environment overrides, and
//! translation to `adminkit_core::StoreConfig` plus
//! `adminkit_api::TransportConfig`. The CLI layers its flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use adminkit_api::{TlsMode, TransportConfig};
use adminkit_core::{DEFAULT_SCHEMA_PATH, OrderingPolicy, StoreConfig};

/// Prefix for environment overrides. Nested keys are separated by `__`,
/// e.g. `ADMINKIT_PROFILES__LOCAL__BASE_URL`.
pub const ENV_PREFIX: &str = "ADMINKIT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' is not defined")]
    UnknownProfile { profile: String },

    #[error("no profile selected and no default_profile configured")]
    NoProfile,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,

    /// Settings every profile inherits.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_schema_path")]
    pub schema_path: String,

    #[serde(default = "default_label_field")]
    pub label_field: String,

    #[serde(default = "default_max_resolve_depth")]
    pub max_resolve_depth: usize,

    #[serde(default)]
    pub ordering: OrderingPolicy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            schema_path: default_schema_path(),
            label_field: default_label_field(),
            max_resolve_depth: default_max_resolve_depth(),
            ordering: OrderingPolicy::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_schema_path() -> String {
    DEFAULT_SCHEMA_PATH.into()
}
fn default_label_field() -> String {
    "name".into()
}
fn default_max_resolve_depth() -> usize {
    1
}

/// A named backend profile. Unset fields fall back to [`Defaults`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8000").
    pub base_url: String,

    pub schema_path: Option<String>,

    /// Record field shown as the label of foreign-key choices.
    pub label_field: Option<String>,

    pub max_resolve_depth: Option<usize>,

    /// Replaces the default ordering policy wholesale.
    pub ordering: Option<OrderingPolicy>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Resolved settings ───────────────────────────────────────────────

/// Everything needed to build an `ItemStore` for one profile.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: String,
    pub base_url: Url,
    /// Output format name used when the CLI flag is absent.
    pub output: String,
    pub store: StoreConfig,
    pub transport: TransportConfig,
}

impl Config {
    /// Select `name`, or the default profile when `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .ok_or(ConfigError::NoProfile)?;
        self.profiles
            .get_key_value(name)
            .map(|(k, p)| (k.as_str(), p))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }

    /// Resolve a profile against the global defaults.
    pub fn settings(&self, name: Option<&str>) -> Result<Settings, ConfigError> {
        let (name, profile) = self.profile(name)?;
        profile_to_settings(&self.defaults, profile, name)
    }
}

/// Merge `profile` over `defaults` and validate the result.
pub fn profile_to_settings(
    defaults: &Defaults,
    profile: &Profile,
    profile_name: &str,
) -> Result<Settings, ConfigError> {
    let base_url = parse_base_url(&profile.base_url)?;

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let store = StoreConfig {
        schema_path: profile
            .schema_path
            .clone()
            .unwrap_or_else(|| defaults.schema_path.clone()),
        ordering: profile
            .ordering
            .clone()
            .unwrap_or_else(|| defaults.ordering.clone()),
        label_field: profile
            .label_field
            .clone()
            .unwrap_or_else(|| defaults.label_field.clone()),
        max_resolve_depth: profile
            .max_resolve_depth
            .unwrap_or(defaults.max_resolve_depth),
    };

    Ok(Settings {
        profile: profile_name.into(),
        base_url,
        output: defaults.output.clone(),
        store,
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(timeout),
        },
    })
}

/// Parse and check a backend base URL (`http` or `https` only).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "adminkit", "adminkit").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("adminkit");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from an explicit file; a missing file contributes nothing.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
