//! CLI configuration: thin wrapper around `adminkit_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --profile, --base-url, --insecure, --timeout).

use std::path::PathBuf;
use std::time::Duration;

use adminkit_api::{RestClient, TlsMode};
use adminkit_config::{ConfigError, Profile, Settings};
use adminkit_core::ItemStore;
use clap::ValueEnum;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file selected by `--config`, else the platform default.
pub fn file_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(adminkit_config::config_path)
}

/// Resolve the active profile and apply flag overrides.
///
/// Without a matching profile, `--base-url` alone is enough; the global
/// defaults fill in the rest.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = file_path(global);
    let cfg = adminkit_config::load_config_from(&path)?;

    let mut settings = match cfg.settings(global.profile.as_deref()) {
        Ok(settings) => settings,
        Err(ConfigError::UnknownProfile { profile }) if global.profile.is_some() => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile,
                available: available.join(", "),
            });
        }
        Err(ConfigError::UnknownProfile { .. } | ConfigError::NoProfile) => {
            let base_url = global.base_url.clone().ok_or_else(|| CliError::NoConfig {
                path: path.display().to_string(),
            })?;
            let profile = Profile {
                base_url,
                ..Profile::default()
            };
            adminkit_config::profile_to_settings(&cfg.defaults, &profile, "cli")?
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(ref url) = global.base_url {
        settings.base_url = adminkit_config::parse_base_url(url)?;
    }
    if global.insecure {
        settings.transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        settings.transport.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(
        profile = %settings.profile,
        base_url = %settings.base_url,
        "resolved settings"
    );
    Ok(settings)
}

/// Parse the configured output format name.
pub fn output_format(name: &str) -> Result<OutputFormat, CliError> {
    OutputFormat::from_str(name, true).map_err(|reason| CliError::Validation {
        field: "defaults.output".into(),
        reason,
    })
}

/// Build the store for resolved settings.
pub fn build_store(settings: Settings) -> Result<ItemStore<RestClient>, CliError> {
    let client = RestClient::new(settings.base_url.as_str(), &settings.transport)?;
    Ok(ItemStore::new(client, settings.store))
}
