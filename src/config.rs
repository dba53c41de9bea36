//! Configuration file support for native-sbom.
//!
//! Provides YAML-based configuration through `native-sbom.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::bom_construction::collectors::CollectorKind;
use crate::bom_construction::domain::Platform;
use crate::bom_construction::services::ChainSettings;
use crate::shared::error::BomError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "native-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub platform: Option<String>,
    /// Extra library directories, probed before the system defaults.
    pub search_paths: Option<Vec<PathBuf>>,
    pub include_system_paths: Option<bool>,
    pub command_timeout_secs: Option<u64>,
    pub rpm_namespace: Option<String>,
    pub deb_namespace: Option<String>,
    pub disabled_collectors: Option<Vec<String>>,
    pub strings_min_version_components: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Collector settings with config overrides applied over the defaults.
    ///
    /// Call only on a validated config; unknown collector names are skipped.
    pub fn chain_settings(&self) -> ChainSettings {
        let mut settings = ChainSettings::default();
        if let Some(ns) = &self.rpm_namespace {
            settings.rpm_namespace = ns.clone();
        }
        if let Some(ns) = &self.deb_namespace {
            settings.deb_namespace = ns.clone();
        }
        if let Some(names) = &self.disabled_collectors {
            settings.disabled = names
                .iter()
                .filter_map(|name| CollectorKind::from_str(name).ok())
                .collect();
        }
        if let Some(min) = self.strings_min_version_components {
            settings.strings_min_version_components = min;
        }
        settings
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
            .as_deref()
            .and_then(|p| Platform::from_str(p).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String) -> anyhow::Error {
    BomError::Validation { message }.into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.command_timeout_secs == Some(0) {
        return Err(invalid(
            "command_timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.strings_min_version_components == Some(0) {
        return Err(invalid(
            "strings_min_version_components must be at least 1".to_string(),
        ));
    }
    if let Some(platform) = &config.platform {
        Platform::from_str(platform).map_err(invalid)?;
    }
    if let Some(names) = &config.disabled_collectors {
        for (i, name) in names.iter().enumerate() {
            CollectorKind::from_str(name)
                .map_err(|reason| invalid(format!("disabled_collectors[{}]: {}", i, reason)))?;
        }
    }
    for (field, value) in [
        ("rpm_namespace", &config.rpm_namespace),
        ("deb_namespace", &config.deb_namespace),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(invalid(format!("{} must not be empty", field)));
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!("Unknown config field '{}' will be ignored", key);
    }
}
