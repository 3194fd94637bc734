//! Tool configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns it; the core crate never sees it.  Project state lives in
//! each project's `.nexora-cli-config.json` and is a different thing.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NEXORA_*` environment variables, `__` between nested keys
//!    (`NEXORA_DEFAULTS__STATE=zustand`, lists comma separated)
//! 3. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "NEXORA";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selections `create` uses when neither flags nor prompts provide them.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
    pub install: InstallConfig,
    pub native: NativeConfig,
}

/// Values are parsed with the core `FromStr` impls, so any spelling the
/// project config accepts works here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub navigation: Vec<String>,
    pub state: String,
    pub ui: String,
    pub storage: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: "typescript".into(),
            navigation: vec!["stack".into()],
            state: "none".into(),
            ui: "none".into(),
            storage: "async-storage".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of template-set overrides, loaded after the built-ins.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// npm-compatible binary used for install/uninstall.
    pub package_manager: String,
    pub legacy_peer_deps: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            package_manager: "npm".into(),
            legacy_peer_deps: true,
        }
    }
}

/// The `create` bootstrap that generates the Android and iOS projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    pub npx: String,
    /// React Native version for `init --version`; the CLI's default if unset.
    pub react_native_version: Option<String>,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            npx: "npx".into(),
            react_native_version: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let loaded: Self = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("defaults.navigation")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;

        debug!(config = ?loaded, "Tool configuration loaded");
        Ok(loaded)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nexora.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nexora", "nexora-rn")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".nexora.toml"))
    }

    /// Template-set override directory, if configured.
    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates.local_path.as_deref()
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_a_bare_typescript_app() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.language, "typescript");
        assert_eq!(cfg.defaults.navigation, vec!["stack".to_string()]);
        assert_eq!(cfg.install.package_manager, "npm");
        assert!(cfg.install.legacy_peer_deps);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.native.npx, "npx");
        assert!(cfg.native.react_native_version.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nexora.toml");
        fs::write(
            &path,
            "[defaults]\nstate = \"zustand\"\n\n[install]\npackage_manager = \"pnpm\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.state, "zustand");
        assert_eq!(cfg.defaults.language, "typescript");
        assert_eq!(cfg.install.package_manager, "pnpm");
        assert!(cfg.install.legacy_peer_deps);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/nexora.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
