//! Loading and saving `.nexora-cli-config.json`.
//!
//! The on-disk record is lenient: enum fields are parsed with the same
//! aliases the CLI accepts, missing fields take their defaults, unknown keys
//! are ignored, and `navigation` may be absent, `"none"`, a single kind or a
//! list of kinds. All of that is normalised here, once; the rest of the core
//! only ever sees [`ProjectConfig`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        Language, NavigationKind, ProjectConfig, StateManager, StorageBackend, ThemeMode,
        UiFramework,
    },
    error::NexoraResult,
};

/// File name of the persisted project configuration.
pub const CONFIG_FILE: &str = ".nexora-cli-config.json";

/// `cliVersion` assumed for records written before versions were tracked.
pub const UNVERSIONED: &str = "0.0.0";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConfig {
    name: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    navigation: Option<StoredNavigation>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    ui: Option<String>,
    #[serde(default)]
    storage: Option<String>,
    #[serde(default)]
    theme: bool,
    #[serde(default)]
    localization: bool,
    #[serde(default)]
    firebase: bool,
    #[serde(default)]
    api: bool,
    #[serde(default)]
    auth: bool,
    #[serde(default)]
    fonts: bool,
    #[serde(default)]
    sample_screens: bool,
    #[serde(default)]
    default_theme: Option<String>,
    #[serde(default)]
    default_language: Option<String>,
    #[serde(default)]
    cli_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredNavigation {
    One(String),
    Many(Vec<String>),
}

pub struct ConfigStore;

impl ConfigStore {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Whether `project_root` is a managed project.
    pub fn exists(filesystem: &dyn Filesystem, project_root: &Path) -> bool {
        filesystem.exists(&Self::path(project_root))
    }

    /// Load and normalise the project configuration.
    ///
    /// # Errors
    ///
    /// - `NotAManagedProject` when the file is absent
    /// - `CorruptConfig` when it cannot be parsed or holds unknown values
    #[instrument(skip_all, fields(root = %project_root.display()))]
    pub fn load(filesystem: &dyn Filesystem, project_root: &Path) -> NexoraResult<ProjectConfig> {
        let path = Self::path(project_root);
        if !filesystem.exists(&path) {
            return Err(ApplicationError::NotAManagedProject {
                path: project_root.to_path_buf(),
                reason: format!("missing {CONFIG_FILE}"),
            }
            .into());
        }

        let raw = filesystem.read_to_string(&path)?;
        let config = Self::parse(&raw).map_err(|reason| ApplicationError::CorruptConfig {
            path: path.clone(),
            reason,
        })?;

        debug!(name = %config.name, version = %config.cli_version, "Loaded project config");
        Ok(config)
    }

    /// Serialise the full config, replacing the previous file.
    #[instrument(skip_all, fields(root = %project_root.display()))]
    pub fn save(
        filesystem: &dyn Filesystem,
        project_root: &Path,
        config: &ProjectConfig,
    ) -> NexoraResult<()> {
        let path = Self::path(project_root);
        let mut json =
            serde_json::to_string_pretty(config).map_err(|e| ApplicationError::CorruptConfig {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        json.push('\n');
        filesystem.write_file(&path, &json)?;
        debug!("Saved project config");
        Ok(())
    }

    fn parse(raw: &str) -> Result<ProjectConfig, String> {
        let stored: StoredConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let err = |e: crate::domain::DomainError| e.to_string();

        let mut config = ProjectConfig::new(
            stored.name,
            parse_or_default::<Language>(stored.language).map_err(err)?,
        );
        config.navigation = normalize_navigation(stored.navigation).map_err(err)?;
        config.state = parse_or_default::<StateManager>(stored.state).map_err(err)?;
        config.ui = parse_or_default::<UiFramework>(stored.ui).map_err(err)?;
        config.storage = parse_or_default::<StorageBackend>(stored.storage).map_err(err)?;
        config.theme = stored.theme;
        config.localization = stored.localization;
        config.firebase = stored.firebase;
        config.api = stored.api;
        config.auth = stored.auth;
        config.fonts = stored.fonts;
        config.sample_screens = stored.sample_screens;
        config.default_theme = stored
            .default_theme
            .map(|t| t.parse::<ThemeMode>())
            .transpose()
            .map_err(err)?;
        config.default_language = stored.default_language.filter(|l| !l.trim().is_empty());
        config.cli_version = stored
            .cli_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UNVERSIONED.to_string());

        Ok(config)
    }
}

fn parse_or_default<T>(value: Option<String>) -> Result<T, crate::domain::DomainError>
where
    T: std::str::FromStr<Err = crate::domain::DomainError> + Default,
{
    match value {
        Some(v) => v.parse(),
        None => Ok(T::default()),
    }
}

/// Collapse the scalar and list spellings of `navigation` into a set.
fn normalize_navigation(
    stored: Option<StoredNavigation>,
) -> Result<BTreeSet<NavigationKind>, crate::domain::DomainError> {
    let values = match stored {
        None => Vec::new(),
        Some(StoredNavigation::One(v)) => vec![v],
        Some(StoredNavigation::Many(vs)) => vs,
    };

    values
        .into_iter()
        .filter(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "none"))
        .map(|v| v.parse::<NavigationKind>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::Flag;
    use crate::error::NexoraError;

    fn parsed(raw: &str) -> ProjectConfig {
        ConfigStore::parse(raw).unwrap()
    }

    #[test]
    fn navigation_shapes_normalise_to_a_set() {
        let scalar = parsed(r#"{"name":"Foo","navigation":"drawer"}"#);
        assert_eq!(
            scalar.navigation.into_iter().collect::<Vec<_>>(),
            vec![NavigationKind::Drawer]
        );

        let list = parsed(r#"{"name":"Foo","navigation":["tabs","stack","tabs"]}"#);
        assert_eq!(
            list.navigation.into_iter().collect::<Vec<_>>(),
            vec![NavigationKind::Stack, NavigationKind::Tabs]
        );

        assert!(parsed(r#"{"name":"Foo","navigation":"none"}"#).navigation.is_empty());
        assert!(parsed(r#"{"name":"Foo","navigation":["none"]}"#).navigation.is_empty());
        assert!(parsed(r#"{"name":"Foo"}"#).navigation.is_empty());
    }

    #[test]
    fn legacy_record_uses_defaults() {
        let config = parsed(
            r#"{"name":"Foo","language":"TypeScript","state":"redux","theme":true,"extra":1}"#,
        );
        assert_eq!(config.language, Language::TypeScript);
        assert_eq!(config.state, StateManager::Redux);
        assert_eq!(config.storage, StorageBackend::AsyncStorage);
        assert!(config.flag(Flag::Theme));
        assert_eq!(config.cli_version, UNVERSIONED);
    }

    #[test]
    fn unknown_values_are_corrupt() {
        assert!(ConfigStore::parse(r#"{"name":"Foo","state":"mobx"}"#).is_err());
        assert!(ConfigStore::parse(r#"{"name":"Foo","navigation":["modal"]}"#).is_err());
        assert!(ConfigStore::parse(r#"{"navigation":"stack"}"#).is_err());
        assert!(ConfigStore::parse("not json").is_err());
    }

    #[test]
    fn save_then_parse_round_trips() {
        let config = ProjectConfig::new("Foo", Language::JavaScript)
            .with_navigation([NavigationKind::Stack, NavigationKind::Drawer])
            .with_state(StateManager::Zustand)
            .with_ui(UiFramework::StyledComponents)
            .with_storage(StorageBackend::Mmkv)
            .with_flag(Flag::Fonts, true)
            .with_sample_screens(true);
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(ConfigStore::parse(&json).unwrap(), config);
    }

    #[test]
    fn missing_file_is_not_managed() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);

        let err = ConfigStore::load(&fs, Path::new("/work/app")).unwrap_err();
        assert!(matches!(
            err,
            NexoraError::Application(ApplicationError::NotAManagedProject { .. })
        ));
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/work/app/.nexora-cli-config.json"))
            .returning(|_| Ok("{ broken".to_string()));

        let err = ConfigStore::load(&fs, Path::new("/work/app")).unwrap_err();
        assert!(matches!(
            err,
            NexoraError::Application(ApplicationError::CorruptConfig { .. })
        ));
    }

    #[test]
    fn save_writes_pretty_json_with_list_navigation() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file()
            .withf(|path, content| {
                path.ends_with(CONFIG_FILE)
                    && content.contains("\"navigation\": [\n    \"stack\"\n  ]")
                    && content.ends_with("}\n")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let config =
            ProjectConfig::new("Foo", Language::TypeScript).with_navigation([NavigationKind::Stack]);
        ConfigStore::save(&fs, Path::new("/work/app"), &config).unwrap();
    }
}
