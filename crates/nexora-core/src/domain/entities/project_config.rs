//! The persisted feature state of a generated project.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::value_objects::{
    Language, NavigationKind, StateManager, StorageBackend, ThemeMode, UiFramework,
};

/// Independent boolean feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Theme,
    Localization,
    Firebase,
    Api,
    Auth,
    Fonts,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Self::Theme,
        Self::Localization,
        Self::Firebase,
        Self::Api,
        Self::Auth,
        Self::Fonts,
    ];
}

/// Single source of truth for a managed project's feature state.
///
/// `navigation` is a real set here; the scalar/list shapes found on disk are
/// normalised by the config store before a `ProjectConfig` ever exists.
/// Serialisation always writes the list form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub language: Language,
    pub navigation: BTreeSet<NavigationKind>,
    pub state: StateManager,
    pub ui: UiFramework,
    pub storage: StorageBackend,
    pub theme: bool,
    pub localization: bool,
    pub firebase: bool,
    pub api: bool,
    pub auth: bool,
    pub fonts: bool,
    pub sample_screens: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<ThemeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    pub cli_version: String,
}

impl ProjectConfig {
    /// A bare configuration: stack-less, no optional features, async-storage.
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            language,
            navigation: BTreeSet::new(),
            state: StateManager::None,
            ui: UiFramework::None,
            storage: StorageBackend::AsyncStorage,
            theme: false,
            localization: false,
            firebase: false,
            api: false,
            auth: false,
            fonts: false,
            sample_screens: false,
            default_theme: None,
            default_language: None,
            cli_version: crate::VERSION.to_string(),
        }
    }

    pub fn with_navigation(mut self, kinds: impl IntoIterator<Item = NavigationKind>) -> Self {
        self.navigation = kinds.into_iter().collect();
        self
    }

    pub fn with_state(mut self, state: StateManager) -> Self {
        self.state = state;
        self
    }

    pub fn with_ui(mut self, ui: UiFramework) -> Self {
        self.ui = ui;
        self
    }

    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_flag(mut self, flag: Flag, on: bool) -> Self {
        self.set_flag(flag, on);
        self
    }

    pub fn with_sample_screens(mut self, on: bool) -> Self {
        self.sample_screens = on;
        self
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Theme => self.theme,
            Flag::Localization => self.localization,
            Flag::Firebase => self.firebase,
            Flag::Api => self.api,
            Flag::Auth => self.auth,
            Flag::Fonts => self.fonts,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        let slot = match flag {
            Flag::Theme => &mut self.theme,
            Flag::Localization => &mut self.localization,
            Flag::Firebase => &mut self.firebase,
            Flag::Api => &mut self.api,
            Flag::Auth => &mut self.auth,
            Flag::Fonts => &mut self.fonts,
        };
        *slot = on;
    }

    pub fn has_navigation(&self) -> bool {
        !self.navigation.is_empty()
    }

    pub fn effective_theme(&self) -> ThemeMode {
        self.default_theme.unwrap_or_default()
    }

    pub fn effective_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_camel_case_with_navigation_list() {
        let config = ProjectConfig::new("Foo", Language::TypeScript)
            .with_navigation([NavigationKind::Tabs, NavigationKind::Stack])
            .with_flag(Flag::Theme, true);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["navigation"], serde_json::json!(["stack", "tabs"]));
        assert_eq!(json["sampleScreens"], false);
        assert_eq!(json["language"], "TypeScript");
        assert!(json.get("defaultTheme").is_none());
        assert_eq!(json["cliVersion"], crate::VERSION);
    }

    #[test]
    fn flags_are_independent() {
        let mut config = ProjectConfig::new("Foo", Language::JavaScript);
        config.set_flag(Flag::Api, true);
        assert!(config.flag(Flag::Api));
        for other in Flag::ALL.into_iter().filter(|f| *f != Flag::Api) {
            assert!(!config.flag(other), "{other:?} should stay off");
        }
    }

    #[test]
    fn effective_defaults() {
        let config = ProjectConfig::new("Foo", Language::TypeScript);
        assert_eq!(config.effective_theme(), ThemeMode::System);
        assert_eq!(config.effective_language(), "en");
    }
}
