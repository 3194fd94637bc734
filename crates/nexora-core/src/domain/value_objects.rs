//! Domain value objects: Language, NavigationKind, StateManager, UiFramework,
//! StorageBackend, ThemeMode.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold no feature logic. Which packages, directories and templates a
//! value implies lives in `feature.rs`. This file only defines the types,
//! their persisted spellings, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// Source language of the generated React Native project.
///
/// Persisted with its display spelling (`"TypeScript"`), which is also what
/// the interactive prompt shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    #[default]
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
        }
    }

    /// Folder name used by template-set directories.
    pub const fn folder(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        }
    }

    /// Extension for plain modules (`ts` / `js`).
    pub const fn script_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
        }
    }

    /// Extension for modules containing JSX (`tsx` / `js`).
    pub const fn component_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "tsx",
        }
    }

    /// Application entry-point file at the project root.
    pub const fn entry_file(&self) -> &'static str {
        match self {
            Self::JavaScript => "App.js",
            Self::TypeScript => "App.tsx",
        }
    }

    pub const fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            other => Err(DomainError::InvalidValue {
                field: "language",
                value: other.into(),
                expected: "TypeScript, JavaScript",
            }),
        }
    }
}

// ── NavigationKind ───────────────────────────────────────────────────────────

/// One navigator type. Several may be active at once.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    Stack,
    Tabs,
    Drawer,
}

impl NavigationKind {
    pub const ALL: [NavigationKind; 3] = [Self::Stack, Self::Tabs, Self::Drawer];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Tabs => "tabs",
            Self::Drawer => "drawer",
        }
    }
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavigationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stack" => Ok(Self::Stack),
            "tabs" | "tab" | "bottom-tabs" => Ok(Self::Tabs),
            "drawer" => Ok(Self::Drawer),
            other => Err(DomainError::InvalidValue {
                field: "navigation",
                value: other.into(),
                expected: "stack, tabs, drawer, none",
            }),
        }
    }
}

// ── StateManager ─────────────────────────────────────────────────────────────

/// State-management library. Exclusive choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateManager {
    Redux,
    Zustand,
    #[default]
    None,
}

impl StateManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Redux => "redux",
            Self::Zustand => "zustand",
            Self::None => "none",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for StateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redux" | "redux-toolkit" => Ok(Self::Redux),
            "zustand" => Ok(Self::Zustand),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::InvalidValue {
                field: "state",
                value: other.into(),
                expected: "redux, zustand, none",
            }),
        }
    }
}

// ── UiFramework ──────────────────────────────────────────────────────────────

/// Styling / component library. Exclusive choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiFramework {
    StyledComponents,
    Tailwind,
    #[default]
    None,
}

impl UiFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StyledComponents => "styled-components",
            Self::Tailwind => "tailwind",
            Self::None => "none",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for UiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "styled-components" | "styled" => Ok(Self::StyledComponents),
            "tailwind" | "tailwind-rn" => Ok(Self::Tailwind),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::InvalidValue {
                field: "ui",
                value: other.into(),
                expected: "styled-components, tailwind, none",
            }),
        }
    }
}

// ── StorageBackend ───────────────────────────────────────────────────────────

/// Key-value storage backend. Always has a value; there is no "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    #[default]
    AsyncStorage,
    Mmkv,
}

impl StorageBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AsyncStorage => "async-storage",
            Self::Mmkv => "mmkv",
        }
    }

    /// Template set that provides the storage helper for this backend.
    pub const fn template_set(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "async-storage" | "asyncstorage" => Ok(Self::AsyncStorage),
            "mmkv" => Ok(Self::Mmkv),
            other => Err(DomainError::InvalidValue {
                field: "storage",
                value: other.into(),
                expected: "async-storage, mmkv",
            }),
        }
    }
}

// ── ThemeMode ────────────────────────────────────────────────────────────────

/// Initial colour scheme written into the theme templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "auto" => Ok(Self::System),
            other => Err(DomainError::InvalidValue {
                field: "theme",
                value: other.into(),
                expected: "light, dark, system",
            }),
        }
    }
}
