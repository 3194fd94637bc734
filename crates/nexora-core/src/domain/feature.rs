//! Feature metadata registry.
//!
//! Every feature key is described exactly once by a [`FeatureDef`] in
//! [`FEATURE_REGISTRY`]: which config field it touches, which directories it
//! owns, which packages it pulls in, which template set renders it, and which
//! provider (if any) it wraps around the application root.
//!
//! # Adding a New Feature
//!
//! 1. Add a variant to [`Feature`] (keep registry order)
//! 2. Add one [`FeatureDef`] entry to [`FEATURE_REGISTRY`]
//! 3. Extend [`FeatureShape`] only if the feature touches a new config field

use std::fmt;
use std::str::FromStr;

use crate::domain::{
    entities::project_config::Flag,
    entry_point::Provider,
    error::DomainError,
    value_objects::{NavigationKind, StateManager, StorageBackend, UiFramework},
};

/// Packages backing the default `async-storage` backend.
pub const ASYNC_STORAGE_PACKAGES: &[&str] = &["@react-native-async-storage/async-storage"];

/// Packages `auth` needs when Firebase is not providing authentication.
pub const AUTH_STANDALONE_PACKAGES: &[&str] =
    &["jwt-decode", "@react-native-async-storage/async-storage"];

/// Directories every project gets regardless of features.
pub const BASE_DIRECTORIES: &[&str] = &[
    "src/assets",
    "src/components",
    "src/config",
    "src/hooks",
    "src/utils",
    "src/screens",
];

/// Shared directory of all navigation kinds.
pub const NAVIGATION_DIRECTORY: &str = "src/navigation";

// ── Feature keys ─────────────────────────────────────────────────────────────

/// The closed vocabulary of feature keys accepted by `add` / `remove`.
///
/// Declaration order is registry order; `feature as usize` indexes
/// [`FEATURE_REGISTRY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Navigation,
    Drawer,
    Tabs,
    Stack,
    Auth,
    Firebase,
    Api,
    Redux,
    Zustand,
    Localization,
    Theme,
    Tailwind,
    StyledComponents,
    Mmkv,
    Fonts,
}

impl Feature {
    pub const ALL: [Feature; 15] = [
        Self::Navigation,
        Self::Drawer,
        Self::Tabs,
        Self::Stack,
        Self::Auth,
        Self::Firebase,
        Self::Api,
        Self::Redux,
        Self::Zustand,
        Self::Localization,
        Self::Theme,
        Self::Tailwind,
        Self::StyledComponents,
        Self::Mmkv,
        Self::Fonts,
    ];

    /// Registry entry for this feature.
    pub fn def(self) -> &'static FeatureDef {
        &FEATURE_REGISTRY[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn shape(self) -> FeatureShape {
        self.def().shape
    }

    /// All accepted keys, in registry order.
    pub fn keys() -> Vec<&'static str> {
        FEATURE_REGISTRY.iter().map(|d| d.key).collect()
    }

    pub fn from_navigation(kind: NavigationKind) -> Self {
        match kind {
            NavigationKind::Stack => Self::Stack,
            NavigationKind::Tabs => Self::Tabs,
            NavigationKind::Drawer => Self::Drawer,
        }
    }

    pub fn from_state(state: StateManager) -> Option<Self> {
        match state {
            StateManager::Redux => Some(Self::Redux),
            StateManager::Zustand => Some(Self::Zustand),
            StateManager::None => None,
        }
    }

    pub fn from_ui(ui: UiFramework) -> Option<Self> {
        match ui {
            UiFramework::StyledComponents => Some(Self::StyledComponents),
            UiFramework::Tailwind => Some(Self::Tailwind),
            UiFramework::None => None,
        }
    }

    /// Feature key for a storage backend; the default backend has none.
    pub fn from_storage(storage: StorageBackend) -> Option<Self> {
        match storage {
            StorageBackend::Mmkv => Some(Self::Mmkv),
            StorageBackend::AsyncStorage => None,
        }
    }

    pub fn from_flag(flag: Flag) -> Self {
        match flag {
            Flag::Theme => Self::Theme,
            Flag::Localization => Self::Localization,
            Flag::Firebase => Self::Firebase,
            Flag::Api => Self::Api,
            Flag::Auth => Self::Auth,
            Flag::Fonts => Self::Fonts,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Feature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        FEATURE_REGISTRY
            .iter()
            .find(|d| d.key == needle)
            .map(|d| d.feature)
            .ok_or_else(|| DomainError::UnknownFeature {
                key: s.to_string(),
                valid: Feature::keys(),
            })
    }
}

// ── Shapes ───────────────────────────────────────────────────────────────────

/// Which config field a feature touches and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureShape {
    /// `navigation` umbrella: the whole navigation set.
    NavigationGroup,
    /// One member of the additive navigation set.
    Navigation(NavigationKind),
    /// Exclusive `state` value.
    State(StateManager),
    /// Exclusive `ui` value.
    Ui(UiFramework),
    /// Exclusive `storage` value; disabling falls back to the default.
    Storage(StorageBackend),
    /// Independent boolean flag.
    Flag(Flag),
}

impl FeatureShape {
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::State(_) | Self::Ui(_) | Self::Storage(_))
    }
}

// ── Definitions ──────────────────────────────────────────────────────────────

/// Everything the core needs to know about one feature key.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDef {
    pub feature: Feature,

    /// Persisted / command-line spelling.
    pub key: &'static str,

    pub shape: FeatureShape,

    /// One-line description shown by `list`.
    pub description: &'static str,

    /// Project-relative directories this feature owns.
    ///
    /// Removed on `remove`. `src/navigation` is shared between navigation
    /// kinds and is only released by the last one.
    pub directories: &'static [&'static str],

    pub packages: &'static [&'static str],

    pub dev_packages: &'static [&'static str],

    /// Template set rendered when the feature is active.
    pub template_set: Option<&'static str>,

    /// Provider wrapped around the application root.
    pub provider: Option<Provider>,

    /// Other template sets whose output depends on this feature and must be
    /// re-rendered (when active) after it is toggled.
    pub refresh: &'static [&'static str],
}

const NAV_DIRS: &[&str] = &[NAVIGATION_DIRECTORY];

/// Single source of truth for feature metadata.
pub static FEATURE_REGISTRY: &[FeatureDef] = &[
    FeatureDef {
        feature: Feature::Navigation,
        key: "navigation",
        shape: FeatureShape::NavigationGroup,
        description: "React Navigation container (defaults to a stack navigator)",
        directories: NAV_DIRS,
        packages: &[
            "@react-navigation/native",
            "react-native-screens",
            "react-native-safe-area-context",
        ],
        dev_packages: &[],
        template_set: Some("navigation"),
        provider: Some(Provider::Navigation),
        refresh: &["screens", "core"],
    },
    FeatureDef {
        feature: Feature::Drawer,
        key: "drawer",
        shape: FeatureShape::Navigation(NavigationKind::Drawer),
        description: "Drawer navigator",
        directories: NAV_DIRS,
        packages: &[
            "@react-navigation/drawer",
            "react-native-gesture-handler",
            "react-native-reanimated",
        ],
        dev_packages: &[],
        template_set: Some("navigation"),
        provider: Some(Provider::Navigation),
        refresh: &["navigation", "screens", "core"],
    },
    FeatureDef {
        feature: Feature::Tabs,
        key: "tabs",
        shape: FeatureShape::Navigation(NavigationKind::Tabs),
        description: "Bottom tab navigator",
        directories: NAV_DIRS,
        packages: &["@react-navigation/bottom-tabs"],
        dev_packages: &[],
        template_set: Some("navigation"),
        provider: Some(Provider::Navigation),
        refresh: &["navigation", "screens"],
    },
    FeatureDef {
        feature: Feature::Stack,
        key: "stack",
        shape: FeatureShape::Navigation(NavigationKind::Stack),
        description: "Native stack navigator",
        directories: NAV_DIRS,
        packages: &["@react-navigation/native-stack"],
        dev_packages: &[],
        template_set: Some("navigation"),
        provider: Some(Provider::Navigation),
        refresh: &["navigation", "screens"],
    },
    FeatureDef {
        feature: Feature::Auth,
        key: "auth",
        shape: FeatureShape::Flag(Flag::Auth),
        description: "Login/register screens and auth service",
        directories: &["src/screens/auth"],
        // Conditional on firebase; resolved by the dependency planner.
        packages: &[],
        dev_packages: &[],
        template_set: Some("auth"),
        provider: None,
        refresh: &["navigation"],
    },
    FeatureDef {
        feature: Feature::Firebase,
        key: "firebase",
        shape: FeatureShape::Flag(Flag::Firebase),
        description: "React Native Firebase modules",
        directories: &["src/services/firebase"],
        packages: &[
            "@react-native-firebase/app",
            "@react-native-firebase/auth",
            "@react-native-firebase/firestore",
            "@react-native-firebase/storage",
            "@react-native-firebase/messaging",
            "@react-native-firebase/crashlytics",
            "@react-native-firebase/analytics",
        ],
        dev_packages: &[],
        template_set: Some("firebase"),
        provider: None,
        refresh: &["auth"],
    },
    FeatureDef {
        feature: Feature::Api,
        key: "api",
        shape: FeatureShape::Flag(Flag::Api),
        description: "Axios API client",
        directories: &["src/services/api"],
        packages: &["axios"],
        dev_packages: &[],
        template_set: Some("api"),
        provider: None,
        refresh: &[],
    },
    FeatureDef {
        feature: Feature::Redux,
        key: "redux",
        shape: FeatureShape::State(StateManager::Redux),
        description: "Redux Toolkit store",
        directories: &["src/store"],
        packages: &["@reduxjs/toolkit", "react-redux"],
        dev_packages: &[],
        template_set: Some("redux"),
        provider: Some(Provider::Store),
        refresh: &[],
    },
    FeatureDef {
        feature: Feature::Zustand,
        key: "zustand",
        shape: FeatureShape::State(StateManager::Zustand),
        description: "Zustand stores",
        directories: &["src/store"],
        packages: &["zustand"],
        dev_packages: &[],
        template_set: Some("zustand"),
        provider: None,
        refresh: &[],
    },
    FeatureDef {
        feature: Feature::Localization,
        key: "localization",
        shape: FeatureShape::Flag(Flag::Localization),
        description: "i18next translations",
        directories: &["src/localization"],
        packages: &["i18next", "react-i18next"],
        dev_packages: &[],
        template_set: Some("localization"),
        provider: Some(Provider::Localization),
        refresh: &["screens"],
    },
    FeatureDef {
        feature: Feature::Theme,
        key: "theme",
        shape: FeatureShape::Flag(Flag::Theme),
        description: "Light/dark theme context",
        directories: &["src/config/theme"],
        packages: &[],
        dev_packages: &[],
        template_set: Some("theme"),
        provider: Some(Provider::Theme),
        refresh: &["screens"],
    },
    FeatureDef {
        feature: Feature::Tailwind,
        key: "tailwind",
        shape: FeatureShape::Ui(UiFramework::Tailwind),
        description: "tailwind-rn styled components",
        directories: &[],
        packages: &["tailwind-rn"],
        dev_packages: &["tailwindcss", "postcss", "autoprefixer"],
        template_set: Some("tailwind"),
        provider: None,
        refresh: &[],
    },
    FeatureDef {
        feature: Feature::StyledComponents,
        key: "styled-components",
        shape: FeatureShape::Ui(UiFramework::StyledComponents),
        description: "styled-components UI kit",
        directories: &[],
        packages: &["styled-components"],
        dev_packages: &["@types/styled-components"],
        template_set: Some("styled-components"),
        provider: None,
        refresh: &[],
    },
    FeatureDef {
        feature: Feature::Mmkv,
        key: "mmkv",
        shape: FeatureShape::Storage(StorageBackend::Mmkv),
        description: "MMKV storage backend (replaces async-storage)",
        directories: &[],
        packages: &["react-native-mmkv"],
        dev_packages: &[],
        template_set: Some("mmkv"),
        provider: None,
        refresh: &["async-storage"],
    },
    FeatureDef {
        feature: Feature::Fonts,
        key: "fonts",
        shape: FeatureShape::Flag(Flag::Fonts),
        description: "Custom font assets directory",
        directories: &["src/assets/fonts"],
        packages: &[],
        dev_packages: &[],
        template_set: None,
        provider: None,
        refresh: &[],
    },
];
