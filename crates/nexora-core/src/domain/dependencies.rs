//! Package requirements derived from the feature table.

use std::collections::BTreeSet;

use crate::domain::{
    entities::project_config::ProjectConfig,
    feature::{ASYNC_STORAGE_PACKAGES, AUTH_STANDALONE_PACKAGES, Feature},
    state_machine::FeatureStateMachine,
    value_objects::StorageBackend,
};

/// Regular and dev packages required by a configuration or feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    pub dependencies: BTreeSet<String>,
    pub dev_dependencies: BTreeSet<String>,
}

impl PackageSet {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// Every package, regular and dev.
    pub fn all(&self) -> BTreeSet<String> {
        self.dependencies
            .union(&self.dev_dependencies)
            .cloned()
            .collect()
    }

    fn add(&mut self, packages: &[&str]) {
        self.dependencies.extend(packages.iter().map(|p| p.to_string()));
    }

    fn add_dev(&mut self, packages: &[&str]) {
        self.dev_dependencies
            .extend(packages.iter().map(|p| p.to_string()));
    }
}

/// Packages to install and uninstall when moving between two configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyDelta {
    pub install: Vec<String>,
    pub install_dev: Vec<String>,
    pub uninstall: Vec<String>,
}

impl DependencyDelta {
    pub fn is_empty(&self) -> bool {
        self.install.is_empty() && self.install_dev.is_empty() && self.uninstall.is_empty()
    }
}

pub struct DependencyPlanner;

impl DependencyPlanner {
    /// Full package set required by `config`.
    pub fn for_config(config: &ProjectConfig) -> PackageSet {
        let mut set = PackageSet::default();

        if config.has_navigation() {
            Self::extend_with(&mut set, Feature::Navigation, config);
        }
        for feature in FeatureStateMachine::active_features(config) {
            Self::extend_with(&mut set, feature, config);
        }
        if config.storage == StorageBackend::AsyncStorage {
            set.add(ASYNC_STORAGE_PACKAGES);
        }

        set
    }

    /// Packages listed for a single feature in the context of `config`.
    ///
    /// `auth` resolves to its standalone packages unless Firebase is on.
    pub fn for_feature(feature: Feature, config: &ProjectConfig) -> PackageSet {
        let mut set = PackageSet::default();
        Self::extend_with(&mut set, feature, config);
        set
    }

    /// Union of the packages of `features`.
    pub fn for_features(features: &[Feature], config: &ProjectConfig) -> PackageSet {
        let mut set = PackageSet::default();
        for feature in features {
            Self::extend_with(&mut set, *feature, config);
        }
        set
    }

    /// Packages gained and lost between `before` and `after`.
    ///
    /// A package still required after the change is never uninstalled, so
    /// `@react-navigation/native` survives removing one of two navigators.
    pub fn delta(before: &ProjectConfig, after: &ProjectConfig) -> DependencyDelta {
        let old = Self::for_config(before);
        let new = Self::for_config(after);
        let old_all = old.all();
        let new_all = new.all();

        DependencyDelta {
            install: new.dependencies.difference(&old_all).cloned().collect(),
            install_dev: new
                .dev_dependencies
                .difference(&old_all)
                .cloned()
                .collect(),
            uninstall: old_all.difference(&new_all).cloned().collect(),
        }
    }

    fn extend_with(set: &mut PackageSet, feature: Feature, config: &ProjectConfig) {
        let def = feature.def();
        set.add(def.packages);
        set.add_dev(def.dev_packages);
        if feature == Feature::Auth && !config.firebase {
            set.add(AUTH_STANDALONE_PACKAGES);
        }
    }
}
