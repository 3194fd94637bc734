//! Feature state transitions.
//!
//! Pure functions over `(config, feature, direction) -> config`. Nothing here
//! touches the filesystem; callers sequence directory, template and package
//! effects from what these functions report.

use std::collections::BTreeSet;

use crate::domain::{
    entities::project_config::{Flag, ProjectConfig},
    feature::{BASE_DIRECTORIES, FEATURE_REGISTRY, Feature, FeatureShape},
    value_objects::{NavigationKind, StateManager, StorageBackend, UiFramework},
};

/// One step of a plan moving a project between two configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enable(Feature),
    Disable(Feature),
}

impl Transition {
    pub fn feature(&self) -> Feature {
        match self {
            Self::Enable(f) | Self::Disable(f) => *f,
        }
    }
}

pub struct FeatureStateMachine;

impl FeatureStateMachine {
    /// Whether `feature` is currently active in `config`.
    pub fn is_installed(config: &ProjectConfig, feature: Feature) -> bool {
        match feature.shape() {
            FeatureShape::NavigationGroup => config.has_navigation(),
            FeatureShape::Navigation(kind) => config.navigation.contains(&kind),
            FeatureShape::State(state) => config.state == state,
            FeatureShape::Ui(ui) => config.ui == ui,
            FeatureShape::Storage(storage) => config.storage == storage,
            FeatureShape::Flag(flag) => config.flag(flag),
        }
    }

    /// Config with `feature` enabled. Idempotent.
    ///
    /// Navigation kinds accumulate; the `navigation` umbrella seeds a stack
    /// navigator when none is present. State, UI and storage replace the
    /// previous value.
    pub fn apply_enable(config: &ProjectConfig, feature: Feature) -> ProjectConfig {
        let mut next = config.clone();
        match feature.shape() {
            FeatureShape::NavigationGroup => {
                if next.navigation.is_empty() {
                    next.navigation.insert(NavigationKind::Stack);
                }
            }
            FeatureShape::Navigation(kind) => {
                next.navigation.insert(kind);
            }
            FeatureShape::State(state) => next.state = state,
            FeatureShape::Ui(ui) => next.ui = ui,
            FeatureShape::Storage(storage) => next.storage = storage,
            FeatureShape::Flag(flag) => next.set_flag(flag, true),
        }
        next
    }

    /// Config with `feature` disabled. Idempotent.
    ///
    /// Exclusive fields only reset when they hold the value being disabled;
    /// disabling `zustand` on a redux project changes nothing.
    pub fn apply_disable(config: &ProjectConfig, feature: Feature) -> ProjectConfig {
        let mut next = config.clone();
        match feature.shape() {
            FeatureShape::NavigationGroup => next.navigation.clear(),
            FeatureShape::Navigation(kind) => {
                next.navigation.remove(&kind);
            }
            FeatureShape::State(state) => {
                if next.state == state {
                    next.state = StateManager::None;
                }
            }
            FeatureShape::Ui(ui) => {
                if next.ui == ui {
                    next.ui = UiFramework::None;
                }
            }
            FeatureShape::Storage(storage) => {
                if next.storage == storage {
                    next.storage = StorageBackend::default();
                }
            }
            FeatureShape::Flag(flag) => next.set_flag(flag, false),
        }
        next
    }

    /// Concrete active features, in registry order.
    ///
    /// The `navigation` umbrella is not listed; its kinds are.
    pub fn active_features(config: &ProjectConfig) -> Vec<Feature> {
        FEATURE_REGISTRY
            .iter()
            .map(|d| d.feature)
            .filter(|f| *f != Feature::Navigation)
            .filter(|f| Self::is_installed(config, *f))
            .collect()
    }

    /// Template sets to render for `config`, deduplicated, in render order.
    pub fn template_sets(config: &ProjectConfig) -> Vec<&'static str> {
        let mut sets = vec!["core"];
        if config.sample_screens {
            sets.push("screens");
        }
        for feature in Self::active_features(config) {
            match feature.def().template_set {
                Some(set) if !sets.contains(&set) => sets.push(set),
                _ => {}
            }
        }
        let storage = config.storage.template_set();
        if !sets.contains(&storage) {
            sets.push(storage);
        }
        sets
    }

    /// Base directories plus every directory owned by an active feature.
    pub fn directories(config: &ProjectConfig) -> BTreeSet<&'static str> {
        let mut dirs: BTreeSet<&'static str> = BASE_DIRECTORIES.iter().copied().collect();
        for feature in Self::active_features(config) {
            dirs.extend(feature.def().directories.iter().copied());
        }
        dirs
    }

    /// Directories that disabling `feature` frees up.
    ///
    /// A directory is released only when no feature active afterwards still
    /// owns it, so `src/navigation` survives until the last navigation kind.
    pub fn released_directories(config: &ProjectConfig, feature: Feature) -> Vec<&'static str> {
        if !Self::is_installed(config, feature) {
            return Vec::new();
        }
        let after = Self::directories(&Self::apply_disable(config, feature));
        let owned: Vec<&'static str> = match feature.shape() {
            FeatureShape::NavigationGroup => config
                .navigation
                .iter()
                .flat_map(|k| Feature::from_navigation(*k).def().directories)
                .copied()
                .collect(),
            _ => feature.def().directories.to_vec(),
        };

        let mut released: Vec<&'static str> =
            owned.into_iter().filter(|d| !after.contains(d)).collect();
        released.sort_unstable();
        released.dedup();
        released
    }

    /// Steps that move `current` to `target`.
    ///
    /// Navigation enables come before navigation disables so the shared
    /// navigation directory is never dropped mid-plan. Exclusive fields
    /// disable the old value before enabling the new one.
    pub fn plan_transition(current: &ProjectConfig, target: &ProjectConfig) -> Vec<Transition> {
        let mut plan = Vec::new();

        for kind in target.navigation.difference(&current.navigation) {
            plan.push(Transition::Enable(Feature::from_navigation(*kind)));
        }
        for kind in current.navigation.difference(&target.navigation) {
            plan.push(Transition::Disable(Feature::from_navigation(*kind)));
        }

        if current.state != target.state {
            plan.extend(Feature::from_state(current.state).map(Transition::Disable));
            plan.extend(Feature::from_state(target.state).map(Transition::Enable));
        }
        if current.ui != target.ui {
            plan.extend(Feature::from_ui(current.ui).map(Transition::Disable));
            plan.extend(Feature::from_ui(target.ui).map(Transition::Enable));
        }
        if current.storage != target.storage {
            plan.extend(Feature::from_storage(current.storage).map(Transition::Disable));
            plan.extend(Feature::from_storage(target.storage).map(Transition::Enable));
        }

        for flag in Flag::ALL {
            match (current.flag(flag), target.flag(flag)) {
                (false, true) => plan.push(Transition::Enable(Feature::from_flag(flag))),
                (true, false) => plan.push(Transition::Disable(Feature::from_flag(flag))),
                _ => {}
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Language;

    fn base() -> ProjectConfig {
        ProjectConfig::new("Foo", Language::TypeScript)
    }

    /// A spread of configurations covering every field shape.
    fn samples() -> Vec<ProjectConfig> {
        vec![
            base(),
            base().with_navigation([NavigationKind::Stack]),
            base()
                .with_navigation([NavigationKind::Stack, NavigationKind::Drawer])
                .with_state(StateManager::Redux)
                .with_flag(Flag::Theme, true),
            base()
                .with_state(StateManager::Zustand)
                .with_ui(UiFramework::Tailwind)
                .with_storage(StorageBackend::Mmkv),
            base()
                .with_ui(UiFramework::StyledComponents)
                .with_flag(Flag::Firebase, true)
                .with_flag(Flag::Auth, true),
        ]
    }

    #[test]
    fn enable_is_idempotent() {
        for config in samples() {
            for feature in Feature::ALL {
                let once = FeatureStateMachine::apply_enable(&config, feature);
                let twice = FeatureStateMachine::apply_enable(&once, feature);
                assert_eq!(once, twice, "{feature} not idempotent");
                assert!(FeatureStateMachine::is_installed(&once, feature));
            }
        }
    }

    #[test]
    fn disable_is_idempotent() {
        for config in samples() {
            for feature in Feature::ALL {
                let once = FeatureStateMachine::apply_disable(&config, feature);
                let twice = FeatureStateMachine::apply_disable(&once, feature);
                assert_eq!(once, twice, "{feature} not idempotent");
                assert!(!FeatureStateMachine::is_installed(&once, feature));
            }
        }
    }

    #[test]
    fn exclusive_choices_replace_each_other() {
        let pairs = [
            (Feature::Redux, Feature::Zustand),
            (Feature::Tailwind, Feature::StyledComponents),
        ];
        for config in samples() {
            for (a, b) in pairs {
                let with_a = FeatureStateMachine::apply_enable(&config, a);
                assert!(!FeatureStateMachine::is_installed(&with_a, b));
                let with_b = FeatureStateMachine::apply_enable(&config, b);
                assert!(!FeatureStateMachine::is_installed(&with_b, a));
            }
        }

        let mmkv = FeatureStateMachine::apply_enable(&base(), Feature::Mmkv);
        assert_eq!(mmkv.storage, StorageBackend::Mmkv);
        let back = FeatureStateMachine::apply_disable(&mmkv, Feature::Mmkv);
        assert_eq!(back.storage, StorageBackend::AsyncStorage);
    }

    #[test]
    fn navigation_kinds_accumulate() {
        let config = FeatureStateMachine::apply_enable(&base(), Feature::Stack);
        let config = FeatureStateMachine::apply_enable(&config, Feature::Tabs);
        assert!(FeatureStateMachine::is_installed(&config, Feature::Stack));
        assert!(FeatureStateMachine::is_installed(&config, Feature::Tabs));
        assert!(FeatureStateMachine::is_installed(&config, Feature::Navigation));
        assert_eq!(config.navigation.len(), 2);
    }

    #[test]
    fn navigation_umbrella() {
        let seeded = FeatureStateMachine::apply_enable(&base(), Feature::Navigation);
        assert_eq!(
            seeded.navigation.iter().copied().collect::<Vec<_>>(),
            vec![NavigationKind::Stack]
        );

        let drawer = base().with_navigation([NavigationKind::Drawer]);
        let kept = FeatureStateMachine::apply_enable(&drawer, Feature::Navigation);
        assert_eq!(kept, drawer);

        let cleared = FeatureStateMachine::apply_disable(&drawer, Feature::Navigation);
        assert!(!cleared.has_navigation());
    }

    #[test]
    fn disabling_other_exclusive_value_is_noop() {
        let redux = base().with_state(StateManager::Redux);
        assert_eq!(FeatureStateMachine::apply_disable(&redux, Feature::Zustand), redux);
    }

    #[test]
    fn navigation_directory_released_by_last_kind_only() {
        let two = base().with_navigation([NavigationKind::Stack, NavigationKind::Tabs]);
        assert!(FeatureStateMachine::released_directories(&two, Feature::Tabs).is_empty());

        let one = base().with_navigation([NavigationKind::Tabs]);
        assert_eq!(
            FeatureStateMachine::released_directories(&one, Feature::Tabs),
            vec!["src/navigation"]
        );
        assert_eq!(
            FeatureStateMachine::released_directories(&two, Feature::Navigation),
            vec!["src/navigation"]
        );
    }

    #[test]
    fn released_directories_for_store_and_absent_features() {
        let redux = base().with_state(StateManager::Redux);
        assert_eq!(
            FeatureStateMachine::released_directories(&redux, Feature::Redux),
            vec!["src/store"]
        );
        assert!(FeatureStateMachine::released_directories(&redux, Feature::Zustand).is_empty());
        assert!(FeatureStateMachine::released_directories(&base(), Feature::Firebase).is_empty());
    }

    #[test]
    fn directories_follow_features() {
        let config = base()
            .with_navigation([NavigationKind::Stack])
            .with_state(StateManager::Redux)
            .with_flag(Flag::Api, true)
            .with_flag(Flag::Theme, true);
        let dirs = FeatureStateMachine::directories(&config);
        for expected in ["src/navigation", "src/store", "src/services/api", "src/config/theme"] {
            assert!(dirs.contains(expected), "missing {expected}");
        }
        assert!(!dirs.contains("src/localization"));
        assert!(dirs.contains("src/components"));
    }

    #[test]
    fn template_sets_are_ordered_and_unique() {
        let config = base()
            .with_navigation([NavigationKind::Stack, NavigationKind::Drawer])
            .with_state(StateManager::Redux)
            .with_sample_screens(true)
            .with_flag(Flag::Fonts, true);
        assert_eq!(
            FeatureStateMachine::template_sets(&config),
            vec!["core", "screens", "navigation", "redux", "async-storage"]
        );

        let mmkv = base().with_storage(StorageBackend::Mmkv);
        assert_eq!(FeatureStateMachine::template_sets(&mmkv), vec!["core", "mmkv"]);
    }

    #[test]
    fn plan_disables_old_exclusive_value_first() {
        let current = base()
            .with_navigation([NavigationKind::Stack])
            .with_state(StateManager::Redux);
        let target = base()
            .with_navigation([NavigationKind::Tabs])
            .with_state(StateManager::Zustand)
            .with_storage(StorageBackend::Mmkv);

        let plan = FeatureStateMachine::plan_transition(&current, &target);
        assert_eq!(
            plan,
            vec![
                Transition::Enable(Feature::Tabs),
                Transition::Disable(Feature::Stack),
                Transition::Disable(Feature::Redux),
                Transition::Enable(Feature::Zustand),
                Transition::Enable(Feature::Mmkv),
            ]
        );
    }

    #[test]
    fn plan_applied_reaches_target() {
        let configs = samples();
        for current in &configs {
            for target in &configs {
                let mut state = current.clone();
                for step in FeatureStateMachine::plan_transition(current, target) {
                    state = match step {
                        Transition::Enable(f) => FeatureStateMachine::apply_enable(&state, f),
                        Transition::Disable(f) => FeatureStateMachine::apply_disable(&state, f),
                    };
                }
                assert_eq!(&state, target);
            }
        }
    }
}
