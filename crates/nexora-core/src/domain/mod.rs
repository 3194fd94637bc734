// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Nexora.
//!
//! Pure feature-state logic: the config model, the feature table, state
//! transitions, package planning, entry-point composition and template
//! masking. Nothing here performs I/O; filesystem, template engine and
//! package manager are ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Values, not services**: transitions return new configs
//! - **One table**: directories, packages and providers per feature live in
//!   [`feature::FEATURE_REGISTRY`] only

pub mod dependencies;
pub mod entities;
pub mod entry_point;
pub mod error;
pub mod feature;
pub mod masking;
pub mod state_machine;
pub mod value_objects;

mod validation;

pub use dependencies::{DependencyDelta, DependencyPlanner, PackageSet};
pub use entities::{
    DirectoryToCreate, FileToWrite, Flag, FsEntry, NAME_PLACEHOLDER, ProjectConfig,
    ProjectStructure, RelativePath, RenderContext, TemplateFile, TemplateSet, WritePolicy,
    to_kebab_case, to_pascal_case,
};
pub use entry_point::{EntryPoint, Provider};
pub use error::{DomainError, ErrorCategory};
pub use feature::{FEATURE_REGISTRY, Feature, FeatureDef, FeatureShape};
pub use masking::MaskedTemplate;
pub use state_machine::{FeatureStateMachine, Transition};
pub use validation::DomainValidator;
pub use value_objects::{
    Language, NavigationKind, StateManager, StorageBackend, ThemeMode, UiFramework,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module scenarios
    // ========================================================================

    #[test]
    fn create_scenario_config() {
        let config = ProjectConfig::new("Foo", Language::TypeScript)
            .with_navigation([NavigationKind::Stack])
            .with_state(StateManager::Redux)
            .with_flag(Flag::Theme, true);

        assert!(FeatureStateMachine::is_installed(&config, Feature::Stack));
        assert!(FeatureStateMachine::is_installed(&config, Feature::Redux));
        assert!(FeatureStateMachine::is_installed(&config, Feature::Theme));

        let entry = EntryPoint::render(&config);
        let theme = entry.find("<ThemeProvider").unwrap();
        let store = entry.find("<Provider store={store}").unwrap();
        let nav = entry.find("<NavigationContainer").unwrap();
        assert!(theme < store && store < nav);
    }

    #[test]
    fn add_drawer_keeps_stack() {
        let config = ProjectConfig::new("Foo", Language::TypeScript)
            .with_navigation([NavigationKind::Stack]);
        let next = FeatureStateMachine::apply_enable(&config, Feature::Drawer);

        assert!(FeatureStateMachine::is_installed(&next, Feature::Stack));
        assert!(FeatureStateMachine::is_installed(&next, Feature::Drawer));
        assert!(FeatureStateMachine::directories(&next).contains("src/navigation"));
    }

    #[test]
    fn remove_redux_scenario() {
        let before =
            ProjectConfig::new("Foo", Language::TypeScript).with_state(StateManager::Redux);
        let after = FeatureStateMachine::apply_disable(&before, Feature::Redux);

        assert_eq!(after.state, StateManager::None);
        assert_eq!(
            FeatureStateMachine::released_directories(&before, Feature::Redux),
            vec!["src/store"]
        );
        let delta = DependencyPlanner::delta(&before, &after);
        assert!(delta.uninstall.contains(&"react-redux".to_string()));

        let entry = EntryPoint::remove(&EntryPoint::render(&before), &before, &after);
        assert!(!entry.contains("import { Provider }"));
    }
}
