//! End-to-end service workflows over the in-memory filesystem, the built-in
//! template sets and the real Handlebars renderer.

use std::path::{Path, PathBuf};

use mockall::mock;
use nexora_adapters::{
    HandlebarsRenderer, InMemoryRegistry, InitCall, MemoryFilesystem, RecordingInitializer,
    RecordingInstaller,
};
use nexora_core::{
    application::{
        AddOptions, AddOutcome, ApplicationError, ComposeOptions, ConfigureRequest,
        FeatureService, ProjectComposer, RemoveOptions, RemoveOutcome, UpdateOptions, UpdateOutcome,
        UpdateReconciler,
        ports::{PackageInstaller, ProjectInitializer},
    },
    domain::{
        Feature, Flag, Language, NavigationKind, ProjectConfig, StateManager, ThemeMode,
    },
    error::{NexoraError, NexoraResult},
};

mock! {
    Installer {}
    impl PackageInstaller for Installer {
        fn install(&self, project_root: &Path, packages: &[String], dev: bool) -> NexoraResult<()>;
        fn uninstall(&self, project_root: &Path, packages: &[String]) -> NexoraResult<()>;
    }
}

mock! {
    Initializer {}
    impl ProjectInitializer for Initializer {
        fn init(&self, root: &Path, name: &str) -> NexoraResult<()>;
    }
}

const ROOT: &str = "/work/Shop";

struct Harness {
    fs: MemoryFilesystem,
    registry: InMemoryRegistry,
    installer: RecordingInstaller,
    initializer: RecordingInitializer,
}

impl Harness {
    fn new() -> Self {
        Self {
            fs: MemoryFilesystem::new(),
            registry: InMemoryRegistry::with_builtin().unwrap(),
            installer: RecordingInstaller::new(),
            initializer: RecordingInitializer::new(),
        }
    }

    fn root(&self) -> &'static Path {
        Path::new(ROOT)
    }

    fn composer(&self) -> ProjectComposer {
        self.composer_with(Box::new(self.initializer.clone()))
    }

    fn composer_with(&self, initializer: Box<dyn ProjectInitializer>) -> ProjectComposer {
        ProjectComposer::new(
            Box::new(self.fs.clone()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
            initializer,
        )
    }

    fn features(&self) -> FeatureService {
        FeatureService::new(
            Box::new(self.fs.clone()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
        )
    }

    fn reconciler(&self) -> UpdateReconciler {
        UpdateReconciler::new(
            Box::new(self.fs.clone()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
        )
    }

    fn compose(&self, config: &ProjectConfig) {
        self.composer()
            .compose(self.root(), config, ComposeOptions::default())
            .unwrap();
    }

    fn file(&self, relative: &str) -> Option<String> {
        self.fs.read_file(self.root().join(relative))
    }

    fn has(&self, relative: &str) -> bool {
        self.file(relative).is_some()
    }

    fn config(&self) -> ProjectConfig {
        self.features().status(self.root()).unwrap()
    }
}

fn shop() -> ProjectConfig {
    ProjectConfig::new("Shop", Language::TypeScript)
}

fn assert_fully_rendered(h: &Harness) {
    for path in h.fs.paths() {
        let content = h.fs.read_file(&path).unwrap();
        assert!(
            !content.contains("{{#") && !content.contains("{{/") && !content.contains("__NEXORA_MASK_"),
            "unrendered template syntax in {}",
            path.display()
        );
    }
}

// ── compose ──────────────────────────────────────────────────────────────────

#[test]
fn compose_typescript_project_with_stack_redux_and_theme() {
    let h = Harness::new();
    let config = shop()
        .with_navigation([NavigationKind::Stack])
        .with_state(StateManager::Redux)
        .with_flag(Flag::Theme, true);
    h.compose(&config);

    for file in [
        "App.tsx",
        "index.js",
        "package.json",
        "tsconfig.json",
        "src/navigation/index.tsx",
        "src/navigation/screens.tsx",
        "src/store/index.ts",
        "src/store/slices/appSlice.ts",
        "src/config/theme/index.tsx",
        "src/utils/storage.ts",
        ".nexora-cli-config.json",
    ] {
        assert!(h.has(file), "missing {file}");
    }
    assert!(h.fs.is_dir(h.root().join("src/assets")));
    assert!(!h.has(".nexora.lock"));

    let app = h.file("App.tsx").unwrap();
    let theme = app.find("<ThemeProvider").unwrap();
    let store = app.find("<Provider store={store}").unwrap();
    let nav = app.find("<NavigationContainer").unwrap();
    assert!(theme < store && store < nav);

    let manifest = h.file("package.json").unwrap();
    assert!(manifest.contains("\"name\": \"shop\""));
    assert!(manifest.contains("\"typescript\""));

    let placeholders = h.file("src/navigation/screens.tsx").unwrap();
    assert!(placeholders.contains("style={{ flex: 1, alignItems: 'center', justifyContent: 'center' }}"));
    assert!(placeholders.contains("title=\"Shop\""));

    let installed = h.installer.installed();
    for pkg in ["@reduxjs/toolkit", "react-redux", "@react-navigation/native-stack"] {
        assert!(installed.contains(&pkg.to_string()), "{pkg} not installed");
    }

    let stored = h.config();
    assert_eq!(stored.state, StateManager::Redux);
    assert_eq!(stored.cli_version, nexora_core::VERSION);
    assert_fully_rendered(&h);
}

#[test]
fn compose_javascript_project_uses_js_paths() {
    let h = Harness::new();
    h.compose(
        &ProjectConfig::new("Shop", Language::JavaScript)
            .with_flag(Flag::Api, true)
            .with_sample_screens(true),
    );

    assert!(h.has("App.js"));
    assert!(h.has("src/services/api/index.js"));
    assert!(h.has("src/screens/HomeScreen.js"));
    assert!(!h.has("tsconfig.json"));
    assert!(!h.file("src/utils/storage.js").unwrap().contains(": string"));
    assert!(h.file("App.js").unwrap().contains("Welcome to Shop!"));
    assert_fully_rendered(&h);
}

#[test]
fn compose_refuses_existing_directory() {
    let h = Harness::new();
    h.fs.insert_file(h.root().join("README.md"), "mine");

    let err = h
        .composer()
        .compose(h.root(), &shop(), ComposeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        NexoraError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(h.file("README.md").as_deref(), Some("mine"));
    assert!(h.initializer.calls().is_empty());
}

#[test]
fn compose_bootstraps_native_project_before_templates() {
    let h = Harness::new();
    let native = h.fs.clone();
    let mut initializer = MockInitializer::new();
    initializer
        .expect_init()
        .withf(|root, name| root == Path::new(ROOT) && name == "Shop")
        .times(1)
        .returning(move |root, _| {
            native.insert_file(root.join("package.json"), "{\"name\": \"native\"}");
            native.insert_file(root.join("App.tsx"), "native app");
            native.insert_file(root.join("android/build.gradle"), "gradle");
            Ok(())
        });

    let report = h
        .composer_with(Box::new(initializer))
        .compose(h.root(), &shop(), ComposeOptions::default())
        .unwrap();

    assert!(report.native);
    assert_eq!(h.file("package.json").as_deref(), Some("{\"name\": \"native\"}"));
    assert!(report.files.preserved.contains(&PathBuf::from("package.json")));
    assert!(h.file("App.tsx").unwrap().contains("Welcome to"));
    assert!(report.files.updated.contains(&PathBuf::from("App.tsx")));
    assert_eq!(h.file("android/build.gradle").as_deref(), Some("gradle"));
    assert!(h.has(".nexora-cli-config.json"));
}

#[test]
fn skip_native_writes_templates_only() {
    let h = Harness::new();
    let report = h
        .composer()
        .compose(
            h.root(),
            &shop(),
            ComposeOptions {
                skip_native: true,
                ..ComposeOptions::default()
            },
        )
        .unwrap();

    assert!(!report.native);
    assert!(h.initializer.calls().is_empty());
    assert!(report.files.created.contains(&PathBuf::from("package.json")));
}

#[test]
fn default_compose_records_one_native_bootstrap() {
    let h = Harness::new();
    h.compose(&shop());
    assert_eq!(
        h.initializer.calls(),
        vec![InitCall {
            root: PathBuf::from(ROOT),
            name: "Shop".into(),
        }]
    );
}

#[test]
fn native_failure_stops_before_any_template_is_written() {
    let h = Harness::new();
    let mut initializer = MockInitializer::new();
    initializer.expect_init().returning(|_, _| {
        Err(ApplicationError::NativeInit {
            reason: "npx exited with 1".into(),
        }
        .into())
    });

    let err = h
        .composer_with(Box::new(initializer))
        .compose(h.root(), &shop(), ComposeOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        NexoraError::Application(ApplicationError::NativeInit { .. })
    ));
    assert!(!h.has("App.tsx"));
    assert!(!h.has(".nexora-cli-config.json"));
    assert!(h.installer.calls().is_empty());
}

#[test]
fn install_failure_leaves_files_committed() {
    let h = Harness::new();
    let mut installer = MockInstaller::new();
    installer.expect_install().returning(|_, _, _| {
        Err(ApplicationError::DependencySync {
            operation: "install",
            reason: "npm exited with 1".into(),
            files_committed: false,
        }
        .into())
    });
    let composer = ProjectComposer::new(
        Box::new(h.fs.clone()),
        Box::new(h.registry.clone()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(installer),
        Box::new(RecordingInitializer::new()),
    );

    let err = composer
        .compose(h.root(), &shop().with_flag(Flag::Api, true), ComposeOptions::default())
        .unwrap_err();

    match err {
        NexoraError::Application(ApplicationError::DependencySync {
            files_committed,
            reason,
            ..
        }) => {
            assert!(files_committed);
            assert_eq!(reason, "npm exited with 1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(h.has("App.tsx"));
    assert!(!h.has(".nexora.lock"));
}

// ── add / remove ─────────────────────────────────────────────────────────────

#[test]
fn add_drawer_keeps_stack_and_enables_reanimated() {
    let h = Harness::new();
    h.compose(&shop().with_navigation([NavigationKind::Stack]));

    let outcome = h
        .features()
        .add(h.root(), Feature::Drawer, AddOptions::default())
        .unwrap();
    assert!(matches!(outcome, AddOutcome::Added { replaced: None, .. }));

    let navigator = h.file("src/navigation/index.tsx").unwrap();
    assert!(navigator.contains("createDrawerNavigator"));
    assert!(navigator.contains("createNativeStackNavigator"));
    assert!(navigator.contains("return <MainDrawer />;"));
    assert!(h.file("babel.config.js").unwrap().contains("react-native-reanimated/plugin"));
    assert!(h.file("index.js").unwrap().contains("import 'react-native-gesture-handler';"));
    assert!(h.installer.installed().contains(&"@react-navigation/drawer".to_string()));

    let stored = h.config();
    assert!(stored.navigation.contains(&NavigationKind::Stack));
    assert!(stored.navigation.contains(&NavigationKind::Drawer));
    assert_fully_rendered(&h);
}

#[test]
fn add_installed_feature_is_a_noop() {
    let h = Harness::new();
    h.compose(&shop().with_flag(Flag::Api, true));
    let before = h.installer.calls().len();

    let outcome = h
        .features()
        .add(h.root(), Feature::Api, AddOptions::default())
        .unwrap();
    assert!(matches!(outcome, AddOutcome::AlreadyInstalled(Feature::Api)));
    assert_eq!(h.installer.calls().len(), before);
}

#[test]
fn add_zustand_replaces_redux() {
    let h = Harness::new();
    h.compose(&shop().with_state(StateManager::Redux));

    let outcome = h
        .features()
        .add(h.root(), Feature::Zustand, AddOptions::default())
        .unwrap();
    let AddOutcome::Added {
        replaced: Some(replaced),
        ..
    } = outcome
    else {
        panic!("zustand should displace redux");
    };

    assert_eq!(replaced.feature, Some(Feature::Redux));
    assert_eq!(h.config().state, StateManager::Zustand);
    assert!(h.file("src/store/appStore.ts").unwrap().contains("create<AppState>()"));
    assert!(!h.has("src/store/slices/appSlice.ts"));
    assert!(!h.file("App.tsx").unwrap().contains("react-redux"));
    assert!(h.installer.uninstalled().contains(&"react-redux".to_string()));
    assert!(h.installer.installed().contains(&"zustand".to_string()));
}

#[test]
fn remove_redux_cleans_store_entry_point_and_packages() {
    let h = Harness::new();
    h.compose(&shop().with_state(StateManager::Redux));

    let outcome = h.features().remove(h.root(), Feature::Redux, RemoveOptions::default()).unwrap();
    let RemoveOutcome::Removed(change) = outcome else {
        panic!("redux should have been removed");
    };

    assert_eq!(change.removed_directories, vec!["src/store".to_string()]);
    assert!(!h.has("src/store/index.ts"));
    assert!(!h.file("App.tsx").unwrap().contains("react-redux"));
    assert!(h.installer.uninstalled().contains(&"react-redux".to_string()));
    assert_eq!(h.config().state, StateManager::None);
}

#[test]
fn remove_firebase_deletes_orphans_and_refreshes_auth() {
    let h = Harness::new();
    h.compose(
        &shop()
            .with_flag(Flag::Firebase, true)
            .with_flag(Flag::Auth, true),
    );
    assert!(h.has("src/config/firebase.ts"));
    assert!(h.file("src/hooks/useAuth.ts").unwrap().contains("@react-native-firebase/auth"));

    let RemoveOutcome::Removed(change) = h.features().remove(h.root(), Feature::Firebase, RemoveOptions::default()).unwrap()
    else {
        panic!("firebase should have been removed");
    };

    assert!(!h.has("src/config/firebase.ts"));
    assert!(!h.has("src/services/firebase/index.ts"));
    assert!(change.removed_files.contains(&PathBuf::from("src/config/firebase.ts")));
    assert!(h.file("src/hooks/useAuth.ts").unwrap().contains("jwt-decode"));
    assert!(h.has("src/config"));
}

#[test]
fn remove_missing_feature_reports_not_installed() {
    let h = Harness::new();
    h.compose(&shop());
    let outcome = h.features().remove(h.root(), Feature::Tailwind, RemoveOptions::default()).unwrap();
    assert!(matches!(outcome, RemoveOutcome::NotInstalled(Feature::Tailwind)));
}

#[test]
fn held_lock_blocks_mutations() {
    let h = Harness::new();
    h.compose(&shop());
    h.fs.insert_file(h.root().join(".nexora.lock"), "someone else\n");

    let err = h
        .features()
        .add(h.root(), Feature::Api, AddOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        NexoraError::Application(ApplicationError::ProjectLocked { .. })
    ));
    assert!(!h.has("src/services/api/index.ts"));
    assert_eq!(h.file(".nexora.lock").as_deref(), Some("someone else\n"));
}

#[test]
fn commands_outside_a_project_fail_cleanly() {
    let h = Harness::new();
    let err = h
        .features()
        .add(Path::new("/elsewhere"), Feature::Api, AddOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        NexoraError::Application(ApplicationError::NotAManagedProject { .. })
    ));
    assert!(h.fs.paths().is_empty());
}

// ── rename / configure ───────────────────────────────────────────────────────

#[test]
fn rename_updates_manifests_code_and_config() {
    let h = Harness::new();
    h.compose(&shop());

    let report = h.features().rename(h.root(), "Market").unwrap();
    assert_eq!(report.old_name, "Shop");

    assert!(h.file("app.json").unwrap().contains("\"displayName\": \"Market\""));
    assert!(h.file("package.json").unwrap().contains("\"name\": \"market\""));
    assert!(h.file("App.tsx").unwrap().contains("Welcome to Market!"));
    assert_eq!(h.config().name, "Market");
    assert!(report.files.contains(&PathBuf::from("App.tsx")));
}

#[test]
fn configure_theme_rewrites_default_mode() {
    let h = Harness::new();
    h.compose(&shop().with_flag(Flag::Theme, true));

    let report = h
        .features()
        .configure(
            h.root(),
            ConfigureRequest {
                theme: Some(ThemeMode::Dark),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(report.theme, Some(ThemeMode::Dark));
    assert!(h.file("src/config/theme/index.tsx").unwrap().contains("= 'dark';"));
    assert_eq!(h.config().default_theme, Some(ThemeMode::Dark));
}

#[test]
fn configure_theme_requires_theme_feature() {
    let h = Harness::new();
    h.compose(&shop());

    let err = h
        .features()
        .configure(
            h.root(),
            ConfigureRequest {
                theme: Some(ThemeMode::Light),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("theme"));
}

// ── update ───────────────────────────────────────────────────────────────────

#[test]
fn update_at_current_version_is_up_to_date() {
    let h = Harness::new();
    h.compose(&shop());

    let outcome = h.reconciler().update(h.root(), UpdateOptions::default()).unwrap();
    assert!(matches!(outcome, UpdateOutcome::UpToDate { .. }));
    assert!(!h.fs.is_dir(h.root().join(".nexora-backups")));
}

#[test]
fn forced_update_of_fresh_project_changes_nothing() {
    let h = Harness::new();
    h.compose(
        &shop()
            .with_navigation([NavigationKind::Tabs])
            .with_flag(Flag::Localization, true),
    );

    let outcome = h
        .reconciler()
        .update(
            h.root(),
            UpdateOptions {
                force: true,
                skip_install: true,
                ..Default::default()
            },
        )
        .unwrap();
    let UpdateOutcome::Updated(report) = outcome else {
        panic!("forced update should run");
    };

    assert!(report.files.created.is_empty(), "{:?}", report.files.created);
    assert!(report.files.updated.is_empty(), "{:?}", report.files.updated);
    assert!(report.files.preserved.contains(&PathBuf::from("package.json")));

    let backup = report.backup.unwrap();
    assert!(h.fs.read_file(backup.join("App.tsx")).is_some());
    assert!(h.fs.read_file(backup.join(".nexora-cli-config.json")).is_some());
}

#[test]
fn old_project_is_brought_up_to_date() {
    let h = Harness::new();
    h.compose(&shop().with_flag(Flag::Api, true));

    let config_path = h.root().join(".nexora-cli-config.json");
    let stale = h
        .fs
        .read_file(&config_path)
        .unwrap()
        .replace(nexora_core::VERSION, "0.0.1");
    h.fs.insert_file(&config_path, stale);
    h.fs.insert_file(h.root().join("src/services/api/index.ts"), "// edited\n");

    let outcome = h
        .reconciler()
        .update(
            h.root(),
            UpdateOptions {
                backup: false,
                ..Default::default()
            },
        )
        .unwrap();
    let UpdateOutcome::Updated(report) = outcome else {
        panic!("stale project should update");
    };

    assert_eq!(report.from_version, "0.0.1");
    assert!(report.files.updated.contains(&PathBuf::from("src/services/api/index.ts")));
    assert!(h.file("src/services/api/index.ts").unwrap().contains("axios.create"));
    assert_eq!(h.config().cli_version, nexora_core::VERSION);
    assert!(h.installer.installed().contains(&"axios".to_string()));
}

#[test]
fn scoped_update_leaves_entry_point_alone() {
    let h = Harness::new();
    h.compose(
        &shop()
            .with_flag(Flag::Theme, true)
            .with_flag(Flag::Api, true),
    );
    let edited = h.file("App.tsx").unwrap().replace("Welcome to", "Hello from");
    h.fs.insert_file(h.root().join("App.tsx"), edited.clone());
    h.fs.insert_file(h.root().join("src/services/api/index.ts"), "// edited\n");

    let outcome = h
        .reconciler()
        .update(
            h.root(),
            UpdateOptions {
                features: Some(vec![Feature::Api]),
                force: true,
                backup: false,
                skip_install: true,
            },
        )
        .unwrap();
    let UpdateOutcome::Updated(report) = outcome else {
        panic!("forced update should run");
    };

    assert_eq!(report.sets, vec!["api"]);
    assert_eq!(h.file("App.tsx").unwrap(), edited);
    assert!(!report.files.updated.contains(&PathBuf::from("App.tsx")));
    assert!(h.file("src/services/api/index.ts").unwrap().contains("axios.create"));
}

#[test]
fn version_status_reports_without_side_effects() {
    let h = Harness::new();
    h.compose(&shop());

    let status = h.reconciler().version_status(h.root()).unwrap();
    assert!(status.up_to_date);
    assert_eq!(status.project_version, nexora_core::VERSION);

    let config_path = h.root().join(".nexora-cli-config.json");
    let stale = h
        .fs
        .read_file(&config_path)
        .unwrap()
        .replace(nexora_core::VERSION, "0.0.1");
    h.fs.insert_file(&config_path, stale);

    let status = h.reconciler().version_status(h.root()).unwrap();
    assert!(!status.up_to_date);
    assert_eq!(status.project_version, "0.0.1");
    assert!(!h.has(".nexora.lock"));
    assert!(!h.fs.is_dir(h.root().join(".nexora-backups")));
}

#[test]
fn update_rejects_projects_without_react_native() {
    let h = Harness::new();
    h.compose(&shop());
    h.fs.insert_file(h.root().join("package.json"), "{\"dependencies\": {}}\n");

    let err = h
        .reconciler()
        .update(
            h.root(),
            UpdateOptions {
                force: true,
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        NexoraError::Application(ApplicationError::NotAManagedProject { .. })
    ));
}
