//! Feature Service - add, remove, rename and reconfigure existing projects.
//!
//! Every public operation takes the project lock, loads the config, and
//! sequences the effects the state machine describes. Already-installed and
//! not-installed are outcomes, not errors.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        lock::ProjectLock,
        ports::{Filesystem, PackageInstaller, TemplateRegistry, TemplateRenderer},
        services::{
            config_store::ConfigStore,
            package_sync::PackageSync,
            template_writer::{TemplateWriter, WriteReport},
        },
    },
    domain::{
        DependencyPlanner, DomainError, DomainValidator, EntryPoint, Feature, FeatureStateMachine,
        NavigationKind, ProjectConfig, StateManager, StorageBackend, ThemeMode, Transition,
        UiFramework, to_kebab_case,
    },
    error::{NexoraError, NexoraResult},
};

static LOCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("Invalid locale regex")
});

/// Directories never searched for code references during `rename`.
const RENAME_SKIP: &[&str] = &[
    "node_modules",
    ".git",
    "android",
    "ios",
    ".nexora-backups",
];

const CODE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Re-render and reinstall a feature that is already active.
    pub reinstall: bool,
    pub skip_install: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    pub skip_install: bool,
}

/// Effects of one enable or disable step.
#[derive(Debug, Clone, Default)]
pub struct FeatureChange {
    pub feature: Option<Feature>,
    pub files: WriteReport,
    pub created_directories: Vec<String>,
    pub removed_directories: Vec<String>,
    pub removed_files: Vec<PathBuf>,
    pub installed: Vec<String>,
    pub uninstalled: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum AddOutcome {
    AlreadyInstalled(Feature),
    Added {
        change: FeatureChange,
        /// The exclusive value this feature displaced, if any.
        replaced: Option<FeatureChange>,
    },
}

#[derive(Debug, Clone)]
pub enum RemoveOutcome {
    NotInstalled(Feature),
    Removed(FeatureChange),
}

#[derive(Debug, Clone)]
pub struct RenameReport {
    pub old_name: String,
    pub new_name: String,
    /// Files whose content changed, relative to the project root.
    pub files: Vec<PathBuf>,
}

/// Changes requested through `config`. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    pub theme: Option<ThemeMode>,
    pub language: Option<String>,
    pub navigation: Option<BTreeSet<NavigationKind>>,
    pub state: Option<StateManager>,
    pub ui: Option<UiFramework>,
    pub storage: Option<StorageBackend>,
    pub skip_install: bool,
}

impl ConfigureRequest {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.language.is_none()
            && self.navigation.is_none()
            && self.state.is_none()
            && self.ui.is_none()
            && self.storage.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigureReport {
    pub steps: Vec<Transition>,
    pub changes: Vec<FeatureChange>,
    pub theme: Option<ThemeMode>,
    pub language: Option<String>,
    pub files: WriteReport,
}

pub struct FeatureService {
    filesystem: Box<dyn Filesystem>,
    registry: Box<dyn TemplateRegistry>,
    renderer: Box<dyn TemplateRenderer>,
    installer: Box<dyn PackageInstaller>,
}

impl FeatureService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        registry: Box<dyn TemplateRegistry>,
        renderer: Box<dyn TemplateRenderer>,
        installer: Box<dyn PackageInstaller>,
    ) -> Self {
        Self {
            filesystem,
            registry,
            renderer,
            installer,
        }
    }

    /// Confirm `root` is a managed project, then lock it and read the
    /// config again under the lock.
    fn lock_project(&self, root: &Path) -> NexoraResult<(ProjectLock<'_>, ProjectConfig)> {
        let fs = self.filesystem.as_ref();
        ConfigStore::load(fs, root)?;
        let lock = ProjectLock::acquire(fs, root)?;
        let config = ConfigStore::load(fs, root)?;
        Ok((lock, config))
    }

    /// Load the project config without locking (for read-only commands).
    pub fn status(&self, root: &Path) -> NexoraResult<ProjectConfig> {
        ConfigStore::load(self.filesystem.as_ref(), root)
    }

    /// Enable `feature` on the project at `root`.
    #[instrument(skip_all, fields(feature = %feature, root = %root.display()))]
    pub fn add(&self, root: &Path, feature: Feature, options: AddOptions) -> NexoraResult<AddOutcome> {
        let (_lock, config) = self.lock_project(root)?;

        if FeatureStateMachine::is_installed(&config, feature) {
            if !options.reinstall {
                info!("Feature already installed");
                return Ok(AddOutcome::AlreadyInstalled(feature));
            }
            let (_, change) = self.enable(root, &config, feature, options)?;
            return Ok(AddOutcome::Added {
                change,
                replaced: None,
            });
        }

        // A different value in an exclusive field is disabled first.
        let target = FeatureStateMachine::apply_enable(&config, feature);
        let mut current = config;
        let mut change = FeatureChange::default();
        let mut replaced = None;
        for step in FeatureStateMachine::plan_transition(&current, &target) {
            match step {
                Transition::Disable(old) => {
                    info!(replaced = %old, "Replacing exclusive feature");
                    let (next, removed) = self.disable(root, &current, old, options.skip_install)?;
                    current = next;
                    replaced = Some(removed);
                }
                Transition::Enable(new) => {
                    let (next, added) = self.enable(root, &current, new, options)?;
                    current = next;
                    change = added;
                }
            }
        }
        Ok(AddOutcome::Added { change, replaced })
    }

    /// Disable `feature` and clean up what it owned.
    #[instrument(skip_all, fields(feature = %feature, root = %root.display()))]
    pub fn remove(
        &self,
        root: &Path,
        feature: Feature,
        options: RemoveOptions,
    ) -> NexoraResult<RemoveOutcome> {
        let (_lock, config) = self.lock_project(root)?;

        if !FeatureStateMachine::is_installed(&config, feature) {
            info!("Feature not installed");
            return Ok(RemoveOutcome::NotInstalled(feature));
        }

        let (_, change) = self.disable(root, &config, feature, options.skip_install)?;
        Ok(RemoveOutcome::Removed(change))
    }

    /// Rename the app in its manifests, code references and config.
    #[instrument(skip_all, fields(root = %root.display(), new_name = %new_name))]
    pub fn rename(&self, root: &Path, new_name: &str) -> NexoraResult<RenameReport> {
        DomainValidator::validate_project_name(new_name)?;
        let (_lock, mut config) = self.lock_project(root)?;
        let old_name = config.name.clone();
        let mut files = Vec::new();

        if self.update_json(root, "app.json", |doc| {
            let mut changed = false;
            for key in ["name", "displayName"] {
                if let Some(slot) = doc.get_mut(key) {
                    *slot = Value::String(new_name.to_string());
                    changed = true;
                }
            }
            changed
        })? {
            files.push(PathBuf::from("app.json"));
        }

        if self.update_json(root, "package.json", |doc| match doc.as_object_mut() {
            Some(map) => {
                map.insert("name".into(), Value::String(to_kebab_case(new_name)));
                true
            }
            None => false,
        })? {
            files.push(PathBuf::from("package.json"));
        }

        if old_name != new_name {
            let rules = ReferenceRules::new(&old_name, new_name)?;
            for relative in self.code_files(root, &config)? {
                let path = root.join(&relative);
                let source = self.filesystem.read_to_string(&path)?;
                let updated = rules.apply(&source);
                if updated != source {
                    self.filesystem.write_file(&path, &updated)?;
                    debug!(file = %relative.display(), "Updated code references");
                    files.push(relative);
                }
            }
        }

        config.name = new_name.to_string();
        ConfigStore::save(self.filesystem.as_ref(), root, &config)?;

        info!(old = %old_name, files = files.len(), "Project renamed");
        Ok(RenameReport {
            old_name,
            new_name: new_name.to_string(),
            files,
        })
    }

    /// Apply theme/locale defaults and structural changes.
    ///
    /// Structural changes run as a transition plan through the same enable
    /// and disable steps as `add` and `remove`, persisting after each step.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn configure(&self, root: &Path, request: ConfigureRequest) -> NexoraResult<ConfigureReport> {
        let (_lock, mut config) = self.lock_project(root)?;
        let mut report = ConfigureReport::default();

        if request.theme.is_some() && !config.theme {
            return Err(DomainError::FeatureRequires {
                feature: "--theme",
                requires: "theme",
            }
            .into());
        }
        if let Some(locale) = &request.language {
            if !config.localization {
                return Err(DomainError::FeatureRequires {
                    feature: "--language",
                    requires: "localization",
                }
                .into());
            }
            if !LOCALE.is_match(locale) {
                return Err(DomainError::InvalidValue {
                    field: "language",
                    value: locale.clone(),
                    expected: "a locale code such as en, fr or pt-BR",
                }
                .into());
            }
        }

        let mut target = config.clone();
        if let Some(navigation) = request.navigation {
            target.navigation = navigation;
        }
        if let Some(state) = request.state {
            target.state = state;
        }
        if let Some(ui) = request.ui {
            target.ui = ui;
        }
        if let Some(storage) = request.storage {
            target.storage = storage;
        }

        let plan = FeatureStateMachine::plan_transition(&config, &target);
        info!(steps = plan.len(), "Executing transition plan");
        let options = AddOptions {
            reinstall: false,
            skip_install: request.skip_install,
        };
        for step in &plan {
            let (next, change) = match *step {
                Transition::Enable(feature) => self.enable(root, &config, feature, options)?,
                Transition::Disable(feature) => {
                    self.disable(root, &config, feature, request.skip_install)?
                }
            };
            config = next;
            report.changes.push(change);
        }
        report.steps = plan;

        let mut refresh = Vec::new();
        if let Some(mode) = request.theme {
            config.default_theme = Some(mode);
            report.theme = Some(mode);
            refresh.push("theme");
        }
        if let Some(locale) = request.language {
            config.default_language = Some(locale.clone());
            report.language = Some(locale);
            refresh.push("localization");
        }
        if !refresh.is_empty() {
            let writer = self.writer();
            let structure = writer.render_sets(root, &config, &refresh)?;
            report.files = writer.write(&structure)?;
            ConfigStore::save(self.filesystem.as_ref(), root, &config)?;
        }

        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Enable without locking. Writes files, saves config, then installs.
    fn enable(
        &self,
        root: &Path,
        before: &ProjectConfig,
        feature: Feature,
        options: AddOptions,
    ) -> NexoraResult<(ProjectConfig, FeatureChange)> {
        let after = FeatureStateMachine::apply_enable(before, feature);
        let writer = self.writer();

        let sets = refresh_sets(&after, feature);
        let mut structure = writer.render_sets(root, &after, &sets)?;
        TemplateWriter::add_entry_point(&mut structure, &after);

        let old_dirs = FeatureStateMachine::directories(before);
        let mut created_directories = Vec::new();
        for dir in FeatureStateMachine::directories(&after) {
            structure.add_directory(dir);
            if !old_dirs.contains(dir) {
                created_directories.push(dir.to_string());
            }
        }

        let files = writer.write(&structure)?;
        ConfigStore::save(self.filesystem.as_ref(), root, &after)?;

        let sync = PackageSync::new(self.installer.as_ref(), root);
        let installed = if options.skip_install {
            Vec::new()
        } else if options.reinstall {
            let set = DependencyPlanner::for_feature(feature, &after);
            sync.install_set(&set)?;
            set.all().into_iter().collect()
        } else {
            let delta = DependencyPlanner::delta(before, &after);
            sync.install_delta(&delta)?;
            delta.install.into_iter().chain(delta.install_dev).collect()
        };

        info!(files = files.touched(), packages = installed.len(), "Feature enabled");
        Ok((
            after,
            FeatureChange {
                feature: Some(feature),
                files,
                created_directories,
                installed,
                ..Default::default()
            },
        ))
    }

    /// Disable without locking.
    ///
    /// Order: released directories, package uninstall, entry-point surgery,
    /// refreshed dependents, orphaned files, config.
    fn disable(
        &self,
        root: &Path,
        before: &ProjectConfig,
        feature: Feature,
        skip_install: bool,
    ) -> NexoraResult<(ProjectConfig, FeatureChange)> {
        let after = FeatureStateMachine::apply_disable(before, feature);
        let writer = self.writer();
        let fs = self.filesystem.as_ref();
        let mut change = FeatureChange {
            feature: Some(feature),
            ..Default::default()
        };

        // Files this feature's own set produced, rendered before anything moves.
        let owned: Vec<PathBuf> = match feature.def().template_set {
            Some(set) => writer
                .render_sets(root, before, &[set])?
                .files()
                .map(|f| f.path.clone())
                .collect(),
            None => Vec::new(),
        };
        let refreshed = writer.render_sets(root, &after, &refresh_sets(&after, feature))?;

        let released = FeatureStateMachine::released_directories(before, feature);
        for dir in &released {
            let path = root.join(dir);
            if fs.exists(&path) {
                fs.remove_dir_all(&path)?;
                change.removed_directories.push(dir.to_string());
            }
        }

        let delta = DependencyPlanner::delta(before, &after);
        if !skip_install {
            PackageSync::new(self.installer.as_ref(), root).uninstall_delta(&delta)?;
            change.uninstalled = delta.uninstall.clone();
        }

        let entry = root.join(EntryPoint::path(after.language));
        if fs.exists(&entry) {
            let source = fs.read_to_string(&entry)?;
            let updated = EntryPoint::remove(&source, before, &after);
            if updated != source {
                fs.write_file(&entry, &updated)?;
                change.files.updated.push(PathBuf::from(EntryPoint::path(after.language)));
            }
        } else {
            warn!(path = %entry.display(), "Entry point missing; skipping provider removal");
        }

        change.files.merge(writer.write(&refreshed)?);

        let kept: HashSet<&Path> = refreshed.files().map(|f| f.path.as_path()).collect();
        for relative in owned {
            if kept.contains(relative.as_path())
                || released.iter().any(|d| relative.starts_with(d))
            {
                continue;
            }
            let path = root.join(&relative);
            if fs.exists(&path) {
                fs.remove_file(&path)?;
                change.removed_files.push(relative);
            }
        }

        ConfigStore::save(fs, root, &after)?;
        info!(
            directories = change.removed_directories.len(),
            files = change.removed_files.len(),
            "Feature disabled"
        );
        Ok((after, change))
    }

    /// Rewrite a JSON manifest in place when `edit` reports a change.
    fn update_json(
        &self,
        root: &Path,
        name: &str,
        edit: impl FnOnce(&mut Value) -> bool,
    ) -> NexoraResult<bool> {
        let path = root.join(name);
        if !self.filesystem.exists(&path) {
            return Ok(false);
        }
        let raw = self.filesystem.read_to_string(&path)?;
        let mut doc: Value = serde_json::from_str(&raw).map_err(|e| ApplicationError::FilesystemError {
            path: path.clone(),
            reason: format!("invalid JSON: {e}"),
        })?;
        if !edit(&mut doc) {
            return Ok(false);
        }
        let mut out = serde_json::to_string_pretty(&doc).map_err(|e| NexoraError::Internal {
            message: e.to_string(),
        })?;
        out.push('\n');
        if out == raw {
            return Ok(false);
        }
        self.filesystem.write_file(&path, &out)?;
        Ok(true)
    }

    /// JS/TS sources under `src/` plus the root entry files.
    fn code_files(&self, root: &Path, config: &ProjectConfig) -> NexoraResult<Vec<PathBuf>> {
        let exclude: Vec<PathBuf> = RENAME_SKIP.iter().map(PathBuf::from).collect();
        let entry = EntryPoint::path(config.language);
        let top_level = ["index.js", "index.tsx", entry];

        Ok(self
            .filesystem
            .list_files(root, &exclude)?
            .into_iter()
            .filter(|path| {
                if top_level.iter().any(|t| path == Path::new(t)) {
                    return true;
                }
                path.starts_with("src")
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| CODE_EXTENSIONS.contains(&e))
            })
            .collect())
    }

    fn writer(&self) -> TemplateWriter<'_> {
        TemplateWriter::new(
            self.filesystem.as_ref(),
            self.registry.as_ref(),
            self.renderer.as_ref(),
        )
    }
}

/// The feature's own set plus dependents, restricted to sets active in `config`.
fn refresh_sets(config: &ProjectConfig, feature: Feature) -> Vec<&'static str> {
    let active = FeatureStateMachine::template_sets(config);
    let def = feature.def();
    let mut sets: Vec<&'static str> = Vec::new();
    for set in def.template_set.iter().chain(def.refresh.iter()) {
        if active.contains(set) && !sets.contains(set) {
            sets.push(*set);
        }
    }
    sets
}

/// Literal patterns that carry the app name in generated code.
struct ReferenceRules {
    rules: Vec<(Regex, String)>,
}

impl ReferenceRules {
    fn new(old: &str, new: &str) -> NexoraResult<Self> {
        let old = regex::escape(old);
        let specs = [
            (
                format!(r#"(\b(?:name|displayName|title)\s*:\s*)(['"`]){old}(['"`])"#),
                format!("${{1}}${{2}}{new}${{3}}"),
            ),
            (
                format!(r#"(\bappName\s*=\s*)(['"`]){old}(['"`])"#),
                format!("${{1}}${{2}}{new}${{3}}"),
            ),
            (format!(r"Welcome to {old}!"), format!("Welcome to {new}!")),
        ];

        let rules = specs
            .into_iter()
            .map(|(pattern, replacement)| {
                Regex::new(&pattern)
                    .map(|re| (re, replacement))
                    .map_err(|e| NexoraError::Internal {
                        message: format!("rename pattern: {e}"),
                    })
            })
            .collect::<NexoraResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    fn apply(&self, source: &str) -> String {
        self.rules.iter().fold(source.to_string(), |text, (re, rep)| {
            re.replace_all(&text, rep.as_str()).into_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;

    #[test]
    fn reference_rules_touch_only_name_literals() {
        let rules = ReferenceRules::new("Foo", "Bar").unwrap();
        let source = concat!(
            "export const config = { name: 'Foo', title: \"Foo\", other: 'Foo' };\n",
            "const appName = `Foo`;\n",
            "<Text>Welcome to Foo!</Text>\n",
            "const FooBar = 'Foolish';\n",
        );
        let out = rules.apply(source);
        assert!(out.contains("name: 'Bar'"));
        assert!(out.contains("title: \"Bar\""));
        assert!(out.contains("other: 'Foo'"));
        assert!(out.contains("appName = `Bar`"));
        assert!(out.contains("Welcome to Bar!"));
        assert!(out.contains("const FooBar = 'Foolish';"));
    }

    #[test]
    fn reference_rules_escape_the_old_name() {
        let rules = ReferenceRules::new("a-b", "c_d").unwrap();
        assert_eq!(rules.apply("title: 'a-b'"), "title: 'c_d'");
        assert_eq!(rules.apply("title: 'aXb'"), "title: 'aXb'");
    }

    #[test]
    fn refresh_sets_are_limited_to_active_sets() {
        let config = ProjectConfig::new("Foo", Language::TypeScript)
            .with_navigation([NavigationKind::Stack, NavigationKind::Tabs]);
        assert_eq!(refresh_sets(&config, Feature::Tabs), vec!["navigation"]);

        let with_screens = config.clone().with_sample_screens(true);
        assert_eq!(
            refresh_sets(&with_screens, Feature::Tabs),
            vec!["navigation", "screens"]
        );

        let bare = ProjectConfig::new("Foo", Language::TypeScript);
        assert!(refresh_sets(&bare, Feature::Tabs).is_empty());
    }

    #[test]
    fn locale_pattern() {
        for ok in ["en", "fr", "pt-BR", "zh-Hant-TW"] {
            assert!(LOCALE.is_match(ok), "{ok}");
        }
        for bad in ["", "EN", "english", "en_US", "e"] {
            assert!(!LOCALE.is_match(bad), "{bad}");
        }
    }
}
