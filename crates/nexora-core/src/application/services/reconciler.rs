//! Update Reconciler - re-applies templates onto an existing project.
//!
//! Files are only written when the rendered output differs from what is on
//! disk. This is a coarse strategy: a user edit to a generated file is
//! indistinguishable from a stale template and is overwritten whenever the
//! template output changes. Create-only files (`package.json`, `app.json`)
//! are never overwritten.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use semver::Version;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        lock::{LOCK_FILE, ProjectLock},
        ports::{Filesystem, PackageInstaller, TemplateRegistry, TemplateRenderer},
        services::{
            config_store::ConfigStore,
            package_sync::PackageSync,
            template_writer::{TemplateWriter, WriteReport},
        },
    },
    domain::{DependencyPlanner, Feature, FeatureStateMachine, ProjectConfig},
    error::NexoraResult,
};

/// Directory holding timestamped snapshots, at the project root.
pub const BACKUP_DIR: &str = ".nexora-backups";

/// Path prefixes (by component) never copied into a backup.
pub const BACKUP_EXCLUDES: &[&str] = &[
    "node_modules",
    ".git",
    "android/build",
    "android/app/build",
    "ios/build",
    "ios/Pods",
    BACKUP_DIR,
    LOCK_FILE,
];

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Limit the update to these features; `None` means the whole config.
    pub features: Option<Vec<Feature>>,
    /// Run even when the project is already at the tool's version.
    pub force: bool,
    pub backup: bool,
    pub skip_install: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            features: None,
            force: false,
            backup: true,
            skip_install: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub from_version: String,
    pub to_version: String,
    pub backup: Option<PathBuf>,
    pub files: WriteReport,
    pub sets: Vec<&'static str>,
    /// Requested features that were skipped because they are not active.
    pub skipped: Vec<Feature>,
    pub installed: bool,
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    UpToDate {
        project_version: String,
        tool_version: String,
    },
    Updated(UpdateReport),
}

/// Where a project stands relative to the running tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub project_version: String,
    pub tool_version: String,
    pub up_to_date: bool,
}

pub struct UpdateReconciler {
    filesystem: Box<dyn Filesystem>,
    registry: Box<dyn TemplateRegistry>,
    renderer: Box<dyn TemplateRenderer>,
    installer: Box<dyn PackageInstaller>,
}

impl UpdateReconciler {
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

    /// Bring the project at `root` up to the running tool's templates.
    ///
    /// # Errors
    ///
    /// - `NotAManagedProject` when the config or the react-native manifest
    ///   entry is missing
    /// - any backup I/O error, before a single project file is touched
    /// - render errors, before a single project file is touched
    /// - `DependencySync` after files and config were committed
    #[instrument(skip_all, fields(root = %root.display(), force = options.force))]
    pub fn update(&self, root: &Path, options: UpdateOptions) -> NexoraResult<UpdateOutcome> {
        let fs = self.filesystem.as_ref();
        let status = self.version_status(root)?;
        if status.up_to_date && !options.force {
            info!(
                project_version = %status.project_version,
                tool_version = %status.tool_version,
                "Project already up to date"
            );
            return Ok(UpdateOutcome::UpToDate {
                project_version: status.project_version,
                tool_version: status.tool_version,
            });
        }

        let _lock = ProjectLock::acquire(fs, root)?;
        let mut config = ConfigStore::load(fs, root)?;
        let from_version = config.cli_version.clone();

        let backup = if options.backup {
            Some(self.backup(root, Utc::now())?)
        } else {
            None
        };

        let (sets, skipped) = working_sets(&config, options.features.as_deref());
        let writer = TemplateWriter::new(fs, self.registry.as_ref(), self.renderer.as_ref());
        let mut structure = writer.render_sets(root, &config, &sets)?;
        match &options.features {
            None => {
                TemplateWriter::add_entry_point(&mut structure, &config);
                for dir in FeatureStateMachine::directories(&config) {
                    structure.add_directory(dir);
                }
            }
            // A scoped update leaves the entry point and other features alone.
            Some(features) => {
                for feature in features.iter().filter(|f| !skipped.contains(f)) {
                    for dir in feature.def().directories {
                        structure.add_directory(*dir);
                    }
                }
            }
        }
        let files = writer.write(&structure)?;
        info!(
            created = files.created.len(),
            updated = files.updated.len(),
            unchanged = files.unchanged.len(),
            "Templates reconciled"
        );

        config.cli_version = crate::VERSION.to_string();
        ConfigStore::save(fs, root, &config)?;

        if !options.skip_install {
            let packages = match &options.features {
                Some(features) => {
                    let active: Vec<Feature> = features
                        .iter()
                        .copied()
                        .filter(|f| FeatureStateMachine::is_installed(&config, *f))
                        .collect();
                    DependencyPlanner::for_features(&active, &config)
                }
                None => DependencyPlanner::for_config(&config),
            };
            PackageSync::new(self.installer.as_ref(), root).install_set(&packages)?;
        }

        Ok(UpdateOutcome::Updated(UpdateReport {
            from_version,
            to_version: crate::VERSION.to_string(),
            backup,
            files,
            sets,
            skipped,
            installed: !options.skip_install,
        }))
    }

    /// Compare the project's `cliVersion` with the running tool without
    /// touching anything, so callers can skip confirmation for a no-op.
    ///
    /// # Errors
    ///
    /// `NotAManagedProject` when the config or the react-native manifest
    /// entry is missing.
    pub fn version_status(&self, root: &Path) -> NexoraResult<VersionStatus> {
        let config = ConfigStore::load(self.filesystem.as_ref(), root)?;
        self.check_manifest(root)?;

        let up_to_date = parse_version(&config.cli_version) >= parse_version(crate::VERSION);
        Ok(VersionStatus {
            project_version: config.cli_version,
            tool_version: crate::VERSION.to_string(),
            up_to_date,
        })
    }

    /// The manifest must declare `react-native` as a dependency.
    fn check_manifest(&self, root: &Path) -> NexoraResult<()> {
        let not_managed = |reason: &str| ApplicationError::NotAManagedProject {
            path: root.to_path_buf(),
            reason: reason.to_string(),
        };

        let path = root.join("package.json");
        if !self.filesystem.exists(&path) {
            return Err(not_managed("missing package.json").into());
        }
        let manifest: Value = serde_json::from_str(&self.filesystem.read_to_string(&path)?)
            .map_err(|_| not_managed("package.json is not valid JSON"))?;

        let depends = ["dependencies", "devDependencies", "peerDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|d| d.get("react-native")).is_some());
        if !depends {
            return Err(not_managed("package.json does not depend on react-native").into());
        }
        Ok(())
    }

    /// Copy the project tree into a fresh timestamped directory.
    fn backup(&self, root: &Path, now: DateTime<Utc>) -> NexoraResult<PathBuf> {
        let fs = self.filesystem.as_ref();
        let target = root
            .join(BACKUP_DIR)
            .join(format!("backup-{}", backup_stamp(now)));
        let exclude: Vec<PathBuf> = BACKUP_EXCLUDES.iter().map(PathBuf::from).collect();

        let files = fs.list_files(root, &exclude)?;
        fs.create_dir_all(&target)?;
        for relative in &files {
            fs.copy_file(&root.join(relative), &target.join(relative))?;
        }

        info!(path = %target.display(), files = files.len(), "Backup created");
        Ok(target)
    }
}

/// Sets to reconcile: every active set, or the sets of the requested
/// features that are actually active.
fn working_sets(
    config: &ProjectConfig,
    features: Option<&[Feature]>,
) -> (Vec<&'static str>, Vec<Feature>) {
    let all = FeatureStateMachine::template_sets(config);
    let Some(features) = features else {
        return (all, Vec::new());
    };

    let mut sets = Vec::new();
    let mut skipped = Vec::new();
    for feature in features {
        if !FeatureStateMachine::is_installed(config, *feature) {
            warn!(feature = %feature, "Feature not installed; skipping");
            skipped.push(*feature);
            continue;
        }
        match feature.def().template_set {
            Some(set) if all.contains(&set) && !sets.contains(&set) => sets.push(set),
            _ => {}
        }
    }
    (sets, skipped)
}

/// `cliVersion` as semver; a leading `v` is accepted, anything unparsable
/// counts as `0.0.0`.
pub fn parse_version(raw: &str) -> Version {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).unwrap_or_else(|_| Version::new(0, 0, 0))
}

/// ISO-8601 timestamp with `:` and `.` replaced so it is a valid file name
/// everywhere.
pub fn backup_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Flag, Language, NavigationKind};
    use chrono::TimeZone;

    #[test]
    fn versions_tolerate_prefix_and_garbage() {
        assert_eq!(parse_version("v1.2.3"), Version::new(1, 2, 3));
        assert_eq!(parse_version(" 0.4.0 "), Version::new(0, 4, 0));
        assert_eq!(parse_version(""), Version::new(0, 0, 0));
        assert_eq!(parse_version("latest"), Version::new(0, 0, 0));
        assert!(parse_version("1.10.0") > parse_version("1.9.9"));
    }

    #[test]
    fn stamp_is_filesystem_safe() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(backup_stamp(now), "2024-03-05T14-07-09-000Z");
    }

    #[test]
    fn explicit_features_skip_inactive_ones() {
        let config = ProjectConfig::new("Foo", Language::TypeScript)
            .with_navigation([NavigationKind::Stack, NavigationKind::Tabs])
            .with_flag(Flag::Theme, true);

        let (sets, skipped) = working_sets(
            &config,
            Some(&[Feature::Theme, Feature::Stack, Feature::Tabs, Feature::Firebase][..]),
        );
        assert_eq!(sets, vec!["theme", "navigation"]);
        assert_eq!(skipped, vec![Feature::Firebase]);
    }

    #[test]
    fn no_features_means_every_active_set() {
        let config = ProjectConfig::new("Foo", Language::JavaScript).with_flag(Flag::Api, true);
        let (sets, skipped) = working_sets(&config, None);
        assert_eq!(sets, FeatureStateMachine::template_sets(&config));
        assert!(skipped.is_empty());
    }
}
