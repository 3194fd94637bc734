//! Project Composer - builds a new project from a configuration.
//!
//! The compose workflow:
//! 1. Validate the project name
//! 2. Render every active template set plus the entry point (no I/O yet)
//! 3. Generate the native React Native project into the root
//! 4. Create the project root and take the project lock
//! 5. Write base and feature directories, then the rendered files
//! 6. Install the full package set (regular, then dev)
//! 7. Persist `.nexora-cli-config.json`
//!
//! Rendered files land on top of the native project: regular files replace
//! what the bootstrap generated, create-only ones (`package.json`,
//! `app.json`) keep the generated version. A failure before step 3 leaves
//! nothing on disk. Later failures leave
//! whatever was already written; there is no rollback.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        lock::ProjectLock,
        ports::{
            Filesystem, PackageInstaller, ProjectInitializer, TemplateRegistry,
            TemplateRenderer,
        },
        services::{
            config_store::ConfigStore,
            package_sync::PackageSync,
            template_writer::{TemplateWriter, WriteReport},
        },
    },
    domain::{DependencyPlanner, DomainValidator, FeatureStateMachine, PackageSet, ProjectConfig},
    error::NexoraResult,
};

/// Switches for [`ProjectComposer::compose`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Do not run the package manager.
    pub skip_install: bool,
    /// Delete an existing directory at the project root first.
    pub force: bool,
    /// Write only the templates, without the native bootstrap.
    pub skip_native: bool,
}

/// What a compose run produced.
#[derive(Debug, Clone)]
pub struct ComposeReport {
    pub root: PathBuf,
    pub files: WriteReport,
    pub directories: Vec<String>,
    pub packages: PackageSet,
    /// False when installation was skipped.
    pub installed: bool,
    /// False when the native bootstrap was skipped.
    pub native: bool,
}

pub struct ProjectComposer {
    filesystem: Box<dyn Filesystem>,
    registry: Box<dyn TemplateRegistry>,
    renderer: Box<dyn TemplateRenderer>,
    installer: Box<dyn PackageInstaller>,
    initializer: Box<dyn ProjectInitializer>,
}

impl ProjectComposer {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        registry: Box<dyn TemplateRegistry>,
        renderer: Box<dyn TemplateRenderer>,
        installer: Box<dyn PackageInstaller>,
        initializer: Box<dyn ProjectInitializer>,
    ) -> Self {
        Self {
            filesystem,
            registry,
            renderer,
            installer,
            initializer,
        }
    }

    /// Build a project at `root` for `config`.
    ///
    /// # Errors
    ///
    /// - `InvalidProjectName` for names the platform tooling rejects
    /// - `ProjectExists` when `root` exists and `force` is off
    /// - `TemplateSyntax` / `RenderingFailed` from any template set
    /// - `NativeInit` when the native bootstrap fails (the root may be
    ///   partially populated)
    /// - `DependencySync` when the package manager fails (files stay)
    #[instrument(skip_all, fields(project = %config.name, root = %root.display()))]
    pub fn compose(
        &self,
        root: &Path,
        config: &ProjectConfig,
        options: ComposeOptions,
    ) -> NexoraResult<ComposeReport> {
        info!(language = %config.language, "Composing project");
        DomainValidator::validate_project_name(&config.name)?;

        let mut config = config.clone();
        config.cli_version = crate::VERSION.to_string();

        let writer = self.writer();
        let sets = FeatureStateMachine::template_sets(&config);
        let mut structure = writer.render_sets(root, &config, &sets)?;
        TemplateWriter::add_entry_point(&mut structure, &config);
        let directories: Vec<String> = FeatureStateMachine::directories(&config)
            .into_iter()
            .map(str::to_string)
            .collect();
        for dir in &directories {
            structure.add_directory(dir);
        }
        info!(sets = ?sets, files = structure.file_count(), "Templates rendered");

        if self.filesystem.exists(root) {
            if !options.force {
                return Err(ApplicationError::ProjectExists {
                    path: root.to_path_buf(),
                }
                .into());
            }
            info!("Removing existing directory (--force)");
            self.filesystem.remove_dir_all(root)?;
        }
        if !options.skip_native {
            info!("Generating native project");
            self.initializer.init(root, &config.name)?;
        }
        self.filesystem.create_dir_all(root)?;
        let _lock = ProjectLock::acquire(self.filesystem.as_ref(), root)?;

        let files = writer.write(&structure)?;

        let packages = DependencyPlanner::for_config(&config);
        if !options.skip_install {
            PackageSync::new(self.installer.as_ref(), root).install_set(&packages)?;
        }

        ConfigStore::save(self.filesystem.as_ref(), root, &config)?;

        info!(files = files.created.len(), "Compose completed successfully");
        Ok(ComposeReport {
            root: root.to_path_buf(),
            files,
            directories,
            packages,
            installed: !options.skip_install,
            native: !options.skip_native,
        })
    }

    fn writer(&self) -> TemplateWriter<'_> {
        TemplateWriter::new(
            self.filesystem.as_ref(),
            self.registry.as_ref(),
            self.renderer.as_ref(),
        )
    }
}
