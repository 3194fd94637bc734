//! Builds the core services from the concrete adapters.

use tracing::{debug, info};

use nexora_adapters::{
    HandlebarsRenderer, InMemoryRegistry, LocalFilesystem, NpmInstaller, NpxInitializer,
};
use nexora_core::application::{FeatureService, ProjectComposer, UpdateReconciler};

use crate::{config::AppConfig, error::CliResult};

/// The adapters every command shares. Cloning the registry shares its sets.
pub struct Adapters {
    registry: InMemoryRegistry,
    installer: NpmInstaller,
    initializer: NpxInitializer,
}

impl Adapters {
    /// Built-in sets, then env/exe overrides, then `templates.local_path`.
    pub fn from_config(config: &AppConfig) -> CliResult<Self> {
        let registry = InMemoryRegistry::discover()?;
        if let Some(dir) = config.templates_dir() {
            let count = registry.load_overrides(dir)?;
            info!(dir = %dir.display(), count, "Loaded template overrides");
        }
        debug!(sets = registry.len(), "Template registry ready");

        let installer = NpmInstaller::new()
            .with_binary(config.install.package_manager.clone())
            .with_legacy_peer_deps(config.install.legacy_peer_deps);

        let initializer = NpxInitializer::new()
            .with_binary(config.native.npx.clone())
            .with_version(config.native.react_native_version.clone());

        Ok(Self {
            registry,
            installer,
            initializer,
        })
    }

    pub fn composer(&self) -> ProjectComposer {
        ProjectComposer::new(
            Box::new(LocalFilesystem::new()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
            Box::new(self.initializer.clone()),
        )
    }

    pub fn features(&self) -> FeatureService {
        FeatureService::new(
            Box::new(LocalFilesystem::new()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
        )
    }

    pub fn reconciler(&self) -> UpdateReconciler {
        UpdateReconciler::new(
            Box::new(LocalFilesystem::new()),
            Box::new(self.registry.clone()),
            Box::new(HandlebarsRenderer::new()),
            Box::new(self.installer.clone()),
        )
    }
}
