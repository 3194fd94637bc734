//! In-memory template registry with built-in sets.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{info, instrument};

use nexora_core::{
    application::{ApplicationError, ports::TemplateRegistry},
    domain::{Language, TemplateSet},
    error::NexoraResult,
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

type SetKey = (String, Language);

/// Thread-safe registry keyed by set name and language.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    inner: Arc<RwLock<HashMap<SetKey, TemplateSet>>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in set.
    pub fn with_builtin() -> NexoraResult<Self> {
        let registry = Self::new();
        for set in builtin_templates::all_sets() {
            registry.insert(set)?;
        }
        Ok(registry)
    }

    /// Built-in sets overlaid with every override directory found on this
    /// machine.
    pub fn discover() -> NexoraResult<Self> {
        let registry = Self::with_builtin()?;
        for dir in builtin_templates::override_dirs() {
            registry.load_overrides(&dir)?;
        }
        Ok(registry)
    }

    /// Load sets from `dir`, replacing built-in sets of the same name and
    /// language. Returns how many sets were loaded.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_overrides(&self, dir: &Path) -> NexoraResult<usize> {
        let sets = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = sets.len();
        for set in sets {
            self.insert(set)?;
        }
        info!(count, "template overrides loaded");
        Ok(count)
    }

    /// Insert or replace a set.
    pub fn insert(&self, set: TemplateSet) -> NexoraResult<()> {
        let key = (set.name.clone(), set.language);
        self.write()?.insert(key, set);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> NexoraResult<RwLockReadGuard<'_, HashMap<SetKey, TemplateSet>>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> NexoraResult<RwLockWriteGuard<'_, HashMap<SetKey, TemplateSet>>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl TemplateRegistry for InMemoryRegistry {
    fn lookup(&self, name: &str, language: Language) -> NexoraResult<Option<TemplateSet>> {
        Ok(self.read()?.get(&(name.to_string(), language)).cloned())
    }

    fn sets(&self) -> NexoraResult<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().map(|(name, _)| name.clone()).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexora_core::domain::{Feature, FeatureShape, TemplateFile, FEATURE_REGISTRY};
    use tempfile::TempDir;

    #[test]
    fn builtin_covers_every_feature_set() {
        let registry = InMemoryRegistry::with_builtin().unwrap();
        let mut wanted = vec!["core", "screens", "async-storage", "mmkv"];
        wanted.extend(FEATURE_REGISTRY.iter().filter_map(|def| def.template_set));

        for name in wanted {
            for language in Language::ALL {
                assert!(
                    registry.lookup(name, language).unwrap().is_some(),
                    "missing {name} for {language}"
                );
            }
        }
    }

    #[test]
    fn fonts_has_no_template_set() {
        assert_eq!(Feature::Fonts.def().template_set, None);
        assert!(matches!(Feature::Fonts.def().shape, FeatureShape::Flag(_)));
    }

    #[test]
    fn lookup_is_per_language() {
        let registry = InMemoryRegistry::new();
        registry
            .insert(
                TemplateSet::new("api", Language::TypeScript)
                    .with_file(TemplateFile::new("src/services/api/index.ts", "ts")),
            )
            .unwrap();

        assert!(registry.lookup("api", Language::TypeScript).unwrap().is_some());
        assert!(registry.lookup("api", Language::JavaScript).unwrap().is_none());
        assert_eq!(registry.sets().unwrap(), vec!["api".to_string()]);
    }

    #[test]
    fn overrides_replace_builtin_sets() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("api/typescript/src/services/api/index.ts");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, "export const custom = true;\n").unwrap();

        let registry = InMemoryRegistry::with_builtin().unwrap();
        let before = registry.len();
        assert_eq!(registry.load_overrides(temp.path()).unwrap(), 1);
        assert_eq!(registry.len(), before);

        let api = registry.lookup("api", Language::TypeScript).unwrap().unwrap();
        assert_eq!(api.files.len(), 1);
        assert_eq!(api.files[0].content, "export const custom = true;\n");

        let js = registry.lookup("api", Language::JavaScript).unwrap().unwrap();
        assert!(js.files[0].content.contains("axios"));
    }
}
