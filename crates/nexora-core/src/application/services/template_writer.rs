//! Rendering template sets into a [`ProjectStructure`] and writing it out.
//!
//! Shared by the composer, the feature flows and the update reconciler.
//! Rendering always finishes before the first write, so a template error
//! never leaves half of a feature on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRegistry, TemplateRenderer},
    },
    domain::{
        DomainValidator, EntryPoint, FsEntry, ProjectConfig, ProjectStructure, RenderContext,
        WritePolicy,
    },
    error::{NexoraError, NexoraResult},
};

/// What a write pass did to each file, as paths relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    /// Create-only files left alone because they already exist.
    pub preserved: Vec<PathBuf>,
}

impl WriteReport {
    /// True when nothing on disk changed.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }

    pub fn touched(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    pub fn merge(&mut self, other: WriteReport) {
        self.created.extend(other.created);
        self.updated.extend(other.updated);
        self.unchanged.extend(other.unchanged);
        self.preserved.extend(other.preserved);
    }
}

pub(crate) struct TemplateWriter<'a> {
    filesystem: &'a dyn Filesystem,
    registry: &'a dyn TemplateRegistry,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> TemplateWriter<'a> {
    pub(crate) fn new(
        filesystem: &'a dyn Filesystem,
        registry: &'a dyn TemplateRegistry,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            filesystem,
            registry,
            renderer,
        }
    }

    /// Render `sets` for `config` without touching the filesystem.
    ///
    /// Sets missing from the registry are skipped with a warning.
    pub(crate) fn render_sets(
        &self,
        root: &Path,
        config: &ProjectConfig,
        sets: &[&str],
    ) -> NexoraResult<ProjectStructure> {
        let context = RenderContext::from_config(config);
        let mut structure = ProjectStructure::new(root);

        for name in sets {
            let Some(set) = self.registry.lookup(name, config.language)? else {
                warn!(set = %name, language = %config.language, "No template set registered; skipping");
                continue;
            };
            debug!(set = %name, files = set.len(), "Rendering template set");

            for file in &set.files {
                let destination = file.destination(&context)?;
                let content = self
                    .renderer
                    .render(&file.content, &context)
                    .map_err(|e| annotate(e, name, &file.path))?;
                structure.add_file(destination.into_path_buf(), content, file.policy);
            }
        }

        DomainValidator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Add the entry point generated from `config`.
    pub(crate) fn add_entry_point(structure: &mut ProjectStructure, config: &ProjectConfig) {
        structure.add_file(
            EntryPoint::path(config.language),
            EntryPoint::render(config),
            WritePolicy::Always,
        );
    }

    /// Materialise `structure`, only writing files whose content changed.
    pub(crate) fn write(&self, structure: &ProjectStructure) -> NexoraResult<WriteReport> {
        let root = structure.root();
        let mut report = WriteReport::default();

        for entry in &structure.entries {
            match entry {
                FsEntry::Directory(dir) => self.filesystem.create_dir_all(&root.join(&dir.path))?,
                FsEntry::File(file) => {
                    let path = root.join(&file.path);
                    let relative = file.path.clone();

                    if !self.filesystem.exists(&path) {
                        if let Some(parent) = path.parent() {
                            self.filesystem.create_dir_all(parent)?;
                        }
                        self.filesystem.write_file(&path, &file.content)?;
                        report.created.push(relative);
                        continue;
                    }

                    if file.policy == WritePolicy::CreateOnly {
                        report.preserved.push(relative);
                        continue;
                    }

                    if self.filesystem.read_to_string(&path)? == file.content {
                        report.unchanged.push(relative);
                    } else {
                        self.filesystem.write_file(&path, &file.content)?;
                        report.updated.push(relative);
                    }
                }
            }
        }

        debug!(
            created = report.created.len(),
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            "Wrote project structure"
        );
        Ok(report)
    }
}

fn annotate(error: NexoraError, set: &str, path: &str) -> NexoraError {
    match error {
        NexoraError::Application(ApplicationError::RenderingFailed { reason, .. }) => {
            ApplicationError::RenderingFailed {
                template: format!("{set}/{path}"),
                reason,
            }
            .into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{Language, TemplateFile, TemplateSet};
    use std::collections::HashMap;

    struct FixedRegistry(HashMap<&'static str, TemplateSet>);

    impl TemplateRegistry for FixedRegistry {
        fn lookup(&self, name: &str, _language: Language) -> NexoraResult<Option<TemplateSet>> {
            Ok(self.0.get(name).cloned())
        }

        fn sets(&self) -> NexoraResult<Vec<String>> {
            Ok(self.0.keys().map(|k| k.to_string()).collect())
        }
    }

    /// Substitutes `{{projectName}}` only.
    struct NameRenderer;

    impl TemplateRenderer for NameRenderer {
        fn render(&self, template: &str, context: &RenderContext) -> NexoraResult<String> {
            if template.contains("{{#broken") {
                return Err(ApplicationError::RenderingFailed {
                    template: "inline".into(),
                    reason: "unclosed block".into(),
                }
                .into());
            }
            Ok(template.replace("{{projectName}}", context.project_name()))
        }
    }

    fn registry() -> FixedRegistry {
        let core = TemplateSet::new("core", Language::TypeScript)
            .with_file(TemplateFile::new("app.json", "{\"name\":\"{{projectName}}\"}").create_only())
            .with_file(TemplateFile::new("src/__NAME__.ts", "// {{projectName}}"));
        let broken = TemplateSet::new("broken", Language::TypeScript)
            .with_file(TemplateFile::new("x.ts", "{{#broken}}"));
        FixedRegistry(HashMap::from([("core", core), ("broken", broken)]))
    }

    #[test]
    fn renders_paths_and_skips_missing_sets() {
        let fs = MockFilesystem::new();
        let registry = registry();
        let writer = TemplateWriter::new(&fs, &registry, &NameRenderer);
        let config = ProjectConfig::new("Foo", Language::TypeScript);

        let structure = writer
            .render_sets(Path::new("/p"), &config, &["core", "ghost"])
            .unwrap();
        let paths: Vec<_> = structure.files().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("app.json"), PathBuf::from("src/Foo.ts")]);
        assert_eq!(structure.files().nth(1).unwrap().content, "// Foo");
    }

    #[test]
    fn render_failure_names_the_template() {
        let fs = MockFilesystem::new();
        let registry = registry();
        let writer = TemplateWriter::new(&fs, &registry, &NameRenderer);
        let config = ProjectConfig::new("Foo", Language::TypeScript);

        let err = writer
            .render_sets(Path::new("/p"), &config, &["core", "broken"])
            .unwrap_err();
        assert!(err.to_string().contains("broken/x.ts"));
    }

    #[test]
    fn write_is_diff_aware_and_respects_create_only() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p != Path::new("/p/new.ts"));
        fs.expect_read_to_string().returning(|p| {
            Ok(if p == Path::new("/p/same.ts") {
                "same".to_string()
            } else {
                "old".to_string()
            })
        });
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("/p/new.ts") || p == Path::new("/p/changed.ts"))
            .times(2)
            .returning(|_, _| Ok(()));

        let mut structure = ProjectStructure::new("/p");
        structure.add_file("new.ts", "n".into(), WritePolicy::Always);
        structure.add_file("same.ts", "same".into(), WritePolicy::Always);
        structure.add_file("changed.ts", "new".into(), WritePolicy::Always);
        structure.add_file("package.json", "{}".into(), WritePolicy::CreateOnly);

        let registry = registry();
        let report = TemplateWriter::new(&fs, &registry, &NameRenderer)
            .write(&structure)
            .unwrap();

        assert_eq!(report.created, vec![PathBuf::from("new.ts")]);
        assert_eq!(report.updated, vec![PathBuf::from("changed.ts")]);
        assert_eq!(report.unchanged, vec![PathBuf::from("same.ts")]);
        assert_eq!(report.preserved, vec![PathBuf::from("package.json")]);
        assert_eq!(report.touched(), 2);
    }
}
