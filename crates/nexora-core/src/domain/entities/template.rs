//! Template sets and the data context they are rendered against.
//!
//! A template set is the unit the registry hands out: every file a single
//! feature contributes for one language. Content is opaque text until the
//! renderer port evaluates it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{
    entities::{
        common::{RelativePath, to_kebab_case, to_pascal_case},
        project_config::ProjectConfig,
    },
    error::DomainError,
    value_objects::Language,
};

/// Placeholder in template paths replaced with the project name.
pub const NAME_PLACEHOLDER: &str = "__NAME__";

/// How a rendered file may be written to a project that already has it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Overwrite whenever the rendered bytes differ from disk.
    #[default]
    Always,
    /// Write only when the file is missing (package manifests the package
    /// manager edits after generation).
    CreateOnly,
}

/// One file in a template set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Project-relative destination; may contain [`NAME_PLACEHOLDER`].
    pub path: String,
    pub content: String,
    pub policy: WritePolicy,
}

impl TemplateFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            policy: WritePolicy::Always,
        }
    }

    pub fn create_only(mut self) -> Self {
        self.policy = WritePolicy::CreateOnly;
        self
    }

    /// Destination path with the name placeholder substituted.
    pub fn destination(&self, context: &RenderContext) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(self.path.replace(NAME_PLACEHOLDER, context.project_name()))
    }
}

/// Every file one feature contributes for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub name: String,
    pub language: Language,
    pub files: Vec<TemplateFile>,
}

impl TemplateSet {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            language,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: TemplateFile) -> Self {
        self.push(file);
        self
    }

    /// Add a file, replacing any existing entry for the same path.
    pub fn push(&mut self, file: TemplateFile) {
        match self.files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Data handed to the template engine.
///
/// Holds every persisted config field under its camelCase name plus a few
/// derived values (`projectName`, `packageName`, `componentName`,
/// `typescript`, `hasNavigation`, resolved `defaultTheme` and
/// `defaultLanguage`).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    project_name: String,
    data: Value,
}

impl RenderContext {
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut data = match serde_json::to_value(config) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let derived = json!({
            "projectName": config.name,
            "packageName": to_kebab_case(&config.name),
            "componentName": to_pascal_case(&config.name),
            "typescript": config.language.is_typescript(),
            "hasNavigation": config.has_navigation(),
            "defaultTheme": config.effective_theme().as_str(),
            "defaultLanguage": config.effective_language(),
            "nexoraVersion": crate::VERSION,
        });
        if let Value::Object(extra) = derived {
            data.extend(extra);
        }

        Self {
            project_name: config.name.clone(),
            data: Value::Object(data),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Look up a top-level value (test and logging helper).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{NavigationKind, StateManager};

    fn context() -> RenderContext {
        let config = ProjectConfig::new("My Shop", Language::TypeScript)
            .with_navigation([NavigationKind::Drawer])
            .with_state(StateManager::Redux);
        RenderContext::from_config(&config)
    }

    #[test]
    fn context_exposes_config_and_derived_values() {
        let ctx = context();
        assert_eq!(ctx.get("state"), Some(&json!("redux")));
        assert_eq!(ctx.get("navigation"), Some(&json!(["drawer"])));
        assert_eq!(ctx.get("packageName"), Some(&json!("my-shop")));
        assert_eq!(ctx.get("componentName"), Some(&json!("MyShop")));
        assert_eq!(ctx.get("typescript"), Some(&json!(true)));
        assert_eq!(ctx.get("defaultTheme"), Some(&json!("system")));
    }

    #[test]
    fn destination_substitutes_name_placeholder() {
        let file = TemplateFile::new("src/assets/__NAME__.json", "{}");
        let dest = file.destination(&context()).unwrap();
        assert_eq!(dest.to_string(), "src/assets/My Shop.json");
    }

    #[test]
    fn push_replaces_same_path() {
        let mut set = TemplateSet::new("api", Language::JavaScript);
        set.push(TemplateFile::new("src/services/api/index.js", "a"));
        set.push(TemplateFile::new("src/services/api/index.js", "b"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.files[0].content, "b");
    }
}
