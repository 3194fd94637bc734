//! Handlebars renderer with JSX object-literal masking.
//!
//! `style={{ flex: 1 }}` is lexically a Handlebars expression. Every
//! `ident={{ ... }}` span is swapped for an opaque placeholder before
//! compilation and put back verbatim afterwards.

use handlebars::{Handlebars, Template, handlebars_helper, no_escape};
use serde_json::Value;
use tracing::instrument;

use nexora_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{DomainError, MaskedTemplate, RenderContext},
    error::NexoraResult,
};

handlebars_helper!(contains: |haystack: Json, needle: Json| match haystack {
    Value::Array(items) => items.contains(needle),
    Value::String(s) => needle.as_str().is_some_and(|n| s.contains(n)),
    Value::Object(map) => needle.as_str().is_some_and(|n| map.contains_key(n)),
    _ => false,
});

/// Renderer backed by `handlebars`.
///
/// Output is not HTML-escaped. Built-in helpers (`eq`, `ne`, `and`, `or`,
/// `not`) are available alongside `contains`, which tests membership in a
/// list (`{{#if (contains navigation "tabs")}}`).
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("contains", Box::new(contains));
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(project = %context.project_name()))]
    fn render(&self, template: &str, context: &RenderContext) -> NexoraResult<String> {
        let masked = MaskedTemplate::mask(template)?;

        Template::compile(masked.text()).map_err(|e| DomainError::TemplateSyntax {
            line: e.pos().map_or(0, |(line, _)| line),
            reason: e.to_string(),
        })?;

        let rendered = self
            .registry
            .render_template(masked.text(), context.data())
            .map_err(|e| ApplicationError::RenderingFailed {
                template: "inline".into(),
                reason: e.to_string(),
            })?;

        Ok(masked.restore(&rendered))
    }
}
