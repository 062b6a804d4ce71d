//! Template rendering through an isolated Handlebars registry.

use handlebars::{handlebars_helper, Handlebars};
use tracing::debug;

use crate::context::{is_truthy, RenderingContext};
use crate::error::TemplateResult;

handlebars_helper!(eq_helper: |a: Json, b: Json| a == b);
handlebars_helper!(and_helper: |a: Json, b: Json| is_truthy(a) && is_truthy(b));
handlebars_helper!(or_helper: |a: Json, b: Json| is_truthy(a) || is_truthy(b));
handlebars_helper!(not_helper: |a: Json| !is_truthy(a));

/// Renders template text and template-bearing file names.
///
/// Each renderer owns its own registry, so two generation runs never share
/// helper state.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a renderer with the `eq`, `and`, `or` and `not` helpers registered.
    ///
    /// `#if`, `#unless` and `else` come with Handlebars itself.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("eq", Box::new(eq_helper));
        registry.register_helper("and", Box::new(and_helper));
        registry.register_helper("or", Box::new(or_helper));
        registry.register_helper("not", Box::new(not_helper));
        debug!("Registered template helpers: eq, and, or, not");

        Self { registry }
    }

    /// Render template text with the given context.
    pub fn render(&self, template: &str, context: &RenderingContext) -> TemplateResult<String> {
        Ok(self.registry.render_template(template, context)?)
    }
}

/// Whether text carries template-variable syntax and must be rendered.
pub fn has_template_syntax(text: &str) -> bool {
    text.contains("{{")
}
