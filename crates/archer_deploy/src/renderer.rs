//! Template rendering with Handlebars.
//!
//! Templates use Handlebars syntax: `{{App.Name}}` looks up a dotted path,
//! `{{#each App.Variables}}` iterates a map, `{{!-- --}}` is a comment and `~`
//! trims surrounding whitespace. The `quote` helper writes a value as a
//! double-quoted scalar that is safe inside YAML.
//!
//! Rendering runs in strict mode: a field missing from the data fails the
//! render and no output is produced. Output is never HTML-escaped.

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
    RenderErrorReason, Template,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{DeployError, DeployResult};
use crate::templates::TemplateStore;

/// Name of the helper quoting a value for YAML.
pub const QUOTE_HELPER: &str = "quote";

/// Template renderer.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper(QUOTE_HELPER, Box::new(quote_helper));
        Self { registry }
    }

    /// Check that `source` is a well-formed template.
    pub fn check(&self, name: &str, source: &str) -> DeployResult<()> {
        Template::compile(source).map_err(|e| DeployError::TemplateParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Render `source` against `data`.
    pub fn render<T: Serialize>(&self, name: &str, source: &str, data: &T) -> DeployResult<String> {
        self.check(name, source)?;
        let rendered = self
            .registry
            .render_template(source, data)
            .map_err(|e| DeployError::TemplateExecution {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        debug!("Rendered template {} ({} bytes)", name, rendered.len());
        Ok(rendered)
    }

    /// Look up `name` in `store` and render it.
    pub fn render_named<T: Serialize>(
        &self,
        store: &dyn TemplateStore,
        name: &str,
        data: &T,
    ) -> DeployResult<String> {
        let source = store.find(name)?;
        self.render(name, source, data)
    }
}

/// Write the first parameter as a JSON scalar, which YAML reads as a
/// double-quoted string.
fn quote_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(QUOTE_HELPER, 0))?;
    let quoted = serde_json::to_string(param.value()).unwrap_or_default();
    out.write(&quoted)?;
    Ok(())
}
