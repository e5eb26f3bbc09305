//! View rendering contract and the Tera-backed default implementation.

use std::path::Path;

use tera::Tera;
use thiserror::Error;
use tracing::debug;

/// Failure raised by a template renderer.
///
/// The renderer deliberately collapses this into the output string at the
/// view boundary (see [`crate::ContentRenderer`]), so the message is the
/// part that matters: it is what a broken preview template degrades to.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    /// Create an error carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Flatten a tera error and its source chain into one message.
    fn from_tera(err: &tera::Error) -> Self {
        use std::error::Error as _;
        use std::fmt::Write;

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            // write!() to a String is infallible
            #[allow(clippy::unwrap_used)]
            write!(message, ": {inner}").unwrap();
            source = inner.source();
        }
        Self { message }
    }
}

/// External template renderer consumed by the view path.
///
/// `variable` is the name the content is bound to inside the template;
/// the renderer names it after the field handle being rendered.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, view: &str, variable: &str, content: &str) -> Result<String, TemplateError>;
}

/// Template renderer backed by [`tera`].
///
/// Templates with an `.html` name are auto-escaped by Tera, so views that
/// want to emit the bound content as markup should use `{{ field | safe }}`.
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Load all `.html` templates below the given directory.
    pub fn new(template_dir: &Path) -> Result<Self, TemplateError> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .ok_or_else(|| TemplateError::new("invalid template directory path"))?;

        let tera = Tera::new(pattern_str).map_err(|err| TemplateError::from_tera(&err))?;
        debug!(count = tera.get_template_names().count(), "loaded templates");

        Ok(Self { tera })
    }

    /// Create a renderer with no templates (useful for tests).
    pub fn empty() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Wrap an already-configured Tera instance.
    pub fn from_tera(tera: Tera) -> Self {
        Self { tera }
    }

    /// Register a template from a string.
    pub fn add_raw_template(&mut self, name: &str, body: &str) -> Result<(), TemplateError> {
        self.tera
            .add_raw_template(name, body)
            .map_err(|err| TemplateError::from_tera(&err))
    }
}

impl TemplateRenderer for TeraTemplates {
    fn render(&self, view: &str, variable: &str, content: &str) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        context.insert(variable, content);

        self.tera
            .render(view, &context)
            .map_err(|err| TemplateError::from_tera(&err))
    }
}
