//! Render request: chainable configuration plus the pipeline driver.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::{AugmentOptions, NestedBlockEngine, RichTextEngine};
use crate::entry::{ContentEntry, ContentStore, FieldType, FieldValue};
use crate::sanitize::sanitize;
use crate::view::TemplateRenderer;

/// Caller-supplied transform applied between the process and augment
/// stages of the engine pipeline.
pub type ProcessFn = Box<dyn Fn(String) -> String + Send + Sync>;

/// Source of the entry to render: an already-loaded entry or an id to
/// look up in the content store.
pub enum EntrySource {
    Entry(Arc<dyn ContentEntry>),
    Id(String),
}

impl From<Arc<dyn ContentEntry>> for EntrySource {
    fn from(entry: Arc<dyn ContentEntry>) -> Self {
        Self::Entry(entry)
    }
}

impl From<&str> for EntrySource {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for EntrySource {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// A single render request.
///
/// Built fresh per render, configured through its chainable methods, and
/// discarded after [`render`](Self::render) produces the output string.
/// Defaults: tags stripped, link targets off, no view, no custom
/// transform.
pub struct ContentRenderer {
    store: Arc<dyn ContentStore>,
    rich_text: Arc<dyn RichTextEngine>,
    nested_blocks: Arc<dyn NestedBlockEngine>,
    templates: Arc<dyn TemplateRenderer>,
    entry: Option<Arc<dyn ContentEntry>>,
    field_handle: Option<String>,
    field_value: Option<FieldValue>,
    view: Option<String>,
    keep_html_tags: bool,
    link_targets: bool,
    custom_process: Option<ProcessFn>,
}

impl ContentRenderer {
    /// Create an unconfigured request over the given collaborators.
    pub fn new(
        store: Arc<dyn ContentStore>,
        rich_text: Arc<dyn RichTextEngine>,
        nested_blocks: Arc<dyn NestedBlockEngine>,
        templates: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            store,
            rich_text,
            nested_blocks,
            templates,
            entry: None,
            field_handle: None,
            field_value: None,
            view: None,
            keep_html_tags: false,
            link_targets: false,
            custom_process: None,
        }
    }

    /// Configure the source from an entry (or entry id) and field handle.
    ///
    /// Resolution happens immediately. An unknown id leaves the request
    /// unconfigured, so `render()` yields `""`. When the entry has no
    /// value for the field but its translation origin does, the origin
    /// becomes the working entry before the field is read.
    pub fn set_content(mut self, source: impl Into<EntrySource>, handle: &str) -> Self {
        let entry = match source.into() {
            EntrySource::Entry(entry) => Some(entry),
            EntrySource::Id(id) => {
                let found = self.store.find_by_id(&id);
                if found.is_none() {
                    debug!(id = %id, "entry not found");
                }
                found
            }
        };
        let Some(mut entry) = entry else {
            return self;
        };

        if !entry.has(handle) {
            if let Some(origin) = entry.origin() {
                if origin.has(handle) {
                    debug!(field = %handle, "falling back to translation origin");
                    entry = origin;
                }
            }
        }

        self.field_handle = Some(handle.to_string());
        self.field_value = entry.augmented_value(handle);
        self.entry = Some(entry);
        self
    }

    /// Configure the source directly from an already-resolved field
    /// value, back-filling the entry and field handle when absent.
    pub fn set_value(mut self, value: FieldValue) -> Self {
        if self.entry.is_none() {
            self.entry = value.augmentable();
        }
        if self.field_handle.is_none() {
            self.field_handle = Some(value.handle().to_string());
        }
        self.field_value = Some(value);
        self
    }

    /// Configure the optional view template.
    pub fn set_view(mut self, view: Option<String>) -> Self {
        self.view = view;
        self
    }

    /// Keep HTML tags in the output.
    pub fn with_html_tags(mut self) -> Self {
        self.keep_html_tags = true;
        self
    }

    /// Strip HTML tags from the output (the default).
    pub fn without_html_tags(mut self) -> Self {
        self.keep_html_tags = false;
        self
    }

    /// Inline anchor targets as `label (url)` when stripping tags.
    pub fn with_link_targets(mut self) -> Self {
        self.link_targets = true;
        self
    }

    /// Drop anchor targets along with the tags (the default).
    pub fn without_link_targets(mut self) -> Self {
        self.link_targets = false;
        self
    }

    /// Register a custom transform over the processed intermediate
    /// content, applied before the augment stage.
    pub fn process(mut self, transform: impl Fn(String) -> String + Send + Sync + 'static) -> Self {
        self.custom_process = Some(Box::new(transform));
        self
    }

    /// Execute the pipeline.
    ///
    /// Missing entries, missing fields, and unsupported field types all
    /// yield `""`; nothing in the pipeline errors.
    pub fn render(&self) -> String {
        let (Some(entry), Some(handle)) = (&self.entry, &self.field_handle) else {
            return String::new();
        };

        // The stored snapshot may be stale or empty; re-read from the
        // entry before giving up.
        let value = match &self.field_value {
            Some(value) if !value.is_empty() => value.clone(),
            _ => match entry.augmented_value(handle) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    debug!(field = %handle, "no field data");
                    return String::new();
                }
            },
        };

        match value.field_type() {
            FieldType::RichText => self.render_rich_text(&value),
            FieldType::NestedBlocks => self.render_nested_blocks(&value),
            FieldType::Other => {
                debug!(field = %handle, "unsupported field type");
                String::new()
            }
        }
    }

    fn render_rich_text(&self, value: &FieldValue) -> String {
        let engine = &self.rich_text;
        let content = engine.pre_process(value.raw());
        let content = engine.process(&content);
        let content = self.apply_custom_process(content);

        // One augmentor per render call, handed to every step that needs it.
        let augmentor = engine.augmentor(AugmentOptions {
            resolve_asset_urls: true,
        });
        let content = augmentor.augment(&content);

        match &self.view {
            Some(_) => self.render_with_view(&content),
            // Without a view the augmented content is discarded and the
            // plain projection of the raw value is sanitized instead.
            None => sanitize(
                &engine.to_html(value),
                self.keep_html_tags,
                self.link_targets,
            ),
        }
    }

    fn render_nested_blocks(&self, value: &FieldValue) -> String {
        let engine = &self.nested_blocks;
        let content = engine.pre_process(value.raw());
        let content = engine.process(&content);
        let content = self.apply_custom_process(content);
        let content = engine.augment(&content);

        // No plain projection exists for nested blocks; rendering them
        // requires a view.
        match &self.view {
            Some(_) => self.render_with_view(&content),
            None => String::new(),
        }
    }

    fn render_with_view(&self, content: &str) -> String {
        let (Some(view), Some(handle)) = (&self.view, &self.field_handle) else {
            return String::new();
        };

        let rendered = match self.templates.render(view, handle, content) {
            Ok(output) => output,
            Err(err) => {
                // Fail-soft: a broken view degrades to its diagnostic
                // message instead of aborting the render.
                warn!(view = %view, error = %err, "view render failed");
                err.to_string()
            }
        };

        sanitize(&rendered, self.keep_html_tags, self.link_targets)
    }

    fn apply_custom_process(&self, content: String) -> String {
        match &self.custom_process {
            Some(transform) => transform(content),
            None => content,
        }
    }
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer")
            .field("field_handle", &self.field_handle)
            .field("view", &self.view)
            .field("keep_html_tags", &self.keep_html_tags)
            .field("link_targets", &self.link_targets)
            .field("has_custom_process", &self.custom_process.is_some())
            .finish_non_exhaustive()
    }
}
