//! Verso content renderer.
//!
//! Resolves a CMS content entry's rich-text or nested-block field and
//! renders it into a sanitized, display-ready string: plain text with
//! tags stripped and whitespace normalized, or output passed through a
//! caller-supplied view template.
//!
//! This crate provides:
//! - `ContentRenderer`: chainable render request driving the pipeline
//! - `sanitize`: the whitespace/tag cleanup applied to all output
//! - `ContentStore` / `ContentEntry` / `FieldValue`: content contracts
//! - `RichTextEngine` / `NestedBlockEngine`: augmentation contracts, with
//!   built-in `MarkdownEngine` and `BlockEngine` implementations
//! - `TemplateRenderer`: view contract, with a Tera-backed `TeraTemplates`
//!
//! ```
//! use std::sync::Arc;
//! use verso_renderer::{
//!     BlockEngine, ContentRenderer, FieldType, FieldValue, MarkdownEngine, TeraTemplates,
//! };
//!
//! use verso_renderer::{ContentEntry, ContentStore};
//!
//! # struct NoStore;
//! # impl ContentStore for NoStore {
//! #     fn find_by_id(&self, _: &str) -> Option<Arc<dyn ContentEntry>> {
//! #         None
//! #     }
//! # }
//! # struct OneField;
//! # impl ContentEntry for OneField {
//! #     fn has(&self, handle: &str) -> bool {
//! #         handle == "body"
//! #     }
//! #     fn origin(&self) -> Option<Arc<dyn ContentEntry>> {
//! #         None
//! #     }
//! #     fn augmented_value(&self, handle: &str) -> Option<FieldValue> {
//! #         Some(FieldValue::new(handle, "Some **stored** content", FieldType::RichText))
//! #     }
//! # }
//! let renderer = ContentRenderer::new(
//!     Arc::new(NoStore),
//!     Arc::new(MarkdownEngine::new()),
//!     Arc::new(BlockEngine::new()),
//!     Arc::new(TeraTemplates::empty()),
//! );
//!
//! let entry: Arc<dyn ContentEntry> = Arc::new(OneField);
//! let summary = renderer.set_content(entry, "body").render();
//! assert_eq!(summary, "Some stored content");
//! ```

pub mod engine;

mod entry;
mod render;
mod sanitize;
mod view;

pub use engine::{
    AugmentOptions, Augmentor, BlockEngine, MarkdownEngine, NestedBlockEngine, RichTextEngine,
};
pub use entry::{ContentEntry, ContentStore, FieldType, FieldValue};
pub use render::{ContentRenderer, EntrySource, ProcessFn};
pub use sanitize::sanitize;
pub use view::{TemplateError, TemplateRenderer, TeraTemplates};
