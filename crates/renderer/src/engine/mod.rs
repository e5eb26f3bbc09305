//! Augmentation engine contracts.
//!
//! An engine turns a field's raw stored content into display HTML in
//! stages: `pre_process` (storage-format normalization), `process` (main
//! intermediate transform), then `augment` (final resolution of embedded
//! references). The renderer interposes the caller's custom transform
//! between `process` and `augment`.

pub mod blocks;
pub mod markdown;

pub use blocks::BlockEngine;
pub use markdown::MarkdownEngine;

use crate::entry::FieldValue;

/// Options for the final augmentation stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct AugmentOptions {
    /// Resolve embedded asset/image references to absolute URLs.
    pub resolve_asset_urls: bool,
}

/// Final augmentation stage, scoped to a single render call.
pub trait Augmentor {
    /// Turn processed intermediate content into display HTML.
    fn augment(&self, content: &str) -> String;
}

/// Engine for rich-text fields.
pub trait RichTextEngine: Send + Sync {
    /// Storage-format normalization of the raw stored markup.
    fn pre_process(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Main intermediate transform.
    fn process(&self, content: &str) -> String {
        content.to_string()
    }

    /// Build the augmentor for one render call.
    fn augmentor(&self, options: AugmentOptions) -> Box<dyn Augmentor + '_>;

    /// Plain HTML projection of the raw field value, with no reference
    /// resolution. Used when no view is configured.
    fn to_html(&self, value: &FieldValue) -> String;
}

/// Engine for nested-block fields.
///
/// Unlike rich text there is no plain HTML projection for this field
/// type, so rendering without a view yields empty output.
pub trait NestedBlockEngine: Send + Sync {
    /// Storage-format normalization of the raw stored content.
    fn pre_process(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Main intermediate transform.
    fn process(&self, content: &str) -> String {
        content.to_string()
    }

    /// Turn processed block content into display HTML.
    fn augment(&self, content: &str) -> String;
}
