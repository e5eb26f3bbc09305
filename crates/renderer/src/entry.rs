//! Content entry and field value contracts.
//!
//! The renderer never talks to storage directly; it consumes these traits
//! and lets the host application decide where entries actually live.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

/// Declared type of a content field.
///
/// Only rich-text and nested-block fields are renderable; everything else
/// is `Other` and yields empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    RichText,
    NestedBlocks,
    Other,
}

/// Lookup service for content entries.
pub trait ContentStore: Send + Sync {
    /// Find an entry by its identifier. `None` when no such entry exists.
    fn find_by_id(&self, id: &str) -> Option<Arc<dyn ContentEntry>>;
}

/// A single CMS content record.
pub trait ContentEntry: Send + Sync {
    /// Whether this entry carries a value for the given field handle.
    fn has(&self, handle: &str) -> bool;

    /// The source-locale entry this one was translated from, if any.
    ///
    /// Used only as a fallback data source for fields missing on the
    /// localized entry, never for ownership.
    fn origin(&self) -> Option<Arc<dyn ContentEntry>>;

    /// Resolve the field through the entry's own augmentation machinery.
    fn augmented_value(&self, handle: &str) -> Option<FieldValue>;
}

/// A resolved field value: raw stored content plus its type tag.
#[derive(Debug, Clone)]
pub struct FieldValue {
    handle: String,
    raw: String,
    field_type: FieldType,
    owner: Option<Weak<dyn ContentEntry>>,
}

impl FieldValue {
    /// Create a field value with no owning entry.
    pub fn new(handle: impl Into<String>, raw: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            handle: handle.into(),
            raw: raw.into(),
            field_type,
            owner: None,
        }
    }

    /// Attach a weak back-reference to the entry this value came from.
    pub fn with_owner(mut self, owner: &Arc<dyn ContentEntry>) -> Self {
        self.owner = Some(Arc::downgrade(owner));
        self
    }

    /// The field handle this value was resolved for.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The raw stored content, before any augmentation.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The declared field type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The entry this value belongs to, if it is still alive.
    pub fn augmentable(&self) -> Option<Arc<dyn ContentEntry>> {
        self.owner.as_ref().and_then(Weak::upgrade)
    }

    /// Whether the raw content is blank.
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}
