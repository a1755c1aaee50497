//! Catalog result items.

use std::fmt;

/// Provider-assigned item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a raw provider id.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One GIF or sticker from the catalog.
///
/// Immutable once constructed. Either URL may be empty when the upstream
/// object had no matching rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    id: ItemId,
    title: String,
    preview_url: String,
    original_url: String,
}

impl ResultItem {
    /// Build an item from already-resolved fields.
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        preview_url: impl Into<String>,
        original_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            preview_url: preview_url.into(),
            original_url: original_url.into(),
        }
    }

    /// Provider id.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display title; may be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Small rendition URL.
    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    /// Full-size rendition URL.
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// URL written to the clipboard: the original rendition, or the preview
    /// when the original is missing.
    pub fn copy_url(&self) -> &str {
        if self.original_url.is_empty() {
            &self.preview_url
        } else {
            &self.original_url
        }
    }
}

/// One page of results in provider order.
pub type ResultPage = Vec<ResultItem>;
