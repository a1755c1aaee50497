//! Typed schema for the GIPHY JSON envelope.
//!
//! Every field the mapping reads is optional so that partial upstream objects
//! still produce an item. Fallback order per field:
//!
//! - `title`: non-empty `title`, else `slug`, else `""`
//! - preview URL: first present rendition of `fixed_width`,
//!   `fixed_width_downsampled`, `preview_gif`, `original`
//! - original URL: `original`, else the preview chain above
//!
//! A rendition that is present but has no `url` yields an empty URL; the chain
//! stops at the first present rendition object. A `null` `data`, `images` or
//! `id` reads as absent.

use crate::model::{ItemId, ResultItem, ResultPage};
use serde::Deserialize;

/// Top-level response body of `gifs/trending` and `stickers/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// Result objects; `null` and absent both read as empty.
    #[serde(default)]
    pub data: Option<Vec<GifObject>>,
}

impl Envelope {
    /// Map the envelope's `data` array into result items, in provider order.
    pub fn into_page(self) -> ResultPage {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(GifObject::into_item)
            .collect()
    }
}

/// One entry of the `data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GifObject {
    /// Provider id.
    #[serde(default)]
    pub id: Option<String>,
    /// Display title; often blank for stickers.
    #[serde(default)]
    pub title: Option<String>,
    /// URL slug, used when the title is blank.
    #[serde(default)]
    pub slug: Option<String>,
    /// Rendition map keyed by rendition name.
    #[serde(default)]
    pub images: Option<Images>,
}

/// The subset of renditions the browser uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    /// 200px wide.
    #[serde(default)]
    pub fixed_width: Option<Rendition>,
    /// 200px wide, reduced frame rate.
    #[serde(default)]
    pub fixed_width_downsampled: Option<Rendition>,
    /// Small looping preview.
    #[serde(default)]
    pub preview_gif: Option<Rendition>,
    /// Full-size rendition; preferred for copying.
    #[serde(default)]
    pub original: Option<Rendition>,
}

impl Images {
    fn preview(&self) -> Option<&Rendition> {
        self.fixed_width
            .as_ref()
            .or(self.fixed_width_downsampled.as_ref())
            .or(self.preview_gif.as_ref())
            .or(self.original.as_ref())
    }

    fn full_size(&self) -> Option<&Rendition> {
        self.original.as_ref().or_else(|| self.preview())
    }
}

/// A single rendition; only its URL matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendition {
    /// Media URL.
    #[serde(default)]
    pub url: Option<String>,
}

fn rendition_url(rendition: Option<&Rendition>) -> String {
    rendition
        .and_then(|r| r.url.clone())
        .unwrap_or_default()
}

impl GifObject {
    /// Apply the field fallbacks and build the domain item.
    pub fn into_item(self) -> ResultItem {
        let images = self.images.unwrap_or_default();
        let preview_url = rendition_url(images.preview());
        let original_url = rendition_url(images.full_size());

        let title = match (self.title, self.slug) {
            (Some(title), _) if !title.is_empty() => title,
            (_, Some(slug)) if !slug.is_empty() => slug,
            _ => String::new(),
        };

        ResultItem::new(ItemId::new(self.id.unwrap_or_default()), title, preview_url, original_url)
    }
}

/// Error bodies GIPHY returns alongside non-2xx statuses.
///
/// Both shapes have been observed: `{"meta": {"msg": ...}}` and
/// `{"message": ...}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Standard `meta` block.
    #[serde(default)]
    pub meta: Option<ErrorMeta>,
    /// Gateway-style top-level message.
    #[serde(default)]
    pub message: Option<String>,
}

/// `meta` block of an error body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorMeta {
    /// Human-readable error message.
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Server-provided message, if any non-blank one was sent.
    pub fn message(self) -> Option<String> {
        self.meta
            .and_then(|m| m.msg)
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}
