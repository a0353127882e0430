#![forbid(unsafe_code)]

//! Host events.
//!
//! The page reports everything as a small tagged JSON object. The `kind`
//! tag selects the variant and the remaining fields carry the minimum the
//! engine needs, so recorded sessions replay byte-for-byte.

use mortar_gallery::GalleryItem;
use serde::{Deserialize, Serialize};

use crate::options::WebOptions;

/// One gallery item as the page describes it.
///
/// Extra fields (a precomputed `height`, a `loaded` flag) are accepted and
/// ignored; dimensions come from probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemJson {
    pub id: String,
    #[serde(alias = "src")]
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ItemJson {
    pub fn new(id: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            img: img.into(),
            url: None,
        }
    }
}

impl From<ItemJson> for GalleryItem {
    fn from(value: ItemJson) -> Self {
        let item = GalleryItem::new(value.id, value.img);
        match value.url {
            Some(url) => item.with_link(url),
            None => item,
        }
    }
}

/// An event pushed by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    /// The full item list (a prefix of the current list appends).
    Items { items: Vec<ItemJson> },
    /// Items to add to the end.
    Append { items: Vec<ItemJson> },
    /// The container's content box width changed.
    ContainerResize { width: f32 },
    /// The window width changed.
    ViewportResize { width: f32 },
    /// The scroll window, in container coordinates.
    Scroll { top: f32, height: f32 },
    /// The proximity observer fired for the sentinel.
    SentinelVisible,
    /// An image decoded with its natural size.
    ImageLoaded { id: String, width: u32, height: u32 },
    /// An image failed to load.
    ImageFailed { id: String },
    PointerEnter { id: String },
    PointerLeave { id: String },
    Click { id: String },
    /// Controlled mode: whether the host can supply more items.
    HasMore { value: bool },
    /// Controlled mode: the load-more request finished without new items.
    LoadFinished,
    /// New component options.
    Options { options: WebOptions },
}

impl HostEvent {
    /// Encode this event as a stable JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode one event.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Decode a JSON array of events.
    pub fn batch_from_json_str(s: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(s)
    }
}
