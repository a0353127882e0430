#![forbid(unsafe_code)]

//! Gallery items and their content state.

use std::borrow::Borrow;
use std::fmt;

const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// Stable identity of a gallery item.
///
/// The id keys all per-item animation state, so it must stay the same for
/// the same logical image across list updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// FNV-1a hash of the id. Stable across runs and platforms.
    pub fn stable_hash(&self) -> u64 {
        let mut hash = FNV64_OFFSET_BASIS;
        for byte in self.0.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV64_PRIME);
        }
        hash
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One image in the gallery, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Identity key.
    pub id: ItemId,
    /// Opaque reference to the image resource. Never interpreted.
    pub source: String,
    /// Optional link carried by click events.
    pub link: Option<String>,
}

impl GalleryItem {
    pub fn new(id: impl Into<ItemId>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            link: None,
        }
    }

    /// Attach a link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Content state of an item's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageState {
    /// Not yet probed, or probe in flight. Shows the placeholder.
    #[default]
    Loading,
    /// Real dimensions are known.
    Loaded,
    /// The image could not be loaded. The slot keeps the fallback size.
    Failed,
}

impl ImageState {
    /// Whether the probe has resolved either way.
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Loading hints for the item's image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadHint {
    /// Load immediately rather than lazily.
    pub eager: bool,
    /// Fetch ahead of other images.
    pub high_priority: bool,
}

impl LoadHint {
    /// Items before this index get high fetch priority.
    pub const HIGH_PRIORITY_COUNT: usize = 12;
    /// Items before this index load eagerly.
    pub const EAGER_COUNT: usize = 20;

    /// Hint for the item at visible position `index`.
    pub const fn for_index(index: usize) -> Self {
        Self {
            eager: index < Self::EAGER_COUNT,
            high_priority: index < Self::HIGH_PRIORITY_COUNT,
        }
    }
}
