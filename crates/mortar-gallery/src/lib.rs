#![forbid(unsafe_code)]

//! Masonry gallery engine.
//!
//! Feed a [`MasonryEngine`] an ordered list of [`GalleryItem`]s and a
//! container width; it packs visible items into responsive columns,
//! reveals them in batches as the viewport nears the end, and animates
//! entrances, moves and hover feedback on a host-driven clock.
//!
//! ```
//! use std::time::Duration;
//! use mortar_gallery::{GalleryItem, MasonryConfig, MasonryEngine, MasonryEvent};
//!
//! let mut engine = MasonryEngine::new(MasonryConfig::default()).unwrap();
//! engine.set_container_width(1204.0);
//! engine.set_items((0..40).map(|i| GalleryItem::new(format!("p{i}"), format!("{i}.jpg"))));
//! engine.tick(Duration::from_millis(16));
//!
//! assert_eq!(engine.placed_items().len(), 18);
//! assert!(engine.sentinel().is_some());
//!
//! engine.sentinel_entered();
//! engine.update();
//! assert_eq!(engine.visible_count(), 30);
//! assert!(engine
//!     .drain_events()
//!     .contains(&MasonryEvent::BatchRevealed { start: 18, end: 30 }));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod hover;
pub mod item;
pub mod motion;
pub mod probe;
pub mod reveal;

pub use config::{EntranceDirection, LoadMode, MasonryConfig};
pub use mortar_core::animation::StaggerMode;
pub use engine::{Dirty, MasonryEngine, PlacedItem};
pub use error::ConfigError;
pub use event::MasonryEvent;
pub use hover::HoverState;
pub use item::{GalleryItem, ImageState, ItemId, LoadHint};
pub use motion::{ItemStyle, MotionPhase};
#[cfg(feature = "image")]
pub use probe::{probe_bytes, probe_bytes_or_fallback};
pub use probe::{
    Dimensions, FALLBACK_ASPECT, ProbeError, ProbeOutcome, ProbeRequest, ProbeTicket,
};
pub use reveal::SENTINEL_HEIGHT;
