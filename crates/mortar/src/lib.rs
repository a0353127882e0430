#![forbid(unsafe_code)]

//! Mortar public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use std::fmt;

// --- Geometry and animation re-exports -------------------------------------

pub use mortar_core::animation::{EasingFn, StaggerMode, easing_by_name};
pub use mortar_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use mortar_layout::{
    ColumnBreakpoints, ColumnChange, ColumnResolver, ColumnSource, ColumnTier, MasonryLayout,
    MasonryParams, Packer, Slot, pack, skeleton_layout,
};

// --- Gallery re-exports ----------------------------------------------------

pub use mortar_gallery::{
    ConfigError, Dimensions, EntranceDirection, GalleryItem, ImageState, ItemId, ItemStyle,
    LoadHint, LoadMode, MasonryConfig, MasonryEngine, MasonryEvent, MotionPhase, PlacedItem,
    ProbeError, ProbeOutcome, ProbeRequest, ProbeTicket,
};
#[cfg(feature = "image")]
pub use mortar_gallery::{probe_bytes, probe_bytes_or_fallback};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use mortar_web::{HostEvent, WebError, WebGallery, WebOptions, WebOutputs};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Mortar apps.
#[derive(Debug)]
pub enum Error {
    /// Rejected configuration.
    Config(ConfigError),
    /// Image dimensions could not be read.
    Probe(ProbeError),
    /// Host adapter failure.
    #[cfg(feature = "web")]
    Web(WebError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Probe(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Web(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Probe(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Web(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ProbeError> for Error {
    fn from(err: ProbeError) -> Self {
        Self::Probe(err)
    }
}

#[cfg(feature = "web")]
impl From<WebError> for Error {
    fn from(err: WebError) -> Self {
        Self::Web(err)
    }
}

/// Standard result type for Mortar APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ColumnBreakpoints, EntranceDirection, Error, GalleryItem, LoadMode, MasonryConfig,
        MasonryEngine, MasonryEvent, MotionPhase, Rect, Result,
    };

    #[cfg(feature = "web")]
    pub use crate::{HostEvent, WebGallery, WebOptions};

    pub use crate::{core, gallery, layout};
}

pub use mortar_core as core;
pub use mortar_gallery as gallery;
pub use mortar_layout as layout;
#[cfg(feature = "web")]
pub use mortar_web as web;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::ConfigError;

    #[test]
    fn prelude_builds_an_engine() -> Result<()> {
        let mut engine = MasonryEngine::new(MasonryConfig::default().batches(4, 4))?;
        engine.set_container_width(640.0);
        engine.set_items((0..6).map(|i| GalleryItem::new(format!("{i}"), format!("{i}.jpg"))));
        engine.update();
        assert_eq!(engine.columns(), 3);
        assert_eq!(engine.placed_items().len(), 4);
        Ok(())
    }

    #[test]
    fn config_errors_convert() {
        let err: Error = MasonryConfig::default()
            .hover_scale(0.0)
            .validate()
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Config(ConfigError::InvalidHoverScale(_))));
    }
}
