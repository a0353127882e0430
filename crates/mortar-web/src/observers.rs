#![forbid(unsafe_code)]

//! Scoped page observers.
//!
//! A gallery needs three observers on the page: a resize observer on the
//! container, media queries for the breakpoint widths, and a proximity
//! observer on the sentinel. [`ObserverScope`] connects them through an
//! [`ObserverHost`] and disconnects every one of them when dropped, so a
//! gallery torn down on any path (unmount, error, panic unwind) leaves no
//! listener behind.
//!
//! # Invariants
//!
//! 1. Every handle returned by `connect` is disconnected exactly once.
//! 2. Handles are disconnected in reverse connection order.

use mortar_gallery::MasonryConfig;

use crate::WebError;

/// What to observe.
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverTarget {
    /// Content-box width of the container.
    ContainerResize,
    /// `(min-width: N px)` media queries, widest first.
    ViewportMedia { min_widths: Vec<f32> },
    /// The sentinel entering the viewport expanded by `margin`.
    SentinelProximity { margin: f32 },
}

impl ObserverTarget {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ContainerResize => "container resize",
            Self::ViewportMedia { .. } => "viewport media",
            Self::SentinelProximity { .. } => "sentinel proximity",
        }
    }
}

/// Opaque id the host assigns to a connected observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u32);

/// The page side of observation.
pub trait ObserverHost {
    /// Start observing `target`.
    fn connect(&mut self, target: &ObserverTarget) -> Result<ObserverHandle, WebError>;

    /// Stop an observer. Must tolerate handles it no longer knows.
    fn disconnect(&mut self, handle: ObserverHandle);
}

/// Owns a host and the observers connected through it.
#[derive(Debug)]
pub struct ObserverScope<H: ObserverHost> {
    host: H,
    handles: Vec<ObserverHandle>,
}

impl<H: ObserverHost> ObserverScope<H> {
    /// A scope with nothing connected.
    pub fn new(host: H) -> Self {
        Self {
            host,
            handles: Vec::new(),
        }
    }

    /// Connect the observers a gallery with `config` needs.
    ///
    /// On failure the observers already connected are disconnected before
    /// the error is returned.
    pub fn for_config(host: H, config: &MasonryConfig) -> Result<Self, WebError> {
        let mut scope = Self::new(host);
        scope.connect(ObserverTarget::ContainerResize)?;
        let min_widths = config
            .breakpoints
            .tiers()
            .iter()
            .map(|tier| tier.min_width)
            .collect();
        scope.connect(ObserverTarget::ViewportMedia { min_widths })?;
        scope.connect(ObserverTarget::SentinelProximity {
            margin: config.proximity_margin,
        })?;
        Ok(scope)
    }

    /// Connect one more observer.
    pub fn connect(&mut self, target: ObserverTarget) -> Result<ObserverHandle, WebError> {
        let handle = self.host.connect(&target)?;
        mortar_core::debug!(observer = target.name(), handle = handle.0, "observer connected");
        self.handles.push(handle);
        Ok(handle)
    }

    /// Disconnect everything now. The scope stays usable.
    pub fn disconnect_all(&mut self) {
        while let Some(handle) = self.handles.pop() {
            self.host.disconnect(handle);
            mortar_core::debug!(handle = handle.0, "observer disconnected");
        }
    }

    /// Connected handles, oldest first.
    pub fn handles(&self) -> &[ObserverHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: ObserverHost> Drop for ObserverScope<H> {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}
