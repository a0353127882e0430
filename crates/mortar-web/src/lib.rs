#![forbid(unsafe_code)]

//! `mortar-web` adapts the masonry engine to a JavaScript host.
//!
//! Design goals:
//! - **Host-driven I/O**: the page pushes resize, scroll, image and pointer
//!   events as tagged JSON ([`HostEvent`]).
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. [`WebGallery`] is the
//! building block a thin binding layer wraps: push events, advance time,
//! [`step`](WebGallery::step), then read [`WebOutputs`] as JSON.

pub mod event;
pub mod observers;
pub mod options;
pub mod outputs;
pub mod program;

use core::time::Duration;

use mortar_gallery::ConfigError;

pub use event::{HostEvent, ItemJson};
pub use observers::{ObserverHandle, ObserverHost, ObserverScope, ObserverTarget};
pub use options::WebOptions;
pub use outputs::{EventJson, ItemFrame, PhaseJson, ProbeJson, RectJson, WebOutputs};
pub use program::{StepResult, WebGallery};

/// Web adapter error type.
#[derive(Debug)]
pub enum WebError {
    /// Host JSON did not match the expected schema.
    Json(serde_json::Error),
    /// Options converted to an invalid engine config.
    Config(ConfigError),
    /// The host could not connect an observer.
    Observer {
        target: &'static str,
        reason: String,
    },
}

impl core::fmt::Display for WebError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid host JSON: {err}"),
            Self::Config(err) => write!(f, "invalid options: {err}"),
            Self::Observer { target, reason } => {
                write!(f, "failed to observe {target}: {reason}")
            }
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Observer { .. } => None,
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ConfigError> for WebError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}
