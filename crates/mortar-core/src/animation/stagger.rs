#![forbid(unsafe_code)]

//! Entrance delays for items revealed together.
//!
//! A revealed batch arrives as a wave: each item waits an offset derived
//! from its slot (the gallery uses the column index) before its entrance
//! starts.
//!
//! # Invariants
//!
//! 1. Slot 0 never waits.
//! 2. With a monotonic curve, later slots never wait less than earlier ones.
//! 3. Every mode spans the same total, `(count - 1) * step`.
//!
//! # Failure Modes
//!
//! - `count <= 1` or a zero step: every offset is zero.
//! - A slot past the end waits as long as the last one.

use std::time::Duration;

use super::{EasingFn, ease_in, ease_in_out, ease_out};

/// Shape of the wave.
#[derive(Debug, Clone, Copy, Default)]
pub enum StaggerMode {
    /// Slot `i` waits `i * step`.
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Any curve over the normalized slot position.
    Custom(EasingFn),
}

impl StaggerMode {
    const fn curve(self) -> Option<EasingFn> {
        match self {
            Self::Linear => None,
            Self::EaseIn => Some(ease_in),
            Self::EaseOut => Some(ease_out),
            Self::EaseInOut => Some(ease_in_out),
            Self::Custom(f) => Some(f),
        }
    }
}

/// Wait before slot `index` of `count` starts, `step` apart.
#[must_use]
pub fn stagger_offset(index: usize, count: usize, step: Duration, mode: StaggerMode) -> Duration {
    let Some(last) = count.checked_sub(1).filter(|&last| last > 0) else {
        return Duration::ZERO;
    };
    let slot = index.min(last);
    match mode.curve() {
        None => step.saturating_mul(u32::try_from(slot).unwrap_or(u32::MAX)),
        Some(curve) => {
            let span = step.as_secs_f64() * last as f64;
            let at = curve(slot as f32 / last as f32);
            Duration::from_secs_f64((span * f64::from(at)).max(0.0))
        }
    }
}

/// Waits for every slot of `count`.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration, mode: StaggerMode) -> Vec<Duration> {
    (0..count)
        .map(|slot| stagger_offset(slot, count, step, mode))
        .collect()
}
