#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f32` values (0.0–1.0).
//! Nothing here reads a wall clock: the host advances every animation
//! explicitly with [`Animation::tick`], which keeps playback deterministic
//! and testable.
//!
//! The gallery driver combines [`Delayed`] (stagger) with [`Fade`]
//! (normalized progress) and interpolates geometry from that progress;
//! [`Tween`] covers scalar properties such as hover scale.

pub mod stagger;

use std::time::Duration;

use crate::geometry::lerp;

pub use stagger::{StaggerMode, stagger_offset, stagger_offsets};

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-in (slower start than quadratic).
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out. Used for hover feedback.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Quartic ease-out (fast start, long settle). Used for entrances.
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Look up an easing function by its conventional name.
///
/// Accepts both plain names (`"ease-out"`) and timeline-library style
/// power names (`"power3.out"`). Unknown names return `None`.
pub fn easing_by_name(name: &str) -> Option<EasingFn> {
    let f: EasingFn = match name.trim().to_ascii_lowercase().as_str() {
        "linear" | "none" => linear,
        "ease-in" | "power1.in" => ease_in,
        "ease-out" | "power1.out" => ease_out,
        "ease-in-out" | "power1.inout" => ease_in_out,
        "ease-in-cubic" | "power2.in" => ease_in_cubic,
        "ease-out-cubic" | "power2.out" => ease_out_cubic,
        "ease-out-quart" | "power3.out" => ease_out_quart,
        _ => return None,
    };
    Some(f)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// Something that plays over host-supplied time and reports eased progress.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the end has been reached.
    fn is_complete(&self) -> bool;

    /// Eased progress in [0.0, 1.0].
    fn value(&self) -> f32;
}

/// Elapsed time against a fixed length. Shared by [`Fade`] and [`Tween`].
///
/// Time is kept as [`Duration`] so many small ticks sum exactly.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    elapsed: Duration,
    length: Duration,
}

impl Timeline {
    /// Zero lengths become one nanosecond so progress is always defined.
    fn new(length: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            length: length.max(Duration::from_nanos(1)),
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.length
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.length.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progress from 0.0 to 1.0 over a duration, through an easing curve.
///
/// The gallery's entrance and move transitions interpolate geometry from
/// this progress.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    timeline: Timeline,
    easing: EasingFn,
}

impl Fade {
    /// Linear by default.
    pub fn new(duration: Duration) -> Self {
        Self {
            timeline: Timeline::new(duration),
            easing: linear,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.timeline.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.timeline.is_done()
    }

    fn value(&self) -> f32 {
        (self.easing)(self.timeline.progress())
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// A scalar moving between two values, e.g. hover scale.
///
/// [`Animation::value`] is the eased progress of the current leg and
/// [`Tween::current`] the interpolated value. [`Tween::retarget`] begins a
/// new leg at the current value, so an interrupted transition never jumps.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    timeline: Timeline,
    easing: EasingFn,
}

impl Tween {
    /// Ease-out by default.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            timeline: Timeline::new(duration),
            easing: ease_out,
        }
    }

    /// A tween already resting at `value`.
    pub fn settled(value: f32) -> Self {
        let mut tween = Self::new(value, value, Duration::ZERO);
        tween.timeline.advance(tween.timeline.length);
        tween
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    pub fn current(&self) -> f32 {
        lerp(self.from, self.to, self.value())
    }

    /// End value of the current leg.
    pub const fn target(&self) -> f32 {
        self.to
    }

    /// Head for `to` from wherever the tween is now. Same target: no-op.
    pub fn retarget(&mut self, to: f32, duration: Duration) {
        if (self.to - to).abs() <= f32::EPSILON {
            return;
        }
        self.from = self.current();
        self.to = to;
        self.timeline = Timeline::new(duration);
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.timeline.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.timeline.is_done()
    }

    fn value(&self) -> f32 {
        (self.easing)(self.timeline.progress())
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Holds an animation at zero until a delay has passed.
///
/// Time left over from the tick that ends the wait goes to the inner
/// animation, so a staggered item finishes exactly `wait + duration` after
/// its first tick regardless of frame boundaries.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    wait: Duration,
    waited: Duration,
    inner: A,
}

impl<A: Animation> Delayed<A> {
    pub fn new(wait: Duration, inner: A) -> Self {
        Self {
            wait,
            waited: Duration::ZERO,
            inner,
        }
    }

    /// Whether the wait is over.
    pub fn has_started(&self) -> bool {
        self.waited >= self.wait
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if self.has_started() {
            self.inner.tick(dt);
            return;
        }
        self.waited = self.waited.saturating_add(dt);
        let spill = self.waited.saturating_sub(self.wait);
        if self.has_started() && !spill.is_zero() {
            self.inner.tick(spill);
        }
    }

    fn is_complete(&self) -> bool {
        self.has_started() && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        if self.has_started() {
            self.inner.value()
        } else {
            0.0
        }
    }
}

/// Shorthand for [`Delayed::new`].
pub fn delay<A: Animation>(wait: Duration, animation: A) -> Delayed<A> {
    Delayed::new(wait, animation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);
    const SEC_1: Duration = Duration::from_secs(1);

    #[test]
    fn easing_clamps_input() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(linear(2.0), 1.0);
        assert_eq!(ease_out_quart(1.5), 1.0);
        assert_eq!(ease_out_cubic(-0.5), 0.0);
    }

    #[test]
    fn higher_power_settles_earlier() {
        assert!(ease_out_quart(0.3) > ease_out_cubic(0.3));
        assert!(ease_out_cubic(0.3) > ease_out(0.3));
    }

    #[test]
    fn easing_lookup_by_name() {
        let f = easing_by_name("power3.out").unwrap();
        assert!((f(0.5) - ease_out_quart(0.5)).abs() < f32::EPSILON);
        let g = easing_by_name(" Ease-In-Out ").unwrap();
        assert!((g(0.25) - ease_in_out(0.25)).abs() < f32::EPSILON);
        assert!(easing_by_name("bounce").is_none());
    }

    #[test]
    fn fade_progresses_and_completes() {
        let mut fade = Fade::new(SEC_1);
        assert_eq!(fade.value(), 0.0);
        fade.tick(MS_500);
        assert!((fade.value() - 0.5).abs() < 0.01);
        assert!(!fade.is_complete());
        fade.tick(MS_500);
        assert!(fade.is_complete());
        fade.tick(SEC_1);
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn sixteen_ms_frames_sum_exactly() {
        let mut fade = Fade::new(Duration::from_millis(160));
        for _ in 0..9 {
            fade.tick(MS_16);
        }
        assert!(!fade.is_complete());
        fade.tick(MS_16);
        assert!(fade.is_complete());
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(MS_16);
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn tween_interpolates() {
        let mut tween = Tween::new(1.0, 0.5, SEC_1).easing(linear);
        tween.tick(MS_500);
        assert!((tween.current() - 0.75).abs() < 1e-4);
        tween.tick(MS_500);
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 0.5);
    }

    #[test]
    fn retarget_starts_from_current() {
        let mut tween = Tween::new(0.0, 1.0, SEC_1).easing(linear);
        tween.tick(MS_500);
        tween.retarget(0.0, SEC_1);
        assert!((tween.current() - 0.5).abs() < 1e-4);
        assert!(!tween.is_complete());
        tween.tick(SEC_1);
        assert!(tween.current().abs() < 1e-4);
    }

    #[test]
    fn retarget_to_same_value_keeps_leg() {
        let mut tween = Tween::new(0.0, 1.0, SEC_1).easing(linear);
        tween.tick(MS_500);
        tween.retarget(1.0, SEC_1);
        assert!((tween.current() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn settled_tween_rests() {
        let tween = Tween::settled(0.95);
        assert!(tween.is_complete());
        assert!((tween.current() - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn delayed_holds_then_plays() {
        let mut d = delay(MS_500, Fade::new(MS_500));
        d.tick(Duration::from_millis(250));
        assert!(!d.has_started());
        assert_eq!(d.value(), 0.0);

        d.tick(Duration::from_millis(250));
        assert!(d.has_started());
        d.tick(MS_500);
        assert!(d.is_complete());
        assert_eq!(d.value(), 1.0);
    }

    #[test]
    fn leftover_wait_feeds_inner() {
        let mut d = delay(MS_100, Fade::new(SEC_1));
        d.tick(Duration::from_millis(200));
        assert!(d.has_started());
        assert!((d.value() - 0.1).abs() < 0.02);
    }

    #[test]
    fn zero_wait_starts_immediately() {
        assert!(delay(Duration::ZERO, Fade::new(SEC_1)).has_started());
    }
}
