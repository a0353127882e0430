#![forbid(unsafe_code)]

//! Per-item animation driver.
//!
//! Every item moves through a small state machine keyed by its id:
//!
//! ```text
//! Unseen ──enter──▶ Entering ──done──▶ Settled ──slot moved──▶ Moving
//!                      │  ▲                ▲                      │
//!                      └──┘ retarget       └────────done──────────┘
//! ```
//!
//! `Entering` fades in from an offset start rect, optionally sharpening
//! from a blur, after a stagger delay. `Moving` animates geometry only.
//!
//! # Invariants
//!
//! 1. An item enters at most once per session.
//! 2. Outside `Entering` opacity is 1 and blur is 0 (once seen).
//! 3. Retargeting an entrance keeps its clock, so the item arrives when
//!    the first entrance would have ended, and its current rect does
//!    not jump.

use std::time::Duration;

use mortar_core::animation::{Animation, Delayed, EasingFn, Fade};
use mortar_core::geometry::Rect;

/// Animation phase of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    /// Never placed in this session.
    #[default]
    Unseen,
    /// Playing its entrance.
    Entering,
    /// At rest in its slot.
    Settled,
    /// Transitioning to a new slot.
    Moving,
}

/// Everything needed to draw one item this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Animated position and size.
    pub rect: Rect,
    pub opacity: f32,
    /// Blur radius in pixels.
    pub blur: f32,
    /// Hover scale around the rect's center.
    pub scale: f32,
    /// Hover colour overlay opacity.
    pub overlay_opacity: f32,
}

/// Entrance parameters for one item.
#[derive(Debug, Clone, Copy)]
pub struct Entrance {
    /// Rect the item starts from.
    pub start: Rect,
    /// Wait before the entrance starts.
    pub delay: Duration,
    pub duration: Duration,
    pub easing: EasingFn,
    /// Starting blur radius; 0 disables the blur.
    pub blur: f32,
}

/// Geometry and fade state of one item.
#[derive(Debug, Clone)]
pub struct ItemMotion {
    phase: MotionPhase,
    from: Rect,
    to: Rect,
    progress: Delayed<Fade>,
    blur: f32,
}

impl Default for ItemMotion {
    fn default() -> Self {
        Self::unseen()
    }
}

impl ItemMotion {
    /// An item that has not been placed yet.
    pub fn unseen() -> Self {
        Self {
            phase: MotionPhase::Unseen,
            from: Rect::default(),
            to: Rect::default(),
            progress: Delayed::new(Duration::ZERO, Fade::new(Duration::ZERO)),
            blur: 0.0,
        }
    }

    pub const fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Slot the item is heading for (or resting in).
    pub const fn target(&self) -> Rect {
        self.to
    }

    /// Whether an entrance or move is still playing.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, MotionPhase::Entering | MotionPhase::Moving)
    }

    /// Start the entrance into `slot`. Ignored unless the item is unseen.
    pub fn enter(&mut self, slot: Rect, entrance: Entrance) -> bool {
        if self.phase != MotionPhase::Unseen {
            return false;
        }
        self.phase = MotionPhase::Entering;
        self.from = entrance.start;
        self.to = slot;
        self.blur = entrance.blur.max(0.0);
        self.progress = Delayed::new(
            entrance.delay,
            Fade::new(entrance.duration).easing(entrance.easing),
        );
        true
    }

    /// Send the item to a new slot.
    ///
    /// Returns `false` if the slot did not change or the item is unseen.
    pub fn move_to(&mut self, slot: Rect, duration: Duration, easing: EasingFn) -> bool {
        if self.phase == MotionPhase::Unseen || slot.approx_eq(&self.to) {
            return false;
        }
        match self.phase {
            MotionPhase::Entering => self.retarget_entrance(slot),
            MotionPhase::Settled | MotionPhase::Moving => {
                self.from = self.current_rect();
                self.to = slot;
                self.progress = Delayed::new(Duration::ZERO, Fade::new(duration).easing(easing));
                self.phase = MotionPhase::Moving;
            }
            MotionPhase::Unseen => {}
        }
        true
    }

    fn retarget_entrance(&mut self, slot: Rect) {
        if !self.progress.has_started() {
            // Keep the entrance offset relative to the new slot.
            self.from = Rect::new(
                self.from.x + (slot.x - self.to.x),
                self.from.y + (slot.y - self.to.y),
                slot.width,
                slot.height,
            );
            self.to = slot;
            return;
        }
        let e = self.progress.value();
        if e >= 0.999 {
            self.from = slot;
            self.to = slot;
            return;
        }
        // Solve lerp(from', slot, e) == current so the rect stays put.
        let cur = self.current_rect();
        let solve = |c: f32, t: f32| (c - e * t) / (1.0 - e);
        self.from = Rect {
            x: solve(cur.x, slot.x),
            y: solve(cur.y, slot.y),
            width: solve(cur.width, slot.width),
            height: solve(cur.height, slot.height),
        };
        self.to = slot;
    }

    /// Advance by `dt`. Returns whether the item is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.progress.tick(dt);
        if self.progress.is_complete() {
            self.phase = MotionPhase::Settled;
            self.from = self.to;
            return false;
        }
        true
    }

    /// Rect to draw this frame.
    pub fn current_rect(&self) -> Rect {
        match self.phase {
            MotionPhase::Entering | MotionPhase::Moving => {
                self.from.lerp(&self.to, self.progress.value())
            }
            MotionPhase::Unseen | MotionPhase::Settled => self.to,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.phase {
            MotionPhase::Unseen => 0.0,
            MotionPhase::Entering => self.progress.value(),
            MotionPhase::Settled | MotionPhase::Moving => 1.0,
        }
    }

    /// Blur radius this frame.
    pub fn blur(&self) -> f32 {
        match self.phase {
            MotionPhase::Entering => self.blur * (1.0 - self.progress.value()),
            MotionPhase::Unseen => self.blur,
            MotionPhase::Settled | MotionPhase::Moving => 0.0,
        }
    }

    /// Style with the given hover values.
    pub fn style(&self, scale: f32, overlay_opacity: f32) -> ItemStyle {
        ItemStyle {
            rect: self.current_rect(),
            opacity: self.opacity(),
            blur: self.blur(),
            scale,
            overlay_opacity,
        }
    }
}
