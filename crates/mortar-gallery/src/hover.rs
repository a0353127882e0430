#![forbid(unsafe_code)]

//! Hover feedback: scale and colour overlay tweens.

use std::time::Duration;

use mortar_core::animation::{Animation, EasingFn, Tween};

use crate::config::MasonryConfig;

/// Hover targets taken from the config.
#[derive(Debug, Clone, Copy)]
pub struct HoverStyle {
    /// Scale while hovered, or `None` when scaling is off.
    pub scale: Option<f32>,
    /// Overlay opacity while hovered, or `None` when the overlay is off.
    pub overlay: Option<f32>,
    pub duration: Duration,
    pub easing: EasingFn,
}

impl HoverStyle {
    pub fn from_config(config: &MasonryConfig) -> Self {
        Self {
            scale: config.scale_on_hover.then_some(config.hover_scale),
            overlay: config
                .color_shift_on_hover
                .then_some(config.overlay_opacity),
            duration: config.hover_duration,
            easing: config.hover_easing,
        }
    }
}

/// Hover state of one item.
#[derive(Debug, Clone)]
pub struct HoverState {
    hovered: bool,
    scale: Tween,
    overlay: Tween,
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverState {
    pub fn new() -> Self {
        Self {
            hovered: false,
            scale: Tween::settled(1.0),
            overlay: Tween::settled(0.0),
        }
    }

    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer entered the item.
    pub fn enter(&mut self, style: &HoverStyle) {
        self.hovered = true;
        if let Some(scale) = style.scale {
            self.scale = retargeted(self.scale, scale, style);
        }
        if let Some(opacity) = style.overlay {
            self.overlay = retargeted(self.overlay, opacity, style);
        }
    }

    /// Pointer left the item.
    pub fn leave(&mut self, style: &HoverStyle) {
        self.hovered = false;
        self.scale = retargeted(self.scale, 1.0, style);
        self.overlay = retargeted(self.overlay, 0.0, style);
    }

    /// Advance by `dt`. Returns whether a tween is still playing.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.scale.tick(dt);
        self.overlay.tick(dt);
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        !(self.scale.is_complete() && self.overlay.is_complete())
    }

    pub fn scale(&self) -> f32 {
        self.scale.current()
    }

    pub fn overlay_opacity(&self) -> f32 {
        self.overlay.current()
    }
}

fn retargeted(mut tween: Tween, to: f32, style: &HoverStyle) -> Tween {
    if (tween.target() - to).abs() <= f32::EPSILON {
        return tween;
    }
    tween.retarget(to, style.duration);
    tween.easing(style.easing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> HoverStyle {
        HoverStyle::from_config(&MasonryConfig::default().color_shift_on_hover(true))
    }

    #[test]
    fn hover_scales_and_reverts() {
        let style = style();
        let mut hover = HoverState::new();
        hover.enter(&style);
        assert!(hover.is_hovered());
        assert!(hover.is_animating());
        hover.tick(Duration::from_millis(300));
        assert!((hover.scale() - 0.95).abs() < 1e-4);
        assert!((hover.overlay_opacity() - 0.3).abs() < 1e-4);

        hover.leave(&style);
        hover.tick(Duration::from_millis(300));
        assert!((hover.scale() - 1.0).abs() < 1e-4);
        assert!(hover.overlay_opacity().abs() < 1e-4);
        assert!(!hover.is_animating());
    }

    #[test]
    fn disabled_effects_stay_at_rest() {
        let style = HoverStyle::from_config(&MasonryConfig::default().scale_on_hover(false));
        let mut hover = HoverState::new();
        hover.enter(&style);
        hover.tick(Duration::from_millis(300));
        assert_eq!(hover.scale(), 1.0);
        assert_eq!(hover.overlay_opacity(), 0.0);
    }

    #[test]
    fn leave_mid_transition_starts_from_current() {
        let style = style();
        let mut hover = HoverState::new();
        hover.enter(&style);
        hover.tick(Duration::from_millis(100));
        let mid = hover.scale();
        assert!(mid < 1.0 && mid > 0.95);
        hover.leave(&style);
        assert!((hover.scale() - mid).abs() < 1e-4);
    }
}
