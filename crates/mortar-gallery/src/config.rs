#![forbid(unsafe_code)]

//! Gallery configuration.
//!
//! [`MasonryConfig`] gathers every tunable of the engine. Defaults match a
//! photo gallery: entrances rise 200px from below over 0.8s with a 50ms
//! per-column stagger and a blur-to-focus, and items shrink slightly on
//! hover. The config is validated once when the engine is built.

use std::str::FromStr;
use std::time::Duration;

use mortar_core::animation::{
    EasingFn, StaggerMode, easing_by_name, ease_out_cubic, ease_out_quart,
};
use mortar_core::geometry::Rect;
use mortar_layout::{
    ColumnBreakpoints, ColumnSource, DEFAULT_GAP, MAX_ASPECT, MIN_ASPECT, MIN_ITEM_HEIGHT,
    MasonryParams,
};

use crate::error::ConfigError;
use crate::item::ItemId;

// ---------------------------------------------------------------------------
// Entrance direction
// ---------------------------------------------------------------------------

/// Where entering items start from, relative to their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntranceDirection {
    /// Below the slot.
    #[default]
    Bottom,
    /// Above the slot.
    Top,
    /// Left of the slot.
    Left,
    /// Right of the slot.
    Right,
    /// Origin at the slot's center.
    Center,
    /// One of the four edges, chosen per item id.
    Random,
}

impl EntranceDirection {
    const EDGES: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Random => "random",
        }
    }

    /// Pick a concrete direction for `id`.
    ///
    /// `Random` maps to an edge through the id's stable hash, so the same
    /// item always enters from the same side.
    pub fn resolve(self, id: &ItemId) -> Self {
        match self {
            Self::Random => Self::EDGES[(id.stable_hash() % Self::EDGES.len() as u64) as usize],
            other => other,
        }
    }

    /// Starting rect for an item entering into `slot`.
    ///
    /// `Random` is treated as `Bottom`; call [`resolve`](Self::resolve) first.
    pub fn start_rect(self, slot: Rect, offset: f32) -> Rect {
        match self {
            Self::Top => slot.translate(0.0, -offset),
            Self::Bottom | Self::Random => slot.translate(0.0, offset),
            Self::Left => slot.translate(-offset, 0.0),
            Self::Right => slot.translate(offset, 0.0),
            Self::Center => slot.translate(slot.width / 2.0, slot.height / 2.0),
        }
    }
}

impl FromStr for EntranceDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom" => Ok(Self::Bottom),
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            "random" => Ok(Self::Random),
            _ => Err(ConfigError::UnknownDirection(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Load mode
// ---------------------------------------------------------------------------

/// Who supplies more items once everything supplied is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// The host hands over the full list up front; the engine only reveals.
    #[default]
    Uncontrolled,
    /// The host appends items on request while `has_more` is true.
    Controlled { has_more: bool },
}

impl LoadMode {
    pub const fn is_controlled(self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// Whether the host says more items exist beyond those supplied.
    pub const fn host_has_more(self) -> bool {
        matches!(self, Self::Controlled { has_more: true })
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for a [`MasonryEngine`](crate::MasonryEngine).
#[derive(Debug, Clone)]
pub struct MasonryConfig {
    /// Entrance direction.
    pub direction: EntranceDirection,
    /// Distance entering items travel, in pixels.
    pub entrance_offset: f32,
    /// Entrance duration.
    pub entrance_duration: Duration,
    /// Entrance easing.
    pub entrance_easing: EasingFn,
    /// Duration of move transitions for already visible items.
    pub update_duration: Duration,
    /// Easing of move transitions.
    pub update_easing: EasingFn,
    /// Entrance delay per column index.
    pub stagger: Duration,
    /// How the per-column delays spread across the row.
    pub stagger_mode: StaggerMode,
    /// Start entrances blurred and sharpen into focus.
    pub blur_to_focus: bool,
    /// Initial blur radius in pixels.
    pub blur_radius: f32,
    /// Scale items on hover.
    pub scale_on_hover: bool,
    /// Hover scale factor.
    pub hover_scale: f32,
    /// Fade in a colour overlay on hover.
    pub color_shift_on_hover: bool,
    /// Overlay opacity while hovered.
    pub overlay_opacity: f32,
    /// Hover transition duration.
    pub hover_duration: Duration,
    /// Hover easing.
    pub hover_easing: EasingFn,
    /// Items revealed before any scrolling.
    pub initial_batch: usize,
    /// Items revealed per load-more.
    pub batch_size: usize,
    /// Controlled or uncontrolled loading.
    pub load_mode: LoadMode,
    /// Distance from the viewport at which the sentinel counts as reached.
    pub proximity_margin: f32,
    /// Column and row gap.
    pub gap: f32,
    /// Aspect clamp, lower bound.
    pub min_aspect: f32,
    /// Aspect clamp, upper bound.
    pub max_aspect: f32,
    /// Height floor for every item.
    pub min_item_height: f32,
    /// Width → column-count table.
    pub breakpoints: ColumnBreakpoints,
    /// Which width selects the breakpoint tier.
    pub column_source: ColumnSource,
}

impl MasonryConfig {
    pub const DEFAULT_ENTRANCE_OFFSET: f32 = 200.0;
    pub const DEFAULT_ENTRANCE_DURATION: Duration = Duration::from_millis(800);
    pub const DEFAULT_UPDATE_DURATION: Duration = Duration::from_millis(600);
    pub const DEFAULT_STAGGER: Duration = Duration::from_millis(50);
    pub const DEFAULT_BLUR_RADIUS: f32 = 10.0;
    pub const DEFAULT_HOVER_SCALE: f32 = 0.95;
    pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.3;
    pub const DEFAULT_HOVER_DURATION: Duration = Duration::from_millis(300);
    pub const DEFAULT_INITIAL_BATCH: usize = 18;
    pub const DEFAULT_BATCH_SIZE: usize = 12;
    pub const DEFAULT_PROXIMITY_MARGIN: f32 = 300.0;

    /// Set the entrance direction.
    #[must_use]
    pub fn direction(mut self, direction: EntranceDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the entrance travel distance.
    #[must_use]
    pub fn entrance_offset(mut self, offset: f32) -> Self {
        self.entrance_offset = offset;
        self
    }

    /// Set the entrance duration.
    #[must_use]
    pub fn entrance_duration(mut self, duration: Duration) -> Self {
        self.entrance_duration = duration;
        self
    }

    /// Set the move transition duration.
    #[must_use]
    pub fn update_duration(mut self, duration: Duration) -> Self {
        self.update_duration = duration;
        self
    }

    /// Set the move transition easing.
    #[must_use]
    pub fn update_easing(mut self, easing: EasingFn) -> Self {
        self.update_easing = easing;
        self
    }

    /// Set the move transition easing by name (`"power3.out"`, `"ease-in-out"`, ...).
    pub fn update_easing_named(self, name: &str) -> Result<Self, ConfigError> {
        let easing =
            easing_by_name(name).ok_or_else(|| ConfigError::UnknownEasing(name.to_owned()))?;
        Ok(self.update_easing(easing))
    }

    /// Set the per-column stagger.
    #[must_use]
    pub fn stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Set how column delays are spread. The last column always waits
    /// `(columns - 1) * stagger`.
    #[must_use]
    pub fn stagger_mode(mut self, mode: StaggerMode) -> Self {
        self.stagger_mode = mode;
        self
    }

    /// Enable or disable blur-to-focus.
    #[must_use]
    pub fn blur_to_focus(mut self, enabled: bool) -> Self {
        self.blur_to_focus = enabled;
        self
    }

    /// Enable or disable hover scaling.
    #[must_use]
    pub fn scale_on_hover(mut self, enabled: bool) -> Self {
        self.scale_on_hover = enabled;
        self
    }

    /// Set the hover scale factor.
    #[must_use]
    pub fn hover_scale(mut self, scale: f32) -> Self {
        self.hover_scale = scale;
        self
    }

    /// Enable or disable the hover colour overlay.
    #[must_use]
    pub fn color_shift_on_hover(mut self, enabled: bool) -> Self {
        self.color_shift_on_hover = enabled;
        self
    }

    /// Set the initial and load-more batch sizes.
    #[must_use]
    pub fn batches(mut self, initial: usize, more: usize) -> Self {
        self.initial_batch = initial;
        self.batch_size = more;
        self
    }

    /// Set the load mode.
    #[must_use]
    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }

    /// Set the sentinel proximity margin.
    #[must_use]
    pub fn proximity_margin(mut self, margin: f32) -> Self {
        self.proximity_margin = margin;
        self
    }

    /// Set the gap.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the aspect clamp range.
    #[must_use]
    pub fn aspect_range(mut self, min: f32, max: f32) -> Self {
        self.min_aspect = min;
        self.max_aspect = max;
        self
    }

    /// Set the breakpoint table.
    #[must_use]
    pub fn breakpoints(mut self, breakpoints: ColumnBreakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Set which width selects the breakpoint tier.
    #[must_use]
    pub fn column_source(mut self, source: ColumnSource) -> Self {
        self.column_source = source;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_batch == 0 {
            return Err(ConfigError::ZeroBatchSize {
                field: "initial_batch",
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize {
                field: "batch_size",
            });
        }
        if !(self.hover_scale.is_finite() && self.hover_scale > 0.0) {
            return Err(ConfigError::InvalidHoverScale(self.hover_scale));
        }
        let aspects_ok = self.min_aspect.is_finite()
            && self.max_aspect.is_finite()
            && self.min_aspect > 0.0
            && self.min_aspect <= self.max_aspect;
        if !aspects_ok {
            return Err(ConfigError::InvalidAspectRange {
                min: self.min_aspect,
                max: self.max_aspect,
            });
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(ConfigError::NegativeGap(self.gap));
        }
        for (field, value) in [
            ("entrance_offset", self.entrance_offset),
            ("blur_radius", self.blur_radius),
            ("overlay_opacity", self.overlay_opacity),
            ("proximity_margin", self.proximity_margin),
            ("min_item_height", self.min_item_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidLength { field, value });
            }
        }
        Ok(())
    }

    /// Packing parameters for the given columns and width.
    pub fn params(&self, columns: usize, container_width: f32) -> MasonryParams {
        MasonryParams::new(columns, container_width)
            .gap(self.gap)
            .aspect_range(self.min_aspect, self.max_aspect)
            .min_item_height(self.min_item_height)
    }
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            direction: EntranceDirection::Bottom,
            entrance_offset: Self::DEFAULT_ENTRANCE_OFFSET,
            entrance_duration: Self::DEFAULT_ENTRANCE_DURATION,
            entrance_easing: ease_out_quart,
            update_duration: Self::DEFAULT_UPDATE_DURATION,
            update_easing: ease_out_quart,
            stagger: Self::DEFAULT_STAGGER,
            stagger_mode: StaggerMode::Linear,
            blur_to_focus: true,
            blur_radius: Self::DEFAULT_BLUR_RADIUS,
            scale_on_hover: true,
            hover_scale: Self::DEFAULT_HOVER_SCALE,
            color_shift_on_hover: false,
            overlay_opacity: Self::DEFAULT_OVERLAY_OPACITY,
            hover_duration: Self::DEFAULT_HOVER_DURATION,
            hover_easing: ease_out_cubic,
            initial_batch: Self::DEFAULT_INITIAL_BATCH,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            load_mode: LoadMode::Uncontrolled,
            proximity_margin: Self::DEFAULT_PROXIMITY_MARGIN,
            gap: DEFAULT_GAP,
            min_aspect: MIN_ASPECT,
            max_aspect: MAX_ASPECT,
            min_item_height: MIN_ITEM_HEIGHT,
            breakpoints: ColumnBreakpoints::standard(),
            column_source: ColumnSource::Container,
        }
    }
}
