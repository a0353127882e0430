#![forbid(unsafe_code)]

//! Layout primitives for masonry galleries.
//!
//! This crate provides:
//!
//! - [`ColumnBreakpoints`] - width → column-count table, evaluated widest-first
//! - [`ColumnResolver`] - reactive column count fed by container and viewport widths
//! - [`masonry`] - shortest-column-first packing ([`pack`], [`Packer`])
//! - [`skeleton`] - placeholder layout shown while the first batch loads
//!
//! # Example
//!
//! ```
//! use mortar_layout::{ColumnBreakpoints, MasonryParams, pack};
//!
//! let columns = ColumnBreakpoints::standard().columns_for(Some(1204.0));
//! assert_eq!(columns, 4);
//!
//! let params = MasonryParams::new(columns, 1204.0);
//! let layout = pack(&params, [1.0; 5]);
//! assert_eq!(layout.column_width(), 292.0);
//! assert_eq!(layout.slots()[4].column, 0);
//! ```

pub mod masonry;
pub mod skeleton;

pub use masonry::{
    BOTTOM_PADDING, DEFAULT_GAP, MAX_ASPECT, MIN_ASPECT, MIN_ITEM_HEIGHT, MasonryLayout,
    MasonryParams, Packer, Slot, pack,
};
pub use mortar_core::geometry::{Point, Rect, Size};
pub use skeleton::{SKELETON_HEIGHTS, skeleton_layout};

/// One row of a breakpoint table: at `min_width` or wider, use `columns`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnTier {
    /// Inclusive lower bound on the observed width, in pixels.
    pub min_width: f32,
    /// Column count for this tier. Always at least 1.
    pub columns: usize,
}

/// Breakpoint table mapping an observed width to a column count.
///
/// Tiers are kept sorted widest-first and the first tier whose
/// `min_width` the width satisfies wins. Widths below every tier, and
/// unknown widths, resolve to the default column count.
///
/// | Min width | Columns |
/// |-----------|---------|
/// | 1500      | 5       |
/// | 1000      | 4       |
/// | 600       | 3       |
/// | 400       | 2       |
/// | (default) | 2       |
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBreakpoints {
    tiers: Vec<ColumnTier>,
    default_columns: usize,
}

impl ColumnBreakpoints {
    /// Standard gallery tiers as `(min_width, columns)`.
    pub const STANDARD_TIERS: [(f32, usize); 4] =
        [(1500.0, 5), (1000.0, 4), (600.0, 3), (400.0, 2)];

    /// Column count used below every tier.
    pub const DEFAULT_COLUMNS: usize = 2;

    /// Build a table from `(min_width, columns)` pairs.
    ///
    /// Input order does not matter. Column counts of zero become 1,
    /// non-finite thresholds are dropped, and when two tiers share a
    /// threshold the first one given wins.
    pub fn new(tiers: impl IntoIterator<Item = (f32, usize)>, default_columns: usize) -> Self {
        let mut sorted: Vec<ColumnTier> = tiers
            .into_iter()
            .filter(|(min_width, _)| min_width.is_finite())
            .map(|(min_width, columns)| ColumnTier {
                min_width: min_width.max(0.0),
                columns: columns.max(1),
            })
            .collect();
        // Stable sort keeps the caller's first entry ahead of later duplicates.
        sorted.sort_by(|a, b| b.min_width.total_cmp(&a.min_width));
        sorted.dedup_by(|later, earlier| later.min_width == earlier.min_width);
        Self {
            tiers: sorted,
            default_columns: default_columns.max(1),
        }
    }

    /// The standard gallery table.
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_TIERS, Self::DEFAULT_COLUMNS)
    }

    /// Resolve a column count. `None` (width not yet measured) yields the default.
    #[must_use]
    pub fn columns_for(&self, width: Option<f32>) -> usize {
        let Some(width) = width.filter(|w| w.is_finite()) else {
            return self.default_columns;
        };
        self.tiers
            .iter()
            .find(|tier| width >= tier.min_width)
            .map_or(self.default_columns, |tier| tier.columns)
    }

    /// Tiers, widest first.
    pub fn tiers(&self) -> &[ColumnTier] {
        &self.tiers
    }

    /// Column count used below every tier.
    pub const fn default_columns(&self) -> usize {
        self.default_columns
    }

    /// Largest column count the table can produce.
    pub fn max_columns(&self) -> usize {
        self.tiers
            .iter()
            .map(|t| t.columns)
            .fold(self.default_columns, usize::max)
    }
}

impl Default for ColumnBreakpoints {
    fn default() -> Self {
        Self::standard()
    }
}

/// Which width signal selects the breakpoint tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSource {
    /// The gallery container's own width (resize observation).
    #[default]
    Container,
    /// The browser viewport width (media-query style breakpoints).
    Viewport,
}

/// A change in resolved column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnChange {
    /// Previous column count.
    pub from: usize,
    /// New column count.
    pub to: usize,
}

/// Reactive column-count resolution.
///
/// Feed it width notifications as they arrive; each observation returns a
/// [`ColumnChange`] only when the resolved count actually changes. Packing
/// always uses the container width, whichever [`ColumnSource`] selects the
/// tier.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    breakpoints: ColumnBreakpoints,
    source: ColumnSource,
    container_width: Option<f32>,
    viewport_width: Option<f32>,
    columns: usize,
}

impl ColumnResolver {
    /// Create a resolver. Before any width arrives it reports the default count.
    pub fn new(breakpoints: ColumnBreakpoints, source: ColumnSource) -> Self {
        let columns = breakpoints.columns_for(None);
        Self {
            breakpoints,
            source,
            container_width: None,
            viewport_width: None,
            columns,
        }
    }

    /// Record a container resize.
    pub fn observe_container_width(&mut self, width: f32) -> Option<ColumnChange> {
        self.container_width = Some(sanitize_width(width));
        self.resolve()
    }

    /// Record a viewport width change.
    pub fn observe_viewport_width(&mut self, width: f32) -> Option<ColumnChange> {
        self.viewport_width = Some(sanitize_width(width));
        self.resolve()
    }

    /// Switch the signal that selects the tier.
    pub fn set_source(&mut self, source: ColumnSource) -> Option<ColumnChange> {
        self.source = source;
        self.resolve()
    }

    /// Forget all observed widths, e.g. after the container is detached.
    pub fn forget_widths(&mut self) -> Option<ColumnChange> {
        self.container_width = None;
        self.viewport_width = None;
        self.resolve()
    }

    /// Current column count (always ≥ 1).
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Last observed container width, if any.
    pub const fn container_width(&self) -> Option<f32> {
        self.container_width
    }

    /// Last observed viewport width, if any.
    pub const fn viewport_width(&self) -> Option<f32> {
        self.viewport_width
    }

    /// Active tier-selection signal.
    pub const fn source(&self) -> ColumnSource {
        self.source
    }

    /// Breakpoint table in use.
    pub fn breakpoints(&self) -> &ColumnBreakpoints {
        &self.breakpoints
    }

    fn resolve(&mut self) -> Option<ColumnChange> {
        let width = match self.source {
            ColumnSource::Container => self.container_width,
            ColumnSource::Viewport => self.viewport_width,
        };
        let next = self.breakpoints.columns_for(width);
        if next == self.columns {
            return None;
        }
        let change = ColumnChange {
            from: self.columns,
            to: next,
        };
        self.columns = next;
        mortar_core::debug!(from = change.from, to = change.to, "column count changed");
        Some(change)
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(ColumnBreakpoints::standard(), ColumnSource::Container)
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}
