#![forbid(unsafe_code)]

//! Shortest-column-first masonry packing.
//!
//! Items are placed in order. Each goes into the column whose running
//! height is currently smallest; ties go to the leftmost column. Item
//! height follows the column width and the item's aspect ratio
//! (height per unit width), clamped to a sane range.
//!
//! # Invariants
//!
//! 1. `column_width = max((W - (C - 1) * G) / C, 1)`.
//! 2. Slot `x = column * (column_width + G)`, `y` = the column's height
//!    before placement.
//! 3. `height = max(column_width * clamp(aspect), MIN_ITEM_HEIGHT)`.
//! 4. Packing a prefix of a list produces exactly the first slots of packing
//!    the full list. Appending never moves placed items.
//! 5. Slots in the same column never overlap.
//!
//! # Failure Modes
//!
//! - Zero or non-finite container width: [`pack`] returns an empty layout.
//! - Zero columns: treated as one column.
//! - NaN aspect: treated as [`MIN_ASPECT`]; infinite aspect clamps to the
//!   nearest bound.

use mortar_core::geometry::Rect;

/// Default gap between columns and between stacked items, in pixels.
pub const DEFAULT_GAP: f32 = 12.0;
/// Smallest aspect (height per unit width) used for layout.
pub const MIN_ASPECT: f32 = 0.25;
/// Largest aspect (height per unit width) used for layout.
pub const MAX_ASPECT: f32 = 3.0;
/// Absolute floor on an item's height.
pub const MIN_ITEM_HEIGHT: f32 = 80.0;
/// Space added below the tallest column.
pub const BOTTOM_PADDING: f32 = 20.0;

const MIN_COLUMN_WIDTH: f32 = 1.0;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Inputs of one packing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasonryParams {
    /// Number of columns (treated as at least 1).
    pub columns: usize,
    /// Container width in pixels.
    pub container_width: f32,
    /// Horizontal and vertical gap.
    pub gap: f32,
    /// Lower aspect clamp.
    pub min_aspect: f32,
    /// Upper aspect clamp.
    pub max_aspect: f32,
    /// Height floor.
    pub min_item_height: f32,
    /// Padding added to the content height when any item is placed.
    pub bottom_padding: f32,
}

impl MasonryParams {
    /// Parameters with the default gap, clamps and padding.
    pub fn new(columns: usize, container_width: f32) -> Self {
        Self {
            columns: columns.max(1),
            container_width,
            gap: DEFAULT_GAP,
            min_aspect: MIN_ASPECT,
            max_aspect: MAX_ASPECT,
            min_item_height: MIN_ITEM_HEIGHT,
            bottom_padding: BOTTOM_PADDING,
        }
    }

    /// Set the gap.
    #[must_use]
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Set the aspect clamp range.
    #[must_use]
    pub fn aspect_range(mut self, min: f32, max: f32) -> Self {
        self.min_aspect = min;
        self.max_aspect = max;
        self
    }

    /// Set the height floor.
    #[must_use]
    pub fn min_item_height(mut self, height: f32) -> Self {
        self.min_item_height = height.max(0.0);
        self
    }

    /// Set the bottom padding.
    #[must_use]
    pub fn bottom_padding(mut self, padding: f32) -> Self {
        self.bottom_padding = padding.max(0.0);
        self
    }

    /// Whether the container has a usable width.
    pub fn is_measurable(&self) -> bool {
        self.container_width.is_finite() && self.container_width > 0.0
    }

    /// Width of one column.
    pub fn column_width(&self) -> f32 {
        let columns = self.columns.max(1) as f32;
        let width = (self.container_width - (columns - 1.0) * self.gap) / columns;
        if width.is_finite() {
            width.max(MIN_COLUMN_WIDTH)
        } else {
            MIN_COLUMN_WIDTH
        }
    }

    /// Clamp an aspect into the configured range.
    pub fn clamp_aspect(&self, aspect: f32) -> f32 {
        let (lo, hi) = if self.min_aspect <= self.max_aspect {
            (self.min_aspect, self.max_aspect)
        } else {
            (self.max_aspect, self.min_aspect)
        };
        if aspect.is_nan() {
            lo
        } else {
            aspect.clamp(lo, hi)
        }
    }

    /// Height of an item with `aspect` at the given column width.
    pub fn item_height(&self, column_width: f32, aspect: f32) -> f32 {
        (column_width * self.clamp_aspect(aspect)).max(self.min_item_height)
    }
}

impl Default for MasonryParams {
    fn default() -> Self {
        Self::new(1, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Slots and layout
// ---------------------------------------------------------------------------

/// Where one item landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Column index.
    pub column: usize,
    /// Position and size in container pixels.
    pub rect: Rect,
}

/// Result of a packing pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MasonryLayout {
    slots: Vec<Slot>,
    column_width: f32,
    column_heights: Vec<f32>,
    content_height: f32,
}

impl MasonryLayout {
    /// Layout with no slots and zero height.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Slots in input order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot for the item at `index`.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Column width used for every slot.
    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Final running height per column, gaps included.
    pub fn column_heights(&self) -> &[f32] {
        &self.column_heights
    }

    /// Height the container needs, or 0 with no items.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }
}

// ---------------------------------------------------------------------------
// Packer
// ---------------------------------------------------------------------------

/// Incremental packer holding the per-column accumulators.
///
/// Pushing items one by one gives the same slots as [`pack`] over the whole
/// list, so callers can append a batch without repacking earlier items.
#[derive(Debug, Clone)]
pub struct Packer {
    params: MasonryParams,
    column_width: f32,
    heights: Vec<f32>,
    slots: Vec<Slot>,
}

impl Packer {
    /// Start an empty packing pass.
    pub fn new(params: MasonryParams) -> Self {
        let columns = params.columns.max(1);
        Self {
            column_width: params.column_width(),
            heights: vec![0.0; columns],
            slots: Vec::new(),
            params,
        }
    }

    /// Place an item with the given aspect.
    pub fn push(&mut self, aspect: f32) -> Slot {
        let height = self.params.item_height(self.column_width, aspect);
        self.place(height)
    }

    /// Place an item with a fixed pixel height (clamped only to be non-negative).
    pub fn push_height(&mut self, height: f32) -> Slot {
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.place(height)
    }

    fn place(&mut self, height: f32) -> Slot {
        let column = self.shortest_column();
        let x = column as f32 * (self.column_width + self.params.gap);
        let y = self.heights[column];
        self.heights[column] = y + height + self.params.gap;
        let slot = Slot {
            column,
            rect: Rect::new(x, y, self.column_width, height),
        };
        self.slots.push(slot);
        slot
    }

    /// Index of the shortest column; ties go to the lowest index.
    pub fn shortest_column(&self) -> usize {
        let mut best = 0;
        for (i, h) in self.heights.iter().enumerate().skip(1) {
            if *h < self.heights[best] {
                best = i;
            }
        }
        best
    }

    /// Running height per column.
    pub fn column_heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Number of items placed so far.
    pub fn placed(&self) -> usize {
        self.slots.len()
    }

    /// Container height for what has been placed.
    pub fn content_height(&self) -> f32 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.heights.iter().copied().fold(0.0, f32::max) + self.params.bottom_padding
    }

    /// Finish the pass.
    pub fn finish(self) -> MasonryLayout {
        let content_height = self.content_height();
        MasonryLayout {
            slots: self.slots,
            column_width: self.column_width,
            column_heights: self.heights,
            content_height,
        }
    }
}

/// Pack items with the given aspects.
///
/// Returns an empty layout when the container has no usable width.
pub fn pack<I>(params: &MasonryParams, aspects: I) -> MasonryLayout
where
    I: IntoIterator<Item = f32>,
{
    if !params.is_measurable() {
        return MasonryLayout::empty();
    }
    let span = mortar_core::debug_span!(
        "masonry.layout",
        columns = params.columns,
        width = params.container_width
    );
    let _guard = span.enter();

    let mut packer = Packer::new(*params);
    for aspect in aspects {
        packer.push(aspect);
    }
    let layout = packer.finish();
    mortar_core::trace!(
        items = layout.len(),
        content_height = layout.content_height(),
        "packed"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_1204() -> MasonryParams {
        MasonryParams::new(4, 1204.0)
    }

    #[test]
    fn column_width_subtracts_gaps() {
        assert_eq!(params_1204().column_width(), 292.0);
        assert_eq!(MasonryParams::new(1, 500.0).column_width(), 500.0);
    }

    #[test]
    fn column_width_floors_at_one() {
        assert_eq!(MasonryParams::new(5, 10.0).column_width(), 1.0);
    }

    #[test]
    fn square_items_fill_columns_left_to_right() {
        let layout = pack(&params_1204(), [1.0; 5]);
        let xs: Vec<f32> = layout.slots().iter().map(|s| s.rect.x).collect();
        assert_eq!(xs, vec![0.0, 304.0, 608.0, 912.0, 0.0]);
        let cols: Vec<usize> = layout.slots().iter().map(|s| s.column).collect();
        assert_eq!(cols, vec![0, 1, 2, 3, 0]);
        assert_eq!(layout.slots()[4].rect.y, 304.0);
        assert_eq!(layout.slots()[4].rect.height, 292.0);
    }

    #[test]
    fn shortest_column_wins() {
        // Column 0 gets a tall item, so the next two go right of it.
        let layout = pack(&MasonryParams::new(2, 212.0), [2.0, 0.5, 0.5, 0.5]);
        let cols: Vec<usize> = layout.slots().iter().map(|s| s.column).collect();
        assert_eq!(cols, vec![0, 1, 1, 1]);
        // 100 wide column, heights 200 / 80 (floored) each.
        assert_eq!(layout.slots()[2].rect.y, 92.0);
    }

    #[test]
    fn extreme_aspects_are_clamped() {
        let layout = pack(&MasonryParams::new(1, 400.0), [100.0, 0.001]);
        assert_eq!(layout.slots()[0].rect.height, 1200.0);
        assert_eq!(layout.slots()[1].rect.height, 100.0);
    }

    #[test]
    fn height_floor_applies_to_narrow_columns() {
        let layout = pack(&MasonryParams::new(1, 200.0), [0.25]);
        assert_eq!(layout.slots()[0].rect.height, MIN_ITEM_HEIGHT);
    }

    #[test]
    fn nan_aspect_uses_lower_bound() {
        let params = MasonryParams::new(1, 1000.0);
        assert_eq!(params.clamp_aspect(f32::NAN), MIN_ASPECT);
        assert_eq!(params.clamp_aspect(f32::INFINITY), MAX_ASPECT);
    }

    #[test]
    fn empty_input_has_zero_height() {
        let layout = pack(&params_1204(), std::iter::empty());
        assert!(layout.is_empty());
        assert_eq!(layout.content_height(), 0.0);
        assert_eq!(layout.column_width(), 292.0);
    }

    #[test]
    fn zero_width_produces_nothing() {
        let layout = pack(&MasonryParams::new(3, 0.0), [1.0; 4]);
        assert!(layout.is_empty());
        assert_eq!(layout.content_height(), 0.0);
    }

    #[test]
    fn content_height_adds_padding() {
        let layout = pack(&MasonryParams::new(2, 212.0), [1.0, 1.0, 1.0]);
        // Column 0: 100 + 12 + 100 + 12 = 224.
        assert_eq!(layout.column_heights(), &[224.0, 112.0]);
        assert_eq!(layout.content_height(), 244.0);
    }

    #[test]
    fn incremental_matches_full_pack() {
        let aspects = [0.7, 1.3, 0.4, 2.2, 1.0, 0.9, 1.8];
        let full = pack(&params_1204(), aspects);
        let mut packer = Packer::new(params_1204());
        for (i, a) in aspects.iter().enumerate() {
            assert_eq!(packer.push(*a), full.slots()[i]);
        }
        assert_eq!(packer.finish(), full);
    }

    #[test]
    fn zero_columns_behave_as_one() {
        let mut params = MasonryParams::new(1, 300.0);
        params.columns = 0;
        let layout = pack(&params, [1.0, 1.0]);
        assert!(layout.slots().iter().all(|s| s.column == 0));
        assert_eq!(layout.slots()[1].rect.y, 312.0);
    }

    #[test]
    fn push_height_ignores_aspect_rules() {
        let mut packer = Packer::new(MasonryParams::new(2, 212.0));
        let slot = packer.push_height(30.0);
        assert_eq!(slot.rect.height, 30.0);
        assert_eq!(packer.column_heights(), &[42.0, 0.0]);
        assert_eq!(packer.shortest_column(), 1);
    }
}
