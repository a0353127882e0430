#![forbid(unsafe_code)]

//! Loading placeholder layout.
//!
//! While the first batch is still loading the gallery shows grey blocks of
//! fixed, varied heights packed with the same column rules as real items.

use crate::masonry::{MasonryLayout, MasonryParams, Packer};

/// Placeholder heights in pixels, used in order.
pub const SKELETON_HEIGHTS: [f32; 16] = [
    192.0, 256.0, 160.0, 224.0, 240.0, 176.0, 208.0, 272.0, 144.0, 288.0, 200.0, 232.0, 168.0,
    264.0, 184.0, 248.0,
];

/// Pack up to `count` placeholders (at most [`SKELETON_HEIGHTS`]`.len()`).
///
/// Returns an empty layout when the container has no usable width.
pub fn skeleton_layout(params: &MasonryParams, count: usize) -> MasonryLayout {
    if !params.is_measurable() {
        return MasonryLayout::empty();
    }
    let mut packer = Packer::new(*params);
    for height in SKELETON_HEIGHTS.iter().take(count) {
        packer.push_height(*height);
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_capped() {
        let layout = skeleton_layout(&MasonryParams::new(3, 900.0), 40);
        assert_eq!(layout.len(), SKELETON_HEIGHTS.len());
    }

    #[test]
    fn heights_are_fixed_regardless_of_width() {
        let narrow = skeleton_layout(&MasonryParams::new(2, 400.0), 4);
        let wide = skeleton_layout(&MasonryParams::new(2, 1600.0), 4);
        for (a, b) in narrow.slots().iter().zip(wide.slots()) {
            assert_eq!(a.rect.height, b.rect.height);
        }
    }

    #[test]
    fn placeholders_fill_shortest_column() {
        let layout = skeleton_layout(&MasonryParams::new(2, 412.0), 3);
        // 192 in col 0, 256 in col 1, then 160 goes under the 192.
        assert_eq!(layout.slots()[2].column, 0);
        assert_eq!(layout.slots()[2].rect.y, 204.0);
    }

    #[test]
    fn unmeasured_container_is_empty() {
        assert!(skeleton_layout(&MasonryParams::new(2, 0.0), 8).is_empty());
    }
}
