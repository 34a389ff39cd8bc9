//! Greedy shelf packing.
//!
//! Rectangles are sorted tallest-first and laid out left to right; when the
//! next padded rectangle would cross `max_width` a new shelf starts below the
//! tallest item of the current one. Single pass, no rotation-for-fit, no
//! compaction: the layout runs once per build and wasted space is cosmetic.

/// Assigned position for one input rectangle. `index` refers back to the
/// caller's slice; placements come out in pack order, not input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfPlacement {
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfLayout {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<ShelfPlacement>,
}

/// Packs `sizes` (w, h pairs) into a sheet of fixed `max_width`, reserving
/// `padding` pixels on every side of every rectangle.
///
/// Caller precondition: `max_width` must be at least the widest rectangle
/// plus `2 * padding`. An oversized rectangle is never rejected or reflowed;
/// it silently overflows the right edge. Callers widen `max_width` up front.
///
/// Deterministic: the sort is stable, so equal-height rectangles keep their
/// input order relative to each other.
pub fn pack_shelves(sizes: &[(u32, u32)], max_width: u32, padding: u32) -> ShelfLayout {
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| sizes[b].1.cmp(&sizes[a].1));

    let mut x = padding;
    let mut y = padding;
    let mut shelf_h = 0u32;
    let mut placements = Vec::with_capacity(sizes.len());

    for index in order {
        let (w, h) = sizes[index];
        let padded_w = w + padding * 2;
        let padded_h = h + padding * 2;
        if x + padded_w > max_width && x > padding {
            x = padding;
            y += shelf_h;
            shelf_h = 0;
        }
        placements.push(ShelfPlacement {
            index,
            x: x + padding,
            y: y + padding,
        });
        x += padded_w;
        shelf_h = shelf_h.max(padded_h);
    }

    ShelfLayout {
        width: max_width,
        height: y + shelf_h,
        placements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_padding_high_sheet() {
        let layout = pack_shelves(&[], 256, 2);
        assert_eq!(layout.width, 256);
        assert_eq!(layout.height, 2);
        assert!(layout.placements.is_empty());
    }

    #[test]
    fn single_rect_sits_inside_padded_cell() {
        let layout = pack_shelves(&[(10, 10)], 64, 2);
        assert_eq!(layout.placements, vec![ShelfPlacement { index: 0, x: 4, y: 4 }]);
        // cursor started at (2, 2); the shelf is 10 + 2*2 tall
        assert_eq!(layout.height, 2 + 14);
    }

    #[test]
    fn taller_rects_pack_first() {
        let layout = pack_shelves(&[(4, 2), (4, 9), (4, 5)], 256, 0);
        let order: Vec<usize> = layout.placements.iter().map(|p| p.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn equal_heights_keep_input_order() {
        let layout = pack_shelves(&[(3, 7), (5, 7), (2, 7), (9, 7)], 1024, 1);
        let order: Vec<usize> = layout.placements.iter().map(|p| p.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn wrap_point_matches_cursor_arithmetic() {
        // 10x10 packs first (taller). Padded widths 12 and 22; cursor 1 -> 13,
        // 13 + 22 > 30 so the 20x5 wraps to a second shelf at y = 1 + 12.
        let layout = pack_shelves(&[(10, 10), (20, 5)], 30, 1);
        assert_eq!(
            layout.placements,
            vec![
                ShelfPlacement { index: 0, x: 2, y: 2 },
                ShelfPlacement { index: 1, x: 2, y: 14 },
            ]
        );
        assert_eq!(layout.width, 30);
        assert_eq!(layout.height, 13 + 7);
    }

    #[test]
    fn no_wrap_while_cursor_on_left_margin() {
        // A lone over-wide rectangle never triggers a new shelf.
        let layout = pack_shelves(&[(50, 5)], 30, 1);
        assert_eq!(layout.placements, vec![ShelfPlacement { index: 0, x: 2, y: 2 }]);
        assert_eq!(layout.height, 1 + 7);
    }
}
