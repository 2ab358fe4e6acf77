//! Pixel, cell and thing-space coordinate conversions.
//!
//! Rooms live on a grid of `cell_scale` pixel cells, things on a finer grid
//! of `cell_scale / 4`. Both use the same snapping rules with a different
//! scale argument.

/// Scale used when none is configured.
pub const DEFAULT_CELL_SCALE: i32 = 32;

#[inline]
pub fn thing_scale(cell_scale: i32) -> i32 {
    (cell_scale / 4).max(1)
}

/// Round to the nearest multiple of `scale`, ties going up.
#[inline]
pub fn snap_to_nearest_node(value: i32, scale: i32) -> i32 {
    // floor(value / scale + 0.5) * scale, without going through floats
    (2 * value + scale).div_euclid(2 * scale) * scale
}

/// Top-left corner of the `scale` sized tile containing `value`.
#[inline]
pub fn snap_to_nearest_cell(value: i32, scale: i32) -> i32 {
    snap_to_nearest_node(value - scale / 2, scale)
}

#[inline]
pub fn pixel_to_cell(value: i32, scale: i32) -> i32 {
    snap_to_nearest_cell(value, scale) / scale
}

#[inline]
pub fn snap_point_to_cell(p: [i32; 2], scale: i32) -> [i32; 2] {
    [
        snap_to_nearest_cell(p[0], scale),
        snap_to_nearest_cell(p[1], scale),
    ]
}

#[inline]
pub fn point_to_cell(p: [i32; 2], scale: i32) -> [i32; 2] {
    [pixel_to_cell(p[0], scale), pixel_to_cell(p[1], scale)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_snap_rounds_half_up() {
        assert_eq!(snap_to_nearest_node(15, 32), 0);
        assert_eq!(snap_to_nearest_node(16, 32), 32);
        assert_eq!(snap_to_nearest_node(47, 32), 32);
        assert_eq!(snap_to_nearest_node(48, 32), 64);
        assert_eq!(snap_to_nearest_node(-16, 32), 0);
        assert_eq!(snap_to_nearest_node(-17, 32), -32);
    }

    #[test]
    fn cell_snap_keeps_boundary_and_center() {
        // exactly on a boundary
        assert_eq!(snap_to_nearest_cell(64, 32), 64);
        // center of the cell [64, 96)
        assert_eq!(snap_to_nearest_cell(80, 32), 64);
        assert_eq!(snap_to_nearest_cell(95, 32), 64);
        assert_eq!(snap_to_nearest_cell(0, 32), 0);
        assert_eq!(snap_to_nearest_cell(31, 32), 0);
    }

    #[test]
    fn pixel_to_cell_uses_tile_index() {
        assert_eq!(pixel_to_cell(0, 32), 0);
        assert_eq!(pixel_to_cell(33, 32), 1);
        assert_eq!(pixel_to_cell(1023, 32), 31);
        assert_eq!(point_to_cell([100, 70], 32), [3, 2]);
    }

    #[test]
    fn thing_scale_snapping() {
        let s = thing_scale(DEFAULT_CELL_SCALE);
        assert_eq!(s, 8);
        assert_eq!(snap_point_to_cell([17, 23], s), [16, 16]);
        assert_eq!(snap_point_to_cell([24, 8], s), [24, 8]);
    }
}
