//! Boundary wall derivation.
//!
//! Walls are never edited directly. Whenever the room set changes the whole
//! wall list is rebuilt by walking the rooms 4-connected to room 0 and
//! emitting one segment for every side that faces an empty cell. Rooms not
//! connected to room 0 are never visited and get no walls.

use rustc_hash::FxHashMap;

use crate::error::PlanError;
use crate::plan::Room;

/// Length in pixels of the normal indicator drawn off each wall.
pub const NORMAL_LENGTH: i32 = 4;

/// A derived boundary segment between an occupied and an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    /// Endpoints in grid-node coordinates. The order fixes the normal's side.
    pub a: [i32; 2],
    pub b: [i32; 2],
    /// Pixel midpoint of the segment.
    pub normal_origin: [i32; 2],
    /// Pixel offset along the segment, scaled to `NORMAL_LENGTH`.
    pub normal_delta: [i32; 2],
}

impl Wall {
    pub fn new(a: [i32; 2], b: [i32; 2], cell_scale: i32) -> Self {
        let (x0, y0) = (a[0] * cell_scale, a[1] * cell_scale);
        let (x1, y1) = (b[0] * cell_scale, b[1] * cell_scale);
        let (dx, dy) = (x0 - x1, y0 - y1);
        let length = ((dx as f64).powi(2) + (dy as f64).powi(2)).sqrt() as i32;
        let normal_delta = if length == 0 {
            [0, 0]
        } else {
            [NORMAL_LENGTH * dx / length, NORMAL_LENGTH * dy / length]
        };
        Self {
            a,
            b,
            normal_origin: [(x0 + x1) / 2, (y0 + y1) / 2],
            normal_delta,
        }
    }

    /// Pixel endpoint of the normal indicator, perpendicular to the segment.
    #[inline]
    pub fn normal_tip(&self) -> [i32; 2] {
        [
            self.normal_origin[0] - self.normal_delta[1],
            self.normal_origin[1] + self.normal_delta[0],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    North,
    South,
    West,
    East,
}

const SIDES: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

impl Side {
    fn neighbour(self, [cx, cy]: [i32; 2]) -> [i32; 2] {
        match self {
            Side::North => [cx, cy - 1],
            Side::South => [cx, cy + 1],
            Side::West => [cx - 1, cy],
            Side::East => [cx + 1, cy],
        }
    }

    /// Shared edge between the cell and its neighbour on this side.
    fn edge(self, [cx, cy]: [i32; 2]) -> ([i32; 2], [i32; 2]) {
        match self {
            Side::North => ([cx + 1, cy], [cx, cy]),
            Side::South => ([cx, cy + 1], [cx + 1, cy + 1]),
            Side::West => ([cx, cy], [cx, cy + 1]),
            Side::East => ([cx + 1, cy + 1], [cx + 1, cy]),
        }
    }
}

/// Rebuild the wall list for `rooms`, walking from room 0.
///
/// Fails without producing a partial list when more than `max_walls` walls
/// would be needed.
pub fn derive_walls(
    rooms: &[Room],
    cell_scale: i32,
    max_walls: usize,
) -> Result<Vec<Wall>, PlanError> {
    let mut walls = Vec::new();
    if rooms.is_empty() {
        return Ok(walls);
    }

    // First room wins for each cell, same as a linear scan would.
    let mut lookup: FxHashMap<[i32; 2], usize> = FxHashMap::default();
    for (i, room) in rooms.iter().enumerate().rev() {
        lookup.insert(room.cell(), i);
    }

    let mut visited = vec![false; rooms.len()];
    // Each frame is (room index, next side to look at). Walking the sides in
    // order and descending into a neighbour before the next side gives the
    // same wall order as a plain recursive walk.
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    visited[0] = true;

    while let Some(frame) = stack.last_mut() {
        let (index, side_cursor) = *frame;
        if side_cursor == SIDES.len() {
            stack.pop();
            continue;
        }
        frame.1 += 1;

        let side = SIDES[side_cursor];
        let cell = rooms[index].cell();
        match lookup.get(&side.neighbour(cell)) {
            None => {
                if walls.len() == max_walls {
                    return Err(PlanError::CapacityExceeded {
                        what: "wall",
                        limit: max_walls,
                    });
                }
                let (a, b) = side.edge(cell);
                walls.push(Wall::new(a, b, cell_scale));
            }
            Some(&next) => {
                // mark before descending so two neighbours never re-enter each other
                if !visited[next] {
                    visited[next] = true;
                    stack.push((next, 0));
                }
            }
        }
    }

    Ok(walls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms(cells: &[[i32; 2]]) -> Vec<Room> {
        cells.iter().map(|&[x, y]| Room { x, y }).collect()
    }

    fn derive(cells: &[[i32; 2]]) -> Vec<Wall> {
        derive_walls(&rooms(cells), 32, 4096).unwrap()
    }

    #[test]
    fn no_rooms_no_walls() {
        assert!(derive(&[]).is_empty());
    }

    #[test]
    fn single_room_is_a_unit_square() {
        let walls = derive(&[[0, 0]]);
        let edges: Vec<_> = walls.iter().map(|w| (w.a, w.b)).collect();
        assert_eq!(
            edges,
            vec![
                ([1, 0], [0, 0]),
                ([0, 1], [1, 1]),
                ([0, 0], [0, 1]),
                ([1, 1], [1, 0]),
            ]
        );
    }

    #[test]
    fn adjacent_rooms_share_no_wall() {
        let walls = derive(&[[0, 0], [1, 0]]);
        assert_eq!(walls.len(), 6);
        // the shared edge x = 1, y in 0..1 is absent in both orientations
        assert!(!walls.iter().any(|w| w.a[0] == 1 && w.b[0] == 1));
    }

    #[test]
    fn disconnected_rooms_get_no_walls() {
        let walls = derive(&[[0, 0], [5, 5]]);
        assert_eq!(walls.len(), 4);
        assert!(walls.iter().all(|w| w.a[0] <= 1 && w.a[1] <= 1));

        // only the component containing room 0 is walked
        let walls = derive(&[[5, 5], [0, 0], [1, 0]]);
        assert_eq!(walls.len(), 4);
    }

    /// Distinct cells in a small area, so most sets have adjacent rooms.
    fn random_cells(seed: &mut u64, count: usize) -> Vec<[i32; 2]> {
        let mut next = || {
            // xorshift64
            *seed ^= *seed << 13;
            *seed ^= *seed >> 7;
            *seed ^= *seed << 17;
            (*seed % 8) as i32 - 2
        };
        let mut cells = Vec::new();
        while cells.len() < count {
            let cell = [next(), next()];
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }

    #[test]
    fn derivation_is_idempotent() {
        let cells = [[2, 2], [2, 3], [3, 3], [4, 3], [4, 2], [9, 9], [3, 4]];
        assert_eq!(derive(&cells), derive(&cells));

        let mut seed = 0x9E37_79B9_7F4A_7C15;
        for round in 0..200 {
            let cells = random_cells(&mut seed, 1 + round % 40);
            let first = derive(&cells);
            assert_eq!(first, derive(&cells), "room set {cells:?}");
            assert!(first.len() <= 4 * cells.len());
        }
    }

    #[test]
    fn ring_of_rooms_walls_inner_and_outer_edges() {
        // 3x3 block with the middle missing
        let mut cells = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    cells.push([x, y]);
                }
            }
        }
        let walls = derive(&cells);
        assert_eq!(walls.len(), 12 + 4);
    }

    #[test]
    fn normals_are_truncated_and_perpendicular() {
        let walls = derive(&[[0, 0]]);
        let north = walls[0];
        assert_eq!(north.normal_origin, [16, 0]);
        assert_eq!(north.normal_delta, [4, 0]);
        assert_eq!(north.normal_tip(), [16, 4]);

        let east = walls[3];
        assert_eq!(east.normal_origin, [32, 16]);
        assert_eq!(east.normal_delta, [0, 4]);
        assert_eq!(east.normal_tip(), [28, 16]);
    }

    #[test]
    fn zero_length_segment_has_no_normal() {
        let wall = Wall::new([1, 1], [1, 1], 32);
        assert_eq!(wall.normal_delta, [0, 0]);
    }

    #[test]
    fn wall_limit_is_reported() {
        let err = derive_walls(&rooms(&[[0, 0], [1, 0]]), 32, 5).unwrap_err();
        assert_eq!(
            err,
            PlanError::CapacityExceeded {
                what: "wall",
                limit: 5
            }
        );
    }
}
