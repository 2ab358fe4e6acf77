//! Placed markers (furniture, spawn points, ...) on the thing grid.

use tracing::debug;

use crate::error::PlanError;
use crate::grid::snap_point_to_cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

impl Facing {
    pub fn from_index(n: usize) -> Self {
        match n % 4 {
            0 => Facing::East,
            1 => Facing::North,
            2 => Facing::West,
            _ => Facing::South,
        }
    }

    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Unit step in screen space (y grows downwards).
    pub fn direction(self) -> [i32; 2] {
        match self {
            Facing::East => [1, 0],
            Facing::North => [0, -1],
            Facing::West => [-1, 0],
            Facing::South => [0, 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing {
    pub flags: u64,
    /// Top-left pixel of the thing's tile, a multiple of the thing scale.
    pub position: [i32; 2],
    pub kind: i32,
    pub facing: Facing,
}

/// Result of a click with the thing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Created(usize),
    Selected(usize),
}

impl Placement {
    pub fn index(self) -> usize {
        match self {
            Placement::Created(i) | Placement::Selected(i) => i,
        }
    }
}

pub struct ThingRegistry {
    things: Vec<Thing>,
    limit: usize,
}

impl ThingRegistry {
    pub fn new(limit: usize) -> Self {
        Self {
            things: Vec::new(),
            limit,
        }
    }

    pub fn all(&self) -> &[Thing] {
        &self.things
    }

    pub fn get(&self, index: usize) -> Option<&Thing> {
        self.things.get(index)
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn find(&self, position: [i32; 2]) -> Option<usize> {
        self.things.iter().position(|t| t.position == position)
    }

    /// Select the thing on the tile under pixel `p`, or put a new one there.
    pub fn place_or_select(&mut self, p: [i32; 2], thing_scale: i32) -> Result<Placement, PlanError> {
        let position = snap_point_to_cell(p, thing_scale);
        if let Some(index) = self.find(position) {
            return Ok(Placement::Selected(index));
        }
        if self.things.len() >= self.limit {
            return Err(PlanError::CapacityExceeded {
                what: "thing",
                limit: self.limit,
            });
        }

        let index = self.things.len();
        self.things.push(Thing {
            flags: 0,
            position,
            kind: 0,
            facing: Facing::from_index(index),
        });
        debug!(index, x = position[0], y = position[1], "thing placed");
        Ok(Placement::Created(index))
    }

    pub fn set_facing(&mut self, selection: Option<usize>, facing: Facing) -> Result<(), PlanError> {
        let index = selection.ok_or(PlanError::NoSelection)?;
        let thing = self
            .things
            .get_mut(index)
            .ok_or(PlanError::ThingNotFound { index })?;
        thing.facing = facing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tile_selects_instead_of_duplicating() {
        let mut reg = ThingRegistry::new(16);
        let first = reg.place_or_select([17, 23], 8).unwrap();
        assert_eq!(first, Placement::Created(0));
        let second = reg.place_or_select([22, 19], 8).unwrap();
        assert_eq!(second, Placement::Selected(0));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(0).unwrap().position, [16, 16]);
    }

    #[test]
    fn default_facing_cycles_with_creation_count() {
        let mut reg = ThingRegistry::new(16);
        for i in 0..5 {
            reg.place_or_select([i * 8 + 4, 4], 8).unwrap();
        }
        let facings: Vec<_> = reg.all().iter().map(|t| t.facing).collect();
        assert_eq!(
            facings,
            vec![
                Facing::East,
                Facing::North,
                Facing::West,
                Facing::South,
                Facing::East
            ]
        );
    }

    #[test]
    fn facing_needs_a_selection() {
        let mut reg = ThingRegistry::new(16);
        reg.place_or_select([0, 0], 8).unwrap();
        assert_eq!(reg.set_facing(None, Facing::North), Err(PlanError::NoSelection));
        assert_eq!(
            reg.set_facing(Some(3), Facing::North),
            Err(PlanError::ThingNotFound { index: 3 })
        );
        reg.set_facing(Some(0), Facing::South).unwrap();
        assert_eq!(reg.get(0).unwrap().facing, Facing::South);
    }

    #[test]
    fn thing_limit() {
        let mut reg = ThingRegistry::new(1);
        reg.place_or_select([0, 0], 8).unwrap();
        assert!(matches!(
            reg.place_or_select([40, 40], 8),
            Err(PlanError::CapacityExceeded { what: "thing", .. })
        ));
        // selecting still works at the limit
        assert_eq!(reg.place_or_select([0, 0], 8), Ok(Placement::Selected(0)));
    }
}
