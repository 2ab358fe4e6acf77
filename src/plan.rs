use tracing::debug;

use crate::config::Config;
use crate::error::PlanError;
use crate::things::ThingRegistry;
use crate::walls::{Wall, derive_walls};

/// An occupied grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
}

impl Room {
    #[inline]
    pub fn cell(&self) -> [i32; 2] {
        [self.x, self.y]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub rooms: usize,
    pub walls: usize,
    pub things: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            rooms: 1024,
            walls: 4096,
            things: 1024,
        }
    }
}

/// Everything the user has drawn: rooms, the walls derived from them and
/// placed things.
pub struct Plan {
    cell_scale: i32,
    limits: Limits,
    rooms: Vec<Room>,
    walls: Vec<Wall>,
    pub things: ThingRegistry,
}

impl Plan {
    pub fn new(cell_scale: i32, limits: Limits) -> Self {
        Self {
            cell_scale,
            limits,
            rooms: Vec::new(),
            walls: Vec::new(),
            things: ThingRegistry::new(limits.things),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cell_scale, config.limits)
    }

    #[inline]
    pub fn cell_scale(&self) -> i32 {
        self.cell_scale
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn find_room(&self, x: i32, y: i32) -> Option<usize> {
        self.rooms.iter().position(|r| r.x == x && r.y == y)
    }

    /// Add a room at cell (x, y) and rebuild the walls.
    pub fn create_room(&mut self, x: i32, y: i32) -> Result<usize, PlanError> {
        if self.find_room(x, y).is_some() {
            return Err(PlanError::RoomExists { x, y });
        }
        if self.rooms.len() >= self.limits.rooms {
            return Err(PlanError::CapacityExceeded {
                what: "room",
                limit: self.limits.rooms,
            });
        }

        self.rooms.push(Room { x, y });
        if let Err(e) = self.recalculate_walls() {
            // walls must always match the rooms, so undo the insertion
            self.rooms.pop();
            return Err(e);
        }
        debug!(x, y, rooms = self.rooms.len(), "room created");
        Ok(self.rooms.len() - 1)
    }

    /// Remove the room at cell (x, y), keeping the order of the others.
    pub fn delete_room(&mut self, x: i32, y: i32) -> Result<Room, PlanError> {
        let index = self
            .find_room(x, y)
            .ok_or(PlanError::RoomNotFound { x, y })?;

        let room = self.rooms.remove(index);
        if let Err(e) = self.recalculate_walls() {
            self.rooms.insert(index, room);
            return Err(e);
        }
        debug!(x, y, rooms = self.rooms.len(), "room deleted");
        Ok(room)
    }

    /// Replace the wall list with a fresh derivation from the rooms.
    /// The old list is kept when the new one would not fit.
    pub fn recalculate_walls(&mut self) -> Result<(), PlanError> {
        self.walls = derive_walls(&self.rooms, self.cell_scale, self.limits.walls)?;
        debug!(
            rooms = self.rooms.len(),
            walls = self.walls.len(),
            "walls recalculated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan::new(32, Limits::default())
    }

    #[test]
    fn create_then_duplicate() {
        let mut plan = plan();
        assert_eq!(plan.create_room(0, 0), Ok(0));
        assert_eq!(plan.walls().len(), 4);

        let walls_before = plan.walls().to_vec();
        assert_eq!(
            plan.create_room(0, 0),
            Err(PlanError::RoomExists { x: 0, y: 0 })
        );
        assert_eq!(plan.rooms().len(), 1);
        assert_eq!(plan.walls(), walls_before.as_slice());
    }

    #[test]
    fn walls_follow_room_mutations() {
        let mut plan = plan();
        plan.create_room(0, 0).unwrap();
        plan.create_room(1, 0).unwrap();
        assert_eq!(plan.walls().len(), 6);

        plan.delete_room(1, 0).unwrap();
        assert_eq!(plan.walls().len(), 4);

        plan.delete_room(0, 0).unwrap();
        assert!(plan.rooms().is_empty());
        assert!(plan.walls().is_empty());
    }

    #[test]
    fn delete_missing_room() {
        let mut plan = plan();
        plan.create_room(2, 3).unwrap();
        assert_eq!(
            plan.delete_room(4, 4),
            Err(PlanError::RoomNotFound { x: 4, y: 4 })
        );
        assert_eq!(plan.rooms().len(), 1);
    }

    #[test]
    fn delete_preserves_order() {
        let mut plan = plan();
        for x in 0..4 {
            plan.create_room(x, 0).unwrap();
        }
        plan.delete_room(1, 0).unwrap();
        let xs: Vec<_> = plan.rooms().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 2, 3]);
        assert_eq!(plan.find_room(3, 0), Some(2));
    }

    #[test]
    fn deleting_root_changes_traversal_start() {
        let mut plan = plan();
        plan.create_room(0, 0).unwrap();
        plan.create_room(5, 5).unwrap();
        plan.create_room(6, 5).unwrap();
        // (5,5)-(6,5) are unreachable from (0,0)
        assert_eq!(plan.walls().len(), 4);

        plan.delete_room(0, 0).unwrap();
        assert_eq!(plan.walls().len(), 6);
    }

    #[test]
    fn room_limit_rejects_insertion() {
        let mut plan = Plan::new(
            32,
            Limits {
                rooms: 2,
                ..Limits::default()
            },
        );
        plan.create_room(0, 0).unwrap();
        plan.create_room(0, 1).unwrap();
        assert_eq!(
            plan.create_room(0, 2),
            Err(PlanError::CapacityExceeded {
                what: "room",
                limit: 2
            })
        );
        assert_eq!(plan.rooms().len(), 2);
    }

    #[test]
    fn wall_limit_rolls_back_room() {
        let mut plan = Plan::new(
            32,
            Limits {
                walls: 4,
                ..Limits::default()
            },
        );
        plan.create_room(0, 0).unwrap();
        assert!(matches!(
            plan.create_room(1, 0),
            Err(PlanError::CapacityExceeded { what: "wall", .. })
        ));
        assert_eq!(plan.rooms().len(), 1);
        assert_eq!(plan.walls().len(), 4);
    }
}
