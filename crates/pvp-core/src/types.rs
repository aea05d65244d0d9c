//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hunger a predator starts with, and returns to after eating
pub const MAX_HUNGER: u8 = 5;

/// Ticks an animal waits between breeding attempts
pub const BREED_INTERVAL: u8 = 3;

/// Unique identifier for an animal, assigned by the grid in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub u64);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position on the grid.
///
/// `x` is the column and `y` the row, with `y` growing upward when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions around a cell.
///
/// [`Direction::all`] yields them in survey order: a clockwise sweep
/// starting from the west.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::West,
            Direction::NorthWest,
            Direction::North,
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
        ]
    }
}

/// The two kinds of animal living on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Predator,
    Prey,
}

impl Species {
    /// Single-character marker used when rendering the grid
    pub fn marker(&self) -> char {
        match self {
            Species::Predator => '1',
            Species::Prey => '0',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Predator => "predator",
            Species::Prey => "prey",
        }
    }

    /// The species that follows this one when seeding alternates
    pub fn other(&self) -> Species {
        match self {
            Species::Predator => Species::Prey,
            Species::Prey => Species::Predator,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (0, 1));
        assert_eq!(Direction::South.to_delta(), (0, -1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
    }

    #[test]
    fn test_directions_are_distinct_unit_offsets() {
        let origin = Position::new(5, 5);
        let targets: HashSet<Position> = Direction::all()
            .iter()
            .map(|d| origin.step(*d))
            .collect();

        assert_eq!(targets.len(), 8);
        assert!(!targets.contains(&origin));
        for target in &targets {
            let (dx, dy) = (target.x - origin.x, target.y - origin.y);
            assert_eq!(dx.abs().max(dy.abs()), 1);
        }
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let pairs = [
            (Direction::North, Direction::South),
            (Direction::East, Direction::West),
            (Direction::NorthEast, Direction::SouthWest),
            (Direction::NorthWest, Direction::SouthEast),
        ];
        let origin = Position::new(0, 0);
        for (a, b) in pairs {
            assert_eq!(origin.step(a).step(b), origin);
        }
    }

    #[test]
    fn test_species_markers() {
        assert_eq!(Species::Predator.marker(), '1');
        assert_eq!(Species::Prey.marker(), '0');
        assert_eq!(Species::Predator.other(), Species::Prey);
        assert_eq!(Species::Prey.to_string(), "prey");
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, -1).to_string(), "(3, -1)");
    }
}
