//! Read-only views of the grid for renderers.

use crate::grid::Grid;
use pvp_core::{Position, Species};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker rendered for a vacant cell
pub const VACANT_MARKER: char = '.';

/// Grid contents and population counts at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks completed when the snapshot was taken; 0 is the initial state
    pub tick: u64,
    pub size: usize,
    /// Cell contents in scan order (`x` outer, `y` inner)
    pub cells: Vec<Option<Species>>,
    pub predators: usize,
    pub prey: usize,
}

impl Snapshot {
    pub fn capture(tick: u64, grid: &Grid) -> Self {
        let (predators, prey) = grid.counts();
        Self {
            tick,
            size: grid.size(),
            cells: grid
                .iter()
                .map(|(_, cell)| cell.map(|animal| animal.species))
                .collect(),
            predators,
            prey,
        }
    }

    pub fn species_at(&self, pos: Position) -> Option<Species> {
        let size = self.size as i64;
        let x = i64::from(pos.x);
        let y = i64::from(pos.y);
        if !(0..size).contains(&x) || !(0..size).contains(&y) {
            return None;
        }
        self.cells
            .get(pos.x as usize * self.size + pos.y as usize)
            .copied()
            .flatten()
    }

    /// Population line shown under each frame
    pub fn census(&self) -> String {
        format!("PREDATORS: {} PREY: {}", self.predators, self.prey)
    }

    /// Text picture of the grid.
    ///
    /// The top line is the highest `y`; columns run left to right by `x`.
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.size * (self.size * 3 + 1));

        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let marker = self
                    .species_at(Position::new(x as i32, y as i32))
                    .map_or(VACANT_MARKER, |species| species.marker());
                output.push_str(&format!("{:^2} ", marker));
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.render(), self.census())
    }
}
