//! Error types for the simulation.

use crate::{Position, Species};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("Cell {0} is already occupied")]
    CellOccupied(Position),

    #[error("Cell {0} is vacant")]
    CellVacant(Position),

    /// Cells, animal positions and the id index disagree
    #[error("Grid inconsistent: {0}")]
    GridInconsistent(String),

    /// A decision targeted a cell the one-animal-per-cell rule forbids.
    /// The run cannot continue once this is raised.
    #[error("Invariant violated on tick {tick} by {species} at {position}: {reason}")]
    InvariantViolation {
        tick: u64,
        species: Species,
        position: Position,
        reason: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
