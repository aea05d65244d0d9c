//! Predator/prey simulation engine.
//!
//! This crate implements the square grid where predators hunt, starve and
//! breed while prey move and breed, one decision per animal per tick.

pub mod animal;
pub mod behavior;
pub mod grid;
pub mod simulation;
pub mod snapshot;

pub use animal::Animal;
pub use behavior::Action;
pub use grid::{Grid, Survey};
pub use simulation::{RunState, Simulation};
pub use snapshot::Snapshot;
