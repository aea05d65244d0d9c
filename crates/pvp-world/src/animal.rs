//! Animal state and upkeep.

use pvp_core::{AnimalId, Position, Species, BREED_INTERVAL, MAX_HUNGER};

/// An animal living in a grid cell.
///
/// Predators and prey share one state shape; only predators carry hunger.
/// Identity and location belong to the [`Grid`](crate::Grid) and are
/// read-only from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    id: AnimalId,
    pub species: Species,
    position: Position,
    pub breed_clock: u8,
    /// `Some` for predators, `None` for prey
    pub hunger: Option<u8>,
}

impl Animal {
    pub(crate) fn new(id: AnimalId, species: Species, position: Position) -> Self {
        let hunger = match species {
            Species::Predator => Some(MAX_HUNGER),
            Species::Prey => None,
        };

        Self {
            id,
            species,
            position,
            breed_clock: BREED_INTERVAL,
            hunger,
        }
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_predator(&self) -> bool {
        self.species == Species::Predator
    }

    /// Burn one tick of hunger. Returns true when a predator has starved.
    /// Prey never starve.
    pub fn consume_hunger(&mut self) -> bool {
        match self.hunger.as_mut() {
            Some(hunger) => {
                *hunger = hunger.saturating_sub(1);
                *hunger == 0
            }
            None => false,
        }
    }

    /// Age the breed clock by one tick, stopping at zero.
    ///
    /// Returns whether the animal was breed-ready at the start of the tick,
    /// i.e. the clock had already run out before this decay.
    pub fn decay_breed_clock(&mut self) -> bool {
        let ready = self.breed_clock == 0;
        self.breed_clock = self.breed_clock.saturating_sub(1);
        ready
    }

    pub fn reset_breed_clock(&mut self) {
        self.breed_clock = BREED_INTERVAL;
    }

    pub fn feed(&mut self) {
        if self.is_predator() {
            self.hunger = Some(MAX_HUNGER);
        }
    }

    pub(crate) fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }

    /// A fresh animal of the same species
    pub(crate) fn offspring(&self, id: AnimalId, position: Position) -> Animal {
        Animal::new(id, self.species, position)
    }
}
