//! Square occupancy grid.

use crate::animal::Animal;
use pvp_core::{AnimalId, Direction, Error, Position, Result, Species};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Neighboring cells around a position, classified by occupant.
///
/// Each list keeps the survey order of [`Direction::all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    pub preys: Vec<Position>,
    pub preds: Vec<Position>,
    pub vacant: Vec<Position>,
}

/// A bounded square grid where each cell holds at most one animal.
///
/// The grid is the only owner of animal state. Cells are stored with `x` as
/// the outer index, which is also the order the tick driver scans them in.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Animal>>,
    locations: HashMap<AnimalId, Position>,
    next_id: u64,
}

impl Grid {
    /// An empty `size` x `size` grid.
    ///
    /// Fails when the side does not fit a coordinate or the cell storage
    /// cannot be allocated.
    pub fn new(size: usize) -> Result<Self> {
        let capacity = Self::cell_count(size)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|e| {
            Error::Validation(format!("Cannot allocate a {}x{} grid: {}", size, size, e))
        })?;
        cells.resize(capacity, None);

        Ok(Self {
            size,
            cells,
            locations: HashMap::new(),
            next_id: 0,
        })
    }

    /// Number of cells in a grid of side `size`
    pub fn cell_count(size: usize) -> Result<usize> {
        if i32::try_from(size).is_err() {
            return Err(Error::Validation(format!(
                "Grid size {} exceeds the coordinate range",
                size
            )));
        }
        size.checked_mul(size)
            .ok_or_else(|| Error::Validation(format!("Grid size {} has too many cells", size)))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Number of live animals
    pub fn population(&self) -> usize {
        self.locations.len()
    }

    /// Whether both coordinates fall inside `[0, size)`
    pub fn place_exists(&self, pos: Position) -> bool {
        let size = self.size as i64;
        (0..size).contains(&i64::from(pos.x)) && (0..size).contains(&i64::from(pos.y))
    }

    /// Animal at a position; `None` for vacant or out-of-bounds cells
    pub fn get(&self, pos: Position) -> Option<&Animal> {
        let index = self.index_of(pos)?;
        self.cells[index].as_ref()
    }

    /// Mutable access to an animal's upkeep state
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Animal> {
        let index = self.index_of(pos)?;
        self.cells[index].as_mut()
    }

    pub fn is_vacant(&self, pos: Position) -> bool {
        self.index_of(pos).is_some_and(|i| self.cells[i].is_none())
    }

    pub fn species_at(&self, pos: Position) -> Option<Species> {
        self.get(pos).map(|animal| animal.species)
    }

    /// Current position of a live animal
    pub fn position_of(&self, id: AnimalId) -> Option<Position> {
        self.locations.get(&id).copied()
    }

    /// Place a new animal on a vacant cell
    pub fn insert(&mut self, species: Species, pos: Position) -> Result<AnimalId> {
        let index = self.vacant_index(pos)?;
        let id = self.allocate_id();
        self.cells[index] = Some(Animal::new(id, species, pos));
        self.locations.insert(id, pos);
        Ok(id)
    }

    /// Seed the grid with `population` animals on random vacant cells.
    ///
    /// Species alternate, starting with a predator, so the split is as even
    /// as the count allows.
    pub fn populate<R: Rng + ?Sized>(&mut self, population: usize, rng: &mut R) -> Result<()> {
        let free = self.capacity() - self.population();
        if population > free {
            return Err(Error::Validation(format!(
                "Population {} does not fit in {} vacant cells",
                population, free
            )));
        }

        let mut species = Species::Predator;
        for _ in 0..population {
            let vacant: Vec<Position> = self
                .positions()
                .filter(|pos| self.is_vacant(*pos))
                .collect();
            let pos = *vacant
                .choose(rng)
                .ok_or_else(|| Error::Validation("No vacant cell left to seed".to_string()))?;
            self.insert(species, pos)?;
            species = species.other();
        }

        Ok(())
    }

    /// Classify the in-bounds neighbors of a position
    pub fn survey(&self, pos: Position) -> Survey {
        let mut survey = Survey::default();

        for direction in Direction::all() {
            let neighbor = pos.step(direction);
            if !self.place_exists(neighbor) {
                continue;
            }

            match self.species_at(neighbor) {
                Some(Species::Prey) => survey.preys.push(neighbor),
                Some(Species::Predator) => survey.preds.push(neighbor),
                None => survey.vacant.push(neighbor),
            }
        }

        survey
    }

    /// Relocate the animal at `from` onto the vacant cell `to`
    pub fn move_animal(&mut self, from: Position, to: Position) -> Result<()> {
        let target = self.vacant_index(to)?;
        let source = self.occupied_index(from)?;

        let mut animal = self.cells[source].take().ok_or(Error::CellVacant(from))?;
        animal.move_to(to);
        self.locations.insert(animal.id(), to);
        self.cells[target] = Some(animal);
        Ok(())
    }

    /// Create an offspring of the animal at `parent` on the vacant cell `at`
    /// and reset the parent's breed clock
    pub fn spawn(&mut self, parent: Position, at: Position) -> Result<AnimalId> {
        let target = self.vacant_index(at)?;
        let source = self.occupied_index(parent)?;
        let id = self.allocate_id();

        let parent_animal = self.cells[source].as_mut().ok_or(Error::CellVacant(parent))?;
        parent_animal.reset_breed_clock();
        let child = parent_animal.offspring(id, at);

        self.cells[target] = Some(child);
        self.locations.insert(id, at);
        Ok(id)
    }

    /// Clear an occupied cell, returning the animal that lived there
    pub fn remove(&mut self, at: Position) -> Result<Animal> {
        let index = self.occupied_index(at)?;
        let animal = self.cells[index].take().ok_or(Error::CellVacant(at))?;
        self.locations.remove(&animal.id());
        Ok(animal)
    }

    /// Live animals per species as `(predators, prey)`, by full scan
    pub fn counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(preds, preys), animal| match animal.species {
                Species::Predator => (preds + 1, preys),
                Species::Prey => (preds, preys + 1),
            })
    }

    /// Ids of all live animals in scan order
    pub fn scan_order(&self) -> Vec<AnimalId> {
        self.cells.iter().flatten().map(Animal::id).collect()
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index / self.size) as i32;
        let y = (index % self.size) as i32;
        Position::new(x, y)
    }

    /// Iterator over all positions in scan order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions, in scan order
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&Animal>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell.as_ref()))
    }

    /// Verify that every occupied cell's animal records that cell as its
    /// position, that the id index agrees with the cells and that only
    /// predators carry hunger
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = 0;

        for (pos, cell) in self.iter() {
            let Some(animal) = cell else { continue };
            seen += 1;

            if animal.position() != pos {
                return Err(Error::GridInconsistent(format!(
                    "{} {} stored at {} believes it is at {}",
                    animal.species,
                    animal.id(),
                    pos,
                    animal.position()
                )));
            }

            if self.locations.get(&animal.id()) != Some(&pos) {
                return Err(Error::GridInconsistent(format!(
                    "{} {} at {} is missing from the location index",
                    animal.species,
                    animal.id(),
                    pos
                )));
            }

            if animal.is_predator() != animal.hunger.is_some() {
                return Err(Error::GridInconsistent(format!(
                    "{} {} at {} has hunger {:?}",
                    animal.species,
                    animal.id(),
                    pos,
                    animal.hunger
                )));
            }
        }

        if seen != self.locations.len() {
            return Err(Error::GridInconsistent(format!(
                "Location index tracks {} animals but {} cells are occupied",
                self.locations.len(),
                seen
            )));
        }

        Ok(())
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if self.place_exists(pos) {
            Some(pos.x as usize * self.size + pos.y as usize)
        } else {
            None
        }
    }

    fn vacant_index(&self, pos: Position) -> Result<usize> {
        let index = self.index_of(pos).ok_or(Error::OutOfBounds(pos))?;
        if self.cells[index].is_some() {
            return Err(Error::CellOccupied(pos));
        }
        Ok(index)
    }

    fn occupied_index(&self, pos: Position) -> Result<usize> {
        let index = self.index_of(pos).ok_or(Error::OutOfBounds(pos))?;
        if self.cells[index].is_none() {
            return Err(Error::CellVacant(pos));
        }
        Ok(index)
    }

    fn allocate_id(&mut self) -> AnimalId {
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }
}
