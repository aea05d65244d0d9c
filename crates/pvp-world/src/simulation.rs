//! Tick driver for running a predator/prey grid.

use crate::behavior::{self, Action};
use crate::grid::Grid;
use crate::snapshot::Snapshot;
use pvp_core::{Error, Position, Result, RunSummary, ScanMode, SimConfig, Species, TickReport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, instrument, trace};

/// Where the driver is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running { ticks_remaining: u64 },
    Done,
}

impl RunState {
    fn after_tick(self) -> Self {
        match self {
            RunState::Running { ticks_remaining } if ticks_remaining > 1 => RunState::Running {
                ticks_remaining: ticks_remaining - 1,
            },
            _ => RunState::Done,
        }
    }
}

fn initial_state(ticks: u64) -> RunState {
    if ticks == 0 {
        RunState::Done
    } else {
        RunState::Running {
            ticks_remaining: ticks,
        }
    }
}

/// Runs the grid forward one tick at a time.
///
/// The random source is a type parameter so tests can inject a seeded
/// generator; [`Simulation::new`] uses `ChaCha8Rng`.
pub struct Simulation<R = ChaCha8Rng> {
    grid: Grid,
    rng: R,
    scan_mode: ScanMode,
    tick: u64,
    state: RunState,
    summary: RunSummary,
}

impl Simulation<ChaCha8Rng> {
    /// Build and seed a simulation from configuration.
    ///
    /// Without a configured seed one is drawn from entropy; use
    /// [`Simulation::seeded`] to learn which.
    pub fn new(config: &SimConfig) -> Result<Self> {
        let (sim, _) = Self::seeded(config)?;
        Ok(sim)
    }

    /// Like [`Simulation::new`], also returning the seed actually used
    pub fn seeded(config: &SimConfig) -> Result<(Self, u64)> {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, size = config.size, population = config.population, "Seeding simulation");
        let sim = Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))?;
        Ok((sim, seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Build a simulation with a caller-supplied random source.
    ///
    /// Fails when the grid size is unrepresentable or the population does
    /// not fit on the grid.
    pub fn with_rng(config: &SimConfig, mut rng: R) -> Result<Self> {
        let capacity = Grid::cell_count(config.size)?;
        if config.population > capacity {
            return Err(Error::Validation(format!(
                "Population {} exceeds the {} cells of a {}x{} grid",
                config.population, capacity, config.size, config.size
            )));
        }

        let mut grid = Grid::new(config.size)?;
        grid.populate(config.population, &mut rng)?;

        Ok(Self::from_grid(grid, config.ticks, config.scan_mode, rng))
    }

    /// Drive an already-populated grid
    pub fn from_grid(grid: Grid, ticks: u64, scan_mode: ScanMode, rng: R) -> Self {
        let summary = RunSummary::new(grid.counts());
        Self {
            grid,
            rng,
            scan_mode,
            tick: 0,
            state: initial_state(ticks),
            summary,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == RunState::Done
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.tick, &self.grid)
    }

    /// Run every remaining tick, handing a snapshot to `observer` before the
    /// first tick and after each one
    #[instrument(skip(self, observer), fields(scan_mode = ?self.scan_mode))]
    pub fn run<F>(&mut self, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&Snapshot),
    {
        let (predators, prey) = self.grid.counts();
        info!(predators, prey, state = ?self.state, "Starting simulation");

        observer(&self.snapshot());
        while self.step()?.is_some() {
            observer(&self.snapshot());
        }

        info!(
            ticks_run = self.summary.ticks_run,
            total_births = self.summary.total_births,
            total_starved = self.summary.total_starved,
            total_eaten = self.summary.total_eaten,
            peak_predators = self.summary.peak_predators,
            peak_prey = self.summary.peak_prey,
            final_predators = self.summary.final_predators,
            final_prey = self.summary.final_prey,
            "Simulation complete"
        );

        Ok(self.summary.clone())
    }

    /// Execute one tick. Returns `None` once the run is done.
    pub fn step(&mut self) -> Result<Option<TickReport>> {
        if self.is_done() {
            return Ok(None);
        }

        self.tick += 1;
        let mut report = TickReport::new(self.tick, self.grid.counts());

        match self.scan_mode {
            ScanMode::Snapshot => {
                for id in self.grid.scan_order() {
                    // Eaten earlier this tick
                    let Some(pos) = self.grid.position_of(id) else {
                        continue;
                    };
                    self.visit(pos, &mut report)?;
                }
            }
            ScanMode::InPlace => {
                for index in 0..self.grid.capacity() {
                    let pos = self.grid.index_to_pos(index);
                    self.visit(pos, &mut report)?;
                }
            }
        }

        report.after = self.grid.counts();
        self.summary.record(&report);
        self.state = self.state.after_tick();

        debug!(
            tick = report.tick,
            visited = report.visited,
            births = report.births,
            starved = report.starved,
            eaten = report.eaten,
            moves = report.moves,
            idles = report.idles,
            predators = report.after.0,
            prey = report.after.1,
            "Tick complete"
        );

        Ok(Some(report))
    }

    /// Upkeep and decision for the animal at `pos`, if any
    fn visit(&mut self, pos: Position, report: &mut TickReport) -> Result<()> {
        let (species, starved, breed_ready) = match self.grid.get_mut(pos) {
            Some(animal) => {
                let starved = animal.consume_hunger();
                let breed_ready = !starved && animal.decay_breed_clock();
                (animal.species, starved, breed_ready)
            }
            None => return Ok(()),
        };
        report.visited += 1;

        if starved {
            let animal = self
                .grid
                .remove(pos)
                .map_err(|e| self.invariant_violation(species, pos, e))?;
            report.starved += 1;
            trace!(tick = self.tick, id = %animal.id(), x = pos.x, y = pos.y, "Predator starved");
            return Ok(());
        }

        let action = behavior::act(&mut self.grid, pos, breed_ready, &mut self.rng)
            .map_err(|e| self.invariant_violation(species, pos, e))?;

        match action {
            Action::Eat { .. } => report.eaten += 1,
            Action::Breed { .. } => report.births += 1,
            Action::Move { .. } => report.moves += 1,
            Action::Idle => report.idles += 1,
        }
        trace!(tick = self.tick, %species, x = pos.x, y = pos.y, ?action, "Animal acted");

        Ok(())
    }

    fn invariant_violation(&self, species: Species, position: Position, source: Error) -> Error {
        error!(
            tick = self.tick,
            %species,
            x = position.x,
            y = position.y,
            error = %source,
            "Grid invariant violated, aborting run"
        );
        Error::InvariantViolation {
            tick: self.tick,
            species,
            position,
            reason: source.to_string(),
        }
    }
}
