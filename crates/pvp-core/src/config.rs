//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the tick driver walks the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Collect every live animal in scan order at tick start and visit each
    /// at most once. Newborns wait for the next tick.
    #[default]
    Snapshot,
    /// Read each cell at visit time. An animal that moves or is born into a
    /// cell later in the scan is visited again in the same tick.
    InPlace,
}

/// Operator-imposed bounds on interactive input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted grid side length
    pub max_size: usize,
    /// Largest accepted tick count
    pub max_ticks: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_size: 20,
            max_ticks: 2000,
        }
    }
}

impl Limits {
    /// Largest population accepted for a grid of the given size (half the cells)
    pub fn max_population(&self, size: usize) -> usize {
        size.saturating_mul(size) / 2
    }
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Number of animals seeded at start, alternating predator and prey
    pub population: usize,
    /// Number of ticks to run
    pub ticks: u64,
    /// Random seed for reproducibility; drawn from entropy when absent
    pub seed: Option<u64>,
    pub scan_mode: ScanMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 10,
            population: 20,
            ticks: 100,
            seed: None,
            scan_mode: ScanMode::default(),
        }
    }
}

impl SimConfig {
    /// Check the parameters against operator limits.
    ///
    /// The engine itself only needs the population to fit on the grid; this
    /// applies the tighter bounds the CLI enforces.
    pub fn validate(&self, limits: &Limits) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Validation("Grid size must be positive".to_string()));
        }

        if self.size > limits.max_size {
            return Err(Error::Validation(format!(
                "Grid size {} exceeds the maximum of {}",
                self.size, limits.max_size
            )));
        }

        let max_population = limits.max_population(self.size);
        if self.population > max_population {
            return Err(Error::Validation(format!(
                "Population {} exceeds the maximum of {} for a {}x{} grid",
                self.population, max_population, self.size, self.size
            )));
        }

        if self.ticks > limits.max_ticks {
            return Err(Error::Validation(format!(
                "Tick count {} exceeds the maximum of {}",
                self.ticks, limits.max_ticks
            )));
        }

        Ok(())
    }
}

/// How snapshots are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Grid text followed by the census line
    #[default]
    Text,
    /// One JSON object per snapshot
    Json,
}

/// Runner (CLI) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pause between rendered frames (milliseconds)
    pub frame_delay_ms: u64,
    pub output: OutputFormat,
    /// Clear the terminal before each text frame
    pub clear_screen: bool,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 1000,
            output: OutputFormat::default(),
            clear_screen: true,
            log_filter: "warn,pvp_world=info".to_string(),
        }
    }
}

/// Everything a run needs, as loaded from a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimConfig,
    pub runner: RunnerConfig,
    pub limits: Limits,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
