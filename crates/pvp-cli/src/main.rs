//! Command-line runner for the predator/prey simulation.

mod input;
mod output;
mod telemetry;

use anyhow::{anyhow, Context, Result};
use pvp_core::AppConfig;
use pvp_world::Simulation;
use std::io;
use tracing::{error, info};

fn main() -> Result<()> {
    // Load configuration
    let (mut config, from_file) = load_config()?;

    // Initialize telemetry
    telemetry::init_telemetry(&config.runner.log_filter)?;

    if let Some(seed) = seed_override()? {
        config.simulation.seed = Some(seed);
    }

    let sim_config = if from_file {
        config.simulation.clone()
    } else {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        input::prompt_config(
            &mut stdin.lock(),
            &mut stdout,
            &config.limits,
            config.simulation.clone(),
        )?
    };
    sim_config.validate(&config.limits)?;

    let (mut simulation, seed) = Simulation::seeded(&sim_config)?;
    info!(
        seed,
        size = sim_config.size,
        population = sim_config.population,
        ticks = sim_config.ticks,
        "Run configured; set PVP_SEED to replay it"
    );

    let mut printer = output::FramePrinter::new(io::stdout().lock(), config.runner.clone());
    let mut frame_error = None;
    let summary = simulation.run(|snapshot| {
        if frame_error.is_some() {
            return;
        }
        if let Err(e) = printer.show(snapshot) {
            error!("Failed to write frame {}: {}", snapshot.tick, e);
            frame_error = Some(e);
        }
    })?;

    if let Some(e) = frame_error {
        return Err(e.context("writing simulation output"));
    }

    info!(
        frames = printer.frames(),
        final_predators = summary.final_predators,
        final_prey = summary.final_prey,
        extinct = summary.is_extinct(),
        "Done"
    );

    Ok(())
}

/// Read `PVP_CONFIG` if set. The flag reports whether a file was used, in
/// which case the run parameters come from it instead of the prompts.
fn load_config() -> Result<(AppConfig, bool)> {
    match std::env::var("PVP_CONFIG") {
        Ok(path) => {
            let config = AppConfig::from_file(&path)
                .with_context(|| format!("loading config file {}", path))?;
            Ok((config, true))
        }
        Err(_) => Ok((AppConfig::default(), false)),
    }
}

fn seed_override() -> Result<Option<u64>> {
    match std::env::var("PVP_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("PVP_SEED must be an unsigned integer, got {:?}", raw)),
        Err(_) => Ok(None),
    }
}
