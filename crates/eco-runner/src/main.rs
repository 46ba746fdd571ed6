//! Headless runner: evolves the world for a fixed number of days.

mod cli;
mod export;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use eco_world::Simulation;
use tracing::info;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    telemetry::init_telemetry(cli.log_json)?;

    let config = cli.simulation_config()?;
    info!(
        days = config.num_days,
        seed = config.seed,
        size = config.world.size,
        "Starting Eco-Grid runner"
    );

    let mut simulation = Simulation::new(config).context("setting up the world")?;

    let mut frames = match (&cli.out_dir, cli.snapshot_every) {
        (Some(dir), Some(every)) => Some(export::FrameWriter::new(dir, every)?),
        _ => None,
    };

    while simulation.remaining_days() > 0 {
        let report = simulation.step();
        if let Some(frames) = frames.as_mut() {
            frames.observe(simulation.world(), &report)?;
        }
    }

    let result = simulation.finish();

    if let Some(frames) = &frames {
        info!(frames = frames.written(), "Snapshots written");
    }

    match &cli.summary {
        Some(path) => {
            export::write_summary(path, &result)?;
            info!(path = %path.display(), "Summary written");
        }
        None => println!("{}", serde_json::to_string_pretty(&result.final_census)?),
    }

    Ok(())
}
