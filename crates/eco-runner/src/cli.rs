//! Command-line options and how they shape the simulation config.

use anyhow::{Context, Result};
use clap::Parser;
use eco_core::SimulationConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "eco-runner",
    about = "Headless runner for the resource/herbivore/carnivore grid world",
    version
)]
pub struct Cli {
    /// JSON simulation config; absent fields fall back to defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of days to simulate
    #[arg(short, long)]
    pub days: Option<u64>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Side length of the square grid
    #[arg(long)]
    pub size: Option<usize>,

    /// Initial number of resources
    #[arg(long)]
    pub resources: Option<usize>,

    /// Initial number of herbivores
    #[arg(long)]
    pub herbivores: Option<usize>,

    /// Initial number of carnivores
    #[arg(long)]
    pub carnivores: Option<usize>,

    /// Write a grid snapshot every N days
    #[arg(long, value_name = "N", requires = "out_dir")]
    pub snapshot_every: Option<u64>,

    /// Directory for grid snapshots
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Write the run summary as JSON to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Load the config file (if any), then apply command-line overrides
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SimulationConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(days) = self.days {
            config.num_days = days;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.size {
            config.world.size = size;
        }
        if let Some(resources) = self.resources {
            config.population.resources = resources;
        }
        if let Some(herbivores) = self.herbivores {
            config.population.herbivores = herbivores;
        }
        if let Some(carnivores) = self.carnivores {
            config.population.carnivores = carnivores;
        }

        config.validate().context("invalid simulation config")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["eco-runner"]).unwrap();
        let config = cli.simulation_config().unwrap();
        assert_eq!(config.num_days, 400);
        assert_eq!(config.seed, 10);
        assert_eq!(config.world.size, 100);
        assert!(!cli.log_json);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "eco-runner",
            "--days",
            "12",
            "--seed",
            "99",
            "--size",
            "30",
            "--resources",
            "100",
            "--herbivores",
            "50",
            "--carnivores",
            "5",
        ])
        .unwrap();
        let config = cli.simulation_config().unwrap();

        assert_eq!(config.num_days, 12);
        assert_eq!(config.seed, 99);
        assert_eq!(config.world.size, 30);
        assert_eq!(config.population.total(), 155);
    }

    #[test]
    fn test_config_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "num_days": 5, "seed": 1, "world": {{ "size": 20 }},
                 "population": {{ "resources": 10, "herbivores": 10, "carnivores": 2 }} }}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["eco-runner", "--config", &path, "--seed", "8"]).unwrap();
        let config = cli.simulation_config().unwrap();

        assert_eq!(config.num_days, 5);
        assert_eq!(config.seed, 8);
        assert_eq!(config.world.size, 20);
        assert_eq!(config.population.carnivores, 2);
    }

    #[test]
    fn test_overcrowded_override_is_rejected() {
        let cli = Cli::try_parse_from(["eco-runner", "--size", "10", "--resources", "100"]).unwrap();
        assert!(cli.simulation_config().is_err());
    }

    #[test]
    fn test_snapshot_requires_out_dir() {
        assert!(Cli::try_parse_from(["eco-runner", "--snapshot-every", "5"]).is_err());
        let cli =
            Cli::try_parse_from(["eco-runner", "--snapshot-every", "5", "--out-dir", "frames"])
                .unwrap();
        assert_eq!(cli.snapshot_every, Some(5));
    }
}
