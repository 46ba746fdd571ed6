//! Configuration types for the simulation.

use crate::{Error, Result, Species};
use serde::{Deserialize, Serialize};

/// Resource (flora) parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloraConfig {
    /// Density of a freshly seeded resource
    pub initial_density: i32,
    /// Density gained every day
    pub growth: i32,
}

impl Default for FloraConfig {
    fn default() -> Self {
        Self {
            initial_density: 30,
            growth: 1,
        }
    }
}

/// Herbivore / carnivore (fauna) parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaunaConfig {
    /// Energy of a freshly seeded animal
    pub initial_energy: i32,
    /// Age in days at which the animal reproduces on its next move
    pub lifetime_threshold: u32,
}

impl Default for FaunaConfig {
    fn default() -> Self {
        Self {
            initial_energy: 30,
            lifetime_threshold: 100,
        }
    }
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid
    pub size: usize,
    pub resource: FloraConfig,
    pub herbivore: FaunaConfig,
    pub carnivore: FaunaConfig,
    /// Energy lost every `aging_interval` days of lifetime
    pub aging_cost: i32,
    /// Period, in days of lifetime, of the aging cost
    pub aging_interval: u32,
    /// Energy spent relocating to an empty neighbor
    pub move_cost: i32,
    /// Energy gained per meal
    pub feed_gain: i32,
    /// Rejection-sampling draws allowed per seeded entity
    pub max_placement_attempts: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 100,
            resource: FloraConfig::default(),
            herbivore: FaunaConfig::default(),
            carnivore: FaunaConfig::default(),
            aging_cost: 1,
            aging_interval: 10,
            move_cost: 1,
            feed_gain: 1,
            max_placement_attempts: 1_000_000,
        }
    }
}

impl WorldConfig {
    /// Fauna parameters for a mobile species, `None` for resources
    pub fn fauna(&self, species: Species) -> Option<&FaunaConfig> {
        match species {
            Species::Resource => None,
            Species::Herbivore => Some(&self.herbivore),
            Species::Carnivore => Some(&self.carnivore),
        }
    }

    /// Number of cells strictly inside the border
    pub fn interior_cells(&self) -> usize {
        self.size.saturating_sub(2).pow(2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 3 {
            return Err(Error::InvalidConfig(format!(
                "grid size must be at least 3, got {}",
                self.size
            )));
        }
        if self.size > i32::MAX as usize {
            return Err(Error::InvalidConfig(format!(
                "grid size {} does not fit a coordinate",
                self.size
            )));
        }
        for species in [Species::Herbivore, Species::Carnivore] {
            if let Some(fauna) = self.fauna(species) {
                if fauna.lifetime_threshold == 0 {
                    return Err(Error::InvalidConfig(format!(
                        "{species} lifetime threshold must be positive"
                    )));
                }
            }
        }
        if self.aging_interval == 0 {
            return Err(Error::InvalidConfig(
                "aging interval must be positive".to_string(),
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max placement attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initial population requested for each species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub resources: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            resources: 2000,
            herbivores: 1000,
            carnivores: 100,
        }
    }
}

impl PopulationConfig {
    pub fn total(&self) -> usize {
        self.resources + self.herbivores + self.carnivores
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of days to run the simulation
    pub num_days: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Days between population log events (0 disables them)
    pub report_interval: u64,
    pub world: WorldConfig,
    pub population: PopulationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_days: 400,
            seed: 10,
            report_interval: 50,
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        let available = self.world.interior_cells();
        let requested = self.population.total();
        if requested > available {
            return Err(Error::Overcrowded {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Parse a JSON document; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
