//! Seeded multi-day driver around a [`World`].

use crate::world::World;
use eco_core::{Census, DayReport, Result, SimulationConfig, Species};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{event, info, instrument, Level};

pub struct Simulation {
    world: World,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    history: Vec<DayReport>,
}

impl Simulation {
    /// Build and populate a world; the configured seed drives every random choice
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new(config.world.clone())?;
        let population = config.population;
        world.populate(
            population.resources,
            population.herbivores,
            population.carnivores,
            &mut rng,
        )?;

        Ok(Self {
            world,
            config,
            rng,
            history: Vec::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn history(&self) -> &[DayReport] {
        &self.history
    }

    /// Days still to run before `num_days` is reached
    pub fn remaining_days(&self) -> u64 {
        self.config.num_days.saturating_sub(self.world.day())
    }

    /// Evolve exactly one day
    pub fn step(&mut self) -> DayReport {
        let report = self.world.evolve_world(&mut self.rng);

        let interval = self.config.report_interval;
        if interval > 0 && report.day % interval == 0 {
            self.emit_population_metrics(&report);
        }

        self.history.push(report.clone());
        report
    }

    /// Run the remaining days and summarize
    #[instrument(skip(self), fields(num_days = self.config.num_days, seed = self.config.seed))]
    pub fn run(&mut self) -> SimulationResult {
        info!("Starting simulation for {} days", self.config.num_days);

        while self.remaining_days() > 0 {
            self.step();
        }

        self.finish()
    }

    /// Log the episode summary and collect the results so far
    pub fn finish(&self) -> SimulationResult {
        let result = self.collect_results();
        self.emit_episode_summary(&result);
        result
    }

    fn emit_population_metrics(&self, report: &DayReport) {
        let herbivores = self.world.vital_stats(Species::Herbivore);
        let carnivores = self.world.vital_stats(Species::Carnivore);

        info!(
            event = "population_metrics",
            day = report.day,
            resources = report.census.resources,
            herbivores = report.census.herbivores,
            carnivores = report.census.carnivores,
            births = report.births.total(),
            resources_consumed = report.resources_consumed,
            herbivores_eaten = report.herbivores_eaten,
            herbivore_avg_energy = format!("{:.2}", herbivores.avg_energy),
            herbivore_max_lifetime = herbivores.max_lifetime,
            carnivore_avg_energy = format!("{:.2}", carnivores.avg_energy),
            carnivore_max_lifetime = carnivores.max_lifetime,
            "Population metrics snapshot"
        );

        for species in Species::all() {
            event!(
                Level::DEBUG,
                gauge_name = "population",
                gauge_value = report.census.count(species),
                species = %species,
                day = report.day,
                "Population gauge"
            );
        }

        if report.census.fauna_extinct() {
            info!(day = report.day, "No animals left, only resources keep growing");
        }
    }

    fn emit_episode_summary(&self, result: &SimulationResult) {
        info!(
            event = "episode_summary",
            days = result.days,
            seed = self.config.seed,
            resources = result.final_census.resources,
            herbivores = result.final_census.herbivores,
            carnivores = result.final_census.carnivores,
            herbivores_born = result.births_total.herbivores,
            carnivores_born = result.births_total.carnivores,
            resources_consumed = result.resources_consumed_total,
            herbivores_eaten = result.herbivores_eaten_total,
            "Simulation complete"
        );
    }

    fn collect_results(&self) -> SimulationResult {
        let mut births_total = Census::new();
        let mut resources_consumed_total = 0;
        let mut herbivores_eaten_total = 0;

        for report in &self.history {
            births_total.resources += report.births.resources;
            births_total.herbivores += report.births.herbivores;
            births_total.carnivores += report.births.carnivores;
            resources_consumed_total += report.resources_consumed;
            herbivores_eaten_total += report.herbivores_eaten;
        }

        SimulationResult {
            days: self.world.day(),
            seed: self.config.seed,
            final_census: self.world.census(),
            births_total,
            resources_consumed_total,
            herbivores_eaten_total,
            history: self.history.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub days: u64,
    pub seed: u64,
    pub final_census: Census,
    pub births_total: Census,
    pub resources_consumed_total: usize,
    pub herbivores_eaten_total: usize,
    pub history: Vec<DayReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{Error, PopulationConfig, WorldConfig};

    fn small_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            num_days: 40,
            seed,
            report_interval: 10,
            world: WorldConfig {
                size: 24,
                ..Default::default()
            },
            population: PopulationConfig {
                resources: 120,
                herbivores: 60,
                carnivores: 8,
            },
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(small_config(42)).unwrap();
        assert_eq!(sim.world().entities().len(), 188);
        assert_eq!(sim.world().day(), 0);
        assert_eq!(sim.remaining_days(), 40);
    }

    #[test]
    fn test_overcrowded_config_fails() {
        let mut config = small_config(1);
        config.population.resources = 10_000;
        assert!(matches!(
            Simulation::new(config),
            Err(Error::Overcrowded { .. })
        ));
    }

    #[test]
    fn test_run_covers_all_days() {
        let mut sim = Simulation::new(small_config(5)).unwrap();
        let result = sim.run();

        assert_eq!(result.days, 40);
        assert_eq!(result.history.len(), 40);
        assert_eq!(result.final_census, sim.world().census());
        assert_eq!(result.history.last().unwrap().census, result.final_census);
        assert_eq!(sim.remaining_days(), 0);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let mut first = Simulation::new(small_config(9)).unwrap();
        let mut second = Simulation::new(small_config(9)).unwrap();
        assert_eq!(first.world().snapshot(), second.world().snapshot());

        for _ in 0..40 {
            let a = first.step();
            let b = second.step();
            assert_eq!(a, b);
            assert_eq!(first.world().snapshot(), second.world().snapshot());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let first = Simulation::new(small_config(1)).unwrap();
        let second = Simulation::new(small_config(2)).unwrap();
        assert_ne!(first.world().snapshot(), second.world().snapshot());
    }

    #[test]
    fn test_result_serialization() {
        let mut sim = Simulation::new(small_config(3)).unwrap();
        sim.step();
        let result = sim.finish();

        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.days, 1);
    }
}
