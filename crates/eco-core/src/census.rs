//! Population counts and per-day statistics.

use crate::Species;
use serde::{Deserialize, Serialize};

/// Live population per species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub resources: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, species: Species) {
        *self.slot_mut(species) += 1;
    }

    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Resource => self.resources,
            Species::Herbivore => self.herbivores,
            Species::Carnivore => self.carnivores,
        }
    }

    pub fn total(&self) -> usize {
        self.resources + self.herbivores + self.carnivores
    }

    /// True once neither animal species has a living member
    pub fn fauna_extinct(&self) -> bool {
        self.herbivores == 0 && self.carnivores == 0
    }

    fn slot_mut(&mut self, species: Species) -> &mut usize {
        match species {
            Species::Resource => &mut self.resources,
            Species::Herbivore => &mut self.herbivores,
            Species::Carnivore => &mut self.carnivores,
        }
    }
}

impl FromIterator<Species> for Census {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut census = Census::new();
        for species in iter {
            census.record(species);
        }
        census
    }
}

/// What happened during one simulated day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    /// Day number, starting at 1 for the first evolved day
    pub day: u64,
    /// Population after the dead were purged
    pub census: Census,
    /// Offspring spawned, per species
    pub births: Census,
    /// Resources grazed down below zero density
    pub resources_consumed: usize,
    /// Herbivores eaten by carnivores
    pub herbivores_eaten: usize,
}

impl DayReport {
    pub fn deaths(&self) -> usize {
        self.resources_consumed + self.herbivores_eaten
    }
}

/// Energy and age aggregates for one animal species
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalStats {
    pub count: usize,
    pub avg_energy: f64,
    pub min_energy: i32,
    pub max_energy: i32,
    pub avg_lifetime: f64,
    pub max_lifetime: u32,
}

impl VitalStats {
    /// Aggregate `(energy, lifetime)` samples
    pub fn from_samples<I: IntoIterator<Item = (i32, u32)>>(samples: I) -> Self {
        let mut stats = VitalStats {
            min_energy: i32::MAX,
            max_energy: i32::MIN,
            ..Default::default()
        };
        let mut energy_sum = 0i64;
        let mut lifetime_sum = 0u64;

        for (energy, lifetime) in samples {
            stats.count += 1;
            energy_sum += energy as i64;
            lifetime_sum += lifetime as u64;
            stats.min_energy = stats.min_energy.min(energy);
            stats.max_energy = stats.max_energy.max(energy);
            stats.max_lifetime = stats.max_lifetime.max(lifetime);
        }

        if stats.count == 0 {
            return VitalStats::default();
        }

        stats.avg_energy = energy_sum as f64 / stats.count as f64;
        stats.avg_lifetime = lifetime_sum as f64 / stats.count as f64;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_counts() {
        let census: Census = [
            Species::Resource,
            Species::Herbivore,
            Species::Resource,
            Species::Carnivore,
        ]
        .into_iter()
        .collect();

        assert_eq!(census.count(Species::Resource), 2);
        assert_eq!(census.count(Species::Herbivore), 1);
        assert_eq!(census.count(Species::Carnivore), 1);
        assert_eq!(census.total(), 4);
        assert!(!census.fauna_extinct());
    }

    #[test]
    fn test_fauna_extinct() {
        let census: Census = std::iter::repeat(Species::Resource).take(3).collect();
        assert!(census.fauna_extinct());
    }

    #[test]
    fn test_vital_stats() {
        let stats = VitalStats::from_samples([(10, 4), (-2, 8), (4, 0)]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_energy, -2);
        assert_eq!(stats.max_energy, 10);
        assert_eq!(stats.max_lifetime, 8);
        assert!((stats.avg_energy - 4.0).abs() < f64::EPSILON);
        assert!((stats.avg_lifetime - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vital_stats_empty() {
        assert_eq!(VitalStats::from_samples(std::iter::empty()), VitalStats::default());
    }
}
