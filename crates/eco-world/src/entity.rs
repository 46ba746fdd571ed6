//! Entity state and management.

use eco_core::{EntityId, Position, Species};
use serde::{Deserialize, Serialize};

/// Species-specific state of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vitals {
    /// Resources only grow and get grazed
    Flora { density: i32 },
    /// Herbivores and carnivores
    Fauna {
        energy: i32,
        lifetime: u32,
        lifetime_threshold: u32,
    },
}

/// A living (or freshly killed) entity in the world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub species: Species,
    pub position: Position,
    pub vitals: Vitals,
    pub alive: bool,
}

impl Entity {
    pub fn resource(id: EntityId, position: Position, density: i32) -> Self {
        Self {
            id,
            species: Species::Resource,
            position,
            vitals: Vitals::Flora { density },
            alive: true,
        }
    }

    /// A newborn animal with zero lifetime
    pub fn animal(
        id: EntityId,
        species: Species,
        position: Position,
        energy: i32,
        lifetime_threshold: u32,
    ) -> Self {
        assert!(species.is_mobile(), "{species} is not an animal");
        Self {
            id,
            species,
            position,
            vitals: Vitals::Fauna {
                energy,
                lifetime: 0,
                lifetime_threshold,
            },
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn density(&self) -> Option<i32> {
        match self.vitals {
            Vitals::Flora { density } => Some(density),
            Vitals::Fauna { .. } => None,
        }
    }

    pub fn energy(&self) -> Option<i32> {
        match self.vitals {
            Vitals::Fauna { energy, .. } => Some(energy),
            Vitals::Flora { .. } => None,
        }
    }

    pub fn lifetime(&self) -> Option<u32> {
        match self.vitals {
            Vitals::Fauna { lifetime, .. } => Some(lifetime),
            Vitals::Flora { .. } => None,
        }
    }

    pub fn lifetime_threshold(&self) -> Option<u32> {
        match self.vitals {
            Vitals::Fauna {
                lifetime_threshold, ..
            } => Some(lifetime_threshold),
            Vitals::Flora { .. } => None,
        }
    }

    /// Start-of-day growth (flora) or aging (fauna)
    pub fn grow(&mut self, growth: i32) {
        match &mut self.vitals {
            Vitals::Flora { density } => *density += growth,
            Vitals::Fauna { lifetime, .. } => *lifetime += 1,
        }
    }

    /// Lose one unit of density to a grazer; returns true when the resource is used up
    pub fn graze(&mut self) -> bool {
        match &mut self.vitals {
            Vitals::Flora { density } => {
                *density -= 1;
                *density < 0
            }
            Vitals::Fauna { .. } => panic!("{} is not grazeable", self.species),
        }
    }

    /// Adjust energy by `delta`; energy is allowed to go negative
    pub fn add_energy(&mut self, delta: i32) {
        if let Vitals::Fauna { energy, .. } = &mut self.vitals {
            *energy += delta;
        }
    }

    /// Whether the lifetime is a positive multiple of `interval`
    pub fn aging_due(&self, interval: u32) -> bool {
        matches!(self.vitals, Vitals::Fauna { lifetime, .. } if lifetime > 0 && lifetime % interval == 0)
    }

    pub fn ready_to_reproduce(&self) -> bool {
        matches!(
            self.vitals,
            Vitals::Fauna { lifetime, lifetime_threshold, .. } if lifetime >= lifetime_threshold
        )
    }

    /// Make the parent young again after it reproduced
    pub fn rejuvenate(&mut self) {
        if let Vitals::Fauna { lifetime, .. } = &mut self.vitals {
            *lifetime = 1;
        }
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herbivore(energy: i32, threshold: u32) -> Entity {
        Entity::animal(
            EntityId(1),
            Species::Herbivore,
            Position::new(2, 2),
            energy,
            threshold,
        )
    }

    #[test]
    fn test_resource_creation() {
        let resource = Entity::resource(EntityId(0), Position::new(1, 1), 30);
        assert_eq!(resource.species, Species::Resource);
        assert_eq!(resource.density(), Some(30));
        assert_eq!(resource.energy(), None);
        assert_eq!(resource.lifetime_threshold(), None);
        assert!(resource.is_alive());
    }

    #[test]
    fn test_animal_creation() {
        let animal = herbivore(30, 100);
        assert_eq!(animal.energy(), Some(30));
        assert_eq!(animal.lifetime(), Some(0));
        assert_eq!(animal.lifetime_threshold(), Some(100));
        assert_eq!(animal.density(), None);
    }

    #[test]
    #[should_panic(expected = "not an animal")]
    fn test_resource_cannot_be_animal() {
        Entity::animal(EntityId(0), Species::Resource, Position::new(0, 0), 1, 1);
    }

    #[test]
    fn test_growth_and_aging() {
        let mut resource = Entity::resource(EntityId(0), Position::new(1, 1), 5);
        resource.grow(2);
        assert_eq!(resource.density(), Some(7));

        let mut animal = herbivore(30, 100);
        animal.grow(2);
        assert_eq!(animal.lifetime(), Some(1));
        assert_eq!(animal.energy(), Some(30));
    }

    #[test]
    fn test_graze_boundary() {
        let mut resource = Entity::resource(EntityId(0), Position::new(1, 1), 1);
        assert!(!resource.graze());
        assert_eq!(resource.density(), Some(0));
        assert!(resource.graze());
        assert_eq!(resource.density(), Some(-1));
    }

    #[test]
    fn test_energy_can_go_negative() {
        let mut animal = herbivore(1, 100);
        animal.add_energy(-3);
        assert_eq!(animal.energy(), Some(-2));
        assert!(animal.is_alive());
    }

    #[test]
    fn test_aging_due() {
        let mut animal = herbivore(30, 100);
        assert!(!animal.aging_due(10));
        for _ in 0..10 {
            animal.grow(1);
        }
        assert!(animal.aging_due(10));
        animal.grow(1);
        assert!(!animal.aging_due(10));
    }

    #[test]
    fn test_reproduction_cycle() {
        let mut animal = herbivore(30, 2);
        animal.grow(1);
        assert!(!animal.ready_to_reproduce());
        animal.grow(1);
        assert!(animal.ready_to_reproduce());
        animal.rejuvenate();
        assert_eq!(animal.lifetime(), Some(1));
        assert!(!animal.ready_to_reproduce());
    }

    #[test]
    fn test_kill() {
        let mut animal = herbivore(30, 100);
        animal.kill();
        assert!(!animal.is_alive());
    }
}
