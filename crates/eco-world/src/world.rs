//! The world: entity store, seeding and the daily evolution pass.

use crate::entity::Entity;
use crate::grid::{Grid, Slot, Snapshot};
use eco_core::{
    Census, DayReport, EntityId, Error, Position, Result, Species, VitalStats, WorldConfig,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace};

/// What an entity did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Resources only grow
    Grew,
    /// No prey and no free neighbor
    Stayed,
    /// Ate a neighbor; `killed` when the meal was fatal for the prey
    Fed { prey: EntityId, killed: bool },
    /// Relocated to an empty neighbor
    Moved,
}

/// Result of evolving a single entity for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub turn: Turn,
    /// Slot of the offspring spawned at the vacated cell, if any
    pub offspring: Option<Slot>,
}

impl Outcome {
    fn without_offspring(turn: Turn) -> Self {
        Self {
            turn,
            offspring: None,
        }
    }
}

pub struct World {
    config: WorldConfig,
    grid: Grid,
    entities: Vec<Entity>,
    next_id: u64,
    day: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.size);

        Ok(Self {
            config,
            grid,
            entities: Vec::new(),
            next_id: 0,
            day: 0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of days evolved so far
    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, slot: Slot) -> &Entity {
        &self.entities[slot]
    }

    pub fn entity_at(&self, pos: Position) -> Option<&Entity> {
        self.grid.get(pos).map(|slot| &self.entities[slot])
    }

    /// Seed the world with fresh entities on random free interior cells.
    ///
    /// Resources are placed first, then herbivores, then carnivores. Each
    /// placement draws uniformly from the interior until it hits a free cell,
    /// so very dense populations get slow; requests that cannot fit at all
    /// are rejected up front and nothing is placed.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        resources: usize,
        herbivores: usize,
        carnivores: usize,
        rng: &mut R,
    ) -> Result<()> {
        let requested = resources + herbivores + carnivores;
        let available = self.grid.free_interior_cells();
        if requested > available {
            return Err(Error::Overcrowded {
                requested,
                available,
            });
        }

        for (species, count) in [
            (Species::Resource, resources),
            (Species::Herbivore, herbivores),
            (Species::Carnivore, carnivores),
        ] {
            for _ in 0..count {
                let pos = self.sample_free_interior(species, rng)?;
                self.spawn(species, pos, None);
            }
        }

        info!(
            resources = resources,
            herbivores = herbivores,
            carnivores = carnivores,
            grid_size = self.grid.size(),
            "World populated"
        );

        Ok(())
    }

    fn sample_free_interior<R: Rng + ?Sized>(
        &self,
        species: Species,
        rng: &mut R,
    ) -> Result<Position> {
        let upper = self.grid.size() as i32 - 1;

        for _ in 0..self.config.max_placement_attempts {
            let pos = Position::new(rng.gen_range(1..upper), rng.gen_range(1..upper));
            if self.grid.is_empty(pos) {
                return Ok(pos);
            }
        }

        Err(Error::PlacementExhausted {
            species,
            attempts: self.config.max_placement_attempts,
        })
    }

    /// Create an entity at a free cell and bind it into the store and the grid.
    ///
    /// Without `parent_energy` the species defaults apply. With it, the newborn
    /// starts with the parent's energy and a zero lifetime.
    pub fn spawn(&mut self, species: Species, pos: Position, parent_energy: Option<i32>) -> Slot {
        assert!(self.grid.is_empty(pos), "cannot spawn {species} on occupied cell {pos}");

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let entity = match self.config.fauna(species) {
            None => Entity::resource(
                id,
                pos,
                parent_energy.unwrap_or(self.config.resource.initial_density),
            ),
            Some(fauna) => Entity::animal(
                id,
                species,
                pos,
                parent_energy.unwrap_or(fauna.initial_energy),
                fauna.lifetime_threshold,
            ),
        };

        let slot = self.entities.len();
        self.entities.push(entity);
        self.grid.place(pos, slot);
        slot
    }

    /// Run one day of the state machine for a living entity:
    /// age, then feed, else move, then pay the aging cost, then relocate
    /// (reproducing if old enough).
    pub fn evolve_entity<R: Rng + ?Sized>(&mut self, slot: Slot, rng: &mut R) -> Outcome {
        let growth = self.config.resource.growth;
        let entity = &mut self.entities[slot];
        assert!(entity.is_alive(), "entity {} evolved after death", entity.id);

        entity.grow(growth);
        let species = entity.species;
        let origin = entity.position;

        let Some(prey_species) = species.prey() else {
            return Outcome::without_offspring(Turn::Grew);
        };

        let neighbors = self.grid.neighbors(origin);
        let mut destination = None;

        let prey: Vec<(Position, Slot)> = neighbors
            .iter()
            .filter_map(|&(pos, cell)| {
                let target = cell?;
                let candidate = &self.entities[target];
                (candidate.is_alive() && candidate.species == prey_species)
                    .then_some((pos, target))
            })
            .collect();

        let turn = if let Some(&(prey_pos, prey_slot)) = prey.choose(rng) {
            self.entities[slot].add_energy(self.config.feed_gain);

            let meal = &mut self.entities[prey_slot];
            let killed = match prey_species {
                Species::Resource => meal.graze(),
                _ => true,
            };
            let prey_id = meal.id;

            if killed {
                meal.kill();
                self.grid.clear(prey_pos);
                destination = Some(prey_pos);
                trace!(
                    predator = %self.entities[slot].id,
                    prey = %prey_id,
                    species = %prey_species,
                    x = prey_pos.x,
                    y = prey_pos.y,
                    "Prey consumed"
                );
            }

            Turn::Fed {
                prey: prey_id,
                killed,
            }
        } else {
            let free: Vec<Position> = neighbors
                .iter()
                .filter(|(_, cell)| cell.is_none())
                .map(|(pos, _)| *pos)
                .collect();

            match free.choose(rng) {
                Some(&pos) => {
                    self.entities[slot].add_energy(-self.config.move_cost);
                    destination = Some(pos);
                    Turn::Moved
                }
                None => Turn::Stayed,
            }
        };

        let entity = &mut self.entities[slot];
        if entity.aging_due(self.config.aging_interval) {
            entity.add_energy(-self.config.aging_cost);
        }

        let Some(destination) = destination else {
            return Outcome::without_offspring(turn);
        };

        // The mover keeps grid and entity position in step.
        self.grid.clear(origin);
        entity.move_to(destination);
        self.grid.place(destination, slot);

        if !entity.ready_to_reproduce() {
            return Outcome::without_offspring(turn);
        }

        entity.rejuvenate();
        let parent_id = entity.id;
        let energy = entity.energy();
        let child = self.spawn(species, origin, energy);

        trace!(
            parent = %parent_id,
            child = %self.entities[child].id,
            species = %species,
            x = origin.x,
            y = origin.y,
            "Offspring spawned"
        );

        Outcome {
            turn,
            offspring: Some(child),
        }
    }

    /// Advance the world by one day.
    ///
    /// Entities alive at dawn are evolved in a fresh uniformly random order;
    /// ones eaten earlier in the pass are skipped and offspring born during the
    /// pass wait for the next day. The dead are purged at the end.
    pub fn evolve_world<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DayReport {
        self.day += 1;

        let mut order: Vec<Slot> = (0..self.entities.len()).collect();
        order.shuffle(rng);

        let mut report = DayReport {
            day: self.day,
            ..Default::default()
        };

        for slot in order {
            if !self.entities[slot].is_alive() {
                continue;
            }

            let outcome = self.evolve_entity(slot, rng);

            if let Turn::Fed { killed: true, .. } = outcome.turn {
                match self.entities[slot].species {
                    Species::Herbivore => report.resources_consumed += 1,
                    Species::Carnivore => report.herbivores_eaten += 1,
                    Species::Resource => {}
                }
            }
            if let Some(child) = outcome.offspring {
                report.births.record(self.entities[child].species);
            }
        }

        self.purge_dead();
        report.census = self.census();

        debug!(
            day = self.day,
            resources = report.census.resources,
            herbivores = report.census.herbivores,
            carnivores = report.census.carnivores,
            births = report.births.total(),
            deaths = report.deaths(),
            "Day evolved"
        );

        report
    }

    /// Drop dead entities from the store and re-bind the survivors' slots.
    /// Returns how many were removed.
    pub fn purge_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(Entity::is_alive);
        let removed = before - self.entities.len();

        if removed > 0 {
            for (slot, entity) in self.entities.iter().enumerate() {
                self.grid.place(entity.position, slot);
            }
        }

        removed
    }

    pub fn census(&self) -> Census {
        self.entities
            .iter()
            .filter(|entity| entity.is_alive())
            .map(|entity| entity.species)
            .collect()
    }

    /// Energy and age aggregates of a living animal species
    pub fn vital_stats(&self, species: Species) -> VitalStats {
        VitalStats::from_samples(
            self.entities
                .iter()
                .filter(|entity| entity.is_alive() && entity.species == species)
                .filter_map(|entity| Some((entity.energy()?, entity.lifetime()?))),
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot(|slot| self.entities[slot].species)
    }
}
