//! World simulation engine.
//!
//! This module implements the toroidal grid world where resources grow and
//! herbivores and carnivores feed, move, age and reproduce one day at a time.

pub mod grid;
pub mod entity;
pub mod world;
pub mod simulation;

pub use grid::{Grid, Slot, Snapshot};
pub use entity::{Entity, Vitals};
pub use world::{Outcome, Turn, World};
pub use simulation::{Simulation, SimulationResult};
