//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entity, issued by the world in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for a square world of the given side
    pub fn wrap(&self, size: i32) -> Self {
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four von Neumann directions, in neighbor lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }
}

/// The three kinds of living entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Stationary plant-like food source
    Resource,
    /// Grazer, eats resources
    Herbivore,
    /// Apex predator, eats herbivores
    Carnivore,
}

impl Species {
    pub fn all() -> [Species; 3] {
        [Species::Resource, Species::Herbivore, Species::Carnivore]
    }

    /// Whether this species ages, feeds, moves and reproduces
    pub fn is_mobile(&self) -> bool {
        !matches!(self, Species::Resource)
    }

    /// The species this one feeds on, if any
    pub fn prey(&self) -> Option<Species> {
        match self {
            Species::Resource => None,
            Species::Herbivore => Some(Species::Resource),
            Species::Carnivore => Some(Species::Herbivore),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Resource => "resource",
            Species::Herbivore => "herbivore",
            Species::Carnivore => "carnivore",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display tag of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Empty = 0,
    Resource = 1,
    Herbivore = 2,
    Carnivore = 3,
}

impl CellKind {
    /// Numeric tag, handy for colormaps on the display side
    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

impl From<Species> for CellKind {
    fn from(species: Species) -> Self {
        match species {
            Species::Resource => CellKind::Resource,
            Species::Herbivore => CellKind::Herbivore,
            Species::Carnivore => CellKind::Carnivore,
        }
    }
}

impl From<Option<Species>> for CellKind {
    fn from(species: Option<Species>) -> Self {
        species.map_or(CellKind::Empty, CellKind::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10), Position::new(9, 9));

        let pos = Position::new(10, 10);
        assert_eq!(pos.wrap(10), Position::new(0, 0));

        let pos = Position::new(-11, 21);
        assert_eq!(pos.wrap(10), Position::new(9, 1));
    }

    #[test]
    fn test_direction_order() {
        let deltas: Vec<_> = Direction::all().iter().map(|d| d.to_delta()).collect();
        assert_eq!(deltas, vec![(0, -1), (1, 0), (0, 1), (-1, 0)]);
    }

    #[test]
    fn test_food_chain() {
        assert_eq!(Species::Resource.prey(), None);
        assert_eq!(Species::Herbivore.prey(), Some(Species::Resource));
        assert_eq!(Species::Carnivore.prey(), Some(Species::Herbivore));
        assert!(!Species::Resource.is_mobile());
        assert!(Species::Herbivore.is_mobile());
        assert!(Species::Carnivore.is_mobile());
    }

    #[test]
    fn test_cell_kind_tags() {
        assert_eq!(CellKind::from(None).tag(), 0);
        assert_eq!(CellKind::from(Some(Species::Resource)).tag(), 1);
        assert_eq!(CellKind::from(Species::Herbivore).tag(), 2);
        assert_eq!(CellKind::from(Species::Carnivore).tag(), 3);
        assert_eq!(serde_json::to_string(&CellKind::Herbivore).unwrap(), "\"herbivore\"");
    }
}
