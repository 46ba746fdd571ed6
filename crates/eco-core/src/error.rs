//! Error types for the simulation.

use crate::Species;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Overcrowded: requested {requested} entities but only {available} interior cells are free")]
    Overcrowded { requested: usize, available: usize },

    #[error("Could not place a {species} after {attempts} attempts")]
    PlacementExhausted { species: Species, attempts: u32 },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
