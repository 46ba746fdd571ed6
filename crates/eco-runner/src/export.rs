//! Snapshot and summary files written during a run.

use anyhow::{Context, Result};
use eco_core::{Census, DayReport};
use eco_world::{SimulationResult, World};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One captured day of the grid, as numeric cell tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub day: u64,
    pub census: Census,
    /// `grid[y][x]`: 0 empty, 1 resource, 2 herbivore, 3 carnivore
    pub grid: Vec<Vec<u8>>,
}

impl Frame {
    pub fn capture(world: &World, report: &DayReport) -> Self {
        Self {
            day: report.day,
            census: report.census,
            grid: world.snapshot().to_tags(),
        }
    }
}

/// Writes a frame every `every` days into `dir`
pub struct FrameWriter {
    dir: PathBuf,
    every: u64,
    written: usize,
}

impl FrameWriter {
    pub fn new(dir: impl Into<PathBuf>, every: u64) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating snapshot directory {}", dir.display()))?;

        Ok(Self {
            dir,
            every: every.max(1),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Capture the day if it falls on the interval; returns the file written
    pub fn observe(&mut self, world: &World, report: &DayReport) -> Result<Option<PathBuf>> {
        if report.day % self.every != 0 {
            return Ok(None);
        }

        let path = self.dir.join(format!("day_{:04}.json", report.day));
        write_json(&path, &Frame::capture(world, report))?;
        self.written += 1;
        debug!(day = report.day, path = %path.display(), "Snapshot written");

        Ok(Some(path))
    }
}

pub fn write_summary(path: &Path, result: &SimulationResult) -> Result<()> {
    write_json(path, result)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{Position, Species, WorldConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tiny_world() -> World {
        let mut world = World::new(WorldConfig {
            size: 3,
            ..Default::default()
        })
        .unwrap();
        world.spawn(Species::Resource, Position::new(1, 1), None);
        world
    }

    #[test]
    fn test_frame_capture() {
        let mut world = tiny_world();
        let report = world.evolve_world(&mut ChaCha8Rng::seed_from_u64(0));
        let frame = Frame::capture(&world, &report);

        assert_eq!(frame.day, 1);
        assert_eq!(frame.census.resources, 1);
        assert_eq!(frame.grid, vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
    }

    #[test]
    fn test_writer_respects_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FrameWriter::new(dir.path().join("frames"), 2).unwrap();
        let mut world = tiny_world();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let mut paths = Vec::new();
        for _ in 0..5 {
            let report = world.evolve_world(&mut rng);
            if let Some(path) = writer.observe(&world, &report).unwrap() {
                paths.push(path);
            }
        }

        assert_eq!(writer.written(), 2);
        assert!(paths[0].ends_with("day_0002.json"));
        assert!(paths[1].ends_with("day_0004.json"));

        let frame: Frame =
            serde_json::from_str(&fs::read_to_string(&paths[1]).unwrap()).unwrap();
        assert_eq!(frame.day, 4);
        assert_eq!(frame.grid[1][1], 1);
    }
}
