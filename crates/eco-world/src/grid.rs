//! 2D toroidal occupancy grid.

use eco_core::{CellKind, Direction, Position, Species};
use serde::{Deserialize, Serialize};

/// Slot of an entity in the world's entity store
pub type Slot = usize;

/// A square toroidal grid where each cell holds at most one entity slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    cells: Vec<Option<Slot>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        assert!(size > 0 && size <= i32::MAX as usize, "invalid grid size {size}");
        Self {
            size: size as i32,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Strictly inside the one-cell border
    pub fn is_interior(&self, pos: Position) -> bool {
        (1..self.size - 1).contains(&pos.x) && (1..self.size - 1).contains(&pos.y)
    }

    pub fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.size)
    }

    /// Slot stored at position
    pub fn get(&self, pos: Position) -> Option<Slot> {
        self.cells[self.pos_to_index(pos)]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Bind a slot to a cell, overwriting whatever was there
    pub fn place(&mut self, pos: Position, slot: Slot) {
        let index = self.pos_to_index(pos);
        self.cells[index] = Some(slot);
    }

    pub fn clear(&mut self, pos: Position) {
        let index = self.pos_to_index(pos);
        self.cells[index] = None;
    }

    /// The four von Neumann neighbors of a position, wrapped around the edges,
    /// in north, east, south, west order
    pub fn neighbors(&self, pos: Position) -> [(Position, Option<Slot>); 4] {
        Direction::all().map(|direction| {
            let (dx, dy) = direction.to_delta();
            let neighbor = self.wrap(pos.add(dx, dy));
            (neighbor, self.get(neighbor))
        })
    }

    /// Number of empty cells strictly inside the border
    pub fn free_interior_cells(&self) -> usize {
        self.iter()
            .filter(|(pos, slot)| slot.is_none() && self.is_interior(*pos))
            .count()
    }

    /// Render occupancy into species tags, row-major (`rows[y][x]`)
    pub fn snapshot<F>(&self, species_of: F) -> Snapshot
    where
        F: Fn(Slot) -> Species,
    {
        let rows = self
            .cells
            .chunks(self.size())
            .map(|row| {
                row.iter()
                    .map(|cell| CellKind::from(cell.map(&species_of)))
                    .collect()
            })
            .collect();

        Snapshot { rows }
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {pos} outside {0}x{0} grid", self.size);
        (pos.y * self.size + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.size;
        let y = (index as i32) / self.size;
        Position::new(x, y)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<Slot>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}

/// Read-only species view of the grid for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    rows: Vec<Vec<CellKind>>,
}

impl Snapshot {
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, pos: Position) -> CellKind {
        self.rows[pos.y as usize][pos.x as usize]
    }

    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.rows
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&cell| cell == kind)
            .count()
    }

    /// Numeric tags, one row per `y`
    pub fn to_tags(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellKind::tag).collect())
            .collect()
    }
}
