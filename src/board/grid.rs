//! Grid geometry and the per-turn board index.
//!
//! The board is a fixed-size rectangle of cells with orthogonal adjacency.
//! `BoardIndex` is a flat position-to-unit mapping rebuilt at the start of
//! every turn and kept coherent through every move, swap, and spawn within
//! the same resolution step.

use serde::{Deserialize, Serialize};

use super::unit::Unit;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

impl Pos {
    pub const fn new(row: u16, col: u16) -> Self {
        Pos { row, col }
    }
}

/// Board dimensions. Adjacency is orthogonal only (no diagonals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u16,
    pub cols: u16,
}

/// The four orthogonal direction deltas.
const DELTAS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

impl Grid {
    pub const fn new(rows: u16, cols: u16) -> Self {
        Grid { rows, cols }
    }

    /// Total number of cells on the board.
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns true if `pos` lies inside the board.
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Flat array index for a cell.
    pub const fn cell_index(&self, pos: Pos) -> usize {
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    /// In-bounds orthogonal neighbors of `pos`, at most four.
    pub fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        let mut out = Vec::with_capacity(4);
        for (dr, dc) in DELTAS {
            let r = pos.row as i32 + dr;
            let c = pos.col as i32 + dc;
            if r >= 0 && c >= 0 {
                let p = Pos::new(r as u16, c as u16);
                if self.contains(p) {
                    out.push(p);
                }
            }
        }
        out
    }
}

/// Position-to-unit mapping over the unit arena.
///
/// Uses a flat `Vec<Option<usize>>` indexed by cell for O(1) occupancy
/// queries, following the fixed-array board layout of the state snapshot.
/// Values are indices into the engine's unit arena.
#[derive(Debug, Clone)]
pub struct BoardIndex {
    grid: Grid,
    cells: Vec<Option<usize>>,
}

impl BoardIndex {
    /// Creates an empty index for a board of the given dimensions.
    pub fn new(grid: Grid) -> Self {
        BoardIndex {
            grid,
            cells: vec![None; grid.cell_count()],
        }
    }

    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Clears the index and re-registers every unit at its current position.
    pub fn rebuild(&mut self, units: &[Unit]) {
        self.cells.iter_mut().for_each(|c| *c = None);
        for (i, unit) in units.iter().enumerate() {
            self.cells[self.grid.cell_index(unit.pos)] = Some(i);
        }
    }

    /// Arena index of the unit occupying `pos`, if any.
    pub fn occupant(&self, pos: Pos) -> Option<usize> {
        self.cells[self.grid.cell_index(pos)]
    }

    /// Returns true if `pos` holds no unit.
    pub fn is_free(&self, pos: Pos) -> bool {
        self.occupant(pos).is_none()
    }

    /// Registers a unit at `pos`.
    pub fn place(&mut self, pos: Pos, unit_idx: usize) {
        self.cells[self.grid.cell_index(pos)] = Some(unit_idx);
    }

    /// Removes any registration at `pos`.
    pub fn clear(&mut self, pos: Pos) {
        self.cells[self.grid.cell_index(pos)] = None;
    }

    /// Exchanges the occupants of two cells.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let ia = self.grid.cell_index(a);
        let ib = self.grid.cell_index(b);
        self.cells.swap(ia, ib);
    }

    /// Free orthogonal neighbor cells of `pos`.
    pub fn free_neighbors(&self, pos: Pos) -> Vec<Pos> {
        self.grid
            .neighbors(pos)
            .into_iter()
            .filter(|p| self.is_free(*p))
            .collect()
    }
}
