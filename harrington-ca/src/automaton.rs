//! The synchronous decoder automaton.
//!
//! Owns an L×L arena of [`Cell`]s wired into a torus and steps them in four
//! globally ordered phases per tick:
//!
//! 1. **inject** – every cell takes its defect bit from the syndrome grid,
//! 2. **acquire** – every cell reads its neighbors' committed state,
//! 3. **commit** – every cell advances its own state from what it staged,
//! 4. **decide** – every cell emits at most one correction.
//!
//! No cell enters a phase before all cells finished the previous one, so
//! within a phase cells are independent. With the `parallel` feature each
//! phase is a rayon parallel iterator; results are identical either way.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::cell::{Cell, Inbox, INLINE_LEVELS};
use crate::config::{level_scale, AutomatonConfig};
use crate::direction::{level_address, Direction};
use crate::error::AutomatonError;
use crate::level::LevelState;

/// Hierarchical cellular-automaton decoder on an L×L torus.
#[derive(Debug, Clone)]
pub struct Automaton {
    config: AutomatonConfig,
    depth: u32,
    cells: Vec<Cell>,
    inboxes: Vec<Inbox>,
    corrections: Vec<Option<Direction>>,
    ticks: u64,
}

impl Automaton {
    /// Build the automaton. Fails if `config.size` is not a power of 3 or
    /// any other parameter is out of range.
    pub fn new(config: AutomatonConfig) -> Result<Self, AutomatonError> {
        let depth = config.validate()?;
        let size = config.size;

        let mut periods = Vec::new();
        for k in 1..depth {
            periods.push((k, config.level_period(k)?));
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let levels: SmallVec<[LevelState; INLINE_LEVELS]> = periods
                    .iter()
                    .map(|&(k, period)| {
                        LevelState::new(level_address(row, col, k), period, level_scale(k) as u64)
                    })
                    .collect();
                let address = level_address(row, col, 0).unwrap_or(Direction::C);
                cells.push(Cell::new(
                    row,
                    col,
                    address,
                    torus_neighbors(row, col, size),
                    levels,
                    config.thresholds,
                ));
            }
        }

        debug!(
            "built {}x{} automaton: depth {}, {} coarse levels, U={}",
            size,
            size,
            depth,
            periods.len(),
            config.period
        );

        Ok(Self {
            depth,
            inboxes: vec![Inbox::default(); cells.len()],
            corrections: vec![None; cells.len()],
            cells,
            config,
            ticks: 0,
        })
    }

    /// Lattice side L.
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Hierarchy depth d, with L = 3^d.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of coarse levels (d - 1, none for d = 0).
    pub fn num_levels(&self) -> usize {
        self.depth.saturating_sub(1) as usize
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Ticks stepped since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `(row, col)`; coordinates wrap around the torus.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        let size = self.size();
        &self.cells[(row % size) * size + col % size]
    }

    /// Corrections produced by the last tick, row-major.
    pub fn corrections(&self) -> &[Option<Direction>] {
        &self.corrections
    }

    /// Return to the initial state without rebuilding the grid.
    pub fn reset(&mut self) {
        self.corrections.iter_mut().for_each(|c| *c = None);
        self.cells.iter_mut().for_each(Cell::reset);
        self.ticks = 0;
    }

    /// Advance one tick on a row-major L×L syndrome grid and return the
    /// resulting correction grid.
    pub fn step(&mut self, syndromes: &[bool]) -> Result<&[Option<Direction>], AutomatonError> {
        if syndromes.len() != self.cells.len() {
            return Err(AutomatonError::SyndromeShape {
                expected: self.cells.len(),
                actual: syndromes.len(),
            });
        }

        self.inject(syndromes);
        self.acquire();
        self.commit();
        self.decide();
        self.ticks += 1;

        Ok(&self.corrections)
    }

    #[cfg(feature = "parallel")]
    fn inject(&mut self, syndromes: &[bool]) {
        self.cells
            .par_iter_mut()
            .zip(syndromes.par_iter())
            .for_each(|(cell, &bit)| cell.inject(bit));
    }

    #[cfg(not(feature = "parallel"))]
    fn inject(&mut self, syndromes: &[bool]) {
        self.cells
            .iter_mut()
            .zip(syndromes)
            .for_each(|(cell, &bit)| cell.inject(bit));
    }

    /// Gather every inbox from the committed arena, then stage them. The
    /// arena is read-only while gathering.
    #[cfg(feature = "parallel")]
    fn acquire(&mut self) {
        let cells = &self.cells;
        self.inboxes
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(inbox, cell)| cell.gather(cells, inbox));
        self.cells
            .par_iter_mut()
            .zip(self.inboxes.par_iter())
            .for_each(|(cell, inbox)| cell.acquire(inbox));
    }

    #[cfg(not(feature = "parallel"))]
    fn acquire(&mut self) {
        let cells = &self.cells;
        self.inboxes
            .iter_mut()
            .zip(cells)
            .for_each(|(inbox, cell)| cell.gather(cells, inbox));
        self.cells
            .iter_mut()
            .zip(&self.inboxes)
            .for_each(|(cell, inbox)| cell.acquire(inbox));
    }

    #[cfg(feature = "parallel")]
    fn commit(&mut self) {
        self.cells.par_iter_mut().for_each(Cell::commit);
    }

    #[cfg(not(feature = "parallel"))]
    fn commit(&mut self) {
        self.cells.iter_mut().for_each(Cell::commit);
    }

    #[cfg(feature = "parallel")]
    fn decide(&mut self) {
        self.cells
            .par_iter_mut()
            .zip(self.corrections.par_iter_mut())
            .for_each(|(cell, out)| *out = cell.decide());
    }

    #[cfg(not(feature = "parallel"))]
    fn decide(&mut self) {
        self.cells
            .iter_mut()
            .zip(self.corrections.iter_mut())
            .for_each(|(cell, out)| *out = cell.decide());
    }
}

/// Arena indices of the 8 toroidal neighbors of `(row, col)`, compass order.
fn torus_neighbors(row: usize, col: usize, size: usize) -> [usize; 8] {
    let mut neighbors = [0; 8];
    for dir in Direction::COMPASS {
        let (dr, dc) = dir.offset();
        let r = (row as isize + dr).rem_euclid(size as isize) as usize;
        let c = (col as isize + dc).rem_euclid(size as isize) as usize;
        neighbors[dir.index()] = r * size + c;
    }
    neighbors
}
