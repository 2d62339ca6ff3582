//! A single automaton cell.
//!
//! A cell sees only its 8 neighbors. Each tick it goes through three phases,
//! driven by the [`crate::Automaton`] with a barrier between them:
//!
//! 1. **acquire** – copy neighbor data into its inbox and staged lanes,
//! 2. **commit** – advance its clocks and make the staged lanes current,
//! 3. **decide** – pick at most one correction, finest active level first.

use smallvec::SmallVec;

use crate::config::Thresholds;
use crate::direction::Direction;
use crate::level::{Lanes, LevelState};
use crate::rule::{self, Window};

/// Inline capacity for per-level storage; 4 levels covers L up to 243.
pub const INLINE_LEVELS: usize = 4;

/// Data a cell reads from its neighbors during one acquire phase.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    /// Neighbor center bits, indexed by compass direction.
    pub window: [bool; 8],
    /// Lanes arriving at each coarse level (index k-1 for level k).
    pub levels: SmallVec<[Lanes; INLINE_LEVELS]>,
}

/// One grid position of the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    address: Direction,
    window: Window,
    neighbors: [usize; 8],
    levels: SmallVec<[LevelState; INLINE_LEVELS]>,
    thresholds: Thresholds,
}

impl Cell {
    /// Cell at `(row, col)` with its level-0 address, neighbor arena
    /// indices (in compass order) and one [`LevelState`] per coarse level.
    pub fn new(
        row: usize,
        col: usize,
        address: Direction,
        neighbors: [usize; 8],
        levels: SmallVec<[LevelState; INLINE_LEVELS]>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            row,
            col,
            address,
            window: Window::empty(),
            neighbors,
            levels,
            thresholds,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Level-0 address inside the cell's immediate 3×3 colony.
    pub fn address(&self) -> Direction {
        self.address
    }

    /// Physical defect window: own bit at C, neighbor bits around it.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Own physical defect bit for the current tick.
    pub fn syndrome(&self) -> bool {
        self.window[Direction::C]
    }

    /// Arena index of the neighbor in direction `dir`, `None` for C.
    pub fn neighbor(&self, dir: Direction) -> Option<usize> {
        self.neighbors.get(dir.index()).copied()
    }

    /// Coarse levels 1..d-1, finest first.
    pub fn levels(&self) -> &[LevelState] {
        &self.levels
    }

    /// State at coarse level `k` (k ≥ 1).
    pub fn level(&self, k: usize) -> Option<&LevelState> {
        k.checked_sub(1).and_then(|i| self.levels.get(i))
    }

    /// Forget everything observed so far.
    pub fn reset(&mut self) {
        self.window.clear();
        self.levels.iter_mut().for_each(LevelState::reset);
    }

    /// Set the physical defect bit for this tick.
    pub fn inject(&mut self, syndrome: bool) {
        self.window[Direction::C] = syndrome;
    }

    /// Fill `inbox` from the neighbors' committed state.
    ///
    /// Center bits are the ones injected this tick; lanes are the ones
    /// committed at the end of the previous tick.
    pub fn gather(&self, cells: &[Cell], inbox: &mut Inbox) {
        for dir in Direction::COMPASS {
            inbox.window[dir.index()] = cells[self.neighbors[dir.index()]].syndrome();
        }

        inbox.levels.clear();
        for k in 0..self.levels.len() {
            let mut incoming = Lanes::default();
            for dir in Direction::COMPASS {
                // Lane `dir` travels towards `dir`, so it comes from the opposite side.
                if let Some(from) = dir.opposite() {
                    let upstream = &cells[self.neighbors[from.index()]].levels[k];
                    incoming.count[dir.index()] = upstream.lanes().count[dir.index()];
                    if dir.is_cardinal() {
                        incoming.flip[dir.index()] = upstream.lanes().flip[dir.index()];
                    }
                }
            }
            inbox.levels.push(incoming);
        }
    }

    /// Copy a gathered inbox into the window and staged lanes.
    pub fn acquire(&mut self, inbox: &Inbox) {
        for dir in Direction::COMPASS {
            self.window[dir] = inbox.window[dir.index()];
        }
        for (state, &incoming) in self.levels.iter_mut().zip(inbox.levels.iter()) {
            state.stage(incoming);
        }
    }

    /// Advance every coarse level. Level 0 has nothing staged.
    pub fn commit(&mut self) {
        let center = self.syndrome();
        for state in self.levels.iter_mut() {
            state.commit(center);
        }
    }

    /// Correction for this tick.
    ///
    /// Each level runs its decision in turn from finest to coarsest; the
    /// first one to issue a correction wins. Without one, the physical
    /// window drives the level-0 rule.
    pub fn decide(&mut self) -> Option<Direction> {
        let thresholds = self.thresholds;
        for state in self.levels.iter_mut() {
            if let Some(dir) = state.decide(&thresholds) {
                return Some(dir);
            }
        }
        rule::decide(self.address, &self.window)
    }
}
