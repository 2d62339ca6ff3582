//! Per-cell memory for one coarse hierarchy level.
//!
//! At level k the lattice is tiled by 3^k × 3^k blocks, one cell of which
//! (the block center) is the **representative**. Representatives broadcast
//! their own defect bit on all 8 count lanes every tick and tally what
//! arrives from the 8 neighboring representatives. Every other cell is a
//! relay that forwards count and flip lanes one hop per tick.
//!
//! Once per work period U_k a representative thresholds its tallies into a
//! coarse 3×3 window and runs the decision rule on it. A resulting move is
//! raised as a flip signal, which travels outwards along its lane; Q_k ticks
//! after the decision every cell holding the signal issues the correction,
//! forming a chain that carries the defect to the next representative.

use log::trace;

use crate::config::Thresholds;
use crate::direction::Direction;
use crate::rule::{self, Window};

/// Signal lanes carried between cells at one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lanes {
    /// Count lanes, indexed by compass direction of travel.
    pub count: [bool; 8],
    /// Flip lanes, indexed by cardinal direction of travel.
    pub flip: [bool; 4],
}

impl Lanes {
    /// True if any count lane carries a signal.
    pub fn has_count(&self) -> bool {
        self.count.iter().any(|&bit| bit)
    }
}

/// Relay and decision state of one cell at one hierarchy level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelState {
    address: Option<Direction>,
    period: u64,
    scale: u64,
    age: u64,
    current: Lanes,
    staged: Lanes,
    counts: [u64; 9],
}

impl LevelState {
    /// Fresh state for a cell with the given address at a level with work
    /// period `period` (U_k) and colony scale `scale` (Q_k).
    pub fn new(address: Option<Direction>, period: u64, scale: u64) -> Self {
        Self {
            address,
            period,
            scale,
            age: 0,
            current: Lanes::default(),
            staged: Lanes::default(),
            counts: [0; 9],
        }
    }

    /// Address inside the level's colony; `None` for relays.
    pub fn address(&self) -> Option<Direction> {
        self.address
    }

    pub fn is_representative(&self) -> bool {
        self.address.is_some()
    }

    /// Work period U_k.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Colony scale Q_k.
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Ticks since the last decision point, modulo U_k.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Lanes as committed at the end of the last tick.
    pub fn lanes(&self) -> &Lanes {
        &self.current
    }

    /// Lanes staged by the last acquire, not yet committed.
    pub fn staged(&self) -> &Lanes {
        &self.staged
    }

    /// Accumulated defect counts, indexed by window position.
    pub fn counts(&self) -> &[u64; 9] {
        &self.counts
    }

    /// Zero every counter and lane. Address, period and scale are structural.
    pub fn reset(&mut self) {
        self.age = 0;
        self.current = Lanes::default();
        self.staged = Lanes::default();
        self.counts = [0; 9];
    }

    /// Stage the lanes arriving from the neighbors for this tick.
    pub fn stage(&mut self, incoming: Lanes) {
        self.staged = incoming;
    }

    /// Advance the clock and commit the staged lanes.
    ///
    /// `center` is the cell's own physical defect bit for this tick.
    pub fn commit(&mut self, center: bool) {
        self.age = (self.age + 1) % self.period;

        if self.is_representative() {
            self.current.count = [center; 8];
            self.counts[Direction::C.index()] += u64::from(center);
            for dir in Direction::COMPASS {
                // A signal travelling towards opp(dir) was sent from the dir side.
                if let Some(from) = dir.opposite() {
                    self.counts[dir.index()] += u64::from(self.staged.count[from.index()]);
                }
            }
        } else {
            self.current = self.staged;
        }
    }

    /// Run this level's part of the tick's decision.
    ///
    /// At the end of a work period a representative may raise a flip signal;
    /// Q_k ticks later any cell holding a flip signal issues it. Returns the
    /// correction issued this tick, if any.
    pub fn decide(&mut self, thresholds: &Thresholds) -> Option<Direction> {
        match self.address {
            Some(address) if self.age == 0 => {
                let window = self.coarse_window(thresholds);
                self.counts = [0; 9];
                if let Some(dir) = rule::decide(address, &window) {
                    trace!("raising {} flip signal at {} (period {})", dir, address, self.period);
                    self.current.flip[dir.index()] = true;
                }
                None
            }
            _ if self.age == self.scale => self.issue_flip(),
            _ => None,
        }
    }

    /// Threshold the tallies of the finished work period into a window.
    fn coarse_window(&self, thresholds: &Thresholds) -> Window {
        let mut window = Window::empty();
        let period = self.period as f64;
        for pos in Direction::ALL {
            window[pos] = self.counts[pos.index()] as f64 >= thresholds.for_position(pos) * period;
        }
        window
    }

    /// Clear and return the first pending flip, scanning N, W, E, S.
    fn issue_flip(&mut self) -> Option<Direction> {
        let dir = Direction::CARDINAL
            .into_iter()
            .find(|dir| self.current.flip[dir.index()])?;
        self.current.flip[dir.index()] = false;
        Some(dir)
    }
}
