//! Automaton parameters.
//!
//! The defaults are the benchmark point used throughout the decoder
//! literature for this rule: L = 9, U = 10, f_C = 0.9, f_N = 0.4.

use log::warn;

use crate::direction::{Direction, COLONY};
use crate::error::AutomatonError;

/// Default lattice side.
pub const DEFAULT_SIZE: usize = 9;
/// Default base work period U.
pub const DEFAULT_PERIOD: u64 = 10;
/// Default fraction of a work period a representative's own defect must persist.
pub const DEFAULT_CENTER_THRESHOLD: f64 = 0.9;
/// Default fraction of a work period a neighboring colony's defect must persist.
pub const DEFAULT_NEIGHBOR_THRESHOLD: f64 = 0.4;

/// Fractions of a work period above which an accumulated count becomes a
/// coarse-grained defect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// f_C: applied to the representative's own count.
    pub center: f64,
    /// f_N: applied to counts relayed from the 8 neighboring colonies.
    pub neighbor: f64,
}

impl Thresholds {
    pub fn new(center: f64, neighbor: f64) -> Self {
        Self { center, neighbor }
    }

    /// Threshold fraction for a window position.
    pub fn for_position(&self, pos: Direction) -> f64 {
        if pos == Direction::C {
            self.center
        } else {
            self.neighbor
        }
    }

    fn validate(&self) -> Result<(), AutomatonError> {
        for (name, value) in [("center", self.center), ("neighbor", self.neighbor)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AutomatonError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_THRESHOLD, DEFAULT_NEIGHBOR_THRESHOLD)
    }
}

/// Configuration of a decoder automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomatonConfig {
    /// Lattice side L. Must be 3^d.
    pub size: usize,
    /// Base work period U; level k works on U^k ticks.
    pub period: u64,
    /// Count thresholds for the coarse levels.
    pub thresholds: Thresholds,
}

impl AutomatonConfig {
    /// Default parameters on an L×L lattice.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn with_thresholds(mut self, center: f64, neighbor: f64) -> Self {
        self.thresholds = Thresholds::new(center, neighbor);
        self
    }

    /// Check every construction contract and return the hierarchy depth d.
    pub fn validate(&self) -> Result<u32, AutomatonError> {
        let depth = colony_depth(self.size).ok_or(AutomatonError::InvalidSize { size: self.size })?;
        if self.period == 0 {
            return Err(AutomatonError::ZeroPeriod);
        }
        self.thresholds.validate()?;
        for level in 1..depth {
            let period = self.level_period(level)?;
            let scale = level_scale(level);
            if period <= scale as u64 {
                warn!(
                    "level {}: work period {} does not exceed colony scale {}; its flip signals never issue",
                    level, period, scale
                );
            }
        }
        Ok(depth)
    }

    /// Work period U_k = U^k of a level.
    pub fn level_period(&self, level: u32) -> Result<u64, AutomatonError> {
        self.period.checked_pow(level).ok_or(AutomatonError::PeriodOverflow {
            period: self.period,
            level,
        })
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            period: DEFAULT_PERIOD,
            thresholds: Thresholds::default(),
        }
    }
}

/// Colony scale Q_k = 3^k of a level.
pub fn level_scale(level: u32) -> usize {
    COLONY.pow(level)
}

/// The d with `size == 3^d`, if any.
pub fn colony_depth(size: usize) -> Option<u32> {
    if size == 0 {
        return None;
    }
    let mut rest = size;
    let mut depth = 0;
    while rest % COLONY == 0 {
        rest /= COLONY;
        depth += 1;
    }
    (rest == 1).then_some(depth)
}
