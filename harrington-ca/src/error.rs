//! Error type for automaton construction and stepping.

use thiserror::Error;

use crate::direction::COLONY;

/// Contract violations detected by the automaton.
///
/// Construction errors are fatal: no automaton is built. A wrongly shaped
/// syndrome grid is rejected by [`crate::Automaton::step`] before any cell
/// state changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// Lattice side is not an exact power of the colony size.
    #[error("lattice size {size} is not a power of {}", COLONY)]
    InvalidSize { size: usize },
    /// The base work period must be at least one tick.
    #[error("work period must be at least 1")]
    ZeroPeriod,
    /// `period^level` does not fit in a tick counter.
    #[error("work period {period}^{level} overflows the tick counter")]
    PeriodOverflow { period: u64, level: u32 },
    /// A threshold fraction is negative or not finite.
    #[error("{name} threshold must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    /// The syndrome grid handed to `step` has the wrong number of cells.
    #[error("expected {expected} syndromes, got {actual}")]
    SyndromeShape { expected: usize, actual: usize },
}
