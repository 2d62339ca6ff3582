//! # harrington-ca
//!
//! Hierarchical, purely local cellular-automaton decoder for the toric code.
//!
//! Every tick each cell of an L×L torus (L = 3^d) receives one defect bit and
//! answers with at most one correction direction, talking only to its 8
//! neighbors. Defects that cannot be paired locally are escalated through a
//! self-similar hierarchy of 3×3 colonies: level k groups 3^k × 3^k cells,
//! accumulates evidence for U^k ticks and then moves the coarse defect one
//! colony towards its parent's center.
//!
//! ## Layout
//!
//! - [`direction`]: colony addressing and the 9 directional labels
//! - [`rule`]: the geometric decision table shared by all levels
//! - [`level`]: relay / accumulate / decide state per coarse level
//! - [`cell`]: the three-phase per-cell update
//! - [`automaton`]: the grid, its torus wiring and the global phase order
//! - [`model`]: what a code model must offer to be decoded
//!
//! ## Usage
//!
//! ```
//! use harrington_ca::prelude::*;
//!
//! let mut ca = Automaton::new(AutomatonConfig::new(9)).unwrap();
//! let mut syndromes = vec![false; 81];
//! syndromes[0] = true;
//! let corrections = ca.step(&syndromes).unwrap();
//! assert_eq!(corrections[0], Some(Direction::E));
//! ```

pub mod automaton;
pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod level;
pub mod model;
pub mod rule;

pub use automaton::Automaton;
pub use config::{AutomatonConfig, Thresholds};
pub use direction::Direction;
pub use error::AutomatonError;
pub use model::CodeModel;

pub mod prelude {
    pub use crate::automaton::*;
    pub use crate::cell::*;
    pub use crate::config::*;
    pub use crate::direction::*;
    pub use crate::error::*;
    pub use crate::level::*;
    pub use crate::model::*;
    pub use crate::rule::Window;
}
