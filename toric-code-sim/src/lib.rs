//! # toric-code-sim
//!
//! Toric code quantum memory under bit-flip noise, decoded every tick by the
//! local [`harrington_ca`] automaton.
//!
//! Only X errors are tracked (Pauli frame), as 2L² bits on the edges of an
//! L×L torus. Plaquette defects form the L×L syndrome grid the automaton
//! consumes; its corrections are applied straight back to the frame.
//!
//! ## Physics
//!
//! - **defects**: plaquette stabilizer violations, always created in pairs
//! - **memory lifetime**: ticks until the error chain wraps the torus
//! - **threshold**: below it, lifetimes grow with L

pub mod code;
pub mod error;
pub mod lattice;
pub mod noise;
pub mod simulation;
pub mod syndrome;
pub mod trace;

pub mod prelude {
    pub use crate::code::*;
    pub use crate::error::*;
    pub use crate::lattice::*;
    pub use crate::noise::*;
    pub use crate::simulation::*;
    pub use crate::syndrome::*;
    pub use crate::trace::*;
    pub use harrington_ca::{Automaton, AutomatonConfig, CodeModel, Direction};
}
