//! Tick-by-tick trace of one decoding trajectory.
//!
//! Three line-oriented reports, one line per tick, space-separated entries:
//!
//! - **qubits**: `r,c,l` for every erroneous qubit after the tick's noise
//!   (l = 0 for the N qubit, 1 for the W qubit),
//! - **flips**: `r,c,lane` for every level-1 flip lane set after the step,
//! - **counts**: `r,c,0` for every cell carrying any level-1 count signal.
//!
//! Lattices without a level 1 (L < 9) produce empty signal lines.

use std::io::Write;

use harrington_ca::{Automaton, CodeModel, Direction};

use crate::code::ToricCode;
use crate::error::SimError;

/// Destinations for the three reports.
#[derive(Debug)]
pub struct TraceSinks<W: Write> {
    pub qubits: W,
    pub flips: W,
    pub counts: W,
}

impl<W: Write> TraceSinks<W> {
    pub fn new(qubits: W, flips: W, counts: W) -> Self {
        Self { qubits, flips, counts }
    }

    pub fn flush(&mut self) -> Result<(), SimError> {
        self.qubits.flush()?;
        self.flips.flush()?;
        self.counts.flush()?;
        Ok(())
    }
}

/// Reset `code` and `automaton`, run `steps` noisy ticks and write one line
/// per tick to each sink. Returns the tick of the first logical error, if
/// one happened; the trajectory is not stopped by it.
pub fn record_trace<W: Write>(
    code: &mut ToricCode,
    automaton: &mut Automaton,
    p: f64,
    steps: usize,
    sinks: &mut TraceSinks<W>,
) -> Result<Option<usize>, SimError> {
    if code.size() != automaton.size() {
        return Err(SimError::SizeMismatch {
            code: code.size(),
            decoder: automaton.size(),
        });
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::InvalidProbability(p));
    }

    code.reset();
    automaton.reset();
    let mut first_failure = None;

    for tick in 0..steps {
        code.inject_noise(p);
        write_qubits(code, &mut sinks.qubits)?;

        let corrections = automaton.step(code.measure_syndromes())?;
        code.apply_corrections(corrections);
        write_signals(automaton, &mut sinks.flips, &mut sinks.counts)?;

        if first_failure.is_none() && code.has_logical_error() {
            first_failure = Some(tick + 1);
        }
    }

    sinks.flush()?;
    Ok(first_failure)
}

fn write_qubits<W: Write>(code: &ToricCode, out: &mut W) -> Result<(), SimError> {
    for edge in code.lattice().error_sites() {
        write!(out, "{},{},{} ", edge.row, edge.col, edge.dir.slot())?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_signals<W: Write>(automaton: &Automaton, flips: &mut W, counts: &mut W) -> Result<(), SimError> {
    for cell in automaton.cells() {
        let Some(level) = cell.level(1) else {
            continue;
        };
        let lanes = level.lanes();
        for dir in Direction::CARDINAL {
            if lanes.flip[dir.index()] {
                write!(flips, "{},{},{} ", cell.row(), cell.col(), dir.index())?;
            }
        }
        if lanes.has_count() {
            write!(counts, "{},{},0 ", cell.row(), cell.col())?;
        }
    }
    writeln!(flips)?;
    writeln!(counts)?;
    Ok(())
}
