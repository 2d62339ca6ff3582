//! Error type for experiments and reports.

use std::io;

use harrington_ca::AutomatonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
    #[error("error probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("with p = 0 a trial never fails; set a step limit")]
    Unbounded,
    #[error("an experiment needs at least one trial")]
    NoTrials,
    #[error("code has size {code} but the decoder has size {decoder}")]
    SizeMismatch { code: usize, decoder: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}
