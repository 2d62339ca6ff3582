//! Monte Carlo memory lifetime: how long the decoder keeps the code alive.
//!
//! Every tick the code suffers fresh bit-flip noise with probability p per
//! qubit, the decoder sees one round of plaquette syndromes and its
//! corrections are applied immediately. A trial ends at the first tick after
//! which the accumulated error chain is logically non-trivial; its length in
//! ticks is the **lifetime**. Lifetimes grow with L below threshold.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use harrington_ca::{Automaton, AutomatonConfig, CodeModel};
use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::code::ToricCode;
use crate::error::SimError;

/// Configuration for a lifetime experiment.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Decoder parameters; `automaton.size` is the lattice size L.
    pub automaton: AutomatonConfig,
    /// Physical bit-flip probability per qubit per tick.
    pub p_error: f64,
    /// Number of Monte Carlo trials.
    pub trials: usize,
    /// Trial i draws its noise from seed `seed + i`.
    pub seed: u64,
    /// Stop a trial after this many ticks without a logical error.
    pub max_steps: Option<u64>,
}

impl SimConfig {
    pub fn new(size: usize, p_error: f64, trials: usize) -> Self {
        Self {
            automaton: AutomatonConfig::new(size),
            p_error,
            trials,
            ..Self::default()
        }
    }

    pub fn with_automaton(mut self, automaton: AutomatonConfig) -> Self {
        self.automaton = automaton;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Lattice size L.
    pub fn size(&self) -> usize {
        self.automaton.size
    }

    /// Noise seed of trial `i`.
    pub fn trial_seed(&self, i: usize) -> u64 {
        self.seed.wrapping_add(i as u64)
    }

    /// Check the experiment parameters. The decoder parameters are left to
    /// [`Automaton::new`].
    pub fn validate(&self) -> Result<(), SimError> {
        if !(0.0..=1.0).contains(&self.p_error) {
            return Err(SimError::InvalidProbability(self.p_error));
        }
        if self.p_error == 0.0 && self.max_steps.is_none() {
            return Err(SimError::Unbounded);
        }
        if self.trials == 0 {
            return Err(SimError::NoTrials);
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            automaton: AutomatonConfig::default(),
            p_error: 3e-3,
            trials: 100,
            seed: 0,
            max_steps: None,
        }
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    /// Ticks survived.
    pub lifetime: u64,
    /// False when the trial hit the step limit first.
    pub failed: bool,
}

/// Result of a lifetime experiment.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Lattice size.
    pub size: usize,
    /// Physical error rate.
    pub p_error: f64,
    /// Lifetime of every trial, in trial order.
    pub lifetimes: Vec<u64>,
    /// Trials stopped by the step limit.
    pub censored: usize,
    /// Mean lifetime.
    pub mean_lifetime: f64,
    /// Population standard deviation of the lifetimes.
    pub std_lifetime: f64,
}

impl SimResult {
    pub fn trials(&self) -> usize {
        self.lifetimes.len()
    }
}

/// Run one trial from a clean code and a reset decoder.
///
/// Loops noise → measure → decode → correct until the code reports a
/// logical error, or until `max_steps` ticks have passed.
pub fn run_trial<M: CodeModel>(
    model: &mut M,
    automaton: &mut Automaton,
    p: f64,
    max_steps: Option<u64>,
) -> Result<Trial, SimError> {
    if model.size() != automaton.size() {
        return Err(SimError::SizeMismatch {
            code: model.size(),
            decoder: automaton.size(),
        });
    }

    model.reset();
    automaton.reset();

    let mut lifetime = 0;
    while !model.has_logical_error() {
        if max_steps.map_or(false, |max| lifetime >= max) {
            return Ok(Trial { lifetime, failed: false });
        }
        model.inject_noise(p);
        let corrections = automaton.step(model.measure_syndromes())?;
        model.apply_corrections(corrections);
        lifetime += 1;
    }
    Ok(Trial { lifetime, failed: true })
}

/// Run a full lifetime experiment.
pub fn run_experiment(config: &SimConfig) -> Result<SimResult, SimError> {
    config.validate()?;
    let template = Automaton::new(config.automaton.clone())?;
    let trials = run_trials(config, &template)?;

    let lifetimes: Vec<u64> = trials.iter().map(|t| t.lifetime).collect();
    let censored = trials.iter().filter(|t| !t.failed).count();
    let (mean_lifetime, std_lifetime) = lifetime_stats(&lifetimes);

    Ok(SimResult {
        size: config.size(),
        p_error: config.p_error,
        lifetimes,
        censored,
        mean_lifetime,
        std_lifetime,
    })
}

#[cfg(feature = "parallel")]
fn run_trials(config: &SimConfig, template: &Automaton) -> Result<Vec<Trial>, SimError> {
    (0..config.trials)
        .into_par_iter()
        .map_init(|| template.clone(), |ca, i| seeded_trial(config, ca, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_trials(config: &SimConfig, template: &Automaton) -> Result<Vec<Trial>, SimError> {
    let mut ca = template.clone();
    (0..config.trials)
        .map(|i| seeded_trial(config, &mut ca, i))
        .collect()
}

fn seeded_trial(config: &SimConfig, ca: &mut Automaton, i: usize) -> Result<Trial, SimError> {
    let mut code = ToricCode::with_seed(config.size(), config.trial_seed(i));
    let trial = run_trial(&mut code, ca, config.p_error, config.max_steps)?;
    debug!(
        "trial {} (L={}, p={}): lifetime {}{}",
        i,
        config.size(),
        config.p_error,
        trial.lifetime,
        if trial.failed { "" } else { " (censored)" }
    );
    Ok(trial)
}

/// Run an experiment for every (L, p) pair. Outer index is the size.
pub fn lifetime_sweep(
    sizes: &[usize],
    error_rates: &[f64],
    base: &SimConfig,
) -> Result<Vec<Vec<SimResult>>, SimError> {
    sizes
        .iter()
        .map(|&size| {
            info!("lattice size {}: {} rates x {} trials", size, error_rates.len(), base.trials);
            error_rates
                .iter()
                .map(|&p| {
                    let mut config = base.clone();
                    config.automaton.size = size;
                    config.p_error = p;
                    let result = run_experiment(&config)?;
                    info!("L={} p={}: mean lifetime {:.2}", size, p, result.mean_lifetime);
                    Ok(result)
                })
                .collect()
        })
        .collect()
}

/// Mean and population standard deviation.
pub fn lifetime_stats(lifetimes: &[u64]) -> (f64, f64) {
    if lifetimes.is_empty() {
        return (0.0, 0.0);
    }
    let n = lifetimes.len() as f64;
    let mean = lifetimes.iter().map(|&l| l as f64).sum::<f64>() / n;
    let var = lifetimes
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}

/// Report file for a (L, p) pair: `L=9_p=333.csv` for p = 0.003.
pub fn lifetime_file_name(size: usize, p: f64) -> String {
    let inverse = if p > 0.0 {
        ((1.0 / p).trunc() as u64).to_string()
    } else {
        "inf".to_string()
    };
    format!("L={}_p={}.csv", size, inverse)
}

/// Append every lifetime of `result`, one per line, to its report file
/// inside `dir`. Returns the file path.
pub fn append_lifetimes(dir: &Path, result: &SimResult) -> Result<PathBuf, SimError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(lifetime_file_name(result.size, result.p_error));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut out = BufWriter::new(file);
    for lifetime in &result.lifetimes {
        writeln!(out, "{}", lifetime)?;
    }
    out.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harrington_ca::AutomatonError;

    #[test]
    fn test_zero_error_rate_runs_to_step_limit() {
        let result = run_experiment(&SimConfig::new(9, 0.0, 4).with_max_steps(50)).unwrap();
        assert_eq!(result.lifetimes, vec![50; 4]);
        assert_eq!(result.censored, 4, "no trial can fail without noise");
        assert_eq!(result.std_lifetime, 0.0);
    }

    #[test]
    fn test_certain_flips_fail_after_one_tick() {
        // Flipping every qubit leaves no syndrome but odd parity on every row.
        let result = run_experiment(&SimConfig::new(9, 1.0, 5)).unwrap();
        assert_eq!(result.lifetimes, vec![1; 5]);
        assert_eq!(result.censored, 0);
        assert_eq!(result.mean_lifetime, 1.0);
    }

    #[test]
    fn test_same_seed_same_lifetimes() {
        let config = SimConfig::new(9, 0.02, 6).with_seed(11).with_max_steps(20_000);
        let a = run_experiment(&config).unwrap();
        let b = run_experiment(&config).unwrap();
        assert_eq!(a.lifetimes, b.lifetimes);
        assert!(a.lifetimes.iter().all(|&l| l >= 1));
    }

    #[test]
    fn test_trial_matches_experiment() {
        let config = SimConfig::new(9, 0.02, 3).with_seed(5).with_max_steps(20_000);
        let result = run_experiment(&config).unwrap();
        let mut ca = Automaton::new(config.automaton.clone()).unwrap();
        for i in 0..3 {
            let mut code = ToricCode::with_seed(9, config.trial_seed(i));
            let trial = run_trial(&mut code, &mut ca, 0.02, config.max_steps).unwrap();
            assert_eq!(trial.lifetime, result.lifetimes[i], "trial {} is reproducible alone", i);
        }
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            run_experiment(&SimConfig::new(9, -0.1, 1)),
            Err(SimError::InvalidProbability(_))
        ));
        assert!(matches!(
            run_experiment(&SimConfig::new(9, 1.5, 1)),
            Err(SimError::InvalidProbability(_))
        ));
        assert!(matches!(run_experiment(&SimConfig::new(9, 0.0, 1)), Err(SimError::Unbounded)));
        assert!(matches!(run_experiment(&SimConfig::new(9, 0.1, 0)), Err(SimError::NoTrials)));
        assert!(matches!(
            run_experiment(&SimConfig::new(10, 0.1, 1)),
            Err(SimError::Automaton(AutomatonError::InvalidSize { size: 10 }))
        ));
    }

    #[test]
    fn test_decoder_checked_only_at_construction() {
        let config = SimConfig::new(10, 0.1, 1);
        assert!(config.validate().is_ok(), "run parameters alone are fine");
        assert!(matches!(
            run_experiment(&config.clone().with_automaton(AutomatonConfig::new(9).with_period(0))),
            Err(SimError::Automaton(AutomatonError::ZeroPeriod))
        ));
        // Run parameters are still checked before any decoder is built.
        assert!(matches!(
            run_experiment(&SimConfig::new(10, 2.0, 1)),
            Err(SimError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_trial_rejects_size_mismatch() {
        let mut code = ToricCode::with_seed(3, 0);
        let mut ca = Automaton::new(AutomatonConfig::new(9)).unwrap();
        assert!(matches!(
            run_trial(&mut code, &mut ca, 0.1, None),
            Err(SimError::SizeMismatch { code: 3, decoder: 9 })
        ));
    }

    #[test]
    fn test_lifetime_stats() {
        let (mean, sd) = lifetime_stats(&[1, 2, 3, 4]);
        assert_eq!(mean, 2.5);
        assert!((sd - 1.25f64.sqrt()).abs() < 1e-12, "population sd, got {}", sd);
        assert_eq!(lifetime_stats(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_lifetime_file_name() {
        assert_eq!(lifetime_file_name(9, 3e-3), "L=9_p=333.csv");
        assert_eq!(lifetime_file_name(27, 0.05), "L=27_p=20.csv");
        assert_eq!(lifetime_file_name(9, 0.0), "L=9_p=inf.csv");
    }

    #[test]
    fn test_append_lifetimes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data");
        let result = run_experiment(&SimConfig::new(3, 1.0, 3)).unwrap();

        let path = append_lifetimes(&out, &result).unwrap();
        append_lifetimes(&out, &result).unwrap();

        assert_eq!(path, out.join("L=3_p=1.csv"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6, "second run appends");
        assert!(text.lines().all(|l| l == "1"));
    }

    #[test]
    fn test_sweep_shape() {
        let base = SimConfig::new(9, 0.0, 2).with_max_steps(5);
        let results = lifetime_sweep(&[3, 9], &[0.0, 1.0], &base).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|row| row.len() == 2));
        assert_eq!(results[1][0].size, 9);
        assert_eq!(results[0][1].p_error, 1.0);
        assert_eq!(results[0][1].lifetimes, vec![1, 1]);
    }
}
