//! `harrington`: memory lifetime benchmark and signal trace for the
//! Harrington decoder on the toric code.
//!
//! **Usage:**
//! ```text
//! harrington bench [--sizes 9,27] [--rates 0.003,0.002] [--trials 100] [--out data]
//! harrington trace [--size 9] [--rate 0.003] [--steps 100] [--out .]
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-trial output.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use toric_code_sim::prelude::*;

/// Toric code memory decoded by a hierarchical cellular automaton.
#[derive(Parser, Debug)]
#[command(name = "harrington", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure memory lifetimes and append them to CSV reports
    Bench(BenchArgs),
    /// Record one trajectory as qubit, flip and count signal traces
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct DecoderArgs {
    /// Base work period U
    #[arg(long, default_value_t = 10)]
    period: u64,

    /// Center threshold f_C
    #[arg(long = "fc", default_value_t = 0.9)]
    center_threshold: f64,

    /// Neighbor threshold f_N
    #[arg(long = "fn", default_value_t = 0.4)]
    neighbor_threshold: f64,

    /// Base noise seed (default: random)
    #[arg(long)]
    seed: Option<u64>,
}

impl DecoderArgs {
    fn config(&self, size: usize) -> AutomatonConfig {
        AutomatonConfig::new(size)
            .with_period(self.period)
            .with_thresholds(self.center_threshold, self.neighbor_threshold)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Lattice sizes (powers of 3)
    #[arg(long, value_delimiter = ',', default_value = "9")]
    sizes: Vec<usize>,

    /// Physical error rates
    #[arg(long, value_delimiter = ',', default_value = "0.003")]
    rates: Vec<f64>,

    /// Trials per (size, rate) pair
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// Censor trials after this many ticks
    #[arg(long)]
    max_steps: Option<u64>,

    /// Directory for the lifetime reports
    #[arg(long, default_value = "data")]
    out: PathBuf,

    #[command(flatten)]
    decoder: DecoderArgs,
}

#[derive(Args, Debug)]
struct TraceArgs {
    /// Lattice size (power of 3)
    #[arg(long, default_value_t = 9)]
    size: usize,

    /// Physical error rate
    #[arg(long, default_value_t = 3e-3)]
    rate: f64,

    /// Ticks to record
    #[arg(long, default_value_t = 100)]
    steps: usize,

    /// Directory for qubits.csv, flipsigs.csv and countsigs.csv
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    decoder: DecoderArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let start = Instant::now();
    match cli.command {
        Command::Bench(args) => bench(&args)?,
        Command::Trace(args) => trace(&args)?,
    }
    println!("[[ time: {:.3} secs ]]", start.elapsed().as_secs_f64());
    Ok(())
}

fn bench(args: &BenchArgs) -> Result<()> {
    let mut base = SimConfig::new(0, 0.0, args.trials)
        .with_automaton(args.decoder.config(0))
        .with_seed(args.decoder.seed());
    base.max_steps = args.max_steps;
    info!("base seed {}", base.seed);

    for &size in &args.sizes {
        println!("--- Lattice size {} ---", size);
        let mut config = base.clone();
        config.automaton.size = size;
        for &p in &args.rates {
            config.p_error = p;
            let result = run_experiment(&config)
                .with_context(|| format!("lifetime experiment failed for L={} p={}", size, p))?;
            let path = append_lifetimes(&args.out, &result)
                .with_context(|| format!("cannot write lifetimes under {}", args.out.display()))?;
            info!("appended {} lifetimes to {}", result.trials(), path.display());
            if result.censored > 0 {
                info!("{} of {} trials hit the step limit", result.censored, result.trials());
            }
            println!("p={}: mu={} (sd {:.2})", p, result.mean_lifetime, result.std_lifetime);
        }
    }
    Ok(())
}

fn trace(args: &TraceArgs) -> Result<()> {
    let config = args.decoder.config(args.size);
    let mut automaton = Automaton::new(config).context("invalid decoder configuration")?;
    let mut code = ToricCode::with_seed(args.size, args.decoder.seed());
    let used = automaton.config();
    info!(
        "tracing L={} for {} ticks (U={}, f_C={}, f_N={})",
        used.size, args.steps, used.period, used.thresholds.center, used.thresholds.neighbor
    );

    fs::create_dir_all(&args.out)
        .with_context(|| format!("cannot create {}", args.out.display()))?;
    let mut sinks = TraceSinks::new(
        create(&args.out, "qubits.csv")?,
        create(&args.out, "flipsigs.csv")?,
        create(&args.out, "countsigs.csv")?,
    );

    let failure = record_trace(&mut code, &mut automaton, args.rate, args.steps, &mut sinks)
        .context("trace failed")?;
    match failure {
        Some(tick) => info!("logical error at tick {} of {}", tick, args.steps),
        None => info!("no logical error in {} ticks", args.steps),
    }
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
