//! Lifetime scaling: how the Harrington decoder's memory time grows with L.
//!
//! Key deductions:
//! 1. Below threshold: the mean lifetime grows with every level of hierarchy added
//! 2. Above threshold: larger lattices die as fast as (or faster than) small ones
//! 3. The decoder is purely local, yet it protects against chains of any length
//!
//! L = 3 has no coarse level, so it only ever fixes adjacent defect pairs and
//! serves as the baseline.

use toric_code_sim::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║     Harrington Decoder Lifetime Scaling on T²           ║");
    println!("║     Local Cellular-Automaton Memory, Bit-Flip Noise     ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    // ═══ 1. Mean lifetime table ═══
    println!("═══ 1. Mean Memory Lifetime (ticks) ═══");
    println!();

    let sizes = [3, 9, 27];
    let rates = [0.02, 0.01, 0.005];
    let base = SimConfig::default().with_seed(2024).with_max_steps(200_000);
    let trials = 40;

    print!("  p_err  ");
    for &n in &sizes {
        print!(" {:>10}", format!("L={}", n));
    }
    println!();
    print!("  ─────  ");
    for _ in &sizes {
        print!(" ──────────");
    }
    println!();

    let base = SimConfig { trials, ..base };
    let results = match lifetime_sweep(&sizes, &rates, &base) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("sweep failed: {}", e);
            return;
        }
    };

    for (i, &p) in rates.iter().enumerate() {
        print!("  {:.3}  ", p);
        for size_results in &results {
            print!(" {:>10.1}", size_results[i].mean_lifetime);
        }
        println!();
    }

    // ═══ 2. Growth factor per hierarchy level ═══
    println!();
    println!("═══ 2. Growth Per Added Level ═══");
    println!();
    println!("Ratio of mean lifetimes between consecutive sizes:");
    println!();

    for (i, &p) in rates.iter().enumerate() {
        print!("  p = {:.3}:", p);
        for pair in results.windows(2) {
            let ratio = pair[1][i].mean_lifetime / pair[0][i].mean_lifetime;
            print!("  ×{:.2}", ratio);
        }
        println!();
    }

    let censored: usize = results.iter().flatten().map(|r| r.censored).sum();
    if censored > 0 {
        println!();
        println!("  ({} trials reached the step limit; their lifetimes are lower bounds)", censored);
    }
}
