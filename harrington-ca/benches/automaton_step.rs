// benches/automaton_step.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use harrington_ca::{Automaton, AutomatonConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_syndromes(size: usize, density: f64, seed: u64) -> Vec<Vec<bool>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..64)
        .map(|_| (0..size * size).map(|_| rng.gen::<f64>() < density).collect())
        .collect()
}

fn benchmark_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_step");

    for size in [9usize, 27, 81] {
        let frames = random_syndromes(size, 0.01, 7);
        group.bench_with_input(BenchmarkId::from_parameter(size), &frames, |b, frames| {
            let mut ca = Automaton::new(AutomatonConfig::new(size)).unwrap();
            let mut i = 0;
            b.iter(|| {
                let out = ca.step(black_box(&frames[i % frames.len()])).unwrap();
                i += 1;
                black_box(out.len())
            });
        });
    }

    group.finish();
}

fn benchmark_reset(c: &mut Criterion) {
    c.bench_function("automaton_reset_81", |b| {
        let mut ca = Automaton::new(AutomatonConfig::new(81)).unwrap();
        b.iter(|| ca.reset());
    });
}

criterion_group!(benches, benchmark_step, benchmark_reset);
criterion_main!(benches);
