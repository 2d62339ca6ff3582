//! The toric code as a decodable memory.

use harrington_ca::{CodeModel, Direction};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::lattice::ToricLattice;
use crate::noise::apply_bit_flips;
use crate::syndrome::{has_logical_error, measure_plaquettes};

/// Toric code memory under bit-flip noise with its own random source.
#[derive(Debug, Clone)]
pub struct ToricCode {
    lattice: ToricLattice,
    syndromes: Vec<bool>,
    rng: StdRng,
}

impl ToricCode {
    /// Clean L×L code seeded from the OS entropy source.
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Clean L×L code with a reproducible noise stream.
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: StdRng) -> Self {
        Self {
            lattice: ToricLattice::new(size),
            syndromes: vec![false; size * size],
            rng,
        }
    }

    /// Restart the noise stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn lattice(&self) -> &ToricLattice {
        &self.lattice
    }

    pub fn lattice_mut(&mut self) -> &mut ToricLattice {
        &mut self.lattice
    }
}

impl CodeModel for ToricCode {
    fn size(&self) -> usize {
        self.lattice.size()
    }

    fn reset(&mut self) {
        self.lattice.clear();
        self.syndromes.iter_mut().for_each(|s| *s = false);
    }

    fn inject_noise(&mut self, p: f64) {
        apply_bit_flips(&mut self.lattice, p, &mut self.rng);
    }

    fn measure_syndromes(&mut self) -> &[bool] {
        measure_plaquettes(&self.lattice, &mut self.syndromes);
        &self.syndromes
    }

    fn apply_correction(&mut self, row: usize, col: usize, dir: Direction) {
        self.lattice.flip(row, col, dir);
    }

    fn has_logical_error(&self) -> bool {
        has_logical_error(&self.lattice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Edge, EdgeDir};

    #[test]
    fn test_same_seed_same_noise() {
        let mut a = ToricCode::with_seed(9, 42);
        let mut b = ToricCode::with_seed(9, 42);
        for _ in 0..10 {
            a.inject_noise(0.05);
            b.inject_noise(0.05);
        }
        assert_eq!(a.lattice().errors(), b.lattice().errors());

        a.reset();
        a.reseed(42);
        let mut c = ToricCode::with_seed(9, 42);
        a.inject_noise(0.3);
        c.inject_noise(0.3);
        assert_eq!(a.lattice().errors(), c.lattice().errors(), "reseed restarts the stream");
    }

    #[test]
    fn test_corrections_move_defects() {
        let mut code = ToricCode::with_seed(9, 0);
        code.lattice_mut().toggle(Edge { dir: EdgeDir::Vertical, row: 0, col: 1 });
        let syndromes = code.measure_syndromes().to_vec();
        assert!(syndromes[0] && syndromes[1]);

        // (0,0) moves east onto (0,1): the pair annihilates.
        let mut corrections = vec![None; 81];
        corrections[0] = Some(Direction::E);
        code.apply_corrections(&corrections);
        assert!(code.measure_syndromes().iter().all(|&s| !s));
        assert_eq!(code.lattice().weight(), 0);
    }

    #[test]
    fn test_every_cardinal_correction_toggles_two_plaquettes() {
        for dir in Direction::CARDINAL {
            let mut code = ToricCode::with_seed(9, 0);
            code.apply_correction(4, 4, dir);
            let defects = code.measure_syndromes().iter().filter(|&&s| s).count();
            assert_eq!(defects, 2, "{} correction", dir);
            assert!(code.measure_syndromes()[4 * 9 + 4], "{} correction touches its own cell", dir);
        }
    }

    #[test]
    fn test_reset_clears_errors() {
        let mut code = ToricCode::with_seed(9, 7);
        code.inject_noise(0.5);
        code.measure_syndromes();
        code.reset();
        assert_eq!(code.lattice().weight(), 0);
        assert!(!code.has_logical_error());
    }
}
