//! Independent bit-flip noise.
//!
//! Each tick every qubit suffers an X error with probability p, independently
//! of all others and of its history.

use rand::Rng;

use crate::lattice::ToricLattice;

/// Toggle every edge independently with probability `p`.
pub fn apply_bit_flips<R: Rng>(lattice: &mut ToricLattice, p: f64, rng: &mut R) {
    for e in lattice.errors_mut() {
        if rng.gen::<f64>() < p {
            *e ^= true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_rate_never_flips() {
        let mut lat = ToricLattice::new(9);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            apply_bit_flips(&mut lat, 0.0, &mut rng);
        }
        assert_eq!(lat.weight(), 0);
    }

    #[test]
    fn test_unit_rate_toggles_everything() {
        let mut lat = ToricLattice::new(3);
        let mut rng = StdRng::seed_from_u64(2);
        apply_bit_flips(&mut lat, 1.0, &mut rng);
        assert_eq!(lat.weight(), lat.num_edges());
        apply_bit_flips(&mut lat, 1.0, &mut rng);
        assert_eq!(lat.weight(), 0, "flips compose by XOR");
    }

    #[test]
    fn test_error_density() {
        let mut lat = ToricLattice::new(27);
        let mut rng = StdRng::seed_from_u64(3);
        apply_bit_flips(&mut lat, 0.5, &mut rng);
        let total = lat.num_edges();
        let count = lat.weight();
        // At p=0.5, expect ~50% errors. Allow wide range due to randomness.
        assert!(
            count > total / 4 && count < 3 * total / 4,
            "error density at p=0.5 should be near 50%, got {}/{}",
            count,
            total
        );
    }
}
