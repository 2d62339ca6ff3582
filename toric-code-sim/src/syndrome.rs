//! Syndrome measurement for the toric code.
//!
//! **Plaquette stabilizer** B_p = ∏ X_e for edges e bounding plaquette p.
//! B_p = -1 when an odd number of X errors bound p → **defect** present.
//!
//! **Logical failure**: an X chain that wraps around the torus commutes with
//! every plaquette and cannot be seen by the decoder. We declare the memory
//! lost once more than half the rows carry odd N-qubit parity, or more than
//! half the columns carry odd W-qubit parity.

use crate::lattice::ToricLattice;

/// Stabilizer B_p at plaquette (r, c).
pub fn plaquette_syndrome(lattice: &ToricLattice, row: usize, col: usize) -> bool {
    lattice
        .plaquette_edges(row, col)
        .iter()
        .filter(|&&e| lattice.has_error(e))
        .count()
        % 2
        == 1
}

/// Measure every plaquette into `out`, row-major.
pub fn measure_plaquettes(lattice: &ToricLattice, out: &mut [bool]) {
    let n = lattice.size();
    debug_assert_eq!(out.len(), n * n);
    for (idx, slot) in out.iter_mut().enumerate() {
        *slot = plaquette_syndrome(lattice, idx / n, idx % n);
    }
}

/// Locations of all defects.
pub fn defects(lattice: &ToricLattice) -> Vec<(usize, usize)> {
    let n = lattice.size();
    (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .filter(|&(r, c)| plaquette_syndrome(lattice, r, c))
        .collect()
}

/// Majority-parity logical error check.
pub fn has_logical_error(lattice: &ToricLattice) -> bool {
    let half = lattice.size() / 2;
    let odd_rows = lattice.row_parities().into_iter().filter(|&p| p).count();
    let odd_cols = lattice.column_parities().into_iter().filter(|&p| p).count();
    odd_rows > half || odd_cols > half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Edge, EdgeDir};
    use harrington_ca::Direction;
    use proptest::prelude::*;

    #[test]
    fn test_clean_lattice_no_syndromes() {
        let lat = ToricLattice::new(9);
        let mut out = vec![true; 81];
        measure_plaquettes(&lat, &mut out);
        assert!(out.iter().all(|&s| !s));
        assert!(defects(&lat).is_empty());
        assert!(!has_logical_error(&lat));
    }

    #[test]
    fn test_single_n_error_creates_vertical_pair() {
        let mut lat = ToricLattice::new(9);
        lat.toggle(Edge { dir: EdgeDir::Horizontal, row: 4, col: 4 });
        assert_eq!(defects(&lat), vec![(3, 4), (4, 4)]);
    }

    #[test]
    fn test_single_w_error_creates_horizontal_pair() {
        let mut lat = ToricLattice::new(9);
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 2, col: 0 });
        assert_eq!(defects(&lat), vec![(2, 0), (2, 8)], "pair wraps around");
    }

    #[test]
    fn test_syndrome_count_always_even() {
        let mut lat = ToricLattice::new(9);
        lat.toggle(Edge { dir: EdgeDir::Horizontal, row: 0, col: 0 });
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 2, col: 3 });
        lat.toggle(Edge { dir: EdgeDir::Horizontal, row: 4, col: 1 });
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 1, col: 5 });
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 3, col: 0 });
        assert_eq!(defects(&lat).len() % 2, 0, "defect count must be even");
    }

    #[test]
    fn test_noncontractible_chain_no_syndrome() {
        let mut lat = ToricLattice::new(9);
        // A dual chain crossing every row through the N qubits of column 3.
        for r in 0..9 {
            lat.toggle(Edge { dir: EdgeDir::Horizontal, row: r, col: 3 });
        }
        assert!(defects(&lat).is_empty());
        assert!(has_logical_error(&lat));
    }

    #[test]
    fn test_contractible_loop_no_logical_error() {
        let mut lat = ToricLattice::new(9);
        // The 4 edges meeting at the vertex above-left of cell (2,2).
        lat.toggle(Edge { dir: EdgeDir::Horizontal, row: 2, col: 2 });
        lat.toggle(Edge { dir: EdgeDir::Horizontal, row: 2, col: 1 });
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 2, col: 2 });
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 1, col: 2 });
        assert!(defects(&lat).is_empty());
        assert!(!has_logical_error(&lat));
    }

    #[test]
    fn test_majority_threshold() {
        let mut lat = ToricLattice::new(9);
        for c in 0..4 {
            lat.toggle(Edge { dir: EdgeDir::Vertical, row: 0, col: c });
        }
        assert!(!has_logical_error(&lat), "4 odd columns of 9 is not a majority");
        lat.toggle(Edge { dir: EdgeDir::Vertical, row: 0, col: 4 });
        assert!(has_logical_error(&lat), "5 odd columns of 9 is");
    }

    proptest! {
        #[test]
        fn prop_defects_come_in_pairs(frame in prop::collection::vec(any::<bool>(), 162)) {
            let mut lat = ToricLattice::new(9);
            lat.errors_mut().copy_from_slice(&frame);
            prop_assert_eq!(defects(&lat).len() % 2, 0);
        }

        #[test]
        fn prop_correction_moves_defect_one_cell(row in 0usize..9, col in 0usize..9, d in 0usize..4) {
            let dir = Direction::CARDINAL[d];
            let mut lat = ToricLattice::new(9);
            lat.flip(row, col, dir);
            let (dr, dc) = dir.offset();
            let target = (
                (row as isize + dr).rem_euclid(9) as usize,
                (col as isize + dc).rem_euclid(9) as usize,
            );
            let mut expected = vec![(row, col), target];
            expected.sort();
            prop_assert_eq!(defects(&lat), expected);
        }
    }
}
