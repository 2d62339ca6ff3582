//! The decoder closing the loop on a real toric code.

use toric_code_sim::prelude::*;

fn decode_once(code: &mut ToricCode, ca: &mut Automaton) {
    let corrections = ca.step(code.measure_syndromes()).unwrap();
    code.apply_corrections(corrections);
}

#[test]
fn test_single_n_error_is_undone_in_one_tick() {
    let mut code = ToricCode::with_seed(9, 0);
    let mut ca = Automaton::new(AutomatonConfig::new(9)).unwrap();
    code.lattice_mut().toggle(Edge { dir: EdgeDir::Horizontal, row: 4, col: 4 });
    assert_eq!(defects(code.lattice()), vec![(3, 4), (4, 4)]);

    decode_once(&mut code, &mut ca);
    assert_eq!(code.lattice().weight(), 0, "correction lands on the erroneous edge");
}

#[test]
fn test_single_w_error_is_undone_in_one_tick() {
    let mut code = ToricCode::with_seed(9, 0);
    let mut ca = Automaton::new(AutomatonConfig::new(9)).unwrap();
    code.lattice_mut().toggle(Edge { dir: EdgeDir::Vertical, row: 0, col: 1 });

    decode_once(&mut code, &mut ca);
    assert_eq!(code.lattice().weight(), 0);
    assert!(!code.has_logical_error());
}

#[test]
fn test_sparse_noise_is_cleaned_up() {
    // Hand-placed isolated single-qubit errors, each inside its own colony.
    let mut code = ToricCode::with_seed(27, 0);
    let mut ca = Automaton::new(AutomatonConfig::new(27)).unwrap();
    for &(r, c) in &[(1, 1), (10, 13), (22, 4)] {
        code.lattice_mut().toggle(Edge { dir: EdgeDir::Vertical, row: r, col: c });
    }
    for _ in 0..5 {
        decode_once(&mut code, &mut ca);
    }
    assert!(defects(code.lattice()).is_empty(), "got {:?}", defects(code.lattice()));
    assert!(!code.has_logical_error());
}
