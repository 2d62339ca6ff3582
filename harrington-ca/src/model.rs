//! Contract for the physical code the automaton decodes.

use crate::direction::Direction;

/// A code model on an L×L torus that produces syndromes and absorbs
/// corrections, e.g. the toric code under bit-flip noise.
///
/// Direction convention for [`CodeModel::apply_correction`]: a correction
/// `dir` at `(row, col)` moves the defect at that cell one step towards
/// `dir`. C and diagonal directions are ignored.
pub trait CodeModel {
    /// Lattice side L.
    fn size(&self) -> usize;

    /// Clear all physical error state.
    fn reset(&mut self);

    /// Flip each elementary degree of freedom independently with probability `p`.
    fn inject_noise(&mut self, p: f64);

    /// Current defect grid, row-major, L² entries.
    fn measure_syndromes(&mut self) -> &[bool];

    /// Apply one correction.
    fn apply_correction(&mut self, row: usize, col: usize, dir: Direction);

    /// True when the accumulated error acts non-trivially on the encoded
    /// information.
    fn has_logical_error(&self) -> bool;

    /// Apply a whole row-major correction grid.
    fn apply_corrections(&mut self, corrections: &[Option<Direction>]) {
        let size = self.size();
        for (idx, dir) in corrections.iter().enumerate() {
            if let Some(dir) = *dir {
                self.apply_correction(idx / size, idx % size, dir);
            }
        }
    }
}
