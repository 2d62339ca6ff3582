//! The local geometric decision rule.
//!
//! Given a cell's address inside its colony and a 3×3 window of defect bits
//! centered on it, the rule picks a cardinal direction along which to move
//! the defect. Defects drift towards the colony center; cells on the west
//! and south borders first try to fuse with defects just across the border.
//! Whenever a neighboring defect is already in the way the rule holds still,
//! letting the other defect come to it.
//!
//! The same table runs at every hierarchy level: level 0 feeds it the
//! physical window, coarser levels feed it a thresholded count window.

use std::ops::{Index, IndexMut};

use crate::direction::Direction;

/// Nine defect bits indexed by [`Direction`]: the cell itself (C) and its
/// eight neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Window([bool; 9]);

impl Window {
    /// Window with no defects.
    pub const fn empty() -> Self {
        Self([false; 9])
    }

    /// Build a window from raw bits in lane order.
    pub const fn from_bits(bits: [bool; 9]) -> Self {
        Self(bits)
    }

    /// Window with only the listed positions set.
    pub fn with(dirs: &[Direction]) -> Self {
        let mut window = Self::empty();
        for &dir in dirs {
            window[dir] = true;
        }
        window
    }

    /// True if any of the listed positions carries a defect.
    pub fn any(&self, dirs: &[Direction]) -> bool {
        dirs.iter().any(|&dir| self[dir])
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.0 = [false; 9];
    }
}

impl Index<Direction> for Window {
    type Output = bool;

    fn index(&self, dir: Direction) -> &bool {
        &self.0[dir.index()]
    }
}

impl IndexMut<Direction> for Window {
    fn index_mut(&mut self, dir: Direction) -> &mut bool {
        &mut self.0[dir.index()]
    }
}

/// Correction for a defect at `address` seeing `window`, or `None` to hold.
///
/// Total over all inputs and only ever returns a cardinal direction.
pub fn decide(address: Direction, window: &Window) -> Option<Direction> {
    use Direction::*;

    if address == C || !window[C] {
        return None;
    }

    // Fuse across the west and south borders first.
    if matches!(address, NW | W | SW) && window.any(&[W, NW, SW]) {
        return Some(W);
    }
    if matches!(address, S | SW | SE) && window.any(&[S, SW, SE]) {
        return Some(S);
    }

    match address {
        SW => corner(window, [S, W], [N, E], SW, [NW, SE], E),
        NW => corner(window, [W, N], [E, S], NW, [NE, SW], E),
        NE => corner(window, [N, E], [S, W], NE, [SE, NW], W),
        SE => corner(window, [E, S], [W, N], SE, [SW, NE], W),
        W => edge(window, [S, W, N], E, [SW, NW]),
        N => edge(window, [W, N, E], S, [NW, NE]),
        E => edge(window, [N, E, S], W, [NE, SE]),
        S => edge(window, [E, S, W], N, [SE, SW]),
        C => None,
    }
}

/// Corner of a colony: hold if a defect sits on either outer edge, otherwise
/// step inwards towards a neighboring defect, otherwise hold on an outer
/// diagonal defect, otherwise follow an inner diagonal, otherwise `fallback`.
fn corner(
    window: &Window,
    outer: [Direction; 2],
    inner: [Direction; 2],
    diagonal: Direction,
    inner_diagonals: [Direction; 2],
    fallback: Direction,
) -> Option<Direction> {
    if window.any(&outer) {
        return None;
    }
    if let Some(&dir) = inner.iter().find(|&&dir| window[dir]) {
        return Some(dir);
    }
    if window[diagonal] {
        return None;
    }
    // Each inner diagonal is reached by stepping along the matching inner edge.
    for (diag, step) in inner_diagonals.into_iter().zip(inner) {
        if window[diag] {
            return Some(step);
        }
    }
    Some(fallback)
}

/// Middle of a colony edge: hold if blocked on the outside, step inwards
/// when a defect is there or the way is clear, hold on a flanking diagonal.
fn edge(
    window: &Window,
    blocking: [Direction; 3],
    inward: Direction,
    flanks: [Direction; 2],
) -> Option<Direction> {
    if window.any(&blocking) {
        return None;
    }
    if window[inward] {
        return Some(inward);
    }
    if window.any(&flanks) {
        return None;
    }
    Some(inward)
}
