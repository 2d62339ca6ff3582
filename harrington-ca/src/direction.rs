//! Colony addressing on the 3×3 hierarchy.
//!
//! Every cell sits somewhere inside a 3×3 colony. At level 0 that colony is
//! the cell's immediate 3×3 block; at level k it is a 3^k × 3^k block whose
//! nine sub-blocks each elect their central cell as **representative**.
//!
//! ```text
//!   NW  N  NE
//!    W  C  E
//!   SW  S  SE
//! ```
//!
//! The same nine labels double as lane indices: the 8 compass points index
//! the count-signal lanes, the first 4 (cardinal) index the flip-signal lanes,
//! and C closes the 9-entry syndrome window.

use std::fmt;

/// Branching factor of the colony hierarchy.
pub const COLONY: usize = 3;

/// A position inside a 3×3 colony, or a direction on the grid.
///
/// Discriminants match the lane layout: N, W, E, S, NW, NE, SW, SE, C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N = 0,
    W = 1,
    E = 2,
    S = 3,
    NW = 4,
    NE = 5,
    SW = 6,
    SE = 7,
    C = 8,
}

impl Direction {
    /// All nine colony positions in lane order.
    pub const ALL: [Direction; 9] = [
        Direction::N,
        Direction::W,
        Direction::E,
        Direction::S,
        Direction::NW,
        Direction::NE,
        Direction::SW,
        Direction::SE,
        Direction::C,
    ];

    /// The 8 compass points (count-signal lanes).
    pub const COMPASS: [Direction; 8] = [
        Direction::N,
        Direction::W,
        Direction::E,
        Direction::S,
        Direction::NW,
        Direction::NE,
        Direction::SW,
        Direction::SE,
    ];

    /// The 4 cardinal directions (flip-signal lanes), in scan order.
    pub const CARDINAL: [Direction; 4] = [Direction::N, Direction::W, Direction::E, Direction::S];

    /// Lane index of this direction.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label of the (row, col) position inside a 3×3 colony.
    ///
    /// Returns `None` when either coordinate is outside `0..3`.
    pub fn from_offset(row: usize, col: usize) -> Option<Direction> {
        let dir = match (row, col) {
            (0, 0) => Direction::NW,
            (0, 1) => Direction::N,
            (0, 2) => Direction::NE,
            (1, 0) => Direction::W,
            (1, 1) => Direction::C,
            (1, 2) => Direction::E,
            (2, 0) => Direction::SW,
            (2, 1) => Direction::S,
            (2, 2) => Direction::SE,
            _ => return None,
        };
        Some(dir)
    }

    /// Antipodal compass point. The center has no antipode.
    pub fn opposite(self) -> Option<Direction> {
        let opp = match self {
            Direction::N => Direction::S,
            Direction::W => Direction::E,
            Direction::E => Direction::W,
            Direction::S => Direction::N,
            Direction::NW => Direction::SE,
            Direction::NE => Direction::SW,
            Direction::SW => Direction::NE,
            Direction::SE => Direction::NW,
            Direction::C => return None,
        };
        Some(opp)
    }

    /// True for N, W, E and S.
    pub fn is_cardinal(self) -> bool {
        matches!(self, Direction::N | Direction::W | Direction::E | Direction::S)
    }

    /// Grid displacement `(d_row, d_col)` of one step in this direction.
    /// Rows grow southwards, columns grow eastwards.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::W => (0, -1),
            Direction::E => (0, 1),
            Direction::S => (1, 0),
            Direction::NW => (-1, -1),
            Direction::NE => (-1, 1),
            Direction::SW => (1, -1),
            Direction::SE => (1, 1),
            Direction::C => (0, 0),
        }
    }

    /// Position inside the 3×3 colony, inverse of [`Direction::from_offset`].
    pub fn colony_offset(self) -> (usize, usize) {
        let (dr, dc) = self.offset();
        ((1 + dr) as usize, (1 + dc) as usize)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::N => "N",
            Direction::W => "W",
            Direction::E => "E",
            Direction::S => "S",
            Direction::NW => "NW",
            Direction::NE => "NE",
            Direction::SW => "SW",
            Direction::SE => "SE",
            Direction::C => "C",
        };
        f.write_str(label)
    }
}

/// Address of the cell at absolute `(row, col)` within its level-`level`
/// colony, or `None` when the cell is a pure relay at that level.
///
/// A cell represents its 3^k × 3^k block iff it sits at the block's center,
/// i.e. `row` and `col` are both `(3^k - 1)/2` past a multiple of 3^k. The
/// representative's address is the block's position inside the next-coarser
/// 3×3 arrangement of blocks. Level 0 always yields an address.
pub fn level_address(row: usize, col: usize, level: u32) -> Option<Direction> {
    let scale = COLONY.checked_pow(level)?;
    let offset = (scale - 1) / 2;
    let krow = row.checked_sub(offset)?;
    let kcol = col.checked_sub(offset)?;
    if krow % scale != 0 || kcol % scale != 0 {
        return None;
    }
    Direction::from_offset((krow / scale) % COLONY, (kcol / scale) % COLONY)
}
