//! Toric lattice with bit-flip frame tracking.
//!
//! The toric code lives on an L×L square lattice with periodic boundary
//! conditions (T²). Qubits sit on **edges**, two per unit cell:
//! - the top edge of cell (r,c) is its **N** qubit (horizontal edge h(r,c)),
//! - the left edge of cell (r,c) is its **W** qubit (vertical edge v(r,c)).
//!
//! Only X (bit-flip) errors are tracked. They are detected by the plaquette
//! stabilizers, one per cell, so the defect grid lines up one-to-one with
//! the decoder's cell grid.

use harrington_ca::Direction;

/// Direction of an edge on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDir {
    /// Top edge of a cell (N qubit).
    Horizontal,
    /// Left edge of a cell (W qubit).
    Vertical,
}

impl EdgeDir {
    /// Qubit slot inside the unit cell: 0 for N, 1 for W.
    pub fn slot(self) -> usize {
        match self {
            EdgeDir::Horizontal => 0,
            EdgeDir::Vertical => 1,
        }
    }
}

/// An edge on the toric lattice, identified by direction and owning cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub dir: EdgeDir,
    pub row: usize,
    pub col: usize,
}

/// The toric lattice with an X error frame over 2L² edges.
#[derive(Debug, Clone)]
pub struct ToricLattice {
    n: usize,
    errors: Vec<bool>,
}

impl ToricLattice {
    /// Create a clean L×L toric lattice (no errors).
    pub fn new(n: usize) -> Self {
        assert!(n >= 1, "Lattice size must be at least 1");
        Self {
            n,
            errors: vec![false; 2 * n * n],
        }
    }

    /// Lattice dimension.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Total number of edges (qubits).
    pub fn num_edges(&self) -> usize {
        2 * self.n * self.n
    }

    /// Convert an Edge to a linear index. All N edges come first.
    pub fn edge_index(&self, edge: Edge) -> usize {
        let r = edge.row % self.n;
        let c = edge.col % self.n;
        match edge.dir {
            EdgeDir::Horizontal => r * self.n + c,
            EdgeDir::Vertical => self.n * self.n + r * self.n + c,
        }
    }

    /// Convert a linear index back to an Edge.
    pub fn index_to_edge(&self, idx: usize) -> Edge {
        let nn = self.n * self.n;
        let (dir, rest) = if idx < nn {
            (EdgeDir::Horizontal, idx)
        } else {
            (EdgeDir::Vertical, idx - nn)
        };
        Edge {
            dir,
            row: rest / self.n,
            col: rest % self.n,
        }
    }

    /// Toggle the X error on the given edge.
    pub fn toggle(&mut self, edge: Edge) {
        let idx = self.edge_index(edge);
        self.errors[idx] ^= true;
    }

    /// Check if an X error is present on the given edge.
    pub fn has_error(&self, edge: Edge) -> bool {
        self.errors[self.edge_index(edge)]
    }

    /// Raw error frame (read-only).
    pub fn errors(&self) -> &[bool] {
        &self.errors
    }

    /// Mutable access to the error frame.
    pub fn errors_mut(&mut self) -> &mut [bool] {
        &mut self.errors
    }

    /// Number of erroneous qubits.
    pub fn weight(&self) -> usize {
        self.errors.iter().filter(|&&e| e).count()
    }

    /// Reset all errors to clean state.
    pub fn clear(&mut self) {
        self.errors.iter_mut().for_each(|e| *e = false);
    }

    /// Erroneous qubits in row-major cell order, N before W inside a cell.
    pub fn error_sites(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n * self.n).flat_map(move |cell| {
            let (row, col) = (cell / self.n, cell % self.n);
            [EdgeDir::Horizontal, EdgeDir::Vertical]
                .into_iter()
                .map(move |dir| Edge { dir, row, col })
                .filter(move |&edge| self.has_error(edge))
        })
    }

    /// The 4 edges bounding plaquette (r, c).
    ///
    /// Plaquette (r,c) is cell (r,c) itself:
    /// - top horizontal: (r, c), its own N qubit
    /// - bottom horizontal: ((r+1)%n, c), the N qubit of the cell below
    /// - left vertical: (r, c), its own W qubit
    /// - right vertical: (r, (c+1)%n), the W qubit of the cell to the right
    pub fn plaquette_edges(&self, row: usize, col: usize) -> [Edge; 4] {
        let n = self.n;
        [
            Edge { dir: EdgeDir::Horizontal, row, col },                           // top
            Edge { dir: EdgeDir::Horizontal, row: (row + 1) % n, col },           // bottom
            Edge { dir: EdgeDir::Vertical, row, col },                             // left
            Edge { dir: EdgeDir::Vertical, row, col: (col + 1) % n },             // right
        ]
    }

    /// The edge a correction `dir` at cell (r, c) acts on.
    ///
    /// Flipping it moves a defect at (r,c) one cell towards `dir`. The
    /// center and diagonals do not name an edge.
    pub fn correction_edge(&self, row: usize, col: usize, dir: Direction) -> Option<Edge> {
        let n = self.n;
        let edge = match dir {
            Direction::N => Edge { dir: EdgeDir::Horizontal, row, col },
            Direction::W => Edge { dir: EdgeDir::Vertical, row, col },
            Direction::E => Edge { dir: EdgeDir::Vertical, row, col: (col + 1) % n },
            Direction::S => Edge { dir: EdgeDir::Horizontal, row: (row + 1) % n, col },
            _ => return None,
        };
        Some(edge)
    }

    /// Apply a correction. Returns false when `dir` names no edge.
    pub fn flip(&mut self, row: usize, col: usize, dir: Direction) -> bool {
        match self.correction_edge(row, col, dir) {
            Some(edge) => {
                self.toggle(edge);
                true
            }
            None => false,
        }
    }

    /// Parity of the N qubits along each row.
    pub fn row_parities(&self) -> Vec<bool> {
        (0..self.n)
            .map(|r| {
                (0..self.n).fold(false, |acc, c| {
                    acc ^ self.has_error(Edge { dir: EdgeDir::Horizontal, row: r, col: c })
                })
            })
            .collect()
    }

    /// Parity of the W qubits along each column.
    pub fn column_parities(&self) -> Vec<bool> {
        (0..self.n)
            .map(|c| {
                (0..self.n).fold(false, |acc, r| {
                    acc ^ self.has_error(Edge { dir: EdgeDir::Vertical, row: r, col: c })
                })
            })
            .collect()
    }
}
