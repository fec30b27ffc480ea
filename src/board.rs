//! Hex board representation.
//!
//! A board is an `N*N` rhombus of cells stored row-major in a flat vector.
//! Each cell is either empty (`None`) or holds a stone of one [`Side`].
//! Cells have six neighbours (see [`HEX_DIRECTIONS`]), so the board can be
//! transposed without changing its adjacency. The winner check relies on
//! that to reuse the left-right algorithm for the top-bottom player.

use std::fmt;

use thiserror::Error;

use crate::constants::{HEX_DIRECTIONS, LABELS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Connects the left and right edges.
    Human,
    /// Connects the top and bottom edges.
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    fn symbol(self) -> char {
        match self {
            Side::Human => 'H',
            Side::Computer => 'C',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

/// Contents of a single cell.
pub type Cell = Option<Side>;

/// Errors from building a board or placing a stone on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {size} out of range ({min}..={max})")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

#[derive(Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.clone(),
        }
    }

    /// Reuses the existing allocation; playouts copy a board per trial.
    fn clone_from(&mut self, source: &Self) {
        self.size = source.size;
        self.cells.clone_from(&source.cells);
    }
}

impl Board {
    /// Create an empty board, failing if `size` is outside
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::SizeOutOfRange {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size * size`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Panics if `row` or `col` is off the board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.size && col < self.size, "({row}, {col}) off board");
        self.cells[self.index(row, col)]
    }

    /// Panics if `row` or `col` is off the board.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(row < self.size && col < self.size, "({row}, {col}) off board");
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    #[inline]
    pub fn set_cell(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    /// Place a stone on an empty, on-board cell.
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<(), BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds { row, col });
        }
        let idx = self.index(row, col);
        if self.cells[idx].is_some() {
            return Err(BoardError::Occupied { row, col });
        }
        self.cells[idx] = Some(side);
        Ok(())
    }

    /// Tentatively place `side` at the empty cell `idx`, run `f`, then take
    /// the stone back. The board is exclusively borrowed for the duration.
    pub fn with_stone<T>(&mut self, idx: usize, side: Side, f: impl FnOnce(&mut Board) -> T) -> T {
        debug_assert!(self.cells[idx].is_none(), "with_stone on occupied cell {idx}");
        self.cells[idx] = Some(side);
        let out = f(self);
        self.cells[idx] = None;
        out
    }

    /// Indices of all empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Copy of the board with rows and columns swapped.
    pub fn transposed(&self) -> Board {
        let mut out = Board {
            size: self.size,
            cells: vec![None; self.cells.len()],
        };
        self.transpose_into(&mut out);
        out
    }

    /// Write the transpose of this board into `out`, reusing its storage.
    pub fn transpose_into(&self, out: &mut Board) {
        out.size = self.size;
        out.cells.resize(self.cells.len(), None);
        for row in 0..self.size {
            for col in 0..self.size {
                out.cells[col * self.size + row] = self.cells[row * self.size + col];
            }
        }
    }

    /// Indices of the on-board neighbours of `idx`.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + use<> {
        let n = self.size as isize;
        let row = (idx / self.size) as isize;
        let col = (idx % self.size) as isize;
        HEX_DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            (r >= 0 && r < n && c >= 0 && c < n).then(|| (r * n + c) as usize)
        })
    }
}

/// Renders the rhombus with row/column labels. The computer's edges are
/// marked `C` (top and bottom) and the human's edges `H` (left and right).
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size;
        let pad = |n: usize| " ".repeat(n);
        let labels = || {
            LABELS[..size]
                .iter()
                .map(|&l| format!("{}   ", l as char))
                .collect::<String>()
        };

        writeln!(f, "{}C", pad(7 + size / 2 * 3))?;
        writeln!(f, "     {}", labels())?;
        for row in 0..size {
            let edge = if row == size / 2 { "  H" } else { "   " };
            write!(f, "{edge}{}{} ", pad(row * 2), LABELS[row] as char)?;
            for col in 0..size {
                let ch = self.get(row, col).map_or('.', Side::symbol);
                write!(f, "{ch}")?;
                if col < size - 1 {
                    write!(f, " - ")?;
                }
            }
            if row == size / 2 {
                write!(f, "  H")?;
            }
            write!(f, "\n    ")?;
            if row < size - 1 {
                writeln!(f, "{}{} \\", pad(row * 2 + 1), " \\ /".repeat(size - 1))?;
            }
        }
        writeln!(f, "{}{}", pad(size * 2 - 1), labels())?;
        writeln!(f, "{}C", pad(2 * size + 5 + size / 2 * 3))
    }
}
