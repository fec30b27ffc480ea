//! Winner detection.
//!
//! The human wins by joining column 0 to column `N-1`, the computer by
//! joining row 0 to row `N-1`. Both are decided by a depth-first flood fill
//! seeded from the start edge. The computer's check runs the same left-right
//! fill on the transposed board, which is valid because hex adjacency is
//! symmetric under transposition.
//!
//! On a full board exactly one side connects, so there are no draws.

use crate::board::{Board, Side};

/// Reusable flood-fill state for a left-right connection test.
#[derive(Debug, Clone, Default)]
struct FloodFill {
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl FloodFill {
    /// Mark `idx` visited and queue it if it holds `side`. Cells are only
    /// ever examined once, whatever they hold.
    #[inline]
    fn visit(&mut self, board: &Board, idx: usize, side: Side) {
        if self.visited[idx] {
            return;
        }
        self.visited[idx] = true;
        if board.cell(idx) == Some(side) {
            self.stack.push(idx);
        }
    }

    /// Whether `side` has a chain of stones from column 0 to column `N-1`.
    fn spans_left_right(&mut self, board: &Board, side: Side) -> bool {
        let size = board.size();
        self.visited.clear();
        self.visited.resize(board.len(), false);
        self.stack.clear();

        for row in 0..size {
            self.visit(board, row * size, side);
        }
        while let Some(idx) = self.stack.pop() {
            for n in board.neighbors(idx) {
                self.visit(board, n, side);
            }
        }

        (0..size).any(|row| {
            let idx = row * size + size - 1;
            self.visited[idx] && board.cell(idx) == Some(side)
        })
    }
}

/// Decides who, if anybody, has won.
///
/// Keeps its scratch buffers between calls so the playout loop does not
/// allocate per trial.
#[derive(Debug, Clone)]
pub struct WinnerChecker {
    fill: FloodFill,
    transposed: Board,
}

impl WinnerChecker {
    pub fn new(board: &Board) -> Self {
        Self {
            fill: FloodFill::default(),
            transposed: board.transposed(),
        }
    }

    /// Whether `side` connects its two edges on `board`.
    pub fn connects(&mut self, board: &Board, side: Side) -> bool {
        match side {
            Side::Human => self.fill.spans_left_right(board, Side::Human),
            Side::Computer => {
                board.transpose_into(&mut self.transposed);
                self.fill.spans_left_right(&self.transposed, Side::Computer)
            }
        }
    }

    /// The human if the human connects, else the computer if the computer
    /// connects, else `None`.
    pub fn winner(&mut self, board: &Board) -> Option<Side> {
        if self.connects(board, Side::Human) {
            Some(Side::Human)
        } else if self.connects(board, Side::Computer) {
            Some(Side::Computer)
        } else {
            None
        }
    }
}

/// One-shot winner check. Prefer a [`WinnerChecker`] in loops.
pub fn winner(board: &Board) -> Option<Side> {
    WinnerChecker::new(board).winner(board)
}
