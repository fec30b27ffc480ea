//! Match loop: alternate human and computer moves until someone connects.

use tracing::{info, warn};

use crate::board::{Board, BoardError, Side};
use crate::config::GameConfig;
use crate::connectivity::WinnerChecker;
use crate::playout::{Evaluator, MonteCarlo};
use crate::search::Searcher;

/// Source of human moves.
pub trait MoveInput {
    /// A `(row, col)` for the human, or `None` if no more input is coming.
    /// The game rejects off-board or occupied cells and asks again.
    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)>;
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    /// The move input ran dry.
    Abandoned,
    /// The search found no empty cell.
    Exhausted,
}

/// Result of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Played { side: Side, index: usize },
    Over(Outcome),
}

pub struct Game<L = MonteCarlo, B = MonteCarlo> {
    board: Board,
    searcher: Searcher<L, B>,
    checker: WinnerChecker,
    turn: Side,
    first_turn: Side,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        let board = Board::new(config.board_size)?;
        Ok(Self::with_searcher(board, Searcher::new(config.search), config.first_turn))
    }
}

impl<L: Evaluator, B: Evaluator> Game<L, B> {
    pub fn with_searcher(board: Board, searcher: Searcher<L, B>, first_turn: Side) -> Self {
        let checker = WinnerChecker::new(&board);
        Self {
            board,
            searcher,
            checker,
            turn: first_turn,
            first_turn,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&mut self) -> Option<Side> {
        self.checker.winner(&self.board)
    }

    /// Clear the board and give the move back to the first player.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = self.first_turn;
    }

    /// Play one move for the side to move, unless the game is already over.
    pub fn step(&mut self, input: &mut impl MoveInput) -> Step {
        if let Some(side) = self.winner() {
            return Step::Over(Outcome::Winner(side));
        }

        let index = match self.turn {
            Side::Human => match self.human_move(input) {
                Some(index) => index,
                None => return Step::Over(Outcome::Abandoned),
            },
            Side::Computer => match self.searcher.computer_move(&mut self.board) {
                Some(index) => index,
                None => return Step::Over(Outcome::Exhausted),
            },
        };

        let side = self.turn;
        let size = self.board.size();
        info!(%side, row = index / size, col = index % size, "move played");
        self.turn = side.opponent();
        Step::Played { side, index }
    }

    fn human_move(&mut self, input: &mut impl MoveInput) -> Option<usize> {
        loop {
            let (row, col) = input.next_move(&self.board)?;
            match self.board.place(row, col, Side::Human) {
                Ok(()) => return Some(self.board.index(row, col)),
                Err(e) => warn!(error = %e, "rejected human move"),
            }
        }
    }

    /// Run turns until the game is decided or cannot continue.
    pub fn play(&mut self, input: &mut impl MoveInput) -> Outcome {
        loop {
            if let Step::Over(outcome) = self.step(input) {
                info!(?outcome, "game over");
                return outcome;
            }
        }
    }
}
