//! Branch-limited alpha-beta search.
//!
//! Every node first scores each empty cell with a one-ply Monte Carlo
//! evaluation, keeps the best few (`branch_factor`, or one at the last
//! ply), and only recurses into those. This keeps the tree small enough to
//! search deeply on any board size, at the price of possibly discarding a
//! move the one-ply estimate misjudges. The result is a best-first pruned
//! search, not exhaustive minimax.
//!
//! The computer is the maximising side. Tentative stones are placed on the
//! caller's board and taken back with [`Board::with_stone`], so the board
//! is unchanged when a search returns. Only playouts copy the board.
//!
//! ## Example
//!
//! ```
//! use hex_rust::board::Board;
//! use hex_rust::search::{SearchConfig, Searcher};
//!
//! let mut board = Board::new(3).unwrap();
//! let config = SearchConfig { depth: 2, branch_factor: 2, trials: 50, threads: 1 };
//! let mut searcher = Searcher::new(config);
//! let mv = searcher.computer_move(&mut board);
//! assert!(mv.is_some());
//! ```

use tracing::debug;

use crate::board::{Board, Side};
use crate::constants::{DEFAULT_BRANCH_FACTOR, DEFAULT_SEARCH_DEPTH, DEFAULT_THREADS, MC_TRIALS};
use crate::playout::{Evaluator, MonteCarlo};

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search below the root.
    pub depth: u32,
    /// Children kept per node above the last ply.
    pub branch_factor: usize,
    /// Playouts per evaluation.
    pub trials: usize,
    /// Threads used for playouts.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            branch_factor: DEFAULT_BRANCH_FACTOR,
            trials: MC_TRIALS,
            threads: DEFAULT_THREADS,
        }
    }
}

/// A scored move produced while ranking a node's children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub score: f64,
    pub index: usize,
}

/// Value of a searched position and the move that achieves it.
/// `best` is `None` when the position was evaluated without expanding,
/// including when no empty cell is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchValue {
    pub score: f64,
    pub best: Option<usize>,
}

/// Counters for one top-level search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered by `alpha_beta`
    pub nodes: u64,
    /// Evaluator calls (each runs a full batch of playouts)
    pub evaluations: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
}

/// The side whose stone is placed at a node.
#[inline]
fn mover(maximize: bool) -> Side {
    if maximize { Side::Computer } else { Side::Human }
}

/// Alpha-beta searcher with separate leaf and branch evaluators.
///
/// The leaf evaluator ranks moves at the last ply and scores search
/// horizons; the branch evaluator ranks moves at every ply above that.
/// They are both plain Monte Carlo by default.
pub struct Searcher<L = MonteCarlo, B = MonteCarlo> {
    config: SearchConfig,
    leaf: L,
    branch: B,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let mc = MonteCarlo::new(config.trials, config.threads);
        Self::with_evaluators(config, mc, mc)
    }
}

impl<L: Evaluator, B: Evaluator> Searcher<L, B> {
    /// A `branch_factor` of 0 is raised to 1: every node with an empty cell
    /// keeps at least one candidate.
    pub fn with_evaluators(mut config: SearchConfig, leaf: L, branch: B) -> Self {
        config.branch_factor = config.branch_factor.max(1);
        Self {
            config,
            leaf,
            branch,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent top-level search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn leaf_eval(&mut self, board: &Board, next_turn: Side) -> f64 {
        self.stats.evaluations += 1;
        self.leaf.evaluate(board, next_turn)
    }

    fn branch_eval(&mut self, board: &Board, next_turn: Side) -> f64 {
        self.stats.evaluations += 1;
        self.branch.evaluate(board, next_turn)
    }

    /// Score every empty cell as a move for the side to play, best first,
    /// and keep the top `branch_factor` (or only the top one when
    /// `depth <= 1`).
    pub fn rank_candidates(&mut self, board: &mut Board, depth: u32, maximize: bool) -> Vec<Candidate> {
        let side = mover(maximize);
        let next_turn = side.opponent();
        let mut candidates = Vec::new();

        for index in 0..board.len() {
            if board.cell(index).is_some() {
                continue;
            }
            let score = board.with_stone(index, side, |b| {
                if depth <= 1 {
                    self.leaf_eval(b, next_turn)
                } else {
                    self.branch_eval(b, next_turn)
                }
            });
            candidates.push(Candidate { score, index });
        }

        if maximize {
            candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        } else {
            candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        }
        let keep = if depth <= 1 { 1 } else { self.config.branch_factor };
        candidates.truncate(keep);
        candidates
    }

    /// Recursive alpha-beta over the ranked candidates.
    ///
    /// At `depth == 0`, or with no empty cells, returns the leaf evaluation
    /// with the opponent of the side to play moving next, and no move.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximize: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> SearchValue {
        self.stats.nodes += 1;
        let side = mover(maximize);

        let candidates = if depth == 0 {
            Vec::new()
        } else {
            self.rank_candidates(board, depth, maximize)
        };
        if candidates.is_empty() {
            return SearchValue {
                score: self.leaf_eval(board, side.opponent()),
                best: None,
            };
        }

        let mut value = SearchValue {
            score: if maximize { f64::NEG_INFINITY } else { f64::INFINITY },
            best: None,
        };
        for Candidate { index, .. } in candidates {
            let child = board.with_stone(index, side, |b| {
                self.alpha_beta(b, depth - 1, !maximize, alpha, beta)
            });
            if maximize {
                if child.score > value.score || value.best.is_none() {
                    value = SearchValue { score: child.score, best: Some(index) };
                }
                alpha = alpha.max(value.score);
            } else {
                if child.score < value.score || value.best.is_none() {
                    value = SearchValue { score: child.score, best: Some(index) };
                }
                beta = beta.min(value.score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        value
    }

    /// Full-window search from the root for the computer.
    pub fn search(&mut self, board: &mut Board) -> SearchValue {
        self.stats = SearchStats::default();
        let value = self.alpha_beta(board, self.config.depth, true, f64::NEG_INFINITY, f64::INFINITY);
        debug!(
            score = value.score,
            best = ?value.best,
            nodes = self.stats.nodes,
            evaluations = self.stats.evaluations,
            cutoffs = self.stats.cutoffs,
            "search finished"
        );
        value
    }

    /// Search, then play the chosen move for the computer. Returns `None`
    /// without touching the board when no empty cell is left.
    pub fn computer_move(&mut self, board: &mut Board) -> Option<usize> {
        let best = self.search(board).best?;
        board.set_cell(best, Some(Side::Computer));
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(depth: u32, branch_factor: usize) -> SearchConfig {
        SearchConfig { depth, branch_factor, trials: 20, threads: 1 }
    }

    /// Scores a position by how many computer stones sit in row 0.
    fn top_row(board: &Board, _: Side) -> f64 {
        (0..board.size()).filter(|&c| board.get(0, c) == Some(Side::Computer)).count() as f64
    }

    #[test]
    fn test_rank_candidates_orders_by_score() {
        let mut board = Board::new(3).unwrap();
        let mut s = Searcher::with_evaluators(config(3, 9), top_row, top_row);
        let ranked = s.rank_candidates(&mut board, 3, true);
        assert_eq!(ranked.len(), 9);
        assert!(ranked[..3].iter().all(|c| c.index < 3 && c.score == 1.0));
        assert!(ranked[3..].iter().all(|c| c.score == 0.0));

        let ranked = s.rank_candidates(&mut board, 3, false);
        assert!(ranked.iter().all(|c| c.score == 0.0));
    }

    #[test]
    fn test_leaf_and_branch_hooks_are_distinct() {
        let leaf = |_: &Board, _: Side| 1.0;
        let branch = |_: &Board, _: Side| 2.0;
        let mut board = Board::new(2).unwrap();
        let mut s = Searcher::with_evaluators(config(3, 4), leaf, branch);
        assert_eq!(s.rank_candidates(&mut board, 1, true)[0].score, 1.0);
        assert_eq!(s.rank_candidates(&mut board, 2, true)[0].score, 2.0);
    }

    #[test]
    fn test_search_prefers_higher_scores() {
        let mut board = Board::new(3).unwrap();
        let mut s = Searcher::with_evaluators(config(1, 3), top_row, top_row);
        let mv = s.computer_move(&mut board).unwrap();
        assert!(mv < 3);
        assert_eq!(board.cell(mv), Some(Side::Computer));
    }

    #[test]
    fn test_minimizer_blocks() {
        // One top-row cell is left. If the human does not take it, the
        // computer's reply will.
        let mut board = Board::new(3).unwrap();
        board.set(0, 0, Some(Side::Human));
        board.set(0, 1, Some(Side::Human));
        let mut s = Searcher::with_evaluators(config(2, 9), top_row, top_row);
        let value = s.alpha_beta(&mut board, 2, false, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(value, SearchValue { score: 0.0, best: Some(2) });
    }

    #[test]
    fn test_stats_are_counted() {
        let mut board = Board::new(3).unwrap();
        let mut s = Searcher::with_evaluators(config(2, 2), top_row, top_row);
        s.search(&mut board);
        // root, 2 children, and one depth-0 node under each child
        assert_eq!(s.stats().nodes, 5);
        // 9 ranking evaluations at the root, 8 at each child, and one
        // leaf evaluation per child's single depth-0 grandchild.
        assert_eq!(s.stats().evaluations, 9 + 2 * 8 + 2);
    }

    #[test]
    fn test_zero_branch_factor_still_moves() {
        let mut board = Board::new(3).unwrap();
        let mut s = Searcher::with_evaluators(config(3, 0), top_row, top_row);
        assert_eq!(s.config().branch_factor, 1);
        let mv = s.computer_move(&mut board);
        assert!(mv.is_some_and(|i| board.cell(i) == Some(Side::Computer)));
    }

    /// Signed positional weights; a permutation of 0..9 on a 3x3 board so
    /// no two cells tie.
    fn weighted(board: &Board, _: Side) -> f64 {
        (0..board.len())
            .map(|i| {
                let w = ((i * 7) % 9) as f64;
                match board.cell(i) {
                    Some(Side::Computer) => w,
                    Some(Side::Human) => -w,
                    None => 0.0,
                }
            })
            .sum()
    }

    /// Minimax over the same ranked candidates, with no pruning.
    fn minimax<L: Evaluator, B: Evaluator>(
        s: &mut Searcher<L, B>,
        board: &mut Board,
        depth: u32,
        maximize: bool,
    ) -> f64 {
        let side = mover(maximize);
        let candidates = if depth == 0 {
            Vec::new()
        } else {
            s.rank_candidates(board, depth, maximize)
        };
        if candidates.is_empty() {
            return weighted(board, side.opponent());
        }
        let mut best = if maximize { f64::NEG_INFINITY } else { f64::INFINITY };
        for c in candidates {
            let score = board.with_stone(c.index, side, |b| minimax(s, b, depth - 1, !maximize));
            best = if maximize { best.max(score) } else { best.min(score) };
        }
        best
    }

    #[test]
    fn test_pruning_matches_minimax() {
        let mut cutoffs = 0;
        for depth in 1..=4 {
            for branch_factor in 1..=4 {
                let mut board = Board::new(3).unwrap();
                board.set(1, 1, Some(Side::Human));
                let mut s = Searcher::with_evaluators(config(depth, branch_factor), weighted, weighted);
                let pruned = s.search(&mut board);
                cutoffs += s.stats().cutoffs;

                let mut plain = Searcher::with_evaluators(config(depth, branch_factor), weighted, weighted);
                let expected = minimax(&mut plain, &mut board, depth, true);
                assert_eq!(pruned.score, expected, "depth {depth} branch factor {branch_factor}");
            }
        }
        assert!(cutoffs > 0);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new(2).unwrap();
        for i in 0..4 {
            board.set_cell(i, Some(Side::Human));
        }
        let mut s = Searcher::new(config(3, 3));
        assert_eq!(s.computer_move(&mut board), None);
    }
}
