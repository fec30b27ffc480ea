//! Monte Carlo playouts (random board completion).
//!
//! A playout fills every empty cell in a uniformly random order, alternating
//! sides, so the game is finished with no further choices. Hex has no draws,
//! so the filled board always has exactly one winner. Averaging many
//! playouts estimates how favourable a position is for the computer.

use std::cell::RefCell;

use tracing::trace;

use crate::board::{Board, Side};
use crate::connectivity::WinnerChecker;
use crate::constants::{DEFAULT_THREADS, MC_TRIALS};

thread_local! {
    /// Generator shared by every playout on this thread. Seeded lazily from
    /// system entropy on first use.
    static RNG: RefCell<fastrand::Rng> = RefCell::new(fastrand::Rng::new());
}

/// Reseed the shared generator, making subsequent playouts reproducible.
pub fn seed_rng(seed: u64) {
    RNG.with(|rng| rng.borrow_mut().seed(seed));
}

fn with_rng<T>(f: impl FnOnce(&mut fastrand::Rng) -> T) -> T {
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Fill all empty cells of `board` in random order, alternating sides
/// starting with `next_turn`.
pub fn fill_board(board: &mut Board, next_turn: Side) {
    with_rng(|rng| fill_board_with(board, next_turn, rng));
}

/// [`fill_board`] with an explicit generator.
pub fn fill_board_with(board: &mut Board, mut next_turn: Side, rng: &mut fastrand::Rng) {
    let mut opens = board.empty_cells();
    rng.shuffle(&mut opens);
    for idx in opens {
        board.set_cell(idx, Some(next_turn));
        next_turn = next_turn.opponent();
    }
}

/// Play `trials` random completions of `board` and count computer wins.
fn count_wins(board: &Board, next_turn: Side, trials: usize, rng: &mut fastrand::Rng) -> usize {
    let mut checker = WinnerChecker::new(board);
    let mut scratch = board.clone();
    let mut wins = 0;
    for _ in 0..trials {
        scratch.clone_from(board);
        fill_board_with(&mut scratch, next_turn, rng);
        if checker.winner(&scratch) == Some(Side::Computer) {
            wins += 1;
        }
    }
    wins
}

/// Normalise a win count to `wins / trials - 0.5`, in `[-0.5, 0.5]`.
#[inline]
fn advantage(wins: usize, trials: usize) -> f64 {
    (wins as f64 - trials as f64 / 2.0) / trials as f64
}

/// Estimate the computer's advantage with `trials` playouts on the shared
/// generator. Positive favours the computer. At least one playout is run.
pub fn random_wins(board: &Board, next_turn: Side, trials: usize) -> f64 {
    let trials = trials.max(1);
    let wins = with_rng(|rng| count_wins(board, next_turn, trials, rng));
    advantage(wins, trials)
}

/// A position evaluator used by the search.
///
/// Scores are from the computer's point of view: larger is better for the
/// computer. `next_turn` is the side that moves next in `board`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, next_turn: Side) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&Board, Side) -> f64,
{
    fn evaluate(&self, board: &Board, next_turn: Side) -> f64 {
        self(board, next_turn)
    }
}

/// Pure random-playout evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarlo {
    /// Playouts per evaluation.
    pub trials: usize,
    /// Worker threads. With more than one, trials are split between scoped
    /// threads that each own a generator seeded from the shared one.
    pub threads: usize,
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self {
            trials: MC_TRIALS,
            threads: DEFAULT_THREADS,
        }
    }
}

impl MonteCarlo {
    pub fn new(trials: usize, threads: usize) -> Self {
        Self {
            trials: trials.max(1),
            threads: threads.max(1),
        }
    }

    fn parallel_wins(&self, board: &Board, next_turn: Side, trials: usize) -> usize {
        let threads = self.threads.min(trials);
        let seeds: Vec<u64> = with_rng(|rng| (0..threads).map(|_| rng.u64(..)).collect());
        let base = trials / threads;
        let extra = trials % threads;

        std::thread::scope(|s| {
            let workers: Vec<_> = seeds
                .into_iter()
                .enumerate()
                .map(|(i, seed)| {
                    let share = base + usize::from(i < extra);
                    s.spawn(move || {
                        let mut rng = fastrand::Rng::with_seed(seed);
                        count_wins(board, next_turn, share, &mut rng)
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|w| w.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .sum()
        })
    }
}

impl Evaluator for MonteCarlo {
    fn evaluate(&self, board: &Board, next_turn: Side) -> f64 {
        // The fields are public, so a zero count can bypass `new`.
        let trials = self.trials.max(1);
        let wins = if self.threads > 1 && trials > 1 {
            self.parallel_wins(board, next_turn, trials)
        } else {
            with_rng(|rng| count_wins(board, next_turn, trials, rng))
        };
        let value = advantage(wins, trials);
        trace!(wins, trials, value, "monte carlo evaluation");
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::winner;

    #[test]
    fn test_fill_board_completes_and_alternates() {
        seed_rng(7);
        let mut b = Board::new(5).unwrap();
        b.set(0, 0, Some(Side::Human));
        fill_board(&mut b, Side::Computer);
        assert!(b.is_full());
        assert_eq!(b.get(0, 0), Some(Side::Human));

        // 24 open cells split 12/12, plus the preset human stone.
        let computer = (0..b.len()).filter(|&i| b.cell(i) == Some(Side::Computer)).count();
        assert_eq!(computer, 12);
        assert!(winner(&b).is_some());
    }

    #[test]
    fn test_fill_board_odd_gap_favours_first_mover() {
        seed_rng(11);
        let mut b = Board::new(3).unwrap();
        fill_board(&mut b, Side::Human);
        let human = (0..b.len()).filter(|&i| b.cell(i) == Some(Side::Human)).count();
        assert_eq!(human, 5);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let b = Board::new(5).unwrap();
        seed_rng(42);
        let first = random_wins(&b, Side::Computer, 200);
        seed_rng(42);
        let second = random_wins(&b, Side::Computer, 200);
        assert_eq!(first, second);
    }

    #[test]
    fn test_decided_positions() {
        let mut b = Board::new(3).unwrap();
        for c in 0..3 {
            b.set(c, 1, Some(Side::Computer));
        }
        assert_eq!(random_wins(&b, Side::Human, 100), 0.5);

        let mut b = Board::new(3).unwrap();
        for c in 0..3 {
            b.set(1, c, Some(Side::Human));
        }
        assert_eq!(random_wins(&b, Side::Computer, 100), -0.5);
    }

    #[test]
    fn test_parallel_matches_bounds() {
        let mut b = Board::new(3).unwrap();
        for r in 0..3 {
            b.set(r, 0, Some(Side::Computer));
        }
        let mc = MonteCarlo::new(101, 4);
        assert_eq!(mc.evaluate(&b, Side::Human), 0.5);

        seed_rng(3);
        let v = MonteCarlo::new(400, 3).evaluate(&Board::new(4).unwrap(), Side::Computer);
        assert!((-0.5..=0.5).contains(&v));
    }

    #[test]
    fn test_parallel_is_reproducible() {
        let b = Board::new(4).unwrap();
        let mc = MonteCarlo::new(300, 3);
        seed_rng(9);
        let first = mc.evaluate(&b, Side::Human);
        seed_rng(9);
        let second = mc.evaluate(&b, Side::Human);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_trials_run_one_playout() {
        let mut b = Board::new(3).unwrap();
        for r in 0..3 {
            b.set(r, 2, Some(Side::Computer));
        }
        assert_eq!(random_wins(&b, Side::Human, 0), 0.5);
        let unchecked = MonteCarlo { trials: 0, threads: 4 };
        assert_eq!(unchecked.evaluate(&b, Side::Human), 0.5);

        let v = random_wins(&Board::new(3).unwrap(), Side::Computer, 0);
        assert!(v == 0.5 || v == -0.5);
    }

    #[test]
    fn test_closure_evaluator() {
        let eval = |_: &Board, side: Side| if side == Side::Human { 1.0 } else { -1.0 };
        let b = Board::new(2).unwrap();
        assert_eq!(eval.evaluate(&b, Side::Human), 1.0);
    }
}
