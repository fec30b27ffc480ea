//! Game configuration from externally supplied parameters.
//!
//! Requests are clamped into the accepted ranges in [`crate::constants`]
//! rather than rejected. The board size range tops out at
//! [`MAX_BOARD_SIZE`], the same bound `Board::new` enforces, so any
//! clamped configuration yields a constructible board.

use tracing::warn;

use crate::board::Side;
use crate::constants::{
    BOARD_SIZE_RANGE, BRANCH_FACTOR_RANGE, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, SEARCH_DEPTH_RANGE,
    THREADS_RANGE, TRIALS_RANGE,
};
use crate::search::SearchConfig;

/// Everything needed to start a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub search: SearchConfig,
    /// Side that moves first.
    pub first_turn: Side,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            search: SearchConfig::default(),
            first_turn: Side::Human,
        }
    }
}

/// Raw, possibly out-of-range parameters, as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requested {
    pub board_size: i64,
    pub depth: i64,
    pub branch_factor: i64,
    pub trials: i64,
    pub threads: i64,
    pub computer_first: bool,
}

/// Clamp `value` into `[min, max]`, warning when it changes.
fn clamp(name: &str, value: i64, (min, max): (i64, i64)) -> i64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(parameter = name, requested = value, used = clamped, "parameter clamped");
    }
    clamped
}

fn range_usize((min, max): (usize, usize)) -> (i64, i64) {
    (min as i64, max as i64)
}

impl GameConfig {
    pub fn from_requested(req: Requested) -> Self {
        let board_size = clamp("size", req.board_size, range_usize(BOARD_SIZE_RANGE)) as usize;
        debug_assert!(board_size <= MAX_BOARD_SIZE);
        let (dmin, dmax) = SEARCH_DEPTH_RANGE;
        let depth = clamp("depth", req.depth, (i64::from(dmin), i64::from(dmax))) as u32;
        let branch_factor =
            clamp("branch_factor", req.branch_factor, range_usize(BRANCH_FACTOR_RANGE)) as usize;
        let trials = clamp("trials", req.trials, range_usize(TRIALS_RANGE)) as usize;
        let threads = clamp("threads", req.threads, range_usize(THREADS_RANGE)) as usize;

        Self {
            board_size,
            search: SearchConfig {
                depth,
                branch_factor,
                trials,
                threads,
            },
            first_turn: if req.computer_first { Side::Computer } else { Side::Human },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn requested(board_size: i64, depth: i64, branch_factor: i64) -> Requested {
        Requested {
            board_size,
            depth,
            branch_factor,
            trials: 2000,
            threads: 1,
            computer_first: false,
        }
    }

    #[test]
    fn test_in_range_values_pass_through() {
        let c = GameConfig::from_requested(requested(7, 4, 3));
        assert_eq!(c.board_size, 7);
        assert_eq!(c.search.depth, 4);
        assert_eq!(c.search.branch_factor, 3);
        assert_eq!(c.search.trials, 2000);
        assert_eq!(c.first_turn, Side::Human);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let c = GameConfig::from_requested(requested(0, -5, 100));
        assert_eq!(c.board_size, 3);
        assert_eq!(c.search.depth, 1);
        assert_eq!(c.search.branch_factor, 20);

        let c = GameConfig::from_requested(requested(18, 99, 0));
        assert_eq!(c.board_size, MAX_BOARD_SIZE);
        assert_eq!(c.search.depth, 20);
        assert_eq!(c.search.branch_factor, 1);
    }

    #[test]
    fn test_every_clamped_size_builds_a_board() {
        for size in -2..40 {
            let c = GameConfig::from_requested(requested(size, 1, 1));
            assert!(Board::new(c.board_size).is_ok(), "size {size}");
        }
    }

    #[test]
    fn test_computer_first() {
        let mut req = requested(4, 5, 5);
        req.computer_first = true;
        assert_eq!(GameConfig::from_requested(req).first_turn, Side::Computer);
    }
}
