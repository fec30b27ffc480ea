//! Constants for board geometry, search defaults, and parameter ranges.
//!
//! The board is a rhombus of hexagons stored as a flat `N*N` array
//! (`index = row * N + col`). The human connects the left and right edges,
//! the computer connects the top and bottom edges.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest board `Board::new` will build.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board `Board::new` will build. Bounded by the label alphabet.
pub const MAX_BOARD_SIZE: usize = 13;

/// Offsets `(d_row, d_col)` to the six neighbours of a hex cell.
/// Order: up, down, left, right, up-right, down-left.
pub const HEX_DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),  // up
    (1, 0),   // down
    (0, -1),  // left
    (0, 1),   // right
    (-1, 1),  // up-right
    (1, -1),  // down-left
];

/// Row and column labels used when rendering and parsing coordinates.
pub const LABELS: &[u8] = b"123456789abcdef";

// =============================================================================
// Monte Carlo Parameters
// =============================================================================

/// Random playouts per position evaluation.
pub const MC_TRIALS: usize = 2000;

// =============================================================================
// Game Defaults
// =============================================================================

pub const DEFAULT_BOARD_SIZE: usize = 4;
pub const DEFAULT_BRANCH_FACTOR: usize = 5;
pub const DEFAULT_SEARCH_DEPTH: u32 = 5;
pub const DEFAULT_THREADS: usize = 1;

// =============================================================================
// Accepted Ranges for External Requests
// =============================================================================
//
// Requests outside these ranges are clamped, not rejected. The board size
// range shares its upper bound with `MAX_BOARD_SIZE` so every clamped size
// can be constructed.

pub const BOARD_SIZE_RANGE: (usize, usize) = (3, MAX_BOARD_SIZE);
pub const SEARCH_DEPTH_RANGE: (u32, u32) = (1, 20);
pub const BRANCH_FACTOR_RANGE: (usize, usize) = (1, 20);
pub const TRIALS_RANGE: (usize, usize) = (1, 100_000);
pub const THREADS_RANGE: (usize, usize) = (1, 64);
