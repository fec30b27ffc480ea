//! Hex-Rust: an alpha-beta Hex player with Monte Carlo evaluation.
//!
//! The computer chooses moves with a branch-limited alpha-beta search whose
//! position values come from random playouts. The human connects left to
//! right, the computer top to bottom.
//!
//! ## Modules
//!
//! - [`constants`] - Board bounds, defaults, and accepted parameter ranges
//! - [`board`] - Board representation, hex adjacency, rendering
//! - [`connectivity`] - Flood-fill winner detection
//! - [`playout`] - Random playouts and the Monte Carlo evaluator
//! - [`search`] - Branch-limited alpha-beta search
//! - [`game`] - Turn alternation for a human vs computer match
//! - [`config`] - Clamping user parameters into a game configuration
//! - [`input`] - Parsing and prompting for human moves
//!
//! ## Example
//!
//! ```
//! use hex_rust::board::{Board, Side};
//! use hex_rust::connectivity::winner;
//! use hex_rust::search::{SearchConfig, Searcher};
//!
//! let mut board = Board::new(3).unwrap();
//! board.place(1, 1, Side::Human).unwrap();
//!
//! let config = SearchConfig { depth: 2, branch_factor: 3, trials: 100, threads: 1 };
//! let mut searcher = Searcher::new(config);
//! let mv = searcher.computer_move(&mut board).unwrap();
//! println!("computer plays ({}, {})", mv / 3, mv % 3);
//! assert_eq!(winner(&board), None);
//! ```

pub mod board;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod game;
pub mod input;
pub mod playout;
pub mod search;
