//! Reading human moves from a text stream.
//!
//! A move is two whitespace-separated tokens, row then column. Only the
//! first character of each token matters, looked up in the label alphabet
//! `123456789abcdef`, so `1 a` is row 0, column 9.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::board::Board;
use crate::constants::LABELS;
use crate::game::MoveInput;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected a row and a column")]
    MissingCoordinate,

    #[error("unknown coordinate {0:?}")]
    BadCoordinate(String),

    #[error("coordinate {label:?} is off a {size}x{size} board")]
    OffBoard { label: char, size: usize },
}

fn parse_label(token: &str, size: usize) -> Result<usize, InputError> {
    let ch = token.chars().next().ok_or(InputError::MissingCoordinate)?;
    let idx = LABELS
        .iter()
        .position(|&l| char::from(l) == ch)
        .ok_or_else(|| InputError::BadCoordinate(token.to_string()))?;
    if idx >= size {
        return Err(InputError::OffBoard { label: ch, size });
    }
    Ok(idx)
}

/// Parse `"<row> <col>"` into zero-based coordinates on a `size` board.
pub fn parse_move(line: &str, size: usize) -> Result<(usize, usize), InputError> {
    let mut tokens = line.split_whitespace();
    let row = tokens.next().ok_or(InputError::MissingCoordinate)?;
    let col = tokens.next().ok_or(InputError::MissingCoordinate)?;
    Ok((parse_label(row, size)?, parse_label(col, size)?))
}

/// Prompts on `output` and reads moves from `input`, re-prompting until it
/// gets a legal empty cell. Gives up at end of input.
pub struct TextInput<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt once and read one line. `None` at end of input or on a
    /// read/write error.
    fn prompt(&mut self, board: &Board) -> Option<String> {
        write!(self.output, "{board}Input space separated row and column: ").ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl<R: BufRead, W: Write> MoveInput for TextInput<R, W> {
    fn next_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        loop {
            let line = self.prompt(board)?;
            match parse_move(&line, board.size()) {
                Ok((row, col)) if board.get(row, col).is_none() => return Some((row, col)),
                _ => writeln!(self.output, "try again").ok()?,
            }
        }
    }
}
