//! A Connect Four engine with pluggable players
//!
//! The engine keeps a mutable board with incremental ("windowed") win
//! detection, and an automated player that runs a depth-limited negamax
//! search over it, placing and undoing tokens in place.
//!
//! # Basic Usage
//!
//! ```
//! use connect_four::{board::Board, solver::AutoPlayer, score::Score, Token};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::from_moves(7, 6, "04122544114")?;
//! let mut player = AutoPlayer::new(Token::O, 3).with_seed(7);
//! let column = player.decide(&mut board)?;
//!
//! assert_eq!((column, player.score()), (3, Score::Winning(1)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod score;

pub mod solver;

pub mod player;

pub mod config;

pub mod game;


pub use board::{Board, Cell, Token};
pub use error::{Error, Result};
pub use score::{Score, ScoreKind};

/// The smallest width or height a board may have
pub const MIN_DIMENSION: usize = 4;

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The default look-ahead of an automated player
pub const DEFAULT_DEPTH: u32 = 5;

/// The number of aligned tokens that wins the game
pub const CONNECT: usize = 4;

// a four-in-a-row must fit on the smallest legal board
const_assert!(MIN_DIMENSION >= CONNECT);
const_assert!(DEFAULT_WIDTH >= MIN_DIMENSION && DEFAULT_HEIGHT >= MIN_DIMENSION);
