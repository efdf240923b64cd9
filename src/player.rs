//! The kinds of player that can take part in a game

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::fmt;
use std::io::{BufRead, BufReader, Write};

use crate::{
    board::{Board, Token},
    error::{Error, Result},
    solver::AutoPlayer,
};

/// The capability every player offers: choosing a column to play
///
/// The board is borrowed mutably so a searching player can place and undo
/// tokens while it thinks; it must hand the board back unchanged.
pub trait Decide {
    fn decide(&mut self, board: &mut Board) -> Result<usize>;
}

impl Decide for AutoPlayer {
    fn decide(&mut self, board: &mut Board) -> Result<usize> {
        AutoPlayer::decide(self, board)
    }
}

/// A player that plays a uniformly random playable column
#[derive(Clone)]
pub struct RandomPlayer {
    token: Token,
    num_moves: usize,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            num_moves: 0,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }
}

impl Decide for RandomPlayer {
    fn decide(&mut self, board: &mut Board) -> Result<usize> {
        self.num_moves += 1;
        board
            .playable_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMove)
    }
}

impl fmt::Display for RandomPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} (Random)", self.token)
    }
}

/// A player that types column indices, prompted until one is playable
pub struct ManualPlayer {
    token: Token,
    num_moves: usize,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl ManualPlayer {
    pub fn new(token: Token, input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self {
            token,
            num_moves: 0,
            input,
            output,
        }
    }

    /// A player reading from the console
    pub fn stdio(token: Token) -> Self {
        Self::new(
            token,
            Box::new(BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line)
    }
}

impl Decide for ManualPlayer {
    fn decide(&mut self, board: &mut Board) -> Result<usize> {
        self.num_moves += 1;
        let mut line = self.prompt("Enter a column: ")?;
        loop {
            if let Ok(column) = line.trim().parse::<usize>() {
                if board.can_place(column) {
                    return Ok(column);
                }
            }
            line = self.prompt("Cannot play token in that column. Try again: ")?;
        }
    }
}

impl fmt::Display for ManualPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.token)
    }
}

/// Any participant in a game
pub enum Player {
    Manual(ManualPlayer),
    Random(RandomPlayer),
    Auto(AutoPlayer),
}

impl Player {
    pub fn token(&self) -> Token {
        match self {
            Player::Manual(p) => p.token,
            Player::Random(p) => p.token,
            Player::Auto(p) => p.token(),
        }
    }

    /// The number of moves this player has been asked for
    pub fn num_moves(&self) -> usize {
        match self {
            Player::Manual(p) => p.num_moves,
            Player::Random(p) => p.num_moves,
            Player::Auto(p) => p.num_moves(),
        }
    }

    /// Whether deciding may take long enough to show progress
    pub fn is_automated(&self) -> bool {
        matches!(self, Player::Auto(_))
    }
}

impl Decide for Player {
    fn decide(&mut self, board: &mut Board) -> Result<usize> {
        match self {
            Player::Manual(p) => p.decide(board),
            Player::Random(p) => p.decide(board),
            Player::Auto(p) => p.decide(board),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Manual(p) => fmt::Display::fmt(p, f),
            Player::Random(p) => fmt::Display::fmt(p, f),
            Player::Auto(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl From<AutoPlayer> for Player {
    fn from(player: AutoPlayer) -> Self {
        Player::Auto(player)
    }
}

impl From<RandomPlayer> for Player {
    fn from(player: RandomPlayer) -> Self {
        Player::Random(player)
    }
}

impl From<ManualPlayer> for Player {
    fn from(player: ManualPlayer) -> Self {
        Player::Manual(player)
    }
}
