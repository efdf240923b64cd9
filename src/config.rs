//! Settings for a single game

use std::fmt;
use std::str::FromStr;

use crate::{
    board::{Board, Token},
    error::{Error, Result},
    player::{ManualPlayer, Player, RandomPlayer},
    solver::AutoPlayer,
    DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_DIMENSION,
};

/// How one side chooses its moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayerKind {
    Manual,
    Random,
    /// An automated player searching this many plies ahead
    Auto(u32),
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(PlayerKind::Manual),
            "random" => Ok(PlayerKind::Random),
            depth => depth
                .parse::<u32>()
                .map(PlayerKind::Auto)
                .map_err(|_| Error::UnknownPlayer(depth.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Manual => write!(f, "manual"),
            PlayerKind::Random => write!(f, "random"),
            PlayerKind::Auto(depth) => write!(f, "{}", depth),
        }
    }
}

/// Everything needed to set up a game
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// The first player, playing `O`
    pub player_one: PlayerKind,
    /// The second player, playing `X`
    pub player_two: PlayerKind,
    /// Seeds the random choices of both players
    pub seed: Option<u64>,
    /// Lets automated players search the root columns in parallel
    pub parallel: bool,
    /// Columns already played before the game starts, as a digit string
    pub moves: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player_one: PlayerKind::Manual,
            player_two: PlayerKind::Auto(DEFAULT_DEPTH),
            seed: None,
            parallel: false,
            moves: String::new(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        for dimension in [self.width, self.height] {
            if dimension < MIN_DIMENSION {
                return Err(Error::InvalidDimension(dimension));
            }
        }
        if let Some(bad) = self.moves.chars().find(|c| !c.is_ascii_digit()) {
            return Err(Error::UnparsableMove(bad));
        }
        Ok(())
    }

    /// The starting board, with the configured moves already played
    pub fn board(&self) -> Result<Board> {
        self.validate()?;
        Board::from_moves(self.width, self.height, &self.moves)
    }

    /// Builds the player for `token`
    pub fn player(&self, token: Token) -> Player {
        let (kind, seed) = match token {
            Token::O => (self.player_one, self.seed),
            // keep the two sides from mirroring each other's choices
            Token::X => (self.player_two, self.seed.map(|s| s.wrapping_add(1))),
        };
        match kind {
            PlayerKind::Manual => ManualPlayer::stdio(token).into(),
            PlayerKind::Random => {
                let player = RandomPlayer::new(token);
                match seed {
                    Some(seed) => player.with_seed(seed).into(),
                    None => player.into(),
                }
            }
            PlayerKind::Auto(depth) => {
                let player = AutoPlayer::new(token, depth).with_parallel(self.parallel);
                match seed {
                    Some(seed) => player.with_seed(seed).into(),
                    None => player.into(),
                }
            }
        }
    }
}
