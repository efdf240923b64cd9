//! The verdict an automated player gives to playing a column

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The outcome class of a [`Score`], without its payload
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScoreKind {
    Invalid,
    Losing,
    Neutral,
    Winning,
}

impl ScoreKind {
    pub fn name(self) -> &'static str {
        match self {
            ScoreKind::Invalid => "invalid",
            ScoreKind::Losing => "losing",
            ScoreKind::Neutral => "neutral",
            ScoreKind::Winning => "winning",
        }
    }
}

impl FromStr for ScoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "invalid" => Ok(ScoreKind::Invalid),
            "losing" => Ok(ScoreKind::Losing),
            "neutral" => Ok(ScoreKind::Neutral),
            "winning" => Ok(ScoreKind::Winning),
            other => Err(Error::IncomparableValue(other.to_string())),
        }
    }
}

/// The value of a move from the mover's point of view
///
/// # Ordering
/// From least to most favourable:
/// `Invalid < Losing(n) < Neutral < Winning(n)`.
/// A later loss is better than an earlier one, and an earlier win is better
/// than a later one. `Losing(-1)` marks a game that was already lost before
/// the mover's turn and sorts below every real loss.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Score {
    /// The column cannot be played
    Invalid,
    /// The mover loses after this many further plies
    Losing(i32),
    /// Nothing is decided within the search horizon
    Neutral,
    /// The mover wins after this many further plies
    Winning(i32),
}

impl Score {
    /// Builds a score, checking that only `Losing`/`Winning` carry a payload
    pub fn new(kind: ScoreKind, value: Option<i32>) -> Result<Self> {
        match (kind, value) {
            (ScoreKind::Invalid, None) => Ok(Score::Invalid),
            (ScoreKind::Neutral, None) => Ok(Score::Neutral),
            (ScoreKind::Losing, Some(n)) => Ok(Score::Losing(n)),
            (ScoreKind::Winning, Some(n)) => Ok(Score::Winning(n)),
            (kind @ (ScoreKind::Invalid | ScoreKind::Neutral), Some(_)) => {
                Err(Error::InvalidScorePayload {
                    kind: kind.name(),
                    reason: "must not carry a payload",
                })
            }
            (kind, None) => Err(Error::InvalidScorePayload {
                kind: kind.name(),
                reason: "requires a payload",
            }),
        }
    }

    pub fn kind(&self) -> ScoreKind {
        match self {
            Score::Invalid => ScoreKind::Invalid,
            Score::Losing(_) => ScoreKind::Losing,
            Score::Neutral => ScoreKind::Neutral,
            Score::Winning(_) => ScoreKind::Winning,
        }
    }

    /// The number of plies carried by `Losing`/`Winning`
    pub fn value(&self) -> Option<i32> {
        match *self {
            Score::Losing(n) | Score::Winning(n) => Some(n),
            Score::Invalid | Score::Neutral => None,
        }
    }

    /// Converts the best reply found one ply deeper into the value of the
    /// move that led to it
    ///
    /// An opponent's loss becomes our win one ply later, and an opponent's
    /// win is our loss. `Invalid` only stands for an unsearched placeholder
    /// and collapses to `Neutral`, so this is not an involution.
    pub fn reverse(self) -> Self {
        match self {
            Score::Invalid | Score::Neutral => Score::Neutral,
            Score::Losing(n) => Score::Winning(n + 1),
            Score::Winning(n) => Score::Losing(n),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Score::Invalid => 0,
            Score::Losing(_) => 1,
            Score::Neutral => 2,
            Score::Winning(_) => 3,
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::Neutral
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Score::Losing(a), Score::Losing(b)) => a.cmp(&b),
            // winning sooner is better
            (Score::Winning(a), Score::Winning(b)) => b.cmp(&a),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<(&str, Option<i32>)> for Score {
    type Error = Error;

    fn try_from((kind, value): (&str, Option<i32>)) -> Result<Self> {
        Score::new(kind.parse()?, value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(n) => write!(f, "{} in {}", self.kind().name(), n),
            None => write!(f, "{}", self.kind().name()),
        }
    }
}
