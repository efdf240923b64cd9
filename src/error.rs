//! Errors raised by the board, the score type and the players

use crate::MIN_DIMENSION;

/// Everything that can go wrong while setting up or playing a game.
///
/// None of these are retried internally; they are reported to the immediate
/// caller, which is expected to have checked `can_place` beforehand.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("board dimension must be at least {MIN_DIMENSION}, found {0}")]
    InvalidDimension(usize),

    #[error("expected token 'O' or 'X', found '{0}'")]
    InvalidToken(char),

    #[error("column {column} out of range, columns must be between 0 and {}", .width - 1)]
    InvalidColumn { column: usize, width: usize },

    #[error("could not parse '{0}' as a valid move")]
    UnparsableMove(char),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is empty")]
    EmptyColumn(usize),

    #[error("score kind '{kind}' {reason}")]
    InvalidScorePayload { kind: &'static str, reason: &'static str },

    #[error("cannot compare a score with '{0}'")]
    IncomparableValue(String),

    #[error("expected `manual`, `random` or a search depth, found '{0}'")]
    UnknownPlayer(String),

    #[error("both players use token '{0}'")]
    DuplicateToken(char),

    #[error("the game is already over")]
    GameOver,

    #[error("no column is playable")]
    NoLegalMove,

    #[error("player {token} chose unplayable column {column}")]
    IllegalMove { token: char, column: usize },

    #[error("input closed before a playable column was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_column_display() {
        let err = Error::InvalidColumn { column: 9, width: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 out of range, columns must be between 0 and 6"
        );
    }

    #[test]
    fn invalid_dimension_display() {
        assert_eq!(
            Error::InvalidDimension(3).to_string(),
            "board dimension must be at least 4, found 3"
        );
    }

    #[test]
    fn score_payload_display() {
        let err = Error::InvalidScorePayload {
            kind: "losing",
            reason: "requires a payload",
        };
        assert_eq!(err.to_string(), "score kind 'losing' requires a payload");
    }
}
