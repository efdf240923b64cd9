//! Hosts a game between two players

use log::{debug, info};

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Token},
    config::GameConfig,
    error::{Error, Result},
    player::{Decide, Player},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Winner(Token),
    Draw,
}

/// What happened during a single move
#[derive(Clone, Debug)]
pub struct Turn {
    pub token: Token,
    pub column: usize,
    pub elapsed: Duration,
    pub outcome: Option<Outcome>,
}

/// A board plus the two players taking turns on it, `O` first
pub struct Game {
    board: Board,
    players: [Player; 2],
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let board = config.board()?;
        let players = [config.player(Token::O), config.player(Token::X)];
        Self::with_players(board, players)
    }

    /// Starts from an existing position
    ///
    /// The players may come in either order; each is seated by its own token.
    /// Two players sharing a token are rejected.
    pub fn with_players(board: Board, players: [Player; 2]) -> Result<Self> {
        let [first, second] = players;
        if first.token() == second.token() {
            return Err(Error::DuplicateToken(first.token().to_char()));
        }
        let players = match first.token() {
            Token::O => [first, second],
            Token::X => [second, first],
        };

        // a position handed in from outside has no dirty window to trust
        let outcome = [Token::O, Token::X]
            .into_iter()
            .find(|&t| board.has_connect_four(t, false))
            .map(Outcome::Winner)
            .or_else(|| board.is_full().then_some(Outcome::Draw));
        Ok(Self {
            board,
            players,
            outcome,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_index()]
    }

    /// The player using `token`
    pub fn player(&self, token: Token) -> &Player {
        match token {
            Token::O => &self.players[0],
            Token::X => &self.players[1],
        }
    }

    fn current_index(&self) -> usize {
        match self.board.next_token() {
            Token::O => 0,
            Token::X => 1,
        }
    }

    /// Asks the current player for a move and plays it
    pub fn step(&mut self) -> Result<Turn> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }

        let index = self.current_index();
        let player = &mut self.players[index];
        let token = player.token();

        let start = Instant::now();
        let column = player.decide(&mut self.board)?;
        let elapsed = start.elapsed();

        if !self.board.can_place(column) {
            return Err(Error::IllegalMove {
                token: token.to_char(),
                column,
            });
        }
        self.board.place(token, column)?;
        debug!("{} placed a token in column {} ({:?})", player, column, elapsed);

        if self.board.has_connect_four(token, true) {
            info!("{} won in {} moves", player, player.num_moves());
            self.outcome = Some(Outcome::Winner(token));
        } else if self.board.is_full() {
            info!("the board is full after {} moves", self.board.num_moves());
            self.outcome = Some(Outcome::Draw);
        }

        Ok(Turn {
            token,
            column,
            elapsed,
            outcome: self.outcome,
        })
    }

    /// Plays until someone wins or the board fills up, reporting every turn
    pub fn run<F: FnMut(&Game, &Turn)>(&mut self, mut observer: F) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            let turn = self.step()?;
            observer(self, &turn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{player::RandomPlayer, solver::AutoPlayer};

    fn random_game(seed: u64) -> Game {
        let players = [
            RandomPlayer::new(Token::O).with_seed(seed).into(),
            RandomPlayer::new(Token::X).with_seed(seed + 1).into(),
        ];
        Game::with_players(Board::new(7, 6).unwrap(), players).unwrap()
    }

    #[test]
    fn random_game_ends() {
        for seed in 0..20 {
            let mut game = random_game(seed);
            let mut turns = 0;
            let outcome = game.run(|_, _| turns += 1).unwrap();

            assert_eq!(turns, game.board().num_moves());
            match outcome {
                Outcome::Winner(token) => assert!(game.board().has_connect_four(token, false)),
                Outcome::Draw => assert!(game.board().is_full()),
            }
            assert!(matches!(game.step(), Err(Error::GameOver)));
        }
    }

    #[test]
    fn players_alternate() {
        let mut game = random_game(3);
        assert_eq!(game.step().unwrap().token, Token::O);
        assert_eq!(game.step().unwrap().token, Token::X);
        assert_eq!(game.step().unwrap().token, Token::O);
    }

    #[test]
    fn automated_player_finishes_the_scenario() {
        // eleven moves in, so X is up and completes column 3 straight away
        let board = Board::from_moves(7, 6, "04122544114").unwrap();
        let players = [
            AutoPlayer::new(Token::O, 3).with_seed(1).into(),
            AutoPlayer::new(Token::X, 1).with_seed(2).into(),
        ];
        let mut game = Game::with_players(board, players).unwrap();
        assert_eq!(game.current_player().token(), Token::X);
        assert_eq!(game.player(Token::X).to_string(), "Player X (Level 1)");

        let mut columns = vec![];
        let outcome = game.run(|_, turn| columns.push(turn.column)).unwrap();
        assert_eq!(outcome, Outcome::Winner(Token::X));
        assert_eq!(columns, vec![3]);
        assert_eq!(game.board().num_moves(), 12);
        assert_eq!(game.player(Token::X).num_moves(), 1);
        assert_eq!(game.player(Token::O).num_moves(), 0);
    }

    #[test]
    fn players_are_seated_by_token() {
        let players = [
            AutoPlayer::new(Token::X, 1).into(),
            RandomPlayer::new(Token::O).into(),
        ];
        let game = Game::with_players(Board::new(7, 6).unwrap(), players).unwrap();
        assert_eq!(game.current_player().token(), Token::O);
        assert_eq!(game.player(Token::O).to_string(), "Player O (Random)");
        assert_eq!(game.player(Token::X).to_string(), "Player X (Level 1)");
    }

    #[test]
    fn players_sharing_a_token_are_rejected() {
        let players = [
            RandomPlayer::new(Token::X).into(),
            RandomPlayer::new(Token::X).into(),
        ];
        assert!(matches!(
            Game::with_players(Board::new(7, 6).unwrap(), players),
            Err(Error::DuplicateToken('X'))
        ));
    }

    #[test]
    fn finished_position_is_recognised() {
        let board = Board::from_moves(7, 6, "0101010").unwrap();
        let players = [
            RandomPlayer::new(Token::O).into(),
            RandomPlayer::new(Token::X).into(),
        ];
        let game = Game::with_players(board, players).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Winner(Token::O)));
    }
}
