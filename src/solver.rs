//! An automated player that looks ahead with a depth-limited game tree search

use log::{debug, trace};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use std::fmt;

use crate::{
    board::{Board, Token},
    error::{Error, Result},
    score::Score,
};

/// Scores every column of `board` for `token`, looking `depth` plies ahead
///
/// The board is mutated in place while searching and restored exactly before
/// this returns, so it must not be observed by anyone else meanwhile.
///
/// # Scoring
/// * an unplayable column is `Invalid`
/// * if `opponent` has just completed a four-in-a-row the game is already
///   lost, and every playable column is `Losing(-1)`
/// * at the search horizon every playable column is `Neutral`
/// * otherwise the column takes the opponent's best reply, reversed
///
/// # Errors
/// Any `place`/`remove` failure during the search is returned as is. It can
/// only happen if the board's fill pointers disagree with its cells.
pub fn scores_for_each_column(
    board: &mut Board,
    token: Token,
    opponent: Token,
    depth: u32,
) -> Result<Vec<Score>> {
    let mut node_count = 0;
    search(board, token, opponent, depth, &mut node_count)
}

/// Same as [`scores_for_each_column`], with the root columns evaluated on the
/// rayon thread pool, each on its own copy of the board
pub fn scores_for_each_column_par(
    board: &Board,
    token: Token,
    opponent: Token,
    depth: u32,
) -> Result<Vec<Score>> {
    Ok(par_search(board, token, opponent, depth)?.0)
}

fn search(
    board: &mut Board,
    token: Token,
    opponent: Token,
    depth: u32,
    node_count: &mut usize,
) -> Result<Vec<Score>> {
    *node_count += 1;
    (0..board.width())
        .map(|column| score_column(board, token, opponent, depth, column, node_count))
        .collect()
}

fn par_search(
    board: &Board,
    token: Token,
    opponent: Token,
    depth: u32,
) -> Result<(Vec<Score>, usize)> {
    let branches = (0..board.width())
        .into_par_iter()
        .map(|column| -> Result<(Score, usize)> {
            let mut branch = board.clone();
            let mut node_count = 0;
            let score = score_column(&mut branch, token, opponent, depth, column, &mut node_count)?;
            Ok((score, node_count))
        })
        .collect::<Result<Vec<(Score, usize)>>>()?;

    let node_count = branches.iter().map(|&(_, n)| n).sum::<usize>() + 1;
    Ok((branches.into_iter().map(|(score, _)| score).collect(), node_count))
}

/// Scores a single column, leaving `board` as it found it
///
/// A failing `place` or `remove` means the board no longer matches its own
/// fill pointers, so the search stops there instead of scoring around it.
fn score_column(
    board: &mut Board,
    token: Token,
    opponent: Token,
    depth: u32,
    column: usize,
    node_count: &mut usize,
) -> Result<Score> {
    if !board.can_place(column) {
        return Ok(Score::Invalid);
    }
    // the previous mover already won, nothing played here matters
    if board.has_connect_four(opponent, true) {
        return Ok(Score::Losing(-1));
    }
    if depth == 0 {
        return Ok(Score::Neutral);
    }

    board.place(token, column)?;
    let replies = search(board, opponent, token, depth - 1, node_count);
    // undo first, so an error deeper down still hands the board back intact
    board.remove(column)?;

    let best_reply = replies?.into_iter().max().unwrap_or(Score::Invalid);
    let score = best_reply.reverse();
    trace!("{} column {} at depth {}: {}", token, column, depth, score);
    Ok(score)
}

/// A player that chooses moves with a fixed-depth negamax search
///
/// # Notes
/// Every playable column is searched `depth` plies ahead. Among the columns
/// sharing the best [`Score`] one is picked uniformly at random, so repeated
/// games against the same opponent vary.
#[derive(Clone)]
pub struct AutoPlayer {
    token: Token,
    opponent: Token,
    depth: u32,
    num_moves: usize,
    score: Score,
    parallel: bool,
    rng: ChaCha8Rng,

    /// The number of positions searched by this player so far (for diagnostics only)
    pub node_count: usize,
}

impl AutoPlayer {
    /// Creates a player for `token` searching `depth` plies ahead
    pub fn new(token: Token, depth: u32) -> Self {
        Self {
            token,
            opponent: token.other(),
            depth,
            num_moves: 0,
            score: Score::Neutral,
            parallel: false,
            rng: ChaCha8Rng::from_entropy(),
            node_count: 0,
        }
    }

    /// Seeds the tie-breaking RNG so decisions are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Splits the root columns across the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn opponent(&self) -> Token {
        self.opponent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The best score found by the most recent decision
    pub fn score(&self) -> Score {
        self.score
    }

    /// Scores every column of `board` from this player's point of view
    pub fn scores(&mut self, board: &mut Board) -> Result<Vec<Score>> {
        if self.parallel {
            let (scores, node_count) = par_search(board, self.token, self.opponent, self.depth)?;
            self.node_count += node_count;
            Ok(scores)
        } else {
            search(board, self.token, self.opponent, self.depth, &mut self.node_count)
        }
    }

    /// Chooses the column to play, recording its score
    pub fn decide(&mut self, board: &mut Board) -> Result<usize> {
        self.num_moves += 1;
        let nodes_before = self.node_count;
        let scores = self.scores(board)?;

        let best = scores
            .iter()
            .copied()
            .filter(|&s| s != Score::Invalid)
            .max()
            .ok_or(Error::NoLegalMove)?;
        self.score = best;

        let candidates: Vec<usize> = (0..scores.len()).filter(|&c| scores[c] == best).collect();
        let column = *candidates.choose(&mut self.rng).ok_or(Error::NoLegalMove)?;

        debug!(
            "{} scored {:?} after {} positions, playing column {}",
            self,
            scores,
            self.node_count - nodes_before,
            column
        );
        Ok(column)
    }
}

impl fmt::Display for AutoPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score.value() {
            Some(n) if n > 0 => write!(
                f,
                "Player {} (Level {} - {})",
                self.token, self.depth, self.score
            ),
            _ => write!(f, "Player {} (Level {})", self.token, self.depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Score::*;

    fn scenario() -> Board {
        Board::from_moves(7, 6, "04122544114").unwrap()
    }

    fn around(edge: Score, middle: Score) -> Vec<Score> {
        let mut scores = vec![edge; 7];
        scores[3] = middle;
        scores
    }

    #[test]
    fn new_player() {
        let player = AutoPlayer::new(Token::O, 3);
        assert_eq!(player.depth(), 3);
        assert_eq!(player.score(), Neutral);
        assert_eq!(player.opponent(), Token::X);
        assert_eq!(AutoPlayer::new(Token::X, 2).opponent(), Token::O);
    }

    #[test]
    fn score_table() {
        let mut board = scenario();
        let expected = [
            (Token::O, 0, vec![Neutral; 7]),
            (Token::O, 1, vec![Neutral; 7]),
            (Token::O, 2, around(Losing(0), Neutral)),
            (Token::X, 1, around(Neutral, Winning(0))),
            (Token::O, 3, around(Losing(0), Winning(1))),
            (Token::X, 3, around(Neutral, Winning(0))),
            (Token::X, 4, around(Losing(1), Winning(0))),
        ];
        for (token, depth, scores) in expected {
            assert_eq!(
                scores_for_each_column(&mut board, token, token.other(), depth).unwrap(),
                scores,
                "{} at depth {}",
                token,
                depth
            );
        }
        assert_eq!(board, scenario());
    }

    #[test]
    fn parallel_search_matches_sequential() {
        let mut board = scenario();
        for depth in 0..4 {
            for token in [Token::O, Token::X] {
                assert_eq!(
                    scores_for_each_column_par(&board, token, token.other(), depth).unwrap(),
                    scores_for_each_column(&mut board, token, token.other(), depth).unwrap()
                );
            }
        }
    }

    #[test]
    fn full_columns_are_invalid() {
        let mut board = Board::from_moves(4, 4, "0000").unwrap();
        let scores = scores_for_each_column(&mut board, Token::O, Token::X, 1).unwrap();
        assert_eq!(scores[0], Invalid);
        assert!(scores[1..].iter().all(|&s| s == Neutral));
    }

    #[test]
    fn search_past_a_full_board_succeeds() {
        // four empty cells left, so most lines run out of columns long
        // before the depth is used up
        let mut board = Board::from_moves(4, 4, "012301230011").unwrap();
        let before = board.clone();
        for token in [Token::O, Token::X] {
            let sequential = scores_for_each_column(&mut board, token, token.other(), 10);
            let parallel = scores_for_each_column_par(&board, token, token.other(), 10);
            assert!(sequential.is_ok(), "{:?}", sequential);
            assert_eq!(sequential.unwrap(), parallel.unwrap());
            assert_eq!(board, before);
        }
    }

    #[test]
    fn decided_game_scores_losing() {
        // X has four in a column and O is asked to move
        let mut board = Board::from_moves(7, 6, "1010101").unwrap();
        board.remove(1).unwrap();
        board.place(Token::X, 0).unwrap();
        assert_eq!(
            scores_for_each_column(&mut board, Token::O, Token::X, 3).unwrap(),
            vec![Losing(-1); 7]
        );
    }

    #[test]
    fn decide_picks_the_winning_column() {
        let mut board = scenario();
        let mut player = AutoPlayer::new(Token::O, 3).with_seed(1);
        assert_eq!(player.decide(&mut board).unwrap(), 3);
        assert_eq!(player.score(), Winning(1));
        assert_eq!(player.num_moves(), 1);
        assert!(player.node_count > 0);
        assert_eq!(board, scenario());
    }

    #[test]
    fn decide_on_full_board_fails() {
        let mut board = Board::from_moves(4, 4, "0123012312300123").unwrap();
        assert!(board.is_full());
        let mut player = AutoPlayer::new(Token::O, 2);
        assert!(matches!(player.decide(&mut board), Err(Error::NoLegalMove)));
    }

    #[test]
    fn ties_are_broken_at_random() {
        let mut board = Board::new(7, 6).unwrap();
        let mut player = AutoPlayer::new(Token::O, 0).with_seed(42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[player.decide(&mut board).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(player.num_moves(), 500);
    }

    #[test]
    fn display() {
        let mut player = AutoPlayer::new(Token::O, 3).with_seed(3);
        assert_eq!(player.to_string(), "Player O (Level 3)");
        assert_eq!(AutoPlayer::new(Token::X, 0).to_string(), "Player X (Level 0)");

        let mut board = Board::from_moves(4, 4, "012301230011").unwrap();
        assert_eq!(player.decide(&mut board).unwrap(), 2);
        assert_eq!(player.to_string(), "Player O (Level 3 - winning in 1)");
    }
}
