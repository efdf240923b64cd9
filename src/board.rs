//! A mutable Connect Four board with incremental win detection

use std::fmt;

use crate::error::{Error, Result};
use crate::{CONNECT, MIN_DIMENSION};

/// One of the two playing sides. `O` always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token {
    O,
    X,
}

impl Token {
    /// The opposing side
    pub fn other(self) -> Self {
        match self {
            Token::O => Token::X,
            Token::X => Token::O,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Token::O => 'O',
            Token::X => 'X',
        }
    }
}

impl TryFrom<char> for Token {
    type Error = Error;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'O' => Ok(Token::O),
            'X' => Ok(Token::X),
            other => Err(Error::InvalidToken(other)),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Filled(Token),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn holds(&self, token: Token) -> bool {
        *self == Cell::Filled(token)
    }
}

/// The game grid
///
/// # Notes
/// Cells are stored left-to-right, bottom-to-top, so row 0 is the bottom row.
/// Each column keeps a fill pointer so placing and removing are O(1) apart
/// from the upkeep of the dirty window.
///
/// # Dirty Window
/// `dirty_min_row..=dirty_max_row` spans the top filled cells of every column.
/// Right after a [`place`](Board::place) or [`remove`](Board::remove), any
/// four-in-a-row that involves the last touched cell has its highest cell
/// inside this band, so a windowed scan only starts runs there.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    // next free row of every column, which is also its number of tokens
    heights: Vec<usize>,
    num_moves: usize,
    dirty_min_row: usize,
    dirty_max_row: usize,
}

impl Board {
    /// Creates an empty board, failing if either dimension is below 4
    pub fn new(width: usize, height: usize) -> Result<Self> {
        for dimension in [width, height] {
            if dimension < MIN_DIMENSION {
                return Err(Error::InvalidDimension(dimension));
            }
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            num_moves: 0,
            dirty_min_row: 0,
            dirty_max_row: 0,
        })
    }

    /// Builds a board from a digit string of column indices, alternating
    /// tokens and starting with `O`
    pub fn from_moves<S: AsRef<str>>(width: usize, height: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(width, height)?;
        let mut token = Token::O;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    board.place(token, column as usize)?;
                    token = token.other();
                }
                None => return Err(Error::UnparsableMove(column_char)),
            }
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The number of tokens in `column`
    ///
    /// # Panics
    /// If `column` is not below the board width.
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// The cell at `row` (counted from the bottom) and `column`
    ///
    /// # Panics
    /// If the position lies outside the board. Cells are stored in one flat
    /// vector, so an unchecked column past the edge would read the next row.
    pub fn get(&self, row: usize, column: usize) -> Cell {
        assert!(
            row < self.height && column < self.width,
            "cell ({}, {}) is outside a {}x{} board",
            row,
            column,
            self.width,
            self.height
        );
        self.cells[self.index(row, column)]
    }

    /// The token that would have to move next if the game started with `O`
    pub fn next_token(&self) -> Token {
        if self.num_moves % 2 == 0 {
            Token::O
        } else {
            Token::X
        }
    }

    /// The playable columns, left to right
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.width).filter(|&c| self.can_place(c)).collect()
    }

    fn index(&self, row: usize, column: usize) -> usize {
        column + self.width * row
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.width {
            return Err(Error::InvalidColumn {
                column,
                width: self.width,
            });
        }
        Ok(())
    }

    pub fn can_place(&self, column: usize) -> bool {
        column < self.width && self.heights[column] < self.height
    }

    /// Drops `token` into `column`, returning the row where it landed
    pub fn place(&mut self, token: Token, column: usize) -> Result<usize> {
        self.check_column(column)?;
        if !self.can_place(column) {
            return Err(Error::ColumnFull(column));
        }

        let row = self.heights[column];
        let index = self.index(row, column);
        self.cells[index] = Cell::Filled(token);
        self.heights[column] += 1;
        self.num_moves += 1;

        // the new cell can only raise the top of the band, but filling the
        // lowest column may lift its bottom
        self.dirty_max_row = self.dirty_max_row.max(row);
        self.dirty_min_row = self.lowest_top_row();
        Ok(row)
    }

    /// Takes the most recently placed token back out of `column`
    pub fn remove(&mut self, column: usize) -> Result<Token> {
        self.check_column(column)?;
        if self.heights[column] == 0 {
            return Err(Error::EmptyColumn(column));
        }

        self.heights[column] -= 1;
        let index = self.index(self.heights[column], column);
        let removed = match std::mem::replace(&mut self.cells[index], Cell::Empty) {
            Cell::Filled(token) => token,
            Cell::Empty => unreachable!("fill pointer points above an empty cell"),
        };
        self.num_moves -= 1;

        // another column may now define either edge of the band
        self.dirty_min_row = self.lowest_top_row();
        self.dirty_max_row = self.highest_top_row();
        Ok(removed)
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.height)
    }

    // empty columns count as a top at row 0
    fn top_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.heights.iter().map(|h| h.saturating_sub(1))
    }

    fn lowest_top_row(&self) -> usize {
        self.top_rows().min().unwrap_or(0)
    }

    fn highest_top_row(&self) -> usize {
        self.top_rows().max().unwrap_or(0)
    }

    /// Checks whether `token` has four aligned tiles on the board
    ///
    /// With `windowed` set, only alignments whose highest cell lies in the
    /// dirty window are inspected. That is only sound directly after a
    /// `place`/`remove` on a board where no earlier move already won.
    pub fn has_connect_four(&self, token: Token, windowed: bool) -> bool {
        let (low, high) = if windowed {
            (
                self.dirty_min_row.min(self.height - 1),
                self.dirty_max_row.min(self.height - 1),
            )
        } else {
            (0, self.height - 1)
        };

        self.connects_horizontal(token, low, high)
            || self.connects_vertical(token, low, high)
            || self.connects_rising(token, low, high)
            || self.connects_falling(token, low, high)
    }

    // rows whose cell is the top of a run spanning CONNECT rows
    fn tall_run_tops(&self, low: usize, high: usize) -> std::ops::RangeInclusive<usize> {
        low.max(CONNECT - 1)..=high
    }

    fn run(&self, token: Token, row: usize, column: usize, d_row: isize, d_col: isize) -> bool {
        (0..CONNECT as isize).all(|i| {
            let r = (row as isize + i * d_row) as usize;
            let c = (column as isize + i * d_col) as usize;
            self.cells[self.index(r, c)].holds(token)
        })
    }

    fn connects_horizontal(&self, token: Token, low: usize, high: usize) -> bool {
        (low..=high).any(|row| {
            (0..=self.width - CONNECT).any(|column| self.run(token, row, column, 0, 1))
        })
    }

    fn connects_vertical(&self, token: Token, low: usize, high: usize) -> bool {
        self.tall_run_tops(low, high).any(|top| {
            (0..self.width).any(|column| self.run(token, top, column, -1, 0))
        })
    }

    // bottom-left to top-right, /
    fn connects_rising(&self, token: Token, low: usize, high: usize) -> bool {
        self.tall_run_tops(low, high).any(|top| {
            (CONNECT - 1..self.width).any(|column| self.run(token, top, column, -1, -1))
        })
    }

    // top-left to bottom-right, \
    fn connects_falling(&self, token: Token, low: usize, high: usize) -> bool {
        self.tall_run_tops(low, high).any(|top| {
            (0..=self.width - CONNECT).any(|column| self.run(token, top, column, -1, 1))
        })
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            write!(f, "|")?;
            for column in 0..self.width {
                let tile = match self.get(row, column) {
                    Cell::Filled(token) => token.to_char(),
                    Cell::Empty => ' ',
                };
                write!(f, "{}|", tile)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(self.width * 2 + 1))?;
        let indices: Vec<String> = (0..self.width).map(|c| (c % 10).to_string()).collect();
        write!(f, " {}", indices.join(" "))
    }
}
