use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, Print, PrintStyledContent, Stylize},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect_four::{Board, Cell, Token};

/// Draws the board with coloured tiles, top row first
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for row in (0..board.height()).rev() {
        for column in 0..board.width() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(row, column) {
                        Cell::Filled(Token::O) => Color::Red,
                        Cell::Filled(Token::X) => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(Print("\n"))?;
    }

    let columns: String = (0..board.width()).map(|c| (c % 10).to_string()).collect();
    stdout.queue(Print(columns + "\n\n"))?;
    stdout.flush()?;
    Ok(())
}
