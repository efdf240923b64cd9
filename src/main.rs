use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use std::time::Duration;

use connect_four::{
    config::{GameConfig, PlayerKind},
    game::{Game, Outcome},
    Board, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

mod display;
use display::display;

/// Starts a game of Connect Four between two players.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The game mode for player 1 (O): `manual`, `random` or the depth of an auto-player
    #[arg(long, default_value = "manual")]
    p1: PlayerKind,

    /// The game mode for player 2 (X): `manual`, `random` or the depth of an auto-player
    #[arg(long, default_value = "5")]
    p2: PlayerKind,

    /// The number of columns, at least 4
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// The number of rows, at least 4
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Seed for the players' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Columns already played before the game starts, e.g. 3342
    #[arg(long, default_value = "")]
    moves: String,

    /// Search the first ply of automated players on all cores
    #[arg(long)]
    parallel: bool,

    /// Print the board as plain text instead of coloured tiles
    #[arg(long)]
    plain: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            player_one: self.p1,
            player_two: self.p2,
            seed: self.seed,
            parallel: self.parallel,
            moves: self.moves.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.config();
    config.validate().context("invalid game settings")?;
    let mut game = Game::new(&config).context("could not set up the board")?;

    let show = |board: &Board| -> Result<()> {
        if args.plain {
            println!("{}\n", board);
            Ok(())
        } else {
            display(board)
        }
    };

    println!("Starting a game of Connect Four...\n");
    show(game.board())?;

    let outcome = loop {
        if let Some(outcome) = game.outcome() {
            break outcome;
        }

        let player = game.current_player();
        println!("{}'s turn...", player);

        // searching players get a spinner, manual players need the prompt
        let spinner = if player.is_automated() {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg} {elapsed}")?);
            spinner.set_message("thinking");
            spinner.enable_steady_tick(Duration::from_millis(100));
            Some(spinner)
        } else {
            None
        };

        let turn = game.step();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let turn = turn?;

        println!(
            "{} placed a token in column {} ({:.3} seconds).\n",
            game.player(turn.token),
            turn.column,
            turn.elapsed.as_secs_f64()
        );
        show(game.board())?;
    };

    match outcome {
        Outcome::Winner(token) => {
            let winner = game.player(token);
            println!("{} won in {} moves!", winner, winner.num_moves());
        }
        Outcome::Draw => println!("The board is full. Tie!"),
    }
    Ok(())
}
