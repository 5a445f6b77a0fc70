use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_match::ai::Tier;
use connect_four_match::config::MatchConfig;
use connect_four_match::engine::{GameEngine, Phase};
use connect_four_match::game::{Board, Cell, COLS, ROWS};
use connect_four_match::results::FileResultSink;

/// Play Connect Four against a tiered computer opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override computer difficulty (1-3)
    #[arg(long)]
    tier: Option<u8>,

    /// Override rounds per game
    #[arg(long)]
    rounds: Option<u32>,

    /// Override the directory result files are written into
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Fix the computer's random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MatchConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(tier) = cli.tier {
        config.tier = tier;
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }
    if let Some(results_dir) = cli.results_dir {
        config.results_dir = results_dir;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate().context("invalid settings")?;

    let tier = Tier::try_from(config.tier)?;
    let sink = FileResultSink::new(&config.results_dir);
    let engine = match config.seed {
        Some(seed) => GameEngine::with_seed(sink, seed),
        None => GameEngine::new(sink),
    };

    run(engine, tier, config.rounds)
}

fn run(mut engine: GameEngine<FileResultSink>, tier: Tier, rounds: u32) -> Result<()> {
    println!("Connect Four. You are X; the tier {} computer is O.", tier);
    println!("Pieces fall to the lowest open cell. Four in a row wins a round.");
    println!(
        "Results are appended under '{}'.",
        engine.sink().dir().display()
    );

    let mut input = io::stdin().lock().lines();
    let mut rendered_at = u64::MAX;

    loop {
        // A fresh game keeps the settings the player launched with.
        if engine.state().phase == Phase::AwaitingConfig {
            engine.configure(tier, rounds)?;
        }

        if engine.revision() != rendered_at {
            render(&engine);
            rendered_at = engine.revision();
        }
        if let Some(err) = engine.take_sink_error() {
            eprintln!("Warning: results not recorded: {err}");
        }

        print!("{}", prompt(engine.state().phase));
        io::stdout().flush().ok();

        let Some(line) = input.next() else {
            break;
        };
        let line = line.context("reading input")?;
        let cmd = line.trim();

        match cmd {
            "q" => break,
            "n" => engine.new_game(),
            "e" => {
                if let Err(err) = engine.end_game_early() {
                    println!("{err}");
                }
            }
            "" => {
                if engine.state().phase == Phase::RoundOver {
                    engine.advance_round()?;
                }
            }
            _ => match cmd.parse::<usize>() {
                Ok(n) if (1..=COLS).contains(&n) => {
                    if let Err(err) = engine.submit_human_move(n - 1) {
                        println!("{err}");
                    }
                }
                _ => println!("Unrecognized input '{cmd}'."),
            },
        }
    }

    Ok(())
}

fn prompt(phase: Phase) -> &'static str {
    match phase {
        Phase::InRound => "Your move [1-7], (e)nd game, (n)ew game, (q)uit: ",
        Phase::RoundOver => "Enter for the next round, (e) to settle the game, (n)ew, (q)uit: ",
        Phase::GameOver => "(n)ew game or (q)uit: ",
        Phase::AwaitingConfig => ": ",
    }
}

fn render(engine: &GameEngine<FileResultSink>) {
    let state = engine.state();
    println!();
    match state.phase {
        Phase::InRound => {
            println!(
                "Game {} - Round {} of {} (you {} : {} computer)",
                engine.game_id(),
                state.round,
                state.max_rounds,
                state.human_score,
                state.computer_score
            );
            print_board(engine.board());
        }
        Phase::RoundOver => {
            print_board(engine.board());
            println!("Round {} - {}", state.round, state.round_outcome);
            if let Some(line) = state.round_outcome.win_line() {
                println!(
                    "Four in a row from {} to {}.",
                    cell_name(line.start),
                    cell_name(line.end)
                );
            }
            println!(
                "Scores: you {} : {} computer",
                state.human_score, state.computer_score
            );
        }
        Phase::GameOver => {
            println!(
                "Game {} over. Final scores: you {} : {} computer.",
                engine.game_id(),
                state.human_score,
                state.computer_score
            );
            if let Some(outcome) = state.game_outcome {
                println!("Overall Game Result - {outcome}");
            }
        }
        Phase::AwaitingConfig => {}
    }
}

fn print_board(board: &Board) {
    for row in 0..ROWS {
        let mut line = String::new();
        for col in 0..COLS {
            let glyph = match board.get(row, col) {
                Cell::Empty => '.',
                Cell::Human => 'X',
                Cell::Computer => 'O',
            };
            line.push(glyph);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
    println!("1 2 3 4 5 6 7");
}

fn cell_name(cell: (usize, usize)) -> String {
    format!("row {}, column {}", cell.0 + 1, cell.1 + 1)
}
