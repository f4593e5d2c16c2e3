use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::GameConfig;
use grid_snake::error::ConfigError;
use grid_snake::game::{Game, GameStatus, TickEvent};
use grid_snake::input::{self, Direction, GameInput, ReversalPolicy};
use grid_snake::score::{HighScoreStore, JsonFileStore};
use grid_snake::terminal::GameScreen;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How long the "game over" message stays up before the play-again prompt.
const GAME_OVER_HOLD: Duration = Duration::from_millis(1200);

#[derive(Debug, Parser)]
#[command(version, about = "Classic grid Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels.
    #[arg(long)]
    width: Option<i32>,

    /// Playfield height in pixels.
    #[arg(long)]
    height: Option<i32>,

    /// Side length of one cell in pixels.
    #[arg(long)]
    cell_size: Option<i32>,

    /// Game speed in ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Accept a direct 180° turn (the snake then bites its own neck).
    #[arg(long)]
    allow_reversal: bool,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Log file; stdout belongs to the game screen.
    #[arg(long, default_value = "grid-snake.log")]
    log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("Failed to open log file {}: {error}", cli.log_file.display());
    }

    let config = resolve_config(&cli).map_err(invalid_input)?;

    let store = cli
        .scores
        .clone()
        .map_or_else(JsonFileStore::at_default_location, JsonFileStore::new);
    if let Err(error) = store.try_load() {
        eprintln!("Warning: {error}; starting from a high score of 0");
    }

    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(config, store, seed),
        None => Game::new(config, store),
    }
    .map_err(invalid_input)?;

    let warnings = run(&mut game).inspect_err(|error| error!("terminal failure: {error}"))?;
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }

    Ok(())
}

fn invalid_input(error: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(&cli.log_file)?;
    // Only fails when a logger is already set.
    let _ = WriteLogger::init(level, Config::default(), file);
    Ok(())
}

/// Layers CLI flags over the config file. Validation happens when the game
/// is built.
fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(tps) = cli.tps {
        config.ticks_per_second = tps;
    }
    if cli.allow_reversal {
        config.reversal = ReversalPolicy::Allow;
    }

    Ok(config)
}

/// Runs the fixed-rate host loop until the player quits.
///
/// Returns the non-fatal warnings collected along the way.
fn run<S: HighScoreStore>(game: &mut Game<S>) -> io::Result<Vec<String>> {
    let tick_interval = game.config().tick_interval();
    let mut warnings = Vec::new();

    let mut screen = GameScreen::open(game.bounds())?;

    info!(
        "starting at {} ticks per second",
        game.config().ticks_per_second
    );
    let mut pending: Option<Direction> = None;
    let mut last_tick = Instant::now();
    let mut game_over_since: Option<Instant> = None;

    loop {
        screen.draw(&game.snapshot())?;

        let inputs = input::drain_pending()?;
        if inputs.contains(&GameInput::Exit) {
            info!("exit requested");
            break;
        }

        match game.status() {
            GameStatus::Playing => {
                pending = input::latest_direction(&inputs).or(pending);

                if last_tick.elapsed() >= tick_interval {
                    last_tick = Instant::now();
                    game.tick(pending.take());
                }
            }
            GameStatus::GameOver => {
                let since = *game_over_since.get_or_insert_with(Instant::now);
                if since.elapsed() >= GAME_OVER_HOLD {
                    game_over_since = None;
                    if let TickEvent::HighScoreNotSaved(error) = game.conclude_run() {
                        warnings.push(error.to_string());
                    }
                }
            }
            GameStatus::AwaitingRestartChoice => {
                let choice = inputs.iter().find_map(|input| match input {
                    GameInput::Choice(choice) => Some(*choice),
                    _ => None,
                });
                if let Some(choice) = choice {
                    game.choose(choice);
                    pending = None;
                    last_tick = Instant::now();
                }
            }
            GameStatus::Quit => break,
        }

        thread::sleep(FRAME_INTERVAL);
    }

    Ok(warnings)
}
