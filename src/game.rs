use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{self, RunEnd};
use crate::config::GameConfig;
use crate::error::{ConfigError, ScoreError};
use crate::food::place_food;
use crate::geometry::{Bounds, Point};
use crate::input::{Direction, RestartChoice};
use crate::score::HighScoreStore;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    AwaitingRestartChoice,
    /// The player declined to play again. No further ticks do anything.
    Quit,
}

/// What a single [`Game::tick`] did.
#[derive(Debug)]
pub enum TickEvent {
    Moved,
    AteFood,
    RunEnded(RunEnd),
    /// The finished run was scored; `new_high_score` tells whether it beat
    /// the previous best.
    RunConcluded { new_high_score: bool },
    /// The run beat the high score but writing it failed. The in-memory
    /// high score is still updated.
    HighScoreNotSaved(ScoreError),
    Idle,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub blocks: Vec<Point>,
    pub heading: Direction,
    pub food: Point,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub run_end: Option<RunEnd>,
    pub bounds: Bounds,
}

/// Complete mutable game state for one session, restarted in place.
#[derive(Debug)]
pub struct Game<S> {
    config: GameConfig,
    snake: Snake,
    food: Point,
    score: u32,
    high_score: u32,
    status: GameStatus,
    run_end: Option<RunEnd>,
    rng: StdRng,
    store: S,
}

impl<S: HighScoreStore> Game<S> {
    /// Starts a game, loading the high score from `store` once.
    ///
    /// Fails when `config` does not pass [`GameConfig::validate`]; the store
    /// is not touched in that case.
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut store: S, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = store.load();
        let snake = initial_snake(&config);
        let food = place_food(&mut rng, config.bounds(), &snake).unwrap_or(snake.head());
        info!("new game, high score {high_score}");

        Ok(Self {
            config,
            snake,
            food,
            score: 0,
            high_score,
            status: GameStatus::Playing,
            run_end: None,
            rng,
            store,
        })
    }

    /// Advances the state machine by one step.
    ///
    /// While playing, `intent` is the latest direction the player asked for;
    /// `None` keeps the current heading. In the other states the intent is
    /// ignored.
    pub fn tick(&mut self, intent: Option<Direction>) -> TickEvent {
        match self.status {
            GameStatus::Playing => self.play_step(intent),
            GameStatus::GameOver => self.conclude_run(),
            GameStatus::AwaitingRestartChoice | GameStatus::Quit => TickEvent::Idle,
        }
    }

    fn play_step(&mut self, intent: Option<Direction>) -> TickEvent {
        if let Some(direction) = intent {
            self.snake.steer(direction, self.config.reversal);
        }

        // The old tail is still in place during the check, so moving onto
        // the cell it is about to leave is fatal.
        self.snake.advance();

        if let Some(run_end) = collision::detect(&self.snake, self.bounds()) {
            return self.end_run(run_end);
        }

        if self.snake.head() != self.food {
            self.snake.trim_tail();
            return TickEvent::Moved;
        }

        self.score = self.score.saturating_add(self.config.points_per_food);
        debug!("ate food at {:?}, score {}", self.food, self.score);

        let bounds = self.bounds();
        match place_food(&mut self.rng, bounds, &self.snake) {
            Some(food) => {
                self.food = food;
                TickEvent::AteFood
            }
            None => self.end_run(RunEnd::BoardFilled),
        }
    }

    fn end_run(&mut self, run_end: RunEnd) -> TickEvent {
        info!("run ended ({run_end:?}) with score {}", self.score);
        self.status = GameStatus::GameOver;
        self.run_end = Some(run_end);
        TickEvent::RunEnded(run_end)
    }

    /// Scores a finished run against the high score and moves on to the
    /// play-again prompt. Does nothing outside [`GameStatus::GameOver`].
    pub fn conclude_run(&mut self) -> TickEvent {
        if self.status != GameStatus::GameOver {
            return TickEvent::Idle;
        }

        self.status = GameStatus::AwaitingRestartChoice;
        match self.update_high_score(self.score) {
            Ok(new_high_score) => TickEvent::RunConcluded { new_high_score },
            Err(error) => {
                warn!("failed to save high score: {error}");
                TickEvent::HighScoreNotSaved(error)
            }
        }
    }

    /// Raises the high score to `score` if it is higher, persisting it.
    ///
    /// Returns whether the high score changed. The store is only written
    /// when it does; on a write error the in-memory value stays raised.
    pub fn update_high_score(&mut self, score: u32) -> Result<bool, ScoreError> {
        if score <= self.high_score {
            return Ok(false);
        }

        info!("new high score {score} (was {})", self.high_score);
        self.high_score = score;
        self.store.save(score)?;
        Ok(true)
    }

    /// Handles the answer to the play-again prompt.
    ///
    /// Returns the resulting status. Choices outside
    /// [`GameStatus::AwaitingRestartChoice`] are ignored.
    pub fn choose(&mut self, choice: RestartChoice) -> GameStatus {
        if self.status != GameStatus::AwaitingRestartChoice {
            return self.status;
        }

        match choice {
            RestartChoice::Restart => self.restart(),
            RestartChoice::Quit => {
                info!("player quit");
                self.status = GameStatus::Quit;
            }
        }

        self.status
    }

    /// Resets snake, score and food for a new run. The high score is kept.
    pub fn restart(&mut self) {
        self.snake = initial_snake(&self.config);
        self.score = 0;
        self.run_end = None;
        let bounds = self.bounds();
        self.food = place_food(&mut self.rng, bounds, &self.snake).unwrap_or(self.snake.head());
        self.status = GameStatus::Playing;
        info!("restarted");
    }

    /// Returns true when the head is off the grid or on the body.
    #[must_use]
    pub fn is_collision(&self) -> bool {
        collision::is_collision(&self.snake, self.bounds())
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            blocks: self.snake.blocks().copied().collect(),
            heading: self.snake.heading(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            run_end: self.run_end,
            bounds: self.bounds(),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Direct access for scripted scenarios.
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[must_use]
    pub fn food(&self) -> Point {
        self.food
    }

    /// Moves the food, e.g. to script a scenario.
    pub fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn run_end(&self) -> Option<RunEnd> {
        self.run_end
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn initial_snake(config: &GameConfig) -> Snake {
    Snake::new(
        config.bounds().center(),
        Direction::Right,
        config.initial_length,
        config.cell_size,
    )
}
