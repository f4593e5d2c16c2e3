use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)` in screen orientation (y grows downward).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Whether a direct 180° turn is accepted as a heading change.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversalPolicy {
    /// Reversals are silently ignored and the heading is kept.
    #[default]
    Reject,
    /// Reversals are adopted; the snake then runs into its own neck.
    Allow,
}

impl ReversalPolicy {
    /// Returns whether turning from `current` to `next` is legal.
    #[must_use]
    pub fn permits(self, current: Direction, next: Direction) -> bool {
        match self {
            Self::Reject => next != current.opposite(),
            Self::Allow => true,
        }
    }
}

/// Answer to the play-again prompt.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RestartChoice {
    Restart,
    Quit,
}

/// High-level input events consumed by the host loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Choice(RestartChoice),
    /// Leave the program from any state.
    Exit,
}

/// Maps a key press to a game input, if it has one.
#[must_use]
pub fn decode_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Exit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char('y' | 'Y') => GameInput::Choice(RestartChoice::Restart),
        KeyCode::Esc | KeyCode::Char('n' | 'N') => GameInput::Choice(RestartChoice::Quit),
        KeyCode::Char('q' | 'Q') => GameInput::Exit,
        _ => return None,
    };

    Some(input)
}

/// Drains every pending terminal event without blocking.
///
/// Returns the decoded inputs in arrival order; an empty vector means the
/// player pressed nothing since the last poll.
pub fn drain_pending() -> io::Result<Vec<GameInput>> {
    let mut inputs = Vec::new();

    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if let Some(input) = decode_key(key) {
                inputs.push(input);
            }
        }
    }

    Ok(inputs)
}

/// Returns the last directional intent in `inputs`, if any.
#[must_use]
pub fn latest_direction(inputs: &[GameInput]) -> Option<Direction> {
    inputs.iter().rev().find_map(|input| match input {
        GameInput::Direction(direction) => Some(*direction),
        _ => None,
    })
}
