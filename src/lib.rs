//! Grid Snake: a headless game core plus the terminal pieces the binary
//! uses to present it.
//!
//! The core (`geometry`, `snake`, `collision`, `food`, `game`, `score`)
//! never touches the terminal. A host constructs a [`game::Game`], feeds it
//! one decoded intent per tick and draws [`game::Snapshot`]s.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal;
pub mod ui;
