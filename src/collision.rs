use crate::geometry::{Bounds, Point};
use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunEnd {
    WallCollision,
    SelfCollision,
    /// No free cell was left to place food in.
    BoardFilled,
}

/// Returns true when `head` lies outside the playfield.
#[must_use]
pub fn is_out_of_bounds(head: Point, bounds: Bounds) -> bool {
    !bounds.contains(head)
}

/// Returns true when `head` overlaps any block of `body`.
#[must_use]
pub fn is_self_collision<'a>(head: Point, body: impl IntoIterator<Item = &'a Point>) -> bool {
    body.into_iter().any(|block| *block == head)
}

/// Classifies the snake's current head position.
///
/// The wall is checked first, so a head that is both off the grid and on
/// the body reports [`RunEnd::WallCollision`].
#[must_use]
pub fn detect(snake: &Snake, bounds: Bounds) -> Option<RunEnd> {
    let head = snake.head();

    if is_out_of_bounds(head, bounds) {
        return Some(RunEnd::WallCollision);
    }

    if is_self_collision(head, snake.body()) {
        return Some(RunEnd::SelfCollision);
    }

    None
}

#[must_use]
pub fn is_collision(snake: &Snake, bounds: Bounds) -> bool {
    detect(snake, bounds).is_some()
}
