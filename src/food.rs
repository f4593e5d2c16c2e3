use log::debug;
use rand::Rng;

use crate::geometry::{Bounds, Point};
use crate::snake::Snake;

/// Random draws tried before falling back to scanning for free cells.
pub const MAX_SAMPLING_ATTEMPTS: usize = 1_000;

/// Picks a uniformly random grid cell that `snake` does not occupy.
///
/// Samples cells until a free one turns up. After [`MAX_SAMPLING_ATTEMPTS`]
/// misses it picks among the enumerated free cells instead, and returns
/// `None` only when the snake covers the whole grid.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, snake: &Snake) -> Option<Point> {
    place_food_avoiding(rng, bounds, |point| snake.occupies(point))
}

/// Same as [`place_food`] for an arbitrary set of occupied cells.
#[must_use]
pub fn place_food_avoiding<R, F>(rng: &mut R, bounds: Bounds, is_occupied: F) -> Option<Point>
where
    R: Rng + ?Sized,
    F: Fn(Point) -> bool,
{
    if bounds.columns() <= 0 || bounds.rows() <= 0 {
        return None;
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = bounds.cell(
            rng.gen_range(0..bounds.columns()),
            rng.gen_range(0..bounds.rows()),
        );
        if !is_occupied(candidate) {
            return Some(candidate);
        }
    }

    debug!("food sampling exhausted, scanning for free cells");
    let free: Vec<Point> = bounds.cells().filter(|cell| !is_occupied(*cell)).collect();
    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}
