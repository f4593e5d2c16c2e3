use std::collections::VecDeque;

use log::debug;

use crate::geometry::Point;
use crate::input::{Direction, ReversalPolicy};

/// Segmented snake body. The front of `blocks` is the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    blocks: VecDeque<Point>,
    heading: Direction,
    cell_size: i32,
}

impl Snake {
    /// Creates a straight snake of `length` blocks with `head` in front,
    /// the rest trailing away from `heading`.
    #[must_use]
    pub fn new(head: Point, heading: Direction, length: usize, cell_size: i32) -> Self {
        let trailing = heading.opposite();
        let blocks = (0..length.max(1))
            .map(|index| {
                let distance = i32::try_from(index).unwrap_or(i32::MAX) * cell_size;
                head.shifted(trailing, distance)
            })
            .collect();

        Self {
            blocks,
            heading,
            cell_size,
        }
    }

    /// Creates a snake from explicit blocks (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `blocks` is empty.
    #[must_use]
    pub fn from_blocks(blocks: Vec<Point>, heading: Direction, cell_size: i32) -> Self {
        assert!(!blocks.is_empty(), "a snake needs at least one block");

        Self {
            blocks: VecDeque::from(blocks),
            heading,
            cell_size,
        }
    }

    /// Adopts `direction` as the new heading if `policy` allows the turn.
    ///
    /// Returns whether the heading was changed.
    pub fn steer(&mut self, direction: Direction, policy: ReversalPolicy) -> bool {
        if direction == self.heading {
            return false;
        }

        if !policy.permits(self.heading, direction) {
            debug!("ignoring reversal from {:?} to {:?}", self.heading, direction);
            return false;
        }

        self.heading = direction;
        true
    }

    /// Returns where the head lands after the next step.
    #[must_use]
    pub fn next_head(&self) -> Point {
        self.head().shifted(self.heading, self.cell_size)
    }

    /// Prepends the next head. The snake is one block longer until the
    /// caller drops the tail with [`Snake::trim_tail`]; leaving it in place
    /// is how the snake grows.
    pub fn advance(&mut self) {
        let next = self.next_head();
        self.blocks.push_front(next);
    }

    /// Drops the last block. The head is never removed.
    pub fn trim_tail(&mut self) {
        if self.blocks.len() > 1 {
            let _ = self.blocks.pop_back();
        }
    }

    /// Moves one cell keeping the length.
    pub fn slide(&mut self) {
        self.advance();
        self.trim_tail();
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Point {
        *self
            .blocks
            .front()
            .expect("snake body must always contain at least one block")
    }

    /// Moves the head block in place, leaving the rest of the body alone.
    pub fn set_head(&mut self, head: Point) {
        if let Some(front) = self.blocks.front_mut() {
            *front = head;
        }
    }

    /// Iterates over blocks from head to tail.
    pub fn blocks(&self) -> impl Iterator<Item = &Point> {
        self.blocks.iter()
    }

    /// Iterates over every block except the head.
    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.blocks.iter().skip(1)
    }

    /// Returns the block at `index`, counting from the head.
    #[must_use]
    pub fn block(&self, index: usize) -> Option<Point> {
        self.blocks.get(index).copied()
    }

    /// Returns true if any block occupies `point`.
    #[must_use]
    pub fn occupies(&self, point: Point) -> bool {
        self.blocks.contains(&point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false for a live snake; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }
}
