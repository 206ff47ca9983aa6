//! Snake and food entities.

use std::collections::VecDeque;

use crate::types::{Direction, Position};

/// The player's snake.
///
/// `body` holds every segment except the head, ordered tail first and neck
/// last. Moving pushes the old head onto the neck end and, unless the snake
/// grows, drops the tail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// A single-cell snake.
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            head,
            body: VecDeque::new(),
            direction,
        }
    }

    /// Build a snake from explicit segments (tail first, neck last).
    pub fn with_body<I>(head: Position, body: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        Self {
            head,
            body: body.into_iter().collect(),
            direction,
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Total segments including the head.
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always false: a snake has at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The oldest segment, if the snake has a body.
    pub fn tail(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Whether `p` is the head or any body segment.
    pub fn occupies(&self, p: Position) -> bool {
        self.head == p || self.body.contains(&p)
    }

    /// Whether moving the head onto `p` runs into the body.
    ///
    /// When the snake is not growing the tail leaves its cell on the same
    /// tick, so that cell is not counted.
    pub fn would_bite(&self, p: Position, growing: bool) -> bool {
        let skip = if growing { 0 } else { 1 };
        self.body.iter().skip(skip).any(|&segment| segment == p)
    }

    pub(crate) fn with_direction(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }

    /// The snake after its head moves to `new_head`.
    pub(crate) fn moved_to(&self, new_head: Position, grow: bool) -> Self {
        let mut body = self.body.clone();
        body.push_back(self.head);
        if !grow {
            body.pop_front();
        }
        Self {
            head: new_head,
            body,
            direction: self.direction,
        }
    }

    /// Iterate all occupied cells, head first.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().rev().copied())
    }
}

/// A single food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}
