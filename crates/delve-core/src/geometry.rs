//! Points and inclusive rectangles
//!
//! Rectangles use inclusive bounds on all four sides, like the room
//! rectangles they were modelled on: a rectangle with `right == left` is one
//! cell wide, and `right == left - 1` is empty.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A cell coordinate on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point `n` steps away in `dir`
    pub const fn offset(self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx * n,
            y: self.y + dy * n,
        }
    }

    /// The neighbouring point in `dir`
    pub const fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    /// Euclidean distance
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance rounded to the nearest cell (halves round up)
    pub fn rounded_distance(self, other: Point) -> i32 {
        self.distance(other).round() as i32
    }
}

/// An axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from its top-left corner and size
    pub const fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width - 1, top + height - 1)
    }

    /// Rectangle that starts on `entry` and grows `length` cells in `dir`.
    ///
    /// Across the growth axis the rectangle is `breadth` cells wide, with
    /// `entry` sitting `offset` cells in from its low edge (left edge for
    /// north/south growth, top edge for east/west growth). Only cardinal
    /// directions are meaningful; anything else yields an empty rectangle.
    pub fn extending(entry: Point, dir: Direction, length: i32, offset: i32, breadth: i32) -> Self {
        let across_lo = |c: i32| c - offset;
        let across_hi = |c: i32| c - offset + breadth - 1;
        match dir {
            Direction::North => Self::new(
                across_lo(entry.x),
                entry.y - length + 1,
                across_hi(entry.x),
                entry.y,
            ),
            Direction::South => Self::new(
                across_lo(entry.x),
                entry.y,
                across_hi(entry.x),
                entry.y + length - 1,
            ),
            Direction::West => Self::new(
                entry.x - length + 1,
                across_lo(entry.y),
                entry.x,
                across_hi(entry.y),
            ),
            Direction::East => Self::new(
                entry.x,
                across_lo(entry.y),
                entry.x + length - 1,
                across_hi(entry.y),
            ),
            _ => Self::new(entry.x, entry.y, entry.x - 1, entry.y - 1),
        }
    }

    pub const fn width(&self) -> i32 {
        if self.right >= self.left {
            self.right - self.left + 1
        } else {
            0
        }
    }

    pub const fn height(&self) -> i32 {
        if self.bottom >= self.top {
            self.bottom - self.top + 1
        } else {
            0
        }
    }

    /// True when the rectangle holds no cells
    pub const fn is_empty(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    pub const fn area(&self) -> i32 {
        self.width() * self.height()
    }

    /// Center cell (rounded toward the top-left)
    pub const fn center(&self) -> Point {
        Point::new(
            self.left + (self.right - self.left) / 2,
            self.top + (self.bottom - self.top) / 2,
        )
    }

    pub const fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Check if this rectangle contains another
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.top <= other.top
            && self.bottom >= other.bottom
    }

    /// Check if this rectangle shares at least one cell with another
    pub const fn intersects(&self, other: &Rect) -> bool {
        !(self.is_empty()
            || other.is_empty()
            || self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    /// Calculate the intersection of two rectangles
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Check if a point lies on the outermost ring of cells
    pub const fn is_border(&self, p: Point) -> bool {
        self.contains_point(p)
            && (p.x == self.left || p.x == self.right || p.y == self.top || p.y == self.bottom)
    }

    /// Check if a point is one of the four corner cells
    pub const fn is_corner(&self, p: Point) -> bool {
        (p.x == self.left || p.x == self.right) && (p.y == self.top || p.y == self.bottom)
    }

    /// Clamp a point into the rectangle
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.left, self.right), p.y.clamp(self.top, self.bottom))
    }

    /// Iterate over every cell, row by row
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let Rect {
            left,
            top,
            right,
            bottom,
        } = *self;
        (top..=bottom).flat_map(move |y| (left..=right).map(move |x| Point::new(x, y)))
    }
}
