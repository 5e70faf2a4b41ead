//! Compass directions used to orient marks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Compass direction
///
/// Marks only ever point along the four cardinal directions; the diagonals
/// and the vertical pair exist so that deltas and opposites are total.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
pub enum Direction {
    #[default]
    None,
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    Zenith,
    Nadir,
}

impl Direction {
    /// The four cardinal directions, clockwise from north
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Cardinal and diagonal directions, clockwise from north
    pub const PLANAR: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Get the delta (dx, dy) for this direction; y grows southward
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::None | Direction::Zenith | Direction::Nadir => (0, 0),
        }
    }

    /// Get the opposite direction
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::Zenith => Direction::Nadir,
            Direction::Nadir => Direction::Zenith,
        }
    }

    /// Direction from a planar delta, if it names one
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            (-1, -1) => Some(Direction::NorthWest),
            (1, -1) => Some(Direction::NorthEast),
            (-1, 1) => Some(Direction::SouthWest),
            (1, 1) => Some(Direction::SouthEast),
            _ => None,
        }
    }

    /// Quarter turn clockwise; non-planar directions are unchanged
    pub const fn rotate_cw(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::NorthEast => Direction::SouthEast,
            Direction::SouthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthWest,
            Direction::NorthWest => Direction::NorthEast,
            other => *other,
        }
    }

    /// Quarter turn counter-clockwise; non-planar directions are unchanged
    pub const fn rotate_ccw(&self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
            Direction::NorthEast => Direction::NorthWest,
            Direction::NorthWest => Direction::SouthWest,
            Direction::SouthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthEast,
            other => *other,
        }
    }

    /// Check if this is a cardinal direction (N/S/E/W)
    pub const fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    /// Check if this is a diagonal direction
    pub const fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::NorthWest
                | Direction::SouthEast
                | Direction::SouthWest
        )
    }

    /// True for north and south
    pub const fn is_vertical_axis(&self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// True when both are cardinal and at right angles to each other
    pub const fn is_perpendicular(&self, other: Direction) -> bool {
        self.is_cardinal()
            && other.is_cardinal()
            && self.is_vertical_axis() != other.is_vertical_axis()
    }
}
