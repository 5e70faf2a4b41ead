//! Marks: candidate exits that seed the next area

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::area::{AreaId, AreaKind};
use crate::direction::Direction;
use crate::geometry::Point;

/// Index of a mark in the builder's mark arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkId(pub usize);

/// Lifecycle of a mark
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
pub enum MarkState {
    /// Not attempted yet, or every attempt so far failed with retries left
    #[default]
    Undefined,
    /// An area was built, validated and accepted from this mark
    AreaGenerator,
    /// Retries ran out without an accepted area
    RetriesExhaust,
    /// The target cell is already a doorway of another area
    PointsToOtherArea,
}

impl MarkState {
    /// True once the mark can no longer generate anything
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, MarkState::Undefined)
    }
}

/// A door cell on an area wall plus the direction leading out of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub location: Point,
    pub direction: Direction,
    /// Area whose wall holds the mark; `None` for the seed mark
    pub parent: Option<AreaId>,
    /// Kind to build instead of a weighted pick
    pub forced_kind: Option<AreaKind>,
    /// Set on marks at the far end of a corridor
    pub at_corridor_end: bool,
    retries_left: u8,
    state: MarkState,
}

impl Mark {
    pub fn new(location: Point, direction: Direction, parent: Option<AreaId>, retries: u8) -> Self {
        Self {
            location,
            direction,
            parent,
            forced_kind: None,
            at_corridor_end: false,
            retries_left: retries,
            state: MarkState::Undefined,
        }
    }

    /// The parentless mark a pass starts from; its target is `start`
    pub fn seed(start: Point, direction: Direction, kind: AreaKind, retries: u8) -> Self {
        Self::new(start.step(direction.opposite()), direction, None, retries).with_forced_kind(kind)
    }

    pub fn with_forced_kind(mut self, kind: AreaKind) -> Self {
        self.forced_kind = Some(kind);
        self
    }

    /// Cell the next area is anchored on
    pub const fn target(&self) -> Point {
        self.location.step(self.direction)
    }

    /// Current state.
    ///
    /// `RetriesExhaust` is re-checked on every read: a mark whose retries
    /// were topped up again reports `Undefined`.
    pub fn state(&self) -> MarkState {
        match self.state {
            MarkState::RetriesExhaust if self.retries_left > 0 => MarkState::Undefined,
            state => state,
        }
    }

    pub fn retries_left(&self) -> u8 {
        self.retries_left
    }

    /// Use up one retry and return how many remain (never below zero)
    pub fn consume_retry(&mut self) -> u8 {
        self.retries_left = self.retries_left.saturating_sub(1);
        self.retries_left
    }

    /// Give the mark more attempts
    pub fn add_retries(&mut self, n: u8) {
        self.retries_left = self.retries_left.saturating_add(n);
    }

    pub(crate) fn set_state(&mut self, state: MarkState) {
        self.state = state;
    }

    /// Shorthand for `state() == Undefined`
    pub fn is_undefined(&self) -> bool {
        self.state() == MarkState::Undefined
    }
}
