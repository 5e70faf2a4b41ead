//! Area shapes
//!
//! Every accepted area is one [`Shape`] variant. Shapes answer the same small
//! set of questions (which cells they own, which of those are walls, where a
//! door may open) and know how to fit themselves against a mark and plan
//! their own outgoing marks.

mod chamber;
mod cylinder;
pub mod intersect;
mod linear;
mod quadrant;
mod rect;
mod templates;

pub use chamber::{Chamber, ChamberKind, Template};
pub use cylinder::Cylinder;
pub use linear::{CorridorEnd, LinearCorridor};
pub use quadrant::Quadrant;
pub use rect::RectRoom;

use delve_rng::RandomSource;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::config::BuilderConfig;
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::map::LogicalTile;
use crate::mark::{Mark, MarkId};

/// Index of an area in the builder's area arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub usize);

/// The 19 producible area kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    FromRepr,
)]
#[repr(u8)]
pub enum AreaKind {
    RectangularRoom = 0,
    LinearCorridor = 1,
    CylindricityRoom = 2,
    QuadrantCorridor = 3,
    Cross = 4,
    PillarHall = 5,
    Octagon = 6,
    Diamond = 7,
    Crypt = 8,
    Shrine = 9,
    Cloister = 10,
    Gallery = 11,
    Ziggurat = 12,
    Rotunda = 13,
    Vestibule = 14,
    Armory = 15,
    Barracks = 16,
    Sanctum = 17,
    Chapel = 18,
}

impl AreaKind {
    /// Position in the weight table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Template chamber this kind builds, if it is one
    pub const fn chamber(self) -> Option<ChamberKind> {
        match self {
            AreaKind::RectangularRoom
            | AreaKind::LinearCorridor
            | AreaKind::CylindricityRoom
            | AreaKind::QuadrantCorridor => None,
            AreaKind::Cross => Some(ChamberKind::Cross),
            AreaKind::PillarHall => Some(ChamberKind::PillarHall),
            AreaKind::Octagon => Some(ChamberKind::Octagon),
            AreaKind::Diamond => Some(ChamberKind::Diamond),
            AreaKind::Crypt => Some(ChamberKind::Crypt),
            AreaKind::Shrine => Some(ChamberKind::Shrine),
            AreaKind::Cloister => Some(ChamberKind::Cloister),
            AreaKind::Gallery => Some(ChamberKind::Gallery),
            AreaKind::Ziggurat => Some(ChamberKind::Ziggurat),
            AreaKind::Rotunda => Some(ChamberKind::Rotunda),
            AreaKind::Vestibule => Some(ChamberKind::Vestibule),
            AreaKind::Armory => Some(ChamberKind::Armory),
            AreaKind::Barracks => Some(ChamberKind::Barracks),
            AreaKind::Sanctum => Some(ChamberKind::Sanctum),
            AreaKind::Chapel => Some(ChamberKind::Chapel),
        }
    }

    /// True for the two corridor kinds
    pub const fn is_corridor(self) -> bool {
        matches!(self, AreaKind::LinearCorridor | AreaKind::QuadrantCorridor)
    }
}

/// Broad geometry class used by the intersection table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    /// Fully owned axis-aligned rectangle
    Box,
    /// Filled circle
    Disc,
    /// Quarter annulus
    Arc,
    /// ASCII template with transparent cells
    Grid,
}

/// Concrete geometry of an area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(RectRoom),
    Linear(LinearCorridor),
    Cylinder(Cylinder),
    Quadrant(Quadrant),
    Chamber(Chamber),
}

impl Shape {
    pub fn class(&self) -> ShapeClass {
        match self {
            Shape::Rectangle(_) | Shape::Linear(_) => ShapeClass::Box,
            Shape::Cylinder(_) => ShapeClass::Disc,
            Shape::Quadrant(_) => ShapeClass::Arc,
            Shape::Chamber(_) => ShapeClass::Grid,
        }
    }

    /// Bounding rectangle; every owned cell lies inside it
    pub fn dimension(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.rect,
            Shape::Linear(s) => s.rect,
            Shape::Cylinder(s) => s.dimension(),
            Shape::Quadrant(s) => s.dimension(),
            Shape::Chamber(s) => s.dimension(),
        }
    }

    /// Check if the area claims a cell (wall or floor)
    pub fn is_owned_point(&self, p: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.rect.contains_point(p),
            Shape::Linear(s) => s.rect.contains_point(p),
            Shape::Cylinder(s) => s.is_owned_point(p),
            Shape::Quadrant(s) => s.is_owned_point(p),
            Shape::Chamber(s) => s.is_owned_point(p),
        }
    }

    /// Check if an owned cell is part of the wall
    pub fn is_wall_point(&self, p: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.rect.is_border(p),
            Shape::Linear(s) => s.rect.is_border(p),
            Shape::Cylinder(s) => s.is_wall_point(p),
            Shape::Quadrant(s) => s.is_wall_point(p),
            Shape::Chamber(s) => s.is_wall_point(p),
        }
    }

    /// Check if a door may open at `p` leading out in `dir`
    pub fn is_allowed_point_as_mark(&self, p: Point, dir: Direction) -> bool {
        match self {
            Shape::Rectangle(s) => rect::allows_door(&s.rect, p, dir),
            Shape::Linear(s) => rect::allows_door(&s.rect, p, dir),
            Shape::Cylinder(s) => s.is_allowed_point_as_mark(p, dir),
            Shape::Quadrant(s) => s.is_allowed_point_as_mark(p, dir),
            Shape::Chamber(s) => s.is_allowed_point_as_mark(p, dir),
        }
    }

    /// Approximate number of cells the area uses up
    pub fn devour_area(&self) -> u32 {
        match self {
            Shape::Rectangle(s) => s.rect.area().max(0) as u32,
            Shape::Linear(s) => s.rect.area().max(0) as u32,
            Shape::Cylinder(s) => s.devour_area(),
            Shape::Quadrant(s) => s.devour_area(),
            Shape::Chamber(s) => s.devour_area(),
        }
    }

    /// Wall tile used when per-shape walls are requested
    pub fn wall_tile(&self) -> LogicalTile {
        match self {
            Shape::Rectangle(_) => LogicalTile::RectRoomWall,
            Shape::Linear(_) => LogicalTile::LinearCorridorWall,
            Shape::Cylinder(_) => LogicalTile::CylindricityRoomWall,
            Shape::Quadrant(_) => LogicalTile::QuadrantCorridorWall,
            Shape::Chamber(_) => LogicalTile::ChamberWall,
        }
    }

    /// Check if two shapes share at least one owned cell or, for two
    /// cylinders, touch rim to rim
    pub fn intersects(&self, other: &Shape) -> bool {
        intersect::intersects(self, other)
    }

    /// Outgoing marks for a freshly accepted shape.
    ///
    /// `facing` is the direction of the mark that generated the shape; the
    /// entry side is its opposite and never gets another door.
    pub fn plan_marks(&self, ctx: &mut FitContext<'_>, facing: Direction) -> Vec<PlannedMark> {
        match self {
            Shape::Rectangle(s) => s.plan_marks(ctx, facing),
            Shape::Linear(s) => s.plan_marks(ctx),
            Shape::Cylinder(s) => s.plan_marks(ctx, facing),
            Shape::Quadrant(s) => s.plan_marks(ctx),
            Shape::Chamber(s) => s.plan_marks(facing),
        }
    }
}

/// What a fit attempt may look at and draw from
pub struct FitContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub config: &'a BuilderConfig,
    /// Generation bounds
    pub region: Rect,
    /// Areas accepted so far in this pass
    pub areas: &'a [Area],
    pub marks: &'a [Mark],
}

/// An outgoing mark proposed by a shape, before the builder owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMark {
    pub location: Point,
    pub direction: Direction,
    pub forced_kind: Option<AreaKind>,
    pub at_corridor_end: bool,
}

impl PlannedMark {
    pub const fn new(location: Point, direction: Direction) -> Self {
        Self {
            location,
            direction,
            forced_kind: None,
            at_corridor_end: false,
        }
    }

    pub const fn corridor_end(location: Point, direction: Direction) -> Self {
        Self {
            location,
            direction,
            forced_kind: None,
            at_corridor_end: true,
        }
    }

    pub const fn forcing(mut self, kind: Option<AreaKind>) -> Self {
        self.forced_kind = kind;
        self
    }
}

/// Build a candidate shape of `kind` against `mark`.
///
/// The candidate is only local: it has the requested size and touches the
/// mark's target with a door facing back at the mark. Bounds and overlap are
/// checked by the builder afterwards.
pub fn try_fit(kind: AreaKind, ctx: &mut FitContext<'_>, mark: &Mark) -> Option<Shape> {
    if !mark.direction.is_cardinal() {
        return None;
    }
    let shape = match kind {
        AreaKind::RectangularRoom => Shape::Rectangle(RectRoom::fit(ctx, mark)),
        AreaKind::LinearCorridor => Shape::Linear(LinearCorridor::fit(ctx, mark)?),
        AreaKind::CylindricityRoom => Shape::Cylinder(Cylinder::fit(ctx, mark)),
        AreaKind::QuadrantCorridor => Shape::Quadrant(Quadrant::fit(ctx, mark)?),
        other => Shape::Chamber(Chamber::fit(other.chamber()?, ctx, mark)),
    };

    let entry = mark.target();
    if shape.is_wall_point(entry) && shape.is_allowed_point_as_mark(entry, mark.direction.opposite())
    {
        Some(shape)
    } else {
        None
    }
}

/// An accepted area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub kind: AreaKind,
    pub shape: Shape,
    /// Generating mark; `None` for the area built from the seed
    pub origin: Option<MarkId>,
    /// Entry door cell (the generating mark's target)
    pub entry: Point,
    /// Outgoing marks, in generation order
    pub marks: Vec<MarkId>,
}

impl Area {
    pub fn dimension(&self) -> Rect {
        self.shape.dimension()
    }

    pub fn is_owned_point(&self, p: Point) -> bool {
        self.shape.is_owned_point(p)
    }

    pub fn is_wall_point(&self, p: Point) -> bool {
        self.shape.is_wall_point(p)
    }

    pub fn is_allowed_point_as_mark(&self, p: Point, dir: Direction) -> bool {
        self.shape.is_allowed_point_as_mark(p, dir)
    }

    pub fn devour_area(&self) -> u32 {
        self.shape.devour_area()
    }

    pub fn intersects(&self, other: &Area) -> bool {
        self.shape.intersects(&other.shape)
    }
}

/// True when an owned cell has an unowned 8-neighbour
fn has_open_neighbour(p: Point, owned: impl Fn(Point) -> bool) -> bool {
    Direction::PLANAR.iter().any(|&dir| !owned(p.step(dir)))
}
