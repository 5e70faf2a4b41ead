//! Pairwise shape intersection
//!
//! A closed table over [`ShapeClass`] pairs. Entries below the diagonal swap
//! their arguments, so `intersects(a, b) == intersects(b, a)` always holds.
//!
//! Boundary convention: a cell at rounded distance exactly `r` from a disc
//! centre belongs to the disc, so a shape touching that cell intersects it.

use super::{Cylinder, Quadrant, Shape, ShapeClass};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};

/// Check if two shapes share at least one owned cell. Two cylinders also
/// count as intersecting when their rims touch.
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    // Owned cells never leave the bounding rectangle.
    if !a.dimension().intersects(&b.dimension()) {
        return false;
    }
    match (a, b) {
        (Shape::Cylinder(p), Shape::Cylinder(q)) => disc_disc(p, q),
        (Shape::Cylinder(_), _) if b.class() == ShapeClass::Box => intersects(b, a),
        (_, Shape::Cylinder(disc)) if a.class() == ShapeClass::Box => {
            box_disc(&a.dimension(), disc)
        }
        (Shape::Quadrant(_), _) if b.class() == ShapeClass::Box => intersects(b, a),
        (_, Shape::Quadrant(arc)) if a.class() == ShapeClass::Box => box_arc(&a.dimension(), arc),
        _ if a.class() == ShapeClass::Box && b.class() == ShapeClass::Box => true,
        _ => cell_scan(a, b),
    }
}

/// Where a point lies relative to a rectangle: `None` inside, a cardinal
/// direction beside an edge, a diagonal beyond a corner
pub fn placement(rect: &Rect, p: Point) -> Direction {
    let dx = if p.x < rect.left {
        -1
    } else if p.x > rect.right {
        1
    } else {
        0
    };
    let dy = if p.y < rect.top {
        -1
    } else if p.y > rect.bottom {
        1
    } else {
        0
    };
    Direction::from_delta(dx, dy).unwrap_or(Direction::None)
}

/// Cell of `rect` closest to `p`
pub fn nearest_cell(rect: &Rect, p: Point) -> Point {
    match placement(rect, p) {
        Direction::None => p,
        Direction::North => Point::new(p.x, rect.top),
        Direction::South => Point::new(p.x, rect.bottom),
        Direction::West => Point::new(rect.left, p.y),
        Direction::East => Point::new(rect.right, p.y),
        Direction::NorthWest => Point::new(rect.left, rect.top),
        Direction::NorthEast => Point::new(rect.right, rect.top),
        Direction::SouthWest => Point::new(rect.left, rect.bottom),
        Direction::SouthEast => Point::new(rect.right, rect.bottom),
        Direction::Zenith | Direction::Nadir => rect.clamp(p),
    }
}

/// Corner of `rect` farthest from `p`
fn farthest_corner(rect: &Rect, p: Point) -> Point {
    let x = if (p.x - rect.left).abs() >= (rect.right - p.x).abs() {
        rect.left
    } else {
        rect.right
    };
    let y = if (p.y - rect.top).abs() >= (rect.bottom - p.y).abs() {
        rect.top
    } else {
        rect.bottom
    };
    Point::new(x, y)
}

fn box_disc(rect: &Rect, disc: &Cylinder) -> bool {
    nearest_cell(rect, disc.center).rounded_distance(disc.center) <= disc.radius
}

/// Touching rims count as intersecting
fn disc_disc(a: &Cylinder, b: &Cylinder) -> bool {
    a.center.rounded_distance(b.center) <= a.radius + b.radius + 1
}

fn box_arc(rect: &Rect, arc: &Quadrant) -> bool {
    let Some(clipped) = rect.intersection(&arc.dimension()) else {
        return false;
    };
    let c = arc.center;
    nearest_cell(&clipped, c).rounded_distance(c) <= arc.outer
        && farthest_corner(&clipped, c).rounded_distance(c) >= arc.inner
}

/// Exact test over the overlap of both bounding rectangles
fn cell_scan(a: &Shape, b: &Shape) -> bool {
    a.dimension()
        .intersection(&b.dimension())
        .is_some_and(|overlap| {
            overlap
                .points()
                .any(|p| a.is_owned_point(p) && b.is_owned_point(p))
        })
}
