//! Rectangular rooms, and the door rules shared with linear corridors

use serde::{Deserialize, Serialize};

use super::{FitContext, PlannedMark};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::mark::Mark;
use delve_rng::RandomSource;

/// A walled rectangle; the border ring is wall, the rest floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectRoom {
    pub rect: Rect,
}

impl RectRoom {
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Random room grown from the mark's target, entry door off the corners
    pub(crate) fn fit(ctx: &mut FitContext<'_>, mark: &Mark) -> Self {
        let min = i32::from(ctx.config.room_min_size);
        let max = i32::from(ctx.config.room_max_size);
        let length = ctx.rng.range(min, max);
        let breadth = ctx.rng.range(min, max);
        let offset = ctx.rng.range(1, breadth - 2);
        Self::new(Rect::extending(
            mark.target(),
            mark.direction,
            length,
            offset,
            breadth,
        ))
    }

    /// Between one and `max_marks_per_area` doors on the three far sides
    pub(crate) fn plan_marks(&self, ctx: &mut FitContext<'_>, facing: Direction) -> Vec<PlannedMark> {
        let count = ctx.rng.range(1, i32::from(ctx.config.max_marks_per_area));
        let sides = exit_sides(facing);
        let mut planned = Vec::new();
        for _ in 0..count {
            let side = sides[ctx.rng.rn2(3) as usize];
            if let Some(p) = random_side_cell(&self.rect, side, ctx.rng) {
                planned.push(PlannedMark::new(p, side));
            }
        }
        planned
    }
}

/// The three sides that do not face back along `facing`
pub(crate) const fn exit_sides(facing: Direction) -> [Direction; 3] {
    [facing, facing.rotate_cw(), facing.rotate_ccw()]
}

/// Number of non-corner cells along one side
pub(crate) const fn side_span(rect: &Rect, side: Direction) -> i32 {
    let cells = if side.is_vertical_axis() {
        rect.width()
    } else {
        rect.height()
    };
    cells - 2
}

/// The `t`-th non-corner cell (1-based) of a side, counted from the top-left
pub(crate) const fn side_cell(rect: &Rect, side: Direction, t: i32) -> Point {
    match side {
        Direction::North => Point::new(rect.left + t, rect.top),
        Direction::South => Point::new(rect.left + t, rect.bottom),
        Direction::West => Point::new(rect.left, rect.top + t),
        _ => Point::new(rect.right, rect.top + t),
    }
}

/// Random non-corner cell on a side, `None` if the side has none
pub(crate) fn random_side_cell(
    rect: &Rect,
    side: Direction,
    rng: &mut dyn RandomSource,
) -> Option<Point> {
    let span = side_span(rect, side);
    if span < 1 || !side.is_cardinal() {
        return None;
    }
    Some(side_cell(rect, side, rng.range(1, span)))
}

/// A door may open on any non-corner border cell, facing its own side
pub(crate) fn allows_door(rect: &Rect, p: Point, dir: Direction) -> bool {
    if !rect.is_border(p) || rect.is_corner(p) {
        return false;
    }
    match dir {
        Direction::North => p.y == rect.top,
        Direction::South => p.y == rect.bottom,
        Direction::West => p.x == rect.left,
        Direction::East => p.x == rect.right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaId;
    use crate::config::BuilderConfig;
    use delve_rng::ScriptedRng;

    #[test]
    fn test_fit_scripted() {
        let config = BuilderConfig::default();
        // length 5, breadth 5, offset 1 + 1
        let mut rng = ScriptedRng::new([0, 0, 1]);
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region: Rect::new(0, 0, 40, 40),
            areas: &[],
            marks: &[],
        };
        let mark = Mark::new(Point::new(10, 10), Direction::East, Some(AreaId(0)), 3);
        let room = RectRoom::fit(&mut ctx, &mark);
        assert_eq!(room.rect, Rect::new(11, 8, 15, 12));
        assert!(allows_door(&room.rect, Point::new(11, 10), Direction::West));
    }

    #[test]
    fn test_allows_door() {
        let r = Rect::new(0, 0, 6, 4);
        assert!(allows_door(&r, Point::new(3, 0), Direction::North));
        assert!(allows_door(&r, Point::new(6, 2), Direction::East));
        assert!(!allows_door(&r, Point::new(3, 0), Direction::South));
        assert!(!allows_door(&r, Point::new(0, 0), Direction::North));
        assert!(!allows_door(&r, Point::new(3, 2), Direction::North));
        assert!(!allows_door(&r, Point::new(3, 0), Direction::NorthEast));
    }

    #[test]
    fn test_side_cells_skip_corners() {
        let r = Rect::new(2, 3, 8, 6);
        assert_eq!(side_span(&r, Direction::North), 5);
        assert_eq!(side_span(&r, Direction::East), 2);
        assert_eq!(side_cell(&r, Direction::North, 1), Point::new(3, 3));
        assert_eq!(side_cell(&r, Direction::South, 5), Point::new(7, 6));
        assert_eq!(side_cell(&r, Direction::West, 2), Point::new(2, 5));
        assert_eq!(side_cell(&r, Direction::East, 1), Point::new(8, 4));
    }

    #[test]
    fn test_plan_marks_avoid_entry_side() {
        let config = BuilderConfig::default();
        let mut rng = delve_rng::GameRng::new(5);
        let room = RectRoom::new(Rect::new(10, 10, 20, 18));
        for _ in 0..50 {
            let mut ctx = FitContext {
                rng: &mut rng,
                config: &config,
                region: Rect::new(0, 0, 40, 40),
                areas: &[],
                marks: &[],
            };
            let planned = room.plan_marks(&mut ctx, Direction::North);
            assert!(!planned.is_empty());
            assert!(planned.len() <= usize::from(config.max_marks_per_area));
            for p in planned {
                assert_ne!(p.direction, Direction::South);
                assert!(allows_door(&room.rect, p.location, p.direction));
            }
        }
    }
}
