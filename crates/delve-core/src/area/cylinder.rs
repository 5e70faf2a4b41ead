//! Round rooms

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::rect::exit_sides;
use super::{FitContext, PlannedMark, has_open_neighbour};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::mark::Mark;

/// A filled circle: every cell whose rounded distance to the centre is at
/// most the radius. Cells on the rim are wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cylinder {
    pub center: Point,
    pub radius: i32,
}

impl Cylinder {
    pub const fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Random radius, with the pole facing the mark sitting on its target
    pub(crate) fn fit(ctx: &mut FitContext<'_>, mark: &Mark) -> Self {
        let radius = ctx.rng.range(
            i32::from(ctx.config.cylinder_min_radius),
            i32::from(ctx.config.cylinder_max_radius),
        );
        Self::new(mark.target().offset(mark.direction, radius), radius)
    }

    pub fn dimension(&self) -> Rect {
        let Point { x, y } = self.center;
        let r = self.radius;
        Rect::new(x - r, y - r, x + r, y + r)
    }

    pub fn is_owned_point(&self, p: Point) -> bool {
        p.rounded_distance(self.center) <= self.radius
    }

    pub fn is_wall_point(&self, p: Point) -> bool {
        self.is_owned_point(p) && has_open_neighbour(p, |q| self.is_owned_point(q))
    }

    /// Cardinal pole on the rim
    pub fn pole(&self, dir: Direction) -> Point {
        self.center.offset(dir, self.radius)
    }

    /// Doors only open at the four poles, facing away from the centre
    pub fn is_allowed_point_as_mark(&self, p: Point, dir: Direction) -> bool {
        dir.is_cardinal() && p == self.pole(dir)
    }

    pub fn devour_area(&self) -> u32 {
        let r = f64::from(self.radius);
        (PI * r * r).round() as u32
    }

    /// Each far pole gets a door with chance 2/3, and at least one does
    pub(crate) fn plan_marks(&self, ctx: &mut FitContext<'_>, facing: Direction) -> Vec<PlannedMark> {
        let sides = exit_sides(facing);
        let mut planned: Vec<PlannedMark> = sides
            .iter()
            .filter(|_| ctx.rng.rn2(3) != 0)
            .map(|&side| PlannedMark::new(self.pole(side), side))
            .collect();
        if planned.is_empty() {
            let side = sides[ctx.rng.rn2(3) as usize];
            planned.push(PlannedMark::new(self.pole(side), side));
        }
        planned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaId;
    use crate::config::BuilderConfig;
    use delve_rng::ScriptedRng;

    #[test]
    fn test_fit_places_pole_on_target() {
        let config = BuilderConfig::default();
        // radius 3 + 1
        let mut rng = ScriptedRng::new([1]);
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region: Rect::new(0, 0, 40, 40),
            areas: &[],
            marks: &[],
        };
        let mark = Mark::new(Point::new(10, 10), Direction::West, Some(AreaId(0)), 3);
        let room = Cylinder::fit(&mut ctx, &mark);
        assert_eq!(room.radius, 4);
        assert_eq!(room.center, Point::new(5, 10));
        assert_eq!(room.pole(Direction::East), Point::new(9, 10));
        assert!(room.is_allowed_point_as_mark(Point::new(9, 10), Direction::East));
    }

    #[test]
    fn test_membership() {
        let room = Cylinder::new(Point::new(0, 0), 3);
        assert!(room.is_owned_point(Point::new(3, 0)));
        assert!(room.is_wall_point(Point::new(3, 0)));
        assert!(room.is_owned_point(Point::new(2, 2)));
        assert!(!room.is_owned_point(Point::new(3, 2)));
        assert!(!room.is_wall_point(Point::new(0, 0)));
        assert!(!room.is_owned_point(Point::new(4, 0)));
    }

    #[test]
    fn test_floor_is_enclosed() {
        let room = Cylinder::new(Point::new(0, 0), 5);
        for p in room.dimension().points() {
            if room.is_owned_point(p) && !room.is_wall_point(p) {
                for dir in Direction::PLANAR {
                    assert!(room.is_owned_point(p.step(dir)), "{:?} leaks {}", p, dir);
                }
            }
        }
    }

    #[test]
    fn test_poles_only() {
        let room = Cylinder::new(Point::new(10, 10), 4);
        assert!(room.is_allowed_point_as_mark(Point::new(10, 6), Direction::North));
        assert!(!room.is_allowed_point_as_mark(Point::new(10, 6), Direction::South));
        assert!(!room.is_allowed_point_as_mark(Point::new(11, 6), Direction::North));
        assert_eq!(room.devour_area(), 50);
    }

    #[test]
    fn test_plan_marks_at_least_one() {
        let config = BuilderConfig::default();
        // all three rolls fail, then side index 2
        let mut rng = ScriptedRng::new([0, 0, 0, 2]);
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region: Rect::new(0, 0, 40, 40),
            areas: &[],
            marks: &[],
        };
        let room = Cylinder::new(Point::new(20, 20), 3);
        let planned = room.plan_marks(&mut ctx, Direction::North);
        assert_eq!(
            planned,
            vec![PlannedMark::new(Point::new(17, 20), Direction::West)]
        );
    }
}
