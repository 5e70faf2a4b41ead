//! Quadrant corridors: a quarter annulus that turns a corridor by 90 degrees

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{FitContext, PlannedMark, has_open_neighbour};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::mark::Mark;

/// Quarter of a ring between `inner` and `outer` radius.
///
/// The corridor is entered through a door on one straight end travelling in
/// `entry_dir`, and left through the other end travelling in `exit_dir`,
/// which is always a quarter turn from `entry_dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quadrant {
    pub center: Point,
    pub inner: i32,
    pub outer: i32,
    pub entry_dir: Direction,
    pub exit_dir: Direction,
}

impl Quadrant {
    pub const fn new(
        center: Point,
        inner: i32,
        outer: i32,
        entry_dir: Direction,
        exit_dir: Direction,
    ) -> Self {
        Self {
            center,
            inner,
            outer,
            entry_dir,
            exit_dir,
        }
    }

    pub(crate) fn fit(ctx: &mut FitContext<'_>, mark: &Mark) -> Option<Self> {
        let entry_dir = mark.direction;
        let exit_dir = if ctx.rng.one_in(2) {
            entry_dir.rotate_cw()
        } else {
            entry_dir.rotate_ccw()
        };
        let min = i32::from(ctx.config.quadrant_min_radius);
        let max = i32::from(ctx.config.quadrant_max_radius);
        let inner = ctx.rng.range(min, max - 4);
        let outer = ctx.rng.range(inner + 4, max);
        let along = ctx.rng.range(inner + 1, outer - 1);

        let center = mark.target().offset(exit_dir, along);
        if !ctx.region.contains_point(center) {
            return None;
        }
        Some(Self::new(center, inner, outer, entry_dir, exit_dir))
    }

    /// Coordinates along the entry axis and against the exit axis
    fn local(&self, p: Point) -> (i32, i32) {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let (ux, uy) = self.entry_dir.delta();
        let (ox, oy) = self.exit_dir.delta();
        (dx * ux + dy * uy, -(dx * ox + dy * oy))
    }

    pub fn dimension(&self) -> Rect {
        let c = self.center;
        let a = c.offset(self.entry_dir, self.outer);
        let b = c.offset(self.exit_dir.opposite(), self.outer);
        Rect::new(
            c.x.min(a.x).min(b.x),
            c.y.min(a.y).min(b.y),
            c.x.max(a.x).max(b.x),
            c.y.max(a.y).max(b.y),
        )
    }

    pub fn is_owned_point(&self, p: Point) -> bool {
        let (a, b) = self.local(p);
        if a < 0 || b < 0 {
            return false;
        }
        let d = p.rounded_distance(self.center);
        self.inner <= d && d <= self.outer
    }

    pub fn is_wall_point(&self, p: Point) -> bool {
        self.is_owned_point(p) && has_open_neighbour(p, |q| self.is_owned_point(q))
    }

    /// Doors sit on the straight ends, strictly between the two radii, with
    /// floor right behind them
    pub fn is_allowed_point_as_mark(&self, p: Point, dir: Direction) -> bool {
        if !self.is_wall_point(p) {
            return false;
        }
        let (a, b) = self.local(p);
        let on_entry_end =
            a == 0 && self.inner < b && b < self.outer && dir == self.entry_dir.opposite();
        let on_exit_end = b == 0 && self.inner < a && a < self.outer && dir == self.exit_dir;
        if !(on_entry_end || on_exit_end) {
            return false;
        }
        let inward = p.step(dir.opposite());
        self.is_owned_point(inward) && !self.is_wall_point(inward)
    }

    pub fn devour_area(&self) -> u32 {
        let r = f64::from(self.inner);
        let big = f64::from(self.outer);
        (PI * (big * big - r * r) / 4.0).round() as u32
    }

    /// The single exit, somewhere on the far end
    pub(crate) fn plan_marks(&self, ctx: &mut FitContext<'_>) -> Vec<PlannedMark> {
        let exits: Vec<Point> = (self.inner + 1..self.outer)
            .map(|m| self.center.offset(self.entry_dir, m))
            .filter(|&p| self.is_allowed_point_as_mark(p, self.exit_dir))
            .collect();
        match ctx.rng.index(exits.len()) {
            Some(i) => vec![PlannedMark::corridor_end(exits[i], self.exit_dir)],
            None => Vec::new(),
        }
    }
}
