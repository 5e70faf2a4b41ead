//! Linear corridors
//!
//! A corridor is a walled rectangle one or two cells wide. It grows from its
//! entry door up to a random length, shortening itself so that it never runs
//! into an area that is already there.

use serde::{Deserialize, Serialize};

use super::rect::{random_side_cell, side_cell};
use super::{AreaId, AreaKind, FitContext, PlannedMark, RectRoom, Shape};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::mark::Mark;

/// How the far end of a corridor was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorridorEnd {
    /// Reached its full length in open space
    Open,
    /// Stopped at an area that already has a waiting door facing it
    Joined(AreaId),
    /// Stopped at an area; a door is forced at `at` to reach it
    Forced { blocker: AreaId, at: Point },
    /// Stopped at the edge of the region
    DeadEnd,
}

enum Blocker {
    Area(AreaId),
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCorridor {
    /// Footprint including both side walls and both end walls
    pub rect: Rect,
    pub direction: Direction,
    /// Floor width
    pub width: i32,
    pub end: CorridorEnd,
}

impl LinearCorridor {
    pub const fn new(rect: Rect, direction: Direction, width: i32, end: CorridorEnd) -> Self {
        Self {
            rect,
            direction,
            width,
            end,
        }
    }

    /// Length along the corridor axis, end walls included
    pub const fn length(&self) -> i32 {
        if self.direction.is_vertical_axis() {
            self.rect.height()
        } else {
            self.rect.width()
        }
    }

    pub(crate) fn fit(ctx: &mut FitContext<'_>, mark: &Mark) -> Option<Self> {
        let dir = mark.direction;
        if !dir.is_cardinal() {
            return None;
        }
        let entry = mark.target();
        let config = ctx.config;
        let width = ctx.rng.range(
            i32::from(config.corridor_min_width),
            i32::from(config.corridor_max_width),
        );
        let offset = ctx.rng.range(1, width);
        let min_length = i32::from(config.corridor_min_length);
        let full_length = ctx.rng.range(min_length, i32::from(config.corridor_max_length));

        let mut length = full_length;
        let mut blocker = None;
        let rect = loop {
            if length < min_length {
                return None;
            }
            let rect = Rect::extending(entry, dir, length, offset, width + 2);
            match first_blocker(ctx, &rect) {
                Some(b) => {
                    blocker = Some(b);
                    length -= 1;
                }
                None => break rect,
            }
        };

        let end = match blocker {
            None => CorridorEnd::Open,
            Some(Blocker::Edge) => CorridorEnd::DeadEnd,
            Some(Blocker::Area(id)) => settle_against(ctx, &rect, dir, width, id),
        };
        Some(Self::new(rect, dir, width, end))
    }

    pub(crate) fn plan_marks(&self, ctx: &mut FitContext<'_>) -> Vec<PlannedMark> {
        let dir = self.direction;
        let mut planned = Vec::new();
        match self.end {
            CorridorEnd::Open => {
                let at = side_cell(&self.rect, dir, ctx.rng.range(1, self.width));
                let forced = if ctx.rng.percent(u32::from(ctx.config.corridor_continuation_percent)) {
                    continuation_kind(ctx)
                } else {
                    None
                };
                planned.push(PlannedMark::corridor_end(at, dir).forcing(forced));
            }
            CorridorEnd::Forced { at, .. } => {
                planned.push(PlannedMark::corridor_end(at, dir));
            }
            CorridorEnd::Joined(_) | CorridorEnd::DeadEnd => {}
        }

        if ctx.rng.percent(u32::from(ctx.config.corridor_branch_percent)) {
            let side = if ctx.rng.one_in(2) {
                dir.rotate_cw()
            } else {
                dir.rotate_ccw()
            };
            if let Some(p) = random_side_cell(&self.rect, side, ctx.rng) {
                planned.push(PlannedMark::new(p, side));
            }
        }
        planned
    }
}

/// Corridor kind an open end continues into. Only kinds with a production
/// weight qualify; a coin decides when both do.
fn continuation_kind(ctx: &mut FitContext<'_>) -> Option<AreaKind> {
    let weights = &ctx.config.weights;
    let linear = weights.get(AreaKind::LinearCorridor) > 0;
    let quadrant = weights.get(AreaKind::QuadrantCorridor) > 0;
    match (linear, quadrant) {
        (true, true) if ctx.rng.one_in(2) => Some(AreaKind::LinearCorridor),
        (true, true) => Some(AreaKind::QuadrantCorridor),
        (true, false) => Some(AreaKind::LinearCorridor),
        (false, true) => Some(AreaKind::QuadrantCorridor),
        (false, false) => None,
    }
}

/// First thing a corridor footprint would run into
fn first_blocker(ctx: &FitContext<'_>, rect: &Rect) -> Option<Blocker> {
    let footprint = Shape::Rectangle(RectRoom::new(*rect));
    if let Some(i) = ctx.areas.iter().position(|a| a.shape.intersects(&footprint)) {
        return Some(Blocker::Area(AreaId(i)));
    }
    if !ctx.region.contains_rect(rect) {
        return Some(Blocker::Edge);
    }
    None
}

/// Decide how a clipped corridor meets the area that stopped it
fn settle_against(
    ctx: &mut FitContext<'_>,
    rect: &Rect,
    dir: Direction,
    width: i32,
    id: AreaId,
) -> CorridorEnd {
    let Some(area) = ctx.areas.get(id.0) else {
        return CorridorEnd::DeadEnd;
    };
    let beyond = |i: i32| side_cell(rect, dir, i).step(dir);

    let waiting = area.marks.iter().any(|m| {
        ctx.marks.get(m.0).is_some_and(|m| {
            m.is_undefined()
                && m.direction == dir.opposite()
                && (1..=width).any(|i| beyond(i) == m.location)
        })
    });
    if waiting {
        return CorridorEnd::Joined(id);
    }

    let doors: Vec<i32> = (1..=width)
        .filter(|&i| area.is_allowed_point_as_mark(beyond(i), dir.opposite()))
        .collect();
    let i = match ctx.rng.index(doors.len()) {
        Some(k) => doors[k],
        None => (width + 1) / 2,
    };
    CorridorEnd::Forced {
        blocker: id,
        at: side_cell(rect, dir, i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::Area;
    use crate::config::{AreaWeights, BuilderConfig};
    use crate::mark::MarkId;
    use delve_rng::ScriptedRng;

    // width 1 (offset needs no draw), length 4 + 6
    const SCRIPT: [u32; 2] = [0, 6];

    fn blocking_room(bottom: i32, marks: Vec<MarkId>) -> Area {
        Area {
            kind: AreaKind::RectangularRoom,
            shape: Shape::Rectangle(RectRoom::new(Rect::new(15, bottom - 8, 25, bottom))),
            origin: None,
            entry: Point::new(20, bottom - 8),
            marks,
        }
    }

    fn fit_with(areas: &[Area], marks: &[Mark], region: Rect) -> Option<LinearCorridor> {
        let config = BuilderConfig::default();
        let mut rng = ScriptedRng::new(SCRIPT);
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region,
            areas,
            marks,
        };
        let mark = Mark::new(Point::new(20, 20), Direction::North, Some(AreaId(9)), 3);
        LinearCorridor::fit(&mut ctx, &mark)
    }

    #[test]
    fn test_open_corridor() {
        let corridor = fit_with(&[], &[], Rect::new(0, 0, 40, 40)).unwrap();
        assert_eq!(corridor.rect, Rect::new(19, 10, 21, 19));
        assert_eq!(corridor.length(), 10);
        assert_eq!(corridor.end, CorridorEnd::Open);
    }

    #[test]
    fn test_clipped_corridor_forces_door() {
        let areas = [blocking_room(13, vec![])];
        let corridor = fit_with(&areas, &[], Rect::new(0, 0, 40, 40)).unwrap();
        assert_eq!(corridor.rect, Rect::new(19, 14, 21, 19));
        assert_eq!(
            corridor.end,
            CorridorEnd::Forced {
                blocker: AreaId(0),
                at: Point::new(20, 14)
            }
        );
    }

    #[test]
    fn test_clipped_corridor_joins_waiting_mark() {
        let areas = [blocking_room(13, vec![MarkId(0)])];
        let marks = [Mark::new(Point::new(20, 13), Direction::South, Some(AreaId(0)), 3)];
        let corridor = fit_with(&areas, &marks, Rect::new(0, 0, 40, 40)).unwrap();
        assert_eq!(corridor.end, CorridorEnd::Joined(AreaId(0)));
    }

    #[test]
    fn test_too_short_after_clipping() {
        let areas = [blocking_room(17, vec![])];
        assert_eq!(fit_with(&areas, &[], Rect::new(0, 0, 40, 40)), None);
    }

    #[test]
    fn test_region_edge_is_dead_end() {
        let corridor = fit_with(&[], &[], Rect::new(0, 12, 40, 40)).unwrap();
        assert_eq!(corridor.rect, Rect::new(19, 12, 21, 19));
        assert_eq!(corridor.end, CorridorEnd::DeadEnd);
    }

    #[test]
    fn test_forced_end_mark_planned() {
        let config = BuilderConfig {
            corridor_branch_percent: 0,
            ..BuilderConfig::default()
        };
        let corridor = LinearCorridor::new(
            Rect::new(19, 14, 21, 19),
            Direction::North,
            1,
            CorridorEnd::Forced {
                blocker: AreaId(0),
                at: Point::new(20, 14),
            },
        );
        let mut rng = ScriptedRng::new(Vec::new());
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region: Rect::new(0, 0, 40, 40),
            areas: &[],
            marks: &[],
        };
        let planned = corridor.plan_marks(&mut ctx);
        assert_eq!(
            planned,
            vec![PlannedMark::corridor_end(Point::new(20, 14), Direction::North)]
        );
    }

    fn open_end_kind(weights: AreaWeights, script: &[u32]) -> Option<AreaKind> {
        let config = BuilderConfig {
            corridor_continuation_percent: 100,
            corridor_branch_percent: 0,
            weights,
            ..BuilderConfig::default()
        };
        let corridor = LinearCorridor::new(
            Rect::new(19, 10, 21, 19),
            Direction::North,
            1,
            CorridorEnd::Open,
        );
        let mut rng = ScriptedRng::new(script.to_vec());
        let mut ctx = FitContext {
            rng: &mut rng,
            config: &config,
            region: Rect::new(0, 0, 40, 40),
            areas: &[],
            marks: &[],
        };
        let planned = corridor.plan_marks(&mut ctx);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].location, Point::new(20, 10));
        assert!(planned[0].at_corridor_end);
        planned[0].forced_kind
    }

    #[test]
    fn test_continuation_skips_unweighted_kinds() {
        let rooms_and_corridors = AreaWeights::only(&[
            (AreaKind::RectangularRoom, 70),
            (AreaKind::LinearCorridor, 30),
        ]);
        // the second draw would have been a coin flip for the quadrant
        assert_eq!(
            open_end_kind(rooms_and_corridors, &[0, 1, 99]),
            Some(AreaKind::LinearCorridor)
        );

        let turns_only = AreaWeights::only(&[
            (AreaKind::RectangularRoom, 90),
            (AreaKind::QuadrantCorridor, 10),
        ]);
        assert_eq!(
            open_end_kind(turns_only, &[0, 0, 99]),
            Some(AreaKind::QuadrantCorridor)
        );

        let rooms_only = AreaWeights::only(&[(AreaKind::RectangularRoom, 100)]);
        assert_eq!(open_end_kind(rooms_only, &[0, 0, 99]), None);
    }

    #[test]
    fn test_continuation_coin_when_both_weighted() {
        assert_eq!(
            open_end_kind(AreaWeights::default(), &[0, 0, 99]),
            Some(AreaKind::LinearCorridor)
        );
        assert_eq!(
            open_end_kind(AreaWeights::default(), &[0, 1, 99]),
            Some(AreaKind::QuadrantCorridor)
        );
    }
}
