//! Dungeon builder
//!
//! The builder expands marks into areas. A pass starts from a single seed
//! mark, builds the configured startup area on it, and then works through
//! every mark depth-first: each mark picks an area kind, tries to fit it a
//! limited number of times, and on success the new area is flushed to the
//! map and contributes marks of its own. A pass that devours too little of
//! the region is thrown away and started again.

use delve_rng::RandomSource;
use log::{debug, trace};
use serde::Serialize;

use crate::area::{self, Area, AreaId, AreaKind, FitContext, Shape};
use crate::config::BuilderConfig;
use crate::direction::Direction;
use crate::error::{BuildError, ConfigError};
use crate::flush;
use crate::geometry::{Point, Rect};
use crate::map::{LogicalTile, TileMap};
use crate::mark::{Mark, MarkId, MarkState};
use crate::production::ProductionTable;

/// Summary of a successful build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Passes run, the successful one included
    pub passes: u32,
    pub devoured: u32,
    pub coverage_percent: u32,
    pub areas: usize,
    pub marks: usize,
}

/// Generates a dungeon inside one region of a map
#[derive(Debug, Clone)]
pub struct DungeonBuilder {
    region: Rect,
    config: BuilderConfig,
    production: Option<ProductionTable>,
    areas: Vec<Area>,
    marks: Vec<Mark>,
    busy: bool,
}

impl DungeonBuilder {
    pub fn new(region: Rect, config: BuilderConfig) -> Self {
        Self {
            region,
            config,
            production: None,
            areas: Vec::new(),
            marks: Vec::new(),
            busy: false,
        }
    }

    /// Generation bounds
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BuilderConfig) {
        self.config = config;
        self.production = None;
    }

    /// Change one production weight; the table is rebuilt on the next build
    pub fn set_area_weight(&mut self, kind: AreaKind, weight: u8) {
        self.config.weights.set(kind, weight);
        self.production = None;
    }

    pub fn area_weight(&self, kind: AreaKind) -> u8 {
        self.config.weights.get(kind)
    }

    /// Areas accepted by the last pass
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(id.0)
    }

    /// Every mark of the last pass, the seed mark first
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(id.0)
    }

    /// Sum of the devoured area of all accepted areas
    pub fn devoured_area(&self) -> u32 {
        self.areas.iter().map(Area::devour_area).sum()
    }

    /// Number of cells in the region
    pub fn dungeon_area(&self) -> u32 {
        self.region.area().max(0) as u32
    }

    /// Devoured area as a percentage of the region
    pub fn coverage_percent(&self) -> u32 {
        let total = u64::from(self.dungeon_area());
        if total == 0 {
            return 0;
        }
        (u64::from(self.devoured_area()) * 100 / total) as u32
    }

    /// True while a build is running
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Check that a shape lies inside the region and overlaps no accepted
    /// area other than `skip`
    pub fn is_fit_area_dimension(&self, shape: &Shape, skip: Option<AreaId>) -> bool {
        self.region.contains_rect(&shape.dimension())
            && self
                .areas
                .iter()
                .enumerate()
                .all(|(i, other)| Some(AreaId(i)) == skip || !other.shape.intersects(shape))
    }

    fn production_table(&mut self) -> Result<ProductionTable, BuildError> {
        if let Some(table) = &self.production {
            return Ok(table.clone());
        }
        let table = ProductionTable::new(&self.config.weights)?;
        self.production = Some(table.clone());
        Ok(table)
    }

    /// Generate a dungeon, starting at `startup` (the region centre when
    /// `None`; clamped into the region).
    ///
    /// Configuration problems are reported before the map is touched.
    pub fn build(
        &mut self,
        map: &mut impl TileMap,
        rng: &mut impl RandomSource,
        startup: Option<Point>,
    ) -> Result<BuildReport, BuildError> {
        if self.busy {
            return Err(BuildError::Busy);
        }
        let table = self.production_table()?;
        self.config.validate()?;
        if self.region.is_empty() || !map.bounds().contains_rect(&self.region) {
            return Err(ConfigError::Invalid {
                field: "region",
                reason: format!("{:?} is empty or outside the map", self.region),
            }
            .into());
        }

        self.busy = true;
        let result = self.run_passes(map, rng, &table, startup);
        self.busy = false;
        result
    }

    fn run_passes(
        &mut self,
        map: &mut dyn TileMap,
        rng: &mut dyn RandomSource,
        table: &ProductionTable,
        startup: Option<Point>,
    ) -> Result<BuildReport, BuildError> {
        let start = self
            .region
            .clamp(startup.unwrap_or_else(|| self.region.center()));
        let limit = self.config.devoured_area_bottom_limit;
        let mut best = 0;
        let mut passes = 0;
        loop {
            passes += 1;
            self.run_pass(map, rng, table, start);
            let coverage = self.coverage_percent();
            best = best.max(coverage);
            if coverage >= u32::from(limit) {
                debug!(
                    "pass {}: {} areas, {} marks, {}% covered",
                    passes,
                    self.areas.len(),
                    self.marks.len(),
                    coverage
                );
                return Ok(BuildReport {
                    passes,
                    devoured: self.devoured_area(),
                    coverage_percent: coverage,
                    areas: self.areas.len(),
                    marks: self.marks.len(),
                });
            }
            debug!(
                "pass {} covered {}% of {}%, restarting",
                passes, coverage, limit
            );
            if self.config.max_passes != 0 && passes >= self.config.max_passes {
                return Err(BuildError::CoverageNotReached {
                    limit,
                    passes,
                    best,
                });
            }
        }
    }

    /// One full expansion from a fresh seed mark
    fn run_pass(
        &mut self,
        map: &mut dyn TileMap,
        rng: &mut dyn RandomSource,
        table: &ProductionTable,
        start: Point,
    ) {
        self.areas.clear();
        self.marks.clear();
        let undefined = map.translate_tile(LogicalTile::Undefined);
        map.fill_area(self.region, undefined, true);

        let direction = Direction::CARDINALS[rng.rn2(4) as usize];
        self.marks.push(Mark::seed(
            start,
            direction,
            self.config.startup_kind,
            self.config.seed_retries,
        ));

        let mut stack = vec![MarkId(0)];
        loop {
            while let Some(id) = stack.pop() {
                if self.marks[id.0].is_undefined() {
                    self.process_mark(id, map, rng, table, &mut stack);
                }
            }
            // Marks left undefined outside the depth-first order
            match self.marks.iter().position(Mark::is_undefined) {
                Some(i) => stack.push(MarkId(i)),
                None => break,
            }
        }
    }

    /// Try to grow an area from one mark until it succeeds or runs out of
    /// retries. The kind is chosen once; every retry builds the same kind.
    fn process_mark(
        &mut self,
        id: MarkId,
        map: &mut dyn TileMap,
        rng: &mut dyn RandomSource,
        table: &ProductionTable,
        stack: &mut Vec<MarkId>,
    ) {
        let mark = self.marks[id.0].clone();
        let kind = match mark.forced_kind {
            Some(kind) => kind,
            None => table.pick(rng),
        };

        loop {
            let candidate = {
                let mut ctx = FitContext {
                    rng: &mut *rng,
                    config: &self.config,
                    region: self.region,
                    areas: &self.areas,
                    marks: &self.marks,
                };
                area::try_fit(kind, &mut ctx, &mark)
            };
            let left = self.marks[id.0].consume_retry();

            if let Some(other) = self.points_to_other_area(&mark) {
                trace!(
                    "mark {} at ({}, {}) reaches area {}",
                    id.0, mark.location.x, mark.location.y, other.0
                );
                self.open_doorway(id, other, map);
                return;
            }

            match candidate {
                Some(shape) if self.is_fit_area_dimension(&shape, None) => {
                    self.accept(id, kind, shape, map, rng, stack);
                    return;
                }
                _ if left == 0 => {
                    trace!(
                        "mark {} at ({}, {}): no {} fits",
                        id.0, mark.location.x, mark.location.y, kind
                    );
                    self.marks[id.0].set_state(MarkState::RetriesExhaust);
                    if mark.parent.is_some() {
                        flush::stamp_mark(map, &self.marks[id.0], self.config.debug);
                    }
                    return;
                }
                _ => {}
            }
        }
    }

    /// Area other than the mark's parent that already offers a door on the
    /// mark's target, facing back at it
    fn points_to_other_area(&self, mark: &Mark) -> Option<AreaId> {
        let target = mark.target();
        let back = mark.direction.opposite();
        self.areas
            .iter()
            .enumerate()
            .find(|(i, other)| {
                Some(AreaId(*i)) != mark.parent
                    && other.is_wall_point(target)
                    && other.is_allowed_point_as_mark(target, back)
            })
            .map(|(i, _)| AreaId(i))
    }

    /// Settle a mark whose target is a door cell of `other`, and settle or
    /// create the matching mark on `other`'s side
    fn open_doorway(&mut self, id: MarkId, other: AreaId, map: &mut dyn TileMap) {
        self.marks[id.0].set_state(MarkState::PointsToOtherArea);
        let target = self.marks[id.0].target();
        let back = self.marks[id.0].direction.opposite();

        // reuse whatever mark already sits on the doorway, settled or not
        let existing = self.areas[other.0]
            .marks
            .iter()
            .copied()
            .find(|m| self.marks[m.0].location == target);
        let partner = match existing {
            Some(partner) => partner,
            None => {
                let partner = MarkId(self.marks.len());
                self.marks.push(Mark::new(target, back, Some(other), 0));
                self.areas[other.0].marks.push(partner);
                partner
            }
        };
        if self.marks[partner.0].state() != MarkState::AreaGenerator {
            self.marks[partner.0].set_state(MarkState::PointsToOtherArea);
        }

        let debug = self.config.debug;
        if self.marks[id.0].parent.is_some() {
            flush::stamp_mark(map, &self.marks[id.0], debug);
        }
        flush::stamp_mark(map, &self.marks[partner.0], debug);
    }

    /// Accept a validated shape: record it, flush it, and queue its marks
    fn accept(
        &mut self,
        id: MarkId,
        kind: AreaKind,
        shape: Shape,
        map: &mut dyn TileMap,
        rng: &mut dyn RandomSource,
        stack: &mut Vec<MarkId>,
    ) {
        let entry = self.marks[id.0].target();
        let facing = self.marks[id.0].direction;
        let from_seed = self.marks[id.0].parent.is_none();
        let area_id = AreaId(self.areas.len());
        self.areas.push(Area {
            kind,
            shape,
            origin: if from_seed { None } else { Some(id) },
            entry,
            marks: Vec::new(),
        });
        self.marks[id.0].set_state(MarkState::AreaGenerator);

        let debug = self.config.debug;
        flush::flush_area(map, &self.areas[area_id.0], debug);
        if !from_seed {
            flush::stamp_mark(map, &self.marks[id.0], debug);
        }

        let planned = {
            let mut ctx = FitContext {
                rng: &mut *rng,
                config: &self.config,
                region: self.region,
                areas: &self.areas,
                marks: &self.marks,
            };
            self.areas[area_id.0].shape.plan_marks(&mut ctx, facing)
        };

        let mut taken = vec![entry];
        let mut fresh = Vec::with_capacity(planned.len());
        for planned in planned {
            if taken.contains(&planned.location) {
                trace!(
                    "area {}: duplicate exit at ({}, {}) dropped",
                    area_id.0, planned.location.x, planned.location.y
                );
                continue;
            }
            taken.push(planned.location);
            let retries = if planned.at_corridor_end {
                self.config.corridor_end_retries
            } else {
                self.config.mark_retries
            };
            let mut mark = Mark::new(planned.location, planned.direction, Some(area_id), retries);
            mark.forced_kind = planned.forced_kind;
            mark.at_corridor_end = planned.at_corridor_end;
            fresh.push(MarkId(self.marks.len()));
            self.marks.push(mark);
        }

        trace!(
            "area {} ({}) accepted from mark {} with {} exits",
            area_id.0,
            kind,
            id.0,
            fresh.len()
        );
        self.areas[area_id.0].marks.extend(fresh.iter().copied());
        stack.extend(fresh.iter().rev().copied());
    }
}
