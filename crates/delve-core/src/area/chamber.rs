//! Fixed-template chambers

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::rect::exit_sides;
use super::templates;
use super::{AreaKind, FitContext, PlannedMark};
use crate::direction::Direction;
use crate::geometry::{Point, Rect};
use crate::mark::Mark;

/// The hand-drawn chamber layouts
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
)]
pub enum ChamberKind {
    Cross,
    PillarHall,
    Octagon,
    Diamond,
    Crypt,
    Shrine,
    Cloister,
    Gallery,
    Ziggurat,
    Rotunda,
    Vestibule,
    Armory,
    Barracks,
    Sanctum,
    Chapel,
}

impl ChamberKind {
    pub const fn template(self) -> Template {
        match self {
            ChamberKind::Cross => Template::plain(templates::CROSS),
            ChamberKind::PillarHall => Template::plain(templates::PILLAR_HALL),
            ChamberKind::Octagon => Template::plain(templates::OCTAGON),
            ChamberKind::Diamond => Template::plain(templates::DIAMOND),
            ChamberKind::Crypt => Template::plain(templates::CRYPT),
            ChamberKind::Shrine => Template::plain(templates::SHRINE),
            ChamberKind::Cloister => Template::ornate(templates::CLOISTER, 12),
            ChamberKind::Gallery => Template::plain(templates::GALLERY),
            ChamberKind::Ziggurat => Template::ornate(templates::ZIGGURAT, 8),
            ChamberKind::Rotunda => Template::plain(templates::ROTUNDA),
            ChamberKind::Vestibule => Template::plain(templates::VESTIBULE),
            ChamberKind::Armory => Template::plain(templates::ARMORY),
            ChamberKind::Barracks => Template::plain(templates::BARRACKS),
            ChamberKind::Sanctum => Template::ornate(templates::SANCTUM, 10),
            ChamberKind::Chapel => Template::plain(templates::CHAPEL),
        }
    }

    pub const fn area_kind(self) -> AreaKind {
        match self {
            ChamberKind::Cross => AreaKind::Cross,
            ChamberKind::PillarHall => AreaKind::PillarHall,
            ChamberKind::Octagon => AreaKind::Octagon,
            ChamberKind::Diamond => AreaKind::Diamond,
            ChamberKind::Crypt => AreaKind::Crypt,
            ChamberKind::Shrine => AreaKind::Shrine,
            ChamberKind::Cloister => AreaKind::Cloister,
            ChamberKind::Gallery => AreaKind::Gallery,
            ChamberKind::Ziggurat => AreaKind::Ziggurat,
            ChamberKind::Rotunda => AreaKind::Rotunda,
            ChamberKind::Vestibule => AreaKind::Vestibule,
            ChamberKind::Armory => AreaKind::Armory,
            ChamberKind::Barracks => AreaKind::Barracks,
            ChamberKind::Sanctum => AreaKind::Sanctum,
            ChamberKind::Chapel => AreaKind::Chapel,
        }
    }
}

/// Door letter for a side
pub const fn door_symbol(side: Direction) -> Option<u8> {
    match side {
        Direction::North => Some(b'N'),
        Direction::South => Some(b'S'),
        Direction::West => Some(b'W'),
        Direction::East => Some(b'E'),
        _ => None,
    }
}

/// Side a door letter opens on
pub const fn door_side(symbol: u8) -> Option<Direction> {
    match symbol {
        b'N' => Some(Direction::North),
        b'S' => Some(Direction::South),
        b'W' => Some(Direction::West),
        b'E' => Some(Direction::East),
        _ => None,
    }
}

/// An ASCII chamber layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub rows: &'static [&'static str],
    /// Extra devour credit for layouts whose symmetry hides usable space
    pub ornate_bonus: u32,
}

impl Template {
    const fn plain(rows: &'static [&'static str]) -> Self {
        Self {
            rows,
            ornate_bonus: 0,
        }
    }

    const fn ornate(rows: &'static [&'static str], ornate_bonus: u32) -> Self {
        Self { rows, ornate_bonus }
    }

    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |row| row.len() as i32)
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Symbol at a template cell; blank outside the grid
    pub fn symbol(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 {
            return b' ';
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.as_bytes().get(x as usize))
            .copied()
            .unwrap_or(b' ')
    }

    /// Door positions offered on one side, in reading order
    pub fn doors(&self, side: Direction) -> Vec<Point> {
        let Some(wanted) = door_symbol(side) else {
            return Vec::new();
        };
        Rect::from_size(0, 0, self.width(), self.height())
            .points()
            .filter(|p| self.symbol(p.x, p.y) == wanted)
            .collect()
    }

    pub fn floor_count(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row.bytes().filter(|&b| b == b'.').count() as u32)
            .sum()
    }
}

/// A placed chamber with one door chosen per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    pub kind: ChamberKind,
    /// Map position of the template's top-left cell
    pub origin: Point,
    /// Chosen door on each side, in [`Direction::CARDINALS`] order
    pub doors: [Point; 4],
}

fn side_index(side: Direction) -> usize {
    Direction::CARDINALS
        .iter()
        .position(|&d| d == side)
        .unwrap_or(0)
}

impl Chamber {
    /// Pick a door variant for every side, then shift the grid so that the
    /// door facing back at the mark lands on its target
    pub(crate) fn fit(kind: ChamberKind, ctx: &mut FitContext<'_>, mark: &Mark) -> Self {
        let template = kind.template();
        let mut local = [Point::default(); 4];
        for (slot, side) in local.iter_mut().zip(Direction::CARDINALS) {
            let variants = template.doors(side);
            if let Some(i) = ctx.rng.index(variants.len()) {
                *slot = variants[i];
            }
        }

        let entry = local[side_index(mark.direction.opposite())];
        let target = mark.target();
        let origin = Point::new(target.x - entry.x, target.y - entry.y);
        let doors = local.map(|p| Point::new(origin.x + p.x, origin.y + p.y));
        Self {
            kind,
            origin,
            doors,
        }
    }

    pub fn template(&self) -> Template {
        self.kind.template()
    }

    fn symbol_at(&self, p: Point) -> u8 {
        self.template()
            .symbol(p.x - self.origin.x, p.y - self.origin.y)
    }

    pub fn dimension(&self) -> Rect {
        let template = self.template();
        Rect::from_size(
            self.origin.x,
            self.origin.y,
            template.width(),
            template.height(),
        )
    }

    pub fn is_owned_point(&self, p: Point) -> bool {
        self.symbol_at(p) != b' '
    }

    pub fn is_wall_point(&self, p: Point) -> bool {
        let symbol = self.symbol_at(p);
        symbol == b'X' || door_side(symbol).is_some()
    }

    /// Any door letter, facing its own side
    pub fn is_allowed_point_as_mark(&self, p: Point, dir: Direction) -> bool {
        door_side(self.symbol_at(p)) == Some(dir)
    }

    pub fn devour_area(&self) -> u32 {
        let template = self.template();
        template.floor_count() + template.ornate_bonus
    }

    /// One exit through the chosen door of each far side
    pub(crate) fn plan_marks(&self, facing: Direction) -> Vec<PlannedMark> {
        exit_sides(facing)
            .iter()
            .map(|&side| PlannedMark::new(self.doors[side_index(side)], side))
            .collect()
    }
}
