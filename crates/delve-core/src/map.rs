//! Map collaborator interface
//!
//! The generator never owns the tile grid. It reads and writes tiles through
//! [`TileMap`], speaking in [`LogicalTile`] kinds that the map translates into
//! its own tile ids. [`TileGrid`] is a plain in-memory map used by the CLI and
//! the tests.

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::geometry::{Point, Rect};

/// Concrete tile id agreed with the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileId(pub u16);

/// Tile kinds the generator writes
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
    FromRepr,
)]
#[repr(u8)]
pub enum LogicalTile {
    /// Not yet claimed by any area
    #[default]
    Undefined = 0,
    DungeonWall = 1,
    DungeonFloor = 2,
    Door = 3,
    LinearCorridorWall = 4,
    RectRoomWall = 5,
    CylindricityRoomWall = 6,
    QuadrantCorridorWall = 7,
    ChamberWall = 8,
    MarkUndefined = 9,
    MarkAreaGenerator = 10,
    MarkRetriesExhaust = 11,
    MarkPointsToOtherArea = 12,
}

impl LogicalTile {
    /// Check if this is any kind of wall
    pub const fn is_wall(&self) -> bool {
        matches!(
            self,
            LogicalTile::DungeonWall
                | LogicalTile::LinearCorridorWall
                | LogicalTile::RectRoomWall
                | LogicalTile::CylindricityRoomWall
                | LogicalTile::QuadrantCorridorWall
                | LogicalTile::ChamberWall
        )
    }

    /// Check if this is one of the debug mark markers
    pub const fn is_marker(&self) -> bool {
        matches!(
            self,
            LogicalTile::MarkUndefined
                | LogicalTile::MarkAreaGenerator
                | LogicalTile::MarkRetriesExhaust
                | LogicalTile::MarkPointsToOtherArea
        )
    }

    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            LogicalTile::DungeonFloor
                | LogicalTile::Door
                | LogicalTile::MarkAreaGenerator
                | LogicalTile::MarkPointsToOtherArea
        )
    }

    /// Get the display character for this tile kind
    pub const fn symbol(&self) -> char {
        match self {
            LogicalTile::Undefined => ' ',
            LogicalTile::DungeonWall => '#',
            LogicalTile::DungeonFloor => '.',
            LogicalTile::Door => '+',
            LogicalTile::LinearCorridorWall => 'L',
            LogicalTile::RectRoomWall => 'R',
            LogicalTile::CylindricityRoomWall => 'C',
            LogicalTile::QuadrantCorridorWall => 'Q',
            LogicalTile::ChamberWall => 'T',
            LogicalTile::MarkUndefined => '?',
            LogicalTile::MarkAreaGenerator => 'G',
            LogicalTile::MarkRetriesExhaust => 'x',
            LogicalTile::MarkPointsToOtherArea => 'P',
        }
    }
}

/// Read/write access to the map being generated
pub trait TileMap {
    /// Full map width in cells
    fn width(&self) -> i32;

    /// Full map height in cells
    fn height(&self) -> i32;

    /// Tile at a cell, `None` outside the map
    fn tile(&self, x: i32, y: i32) -> Option<TileId>;

    /// Write a tile; returns false (and writes nothing) outside the map
    fn set_tile(&mut self, x: i32, y: i32, tile: TileId) -> bool;

    /// Translate a logical kind into this map's tile id
    fn translate_tile(&self, kind: LogicalTile) -> TileId;

    /// Fill a rectangle on the foreground or background layer
    fn fill_area(&mut self, rect: Rect, tile: TileId, foreground: bool);

    /// Rectangle covering the whole map
    fn bounds(&self) -> Rect {
        Rect::from_size(0, 0, self.width(), self.height())
    }
}

/// In-memory two-layer tile grid using [`LogicalTile`] discriminants as ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    foreground: Vec<TileId>,
    background: Vec<TileId>,
}

impl TileGrid {
    /// Create a grid with every cell `Undefined`; negative sizes clamp to 0
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = (width as usize) * (height as usize);
        let undefined = TileId(LogicalTile::Undefined as u16);
        Self {
            width,
            height,
            foreground: vec![undefined; cells],
            background: vec![undefined; cells],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + x as usize)
    }

    /// Logical kind of the foreground tile at a cell
    pub fn logical(&self, x: i32, y: i32) -> Option<LogicalTile> {
        self.tile(x, y)
            .and_then(|id| u8::try_from(id.0).ok())
            .and_then(LogicalTile::from_repr)
    }

    /// Logical kind at a point
    pub fn logical_at(&self, p: Point) -> Option<LogicalTile> {
        self.logical(p.x, p.y)
    }

    /// Background tile at a cell
    pub fn background(&self, x: i32, y: i32) -> Option<TileId> {
        self.index(x, y).map(|i| self.background[i])
    }

    /// Number of foreground cells holding `kind`
    pub fn count(&self, kind: LogicalTile) -> usize {
        let id = TileId(kind as u16);
        self.foreground.iter().filter(|&&t| t == id).count()
    }

    /// One string per row, using [`LogicalTile::symbol`]
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.logical(x, y).map_or('?', |t| t.symbol()))
                    .collect()
            })
            .collect()
    }
}

impl TileMap for TileGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        self.index(x, y).map(|i| self.foreground[i])
    }

    fn set_tile(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.foreground[i] = tile;
                true
            }
            None => false,
        }
    }

    fn translate_tile(&self, kind: LogicalTile) -> TileId {
        TileId(kind as u16)
    }

    fn fill_area(&mut self, rect: Rect, tile: TileId, foreground: bool) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        for p in clipped.points() {
            if let Some(i) = self.index(p.x, p.y) {
                if foreground {
                    self.foreground[i] = tile;
                } else {
                    self.background[i] = tile;
                }
            }
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
