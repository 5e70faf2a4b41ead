//! Tile flush: writing accepted areas and settled marks to the map

use log::warn;

use crate::area::Area;
use crate::config::DebugFlags;
use crate::map::{LogicalTile, TileMap};
use crate::mark::{Mark, MarkState};

/// Marker tile for a mark state in debug rendering
pub const fn marker_tile(state: MarkState) -> LogicalTile {
    match state {
        MarkState::Undefined => LogicalTile::MarkUndefined,
        MarkState::AreaGenerator => LogicalTile::MarkAreaGenerator,
        MarkState::RetriesExhaust => LogicalTile::MarkRetriesExhaust,
        MarkState::PointsToOtherArea => LogicalTile::MarkPointsToOtherArea,
    }
}

/// Write an area's walls and floor.
///
/// Only owned cells are written, and only while they are still undefined;
/// anything else is left alone and logged. Returns the number of cells
/// written.
pub fn flush_area(map: &mut dyn TileMap, area: &Area, debug: DebugFlags) -> usize {
    let undefined = map.translate_tile(LogicalTile::Undefined);
    let wall = map.translate_tile(if debug.contains(DebugFlags::SHAPE_WALLS) {
        area.shape.wall_tile()
    } else {
        LogicalTile::DungeonWall
    });
    let floor = map.translate_tile(LogicalTile::DungeonFloor);

    let mut written = 0;
    for p in area.dimension().points() {
        if !area.is_owned_point(p) {
            continue;
        }
        match map.tile(p.x, p.y) {
            Some(tile) if tile == undefined => {}
            Some(tile) => {
                warn!(
                    "{} at ({}, {}): cell already holds tile {}, skipped",
                    area.kind, p.x, p.y, tile.0
                );
                continue;
            }
            None => {
                warn!("{} at ({}, {}): outside the map", area.kind, p.x, p.y);
                continue;
            }
        }
        let tile = if area.is_wall_point(p) { wall } else { floor };
        if map.set_tile(p.x, p.y, tile) {
            written += 1;
        }
    }
    written
}

/// Stamp a settled mark.
///
/// Marks that opened a doorway write a door on both sides of it. Other
/// states only show up with [`DebugFlags::MARK_TILES`].
pub fn stamp_mark(map: &mut dyn TileMap, mark: &Mark, debug: DebugFlags) {
    let state = mark.state();
    let opens = matches!(
        state,
        MarkState::AreaGenerator | MarkState::PointsToOtherArea
    );
    let kind = if debug.contains(DebugFlags::MARK_TILES) {
        marker_tile(state)
    } else if opens {
        LogicalTile::Door
    } else {
        return;
    };

    let tile = map.translate_tile(kind);
    map.set_tile(mark.location.x, mark.location.y, tile);
    if opens {
        let target = mark.target();
        map.set_tile(target.x, target.y, tile);
    }
}
