//! Whole-build tests: layout invariants, determinism and failure modes

use delve_core::{
    AreaId, AreaKind, AreaWeights, BuildError, BuilderConfig, DebugFlags, DungeonBuilder,
    LogicalTile, MarkState, Point, Rect, TileGrid, TileMap,
};
use delve_rng::GameRng;

// ============================================================================
// Helpers
// ============================================================================

fn build(width: i32, height: i32, config: BuilderConfig, seed: u64) -> (DungeonBuilder, TileGrid) {
    let mut builder = DungeonBuilder::new(Rect::from_size(0, 0, width, height), config);
    let mut grid = TileGrid::new(width, height);
    builder
        .build(&mut grid, &mut GameRng::new(seed), None)
        .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
    (builder, grid)
}

fn rooms_and_corridors() -> BuilderConfig {
    BuilderConfig {
        weights: AreaWeights::only(&[
            (AreaKind::RectangularRoom, 70),
            (AreaKind::LinearCorridor, 30),
        ]),
        ..BuilderConfig::default()
    }
}

// ============================================================================
// Layout invariants
// ============================================================================

#[test]
fn test_areas_never_overlap() {
    for seed in [1, 7, 42, 1234] {
        let (builder, _) = build(80, 40, BuilderConfig::default(), seed);
        let areas = builder.areas();
        for (i, a) in areas.iter().enumerate() {
            assert!(
                builder.is_fit_area_dimension(&a.shape, Some(AreaId(i))),
                "seed {seed}: area {i} ({}) overlaps another area",
                a.kind
            );
            for b in &areas[i + 1..] {
                assert_eq!(a.intersects(b), b.intersects(a));
                let shared = a
                    .dimension()
                    .points()
                    .filter(|&p| a.is_owned_point(p) && b.is_owned_point(p))
                    .count();
                assert_eq!(shared, 0, "seed {seed}: {} and {} share cells", a.kind, b.kind);
            }
        }
    }
}

#[test]
fn test_areas_stay_in_region() {
    let mut builder = DungeonBuilder::new(Rect::new(10, 5, 69, 34), BuilderConfig::default());
    let mut grid = TileGrid::new(80, 40);
    builder.build(&mut grid, &mut GameRng::new(99), None).unwrap();

    let region = builder.region();
    for area in builder.areas() {
        assert!(region.contains_rect(&area.dimension()), "{:?}", area.dimension());
    }
    // nothing outside the region is touched
    for p in grid.bounds().points() {
        if !region.contains_point(p) {
            assert_eq!(grid.logical_at(p), Some(LogicalTile::Undefined), "{p:?}");
        }
    }
}

#[test]
fn test_coverage_limit_reached() {
    for seed in [3, 5, 8] {
        let (builder, _) = build(80, 40, BuilderConfig::default(), seed);
        assert!(builder.coverage_percent() >= 35, "seed {seed}");
        assert!(builder.devoured_area() * 100 >= 35 * builder.dungeon_area());
    }
}

#[test]
fn test_every_mark_settles() {
    let (builder, _) = build(80, 40, BuilderConfig::default(), 17);
    for (i, mark) in builder.marks().iter().enumerate() {
        let state = mark.state();
        assert!(state.is_terminal(), "mark {i} left {state}");
        if state == MarkState::RetriesExhaust {
            assert_eq!(mark.retries_left(), 0);
        }
    }
}

#[test]
fn test_marks_and_areas_link_up() {
    let (builder, grid) = build(80, 40, BuilderConfig::default(), 21);
    let marks = builder.marks();

    for (i, area) in builder.areas().iter().enumerate() {
        match area.origin {
            None => assert_eq!(i, 0, "only the first area comes from the seed"),
            Some(id) => {
                let mark = &marks[id.0];
                assert_eq!(mark.state(), MarkState::AreaGenerator);
                assert_eq!(mark.target(), area.entry);
                assert!(area.is_wall_point(area.entry));
                assert_eq!(grid.logical_at(mark.location), Some(LogicalTile::Door));
                assert_eq!(grid.logical_at(area.entry), Some(LogicalTile::Door));
            }
        }
        for id in &area.marks {
            assert_eq!(marks[id.0].parent, Some(AreaId(i)));
            assert!(area.is_wall_point(marks[id.0].location));
        }
    }

    for mark in marks {
        if mark.state() != MarkState::PointsToOtherArea {
            continue;
        }
        let target = mark.target();
        let reached = builder
            .areas()
            .iter()
            .enumerate()
            .any(|(i, a)| Some(AreaId(i)) != mark.parent && a.is_wall_point(target));
        assert!(reached, "mark at {:?} points nowhere", mark.location);
        assert_eq!(grid.logical_at(mark.location), Some(LogicalTile::Door));
        assert_eq!(grid.logical_at(target), Some(LogicalTile::Door));
    }
}

#[test]
fn test_floor_and_walls_written() {
    let (builder, grid) = build(80, 40, BuilderConfig::default(), 64);
    let floor = grid.count(LogicalTile::DungeonFloor);
    let walls = grid.count(LogicalTile::DungeonWall);
    assert!(floor > 0 && walls > 0);
    let owned: usize = builder
        .areas()
        .iter()
        .map(|a| a.dimension().points().filter(|&p| a.is_owned_point(p)).count())
        .sum();
    assert_eq!(floor + walls + grid.count(LogicalTile::Door), owned);
}

#[test]
fn test_debug_tiles() {
    let config = BuilderConfig {
        debug: DebugFlags::MARK_TILES | DebugFlags::SHAPE_WALLS,
        ..BuilderConfig::default()
    };
    let (_, grid) = build(80, 40, config, 5);
    assert_eq!(grid.count(LogicalTile::DungeonWall), 0);
    assert_eq!(grid.count(LogicalTile::Door), 0);
    assert!(grid.count(LogicalTile::RectRoomWall) > 0);
    assert!(grid.count(LogicalTile::MarkAreaGenerator) > 0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_dungeon() {
    let (first, first_grid) = build(60, 40, rooms_and_corridors(), 2718);
    let (second, second_grid) = build(60, 40, rooms_and_corridors(), 2718);

    assert_eq!(first.areas(), second.areas());
    assert_eq!(first.marks(), second.marks());
    assert_eq!(first_grid.rows(), second_grid.rows());
    assert!(
        first
            .areas()
            .iter()
            .all(|a| matches!(a.kind, AreaKind::RectangularRoom | AreaKind::LinearCorridor))
    );
}

// Exact layout for seed 2718, grown from the region centre
#[test]
fn test_pinned_layout() {
    let region = Rect::from_size(0, 0, 60, 40);
    let mut builder = DungeonBuilder::new(region, rooms_and_corridors());
    let mut grid = TileGrid::new(60, 40);
    let report = builder.build(&mut grid, &mut GameRng::new(2718), None).unwrap();

    assert_eq!(report.passes, 1);
    assert_eq!(report.devoured, 904);
    assert_eq!(report.coverage_percent, 37);
    assert_eq!(report.marks, 39);

    let expected = [
        (AreaKind::RectangularRoom, Rect::new(25, 13, 29, 24)),
        (AreaKind::RectangularRoom, Rect::new(24, 25, 31, 32)),
        (AreaKind::RectangularRoom, Rect::new(24, 33, 33, 38)),
        (AreaKind::RectangularRoom, Rect::new(15, 31, 23, 37)),
        (AreaKind::RectangularRoom, Rect::new(10, 29, 14, 39)),
        (AreaKind::RectangularRoom, Rect::new(10, 21, 15, 28)),
        (AreaKind::RectangularRoom, Rect::new(16, 20, 23, 26)),
        (AreaKind::LinearCorridor, Rect::new(19, 6, 22, 19)),
        (AreaKind::LinearCorridor, Rect::new(20, 0, 22, 5)),
        (AreaKind::RectangularRoom, Rect::new(23, 0, 33, 8)),
        (AreaKind::LinearCorridor, Rect::new(20, 27, 23, 30)),
        (AreaKind::RectangularRoom, Rect::new(5, 16, 9, 23)),
        (AreaKind::RectangularRoom, Rect::new(0, 14, 4, 22)),
        (AreaKind::RectangularRoom, Rect::new(1, 6, 5, 13)),
        (AreaKind::RectangularRoom, Rect::new(6, 3, 16, 13)),
        (AreaKind::LinearCorridor, Rect::new(12, 14, 14, 18)),
        (AreaKind::LinearCorridor, Rect::new(7, 24, 9, 34)),
        (AreaKind::LinearCorridor, Rect::new(7, 35, 9, 39)),
    ];
    let actual: Vec<_> = builder.areas().iter().map(|a| (a.kind, a.dimension())).collect();
    assert_eq!(actual, expected);

    let rows = [
        "                    ##############                          ",
        "                    #.##.........#                          ",
        "                    #.++.........#                          ",
        "      ###########   #.##.........#                          ",
        "      #.........#   #.##.........#                          ",
        "      #.........#   #+##.........#                          ",
        " ######.........#  ##+##.........#                          ",
        " #...++.........#  #..##.........#                          ",
        " #...##.........#  #..############                          ",
        " #...##.........#  #..#                                     ",
        " #...##.........#  #..#                                     ",
        " #...##.........#  #..#                                     ",
        " #...##.........#  #..#                                     ",
        " ##+#########+###  #..#  #####                              ",
        "###+#       #+#    #..#  #...#                              ",
        "#...#       #.#    #..#  #...#                              ",
        "#...######  #.#    #..#  #...#                              ",
        "#...##...#  #.#    #..#  #...#                              ",
        "#...##...#  ###    #..#  #...#                              ",
        "#...##...#         ##+#  #...#                              ",
        "#...##...#      #####+## #...#                              ",
        "#...++...########......# #...#                              ",
        "######...++....++......# #...#                              ",
        "     ###+##....++......# #...#                              ",
        "       #+##....##......# ##+##                              ",
        "       #.##....##......####+####                            ",
        "       #.##....######+###......#                            ",
        "       #.##....#    #+###......#                            ",
        "       #.##+####    #..##......#                            ",
        "       #.##+###     #..##......#                            ",
        "       #.##...#     ##+##......#                            ",
        "       #.##...########+##......#                            ",
        "       #.##...##.......###+#####                            ",
        "       #.##...++.......###+#######                          ",
        "       #+##...##.......++........#                          ",
        "       #+##...++.......##........#                          ",
        "       #.##...##.......##........#                          ",
        "       #.++...###########........#                          ",
        "       #.##...#         ##########                          ",
        "       ########                                             ",
    ];
    assert_eq!(grid.rows(), rows);
}

#[test]
fn test_rebuild_replaces_previous_dungeon() {
    let region = Rect::from_size(0, 0, 60, 40);
    let mut builder = DungeonBuilder::new(region, rooms_and_corridors());
    let mut grid = TileGrid::new(60, 40);
    builder.build(&mut grid, &mut GameRng::new(1), None).unwrap();
    builder.build(&mut grid, &mut GameRng::new(2), None).unwrap();

    let (fresh, fresh_grid) = build(60, 40, rooms_and_corridors(), 2);
    assert_eq!(builder.areas(), fresh.areas());
    assert_eq!(grid.rows(), fresh_grid.rows());
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_small_region_terminates() {
    let config = BuilderConfig {
        max_passes: 20,
        ..BuilderConfig::default()
    };
    let mut builder = DungeonBuilder::new(Rect::from_size(0, 0, 14, 10), config);
    let mut grid = TileGrid::new(14, 10);
    match builder.build(&mut grid, &mut GameRng::new(4), Some(Point::new(7, 5))) {
        Ok(report) => assert!(report.passes <= 20),
        Err(BuildError::CoverageNotReached { passes, .. }) => assert_eq!(passes, 20),
        Err(e) => panic!("unexpected error {e}"),
    }
    assert!(!builder.is_busy());
}

#[test]
fn test_bad_weights_leave_map_alone() {
    let config = BuilderConfig {
        weights: AreaWeights::only(&[(AreaKind::RectangularRoom, 99)]),
        ..BuilderConfig::default()
    };
    let mut builder = DungeonBuilder::new(Rect::from_size(0, 0, 40, 20), config);
    let mut grid = TileGrid::new(40, 20);
    let floor = grid.translate_tile(LogicalTile::DungeonFloor);
    grid.fill_area(Rect::new(0, 0, 39, 19), floor, true);

    let result = builder.build(&mut grid, &mut GameRng::new(1), None);
    assert_eq!(result, Err(BuildError::WeightSum { sum: 99 }));
    assert_eq!(grid.count(LogicalTile::DungeonFloor), 800);

    // fixing the weight makes the same builder usable
    builder.set_area_weight(AreaKind::LinearCorridor, 1);
    assert_eq!(builder.area_weight(AreaKind::LinearCorridor), 1);
    assert!(builder.build(&mut grid, &mut GameRng::new(1), None).is_ok());
}
