//! Mark-expansion dungeon generation
//!
//! A [`DungeonBuilder`] grows a dungeon out of a single seed mark. Every
//! accepted area (rooms, corridors, round halls and template chambers)
//! leaves new marks on its walls, and each mark in turn tries to grow
//! another area. The result is written to any [`TileMap`].

pub mod area;
pub mod builder;
pub mod config;
pub mod direction;
pub mod error;
pub mod flush;
pub mod geometry;
pub mod map;
pub mod mark;
pub mod production;

pub use area::{Area, AreaId, AreaKind, ChamberKind, Shape, ShapeClass};
pub use builder::{BuildReport, DungeonBuilder};
pub use config::{AreaWeights, BuilderConfig, DebugFlags};
pub use direction::Direction;
pub use error::{BuildError, ConfigError};
pub use geometry::{Point, Rect};
pub use map::{LogicalTile, TileGrid, TileId, TileMap};
pub use mark::{Mark, MarkId, MarkState};
pub use production::ProductionTable;

pub use delve_rng;
