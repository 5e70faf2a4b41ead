//! Command-line dungeon generator
//!
//! Builds one dungeon and prints it to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use delve_core::{BuilderConfig, DebugFlags, DungeonBuilder, Point, Rect, TileGrid};
use delve_rng::GameRng;

/// Generate a dungeon by mark expansion
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - grow a dungeon from a single mark", long_about = None)]
struct Args {
    /// Map width in cells
    #[arg(short = 'W', long = "width", default_value_t = 80)]
    width: i32,

    /// Map height in cells
    #[arg(short = 'H', long = "height", default_value_t = 40)]
    height: i32,

    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON builder configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Startup column (region centre when omitted)
    #[arg(long = "start-x", requires = "start_y")]
    start_x: Option<i32>,

    /// Startup row
    #[arg(long = "start-y", requires = "start_x")]
    start_y: Option<i32>,

    /// Render mark states instead of doors
    #[arg(long = "mark-tiles")]
    mark_tiles: bool,

    /// Give every area kind its own wall glyph
    #[arg(long = "shape-walls")]
    shape_walls: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// Print a JSON build report to stderr
    #[arg(long = "report")]
    report: bool,

    /// Verbose output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => BuilderConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BuilderConfig::default(),
    };
    if args.mark_tiles {
        config.debug |= DebugFlags::MARK_TILES;
    }
    if args.shape_walls {
        config.debug |= DebugFlags::SHAPE_WALLS;
    }

    if args.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "map size must be positive, got {}x{}",
        args.width,
        args.height
    );

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!("seed {}", rng.seed());

    let startup = match (args.start_x, args.start_y) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => None,
    };

    let mut grid = TileGrid::new(args.width, args.height);
    let region = Rect::from_size(0, 0, args.width, args.height);
    let mut builder = DungeonBuilder::new(region, config);
    let report = builder
        .build(&mut grid, &mut rng, startup)
        .context("dungeon generation failed")?;
    info!(
        "{} areas, {}% covered after {} passes",
        report.areas, report.coverage_percent, report.passes
    );

    print!("{grid}");
    if args.report {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    use simplelog::LevelFilter::{Debug, Info, Off, Trace, Warn};
    let level = match verbose {
        0 => Warn,
        1 => Info,
        2 => Debug,
        _ => Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
