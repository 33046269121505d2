use dungeon_core::{
    DrawStyle, FailsafeLayouts, GeneratedMap, GeneratorConfig, GridCoordinate, RoomPathEntry,
    create_map, draw_map,
};

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use svg::save as save_as_svg;
use tracing::{Level, event};

const GENERATED_DIR: &str = "generated";
const LAYOUTS_DIR: &str = "generated/layouts";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Svg,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about = "Generates a room layout and writes it to the generated directory", long_about = None)]
struct Args {
    /// Width of the map, in rooms
    #[arg(long)]
    width: Option<u32>,

    /// Height of the map, in rooms
    #[arg(long)]
    height: Option<u32>,

    /// Rooms on the main path, the starting room included
    #[arg(short, long)]
    rooms: Option<u32>,

    /// Column of the starting room, defaults to the map centre
    #[arg(long, requires = "start_y")]
    start_x: Option<i32>,

    /// Row of the starting room, defaults to the map centre
    #[arg(long, requires = "start_x")]
    start_y: Option<i32>,

    /// Percentage of main path steps that keep the preferred direction
    #[arg(long)]
    main_bias: Option<u32>,

    /// Percentage of fork steps that keep the fork direction
    #[arg(long)]
    fork_bias: Option<u32>,

    /// Steps along one axis after which a fork is grown
    #[arg(long)]
    straight_run: Option<u32>,

    /// Shortest fork, in rooms
    #[arg(long)]
    min_fork_length: Option<u32>,

    /// Forks are always shorter than this, in rooms
    #[arg(long)]
    max_fork_length: Option<u32>,

    /// Missed main path steps before every direction is tried
    #[arg(long)]
    max_retries: Option<u32>,

    /// Missed fork steps before every direction is tried
    #[arg(long)]
    max_retries_fork: Option<u32>,

    /// Steps a single fork may take before generation gives up
    #[arg(long)]
    max_fork_iterations: Option<u32>,

    /// Width of a room, in tiles
    #[arg(long)]
    room_width: Option<i32>,

    /// Height of a room, in tiles
    #[arg(long)]
    room_height: Option<i32>,

    /// Seed for the random generator, drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t, value_enum)]
    style: DrawStyle,

    #[arg(short, long, default_value_t, value_enum)]
    format: OutputFormat,

    /// JSON files holding failsafe layouts, used when generation fails
    #[arg(long = "failsafe")]
    failsafe: Vec<PathBuf>,

    /// Also save the generated room path as a failsafe layout
    #[arg(long)]
    save_layout: bool,

    /// Log every generation step
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();

        if let Some(width) = self.width {
            config.map_width = width;
        }
        if let Some(height) = self.height {
            config.map_height = height;
        }
        if let Some(rooms) = self.rooms {
            config.target_room_count = rooms;
        }
        if let (Some(x), Some(y)) = (self.start_x, self.start_y) {
            config.start = Some(GridCoordinate::new(x, y));
        }
        if let Some(bias) = self.main_bias {
            config.main_direction_bias = bias;
        }
        if let Some(bias) = self.fork_bias {
            config.fork_direction_bias = bias;
        }
        if let Some(threshold) = self.straight_run {
            config.straight_run_threshold = threshold;
        }
        if let Some(length) = self.min_fork_length {
            config.min_fork_length = length;
        }
        if let Some(length) = self.max_fork_length {
            config.max_fork_length = length;
        }
        if let Some(retries) = self.max_retries {
            config.max_retries = retries;
        }
        if let Some(retries) = self.max_retries_fork {
            config.max_retries_fork = retries;
        }
        if let Some(iterations) = self.max_fork_iterations {
            config.max_fork_iterations = iterations;
        }
        if let Some(width) = self.room_width {
            config.room_width = width;
        }
        if let Some(height) = self.room_height {
            config.room_height = height;
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let failsafe = load_failsafe_layouts(&args.failsafe)?;

    let (seed, map) = create_map(args.generator_config(), failsafe, args.seed)?;

    event!(
        Level::INFO,
        "Generated {} rooms with {} forks from a {:?} layout",
        map.rooms.len(),
        map.fork_count(),
        map.source
    );

    ensure_dir(Path::new(GENERATED_DIR))?;

    let map_filename = match args.format {
        OutputFormat::Svg => {
            let filename = format!("{}/{}-map.svg", GENERATED_DIR, seed);
            save_as_svg(&filename, &draw_map(&map, args.style))
                .with_context(|| format!("Failed to save SVG file {}", filename))?;
            filename
        }
        OutputFormat::Json => {
            let filename = format!("{}/{}-map.json", GENERATED_DIR, seed);
            write_json(Path::new(&filename), &map)?;
            filename
        }
    };

    println!("Saved map to: {}", map_filename);

    if args.save_layout {
        let layout_filename = save_layout(&map)?;
        println!("Saved layout to: {}", layout_filename.display());
    }

    Ok(())
}

fn load_failsafe_layouts(paths: &[PathBuf]) -> anyhow::Result<FailsafeLayouts> {
    let mut layouts = FailsafeLayouts::default();

    for path in paths {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read failsafe layouts from {}", path.display()))?;

        let file_layouts: Vec<Vec<RoomPathEntry>> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse failsafe layouts in {}", path.display()))?;

        for layout in file_layouts {
            layouts
                .push(layout)
                .with_context(|| format!("Invalid failsafe layout in {}", path.display()))?;
        }
    }

    event!(Level::DEBUG, "Loaded {} failsafe layouts", layouts.len());

    Ok(layouts)
}

// Writes the room path under the first free `layoutN.json` name.
fn save_layout(map: &GeneratedMap) -> anyhow::Result<PathBuf> {
    let layouts_dir = Path::new(LAYOUTS_DIR);
    ensure_dir(layouts_dir)?;

    let filename = (0..)
        .map(|n| layouts_dir.join(format!("layout{}.json", n)))
        .find(|path| !path.exists())
        .context("No free layout file name")?;

    write_json(&filename, &[&map.entries])?;

    Ok(filename)
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path
        .try_exists()
        .with_context(|| format!("Error checking for '{}' directory", path.display()))?
    {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create '{}' directory", path.display()))?;
        event!(Level::INFO, "Directory '{}' created", path.display());
    }

    Ok(())
}
