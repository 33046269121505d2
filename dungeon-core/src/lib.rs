mod algos;
mod constants;
mod error;
mod types;

use tracing::{Level, event, span};

pub use algos::{
    Corner, DrawConfig, FailsafeLayouts, GeneratorConfig, MapDrawer, MapDrawerFactory,
    MapGenerator, RngHandler, TileKind, TileProjector,
};
pub use error::{ConfigError, GenerationError};
pub use types::{
    Direction, Door, DrawStyle, GeneratedMap, GridCoordinate, LayoutSource, PathBranch, Room,
    RoomGraph, RoomPathEntry, RoomTiles,
};

/// Generates a map from `seed`, or from a freshly drawn seed when none is
/// given. Returns the seed used alongside the map.
pub fn create_map(
    config: GeneratorConfig,
    failsafe: FailsafeLayouts,
    seed: Option<u64>,
) -> anyhow::Result<(u64, GeneratedMap)> {
    let span = span!(Level::DEBUG, "create_map");
    let _guard = span.enter();

    let generator = MapGenerator::new(config)?.with_failsafe_layouts(failsafe);

    let seed = seed.unwrap_or_else(RngHandler::random_seed);
    event!(Level::INFO, "Generating map with seed {}", seed);

    let map = generator.generate(&mut RngHandler::seeded(seed));

    Ok((seed, map))
}

pub fn draw_map(map: &GeneratedMap, style: DrawStyle) -> svg::Document {
    let span = span!(Level::DEBUG, "draw_map");
    let _guard = span.enter();

    let drawer = MapDrawerFactory::create_drawer(style);

    drawer.draw(map, &DrawConfig::default())
}
