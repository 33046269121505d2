mod map_drawer;
mod map_generator;
mod path_builder;
mod room_builder;
mod tile_projector;

pub use map_drawer::{DrawConfig, MapDrawer, MapDrawerFactory};
pub use map_generator::MapGenerator;
pub use path_builder::{FailsafeLayouts, GeneratorConfig};
pub use tile_projector::{Corner, TileKind, TileProjector};

pub(crate) use path_builder::PathBuilder;
pub(crate) use room_builder::RoomGraphBuilder;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct RngHandler;

impl RngHandler {
    /// Deterministic generator, the same seed always yields the same map.
    pub fn seeded(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    pub fn random_seed() -> u64 {
        rand::random()
    }
}
