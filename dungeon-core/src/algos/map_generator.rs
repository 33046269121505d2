use super::{FailsafeLayouts, GeneratorConfig, PathBuilder, RoomGraphBuilder, TileProjector};
use crate::{
    error::{ConfigError, GenerationError},
    types::{GeneratedMap, LayoutSource, RoomGraph, RoomPathEntry},
};

use rand::Rng;
use tracing::{Level, event, span};

/// Runs one full generation: room path, room graph and room tiles.
#[derive(Debug, Clone)]
pub struct MapGenerator {
    config: GeneratorConfig,
    failsafe: FailsafeLayouts,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(MapGenerator {
            config,
            failsafe: FailsafeLayouts::default(),
        })
    }

    pub fn with_failsafe_layouts(mut self, failsafe: FailsafeLayouts) -> Self {
        self.failsafe = failsafe;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Grows the main path and its forks. An error means the grid could not
    /// fit the requested layout and a failsafe layout should be used.
    pub fn generate_path(&self, rng: &mut impl Rng) -> Result<Vec<RoomPathEntry>, GenerationError> {
        PathBuilder::new(&self.config).build(rng)
    }

    /// Builds the room graph for `entries` and projects every room to tiles.
    pub fn build_rooms(&self, entries: &[RoomPathEntry]) -> RoomGraph {
        let mut graph =
            RoomGraphBuilder::new(self.config.room_width, self.config.room_height).build_rooms(entries);

        TileProjector::for_graph(&graph).project_graph(&mut graph);

        graph
    }

    /// Always produces a map. Organic generation failures are replaced by a
    /// failsafe layout, discarding whatever the failed run had placed.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedMap {
        let span = span!(Level::DEBUG, "generate_map");
        let _guard = span.enter();

        let build_start = std::time::Instant::now();

        let (source, entries) = match self.generate_path(rng) {
            Ok(entries) => (LayoutSource::Organic, entries),
            Err(error) => {
                let (source, entries) = self.failsafe.choose(rng, self.config.start_location());

                event!(
                    Level::WARN,
                    "Organic generation failed ({}), using {:?} layout of {} rooms",
                    error,
                    source,
                    entries.len()
                );

                (source, entries)
            }
        };

        let path_time = std::time::Instant::now();
        event!(
            Level::DEBUG,
            "Generated room path in {:.2}ms",
            path_time.duration_since(build_start).as_millis()
        );

        let rooms = self.build_rooms(&entries);

        event!(
            Level::DEBUG,
            "Generated {} rooms and their tiles in {:.2}ms",
            rooms.len(),
            std::time::Instant::now()
                .duration_since(path_time)
                .as_millis()
        );

        GeneratedMap {
            source,
            entries,
            rooms,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::RngHandler,
        constants::TEST_SEED,
        types::{GridCoordinate, PathBranch},
    };

    use std::collections::HashSet;

    use proptest::prelude::*;

    fn boxed_in_config() -> GeneratorConfig {
        GeneratorConfig {
            map_width: 1,
            map_height: 1,
            target_room_count: 5,
            max_retries: 0,
            max_retries_fork: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GeneratorConfig {
            target_room_count: 0,
            ..Default::default()
        };

        assert_eq!(
            MapGenerator::new(config).map(|_| ()),
            Err(ConfigError::ZeroRoomCount)
        );
    }

    #[test]
    fn test_organic_generation() {
        let generator = MapGenerator::new(GeneratorConfig::default()).expect("defaults are valid");
        let mut rng = RngHandler::seeded(TEST_SEED);

        let map = generator.generate(&mut rng);

        assert_eq!(map.source, LayoutSource::Organic);
        assert_eq!(map.rooms.len(), map.entries.len());
        assert_eq!(
            map.entries
                .iter()
                .filter(|e| e.branch == PathBranch::Main)
                .count(),
            30
        );
    }

    #[test]
    fn test_boxed_in_map_uses_builtin_failsafe() {
        let generator = MapGenerator::new(boxed_in_config()).expect("config is valid");
        let mut rng = RngHandler::seeded(TEST_SEED);

        let map = generator.generate(&mut rng);

        assert_eq!(map.source, LayoutSource::BuiltinFailsafe);
        assert_eq!(map.entries, FailsafeLayouts::builtin(GridCoordinate::new(0, 0)));
        assert_eq!(map.rooms.missing_reciprocal(), None);
    }

    #[test]
    fn test_boxed_in_map_uses_supplied_layout() {
        let layout = vec![
            RoomPathEntry::new(GridCoordinate::new(0, 0), PathBranch::Main),
            RoomPathEntry::end_of_path(
                GridCoordinate::new(0, 1),
                GridCoordinate::new(0, 0),
                PathBranch::Main,
            ),
        ];
        let layouts = FailsafeLayouts::new(vec![layout.clone()]).expect("layout is valid");

        let generator = MapGenerator::new(boxed_in_config())
            .expect("config is valid")
            .with_failsafe_layouts(layouts);
        let map = generator.generate(&mut RngHandler::seeded(TEST_SEED));

        assert_eq!(map.source, LayoutSource::Failsafe { index: 0 });
        assert_eq!(map.entries, layout);
        assert_eq!(map.rooms.len(), 2);
        assert_eq!(map.rooms.door_count(), 1);
    }

    #[test]
    fn test_unreachable_room_count_falls_back_to_failsafe() {
        let config = GeneratorConfig {
            map_width: 3,
            map_height: 3,
            target_room_count: u32::MAX,
            ..Default::default()
        };
        let generator = MapGenerator::new(config).expect("config is valid");

        let map = generator.generate(&mut RngHandler::seeded(1));

        assert!(map.source.is_failsafe());
        assert_eq!(map.entries, FailsafeLayouts::builtin(GridCoordinate::new(1, 1)));
    }

    #[test]
    fn test_generate_path_reports_failure() {
        let generator = MapGenerator::new(boxed_in_config()).expect("config is valid");

        assert!(generator.generate_path(&mut RngHandler::seeded(TEST_SEED)).is_err());
    }

    proptest! {
        #[test]
        fn prop_generated_maps_are_well_formed(seed in any::<u64>()) {
            let generator = MapGenerator::new(GeneratorConfig::default()).expect("defaults are valid");
            let map = generator.generate(&mut RngHandler::seeded(seed));

            let locations = map.rooms.iter().map(|r| r.grid_position).collect::<HashSet<_>>();
            prop_assert_eq!(locations.len(), map.rooms.len());

            prop_assert_eq!(map.rooms.missing_reciprocal(), None);
            prop_assert_eq!(map.rooms.iter().filter(|r| r.is_starting_room).count(), 1);

            for room in map.rooms.iter() {
                prop_assert_eq!(room.tiles.floor.len(), 9 * 7);
                prop_assert_eq!(room.tiles.door.len(), room.door_count());
                prop_assert!(room.door_count() >= 1);
            }

            for room in map.rooms.end_of_path_rooms() {
                let exit = room.exit_door_direction;
                prop_assert!(exit.is_some_and(|d| room.has_door(d)));
            }
        }

        #[test]
        fn prop_organic_paths_respect_bounds(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let generator = MapGenerator::new(config).expect("defaults are valid");

            if let Ok(entries) = generator.generate_path(&mut RngHandler::seeded(seed)) {
                prop_assert!(
                    entries
                        .iter()
                        .all(|e| e.location.is_within(config.map_width, config.map_height))
                );
            }
        }
    }
}
