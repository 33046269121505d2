use crate::{
    constants::{
        DEFAULT_FORK_DIRECTION_BIAS, DEFAULT_MAIN_DIRECTION_BIAS, DEFAULT_MAP_HEIGHT,
        DEFAULT_MAP_WIDTH, DEFAULT_MAX_FORK_ITERATIONS, DEFAULT_MAX_FORK_LENGTH,
        DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRIES_FORK, DEFAULT_MIN_FORK_LENGTH,
        DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, DEFAULT_STRAIGHT_RUN_THRESHOLD,
        DEFAULT_TARGET_ROOM_COUNT, MAX_ROOM_SIZE, MIN_ROOM_SIZE, PERCENT,
    },
    error::ConfigError,
    types::GridCoordinate,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // Size of the path-space grid, in rooms.
    pub map_width: u32,
    pub map_height: u32,
    // Where the main path starts. Defaults to the centre of the map.
    pub start: Option<GridCoordinate>,
    // Rooms on the main path, the starting room included.
    pub target_room_count: u32,
    // Percentage of main-path steps that follow the preferred direction.
    // The value is between 0 and 100.
    pub main_direction_bias: u32,
    // Percentage of fork steps that follow the fork's perpendicular direction.
    pub fork_direction_bias: u32,
    // Fork lengths are drawn from [min_fork_length, max_fork_length).
    pub min_fork_length: u32,
    pub max_fork_length: u32,
    // Consecutive steps along one axis after which a fork is grown.
    pub straight_run_threshold: u32,
    // Consecutive missed steps tolerated before scanning every direction
    // for a free neighbour.
    pub max_retries: u32,
    pub max_retries_fork: u32,
    // Iterations a single fork may take before the run is declared failed.
    pub max_fork_iterations: u32,
    // Size of a room, in tiles.
    pub room_width: i32,
    pub room_height: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            start: None,
            target_room_count: DEFAULT_TARGET_ROOM_COUNT,
            main_direction_bias: DEFAULT_MAIN_DIRECTION_BIAS,
            fork_direction_bias: DEFAULT_FORK_DIRECTION_BIAS,
            min_fork_length: DEFAULT_MIN_FORK_LENGTH,
            max_fork_length: DEFAULT_MAX_FORK_LENGTH,
            straight_run_threshold: DEFAULT_STRAIGHT_RUN_THRESHOLD,
            max_retries: DEFAULT_MAX_RETRIES,
            max_retries_fork: DEFAULT_MAX_RETRIES_FORK,
            max_fork_iterations: DEFAULT_MAX_FORK_ITERATIONS,
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
        }
    }
}

impl GeneratorConfig {
    pub fn start_location(&self) -> GridCoordinate {
        self.start.unwrap_or(GridCoordinate::new(
            (self.map_width / 2) as i32,
            (self.map_height / 2) as i32,
        ))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::ZeroMapDimension {
                width: self.map_width,
                height: self.map_height,
            });
        }

        if self.room_width < MIN_ROOM_SIZE || self.room_height < MIN_ROOM_SIZE {
            return Err(ConfigError::RoomTooSmall {
                width: self.room_width,
                height: self.room_height,
            });
        }

        if self.room_width > MAX_ROOM_SIZE || self.room_height > MAX_ROOM_SIZE {
            return Err(ConfigError::RoomTooLarge {
                width: self.room_width,
                height: self.room_height,
                max: MAX_ROOM_SIZE,
            });
        }

        // Every world tile of every room on the map must fit in an i32
        let world_width = i64::from(self.map_width) * i64::from(self.room_width);
        let world_height = i64::from(self.map_height) * i64::from(self.room_height);
        if world_width > i64::from(i32::MAX) || world_height > i64::from(i32::MAX) {
            return Err(ConfigError::WorldTooLarge {
                width: self.map_width,
                height: self.map_height,
                room_width: self.room_width,
                room_height: self.room_height,
            });
        }

        let start = self.start_location();
        if !start.is_within(self.map_width, self.map_height) {
            return Err(ConfigError::StartOutOfBounds {
                start,
                width: self.map_width,
                height: self.map_height,
            });
        }

        if self.target_room_count == 0 {
            return Err(ConfigError::ZeroRoomCount);
        }

        if self.main_direction_bias > PERCENT {
            return Err(ConfigError::BiasOutOfRange {
                name: "main direction bias",
                value: self.main_direction_bias,
            });
        }

        if self.fork_direction_bias > PERCENT {
            return Err(ConfigError::BiasOutOfRange {
                name: "fork direction bias",
                value: self.fork_direction_bias,
            });
        }

        if self.min_fork_length == 0 || self.min_fork_length >= self.max_fork_length {
            return Err(ConfigError::InvalidForkLength {
                min: self.min_fork_length,
                max: self.max_fork_length,
            });
        }

        if self.straight_run_threshold == 0 {
            return Err(ConfigError::ZeroStraightRunThreshold);
        }

        Ok(())
    }
}
