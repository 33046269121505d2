use crate::types::{GridCoordinate, PathBranch};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("map dimensions must be greater than zero, got [{width}x{height}]")]
    ZeroMapDimension { width: u32, height: u32 },
    #[error("start location {start} lies outside the [{width}x{height}] map")]
    StartOutOfBounds {
        start: GridCoordinate,
        width: u32,
        height: u32,
    },
    #[error("target room count must be at least one")]
    ZeroRoomCount,
    #[error("{name} must be a percentage between 0 and 100, got {value}")]
    BiasOutOfRange { name: &'static str, value: u32 },
    #[error("fork length range [{min}, {max}) is empty or starts at zero")]
    InvalidForkLength { min: u32, max: u32 },
    #[error("straight run threshold must be at least one")]
    ZeroStraightRunThreshold,
    #[error("rooms must be at least 3x3 tiles, got [{width}x{height}]")]
    RoomTooSmall { width: i32, height: i32 },
    #[error("rooms must be at most {max}x{max} tiles, got [{width}x{height}]")]
    RoomTooLarge { width: i32, height: i32, max: i32 },
    #[error("a [{width}x{height}] map of [{room_width}x{room_height}] rooms does not fit in world coordinates")]
    WorldTooLarge {
        width: u32,
        height: u32,
        room_width: i32,
        room_height: i32,
    },
    #[error("failsafe layout {index} is empty")]
    EmptyLayout { index: usize },
    #[error("failsafe layout {index} visits {location} more than once")]
    DuplicateLocation {
        index: usize,
        location: GridCoordinate,
    },
    #[error("failsafe layout {index} ends a path at {location} without a neighbouring previous room")]
    InvalidEndOfPath {
        index: usize,
        location: GridCoordinate,
    },
    #[error("failsafe layout {index} has {ends} ends on the {branch} path, expected one")]
    BranchEnds {
        index: usize,
        branch: PathBranch,
        ends: usize,
    },
    #[error("failsafe layout {index} cannot reach {location} from its first room")]
    DisconnectedRoom {
        index: usize,
        location: GridCoordinate,
    },
}

/// Organic generation gave up; callers substitute a failsafe layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no free neighbour left around {location} while growing the {branch} path")]
    Exhausted {
        location: GridCoordinate,
        branch: PathBranch,
    },
    #[error("fork from {origin} did not complete within {iterations} iterations")]
    ForkIterationsExceeded {
        origin: GridCoordinate,
        iterations: u32,
    },
}
