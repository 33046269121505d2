use crate::types::Direction;

pub(crate) const DEFAULT_MAP_WIDTH: u32 = 40;
pub(crate) const DEFAULT_MAP_HEIGHT: u32 = 40;
pub(crate) const DEFAULT_TARGET_ROOM_COUNT: u32 = 30;

pub(crate) const DEFAULT_MAIN_DIRECTION_BIAS: u32 = 60;
pub(crate) const DEFAULT_FORK_DIRECTION_BIAS: u32 = 30;

pub(crate) const DEFAULT_MIN_FORK_LENGTH: u32 = 2;
pub(crate) const DEFAULT_MAX_FORK_LENGTH: u32 = 6;
pub(crate) const DEFAULT_STRAIGHT_RUN_THRESHOLD: u32 = 3;

pub(crate) const DEFAULT_MAX_RETRIES: u32 = 5;
pub(crate) const DEFAULT_MAX_RETRIES_FORK: u32 = 3;
pub(crate) const DEFAULT_MAX_FORK_ITERATIONS: u32 = 30;

pub(crate) const DEFAULT_ROOM_WIDTH: i32 = 11;
pub(crate) const DEFAULT_ROOM_HEIGHT: i32 = 9;
pub(crate) const MIN_ROOM_SIZE: i32 = 3;
pub(crate) const MAX_ROOM_SIZE: i32 = 256;

// Upper bound on the path storage reserved before a walk starts.
pub(crate) const MAX_PREALLOCATED_ROOMS: usize = 4096;

pub(crate) const PERCENT: u32 = 100;

// Scan order used whenever every direction has to be tried in turn.
pub(crate) const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

// Offsets from the start location of the layout used when no failsafe
// layouts were supplied. The fork branches off the third main-path room.
pub(crate) const BUILTIN_MAIN_PATH: [(i32, i32); 6] = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (3, 2)];
pub(crate) const BUILTIN_FORK_ORIGIN: (i32, i32) = (2, 0);
pub(crate) const BUILTIN_FORK_PATH: [(i32, i32); 2] = [(2, -1), (2, -2)];

#[cfg(test)]
pub(crate) const TEST_SEED: u64 = 0x5EED_D00D;
