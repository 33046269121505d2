use crate::{
    constants::{DIRECTIONS, MAX_PREALLOCATED_ROOMS, PERCENT},
    error::GenerationError,
    types::{Direction, GridCoordinate, PathBranch, RoomPathEntry},
};

use std::collections::HashSet;

use rand::Rng;
use tracing::event;

mod builder_config;
mod failsafe;
mod fork_path;
mod main_path;

pub use builder_config::GeneratorConfig;
pub use failsafe::FailsafeLayouts;

/// Grows the main path and its forks over one shared occupancy set.
pub(crate) struct PathBuilder<'a> {
    config: &'a GeneratorConfig,
    occupied: HashSet<GridCoordinate>,
    entries: Vec<RoomPathEntry>,
    fork_count: usize,
}

// Progress of a single random walk over the grid.
struct Walk {
    branch: PathBranch,
    current: GridCoordinate,
    previous: GridCoordinate,
    // Index in the entry list of the last room this walk placed.
    last_index: Option<usize>,
    misses: u32,
    max_retries: u32,
}

impl Walk {
    fn new(branch: PathBranch, origin: GridCoordinate, max_retries: u32) -> Self {
        Walk {
            branch,
            current: origin,
            previous: origin,
            last_index: None,
            misses: 0,
            max_retries,
        }
    }
}

enum Step {
    Placed(Direction),
    Missed,
}

impl<'a> PathBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        // A walk can never place more rooms than the map has cells
        let cells = (config.map_width as usize).saturating_mul(config.map_height as usize);
        let capacity = (config.target_room_count as usize)
            .saturating_mul(2)
            .min(cells)
            .min(MAX_PREALLOCATED_ROOMS);

        PathBuilder {
            config,
            occupied: HashSet::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
            fork_count: 0,
        }
    }

    pub fn build(mut self, rng: &mut impl Rng) -> Result<Vec<RoomPathEntry>, GenerationError> {
        self.generate_main_path(rng)?;

        event!(
            tracing::Level::DEBUG,
            "Built path of {} rooms with {} forks",
            self.entries.len(),
            self.fork_count
        );

        Ok(self.entries)
    }

    fn place(&mut self, walk: &mut Walk, location: GridCoordinate, direction: Direction) -> Step {
        self.occupied.insert(location);
        self.entries.push(RoomPathEntry::new(location, walk.branch));

        walk.last_index = Some(self.entries.len() - 1);
        walk.previous = walk.current;
        walk.current = location;
        walk.misses = 0;

        Step::Placed(direction)
    }

    // Tries to move one room towards `direction`. Runs into occupied rooms
    // count as misses, and once a walk has missed `max_retries` times in a
    // row every direction is scanned for a free neighbour instead.
    fn step(&mut self, walk: &mut Walk, direction: Direction) -> Result<Step, GenerationError> {
        let (width, height) = (self.config.map_width, self.config.map_height);

        let candidate = walk.current.offset_by(direction).clamped_to(width, height);
        if !self.occupied.contains(&candidate) {
            return Ok(self.place(walk, candidate, direction));
        }

        walk.misses += 1;
        if walk.misses < walk.max_retries {
            return Ok(Step::Missed);
        }

        let fallback = DIRECTIONS.iter().copied().find(|d| {
            let neighbour = walk.current.offset_by(*d);
            neighbour.is_within(width, height) && !self.occupied.contains(&neighbour)
        });

        match fallback {
            Some(fallback_direction) => {
                event!(
                    tracing::Level::DEBUG,
                    "Falling back to {} from {} after {} misses on the {} path",
                    fallback_direction,
                    walk.current,
                    walk.misses,
                    walk.branch
                );

                let location = walk.current.offset_by(fallback_direction);
                Ok(self.place(walk, location, fallback_direction))
            }
            None => Err(GenerationError::Exhausted {
                location: walk.current,
                branch: walk.branch,
            }),
        }
    }

    // Re-appends the last room of the walk as the end of its path, pointing
    // its door back at the room it was reached from.
    fn mark_end_of_path(&mut self, walk: &Walk) {
        let Some(index) = walk.last_index else {
            return;
        };

        let last = self.entries.remove(index);

        self.entries.push(RoomPathEntry::end_of_path(
            last.location,
            walk.previous,
            walk.branch,
        ));
    }
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    DIRECTIONS[rng.random_range(0..DIRECTIONS.len())]
}

// `bias` percent of the time the walk keeps to `preferred`, otherwise any
// of the four directions is picked.
fn biased_direction(rng: &mut impl Rng, preferred: Direction, bias: u32) -> Direction {
    if rng.random_range(0..PERCENT) < bias {
        preferred
    } else {
        random_direction(rng)
    }
}
