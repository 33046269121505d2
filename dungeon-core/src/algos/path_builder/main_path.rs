use super::{PathBuilder, Step, Walk, biased_direction, random_direction};
use crate::{
    error::GenerationError,
    types::{Direction, PathBranch, RoomPathEntry},
};

use rand::Rng;
use tracing::event;

impl PathBuilder<'_> {
    pub(super) fn generate_main_path(&mut self, rng: &mut impl Rng) -> Result<(), GenerationError> {
        let config = self.config;
        let start = config.start_location();

        self.occupied.insert(start);
        self.entries.push(RoomPathEntry::new(start, PathBranch::Main));

        let mut walk = Walk::new(PathBranch::Main, start, config.max_retries);
        walk.last_index = Some(0);

        let preferred_direction = random_direction(rng);

        // The first step always heads in the preferred direction
        let mut heading = preferred_direction;

        let mut placed = 1;
        let mut iterations = 0_u32;
        let mut straight_run = StraightRun::default();

        // Missed steps do not count towards the room total, so the loop
        // runs until the target is met or the walk is boxed in.
        while placed < config.target_room_count {
            iterations += 1;

            if let Step::Placed(direction) = self.step(&mut walk, heading)? {
                placed += 1;

                if straight_run.record(direction, config.straight_run_threshold) {
                    // Grown from the room just placed, which is already
                    // occupied, so the fork cannot start on a main-path room
                    self.generate_fork(walk.current, preferred_direction, rng)?;
                }
            }

            heading = biased_direction(rng, preferred_direction, config.main_direction_bias);
        }

        self.mark_end_of_path(&walk);

        event!(
            tracing::Level::DEBUG,
            "Main path heading {} placed {} rooms in {} iterations",
            preferred_direction,
            placed,
            iterations
        );

        Ok(())
    }
}

// Consecutive placed steps along each axis.
#[derive(Debug, Default)]
struct StraightRun {
    count_x: u32,
    count_y: u32,
}

impl StraightRun {
    // Returns `true` once either axis reaches `threshold`, starting both
    // counts over.
    fn record(&mut self, direction: Direction, threshold: u32) -> bool {
        if direction.is_horizontal() {
            self.count_x += 1;
            self.count_y = 0;
        } else {
            self.count_y += 1;
            self.count_x = 0;
        }

        if self.count_x >= threshold || self.count_y >= threshold {
            *self = StraightRun::default();
            return true;
        }

        false
    }
}
