use super::{PathBuilder, Step, Walk, biased_direction};
use crate::{
    error::GenerationError,
    types::{Direction, GridCoordinate, PathBranch},
};

use rand::Rng;
use tracing::event;

impl PathBuilder<'_> {
    /// Grows a side branch from `origin`, heading at a right angle to
    /// `main_direction`. Appends to the same entries as the main path.
    pub(super) fn generate_fork(
        &mut self,
        origin: GridCoordinate,
        main_direction: Direction,
        rng: &mut impl Rng,
    ) -> Result<(), GenerationError> {
        let config = self.config;

        let perpendicular_direction = main_direction.perpendicular()[rng.random_range(0..2)];
        let fork_length = rng.random_range(config.min_fork_length..config.max_fork_length);

        let branch = PathBranch::Fork(self.fork_count);
        self.fork_count += 1;

        let mut walk = Walk::new(branch, origin, config.max_retries_fork);

        // Starting off perpendicular keeps the first room off the main path
        let mut heading = perpendicular_direction;

        let mut placed = 0;
        let mut iterations = 0;

        while placed < fork_length {
            if iterations >= config.max_fork_iterations {
                return Err(GenerationError::ForkIterationsExceeded { origin, iterations });
            }
            iterations += 1;

            if let Step::Placed(_) = self.step(&mut walk, heading)? {
                placed += 1;
            }

            heading = biased_direction(rng, perpendicular_direction, config.fork_direction_bias);
        }

        self.mark_end_of_path(&walk);

        event!(
            tracing::Level::DEBUG,
            "Grew {} of {} rooms from {} heading {}",
            branch,
            placed,
            origin,
            perpendicular_direction
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::{GeneratorConfig, RngHandler},
        constants::TEST_SEED,
    };

    fn builder_at(config: &GeneratorConfig, origin: GridCoordinate) -> PathBuilder<'_> {
        let mut builder = PathBuilder::new(config);
        builder.occupied.insert(origin);
        builder
    }

    #[test]
    fn test_fork_length_within_bounds() {
        let config = GeneratorConfig::default();
        let origin = GridCoordinate::new(20, 20);

        for seed in 0..30 {
            let mut builder = builder_at(&config, origin);
            let mut rng = RngHandler::seeded(seed);

            builder
                .generate_fork(origin, Direction::North, &mut rng)
                .expect("an empty map never boxes a fork in");

            let length = builder.entries.len() as u32;
            assert!(length >= config.min_fork_length);
            assert!(length < config.max_fork_length);
            assert!(builder.entries.iter().all(|e| e.branch == PathBranch::Fork(0)));
        }
    }

    #[test]
    fn test_fork_first_room_is_perpendicular() {
        let config = GeneratorConfig::default();
        let origin = GridCoordinate::new(20, 20);
        let mut builder = builder_at(&config, origin);
        let mut rng = RngHandler::seeded(TEST_SEED);

        builder
            .generate_fork(origin, Direction::East, &mut rng)
            .expect("an empty map never boxes a fork in");

        let first = builder.entries[0].location;
        assert!(
            first == GridCoordinate::new(20, 21) || first == GridCoordinate::new(20, 19),
            "first fork room {} is not above or below the origin",
            first
        );
    }

    #[test]
    fn test_fork_ends_with_marked_entry() {
        let config = GeneratorConfig::default();
        let origin = GridCoordinate::new(5, 5);
        let mut builder = builder_at(&config, origin);
        let mut rng = RngHandler::seeded(TEST_SEED);

        builder
            .generate_fork(origin, Direction::South, &mut rng)
            .expect("an empty map never boxes a fork in");

        let (last, rest) = builder
            .entries
            .split_last()
            .expect("forks place at least one room");

        assert!(last.is_end_of_path);
        assert!(rest.iter().all(|e| !e.is_end_of_path));
        assert_eq!(
            last.location.offset_by(last.previous_direction),
            last.previous_location
        );
    }

    #[test]
    fn test_fork_counter_numbers_branches() {
        let config = GeneratorConfig::default();
        let origin = GridCoordinate::new(20, 20);
        let mut builder = builder_at(&config, origin);
        let mut rng = RngHandler::seeded(TEST_SEED);

        builder
            .generate_fork(origin, Direction::North, &mut rng)
            .expect("an empty map never boxes a fork in");
        builder
            .generate_fork(origin, Direction::North, &mut rng)
            .expect("an empty map never boxes a fork in");

        assert_eq!(builder.fork_count, 2);
        assert!(
            builder
                .entries
                .iter()
                .any(|e| e.branch == PathBranch::Fork(1) && e.is_end_of_path)
        );
    }

    #[test]
    fn test_fork_iteration_cap() {
        let config = GeneratorConfig {
            max_fork_iterations: 1,
            min_fork_length: 2,
            max_fork_length: 3,
            ..Default::default()
        };
        let origin = GridCoordinate::new(20, 20);
        let mut builder = builder_at(&config, origin);
        let mut rng = RngHandler::seeded(TEST_SEED);

        let result = builder.generate_fork(origin, Direction::North, &mut rng);

        assert_eq!(
            result,
            Err(GenerationError::ForkIterationsExceeded {
                origin,
                iterations: 1,
            })
        );
    }

    #[test]
    fn test_boxed_in_fork_fails() {
        let config = GeneratorConfig {
            max_retries_fork: 0,
            ..Default::default()
        };
        let origin = GridCoordinate::new(10, 10);
        let mut builder = builder_at(&config, origin);
        for direction in crate::constants::DIRECTIONS {
            builder.occupied.insert(origin.offset_by(direction));
        }
        let mut rng = RngHandler::seeded(TEST_SEED);

        let result = builder.generate_fork(origin, Direction::West, &mut rng);

        assert_eq!(
            result,
            Err(GenerationError::Exhausted {
                location: origin,
                branch: PathBranch::Fork(0),
            })
        );
    }
}
