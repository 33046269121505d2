use crate::{
    constants::{BUILTIN_FORK_ORIGIN, BUILTIN_FORK_PATH, BUILTIN_MAIN_PATH, DIRECTIONS},
    error::ConfigError,
    types::{Direction, GridCoordinate, LayoutSource, PathBranch, RoomPathEntry},
};

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

/// Precomputed room paths handed out when organic generation gives up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailsafeLayouts {
    layouts: Vec<Vec<RoomPathEntry>>,
}

impl FailsafeLayouts {
    pub fn new(layouts: Vec<Vec<RoomPathEntry>>) -> Result<Self, ConfigError> {
        for (index, layout) in layouts.iter().enumerate() {
            Self::validate_layout(index, layout)?;
        }

        Ok(FailsafeLayouts { layouts })
    }

    pub fn push(&mut self, layout: Vec<RoomPathEntry>) -> Result<(), ConfigError> {
        Self::validate_layout(self.layouts.len(), &layout)?;
        self.layouts.push(layout);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[RoomPathEntry]> {
        self.layouts.iter().map(Vec::as_slice)
    }

    /// Picks one of the layouts uniformly, or the built-in one placed at
    /// `start` when the library is empty.
    pub fn choose(
        &self,
        rng: &mut impl Rng,
        start: GridCoordinate,
    ) -> (LayoutSource, Vec<RoomPathEntry>) {
        if self.layouts.is_empty() {
            return (LayoutSource::BuiltinFailsafe, Self::builtin(start));
        }

        let index = rng.random_range(0..self.layouts.len());
        (LayoutSource::Failsafe { index }, self.layouts[index].clone())
    }

    pub fn builtin(start: GridCoordinate) -> Vec<RoomPathEntry> {
        let at = |offset: (i32, i32)| start + GridCoordinate::from(offset);

        let mut layout = Vec::with_capacity(BUILTIN_MAIN_PATH.len() + BUILTIN_FORK_PATH.len());

        let (main_rooms, main_end) = BUILTIN_MAIN_PATH.split_at(BUILTIN_MAIN_PATH.len() - 1);
        for &offset in main_rooms {
            layout.push(RoomPathEntry::new(at(offset), PathBranch::Main));
        }

        let fork = PathBranch::Fork(0);
        let mut previous = at(BUILTIN_FORK_ORIGIN);
        for (i, &offset) in BUILTIN_FORK_PATH.iter().enumerate() {
            let location = at(offset);

            if i + 1 == BUILTIN_FORK_PATH.len() {
                layout.push(RoomPathEntry::end_of_path(location, previous, fork));
            } else {
                layout.push(RoomPathEntry::new(location, fork));
            }

            previous = location;
        }

        let main_previous = main_rooms.last().map(|&o| at(o)).unwrap_or(start);
        layout.push(RoomPathEntry::end_of_path(
            at(main_end[0]),
            main_previous,
            PathBranch::Main,
        ));

        layout
    }

    fn validate_layout(index: usize, layout: &[RoomPathEntry]) -> Result<(), ConfigError> {
        if layout.is_empty() {
            return Err(ConfigError::EmptyLayout { index });
        }

        let mut locations = HashSet::with_capacity(layout.len());
        for entry in layout {
            if !locations.insert(entry.location) {
                return Err(ConfigError::DuplicateLocation {
                    index,
                    location: entry.location,
                });
            }
        }

        for entry in layout.iter().filter(|e| e.is_end_of_path) {
            // A path made of a single room ends where it starts
            let lone_room = entry.previous_direction == Direction::None
                && entry.previous_location == entry.location;

            let linked = entry.previous_direction != Direction::None
                && Direction::between(entry.location, entry.previous_location)
                    == entry.previous_direction
                && locations.contains(&entry.previous_location);

            if !lone_room && !linked {
                return Err(ConfigError::InvalidEndOfPath {
                    index,
                    location: entry.location,
                });
            }
        }

        // Every branch, in order of first appearance, ends exactly once
        let mut ends = Vec::<(PathBranch, usize)>::new();
        for entry in layout {
            match ends.iter_mut().find(|(branch, _)| *branch == entry.branch) {
                Some((_, count)) => *count += usize::from(entry.is_end_of_path),
                None => ends.push((entry.branch, usize::from(entry.is_end_of_path))),
            }
        }
        if let Some(&(branch, count)) = ends.iter().find(|(_, count)| *count != 1) {
            return Err(ConfigError::BranchEnds {
                index,
                branch,
                ends: count,
            });
        }

        if let Some(location) = Self::first_unreachable(layout, &locations) {
            return Err(ConfigError::DisconnectedRoom { index, location });
        }

        Ok(())
    }

    // Flood fills from the first room over side-by-side rooms.
    fn first_unreachable(
        layout: &[RoomPathEntry],
        locations: &HashSet<GridCoordinate>,
    ) -> Option<GridCoordinate> {
        let first = layout.first()?.location;

        let mut reached = HashSet::with_capacity(layout.len());
        reached.insert(first);
        let mut frontier = vec![first];

        while let Some(location) = frontier.pop() {
            for direction in DIRECTIONS {
                let neighbour = location.offset_by(direction);

                if locations.contains(&neighbour) && reached.insert(neighbour) {
                    frontier.push(neighbour);
                }
            }
        }

        layout
            .iter()
            .map(|entry| entry.location)
            .find(|location| !reached.contains(location))
    }
}
