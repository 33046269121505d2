use crate::{
    constants::DIRECTIONS,
    types::{Direction, Room, RoomGraph, RoomPathEntry},
};

use tracing::event;

/// Turns an ordered room path into rooms joined by reciprocal doors.
pub(crate) struct RoomGraphBuilder {
    room_width: i32,
    room_height: i32,
}

impl RoomGraphBuilder {
    pub fn new(room_width: i32, room_height: i32) -> Self {
        RoomGraphBuilder {
            room_width,
            room_height,
        }
    }

    pub fn build_rooms(&self, entries: &[RoomPathEntry]) -> RoomGraph {
        let mut graph = RoomGraph::new(self.room_width, self.room_height);

        for (i, entry) in entries.iter().enumerate() {
            match graph.get_mut(&entry.location) {
                Some(room) => {
                    room.is_end_of_path_room |= entry.is_end_of_path;
                }
                None => {
                    let mut room = Room::new(
                        entry.location,
                        entry
                            .location
                            .stretched_by(self.room_width, self.room_height),
                        i == 0,
                        entry.branch,
                    );
                    room.is_end_of_path_room = entry.is_end_of_path;

                    graph.insert_room(room);
                }
            }
        }

        for entry in entries.iter().filter(|e| e.is_end_of_path) {
            Self::connect_end_of_path(&mut graph, entry);
        }

        let locations = graph
            .iter()
            .filter(|room| !room.is_end_of_path_room)
            .map(|room| room.grid_position)
            .collect::<Vec<_>>();

        for location in locations {
            for direction in DIRECTIONS {
                if graph.contains(&location.offset_by(direction)) {
                    graph.connect(location, direction);
                }
            }
        }

        event!(
            tracing::Level::DEBUG,
            "Built {} rooms joined by {} doors",
            graph.len(),
            graph.door_count()
        );

        graph
    }

    // The last room of a path gets its door from the recorded previous
    // direction, so the dead end always opens towards the room it was
    // reached from.
    fn connect_end_of_path(graph: &mut RoomGraph, entry: &RoomPathEntry) {
        if entry.previous_direction == Direction::None {
            return;
        }

        if !graph.connect(entry.location, entry.previous_direction) {
            event!(
                tracing::Level::WARN,
                "End of path {} points {} at {}, where there is no room",
                entry.location,
                entry.previous_direction,
                entry.previous_location
            );
            return;
        }

        if let Some(room) = graph.get_mut(&entry.location) {
            room.exit_door_direction = Some(entry.previous_direction);
        }
    }
}
