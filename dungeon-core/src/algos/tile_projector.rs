use crate::{
    constants::DIRECTIONS,
    types::{Direction, GridCoordinate, Room, RoomGraph, RoomTiles},
};

use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// What a single tile of a room is, as far as a renderer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileKind {
    Floor,
    // The side of the room the wall or door sits on.
    Wall(Direction),
    Corner(Corner),
    Door(Direction),
}

/// Projects rooms of a fixed size onto world-tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProjector {
    room_width: i32,
    room_height: i32,
}

impl TileProjector {
    pub fn new(room_width: i32, room_height: i32) -> Self {
        TileProjector {
            room_width,
            room_height,
        }
    }

    pub fn for_graph(graph: &RoomGraph) -> Self {
        Self::new(graph.room_width(), graph.room_height())
    }

    /// Floor, wall and door tiles of `room`, in world-tile coordinates.
    pub fn compute_tiles(&self, room: &Room) -> RoomTiles {
        let (width, height) = (self.room_width, self.room_height);
        let origin = room.world_position;

        let door_cells = self.door_cells(room).collect::<Vec<_>>();

        let floor = (1..height - 1)
            .flat_map(|y| (1..width - 1).map(move |x| GridCoordinate::new(x, y)))
            .map(|local| origin + local)
            .collect::<Vec<_>>();

        let wall = (0..height)
            .flat_map(|y| (0..width).map(move |x| GridCoordinate::new(x, y)))
            .filter(|local| self.is_border(*local) && !door_cells.contains(local))
            .map(|local| origin + local)
            .collect::<Vec<_>>();

        let door = door_cells.iter().map(|&local| origin + local).collect();

        RoomTiles { floor, wall, door }
    }

    /// The four corner tiles of `room`. They are always wall tiles.
    pub fn corner_tiles(&self, room: &Room) -> [GridCoordinate; 4] {
        let (max_x, max_y) = (self.room_width - 1, self.room_height - 1);
        let origin = room.world_position;

        [
            origin + GridCoordinate::new(0, max_y),
            origin + GridCoordinate::new(max_x, max_y),
            origin,
            origin + GridCoordinate::new(max_x, 0),
        ]
    }

    // Room-local cell of the door on `direction`'s side, at the midpoint of
    // that border.
    pub fn door_cell(&self, direction: Direction) -> Option<GridCoordinate> {
        let (width, height) = (self.room_width, self.room_height);

        match direction {
            Direction::North => Some(GridCoordinate::new(width / 2, height - 1)),
            Direction::East => Some(GridCoordinate::new(width - 1, height / 2)),
            Direction::South => Some(GridCoordinate::new(width / 2, 0)),
            Direction::West => Some(GridCoordinate::new(0, height / 2)),
            Direction::None => None,
        }
    }

    /// Classifies a world tile of `room`, `None` if it lies outside it.
    pub fn classify(&self, room: &Room, tile: GridCoordinate) -> Option<TileKind> {
        let local = tile - room.world_position;
        let (max_x, max_y) = (self.room_width - 1, self.room_height - 1);

        if local.x < 0 || local.y < 0 || local.x > max_x || local.y > max_y {
            return None;
        }

        if let Some(direction) = DIRECTIONS
            .iter()
            .copied()
            .find(|&d| room.has_door(d) && self.door_cell(d) == Some(local))
        {
            return Some(TileKind::Door(direction));
        }

        let kind = match (local.x, local.y) {
            (0, y) if y == max_y => TileKind::Corner(Corner::NorthWest),
            (x, y) if x == max_x && y == max_y => TileKind::Corner(Corner::NorthEast),
            (0, 0) => TileKind::Corner(Corner::SouthWest),
            (x, 0) if x == max_x => TileKind::Corner(Corner::SouthEast),
            (_, y) if y == max_y => TileKind::Wall(Direction::North),
            (x, _) if x == max_x => TileKind::Wall(Direction::East),
            (_, 0) => TileKind::Wall(Direction::South),
            (0, _) => TileKind::Wall(Direction::West),
            _ => TileKind::Floor,
        };

        Some(kind)
    }

    /// Recomputes the tiles of every room in the graph.
    pub fn project_graph(&self, graph: &mut RoomGraph) {
        graph
            .rooms_mut()
            .par_iter_mut()
            .for_each(|room| room.tiles = self.compute_tiles(room));
    }

    fn door_cells<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = GridCoordinate> + 'a {
        DIRECTIONS
            .iter()
            .filter(|&&d| room.has_door(d))
            .filter_map(|&d| self.door_cell(d))
    }

    fn is_border(&self, local: GridCoordinate) -> bool {
        local.x == 0
            || local.y == 0
            || local.x == self.room_width - 1
            || local.y == self.room_height - 1
    }
}
