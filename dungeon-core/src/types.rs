use crate::constants::DIRECTIONS;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const ZERO: GridCoordinate = GridCoordinate::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        GridCoordinate { x, y }
    }

    pub fn offset_by(&self, direction: Direction) -> GridCoordinate {
        *self + direction.offset()
    }

    pub fn stretched_by(&self, width: i32, height: i32) -> GridCoordinate {
        GridCoordinate {
            x: self.x.saturating_mul(width),
            y: self.y.saturating_mul(height),
        }
    }

    // Moving against the edge of the map leaves the coordinate where it was.
    pub fn clamped_to(&self, width: u32, height: u32) -> GridCoordinate {
        GridCoordinate {
            x: self.x.clamp(0, width as i32 - 1),
            y: self.y.clamp(0, height as i32 - 1),
        }
    }

    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width as i32 && self.y < height as i32
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x - other.x, self.y - other.y)
    }
}

impl Display for GridCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((x, y): (i32, i32)) -> Self {
        GridCoordinate { x, y }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    None,
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::None => Direction::None,
        }
    }

    pub fn offset(&self) -> GridCoordinate {
        match self {
            Direction::North => GridCoordinate::new(0, 1),
            Direction::East => GridCoordinate::new(1, 0),
            Direction::South => GridCoordinate::new(0, -1),
            Direction::West => GridCoordinate::new(-1, 0),
            Direction::None => GridCoordinate::ZERO,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// The two directions at a right angle to `self`.
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::West, Direction::East],
            Direction::East | Direction::West => [Direction::North, Direction::South],
            Direction::None => [Direction::None, Direction::None],
        }
    }

    /// Direction of the door in `current` that leads back to `previous`.
    ///
    /// Only axis-aligned neighbours have one, anything else maps to
    /// [`Direction::None`].
    pub fn between(current: GridCoordinate, previous: GridCoordinate) -> Direction {
        let delta = previous - current;

        DIRECTIONS
            .iter()
            .copied()
            .find(|direction| direction.offset() == delta)
            .unwrap_or(Direction::None)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::None => write!(f, "none"),
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Which random walk produced a path entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathBranch {
    #[default]
    Main,
    Fork(usize),
}

impl Display for PathBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathBranch::Main => write!(f, "main"),
            PathBranch::Fork(n) => write!(f, "fork #{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomPathEntry {
    pub location: GridCoordinate,
    pub is_end_of_path: bool,
    // Both only carry meaning on the entry that ends its path.
    pub previous_location: GridCoordinate,
    pub previous_direction: Direction,
    #[serde(default)]
    pub branch: PathBranch,
}

impl RoomPathEntry {
    pub fn new(location: GridCoordinate, branch: PathBranch) -> Self {
        RoomPathEntry {
            location,
            is_end_of_path: false,
            previous_location: location,
            previous_direction: Direction::None,
            branch,
        }
    }

    pub fn end_of_path(
        location: GridCoordinate,
        previous_location: GridCoordinate,
        branch: PathBranch,
    ) -> Self {
        RoomPathEntry {
            location,
            is_end_of_path: true,
            previous_location,
            previous_direction: Direction::between(location, previous_location),
            branch,
        }
    }
}

/// Where the room path of a generated map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutSource {
    Organic,
    Failsafe { index: usize },
    BuiltinFailsafe,
}

impl LayoutSource {
    pub fn is_failsafe(&self) -> bool {
        !matches!(self, LayoutSource::Organic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Door {
    // Path-space location of the room on the other side.
    pub to: GridCoordinate,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomTiles {
    pub floor: Vec<GridCoordinate>,
    pub wall: Vec<GridCoordinate>,
    pub door: Vec<GridCoordinate>,
}

impl RoomTiles {
    pub fn is_empty(&self) -> bool {
        self.floor.is_empty() && self.wall.is_empty() && self.door.is_empty()
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &GridCoordinate> {
        self.floor.iter().chain(self.wall.iter()).chain(self.door.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub grid_position: GridCoordinate,
    pub world_position: GridCoordinate,
    pub is_starting_room: bool,
    pub is_end_of_path_room: bool,
    pub branch: PathBranch,
    pub exit_door_direction: Option<Direction>,
    doors: Vec<Door>,
    pub tiles: RoomTiles,
}

impl Room {
    pub fn new(
        grid_position: GridCoordinate,
        world_position: GridCoordinate,
        is_starting_room: bool,
        branch: PathBranch,
    ) -> Self {
        Room {
            grid_position,
            world_position,
            is_starting_room,
            is_end_of_path_room: false,
            branch,
            exit_door_direction: None,
            doors: Vec::with_capacity(4),
            tiles: RoomTiles::default(),
        }
    }

    /// Records a door, returns `false` if the room already had it.
    pub fn add_door(&mut self, to: GridCoordinate, direction: Direction) -> bool {
        if direction == Direction::None || self.has_door(direction) {
            return false;
        }

        self.doors.push(Door { to, direction });
        true
    }

    pub fn has_door(&self, direction: Direction) -> bool {
        self.doors.iter().any(|door| door.direction == direction)
    }

    pub fn door_direction(&self, to: GridCoordinate) -> Option<Direction> {
        self.doors
            .iter()
            .find(|door| door.to == to)
            .map(|door| door.direction)
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn has_one_door(&self) -> bool {
        self.doors.len() == 1
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}", self.grid_position, self.branch)?;

        if self.is_starting_room {
            write!(f, " start")?;
        }
        if self.is_end_of_path_room {
            write!(f, " end")?;
        }

        for door in self.doors.iter() {
            write!(f, " {}", door.direction)?;
        }

        write!(f, "]")
    }
}

/// The rooms of one generation run, in path discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomGraph {
    room_width: i32,
    room_height: i32,
    rooms: Vec<Room>,
    #[serde(skip)]
    index: HashMap<GridCoordinate, usize>,
}

impl RoomGraph {
    pub fn new(room_width: i32, room_height: i32) -> Self {
        RoomGraph {
            room_width,
            room_height,
            rooms: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn room_width(&self) -> i32 {
        self.room_width
    }

    pub fn room_height(&self) -> i32 {
        self.room_height
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, location: &GridCoordinate) -> bool {
        self.index.contains_key(location)
    }

    pub fn get(&self, location: &GridCoordinate) -> Option<&Room> {
        self.index.get(location).map(|&i| &self.rooms[i])
    }

    pub fn get_mut(&mut self, location: &GridCoordinate) -> Option<&mut Room> {
        self.index.get(location).map(|&i| &mut self.rooms[i])
    }

    /// Adds `room`, replacing any room already at its grid position.
    pub fn insert_room(&mut self, room: Room) -> usize {
        match self.index.get(&room.grid_position) {
            Some(&i) => {
                self.rooms[i] = room;
                i
            }
            None => {
                self.index.insert(room.grid_position, self.rooms.len());
                self.rooms.push(room);
                self.rooms.len() - 1
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    pub fn starting_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|room| room.is_starting_room)
    }

    pub fn end_of_path_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.is_end_of_path_room)
    }

    /// Number of connections, each reciprocal pair counted once.
    pub fn door_count(&self) -> usize {
        self.rooms.iter().map(Room::door_count).sum::<usize>() / 2
    }

    /// Opens a door from the room at `from` towards `direction` and the
    /// matching door on the way back. Returns `false` when either room is
    /// missing.
    pub fn connect(&mut self, from: GridCoordinate, direction: Direction) -> bool {
        let to = from.offset_by(direction);

        let (Some(&from_idx), Some(&to_idx)) = (self.index.get(&from), self.index.get(&to)) else {
            return false;
        };

        if from_idx == to_idx {
            return false;
        }

        self.rooms[from_idx].add_door(to, direction);
        self.rooms[to_idx].add_door(from, direction.opposite());

        true
    }

    /// First door found whose target room does not lead back through the
    /// opposite side.
    pub fn missing_reciprocal(&self) -> Option<(GridCoordinate, Direction)> {
        for room in self.rooms.iter() {
            for door in room.doors() {
                let neighbour = room.grid_position.offset_by(door.direction);

                let reciprocal = door.to == neighbour
                    && self
                        .get(&neighbour)
                        .is_some_and(|other| other.has_door(door.direction.opposite()));

                if !reciprocal {
                    return Some((room.grid_position, door.direction));
                }
            }
        }

        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedMap {
    pub source: LayoutSource,
    pub entries: Vec<RoomPathEntry>,
    pub rooms: RoomGraph,
}

impl GeneratedMap {
    pub fn fork_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.is_end_of_path && matches!(entry.branch, PathBranch::Fork(_)))
            .count()
    }
}

/// How a generated map is rendered to SVG.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawStyle {
    // Every floor, wall, corner and door tile.
    #[default]
    Tiles,
    // One square per room, coloured by role, with links for doors.
    Schematic,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_opposite_is_an_involution() {
        for direction in DIRECTIONS {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }

        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn test_offsets_cancel_with_opposite() {
        for direction in DIRECTIONS {
            let origin = GridCoordinate::new(4, -2);
            assert_eq!(
                origin.offset_by(direction).offset_by(direction.opposite()),
                origin
            );
        }

        assert_eq!(Direction::North.offset(), GridCoordinate::new(0, 1));
        assert_eq!(Direction::East.offset(), GridCoordinate::new(1, 0));
        assert_eq!(Direction::South.offset(), GridCoordinate::new(0, -1));
        assert_eq!(Direction::West.offset(), GridCoordinate::new(-1, 0));
        assert_eq!(Direction::None.offset(), GridCoordinate::ZERO);
    }

    #[test]
    fn test_direction_between_points_back() {
        let previous = GridCoordinate::new(3, 3);

        assert_eq!(
            Direction::between(GridCoordinate::new(3, 4), previous),
            Direction::South
        );
        assert_eq!(
            Direction::between(GridCoordinate::new(3, 2), previous),
            Direction::North
        );
        assert_eq!(
            Direction::between(GridCoordinate::new(4, 3), previous),
            Direction::West
        );
        assert_eq!(
            Direction::between(GridCoordinate::new(2, 3), previous),
            Direction::East
        );
    }

    #[test]
    fn test_direction_between_non_neighbours_is_none() {
        let origin = GridCoordinate::new(0, 0);

        assert_eq!(Direction::between(origin, origin), Direction::None);
        assert_eq!(
            Direction::between(origin, GridCoordinate::new(1, 1)),
            Direction::None
        );
        assert_eq!(
            Direction::between(origin, GridCoordinate::new(0, 2)),
            Direction::None
        );
    }

    #[test]
    fn test_perpendicular_directions() {
        assert_eq!(
            Direction::North.perpendicular(),
            [Direction::West, Direction::East]
        );
        assert_eq!(
            Direction::West.perpendicular(),
            [Direction::North, Direction::South]
        );

        for direction in DIRECTIONS {
            for other in direction.perpendicular() {
                assert_ne!(direction.is_horizontal(), other.is_horizontal());
            }
        }
    }

    #[test]
    fn test_clamp_absorbs_steps_off_the_map() {
        let corner = GridCoordinate::new(0, 4);

        assert_eq!(
            corner.offset_by(Direction::West).clamped_to(5, 5),
            corner
        );
        assert_eq!(
            corner.offset_by(Direction::North).clamped_to(5, 5),
            corner
        );
        assert!(!corner.offset_by(Direction::North).is_within(5, 5));
    }

    #[test]
    fn test_room_add_door_is_idempotent() {
        let mut room = Room::new(
            GridCoordinate::new(1, 1),
            GridCoordinate::new(11, 9),
            false,
            PathBranch::Main,
        );

        assert!(room.add_door(GridCoordinate::new(1, 2), Direction::North));
        assert!(!room.add_door(GridCoordinate::new(1, 2), Direction::North));
        assert!(!room.add_door(GridCoordinate::new(1, 1), Direction::None));

        assert_eq!(room.door_count(), 1);
        assert_eq!(
            room.door_direction(GridCoordinate::new(1, 2)),
            Some(Direction::North)
        );
    }

    #[test]
    fn test_graph_connect_adds_both_sides() {
        let mut graph = RoomGraph::new(11, 9);
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(1, 0);

        graph.insert_room(Room::new(a, a, true, PathBranch::Main));
        graph.insert_room(Room::new(b, b.stretched_by(11, 9), false, PathBranch::Main));

        assert!(graph.connect(a, Direction::East));
        assert!(!graph.connect(a, Direction::North));

        assert!(graph.get(&a).is_some_and(|r| r.has_door(Direction::East)));
        assert!(graph.get(&b).is_some_and(|r| r.has_door(Direction::West)));
        assert_eq!(graph.door_count(), 1);
        assert_eq!(graph.missing_reciprocal(), None);
    }

    #[test]
    fn test_missing_reciprocal_detects_one_sided_door() {
        let mut graph = RoomGraph::new(11, 9);
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(0, 1);

        graph.insert_room(Room::new(a, a, true, PathBranch::Main));
        graph.insert_room(Room::new(b, b.stretched_by(11, 9), false, PathBranch::Main));

        if let Some(room) = graph.get_mut(&a) {
            room.add_door(b, Direction::North);
        }

        assert_eq!(graph.missing_reciprocal(), Some((a, Direction::North)));
    }
}
