use crate::types::{DrawStyle, GeneratedMap, GridCoordinate, PathBranch, Room};

use svg::Document;

mod schematic;
mod tiles;

pub(crate) const LIGHT_BLUE: &str = "#0080ff";
pub(crate) const CYAN_BLUE: &str = "#00c8c8";
pub(crate) const DARK_BLUE: &str = "#004bff";

pub(crate) const LIGHT_WHITE: &str = "#f8f8f8";
pub(crate) const LIGHT_GRAY: &str = "#c0c0c0";
pub(crate) const DARK_GRAY: &str = "#606060";

pub(crate) const RED: &str = "#f80000";
pub(crate) const YELLOW: &str = "#f8f800";

pub(crate) const STROKE_WIDTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawConfig {
    // Side of a single tile in the tile drawing, in pixels.
    pub tile_size: u32,
    // Side of a room square in the schematic drawing, in pixels.
    pub room_size: u32,
    pub margin: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        DrawConfig {
            tile_size: 8,
            room_size: 48,
            margin: 96,
        }
    }
}

pub trait MapDrawer {
    fn draw(&self, map: &GeneratedMap, config: &DrawConfig) -> Document;
}

pub struct MapDrawerFactory;

impl MapDrawerFactory {
    pub fn create_drawer(style: DrawStyle) -> Box<dyn MapDrawer> {
        match style {
            DrawStyle::Tiles => Box::new(tiles::TileMapDrawer),
            DrawStyle::Schematic => Box::new(schematic::SchematicMapDrawer),
        }
    }
}

// Fill colour of a room by the part it plays in the layout.
pub(crate) fn room_color(room: &Room) -> &'static str {
    if room.is_starting_room {
        RED
    } else if room.is_end_of_path_room && room.branch == PathBranch::Main {
        YELLOW
    } else if matches!(room.branch, PathBranch::Fork(_)) {
        CYAN_BLUE
    } else {
        LIGHT_BLUE
    }
}

// Inclusive bounding box of `points`, `None` when there are none.
pub(crate) fn bounds<'a>(
    points: impl Iterator<Item = &'a GridCoordinate>,
) -> Option<(GridCoordinate, GridCoordinate)> {
    points.fold(None, |acc, p| match acc {
        None => Some((*p, *p)),
        Some((min, max)) => Some((
            GridCoordinate::new(min.x.min(p.x), min.y.min(p.y)),
            GridCoordinate::new(max.x.max(p.x), max.y.max(p.y)),
        )),
    })
}
