use super::{DARK_BLUE, DrawConfig, MapDrawer, STROKE_WIDTH, bounds, room_color};
use crate::types::{Direction, GeneratedMap, GridCoordinate};

use svg::{
    Document,
    node::element::{Path, Rectangle, path::Data},
};

pub(super) struct SchematicMapDrawer;

impl MapDrawer for SchematicMapDrawer {
    fn draw(&self, map: &GeneratedMap, config: &DrawConfig) -> Document {
        let Some((min, max)) = bounds(map.rooms.iter().map(|room| &room.grid_position)) else {
            return Document::new().set("width", config.margin).set("height", config.margin);
        };

        let room_size = config.room_size;
        let half_margin = config.margin / 2;

        let mut document = Document::new()
            .set(
                "width",
                (max.x - min.x + 1) as u32 * room_size + config.margin,
            )
            .set(
                "height",
                (max.y - min.y + 1) as u32 * room_size + config.margin,
            );

        let to_canvas = |location: GridCoordinate| {
            (
                (location.x - min.x) as u32 * room_size + half_margin,
                (max.y - location.y) as u32 * room_size + half_margin,
            )
        };

        for room in map.rooms.iter() {
            let (x, y) = to_canvas(room.grid_position);

            let rect = Rectangle::new()
                .set("x", x + STROKE_WIDTH)
                .set("y", y + STROKE_WIDTH)
                .set("width", room_size - 2 * STROKE_WIDTH)
                .set("height", room_size - 2 * STROKE_WIDTH)
                .set("fill", room_color(room));

            document = document.add(rect);
        }

        // Each connection is drawn once, from the room on its south or west side
        for room in map.rooms.iter() {
            for door in room
                .doors()
                .filter(|d| matches!(d.direction, Direction::North | Direction::East))
            {
                let (from_x, from_y) = to_canvas(room.grid_position);
                let (to_x, to_y) = to_canvas(door.to);
                let center = room_size / 2;

                let data = Data::new()
                    .move_to((from_x + center, from_y + center))
                    .line_to((to_x + center, to_y + center));

                let path = Path::new()
                    .set("fill", "none")
                    .set("stroke", DARK_BLUE)
                    .set("stroke-width", STROKE_WIDTH)
                    .set("d", data);

                document = document.add(path);
            }
        }

        document
    }
}
