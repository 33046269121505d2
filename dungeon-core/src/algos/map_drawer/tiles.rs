use super::{DARK_GRAY, DrawConfig, LIGHT_GRAY, LIGHT_WHITE, MapDrawer, bounds, room_color};
use crate::{
    algos::{TileKind, TileProjector},
    types::{GeneratedMap, GridCoordinate},
};

use svg::{Document, node::element::Rectangle};
use tracing::event;

pub(super) struct TileMapDrawer;

impl MapDrawer for TileMapDrawer {
    fn draw(&self, map: &GeneratedMap, config: &DrawConfig) -> Document {
        let Some((min, max)) = bounds(map.rooms.iter().flat_map(|room| room.tiles.iter_all()))
        else {
            return Document::new().set("width", config.margin).set("height", config.margin);
        };

        let tile_size = config.tile_size;
        let half_margin = config.margin / 2;

        let mut document = Document::new()
            .set(
                "width",
                (max.x - min.x + 1) as u32 * tile_size + config.margin,
            )
            .set(
                "height",
                (max.y - min.y + 1) as u32 * tile_size + config.margin,
            );

        // Tile space grows upwards, SVG space downwards
        let to_canvas = |tile: GridCoordinate| {
            (
                (tile.x - min.x) as u32 * tile_size + half_margin,
                (max.y - tile.y) as u32 * tile_size + half_margin,
            )
        };

        let projector = TileProjector::for_graph(&map.rooms);
        let mut tile_count = 0;

        for room in map.rooms.iter() {
            let floor_color = room_color(room);

            for &tile in room.tiles.iter_all() {
                let color = match projector.classify(room, tile) {
                    Some(TileKind::Floor) => floor_color,
                    Some(TileKind::Wall(_)) => LIGHT_GRAY,
                    Some(TileKind::Corner(_)) => DARK_GRAY,
                    Some(TileKind::Door(_)) => LIGHT_WHITE,
                    None => continue,
                };

                let (x, y) = to_canvas(tile);
                let rect = Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", tile_size)
                    .set("height", tile_size)
                    .set("fill", color);

                document = document.add(rect);
                tile_count += 1;
            }
        }

        event!(
            tracing::Level::DEBUG,
            "Drew {} tiles of {} rooms",
            tile_count,
            map.rooms.len()
        );

        document
    }
}
