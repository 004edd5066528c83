//! Sprite rendering
//!
//! The game draws a fixed grid of tile images and then every entity, back to
//! front. Backends only need to blit a source region to a destination
//! rectangle.

pub mod atlas;

pub use atlas::{ImageId, SPRITE_HEIGHT, SPRITE_OFFSET_Y, SpriteRegion, region_for};

use crate::consts::*;
use crate::sim::{Entity, SessionState};
use crate::tuning::LaneMap;
use crate::{col_to_x, row_to_y};

/// Draw target
pub trait Renderer {
    fn draw(&mut self, region: &SpriteRegion, dest_x: f32, dest_y: f32, width: f32, height: f32);
}

/// Tile image for a board row
pub fn tile_for_row(row: u32, lanes: &LaneMap) -> ImageId {
    let road = lanes.road_rows;
    if row == GOAL_ROW {
        ImageId::GrassTop
    } else if lanes.water_rows.contains(row as i32) {
        ImageId::Water
    } else if row == road.first {
        ImageId::RoadTop
    } else if row == road.last {
        ImageId::RoadBottom
    } else if road.contains(row as i32) {
        ImageId::RoadMid
    } else {
        ImageId::GrassBottom
    }
}

fn draw_entity(target: &mut impl Renderer, entity: &Entity) {
    let region = region_for(entity.kind);
    target.draw(
        &region,
        entity.pos.x,
        entity.pos.y + SPRITE_OFFSET_Y,
        region.width,
        region.height,
    );
}

/// Draw one frame: board, then entities in layer order
pub fn render(state: &SessionState, target: &mut impl Renderer) {
    let lanes = &state.tuning.lanes;
    for row in 0..NUM_ROWS {
        let region = SpriteRegion::tile(tile_for_row(row, lanes));
        for col in 0..NUM_COLS {
            target.draw(&region, col_to_x(col), row_to_y(row), region.width, region.height);
        }
    }

    for item in state.collectibles.items.iter().filter(|c| !c.collected) {
        draw_entity(target, &item.entity);
    }
    for vehicle in &state.vehicles {
        draw_entity(target, &vehicle.entity);
    }
    for floatable in &state.floatables {
        draw_entity(target, &floatable.entity);
    }
    for rock in &state.rocks {
        draw_entity(target, &rock.entity);
    }
    for predator in &state.predators {
        draw_entity(target, predator.entity());
    }
    for food in &state.foods {
        draw_entity(target, &food.entity);
    }
    draw_entity(target, &state.player.entity);
}
