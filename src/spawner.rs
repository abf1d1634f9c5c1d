//! Initial layout of a session: the enemy grid and the player ship.

use crate::assets::TextureHandle;
use crate::config::CanvasConfig;
use crate::entities::{Entity, EntityId, ENEMY_HEIGHT, ENEMY_WIDTH};

pub const GRID_COLUMNS: u32 = 5;
pub const GRID_ROWS: u32 = 5;
/// Half the ship width, used to centre it under the canvas midline.
const HERO_CENTER_OFFSET: f32 = 45.0;

/// Hands out session-unique entity ids.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Build the 5×5 enemy grid, centred horizontally and packed from the top edge.
/// Enemies are emitted column by column.
pub fn create_enemies(
    canvas: &CanvasConfig,
    texture: TextureHandle,
    step_ms: u64,
    ids: &mut IdAllocator,
) -> Vec<Entity> {
    let grid_width = GRID_COLUMNS as f32 * ENEMY_WIDTH;
    let start_x = (canvas.width - grid_width) / 2.0;

    let mut enemies = Vec::with_capacity((GRID_COLUMNS * GRID_ROWS) as usize);
    for col in 0..GRID_COLUMNS {
        let x = start_x + col as f32 * ENEMY_WIDTH;
        for row in 0..GRID_ROWS {
            let y = row as f32 * ENEMY_HEIGHT;
            enemies.push(Entity::enemy(ids.next_id(), x, y, texture, step_ms));
        }
    }
    enemies
}

/// Place the ship centred horizontally, a quarter of the canvas above the bottom.
pub fn create_hero(canvas: &CanvasConfig, texture: TextureHandle, ids: &mut IdAllocator) -> Entity {
    let x = canvas.width / 2.0 - HERO_CENTER_OFFSET;
    let y = canvas.height - canvas.height / 4.0;
    Entity::hero(ids.next_id(), x, y, texture)
}
