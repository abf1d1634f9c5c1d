//! Game entity types. Mostly data; the few methods here only enforce the
//! invariants of the values they touch (floors at zero, one-shot death flag).

use crate::assets::TextureHandle;
use crate::geometry::Rect;
use crate::schedule::Clock;

// ── Fixed sizes & rules ───────────────────────────────────────────────────────

pub const HERO_WIDTH: f32 = 99.0;
pub const HERO_HEIGHT: f32 = 75.0;
pub const ENEMY_WIDTH: f32 = 98.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
pub const LASER_WIDTH: f32 = 9.0;
pub const LASER_HEIGHT: f32 = 33.0;

pub const STARTING_LIVES: u32 = 3;
pub const POINTS_PER_KILL: u32 = 100;
/// Milliseconds of cooldown set by each shot.
pub const FIRE_COOLDOWN: u32 = 400;
/// Cooldown removed per decay step.
pub const COOLDOWN_DECAY: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Unique within one session; collision payloads carry ids, not references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Once false the entity is dropped by the next prune pass.
    pub alive: bool,
    pub texture: TextureHandle,
    /// Drives autonomous movement. `None` once the entity has halted,
    /// and always `None` for the player.
    pub clock: Option<Clock>,
}

impl Entity {
    pub fn hero(id: EntityId, x: f32, y: f32, texture: TextureHandle) -> Self {
        Entity {
            id,
            kind: EntityKind::Player,
            x,
            y,
            width: HERO_WIDTH,
            height: HERO_HEIGHT,
            alive: true,
            texture,
            clock: None,
        }
    }

    pub fn enemy(id: EntityId, x: f32, y: f32, texture: TextureHandle, step_ms: u64) -> Self {
        Entity {
            id,
            kind: EntityKind::Enemy,
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            alive: true,
            texture,
            clock: Some(Clock::new(step_ms)),
        }
    }

    pub fn laser(id: EntityId, x: f32, y: f32, texture: TextureHandle, step_ms: u64) -> Self {
        Entity {
            id,
            kind: EntityKind::Projectile,
            x,
            y,
            width: LASER_WIDTH,
            height: LASER_HEIGHT,
            alive: true,
            texture,
            clock: Some(Clock::new(step_ms)),
        }
    }

    /// Bounding rectangle, recomputed from the current position.
    pub fn rect(&self) -> Rect {
        Rect::from_bounds(self.x, self.y, self.width, self.height)
    }

    pub fn is_moving(&self) -> bool {
        self.clock.is_some()
    }
}

// ── Player stats ──────────────────────────────────────────────────────────────

/// Lives, score and fire cooldown of the single player ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Pilot {
    pub lives: u32,
    pub score: u32,
    /// Milliseconds until the next shot is allowed.
    pub cooldown: u32,
    /// Set once, when lives reach zero.
    pub dead: bool,
    decay: Option<Clock>,
}

impl Default for Pilot {
    fn default() -> Self {
        Pilot {
            lives: STARTING_LIVES,
            score: 0,
            cooldown: 0,
            dead: false,
            decay: None,
        }
    }
}

impl Pilot {
    pub fn can_fire(&self) -> bool {
        self.cooldown == 0
    }

    /// Arm the cooldown after a shot; it decays by [`COOLDOWN_DECAY`] every `step_ms`.
    pub fn start_cooldown(&mut self, step_ms: u64) {
        self.cooldown = FIRE_COOLDOWN;
        self.decay = Some(Clock::new(step_ms));
    }

    pub fn is_cooling_down(&self) -> bool {
        self.decay.is_some()
    }

    /// Run the decay clock forward. Stops for good at exactly zero.
    pub fn decay(&mut self, dt_ms: u64) {
        let fires = match self.decay.as_mut() {
            Some(clock) => clock.advance(dt_ms),
            None => return,
        };
        for _ in 0..fires {
            self.cooldown = self.cooldown.saturating_sub(COOLDOWN_DECAY);
            if self.cooldown == 0 {
                self.decay = None;
                break;
            }
        }
    }

    /// Take one life. Returns true only on the hit that kills the pilot.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && !self.dead {
            self.dead = true;
            return true;
        }
        false
    }

    pub fn add_kill(&mut self) {
        self.score += POINTS_PER_KILL;
    }
}

/// Final numbers handed to the presentation layer when a session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub won: bool,
    pub score: u32,
    pub lives: u32,
}
