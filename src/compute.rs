//! Per-tick game logic.
//!
//! Two passes make up a tick: `advance_clocks` moves everything that moves on
//! its own, and `update_game_objects` detects collisions, publishes them on
//! the session's bus and prunes whatever the handlers killed.

use crate::entities::{Entity, EntityId, EntityKind, Pilot};
use crate::events::{publish, Dispatch, Message};
use crate::geometry::{intersects, Rect};
use crate::session::Session;

/// Pixels an enemy drops per descent step.
pub const ENEMY_SPEED: f32 = 5.0;
/// Pixels a laser climbs per ascent step.
pub const LASER_SPEED: f32 = 15.0;

// ── Autonomous movement ──────────────────────────────────────────────────────

/// Move an enemy one step down. Returns false, without moving, once it rests on `floor`.
pub fn descend(enemy: &mut Entity, floor: f32) -> bool {
    if enemy.y < floor - enemy.height {
        enemy.y += ENEMY_SPEED;
        true
    } else {
        log::trace!("enemy {:?} stopped at {}", enemy.id, enemy.y);
        false
    }
}

/// Move a laser one step up. A laser at or above the top edge dies instead.
pub fn ascend(laser: &mut Entity) -> bool {
    if laser.y > 0.0 {
        laser.y -= LASER_SPEED;
        true
    } else {
        laser.alive = false;
        false
    }
}

/// Run every entity clock and the pilot's cooldown forward by `dt_ms`.
/// Movers whose run is over lose their clock and never move again.
pub fn advance_clocks(entities: &mut [Entity], pilot: &mut Pilot, floor: f32, dt_ms: u64) {
    for entity in entities.iter_mut().filter(|e| e.alive) {
        let fires = match entity.clock.as_mut() {
            Some(clock) => clock.advance(dt_ms),
            None => continue,
        };
        for _ in 0..fires {
            let moving = match entity.kind {
                EntityKind::Enemy => descend(entity, floor),
                EntityKind::Projectile => ascend(entity),
                EntityKind::Player => false,
            };
            if !moving {
                entity.clock = None;
                break;
            }
        }
    }
    pilot.decay(dt_ms);
}

// ── Collision step ───────────────────────────────────────────────────────────

type Snapshot = Vec<(EntityId, Rect)>;

/// Split live entities into (enemies, lasers) without touching the collection.
pub fn partition(entities: &[Entity]) -> (Snapshot, Snapshot) {
    let mut enemies = Vec::new();
    let mut lasers = Vec::new();
    for entity in entities.iter().filter(|e| e.alive) {
        match entity.kind {
            EntityKind::Enemy => enemies.push((entity.id, entity.rect())),
            EntityKind::Projectile => lasers.push((entity.id, entity.rect())),
            EntityKind::Player => {}
        }
    }
    (enemies, lasers)
}

/// Remove every dead entity in one pass. Returns how many were dropped.
pub fn prune(entities: &mut Vec<Entity>) -> usize {
    let before = entities.len();
    entities.retain(|e| e.alive);
    before - entities.len()
}

/// One simulation step: hero collisions, then laser collisions, then prune.
///
/// Detection runs on a snapshot taken before any handler fires, so an entity
/// killed mid-step is still tested for the rest of the step; the pairwise pass
/// never short-circuits. A handler that resets the session ends the step:
/// the snapshot belongs to the old session and is dropped unpublished.
pub fn update_game_objects(session: &mut Session) {
    let generation = session.bus().generation();
    let (enemies, lasers) = partition(session.entities());
    let hero = session.player().map(Entity::rect);

    if let Some(hero) = hero {
        for &(enemy, rect) in &enemies {
            if intersects(&hero, &rect) {
                log::debug!("enemy {:?} rammed the ship", enemy);
                publish(session, Message::CollisionEnemyHero { enemy });
                if session.bus().generation() != generation {
                    log::debug!("session reset mid-step, dropping remaining collisions");
                    return;
                }
            }
        }
    }

    for &(laser, laser_rect) in &lasers {
        for &(enemy, enemy_rect) in &enemies {
            if intersects(&laser_rect, &enemy_rect) {
                log::debug!("laser {:?} hit enemy {:?}", laser, enemy);
                publish(session, Message::CollisionEnemyLaser { laser, enemy });
                if session.bus().generation() != generation {
                    log::debug!("session reset mid-step, dropping remaining collisions");
                    return;
                }
            }
        }
    }

    let pruned = prune(session.entities_mut());
    if pruned > 0 {
        log::trace!("pruned {} dead entities", pruned);
    }
}
