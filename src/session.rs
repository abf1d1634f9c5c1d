//! One play-through, from spawn to win/loss, and the state machine around it.
//!
//! `Initializing → Playing → {Won, Lost} → (Reset) → Initializing`.
//!
//! A [`Session`] owns every entity, the pilot's stats, its event bus and all
//! of its timers. The host feeds it input through [`Session::handle_key`] and
//! time through [`Session::advance`]; everything else happens in handlers the
//! session registers on its own bus.

use std::time::Duration;

use crate::assets::{AssetProvider, Textures};
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Entity, EntityId, EntityKind, GameStatus, Pilot, Summary};
use crate::error::AssetError;
use crate::events::{publish, Channel, Dispatch, EventBus, Key, Message};
use crate::render::{self, Presenter, RenderSurface};
use crate::schedule::{Clock, Countdown};
use crate::spawner::{self, IdAllocator};

/// Pixels the ship moves per directional input.
pub const PLAYER_STEP: f32 = 15.0;
/// Laser spawn point relative to the ship's top-left corner (its nose).
pub const LASER_OFFSET_X: f32 = 45.0;
pub const LASER_OFFSET_Y: f32 = -10.0;

/// Pending end screen: shown once `delay` runs out.
#[derive(Clone, Copy, Debug)]
struct Ending {
    won: bool,
    delay: Countdown,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    textures: Textures,
    ids: IdAllocator,
    entities: Vec<Entity>,
    player: EntityId,
    pilot: Pilot,
    status: GameStatus,
    bus: EventBus<Session>,
    /// Main simulation/render loop; `None` while stopped.
    main_loop: Option<Clock>,
    ending: Option<Ending>,
    frames: u64,
}

impl Dispatch for Session {
    fn bus(&self) -> &EventBus<Self> {
        &self.bus
    }
}

impl Session {
    /// Resolve every texture, then start playing. Fails before anything is
    /// spawned if a texture is missing.
    pub fn load<P: AssetProvider + ?Sized>(
        config: GameConfig,
        provider: &mut P,
    ) -> Result<Self, AssetError> {
        let textures = Textures::load(provider, &config.assets)?;
        Ok(Self::new(config, textures))
    }

    /// Spawn the grid and the ship, wire up handlers and start the main loop.
    pub fn new(config: GameConfig, textures: Textures) -> Self {
        let mut session = Session {
            config,
            textures,
            ids: IdAllocator::default(),
            entities: Vec::new(),
            player: EntityId(0),
            pilot: Pilot::default(),
            status: GameStatus::Playing,
            bus: EventBus::new(),
            main_loop: None,
            ending: None,
            frames: 0,
        };
        session.initialize();
        session
    }

    fn initialize(&mut self) {
        let canvas = &self.config.canvas;
        let timing = &self.config.timing;

        // Ids keep counting across resets so none is ever reused.
        self.entities = spawner::create_enemies(
            canvas,
            self.textures.enemy,
            timing.enemy_step_ms,
            &mut self.ids,
        );
        let hero = spawner::create_hero(canvas, self.textures.hero, &mut self.ids);
        self.player = hero.id;
        self.entities.push(hero);

        self.pilot = Pilot::default();
        self.status = GameStatus::Playing;
        self.ending = None;
        self.frames = 0;
        self.register_handlers();
        self.main_loop = Some(Clock::new(self.config.timing.loop_ms));

        log::info!(
            "session started: {} enemies, {} lives",
            self.remaining_enemies(),
            self.pilot.lives
        );
    }

    fn register_handlers(&mut self) {
        let bus = &mut self.bus;
        bus.subscribe(Channel::KeyEnter, |s: &mut Session, _, _| s.reset());
        bus.subscribe(Channel::KeyUp, |s: &mut Session, _, _| s.move_player(0.0, -PLAYER_STEP));
        bus.subscribe(Channel::KeyDown, |s: &mut Session, _, _| s.move_player(0.0, PLAYER_STEP));
        bus.subscribe(Channel::KeyLeft, |s: &mut Session, _, _| s.move_player(-PLAYER_STEP, 0.0));
        bus.subscribe(Channel::KeyRight, |s: &mut Session, _, _| s.move_player(PLAYER_STEP, 0.0));
        bus.subscribe(Channel::KeySpace, |s: &mut Session, _, _| s.fire());
        bus.subscribe(Channel::CollisionEnemyLaser, |s: &mut Session, _, message| {
            if let Message::CollisionEnemyLaser { laser, enemy } = *message {
                s.on_laser_hit(laser, enemy);
            }
        });
        bus.subscribe(Channel::CollisionEnemyHero, |s: &mut Session, _, message| {
            if let Message::CollisionEnemyHero { enemy } = *message {
                s.on_hero_hit(enemy);
            }
        });
        bus.subscribe(Channel::GameEndWin, |s: &mut Session, _, _| s.end_game(true));
        bus.subscribe(Channel::GameEndLoss, |s: &mut Session, _, _| s.end_game(false));
    }

    /// Throw this play-through away and start a fresh one in place.
    /// Every handler registered so far, including outside subscribers, is dropped.
    pub fn reset(&mut self) {
        log::info!("session reset (score {}, lives {})", self.pilot.score, self.pilot.lives);
        self.main_loop = None;
        self.ending = None;
        self.bus.reset();
        self.initialize();
    }

    // ── Event plumbing ────────────────────────────────────────────────────────

    /// Register an extra handler after the session's own.
    pub fn subscribe<F>(&mut self, channel: Channel, handler: F)
    where
        F: Fn(&mut Session, Channel, &Message) + 'static,
    {
        self.bus.subscribe(channel, handler);
    }

    pub fn publish(&mut self, message: Message) {
        publish(self, message);
    }

    pub fn handle_key(&mut self, key: Key) {
        self.publish(key.into());
    }

    // ── Handlers ──────────────────────────────────────────────────────────────

    fn move_player(&mut self, dx: f32, dy: f32) {
        if self.status != GameStatus::Playing {
            log::warn!("move ignored: session is {:?}", self.status);
            return;
        }
        if let Some(hero) = self.entity_mut(self.player) {
            hero.x += dx;
            hero.y += dy;
        }
    }

    /// Spawn a laser at the ship's nose if the cooldown allows it.
    fn fire(&mut self) {
        if self.status != GameStatus::Playing {
            log::warn!("fire ignored: session is {:?}", self.status);
            return;
        }
        if !self.pilot.can_fire() {
            log::debug!("fire refused: cooling down ({} left)", self.pilot.cooldown);
            return;
        }
        let Some((x, y)) = self.player().map(|hero| (hero.x, hero.y)) else {
            return;
        };
        let id = self.ids.next_id();
        let laser = Entity::laser(
            id,
            x + LASER_OFFSET_X,
            y + LASER_OFFSET_Y,
            self.textures.laser,
            self.config.timing.laser_step_ms,
        );
        self.entities.push(laser);
        self.pilot.start_cooldown(self.config.timing.cooldown_step_ms);
        log::debug!("laser {:?} fired", id);
    }

    fn on_laser_hit(&mut self, laser: EntityId, enemy: EntityId) {
        self.kill(laser);
        self.kill(enemy);
        self.pilot.add_kill();

        if self.status == GameStatus::Playing && self.remaining_enemies() == 0 {
            self.publish(Message::GameEndWin);
        }
    }

    fn on_hero_hit(&mut self, enemy: EntityId) {
        self.kill(enemy);
        if self.pilot.lose_life() {
            self.kill(self.player);
        }

        if self.status != GameStatus::Playing {
            return;
        }
        // Loss wins a tie with an empty enemy grid.
        if self.pilot.dead {
            self.publish(Message::GameEndLoss);
            return;
        }
        if self.remaining_enemies() == 0 {
            self.publish(Message::GameEndWin);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        self.main_loop = None;
        self.ending = Some(Ending {
            won,
            delay: Countdown::new(self.config.timing.end_delay_ms),
        });
        log::info!(
            "session {}: score {}, lives {}",
            if won { "won" } else { "lost" },
            self.pilot.score,
            self.pilot.lives
        );
    }

    fn kill(&mut self, id: EntityId) {
        if let Some(entity) = self.entity_mut(id) {
            entity.alive = false;
        }
    }

    // ── Time ──────────────────────────────────────────────────────────────────

    /// Advance the session by `dt`.
    ///
    /// Time is cut at every main-loop boundary: each slice first moves the
    /// entities and decays the cooldown, and a slice that completes a loop
    /// period then runs one frame (HUD, collision step, entities). Once play
    /// ends, the remaining time counts down to the end screen, which is drawn
    /// and handed to `presenter` exactly once.
    pub fn advance<S, P>(&mut self, dt: Duration, surface: &mut S, presenter: &mut P)
    where
        S: RenderSurface + ?Sized,
        P: Presenter + ?Sized,
    {
        let mut remaining = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);

        while remaining > 0 {
            let Some(until_next) = self.main_loop.as_ref().map(Clock::until_next) else {
                break;
            };
            let slice = remaining.min(until_next);
            remaining -= slice;

            self.advance_clocks(slice);
            let fired = self.main_loop.as_mut().map_or(0, |clock| clock.advance(slice));
            if fired > 0 {
                self.run_frame(surface);
            }
        }

        self.advance_ending(remaining, surface, presenter);
    }

    /// Move entities and decay the cooldown without running a frame.
    pub fn advance_clocks(&mut self, dt_ms: u64) {
        if self.status != GameStatus::Playing {
            return;
        }
        let floor = self.config.canvas.height;
        compute::advance_clocks(&mut self.entities, &mut self.pilot, floor, dt_ms);
    }

    /// Collision detection, event dispatch and pruning, without drawing.
    pub fn step(&mut self) {
        compute::update_game_objects(self);
    }

    fn run_frame<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.frames += 1;
        render::clear_screen(surface);
        render::draw_points(surface, self.pilot.score);
        render::draw_life(surface, self.pilot.lives, self.textures.life);
        self.step();
        render::draw_game_objects(surface, &self.entities);
    }

    fn advance_ending<S, P>(&mut self, dt_ms: u64, surface: &mut S, presenter: &mut P)
    where
        S: RenderSurface + ?Sized,
        P: Presenter + ?Sized,
    {
        let Some(ending) = self.ending.as_mut() else {
            return;
        };
        if !ending.delay.advance(dt_ms) {
            return;
        }
        let won = ending.won;
        self.ending = None;

        let (message, color) = render::end_message(won);
        render::display_message(surface, message, color);
        presenter.show_end(&self.summary());
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn textures(&self) -> &Textures {
        &self.textures
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[doc(hidden)]
    pub fn entities_mut(&mut self) -> &mut Vec<Entity> {
        &mut self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The ship, while it is still alive.
    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player).filter(|e| e.alive)
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn pilot(&self) -> &Pilot {
        &self.pilot
    }

    #[doc(hidden)]
    pub fn pilot_mut(&mut self) -> &mut Pilot {
        &mut self.pilot
    }

    /// A fresh id for an entity added from outside the session.
    #[doc(hidden)]
    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn remaining_enemies(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Enemy && e.alive)
            .count()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            won: self.status == GameStatus::Won,
            score: self.pilot.score,
            lives: self.pilot.lives,
        }
    }

    /// True while the main loop is running.
    pub fn is_running(&self) -> bool {
        self.main_loop.is_some()
    }

    /// True between the end of play and the end screen.
    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }

    /// Frames run since the session started.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
