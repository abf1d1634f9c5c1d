//! Typed publish/subscribe.
//!
//! Every message belongs to exactly one named [`Channel`]. Handlers are kept
//! per channel in registration order and receive the owner of the bus
//! mutably, so a handler may change game state and publish again; a nested
//! publish is dispatched immediately on the same call stack.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::entities::EntityId;

// ── Channels & messages ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeySpace,
    KeyEnter,
    CollisionEnemyLaser,
    CollisionEnemyHero,
    GameEndWin,
    GameEndLoss,
}

impl Channel {
    pub const ALL: [Channel; 10] = [
        Channel::KeyUp,
        Channel::KeyDown,
        Channel::KeyLeft,
        Channel::KeyRight,
        Channel::KeySpace,
        Channel::KeyEnter,
        Channel::CollisionEnemyLaser,
        Channel::CollisionEnemyHero,
        Channel::GameEndWin,
        Channel::GameEndLoss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::KeyUp => "KEY_EVENT_UP",
            Channel::KeyDown => "KEY_EVENT_DOWN",
            Channel::KeyLeft => "KEY_EVENT_LEFT",
            Channel::KeyRight => "KEY_EVENT_RIGHT",
            Channel::KeySpace => "KEY_EVENT_SPACE",
            Channel::KeyEnter => "KEY_EVENT_ENTER",
            Channel::CollisionEnemyLaser => "COLLISION_ENEMY_LASER",
            Channel::CollisionEnemyHero => "COLLISION_ENEMY_HERO",
            Channel::GameEndWin => "GAME_END_WIN",
            Channel::GameEndLoss => "GAME_END_LOSS",
        }
    }

    /// Look a channel up by its wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeySpace,
    KeyEnter,
    /// A laser overlaps an enemy.
    CollisionEnemyLaser { laser: EntityId, enemy: EntityId },
    /// An enemy overlaps the player ship.
    CollisionEnemyHero { enemy: EntityId },
    GameEndWin,
    GameEndLoss,
}

impl Message {
    pub fn channel(&self) -> Channel {
        match self {
            Message::KeyUp => Channel::KeyUp,
            Message::KeyDown => Channel::KeyDown,
            Message::KeyLeft => Channel::KeyLeft,
            Message::KeyRight => Channel::KeyRight,
            Message::KeySpace => Channel::KeySpace,
            Message::KeyEnter => Channel::KeyEnter,
            Message::CollisionEnemyLaser { .. } => Channel::CollisionEnemyLaser,
            Message::CollisionEnemyHero { .. } => Channel::CollisionEnemyHero,
            Message::GameEndWin => Channel::GameEndWin,
            Message::GameEndLoss => Channel::GameEndLoss,
        }
    }
}

/// Discrete actions an input source can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    /// Starts a fresh session.
    Confirm,
}

impl From<Key> for Message {
    fn from(key: Key) -> Self {
        match key {
            Key::Up => Message::KeyUp,
            Key::Down => Message::KeyDown,
            Key::Left => Message::KeyLeft,
            Key::Right => Message::KeyRight,
            Key::Fire => Message::KeySpace,
            Key::Confirm => Message::KeyEnter,
        }
    }
}

// ── Bus ───────────────────────────────────────────────────────────────────────

pub type Handler<T> = Rc<dyn Fn(&mut T, Channel, &Message)>;

/// Handler registry for a bus owner of type `T`.
pub struct EventBus<T> {
    listeners: HashMap<Channel, Vec<Handler<T>>>,
    /// Bumped by every reset so an in-flight dispatch can tell that the
    /// handlers it snapshotted belong to a cleared registry.
    generation: u64,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        EventBus {
            listeners: HashMap::new(),
            generation: 0,
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(channel, handlers)| (channel.as_str(), handlers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the channel's list; it runs after every earlier one.
    pub fn subscribe<F>(&mut self, channel: Channel, handler: F)
    where
        F: Fn(&mut T, Channel, &Message) + 'static,
    {
        self.listeners
            .entry(channel)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Drop every registration on every channel.
    pub fn reset(&mut self) {
        self.listeners.clear();
        self.generation += 1;
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.listeners.get(&channel).map_or(0, Vec::len)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn snapshot(&self, channel: Channel) -> Vec<Handler<T>> {
        self.listeners.get(&channel).cloned().unwrap_or_default()
    }
}

/// Implemented by whatever owns the bus, so handlers can be handed that owner.
pub trait Dispatch: Sized {
    fn bus(&self) -> &EventBus<Self>;
}

/// Synchronously run every handler registered for `message`'s channel.
///
/// Handlers registered while the dispatch is running are not called for this
/// message. If a handler resets the bus, the rest of the dispatch is dropped.
pub fn publish<T: Dispatch>(target: &mut T, message: Message) {
    let channel = message.channel();
    let generation = target.bus().generation();
    let handlers = target.bus().snapshot(channel);
    if handlers.is_empty() {
        log::trace!("{} published with no listeners", channel);
        return;
    }
    for handler in handlers {
        if target.bus().generation() != generation {
            log::debug!("bus reset during {} dispatch; remaining handlers skipped", channel);
            break;
        }
        handler(target, channel, &message);
    }
}
