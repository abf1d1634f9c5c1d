//! Arcade shooter core: a ship fires lasers at a descending 5×5 enemy grid.
//!
//! The [`session::Session`] owns every entity and drives them from a single
//! time source. Input, collisions and game-end transitions travel over the
//! typed [`events::EventBus`]. Drawing and the end-of-game panel go through
//! the [`render::RenderSurface`] and [`render::Presenter`] traits so that any
//! front-end can host the game.

pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod render;
pub mod schedule;
pub mod session;
pub mod spawner;
