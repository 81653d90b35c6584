//! Core battle types: sides, entities, RNG, configuration.
//!
//! Everything here is owned by a [`BattleSession`](crate::battle::BattleSession)
//! and passed down by reference; there is no ambient global state.

pub mod config;
pub mod entity;
pub mod rng;
pub mod side;

pub use config::{BattleConfig, EntityBaseStats, Level};
pub use entity::Entity;
pub use rng::GameRng;
pub use side::{Side, Sides};
