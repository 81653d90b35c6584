//! # stack-battle
//!
//! The battle-resolution engine of a stack-ordered card game.
//!
//! Two sides each hold an ordered stack of cards. On a side's turn, cards
//! execute from the top while energy lasts, and their effects delete, add,
//! transform or lock cards and move energy around on both stacks. A side
//! whose stack is empty loses.
//!
//! ## Design Principles
//!
//! 1. **No ambient state**: a [`BattleSession`] owns the entities, card
//!    registry, RNG and event queue. Nothing is global.
//!
//! 2. **Mutate, then describe**: every command finishes its mutation
//!    synchronously and queues [`BattleEvent`]s. A presentation layer drains
//!    and animates them at its own pace.
//!
//! 3. **Deterministic**: all randomness comes from a seeded ChaCha8 stream,
//!    so a seed plus a command sequence replays exactly.
//!
//! ## Modules
//!
//! - `core`: sides, entities, RNG, configuration
//! - `cards`: templates, instances, registry, card text
//! - `effects`: effect data, resolver, content validation
//! - `zones`: piles, index resolution, the swap engine
//! - `events`: the event queue
//! - `rules`: game-over detection
//! - `battle`: the session and turn engine
//! - `error`: error types

pub mod battle;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, Entity, EntityBaseStats, GameRng, Level, Side, Sides,
};

pub use crate::cards::{
    CardId, CardInstance, CardRegistry, CardTemplate, InstanceId, Property, Rarity,
};

pub use crate::effects::{
    EffectMode, EffectResolver, EffectSpec, EffectTarget, EffectType, EffectValue,
    ResolveResult, ResolverContext,
};

pub use crate::zones::{Deck, PileKind, PileRef};

pub use crate::events::{BattleEvent, EventQueue};

pub use crate::rules::GameResult;

pub use crate::battle::{
    BattleSession, BattleState, BlockReason, ExecuteAll, ExecutionOutcome, InputGate, NoGate,
    SwapOutcome,
};

pub use crate::error::{BattleError, ContentError, LookupError, SwapRejection};
