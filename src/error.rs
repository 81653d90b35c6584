//! Error types.
//!
//! Three families, matching who has to fix the problem:
//!
//! - [`ContentError`]: card data is malformed. Found by the validation pass
//!   (hard failure at setup) or at battle time (logged, effect skipped).
//! - [`SwapRejection`] / [`LookupError`]: the caller asked for something
//!   illegal. State is unchanged and the caller may retry.
//! - [`BattleError`]: a session command could not run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::BattleState;
use crate::cards::CardId;
use crate::effects::EffectType;

/// Card content that cannot be resolved as authored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("effect has an undefined type")]
    UndefinedEffectType,

    #[error("{effect:?} effect has no target")]
    UndefinedTarget { effect: EffectType },

    #[error("{effect:?} effect has no index mode")]
    UndefinedMode { effect: EffectType },

    #[error("{effect:?} effect has no magnitude")]
    MissingValue { effect: EffectType },

    #[error("{effect:?} effect has no reference card")]
    MissingReference { effect: EffectType },

    #[error("card template {0} is not registered")]
    UnknownTemplate(CardId),

    #[error("card template {0} is registered twice")]
    DuplicateTemplate(CardId),

    #[error("variable effect magnitudes are not supported")]
    UnsupportedVariable,

    #[error("in card '{card}': {source}")]
    InCard {
        card: String,
        #[source]
        source: Box<ContentError>,
    },
}

impl ContentError {
    /// Attach the offending card's title.
    pub fn in_card(self, card: impl Into<String>) -> Self {
        ContentError::InCard {
            card: card.into(),
            source: Box::new(self),
        }
    }
}

/// Why a reorder request was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SwapRejection {
    #[error("this stack cannot be reordered")]
    StackLocked,

    #[error("card at index {0} is unswappable")]
    CardLocked(usize),

    #[error("index {index} is outside the visible range 0..{limit}")]
    OutOfView { index: usize, limit: usize },

    #[error("cannot swap index {0} with itself")]
    SameIndex(usize),

    #[error("swaps are not allowed during {0:?}")]
    WrongPhase(BattleState),
}

/// A console token that names nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("unknown pile '{0}'")]
    UnknownPile(String),
}

/// A session command that could not run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("command not allowed during {0:?}")]
    WrongPhase(BattleState),

    #[error("a card is held by the pointer")]
    CardHeld,

    #[error("events from the previous step have not been drained")]
    EventsPending,

    #[error("no battle has been set up")]
    NotSetUp,

    #[error("entity '{name}' has invalid stats: {reason}")]
    InvalidStats { name: String, reason: &'static str },

    #[error(transparent)]
    Content(#[from] ContentError),
}
