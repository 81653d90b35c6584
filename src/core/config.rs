//! Battle configuration types.
//!
//! Callers configure a battle by providing:
//! - `BattleConfig`: engine knobs (seed, pile swappability, drain policy, bounds)
//! - `EntityBaseStats`: one side's starting deck and base numbers
//! - `Level`: a numbered pair of base stats

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::error::BattleError;

/// Engine-level settings for a battle session.
///
/// ```
/// use stack_battle::core::BattleConfig;
///
/// let config = BattleConfig::new(7).with_enemy_stack_swappable(true);
/// assert_eq!(config.seed, 7);
/// assert!(config.player_stack_swappable);
/// assert!(config.enemy_stack_swappable);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seeds every shuffle and random index pick.
    pub seed: u64,

    pub player_stack_swappable: bool,

    pub enemy_stack_swappable: bool,

    /// Refuse a new execution pass while events are still queued.
    pub reject_while_events_pending: bool,

    /// How deep on-delete effects may chain before further ones are dropped.
    pub max_effect_depth: usize,

    /// Cards one side may execute in a single turn. Content that refills
    /// its own stack for free would otherwise never run out.
    pub max_steps_per_turn: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            player_stack_swappable: true,
            enemy_stack_swappable: false,
            reject_while_events_pending: false,
            max_effect_depth: 8,
            max_steps_per_turn: 256,
        }
    }
}

impl BattleConfig {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_player_stack_swappable(mut self, swappable: bool) -> Self {
        self.player_stack_swappable = swappable;
        self
    }

    #[must_use]
    pub fn with_enemy_stack_swappable(mut self, swappable: bool) -> Self {
        self.enemy_stack_swappable = swappable;
        self
    }

    /// Enable strict drain mode.
    #[must_use]
    pub fn rejecting_while_events_pending(mut self) -> Self {
        self.reject_while_events_pending = true;
        self
    }

    #[must_use]
    pub fn with_max_effect_depth(mut self, depth: usize) -> Self {
        self.max_effect_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_steps_per_turn(mut self, steps: usize) -> Self {
        self.max_steps_per_turn = steps;
        self
    }
}

/// Starting data for one side of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBaseStats {
    pub name: String,

    /// Starting stack, top first.
    pub deck: Vec<CardId>,

    #[serde(default)]
    pub shuffle_at_start: bool,

    pub base_view_size: i32,

    pub base_energy: i32,
}

impl EntityBaseStats {
    #[must_use]
    pub fn new(name: impl Into<String>, base_energy: i32, base_view_size: i32) -> Self {
        Self {
            name: name.into(),
            deck: Vec::new(),
            shuffle_at_start: false,
            base_view_size,
            base_energy,
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = CardId>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle_at_start = true;
        self
    }

    /// Reject numbers no battle could start from.
    pub fn validate(&self) -> Result<(), BattleError> {
        let reason = if self.base_view_size < 1 {
            "base view size must be at least 1"
        } else if self.base_energy < 0 {
            "base energy must not be negative"
        } else {
            return Ok(());
        };
        Err(BattleError::InvalidStats {
            name: self.name.clone(),
            reason,
        })
    }
}

/// A numbered encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub player: EntityBaseStats,
    pub enemy: EntityBaseStats,
}

impl Level {
    #[must_use]
    pub fn new(number: u32, player: EntityBaseStats, enemy: EntityBaseStats) -> Self {
        Self {
            number,
            player,
            enemy,
        }
    }
}
