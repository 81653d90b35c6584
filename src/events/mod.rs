//! Battle events.
//!
//! The core never calls into a presentation layer. Every mutation is
//! finished first, then described by a `BattleEvent` pushed onto the
//! session's `EventQueue`. The shell drains the queue at its own pace, so
//! the state it reads is always already up to date with the last event.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::battle::BattleState;
use crate::cards::InstanceId;
use crate::core::Side;
use crate::rules::GameResult;
use crate::zones::PileKind;

/// Something that changed in the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    StateChanged {
        from: BattleState,
        to: BattleState,
    },

    TurnStarted {
        side: Side,
    },

    /// `current_energy` was refilled at turn start.
    EnergyReset {
        side: Side,
        energy: i32,
    },

    /// A card left the top of the stack and paid its cost.
    CardExecuted {
        side: Side,
        card: InstanceId,
        title: String,
        cost: i32,
    },

    /// Moved Stack -> Discard by a Delete effect.
    CardDeleted {
        side: Side,
        card: InstanceId,
        title: String,
    },

    CardExiled {
        side: Side,
        card: InstanceId,
        title: String,
    },

    CardAdded {
        side: Side,
        card: InstanceId,
        title: String,
        index: usize,
    },

    CardTransformed {
        side: Side,
        card: InstanceId,
        from: String,
        to: String,
    },

    /// The card gained `Unswappable`.
    CardLocked {
        side: Side,
        card: InstanceId,
    },

    EnergyChanged {
        side: Side,
        delta: i32,
        energy: i32,
    },

    CarryOverChanged {
        side: Side,
        delta: i32,
        carry_over: i32,
    },

    /// A pile was reordered; `perm[old] = new` over the visible range.
    PileSwapped {
        side: Side,
        pile: PileKind,
        permutation: Vec<usize>,
    },

    GameOver {
        result: GameResult,
    },

    BattleReset,
}

/// FIFO queue of events awaiting the shell.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<BattleEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<BattleEvent> {
        self.events.pop_front()
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        self.events.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }
}
