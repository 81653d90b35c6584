//! Battle participants.
//!
//! An `Entity` is one side of the battle: its Stack, Discard and Exile piles
//! plus view size and energy counters. The session builds both entities
//! from [`EntityBaseStats`] at every fresh battle.
//!
//! ## Energy
//!
//! `current_energy` is what the next card's cost is checked against. At the
//! start of the entity's turn it is reset to
//! `base_energy + energy_modifier + carry_over_energy`, and carry-over is
//! consumed.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::config::EntityBaseStats;
use super::rng::GameRng;
use super::side::Side;
use crate::cards::{CardRegistry, InstanceIdAllocator};
use crate::error::BattleError;
use crate::zones::{Deck, PileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub side: Side,

    pub stack: Deck,
    pub discard: Deck,
    pub exile: Deck,

    pub base_view_size: i32,
    pub view_size_modifier: i32,

    pub base_energy: i32,
    pub energy_modifier: i32,
    pub carry_over_energy: i32,
    pub current_energy: i32,

    pub shuffle_at_start: bool,
}

impl Entity {
    /// A side with no cards and zeroed counters, held before the first setup.
    #[must_use]
    pub fn empty(side: Side) -> Self {
        Self {
            name: side.to_string(),
            side,
            stack: Deck::new(side.is_player()),
            discard: Deck::new(true),
            exile: Deck::new(true),
            base_view_size: 0,
            view_size_modifier: 0,
            base_energy: 0,
            energy_modifier: 0,
            carry_over_energy: 0,
            current_energy: 0,
            shuffle_at_start: false,
        }
    }

    /// Build an entity with its starting stack instantiated from `registry`.
    ///
    /// Instances are allocated in deck order, then the stack is shuffled if
    /// the stats ask for it.
    pub fn from_stats(
        stats: &EntityBaseStats,
        side: Side,
        stack_swappable: bool,
        registry: &CardRegistry,
        ids: &mut InstanceIdAllocator,
        rng: &mut GameRng,
    ) -> Result<Self, BattleError> {
        stats.validate()?;

        let cards = stats
            .deck
            .iter()
            .map(|&id| registry.instantiate(id, ids))
            .collect::<Result<Vec<_>, _>>()?;
        let mut stack = Deck::from_cards(cards, stack_swappable);
        if stats.shuffle_at_start {
            stack.shuffle(rng);
        }

        Ok(Self {
            name: stats.name.clone(),
            side,
            stack,
            discard: Deck::new(true),
            exile: Deck::new(true),
            base_view_size: stats.base_view_size,
            view_size_modifier: 0,
            base_energy: stats.base_energy,
            energy_modifier: 0,
            carry_over_energy: 0,
            current_energy: 0,
            shuffle_at_start: stats.shuffle_at_start,
        })
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        self.side.is_player()
    }

    /// `base + modifier`, clamped at zero.
    #[must_use]
    pub fn view_size(&self) -> usize {
        (self.base_view_size + self.view_size_modifier).max(0) as usize
    }

    /// Start-of-turn energy refill. Consumes carry-over.
    pub fn reset_energy(&mut self) {
        self.current_energy = self.base_energy + self.energy_modifier + self.carry_over_energy;
        self.carry_over_energy = 0;
    }

    /// Clear everything a level reload discards. The stack and base
    /// numbers stay as they are.
    pub fn reset_temporary_stats(&mut self) {
        self.discard.clear();
        self.exile.clear();
        self.view_size_modifier = 0;
        self.energy_modifier = 0;
        self.carry_over_energy = 0;
        self.current_energy = 0;
    }

    /// Whether the top card is affordable right now.
    #[must_use]
    pub fn can_execute_top(&self) -> bool {
        self.stack
            .top()
            .is_some_and(|card| card.energy_cost <= self.current_energy)
    }

    #[must_use]
    pub fn pile(&self, kind: PileKind) -> &Deck {
        match kind {
            PileKind::Stack => &self.stack,
            PileKind::Discard => &self.discard,
            PileKind::Exile => &self.exile,
        }
    }

    /// Multi-line snapshot of every counter and pile.
    #[must_use]
    pub fn debug_status(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} : ------------------------", self.name);
        let _ = writeln!(out, "- IsPlayer       : {}", self.is_player());
        let _ = writeln!(out, "- BaseViewSize   : {}", self.base_view_size);
        let _ = writeln!(out, "- ViewSizeMod    : {}", self.view_size_modifier);
        let _ = writeln!(out, "- ViewSize       : {}", self.view_size());
        let _ = writeln!(out, "- BaseEnergy     : {}", self.base_energy);
        let _ = writeln!(out, "- EnergyModifier : {}", self.energy_modifier);
        let _ = writeln!(out, "- CarryOverEnergy: {}", self.carry_over_energy);
        let _ = writeln!(out, "- CurrentEnergy  : {}", self.current_energy);
        let _ = writeln!(out, "- ShuffleAtStart : {}", self.shuffle_at_start);
        let _ = writeln!(out, " ------ Stack ({}) ------", self.stack.len());
        out.push_str(&self.stack.print_contents());
        let _ = writeln!(out, " ----- Discard ({}) -----", self.discard.len());
        out.push_str(&self.discard.print_contents());
        let _ = writeln!(out, " ------ Exile ({}) ------", self.exile.len());
        out.push_str(&self.exile.print_contents());
        out
    }
}
