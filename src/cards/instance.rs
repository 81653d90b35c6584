//! Card instances - runtime card state.
//!
//! `CardInstance` is a specific card in a specific battle. It is copied from
//! a [`CardTemplate`] when created and owns its own effect lists and
//! property set, so runtime changes (a Transform, a gained `Unswappable`)
//! never reach back into the template.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate, Rarity};
use super::properties::{Property, PropertySet};
use crate::effects::EffectSpec;

/// Unique identifier for a card instance within one battle.
///
/// Allocated in increasing order; never reused within a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic instance ID source, owned by the battle session.
#[derive(Clone, Debug, Default)]
pub struct InstanceIdAllocator {
    next: u32,
}

impl InstanceIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

/// A card in a battle pile.
///
/// ## Invariant
///
/// `swappable() == !properties.contains(Unswappable)`: there is no separate
/// flag to drift out of sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,

    /// Template this instance currently mirrors (changes on Transform).
    pub template: CardId,

    pub title: String,
    pub energy_cost: i32,
    pub rarity: Rarity,
    pub description_override: Option<String>,
    pub properties: PropertySet,
    pub effects: Vec<EffectSpec>,
    pub on_delete_effects: Vec<EffectSpec>,
}

impl CardInstance {
    /// Copy a template into a new instance.
    #[must_use]
    pub fn from_template(id: InstanceId, template: &CardTemplate) -> Self {
        Self {
            id,
            template: template.id,
            title: template.title.clone(),
            energy_cost: template.energy_cost,
            rarity: template.rarity,
            description_override: template.description_override.clone(),
            properties: template.instance_properties(),
            effects: template.effects.clone(),
            on_delete_effects: template.on_delete_effects.clone(),
        }
    }

    /// Re-template in place, keeping the instance ID.
    pub fn set_template(&mut self, template: &CardTemplate) {
        let id = self.id;
        *self = Self::from_template(id, template);
    }

    #[must_use]
    pub fn swappable(&self) -> bool {
        !self.properties.contains(Property::Unswappable)
    }

    /// Pin the card. Returns `false` if it was already pinned.
    pub fn make_unswappable(&mut self) -> bool {
        self.properties.insert(Property::Unswappable)
    }

    /// Short label used in listings: `"Title [cost]"`.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} [{}]", self.title, self.energy_cost)
    }
}
