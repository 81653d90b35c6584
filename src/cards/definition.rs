//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable definition of a card: title, cost,
//! rarity and the effect lists. Battles never mutate a template; every card
//! in a pile is a [`CardInstance`](super::CardInstance) copied from one.

use serde::{Deserialize, Serialize};

use super::properties::{Property, PropertySet};
use crate::effects::EffectSpec;

/// Unique identifier for a card template.
///
/// This identifies the "type" of card (e.g., "Junk"), not a specific
/// instance in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Undefined,
    Common,
    Uncommon,
    Rare,
    Mythic,
    Enemy,
    Token,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use stack_battle::cards::{CardId, CardTemplate, Rarity};
/// use stack_battle::effects::{EffectMode, EffectSpec, EffectTarget};
///
/// let zap = CardTemplate::new(CardId::new(1), "Zap", 1)
///     .with_rarity(Rarity::Common)
///     .with_effect(EffectSpec::delete(1, EffectTarget::Opponent, EffectMode::Top));
///
/// assert_eq!(zap.display_text(), "Zap [1]");
/// assert!(zap.swappable);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,

    pub title: String,

    pub energy_cost: i32,

    #[serde(default)]
    pub rarity: Rarity,

    /// Whether instances may be reordered. `false` pins every instance.
    #[serde(default = "default_swappable")]
    pub swappable: bool,

    #[serde(default)]
    pub properties: PropertySet,

    /// Resolved when the card executes from the top of the stack.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,

    /// Resolved only when a Delete effect removes the card.
    #[serde(default)]
    pub on_delete_effects: Vec<EffectSpec>,

    /// Replaces the generated effect description when set.
    #[serde(default)]
    pub description_override: Option<String>,
}

fn default_swappable() -> bool {
    true
}

impl CardTemplate {
    /// Create a swappable template with no effects.
    #[must_use]
    pub fn new(id: CardId, title: impl Into<String>, energy_cost: i32) -> Self {
        Self {
            id,
            title: title.into(),
            energy_cost,
            rarity: Rarity::Common,
            swappable: true,
            properties: PropertySet::new(),
            effects: Vec::new(),
            on_delete_effects: Vec::new(),
            description_override: None,
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Mark instances of this template as pinned in their stack.
    #[must_use]
    pub fn unswappable(mut self) -> Self {
        self.swappable = false;
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.insert(property);
        self
    }

    /// Append an on-execute effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append an on-delete effect (builder pattern).
    #[must_use]
    pub fn with_on_delete(mut self, effect: EffectSpec) -> Self {
        self.on_delete_effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description_override = Some(description.into());
        self
    }

    /// The property set an instance starts with.
    ///
    /// Folds the `swappable` flag into the set so instances only have one
    /// source of truth.
    #[must_use]
    pub fn instance_properties(&self) -> PropertySet {
        let mut properties = self.properties.clone();
        if !self.swappable {
            properties.insert(Property::Unswappable);
        }
        properties
    }

    /// Short label used in listings: `"Title [cost]"`.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} [{}]", self.title, self.energy_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_template_builder() {
        let card = CardTemplate::new(CardId::new(1), "Wall", 2)
            .with_rarity(Rarity::Rare)
            .unswappable()
            .with_description("Stays put.");

        assert_eq!(card.title, "Wall");
        assert_eq!(card.energy_cost, 2);
        assert_eq!(card.rarity, Rarity::Rare);
        assert!(!card.swappable);
        assert_eq!(card.description_override.as_deref(), Some("Stays put."));
    }

    #[test]
    fn test_instance_properties_fold_swappable() {
        let free = CardTemplate::new(CardId::new(1), "Free", 1);
        assert!(!free.instance_properties().contains(Property::Unswappable));

        let pinned = CardTemplate::new(CardId::new(2), "Pinned", 1).unswappable();
        assert!(pinned.instance_properties().contains(Property::Unswappable));
        assert!(pinned.properties.is_empty());
    }

    #[test]
    fn test_template_from_json_defaults() {
        let json = r#"{ "id": 3, "title": "Blank", "energy_cost": 0 }"#;
        let card: CardTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new(3));
        assert!(card.swappable);
        assert_eq!(card.rarity, Rarity::Undefined);
        assert!(card.effects.is_empty());
        assert!(card.description_override.is_none());
    }
}
