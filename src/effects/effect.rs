//! Effect definitions.
//!
//! An `EffectSpec` is leaf data: what kind of effect, which entity it hits,
//! which stack positions it selects, how large it is and which template it
//! creates. The only logic here is description rendering and the per-type
//! field requirements the validation pass and the resolver share.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::cards::{CardId, CardRegistry};
use crate::error::ContentError;

/// What an effect does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Content that never set a type. Always rejected.
    #[default]
    Undefined,
    NoEffect,
    /// Stack -> Discard, firing on-delete effects.
    Delete,
    /// Insert new instances of the reference template.
    Add,
    /// Re-template selected cards in place.
    Transform,
    /// Change current energy this turn.
    ModEnergy,
    /// Bank energy for the target's next energy reset.
    ModEnergyNextTurn,
    /// Pin selected cards in place.
    MakeUnswappable,
    /// Stack -> Exile, without on-delete effects.
    Exile,
}

impl EffectType {
    /// Whether the effect acts on a specific entity.
    #[must_use]
    pub fn needs_target(self) -> bool {
        !matches!(self, EffectType::Undefined | EffectType::NoEffect)
    }

    /// Whether the effect selects stack positions.
    #[must_use]
    pub fn needs_mode(self) -> bool {
        matches!(
            self,
            EffectType::Delete
                | EffectType::Add
                | EffectType::Transform
                | EffectType::MakeUnswappable
                | EffectType::Exile
        )
    }

    #[must_use]
    pub fn needs_value(self) -> bool {
        self.needs_target()
    }

    #[must_use]
    pub fn needs_reference(self) -> bool {
        matches!(self, EffectType::Add | EffectType::Transform)
    }
}

/// Which entity an effect hits, relative to the entity resolving it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    #[default]
    Undefined,
    NoTarget,
    /// The entity that owns the resolving card.
    #[serde(rename = "Self")]
    Owner,
    Opponent,
}

/// Which stack positions an effect selects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectMode {
    #[default]
    Undefined,
    Top,
    Bottom,
    /// Uniform without replacement from the visible head of the stack.
    RandomFromView,
    /// Uniform without replacement from the whole stack.
    RandomFromDeck,
}

/// Placeholder for magnitudes computed from battle state.
///
/// No variable sources are defined yet; resolving one is reported as
/// [`ContentError::UnsupportedVariable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableValue;

/// A magnitude descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectValue {
    Constant(i32),
    Variable(VariableValue),
}

impl EffectValue {
    pub fn resolve(&self) -> Result<i32, ContentError> {
        match self {
            EffectValue::Constant(n) => Ok(*n),
            EffectValue::Variable(_) => Err(ContentError::UnsupportedVariable),
        }
    }
}

impl fmt::Display for EffectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectValue::Constant(n) => write!(f, "{}", n),
            EffectValue::Variable(_) => write!(f, "a variable amount"),
        }
    }
}

/// One card effect.
///
/// ## Example
///
/// ```
/// use stack_battle::effects::{EffectMode, EffectSpec, EffectTarget};
///
/// let effect = EffectSpec::delete(2, EffectTarget::Opponent, EffectMode::Top);
/// assert_eq!(
///     effect.to_string(),
///     "Delete 2 cards from the top of the opponent's stack"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    #[serde(rename = "type")]
    pub effect_type: EffectType,

    #[serde(default)]
    pub target: EffectTarget,

    #[serde(default)]
    pub mode: EffectMode,

    /// Ordered magnitudes. Every current effect type reads only the first.
    #[serde(default)]
    pub values: SmallVec<[EffectValue; 2]>,

    /// Template created by Add and Transform.
    #[serde(default)]
    pub reference: Option<CardId>,
}

impl EffectSpec {
    #[must_use]
    pub fn new(effect_type: EffectType, target: EffectTarget, mode: EffectMode) -> Self {
        Self {
            effect_type,
            target,
            mode,
            values: SmallVec::new(),
            reference: None,
        }
    }

    #[must_use]
    pub fn no_effect() -> Self {
        Self::new(EffectType::NoEffect, EffectTarget::NoTarget, EffectMode::Undefined)
    }

    /// Create a delete effect.
    #[must_use]
    pub fn delete(amount: i32, target: EffectTarget, mode: EffectMode) -> Self {
        Self::new(EffectType::Delete, target, mode).with_value(amount)
    }

    /// Create an exile effect.
    #[must_use]
    pub fn exile(amount: i32, target: EffectTarget, mode: EffectMode) -> Self {
        Self::new(EffectType::Exile, target, mode).with_value(amount)
    }

    /// Create an add effect inserting `amount` copies of `card`.
    #[must_use]
    pub fn add(amount: i32, target: EffectTarget, mode: EffectMode, card: CardId) -> Self {
        Self::new(EffectType::Add, target, mode)
            .with_value(amount)
            .with_reference(card)
    }

    /// Create a transform effect turning `amount` cards into `card`.
    #[must_use]
    pub fn transform(amount: i32, target: EffectTarget, mode: EffectMode, card: CardId) -> Self {
        Self::new(EffectType::Transform, target, mode)
            .with_value(amount)
            .with_reference(card)
    }

    #[must_use]
    pub fn mod_energy(amount: i32, target: EffectTarget) -> Self {
        Self::new(EffectType::ModEnergy, target, EffectMode::Undefined).with_value(amount)
    }

    #[must_use]
    pub fn mod_energy_next_turn(amount: i32, target: EffectTarget) -> Self {
        Self::new(EffectType::ModEnergyNextTurn, target, EffectMode::Undefined)
            .with_value(amount)
    }

    #[must_use]
    pub fn make_unswappable(amount: i32, target: EffectTarget, mode: EffectMode) -> Self {
        Self::new(EffectType::MakeUnswappable, target, mode).with_value(amount)
    }

    /// Replace the magnitudes with a single constant.
    #[must_use]
    pub fn with_value(mut self, amount: i32) -> Self {
        self.values = smallvec![EffectValue::Constant(amount)];
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = EffectValue>) -> Self {
        self.values = values.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_reference(mut self, card: CardId) -> Self {
        self.reference = Some(card);
        self
    }

    /// The effect's magnitude: the first value, resolved.
    pub fn amount(&self) -> Result<i32, ContentError> {
        self.values
            .first()
            .ok_or(ContentError::MissingValue {
                effect: self.effect_type,
            })?
            .resolve()
    }

    /// Human-readable description, naming referenced templates by title.
    #[must_use]
    pub fn describe(&self, registry: &CardRegistry) -> String {
        let name = self.reference.map(|id| match registry.get(id) {
            Some(template) => template.title.clone(),
            None => id.to_string(),
        });
        self.render(name.as_deref())
    }

    fn render(&self, reference: Option<&str>) -> String {
        let amount = self
            .values
            .first()
            .map_or_else(|| "?".to_string(), |v| v.to_string());
        let stack = match self.target {
            EffectTarget::Owner => "the owner's stack",
            EffectTarget::Opponent => "the opponent's stack",
            EffectTarget::Undefined | EffectTarget::NoTarget => "an undefined stack",
        };
        let from = match self.mode {
            EffectMode::Top => "from the top of",
            EffectMode::Bottom => "from the bottom of",
            EffectMode::RandomFromView => "randomly from the visible part of",
            EffectMode::RandomFromDeck => "randomly from",
            EffectMode::Undefined => "from somewhere in",
        };
        let reference = reference.unwrap_or("an undefined card");

        match self.effect_type {
            EffectType::Undefined => "Undefined".to_string(),
            EffectType::NoEffect => "Does nothing".to_string(),
            EffectType::Delete => format!("Delete {} cards {} {}", amount, from, stack),
            EffectType::Exile => format!("Exile {} cards {} {}", amount, from, stack),
            EffectType::Add => {
                let into = match self.mode {
                    EffectMode::Top => "to the top of",
                    EffectMode::Bottom => "to the bottom of",
                    EffectMode::RandomFromView => "at random into the visible part of",
                    EffectMode::RandomFromDeck => "at random into",
                    EffectMode::Undefined => "somewhere into",
                };
                format!("Add {} {} {} {}", amount, reference, into, stack)
            }
            EffectType::Transform => {
                format!("Transform {} cards {} {} into {}", amount, from, stack, reference)
            }
            EffectType::MakeUnswappable => {
                format!("Make {} cards {} {} unswappable", amount, from, stack)
            }
            EffectType::ModEnergy => self.render_energy("energy"),
            EffectType::ModEnergyNextTurn => self.render_energy("energy next turn"),
        }
    }

    fn render_energy(&self, suffix: &str) -> String {
        let (gain, magnitude) = match self.values.first() {
            Some(EffectValue::Constant(n)) => (*n >= 0, n.unsigned_abs().to_string()),
            Some(v) => (true, v.to_string()),
            None => (true, "?".to_string()),
        };
        let action = match (self.target, gain) {
            (EffectTarget::Opponent, true) => "The opponent gains",
            (EffectTarget::Opponent, false) => "The opponent loses",
            (_, true) => "Gain",
            (_, false) => "Lose",
        };
        format!("{} {} {}", action, magnitude, suffix)
    }
}

impl fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.reference.map(|id| id.to_string());
        write!(f, "{}", self.render(name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;

    #[test]
    fn test_requirements() {
        assert!(!EffectType::NoEffect.needs_target());
        assert!(EffectType::ModEnergy.needs_target());
        assert!(!EffectType::ModEnergy.needs_mode());
        assert!(EffectType::Exile.needs_mode());
        assert!(EffectType::Transform.needs_reference());
        assert!(!EffectType::Delete.needs_reference());
    }

    #[test]
    fn test_amount() {
        let effect = EffectSpec::delete(3, EffectTarget::Opponent, EffectMode::Top);
        assert_eq!(effect.amount(), Ok(3));

        let empty = EffectSpec::new(EffectType::Delete, EffectTarget::Opponent, EffectMode::Top);
        assert_eq!(
            empty.amount(),
            Err(ContentError::MissingValue {
                effect: EffectType::Delete
            })
        );

        let variable = empty.with_values([EffectValue::Variable(VariableValue)]);
        assert_eq!(variable.amount(), Err(ContentError::UnsupportedVariable));
    }

    #[test]
    fn test_energy_text() {
        assert_eq!(
            EffectSpec::mod_energy(1, EffectTarget::Owner).to_string(),
            "Gain 1 energy"
        );
        assert_eq!(
            EffectSpec::mod_energy(-2, EffectTarget::Owner).to_string(),
            "Lose 2 energy"
        );
        assert_eq!(
            EffectSpec::mod_energy_next_turn(-1, EffectTarget::Opponent).to_string(),
            "The opponent loses 1 energy next turn"
        );
        assert_eq!(
            EffectSpec::mod_energy_next_turn(2, EffectTarget::Owner).to_string(),
            "Gain 2 energy next turn"
        );
    }

    #[test]
    fn test_positional_text() {
        assert_eq!(
            EffectSpec::delete(1, EffectTarget::Owner, EffectMode::RandomFromDeck).to_string(),
            "Delete 1 cards randomly from the owner's stack"
        );
        assert_eq!(
            EffectSpec::make_unswappable(2, EffectTarget::Opponent, EffectMode::Bottom)
                .to_string(),
            "Make 2 cards from the bottom of the opponent's stack unswappable"
        );
        assert_eq!(EffectSpec::no_effect().to_string(), "Does nothing");
    }

    #[test]
    fn test_describe_uses_reference_title() {
        let registry =
            CardRegistry::from_templates([CardTemplate::new(CardId::new(2), "Junk", 0)]).unwrap();
        let add = EffectSpec::add(1, EffectTarget::Owner, EffectMode::Top, CardId::new(2));

        assert_eq!(
            add.describe(&registry),
            "Add 1 Junk to the top of the owner's stack"
        );
        assert_eq!(
            add.to_string(),
            "Add 1 Card(2) to the top of the owner's stack"
        );
    }

    #[test]
    fn test_effect_from_json() {
        let json = r#"{ "type": "Delete", "target": "Self", "mode": "Bottom", "values": [{ "Constant": 2 }] }"#;
        let effect: EffectSpec = serde_json::from_str(json).unwrap();

        assert_eq!(effect, EffectSpec::delete(2, EffectTarget::Owner, EffectMode::Bottom));
        assert!(effect.reference.is_none());
    }
}
