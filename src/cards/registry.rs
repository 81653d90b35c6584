//! Card registry for template lookup.
//!
//! The `CardRegistry` stores every template a battle may reference: the
//! cards in both starting decks plus anything an Add or Transform effect
//! can create.

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardTemplate};
use super::instance::{CardInstance, InstanceIdAllocator};
use crate::effects::validate_template;
use crate::error::ContentError;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use stack_battle::cards::{CardId, CardRegistry, CardTemplate};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new(CardId::new(1), "Junk", 0)).unwrap();
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.title, "Junk");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of templates.
    pub fn from_templates(
        templates: impl IntoIterator<Item = CardTemplate>,
    ) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Register a card template.
    ///
    /// Fails if a template with the same ID already exists.
    pub fn register(&mut self, card: CardTemplate) -> Result<(), ContentError> {
        if self.cards.contains_key(&card.id) {
            return Err(ContentError::DuplicateTemplate(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }

    /// Get a card template, reporting an unknown ID as a content error.
    pub fn require(&self, id: CardId) -> Result<&CardTemplate, ContentError> {
        self.get(id).ok_or(ContentError::UnknownTemplate(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values()
    }

    /// Create a fresh instance of a registered template.
    pub fn instantiate(
        &self,
        id: CardId,
        ids: &mut InstanceIdAllocator,
    ) -> Result<CardInstance, ContentError> {
        let template = self.require(id)?;
        Ok(CardInstance::from_template(ids.alloc(), template))
    }

    /// Content validation pass over every registered template.
    ///
    /// Templates are checked in ID order so the first reported error is
    /// stable across runs.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let template = &self.cards[&id];
            validate_template(template, self).map_err(|e| e.in_card(&template.title))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectMode, EffectSpec, EffectTarget};

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardTemplate::new(CardId::new(1), "Junk", 0))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(CardId::new(1)));
        assert!(registry.get(CardId::new(2)).is_none());
        assert_eq!(
            registry.require(CardId::new(2)),
            Err(ContentError::UnknownTemplate(CardId::new(2)))
        );
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardTemplate::new(CardId::new(1), "Junk", 0))
            .unwrap();

        let result = registry.register(CardTemplate::new(CardId::new(1), "Other", 1));
        assert_eq!(result, Err(ContentError::DuplicateTemplate(CardId::new(1))));
        assert_eq!(registry.get(CardId::new(1)).unwrap().title, "Junk");
    }

    #[test]
    fn test_instantiate_allocates_ids() {
        let registry =
            CardRegistry::from_templates([CardTemplate::new(CardId::new(1), "Junk", 0)]).unwrap();
        let mut ids = InstanceIdAllocator::new();

        let a = registry.instantiate(CardId::new(1), &mut ids).unwrap();
        let b = registry.instantiate(CardId::new(1), &mut ids).unwrap();
        assert_ne!(a.id, b.id);
        assert!(registry.instantiate(CardId::new(9), &mut ids).is_err());
    }

    #[test]
    fn test_validate_reports_card_title() {
        let registry = CardRegistry::from_templates([CardTemplate::new(CardId::new(1), "Spawner", 1)
            .with_effect(EffectSpec::add(1, EffectTarget::Owner, EffectMode::Top, CardId::new(99)))])
        .unwrap();

        let err = registry.validate().unwrap_err();
        assert_eq!(
            err,
            ContentError::UnknownTemplate(CardId::new(99)).in_card("Spawner")
        );
    }
}
