//! Ordered card piles.
//!
//! A `Deck` is the single pile type: an entity's Stack, Discard and Exile are
//! all decks. Index 0 is the top of the pile, i.e. the next card to execute
//! for a Stack.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, InstanceId};
use crate::core::GameRng;
use crate::effects::EffectMode;

/// An ordered pile of card instances.
///
/// ## Example
///
/// ```
/// use stack_battle::cards::{CardId, CardInstance, CardTemplate, InstanceId};
/// use stack_battle::zones::Deck;
///
/// let junk = CardTemplate::new(CardId::new(1), "Junk", 0);
/// let mut deck = Deck::new(true);
/// deck.push(CardInstance::from_template(InstanceId(0), &junk));
/// deck.insert(0, CardInstance::from_template(InstanceId(1), &junk));
///
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.top().unwrap().id, InstanceId(1));
/// assert_eq!(deck.position_of(InstanceId(0)), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardInstance>,

    /// Whether player-issued reordering is permitted.
    pub swappable: bool,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Deck {
    #[must_use]
    pub fn new(swappable: bool) -> Self {
        Self {
            cards: Vec::new(),
            swappable,
        }
    }

    #[must_use]
    pub fn from_cards(cards: Vec<CardInstance>, swappable: bool) -> Self {
        Self { cards, swappable }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The next card to execute.
    #[must_use]
    pub fn top(&self) -> Option<&CardInstance> {
        self.cards.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CardInstance> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CardInstance> {
        self.cards.get_mut(index)
    }

    #[must_use]
    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [CardInstance] {
        &mut self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    /// Current index of an instance, found by identity.
    #[must_use]
    pub fn position_of(&self, id: InstanceId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.position_of(id).is_some()
    }

    /// Put a card on the bottom of the pile.
    pub fn push(&mut self, card: CardInstance) {
        debug_assert!(!self.contains(card.id), "{} is already in this pile", card.id);
        self.cards.push(card);
    }

    /// Insert a card at `index`, clamped to the pile length.
    pub fn insert(&mut self, index: usize, card: CardInstance) {
        debug_assert!(index <= self.cards.len(), "insert index {} out of bounds", index);
        debug_assert!(!self.contains(card.id), "{} is already in this pile", card.id);
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    /// Remove and return the card at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CardInstance> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove an instance by identity.
    pub fn remove_by_id(&mut self, id: InstanceId) -> Option<CardInstance> {
        let index = self.position_of(id)?;
        self.remove(index)
    }

    pub fn take_top(&mut self) -> Option<CardInstance> {
        self.remove(0)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Uniformly permute the pile (backward Fisher–Yates).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Pick the positions an effect of `mode` touches.
    ///
    /// Indices are ascending and distinct. `amount == 0` or an empty pile
    /// yields nothing; an undefined mode also yields nothing (the resolver
    /// rejects it before getting here).
    pub fn resolve_indices(
        &self,
        mode: EffectMode,
        amount: usize,
        view_size: usize,
        rng: &mut GameRng,
    ) -> Vec<usize> {
        let count = self.cards.len();
        if amount == 0 || count == 0 {
            return Vec::new();
        }
        match mode {
            EffectMode::Top => (0..amount.min(count)).collect(),
            EffectMode::Bottom => (count.saturating_sub(amount)..count).collect(),
            EffectMode::RandomFromView => rng.sample_indices(view_size.min(count), amount),
            EffectMode::RandomFromDeck => rng.sample_indices(count, amount),
            EffectMode::Undefined => Vec::new(),
        }
    }

    /// Ids of the cards at `indices`, captured before any of them move.
    #[must_use]
    pub fn ids_at(&self, indices: &[usize]) -> Vec<InstanceId> {
        indices
            .iter()
            .filter_map(|&i| self.cards.get(i).map(|c| c.id))
            .collect()
    }

    /// One `"{i}. Title [cost]"` line per card.
    #[must_use]
    pub fn print_contents(&self) -> String {
        let mut out = String::new();
        for (i, card) in self.cards.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i, card.display_text()));
        }
        out
    }

    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.title.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardTemplate};

    fn deck(n: u32) -> Deck {
        let cards = (0..n)
            .map(|i| {
                let t = CardTemplate::new(CardId::new(i), format!("C{}", i), 1);
                CardInstance::from_template(InstanceId(i), &t)
            })
            .collect();
        Deck::from_cards(cards, true)
    }

    #[test]
    fn test_top_and_bottom_indices() {
        let d = deck(5);
        let mut rng = GameRng::new(1);

        assert_eq!(d.resolve_indices(EffectMode::Top, 2, 3, &mut rng), vec![0, 1]);
        assert_eq!(d.resolve_indices(EffectMode::Top, 9, 3, &mut rng), vec![0, 1, 2, 3, 4]);
        assert_eq!(d.resolve_indices(EffectMode::Bottom, 2, 3, &mut rng), vec![3, 4]);
        assert_eq!(d.resolve_indices(EffectMode::Bottom, 9, 3, &mut rng).len(), 5);
        assert!(d.resolve_indices(EffectMode::Top, 0, 3, &mut rng).is_empty());
        assert!(d.resolve_indices(EffectMode::Undefined, 1, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_random_from_view_stays_in_view() {
        let d = deck(7);
        let mut rng = GameRng::new(3);

        for _ in 0..50 {
            let picked = d.resolve_indices(EffectMode::RandomFromView, 2, 3, &mut rng);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
            assert!(picked.iter().all(|&i| i < 3));
        }
        assert_eq!(
            d.resolve_indices(EffectMode::RandomFromView, 5, 3, &mut rng),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_random_from_deck_reaches_tail() {
        let d = deck(6);
        let mut rng = GameRng::new(9);

        let mut seen_tail = false;
        for _ in 0..100 {
            let picked = d.resolve_indices(EffectMode::RandomFromDeck, 1, 2, &mut rng);
            seen_tail |= picked[0] >= 2;
        }
        assert!(seen_tail);
    }

    #[test]
    fn test_empty_pile_resolves_nothing() {
        let d = Deck::new(true);
        let mut rng = GameRng::new(0);
        assert!(d.resolve_indices(EffectMode::RandomFromDeck, 3, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_remove_by_id_after_shift() {
        let mut d = deck(4);
        let ids = d.ids_at(&[1, 3]);

        assert_eq!(d.remove_by_id(ids[0]).unwrap().title, "C1");
        assert_eq!(d.remove_by_id(ids[1]).unwrap().title, "C3");
        assert_eq!(d.titles(), vec!["C0", "C2"]);
    }

    #[test]
    fn test_print_contents() {
        let d = deck(2);
        assert_eq!(d.print_contents(), "0. C0 [1]\n1. C1 [1]\n");
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut d = deck(10);
        d.shuffle(&mut GameRng::new(42));

        let mut ids: Vec<_> = d.iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }
}
