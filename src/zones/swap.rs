//! The stack reorder engine.
//!
//! Two flavours of swap:
//!
//! - **hard**: the two endpoint cards trade places, nothing else moves.
//!   Adjacent endpoints always swap hard.
//! - **soft** (insertion): the moving card is lifted out and reinserted at
//!   the target; every swappable card in between shifts one slot back
//!   toward the vacated position. Unswappable cards inside the range stay
//!   pinned at their index and the flow skips over them.
//!
//! Both return the permutation `perm[old_index] = new_index` over the
//! visible range so a presentation layer can animate the move.

use tracing::debug;

use super::deck::Deck;
use crate::error::SwapRejection;

impl Deck {
    /// Reorder the visible head of the pile.
    ///
    /// `view_size` bounds the addressable range; it is further clamped to
    /// the pile length. With `bypass` set, both the pile's and the cards'
    /// swappability are ignored.
    ///
    /// ## Example
    ///
    /// ```
    /// use stack_battle::cards::{CardId, CardInstance, CardTemplate, InstanceId};
    /// use stack_battle::zones::Deck;
    ///
    /// let cards = ["A", "B", "C", "D", "E"]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, t)| {
    ///         let template = CardTemplate::new(CardId::new(i as u32), *t, 1);
    ///         CardInstance::from_template(InstanceId(i as u32), &template)
    ///     })
    ///     .collect();
    /// let mut deck = Deck::from_cards(cards, true);
    ///
    /// let perm = deck.swap(5, 0, 3, false, false).unwrap();
    /// assert_eq!(perm, vec![3, 0, 1, 2, 4]);
    /// assert_eq!(deck.titles(), vec!["B", "C", "D", "A", "E"]);
    /// ```
    pub fn swap(
        &mut self,
        view_size: usize,
        current: usize,
        target: usize,
        hard: bool,
        bypass: bool,
    ) -> Result<Vec<usize>, SwapRejection> {
        if !self.swappable && !bypass {
            return Err(SwapRejection::StackLocked);
        }

        let limit = view_size.min(self.len());
        for index in [current, target] {
            if index >= limit {
                return Err(SwapRejection::OutOfView { index, limit });
            }
        }
        if current == target {
            return Err(SwapRejection::SameIndex(current));
        }
        if !bypass {
            for index in [current, target] {
                if !self.is_swappable_at(index) {
                    return Err(SwapRejection::CardLocked(index));
                }
            }
        }

        let mut perm: Vec<usize> = (0..limit).collect();

        if hard || current.abs_diff(target) == 1 {
            self.cards_mut().swap(current, target);
            perm[current] = target;
            perm[target] = current;
            debug!(current, target, "hard swap");
            return Ok(perm);
        }

        let toward_top = current > target;
        let (lo, hi) = if toward_top {
            (target, current)
        } else {
            (current, target)
        };

        // Slots that take part in the reflow; pinned cards keep theirs.
        let slots: Vec<usize> = (lo..=hi)
            .filter(|&i| bypass || self.is_swappable_at(i))
            .collect();

        // origin[k] = old index of the card that lands in slots[k].
        let mut origin = slots.clone();
        let cards = self.cards_mut();
        if toward_top {
            origin.rotate_right(1);
            for k in (1..slots.len()).rev() {
                cards.swap(slots[k], slots[k - 1]);
            }
        } else {
            origin.rotate_left(1);
            for k in 0..slots.len() - 1 {
                cards.swap(slots[k], slots[k + 1]);
            }
        }

        for (slot, old) in slots.iter().zip(&origin) {
            perm[*old] = *slot;
        }
        debug!(current, target, reflowed = slots.len(), "soft swap");
        Ok(perm)
    }

    fn is_swappable_at(&self, index: usize) -> bool {
        self.get(index).is_some_and(|c| c.swappable())
    }
}
