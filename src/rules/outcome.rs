//! Game-over detection.

use serde::{Deserialize, Serialize};

use crate::core::{Entity, Side, Sides};

/// Result of a finished battle, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The enemy's stack ran out.
    Win,
    /// The player's stack ran out.
    Loss,
    /// Both stacks ran out together.
    Tie,
}

impl GameResult {
    /// Check if `side` won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        matches!(
            (self, side),
            (GameResult::Win, Side::Player) | (GameResult::Loss, Side::Enemy)
        )
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win => write!(f, "win"),
            GameResult::Loss => write!(f, "loss"),
            GameResult::Tie => write!(f, "tie"),
        }
    }
}

/// Inspect both stacks; an empty stack loses.
///
/// Returns `None` while both sides still have cards.
#[must_use]
pub fn check_game_over(entities: &Sides<Entity>) -> Option<GameResult> {
    let player_out = entities[Side::Player].stack.is_empty();
    let enemy_out = entities[Side::Enemy].stack.is_empty();
    match (player_out, enemy_out) {
        (true, true) => Some(GameResult::Tie),
        (false, true) => Some(GameResult::Win),
        (true, false) => Some(GameResult::Loss),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardRegistry, CardTemplate, InstanceIdAllocator};
    use crate::core::{EntityBaseStats, GameRng};

    fn entities(player_cards: usize, enemy_cards: usize) -> Sides<Entity> {
        let registry =
            CardRegistry::from_templates([CardTemplate::new(CardId::new(1), "Zap", 1)]).unwrap();
        let mut ids = InstanceIdAllocator::new();
        let mut rng = GameRng::new(0);
        Sides::from_fn(|side| {
            let count = if side.is_player() { player_cards } else { enemy_cards };
            let stats =
                EntityBaseStats::new(side.to_string(), 1, 3).with_deck(vec![CardId::new(1); count]);
            Entity::from_stats(&stats, side, true, &registry, &mut ids, &mut rng).unwrap()
        })
    }

    #[test]
    fn test_check_game_over() {
        assert_eq!(check_game_over(&entities(1, 1)), None);
        assert_eq!(check_game_over(&entities(1, 0)), Some(GameResult::Win));
        assert_eq!(check_game_over(&entities(0, 2)), Some(GameResult::Loss));
        assert_eq!(check_game_over(&entities(0, 0)), Some(GameResult::Tie));
    }

    #[test]
    fn test_is_winner() {
        assert!(GameResult::Win.is_winner(Side::Player));
        assert!(GameResult::Loss.is_winner(Side::Enemy));
        assert!(!GameResult::Tie.is_winner(Side::Player));
        assert!(!GameResult::Tie.is_winner(Side::Enemy));
    }
}
