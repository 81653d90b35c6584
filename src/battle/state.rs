//! Battle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the battle is in its turn cycle.
///
/// ```text
/// Setup -> PlayerTurn -> PlayerExecution -> EnemyTurn -> PlayerTurn ...
///                      any -> GameOver
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    #[default]
    Setup,
    /// Player's turn, nothing executed yet.
    PlayerTurn,
    /// Player's turn, at least one execute action taken.
    PlayerExecution,
    EnemyTurn,
    GameOver,
}

impl BattleState {
    /// Either half of the player's turn.
    #[must_use]
    pub fn is_player_turn(self) -> bool {
        matches!(self, BattleState::PlayerTurn | BattleState::PlayerExecution)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == BattleState::GameOver
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BattleState::Setup => "setup",
            BattleState::PlayerTurn => "player turn",
            BattleState::PlayerExecution => "player execution",
            BattleState::EnemyTurn => "enemy turn",
            BattleState::GameOver => "game over",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_player_turn() {
        assert!(BattleState::PlayerTurn.is_player_turn());
        assert!(BattleState::PlayerExecution.is_player_turn());
        assert!(!BattleState::EnemyTurn.is_player_turn());
        assert!(!BattleState::Setup.is_player_turn());
        assert!(BattleState::GameOver.is_terminal());
    }
}
