//! Turn hand-off.
//!
//! Ending the player's turn runs the whole enemy turn synchronously and
//! starts the next player turn. The enemy has no decision points: it
//! executes its top card until it cannot, or until `max_steps_per_turn`
//! cards have run.

use tracing::{info, warn};

use super::outcome::ExecutionOutcome;
use super::session::BattleSession;
use crate::core::Side;
use crate::error::BattleError;

impl BattleSession {
    /// End the player's turn, forfeiting unspent energy.
    ///
    /// Returns the enemy's execution outcomes, ending with the outcome that
    /// stopped it. If a side's stack is empty when its turn would begin, the
    /// last outcome is `GameOver`.
    pub fn end_player_turn(&mut self) -> Result<Vec<ExecutionOutcome>, BattleError> {
        if !self.state.is_player_turn() {
            warn!(state = %self.state, "end turn outside the player's turn");
            return Err(BattleError::WrongPhase(self.state));
        }
        if self.gate.card_held() {
            warn!("end turn blocked while a card is held");
            return Err(BattleError::CardHeld);
        }
        if self.config.reject_while_events_pending && !self.events.is_empty() {
            warn!(pending = self.events.len(), "end turn blocked until events are drained");
            return Err(BattleError::EventsPending);
        }

        info!(
            unspent = self.entities[Side::Player].current_energy,
            "player turn ended"
        );

        if let Some(result) = self.begin_turn(Side::Enemy) {
            return Ok(vec![ExecutionOutcome::GameOver(result)]);
        }

        let mut outcomes = Vec::new();
        loop {
            let outcome = self.step(Side::Enemy);
            let executed = outcome.is_executed();
            outcomes.push(outcome);
            if !executed {
                break;
            }
        }
        if self.result.is_some() {
            return Ok(outcomes);
        }

        if let Some(result) = self.begin_turn(Side::Player) {
            outcomes.push(ExecutionOutcome::GameOver(result));
        }
        Ok(outcomes)
    }
}
