//! Results returned across the presentation boundary.

use serde::{Deserialize, Serialize};

use super::state::BattleState;
use crate::cards::CardInstance;
use crate::error::SwapRejection;
use crate::rules::GameResult;

/// Why an execute step did not run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    /// The top card costs more than the side has left. Normal end of a
    /// side's execution for this turn.
    InsufficientEnergy { cost: i32, available: i32 },
    /// The action is not legal in this phase (or for this side).
    WrongPhase(BattleState),
    /// The pointer is holding a card.
    CardHeld,
    /// Strict drain mode and events from the last pass are still queued.
    EventsPending,
    /// The side already executed `steps` cards this turn.
    StepLimit { steps: usize },
    /// The side has no card to execute. The game-over check normally
    /// reports this first.
    EmptyStack,
}

/// Result of one execute step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    /// The card as it was when it left the stack.
    Executed(CardInstance),
    Blocked(BlockReason),
    GameOver(GameResult),
}

impl ExecutionOutcome {
    /// Whether another step could follow this one in the same pass.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, ExecutionOutcome::Executed(_))
    }
}

/// Result of a reorder request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// `perm[old_index] = new_index` over the visible range.
    Applied(Vec<usize>),
    Rejected(SwapRejection),
}
