//! Battle orchestration.
//!
//! - `BattleSession`: owns the entities, registry, RNG and event queue, and
//!   exposes every command a shell can issue
//! - `BattleState`: the phase machine
//! - `ExecutionOutcome` / `SwapOutcome`: discriminated results, nothing
//!   panics or errors across this boundary for ordinary player mistakes
//! - `InputGate`: lets the presentation layer veto player actions
//!
//! ## Turn flow
//!
//! ```text
//! setup_battle ──► PlayerTurn ──execute──► PlayerExecution
//!                      │                        │
//!                      └──── end_player_turn ───┘
//!                                  │
//!                             EnemyTurn (runs to completion)
//!                                  │
//!                             PlayerTurn ...
//! ```
//!
//! A game-over check runs at the start of each turn and before every card.

mod execution;
mod gate;
mod outcome;
mod session;
mod state;
mod turn;

pub use execution::ExecuteAll;
pub use gate::{InputGate, NoGate};
pub use outcome::{BlockReason, ExecutionOutcome, SwapOutcome};
pub use session::BattleSession;
pub use state::BattleState;
