//! Battle rules.
//!
//! - `GameResult`: how a battle ended
//! - `check_game_over`: the termination check the turn engine runs

mod outcome;

pub use outcome::{check_game_over, GameResult};
