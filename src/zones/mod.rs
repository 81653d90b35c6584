//! Card piles.
//!
//! - `Deck`: an ordered pile with shuffle and index resolution
//! - the swap engine (`Deck::swap`) for player-issued reordering
//! - `PileRef`: names one of the six piles in a battle

mod deck;
mod pile;
mod swap;

pub use deck::Deck;
pub use pile::{PileKind, PileRef};
