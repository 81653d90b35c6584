//! Pile addressing for console-style callers.
//!
//! Accepts the short tokens a debug console uses: `ps` / `es` for stacks,
//! `pd` / `ed` for discards, `pe` / `ee` for exiles, plus the long forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::error::LookupError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Stack,
    Discard,
    Exile,
}

/// One of the six piles in a battle.
///
/// ```
/// use stack_battle::core::Side;
/// use stack_battle::zones::{PileKind, PileRef};
///
/// let pile: PileRef = "ed".parse().unwrap();
/// assert_eq!(pile, PileRef::new(Side::Enemy, PileKind::Discard));
/// assert!("graveyard".parse::<PileRef>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileRef {
    pub side: Side,
    pub kind: PileKind,
}

impl PileRef {
    #[must_use]
    pub const fn new(side: Side, kind: PileKind) -> Self {
        Self { side, kind }
    }

    #[must_use]
    pub const fn stack(side: Side) -> Self {
        Self::new(side, PileKind::Stack)
    }
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            PileKind::Stack => "stack",
            PileKind::Discard => "discard",
            PileKind::Exile => "exile",
        };
        write!(f, "{} {}", self.side, kind)
    }
}

impl FromStr for PileRef {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use PileKind::*;
        use Side::*;

        // "player discard" and "PlayerDiscard" name the same pile.
        let token: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let (side, kind) = match token.as_str() {
            "playerstack" | "player" | "stack" | "ps" | "p" | "s" => (Player, Stack),
            "enemystack" | "enemy" | "es" | "e" => (Enemy, Stack),
            "playerdiscard" | "discard" | "pd" | "d" => (Player, Discard),
            "enemydiscard" | "ed" => (Enemy, Discard),
            "playerexile" | "exile" | "pe" | "x" => (Player, Exile),
            "enemyexile" | "ee" => (Enemy, Exile),
            _ => return Err(LookupError::UnknownPile(s.to_string())),
        };
        Ok(Self::new(side, kind))
    }
}
