//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two participants: the human-driven player
//! and the automatic enemy.
//!
//! ## Sides
//!
//! Per-side data storage indexed by `Side`, so code can hold "the player's X"
//! and "the enemy's X" without two parallel fields everywhere.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::LookupError;

/// One of the two battle participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The other participant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Side::Player)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

impl FromStr for Side {
    type Err = LookupError;

    /// Parse a console token (`player`, `pl`, `p`, `enemy`, `e`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" | "pl" | "p" => Ok(Side::Player),
            "enemy" | "e" => Ok(Side::Enemy),
            _ => Err(LookupError::UnknownEntity(s.to_string())),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use stack_battle::core::{Side, Sides};
///
/// let mut energy = Sides::with_value(3);
/// energy[Side::Enemy] -= 1;
/// assert_eq!(energy[Side::Player], 3);
/// assert_eq!(energy[Side::Enemy], 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides<T> {
    player: T,
    enemy: T,
}

impl<T> Sides<T> {
    /// Create from explicit values.
    pub fn new(player: T, enemy: T) -> Self {
        Self { player, enemy }
    }

    /// Create with a factory function receiving each `Side`.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        let player = factory(Side::Player);
        let enemy = factory(Side::Enemy);
        Self { player, enemy }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Enemy, &self.enemy)].into_iter()
    }
}

impl<T> Index<Side> for Sides<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
