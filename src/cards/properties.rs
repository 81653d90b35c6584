//! Card properties.
//!
//! Properties are keyword flags a card carries. Templates declare them and
//! instances may gain more at runtime (a MakeUnswappable effect adds
//! `Unswappable` to the selected cards).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// The card is pinned at its index; reorders flow around it.
    Unswappable,
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::Unswappable => write!(f, "Unswappable"),
        }
    }
}

/// An ordered, duplicate-free set of properties.
///
/// Cards carry zero or one property in practice, so this stays inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet(SmallVec<[Property; 2]>);

impl PropertySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Returns `false` if it was already present.
    pub fn insert(&mut self, property: Property) -> bool {
        if self.contains(property) {
            return false;
        }
        self.0.push(property);
        true
    }

    #[must_use]
    pub fn contains(&self, property: Property) -> bool {
        self.0.contains(&property)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.iter().copied()
    }

    /// Comma-separated names, e.g. `"Unswappable"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for property in iter {
            set.insert(property);
        }
        set
    }
}
