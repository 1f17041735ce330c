//! Identifier types for ingredients and ingredient pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an ingredient (base or composite).
///
/// Identity is by exact string value; no case folding or trimming happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

impl IngredientId {
    /// Creates an ingredient ID from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for IngredientId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for IngredientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered pair of ingredients fed into a two-input combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientPair {
    /// Left input (resolved first when crafting).
    pub first: IngredientId,
    /// Right input.
    pub second: IngredientId,
}

impl IngredientPair {
    /// Creates a new ordered pair.
    #[must_use]
    pub fn new(first: impl Into<IngredientId>, second: impl Into<IngredientId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Checks whether both pairs name the same two ingredients, in any order.
    #[must_use]
    pub fn same_inputs(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl fmt::Display for IngredientPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
