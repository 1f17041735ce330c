//! Ordered ingredient catalog.
//!
//! The catalog order is significant: it is the canonical order used when
//! pairing ingredients and when breaking efficiency ties between routes.

use ahash::AHashMap;
use craftplan_common::IngredientId;
use thiserror::Error;

/// Catalog error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Ingredient listed twice
    #[error("Ingredient {0} already exists in the catalog")]
    Duplicate(IngredientId),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The ordered set of known ingredients.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    /// Ingredients in canonical order
    order: Vec<IngredientId>,
    /// Position of each ingredient in `order`
    index: AHashMap<IngredientId, usize>,
}

impl IngredientCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from ingredients in canonical order.
    pub fn from_ingredients<I, T>(ingredients: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<IngredientId>,
    {
        let mut catalog = Self::new();
        for ingredient in ingredients {
            catalog.push(ingredient.into())?;
        }
        Ok(catalog)
    }

    /// Appends an ingredient at the end of the canonical order.
    pub fn push(&mut self, ingredient: IngredientId) -> CatalogResult<()> {
        if self.index.contains_key(&ingredient) {
            return Err(CatalogError::Duplicate(ingredient));
        }
        self.index.insert(ingredient.clone(), self.order.len());
        self.order.push(ingredient);
        Ok(())
    }

    /// Returns true if the ingredient is known.
    #[must_use]
    pub fn contains(&self, ingredient: &IngredientId) -> bool {
        self.index.contains_key(ingredient)
    }

    /// Returns the canonical position of an ingredient.
    #[must_use]
    pub fn position(&self, ingredient: &IngredientId) -> Option<usize> {
        self.index.get(ingredient).copied()
    }

    /// Returns the ingredient at a canonical position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IngredientId> {
        self.order.get(position)
    }

    /// Returns the number of ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates ingredients in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &IngredientId> {
        self.order.iter()
    }

    /// Iterates every unordered pair once, as `(i, j)` with `position(i) <= position(j)`.
    pub fn canonical_pairs(&self) -> impl Iterator<Item = (&IngredientId, &IngredientId)> {
        self.order
            .iter()
            .enumerate()
            .flat_map(move |(i, first)| self.order[i..].iter().map(move |second| (first, second)))
    }
}
