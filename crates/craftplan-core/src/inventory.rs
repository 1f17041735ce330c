//! Ingredient stock counts.

use ahash::AHashMap;
use craftplan_common::IngredientId;
use serde::{Deserialize, Serialize};

use crate::catalog::IngredientCatalog;

/// Quantities on hand. Ingredients never added count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Ingredients and their quantities
    items: AHashMap<IngredientId, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from `(ingredient, quantity)` entries.
    pub fn from_counts<I, T>(counts: I) -> Self
    where
        I: IntoIterator<Item = (T, u32)>,
        T: Into<IngredientId>,
    {
        let mut inventory = Self::new();
        for (item, amount) in counts {
            inventory.add(item.into(), amount);
        }
        inventory
    }

    /// Returns the count of a specific ingredient.
    #[must_use]
    pub fn count(&self, item: &IngredientId) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Adds units of an ingredient.
    pub fn add(&mut self, item: IngredientId, amount: u32) {
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Takes one unit if any is on hand. Returns false when out of stock.
    pub fn take_one(&mut self, item: &IngredientId) -> bool {
        match self.items.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            },
            _ => false,
        }
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.values().map(|&count| u64::from(count)).sum()
    }

    /// Returns an iterator over all entries, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (&IngredientId, u32)> + '_ {
        self.items.iter().map(|(id, &count)| (id, count))
    }

    /// Counts for every catalog ingredient, in catalog order, zeros included.
    #[must_use]
    pub fn in_catalog_order<'c>(&self, catalog: &'c IngredientCatalog) -> Vec<(&'c IngredientId, u32)> {
        catalog.iter().map(|id| (id, self.count(id))).collect()
    }

    /// Non-zero counts in catalog order.
    #[must_use]
    pub fn stocked<'c>(&self, catalog: &'c IngredientCatalog) -> Vec<(&'c IngredientId, u32)> {
        self.in_catalog_order(catalog)
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
