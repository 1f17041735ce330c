//! Schema error types shared by the input loaders.

use thiserror::Error;

/// Shape and content violations found while reading tabular input.
///
/// Every variant is fatal: the run stops at the first one reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Recipe matrix had no header line
    #[error("Recipe data has no ingredient header")]
    MissingHeader,

    /// Inventory header did not match the expected column names
    #[error("Invalid inventory header on line {line}: expected `{expected}`, got `{actual}`")]
    InvalidHeader {
        /// 1-based line number
        line: usize,
        /// Expected header text
        expected: String,
        /// Header text found
        actual: String,
    },

    /// Same ingredient listed twice in the header
    #[error("Ingredient {name} already exists in the header (line {line})")]
    DuplicateIngredient {
        /// 1-based line number
        line: usize,
        /// Ingredient name
        name: String,
    },

    /// Row did not have one cell per catalog ingredient
    #[error("Row length {actual} on line {line} does not match expected {expected}")]
    RowLength {
        /// 1-based line number
        line: usize,
        /// Expected number of cells
        expected: usize,
        /// Number of cells found
        actual: usize,
    },

    /// Row or inventory entry names an ingredient missing from the catalog
    #[error("Ingredient {name} on line {line} is not in the catalog")]
    UnknownIngredient {
        /// 1-based line number
        line: usize,
        /// Ingredient name
        name: String,
    },

    /// Ordered pair defined twice
    #[error("Recipe for ({first}, {second}) already exists (line {line})")]
    DuplicateRecipe {
        /// 1-based line number
        line: usize,
        /// First input
        first: String,
        /// Second input
        second: String,
    },

    /// Quantity that is not a non-negative integer
    #[error("Invalid quantity for ingredient {name} on line {line}: {value}")]
    InvalidQuantity {
        /// 1-based line number
        line: usize,
        /// Ingredient name
        name: String,
        /// Raw cell text
        value: String,
    },

    /// Inventory lists the same ingredient twice
    #[error("Ingredient {name} already exists in inventory (line {line})")]
    DuplicateInventoryEntry {
        /// 1-based line number
        line: usize,
        /// Ingredient name
        name: String,
    },
}

impl SchemaError {
    /// Returns the 1-based line the violation was found on, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MissingHeader => None,
            Self::InvalidHeader { line, .. }
            | Self::DuplicateIngredient { line, .. }
            | Self::RowLength { line, .. }
            | Self::UnknownIngredient { line, .. }
            | Self::DuplicateRecipe { line, .. }
            | Self::InvalidQuantity { line, .. }
            | Self::DuplicateInventoryEntry { line, .. } => Some(*line),
        }
    }
}

/// Result type alias for schema checks.
pub type SchemaResult<T> = Result<T, SchemaError>;
