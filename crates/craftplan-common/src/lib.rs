//! # Craftplan Common
//!
//! Common types shared by the craftplan crates:
//! - Ingredient identifiers and ordered ingredient pairs
//! - Schema error types reported by the input loaders
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_same_inputs_ignores_order() {
        let ab = IngredientPair::new("A", "B");
        let ba = IngredientPair::new("B", "A");
        let ac = IngredientPair::new("A", "C");

        assert!(ab.same_inputs(&ba));
        assert!(ab.same_inputs(&ab));
        assert!(!ab.same_inputs(&ac));
        assert_ne!(ab, ba);
        assert_eq!(ab.to_string(), "(A, B)");
    }

    #[test]
    fn test_ingredient_id_display_and_serde() {
        let id = IngredientId::from("Moonstone");
        assert_eq!(id.to_string(), "Moonstone");
        assert_eq!(id.as_str(), "Moonstone");

        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"Moonstone\"");
    }

    #[test]
    fn test_schema_error_line() {
        let err = SchemaError::RowLength {
            line: 4,
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(SchemaError::MissingHeader.line(), None);
        assert!(err.to_string().contains("line 4"));
    }
}
