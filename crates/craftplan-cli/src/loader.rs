//! Recipe matrix and inventory CSV loading.
//!
//! This module provides:
//! - Parsing the recipe matrix into a catalog and recipe table
//! - Parsing the inventory snapshot against that catalog
//! - Schema validation with 1-based line numbers
//!
//! Every violation is fatal; nothing is skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use craftplan_common::{IngredientId, IngredientPair, SchemaError};
use craftplan_core::{CatalogError, IngredientCatalog, Inventory, RecipeError, RecipeOutcome, RecipeTable};
use thiserror::Error;
use tracing::{debug, info};

/// Header cell skipped in the recipe matrix.
const CORNER_CELL: &str = "X";

/// Comment prefix in the recipe matrix.
const COMMENT_PREFIX: &str = "//";

/// Required inventory header.
pub const INVENTORY_HEADER: &str = "Ingredient,Quantity";

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File not found.
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read {path}: {source}")]
    ReadError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Malformed content.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Catalog rejected an ingredient.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Recipe table rejected a recipe.
    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Catalog and recipes read from the recipe matrix.
#[derive(Debug, Clone)]
pub struct RecipeData {
    /// Ingredients in header order.
    pub catalog: IngredientCatalog,
    /// Every non-empty cell, in file order.
    pub recipes: RecipeTable,
    /// Physical lines in the file, comments and blanks included.
    pub lines_read: usize,
}

/// Inventory read from the inventory file.
#[derive(Debug, Clone)]
pub struct InventoryData {
    /// Counts for every catalog ingredient; unlisted ones hold zero.
    pub inventory: Inventory,
    /// Physical lines in the file.
    pub lines_read: usize,
    /// Ingredient lines accepted.
    pub entries: usize,
}

/// Content lines with their 1-based numbers, `\r` stripped, blanks dropped.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parses a cell as `"<n> <result>"` or a bare result with yield 1.
///
/// Returns `None` for an empty cell.
fn parse_cell(cell: &str) -> Option<RecipeOutcome> {
    if cell.is_empty() {
        return None;
    }
    if let Some((count, result)) = cell.split_once(' ') {
        if let Ok(quantity) = count.parse::<u32>() {
            if quantity > 0 && !result.trim().is_empty() {
                return Some(RecipeOutcome::new(quantity, result.trim()));
            }
        }
    }
    Some(RecipeOutcome::one(cell))
}

/// Parses the recipe matrix.
pub fn parse_recipes(text: &str) -> LoadResult<RecipeData> {
    let mut lines = content_lines(text).filter(|(_, line)| !line.trim_start().starts_with(COMMENT_PREFIX));

    let (header_line, header) = lines.next().ok_or(SchemaError::MissingHeader)?;
    let mut catalog = IngredientCatalog::new();
    for cell in split_cells(header) {
        if cell == CORNER_CELL {
            continue;
        }
        let ingredient = IngredientId::new(cell);
        if catalog.contains(&ingredient) {
            return Err(SchemaError::DuplicateIngredient {
                line: header_line,
                name: cell.to_string(),
            }
            .into());
        }
        catalog.push(ingredient)?;
    }
    debug!("Catalog header: {} ingredient(s)", catalog.len());

    let mut recipes = RecipeTable::new();
    for (line, row) in lines {
        let cells = split_cells(row);
        if cells.len() != catalog.len() + 1 {
            return Err(SchemaError::RowLength {
                line,
                expected: catalog.len() + 1,
                actual: cells.len(),
            }
            .into());
        }

        let first = IngredientId::new(cells[0]);
        if !catalog.contains(&first) {
            return Err(SchemaError::UnknownIngredient {
                line,
                name: cells[0].to_string(),
            }
            .into());
        }

        for (second, cell) in catalog.iter().zip(&cells[1..]) {
            let Some(outcome) = parse_cell(cell) else {
                continue;
            };
            let pair = IngredientPair::new(first.clone(), second.clone());
            if recipes.get(&pair).is_some() {
                return Err(SchemaError::DuplicateRecipe {
                    line,
                    first: first.to_string(),
                    second: second.to_string(),
                }
                .into());
            }
            recipes.register(pair, outcome)?;
        }
    }

    Ok(RecipeData {
        catalog,
        recipes,
        lines_read: text.lines().count(),
    })
}

/// Parses the inventory against `catalog`.
pub fn parse_inventory(text: &str, catalog: &IngredientCatalog) -> LoadResult<InventoryData> {
    let mut lines = content_lines(text);
    let mut inventory = Inventory::new();
    let mut entries = 0;

    if let Some((line, header)) = lines.next() {
        if header.trim() != INVENTORY_HEADER {
            return Err(SchemaError::InvalidHeader {
                line,
                expected: INVENTORY_HEADER.to_string(),
                actual: header.to_string(),
            }
            .into());
        }
    }

    for (line, row) in lines {
        let cells = split_cells(row);
        if cells.len() != 2 {
            return Err(SchemaError::RowLength {
                line,
                expected: 2,
                actual: cells.len(),
            }
            .into());
        }

        let (name, raw) = (cells[0], cells[1]);
        let quantity = raw.parse::<u32>().map_err(|_| SchemaError::InvalidQuantity {
            line,
            name: name.to_string(),
            value: raw.to_string(),
        })?;

        let ingredient = IngredientId::new(name);
        if !catalog.contains(&ingredient) {
            return Err(SchemaError::UnknownIngredient {
                line,
                name: name.to_string(),
            }
            .into());
        }
        if inventory.iter().any(|(id, _)| id == &ingredient) {
            return Err(SchemaError::DuplicateInventoryEntry {
                line,
                name: name.to_string(),
            }
            .into());
        }

        debug!("Adding to inventory: {ingredient} => {quantity}");
        inventory.add(ingredient, quantity);
        entries += 1;
    }

    for ingredient in catalog.iter() {
        inventory.add(ingredient.clone(), 0);
    }

    Ok(InventoryData {
        inventory,
        lines_read: text.lines().count(),
        entries,
    })
}

fn read_input(path: &Path) -> LoadResult<String> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the recipe matrix from `path`.
pub fn load_recipes(path: &Path) -> LoadResult<RecipeData> {
    let data = parse_recipes(&read_input(path)?)?;
    info!(
        "Loaded {} recipe(s) over {} ingredient(s) from {}",
        data.recipes.len(),
        data.catalog.len(),
        path.display()
    );
    Ok(data)
}

/// Loads the inventory from `path`.
pub fn load_inventory(path: &Path, catalog: &IngredientCatalog) -> LoadResult<InventoryData> {
    let data = parse_inventory(&read_input(path)?, catalog)?;
    info!(
        "Loaded {} inventory entr(ies), {} unit(s), from {}",
        data.entries,
        data.inventory.total(),
        path.display()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MATRIX: &str = "\
// sample workshop
X,A,B,C
A,Wildcards,C,4 Wildcards
B,C,,
C,4 Wildcards,,
";

    fn catalog() -> IngredientCatalog {
        IngredientCatalog::from_ingredients(["A", "B", "C"]).expect("catalog")
    }

    fn schema_error(result: LoadResult<impl std::fmt::Debug>) -> SchemaError {
        match result {
            Err(LoadError::Schema(e)) => e,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("Dust"), Some(RecipeOutcome::one("Dust")));
        assert_eq!(parse_cell("3 Dust"), Some(RecipeOutcome::new(3, "Dust")));
        assert_eq!(parse_cell("2 Star Dust"), Some(RecipeOutcome::new(2, "Star Dust")));
        assert_eq!(parse_cell("0 Dust"), Some(RecipeOutcome::one("0 Dust")));
        assert_eq!(parse_cell("Old Dust"), Some(RecipeOutcome::one("Old Dust")));
    }

    #[test]
    fn test_parse_recipes() {
        let data = parse_recipes(MATRIX).expect("parse");

        assert_eq!(data.lines_read, 5);
        let names: Vec<_> = data.catalog.iter().map(IngredientId::as_str).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(data.recipes.len(), 5);
        assert_eq!(
            data.recipes.lookup(&"A".into(), &"C".into()),
            Some(&RecipeOutcome::new(4, "Wildcards"))
        );
        assert_eq!(data.recipes.lookup(&"B".into(), &"A".into()), Some(&RecipeOutcome::one("C")));
        assert_eq!(data.recipes.lookup(&"B".into(), &"B".into()), None);
    }

    #[test]
    fn test_parse_recipes_crlf_and_blank_lines() {
        let text = "X,A,B\r\n\r\nA,1 C,\r\nB,,D\r\n";
        let data = parse_recipes(text).expect("parse");
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.recipes.len(), 2);
        assert_eq!(data.recipes.lookup(&"B".into(), &"B".into()), Some(&RecipeOutcome::one("D")));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(schema_error(parse_recipes("// only a comment\n\n")), SchemaError::MissingHeader);
    }

    #[test]
    fn test_duplicate_header_ingredient() {
        let err = schema_error(parse_recipes("X,A,B,A\n"));
        assert_eq!(
            err,
            SchemaError::DuplicateIngredient {
                line: 1,
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn test_row_length_mismatch() {
        let err = schema_error(parse_recipes("X,A,B\nA,C\n"));
        assert_eq!(
            err,
            SchemaError::RowLength {
                line: 2,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_unknown_row_ingredient() {
        let err = schema_error(parse_recipes("X,A\n// note\nZ,C\n"));
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err, SchemaError::UnknownIngredient { .. }));
    }

    #[test]
    fn test_duplicate_recipe_row() {
        let err = schema_error(parse_recipes("X,A,B\nA,C,\nA,D,\n"));
        assert_eq!(
            err,
            SchemaError::DuplicateRecipe {
                line: 3,
                first: "A".to_string(),
                second: "A".to_string()
            }
        );
    }

    #[test]
    fn test_parse_inventory() {
        let text = "Ingredient,Quantity\nA,3\nC,0\n";
        let data = parse_inventory(text, &catalog()).expect("parse");

        assert_eq!(data.lines_read, 3);
        assert_eq!(data.entries, 2);
        assert_eq!(data.inventory.count(&"A".into()), 3);
        assert_eq!(data.inventory.count(&"B".into()), 0);
        assert_eq!(data.inventory.iter().count(), 3);
    }

    #[test]
    fn test_empty_inventory() {
        let data = parse_inventory("", &catalog()).expect("parse");
        assert_eq!(data.entries, 0);
        assert_eq!(data.inventory.total(), 0);
    }

    #[test]
    fn test_inventory_invalid_header() {
        let err = schema_error(parse_inventory("Name,Count\nA,1\n", &catalog()));
        assert!(matches!(err, SchemaError::InvalidHeader { line: 1, .. }));
    }

    #[test]
    fn test_inventory_invalid_lines() {
        let catalog = catalog();
        let cases = [
            ("Ingredient,Quantity\nA,1,2\n", "row length"),
            ("Ingredient,Quantity\nA,-1\n", "quantity"),
            ("Ingredient,Quantity\nA,lots\n", "quantity"),
            ("Ingredient,Quantity\nZ,1\n", "unknown"),
            ("Ingredient,Quantity\nA,1\nA,2\n", "duplicate"),
        ];

        for (text, kind) in cases {
            let err = schema_error(parse_inventory(text, &catalog));
            let matched = match kind {
                "row length" => matches!(err, SchemaError::RowLength { line: 2, .. }),
                "quantity" => matches!(err, SchemaError::InvalidQuantity { line: 2, .. }),
                "unknown" => matches!(err, SchemaError::UnknownIngredient { line: 2, .. }),
                _ => matches!(err, SchemaError::DuplicateInventoryEntry { line: 3, .. }),
            };
            assert!(matched, "{kind}: {err:?}");
        }
    }

    #[test]
    fn test_load_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let recipe_path = temp_dir.path().join("recipeData.csv");
        let inventory_path = temp_dir.path().join("inventoryData.csv");
        fs::write(&recipe_path, MATRIX).expect("write recipes");
        fs::write(&inventory_path, "Ingredient,Quantity\nA,3\nB,1\n").expect("write inventory");

        let recipes = load_recipes(&recipe_path).expect("load recipes");
        let inventory = load_inventory(&inventory_path, &recipes.catalog).expect("load inventory");

        assert_eq!(recipes.catalog.len(), 3);
        assert_eq!(inventory.inventory.total(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_recipes(Path::new("/nonexistent/recipeData.csv"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }
}
