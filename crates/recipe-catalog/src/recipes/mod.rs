//! Recipe master and recipe ingredient detail tables.

pub mod parser;
pub mod pivot;
pub mod relationship;
pub mod usage;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use parser::{
    read_ingredient_lines, read_ingredient_lines_path, read_recipes, read_recipes_path,
    IngredientLine, IngredientLineTable, Recipe, RecipeTable,
};
pub use pivot::{
    group_by_recipe, summary_rows, IngredientEntry, RecipeIngredients, RecipePivot, SummaryRow,
};
pub use relationship::{coverage_rate, RecipeExample, RelationshipReport};
pub use usage::{count_distribution, IngredientUsage};

#[derive(Debug, thiserror::Error)]
pub enum RecipeTableError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recipe CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{table} is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

pub(crate) fn open_table(path: &Path) -> Result<File, RecipeTableError> {
    File::open(path).map_err(|source| RecipeTableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates an output file prefixed with a UTF-8 byte-order mark so
/// spreadsheet tools pick the right encoding.
pub(crate) fn create_output(path: &Path) -> Result<File, RecipeTableError> {
    let io_error = |source| RecipeTableError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_error)?;
    file.write_all("\u{feff}".as_bytes()).map_err(io_error)?;
    Ok(file)
}
