use super::{open_table, RecipeTableError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const RECIPE_TABLE: &str = "recipe master table";
const DETAIL_TABLE: &str = "recipe ingredient table";

/// A row of the recipe master table, keyed by `title_zh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "title_zh")]
    pub title: String,
    #[serde(default, deserialize_with = "missing_as_empty")]
    pub intent_tags: String,
    #[serde(default, deserialize_with = "missing_as_empty")]
    pub constitution_tags: String,
    #[serde(default, deserialize_with = "missing_as_empty")]
    pub method: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    pub columns: Vec<String>,
    pub recipes: Vec<Recipe>,
}

/// One (recipe, ingredient) pair from the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub recipe_title: String,
    #[serde(rename = "ingredient_name_zh")]
    pub ingredient_name: String,
    pub amount: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IngredientLineTable {
    pub columns: Vec<String>,
    pub lines: Vec<IngredientLine>,
}

impl IngredientLineTable {
    pub fn for_recipe<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a IngredientLine> {
        self.lines.iter().filter(move |line| line.recipe_title == title)
    }
}

pub fn read_recipes<R: Read>(reader: R) -> Result<RecipeTable, RecipeTableError> {
    let (columns, recipes) = read_rows::<_, Recipe>(reader, RECIPE_TABLE, &["title_zh"])?;
    let recipes: Vec<Recipe> = recipes
        .into_iter()
        .filter(|recipe| !recipe.title.is_empty())
        .collect();

    info!(recipes = recipes.len(), "recipe master table loaded");
    Ok(RecipeTable { columns, recipes })
}

pub fn read_recipes_path<P: AsRef<Path>>(path: P) -> Result<RecipeTable, RecipeTableError> {
    read_recipes(open_table(path.as_ref())?)
}

pub fn read_ingredient_lines<R: Read>(reader: R) -> Result<IngredientLineTable, RecipeTableError> {
    let (columns, lines) = read_rows::<_, IngredientLine>(
        reader,
        DETAIL_TABLE,
        &["recipe_title", "ingredient_name_zh", "amount"],
    )?;
    let lines: Vec<IngredientLine> = lines
        .into_iter()
        .filter(|line| !line.recipe_title.is_empty())
        .collect();

    info!(lines = lines.len(), "recipe ingredient table loaded");
    Ok(IngredientLineTable { columns, lines })
}

pub fn read_ingredient_lines_path<P: AsRef<Path>>(
    path: P,
) -> Result<IngredientLineTable, RecipeTableError> {
    read_ingredient_lines(open_table(path.as_ref())?)
}

/// Reads every row that deserializes; rows missing required fields are
/// skipped with a warning rather than failing the run.
fn read_rows<R, T>(
    reader: R,
    table: &'static str,
    required: &[&'static str],
) -> Result<(Vec<String>, Vec<T>), RecipeTableError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !columns.iter().any(|header| header == column))
    {
        return Err(RecipeTableError::MissingColumn { table, column });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                warn!(table, line = ?record.position().map(|p| p.line()), %err, "skipping malformed row");
            }
        }
    }
    if skipped > 0 {
        warn!(table, skipped, "malformed rows skipped");
    }

    Ok((columns, rows))
}

fn missing_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
