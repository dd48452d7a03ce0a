//! Long-to-wide reshaping of the recipe ingredient detail table.

use super::parser::IngredientLine;
use super::{create_output, RecipeTableError};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientEntry {
    pub name: String,
    pub amount: String,
    /// Blank when the detail row carried no note.
    pub note: String,
}

impl IngredientEntry {
    /// `name(amount)` or `name(amount,note)`.
    pub fn summary(&self) -> String {
        if self.note.is_empty() {
            format!("{}({})", self.name, self.amount)
        } else {
            format!("{}({},{})", self.name, self.amount, self.note)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredients {
    pub recipe: String,
    pub ingredients: Vec<IngredientEntry>,
}

/// Groups detail rows per recipe. Recipes appear in first-seen order and
/// each keeps its ingredients in file order.
pub fn group_by_recipe(lines: &[IngredientLine]) -> Vec<RecipeIngredients> {
    let mut recipes: IndexMap<&str, Vec<IngredientEntry>> = IndexMap::new();
    for line in lines {
        recipes
            .entry(line.recipe_title.as_str())
            .or_default()
            .push(IngredientEntry {
                name: line.ingredient_name.clone(),
                amount: line.amount.clone(),
                note: line.note.clone().unwrap_or_default(),
            });
    }

    recipes
        .into_iter()
        .map(|(recipe, ingredients)| RecipeIngredients {
            recipe: recipe.to_string(),
            ingredients,
        })
        .collect()
}

fn sorted_by_name(groups: &[RecipeIngredients]) -> Vec<&RecipeIngredients> {
    let mut sorted: Vec<&RecipeIngredients> = groups.iter().collect();
    sorted.sort_by(|a, b| a.recipe.cmp(&b.recipe));
    sorted
}

/// One row per recipe with three columns per ingredient slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePivot {
    pub max_ingredients: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecipePivot {
    pub fn build(groups: &[RecipeIngredients]) -> Self {
        let max_ingredients = groups
            .iter()
            .map(|group| group.ingredients.len())
            .max()
            .unwrap_or(0);

        let mut header = vec!["recipe_name".to_string(), "ingredient_count".to_string()];
        for slot in 1..=max_ingredients {
            header.push(format!("ingredient_{slot}_name"));
            header.push(format!("ingredient_{slot}_amount"));
            header.push(format!("ingredient_{slot}_note"));
        }

        let rows = sorted_by_name(groups)
            .into_iter()
            .map(|group| {
                let mut row = Vec::with_capacity(header.len());
                row.push(group.recipe.clone());
                row.push(group.ingredients.len().to_string());
                for ingredient in &group.ingredients {
                    row.push(ingredient.name.clone());
                    row.push(ingredient.amount.clone());
                    row.push(ingredient.note.clone());
                }
                row.resize(header.len(), String::new());
                row
            })
            .collect();

        Self {
            max_ingredients,
            header,
            rows,
        }
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), RecipeTableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.header)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), RecipeTableError> {
        let path = path.as_ref();
        self.write(create_output(path)?)?;
        info!(path = %path.display(), recipes = self.rows.len(), "pivot table written");
        Ok(())
    }
}

/// Compact per-recipe listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub recipe_name: String,
    pub ingredient_count: usize,
    pub ingredient_list: String,
}

pub fn summary_rows(groups: &[RecipeIngredients]) -> Vec<SummaryRow> {
    sorted_by_name(groups)
        .into_iter()
        .map(|group| SummaryRow {
            recipe_name: group.recipe.clone(),
            ingredient_count: group.ingredients.len(),
            ingredient_list: group
                .ingredients
                .iter()
                .map(IngredientEntry::summary)
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}

pub fn write_summary<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<(), RecipeTableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    if rows.is_empty() {
        csv_writer.write_record(["recipe_name", "ingredient_count", "ingredient_list"])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_summary_path<P: AsRef<Path>>(
    path: P,
    rows: &[SummaryRow],
) -> Result<(), RecipeTableError> {
    let path = path.as_ref();
    write_summary(create_output(path)?, rows)?;
    info!(path = %path.display(), recipes = rows.len(), "summary written");
    Ok(())
}
