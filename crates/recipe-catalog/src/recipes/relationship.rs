//! Referential integrity between the recipe master table and the detail table.

use super::parser::{IngredientLine, IngredientLineTable, RecipeTable};
use serde::Serialize;
use std::collections::BTreeSet;

/// Share of recipes that have ingredient rows, as a percentage.
pub fn coverage_rate(recipe_count: usize, common_count: usize) -> f64 {
    if recipe_count == 0 {
        return 0.0;
    }
    common_count as f64 / recipe_count as f64 * 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeExample {
    pub title: String,
    pub intent_tags: String,
    pub constitution_tags: String,
    pub method: String,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipReport {
    pub recipe_rows: usize,
    pub detail_rows: usize,
    pub recipe_columns: Vec<String>,
    pub detail_columns: Vec<String>,
    /// Distinct `title_zh` values.
    pub recipe_count: usize,
    /// Distinct `recipe_title` values.
    pub detail_recipe_count: usize,
    pub common_count: usize,
    pub only_in_recipes: Vec<String>,
    pub only_in_details: Vec<String>,
    pub coverage_rate: f64,
    pub example: Option<RecipeExample>,
}

impl RelationshipReport {
    pub fn build(recipes: &RecipeTable, details: &IngredientLineTable) -> Self {
        let recipe_titles: BTreeSet<&str> = recipes
            .recipes
            .iter()
            .map(|recipe| recipe.title.as_str())
            .collect();
        let detail_titles: BTreeSet<&str> = details
            .lines
            .iter()
            .map(|line| line.recipe_title.as_str())
            .collect();

        let common: Vec<&str> = recipe_titles.intersection(&detail_titles).copied().collect();
        let only_in_recipes = recipe_titles
            .difference(&detail_titles)
            .map(|title| title.to_string())
            .collect();
        let only_in_details = detail_titles
            .difference(&recipe_titles)
            .map(|title| title.to_string())
            .collect();

        let example = common.first().and_then(|title| {
            recipes
                .recipes
                .iter()
                .find(|recipe| recipe.title == *title)
                .map(|recipe| RecipeExample {
                    title: recipe.title.clone(),
                    intent_tags: recipe.intent_tags.clone(),
                    constitution_tags: recipe.constitution_tags.clone(),
                    method: recipe.method.clone(),
                    ingredients: details.for_recipe(title).cloned().collect(),
                })
        });

        Self {
            recipe_rows: recipes.recipes.len(),
            detail_rows: details.lines.len(),
            recipe_columns: recipes.columns.clone(),
            detail_columns: details.columns.clone(),
            recipe_count: recipe_titles.len(),
            detail_recipe_count: detail_titles.len(),
            common_count: common.len(),
            only_in_recipes,
            only_in_details,
            coverage_rate: coverage_rate(recipe_titles.len(), common.len()),
            example,
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.only_in_recipes.is_empty() {
            warnings.push(format!(
                "{} recipes have no ingredient rows",
                self.only_in_recipes.len()
            ));
        }
        if !self.only_in_details.is_empty() {
            warnings.push(format!(
                "{} ingredient recipe titles have no recipe master row",
                self.only_in_details.len()
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::parser::{read_ingredient_lines, read_recipes};

    fn sample() -> RelationshipReport {
        let recipes = read_recipes(
            "title_zh,intent_tags,constitution_tags,method\n\
山药粥,健脾,气虚,煮粥\n\
百合汤,润肺,阴虚,炖汤\n\
银耳羹,滋阴,阴虚,炖煮\n\
山药粥,健脾,气虚,煮粥\n"
                .as_bytes(),
        )
        .expect("recipes parse");
        let details = read_ingredient_lines(
            "recipe_title,ingredient_name_zh,amount,note\n\
山药粥,山药,100g,去皮\n\
山药粥,大米,50g,\n\
百合汤,百合,30g,\n\
枸杞茶,枸杞,10g,\n"
                .as_bytes(),
        )
        .expect("lines parse");
        RelationshipReport::build(&recipes, &details)
    }

    #[test]
    fn coverage_is_zero_without_recipes() {
        assert_eq!(coverage_rate(0, 0), 0.0);
        assert_eq!(coverage_rate(4, 3), 75.0);
    }

    #[test]
    fn set_differences_are_reported_sorted() {
        let report = sample();

        assert_eq!(report.recipe_rows, 4);
        assert_eq!(report.recipe_count, 3);
        assert_eq!(report.detail_recipe_count, 3);
        assert_eq!(report.common_count, 2);
        assert_eq!(report.only_in_recipes, vec!["银耳羹"]);
        assert_eq!(report.only_in_details, vec!["枸杞茶"]);
        assert!((report.coverage_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.warnings().len(), 2);
    }

    #[test]
    fn example_uses_first_common_title() {
        let report = sample();
        let example = report.example.expect("example present");

        assert_eq!(example.title, "山药粥");
        assert_eq!(example.method, "煮粥");
        assert_eq!(example.ingredients.len(), 2);
        assert_eq!(example.ingredients[0].note.as_deref(), Some("去皮"));
    }

    #[test]
    fn full_coverage_has_no_warnings() {
        let recipes = read_recipes("title_zh\n山药粥\n".as_bytes()).expect("recipes parse");
        let details = read_ingredient_lines(
            "recipe_title,ingredient_name_zh,amount\n山药粥,山药,100g\n".as_bytes(),
        )
        .expect("lines parse");
        let report = RelationshipReport::build(&recipes, &details);

        assert_eq!(report.coverage_rate, 100.0);
        assert!(report.warnings().is_empty());
    }
}
