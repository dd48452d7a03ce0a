use clap::{Args, ValueEnum};
use recipe_catalog::config::DataFiles;
use recipe_catalog::error::AppError;
use recipe_catalog::recipes::pivot::write_summary_path;
use recipe_catalog::recipes::{
    count_distribution, group_by_recipe, read_ingredient_lines_path, read_recipes_path,
    summary_rows, IngredientUsage, RecipePivot, RelationshipReport,
};
use std::path::PathBuf;

const DIFFERENCES_SHOWN: usize = 10;
const POPULAR_MIN_USES: usize = 3;
const POPULAR_SHOWN: usize = 10;
const PREVIEW_RECIPES: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct RestructureArgs {
    /// Which pair of output files to write
    #[arg(long, value_enum, default_value_t = OutputSet::Recipes)]
    pub(crate) output_set: OutputSet,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum OutputSet {
    /// recipes_restructured.csv and recipes_summary.csv
    #[default]
    Recipes,
    /// recipe_ingredients_restructured.csv and recipe_ingredients_summary.csv
    RecipeIngredients,
}

impl OutputSet {
    fn paths(self, files: &DataFiles) -> (PathBuf, PathBuf) {
        match self {
            Self::Recipes => (
                files.recipes_restructured.clone(),
                files.recipes_summary.clone(),
            ),
            Self::RecipeIngredients => (
                files.recipe_ingredients_restructured.clone(),
                files.recipe_ingredients_summary.clone(),
            ),
        }
    }
}

pub(crate) fn run_analyze(files: &DataFiles) -> Result<(), AppError> {
    let recipes = read_recipes_path(&files.recipes_master)?;
    let details = read_ingredient_lines_path(&files.recipe_ingredients)?;
    let report = RelationshipReport::build(&recipes, &details);
    render_relationship(&report);
    Ok(())
}

fn render_relationship(report: &RelationshipReport) {
    println!("Recipe table relationship");
    println!("Recipe master rows: {}", report.recipe_rows);
    println!("Ingredient detail rows: {}", report.detail_rows);

    println!("\nRecipe counts");
    println!("- In recipe master: {}", report.recipe_count);
    println!("- In ingredient detail: {}", report.detail_recipe_count);
    println!("- In both: {}", report.common_count);
    println!("- Only in recipe master: {}", report.only_in_recipes.len());
    println!("- Only in ingredient detail: {}", report.only_in_details.len());

    render_differences("Only in recipe master", &report.only_in_recipes);
    render_differences("Only in ingredient detail", &report.only_in_details);

    println!("\nRecipe master columns");
    render_columns(&report.recipe_columns);
    println!("\nIngredient detail columns");
    render_columns(&report.detail_columns);

    println!("\nIngredient coverage: {:.1}%", report.coverage_rate);
    for warning in report.warnings() {
        println!("warning: {warning}");
    }

    if let Some(example) = &report.example {
        println!("\nExample: {}", example.title);
        println!("- Intent tags: {}", example.intent_tags);
        println!("- Constitution tags: {}", example.constitution_tags);
        println!("- Method: {}", example.method);
        for line in &example.ingredients {
            match &line.note {
                Some(note) => println!("  - {}: {} ({note})", line.ingredient_name, line.amount),
                None => println!("  - {}: {}", line.ingredient_name, line.amount),
            }
        }
    }
}

fn render_differences(label: &str, titles: &[String]) {
    if titles.is_empty() {
        return;
    }
    println!("\n{label} (first {DIFFERENCES_SHOWN})");
    for (index, title) in titles.iter().take(DIFFERENCES_SHOWN).enumerate() {
        println!("  {}. {title}", index + 1);
    }
    if titles.len() > DIFFERENCES_SHOWN {
        println!("  ... {} more", titles.len() - DIFFERENCES_SHOWN);
    }
}

fn render_columns(columns: &[String]) {
    for (index, column) in columns.iter().enumerate() {
        println!("  {}. {column}", index + 1);
    }
}

pub(crate) fn run_restructure(files: &DataFiles, args: RestructureArgs) -> Result<(), AppError> {
    let details = read_ingredient_lines_path(&files.recipe_ingredients)?;
    let groups = group_by_recipe(&details.lines);
    let (pivot_path, summary_path) = args.output_set.paths(files);

    let pivot = RecipePivot::build(&groups);
    pivot.write_path(&pivot_path)?;
    let summary = summary_rows(&groups);
    write_summary_path(&summary_path, &summary)?;

    println!("Recipe restructure");
    println!("Detail rows read: {}", details.lines.len());
    println!("Recipes: {}", pivot.rows.len());
    println!("Most ingredients in one recipe: {}", pivot.max_ingredients);

    println!("\nIngredients per recipe");
    for (count, recipes) in count_distribution(&groups) {
        println!("- {count} ingredients: {recipes} recipes");
    }

    let usage = IngredientUsage::from_groups(&groups);
    println!("\nDistinct ingredients: {}", usage.distinct());
    let popular = usage.popular(POPULAR_MIN_USES, POPULAR_SHOWN);
    if !popular.is_empty() {
        println!("Most used (at least {POPULAR_MIN_USES} recipes)");
        for (name, uses) in popular {
            println!("- {name}: {uses}");
        }
    }

    println!("\nFirst {PREVIEW_RECIPES} recipes");
    for row in summary.iter().take(PREVIEW_RECIPES) {
        println!("- {} ({}): {}", row.recipe_name, row.ingredient_count, row.ingredient_list);
    }

    println!("\nOutput files");
    println!("- Pivot: {}", pivot_path.display());
    println!("- Summary: {}", summary_path.display());
    Ok(())
}
