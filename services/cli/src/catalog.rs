use clap::Args;
use recipe_catalog::catalog::{
    compact_file, CandidateResult, CategoryPlan, IngredientRegistry, RegistryStatistics,
    SupplementPlan, SUPPLEMENT_CANDIDATES,
};
use recipe_catalog::config::DataFiles;
use recipe_catalog::error::AppError;
use serde::Serialize;

const SAMPLE_CANDIDATES: &[&str] = &["白菜", "卷心菜", "土豆", "红薯", "三七", "大米"];
const NEW_ITEMS_SHOWN: usize = 8;
const EXISTING_ITEMS_SHOWN: usize = 5;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Candidate names to check (defaults to a built-in sample)
    pub(crate) names: Vec<String>,
    /// Print the results as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    statistics: &'a RegistryStatistics,
    results: &'a [CandidateResult],
}

pub(crate) fn run_dedup(files: &DataFiles) -> Result<(), AppError> {
    let summary = compact_file(&files.ingredients_master, &files.ingredients_clean)?;

    println!("Catalog compaction");
    println!("Rows read (excluding header): {}", summary.input_rows);
    println!("Rows written (excluding header): {}", summary.output_rows);
    println!("Duplicate rows collapsed: {}", summary.collapsed_rows());
    if summary.dropped_rows > 0 {
        println!("Rows without a name dropped: {}", summary.dropped_rows);
    }
    println!("Clean catalog saved to {}", files.ingredients_clean.display());
    Ok(())
}

pub(crate) fn run_check(files: &DataFiles, args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs { names, json } = args;
    let registry = IngredientRegistry::from_path(&files.ingredients_master)?;
    let statistics = registry.statistics();

    let results = if names.is_empty() {
        registry.batch_check(SAMPLE_CANDIDATES)
    } else {
        registry.batch_check(&names)
    };

    if json {
        let report = CheckReport {
            statistics: &statistics,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Known ingredient names: {}", statistics.total_count);
    println!("First {} names: {}", statistics.sample.len(), statistics.sample.join(", "));

    println!("\nCandidate check");
    for result in &results {
        let status = if result.is_duplicate { "exists" } else { "new" };
        println!("- [{status}] {}: {}", result.name, result.message);
    }
    Ok(())
}

pub(crate) fn run_supplement(files: &DataFiles) -> Result<(), AppError> {
    let registry = IngredientRegistry::from_path(&files.ingredients_master)?;
    let plan = SupplementPlan::build(&registry, SUPPLEMENT_CANDIDATES);
    render_supplement_plan(&plan);
    Ok(())
}

fn render_supplement_plan(plan: &SupplementPlan) {
    println!("Ingredient supplement plan");
    println!("Known ingredient names: {}", plan.current_total);

    for category in &plan.categories {
        render_category(category);
    }

    let recommended = plan.recommended();
    println!("\nSummary");
    println!("- Recommended additions: {}", recommended.len());
    println!("- Projected total after additions: {}", plan.projected_total());
}

fn render_category(category: &CategoryPlan) {
    println!("\n[{}]", category.label);
    println!("- Candidates: {}", category.candidate_count);
    println!("- New: {}", category.new_items.len());
    println!("- Already catalogued: {}", category.existing_items.len());

    if !category.new_items.is_empty() {
        println!(
            "  Recommended: {}",
            preview(&category.new_items, NEW_ITEMS_SHOWN)
        );
        print_remainder(category.new_items.len(), NEW_ITEMS_SHOWN);
    }
    if !category.existing_items.is_empty() {
        println!(
            "  Existing: {}",
            preview(&category.existing_items, EXISTING_ITEMS_SHOWN)
        );
        print_remainder(category.existing_items.len(), EXISTING_ITEMS_SHOWN);
    }
}

fn preview(items: &[CandidateResult], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_remainder(total: usize, shown: usize) {
    if total > shown {
        println!("  ... {} more", total - shown);
    }
}
