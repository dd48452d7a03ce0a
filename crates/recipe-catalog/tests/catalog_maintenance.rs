use recipe_catalog::catalog::{
    compact_file, read_catalog, CatalogError, IngredientRegistry, MatchReason,
};
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = "name_zh,category,properties\n\
三七(田七),药材,活血\n\
米仁(薏苡仁),谷物,\n\
大米,谷物,平\n\
白菜,蔬菜,凉\n\
米仁(薏苡仁),谷物,健脾利湿\n\
,蔬菜,空\n\
米仁,谷物,别名行\n";

fn catalog_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("ingredients_master.csv"), CATALOG).expect("write catalog");
    dir
}

#[test]
fn registry_loads_catalog_file_and_answers_checks() {
    let dir = catalog_dir();
    let registry = IngredientRegistry::from_path(dir.path().join("ingredients_master.csv"))
        .expect("catalog loads");

    // 三七(田七) 三七 田七 米仁(薏苡仁) 米仁 薏苡仁 大米 白菜
    assert_eq!(registry.statistics().total_count, 8);

    let results = registry.batch_check(["三七", "田七", "人参", "白菜", "人参"]);
    let reasons: Vec<MatchReason> = results.iter().map(|result| result.reason).collect();
    assert_eq!(
        reasons,
        vec![
            MatchReason::Primary,
            MatchReason::Alias,
            MatchReason::Unmatched,
            MatchReason::Exact,
            MatchReason::Unmatched,
        ]
    );
    assert_eq!(results[2].name, "人参");
    assert!(!results[2].is_duplicate);
}

#[test]
fn membership_count_bounds_catalog_rows() {
    let names = ["白菜", "大米", "生姜"];
    let plain = IngredientRegistry::load(names);
    assert_eq!(plain.statistics().total_count, names.len());

    let aliased = IngredientRegistry::load(["白菜", "三七(田七)"]);
    assert!(aliased.statistics().total_count > 2);
}

#[test]
fn missing_catalog_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = IngredientRegistry::from_path(dir.path().join("absent.csv"))
        .expect_err("missing catalog");

    match error {
        CatalogError::Io { path, .. } => assert!(path.ends_with("absent.csv")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn compact_file_keeps_last_row_in_first_position() {
    let dir = catalog_dir();
    let input = dir.path().join("ingredients_master.csv");
    let output = dir.path().join("ingredients_master_clean.csv");

    let summary = compact_file(&input, &output).expect("compaction succeeds");
    assert_eq!(summary.input_rows, 7);
    assert_eq!(summary.output_rows, 5);
    assert_eq!(summary.dropped_rows, 1);
    assert_eq!(summary.collapsed_rows(), 1);

    let written = fs::read_to_string(&output).expect("clean catalog readable");
    assert_eq!(
        written,
        "name_zh,category,properties\n\
三七(田七),药材,活血\n\
米仁(薏苡仁),谷物,健脾利湿\n\
大米,谷物,平\n\
白菜,蔬菜,凉\n\
米仁,谷物,别名行\n"
    );
}

#[test]
fn compacting_clean_catalog_changes_nothing() {
    let dir = catalog_dir();
    let first = dir.path().join("clean_1.csv");
    let second = dir.path().join("clean_2.csv");

    compact_file(dir.path().join("ingredients_master.csv"), &first).expect("first pass");
    let summary = compact_file(&first, &second).expect("second pass");
    assert_eq!(summary.input_rows, summary.output_rows);

    let first_table = read_catalog(fs::File::open(&first).expect("open first"))
        .expect("first parses");
    let second_table = read_catalog(fs::File::open(&second).expect("open second"))
        .expect("second parses");
    assert_eq!(first_table, second_table);
}
