use super::{open_catalog, read_catalog, write_catalog, CatalogEntry, CatalogError, CatalogTable};
use indexmap::IndexMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Rows whose display name was blank.
    pub dropped_rows: usize,
}

impl CompactionSummary {
    pub fn collapsed_rows(&self) -> usize {
        self.input_rows - self.output_rows - self.dropped_rows
    }
}

/// Collapses rows sharing a trimmed display name.
///
/// A key keeps the position where it was first seen while its content is
/// replaced by every later occurrence. Blank keys are dropped.
pub fn compact<I>(rows: I) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut records: IndexMap<String, CatalogEntry> = IndexMap::new();

    for row in rows {
        let key = row.key();
        if key.is_empty() {
            debug!("dropping catalog row without a name");
            continue;
        }
        let key = key.to_string();
        if let Some(previous) = records.insert(key, row) {
            debug!(name = previous.key(), "replaced earlier catalog row");
        }
    }

    records.into_values().collect()
}

pub fn compact_table(table: CatalogTable) -> (CatalogTable, CompactionSummary) {
    let input_rows = table.entries.len();
    let blank = table
        .entries
        .iter()
        .filter(|entry| entry.key().is_empty())
        .count();
    let entries = compact(table.entries);

    let summary = CompactionSummary {
        input_rows,
        output_rows: entries.len(),
        dropped_rows: blank,
    };
    let compacted = CatalogTable {
        header: table.header,
        entries,
    };
    (compacted, summary)
}

/// Reads `input`, compacts it and writes header plus surviving rows to `output`.
pub fn compact_file<P, Q>(input: P, output: Q) -> Result<CompactionSummary, CatalogError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let table = read_catalog(open_catalog(input)?)?;
    let (compacted, summary) = compact_table(table);

    let file = File::create(output).map_err(|source| CatalogError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    write_catalog(file, &compacted)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        dropped_rows = summary.dropped_rows,
        "catalog compacted"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> CatalogEntry {
        fields.iter().copied().collect()
    }

    #[test]
    fn last_write_wins_in_first_seen_position() {
        let rows = vec![row(&["A", "1"]), row(&["B", "2"]), row(&["A", "3"])];
        let compacted = compact(rows);
        assert_eq!(compacted, vec![row(&["A", "3"]), row(&["B", "2"])]);
    }

    #[test]
    fn compaction_is_idempotent() {
        let rows = vec![
            row(&["米仁(薏苡仁)", "谷物"]),
            row(&["白菜", "蔬菜"]),
            row(&["米仁(薏苡仁)", "谷物", "健脾利湿"]),
            row(&["三七"]),
        ];
        let once = compact(rows);
        let twice = compact(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn alias_forms_are_distinct_keys() {
        let rows = vec![row(&["米仁(薏苡仁)", "a"]), row(&["米仁", "b"])];
        assert_eq!(compact(rows).len(), 2);
    }

    #[test]
    fn keys_are_trimmed_but_rows_are_not() {
        let rows = vec![row(&["白菜", "old"]), row(&[" 白菜 ", "new"])];
        let compacted = compact(rows);
        assert_eq!(compacted, vec![row(&[" 白菜 ", "new"])]);
    }

    #[test]
    fn blank_keys_are_dropped() {
        let table = CatalogTable {
            header: vec!["name_zh".into()],
            entries: vec![row(&["  ", "x"]), row(&["白菜"]), row(&["", "y"]), row(&["白菜"])],
        };
        let (compacted, summary) = compact_table(table);
        assert_eq!(compacted.entries, vec![row(&["白菜"])]);
        assert_eq!(
            summary,
            CompactionSummary {
                input_rows: 4,
                output_rows: 1,
                dropped_rows: 2,
            }
        );
        assert_eq!(summary.collapsed_rows(), 1);
    }
}
