//! Ingredient catalog: name identity, duplicate detection and compaction.

pub mod compactor;
pub mod normalizer;
pub mod registry;
pub mod supplement;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub use compactor::{compact, compact_file, CompactionSummary};
pub use normalizer::{normalize, CanonicalIdentity};
pub use registry::{
    CandidateResult, DuplicateCheck, IngredientRegistry, MatchReason, RegistryStatistics,
};
pub use supplement::{CandidateCategory, CategoryPlan, SupplementPlan, SUPPLEMENT_CANDIDATES};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to access catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog file has no header row")]
    MissingHeader,
}

/// One raw catalog row. The first field is the `name_zh` display name; the
/// rest is payload that is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    fields: Vec<String>,
}

impl CatalogEntry {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn name_zh(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    /// Compaction key: the display name trimmed, nothing folded.
    pub fn key(&self) -> &str {
        self.name_zh().trim()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl<S: Into<String>> FromIterator<S> for CatalogEntry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Header plus rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogTable {
    pub header: Vec<String>,
    pub entries: Vec<CatalogEntry>,
}

pub(crate) fn open_catalog(path: &Path) -> Result<File, CatalogError> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_catalog<R: Read>(reader: R) -> Result<CatalogTable, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(CatalogError::MissingHeader);
    }

    let mut entries: Vec<CatalogEntry> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.is_empty() {
            warn!(line = ?record.position().map(|p| p.line()), "skipping empty catalog row");
            continue;
        }
        entries.push(record.iter().collect());
    }

    Ok(CatalogTable { header, entries })
}

pub fn write_catalog<W: Write>(writer: W, table: &CatalogTable) -> Result<(), CatalogError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(&table.header)?;
    for entry in &table.entries {
        csv_writer.write_record(entry.fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
