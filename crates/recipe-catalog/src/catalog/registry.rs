use super::normalizer::normalize;
use super::{open_catalog, read_catalog, CatalogError};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const STATISTICS_SAMPLE_SIZE: usize = 20;

/// Why a candidate was (or was not) considered already catalogued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Exact,
    Primary,
    Alias,
    Unmatched,
}

impl MatchReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact duplicate",
            Self::Primary => "primary name duplicate",
            Self::Alias => "alias duplicate",
            Self::Unmatched => "no duplicate",
        }
    }
}

/// Which part of a catalog display name produced a registry member.
/// Ordered strongest first: a name that is both a full name and an alias
/// elsewhere is recorded as a full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum MemberOrigin {
    Full,
    Primary,
    Alias,
}

impl MemberOrigin {
    const fn reason(self) -> MatchReason {
        match self {
            Self::Full => MatchReason::Exact,
            Self::Primary => MatchReason::Primary,
            Self::Alias => MatchReason::Alias,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub reason: MatchReason,
    /// The member of the registry that matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl DuplicateCheck {
    fn found(reason: MatchReason, matched: &str) -> Self {
        Self {
            is_duplicate: true,
            reason,
            matched: Some(matched.to_string()),
        }
    }

    fn unmatched() -> Self {
        Self {
            is_duplicate: false,
            reason: MatchReason::Unmatched,
            matched: None,
        }
    }

    pub fn message(&self) -> String {
        match &self.matched {
            Some(name) => format!("{}: '{}' already exists", self.reason.label(), name),
            None => self.reason.label().to_string(),
        }
    }
}

/// Outcome of checking one candidate in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateResult {
    pub name: String,
    pub is_duplicate: bool,
    pub reason: MatchReason,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatistics {
    /// Size of the membership set; alias expansions count separately.
    pub total_count: usize,
    pub sample: Vec<String>,
}

/// Every identity string known to the catalog.
///
/// The only way to obtain a registry is to load one, so queries always run
/// against a fully built membership set. The set is read-only afterwards.
#[derive(Debug, Clone)]
pub struct IngredientRegistry {
    members: BTreeMap<String, MemberOrigin>,
}

impl IngredientRegistry {
    /// Builds the membership set from raw display names.
    ///
    /// Every non-empty name contributes its trimmed form. Primary and alias
    /// forms are added only for names written with a `(`, so plain names are
    /// represented once.
    pub fn load<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self {
            members: BTreeMap::new(),
        };
        let mut rows = 0usize;

        for name in names {
            let identity = normalize(name.as_ref());
            if identity.full.is_empty() {
                continue;
            }
            rows += 1;
            registry.insert(identity.full, MemberOrigin::Full);

            if identity.has_parenthetical() {
                registry.insert(identity.primary, MemberOrigin::Primary);
                if let Some(alias) = identity.alias {
                    registry.insert(alias, MemberOrigin::Alias);
                }
            }
        }

        info!(rows, members = registry.len(), "ingredient registry loaded");
        registry
    }

    fn insert(&mut self, name: &str, origin: MemberOrigin) {
        if name.is_empty() {
            return;
        }
        match self.members.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(origin);
            }
            Entry::Occupied(mut slot) => {
                if origin < *slot.get() {
                    slot.insert(origin);
                }
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = open_catalog(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Reads a catalog CSV (header row required) and loads its first column.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let table = read_catalog(reader)?;
        Ok(Self::load(table.entries.iter().map(|entry| entry.name_zh())))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Full name, then primary name, then the candidate's own alias.
    ///
    /// A hit on the full name reports how the matched member entered the
    /// catalog, so `田七` against `三七(田七)` is an alias duplicate.
    pub fn check(&self, candidate: &str) -> DuplicateCheck {
        let identity = normalize(candidate);

        let outcome = if let Some(origin) = self.members.get(identity.full) {
            DuplicateCheck::found(origin.reason(), identity.full)
        } else if self.contains(identity.primary) {
            DuplicateCheck::found(MatchReason::Primary, identity.primary)
        } else {
            match identity.alias.filter(|alias| self.contains(alias)) {
                Some(alias) => DuplicateCheck::found(MatchReason::Alias, alias),
                None => DuplicateCheck::unmatched(),
            }
        };

        debug!(candidate = identity.full, reason = outcome.reason.label(), "checked candidate");
        outcome
    }

    /// Checks each candidate independently; output matches input order and length.
    pub fn batch_check<I, S>(&self, candidates: I) -> Vec<CandidateResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .map(|candidate| {
                let name = candidate.as_ref();
                let outcome = self.check(name);
                CandidateResult {
                    name: name.to_string(),
                    is_duplicate: outcome.is_duplicate,
                    reason: outcome.reason,
                    message: outcome.message(),
                }
            })
            .collect()
    }

    pub fn statistics(&self) -> RegistryStatistics {
        RegistryStatistics {
            total_count: self.members.len(),
            sample: self
                .members
                .keys()
                .take(STATISTICS_SAMPLE_SIZE)
                .cloned()
                .collect(),
        }
    }
}
