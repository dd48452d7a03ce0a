//! Canonical identity for catalog display names.
//!
//! A display name may carry one parenthetical alias written with ASCII
//! brackets, e.g. `米仁(薏苡仁)`. Only the first `(` and the first `)` after it
//! are significant; anything past that closing bracket is ignored.

use serde::Serialize;

/// The up-to-three strings a display name is known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalIdentity<'a> {
    /// The display name with surrounding whitespace removed.
    pub full: &'a str,
    /// Text before the first `(`, or `full` when there is none.
    pub primary: &'a str,
    /// Text between the first `(` and the next `)`, when both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'a str>,
}

impl<'a> CanonicalIdentity<'a> {
    /// Whether the display name opened a parenthetical group, well-formed or not.
    pub fn has_parenthetical(&self) -> bool {
        self.full.contains('(')
    }
}

pub fn normalize(name: &str) -> CanonicalIdentity<'_> {
    let full = name.trim();
    let (primary, alias) = match full.split_once('(') {
        Some((before, after)) => (
            before.trim(),
            after.split_once(')').map(|(inner, _)| inner.trim()),
        ),
        None => (full, None),
    };

    CanonicalIdentity {
        full,
        primary,
        alias,
    }
}
