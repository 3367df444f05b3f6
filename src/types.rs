use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// A crate name as it appears as an implementors-table key.
///
/// The key carries the exact string the generator wrote; equality and
/// ordering use it unchanged. `matches` additionally treats `-` and `_` as
/// equivalent, since package names and library names disagree on the
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrateName(String);

impl CrateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The exact key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Separator-insensitive comparison: `foo-bar` matches `foo_bar`.
    pub fn matches(&self, other: &str) -> bool {
        self.0.len() == other.len()
            && self
                .0
                .chars()
                .zip(other.chars())
                .all(|(a, b)| a == b || (matches!(a, '-' | '_') && matches!(b, '-' | '_')))
    }
}

impl fmt::Display for CrateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CrateName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for CrateName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// Ord on CrateName is Ord on the inner string, so str lookups stay consistent.
impl Borrow<str> for CrateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One trait implementation as recorded by the documentation generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementor {
    /// Pre-rendered markup fragment describing the implementation.
    pub text: String,
    /// Whether the implementation was derived by tooling rather than written out.
    pub synthetic: bool,
    /// Fully qualified paths of the implementing types, in declaration order.
    pub types: Vec<String>,
}

impl Implementor {
    pub fn new(text: impl Into<String>, synthetic: bool, types: Vec<String>) -> Self {
        Self {
            text: text.into(),
            synthetic,
            types,
        }
    }

    /// The `text` fragment with markup stripped, for terminal display.
    pub fn plain_text(&self) -> String {
        crate::format::strip_markup(&self.text)
    }
}

/// Static mapping from crate name to that crate's implementors of one trait.
///
/// Record order within a crate is display order and is preserved exactly as
/// authored. Crate sections iterate in sorted key order, matching the
/// generator's output; insertion order of crates is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementorTable {
    entries: BTreeMap<CrateName, Vec<Implementor>>,
}

impl ImplementorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to a crate's sequence, creating the section if needed.
    pub fn insert(&mut self, krate: impl Into<CrateName>, record: Implementor) {
        self.entries.entry(krate.into()).or_default().push(record);
    }

    /// Replace a crate's whole section, returning the previous records.
    ///
    /// This is the regenerate-in-place operation: re-documenting one crate
    /// swaps out only that crate's section of a shared artifact.
    pub fn set_crate(
        &mut self,
        krate: impl Into<CrateName>,
        records: Vec<Implementor>,
    ) -> Option<Vec<Implementor>> {
        self.entries.insert(krate.into(), records)
    }

    /// Records for one crate, by exact key.
    pub fn get(&self, krate: &str) -> Option<&[Implementor]> {
        self.entries.get(krate).map(Vec::as_slice)
    }

    pub fn crate_names(&self) -> impl Iterator<Item = &CrateName> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CrateName, &[Implementor])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of crate sections.
    pub fn crate_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of records across all crates.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the section whose key matches `name` (separator-insensitive).
    ///
    /// The viewer applies this for the page's own crate, whose impls are
    /// already inlined on the page.
    pub fn without_crate(mut self, name: &str) -> Self {
        self.entries.retain(|k, _| !k.matches(name));
        self
    }
}

impl<K: Into<CrateName>> FromIterator<(K, Vec<Implementor>)> for ImplementorTable {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Implementor>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
