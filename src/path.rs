//! Trait paths and their mapping to artifact file locations.
//!
//! A table for `core::ops::arith::SubAssign` lives at
//! `implementors/core/ops/arith/trait.SubAssign.js` under the doc root; the
//! two forms convert losslessly in both directions.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

const FILE_PREFIX: &str = "trait.";
const FILE_SUFFIX: &str = ".js";

/// A parsed trait path like `core::ops::arith::SubAssign`.
///
/// Always has at least one segment; the last segment is the trait name and
/// any preceding ones are its module path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TraitPath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("trait path is empty")]
    Empty,
    #[error("trait path `{0}` has an empty segment")]
    EmptySegment(String),
}

impl TraitPath {
    /// Parse a `::`-separated trait path.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = trimmed.split("::").map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment(trimmed.to_string()));
        }
        Ok(Self { segments })
    }

    /// Recover a trait path from an artifact location relative to the
    /// `implementors/` directory.
    ///
    /// Returns `None` for anything that is not shaped like
    /// `<modules...>/trait.<Name>.js`, so it doubles as the scan filter.
    pub fn from_artifact_path(relative: &Path) -> Option<Self> {
        let file_name = relative.file_name()?.to_str()?;
        let trait_name = file_name
            .strip_prefix(FILE_PREFIX)?
            .strip_suffix(FILE_SUFFIX)?;
        if trait_name.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                    Component::CurDir => {}
                    _ => return None,
                }
            }
        }
        segments.push(trait_name.to_string());
        Some(Self { segments })
    }

    /// Artifact location relative to the `implementors/` directory.
    pub fn artifact_file(&self) -> PathBuf {
        let mut path: PathBuf = self.segments[..self.segments.len() - 1].iter().collect();
        path.push(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", self.trait_name()));
        path
    }

    /// The trait name (last segment).
    pub fn trait_name(&self) -> &str {
        self.segments
            .last()
            .expect("TraitPath always has at least one segment")
    }

    /// The module path without the trait name, if any.
    pub fn module_path(&self) -> Option<String> {
        if self.segments.len() > 1 {
            Some(self.segments[..self.segments.len() - 1].join("::"))
        } else {
            None
        }
    }

    /// The full `::`-separated path.
    pub fn full_path(&self) -> String {
        self.segments.join("::")
    }
}

impl fmt::Display for TraitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

impl Serialize for TraitPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_path())
    }
}

impl<'de> Deserialize<'de> for TraitPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}
