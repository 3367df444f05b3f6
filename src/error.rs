//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for implementor-table operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a trait's implementor artifact fails.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// No artifact for the trait at the expected path.
    NotFound { trait_path: String, path: PathBuf },
    /// The artifact exists but could not be read or parsed.
    Malformed { trait_path: String, error: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { trait_path, path } => {
                write!(
                    f,
                    "No implementors artifact for '{}' at {}",
                    trait_path,
                    path.display()
                )
            }
            Self::Malformed { trait_path, error } => {
                write!(f, "Failed to load implementors for '{}': {}", trait_path, error)
            }
        }
    }
}

impl std::error::Error for LoadError {}
