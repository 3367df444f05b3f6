//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets a fresh temporary doc root with its own `implementors/`
//! tree, so tests run in parallel without interference and leave nothing
//! behind.

use rstest::fixture;
use rustdoc_implementors::types::{Implementor, ImplementorTable};
use rustdoc_implementors::{DocRoot, TraitPath, artifact};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary rustdoc output directory for test isolation.
///
/// Provides helpers for seeding artifacts and arbitrary files under the
/// root. The directory is removed when the value drops.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempDocRoot {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempDocRoot {
    /// Creates a new empty doc root.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this doc root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns a [`DocRoot`] over this directory.
    pub fn doc_root(&self) -> DocRoot {
        DocRoot::new(&self.root)
    }

    /// Renders `table` into the artifact file for `trait_path`.
    ///
    /// # Panics
    /// Panics if the trait path is malformed or the write fails.
    pub fn create_artifact(&self, trait_path: &str, table: &ImplementorTable) {
        let parsed = TraitPath::parse(trait_path)
            .unwrap_or_else(|e| panic!("Bad trait path '{}': {}", trait_path, e));
        self.create_file(
            &format!("implementors/{}", parsed.artifact_file().display()),
            &artifact::render(table),
        );
    }

    /// Creates a file with the given content within this doc root.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }
}

impl Default for TempDocRoot {
    fn default() -> Self {
        Self::new()
    }
}

/// A table shaped like real generator output: two crates, mixed synthetic
/// flags, entity-escaped impl text.
#[allow(dead_code)] // Used across different integration test crates
pub fn sample_table() -> ImplementorTable {
    let mut table = ImplementorTable::new();
    table.insert(
        "cgmath",
        Implementor::new(
            "impl&lt;S:&nbsp;<a class=\"trait\" href=\"cgmath/trait.BaseFloat.html\">BaseFloat</a>&gt; SubAssign&lt;<a class=\"struct\" href=\"cgmath/struct.Rad.html\">Rad</a>&lt;S&gt;&gt; for <a class=\"struct\" href=\"cgmath/struct.Rad.html\">Rad</a>&lt;S&gt;",
            false,
            vec!["cgmath::angle::Rad".to_string()],
        ),
    );
    table.insert(
        "cgmath",
        Implementor::new(
            "impl SubAssign for <a class=\"struct\" href=\"cgmath/struct.Deg.html\">Deg</a>",
            false,
            vec!["cgmath::angle::Deg".to_string()],
        ),
    );
    table.insert(
        "nix",
        Implementor::new(
            "impl SubAssign&lt;<a class=\"struct\" href=\"nix/sys/stat/struct.Mode.html\">Mode</a>&gt; for Mode",
            true,
            vec!["nix::sys::stat::Mode".to_string()],
        ),
    );
    table
}

/// Creates a fresh temporary doc root for a test.
#[fixture]
pub fn temp_root() -> TempDocRoot {
    TempDocRoot::new()
}
