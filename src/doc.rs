//! Doc-root scanning and bulk operations over implementors artifacts.

use crate::artifact;
use crate::error::Result;
use crate::path::TraitPath;
use crate::registry::ImplementorRegistry;
use crate::types::{CrateName, Implementor, ImplementorTable};
use anyhow::Context;
use futures::stream::{self, StreamExt, TryStreamExt};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How many artifacts load concurrently in [`DocRoot::load_all`].
const LOAD_CONCURRENCY: usize = 16;

/// One discovered artifact under a doc root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub trait_path: TraitPath,
    pub path: PathBuf,
}

/// A rustdoc output directory holding implementors artifacts.
///
/// Artifacts live under `<root>/implementors/`, one file per documented
/// trait, shared by every crate documented into the same root.
#[derive(Debug, Clone)]
pub struct DocRoot {
    root: PathBuf,
}

impl DocRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `implementors/` directory under this root.
    pub fn implementors_dir(&self) -> PathBuf {
        self.root.join("implementors")
    }

    /// Absolute location of one trait's artifact.
    pub fn artifact_path(&self, trait_path: &TraitPath) -> PathBuf {
        self.implementors_dir().join(trait_path.artifact_file())
    }

    /// Discover every artifact under `implementors/`, sorted by trait path.
    ///
    /// Files that do not match the `trait.<Name>.js` naming are skipped, and
    /// ignore rules (gitignore or otherwise) have no effect. A root with no
    /// `implementors/` directory scans as empty.
    pub async fn scan(&self) -> Result<Vec<ArtifactEntry>> {
        let dir = self.implementors_dir();
        if !dir.exists() {
            debug!("No implementors directory at {}", dir.display());
            return Ok(Vec::new());
        }

        let entries = tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            // Doc roots routinely sit under gitignored paths (target/ almost
            // always is); the walk applies no ignore or hidden-file filters.
            let walker = WalkBuilder::new(&dir).standard_filters(false).build();
            for entry in walker.filter_map(|e| e.ok()) {
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = entry.path();
                let Ok(relative) = path.strip_prefix(&dir) else {
                    continue;
                };
                match TraitPath::from_artifact_path(relative) {
                    Some(trait_path) => entries.push(ArtifactEntry {
                        trait_path,
                        path: path.to_path_buf(),
                    }),
                    None => debug!("Skipping non-artifact file {}", path.display()),
                }
            }
            entries.sort_by(|a, b| a.trait_path.cmp(&b.trait_path));
            entries
        })
        .await
        .context("Task panicked")?;

        debug!("Found {} artifact(s)", entries.len());
        Ok(entries)
    }

    /// Read and parse one discovered artifact.
    pub async fn load(&self, entry: &ArtifactEntry) -> Result<ImplementorTable> {
        artifact::read(&entry.path).await
    }

    /// Load every artifact into one map, a few files at a time.
    pub async fn load_all(&self) -> Result<BTreeMap<TraitPath, ImplementorTable>> {
        let entries = self.scan().await?;
        let tables: Vec<(TraitPath, ImplementorTable)> = stream::iter(entries)
            .map(|entry| async move {
                let table = artifact::read(&entry.path).await?;
                Ok::<_, anyhow::Error>((entry.trait_path, table))
            })
            .buffered(LOAD_CONCURRENCY)
            .try_collect()
            .await?;
        Ok(tables.into_iter().collect())
    }

    /// Load every artifact and submit each table to `registry`, in trait-path
    /// order. Returns how many tables were handed off.
    ///
    /// This is the page-load sequence: each artifact evaluates and submits
    /// its table, whether or not a consumer is installed yet.
    pub async fn submit_all(&self, registry: &ImplementorRegistry) -> Result<usize> {
        let tables = self.load_all().await?;
        let count = tables.len();
        for (trait_path, table) in tables {
            debug!("Submitting table for {}", trait_path);
            registry.submit(table);
        }
        info!("Submitted {} implementor table(s)", count);
        Ok(count)
    }

    /// Replace one crate's section in one trait's artifact.
    ///
    /// Reads the existing artifact if present, starts empty otherwise, swaps
    /// in `records`, and writes the result back. Re-documenting a crate into
    /// a shared root touches only that crate's sections.
    pub async fn update(
        &self,
        trait_path: &TraitPath,
        crate_name: impl Into<CrateName>,
        records: Vec<Implementor>,
    ) -> Result<()> {
        let path = self.artifact_path(trait_path);
        let mut table = if path.exists() {
            artifact::read(&path).await?
        } else {
            ImplementorTable::new()
        };

        let name = crate_name.into();
        table.set_crate(name.clone(), records);
        artifact::write(&path, &table).await?;
        info!("Updated '{}' section of {}", name, trait_path);
        Ok(())
    }
}
