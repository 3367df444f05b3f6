//! The on-disk artifact format for per-trait implementor tables.
//!
//! Each documented trait gets one generated JavaScript file under
//! `implementors/`. The file builds a table object, then either hands it to
//! the page's registration hook or parks it for the hook to pick up later.
//! [`parse`] and [`render`] cover the full grammar; [`read`] and [`write`]
//! wrap them with file I/O.

mod parse;
mod render;

pub use parse::{ParseError, parse};
pub use render::render;

use crate::error::Result;
use crate::types::ImplementorTable;
use anyhow::Context;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Read and parse one artifact file.
pub async fn read(path: &Path) -> Result<ImplementorTable> {
    debug!("Reading artifact at {}", path.display());
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read artifact at {}", path.display()))?;
    let table =
        parse(&raw).with_context(|| format!("Failed to parse artifact at {}", path.display()))?;
    Ok(table)
}

/// Render and write one artifact file, creating parent directories as needed.
pub async fn write(path: &Path, table: &ImplementorTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, render(table))
        .await
        .with_context(|| format!("Failed to write artifact at {}", path.display()))?;
    debug!("Wrote artifact at {}", path.display());
    Ok(())
}
