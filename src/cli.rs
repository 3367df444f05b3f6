use crate::artifact;
use crate::doc::DocRoot;
use crate::error::{LoadError, Result};
use crate::path::TraitPath;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Parser)]
#[command(name = "rustdoc-implementors")]
#[command(about = "Inspect trait implementor tables in a rustdoc output directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    List {
        doc_root: String,
        #[arg(long)]
        json: bool,
    },
    Show {
        doc_root: String,
        trait_path: String,
        #[arg(long)]
        json: bool,
    },
    Check {
        doc_root: String,
    },
}

#[derive(Serialize)]
struct ListEntry {
    trait_path: TraitPath,
    crate_count: usize,
    record_count: usize,
}

/// List every trait with an artifact under the doc root.
pub async fn execute_list(root: &DocRoot, json: bool) -> Result<String> {
    let tables = root.load_all().await?;

    if json {
        let entries: Vec<ListEntry> = tables
            .iter()
            .map(|(trait_path, table)| ListEntry {
                trait_path: trait_path.clone(),
                crate_count: table.crate_count(),
                record_count: table.record_count(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    if tables.is_empty() {
        return Ok("No implementors artifacts found.\n".to_string());
    }

    let mut output = String::new();
    output.push_str(&format!("Documented traits ({}):\n", tables.len()));
    for (trait_path, table) in &tables {
        output.push_str(&format!(
            "  • {} ({} crates, {} impls)\n",
            trait_path,
            table.crate_count(),
            table.record_count()
        ));
    }
    Ok(output)
}

/// Show one trait's implementors, grouped by crate.
pub async fn execute_show(root: &DocRoot, trait_path: &str, json: bool) -> Result<String> {
    let trait_path = TraitPath::parse(trait_path)?;
    let path = root.artifact_path(&trait_path);
    if !path.exists() {
        return Err(LoadError::NotFound {
            trait_path: trait_path.full_path(),
            path,
        }
        .into());
    }

    let table = match artifact::read(&path).await {
        Ok(table) => table,
        Err(error) => {
            return Err(LoadError::Malformed {
                trait_path: trait_path.full_path(),
                error: format!("{:#}", error),
            }
            .into());
        }
    };

    if json {
        return Ok(serde_json::to_string_pretty(&table)?);
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", trait_path));
    output.push_str(&format!(
        "{} crate(s), {} implementation(s)\n",
        table.crate_count(),
        table.record_count()
    ));
    for (name, records) in table.iter() {
        output.push_str(&format!("\n{} ({}):\n", name, records.len()));
        for record in records {
            output.push_str(&format!("  {}", record.plain_text()));
            if record.synthetic {
                output.push_str("  [synthetic]");
            }
            output.push('\n');
        }
    }
    Ok(output)
}

/// Parse every artifact under the doc root, reporting each result.
///
/// Fails if any artifact does not parse; the error message carries the full
/// per-file report.
pub async fn execute_check(root: &DocRoot) -> Result<String> {
    let entries = root.scan().await?;

    let mut output = String::new();
    let mut failed = 0usize;
    for entry in &entries {
        match root.load(entry).await {
            Ok(table) => {
                output.push_str(&format!(
                    "OK   {} ({} crates, {} impls)\n",
                    entry.trait_path,
                    table.crate_count(),
                    table.record_count()
                ));
            }
            Err(error) => {
                failed += 1;
                output.push_str(&format!("FAIL {}: {:#}\n", entry.trait_path, error));
            }
        }
    }
    output.push_str(&format!(
        "{} artifact(s) checked, {} failed\n",
        entries.len(),
        failed
    ));

    if failed > 0 {
        anyhow::bail!("{}", output.trim_end());
    }
    Ok(output)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
