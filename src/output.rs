use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::compose::ExtractionResult;

static ILLEGAL_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// `Marie Curie` → `Marie_Curie_output.txt`.
pub fn output_filename(title: &str) -> String {
    let underscored = title.trim().replace(' ', "_");
    let safe = ILLEGAL_FILENAME_RE.replace_all(&underscored, "_");
    format!("{}_output.txt", safe)
}

/// Write `full_text` as UTF-8 into `dir`, replacing any previous file for the same title.
pub async fn write_artifact(dir: &Path, result: &ExtractionResult) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(output_filename(&result.title));
    tokio::fs::write(&path, result.full_text.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Written to file: {}", path.display());
    Ok(path)
}
