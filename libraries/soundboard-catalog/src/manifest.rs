//! Startup manifest parsing
//!
//! The manifest is a JSON array of clip file names, e.g.
//! `["--Air-Horn.ogg", "boo_sound.ogg"]`.

use soundboard_core::Result;

/// Parse a manifest document into file names
///
/// Blank entries are skipped.
///
/// # Errors
/// Returns `Manifest` if the document is not a JSON array of strings
pub fn parse_manifest(json: &str) -> Result<Vec<String>> {
    let entries: Vec<String> = serde_json::from_str(json)?;
    let total = entries.len();

    let files: Vec<String> = entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    if files.len() < total {
        tracing::warn!("Skipped {} blank manifest entries", total - files.len());
    }
    Ok(files)
}
