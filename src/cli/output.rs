//! CLI output: result rendering and error mapping.

use crate::error::ApiError;
use crate::hasher::{combine_fingerprints, EntryFingerprint};
use crate::types::hash_to_hex;
use serde_json::json;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Hash(inner) => format!("Error: {}", inner),
        other => format!("Error: {}", other),
    }
}

/// One line per entry: hex hash (or `-` for directories) and path.
pub fn format_fingerprints_text(fingerprints: &[EntryFingerprint]) -> String {
    let mut lines: Vec<String> = fingerprints
        .iter()
        .map(|fingerprint| {
            let hash = fingerprint
                .hash
                .as_ref()
                .map(hash_to_hex)
                .unwrap_or_else(|| "-".to_string());
            format!("{}  {}", hash, fingerprint.path)
        })
        .collect();
    lines.push(format!(
        "combined  {}",
        hash_to_hex(&combine_fingerprints(fingerprints))
    ));
    lines.join("\n")
}

pub fn format_fingerprints_json(fingerprints: &[EntryFingerprint]) -> Result<String, ApiError> {
    let value = json!({
        "entries": fingerprints,
        "combined": hash_to_hex(&combine_fingerprints(fingerprints)),
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}
