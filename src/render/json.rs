//! JSON rendering of paper metadata records.

use crate::error::{Error, Result};
use crate::model::PaperMetadata;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a metadata record to JSON.
pub fn to_json(metadata: &PaperMetadata, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(metadata),
        JsonFormat::Compact => serde_json::to_string(metadata),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse a metadata record from JSON.
pub fn from_json(json: &str) -> Result<PaperMetadata> {
    Ok(serde_json::from_str(json)?)
}
