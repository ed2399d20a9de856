// Filename rules for exported files

use crate::models::FileFormat;
use serde::{Deserialize, Serialize};

/// Rule deriving the download filename from the field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilenameRule {
    /// Always the same filename
    Constant { filename: String },
    /// `<value of key>.<extension>` when the field is a JSON object with a
    /// non-empty string under `key`, otherwise `fallback`
    JsonProperty { key: String, fallback: String },
}

impl FilenameRule {
    pub fn constant(filename: impl Into<String>) -> Self {
        FilenameRule::Constant {
            filename: filename.into(),
        }
    }

    pub fn json_property(key: impl Into<String>, fallback: impl Into<String>) -> Self {
        FilenameRule::JsonProperty {
            key: key.into(),
            fallback: fallback.into(),
        }
    }

    /// Derive the filename for `value`
    pub fn filename_for(&self, value: &str, format: FileFormat) -> String {
        match self {
            FilenameRule::Constant { filename } => filename.clone(),
            FilenameRule::JsonProperty { key, fallback } => match search_json(value, key) {
                Some(name) => format!("{}.{}", name, format.extension()),
                None => fallback.clone(),
            },
        }
    }
}

/// Look up a string property of a JSON object.
///
/// Returns `None` when `text` is not valid JSON, is not an object, or has no
/// non-empty string under `key`.
pub fn search_json(text: &str, key: &str) -> Option<String> {
    let parsed: serde_json::Value = match serde_json::from_str(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "field is not valid JSON, no name available");
            return None;
        }
    };

    parsed
        .get(key)
        .and_then(serde_json::Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
