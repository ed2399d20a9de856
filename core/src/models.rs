// Core data models for the field bridge widgets

use serde::{Deserialize, Serialize};

/// File format transferred by a bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Filter passed to the file picker (`accept` attribute)
    pub fn accept(&self) -> &'static str {
        match self {
            FileFormat::Csv => ".csv",
            FileFormat::Json => ".json",
        }
    }

    /// Extension appended to derived filenames
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }

    /// Content type of exported blobs
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => "text/csv",
            FileFormat::Json => "application/json",
        }
    }
}

/// How the bridged element holds its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Form control (`<textarea>`, `<input>`): read and written through `value`
    #[default]
    FormValue,
    /// Read-only element whose rendered text is exported
    TextContent,
}

impl FieldKind {
    pub fn is_writable(&self) -> bool {
        matches!(self, FieldKind::FormValue)
    }
}

/// Status level for user-visible messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Action completed
    Info,
    /// Action refused, page state unchanged
    Warning,
    /// Action failed
    Error,
}

/// Result of a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The field now holds the file's text
    Imported { file_name: String, bytes: usize },
    /// No file was selected
    Cancelled,
}

/// A file chosen in the picker, already decoded to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub text: String,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Summary of a triggered export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub filename: String,
    pub mime_type: String,
    pub bytes: usize,
}
