// Error types for configuration, surfaces and bridge actions

use crate::models::StatusLevel;

/// Invalid bridge or page configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Parse(String),

    #[error("bridge '{bridge}': {field} must not be empty")]
    EmptyValue { bridge: String, field: &'static str },

    #[error("bridge '{bridge}': {action} requires a writable form field")]
    ReadOnlyField { bridge: String, action: &'static str },

    #[error("bridge '{0}': clear cannot be combined with an always-valid predicate")]
    ClearAlwaysValid(String),

    #[error("bridge name '{0}' is used more than once")]
    DuplicateName(String),
}

/// Failure reported by a UI surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("could not read '{file}': {reason}")]
    FileRead { file: String, reason: String },

    #[error("could not open the file picker: {0}")]
    Picker(String),

    #[error("could not prepare the download: {0}")]
    Blob(String),

    #[error("could not start the download: {0}")]
    Trigger(String),
}

/// Failure of a bridge action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("import is not available for '{0}'")]
    ImportUnavailable(String),

    #[error("clear is not available for '{0}'")]
    ClearUnavailable(String),

    #[error("nothing valid to export from '{0}'")]
    ExportUnavailable(String),

    #[error("import failed: {0}")]
    Import(SurfaceError),

    #[error("export failed: {0}")]
    Export(SurfaceError),
}

impl BridgeError {
    /// Level used when the error is shown to the user
    pub fn status_level(&self) -> StatusLevel {
        match self {
            BridgeError::ExportUnavailable(_)
            | BridgeError::ImportUnavailable(_)
            | BridgeError::ClearUnavailable(_) => StatusLevel::Warning,
            BridgeError::Config(_) | BridgeError::Import(_) | BridgeError::Export(_) => {
                StatusLevel::Error
            }
        }
    }
}
