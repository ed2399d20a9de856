// Status message presentation

use manualseats_core::StatusLevel;

/// CSS classes of the status element for a message level
pub fn status_class(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Info => "alert alert-info",
        StatusLevel::Warning => "alert alert-warning",
        StatusLevel::Error => "alert alert-danger",
    }
}

/// How a message is shown when the page has no status element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Blocking browser dialog
    Alert,
    /// Console at warn level
    Warn,
    /// Console at info level
    Info,
}

pub fn fallback_for(level: StatusLevel) -> Fallback {
    match level {
        StatusLevel::Error => Fallback::Alert,
        StatusLevel::Warning => Fallback::Warn,
        StatusLevel::Info => Fallback::Info,
    }
}

/// Message text for contexts without styling (dialogs, console)
pub fn format_status(level: StatusLevel, message: &str) -> String {
    match level {
        StatusLevel::Info => message.to_string(),
        StatusLevel::Warning => format!("Warning: {}", message),
        StatusLevel::Error => format!("Error: {}", message),
    }
}
