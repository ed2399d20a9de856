// Bridge configuration and built-in widget presets

use crate::errors::ConfigError;
use crate::filename::FilenameRule;
use crate::models::{FieldKind, FileFormat};
use crate::validation::{ValidityPredicate, ASSIGNED_SEATS_HEADER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Id of the `<script type="application/json">` element holding a [`PageConfig`]
pub const PAGE_CONFIG_ELEMENT_ID: &str = "field-bridge-config";

/// Import button binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub button_id: String,
}

/// One field bridge: the field, its buttons and its rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Name used in logs and error messages
    pub name: String,
    pub field_id: String,
    #[serde(default)]
    pub field_kind: FieldKind,
    pub export_button_id: String,
    #[serde(default)]
    pub import: Option<ImportConfig>,
    #[serde(default)]
    pub clear_button_id: Option<String>,
    /// Element receiving user-visible status messages
    #[serde(default)]
    pub status_id: Option<String>,
    pub format: FileFormat,
    pub validity: ValidityPredicate,
    pub filename: FilenameRule,
    /// Refuse exports while the validity predicate fails
    #[serde(default)]
    pub guard_export: bool,
}

impl BridgeConfig {
    /// Assigned-seats CSV editor
    pub fn assigned_seats() -> Self {
        Self {
            name: "assigned_seats".to_string(),
            field_id: "id_data".to_string(),
            field_kind: FieldKind::FormValue,
            export_button_id: "download_assignedseats".to_string(),
            import: Some(ImportConfig {
                button_id: "upload_assignedseats".to_string(),
            }),
            clear_button_id: Some("clear_assignedseats".to_string()),
            status_id: Some("assignedseats_status".to_string()),
            format: FileFormat::Csv,
            validity: ValidityPredicate::header_line(ASSIGNED_SEATS_HEADER),
            filename: FilenameRule::constant("assignedseats.csv"),
            guard_export: false,
        }
    }

    /// Seating-plan layout JSON editor
    pub fn seating_layout() -> Self {
        Self {
            name: "seating_layout".to_string(),
            field_id: "id_layout".to_string(),
            field_kind: FieldKind::FormValue,
            export_button_id: "download_layout".to_string(),
            import: Some(ImportConfig {
                button_id: "upload_layout".to_string(),
            }),
            clear_button_id: Some("clear_layout".to_string()),
            status_id: Some("layout_status".to_string()),
            format: FileFormat::Json,
            validity: ValidityPredicate::NonEmpty,
            filename: FilenameRule::json_property("name", "seatingplan.json"),
            guard_export: false,
        }
    }

    /// Export of the event's seat list
    pub fn seat_export() -> Self {
        Self::text_export("seat_export", "seat-csv", "download-seat", "event-seats.csv")
    }

    /// Export of the event's order positions
    pub fn orderposition_export() -> Self {
        Self::text_export(
            "orderposition_export",
            "orderpositions-csv",
            "download-orderpos",
            "event-orderpos.csv",
        )
    }

    fn text_export(name: &str, field_id: &str, button_id: &str, filename: &str) -> Self {
        Self {
            name: name.to_string(),
            field_id: field_id.to_string(),
            field_kind: FieldKind::TextContent,
            export_button_id: button_id.to_string(),
            import: None,
            clear_button_id: None,
            status_id: None,
            format: FileFormat::Csv,
            validity: ValidityPredicate::Always,
            filename: FilenameRule::constant(filename),
            guard_export: false,
        }
    }

    /// All built-in widgets
    pub fn presets() -> Vec<Self> {
        vec![
            Self::assigned_seats(),
            Self::seating_layout(),
            Self::seat_export(),
            Self::orderposition_export(),
        ]
    }

    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let require = |value: &str, field: &'static str| {
            if value.trim().is_empty() {
                Err(ConfigError::EmptyValue {
                    bridge: self.name.clone(),
                    field,
                })
            } else {
                Ok(())
            }
        };

        require(&self.name, "name")?;
        require(&self.field_id, "field_id")?;
        require(&self.export_button_id, "export_button_id")?;
        if let Some(import) = &self.import {
            require(&import.button_id, "import.button_id")?;
        }
        if let Some(clear) = &self.clear_button_id {
            require(clear, "clear_button_id")?;
        }
        if let Some(status) = &self.status_id {
            require(status, "status_id")?;
        }

        match &self.filename {
            FilenameRule::Constant { filename } => require(filename, "filename.filename")?,
            FilenameRule::JsonProperty { key, fallback } => {
                require(key, "filename.key")?;
                require(fallback, "filename.fallback")?;
            }
        }

        if !self.field_kind.is_writable() {
            if self.import.is_some() {
                return Err(ConfigError::ReadOnlyField {
                    bridge: self.name.clone(),
                    action: "import",
                });
            }
            if self.clear_button_id.is_some() {
                return Err(ConfigError::ReadOnlyField {
                    bridge: self.name.clone(),
                    action: "clear",
                });
            }
        }

        if self.clear_button_id.is_some() && self.validity == ValidityPredicate::Always {
            return Err(ConfigError::ClearAlwaysValid(self.name.clone()));
        }

        Ok(())
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_bridges() -> Vec<BridgeConfig> {
    BridgeConfig::presets()
}

/// Everything bound on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// `tracing` filter directive, e.g. `info` or `manualseats_core=debug`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_bridges")]
    pub bridges: Vec<BridgeConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            bridges: default_bridges(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a page configuration
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: PageConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for bridge in &self.bridges {
            bridge.validate()?;
            if !names.insert(bridge.name.as_str()) {
                return Err(ConfigError::DuplicateName(bridge.name.clone()));
            }
        }
        Ok(())
    }
}
