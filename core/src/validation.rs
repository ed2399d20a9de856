// Validity predicates deciding whether Export is available

use serde::{Deserialize, Serialize};

/// Header line of assigned-seats CSV files
pub const ASSIGNED_SEATS_HEADER: &str = "seat_guid,orderposition_secret";

/// Rule enabling the Export button for the current field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidityPredicate {
    /// Any non-empty value
    NonEmpty,
    /// Value starts with a literal prefix
    StartsWith { prefix: String },
    /// First line equals `header` (a trailing `\r` is ignored)
    HeaderLine { header: String },
    /// Value parses as JSON other than `null`
    JsonValue,
    /// Export is never disabled
    Always,
}

impl ValidityPredicate {
    pub fn header_line(header: impl Into<String>) -> Self {
        ValidityPredicate::HeaderLine {
            header: header.into(),
        }
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        ValidityPredicate::StartsWith {
            prefix: prefix.into(),
        }
    }

    /// Evaluate the predicate against a field value
    pub fn holds(&self, value: &str) -> bool {
        match self {
            ValidityPredicate::NonEmpty => !value.is_empty(),
            ValidityPredicate::StartsWith { prefix } => {
                !value.is_empty() && value.starts_with(prefix.as_str())
            }
            ValidityPredicate::HeaderLine { header } => {
                !value.is_empty() && first_line(value) == header
            }
            ValidityPredicate::JsonValue => {
                matches!(
                    serde_json::from_str::<serde_json::Value>(value),
                    Ok(parsed) if !parsed.is_null()
                )
            }
            ValidityPredicate::Always => true,
        }
    }
}

fn first_line(value: &str) -> &str {
    let line = value.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}
