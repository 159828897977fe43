use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A loosely-typed value from the warehouse API.
///
/// The upstream service mixes strings and numbers for the same field across
/// records, so values are kept as raw JSON and only stringified for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(Option<Value>);

impl FieldValue {
    pub const fn new(value: Value) -> Self {
        Self(Some(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_ref().and_then(Value::as_str)
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self.0, None | Some(Value::Null))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::new(Value::String(value.to_string()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None | Some(Value::Null) => write!(f, "N/A"),
            Some(Value::String(text)) => write!(f, "{text}"),
            Some(Value::Number(number)) => write!(f, "{number}"),
            Some(Value::Bool(flag)) => write!(f, "{flag}"),
            Some(other) => write!(f, "{other}"),
        }
    }
}

/// One storage facility as returned by the warehouse API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    #[serde(rename = "WH Name", default)]
    pub name: FieldValue,
    #[serde(rename = "WHM Name", default)]
    pub manager: FieldValue,
    #[serde(rename = "Address", default)]
    pub address: FieldValue,
    /// Capacity in metric tonnes.
    #[serde(rename = "Capacity(in MT)", default)]
    pub capacity: FieldValue,
    #[serde(rename = "Contact No.", default)]
    pub contact: FieldValue,
    #[serde(rename = "Status", default)]
    pub status: FieldValue,
    #[serde(rename = "Registration Valid Upto", default)]
    pub valid_until: FieldValue,
}

impl WarehouseRecord {
    pub fn badge(&self) -> BadgeClass {
        BadgeClass::for_status(self.status.as_str())
    }
}

/// Styling of the status badge on a result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Success,
    Warning,
    Danger,
}

impl BadgeClass {
    /// Exact, case-sensitive match; anything unrecognised renders as healthy.
    pub fn for_status(status: Option<&str>) -> Self {
        match status {
            Some("Inactive" | "Closed") => Self::Danger,
            Some("Under Maintenance") => Self::Warning,
            _ => Self::Success,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "bg-success",
            Self::Warning => "bg-warning",
            Self::Danger => "bg-danger",
        }
    }
}

/// Styling of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Danger => "Error",
        }
    }
}
