//! JSON payload types and the single-line writer (made by FontLab https://www.fontlab.com/)

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Outcome of an activate or deactivate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationReport {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(err: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
        }
    }
}

/// Fonts currently installed for the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontListing {
    pub fonts: Vec<PathBuf>,
}

/// Payload for errors that escape an operation entirely, e.g. an unusable
/// command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl ErrorReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            usage: None,
        }
    }

    pub fn with_usage(error: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            usage: Some(usage.into()),
        }
    }
}

/// Write `value` as exactly one JSON object on one line.
pub fn write_json_line<T: Serialize>(value: &T, mut w: impl Write) -> Result<()> {
    let line = serde_json::to_string(value)?;
    w.write_all(line.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}
