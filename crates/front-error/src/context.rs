use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

/// Coarse category tag carried by every record built in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Generic caught failure.
    #[serde(rename = "WRAPPED_ERROR")]
    Wrapped,
    /// Explicit fatal condition.
    #[serde(rename = "CRITICAL")]
    Critical,
    /// Expected, user-correctable condition.
    #[serde(rename = "USER_ERROR")]
    User,
    /// Network or service response failure.
    #[serde(rename = "API_ERROR")]
    Api,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Wrapped => "WRAPPED_ERROR",
            ErrorCode::Critical => "CRITICAL",
            ErrorCode::User => "USER_ERROR",
            ErrorCode::Api => "API_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured diagnostic bag attached to an [`crate::ErrorRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorContext {
    /// Empty context stamped with the current instant.
    pub fn new() -> Self {
        Self {
            component: None,
            error_code: None,
            status_code: None,
            timestamp: Utc::now(),
            data: None,
            severity: None,
        }
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        let component = component.into();
        self.component = (!component.is_empty()).then_some(component);
        self
    }

    pub fn error_code(mut self, code: ErrorCode) -> Self {
        self.error_code = Some(code);
        self
    }

    pub fn status_code(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Override the construction-time stamp, e.g. when replaying a recorded failure.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// ISO-8601 rendering of the timestamp with millisecond precision.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn has_component(&self) -> bool {
        self.component.as_deref().is_some_and(|c| !c.is_empty())
    }
}
