use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use front_error::{ErrorRecord, Severity};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => Level::Info,
            Severity::Medium => Level::Warning,
            Severity::High => Level::Error,
            Severity::Critical => Level::Fatal,
        }
    }
}

/// Lightweight, timestamped trail entry attached to the next captured event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Breadcrumb {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            timestamp: Utc::now(),
            category: None,
            message: message.into(),
            level,
            data: Value::Null,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserContext {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: String,
}

/// One unit sent to the reporting sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, Measurement>,
}

impl Event {
    pub fn new(level: Level) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            message: None,
            exception: None,
            tags: BTreeMap::new(),
            extra: BTreeMap::new(),
            environment: None,
            user: None,
            breadcrumbs: Vec::new(),
            measurements: BTreeMap::new(),
        }
    }

    pub fn message(msg: impl Into<String>, level: Level) -> Self {
        Self {
            message: Some(msg.into()),
            ..Self::new(level)
        }
    }

    /// Event for a normalized record: component tag plus the display and
    /// classification fields under `error_context`.
    pub fn from_record(record: &ErrorRecord) -> Self {
        let mut event = Self::new(record.severity().into());
        event.timestamp = record.context().timestamp;
        event.exception = Some(ExceptionInfo {
            ty: "FrontError".to_string(),
            value: record.log_message().to_string(),
        });
        if let Some(component) = record.component() {
            event.tags.insert("component".into(), component.to_string());
        }
        event.extra.insert(
            "error_context".into(),
            json!({
                "userMessage": record.user_message(),
                "userAction": record.user_action(),
                "errorCode": record.error_code(),
                "statusCode": record.status_code(),
                "severity": record.severity(),
            }),
        );
        if let Some(data) = record.data() {
            event.extra.insert("data".into(), data.clone());
        }
        if let Some(cause) = record.cause() {
            event.extra.insert("cause".into(), Value::String(cause.to_string()));
        }
        event
    }

    /// Text filters look at: the exception value, else the message.
    pub fn primary_message(&self) -> &str {
        self.exception
            .as_ref()
            .map(|e| e.value.as_str())
            .or(self.message.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use front_error::api_error;

    #[test]
    fn record_event_carries_tag_and_context() {
        let rec = api_error(503, "feed", Some("upstream timeout"));
        let event = Event::from_record(&rec);
        assert_eq!(event.level, Level::Error);
        assert_eq!(event.tags["component"], "feed");
        assert_eq!(event.primary_message(), "upstream timeout");
        let ctx = &event.extra["error_context"];
        assert_eq!(ctx["errorCode"], "API_ERROR");
        assert_eq!(ctx["statusCode"], 503);
        assert_eq!(ctx["severity"], "high");
    }

    #[test]
    fn serialized_event_skips_empty_sections() {
        let event = Event::message("hello", Level::Info);
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["level"], "info");
        assert_eq!(v["message"], "hello");
        assert!(v.get("breadcrumbs").is_none());
        assert!(v.get("exception").is_none());
    }
}
