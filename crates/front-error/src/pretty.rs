//! Structured, log-friendly views of records.

use serde::Serialize;

use super::ErrorRecord;

/// Provide a structured view of an error for logging or a reporting sink.
///
/// Implementors expose a lightweight set of serializable fields; callers can
/// choose between the raw fields, a `serde_json::Value`, or a pretty JSON
/// string for human consumption.
pub trait PrettyDebug {
    type Fields<'a>: Serialize + 'a
    where
        Self: 'a;

    fn fields(&self) -> Self::Fields<'_>;

    /// Convert fields to a JSON value without pretty whitespace.
    fn to_value(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self.fields()).ok()
    }

    /// Convert fields to a pretty JSON string (for logs).
    fn pretty_json(&self) -> Option<String> {
        serde_json::to_string_pretty(&self.fields()).ok()
    }

    /// Emit a tracing event with both the Display string and structured fields.
    fn emit_tracing(&self, level: tracing::Level, message: &str)
    where
        Self: std::fmt::Display,
    {
        let fields = self
            .to_value()
            .map(|v| v.to_string())
            .unwrap_or_default();
        match level {
            tracing::Level::ERROR => {
                tracing::event!(tracing::Level::ERROR, error = %self, fields = %fields, "{message}")
            }
            tracing::Level::WARN => {
                tracing::event!(tracing::Level::WARN, error = %self, fields = %fields, "{message}")
            }
            tracing::Level::INFO => {
                tracing::event!(tracing::Level::INFO, error = %self, fields = %fields, "{message}")
            }
            tracing::Level::DEBUG => {
                tracing::event!(tracing::Level::DEBUG, error = %self, fields = %fields, "{message}")
            }
            tracing::Level::TRACE => {
                tracing::event!(tracing::Level::TRACE, error = %self, fields = %fields, "{message}")
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields<'a> {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<&'a str>,
    pub user_message: &'a str,
    pub user_action: &'a str,
    pub technical: TechnicalFields<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalFields<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<crate::ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub timestamp: String,
    pub severity: crate::Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl PrettyDebug for ErrorRecord {
    type Fields<'a> = RecordFields<'a>;

    fn fields(&self) -> RecordFields<'_> {
        let ctx = self.context();
        RecordFields {
            name: "FrontError",
            component: self.component(),
            user_message: self.user_message(),
            user_action: self.user_action(),
            technical: TechnicalFields {
                message: self.log_message(),
                error_code: ctx.error_code,
                status_code: ctx.status_code,
                timestamp: ctx.timestamp_iso(),
                severity: self.severity(),
                stack: self.stack(),
                cause: self.cause().map(|c| c.to_string()),
            },
            data: self.data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PrettyDebug;
    use crate::{api_error, wrap};

    #[test]
    fn record_fields_follow_report_shape() {
        let rec = api_error(404, "search", Some("GET /q -> 404"));
        let value = rec.to_value().expect("value");
        assert_eq!(value["name"], "FrontError");
        assert_eq!(value["component"], "search");
        assert_eq!(value["userMessage"], "The requested resource was not found");
        assert_eq!(value["technical"]["message"], "GET /q -> 404");
        assert_eq!(value["technical"]["errorCode"], "API_ERROR");
        assert_eq!(value["technical"]["statusCode"], 404);
        assert_eq!(value["technical"]["severity"], "medium");
        assert!(value["technical"]["timestamp"].is_string());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn pretty_json_includes_cause_and_data() {
        let rec = wrap(std::io::Error::other("reset by peer"), "chat");
        let pretty = rec.pretty_json().expect("pretty json");
        assert!(pretty.contains("\"cause\": \"reset by peer\""));
        assert!(pretty.contains("\"originalError\": \"reset by peer\""));
    }

    #[test]
    fn emit_tracing_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        let rec = wrap("boom", "test");
        rec.emit_tracing(tracing::Level::ERROR, "demo emit");
        rec.emit_tracing(tracing::Level::TRACE, "demo emit");
    }
}
