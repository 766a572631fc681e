use std::backtrace::{Backtrace, BacktraceStatus};

use super::{ErrorCode, ErrorContext, Severity};

/// Underlying failure owned by a record once it has been wrapped.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const DEFAULT_USER_MESSAGE: &str = "Something went wrong";
pub const DEFAULT_USER_ACTION: &str = "Please try again or contact support";

/// The normalized, display-safe error shape.
///
/// `user_message` and `user_action` are the only fields meant for end users;
/// `log_message`, `cause` and `context.data` stay on the reporting side.
/// Records are immutable once built, apart from [`ErrorRecord::set_component_if_absent`].
#[derive(Debug, thiserror::Error)]
#[error("{log_message}")]
pub struct ErrorRecord {
    user_message: String,
    user_action: String,
    log_message: String,
    context: ErrorContext,
    #[source]
    cause: Option<Cause>,
    stack: Option<String>,
}

impl ErrorRecord {
    /// Build a record. Empty messages are replaced so that every record
    /// carries non-empty user message, user action and log message.
    pub fn new(
        user_message: impl Into<String>,
        user_action: impl Into<String>,
        log_message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        let user_message = non_empty_or(user_message.into(), DEFAULT_USER_MESSAGE);
        let user_action = non_empty_or(user_action.into(), DEFAULT_USER_ACTION);
        let log_message = non_empty_or(log_message.into(), &user_message);
        Self {
            user_message,
            user_action,
            log_message,
            context,
            cause: None,
            stack: capture_stack(),
        }
    }

    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub(crate) fn with_optional_cause(mut self, cause: Option<Cause>) -> Self {
        self.cause = cause;
        self
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn user_action(&self) -> &str {
        &self.user_action
    }

    pub fn log_message(&self) -> &str {
        &self.log_message
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn component(&self) -> Option<&str> {
        self.context.component.as_deref()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.context.error_code
    }

    pub fn status_code(&self) -> Option<u16> {
        self.context.status_code
    }

    /// Severity of the record; records built without one count as medium.
    pub fn severity(&self) -> Severity {
        self.context.severity.unwrap_or(Severity::Medium)
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.context.data.as_ref()
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Stack captured at construction, present only when backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// One-time component backfill. Returns `true` when the component was set.
    pub fn set_component_if_absent(&mut self, component: &str) -> bool {
        if self.context.has_component() || component.is_empty() {
            return false;
        }
        self.context.component = Some(component.to_string());
        true
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn capture_stack() -> Option<String> {
    let bt = Backtrace::capture();
    match bt.status() {
        BacktraceStatus::Captured => Some(bt.to_string()),
        _ => None,
    }
}
