//! Pure constructors: turn caught values into [`ErrorRecord`]s.
//!
//! Nothing here performs I/O or can fail; reporting is composed on top by
//! [`crate::ErrorHandler`].

use serde_json::json;

use super::*;

pub const CRITICAL_USER_MESSAGE: &str = "A critical error occurred";
pub const CRITICAL_USER_ACTION: &str = "Please refresh the page or contact support immediately";
pub const API_USER_ACTION: &str = "Please try again or contact support if the problem persists";
pub const BOUNDARY_USER_MESSAGE: &str = "The app encountered an unexpected error";
pub const BOUNDARY_COMPONENT: &str = "ErrorBoundary";

/// [`wrap_with`] using the default user message and action.
pub fn wrap(raw: impl Into<RawFailure>, component: &str) -> ErrorRecord {
    wrap_with(raw, component, None, None)
}

/// Normalize any caught value.
///
/// A record passes through untouched except for a one-time component backfill.
/// Everything else becomes a `WRAPPED_ERROR` record of medium severity whose
/// cause is the original error (or a stand-in carrying its text).
pub fn wrap_with(
    raw: impl Into<RawFailure>,
    component: &str,
    user_message: Option<&str>,
    user_action: Option<&str>,
) -> ErrorRecord {
    let raw = raw.into();
    let original = raw.stringify();
    let cause: Cause = match raw {
        RawFailure::Normalized(mut record) => {
            record.set_component_if_absent(component);
            return record;
        }
        RawFailure::Native(err) => err,
        RawFailure::Opaque(_) => Box::new(OpaqueFailure(original.clone())),
    };

    let context = ErrorContext::new()
        .component(component)
        .error_code(ErrorCode::Wrapped)
        .severity(Severity::Medium)
        .data(json!({ "originalError": original }));

    ErrorRecord::new(
        user_message.unwrap_or(DEFAULT_USER_MESSAGE),
        user_action.unwrap_or(DEFAULT_USER_ACTION),
        cause.to_string(),
        context,
    )
    .with_cause(cause)
}

/// Explicit fatal condition.
pub fn critical_error(
    message: &str,
    component: &str,
    user_message: Option<&str>,
    cause: Option<Cause>,
) -> ErrorRecord {
    let context = ErrorContext::new()
        .component(component)
        .error_code(ErrorCode::Critical)
        .severity(Severity::Critical);
    ErrorRecord::new(
        user_message.unwrap_or(CRITICAL_USER_MESSAGE),
        CRITICAL_USER_ACTION,
        message,
        context,
    )
    .with_optional_cause(cause)
}

/// Expected condition the user can fix themselves.
pub fn user_error(
    user_message: &str,
    user_action: &str,
    component: &str,
    technical: Option<&str>,
) -> ErrorRecord {
    let context = ErrorContext::new()
        .component(component)
        .error_code(ErrorCode::User)
        .severity(Severity::Low);
    ErrorRecord::new(
        user_message,
        user_action,
        technical.unwrap_or(user_message),
        context,
    )
}

/// Failed network/service response, classified by HTTP status.
pub fn api_error(status_code: u16, component: &str, api_message: Option<&str>) -> ErrorRecord {
    let severity = if status_code >= 500 {
        Severity::High
    } else {
        Severity::Medium
    };
    let context = ErrorContext::new()
        .component(component)
        .error_code(ErrorCode::Api)
        .status_code(status_code)
        .severity(severity);
    let log_message = match api_message {
        Some(m) => m.to_string(),
        None => format!("API Error {status_code}"),
    };
    ErrorRecord::new(
        api_user_message(status_code),
        API_USER_ACTION,
        log_message,
        context,
    )
}

pub fn api_user_message(status_code: u16) -> &'static str {
    match status_code {
        401 => "You need to log in to continue",
        403 => "You don't have permission to do that",
        404 => "The requested resource was not found",
        500 => "Server error - we're looking into it",
        _ => "Something went wrong with the request",
    }
}

/// Normalization used by UI error boundaries.
pub fn boundary_error(raw: impl Into<RawFailure>, component: &str) -> ErrorRecord {
    let component = if component.is_empty() {
        BOUNDARY_COMPONENT
    } else {
        component
    };
    wrap_with(raw, component, Some(BOUNDARY_USER_MESSAGE), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wrap_native_keeps_cause_and_message() {
        let rec = wrap(std::io::Error::other("socket closed"), "chat");
        assert_eq!(rec.log_message(), "socket closed");
        assert_eq!(rec.user_message(), DEFAULT_USER_MESSAGE);
        assert_eq!(rec.user_action(), DEFAULT_USER_ACTION);
        assert_eq!(rec.error_code(), Some(ErrorCode::Wrapped));
        assert_eq!(rec.severity(), Severity::Medium);
        assert_eq!(rec.data().unwrap()["originalError"], "socket closed");
        let src = rec.source().expect("cause kept");
        assert!(src.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn wrap_opaque_uses_stand_in_cause() {
        let rec = wrap(serde_json::json!({"code": 7}), "form");
        assert_eq!(rec.log_message(), r#"{"code":7}"#);
        let cause = rec.cause().unwrap();
        assert!(cause.downcast_ref::<OpaqueFailure>().is_some());
    }

    #[test]
    fn wrap_with_custom_messages() {
        let rec = wrap_with("nope", "upload", Some("Upload failed"), Some("Pick a smaller file"));
        assert_eq!(rec.user_message(), "Upload failed");
        assert_eq!(rec.user_action(), "Pick a smaller file");
    }

    #[test]
    fn rewrap_keeps_first_component() {
        let first = wrap("boom", "A");
        let again = wrap(first, "B");
        assert_eq!(again.component(), Some("A"));
    }

    #[test]
    fn rewrap_backfills_missing_component() {
        let rec = user_error("Bad email", "Check the address", "", None);
        assert_eq!(rec.component(), None);
        let rec = wrap(rec, "signup");
        assert_eq!(rec.component(), Some("signup"));
        assert_eq!(rec.error_code(), Some(ErrorCode::User));
    }

    #[test]
    fn user_error_log_message_falls_back() {
        let rec = user_error("Name is required", "Enter a name", "profile", None);
        assert_eq!(rec.log_message(), "Name is required");
        assert_eq!(rec.severity(), Severity::Low);
        let rec = user_error("Name is required", "Enter a name", "profile", Some("name=None"));
        assert_eq!(rec.log_message(), "name=None");
    }

    #[test]
    fn api_status_table() {
        assert_eq!(api_user_message(403), "You don't have permission to do that");
        assert_eq!(api_user_message(404), "The requested resource was not found");
        let rec = api_error(503, "feed", None);
        assert_eq!(rec.user_message(), "Something went wrong with the request");
        assert_eq!(rec.log_message(), "API Error 503");
        assert_eq!(rec.severity(), Severity::High);
        assert_eq!(rec.status_code(), Some(503));
        assert_eq!(rec.user_action(), API_USER_ACTION);
    }

    #[test]
    fn critical_error_keeps_cause() {
        let rec = critical_error(
            "index corrupt",
            "storage",
            Some("We lost your draft"),
            Some(Box::new(std::io::Error::other("bad block"))),
        );
        assert_eq!(rec.user_message(), "We lost your draft");
        assert_eq!(rec.cause().unwrap().to_string(), "bad block");
    }

    #[test]
    fn boundary_defaults() {
        let rec = boundary_error("render blew up", "");
        assert_eq!(rec.component(), Some(BOUNDARY_COMPONENT));
        assert_eq!(rec.user_message(), BOUNDARY_USER_MESSAGE);
    }
}
