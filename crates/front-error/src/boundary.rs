//! Display side of the normalizer: what an error boundary is allowed to show.
//!
//! Only the user message and user action ever leave this module as text; the
//! log message, cause and diagnostic data stay with the reporter.

use serde::Serialize;

use super::*;

pub const FALLBACK_HEADING: &str = "Oops! Something went wrong";
pub const RETRY_LABEL: &str = "Try again";

/// Display-safe projection of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotice<'a> {
    pub user_message: &'a str,
    pub user_action: &'a str,
}

impl<'a> From<&'a ErrorRecord> for UserNotice<'a> {
    fn from(record: &'a ErrorRecord) -> Self {
        Self {
            user_message: record.user_message(),
            user_action: record.user_action(),
        }
    }
}

impl std::fmt::Display for UserNotice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{FALLBACK_HEADING}")?;
        writeln!(f, "{}", self.user_message)?;
        writeln!(f, "What you can do: {}", self.user_action)?;
        write!(f, "[{RETRY_LABEL}]")
    }
}

/// Failure state of one UI region.
///
/// `catch` records and reports the failure, the region then renders the
/// fallback until `reset` clears it and lets normal rendering resume.
pub struct ErrorBoundary<R> {
    component: String,
    reporter: R,
    failure: Option<ErrorRecord>,
}

impl<R: Reporter> ErrorBoundary<R> {
    pub fn new(component: impl Into<String>, reporter: R) -> Self {
        Self {
            component: component.into(),
            reporter,
            failure: None,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn catch(&mut self, raw: impl Into<RawFailure>) -> UserNotice<'_> {
        let record = boundary_error(raw, &self.component);
        self.reporter.report(&record);
        UserNotice::from(&*self.failure.insert(record))
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn notice(&self) -> Option<UserNotice<'_>> {
        self.failure.as_ref().map(UserNotice::from)
    }

    /// Fallback text for the current failure, if any.
    pub fn render_fallback(&self) -> Option<String> {
        self.notice().map(|n| n.to_string())
    }

    /// The single recovery action: drop the failure and return it to the caller.
    pub fn reset(&mut self) -> Option<ErrorRecord> {
        self.failure.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_never_shows_technical_detail() {
        let mut boundary = ErrorBoundary::new("App", NoopReporter);
        let notice = boundary.catch(std::io::Error::other("SECRET stack detail"));
        assert_eq!(notice.user_message, BOUNDARY_USER_MESSAGE);

        let text = boundary.render_fallback().unwrap();
        assert!(text.starts_with(FALLBACK_HEADING));
        assert!(text.contains("What you can do: Please try again or contact support"));
        assert!(text.ends_with("[Try again]"));
        assert!(!text.contains("SECRET"));

        let json = serde_json::to_value(boundary.notice().unwrap()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn reset_clears_the_failure() {
        let mut boundary = ErrorBoundary::new("", NoopReporter);
        boundary.catch("render failed");
        assert!(boundary.has_failed());
        let rec = boundary.reset().unwrap();
        assert_eq!(rec.component(), Some(BOUNDARY_COMPONENT));
        assert!(!boundary.has_failed());
        assert!(boundary.render_fallback().is_none());
    }
}
