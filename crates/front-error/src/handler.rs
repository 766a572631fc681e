use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use super::*;

/// Component used when a caller does not name one.
pub const UNKNOWN_COMPONENT: &str = "unknown";

/// Composes normalization with reporting: every failure that passes through
/// becomes an [`ErrorRecord`] and is handed to the injected [`Reporter`].
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler<R> {
    reporter: R,
}

impl<R: Reporter> ErrorHandler<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Wrap with default messages, report, and return the record.
    pub fn handle(&self, raw: impl Into<RawFailure>, component: &str) -> ErrorRecord {
        self.handle_with(raw, component, None, None)
    }

    pub fn handle_with(
        &self,
        raw: impl Into<RawFailure>,
        component: &str,
        user_message: Option<&str>,
        user_action: Option<&str>,
    ) -> ErrorRecord {
        let component = if component.is_empty() {
            UNKNOWN_COMPONENT
        } else {
            component
        };
        let record = wrap_with(raw, component, user_message, user_action);
        tracing::trace!(
            target: "front_error::handler",
            component = record.component().unwrap_or(UNKNOWN_COMPONENT),
            code = ?record.error_code(),
            severity = %self.reporter.classify(&record),
            "reporting record"
        );
        self.reporter.report(&record);
        record
    }

    /// Run `operation`; a failure (or a panic) is handled and returned as the
    /// error value, a success is passed through untouched.
    pub async fn handle_async<F, Fut, T, E>(
        &self,
        operation: F,
        component: &str,
        user_message: Option<&str>,
    ) -> std::result::Result<T, ErrorRecord>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<RawFailure>,
    {
        match AssertUnwindSafe(async move { operation().await })
            .catch_unwind()
            .await
        {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(self.handle_with(e, component, user_message, None)),
            Err(payload) => Err(self.handle_with(
                RawFailure::from_panic(payload),
                component,
                user_message,
                None,
            )),
        }
    }
}
