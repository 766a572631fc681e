use super::{ErrorHandler, ErrorRecord, RawFailure, Reporter, wrap};

/// Extension trait for `Result` that normalizes failures at subsystem
/// boundaries without changing the success path.
///
/// Example
/// ```rust,ignore
/// use front_error::{ErrorHandler, ResultExt, TracingReporter};
///
/// fn load(handler: &ErrorHandler<TracingReporter>) -> Result<String, front_error::ErrorRecord> {
///     std::fs::read_to_string("settings.json").or_handle(handler, "settings")
/// }
/// ```
pub trait ResultExt<T> {
    /// Convert the error into a record without reporting it.
    fn or_wrap(self, component: &str) -> Result<T, ErrorRecord>;

    /// Convert the error into a record and report it through `handler`.
    fn or_handle<R: Reporter>(
        self,
        handler: &ErrorHandler<R>,
        component: &str,
    ) -> Result<T, ErrorRecord>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<RawFailure>,
{
    fn or_wrap(self, component: &str) -> Result<T, ErrorRecord> {
        self.map_err(|e| wrap(e, component))
    }

    fn or_handle<R: Reporter>(
        self,
        handler: &ErrorHandler<R>,
        component: &str,
    ) -> Result<T, ErrorRecord> {
        self.map_err(|e| handler.handle(e, component))
    }
}

/// Report an already-normalized failure while keeping the result for the caller.
pub trait ReportExt {
    fn report_err(self, reporter: &impl Reporter) -> Self;
}

impl<T> ReportExt for Result<T, ErrorRecord> {
    fn report_err(self, reporter: &impl Reporter) -> Self {
        if let Err(ref e) = self {
            reporter.report(e);
        }
        self
    }
}
