use super::{ErrorRecord, Severity};
use crate::pretty::PrettyDebug;

/// The reporting seam.
///
/// The normalizer never logs or sends anything itself; it hands finished records to a
/// `Reporter` installed by the application, which decides where they go:
/// - a hosted error-tracking service
/// - local structured logs
/// - a UI notification channel
/// - nowhere (production without telemetry)
///
/// Example
/// ```rust,ignore
/// use front_error::{Reporter, ErrorRecord};
///
/// struct PrintReporter;
/// impl Reporter for PrintReporter {
///     fn report(&self, r: &ErrorRecord) { eprintln!("[{}] {r}", r.severity()); }
/// }
/// ```
pub trait Reporter: Send + Sync {
    /// Send the record to wherever this reporter routes failures.
    fn report(&self, record: &ErrorRecord);

    /// Severity the reporter assigns to the record.
    fn classify(&self, record: &ErrorRecord) -> Severity {
        record.severity()
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, record: &ErrorRecord) {
        (**self).report(record)
    }

    fn classify(&self, record: &ErrorRecord) -> Severity {
        (**self).classify(record)
    }
}

impl<R: Reporter + ?Sized> Reporter for std::sync::Arc<R> {
    fn report(&self, record: &ErrorRecord) {
        (**self).report(record)
    }

    fn classify(&self, record: &ErrorRecord) -> Severity {
        (**self).classify(record)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, record: &ErrorRecord) {
        (**self).report(record)
    }

    fn classify(&self, record: &ErrorRecord) -> Severity {
        (**self).classify(record)
    }
}

/// Drops every record.
#[derive(Debug, Clone, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _record: &ErrorRecord) {}
}

/// Echoes records to the local log with their structured fields, at a level
/// derived from their severity.
#[derive(Debug, Clone, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, record: &ErrorRecord) {
        record.emit_tracing(self.classify(record).tracing_level(), "FrontError");
    }
}

/// A reporter that delegates to several others.
///
/// Behavior
/// - report: delegates to all inner reporters in insertion order.
/// - classify: the most urgent severity among inner reporters (the record's own when empty).
#[derive(Default)]
pub struct CombinedReporter {
    reporters: Vec<Box<dyn Reporter>>,
}

impl CombinedReporter {
    pub fn new() -> Self {
        Self {
            reporters: Vec::new(),
        }
    }

    /// Add a reporter by value. Consumes and returns Self for builder-style chaining.
    pub fn push<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl Reporter for CombinedReporter {
    fn report(&self, record: &ErrorRecord) {
        for r in &self.reporters {
            r.report(record);
        }
    }

    fn classify(&self, record: &ErrorRecord) -> Severity {
        self.reporters
            .iter()
            .map(|r| r.classify(record))
            .fold(record.severity(), Severity::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorContext, user_error};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl Reporter for Collect {
        fn report(&self, record: &ErrorRecord) {
            self.0.lock().unwrap().push(record.log_message().to_string());
        }
    }

    struct Escalate;

    impl Reporter for Escalate {
        fn report(&self, _record: &ErrorRecord) {}
        fn classify(&self, _record: &ErrorRecord) -> Severity {
            Severity::Critical
        }
    }

    #[test]
    fn combined_reports_in_order_and_escalates() {
        let a = Arc::new(Collect::default());
        let b = Arc::new(Collect::default());
        let combined = CombinedReporter::new()
            .push(Arc::clone(&a))
            .push(Escalate)
            .push(Arc::clone(&b));
        let rec = user_error("Bad input", "Fix it", "form", Some("field x"));

        combined.report(&rec);
        assert_eq!(*a.0.lock().unwrap(), vec!["field x"]);
        assert_eq!(*b.0.lock().unwrap(), vec!["field x"]);
        assert_eq!(combined.classify(&rec), Severity::Critical);
    }

    #[test]
    fn empty_combined_uses_record_severity() {
        let rec = ErrorRecord::new("a", "b", "c", ErrorContext::new().severity(Severity::Low));
        assert!(CombinedReporter::new().is_empty());
        assert_eq!(CombinedReporter::new().classify(&rec), Severity::Low);
    }

    #[test]
    fn tracing_reporter_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        TracingReporter.report(&crate::api_error(500, "api", None));
    }
}
