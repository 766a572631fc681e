//! front-error: normalization of caught failures into display-safe records.
//!
//! Every failure the front end catches, whatever its shape, is turned into an
//! [`ErrorRecord`]: a user message and action that are safe to show, a technical
//! log message, a structured [`ErrorContext`] and the original cause.
//!
//! - [`wrap`] / [`wrap_with`] normalize any [`RawFailure`] (pure, infallible).
//! - [`critical_error`], [`user_error`], [`api_error`] build records for the common categories.
//! - [`ErrorHandler`] composes normalization with an injected [`Reporter`]
//!   (`handle`, `handle_async`).
//! - [`ErrorBoundary`] holds the failure state of a UI region and only exposes [`UserNotice`]s.
pub mod boundary;
pub mod context;
pub mod handler;
pub mod normalize;
pub mod policy;
pub mod pretty;
pub mod raw;
pub mod record;
pub mod result_ext;
pub mod severity;

// public exports
pub use boundary::{ErrorBoundary, UserNotice};
pub use context::{ErrorCode, ErrorContext};
pub use handler::{ErrorHandler, UNKNOWN_COMPONENT};
pub use normalize::{
    API_USER_ACTION, BOUNDARY_COMPONENT, BOUNDARY_USER_MESSAGE, CRITICAL_USER_ACTION,
    CRITICAL_USER_MESSAGE, api_error, api_user_message, boundary_error, critical_error,
    user_error, wrap, wrap_with,
};
pub use policy::{CombinedReporter, NoopReporter, Reporter, TracingReporter};
pub use pretty::PrettyDebug;
pub use raw::{OpaqueFailure, RawFailure};
pub use record::{Cause, DEFAULT_USER_ACTION, DEFAULT_USER_MESSAGE, ErrorRecord};
pub use result_ext::{ReportExt, ResultExt};
pub use severity::Severity;

pub type Result<T, E = ErrorRecord> = std::result::Result<T, E>;
