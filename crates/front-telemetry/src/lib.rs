//! front-telemetry: the reporting sink behind `front-error`.
//!
//! - [`TelemetryConfig`]: explicit configuration, loaded once from file and environment.
//! - [`TelemetryClient`]: scope (breadcrumbs, measurements, user), filters, and delivery
//!   through a [`Transport`]; implements [`front_error::Reporter`].
//! - [`vitals`]: web-vitals forwarding; [`marks`]: ad-hoc performance marks.
//! - [`tracing_setup`]: subscriber installation.
//!
//! Quick start
//! ```rust,ignore
//! use front_error::ErrorHandler;
//! use front_telemetry::{TelemetryClient, TelemetryConfig};
//!
//! let config = TelemetryConfig::load()?;
//! let client = TelemetryClient::init(config);
//! let handler = ErrorHandler::new(&client);
//! let record = handler.handle(std::io::Error::other("socket closed"), "chat");
//! ```
pub mod client;
pub mod config;
pub mod dsn;
pub mod error;
pub mod event;
pub mod filter;
pub mod marks;
pub mod tracing_setup;
pub mod transport;
pub mod vitals;

pub use client::{TelemetryClient, TelemetryInfo};
pub use config::{ReplayPrivacy, SampleRates, TelemetryConfig};
pub use dsn::Dsn;
pub use error::TelemetryError;
pub use event::{Breadcrumb, Event, ExceptionInfo, Level, Measurement, UserContext};
pub use filter::{NOISE_DENYLIST, before_breadcrumb, before_send};
pub use marks::{EntryKind, PerformanceEntry, PerformanceMarks};
pub use transport::{HttpTransport, MemoryTransport, Transport};
pub use vitals::{Metric, MetricHandler, MetricName, Rating, VitalsReporter, report_web_vitals};
