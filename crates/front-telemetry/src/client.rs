use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use front_error::{ErrorRecord, Reporter, TracingReporter};
use serde::Serialize;
use uuid::Uuid;

use crate::config::DEFAULT_MAX_BREADCRUMBS;
use crate::filter::{before_breadcrumb, before_send};
use crate::{
    Breadcrumb, Dsn, Event, HttpTransport, Level, Measurement, SampleRates, TelemetryConfig,
    TelemetryError, Transport, UserContext,
};

/// Snapshot of the client's state, for diagnostics screens and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryInfo {
    pub enabled: bool,
    pub environment: String,
    pub is_development: bool,
    pub sampling: SampleRates,
}

#[derive(Debug, Default)]
struct Scope {
    breadcrumbs: VecDeque<Breadcrumb>,
    measurements: BTreeMap<String, Measurement>,
    user: Option<UserContext>,
}

/// Client for the hosted error-tracking service, and the application's
/// [`Reporter`].
///
/// As a reporter it echoes every record to the local log in development.
/// Without a DSN the client is disabled and captures are dropped.
pub struct TelemetryClient {
    config: TelemetryConfig,
    transport: Option<Box<dyn Transport>>,
    scope: Mutex<Scope>,
}

impl std::fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("environment", &self.config.environment)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl TelemetryClient {
    /// Start the client, falling back to a disabled one on any setup failure.
    pub fn init(config: TelemetryConfig) -> Self {
        match Self::try_init(config.clone()) {
            Ok(client) => client,
            Err(e) => {
                if config.is_development {
                    tracing::error!(error = %e, "failed to initialize telemetry");
                }
                let mut config = config;
                if config.max_breadcrumbs == 0 {
                    config.max_breadcrumbs = DEFAULT_MAX_BREADCRUMBS;
                }
                Self::disabled(config)
            }
        }
    }

    pub fn try_init(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        config.validate()?;
        let Some(raw) = config.dsn.as_deref() else {
            if config.is_development {
                tracing::warn!("dsn not configured - telemetry disabled");
            }
            return Ok(Self::disabled(config));
        };
        let dsn = Dsn::parse(raw)?;
        let transport = HttpTransport::new(&dsn)?;
        if config.is_development {
            tracing::info!(
                environment = %config.environment,
                dsn = %dsn,
                traces = config.sample_rates.traces,
                session_replays = config.sample_rates.session_replay,
                error_replays = config.sample_rates.error_replay,
                mask_text = config.privacy.mask_text,
                mask_inputs = config.privacy.mask_inputs,
                block_media = config.privacy.block_media,
                "telemetry initialized"
            );
        }
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: TelemetryConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Some(Box::new(transport)),
            scope: Mutex::new(Scope::default()),
        }
    }

    pub fn disabled(config: TelemetryConfig) -> Self {
        Self {
            config,
            transport: None,
            scope: Mutex::new(Scope::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn info(&self) -> TelemetryInfo {
        TelemetryInfo {
            enabled: self.is_enabled(),
            environment: self.config.environment.clone(),
            is_development: self.config.is_development,
            sampling: self.config.sample_rates,
        }
    }

    fn scope(&self) -> std::sync::MutexGuard<'_, Scope> {
        self.scope
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attach scope state, filter, and hand the event to the transport.
    /// Returns the id of the event if it was sent.
    pub fn capture_event(&self, mut event: Event) -> Option<Uuid> {
        let transport = self.transport.as_ref()?;
        {
            let scope = self.scope();
            event.breadcrumbs = scope.breadcrumbs.iter().cloned().collect();
            event.measurements = scope.measurements.clone();
            if event.user.is_none() {
                event.user = scope.user.clone();
            }
        }
        if event.environment.is_none() {
            event.environment = Some(self.config.environment.clone());
        }
        let event = before_send(event, self.config.is_development)?;
        let id = event.event_id;
        transport.send(event);
        Some(id)
    }

    pub fn capture_record(&self, record: &ErrorRecord) -> Option<Uuid> {
        self.capture_event(Event::from_record(record))
    }

    pub fn capture_message(&self, message: impl Into<String>, level: Level) -> Option<Uuid> {
        self.capture_event(Event::message(message, level))
    }

    pub fn add_breadcrumb(&self, crumb: Breadcrumb) {
        let Some(crumb) = before_breadcrumb(crumb, self.config.is_development) else {
            return;
        };
        let cap = self.config.max_breadcrumbs.max(1);
        let mut scope = self.scope();
        while scope.breadcrumbs.len() >= cap {
            scope.breadcrumbs.pop_front();
        }
        scope.breadcrumbs.push_back(crumb);
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.scope().breadcrumbs.iter().cloned().collect()
    }

    pub fn set_measurement(&self, name: &str, value: f64, unit: &str) {
        self.scope().measurements.insert(
            name.to_string(),
            Measurement {
                value,
                unit: unit.to_string(),
            },
        );
    }

    pub fn measurements(&self) -> BTreeMap<String, Measurement> {
        self.scope().measurements.clone()
    }

    pub fn set_user(&self, user: UserContext) {
        self.scope().user = Some(user);
    }

    pub fn clear_user(&self) {
        self.scope().user = None;
    }

    pub fn flush(&self, timeout: Duration) -> bool {
        self.transport
            .as_ref()
            .map_or(true, |t| t.flush(timeout))
    }
}

impl Reporter for TelemetryClient {
    fn report(&self, record: &ErrorRecord) {
        if self.config.is_development {
            TracingReporter.report(record);
        }
        self.capture_record(record);
    }
}
