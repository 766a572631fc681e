use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid DSN {dsn:?}: {reason}")]
    Dsn { dsn: String, reason: &'static str },

    #[error("Sample rate `{name}` must be within 0.0..=1.0, got {value}")]
    SampleRate { name: &'static str, value: f64 },

    #[error("max_breadcrumbs must be greater than zero")]
    BreadcrumbCapacity,

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Transport setup failed: {0}")]
    Transport(String),

    #[error("Failed to start transport worker: {0}")]
    Io(#[from] std::io::Error),
}
