//! Telemetry configuration.
//!
//! Everything the reporting sink needs is resolved once into a
//! [`TelemetryConfig`] and passed to [`crate::TelemetryClient::init`]; nothing
//! downstream reads the environment.
//!
//! Sources, later ones overriding earlier ones:
//! 1. mode defaults (development vs production)
//! 2. `<config_dir>/front/telemetry.toml` (optional)
//! 3. `FRONT_*` environment variables, nested keys split by `__`
//!    (`FRONT_DSN`, `FRONT_SAMPLE_RATES__TRACES`, ...), `.env` included

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Dsn, TelemetryError};

pub const ENV_PREFIX: &str = "FRONT";
pub const DEFAULT_MAX_BREADCRUMBS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRates {
    pub traces: f64,
    pub session_replay: f64,
    pub error_replay: f64,
}

impl SampleRates {
    /// Everything traced while developing, sparse sampling in production with
    /// every error session kept.
    pub fn for_mode(is_development: bool) -> Self {
        if is_development {
            Self {
                traces: 1.0,
                session_replay: 0.0,
                error_replay: 0.0,
            }
        } else {
            Self {
                traces: 0.1,
                session_replay: 0.01,
                error_replay: 1.0,
            }
        }
    }

    fn validate(&self) -> Result<(), TelemetryError> {
        for (name, value) in [
            ("traces", self.traces),
            ("session_replay", self.session_replay),
            ("error_replay", self.error_replay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TelemetryError::SampleRate { name, value });
            }
        }
        Ok(())
    }
}

/// Privacy settings for session replays: masked in production, visible in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayPrivacy {
    pub mask_text: bool,
    pub mask_inputs: bool,
    pub block_media: bool,
}

impl ReplayPrivacy {
    pub fn for_mode(is_development: bool) -> Self {
        Self {
            mask_text: !is_development,
            mask_inputs: !is_development,
            block_media: !is_development,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub dsn: Option<String>,
    pub environment: String,
    pub is_development: bool,
    pub sample_rates: SampleRates,
    pub privacy: ReplayPrivacy,
    pub max_breadcrumbs: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::for_mode(cfg!(debug_assertions))
    }
}

/// On-disk / environment shape: every field optional, resolved against mode defaults.
#[derive(Debug, Default, Deserialize)]
struct RawTelemetryConfig {
    dsn: Option<String>,
    environment: Option<String>,
    is_development: Option<bool>,
    #[serde(default)]
    sample_rates: RawSampleRates,
    #[serde(default)]
    privacy: RawPrivacy,
    max_breadcrumbs: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSampleRates {
    traces: Option<f64>,
    session_replay: Option<f64>,
    error_replay: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPrivacy {
    mask_text: Option<bool>,
    mask_inputs: Option<bool>,
    block_media: Option<bool>,
}

impl RawTelemetryConfig {
    fn resolve(self) -> TelemetryConfig {
        let is_development = self.is_development.unwrap_or(cfg!(debug_assertions));
        let base = TelemetryConfig::for_mode(is_development);
        TelemetryConfig {
            dsn: self.dsn.filter(|d| !d.trim().is_empty()),
            environment: self.environment.unwrap_or(base.environment),
            is_development,
            sample_rates: SampleRates {
                traces: self.sample_rates.traces.unwrap_or(base.sample_rates.traces),
                session_replay: self
                    .sample_rates
                    .session_replay
                    .unwrap_or(base.sample_rates.session_replay),
                error_replay: self
                    .sample_rates
                    .error_replay
                    .unwrap_or(base.sample_rates.error_replay),
            },
            privacy: ReplayPrivacy {
                mask_text: self.privacy.mask_text.unwrap_or(base.privacy.mask_text),
                mask_inputs: self.privacy.mask_inputs.unwrap_or(base.privacy.mask_inputs),
                block_media: self.privacy.block_media.unwrap_or(base.privacy.block_media),
            },
            max_breadcrumbs: self.max_breadcrumbs.unwrap_or(base.max_breadcrumbs),
        }
    }
}

impl TelemetryConfig {
    pub fn for_mode(is_development: bool) -> Self {
        Self {
            dsn: None,
            environment: if is_development {
                "development".to_string()
            } else {
                "production".to_string()
            },
            is_development,
            sample_rates: SampleRates::for_mode(is_development),
            privacy: ReplayPrivacy::for_mode(is_development),
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
        }
    }

    pub fn development() -> Self {
        Self::for_mode(true)
    }

    pub fn production() -> Self {
        Self::for_mode(false)
    }

    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Default location of the optional config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("front").join("telemetry.toml"))
    }

    /// Load from `.env`, the default config file and the process environment.
    pub fn load() -> Result<Self, TelemetryError> {
        dotenvy::dotenv().ok();
        Self::load_from(Self::default_path().as_deref())
    }

    /// Load from an explicit (optional) file plus the process environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, TelemetryError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        let raw = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<RawTelemetryConfig>()?;

        let config = raw.resolve();
        config.validate()?;
        tracing::debug!(
            environment = %config.environment,
            is_development = config.is_development,
            dsn_configured = config.dsn.is_some(),
            "telemetry configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TelemetryError> {
        self.sample_rates.validate()?;
        if self.max_breadcrumbs == 0 {
            return Err(TelemetryError::BreadcrumbCapacity);
        }
        if let Some(dsn) = &self.dsn {
            Dsn::parse(dsn)?;
        }
        Ok(())
    }

    pub fn parsed_dsn(&self) -> Option<Result<Dsn, TelemetryError>> {
        self.dsn.as_deref().map(Dsn::parse)
    }
}
