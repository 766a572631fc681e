//! Web-vitals forwarding.
//!
//! Each metric becomes a measurement and a breadcrumb on the client's scope;
//! a poor rating additionally raises one warning-level event.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{Breadcrumb, Level, TelemetryClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricName {
    /// Cumulative layout shift.
    Cls,
    /// First contentful paint.
    Fcp,
    /// Largest contentful paint.
    Lcp,
    /// Time to first byte.
    Ttfb,
    /// Interaction to next paint.
    Inp,
    /// First input delay.
    Fid,
}

impl MetricName {
    pub const ALL: [MetricName; 6] = [
        MetricName::Cls,
        MetricName::Fcp,
        MetricName::Lcp,
        MetricName::Ttfb,
        MetricName::Inp,
        MetricName::Fid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::Cls => "CLS",
            MetricName::Fcp => "FCP",
            MetricName::Lcp => "LCP",
            MetricName::Ttfb => "TTFB",
            MetricName::Inp => "INP",
            MetricName::Fid => "FID",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricName::Cls => "unitless",
            _ => "millisecond",
        }
    }

    /// `(good_up_to, needs_improvement_up_to)` boundaries.
    fn thresholds(self) -> (f64, f64) {
        match self {
            MetricName::Cls => (0.1, 0.25),
            MetricName::Fcp => (1800.0, 3000.0),
            MetricName::Lcp => (2500.0, 4000.0),
            MetricName::Ttfb => (800.0, 1800.0),
            MetricName::Inp => (200.0, 500.0),
            MetricName::Fid => (100.0, 300.0),
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric name: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricName {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricName::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn for_value(name: MetricName, value: f64) -> Self {
        let (good, needs_improvement) = name.thresholds();
        if value <= good {
            Rating::Good
        } else if value <= needs_improvement {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: MetricName,
    pub value: f64,
    pub rating: Rating,
    pub delta: f64,
}

impl Metric {
    /// Metric rated by the standard thresholds.
    pub fn new(name: MetricName, value: f64, delta: f64) -> Self {
        Self {
            name,
            value,
            rating: Rating::for_value(name, value),
            delta,
        }
    }
}

/// Receiver for metrics as they are observed.
pub trait MetricHandler {
    fn on_metric(&self, metric: &Metric);
}

impl<F: Fn(&Metric)> MetricHandler for F {
    fn on_metric(&self, metric: &Metric) {
        self(metric)
    }
}

/// Feed observed metrics to a handler in order.
pub fn report_web_vitals<I>(metrics: I, handler: &impl MetricHandler)
where
    I: IntoIterator<Item = Metric>,
{
    for metric in metrics {
        handler.on_metric(&metric);
    }
}

/// Forwards metrics to a [`TelemetryClient`].
#[derive(Debug, Clone, Copy)]
pub struct VitalsReporter<'a> {
    client: &'a TelemetryClient,
}

impl<'a> VitalsReporter<'a> {
    pub fn new(client: &'a TelemetryClient) -> Self {
        Self { client }
    }

    /// Returns the id of the warning event raised for a poor rating, if any.
    pub fn forward(&self, metric: &Metric) -> Option<Uuid> {
        let name = metric.name.as_str();
        let unit = metric.name.unit();
        let environment = &self.client.config().environment;

        self.client.set_measurement(name, metric.value, unit);

        let level = if metric.rating == Rating::Good {
            Level::Info
        } else {
            Level::Warning
        };
        self.client.add_breadcrumb(
            Breadcrumb::new(format!("Web Vital: {name}"), level)
                .category("web-vital")
                .data(json!({
                    "value": metric.value,
                    "rating": metric.rating,
                    "delta": metric.delta,
                    "unit": unit,
                    "environment": environment,
                })),
        );

        if self.client.config().is_development {
            tracing::debug!(
                metric = name,
                value = metric.value,
                rating = ?metric.rating,
                delta = metric.delta,
                unit,
                "web vital"
            );
        }

        if metric.rating != Rating::Poor {
            return None;
        }
        let suffix = if unit == "unitless" { "" } else { unit };
        self.client.capture_message(
            format!("Poor {name} performance: {}{suffix}", metric.value),
            Level::Warning,
        )
    }
}

impl MetricHandler for VitalsReporter<'_> {
    fn on_metric(&self, metric: &Metric) {
        self.forward(metric);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_follow_thresholds() {
        assert_eq!(Rating::for_value(MetricName::Lcp, 2500.0), Rating::Good);
        assert_eq!(Rating::for_value(MetricName::Lcp, 3000.0), Rating::NeedsImprovement);
        assert_eq!(Rating::for_value(MetricName::Lcp, 4000.1), Rating::Poor);
        assert_eq!(Rating::for_value(MetricName::Cls, 0.3), Rating::Poor);
        assert_eq!(Rating::for_value(MetricName::Ttfb, 100.0), Rating::Good);
    }

    #[test]
    fn names_and_units() {
        assert_eq!("lcp".parse::<MetricName>().unwrap(), MetricName::Lcp);
        assert!("XYZ".parse::<MetricName>().is_err());
        assert_eq!(MetricName::Cls.unit(), "unitless");
        assert_eq!(MetricName::Inp.unit(), "millisecond");
    }

    #[test]
    fn rating_serializes_kebab_case() {
        let m = Metric {
            name: MetricName::Inp,
            value: 300.0,
            rating: Rating::NeedsImprovement,
            delta: 10.0,
        };
        let v = serde_json::to_value(m).unwrap();
        assert_eq!(v["rating"], "needs-improvement");
        assert_eq!(v["name"], "INP");
    }

    #[test]
    fn closures_are_handlers() {
        let seen = std::cell::RefCell::new(Vec::new());
        report_web_vitals(
            [
                Metric::new(MetricName::Fcp, 900.0, 900.0),
                Metric::new(MetricName::Cls, 0.02, 0.02),
            ],
            &|m: &Metric| seen.borrow_mut().push(m.name),
        );
        assert_eq!(*seen.borrow(), vec![MetricName::Fcp, MetricName::Cls]);
    }
}
