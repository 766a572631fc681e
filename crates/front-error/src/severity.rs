//// Coarse-grained urgency classification attached to an [`crate::ErrorRecord`].
//!
//! Typical mappings:
//! - Low: expected, user-correctable conditions
//! - Medium: caught failures the user can retry
//! - High: service-side failures
//! - Critical: irrecoverable for the current view
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Log level used when a record of this severity is echoed locally.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            Severity::Low => tracing::Level::INFO,
            Severity::Medium => tracing::Level::WARN,
            Severity::High | Severity::Critical => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_urgency() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(
            [Severity::High, Severity::Low, Severity::Critical].iter().max(),
            Some(&Severity::Critical)
        );
    }

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_value(Severity::Critical).unwrap();
        assert_eq!(v, serde_json::json!("critical"));
        let back: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Severity::Medium);
    }
}
