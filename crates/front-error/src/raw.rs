use std::any::Any;

use super::{Cause, ErrorRecord};

/// Anything that can show up where a failure is caught.
///
/// Inspected once by [`crate::wrap`]; the rest of the crate never needs to ask
/// "is this already one of ours?".
#[derive(Debug)]
pub enum RawFailure {
    /// A real error value.
    Native(Cause),
    /// A record produced earlier by this crate.
    Normalized(ErrorRecord),
    /// Any other value: strings, numbers, `null`, plain objects.
    Opaque(serde_json::Value),
}

/// Plain error used when a non-error value has to stand in as a cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct OpaqueFailure(pub String);

impl RawFailure {
    pub fn native<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RawFailure::Native(Box::new(error))
    }

    /// Turn a panic payload (as returned by `catch_unwind`) into an opaque failure.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        RawFailure::Opaque(serde_json::Value::String(message))
    }

    /// Text form of the raw value: error `Display`, strings verbatim,
    /// anything else as compact JSON.
    pub fn stringify(&self) -> String {
        match self {
            RawFailure::Native(e) => e.to_string(),
            RawFailure::Normalized(r) => r.log_message().to_string(),
            RawFailure::Opaque(serde_json::Value::String(s)) => s.clone(),
            RawFailure::Opaque(v) => v.to_string(),
        }
    }
}

impl From<ErrorRecord> for RawFailure {
    fn from(record: ErrorRecord) -> Self {
        RawFailure::Normalized(record)
    }
}

impl From<Cause> for RawFailure {
    fn from(error: Cause) -> Self {
        // A boxed record is still one of ours.
        match error.downcast::<ErrorRecord>() {
            Ok(record) => RawFailure::Normalized(*record),
            Err(other) => RawFailure::Native(other),
        }
    }
}

impl From<std::io::Error> for RawFailure {
    fn from(error: std::io::Error) -> Self {
        RawFailure::native(error)
    }
}

impl From<serde_json::Error> for RawFailure {
    fn from(error: serde_json::Error) -> Self {
        RawFailure::native(error)
    }
}

impl From<serde_json::Value> for RawFailure {
    fn from(value: serde_json::Value) -> Self {
        RawFailure::Opaque(value)
    }
}

impl From<&str> for RawFailure {
    fn from(value: &str) -> Self {
        RawFailure::Opaque(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for RawFailure {
    fn from(value: String) -> Self {
        RawFailure::Opaque(serde_json::Value::String(value))
    }
}

impl From<()> for RawFailure {
    fn from(_: ()) -> Self {
        RawFailure::Opaque(serde_json::Value::Null)
    }
}
