use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::{Dsn, Event, TelemetryError};

const QUEUE_CAPACITY: usize = 256;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CLIENT_NAME: &str = concat!("front-telemetry/", env!("CARGO_PKG_VERSION"));

/// Delivery of finished events. Implementations must not block the caller
/// for network I/O and must swallow their own failures.
pub trait Transport: Send + Sync {
    fn send(&self, event: Event);

    /// Wait until queued events are delivered. Returns `false` on timeout.
    fn flush(&self, _timeout: Duration) -> bool {
        true
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for MemoryTransport {
    fn send(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Posts events as JSON to the DSN's store endpoint.
///
/// Runs its own single-threaded Tokio runtime on a dedicated thread; `send`
/// only enqueues. Events are dropped (with a warning) when the queue is full.
#[derive(Debug)]
pub struct HttpTransport {
    sender: flume::Sender<Event>,
    pending: Arc<AtomicUsize>,
}

impl HttpTransport {
    pub fn new(dsn: &Dsn) -> Result<Self, TelemetryError> {
        let endpoint = dsn.store_endpoint()?;
        let auth = dsn.auth_header(CLIENT_NAME);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(CLIENT_NAME)
            .build()
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (sender, receiver) = flume::bounded::<Event>(QUEUE_CAPACITY);
        let pending = Arc::new(AtomicUsize::new(0));
        let worker_pending = Arc::clone(&pending);

        thread::Builder::new()
            .name("front-telemetry".into())
            .spawn(move || {
                rt.block_on(async move {
                    while let Ok(event) = receiver.recv_async().await {
                        let event_id = event.event_id;
                        let result = client
                            .post(endpoint.clone())
                            .header("X-Sentry-Auth", &auth)
                            .json(&event)
                            .send()
                            .await
                            .and_then(|resp| resp.error_for_status());
                        match result {
                            Ok(_) => tracing::trace!(%event_id, "event delivered"),
                            Err(e) => tracing::warn!(%event_id, error = %e, "event delivery failed"),
                        }
                        worker_pending.fetch_sub(1, Ordering::SeqCst);
                    }
                    tracing::debug!("telemetry transport stopped");
                });
            })?;

        Ok(Self { sender, pending })
    }
}

impl Transport for HttpTransport {
    fn send(&self, event: Event) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.sender.try_send(event) {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            let reason = match e {
                flume::TrySendError::Full(_) => "queue full",
                flume::TrySendError::Disconnected(_) => "worker stopped",
            };
            tracing::warn!(reason, "dropping telemetry event");
        }
    }

    fn flush(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending.load(Ordering::SeqCst) > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn memory_transport_clones_share_buffer() {
        let t = MemoryTransport::new();
        let view = t.clone();
        t.send(Event::message("one", Level::Info));
        assert_eq!(view.len(), 1);
        assert_eq!(view.events()[0].message.as_deref(), Some("one"));
        assert!(t.flush(Duration::from_millis(1)));
    }

    #[test]
    fn http_transport_survives_unreachable_endpoint() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let dsn = Dsn::parse("http://key@127.0.0.1:9/1").unwrap();
        let t = HttpTransport::new(&dsn).unwrap();
        t.send(Event::message("lost", Level::Error));
        assert!(t.flush(Duration::from_secs(15)));
    }
}
