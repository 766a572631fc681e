//! Outbound filters applied by [`crate::TelemetryClient`] before anything
//! reaches the transport. Development builds see everything.

use crate::{Breadcrumb, Event, Level};

/// Browser/runtime noise that is never actionable.
pub const NOISE_DENYLIST: [&str; 4] = [
    "ResizeObserver",
    "Script error",
    "Non-Error promise rejection",
    "Loading chunk",
];

pub fn is_noise(message: &str) -> bool {
    NOISE_DENYLIST.iter().any(|needle| message.contains(needle))
}

pub fn before_send(event: Event, is_development: bool) -> Option<Event> {
    if !is_development && is_noise(event.primary_message()) {
        tracing::trace!(event_id = %event.event_id, "dropping noisy event");
        return None;
    }
    Some(event)
}

/// Console log chatter is dropped outside development; errors, warnings and
/// navigation crumbs are always kept.
pub fn before_breadcrumb(crumb: Breadcrumb, is_development: bool) -> Option<Breadcrumb> {
    if !is_development && crumb.category.as_deref() == Some("console") && crumb.level == Level::Debug
    {
        return None;
    }
    Some(crumb)
}
