use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Mark,
    Measure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Offset from the creation of the timeline.
    pub start: Duration,
    /// Zero for marks.
    pub duration: Duration,
}

/// Named marks and measures on a monotonic timeline.
#[derive(Debug)]
pub struct PerformanceMarks {
    origin: Instant,
    marks: HashMap<String, Instant>,
    entries: Vec<PerformanceEntry>,
}

impl Default for PerformanceMarks {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMarks {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            marks: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Record a mark; re-marking a name moves it.
    pub fn mark(&mut self, name: &str) {
        let now = Instant::now();
        self.marks.insert(name.to_string(), now);
        self.entries.push(PerformanceEntry {
            name: name.to_string(),
            kind: EntryKind::Mark,
            start: now - self.origin,
            duration: Duration::ZERO,
        });
    }

    /// Measure from `start_mark` to `end_mark` (or now). `None` when a mark is missing.
    pub fn measure(&mut self, name: &str, start_mark: &str, end_mark: Option<&str>) -> Option<Duration> {
        let start = *self.marks.get(start_mark)?;
        let end = match end_mark {
            Some(m) => *self.marks.get(m)?,
            None => Instant::now(),
        };
        let duration = end.saturating_duration_since(start);
        tracing::trace!(measure = name, ?duration, "performance measure");
        self.entries.push(PerformanceEntry {
            name: name.to_string(),
            kind: EntryKind::Measure,
            start: start - self.origin,
            duration,
        });
        Some(duration)
    }

    /// All entries in recording order, optionally restricted to one kind.
    pub fn entries(&self, kind: Option<EntryKind>) -> Vec<&PerformanceEntry> {
        self.entries
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_between_marks() {
        let mut perf = PerformanceMarks::new();
        perf.mark("fetch-start");
        std::thread::sleep(Duration::from_millis(5));
        perf.mark("fetch-end");
        let d = perf
            .measure("fetch", "fetch-start", Some("fetch-end"))
            .unwrap();
        assert!(d >= Duration::from_millis(5));

        assert_eq!(perf.entries(None).len(), 3);
        let measures = perf.entries(Some(EntryKind::Measure));
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].name, "fetch");
    }

    #[test]
    fn missing_marks_yield_none() {
        let mut perf = PerformanceMarks::new();
        assert!(perf.measure("x", "nope", None).is_none());
        perf.mark("a");
        assert!(perf.measure("x", "a", Some("nope")).is_none());
        assert!(perf.measure("x", "a", None).is_some());
        assert!(perf.entries(Some(EntryKind::Measure)).len() == 1);
    }
}
