//! Lifecycle events emitted by the labeling loop.
//!
//! The loop reports what it does through an [`Observe`] implementation
//! injected at construction time instead of logging directly, so the
//! sink can be swapped (tracing, tests, nothing at all).
mod noop;
pub use noop::NoOpObserver;

use std::{path::PathBuf, sync::Arc};

/// Kind of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventKind {
    /// A cycle is about to probe the CPU.
    CycleStarting,
    /// The prober returned a record.
    CpuProbed,
    /// The label file was replaced.
    LabelsPublished,
    /// Probe or publish failed; the loop keeps going unless in once-mode.
    CycleFailed,
    /// The loop is waiting for the next cycle.
    NextCycleScheduled,
    /// Cancellation won the race against the interval timer.
    ShutdownRequested,
    /// The loop returned.
    Stopped,
}

/// A lifecycle event with optional context fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// 1-based cycle number.
    pub cycle: Option<u64>,
    pub reason: Option<String>,
    pub path: Option<PathBuf>,
    /// Microarchitecture name reported by the prober.
    pub target: Option<String>,
    pub delay_ms: Option<u64>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            cycle: None,
            reason: None,
            path: None,
            target: None,
            delay_ms: None,
        }
    }

    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

/// Sink for lifecycle events.
///
/// Called inline from the loop, so implementations must not block.
pub trait Observe: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// Shared handle to an event sink.
pub type ObserverHandle = Arc<dyn Observe>;

/// Create an observer that drops every event.
#[inline]
pub fn noop_observer() -> ObserverHandle {
    Arc::new(NoOpObserver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_optional_fields() {
        let ev = Event::new(EventKind::LabelsPublished)
            .with_cycle(3)
            .with_path("/tmp/afd")
            .with_target("skylake");

        assert_eq!(ev.kind, EventKind::LabelsPublished);
        assert_eq!(ev.cycle, Some(3));
        assert_eq!(ev.path, Some(PathBuf::from("/tmp/afd")));
        assert_eq!(ev.target.as_deref(), Some("skylake"));
        assert!(ev.reason.is_none());
        assert!(ev.delay_ms.is_none());
    }
}
