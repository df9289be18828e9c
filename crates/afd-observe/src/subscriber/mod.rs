#![cfg(feature = "subscriber")]

//! Labeling loop events rendered as structured tracing records.
//!
//! Each [`EventKind`] maps to a fixed severity and message; optional event
//! fields become tracing fields (`cycle`, `microarch`, `path`, ...).

use std::borrow::Borrow;

use afd_core::{Event, EventKind, Observe};
use tracing::{debug, error, info, trace};

/// Observer that logs every labeling event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Subscriber;

impl Observe for Subscriber {
    fn on_event(&self, event: &Event) {
        log_event(event);
    }
}

fn log_event<E: View>(e: E) {
    let msg = message_for(e.kind());

    match e.kind() {
        EventKind::CycleStarting => debug!(cycle = e.cycle(), "{msg}"),
        EventKind::CpuProbed => debug!(cycle = e.cycle(), microarch = e.as_target(), "{msg}"),
        EventKind::LabelsPublished => info!(cycle = e.cycle(), path = %e.as_path(), "{msg}"),
        EventKind::CycleFailed => error!(cycle = e.cycle(), reason = e.as_reason(), "{msg}"),
        EventKind::NextCycleScheduled => info!(delay_ms = e.delay_ms(), "{msg}"),
        EventKind::ShutdownRequested => info!("{msg}"),
        EventKind::Stopped => debug!(cycles = e.cycle(), "{msg}"),
        _ => trace!(kind = ?e.kind(), "{msg}"),
    }
}

/// Field accessors with placeholders for absent values.
trait View {
    fn kind(&self) -> EventKind;
    fn cycle(&self) -> u64;
    fn delay_ms(&self) -> u64;
    fn as_reason(&self) -> &str;
    fn as_target(&self) -> &str;
    fn as_path(&self) -> String;
}

impl<T> View for T
where
    T: Borrow<Event>,
{
    #[inline]
    fn kind(&self) -> EventKind {
        self.borrow().kind
    }

    #[inline]
    fn cycle(&self) -> u64 {
        self.borrow().cycle.unwrap_or(0)
    }

    #[inline]
    fn delay_ms(&self) -> u64 {
        self.borrow().delay_ms.unwrap_or(0)
    }

    #[inline]
    fn as_reason(&self) -> &str {
        self.borrow().reason.as_deref().unwrap_or("unknown")
    }

    #[inline]
    fn as_target(&self) -> &str {
        self.borrow().target.as_deref().unwrap_or("unknown")
    }

    fn as_path(&self) -> String {
        self.borrow()
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[inline]
fn message_for(kind: EventKind) -> &'static str {
    match kind {
        EventKind::CycleStarting => "labeling cycle starting",
        EventKind::CpuProbed => "cpu microarchitecture detected",
        EventKind::LabelsPublished => "labels written to output file",
        EventKind::CycleFailed => "labeling cycle failed",
        EventKind::NextCycleScheduled => "sleeping until next cycle",
        EventKind::ShutdownRequested => "shutdown requested, not starting another cycle",
        EventKind::Stopped => "labeling loop stopped",
        _ => "labeling event",
    }
}
