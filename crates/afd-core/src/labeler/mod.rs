//! Periodic probe → render → publish loop.
//!
//! ```text
//!             cycle done, once-mode
//!   Running ───────────────────────────► Stopped
//!     │  ▲                                  ▲
//!     │  │ interval elapsed                 │ cancellation
//!     ▼  │                                  │
//!   Waiting ────────────────────────────────┘
//! ```
//!
//! Cycles never overlap: the rename of cycle N completes before cycle
//! N+1 probes. Cancellation is observed only while waiting, so a started
//! cycle always runs to the end.
use std::fmt;

use afd_model::render;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
    config::LabelerConfig,
    error::CoreError,
    events::{Event, EventKind, ObserverHandle, noop_observer},
    probe::ProberHandle,
    publish::AtomicPublisher,
};

/// State of the labeling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelerState {
    Running,
    Waiting,
    Stopped,
}

impl fmt::Display for LabelerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelerState::Running => "running",
            LabelerState::Waiting => "waiting",
            LabelerState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Drives labeling cycles according to a [`LabelerConfig`].
pub struct Labeler {
    config: LabelerConfig,
    prober: ProberHandle,
    publisher: AtomicPublisher,
    observer: ObserverHandle,
}

impl Labeler {
    /// Create a labeler with the default publisher and no event sink.
    pub fn new(config: LabelerConfig, prober: ProberHandle) -> Self {
        Self {
            config,
            prober,
            publisher: AtomicPublisher::default(),
            observer: noop_observer(),
        }
    }

    /// Replace the event sink.
    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    /// Run until `cancel` fires, or for a single cycle in once-mode.
    ///
    /// In once-mode the result of that cycle is returned. In periodic mode
    /// cycle failures are reported through the observer and the loop keeps
    /// going; the return value is `Ok(())` once cancelled.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), CoreError> {
        let mut cycle: u64 = 0;
        let mut state = LabelerState::Running;

        loop {
            state = match state {
                LabelerState::Running => {
                    cycle += 1;
                    let result = self.run_cycle(cycle).await;
                    if let Err(e) = &result {
                        self.emit(
                            Event::new(EventKind::CycleFailed)
                                .with_cycle(cycle)
                                .with_reason(e.to_string()),
                        );
                    }
                    if self.config.label_once() {
                        self.emit(Event::new(EventKind::Stopped).with_cycle(cycle));
                        return result;
                    }
                    LabelerState::Waiting
                }
                LabelerState::Waiting => self.wait(&cancel).await,
                LabelerState::Stopped => {
                    self.emit(Event::new(EventKind::Stopped).with_cycle(cycle));
                    return Ok(());
                }
            };
        }
    }

    /// Probe, render and publish once.
    #[instrument(level = "debug", skip(self), fields(prober = self.prober.name()))]
    pub async fn run_cycle(&self, cycle: u64) -> Result<(), CoreError> {
        self.emit(Event::new(EventKind::CycleStarting).with_cycle(cycle));

        let cpu = self.prober.probe().await?;
        self.emit(
            Event::new(EventKind::CpuProbed)
                .with_cycle(cycle)
                .with_target(cpu.target()),
        );

        let labels = render(&cpu);
        let dest = self.config.output_path();
        self.publisher.publish(&labels, dest)?;
        self.emit(
            Event::new(EventKind::LabelsPublished)
                .with_cycle(cycle)
                .with_path(dest),
        );
        Ok(())
    }

    /// Race the interval timer against cancellation; cancellation wins ties.
    async fn wait(&self, cancel: &CancellationToken) -> LabelerState {
        let interval = self.config.sleep_interval();
        self.emit(
            Event::new(EventKind::NextCycleScheduled)
                .with_delay_ms(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)),
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.emit(Event::new(EventKind::ShutdownRequested));
                LabelerState::Stopped
            }
            _ = tokio::time::sleep(interval) => LabelerState::Running,
        }
    }

    #[inline]
    fn emit(&self, event: Event) {
        self.observer.on_event(&event);
    }
}
