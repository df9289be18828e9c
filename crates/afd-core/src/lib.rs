pub mod config;
pub mod error;
pub mod events;
pub mod labeler;
pub mod probe;
pub mod publish;
pub mod shutdown;

pub use config::LabelerConfig;
pub use error::{ConfigError, CoreError};
pub use events::{Event, EventKind, NoOpObserver, Observe, ObserverHandle, noop_observer};
pub use labeler::{Labeler, LabelerState};
pub use probe::{CpuProber, ProbeError, ProberHandle};
pub use publish::{AtomicPublisher, PublishError, PublishStep, StagedFile};
pub use shutdown::spawn_signal_listener;
