use crate::events::{Event, Observe};

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl Observe for NoOpObserver {
    #[inline(always)]
    fn on_event(&self, _: &Event) {}
}
