//! Port for progress and audit events.
//!
//! Every phase transition and debate round transition is emitted as a
//! [`DeliberationEvent`]. This is separate from `tracing`-based operation
//! logs: tracing handles human-readable diagnostics, while this port
//! carries the machine-readable audit stream.

use panel_domain::DeliberationEvent;
use parking_lot::Mutex;

/// Receiver of deliberation events.
///
/// `emit` is synchronous and non-fallible so a slow or broken sink never
/// disrupts a deliberation; implementations drop what they cannot handle.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DeliberationEvent);
}

/// No-op sink for when nobody is listening
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&self, _event: &DeliberationEvent) {}
}

/// Keeps a copy of every event and forwards it to an inner sink.
///
/// Use cases use it to build the audit trail they return while still
/// streaming to the caller's sink.
pub struct RecordingSink<'a> {
    inner: &'a dyn EventSink,
    events: Mutex<Vec<DeliberationEvent>>,
}

impl<'a> RecordingSink<'a> {
    pub fn new(inner: &'a dyn EventSink) -> Self {
        Self {
            inner,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<DeliberationEvent> {
        self.events.lock().clone()
    }

    pub fn into_events(self) -> Vec<DeliberationEvent> {
        self.events.into_inner()
    }
}

impl EventSink for RecordingSink<'_> {
    fn emit(&self, event: &DeliberationEvent) {
        self.events.lock().push(event.clone());
        self.inner.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::Phase;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new(&NoEvents);
        sink.emit(&DeliberationEvent::phase_started(Phase::Analysis, &[]));
        sink.emit(&DeliberationEvent::phase_completed(Phase::Analysis, 0.5, 1, 0));

        let events = sink.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, panel_domain::EventKind::PhaseStarted);
        assert_eq!(events[1].kind, panel_domain::EventKind::PhaseCompleted);
    }
}
