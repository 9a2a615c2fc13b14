//! Composite event sink: delegates to multiple sinks.
//!
//! Used to fan events out to both the terminal progress reporter and the
//! JSONL audit log.

use super::event_sink::EventSink;
use panel_domain::DeliberationEvent;

/// An event sink that delegates to multiple inner sinks.
///
/// Uses borrowed references so both owned and borrowed sinks can be
/// composed without wrapper types.
pub struct CompositeEventSink<'a> {
    delegates: Vec<&'a dyn EventSink>,
}

impl<'a> CompositeEventSink<'a> {
    pub fn new(delegates: Vec<&'a dyn EventSink>) -> Self {
        Self { delegates }
    }
}

impl EventSink for CompositeEventSink<'_> {
    fn emit(&self, event: &DeliberationEvent) {
        for d in &self.delegates {
            d.emit(event);
        }
    }
}
