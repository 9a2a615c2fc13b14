//! Logging infrastructure: the JSONL audit stream.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements the
//! [`EventSink`](panel_application::EventSink) port.

mod jsonl_event_logger;

pub use jsonl_event_logger::JsonlEventLogger;
