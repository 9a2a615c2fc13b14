//! JSONL file writer for deliberation events.
//!
//! Each [`DeliberationEvent`] is serialized as a single JSON line with a
//! `type`, `actor` and `timestamp` field, appended via a buffered writer.

use panel_application::EventSink;
use panel_domain::DeliberationEvent;
use parking_lot::Mutex;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// JSONL audit logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create audit log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create audit log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &DeliberationEvent) -> Value {
        let timestamp = event
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge payload with type + actor + timestamp
        match event.payload.clone() {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event.kind.to_string()));
                map.insert("actor".to_string(), Value::String(event.actor.clone()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => serde_json::json!({
                "type": event.kind,
                "actor": event.actor,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl EventSink for JsonlEventLogger {
    fn emit(&self, event: &DeliberationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{}", line);
        // Audit trail is append-only; flush each line so a crash keeps it
        let _ = writer.flush();
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}
