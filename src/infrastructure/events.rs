//! NDJSON event sink
//!
//! Serializes engine events one JSON object per line, for CI runs and log
//! shipping. Events that fail to serialize are dropped rather than
//! interrupting the operation that emitted them.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::event_sink::{EngineEvent, EventSink};

/// Event sink writing NDJSON to any writer
pub struct JsonEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl JsonEventSink<std::io::Stdout> {
    /// Sink writing to stdout, one event per line.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> EventSink for JsonEventSink<W> {
    fn on_event(&self, event: EngineEvent) {
        if let Ok(line) = serde_json::to_string(&event) {
            let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(writer, "{}", line);
        }
    }
}
