//! JSONL file writer for exercise traces.
//!
//! Each [`TraceEvent`] becomes one JSON line carrying `type`, `timestamp`
//! and `trace_id` next to the event payload. The file is opened in append
//! mode so successive runs accumulate in one log.

use course_application::{TraceEvent, TraceSink};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL trace sink that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlTraceSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlTraceSink {
    /// Open (or create) the trace file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn to_record(event: TraceEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = Map::new();
        record.insert("type".to_string(), Value::String(event.event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));
        record.insert("trace_id".to_string(), Value::String(event.trace_id));
        match event.payload {
            Value::Object(map) => {
                for (key, value) in map {
                    record.entry(key).or_insert(value);
                }
            }
            other => {
                record.insert("data".to_string(), other);
            }
        }
        Value::Object(record)
    }
}

impl TraceSink for JsonlTraceSink {
    fn record(&self, event: TraceEvent) {
        let Ok(line) = serde_json::to_string(&Self::to_record(event)) else {
            return;
        };

        match self.writer.lock() {
            Ok(mut writer) => {
                if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                    warn!("Could not write trace record to {}: {}", self.path.display(), e);
                }
            }
            Err(_) => warn!("Trace writer lock poisoned; record dropped"),
        }
    }
}

impl Drop for JsonlTraceSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
