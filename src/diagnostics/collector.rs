// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Handles push events into a bounded channel without blocking; the
//! collector drains that channel into a circular buffer whenever the host
//! calls [`DiagnosticsCollector::process_pending`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, LifecycleEvent};
use crate::config::DIAGNOSTICS_CHANNEL_CAPACITY;
use crate::error::Result;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Every method is non-blocking and drops the event when
/// the channel is full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records a notification lifecycle step.
    pub fn log_lifecycle(&self, event: LifecycleEvent) {
        self.send(DiagnosticEventKind::Lifecycle { event });
    }

    /// Records the text of a warning toast.
    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    /// Records the text of an error toast.
    pub fn log_error(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    /// Attempts to send an event, returning an error if it was not queued.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the channel buffer is full, or
    /// `TrySendError::Closed` if the collector has been dropped.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.try_log(kind);
    }
}

/// Serialized shape of an exported diagnostics report.
#[derive(Debug, Serialize)]
struct DiagnosticReport<'a> {
    generated_at: DateTime<Utc>,
    collection_started_at: DateTime<Utc>,
    event_count: usize,
    evicted_events: u64,
    events: Vec<&'a DiagnosticEvent>,
}

/// Central collector for diagnostic events.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    /// Circular buffer storing diagnostic events.
    buffer: CircularBuffer<DiagnosticEvent>,
    /// Receiver for incoming events.
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (wall clock for report metadata).
    collection_started_at: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_buffer(CircularBuffer::new(capacity))
    }

    /// Creates a collector around an existing buffer (small buffers in tests).
    #[must_use]
    pub fn with_buffer(buffer: CircularBuffer<DiagnosticEvent>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(DIAGNOSTICS_CHANNEL_CAPACITY);
        Self {
            buffer,
            event_rx,
            event_tx,
            collection_started_at: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every queued event into the buffer and returns how many moved.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) -> usize {
        let mut moved = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            moved += 1;
        }
        moved
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns `Error::Export` if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        let report = DiagnosticReport {
            generated_at: Utc::now(),
            collection_started_at: self.collection_started_at,
            event_count: self.buffer.len(),
            evicted_events: self.buffer.evicted(),
            events: self.buffer.iter().collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Writes the JSON report to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` on filesystem failures and `Error::Export` if
    /// serialization fails.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Kind, NotificationId};
    use tempfile::tempdir;

    fn shown(raw: &str) -> LifecycleEvent {
        LifecycleEvent::Shown {
            id: NotificationId::from(raw),
            kind: Kind::Info,
            duration_ms: 3000,
        }
    }

    #[test]
    fn events_reach_buffer_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_lifecycle(shown("a"));
        handle.log_error("Could not like post");
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 2);
        assert_eq!(collector.len(), 2);

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds[1],
            DiagnosticEventKind::Error {
                message: "Could not like post".into()
            }
        );
    }

    #[test]
    fn small_buffer_evicts_oldest_events() {
        let mut collector = DiagnosticsCollector::with_buffer(CircularBuffer::with_raw_capacity(2));
        let handle = collector.handle();
        for raw in ["a", "b", "c"] {
            handle.log_lifecycle(shown(raw));
        }
        collector.process_pending();

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.export_json().map(|json| json.contains("\"evicted_events\": 1")), Ok(true));
        let first = collector.iter().next().expect("event");
        assert_eq!(
            first.kind,
            DiagnosticEventKind::Lifecycle { event: shown("b") }
        );
    }

    #[test]
    fn full_channel_drops_without_blocking() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..DIAGNOSTICS_CHANNEL_CAPACITY {
            handle.log_warning("stale");
        }
        let overflow = handle.try_log(DiagnosticEventKind::Warning {
            message: "one too many".into(),
        });
        assert!(matches!(overflow, Err(TrySendError::Full(_))));
    }

    #[test]
    fn export_json_contains_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_lifecycle(shown("exported"));
        collector.process_pending();

        let json = collector.export_json().expect("export");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event_count"], 1);
        assert_eq!(value["events"][0]["event"]["id"], "exported");
    }

    #[test]
    fn export_to_file_creates_directories() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_warning("slow network");
        collector.process_pending();

        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("reports").join("diagnostics.json");
        collector.export_to_file(&path).expect("export");

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.contains("slow network"));
    }
}
