// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification lifecycle tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::{Kind, NotificationId};

/// Steps a notification goes through, as recorded in the diagnostics log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// A notification entered the store.
    Shown {
        id: NotificationId,
        kind: Kind,
        /// Auto-dismiss delay; zero when it never expires.
        duration_ms: u64,
    },

    /// The auto-dismiss timer fired and started the exit phase.
    Expired { id: NotificationId },

    /// A caller dismissed the notification before it expired.
    Dismissed { id: NotificationId },

    /// A confirmation was answered.
    ConfirmResolved { id: NotificationId, accepted: bool },

    /// The exit phase finished and the entry left the store.
    Removed {
        id: NotificationId,
        /// Time between `show` and removal.
        shown_ms: u64,
    },

    /// The provider was dropped with work still pending.
    TornDown {
        cancelled_timers: usize,
        discarded_notifications: usize,
    },
}

/// Category of a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    Lifecycle { event: LifecycleEvent },

    /// Text of a warning toast.
    Warning { message: String },

    /// Text of an error toast.
    Error { message: String },
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}
