// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording notification lifecycle activity.
//!
//! Events are captured through a cheap, cloneable [`DiagnosticsHandle`],
//! stored in a memory-bounded circular buffer by the
//! [`DiagnosticsCollector`], and can be exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle, warning or error record
//! - [`BufferCapacity`]: Newtype for validated buffer capacity bounds

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, LifecycleEvent};
