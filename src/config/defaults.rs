// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Toast durations**: Per-kind auto-dismiss delays
//! - **Exit transition**: Delay between hiding a toast and removing it
//! - **Identifiers**: Random suffix length for notification ids
//! - **Diagnostics**: Lifecycle event buffer sizing

// ==========================================================================
// Toast Duration Defaults (milliseconds)
// ==========================================================================

/// Default auto-dismiss delay for success toasts.
pub const DEFAULT_SUCCESS_MS: u64 = 3000;

/// Default auto-dismiss delay for informational toasts.
pub const DEFAULT_INFO_MS: u64 = 3000;

/// Default auto-dismiss delay for warning toasts.
pub const DEFAULT_WARNING_MS: u64 = 4000;

/// Default auto-dismiss delay for error toasts.
pub const DEFAULT_ERROR_MS: u64 = 5000;

/// Confirmation toasts never auto-dismiss.
pub const CONFIRM_MS: u64 = 0;

/// Upper bound for any configured auto-dismiss delay.
pub const MAX_TOAST_MS: u64 = 60_000;

// ==========================================================================
// Exit Transition Defaults (milliseconds)
// ==========================================================================

/// Default delay between the fade-out start and removal from the store.
pub const DEFAULT_EXIT_DELAY_MS: u64 = 300;

/// Upper bound for the exit transition delay.
pub const MAX_EXIT_DELAY_MS: u64 = 5000;

// ==========================================================================
// Identifier Defaults
// ==========================================================================

/// Default number of random alphanumeric characters in a notification id.
pub const DEFAULT_ID_SUFFIX_LEN: usize = 9;

/// Shortest random suffix accepted for notification ids.
pub const MIN_ID_SUFFIX_LEN: usize = 6;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Minimum number of diagnostic events kept in memory.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum number of diagnostic events kept in memory.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Capacity of the channel between diagnostics handles and the collector.
pub const DIAGNOSTICS_CHANNEL_CAPACITY: usize = 256;
