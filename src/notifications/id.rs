// SPDX-License-Identifier: MPL-2.0
//! Notification identifiers.
//!
//! Ids combine the wall-clock time in milliseconds (base 36) with a random
//! alphanumeric suffix. There is no shared counter and no collision check:
//! two ids generated within the same millisecond differ with overwhelming
//! probability, which is enough for a handful of short-lived toasts.

use crate::config::{DEFAULT_ID_SUFFIX_LEN, MIN_ID_SUFFIX_LEN};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Produces timestamp-plus-random notification ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdGenerator {
    suffix_len: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_SUFFIX_LEN)
    }
}

impl IdGenerator {
    /// Creates a generator whose random suffix has `suffix_len` characters
    /// (raised to the minimum when shorter).
    #[must_use]
    pub fn new(suffix_len: usize) -> Self {
        Self {
            suffix_len: suffix_len.max(MIN_ID_SUFFIX_LEN),
        }
    }

    /// Returns the length of the random suffix.
    #[must_use]
    pub fn suffix_len(&self) -> usize {
        self.suffix_len
    }

    /// Generates a new id.
    #[must_use]
    pub fn next_id(&self) -> NotificationId {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.suffix_len)
            .map(char::from)
            .collect();
        NotificationId(format!("{}-{}", to_base36(millis), suffix))
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
