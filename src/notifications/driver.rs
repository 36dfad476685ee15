// SPDX-License-Identifier: MPL-2.0
//! Async driver for hosts that run a tokio `LocalSet` instead of a UI tick.
//!
//! The driver sleeps until the next timer deadline, waking early whenever
//! the store changes so newly scheduled timers are picked up. It must run
//! on the same thread as the provider (`spawn_local`).

use super::context::NotificationHandle;
use crate::error::{ConfigurationError, Error, Result};
use tokio::time::{sleep_until, Instant};

/// Fires timers for `handle` until its provider is dropped.
///
/// # Errors
///
/// Returns `Error::Configuration(MissingProvider)` if the handle was never
/// bound to a provider.
pub async fn run(handle: NotificationHandle) -> Result<()> {
    let mut changes = match handle.changes() {
        Ok(changes) => changes,
        Err(Error::Configuration(ConfigurationError::ProviderDropped)) => return Ok(()),
        Err(err) => return Err(err),
    };

    loop {
        let deadline = match handle.tick().and_then(|_| handle.next_deadline()) {
            Ok(deadline) => deadline,
            Err(Error::Configuration(ConfigurationError::ProviderDropped)) => return Ok(()),
            Err(err) => return Err(err),
        };
        changes.borrow_and_update();

        match deadline {
            Some(deadline) => {
                tokio::select! {
                    () = sleep_until(Instant::from_std(deadline)) => {}
                    changed = changes.changed() => {
                        if changed.is_err() {
                            return Ok(());
                        }
                    }
                }
            }
            None => {
                if changes.changed().await.is_err() {
                    return Ok(());
                }
            }
        }
    }
}
