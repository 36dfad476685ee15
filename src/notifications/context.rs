// SPDX-License-Identifier: MPL-2.0
//! Notification provider and the handles that feature code uses.
//!
//! A [`NotificationProvider`] owns one notification session (store,
//! scheduler, clock). It is created once per application session and hands
//! out cheap [`NotificationHandle`]s. Handles hold a weak reference, so using
//! one that was never bound to a provider, or whose provider has been
//! dropped, fails with [`ConfigurationError`] instead of touching stale state.
//!
//! Everything runs on one thread: the provider is `!Send`, and time only
//! advances when the host calls [`NotificationHandle::tick`] (or runs
//! [`super::driver::run`]).

use super::id::NotificationId;
use super::manager::Manager;
use super::notification::{ConfirmOptions, Kind, NewNotification, NotificationView};
use super::scheduler::{Clock, SystemClock};
use crate::config::NotificationSettings;
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{ConfigurationError, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Owner of a notification session.
///
/// Dropping the provider cancels every pending timer and discards the
/// remaining notifications without running their callbacks.
pub struct NotificationProvider {
    manager: Rc<RefCell<Manager>>,
}

impl fmt::Debug for NotificationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationProvider")
            .field("manager", &self.manager)
            .finish()
    }
}

impl Default for NotificationProvider {
    fn default() -> Self {
        Self::new(NotificationSettings::default())
    }
}

impl NotificationProvider {
    /// Creates a provider driven by the system clock.
    #[must_use]
    pub fn new(settings: NotificationSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }

    /// Creates a provider reading time from `clock`.
    #[must_use]
    pub fn with_clock(settings: NotificationSettings, clock: impl Clock + 'static) -> Self {
        Self {
            manager: Rc::new(RefCell::new(Manager::new(settings, Box::new(clock)))),
        }
    }

    /// Records lifecycle events through `handle`.
    #[must_use]
    pub fn with_diagnostics(self, handle: DiagnosticsHandle) -> Self {
        self.manager.borrow_mut().set_diagnostics(Some(handle));
        self
    }

    /// Returns a handle bound to this provider.
    #[must_use]
    pub fn handle(&self) -> NotificationHandle {
        NotificationHandle {
            manager: Some(Rc::downgrade(&self.manager)),
        }
    }
}

impl Drop for NotificationProvider {
    fn drop(&mut self) {
        if let Ok(mut manager) = self.manager.try_borrow_mut() {
            manager.shutdown();
        }
    }
}

/// Entry point for showing and dismissing notifications.
///
/// `NotificationHandle::default()` is not bound to any provider; every
/// operation on it returns `Error::Configuration`.
#[derive(Clone, Default)]
pub struct NotificationHandle {
    manager: Option<Weak<RefCell<Manager>>>,
}

impl fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHandle")
            .field("bound", &self.manager.is_some())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl NotificationHandle {
    /// Returns whether the provider behind this handle is still alive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.manager
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Shows a fully built notification.
    pub fn show(&self, request: NewNotification) -> Result<NotificationId> {
        self.with(|manager| manager.show(request))
    }

    /// Shows a success toast (3 s by default).
    pub fn show_success(
        &self,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        self.show_kind(Kind::Success, message, duration)
    }

    /// Shows an error toast (5 s by default).
    pub fn show_error(
        &self,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        self.show_kind(Kind::Error, message, duration)
    }

    /// Shows an info toast (3 s by default).
    pub fn show_info(
        &self,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        self.show_kind(Kind::Info, message, duration)
    }

    /// Shows a warning toast (4 s by default).
    pub fn show_warning(
        &self,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        self.show_kind(Kind::Warning, message, duration)
    }

    /// Shows a confirmation that stays until [`Self::resolve_confirm`] or
    /// [`Self::dismiss`] is called.
    pub fn show_confirm(
        &self,
        message: impl Into<String>,
        on_confirm: impl FnOnce() + 'static,
        on_cancel: impl FnOnce() + 'static,
        options: ConfirmOptions,
    ) -> Result<NotificationId> {
        self.show(
            NewNotification::confirm(message, on_confirm, on_cancel).with_confirm_options(options),
        )
    }

    /// Answers a pending confirmation: runs exactly one of its callbacks,
    /// then starts its exit phase.
    ///
    /// Returns `Ok(false)` when the id is unknown, is not a confirmation, or
    /// was already answered or dismissed.
    pub fn resolve_confirm(&self, id: &NotificationId, accepted: bool) -> Result<bool> {
        let Some(callback) = self.with(|manager| manager.answer_confirm(id, accepted))? else {
            return Ok(false);
        };
        callback();
        self.with(|manager| manager.close_answered(id))?;
        Ok(true)
    }

    /// Starts the exit phase of a notification.
    ///
    /// Returns `Ok(false)` when the id is unknown or already leaving.
    pub fn dismiss(&self, id: &NotificationId) -> Result<bool> {
        self.with(|manager| manager.dismiss(id))
    }

    /// Dismisses every visible notification.
    pub fn dismiss_all(&self) -> Result<usize> {
        self.with(Manager::dismiss_all)
    }

    /// Replaces the text of a notification that is still in the store.
    pub fn set_message(&self, id: &NotificationId, message: impl Into<String>) -> Result<bool> {
        let message = message.into();
        self.with(|manager| manager.set_message(id, message))
    }

    /// Fires every due timer. Returns the number of notifications removed.
    pub fn tick(&self) -> Result<usize> {
        self.with(Manager::tick)
    }

    /// Snapshot of the store in insertion order.
    pub fn list(&self) -> Result<Vec<NotificationView>> {
        self.read(Manager::list)
    }

    pub fn get(&self, id: &NotificationId) -> Result<Option<NotificationView>> {
        self.read(|manager| manager.get(id))
    }

    pub fn len(&self) -> Result<usize> {
        self.read(Manager::len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.read(|manager| manager.len() == 0)
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self) -> Result<Option<Instant>> {
        self.read(Manager::next_deadline)
    }

    /// Number of timers still armed.
    pub fn pending_timers(&self) -> Result<usize> {
        self.read(Manager::pending_timers)
    }

    /// Receiver whose value changes after every store mutation.
    pub fn changes(&self) -> Result<watch::Receiver<u64>> {
        self.read(Manager::subscribe)
    }

    fn show_kind(
        &self,
        kind: Kind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> Result<NotificationId> {
        self.show(NewNotification::new(kind, message).maybe_duration(duration))
    }

    fn upgrade(&self) -> Result<Rc<RefCell<Manager>>> {
        let weak = self
            .manager
            .as_ref()
            .ok_or(ConfigurationError::MissingProvider)?;
        Ok(weak.upgrade().ok_or(ConfigurationError::ProviderDropped)?)
    }

    fn read<R>(&self, f: impl FnOnce(&Manager) -> R) -> Result<R> {
        let manager = self.upgrade()?;
        let result = f(&manager.borrow());
        Ok(result)
    }

    /// Runs `f` with the manager borrowed, then runs the callbacks it queued
    /// once the borrow is released so they may call back into the handle.
    fn with<R>(&self, f: impl FnOnce(&mut Manager) -> R) -> Result<R> {
        let manager = self.upgrade()?;
        let (result, deferred) = {
            let mut guard = manager.borrow_mut();
            let result = f(&mut guard);
            (result, guard.take_deferred())
        };
        drop(manager);
        for callback in deferred {
            callback();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notifications::scheduler::ManualClock;
    use std::cell::Cell;

    fn provider() -> (NotificationProvider, ManualClock) {
        let clock = ManualClock::new();
        let provider = NotificationProvider::with_clock(NotificationSettings::default(), clock.clone());
        (provider, clock)
    }

    #[test]
    fn unbound_handle_reports_missing_provider() {
        let handle = NotificationHandle::default();
        assert!(!handle.is_connected());
        assert_eq!(
            handle.show_success("Saved", None),
            Err(Error::Configuration(ConfigurationError::MissingProvider))
        );
        assert_eq!(
            handle.list(),
            Err(Error::Configuration(ConfigurationError::MissingProvider))
        );
    }

    #[test]
    fn dropped_provider_reports_teardown() {
        let (provider, _clock) = provider();
        let handle = provider.handle();
        handle.show_info("hello", None).expect("show");

        drop(provider);

        assert!(!handle.is_connected());
        assert_eq!(
            handle.dismiss(&NotificationId::from("any")),
            Err(Error::Configuration(ConfigurationError::ProviderDropped))
        );
    }

    #[test]
    fn per_kind_defaults_are_applied() {
        let (provider, _clock) = provider();
        let handle = provider.handle();

        let success = handle.show_success("s", None).expect("show");
        let warning = handle.show_warning("w", None).expect("show");
        let error = handle.show_error("e", None).expect("show");
        let info = handle.show_info("i", Some(Duration::from_millis(1200))).expect("show");

        let duration = |id: &NotificationId| handle.get(id).expect("handle").expect("present").duration;
        assert_eq!(duration(&success), Duration::from_millis(3000));
        assert_eq!(duration(&warning), Duration::from_millis(4000));
        assert_eq!(duration(&error), Duration::from_millis(5000));
        assert_eq!(duration(&info), Duration::from_millis(1200));
    }

    #[test]
    fn callbacks_may_reenter_the_handle() {
        let (provider, _clock) = provider();
        let handle = provider.handle();
        let inner = handle.clone();

        let id = handle
            .show_confirm(
                "Delete post?",
                move || {
                    inner.show_success("Post deleted", None).expect("reentrant show");
                },
                || {},
                ConfirmOptions::default(),
            )
            .expect("show");

        assert!(handle.resolve_confirm(&id, true).expect("resolve"));
        let messages: Vec<_> = handle
            .list()
            .expect("list")
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["Delete post?", "Post deleted"]);
    }

    #[test]
    fn completion_callback_may_show_follow_up() {
        let (provider, clock) = provider();
        let handle = provider.handle();
        let inner = handle.clone();

        handle
            .show(
                NewNotification::info("Uploading")
                    .duration(Duration::from_millis(100))
                    .on_close(move |_| {
                        inner.show_success("Done", None).expect("show");
                    }),
            )
            .expect("show");

        clock.advance(Duration::from_millis(400));
        assert_eq!(handle.tick().expect("tick"), 1);

        let list = handle.list().expect("list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].message, "Done");
    }

    #[test]
    fn resolve_runs_callback_before_exit_phase() {
        let (provider, _clock) = provider();
        let handle = provider.handle();
        let observer = handle.clone();
        let seen_visible = Rc::new(Cell::new(None));
        let seen = seen_visible.clone();
        let id_slot: Rc<RefCell<Option<NotificationId>>> = Rc::new(RefCell::new(None));
        let slot = id_slot.clone();

        let id = handle
            .show_confirm(
                "Unfollow?",
                move || {
                    let id = slot.borrow().clone().expect("id stored");
                    let view = observer.get(&id).expect("handle").expect("present");
                    seen.set(Some(view.visible));
                },
                || {},
                ConfirmOptions::default(),
            )
            .expect("show");
        *id_slot.borrow_mut() = Some(id.clone());

        handle.resolve_confirm(&id, true).expect("resolve");
        assert_eq!(seen_visible.get(), Some(true));
        assert!(!handle.get(&id).expect("handle").expect("exiting").visible);
    }

    #[test]
    fn dropping_provider_discards_pending_callbacks() {
        let (provider, clock) = provider();
        let handle = provider.handle();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        handle
            .show(NewNotification::info("x").on_close(move |_| flag.set(true)))
            .expect("show");

        drop(provider);
        clock.advance(Duration::from_secs(10));

        assert!(handle.tick().is_err());
        assert!(!closed.get());
    }

    #[test]
    fn set_message_updates_in_place() {
        let (provider, _clock) = provider();
        let handle = provider.handle();
        let id = handle.show_info("Uploading 1/3", None).expect("show");

        assert!(handle.set_message(&id, "Uploading 2/3").expect("update"));
        assert_eq!(
            handle.get(&id).expect("handle").expect("present").message,
            "Uploading 2/3"
        );
        assert!(!handle
            .set_message(&NotificationId::from("missing"), "x")
            .expect("update"));
    }
}
