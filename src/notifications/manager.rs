// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` ties the store and the scheduler together and implements
//! the two-phase removal: a notification is first hidden (`visible = false`)
//! and only dropped from the store once the exit delay has elapsed. Caller
//! callbacks are never run while the manager is borrowed; they are queued
//! and handed back through [`Manager::take_deferred`].

use super::id::{IdGenerator, NotificationId};
use super::notification::{Callback, Kind, NewNotification, NotificationPatch, NotificationView};
use super::scheduler::{Clock, LifecycleScheduler, Phase};
use super::store::NotificationStore;
use crate::config::NotificationSettings;
use crate::diagnostics::{DiagnosticsHandle, LifecycleEvent};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Owns the notifications of one provider and drives their timers.
pub(crate) struct Manager {
    store: NotificationStore,
    scheduler: LifecycleScheduler,
    clock: Box<dyn Clock>,
    settings: NotificationSettings,
    diagnostics: Option<DiagnosticsHandle>,
    deferred: Vec<Callback>,
    removed_total: u64,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("store", &self.store)
            .field("scheduler", &self.scheduler)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Manager {
    pub(crate) fn new(settings: NotificationSettings, clock: Box<dyn Clock>) -> Self {
        Self {
            store: NotificationStore::new(IdGenerator::new(settings.id_suffix_len())),
            scheduler: LifecycleScheduler::new(),
            clock,
            settings,
            diagnostics: None,
            deferred: Vec::new(),
            removed_total: 0,
        }
    }

    pub(crate) fn set_diagnostics(&mut self, handle: Option<DiagnosticsHandle>) {
        self.diagnostics = handle;
    }

    /// Adds a notification and arms its auto-dismiss timer when it has one.
    pub(crate) fn show(&mut self, request: NewNotification) -> NotificationId {
        let now = self.clock.now();
        let kind = request.kind();
        let duration = request
            .requested_duration()
            .unwrap_or_else(|| self.settings.duration_for(kind));

        if let Some(handle) = &self.diagnostics {
            match kind {
                Kind::Warning => handle.log_warning(request.message()),
                Kind::Error => handle.log_error(request.message()),
                Kind::Success | Kind::Info | Kind::Confirm => {}
            }
        }

        let id = self.store.add(request, duration, now);
        let duration = self
            .store
            .get(&id)
            .map_or(Duration::ZERO, |n| n.duration());
        if !duration.is_zero() {
            self.scheduler.schedule(id.clone(), Phase::Expiry, duration, now);
        }

        self.log(LifecycleEvent::Shown {
            id: id.clone(),
            kind,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        });
        id
    }

    /// Starts the exit phase of a visible notification.
    ///
    /// Returns `false` for unknown ids and for notifications already exiting.
    pub(crate) fn dismiss(&mut self, id: &NotificationId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        self.log(LifecycleEvent::Dismissed { id: id.clone() });
        let now = self.clock.now();
        self.begin_exit(id, now)
    }

    /// Dismisses every visible notification. Returns how many were affected.
    pub(crate) fn dismiss_all(&mut self) -> usize {
        let live: Vec<NotificationId> = self
            .store
            .list()
            .filter(|n| n.is_visible())
            .map(|n| n.id().clone())
            .collect();
        live.iter().filter(|id| self.dismiss(id)).count()
    }

    /// Takes the callback answering a pending confirmation.
    ///
    /// The notification stays in the store; the caller runs the callback and
    /// then calls [`Manager::close_answered`].
    pub(crate) fn answer_confirm(&mut self, id: &NotificationId, accepted: bool) -> Option<Callback> {
        let notification = self.store.get_mut(id)?;
        if !notification.is_visible() {
            return None;
        }
        let actions = notification.take_confirm()?;
        self.log(LifecycleEvent::ConfirmResolved {
            id: id.clone(),
            accepted,
        });
        Some(actions.resolve(accepted))
    }

    /// Starts the exit phase of a confirmation whose answer has been handled.
    pub(crate) fn close_answered(&mut self, id: &NotificationId) -> bool {
        let now = self.clock.now();
        self.begin_exit(id, now)
    }

    /// Replaces the text of a notification still in the store.
    pub(crate) fn set_message(&mut self, id: &NotificationId, message: String) -> bool {
        self.store.update(id, NotificationPatch::message(message))
    }

    /// Fires every timer due at the current time. Returns the number of
    /// notifications removed from the store.
    pub(crate) fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.removed_total;
        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired.phase {
                Phase::Expiry => {
                    if self.is_live(&fired.id) {
                        self.log(LifecycleEvent::Expired {
                            id: fired.id.clone(),
                        });
                        // Measured from the deadline so late ticks do not stretch the fade.
                        self.begin_exit(&fired.id, fired.deadline);
                    }
                }
                Phase::Exit => {
                    self.finish(&fired.id);
                }
            }
        }
        usize::try_from(self.removed_total - before).unwrap_or(usize::MAX)
    }

    /// Cancels all timers and drops every notification without running
    /// their callbacks.
    pub(crate) fn shutdown(&mut self) {
        let cancelled_timers = self.scheduler.clear();
        let discarded_notifications = self.store.clear();
        self.deferred.clear();
        if cancelled_timers > 0 || discarded_notifications > 0 {
            self.log(LifecycleEvent::TornDown {
                cancelled_timers,
                discarded_notifications,
            });
        }
    }

    pub(crate) fn take_deferred(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.deferred)
    }

    pub(crate) fn list(&self) -> Vec<NotificationView> {
        self.store.list().map(|n| n.view()).collect()
    }

    pub(crate) fn get(&self, id: &NotificationId) -> Option<NotificationView> {
        self.store.get(id).map(|n| n.view())
    }

    pub(crate) fn len(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    fn is_live(&self, id: &NotificationId) -> bool {
        self.store.get(id).is_some_and(|n| n.is_visible())
    }

    /// Phase one: hide, then arm the removal timer relative to `at`.
    fn begin_exit(&mut self, id: &NotificationId, at: Instant) -> bool {
        let Some(notification) = self.store.get_mut(id) else {
            return false;
        };
        if !notification.is_visible() {
            return false;
        }
        // An unanswered confirmation that gets dismissed drops both callbacks.
        drop(notification.take_confirm());

        self.scheduler.cancel(id, Phase::Expiry);
        self.store.update(id, NotificationPatch::hide());

        let delay = self.settings.exit_delay();
        if delay.is_zero() || !self.scheduler.schedule(id.clone(), Phase::Exit, delay, at) {
            self.finish(id);
        }
        true
    }

    /// Phase two: drop from the store and queue the completion callback.
    fn finish(&mut self, id: &NotificationId) -> bool {
        let Some(mut notification) = self.store.remove(id) else {
            return false;
        };
        self.scheduler.cancel_all(id);
        self.removed_total += 1;
        let on_screen = self
            .clock
            .now()
            .saturating_duration_since(notification.created_at());
        self.log(LifecycleEvent::Removed {
            id: id.clone(),
            shown_ms: u64::try_from(on_screen.as_millis()).unwrap_or(u64::MAX),
        });
        if let Some(on_close) = notification.take_on_close() {
            let id = id.clone();
            self.deferred.push(Box::new(move || on_close(&id)));
        }
        true
    }

    fn log(&self, event: LifecycleEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::notifications::scheduler::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> (Manager, ManualClock) {
        let clock = ManualClock::new();
        let manager = Manager::new(NotificationSettings::default(), Box::new(clock.clone()));
        (manager, clock)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn run_deferred(manager: &mut Manager) {
        for callback in manager.take_deferred() {
            callback();
        }
    }

    #[test]
    fn expiry_hides_then_removes() {
        let (mut manager, clock) = manager();
        let id = manager.show(NewNotification::info("Hi").duration(ms(100)));

        assert!(manager.get(&id).expect("present").visible);

        clock.advance(ms(100));
        assert_eq!(manager.tick(), 0);
        assert!(!manager.get(&id).expect("still present").visible);

        clock.advance(ms(299));
        assert_eq!(manager.tick(), 0);
        assert!(manager.get(&id).is_some());

        clock.advance(ms(1));
        assert_eq!(manager.tick(), 1);
        assert!(manager.get(&id).is_none());
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn late_tick_runs_both_phases_at_once() {
        let (mut manager, clock) = manager();
        let id = manager.show(NewNotification::success("Saved"));

        clock.advance(Duration::from_secs(10));
        assert_eq!(manager.tick(), 1);
        assert!(manager.get(&id).is_none());
    }

    #[test]
    fn zero_duration_never_expires() {
        let (mut manager, clock) = manager();
        let id = manager.show(NewNotification::error("Offline").duration(Duration::ZERO));

        assert_eq!(manager.pending_timers(), 0);
        clock.advance(Duration::from_secs(600));
        manager.tick();
        assert!(manager.get(&id).expect("present").visible);
    }

    #[test]
    fn dismiss_cancels_expiry_and_is_idempotent() {
        let (mut manager, clock) = manager();
        let id = manager.show(NewNotification::error("x").duration(ms(5000)));

        clock.advance(ms(10));
        assert!(manager.dismiss(&id));
        assert!(!manager.dismiss(&id));
        assert_eq!(manager.pending_timers(), 1);

        clock.advance(ms(300));
        assert_eq!(manager.tick(), 1);
        assert!(!manager.dismiss(&id));
        assert!(!manager.dismiss(&NotificationId::from("never-created")));
    }

    #[test]
    fn zero_exit_delay_removes_immediately() {
        let clock = ManualClock::new();
        let settings = NotificationSettings {
            exit_delay_ms: Some(0),
            ..NotificationSettings::default()
        };
        let mut manager = Manager::new(settings, Box::new(clock.clone()));
        let id = manager.show(NewNotification::info("gone"));

        assert!(manager.dismiss(&id));
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn completion_callback_runs_once_after_removal() {
        let (mut manager, clock) = manager();
        let closed = Rc::new(RefCell::new(Vec::new()));
        let sink = closed.clone();
        let id = manager.show(
            NewNotification::info("bye")
                .duration(ms(50))
                .on_close(move |id| sink.borrow_mut().push(id.clone())),
        );

        clock.advance(ms(50));
        manager.tick();
        run_deferred(&mut manager);
        assert!(closed.borrow().is_empty());

        clock.advance(ms(300));
        manager.tick();
        run_deferred(&mut manager);
        manager.tick();
        run_deferred(&mut manager);
        assert_eq!(*closed.borrow(), vec![id]);
    }

    #[test]
    fn confirm_answer_is_taken_once() {
        let (mut manager, _clock) = manager();
        let id = manager.show(NewNotification::confirm("Delete post?", || {}, || {}));

        let callback = manager.answer_confirm(&id, true);
        assert!(callback.is_some());
        assert!(manager.answer_confirm(&id, false).is_none());
        assert!(manager.close_answered(&id));
        assert!(!manager.get(&id).expect("exiting").visible);
    }

    #[test]
    fn dismissed_confirm_cannot_be_answered() {
        let (mut manager, _clock) = manager();
        let id = manager.show(NewNotification::confirm("Block user?", || {}, || {}));

        assert!(manager.dismiss(&id));
        assert!(manager.answer_confirm(&id, true).is_none());
    }

    #[test]
    fn answer_on_non_confirm_is_noop() {
        let (mut manager, _clock) = manager();
        let id = manager.show(NewNotification::info("plain"));
        assert!(manager.answer_confirm(&id, true).is_none());
        assert!(manager.get(&id).expect("present").visible);
    }

    #[test]
    fn dismiss_all_skips_exiting_entries() {
        let (mut manager, _clock) = manager();
        let a = manager.show(NewNotification::info("a"));
        manager.show(NewNotification::info("b"));
        manager.show(NewNotification::confirm("c", || {}, || {}));
        manager.dismiss(&a);

        assert_eq!(manager.dismiss_all(), 2);
        assert!(manager.list().iter().all(|n| !n.visible));
    }

    #[test]
    fn shutdown_cancels_timers_without_callbacks() {
        let (mut manager, clock) = manager();
        let closed = Rc::new(RefCell::new(0));
        let sink = closed.clone();
        let id = manager.show(NewNotification::info("x").on_close(move |_| *sink.borrow_mut() += 1));
        manager.dismiss(&id);

        manager.shutdown();
        clock.advance(Duration::from_secs(1));
        manager.tick();
        run_deferred(&mut manager);

        assert_eq!(manager.len(), 0);
        assert_eq!(manager.pending_timers(), 0);
        assert_eq!(*closed.borrow(), 0);
    }

    #[test]
    fn unbounded_duration_never_expires() {
        let (mut manager, clock) = manager();
        let id = manager.show(NewNotification::info("sticky").duration(Duration::MAX));

        assert_eq!(manager.pending_timers(), 0);
        clock.advance(Duration::from_secs(3600));
        assert_eq!(manager.tick(), 0);
        assert!(manager.get(&id).expect("present").visible);

        assert!(manager.dismiss(&id));
        clock.advance(ms(300));
        assert_eq!(manager.tick(), 1);
    }

    #[test]
    fn lifecycle_is_logged_to_diagnostics() {
        let (mut manager, clock) = manager();
        let mut collector = DiagnosticsCollector::default();
        manager.set_diagnostics(Some(collector.handle()));

        let id = manager.show(NewNotification::error("Like failed").duration(ms(10)));
        clock.advance(ms(310));
        manager.tick();
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticEventKind::Error {
                    message: "Like failed".into()
                },
                DiagnosticEventKind::Lifecycle {
                    event: LifecycleEvent::Shown {
                        id: id.clone(),
                        kind: Kind::Error,
                        duration_ms: 10,
                    }
                },
                DiagnosticEventKind::Lifecycle {
                    event: LifecycleEvent::Expired { id: id.clone() }
                },
                DiagnosticEventKind::Lifecycle {
                    event: LifecycleEvent::Removed { id, shown_ms: 310 }
                },
            ]
        );
    }
}
