// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of active notifications.
//!
//! Entries keep their insertion order for their whole life; updates happen
//! in place and removal shifts later entries up without reordering them.
//! Every mutation bumps a revision counter published through a
//! `tokio::sync::watch` channel so render code can redraw on change.

use super::id::{IdGenerator, NotificationId};
use super::notification::{NewNotification, Notification, NotificationPatch};
use indexmap::IndexMap;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Insertion-ordered map from id to notification.
#[derive(Debug)]
pub struct NotificationStore {
    entries: IndexMap<NotificationId, Notification>,
    ids: IdGenerator,
    revision: watch::Sender<u64>,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(IdGenerator::default())
    }
}

impl NotificationStore {
    /// Creates an empty store that draws ids from `ids`.
    #[must_use]
    pub fn new(ids: IdGenerator) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: IndexMap::new(),
            ids,
            revision,
        }
    }

    /// Appends a notification whose duration is already resolved and returns
    /// its freshly generated id.
    pub fn add(
        &mut self,
        request: NewNotification,
        duration: Duration,
        now: Instant,
    ) -> NotificationId {
        let id = self.ids.next_id();
        debug_assert!(!self.entries.contains_key(&id), "notification id collision");
        let notification = Notification::from_request(id.clone(), request, duration, now);
        self.entries.insert(id.clone(), notification);
        self.bump();
        id
    }

    /// Removes a notification. Unknown ids are ignored.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let removed = self.entries.shift_remove(id);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Applies a partial change in place. Returns `false` for unknown ids.
    pub fn update(&mut self, id: &NotificationId, patch: NotificationPatch) -> bool {
        match self.entries.get_mut(id) {
            Some(notification) => {
                notification.apply(patch);
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        if count > 0 {
            self.entries.clear();
            self.bump();
        }
        count
    }

    /// Returns the notifications in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Notification> {
        self.entries.values()
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &NotificationId) -> Option<&mut Notification> {
        self.entries.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Returns a receiver that observes every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}
