// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record kept by the store, the
//! `NewNotification` builder callers fill in before an id exists, and the
//! callback-free `NotificationView` snapshot handed to presentation code.

use super::id::NotificationId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Zero-argument callback owned by a confirmation toast.
pub type Callback = Box<dyn FnOnce()>;

/// Callback run once a notification has been removed from the store.
pub type CompletionCallback = Box<dyn FnOnce(&NotificationId)>;

/// Semantic category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Failure the user should know about.
    Error,
    /// Neutral information.
    Info,
    /// Something went sideways but nothing is blocked.
    Warning,
    /// Question waiting for the user to accept or cancel.
    Confirm,
}

impl Kind {
    /// Returns whether this kind waits for an explicit answer.
    #[must_use]
    pub fn is_confirm(self) -> bool {
        self == Kind::Confirm
    }
}

/// Placement hint for the presentation layer. The core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Accept/cancel callbacks of a confirmation toast.
///
/// Resolving consumes the value, so at most one of the two callbacks can
/// ever run and the other is dropped with it.
pub struct ConfirmActions {
    on_confirm: Callback,
    on_cancel: Callback,
}

impl ConfirmActions {
    pub fn new(on_confirm: impl FnOnce() + 'static, on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            on_confirm: Box::new(on_confirm),
            on_cancel: Box::new(on_cancel),
        }
    }

    /// Picks the callback matching the user's answer, discarding the other.
    #[must_use]
    pub fn resolve(self, accepted: bool) -> Callback {
        if accepted {
            self.on_confirm
        } else {
            self.on_cancel
        }
    }
}

impl fmt::Debug for ConfirmActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmActions").finish_non_exhaustive()
    }
}

/// Display labels for a confirmation toast's buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmLabels {
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
}

/// Options accepted by `show_confirm`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub position: Option<Position>,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
}

/// Partial change applied by `NotificationStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub visible: Option<bool>,
    pub message: Option<String>,
}

impl NotificationPatch {
    /// Patch that starts the exit phase.
    #[must_use]
    pub fn hide() -> Self {
        Self {
            visible: Some(false),
            ..Self::default()
        }
    }

    /// Patch replacing the message text.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// A notification that has not been added to a store yet.
///
/// `duration` left as `None` takes the per-kind default from the settings.
pub struct NewNotification {
    pub(crate) kind: Kind,
    pub(crate) message: String,
    pub(crate) duration: Option<Duration>,
    pub(crate) position: Option<Position>,
    pub(crate) confirm: Option<ConfirmActions>,
    pub(crate) labels: ConfirmLabels,
    pub(crate) on_close: Option<CompletionCallback>,
}

impl NewNotification {
    /// Creates a notification of the given kind.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: None,
            position: None,
            confirm: None,
            labels: ConfirmLabels::default(),
            on_close: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Warning, message)
    }

    /// Creates a confirmation toast that waits for the user.
    pub fn confirm(
        message: impl Into<String>,
        on_confirm: impl FnOnce() + 'static,
        on_cancel: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            confirm: Some(ConfirmActions::new(on_confirm, on_cancel)),
            ..Self::new(Kind::Confirm, message)
        }
    }

    /// Overrides the per-kind auto-dismiss delay. Zero disables auto-dismiss.
    ///
    /// Ignored for confirmation toasts, which never expire.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets an optional duration, keeping the default when `None`.
    #[must_use]
    pub fn maybe_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration.or(self.duration);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn labels(mut self, confirm_text: Option<String>, cancel_text: Option<String>) -> Self {
        self.labels = ConfirmLabels {
            confirm_text,
            cancel_text,
        };
        self
    }

    /// Registers a callback run once the notification has left the store.
    #[must_use]
    pub fn on_close(mut self, callback: impl FnOnce(&NotificationId) + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Applies `ConfirmOptions` to this notification.
    #[must_use]
    pub fn with_confirm_options(mut self, options: ConfirmOptions) -> Self {
        self.position = options.position.or(self.position);
        self.labels(options.confirm_text, options.cancel_text)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the explicit duration, if the caller set one.
    #[must_use]
    pub fn requested_duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl fmt::Debug for NewNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewNotification")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

/// A notification held by the store.
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    message: String,
    duration: Duration,
    position: Option<Position>,
    labels: ConfirmLabels,
    visible: bool,
    created_at: Instant,
    confirm: Option<ConfirmActions>,
    on_close: Option<CompletionCallback>,
}

impl Notification {
    /// Builds the stored record from a request whose duration is resolved.
    pub(crate) fn from_request(
        id: NotificationId,
        request: NewNotification,
        duration: Duration,
        created_at: Instant,
    ) -> Self {
        let duration = if request.kind.is_confirm() {
            Duration::ZERO
        } else {
            duration
        };
        Self {
            id,
            kind: request.kind,
            message: request.message,
            duration,
            position: request.position,
            labels: request.labels,
            visible: true,
            created_at,
            confirm: request.confirm,
            on_close: request.on_close,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Auto-dismiss delay; zero means the notification never expires.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    #[must_use]
    pub fn labels(&self) -> &ConfirmLabels {
        &self.labels
    }

    /// False once the exit phase has started.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns whether the confirm callbacks are still waiting for an answer.
    #[must_use]
    pub fn awaits_answer(&self) -> bool {
        self.confirm.is_some()
    }

    pub(crate) fn apply(&mut self, patch: NotificationPatch) {
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
    }

    pub(crate) fn take_confirm(&mut self) -> Option<ConfirmActions> {
        self.confirm.take()
    }

    pub(crate) fn take_on_close(&mut self) -> Option<CompletionCallback> {
        self.on_close.take()
    }

    /// Returns a cloneable snapshot without the callbacks.
    #[must_use]
    pub fn view(&self) -> NotificationView {
        NotificationView {
            id: self.id.clone(),
            kind: self.kind,
            message: self.message.clone(),
            duration: self.duration,
            position: self.position,
            labels: self.labels.clone(),
            visible: self.visible,
            awaits_answer: self.awaits_answer(),
        }
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("visible", &self.visible)
            .field("awaits_answer", &self.awaits_answer())
            .finish_non_exhaustive()
    }
}

/// Snapshot of a notification for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: Kind,
    pub message: String,
    pub duration: Duration,
    pub position: Option<Position>,
    pub labels: ConfirmLabels,
    pub visible: bool,
    pub awaits_answer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn stored(request: NewNotification, duration: Duration) -> Notification {
        Notification::from_request(
            NotificationId::from("t-000000"),
            request,
            duration,
            Instant::now(),
        )
    }

    #[test]
    fn constructors_set_correct_kind() {
        assert_eq!(NewNotification::success("").kind(), Kind::Success);
        assert_eq!(NewNotification::info("").kind(), Kind::Info);
        assert_eq!(NewNotification::warning("").kind(), Kind::Warning);
        assert_eq!(NewNotification::error("").kind(), Kind::Error);
        assert_eq!(
            NewNotification::confirm("", || {}, || {}).kind(),
            Kind::Confirm
        );
    }

    #[test]
    fn builder_keeps_message_and_overrides() {
        let request = NewNotification::error("Post failed")
            .duration(Duration::from_millis(750))
            .position(Position::BottomLeft);

        assert_eq!(request.message(), "Post failed");
        assert_eq!(request.requested_duration(), Some(Duration::from_millis(750)));

        let notification = stored(request, Duration::from_millis(750));
        assert_eq!(notification.position(), Some(Position::BottomLeft));
        assert!(notification.is_visible());
    }

    #[test]
    fn maybe_duration_none_keeps_default() {
        let request = NewNotification::info("x").maybe_duration(None);
        assert_eq!(request.requested_duration(), None);
    }

    #[test]
    fn confirm_duration_is_forced_to_zero() {
        let request =
            NewNotification::confirm("Delete?", || {}, || {}).duration(Duration::from_secs(2));
        let notification = stored(request, Duration::from_secs(2));
        assert_eq!(notification.duration(), Duration::ZERO);
        assert!(notification.awaits_answer());
    }

    #[test]
    fn confirm_actions_run_only_the_chosen_callback() {
        let confirmed = Rc::new(Cell::new(0));
        let cancelled = Rc::new(Cell::new(0));
        let (c, x) = (confirmed.clone(), cancelled.clone());
        let actions = ConfirmActions::new(move || c.set(c.get() + 1), move || x.set(x.get() + 1));

        (actions.resolve(false))();

        assert_eq!(confirmed.get(), 0);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn patch_changes_only_given_fields() {
        let mut notification = stored(NewNotification::info("Uploading"), Duration::ZERO);
        notification.apply(NotificationPatch::message("Uploaded"));
        assert_eq!(notification.message(), "Uploaded");
        assert!(notification.is_visible());

        notification.apply(NotificationPatch::hide());
        assert!(!notification.is_visible());
        assert_eq!(notification.message(), "Uploaded");
    }

    #[test]
    fn view_mirrors_state_without_callbacks() {
        let request = NewNotification::confirm("Leave group?", || {}, || {}).with_confirm_options(
            ConfirmOptions {
                position: Some(Position::TopCenter),
                confirm_text: Some("Leave".into()),
                cancel_text: None,
            },
        );
        let notification = stored(request, Duration::ZERO);
        let view = notification.view();

        assert_eq!(view.kind, Kind::Confirm);
        assert_eq!(view.position, Some(Position::TopCenter));
        assert_eq!(view.labels.confirm_text.as_deref(), Some("Leave"));
        assert!(view.awaits_answer);
        assert!(view.visible);
    }

    #[test]
    fn kind_serializes_in_snake_case() {
        let json = serde_json::to_string(&Kind::Warning).expect("serialize");
        assert_eq!(json, "\"warning\"");
    }
}
