// SPDX-License-Identifier: MPL-2.0
//! Ephemeral notification management.
//!
//! Feature code shows toasts and confirmations through a
//! [`NotificationHandle`]. Each notification lives in an ordered
//! [`NotificationStore`] and leaves it in two phases: it is first hidden
//! (so the view can animate it out), then removed after the exit delay.
//! [`LifecycleScheduler`] keeps one cancellable timer per phase.
//!
//! # Example
//!
//! ```
//! use social_toasts::config::NotificationSettings;
//! use social_toasts::notifications::NotificationProvider;
//!
//! let provider = NotificationProvider::new(NotificationSettings::default());
//! let toast = provider.handle();
//! let id = toast.show_success("Post published", None).unwrap();
//! assert_eq!(toast.list().unwrap()[0].id, id);
//! ```

mod context;
pub mod driver;
mod id;
mod manager;
mod notification;
mod scheduler;
mod store;

pub use context::{NotificationHandle, NotificationProvider};
pub use id::{IdGenerator, NotificationId};
pub use notification::{
    Callback, CompletionCallback, ConfirmActions, ConfirmLabels, ConfirmOptions, Kind,
    NewNotification, Notification, NotificationPatch, NotificationView, Position,
};
pub use scheduler::{
    Clock, FiredTimer, LifecycleScheduler, ManualClock, Phase, SystemClock, TokioClock,
};
pub use store::NotificationStore;
