// SPDX-License-Identifier: MPL-2.0
//! Demo application showing every notification kind.
//!
//! The `App` owns the notification provider for the whole session, fires due
//! timers from a periodic tick, and renders the toast overlay on top of a
//! small control panel.

mod message;

pub use message::{Flags, Message};

use crate::config::{self, CONFIG_LOAD_WARNING};
use crate::diagnostics::{BufferCapacity, DiagnosticsCollector, DiagnosticsHandle};
use crate::error::Error;
use crate::notifications::{
    ConfirmOptions, Kind, NotificationHandle, NotificationProvider, NotificationView, Position,
};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::toast::{self, Toast};
use iced::widget::{button, text, Column, Row, Stack};
use iced::{time, window, Element, Length, Subscription, Task, Theme};
use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 520;
/// Interval between timer checks while toasts are on screen.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Root application state.
pub struct App {
    provider: NotificationProvider,
    toasts: NotificationHandle,
    /// Snapshot rendered by `view`, refreshed after every update.
    visible: Vec<NotificationView>,
    position: Position,
    diagnostics: Option<DiagnosticsCollector>,
    diagnostics_path: Option<PathBuf>,
    deleted_posts: Rc<Cell<u32>>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("provider", &self.provider)
            .field("visible", &self.visible.len())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Default for App {
    fn default() -> Self {
        let provider = NotificationProvider::default();
        let toasts = provider.handle();
        Self {
            provider,
            toasts,
            visible: Vec::new(),
            position: Position::default(),
            diagnostics: None,
            diagnostics_path: None,
            deleted_posts: Rc::new(Cell::new(0)),
        }
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an Fn boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir);

        let mut provider = NotificationProvider::new(config.notifications.clone());
        let diagnostics = config.diagnostics.enabled.then(|| {
            let capacity = config
                .diagnostics
                .buffer_capacity
                .map(BufferCapacity::new)
                .unwrap_or_default();
            DiagnosticsCollector::new(capacity)
        });
        if let Some(collector) = &diagnostics {
            provider = provider.with_diagnostics(collector.handle());
        }

        let toasts = provider.handle();
        let mut app = App {
            provider,
            toasts,
            position: config.notifications.position.unwrap_or_default(),
            diagnostics,
            diagnostics_path: flags.diagnostics_path,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            let shown = app.toasts.show_warning(config_warning_text(&key), None);
            app.report(shown);
        }
        app.refresh();

        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.visible.len() {
            0 => "Social Toasts".to_string(),
            n => format!("Social Toasts ({n})"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.visible.is_empty() {
            Subscription::none()
        } else {
            time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Show(kind) => {
                let shown = match kind {
                    Kind::Success => self.toasts.show_success("Post published", None),
                    Kind::Error => self.toasts.show_error("Could not load the feed", None),
                    Kind::Info => self.toasts.show_info("3 new followers", None),
                    Kind::Warning => self.toasts.show_warning("You are offline", None),
                    Kind::Confirm => return self.update(Message::AskDelete),
                };
                self.report(shown);
            }
            Message::AskDelete => {
                let shown = self.ask_delete();
                self.report(shown);
            }
            Message::DismissAll => {
                let dismissed = self.toasts.dismiss_all();
                self.report(dismissed);
            }
            Message::ExportDiagnostics => self.export_diagnostics(),
            Message::Toast(toast::Message::Dismiss(id)) => {
                let dismissed = self.toasts.dismiss(&id);
                self.report(dismissed);
            }
            Message::Toast(toast::Message::Resolve(id, accepted)) => {
                let resolved = self.toasts.resolve_confirm(&id, accepted);
                self.report(resolved);
            }
            Message::Tick(_) => {
                let ticked = self.toasts.tick();
                self.report(ticked);
                if let Some(collector) = self.diagnostics.as_mut() {
                    collector.process_pending();
                }
            }
        }

        self.refresh();
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let sample = |label: &'static str, message: Message| {
            button(text(label).size(typography::BODY)).on_press(message)
        };

        let kinds = Row::new()
            .spacing(spacing::XS)
            .push(sample("Success", Message::Show(Kind::Success)))
            .push(sample("Info", Message::Show(Kind::Info)))
            .push(sample("Warning", Message::Show(Kind::Warning)))
            .push(sample("Error", Message::Show(Kind::Error)));

        let actions = Row::new()
            .spacing(spacing::XS)
            .push(sample("Delete post…", Message::AskDelete))
            .push(sample("Dismiss all", Message::DismissAll))
            .push(sample("Export diagnostics", Message::ExportDiagnostics));

        let controls = Column::new()
            .spacing(spacing::SM)
            .padding(spacing::MD)
            .width(Length::Fill)
            .height(Length::Fill)
            .push(text("Notifications").size(typography::BODY))
            .push(kinds)
            .push(actions)
            .push(
                text(format!("Deleted posts: {}", self.deleted_posts.get()))
                    .size(typography::CAPTION),
            );

        let overlay = Toast::view_overlay(&self.visible, self.position).map(Message::Toast);

        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(controls)
            .push(overlay)
            .into()
    }

    fn ask_delete(&self) -> crate::error::Result<crate::notifications::NotificationId> {
        let on_delete = self.toasts.clone();
        let on_keep = self.toasts.clone();
        let delete_log = self.diagnostics.as_ref().map(DiagnosticsCollector::handle);
        let keep_log = delete_log.clone();
        let deleted = Rc::clone(&self.deleted_posts);

        self.toasts.show_confirm(
            "Delete this post?",
            move || {
                deleted.set(deleted.get() + 1);
                report_to(delete_log.as_ref(), on_delete.show_success("Post deleted", None));
            },
            move || {
                report_to(keep_log.as_ref(), on_keep.show_info("Post kept", None));
            },
            ConfirmOptions {
                position: Some(Position::BottomCenter),
                confirm_text: Some("Delete".into()),
                cancel_text: Some("Keep".into()),
            },
        )
    }

    fn export_diagnostics(&mut self) {
        let outcome = match (self.diagnostics.as_mut(), self.diagnostics_path.as_ref()) {
            (Some(collector), Some(path)) => {
                collector.process_pending();
                let summary = format!(
                    "Saved {} of {} events to {}",
                    collector.len(),
                    collector.capacity(),
                    path.display()
                );
                // Exported events are not exported again.
                collector.export_to_file(path).map(|()| {
                    collector.clear();
                    summary
                })
            }
            (None, _) => Err(Error::Export("diagnostics are disabled".into())),
            (_, None) => Err(Error::Export("no --diagnostics path given".into())),
        };

        let shown = match outcome {
            Ok(message) => self.toasts.show_success(message, None),
            Err(err) => self.toasts.show_error(err.to_string(), None),
        };
        self.report(shown);
    }

    fn refresh(&mut self) {
        match self.toasts.list() {
            Ok(list) => self.visible = list,
            Err(err) => self.log_failure(&err),
        }
    }

    fn report<T>(&self, result: crate::error::Result<T>) {
        report_to(
            self.diagnostics.as_ref().map(DiagnosticsCollector::handle).as_ref(),
            result,
        );
    }

    fn log_failure(&self, err: &Error) {
        self.report::<()>(Err(err.clone()));
    }
}

/// Records a failed notification call in the diagnostics log, or on stderr
/// when diagnostics are disabled.
fn report_to<T>(diagnostics: Option<&DiagnosticsHandle>, result: crate::error::Result<T>) {
    let Err(err) = result else {
        return;
    };
    match diagnostics {
        Some(handle) => handle.log_error(err.to_string()),
        None => eprintln!("Notification error: {err}"),
    }
}

fn config_warning_text(key: &str) -> String {
    if key == CONFIG_LOAD_WARNING {
        "Settings file could not be read, using defaults".to_string()
    } else {
        key.to_string()
    }
}
