// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering notifications.
//!
//! Rendering reads [`NotificationView`] snapshots only. Hidden entries are
//! still drawn, faded and without buttons, until the exit phase removes
//! them from the store.

use crate::notifications::{Kind, NotificationId, NotificationView, Position};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, text, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, Element, Length, Theme};

const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
const DEFAULT_CANCEL_LABEL: &str = "Cancel";

/// Messages emitted by toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Close button pressed.
    Dismiss(NotificationId),
    /// Confirmation answered; `true` means accepted.
    Resolve(NotificationId, bool),
}

pub struct Toast;

impl Toast {
    /// Renders a single toast.
    pub fn view(notification: &NotificationView) -> Element<'_, Message> {
        let accent = accent_color(notification.kind);
        let alpha = if notification.visible {
            opacity::OPAQUE
        } else {
            opacity::EXITING
        };

        let glyph = Text::new(glyph(notification.kind))
            .size(sizing::GLYPH)
            .style(move |_theme: &Theme| text::Style {
                color: Some(Color { a: alpha, ..accent }),
            });

        let message = Text::new(notification.message.as_str())
            .size(typography::BODY)
            .style(move |theme: &Theme| text::Style {
                color: Some(Color {
                    a: alpha,
                    ..theme.palette().text
                }),
            });

        let mut content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph).padding(spacing::XXS))
            .push(
                Container::new(message)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            );

        if notification.visible {
            if notification.awaits_answer {
                content = content.push(Self::confirm_buttons(notification));
            } else {
                content = content.push(
                    button(Text::new("×").size(typography::BODY))
                        .on_press(Message::Dismiss(notification.id.clone()))
                        .padding(spacing::XXS)
                        .style(dismiss_button_style),
                );
            }
        }

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent, alpha))
            .into()
    }

    /// Renders every toast, stacked in the corner or edge named by its
    /// position (or `fallback` when it has none).
    pub fn view_overlay(
        notifications: &[NotificationView],
        fallback: Position,
    ) -> Element<'_, Message> {
        let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);

        for position in ALL_POSITIONS {
            let toasts: Vec<Element<'_, Message>> = notifications
                .iter()
                .filter(|n| n.position.unwrap_or(fallback) == position)
                .map(Self::view)
                .collect();
            if toasts.is_empty() {
                continue;
            }

            let (horizontal, vertical) = anchor(position);
            let column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(horizontal);
            layers = layers.push(
                Container::new(column)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(horizontal)
                    .align_y(vertical)
                    .padding(spacing::MD),
            );
        }

        layers.into()
    }

    fn confirm_buttons(notification: &NotificationView) -> Element<'_, Message> {
        let confirm_label = notification
            .labels
            .confirm_text
            .as_deref()
            .unwrap_or(DEFAULT_CONFIRM_LABEL);
        let cancel_label = notification
            .labels
            .cancel_text
            .as_deref()
            .unwrap_or(DEFAULT_CANCEL_LABEL);

        Row::new()
            .spacing(spacing::XS)
            .push(
                button(Text::new(cancel_label).size(typography::CAPTION))
                    .on_press(Message::Resolve(notification.id.clone(), false))
                    .padding(spacing::XXS)
                    .style(dismiss_button_style),
            )
            .push(
                button(Text::new(confirm_label).size(typography::CAPTION))
                    .on_press(Message::Resolve(notification.id.clone(), true))
                    .padding(spacing::XXS)
                    .style(button::primary),
            )
            .into()
    }
}

const ALL_POSITIONS: [Position; 6] = [
    Position::TopLeft,
    Position::TopCenter,
    Position::TopRight,
    Position::BottomLeft,
    Position::BottomCenter,
    Position::BottomRight,
];

fn anchor(position: Position) -> (alignment::Horizontal, alignment::Vertical) {
    use alignment::{Horizontal, Vertical};
    match position {
        Position::TopLeft => (Horizontal::Left, Vertical::Top),
        Position::TopCenter => (Horizontal::Center, Vertical::Top),
        Position::TopRight => (Horizontal::Right, Vertical::Top),
        Position::BottomLeft => (Horizontal::Left, Vertical::Bottom),
        Position::BottomCenter => (Horizontal::Center, Vertical::Bottom),
        Position::BottomRight => (Horizontal::Right, Vertical::Bottom),
    }
}

fn accent_color(kind: Kind) -> Color {
    match kind {
        Kind::Success => palette::SUCCESS_500,
        Kind::Error => palette::ERROR_500,
        Kind::Info => palette::INFO_500,
        Kind::Warning => palette::WARNING_500,
        Kind::Confirm => palette::CONFIRM_500,
    }
}

fn glyph(kind: Kind) -> &'static str {
    match kind {
        Kind::Success => "✓",
        Kind::Error => "✕",
        Kind::Info => "ℹ",
        Kind::Warning => "⚠",
        Kind::Confirm => "?",
    }
}

fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(Color { a: alpha, ..bg_color })),
        border: iced::Border {
            color: Color { a: alpha, ..accent },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: if alpha < opacity::OPAQUE {
            shadow::NONE
        } else {
            shadow::MD
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let overlay = |a: f32| button::Style {
        background: Some(iced::Background::Color(Color {
            a,
            ..palette::GRAY_400
        })),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Hovered => overlay(opacity::HOVER),
        button::Status::Pressed => overlay(opacity::PRESSED),
        button::Status::Active | button::Status::Disabled => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
