// SPDX-License-Identifier: MPL-2.0
//! `social_toasts` shows short-lived notifications ("toasts") and
//! confirmation prompts for a social app front end.
//!
//! The [`notifications`] module holds the framework-independent core; [`ui`]
//! renders it with Iced and [`app`] is a small demo built on both.

#![doc(html_root_url = "https://docs.rs/social_toasts/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;
pub mod ui;
