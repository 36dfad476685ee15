// SPDX-License-Identifier: MPL-2.0
//! Iced presentation of the notification store.
//!
//! - [`toast`] - Toast widget and overlay layout
//! - [`design_tokens`] - Colors, spacing and sizes used by the toasts

pub mod design_tokens;
pub mod toast;
