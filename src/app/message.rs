// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::notifications::Kind;
use crate::ui::toast;
use std::path::PathBuf;
use std::time::Instant;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a sample toast of the given kind.
    Show(Kind),
    /// Ask for confirmation before a (pretend) destructive action.
    AskDelete,
    DismissAll,
    ExportDiagnostics,
    Toast(toast::Message),
    /// Periodic tick that fires due notification timers.
    Tick(Instant),
}

/// Runtime flags passed from `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Directory holding `settings.toml` instead of the platform config dir.
    pub config_dir: Option<PathBuf>,
    /// Where the diagnostics report is written on export.
    pub diagnostics_path: Option<PathBuf>,
}
