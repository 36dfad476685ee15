// SPDX-License-Identifier: MPL-2.0
use social_toasts::app::{self, Flags};
use std::path::PathBuf;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config").unwrap_or_else(|err| {
        eprintln!("Ignoring --config: {err}");
        None
    });
    let diagnostics_path: Option<PathBuf> =
        args.opt_value_from_str("--diagnostics").unwrap_or_else(|err| {
            eprintln!("Ignoring --diagnostics: {err}");
            None
        });

    app::run(Flags {
        config_dir,
        diagnostics_path,
    })
}
