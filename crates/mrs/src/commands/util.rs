//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::CliError;

/// Start a spinner with the given label, unless quiet or non-interactive.
///
/// The caller is responsible for `finish_and_clear()` once the request
/// completes -- success or failure -- mirroring the dashboard's rule that a
/// busy control is always restored.
pub fn spinner(label: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    bar.set_message(label.to_owned());
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}

/// Stop and erase a spinner, if one was started.
pub fn clear_spinner(bar: Option<ProgressBar>) {
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
}

/// Ask the user to confirm a destructive action.
///
/// `--yes` answers every prompt; without it, a non-interactive stdin is an
/// error rather than a hang. Returns `Ok(false)` when the user declines.
pub fn confirm(prompt: &str, yes: bool, action: &str) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e.to_string())))
}
