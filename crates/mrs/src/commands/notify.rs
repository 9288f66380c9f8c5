//! `mrs notify-test` -- fire a test notification.

use mrs_core::{Command, CommandOutcome, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = util::spinner("Sending test notification...", global.quiet);
    let result = monitor.execute(Command::TestNotification).await;
    util::clear_spinner(bar);

    match result? {
        CommandOutcome::NotificationSent => {
            output::print_success(
                "Test notification sent",
                output::should_color(&global.color),
                global.quiet,
            );
            Ok(())
        }
        other => Err(CliError::ApiError {
            message: format!("unexpected command outcome: {other:?}"),
            status: None,
        }),
    }
}
