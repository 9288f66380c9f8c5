//! `mrs scan` -- force a scan cycle outside the backend's schedule.

use mrs_core::{Command, CommandOutcome, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = util::spinner("Running search...", global.quiet);
    let result = monitor.execute(Command::ForceScan).await;
    util::clear_spinner(bar);

    match result? {
        CommandOutcome::ScanFinished { new_items } => {
            output::print_success(
                &format!("Scan complete! {new_items} new items found"),
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
