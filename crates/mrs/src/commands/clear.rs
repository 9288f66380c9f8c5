//! `mrs clear-items` -- delete every stored item, with a double confirmation.

use mrs_core::{Command, CommandOutcome, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    // Two sequential confirmations; declining either aborts with no request.
    let first = util::confirm(
        "This deletes every stored item from the backend database. Saved queries are kept. Continue?",
        global.yes,
        "clear-items",
    )?;
    if !first {
        output::print_info("Aborted, nothing deleted.", color, global.quiet);
        return Ok(());
    }

    let second = util::confirm(
        "Final warning: all item history will be lost. Really delete everything?",
        global.yes,
        "clear-items",
    )?;
    if !second {
        output::print_info("Aborted, nothing deleted.", color, global.quiet);
        return Ok(());
    }

    let bar = util::spinner("Clearing all items...", global.quiet);
    let result = monitor.execute(Command::ClearAllItems).await;
    util::clear_spinner(bar);

    match result? {
        CommandOutcome::ItemsCleared { message } => {
            output::print_success(&message, color, global.quiet);
            Ok(())
        }
        other => Err(CliError::ApiError {
            message: format!("unexpected command outcome: {other:?}"),
            status: None,
        }),
    }
}
