//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod clear;
pub mod config_cmd;
pub mod items;
pub mod notify;
pub mod queries;
pub mod scan;
pub mod search;
pub mod stats;
pub mod util;

use mrs_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Stats => stats::handle(monitor, global).await,
        Command::Items(args) => items::handle(monitor, &args, global).await,
        Command::Queries(args) => queries::handle(monitor, args, global).await,
        Command::TestUrl(args) => search::handle(monitor, &args, global).await,
        Command::Scan => scan::handle(monitor, global).await,
        Command::NotifyTest => notify::handle(monitor, global).await,
        Command::ClearItems => clear::handle(monitor, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
