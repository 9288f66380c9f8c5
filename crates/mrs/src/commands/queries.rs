//! `mrs queries` -- list, toggle, and delete saved search queries.

use tabled::Tabled;

use mrs_core::{Command, CommandOutcome, Monitor, SearchQuery, format};

use crate::cli::{GlobalOpts, QueriesArgs, QueriesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct QueryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "URL")]
    url: String,
}

fn to_row(query: &SearchQuery) -> QueryRow {
    QueryRow {
        id: query.id,
        name: format::sanitize_text(&query.name),
        enabled: if query.enabled { "yes" } else { "no" },
        url: format::truncate_title(&query.url),
    }
}

pub async fn handle(monitor: &Monitor, args: QueriesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        QueriesCommand::List => {
            monitor.refresh_now().await?;

            let snapshot = monitor.store().queries_snapshot();
            let queries: Vec<SearchQuery> = snapshot.iter().cloned().collect();

            let out =
                output::render_list(&global.output, &queries, to_row, |q| q.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        QueriesCommand::Toggle { id } => {
            let bar = util::spinner("Toggling query...", global.quiet);
            let result = monitor.execute(Command::ToggleQuery { id }).await;
            util::clear_spinner(bar);

            match result? {
                CommandOutcome::QueryToggled => {
                    output::print_success(&format!("Query {id} toggled"), color, global.quiet);
                    Ok(())
                }
                other => Err(unexpected(&other)),
            }
        }

        QueriesCommand::Delete { id } => {
            let confirmed = util::confirm(
                &format!("Delete saved query {id}? Items it found are kept."),
                global.yes,
                "queries delete",
            )?;
            if !confirmed {
                output::print_info("Aborted, nothing deleted.", color, global.quiet);
                return Ok(());
            }

            let bar = util::spinner("Deleting query...", global.quiet);
            let result = monitor.execute(Command::DeleteQuery { id }).await;
            util::clear_spinner(bar);

            match result? {
                CommandOutcome::QueryDeleted => {
                    output::print_success(&format!("Query {id} deleted"), color, global.quiet);
                    Ok(())
                }
                other => Err(unexpected(&other)),
            }
        }
    }
}

fn unexpected(outcome: &CommandOutcome) -> CliError {
    CliError::ApiError {
        message: format!("unexpected command outcome: {outcome:?}"),
        status: None,
    }
}
