//! `mrs stats` -- show the dashboard counters.

use mrs_core::{Monitor, StatsSnapshot, format};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(snapshot: &StatsSnapshot) -> String {
    let mut lines = vec![
        format!("Total items      {}", format::group_thousands(snapshot.total_items)),
        format!("Active searches  {}", format::group_thousands(snapshot.active_searches)),
        format!("API requests     {}", format::group_thousands(snapshot.total_api_requests)),
    ];

    if let Some(ref uptime) = snapshot.uptime {
        lines.push(format!("Uptime           {uptime}"));
    }
    lines.push(format!(
        "As of            {}",
        format::fmt_date(snapshot.timestamp.as_ref())
    ));

    lines.join("\n")
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    monitor.refresh_now().await?;

    let snapshot = monitor.store().stats_snapshot().ok_or(CliError::ApiError {
        message: "backend returned no stats".into(),
        status: None,
    })?;

    let out = output::render_single(&global.output, &snapshot, detail, |s| {
        s.total_items.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
