//! Data bridge -- connects [`Monitor`] streams to TUI actions.
//!
//! Runs as a background task: starts the monitor (which spawns the
//! pollers), pushes initial snapshots, then loops forwarding every
//! snapshot replacement as an [`Action`] through the TUI's action
//! channel. Shuts down cleanly on cancellation.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use mrs_core::Monitor;

use crate::action::{Action, Alert};

/// Spawn the data bridge connecting the [`Monitor`] streams to the TUI.
pub async fn run_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    if let Err(e) = monitor.start().await {
        warn!(error = %e, "failed to start monitor");
        let _ = action_tx.send(Action::ShowAlert(Alert::danger(format!(
            "Failed to start monitoring: {e}"
        ))));
        return;
    }

    // Subscribe to snapshot streams
    let mut stats = monitor.stats_stream();
    let mut items = monitor.items_stream();
    let mut queries = monitor.queries_stream();

    // Push initial snapshots so screens have data immediately
    if let Some(snapshot) = stats.current().clone() {
        let _ = action_tx.send(Action::StatsUpdated(snapshot));
    }
    let initial_items = items.current().clone();
    if !initial_items.is_empty() {
        let _ = action_tx.send(Action::ItemsUpdated(initial_items));
    }
    let initial_queries = queries.current().clone();
    if !initial_queries.is_empty() {
        let _ = action_tx.send(Action::QueriesUpdated(initial_queries));
    }

    // Stream loop -- forward every replacement until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = stats.changed() => {
                if let Some(snapshot) = snapshot {
                    let _ = action_tx.send(Action::StatsUpdated(snapshot));
                }
            }
            Some(snapshot) = items.changed() => {
                let _ = action_tx.send(Action::ItemsUpdated(snapshot));
            }
            Some(snapshot) = queries.changed() => {
                let _ = action_tx.send(Action::QueriesUpdated(snapshot));
            }
        }
    }

    monitor.stop().await;
    debug!("data bridge shut down");
}
