// ── One-shot commands ──
//
// Every user-triggered action is expressed as a `Command` routed through
// the Monitor's command processor, which answers with a `CommandOutcome`
// over a oneshot channel.

use tokio::sync::oneshot;

use mrs_api::UrlValidation;

use crate::error::CoreError;

/// A one-shot action against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate and dry-run a search URL.
    TestSearchUrl { url: String },
    /// Trigger a scan cycle outside the backend's schedule.
    ForceScan,
    /// Fire a test notification.
    TestNotification,
    /// Delete a saved query.
    DeleteQuery { id: i64 },
    /// Enable/disable a saved query.
    ToggleQuery { id: i64 },
    /// Delete every stored item.
    ClearAllItems,
}

impl Command {
    /// Short progress label shown while the command is in flight.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TestSearchUrl { .. } => "Testing search URL",
            Self::ForceScan => "Running search",
            Self::TestNotification => "Sending test notification",
            Self::DeleteQuery { .. } => "Deleting query",
            Self::ToggleQuery { .. } => "Toggling query",
            Self::ClearAllItems => "Clearing all items",
        }
    }
}

/// The typed result of a completed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    UrlTested(UrlValidation),
    ScanFinished { new_items: u64 },
    NotificationSent,
    QueryDeleted,
    QueryToggled,
    ItemsCleared { message: String },
}

/// A command plus the reply channel for its outcome.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: oneshot::Sender<Result<CommandOutcome, CoreError>>,
}
