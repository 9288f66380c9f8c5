//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use mrs_core::{Command, Item, SearchQuery, StatsSnapshot};

use crate::screen::ScreenId;

/// Alert severity, selecting the banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertLevel {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

/// A transient banner notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

impl Alert {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: AlertLevel::Success,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: AlertLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: AlertLevel::Warning,
        }
    }

    pub fn danger(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: AlertLevel::Danger,
        }
    }
}

/// Pending confirmation dialog.
///
/// Clearing all items asks twice: the first stage explains the
/// consequences, the second is a final warning. Declining any stage
/// aborts with no request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteQuery { id: i64, name: String },
    ClearAllItems,
    ClearAllItemsFinal,
}

/// What confirming a dialog leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStep {
    /// Dispatch this command.
    Run(Command),
    /// Show the next confirmation stage.
    Ask(ConfirmAction),
}

impl ConfirmAction {
    /// Advance the dialog after a "yes" answer.
    pub fn advance(self) -> ConfirmStep {
        match self {
            Self::DeleteQuery { id, .. } => ConfirmStep::Run(Command::DeleteQuery { id }),
            Self::ClearAllItems => ConfirmStep::Ask(Self::ClearAllItemsFinal),
            Self::ClearAllItemsFinal => ConfirmStep::Run(Command::ClearAllItems),
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteQuery { name, .. } => {
                write!(f, "Delete saved query \"{name}\"? Items it found are kept.")
            }
            Self::ClearAllItems => write!(
                f,
                "This deletes every stored item from the backend. Saved queries are kept. Continue?"
            ),
            Self::ClearAllItemsFinal => write!(
                f,
                "Final warning: all item history will be lost. Really delete everything?"
            ),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Data events (from mrs-core streams) ───────────────────────
    StatsUpdated(StatsSnapshot),
    ItemsUpdated(Arc<Vec<Item>>),
    QueriesUpdated(Arc<Vec<SearchQuery>>),

    // ── Commands ──────────────────────────────────────────────────
    /// Dispatch a one-shot backend command (after any confirmation).
    RunCommand(Command),
    /// In-flight command completed; clears the busy state.
    CommandFinished,
    /// Manual data refresh.
    Refresh,

    // ── Confirm dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── URL test input overlay ────────────────────────────────────
    OpenUrlInput { prefill: Option<String> },
    CloseUrlInput,

    // ── Alerts ────────────────────────────────────────────────────
    ShowAlert(Alert),
    DismissAlert,

    // ── Clipboard ─────────────────────────────────────────────────
    CopyToClipboard(String),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_confirm_runs_after_one_yes() {
        let confirm = ConfirmAction::DeleteQuery {
            id: 3,
            name: "pokemon".into(),
        };
        assert_eq!(
            confirm.advance(),
            ConfirmStep::Run(Command::DeleteQuery { id: 3 })
        );
    }

    #[test]
    fn clear_all_requires_two_stages() {
        let first = ConfirmAction::ClearAllItems.advance();
        assert_eq!(first, ConfirmStep::Ask(ConfirmAction::ClearAllItemsFinal));

        let second = ConfirmAction::ClearAllItemsFinal.advance();
        assert_eq!(second, ConfirmStep::Run(Command::ClearAllItems));
    }
}
