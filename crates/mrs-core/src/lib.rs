// mrs-core: Reactive data layer between mrs-api and consumers (CLI/TUI).

pub mod command;
pub mod config;
pub mod error;
pub mod format;
pub mod monitor;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandOutcome};
pub use config::MonitorConfig;
pub use error::CoreError;
pub use monitor::{Monitor, MonitorState};
pub use store::SnapshotStore;
pub use stream::SnapshotStream;

// Re-export the wire records at the crate root for ergonomics.
pub use mrs_api::{ClearOutcome, Item, ScanOutcome, SearchQuery, StatsSnapshot, UrlValidation};
