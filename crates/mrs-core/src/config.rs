// ── Runtime connection configuration ──
//
// Describes *how* to reach the dashboard backend and how often to poll.
// The CLI/TUI constructs a `MonitorConfig` and hands it in; core never
// reads config files.

use std::time::Duration;

use url::Url;

/// Configuration for a single backend connection.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend base URL (e.g. `http://127.0.0.1:5000`).
    pub server_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Stats poll period in seconds. 0 = never.
    pub stats_interval_secs: u64,
    /// Recent-items poll period in seconds. 0 = never.
    pub items_interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // The backend's development default.
            server_url: Url::parse("http://127.0.0.1:5000").expect("static URL is valid"),
            timeout: Duration::from_secs(30),
            stats_interval_secs: 10,
            items_interval_secs: 30,
        }
    }
}

impl MonitorConfig {
    /// A config with both pollers disabled, for one-shot CLI use.
    pub fn without_polling(mut self) -> Self {
        self.stats_interval_secs = 0;
        self.items_interval_secs = 0;
        self
    }
}
