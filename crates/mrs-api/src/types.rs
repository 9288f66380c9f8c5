// Wire types for the dashboard API.
//
// Each endpoint returns an envelope carrying a success/valid flag. The
// client decodes the flag first and only then the payload shape, so an
// application-level failure becomes `Error::Api` and a success envelope
// with missing required fields becomes `Error::Deserialization` -- absent
// fields are never silently treated as falsy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Domain records ───────────────────────────────────────────────────

/// Periodic summary of item/query/API counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_items: u64,
    pub active_searches: u64,
    pub total_api_requests: u64,
    /// Uptime string preformatted by the server (e.g. "3 days, 4:12").
    pub uptime: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A recently discovered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Price in yen. Absent or zero renders as "Price N/A".
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Label of the saved search that found this item.
    #[serde(default)]
    pub search_name: Option<String>,
}

/// A saved search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of testing a search URL against the backend.
///
/// `test_error` can accompany either variant: the backend validates the
/// URL shape and separately attempts a live fetch, and the fetch can fail
/// even for a well-formed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidation {
    Valid {
        items_found: u64,
        sample_titles: Vec<String>,
        test_error: Option<String>,
    },
    Invalid {
        error: Option<String>,
        test_error: Option<String>,
    },
}

impl UrlValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn test_error(&self) -> Option<&str> {
        match self {
            Self::Valid { test_error, .. } | Self::Invalid { test_error, .. } => {
                test_error.as_deref()
            }
        }
    }
}

/// Outcome of a forced scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Items discovered by the scan. Zero when the backend omits the count.
    pub new_items: u64,
}

/// Outcome of clearing all stored items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearOutcome {
    /// Server-supplied summary (e.g. "Deleted 120 items").
    pub message: String,
}

// ── Wire envelopes ───────────────────────────────────────────────────

/// Minimal first-pass decode: just the success flag and error text.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessFlag {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Success-shape payload of `GET /api/stats`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsBody {
    pub database: DatabaseCounts,
    pub total_api_requests: u64,
    #[serde(default)]
    pub uptime_formatted: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseCounts {
    pub total_items: u64,
    pub active_searches: u64,
}

impl StatsBody {
    pub(crate) fn into_snapshot(self) -> StatsSnapshot {
        StatsSnapshot {
            total_items: self.database.total_items,
            active_searches: self.database.active_searches,
            total_api_requests: self.total_api_requests,
            uptime: self.uptime_formatted,
            timestamp: self.timestamp,
        }
    }
}

/// Success-shape payload of `GET /api/recent-items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsBody {
    pub items: Vec<Item>,
}

/// Success-shape payload of `GET /api/queries`.
#[derive(Debug, Deserialize)]
pub(crate) struct QueriesBody {
    pub queries: Vec<SearchQuery>,
}

/// Raw envelope of `POST /api/search/test` -- tagged by `valid`.
#[derive(Debug, Deserialize)]
pub(crate) struct TestFlag {
    #[serde(default)]
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidTestBody {
    pub test_results: TestResults,
    #[serde(default)]
    pub test_error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestResults {
    pub items_found: u64,
    #[serde(default)]
    pub sample_titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvalidTestBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub test_error: Option<String>,
}

/// Raw envelope of `POST /api/force-scan`.
///
/// Older backends answer `{new_items}`, newer ones `{success, new_items}`;
/// both omit the count when the scan found nothing.
#[derive(Debug, Deserialize)]
pub(crate) struct ScanEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub new_items: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Success-shape payload of `POST /api/clear-all-items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ClearBody {
    pub message: String,
}
