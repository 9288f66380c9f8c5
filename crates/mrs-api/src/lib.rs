// mrs-api: Async Rust client for the MercariSearcher dashboard API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{ClearOutcome, Item, ScanOutcome, SearchQuery, StatsSnapshot, UrlValidation};
