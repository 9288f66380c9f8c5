// Async HTTP client for the MercariSearcher dashboard API.
//
// All endpoints live under /api/ on the backend base URL. Responses are
// decoded in two passes: the success/valid flag first, then the full
// payload shape -- see types.rs for the envelope contract.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    ClearBody, ClearOutcome, InvalidTestBody, Item, ItemsBody, QueriesBody, ScanEnvelope,
    ScanOutcome, SearchQuery, StatsBody, StatsSnapshot, SuccessFlag, TestFlag, UrlValidation,
    ValidTestBody,
};

// ── Error response shape for non-2xx bodies ──────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the dashboard API.
///
/// Communicates via JSON over HTTP; no authentication headers are sent --
/// that concern belongs to whatever sits in front of the backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/stats"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_body(&self, path: &str) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post_body<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_empty(&self, path: &str) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Return the body of a 2xx response, or parse the error envelope of
    /// anything else.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.text().await?)
        } else {
            let raw = resp.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ErrorResponse>(&raw)
                .ok()
                .and_then(|e| e.error.or(e.message))
                .unwrap_or_else(|| {
                    if raw.is_empty() {
                        status.to_string()
                    } else {
                        raw
                    }
                });

            Err(Error::Api {
                message,
                status: Some(status.as_u16()),
            })
        }
    }

    /// Decode a JSON body into `T`, keeping a preview of the body on failure.
    fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Decode a success-flagged envelope: flag pass first, payload second.
    ///
    /// `success: false` becomes `Error::Api` with the server's message;
    /// `success: true` with a malformed payload becomes
    /// `Error::Deserialization`.
    fn decode_flagged<T: DeserializeOwned>(body: String) -> Result<T, Error> {
        let flag: SuccessFlag = Self::decode(body.clone())?;
        if !flag.success {
            return Err(Error::Api {
                message: flag
                    .error
                    .unwrap_or_else(|| "request failed".to_owned()),
                status: None,
            });
        }
        Self::decode(body)
    }

    /// POST with an empty body to an endpoint that only acknowledges.
    async fn post_ack(&self, path: &str) -> Result<(), Error> {
        let body = self.post_empty(path).await?;
        Self::decode_flagged::<SuccessFlag>(body).map(|_| ())
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Reads ────────────────────────────────────────────────────────

    /// `GET /api/stats` -- the dashboard counters.
    pub async fn stats(&self) -> Result<StatsSnapshot, Error> {
        let body = self.get_body("api/stats").await?;
        let stats: StatsBody = Self::decode_flagged(body)?;
        Ok(stats.into_snapshot())
    }

    /// `GET /api/recent-items` -- the most recently discovered listings.
    pub async fn recent_items(&self) -> Result<Vec<Item>, Error> {
        let body = self.get_body("api/recent-items").await?;
        let items: ItemsBody = Self::decode_flagged(body)?;
        Ok(items.items)
    }

    /// `GET /api/queries` -- all saved search queries.
    pub async fn list_queries(&self) -> Result<Vec<SearchQuery>, Error> {
        let body = self.get_body("api/queries").await?;
        let queries: QueriesBody = Self::decode_flagged(body)?;
        Ok(queries.queries)
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// `POST /api/search/test` -- validate a search URL and dry-run it.
    pub async fn test_search_url(&self, url: &str) -> Result<UrlValidation, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            url: &'a str,
        }

        let body = self.post_body("api/search/test", &Body { url }).await?;
        let flag: TestFlag = Self::decode(body.clone())?;

        if flag.valid {
            let valid: ValidTestBody = Self::decode(body)?;
            Ok(UrlValidation::Valid {
                items_found: valid.test_results.items_found,
                sample_titles: valid.test_results.sample_titles,
                test_error: valid.test_error,
            })
        } else {
            let invalid: InvalidTestBody = Self::decode(body)?;
            Ok(UrlValidation::Invalid {
                error: invalid.error,
                test_error: invalid.test_error,
            })
        }
    }

    /// `POST /api/force-scan` -- trigger a scan cycle outside the schedule.
    pub async fn force_scan(&self) -> Result<ScanOutcome, Error> {
        let body = self.post_empty("api/force-scan").await?;
        let env: ScanEnvelope = Self::decode(body)?;

        if env.success == Some(false) || env.error.is_some() {
            return Err(Error::Api {
                message: env.error.unwrap_or_else(|| "scan failed".to_owned()),
                status: None,
            });
        }

        Ok(ScanOutcome {
            new_items: env.new_items.unwrap_or(0),
        })
    }

    /// `POST /api/notifications/test` -- fire a test notification.
    pub async fn test_notification(&self) -> Result<(), Error> {
        self.post_ack("api/notifications/test").await
    }

    /// `POST /api/queries/{id}/delete` -- delete a saved query.
    pub async fn delete_query(&self, id: i64) -> Result<(), Error> {
        self.post_ack(&format!("api/queries/{id}/delete")).await
    }

    /// `POST /api/queries/{id}/toggle` -- enable/disable a saved query.
    pub async fn toggle_query(&self, id: i64) -> Result<(), Error> {
        self.post_ack(&format!("api/queries/{id}/toggle")).await
    }

    /// `POST /api/clear-all-items` -- delete every stored item.
    pub async fn clear_all_items(&self) -> Result<ClearOutcome, Error> {
        let body = self.post_empty("api/clear-all-items").await?;
        let cleared: ClearBody = Self::decode_flagged(body)?;
        Ok(ClearOutcome {
            message: cleared.message,
        })
    }
}
