// ── Monitor abstraction ──
//
// The application context constructed once at startup. Owns the API
// client, the snapshot store, the two pollers, the input-focus poll gate,
// and the command processor. Teardown is explicit: `stop()` cancels every
// background task and joins it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mrs_api::{ApiClient, TransportConfig, UrlValidation};

use crate::command::{Command, CommandEnvelope, CommandOutcome};
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::store::SnapshotStore;
use crate::stream::SnapshotStream;

const COMMAND_CHANNEL_SIZE: usize = 16;

// ── MonitorState ─────────────────────────────────────────────────────

/// Lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

// ── Monitor ──────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Call
/// [`start()`](Self::start) to spawn the pollers and command processor,
/// and [`stop()`](Self::stop) for deterministic teardown.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: ApiClient,
    store: Arc<SnapshotStore>,
    /// Poll gate: set while a text input is focused so a refresh never
    /// disrupts typing. Checked before each fetch is issued.
    input_active: AtomicBool,
    state: watch::Sender<MonitorState>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a new Monitor from configuration. Does NOT poll anything --
    /// call [`start()`](Self::start) to spawn the background tasks.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = ApiClient::new(config.server_url.as_str(), &transport)?;

        let store = Arc::new(SnapshotStore::new());
        let (state, _) = watch::channel(MonitorState::Idle);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store,
                input_active: AtomicBool::new(false),
                state,
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the monitor configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying snapshot store.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start the background tasks: command processor plus one poller per
    /// configured interval (an interval of 0 disables that poller).
    ///
    /// When any poller is enabled, an initial refresh runs first so the
    /// first render has data; a failure there is logged and tolerated --
    /// the pollers retry on their natural cadence. One-shot consumers
    /// (both intervals 0) fetch explicitly via
    /// [`refresh_now()`](Self::refresh_now) instead.
    pub async fn start(&self) -> Result<(), CoreError> {
        let Some(rx) = self.inner.command_rx.lock().await.take() else {
            return Err(CoreError::AlreadyStarted);
        };

        let polling = self.inner.config.stats_interval_secs > 0
            || self.inner.config.items_interval_secs > 0;
        if polling {
            if let Err(e) = self.refresh_now().await {
                warn!(error = %e, "initial refresh failed");
            }
        }

        let mut handles = self.inner.task_handles.lock().await;

        let monitor = self.clone();
        handles.push(tokio::spawn(command_processor_task(monitor, rx)));

        let stats_interval = self.inner.config.stats_interval_secs;
        if stats_interval > 0 {
            let monitor = self.clone();
            let cancel = self.inner.cancel.child_token();
            handles.push(tokio::spawn(stats_poll_task(monitor, stats_interval, cancel)));
        }

        let items_interval = self.inner.config.items_interval_secs;
        if items_interval > 0 {
            let monitor = self.clone();
            let cancel = self.inner.cancel.child_token();
            handles.push(tokio::spawn(items_poll_task(monitor, items_interval, cancel)));
        }

        let _ = self.inner.state.send(MonitorState::Running);
        info!("monitor started");
        Ok(())
    }

    /// Stop the monitor: cancel every background task and join it.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        let _ = self.inner.state.send(MonitorState::Stopped);
        debug!("monitor stopped");
    }

    /// Subscribe to lifecycle state changes.
    pub fn state(&self) -> watch::Receiver<MonitorState> {
        self.inner.state.subscribe()
    }

    // ── Poll gate ────────────────────────────────────────────────────

    /// Set while a text input holds focus; pollers skip their cycle
    /// entirely while this is set.
    pub fn set_input_active(&self, active: bool) {
        self.inner.input_active.store(active, Ordering::Relaxed);
    }

    pub fn input_active(&self) -> bool {
        self.inner.input_active.load(Ordering::Relaxed)
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Fetch stats, recent items, and saved queries concurrently and
    /// apply all three snapshots to the store.
    pub async fn refresh_now(&self) -> Result<(), CoreError> {
        let client = &self.inner.client;

        let (stats_res, items_res, queries_res) = tokio::join!(
            client.stats(),
            client.recent_items(),
            client.list_queries(),
        );

        let stats = stats_res?;
        let items = items_res?;
        let queries = queries_res?;

        let store = &self.inner.store;
        store.apply_stats(stats);
        store.apply_recent_items(items);
        store.apply_queries(queries);

        debug!(
            items = store.recent_items_snapshot().len(),
            queries = store.queries_snapshot().len(),
            "full refresh complete"
        );

        Ok(())
    }

    /// One stats poll cycle. Returns `false` when the input gate caused
    /// the cycle to be skipped without issuing a request.
    async fn poll_stats_cycle(&self) -> Result<bool, CoreError> {
        if self.input_active() {
            return Ok(false);
        }
        let snapshot = self.inner.client.stats().await?;
        self.inner.store.apply_stats(snapshot);
        Ok(true)
    }

    /// One recent-items poll cycle, with the same gate as stats.
    async fn poll_items_cycle(&self) -> Result<bool, CoreError> {
        if self.input_active() {
            return Ok(false);
        }
        let items = self.inner.client.recent_items().await?;
        self.inner.store.apply_recent_items(items);
        Ok(true)
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a one-shot command and await its outcome.
    pub async fn execute(&self, cmd: Command) -> Result<CommandOutcome, CoreError> {
        if *self.inner.state.borrow() != MonitorState::Running {
            return Err(CoreError::MonitorStopped);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::MonitorStopped)?;

        rx.await.map_err(|_| CoreError::MonitorStopped)?
    }

    // ── One-shot convenience ─────────────────────────────────────────

    /// One-shot: start with polling disabled, run closure, stop.
    ///
    /// Optimized for the CLI, which only needs a single request-response
    /// cycle per invocation.
    pub async fn oneshot<F, Fut, T>(config: MonitorConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Monitor) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let monitor = Monitor::new(config.without_polling())?;
        monitor.start().await?;
        let result = f(monitor.clone()).await;
        monitor.stop().await;
        result
    }

    // ── Stream accessors (delegate to the store) ─────────────────────

    pub fn stats_stream(&self) -> SnapshotStream<Option<mrs_api::StatsSnapshot>> {
        self.inner.store.subscribe_stats()
    }

    pub fn items_stream(&self) -> SnapshotStream<Arc<Vec<mrs_api::Item>>> {
        self.inner.store.subscribe_recent_items()
    }

    pub fn queries_stream(&self) -> SnapshotStream<Arc<Vec<mrs_api::SearchQuery>>> {
        self.inner.store.subscribe_queries()
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodically refresh the stats snapshot.
async fn stats_poll_task(monitor: Monitor, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match monitor.poll_stats_cycle().await {
                    Ok(true) => {}
                    Ok(false) => debug!("input focused, skipping stats poll"),
                    Err(e) => warn!(error = %e, "stats poll failed"),
                }
            }
        }
    }
}

/// Periodically refresh the recent-items snapshot.
async fn items_poll_task(monitor: Monitor, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match monitor.poll_items_cycle().await {
                    Ok(true) => {}
                    Ok(false) => debug!("input focused, skipping items poll"),
                    Err(e) => warn!(error = %e, "items poll failed"),
                }
            }
        }
    }
}

/// Process commands from the mpsc channel.
async fn command_processor_task(monitor: Monitor, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = monitor.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&monitor, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────────

/// Route a command to the appropriate API call.
///
/// Mutating commands re-fetch the affected snapshots on success so the
/// UI reflects the new backend state without waiting for the next poll
/// (the moral equivalent of the old dashboard's post-action page reload).
async fn route_command(monitor: &Monitor, cmd: Command) -> Result<CommandOutcome, CoreError> {
    let client = &monitor.inner.client;

    match cmd {
        Command::TestSearchUrl { url } => {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                return Err(CoreError::ValidationFailed {
                    message: "search URL must not be empty".into(),
                });
            }
            let validation: UrlValidation = client.test_search_url(trimmed).await?;
            Ok(CommandOutcome::UrlTested(validation))
        }

        Command::ForceScan => {
            let outcome = client.force_scan().await?;
            refresh_after_mutation(monitor).await;
            Ok(CommandOutcome::ScanFinished {
                new_items: outcome.new_items,
            })
        }

        Command::TestNotification => {
            client.test_notification().await?;
            Ok(CommandOutcome::NotificationSent)
        }

        Command::DeleteQuery { id } => {
            client.delete_query(id).await?;
            refresh_queries(monitor).await;
            Ok(CommandOutcome::QueryDeleted)
        }

        Command::ToggleQuery { id } => {
            client.toggle_query(id).await?;
            refresh_queries(monitor).await;
            Ok(CommandOutcome::QueryToggled)
        }

        Command::ClearAllItems => {
            let outcome = client.clear_all_items().await?;
            refresh_after_mutation(monitor).await;
            Ok(CommandOutcome::ItemsCleared {
                message: outcome.message,
            })
        }
    }
}

/// Best-effort full refresh after a mutating command; the command itself
/// already succeeded, so a refresh failure is only logged.
async fn refresh_after_mutation(monitor: &Monitor) {
    if let Err(e) = monitor.refresh_now().await {
        warn!(error = %e, "post-command refresh failed");
    }
}

/// Best-effort queries re-fetch after a query mutation.
async fn refresh_queries(monitor: &Monitor) {
    match monitor.inner.client.list_queries().await {
        Ok(queries) => monitor.inner.store.apply_queries(queries),
        Err(e) => warn!(error = %e, "queries re-fetch failed"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn monitor_for(server: &MockServer) -> Monitor {
        let config = MonitorConfig {
            server_url: server.uri().parse().unwrap(),
            ..MonitorConfig::default()
        }
        .without_polling();
        Monitor::new(config).unwrap()
    }

    async fn mount_read_endpoints(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "database": { "total_items": 5, "active_searches": 2 },
                "total_api_requests": 9
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/recent-items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "items": []
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/queries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "queries": []
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn input_gate_issues_zero_requests() {
        let server = MockServer::start().await;

        // The gate must be checked before the fetch: zero requests allowed.
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let monitor = monitor_for(&server);
        monitor.set_input_active(true);

        let fetched = monitor.poll_stats_cycle().await.unwrap();
        assert!(!fetched);

        let fetched = monitor.poll_items_cycle().await.unwrap();
        assert!(!fetched);

        server.verify().await;
    }

    #[tokio::test]
    async fn poll_cycle_applies_counters() {
        let server = MockServer::start().await;
        mount_read_endpoints(&server).await;

        let monitor = monitor_for(&server);
        let fetched = monitor.poll_stats_cycle().await.unwrap();
        assert!(fetched);

        let snap = monitor.store().stats_snapshot().unwrap();
        assert_eq!(
            (snap.total_items, snap.active_searches, snap.total_api_requests),
            (5, 2, 9)
        );
    }

    #[tokio::test]
    async fn empty_url_is_rejected_before_any_request() {
        let server = MockServer::start().await;
        mount_read_endpoints(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/search/test"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let monitor = monitor_for(&server);
        monitor.start().await.unwrap();

        let result = monitor
            .execute(Command::TestSearchUrl { url: "   ".into() })
            .await;
        assert!(
            matches!(result, Err(CoreError::ValidationFailed { .. })),
            "expected ValidationFailed, got: {result:?}"
        );

        monitor.stop().await;
        server.verify().await;
    }

    #[tokio::test]
    async fn delete_command_refreshes_queries() {
        let server = MockServer::start().await;
        mount_read_endpoints(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/queries/3/delete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let monitor = monitor_for(&server);
        monitor.start().await.unwrap();

        let outcome = monitor
            .execute(Command::DeleteQuery { id: 3 })
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::QueryDeleted);

        monitor.stop().await;
        server.verify().await;
    }

    #[tokio::test]
    async fn execute_after_stop_fails() {
        let server = MockServer::start().await;
        mount_read_endpoints(&server).await;

        let monitor = monitor_for(&server);
        monitor.start().await.unwrap();
        monitor.stop().await;

        let result = monitor.execute(Command::ForceScan).await;
        assert!(matches!(result, Err(CoreError::MonitorStopped)));
    }

    #[tokio::test]
    async fn start_twice_is_an_error() {
        let server = MockServer::start().await;
        mount_read_endpoints(&server).await;

        let monitor = monitor_for(&server);
        monitor.start().await.unwrap();

        let second = monitor.start().await;
        assert!(matches!(second, Err(CoreError::AlreadyStarted)));

        monitor.stop().await;
    }
}
