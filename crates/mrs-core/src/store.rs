// ── Central reactive snapshot store ──
//
// Every backend record consumed by this layer is a read-only view that is
// fully replaced on refresh -- nothing is cached or diffed. Each snapshot
// lives in a `watch` channel so consumers can subscribe to replacements.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use mrs_api::{Item, SearchQuery, StatsSnapshot};

use crate::stream::SnapshotStream;

/// Display cap for the recent-items list.
pub const MAX_RECENT_ITEMS: usize = 30;

/// Reactive store for the dashboard snapshots.
pub struct SnapshotStore {
    stats: watch::Sender<Option<StatsSnapshot>>,
    recent_items: watch::Sender<Arc<Vec<Item>>>,
    queries: watch::Sender<Arc<Vec<SearchQuery>>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        let (stats, _) = watch::channel(None);
        let (recent_items, _) = watch::channel(Arc::new(Vec::new()));
        let (queries, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);

        Self {
            stats,
            recent_items,
            queries,
            last_refresh,
        }
    }

    // ── Snapshot application ─────────────────────────────────────────

    pub(crate) fn apply_stats(&self, snapshot: StatsSnapshot) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.stats.send_modify(|s| *s = Some(snapshot));
        self.mark_refreshed();
    }

    /// Replace the recent-items snapshot, capped at [`MAX_RECENT_ITEMS`].
    pub(crate) fn apply_recent_items(&self, mut items: Vec<Item>) {
        items.truncate(MAX_RECENT_ITEMS);
        self.recent_items.send_modify(|s| *s = Arc::new(items));
        self.mark_refreshed();
    }

    pub(crate) fn apply_queries(&self, queries: Vec<SearchQuery>) {
        self.queries.send_modify(|s| *s = Arc::new(queries));
        self.mark_refreshed();
    }

    fn mark_refreshed(&self) {
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn stats_snapshot(&self) -> Option<StatsSnapshot> {
        self.stats.borrow().clone()
    }

    pub fn recent_items_snapshot(&self) -> Arc<Vec<Item>> {
        self.recent_items.borrow().clone()
    }

    pub fn queries_snapshot(&self) -> Arc<Vec<SearchQuery>> {
        self.queries.borrow().clone()
    }

    pub fn query_by_id(&self, id: i64) -> Option<SearchQuery> {
        self.queries
            .borrow()
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_stats(&self) -> SnapshotStream<Option<StatsSnapshot>> {
        SnapshotStream::new(self.stats.subscribe())
    }

    pub fn subscribe_recent_items(&self) -> SnapshotStream<Arc<Vec<Item>>> {
        SnapshotStream::new(self.recent_items.subscribe())
    }

    pub fn subscribe_queries(&self) -> SnapshotStream<Arc<Vec<SearchQuery>>> {
        SnapshotStream::new(self.queries.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last refresh landed, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(title: &str) -> Item {
        Item {
            title: title.into(),
            price: None,
            image_url: None,
            search_name: None,
        }
    }

    fn stats(total_items: u64, active_searches: u64, total_api_requests: u64) -> StatsSnapshot {
        StatsSnapshot {
            total_items,
            active_searches,
            total_api_requests,
            uptime: None,
            timestamp: None,
        }
    }

    #[test]
    fn stats_snapshot_replaces_previous() {
        let store = SnapshotStore::new();
        assert!(store.stats_snapshot().is_none());

        store.apply_stats(stats(5, 2, 9));
        let snap = store.stats_snapshot().unwrap();
        assert_eq!(
            (snap.total_items, snap.active_searches, snap.total_api_requests),
            (5, 2, 9)
        );

        store.apply_stats(stats(6, 2, 10));
        assert_eq!(store.stats_snapshot().unwrap().total_items, 6);
    }

    #[test]
    fn recent_items_capped_at_display_limit() {
        let store = SnapshotStore::new();
        let items: Vec<Item> = (0..50).map(|i| item(&format!("item {i}"))).collect();

        store.apply_recent_items(items);
        assert_eq!(store.recent_items_snapshot().len(), MAX_RECENT_ITEMS);
    }

    #[test]
    fn query_lookup_by_id() {
        let store = SnapshotStore::new();
        store.apply_queries(vec![SearchQuery {
            id: 7,
            name: "pokemon".into(),
            url: "https://jp.mercari.com/search?keyword=pokemon".into(),
            enabled: true,
            created_at: None,
        }]);

        assert_eq!(store.query_by_id(7).unwrap().name, "pokemon");
        assert!(store.query_by_id(8).is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_replacements() {
        let store = SnapshotStore::new();
        let mut stream = store.subscribe_stats();
        assert!(stream.current().is_none());

        store.apply_stats(stats(5, 2, 9));

        let snap = stream.changed().await.unwrap().unwrap();
        assert_eq!(snap.total_items, 5);
        assert_eq!(snap.active_searches, 2);
        assert_eq!(snap.total_api_requests, 9);
    }

    #[test]
    fn refresh_marks_data_age() {
        let store = SnapshotStore::new();
        assert!(store.data_age().is_none());

        store.apply_recent_items(vec![item("x")]);
        assert!(store.data_age().is_some());
    }
}
