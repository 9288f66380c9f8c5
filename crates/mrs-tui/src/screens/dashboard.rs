//! Dashboard screen -- stat cards and recent item cards, the home screen.
//!
//! Layout:
//! ┌─ Items ─┐ ┌─ Searches ─┐ ┌─ API Reqs ─┐ ┌─ Uptime ─┐
//! │  1,234  │ │     12     │ │    5,678   │ │ 3d 4:12  │
//! └─────────┘ └────────────┘ └────────────┘ └──────────┘
//! ┌─ Recent Items ──────────────────────────────────────┐
//! │ ▣ ¥1,500  Pokemon card lot 151 booster...  [pokemon]│
//! │ □ Price N/A  Untracked figure                       │
//! └─────────────────────────────────────────────────────┘

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use mrs_core::format;
use mrs_core::store::MAX_RECENT_ITEMS;
use mrs_core::{Item, StatsSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// How long a changed counter stays highlighted.
const CHANGE_HIGHLIGHT: Duration = Duration::from_millis(150);

/// Dashboard screen state.
pub struct DashboardScreen {
    focused: bool,
    stats: Option<StatsSnapshot>,
    items: Arc<Vec<Item>>,
    /// When a stats counter last changed value (drives the highlight).
    stats_changed_at: Option<Instant>,
    /// When we last received any data update (for the refresh indicator).
    last_data_update: Option<Instant>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            stats: None,
            items: Arc::new(Vec::new()),
            stats_changed_at: None,
            last_data_update: None,
        }
    }

    /// Format the data age as a human-readable string for the title bar.
    fn refresh_age_str(&self) -> String {
        match self.last_data_update {
            Some(t) => {
                let secs = t.elapsed().as_secs();
                if secs < 5 {
                    "just now".into()
                } else if secs < 60 {
                    format!("{secs}s ago")
                } else {
                    format!("{}m ago", secs / 60)
                }
            }
            None => "no data".into(),
        }
    }

    fn value_style(&self) -> ratatui::style::Style {
        let changed_recently = self
            .stats_changed_at
            .is_some_and(|t| t.elapsed() < CHANGE_HIGHLIGHT);
        if changed_recently {
            theme::stat_value_changed()
        } else {
            theme::stat_value()
        }
    }

    /// Render one stat card.
    fn render_card(&self, frame: &mut Frame, area: Rect, label: &str, value: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(format!(" {value}"), self.value_style())),
            Line::from(Span::styled(format!(" {label}"), theme::stat_label())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the four stat cards.
    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

        let (items, searches, requests, uptime) = match self.stats {
            Some(ref s) => (
                format::group_thousands(s.total_items),
                format::group_thousands(s.active_searches),
                format::group_thousands(s.total_api_requests),
                s.uptime.clone().unwrap_or_else(|| "-".into()),
            ),
            None => ("-".into(), "-".into(), "-".into(), "-".into()),
        };

        self.render_card(frame, columns[0], "Total Items", &items);
        self.render_card(frame, columns[1], "Active Searches", &searches);
        self.render_card(frame, columns[2], "API Requests", &requests);
        self.render_card(frame, columns[3], "Uptime", &uptime);
    }

    /// One line per item card: image marker, price, title, optional badge.
    fn item_line(item: &Item) -> Line<'static> {
        // The web dashboard falls back to a placeholder image; here the
        // marker distinguishes items that carry one from those that don't.
        let marker = if item.image_url.is_some() { "▣ " } else { "□ " };

        let title = format::truncate_title(&format::sanitize_text(&item.title));
        let price = format::fmt_price_yen(item.price);

        let mut spans = vec![
            Span::styled(format!(" {marker}"), theme::stat_label()),
            Span::styled(format!("{price:>10}  "), theme::title_style()),
            Span::styled(title, theme::table_row()),
        ];

        if let Some(ref name) = item.search_name {
            spans.push(Span::styled(
                format!("  [{}]", format::sanitize_text(name)),
                theme::badge(),
            ));
        }

        Line::from(spans)
    }

    /// Render the recent-items panel.
    fn render_items(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Recent Items ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let max_rows = inner.height as usize;
        let mut lines: Vec<Line> = self
            .items
            .iter()
            .take(MAX_RECENT_ITEMS.min(max_rows))
            .map(Self::item_line)
            .collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No items yet, waiting for the next scan",
                theme::key_hint(),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatsUpdated(snapshot) => {
                let changed = self.stats.as_ref().is_some_and(|old| {
                    old.total_items != snapshot.total_items
                        || old.active_searches != snapshot.active_searches
                        || old.total_api_requests != snapshot.total_api_requests
                });
                if changed {
                    self.stats_changed_at = Some(Instant::now());
                }
                self.stats = Some(snapshot.clone());
                self.last_data_update = Some(Instant::now());
            }
            Action::ItemsUpdated(items) => {
                self.items = Arc::clone(items);
                self.last_data_update = Some(Instant::now());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let refresh_str = self.refresh_age_str();
        let title_line = Line::from(vec![
            Span::styled(" MercariSearcher ", theme::title_style()),
            Span::styled(format!(" [{refresh_str}] "), theme::key_hint()),
        ]);

        let block = Block::default()
            .title(title_line)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 40 || inner.height < 8 {
            // Minimal mode -- just show a summary line
            let summary = match self.stats {
                Some(ref s) => format!(
                    "Items: {} │ Searches: {}",
                    format::group_thousands(s.total_items),
                    format::group_thousands(s.active_searches)
                ),
                None => "no data".into(),
            };
            frame.render_widget(Paragraph::new(summary).style(theme::table_row()), inner);
            return;
        }

        let rows = Layout::vertical([
            Constraint::Length(4), // stat cards
            Constraint::Min(3),   // recent items
        ])
        .split(inner);

        self.render_stats(frame, rows[0]);
        self.render_items(frame, rows[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Dashboard"
    }
}
