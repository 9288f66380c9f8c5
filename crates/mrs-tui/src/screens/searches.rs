//! Searches screen -- saved query table with toggle/delete/test actions.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use mrs_core::format;
use mrs_core::{Command, SearchQuery};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;

/// Searches screen state.
pub struct SearchesScreen {
    focused: bool,
    queries: Arc<Vec<SearchQuery>>,
    selected: usize,
}

impl SearchesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            queries: Arc::new(Vec::new()),
            selected: 0,
        }
    }

    fn selected_query(&self) -> Option<&SearchQuery> {
        self.queries.get(self.selected)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.queries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.queries.len() - 1;
        let next = self.selected.saturating_add_signed(delta);
        self.selected = next.min(last);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["ID", "Name", "On", "URL"]).style(theme::table_header());

        let rows: Vec<Row> = self
            .queries
            .iter()
            .map(|q| {
                Row::new(vec![
                    Cell::from(q.id.to_string()),
                    Cell::from(format::sanitize_text(&q.name)),
                    Cell::from(if q.enabled { "●" } else { "○" }),
                    Cell::from(format::truncate_title(&q.url)),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(20),
                Constraint::Length(3),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());

        let mut state = TableState::default();
        state.select(if self.queries.is_empty() {
            None
        } else {
            Some(self.selected)
        });

        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for SearchesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Ok(None)
            }
            KeyCode::Char('G') => {
                self.selected = self.queries.len().saturating_sub(1);
                Ok(None)
            }

            // Toggle the selected query
            KeyCode::Char('t') => Ok(self
                .selected_query()
                .map(|q| Action::RunCommand(Command::ToggleQuery { id: q.id }))),

            // Delete the selected query (with confirmation)
            KeyCode::Char('d') => Ok(self.selected_query().map(|q| {
                Action::ShowConfirm(ConfirmAction::DeleteQuery {
                    id: q.id,
                    name: q.name.clone(),
                })
            })),

            // Copy the selected query URL
            KeyCode::Char('y') => Ok(self
                .selected_query()
                .map(|q| Action::CopyToClipboard(q.url.clone()))),

            // Test the selected query URL (prefilled input overlay)
            KeyCode::Enter => Ok(Some(Action::OpenUrlInput {
                prefill: self.selected_query().map(|q| q.url.clone()),
            })),

            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::QueriesUpdated(queries) = action {
            self.queries = Arc::clone(queries);
            if self.selected >= self.queries.len() {
                self.selected = self.queries.len().saturating_sub(1);
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title_line = Line::from(vec![
            Span::styled(" Saved Searches ", theme::title_style()),
            Span::styled(format!(" {} ", self.queries.len()), theme::key_hint()),
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

        let rows = Layout::vertical([
            Constraint::Min(2),   // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        if self.queries.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No saved searches yet",
                    theme::key_hint(),
                )),
                rows[0],
            );
        } else {
            self.render_table(frame, rows[0]);
        }

        let hints = Line::from(vec![
            Span::styled(" t ", theme::key_hint_key()),
            Span::styled("toggle  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("⏎ ", theme::key_hint_key()),
            Span::styled("test url  ", theme::key_hint()),
            Span::styled("y ", theme::key_hint_key()),
            Span::styled("copy url", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Searches"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: i64, name: &str) -> SearchQuery {
        SearchQuery {
            id,
            name: name.into(),
            url: format!("https://jp.mercari.com/search?keyword={name}"),
            enabled: true,
            created_at: None,
        }
    }

    #[test]
    fn selection_clamps_to_shrunken_list() {
        let mut screen = SearchesScreen::new();
        screen
            .update(&Action::QueriesUpdated(Arc::new(vec![
                query(1, "a"),
                query(2, "b"),
                query(3, "c"),
            ])))
            .expect("update");
        screen.selected = 2;

        screen
            .update(&Action::QueriesUpdated(Arc::new(vec![query(1, "a")])))
            .expect("update");
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn delete_key_asks_for_confirmation() {
        let mut screen = SearchesScreen::new();
        screen
            .update(&Action::QueriesUpdated(Arc::new(vec![query(5, "gundam")])))
            .expect("update");

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('d')))
            .expect("key")
            .expect("action");
        assert!(matches!(
            action,
            Action::ShowConfirm(ConfirmAction::DeleteQuery { id: 5, .. })
        ));
    }

    #[test]
    fn action_keys_are_inert_with_no_queries() {
        let mut screen = SearchesScreen::new();
        let toggled = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('t')))
            .expect("key");
        assert!(toggled.is_none());

        let deleted = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('d')))
            .expect("key");
        assert!(deleted.is_none());
    }
}
