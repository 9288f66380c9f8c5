//! Application core -- event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tui_input::{Input, InputRequest};

use mrs_core::{Command, CommandOutcome, CoreError, Monitor, UrlValidation, format};

use crate::action::{Action, Alert, ConfirmAction, ConfirmStep};
use crate::clipboard;
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::toast::ToastState;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// The backend monitor (pollers + command processor).
    monitor: Monitor,
    /// Transient alert banner.
    toast: ToastState,
    /// Pending confirmation dialog, if any.
    confirm: Option<ConfirmAction>,
    /// URL-test input overlay, if open. While open, the monitor's poll
    /// gate is set so a refresh never disrupts typing.
    url_input: Option<Input>,
    /// Label of the in-flight command; new commands are refused until it
    /// completes, and the status bar shows a spinner.
    busy: Option<&'static str>,
    throbber: throbber_widgets_tui::ThrobberState,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender -- components and tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver -- main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Create a new App with all screens.
    pub fn new(monitor: Monitor) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            monitor,
            toast: ToastState::new(),
            confirm: None,
            url_input: None,
            busy: None,
            throbber: throbber_widgets_tui::ThrobberState::default(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Background bridge: monitor pollers → action channel
        let bridge_cancel = CancellationToken::new();
        let bridge = tokio::spawn(data_bridge::run_data_bridge(
            self.monitor.clone(),
            self.action_tx.clone(),
            bridge_cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                let is_render = matches!(action, Action::Render);
                self.process_action(action)?;

                if is_render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        bridge_cancel.cancel();
        let _ = bridge.await; // the bridge stops the monitor on its way out
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Key handling ─────────────────────────────────────────────────

    /// Map a key event to an action. Overlays capture keys first; global
    /// keys next; anything else goes to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, whatever is on screen
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // URL input overlay captures everything while open
        if self.url_input.is_some() {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseUrlInput),
                KeyCode::Enter => self.submit_url_input(),
                _ => {
                    let request = input_request_for(key);
                    if let (Some(input), Some(request)) = (self.url_input.as_mut(), request) {
                        input.handle(request);
                    }
                    None
                }
            });
        }

        // Confirm dialog: only yes/no
        if self.confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            // Dashboard-wide actions
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Refresh)),
            (KeyModifiers::NONE, KeyCode::Char('u')) => {
                return Ok(Some(Action::OpenUrlInput { prefill: None }));
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                return Ok(Some(Action::RunCommand(Command::ForceScan)));
            }
            (KeyModifiers::NONE, KeyCode::Char('n')) => {
                return Ok(Some(Action::RunCommand(Command::TestNotification)));
            }
            (KeyModifiers::SHIFT, KeyCode::Char('C')) => {
                return Ok(Some(Action::ShowConfirm(ConfirmAction::ClearAllItems)));
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => return Ok(Some(Action::DismissAlert)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Submit the URL-test overlay. An empty URL warns and keeps the
    /// overlay open -- no request goes out.
    fn submit_url_input(&mut self) -> Option<Action> {
        let value = self
            .url_input
            .as_ref()
            .map(|input| input.value().trim().to_owned())
            .unwrap_or_default();

        if value.is_empty() {
            self.toast.show(Alert::warning("Enter a search URL first"));
            return None;
        }

        self.close_url_input();
        Some(Action::RunCommand(Command::TestSearchUrl { url: value }))
    }

    fn close_url_input(&mut self) {
        self.url_input = None;
        self.monitor.set_input_active(false);
    }

    // ── Action processing ────────────────────────────────────────────

    /// Process a single action -- update app state and propagate to components.
    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (w, h);
            }

            Action::SwitchScreen(target) => {
                if target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                self.toast.tick(Instant::now());
                if self.busy.is_some() {
                    self.throbber.calc_next();
                }
            }

            // Render is handled in the main loop, not here
            Action::Render => {}

            // ── Alerts ────────────────────────────────────────────
            Action::ShowAlert(alert) => {
                self.toast.show(alert);
            }
            Action::DismissAlert => {
                self.toast.dismiss();
            }

            // ── Confirm dialog ────────────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.confirm = Some(confirm);
            }
            Action::ConfirmYes => {
                if let Some(confirm) = self.confirm.take() {
                    match confirm.advance() {
                        ConfirmStep::Run(cmd) => {
                            self.action_tx.send(Action::RunCommand(cmd))?;
                        }
                        ConfirmStep::Ask(next) => {
                            self.confirm = Some(next);
                        }
                    }
                }
            }
            Action::ConfirmNo => {
                // Declined: abort with no request
                self.confirm = None;
            }

            // ── URL input overlay ─────────────────────────────────
            Action::OpenUrlInput { prefill } => {
                self.url_input = Some(Input::new(prefill.unwrap_or_default()));
                self.monitor.set_input_active(true);
            }
            Action::CloseUrlInput => {
                self.close_url_input();
            }

            // ── Clipboard ─────────────────────────────────────────
            Action::CopyToClipboard(text) => match clipboard::copy(&text) {
                Ok(()) => self.toast.show(Alert::success("Copied to clipboard")),
                Err(e) => self.toast.show(Alert::danger(format!("Clipboard error: {e}"))),
            },

            // ── Commands ──────────────────────────────────────────
            Action::RunCommand(cmd) => {
                self.run_command(cmd);
            }
            Action::CommandFinished => {
                self.busy = None;
            }
            Action::Refresh => {
                let monitor = self.monitor.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = monitor.refresh_now().await {
                        let _ = tx.send(Action::ShowAlert(Alert::danger(e.to_string())));
                    }
                });
            }

            // Data snapshots reach every screen, not just the active one
            other => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(&other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Dispatch a one-shot command on a background task.
    ///
    /// While one is in flight, further commands are refused -- the busy
    /// state is always cleared on completion, success or failure.
    fn run_command(&mut self, cmd: Command) {
        if self.busy.is_some() {
            self.toast.show(Alert::info("Another action is still running"));
            return;
        }

        self.busy = Some(cmd.describe());

        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = monitor.execute(cmd).await;
            for alert in outcome_alerts(result) {
                let _ = tx.send(Action::ShowAlert(alert));
            }
            let _ = tx.send(Action::CommandFinished);
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let content_area = layout[0];
        let tab_area = layout[1];
        let status_area = layout[2];

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, top-most last
        self.render_toast(frame, content_area);
        if let Some(ref confirm) = self.confirm {
            render_confirm_overlay(frame, area, confirm);
        }
        if self.url_input.is_some() {
            self.render_url_input(frame, area);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    /// Render the transient alert banner at the top of the content area.
    fn render_toast(&self, frame: &mut Frame, content_area: Rect) {
        if content_area.height < 3 || content_area.width < 4 {
            return;
        }
        let Some(alert) = self.toast.current() else {
            return;
        };

        let style = if self.toast.is_fading(Instant::now()) {
            theme::alert_style_fading(alert.level)
        } else {
            theme::alert_style(alert.level)
        };

        let banner_area = Rect {
            x: content_area.x + 1,
            y: content_area.y + 1,
            width: content_area.width.saturating_sub(2),
            height: 1,
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", theme::alert_prefix(alert.level)), style),
            Span::styled(format::sanitize_text(&alert.message), style),
            Span::styled("  (x to dismiss)", theme::key_hint()),
        ]);

        frame.render_widget(Clear, banner_area);
        frame.render_widget(Paragraph::new(line).style(ratatui::style::Style::default().bg(theme::BG_HIGHLIGHT)), banner_area);
    }

    /// Render the bottom tab bar.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with the backend URL, busy spinner,
    /// and key hints.
    fn render_status_bar(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(label) = self.busy {
            let columns =
                Layout::horizontal([Constraint::Length(30), Constraint::Min(10)]).split(area);

            let throbber = throbber_widgets_tui::Throbber::default()
                .label(label)
                .style(theme::key_hint())
                .throbber_style(theme::title_style());
            frame.render_stateful_widget(throbber, columns[0], &mut self.throbber);

            frame.render_widget(
                Paragraph::new(Span::styled(hints_text(), theme::key_hint())),
                columns[1],
            );
            return;
        }

        let server = self.monitor.config().server_url.as_str().to_owned();
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(server, theme::tab_inactive()),
            Span::styled(hints_text(), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the URL-test input overlay.
    fn render_url_input(&self, frame: &mut Frame, area: Rect) {
        let Some(ref input) = self.url_input else {
            return;
        };

        let popup = centered_rect(area, 70, 5);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Test Search URL ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let width = rows[0].width.saturating_sub(1) as usize;
        let scroll = input.visual_scroll(width);
        frame.render_widget(
            Paragraph::new(input.value())
                .style(theme::table_row())
                .scroll((0, u16::try_from(scroll).unwrap_or(0))),
            rows[0],
        );

        let cursor_x = input.visual_cursor().saturating_sub(scroll);
        frame.set_cursor_position((
            rows[0].x + u16::try_from(cursor_x).unwrap_or(0),
            rows[0].y,
        ));

        frame.render_widget(
            Paragraph::new(Span::styled(
                "⏎ test · esc close",
                theme::key_hint(),
            )),
            rows[2],
        );
    }
}

/// Key hints shown in the status bar.
fn hints_text() -> &'static str {
    " │ s scan  u test url  n notify  r refresh  ? help  q quit"
}

/// Translate a key press into an edit request for the URL input.
fn input_request_for(key: KeyEvent) -> Option<InputRequest> {
    match key.code {
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

/// Derive the alert sequence for a completed command.
///
/// The banner is single-slot, so when several alerts are produced the
/// last one ends up visible -- matching the original dashboard, which
/// removed the existing alert before inserting each new one.
fn outcome_alerts(result: Result<CommandOutcome, CoreError>) -> Vec<Alert> {
    match result {
        Ok(CommandOutcome::UrlTested(UrlValidation::Valid {
            items_found,
            sample_titles,
            test_error,
        })) => {
            let mut alerts = vec![Alert::success(format!(
                "Valid URL! Found {items_found} items"
            ))];
            if !sample_titles.is_empty() {
                let titles: Vec<String> =
                    sample_titles.iter().map(|t| format::sanitize_text(t)).collect();
                alerts.push(Alert::info(format!("Sample titles: {}", titles.join(", "))));
            }
            if let Some(warning) = test_error {
                alerts.push(Alert::warning(format::sanitize_text(&warning)));
            }
            alerts
        }

        Ok(CommandOutcome::UrlTested(UrlValidation::Invalid { error, test_error })) => {
            let mut alerts = vec![Alert::danger(
                error
                    .map(|e| format::sanitize_text(&e))
                    .unwrap_or_else(|| "The backend rejected this URL".into()),
            )];
            if let Some(warning) = test_error {
                alerts.push(Alert::warning(format::sanitize_text(&warning)));
            }
            alerts
        }

        Ok(CommandOutcome::ScanFinished { new_items }) => vec![Alert::success(format!(
            "Scan complete! {new_items} new items found"
        ))],

        Ok(CommandOutcome::NotificationSent) => vec![Alert::success("Test notification sent")],

        Ok(CommandOutcome::QueryDeleted) => vec![Alert::success("Query deleted")],

        Ok(CommandOutcome::QueryToggled) => vec![Alert::success("Query toggled")],

        Ok(CommandOutcome::ItemsCleared { message }) => {
            vec![Alert::success(format::sanitize_text(&message))]
        }

        // The empty-URL precondition surfaces as a warning, not an error
        Err(CoreError::ValidationFailed { message }) => vec![Alert::warning(message)],

        Err(e) => vec![Alert::danger(e.to_string())],
    }
}

/// A centered rect of the given width/height, clamped to the area.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

/// Render the confirmation dialog centered on screen.
fn render_confirm_overlay(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let popup = centered_rect(area, 64, 6);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());

    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {confirm}"), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", theme::key_hint_key()),
            Span::styled("confirm   ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: false }), inner);
}

/// Render the help overlay centered on screen.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 52, 16);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());

    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let entry = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        entry("1/2 Tab", "Switch screen"),
        entry("j/k ↑/↓", "Move selection"),
        entry("r", "Refresh data now"),
        entry("s", "Force a scan"),
        entry("u", "Test a search URL"),
        entry("n", "Send a test notification"),
        entry("t / d", "Toggle / delete selected query"),
        entry("y", "Copy selected query URL"),
        entry("Shift+C", "Clear all items"),
        entry("x", "Dismiss alert"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "                    Esc or ? to close",
            theme::key_hint(),
        )),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_url_outcome_yields_success_then_samples() {
        let alerts = outcome_alerts(Ok(CommandOutcome::UrlTested(UrlValidation::Valid {
            items_found: 12,
            sample_titles: vec!["Card A".into(), "Card B".into()],
            test_error: None,
        })));

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].level, crate::action::AlertLevel::Success);
        assert!(alerts[0].message.contains("12"));
        assert_eq!(alerts[1].level, crate::action::AlertLevel::Info);
        assert!(alerts[1].message.contains("Card A, Card B"));
    }

    #[test]
    fn test_error_is_warned_even_when_valid() {
        let alerts = outcome_alerts(Ok(CommandOutcome::UrlTested(UrlValidation::Valid {
            items_found: 0,
            sample_titles: vec![],
            test_error: Some("fetch timed out".into()),
        })));

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].level, crate::action::AlertLevel::Warning);
    }

    #[test]
    fn invalid_url_outcome_is_danger_with_server_text() {
        let alerts = outcome_alerts(Ok(CommandOutcome::UrlTested(UrlValidation::Invalid {
            error: Some("not a Mercari search URL".into()),
            test_error: None,
        })));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, crate::action::AlertLevel::Danger);
        assert_eq!(alerts[0].message, "not a Mercari search URL");
    }

    #[test]
    fn validation_failure_is_a_warning() {
        let alerts = outcome_alerts(Err(CoreError::ValidationFailed {
            message: "search URL must not be empty".into(),
        }));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, crate::action::AlertLevel::Warning);
    }

    #[test]
    fn hostile_server_text_is_sanitized() {
        let alerts = outcome_alerts(Ok(CommandOutcome::ItemsCleared {
            message: "Deleted\x1b[2J everything".into(),
        }));

        assert!(!alerts[0].message.chars().any(char::is_control));
    }
}
