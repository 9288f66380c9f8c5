//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::action::AlertLevel;

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRAND_RED: Color = Color::Rgb(255, 56, 92); // #ff385c
pub const SUCCESS_GREEN: Color = Color::Rgb(82, 196, 26); // #52c41a
pub const WARNING_AMBER: Color = Color::Rgb(250, 173, 20); // #faad14
pub const DANGER_RED: Color = Color::Rgb(245, 34, 45); // #f5222d
pub const INFO_BLUE: Color = Color::Rgb(64, 169, 255); // #40a9ff

// ── Extended Palette ──────────────────────────────────────────────────

pub const FG_LIGHT: Color = Color::Rgb(212, 212, 216); // #d4d4d8
pub const DIM_GRAY: Color = Color::Rgb(140, 140, 148); // #8c8c94
pub const BORDER_GRAY: Color = Color::Rgb(82, 82, 92); // #52525c
pub const BG_HIGHLIGHT: Color = Color::Rgb(39, 39, 46); // #27272e
pub const BG_DARK: Color = Color::Rgb(24, 24, 28); // #18181c

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(BRAND_RED)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(FG_LIGHT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FG_LIGHT)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(BRAND_RED)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Big stat-card value.
pub fn stat_value() -> Style {
    Style::default().fg(FG_LIGHT).add_modifier(Modifier::BOLD)
}

/// Stat-card value during the brief change highlight.
pub fn stat_value_changed() -> Style {
    Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD)
}

/// Stat-card label.
pub fn stat_label() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Search-name badge on an item card.
pub fn badge() -> Style {
    Style::default().fg(INFO_BLUE)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(FG_LIGHT).add_modifier(Modifier::BOLD)
}

// ── Alerts ────────────────────────────────────────────────────────────

/// Banner style for an alert severity.
pub fn alert_style(level: AlertLevel) -> Style {
    let fg = match level {
        AlertLevel::Success => SUCCESS_GREEN,
        AlertLevel::Info => INFO_BLUE,
        AlertLevel::Warning => WARNING_AMBER,
        AlertLevel::Danger => DANGER_RED,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Dimmed banner style for the fade-out window before removal.
pub fn alert_style_fading(level: AlertLevel) -> Style {
    alert_style(level).add_modifier(Modifier::DIM)
}

/// Leading glyph for an alert severity.
pub fn alert_prefix(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Success => "✓",
        AlertLevel::Info => "i",
        AlertLevel::Warning => "!",
        AlertLevel::Danger => "✗",
    }
}
