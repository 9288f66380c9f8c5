//! Single-slot auto-dismiss alert banner.
//!
//! Contract: at most one auto-dismiss alert is visible at a time -- showing
//! a new alert replaces the current one before insertion. An alert removes
//! itself 5 seconds after being shown, rendering dimmed for its final
//! 150 ms.

use std::time::{Duration, Instant};

use crate::action::Alert;

/// How long an alert stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Dim window at the end of the lifetime.
pub const TOAST_FADE: Duration = Duration::from_millis(150);

struct ActiveToast {
    alert: Alert,
    shown_at: Instant,
}

/// State for the transient alert banner.
#[derive(Default)]
pub struct ToastState {
    current: Option<ActiveToast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an alert, replacing any currently displayed one.
    pub fn show(&mut self, alert: Alert) {
        self.current = Some(ActiveToast {
            alert,
            shown_at: Instant::now(),
        });
    }

    /// Remove the current alert immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Expire the current alert once its lifetime has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(ref toast) = self.current {
            if now.duration_since(toast.shown_at) >= TOAST_LIFETIME {
                self.current = None;
            }
        }
    }

    /// The currently visible alert, if any.
    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref().map(|t| &t.alert)
    }

    /// Whether the current alert is inside its fade-out window.
    pub fn is_fading(&self, now: Instant) -> bool {
        self.current.as_ref().is_some_and(|t| {
            let age = now.duration_since(t.shown_at);
            age >= TOAST_LIFETIME.saturating_sub(TOAST_FADE) && age < TOAST_LIFETIME
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::{Alert, AlertLevel};

    #[test]
    fn showing_twice_leaves_exactly_one_alert() {
        let mut state = ToastState::new();
        state.show(Alert::success("first"));
        state.show(Alert::info("second"));

        let visible = state.current().unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.level, AlertLevel::Info);
    }

    #[test]
    fn alert_expires_after_lifetime() {
        let start = Instant::now();
        let mut state = ToastState::new();
        state.show(Alert::warning("soon gone"));

        state.tick(start + TOAST_LIFETIME - Duration::from_millis(1));
        assert!(state.current().is_some());

        state.tick(start + TOAST_LIFETIME + Duration::from_millis(10));
        assert!(state.current().is_none());
    }

    #[test]
    fn alert_fades_in_final_window() {
        let start = Instant::now();
        let mut state = ToastState::new();
        state.show(Alert::danger("fading"));

        assert!(!state.is_fading(start + Duration::from_secs(1)));
        assert!(state.is_fading(start + TOAST_LIFETIME - Duration::from_millis(50)));
    }

    #[test]
    fn dismiss_removes_immediately() {
        let mut state = ToastState::new();
        state.show(Alert::info("bye"));
        state.dismiss();
        assert!(state.current().is_none());
    }
}
