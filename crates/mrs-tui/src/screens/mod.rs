//! Screen components, keyed by [`ScreenId`].

pub mod dashboard;
pub mod searches;

use crate::component::Component;
use crate::screen::ScreenId;

/// Construct every screen component in tab-bar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()) as Box<dyn Component>,
        ),
        (
            ScreenId::Searches,
            Box::new(searches::SearchesScreen::new()) as Box<dyn Component>,
        ),
    ]
}
