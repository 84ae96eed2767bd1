use chrono::Utc;
use std::sync::Arc;

use crate::fleet::{Entropy, FleetFeed, SimulatorError};
use crate::views::{FleetView, SingleUnitView};

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FleetFeed>,
    pub fleet_view: Arc<FleetView>,
    pub parent_view: Arc<SingleUnitView>,
    pub driver_view: Arc<SingleUnitView>,
}

impl AppState {
    /// Starts the shared feed from the configured fleet. Needs a tokio runtime.
    pub fn new(config: Config) -> Result<Self, SimulatorError> {
        let now = Utc::now();
        let units = config
            .fleet
            .iter()
            .cloned()
            .map(|seed| seed.into_unit(now))
            .collect();
        let feed = FleetFeed::start(
            units,
            config.simulation.interval,
            Entropy::from_seed(config.simulation.seed),
        )?;

        let parent_view = SingleUnitView::new("School Bus Tracker", config.parent.clone());
        let driver_view = SingleUnitView::new("Driver Dashboard", config.parent.clone());

        Ok(Self {
            feed: Arc::new(feed),
            fleet_view: Arc::new(FleetView::default()),
            parent_view: Arc::new(parent_view),
            driver_view: Arc::new(driver_view),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_views_follow_configured_parent_unit() {
        let mut config = Config::default();
        config.parent.unit_id = 2;
        let state = AppState::new(config).unwrap();

        assert_eq!(state.parent_view.unit_id(), 2);
        assert_eq!(state.driver_view.unit_id(), 2);
        let panel = state.parent_view.panel(&state.feed.snapshot().units).unwrap();
        assert_eq!(panel.card.driver, "Jane Smith");

        state.feed.stop().await;
    }
}
