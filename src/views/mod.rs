//! Presentation of fleet state: view models for the admin fleet screen and the
//! single-bus screen, plus the mount/unmount lifecycle that ties a screen to a
//! simulator.

mod fleet;
mod mount;
mod single_unit;
mod terminal;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::fleet::{Position, TrackedUnit, UnitStatus};

pub use fleet::{FleetPanel, FleetView};
pub use mount::{mount, Mounted, Screen};
pub use single_unit::{ParentProfile, SingleUnitView, UnitPanel};
pub use terminal::TerminalScreen;

/// What the map widget needs: where to look and what to pin.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: Position,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub id: u32,
    pub position: Position,
    pub popup: Vec<String>,
}

/// One bus, formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct UnitCard {
    pub id: u32,
    pub driver: String,
    pub phone: String,
    pub route: String,
    pub status: String,
    pub color: &'static str,
    pub updated: String,
    pub location: String,
}

impl UnitCard {
    pub fn from_unit(unit: &TrackedUnit) -> Self {
        Self {
            id: unit.id,
            driver: unit.driver.clone(),
            phone: unit.phone.clone(),
            route: unit.route.clone(),
            status: unit.status.to_string(),
            color: status_color(unit.status),
            updated: local_clock(unit.last_update),
            location: format_location(unit.position),
        }
    }
}

/// Fleet palette.
pub fn status_color(status: UnitStatus) -> &'static str {
    match status {
        UnitStatus::OnRoute => "green",
        UnitStatus::AtStop => "yellow",
        UnitStatus::Delayed => "red",
        UnitStatus::ArrivingSoon => "blue",
    }
}

/// Single-bus indicator: green only while on route.
pub fn indicator_color(status: UnitStatus) -> &'static str {
    match status {
        UnitStatus::OnRoute => "green",
        _ => "yellow",
    }
}

/// Wall-clock time in the local zone, e.g. `3:04:05 PM`.
pub fn local_clock(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-I:%M:%S %p")
        .to_string()
}

pub fn format_location(position: Position) -> String {
    format!("{:.4}, {:.4}", position.lat, position.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_palettes() {
        assert_eq!(status_color(UnitStatus::OnRoute), "green");
        assert_eq!(status_color(UnitStatus::AtStop), "yellow");
        assert_eq!(status_color(UnitStatus::Delayed), "red");
        assert_eq!(status_color(UnitStatus::ArrivingSoon), "blue");

        assert_eq!(indicator_color(UnitStatus::OnRoute), "green");
        assert_eq!(indicator_color(UnitStatus::Delayed), "yellow");
    }

    #[test]
    fn test_local_clock_shape() {
        let clock = local_clock(Utc::now());
        assert!(clock.ends_with("AM") || clock.ends_with("PM"), "{clock}");
        assert_eq!(clock.matches(':').count(), 2);
    }

    #[test]
    fn test_format_location() {
        assert_eq!(
            format_location(Position::new(40.71284, -74.00598)),
            "40.7128, -74.0060"
        );
    }
}
