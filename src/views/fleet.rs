use serde::Serialize;

use crate::fleet::{Position, TrackedUnit};

use super::{local_clock, MapView, Marker, UnitCard};

const FLEET_CENTER: Position = Position::new(40.7128, -74.006);
const FLEET_ZOOM: u8 = 13;

/// Admin screen: every bus on one map, plus a status card per bus.
#[derive(Debug, Clone)]
pub struct FleetView {
    pub center: Position,
    pub zoom: u8,
}

impl Default for FleetView {
    fn default() -> Self {
        Self {
            center: FLEET_CENTER,
            zoom: FLEET_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetPanel {
    pub map: MapView,
    pub cards: Vec<UnitCard>,
}

impl FleetView {
    pub fn panel(&self, units: &[TrackedUnit]) -> FleetPanel {
        let markers = units
            .iter()
            .map(|unit| Marker {
                id: unit.id,
                position: unit.position,
                popup: vec![
                    format!("Bus #{}", unit.id),
                    format!("Driver: {}", unit.driver),
                    format!("Status: {}", unit.status),
                    format!("Route: {}", unit.route),
                    format!("Last updated: {}", local_clock(unit.last_update)),
                ],
            })
            .collect();

        FleetPanel {
            map: MapView {
                center: self.center,
                zoom: self.zoom,
                markers,
            },
            cards: units.iter().map(UnitCard::from_unit).collect(),
        }
    }
}
