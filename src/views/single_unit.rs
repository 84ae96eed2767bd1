use serde::{Deserialize, Serialize};

use crate::fleet::TrackedUnit;

use super::{format_location, indicator_color, local_clock, MapView, Marker, UnitCard};

const UNIT_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Kid {
    pub name: String,
    pub grade: String,
    pub roll_no: u32,
    pub stop: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DriverProfile {
    pub contact: String,
    pub license_id: String,
    pub experience_years: u32,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Who the parent screen is about: which bus, which kids, which driver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParentProfile {
    pub unit_id: u32,
    #[serde(default)]
    pub kids: Vec<Kid>,
    pub driver: DriverProfile,
}

impl Default for ParentProfile {
    fn default() -> Self {
        Self {
            unit_id: 1,
            kids: vec![
                Kid {
                    name: "Emma Smith".into(),
                    grade: "3rd".into(),
                    roll_no: 25,
                    stop: "Elm Street Corner".into(),
                },
                Kid {
                    name: "Liam Smith".into(),
                    grade: "1st".into(),
                    roll_no: 12,
                    stop: "Elm Street Corner".into(),
                },
            ],
            driver: DriverProfile {
                contact: "+1 (555) 123-4567".into(),
                license_id: "D-7845120".into(),
                experience_years: 8,
                photo_url: Some("https://randomuser.me/api/portraits/men/75.jpg".into()),
            },
        }
    }
}

/// Parent and driver screen: one bus, followed by the map.
#[derive(Debug, Clone)]
pub struct SingleUnitView {
    pub title: String,
    pub profile: ParentProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitPanel {
    pub title: String,
    pub map: MapView,
    pub card: UnitCard,
    pub indicator: &'static str,
    pub kids: Vec<Kid>,
    pub driver_name: String,
    pub driver: DriverProfile,
}

impl SingleUnitView {
    pub fn new(title: impl Into<String>, profile: ParentProfile) -> Self {
        Self {
            title: title.into(),
            profile,
        }
    }

    pub fn unit_id(&self) -> u32 {
        self.profile.unit_id
    }

    /// Builds the panel for the followed bus, or `None` if it is not in `units`.
    /// The map is re-centered on the bus every time.
    pub fn panel(&self, units: &[TrackedUnit]) -> Option<UnitPanel> {
        let unit = units.iter().find(|u| u.id == self.profile.unit_id)?;

        Some(UnitPanel {
            title: self.title.clone(),
            map: MapView {
                center: unit.position,
                zoom: UNIT_ZOOM,
                markers: vec![Marker {
                    id: unit.id,
                    position: unit.position,
                    popup: vec![
                        format!("School Bus #{}", unit.id),
                        format!("Location: {}", format_location(unit.position)),
                        format!("Last updated: {}", local_clock(unit.last_update)),
                    ],
                }],
            },
            card: UnitCard::from_unit(unit),
            indicator: indicator_color(unit.status),
            kids: self.profile.kids.clone(),
            driver_name: unit.driver.clone(),
            driver: self.profile.driver.clone(),
        })
    }
}
