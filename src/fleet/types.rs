use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Position in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses a `"lat, lng"` pair.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lng: f64 = parts[1].parse().ok()?;
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self { lat, lng })
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Position::from_coordinates(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid coordinates: {s}")))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[strum(serialize = "On Route")]
    OnRoute,
    #[strum(serialize = "At Stop")]
    AtStop,
    #[strum(serialize = "Delayed")]
    Delayed,
    #[strum(serialize = "Arriving Soon")]
    ArrivingSoon,
}

impl UnitStatus {
    /// Pick order for random status draws.
    pub const ALL: [UnitStatus; 4] = [
        UnitStatus::OnRoute,
        UnitStatus::AtStop,
        UnitStatus::Delayed,
        UnitStatus::ArrivingSoon,
    ];
}

/// Position and status record for one simulated bus.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackedUnit {
    pub id: u32,
    pub driver: String,
    pub phone: String,
    pub position: Position,
    pub status: UnitStatus,
    pub route: String,
    pub last_update: DateTime<Utc>,
}

/// Seed data for a unit, as found in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnitSeed {
    pub id: u32,
    pub driver: String,
    pub phone: String,
    pub position: Position,
    #[serde(default = "default_status")]
    pub status: UnitStatus,
    pub route: String,
}

fn default_status() -> UnitStatus {
    UnitStatus::OnRoute
}

impl UnitSeed {
    pub fn into_unit(self, now: DateTime<Utc>) -> TrackedUnit {
        TrackedUnit {
            id: self.id,
            driver: self.driver,
            phone: self.phone,
            position: self.position,
            status: self.status,
            route: self.route,
            last_update: now,
        }
    }
}

/// The three buses every screen starts from when no fleet is configured.
pub fn default_fleet() -> Vec<UnitSeed> {
    vec![
        UnitSeed {
            id: 1,
            driver: "John Doe".into(),
            phone: "555-0123".into(),
            position: Position::new(40.7128, -74.006),
            status: UnitStatus::OnRoute,
            route: "Morning Route A".into(),
        },
        UnitSeed {
            id: 2,
            driver: "Jane Smith".into(),
            phone: "555-0124".into(),
            position: Position::new(40.7148, -74.0068),
            status: UnitStatus::AtStop,
            route: "Morning Route B".into(),
        },
        UnitSeed {
            id: 3,
            driver: "Mike Johnson".into(),
            phone: "555-0125".into(),
            position: Position::new(40.7138, -74.005),
            status: UnitStatus::Delayed,
            route: "Morning Route C".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_position_from_coordinates() {
        let pos = Position::from_coordinates(" 40.7128 , -74.0060").unwrap();
        assert!((pos.lat - 40.7128).abs() < 1e-9);
        assert!((pos.lng + 74.006).abs() < 1e-9);

        assert!(Position::from_coordinates("40.7128").is_none());
        assert!(Position::from_coordinates("40.7128, -74.0, 3").is_none());
        assert!(Position::from_coordinates("north, west").is_none());
        assert!(Position::from_coordinates("NaN, 1.0").is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(UnitStatus::OnRoute.to_string(), "On Route");
        assert_eq!(UnitStatus::ArrivingSoon.to_string(), "Arriving Soon");
        let parsed: UnitStatus = serde_yaml::from_str("at_stop").unwrap();
        assert_eq!(parsed, UnitStatus::AtStop);
    }

    #[test]
    fn test_seed_from_yaml() {
        let yaml = r#"
id: 7
driver: Ann Lee
phone: 555-0199
position: "40.70, -74.01"
route: Afternoon Route D
"#;
        let seed: UnitSeed = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.id, 7);
        assert_eq!(seed.status, UnitStatus::OnRoute);
        assert_eq!(seed.position, Position::new(40.70, -74.01));

        let bad = yaml.replace("\"40.70, -74.01\"", "somewhere");
        assert!(serde_yaml::from_str::<UnitSeed>(&bad).is_err());
    }

    #[test]
    fn test_default_fleet_ids_unique() {
        let fleet = default_fleet();
        let ids: HashSet<_> = fleet.iter().map(|s| s.id).collect();
        assert_eq!(fleet.len(), 3);
        assert_eq!(ids.len(), fleet.len());
    }
}
