use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use super::error::SimulatorError;
use super::random::RandomSource;
use super::simulator::{self, CancelHandle};
use super::types::TrackedUnit;

/// Latest state of every unit in a feed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FleetSnapshot {
    /// Number of ticks delivered so far; 0 means seed data.
    pub tick: u64,
    pub interval_ms: u64,
    pub started_at: DateTime<Utc>,
    pub units: Vec<TrackedUnit>,
}

#[derive(Debug)]
struct Shared {
    snapshot: FleetSnapshot,
}

/// A single simulator shared by every observer, addressed by unit id.
///
/// All views read from the same snapshot, so two pages showing the same bus
/// agree on where it is.
pub struct FleetFeed {
    shared: Arc<StdMutex<Shared>>,
    handle: Mutex<CancelHandle>,
}

impl FleetFeed {
    pub fn start<R>(
        units: Vec<TrackedUnit>,
        interval: Duration,
        random: R,
    ) -> Result<Self, SimulatorError>
    where
        R: RandomSource + 'static,
    {
        let shared = Arc::new(StdMutex::new(Shared {
            snapshot: FleetSnapshot {
                tick: 0,
                interval_ms: interval.as_millis() as u64,
                started_at: Utc::now(),
                units: units.clone(),
            },
        }));

        let count = units.len();
        let sink = shared.clone();
        let handle = simulator::start(units, interval, random, move |units| {
            let mut locked = sink.lock().unwrap_or_else(PoisonError::into_inner);
            locked.snapshot.tick += 1;
            locked.snapshot.units = units.to_vec();
        })?;

        log::info!(
            "Fleet feed started ({} units, every {})",
            count,
            humantime::format_duration(interval)
        );
        log::debug!("Positions are not clamped to any route; long sessions drift freely");

        Ok(Self {
            shared,
            handle: Mutex::new(handle),
        })
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    pub fn unit(&self, id: u32) -> Option<TrackedUnit> {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .units
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Stops the underlying simulator; the last snapshot stays readable.
    pub async fn stop(&self) {
        self.handle.lock().await.stop().await;
        log::info!("Fleet feed stopped");
    }
}
