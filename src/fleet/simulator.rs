use chrono::Utc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::error::SimulatorError;
use super::random::RandomSource;
use super::types::TrackedUnit;
use super::walk::advance_all;

/// Owner's handle on a running simulator.
///
/// Dropping the handle stops the simulator as well; `stop` additionally waits
/// for an in-flight tick to finish.
#[derive(Debug)]
pub struct CancelHandle {
    worker: Option<WorkerHandle>,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<u64>,
}

impl CancelHandle {
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.join.is_finished())
    }

    /// Cancels the timer. Once this returns no further tick is delivered.
    /// Calling it again is a no-op.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            match worker.join.await {
                Ok(ticks) => log::debug!("Simulator stopped after {} ticks", ticks),
                Err(e) => log::warn!("Simulator task ended abnormally: {}", e),
            }
        }
    }
}

/// Starts a random-walk simulation over `units`.
///
/// The first tick fires one `interval` after the call. Every tick advances all
/// units and hands the full updated set to `on_tick`, which runs to completion
/// before the next tick is scheduled. Must be called within a tokio runtime.
pub fn start<R, F>(
    units: Vec<TrackedUnit>,
    interval: Duration,
    random: R,
    on_tick: F,
) -> Result<CancelHandle, SimulatorError>
where
    R: RandomSource + 'static,
    F: FnMut(&[TrackedUnit]) + Send + 'static,
{
    if units.is_empty() {
        return Err(SimulatorError::NoUnits);
    }
    if interval.is_zero() {
        return Err(SimulatorError::ZeroInterval);
    }

    log::debug!(
        "Starting simulator for {} units every {}",
        units.len(),
        humantime::format_duration(interval)
    );

    let (stop_tx, stop_rx) = oneshot::channel();
    let join = tokio::spawn(run_simulator_loop(units, interval, random, on_tick, stop_rx));

    Ok(CancelHandle {
        worker: Some(WorkerHandle { stop_tx, join }),
    })
}

async fn run_simulator_loop<R, F>(
    mut units: Vec<TrackedUnit>,
    interval: Duration,
    mut random: R,
    mut on_tick: F,
    mut stop_rx: oneshot::Receiver<()>,
) -> u64
where
    R: RandomSource,
    F: FnMut(&[TrackedUnit]),
{
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        // A dropped sender also resolves `stop_rx`, which ends the loop.
        let should_stop = tokio::select! {
            biased;
            _ = &mut stop_rx => true,
            _ = ticker.tick() => false,
        };
        if should_stop {
            return ticks;
        }

        units = advance_all(&units, &mut random, Utc::now());
        ticks += 1;
        log::trace!("Simulator tick {} ({} units)", ticks, units.len());
        on_tick(&units);
    }
}
