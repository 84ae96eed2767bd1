use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use crate::fleet::{simulator, CancelHandle, RandomSource, SimulatorError, TrackedUnit};

/// Something that redraws itself from the current fleet state.
pub trait Screen: Send + 'static {
    fn render(&mut self, units: &[TrackedUnit]);
}

/// A screen bound to its own simulator for as long as it is mounted.
pub struct Mounted {
    handle: CancelHandle,
}

impl Mounted {
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Stops the simulator; the screen receives no further renders.
    pub async fn unmount(mut self) {
        self.handle.stop().await;
    }
}

/// Renders `screen` from the seed data, then again after every tick until the
/// returned guard is unmounted or dropped.
pub fn mount<S, R>(
    screen: S,
    units: Vec<TrackedUnit>,
    interval: Duration,
    random: R,
) -> Result<Mounted, SimulatorError>
where
    S: Screen,
    R: RandomSource + 'static,
{
    let screen = Arc::new(StdMutex::new(screen));
    // Held until the first render is done so no tick can overtake it.
    let mut first = screen.lock().unwrap_or_else(PoisonError::into_inner);

    let sink = screen.clone();
    let handle = simulator::start(units.clone(), interval, random, move |units| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(units);
    })?;

    first.render(&units);
    drop(first);

    Ok(Mounted { handle })
}
