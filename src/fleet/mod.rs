mod error;
mod feed;
pub(crate) mod random;
pub mod simulator;
mod types;
mod walk;

pub use error::SimulatorError;
pub use feed::{FleetFeed, FleetSnapshot};
pub use random::{Entropy, RandomSource};
pub use simulator::CancelHandle;
pub use types::{default_fleet, Position, TrackedUnit, UnitSeed, UnitStatus};
