use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulatorError {
    #[error("simulator needs at least one unit")]
    NoUnits,
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}
