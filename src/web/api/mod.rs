pub mod error;
pub mod fleet;
pub mod session;
