#![forbid(unsafe_code)]

pub mod access;
pub mod model;
pub mod time;

pub use access::{AccessGate, ConfigError, NotFoundError, UnitState};
pub use time::Clock;
