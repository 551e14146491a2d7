pub mod config;
pub mod controller;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{ConsentController, ConsentState};
