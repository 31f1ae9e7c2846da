pub mod config;
pub mod current;
pub mod error;
pub mod output;
pub mod plot;
pub mod timebase;
pub mod voltage;

pub use config::{CurrentConfig, VoltageConfig};
pub use error::{Result, WaveformError};
