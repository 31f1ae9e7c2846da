use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("duty cycle {value} outside {range}")]
    DutyCycle { value: f64, range: &'static str },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    #[error("inductance must be nonzero")]
    ZeroInductance,

    #[error("at least 2 samples are needed to span a period, got {samples}")]
    TooFewSamples { samples: usize },

    #[error("{requested} samples requested, limit is {limit}")]
    TooManySamples { requested: f64, limit: usize },

    #[error("period count must be at least 1")]
    TooFewPeriods,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WaveformError>;

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WaveformError::NonFinite { name })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(WaveformError::NonPositive { name, value })
    }
}
