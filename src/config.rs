use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, Result, WaveformError};

pub const DEFAULT_CURRENT_SAMPLES: usize = 1000;
/// Upper bound on the length of a generated time vector.
pub const MAX_SAMPLES: usize = 50_000_000;

/// Parameters for the inductor voltage over several switching periods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoltageConfig {
    pub input_voltage: f64,
    pub duty_cycle: f64,
    pub period: f64,
    pub inductance: f64,
    pub time_resolution: f64,
    pub periods: usize,
}

impl Default for VoltageConfig {
    fn default() -> Self {
        VoltageConfig {
            input_voltage: 12.0,
            duty_cycle: 0.4,
            period: 1e-5,
            inductance: 100e-6,
            time_resolution: 1e-8,
            periods: 3,
        }
    }
}

impl VoltageConfig {
    pub fn switching_frequency(&self) -> f64 {
        1.0 / self.period
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("input voltage", self.input_voltage)?;
        ensure_finite("duty cycle", self.duty_cycle)?;
        if self.duty_cycle <= 0.0 || self.duty_cycle >= 1.0 {
            return Err(WaveformError::DutyCycle {
                value: self.duty_cycle,
                range: "(0, 1)",
            });
        }
        ensure_positive("period", self.period)?;
        ensure_positive("time resolution", self.time_resolution)?;
        if self.periods == 0 {
            return Err(WaveformError::TooFewPeriods);
        }
        // Inductance only feeds the reported ripple, so it is not checked here.
        let requested = (self.periods as f64 * self.period / self.time_resolution).ceil();
        if requested > MAX_SAMPLES as f64 {
            return Err(WaveformError::TooManySamples {
                requested,
                limit: MAX_SAMPLES,
            });
        }
        Ok(())
    }
}

/// Parameters for the inductor current over one switching period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentConfig {
    pub input_voltage: f64,
    /// Signed; negative for the inverting buck-boost output.
    pub output_voltage: f64,
    pub duty_cycle: f64,
    pub inductance: f64,
    pub period: f64,
    pub average_current: f64,
    pub samples: usize,
}

impl Default for CurrentConfig {
    fn default() -> Self {
        CurrentConfig {
            input_voltage: 24.0,
            output_voltage: -12.0,
            duty_cycle: 0.33,
            inductance: 100e-6,
            period: 100e-6,
            average_current: 5.0,
            samples: DEFAULT_CURRENT_SAMPLES,
        }
    }
}

impl CurrentConfig {
    pub fn switching_frequency(&self) -> f64 {
        1.0 / self.period
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("input voltage", self.input_voltage)?;
        ensure_finite("output voltage", self.output_voltage)?;
        ensure_finite("average current", self.average_current)?;
        ensure_finite("duty cycle", self.duty_cycle)?;
        // D = 0 and D = 1 collapse one branch to zero length but still evaluate.
        if !(0.0..=1.0).contains(&self.duty_cycle) {
            return Err(WaveformError::DutyCycle {
                value: self.duty_cycle,
                range: "[0, 1]",
            });
        }
        if self.inductance == 0.0 {
            return Err(WaveformError::ZeroInductance);
        }
        ensure_positive("inductance", self.inductance)?;
        ensure_positive("period", self.period)?;
        if self.samples < 2 {
            return Err(WaveformError::TooFewSamples {
                samples: self.samples,
            });
        }
        if self.samples > MAX_SAMPLES {
            return Err(WaveformError::TooManySamples {
                requested: self.samples as f64,
                limit: MAX_SAMPLES,
            });
        }
        Ok(())
    }
}
