//! Piecewise-linear inductor current over one switching period.

use serde::Serialize;
use tracing::debug;

use crate::config::CurrentConfig;
use crate::error::Result;
use crate::timebase::linspace;
use crate::voltage::ideal_output_voltage;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurrentLevels {
    pub t_on: f64,
    pub t_off: f64,
    pub ripple: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl CurrentLevels {
    pub fn new(config: &CurrentConfig) -> Self {
        let t_on = config.duty_cycle * config.period;
        let t_off = (1.0 - config.duty_cycle) * config.period;
        let ripple = (config.input_voltage * config.duty_cycle * config.period) / config.inductance;
        CurrentLevels {
            t_on,
            t_off,
            ripple,
            min: config.average_current - ripple / 2.0,
            max: config.average_current + ripple / 2.0,
            average: config.average_current,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CurrentWaveform {
    pub config: CurrentConfig,
    pub time: Vec<f64>,
    pub current: Vec<f64>,
    pub levels: CurrentLevels,
}

#[derive(Clone, Debug, Serialize)]
pub struct CurrentSummary {
    pub samples: usize,
    pub switching_frequency: f64,
    #[serde(flatten)]
    pub levels: CurrentLevels,
    pub end_current: f64,
    pub ideal_output_voltage: Option<f64>,
}

pub fn generate(config: &CurrentConfig) -> Result<CurrentWaveform> {
    config.validate()?;

    let levels = CurrentLevels::new(config);
    let time = linspace(0.0, config.period, config.samples);
    let current = time.iter().map(|&t| evaluate(config, &levels, t)).collect();

    debug!(
        samples = time.len(),
        ripple = levels.ripple,
        min = levels.min,
        max = levels.max,
        "generated inductor current"
    );

    Ok(CurrentWaveform {
        config: config.clone(),
        time,
        current,
        levels,
    })
}

fn evaluate(config: &CurrentConfig, levels: &CurrentLevels, t: f64) -> f64 {
    // The sample at exactly t_on still belongs to the rising branch.
    if t <= levels.t_on {
        levels.min + (config.input_voltage / config.inductance) * t
    } else {
        levels.max + (config.output_voltage / config.inductance) * (t - levels.t_on)
    }
}

impl CurrentWaveform {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Inductor current at an arbitrary time within the period.
    pub fn value_at(&self, t: f64) -> f64 {
        evaluate(&self.config, &self.levels, t)
    }

    /// Current at the end of the period, after the full off-interval slope.
    pub fn end_current(&self) -> f64 {
        self.levels.max
            + (self.config.output_voltage / self.config.inductance)
                * (self.config.period - self.levels.t_on)
    }

    pub fn summary(&self) -> CurrentSummary {
        let duty = self.config.duty_cycle;
        CurrentSummary {
            samples: self.len(),
            switching_frequency: self.config.switching_frequency(),
            levels: self.levels,
            end_current: self.end_current(),
            ideal_output_voltage: (duty < 1.0)
                .then(|| ideal_output_voltage(self.config.input_voltage, duty)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> CurrentWaveform {
        generate(&CurrentConfig::default()).unwrap()
    }

    #[test]
    fn ripple_and_extremes() {
        let wave = scenario();
        assert_relative_eq!(wave.levels.ripple, 7.92, max_relative = 1e-12);
        assert_relative_eq!(wave.levels.min, 1.04, max_relative = 1e-12);
        assert_relative_eq!(wave.levels.max, 8.96, max_relative = 1e-12);
        assert_relative_eq!(
            wave.levels.max - wave.levels.min,
            24.0 * 0.33 * 100e-6 / 100e-6,
            max_relative = 1e-12
        );
    }

    #[test]
    fn starts_at_minimum() {
        let wave = scenario();
        assert_eq!(wave.time[0], 0.0);
        assert_eq!(wave.current[0], wave.levels.min);
    }

    #[test]
    fn continuous_at_switch_edge() {
        let wave = scenario();
        assert_relative_eq!(wave.value_at(33e-6), 8.96, max_relative = 1e-12);
        assert_relative_eq!(wave.value_at(wave.levels.t_on), wave.levels.max, max_relative = 1e-12);
    }

    #[test]
    fn ends_on_falling_slope() {
        let wave = scenario();
        let expected = wave.levels.max + (-12.0 / 100e-6) * (100e-6 - wave.levels.t_on);
        assert_relative_eq!(*wave.current.last().unwrap(), expected, max_relative = 1e-12);
        assert_relative_eq!(wave.end_current(), expected, max_relative = 1e-12);
    }

    #[test]
    fn rises_then_falls() {
        let wave = scenario();
        let split = wave.time.partition_point(|&t| t <= wave.levels.t_on);
        assert_eq!(split, 330);
        assert!(wave.current[..split].windows(2).all(|w| w[1] > w[0]));
        assert!(wave.current[split..].windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn switch_edge_sample_takes_rising_branch() {
        let config = CurrentConfig {
            input_voltage: 1.0,
            output_voltage: -1.0,
            duty_cycle: 0.5,
            inductance: 1.0,
            period: 1.0,
            average_current: 0.0,
            samples: 3,
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.time, vec![0.0, 0.5, 1.0]);
        // Rising branch: min + slope * t = -0.25 + 0.5.
        assert_eq!(wave.current[1], 0.25);
        assert_eq!(wave.current[2], -0.25);
    }

    #[test]
    fn full_duty_cycle_still_evaluates() {
        let config = CurrentConfig {
            duty_cycle: 1.0,
            ..CurrentConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert!(wave.current.iter().all(|v| v.is_finite()));
        assert_eq!(wave.summary().ideal_output_voltage, None);
    }

    #[test]
    fn summary_reports_ideal_output() {
        let summary = scenario().summary();
        assert_relative_eq!(
            summary.ideal_output_voltage.unwrap(),
            -(24.0 * 0.33 / 0.67),
            max_relative = 1e-12
        );
        assert_relative_eq!(summary.levels.t_off, 0.67 * 100e-6, max_relative = 1e-12);
    }
}
