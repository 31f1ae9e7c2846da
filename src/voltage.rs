//! Piecewise-constant inductor voltage over several switching periods.
//!
//! During the on-interval the inductor sees the input voltage; during the
//! off-interval it sees the output voltage, whose steady-state value
//! `-Vin * D / (1 - D)` makes the volt-seconds over one period cancel.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::VoltageConfig;
use crate::error::Result;
use crate::timebase::arange;

#[derive(Clone, Debug)]
pub struct VoltageWaveform {
    pub config: VoltageConfig,
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub on_level: f64,
    pub off_level: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct VoltageSummary {
    pub samples: usize,
    pub switching_frequency: f64,
    pub on_level: f64,
    pub off_level: f64,
    pub on_time: f64,
    pub off_time: f64,
    pub volt_seconds: f64,
    pub ripple_current: Option<f64>,
    pub period_means: Vec<Option<f64>>,
}

/// Steady-state buck-boost output (and off-interval inductor) voltage.
pub fn ideal_output_voltage(input_voltage: f64, duty_cycle: f64) -> f64 {
    -(input_voltage * duty_cycle / (1.0 - duty_cycle))
}

pub fn generate(config: &VoltageConfig) -> Result<VoltageWaveform> {
    config.validate()?;

    let period = config.period;
    let duty = config.duty_cycle;
    let on_level = config.input_voltage;
    let off_level = ideal_output_voltage(config.input_voltage, duty);

    let time = arange(0.0, config.periods as f64 * period, config.time_resolution);
    let mut voltage = vec![0.0; time.len()];
    let mut covered = 0usize;

    for i in 0..config.periods {
        let t_start = i as f64 * period;
        let on_time = t_start + duty * period;
        // Same edge as the next period's start, so neighbouring periods leave no gap.
        let off_time = (i + 1) as f64 * period;

        // `time` is sorted, so each half-open interval is a contiguous run.
        let start = time.partition_point(|&t| t < t_start);
        let on = time.partition_point(|&t| t < on_time);
        let off = time.partition_point(|&t| t < off_time);

        if on > start {
            voltage[start..on].fill(on_level);
        }
        if off > on {
            voltage[on..off].fill(off_level);
        }
        if off <= start {
            warn!(period = i, "switching period received no samples");
        }
        covered += off.saturating_sub(start);
    }

    if covered < time.len() {
        warn!(
            uncovered = time.len() - covered,
            "samples outside every switching period left at 0 V"
        );
    }

    debug!(
        samples = time.len(),
        periods = config.periods,
        on_level,
        off_level,
        "generated inductor voltage"
    );

    Ok(VoltageWaveform {
        config: config.clone(),
        time,
        voltage,
        on_level,
        off_level,
    })
}

impl VoltageWaveform {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Mean sampled voltage over each `[i*T, (i+1)*T)`; `None` for a period
    /// with no samples.
    pub fn period_means(&self) -> Vec<Option<f64>> {
        (0..self.config.periods)
            .map(|i| {
                let (lo, hi) = self.period_range(i);
                if hi <= lo {
                    return None;
                }
                let sum: f64 = self.voltage[lo..hi].iter().sum();
                Some(sum / (hi - lo) as f64)
            })
            .collect()
    }

    /// Index range of the samples in `[i*T, (i+1)*T)`.
    pub fn period_range(&self, i: usize) -> (usize, usize) {
        let period = self.config.period;
        let lo = self.time.partition_point(|&t| t < i as f64 * period);
        let hi = self.time.partition_point(|&t| t < (i + 1) as f64 * period);
        (lo, hi)
    }

    pub fn on_time(&self) -> f64 {
        self.config.duty_cycle * self.config.period
    }

    pub fn off_time(&self) -> f64 {
        (1.0 - self.config.duty_cycle) * self.config.period
    }

    /// Inductor volt-seconds over one ideal period; zero in steady state.
    pub fn volt_seconds(&self) -> f64 {
        self.on_level * self.on_time() + self.off_level * self.off_time()
    }

    /// Peak-to-peak current ripple the on-interval drives through the
    /// inductor; `None` unless the configured inductance is positive.
    pub fn ripple_current(&self) -> Option<f64> {
        let inductance = self.config.inductance;
        (inductance.is_finite() && inductance > 0.0).then(|| {
            (self.on_level * self.config.duty_cycle * self.config.period) / inductance
        })
    }

    pub fn summary(&self) -> VoltageSummary {
        VoltageSummary {
            samples: self.len(),
            switching_frequency: self.config.switching_frequency(),
            on_level: self.on_level,
            off_level: self.off_level,
            on_time: self.on_time(),
            off_time: self.off_time(),
            volt_seconds: self.volt_seconds(),
            ripple_current: self.ripple_current(),
            period_means: self.period_means(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WaveformError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn scenario() -> VoltageWaveform {
        generate(&VoltageConfig::default()).unwrap()
    }

    #[test]
    fn levels_follow_duty_cycle() {
        let wave = scenario();
        assert_eq!(wave.on_level, 12.0);
        assert_relative_eq!(wave.off_level, -8.0, max_relative = 1e-12);
    }

    #[test]
    fn first_period_on_and_off_intervals() {
        let wave = scenario();
        for (&t, &v) in wave.time.iter().zip(&wave.voltage) {
            if t < 4e-6 - 1e-12 {
                assert_eq!(v, 12.0, "t = {t}");
            } else if t > 4e-6 + 1e-12 && t < 1e-5 - 1e-12 {
                assert_relative_eq!(v, -8.0, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn every_sample_takes_one_of_two_levels() {
        let wave = scenario();
        assert_eq!(wave.voltage.len(), wave.time.len());
        assert!(wave
            .voltage
            .iter()
            .all(|&v| v == wave.on_level || v == wave.off_level));
    }

    #[test]
    fn time_vector_length_matches_exclusive_bound() {
        let wave = scenario();
        assert_eq!(wave.len(), (3.0 * 1e-5 / 1e-8_f64).ceil() as usize);
        assert_eq!(wave.time[0], 0.0);
        assert!(wave.time.last().copied().unwrap() < 3.0 * 1e-5);
    }

    #[test]
    fn analytic_volt_second_balance() {
        let wave = scenario();
        assert_abs_diff_eq!(wave.volt_seconds(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn sampled_period_means_within_one_sample() {
        let wave = scenario();
        let swing = wave.on_level - wave.off_level;
        let means = wave.period_means();
        assert_eq!(means.len(), 3);
        for mean in means {
            let mean = mean.unwrap();
            // A boundary sample may land on either side of the switch edge.
            assert!(mean.abs() <= swing / 999.0, "mean {mean}");
        }
    }

    #[test]
    fn period_means_on_exact_grid_are_zero() {
        let config = VoltageConfig {
            input_voltage: 10.0,
            duty_cycle: 0.5,
            period: 1.0,
            time_resolution: 0.125,
            periods: 2,
            ..VoltageConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.len(), 16);
        assert_eq!(wave.voltage[..4], [10.0; 4]);
        assert_eq!(wave.voltage[4..8], [-10.0; 4]);
        for mean in wave.period_means() {
            assert_abs_diff_eq!(mean.unwrap(), 0.0);
        }
    }

    #[test]
    fn ripple_uses_configured_inductance() {
        let wave = scenario();
        assert_relative_eq!(wave.ripple_current().unwrap(), 12.0 * 0.4 * 1e-5 / 100e-6);
    }

    #[test]
    fn missing_inductance_only_drops_ripple() {
        let config = VoltageConfig {
            inductance: 0.0,
            ..VoltageConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.ripple_current(), None);
        assert_eq!(wave.summary().ripple_current, None);
        assert_eq!(wave.len(), 3001);
    }

    #[test]
    fn period_edges_leave_no_gaps() {
        // 5 * 0.1 + 0.1 != 6 * 0.1, and 20 * 0.1 lands on a grid point.
        let config = VoltageConfig {
            period: 0.1,
            time_resolution: 0.01,
            periods: 20,
            ..VoltageConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.len(), 200);
        assert!(wave
            .voltage
            .iter()
            .all(|&v| v == wave.on_level || v == wave.off_level));
        assert_eq!(wave.voltage[60], wave.off_level);

        // Each sample carries the level of the period that `period_range` puts it in.
        let mut seen = 0;
        for i in 0..config.periods {
            let (lo, hi) = wave.period_range(i);
            let on_edge = i as f64 * 0.1 + 0.4 * 0.1;
            for k in lo..hi {
                let expected = if wave.time[k] < on_edge {
                    wave.on_level
                } else {
                    wave.off_level
                };
                assert_eq!(wave.voltage[k], expected, "sample {k}");
            }
            seen += hi - lo;
        }
        assert_eq!(seen, wave.len());
    }

    #[test]
    fn last_sample_stays_below_final_edge() {
        let config = VoltageConfig {
            duty_cycle: 0.5,
            period: 0.1,
            time_resolution: 0.1,
            periods: 3,
            ..VoltageConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.time, vec![0.0, 0.1, 0.2]);
        assert_eq!(wave.voltage, vec![12.0; 3]);
    }

    #[test]
    fn coarse_resolution_leaves_periods_without_samples() {
        let config = VoltageConfig {
            period: 1.0,
            time_resolution: 2.5,
            periods: 4,
            ..VoltageConfig::default()
        };
        let wave = generate(&config).unwrap();
        assert_eq!(wave.time, vec![0.0, 2.5]);
        assert_eq!(wave.period_means()[1], None);
    }

    #[test]
    fn unit_duty_cycle_is_rejected() {
        let config = VoltageConfig {
            duty_cycle: 1.0,
            ..VoltageConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(WaveformError::DutyCycle { .. })
        ));
    }
}
