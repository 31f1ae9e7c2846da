//! Renderer-independent description of a waveform plot.

use crate::current::CurrentWaveform;
use crate::voltage::VoltageWaveform;

const MICROSECONDS: f64 = 1e6;
const MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const GREEN: Rgb = Rgb(44, 160, 44);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Debug)]
pub struct Trace {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
}

/// Horizontal reference line across the whole x range.
#[derive(Clone, Debug)]
pub struct Guide {
    pub level: f64,
    pub label: Option<String>,
    pub color: Rgb,
    pub style: LineStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Clone, Debug)]
pub struct Plot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
    pub guides: Vec<Guide>,
    pub window_size: (u32, u32),
}

impl Plot {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Plot {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            traces: Vec::new(),
            guides: Vec::new(),
            window_size: (1000, 500),
        }
    }

    pub fn trace(mut self, label: impl Into<String>, points: Vec<(f64, f64)>, color: Rgb) -> Self {
        self.traces.push(Trace {
            label: label.into(),
            points,
            color,
        });
        self
    }

    pub fn guide(mut self, level: f64, label: Option<&str>, color: Rgb, style: LineStyle) -> Self {
        self.guides.push(Guide {
            level,
            label: label.map(str::to_string),
            color,
            style,
        });
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Data extent of traces and guides, padded by 5% on every side.
    pub fn bounds(&self) -> Bounds {
        let points = self.traces.iter().flat_map(|t| t.points.iter());
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        for guide in &self.guides {
            y_min = y_min.min(guide.level);
            y_max = y_max.max(guide.level);
        }
        let (x_min, x_max) = pad(x_min, x_max);
        let (y_min, y_max) = pad(y_min, y_max);
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn legend(&self) -> Vec<(&str, Rgb, LineStyle)> {
        let traces = self
            .traces
            .iter()
            .map(|t| (t.label.as_str(), t.color, LineStyle::Solid));
        let guides = self
            .guides
            .iter()
            .filter_map(|g| g.label.as_deref().map(|label| (label, g.color, g.style)));
        traces.chain(guides).collect()
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 1.0, max + 1.0);
    }
    (min - span * MARGIN, max + span * MARGIN)
}

/// Tick positions at a 1/2/5 x 10^k step inside `[min, max]`, aiming for
/// roughly `target` ticks.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw = (max - min) / target as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // Avoid printing -0 or 1e-17 for the zero tick.
            if v.abs() < step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Tick label with just enough decimals to tell neighbouring ticks apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    format!("{:.*}", decimals, value)
}

fn to_micros(time: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    time.iter()
        .zip(values)
        .map(|(&t, &v)| (t * MICROSECONDS, v))
        .collect()
}

pub fn voltage_plot(wave: &VoltageWaveform) -> Plot {
    Plot::new(
        format!(
            "Buck-Boost Inductor Voltage over {} Switching Cycles",
            wave.config.periods
        ),
        "Time (µs)",
        "Inductor Voltage V_L (V)",
    )
    .trace(
        "Inductor Voltage V_L(t)",
        to_micros(&wave.time, &wave.voltage),
        Rgb::BLUE,
    )
    .guide(0.0, None, Rgb::BLACK, LineStyle::Dashed)
    .window_size(1200, 500)
}

pub fn current_plot(wave: &CurrentWaveform) -> Plot {
    Plot::new(
        "Buck-Boost Converter Inductor Current Waveform",
        "Time (µs)",
        "Inductor Current (A)",
    )
    .trace(
        "Inductor Current",
        to_micros(&wave.time, &wave.current),
        Rgb::BLUE,
    )
    .guide(wave.levels.average, Some("Average Current"), Rgb::GRAY, LineStyle::Dashed)
    .guide(wave.levels.min, Some("Min Current"), Rgb::RED, LineStyle::Dotted)
    .guide(wave.levels.max, Some("Max Current"), Rgb::GREEN, LineStyle::Dotted)
    .window_size(1000, 500)
}
