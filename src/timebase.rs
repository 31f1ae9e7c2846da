//! Uniform time vectors.

/// Samples `start, start + step, ...` strictly below `stop`.
///
/// The sample count is `ceil((stop - start) / step)` evaluated in floating
/// point, so a quotient such as `3000.0000000000005` yields 3001 samples.
/// A trailing sample that rounds onto or past `stop` is dropped.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let span = ((stop - start) / step).ceil();
    if span.is_nan() || span <= 0.0 {
        return Vec::new();
    }
    let len = span as usize;
    let mut out: Vec<f64> = (0..len).map(|k| start + k as f64 * step).collect();
    while out.last().is_some_and(|&t| t >= stop) {
        out.pop();
    }
    out
}

/// `num` evenly spaced samples over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|k| start + k as f64 * step).collect();
            out[num - 1] = stop;
            out
        }
    }
}
