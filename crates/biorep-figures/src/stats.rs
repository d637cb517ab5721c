//! Small numeric helpers for axis layout and outlier trimming.

/// Round `value` down (`lower`) or up to a multiple of `step`.
pub fn round_to_step(value: f64, step: f64, lower: bool) -> f64 {
    let scaled = value / step;
    let rounded = if lower { scaled.floor() } else { scaled.ceil() };
    rounded * step
}

/// `n` evenly spaced points from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// Returns `None` for an empty slice. `pct` is in `0.0..=100.0`.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = pct.clamp(0.0, 100.0) * (sorted.len() - 1) as f64 / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Keep values inside the `[lower_pct, upper_pct]` percentile band, inclusive.
pub fn trim_to_band(values: &[f64], lower_pct: f64, upper_pct: f64) -> Vec<f64> {
    let (Some(lo), Some(hi)) = (percentile(values, lower_pct), percentile(values, upper_pct)) else {
        return Vec::new();
    };
    values.iter().copied().filter(|v| *v >= lo && *v <= hi).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - ddof) as f64).sqrt()
}

/// Tick spacing: the axis step, widened to about ten ticks on long axes.
pub fn tick_spacing(x_min: f64, x_max: f64, step: f64) -> f64 {
    let range = x_max - x_min;
    if range / step <= 10.0 {
        return step;
    }
    let widened = ((range / 10.0) * 2.0).round() / 2.0;
    if widened > 0.0 { widened } else { step }
}
