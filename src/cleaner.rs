// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint series cleaning.
//!
//! Four passes per keypoint, applied independently to the x and y components
//! of its time series:
//!
//! 1. Confidence filter: detections below the threshold become missing.
//! 2. Interpolation: gaps are filled linearly between valid neighbors, in both
//!    temporal directions.
//! 3. Smoothing: a centered moving average over a fixed window; window edges
//!    use a reduced sample count instead of discarding frames.
//! 4. Edge fill: backward then forward fill from the nearest known value.
//!
//! After cleaning, every keypoint that was confidently detected at least once
//! anywhere in the series is defined in every frame. A keypoint that was never
//! detected stays `NAN` and downstream stages treat it as "no reliable
//! direction available", never as zero.

use crate::config::ExportConfig;
use crate::keypoints::KeypointSeries;

/// Clean a keypoint series in place.
pub fn clean(series: &mut KeypointSeries, config: &ExportConfig) {
    drop_low_confidence(series, config.confidence_threshold);

    for keypoint in 0..series.num_keypoints() {
        for axis in 0..2 {
            let mut values = series.column(keypoint, axis);
            interpolate(&mut values);
            let mut values = rolling_mean(&values, config.smooth_window);
            fill_backward(&mut values);
            fill_forward(&mut values);
            series.set_column(keypoint, axis, &values);
        }
    }
}

/// Replace every keypoint whose confidence is below `threshold` with missing
/// values, regardless of how plausible the coordinates look.
fn drop_low_confidence(series: &mut KeypointSeries, threshold: f32) {
    for frame in 0..series.len() {
        for keypoint in 0..series.num_keypoints() {
            if series.conf(frame, keypoint) < threshold {
                series.data[[frame, keypoint, 0]] = f32::NAN;
                series.data[[frame, keypoint, 1]] = f32::NAN;
                series.data[[frame, keypoint, 2]] = f32::NAN;
            }
        }
    }
}

/// Fill `NAN` gaps by linear interpolation between the nearest valid samples.
/// Leading and trailing gaps take the nearest valid value. An all-`NAN` series
/// is left untouched.
fn interpolate(values: &mut [f32]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, _)| i)
        .collect();
    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return;
    };

    for i in 0..first {
        values[i] = values[first];
    }
    for i in last + 1..values.len() {
        values[i] = values[last];
    }

    for pair in known.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let (a, b) = (values[lo], values[hi]);
        #[allow(clippy::cast_precision_loss)]
        let span = (hi - lo) as f32;
        for i in lo + 1..hi {
            #[allow(clippy::cast_precision_loss)]
            let t = (i - lo) as f32 / span;
            values[i] = a + (b - a) * t;
        }
    }
}

/// Centered moving average with a minimum of one sample per window.
///
/// At position `i` with window `w`, the window covers `[i - (w-1-w/2), i + w/2]`
/// clamped to the series bounds; the mean is taken over the non-`NAN` samples
/// inside it, and is `NAN` only if the whole window is. A window of 1 or less
/// is the identity.
fn rolling_mean(values: &[f32], window: usize) -> Vec<f32> {
    if window <= 1 {
        return values.to_vec();
    }

    let n = values.len();
    let lead = window / 2;
    let lag = window - 1 - lead;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let lo = i.saturating_sub(lag);
        let hi = (i + lead).min(n.saturating_sub(1));
        let mut sum = 0.0;
        let mut count: usize = 0;
        for &v in &values[lo..=hi] {
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        out.push(if count == 0 { f32::NAN } else { sum / count as f32 });
    }

    out
}

/// Fill `NAN` values from the nearest later valid value.
fn fill_backward(values: &mut [f32]) {
    for i in (0..values.len().saturating_sub(1)).rev() {
        if values[i].is_nan() && !values[i + 1].is_nan() {
            values[i] = values[i + 1];
        }
    }
}

/// Fill `NAN` values from the nearest earlier valid value.
fn fill_forward(values: &mut [f32]) {
    for i in 1..values.len() {
        if values[i].is_nan() && !values[i - 1].is_nan() {
            values[i] = values[i - 1];
        }
    }
}
