//! Numeric helpers shared by the scoring algorithms and the engine.
//!
//! Every helper here is total: divisions by zero collapse to `0.0` rather
//! than producing `NaN` or infinities, so combined confidences stay finite.

/// Divide `numerator` by `denominator`, returning `0.0` when the denominator is zero.
#[inline]
pub fn divide_safe(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Statistical median of `values`. Returns `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linearly map `value` from `[from_min, from_max]` into `[to_min, to_max]`.
///
/// A degenerate source range maps everything to `to_min`.
pub fn fit_to_range(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let span = from_max - from_min;
    if span == 0.0 {
        return to_min;
    }
    to_min + (value - from_min) / span * (to_max - to_min)
}

/// Relative proximity of two positions drawn from ranges of different size.
///
/// `x` lives in `[0, x_range]` and `y` in `[0, y_range]`. `x` is normalized
/// proportionally into `y`'s range and the delta is measured against the
/// largest delta possible, so `1.0` means the two positions sit at the same
/// relative place and `0.0` means they are at opposite ends. A zero-width
/// range pins its position to the start.
pub fn measure_relative_proximity(x: f64, y: f64, x_range: f64, y_range: f64) -> f64 {
    let relative_x = divide_safe(x, x_range);
    let relative_y = divide_safe(y, y_range);
    let delta = (relative_x - relative_y).abs();
    (1.0 - delta).clamp(0.0, 1.0)
}

/// Pull `value` (in `[0, 1]`) toward `1.0`, keeping only `strength` of its distance from one.
///
/// Used as a multiplier: with `strength = 0.4` a score of `0.0` becomes `0.6`,
/// so weak evidence drags a result down without zeroing it.
#[inline]
pub fn reduce_strength(value: f64, strength: f64) -> f64 {
    1.0 - strength * (1.0 - value)
}

/// `min(a, b) / max(a, b)`, or `0.0` if either side is zero.
#[inline]
pub fn min_max_ratio(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    a.min(b) / a.max(b)
}
