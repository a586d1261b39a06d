//! Total interpolation and easing helpers.
//!
//! Every function here is defined for any `f32` input: values outside a
//! breakpoint domain clamp to the nearest end, and NaN maps to the first
//! output so callers never observe an arithmetic error.

/// Piecewise-linear map of `x` through `(inputs[i], outputs[i])` pairs.
///
/// `inputs` must be increasing; only the common prefix of the two slices is
/// used. Returns 0.0 for empty tables.
pub fn interpolate(x: f32, inputs: &[f32], outputs: &[f32]) -> f32 {
    let n = inputs.len().min(outputs.len());
    let (inputs, outputs) = (&inputs[..n], &outputs[..n]);
    let (Some(&first_in), Some(&first_out)) = (inputs.first(), outputs.first()) else {
        return 0.0;
    };
    if x.is_nan() || x <= first_in {
        return first_out;
    }
    for (xs, ys) in inputs.windows(2).zip(outputs.windows(2)) {
        let (x0, x1) = (xs[0], xs[1]);
        if x <= x1 {
            let span = x1 - x0;
            if span <= f32::EPSILON {
                return ys[1];
            }
            let t = (x - x0) / span;
            return ys[0] + (ys[1] - ys[0]) * t;
        }
    }
    outputs[n - 1]
}

/// True when `xs` is finite and strictly increasing with at least two points.
pub fn is_strictly_increasing(xs: &[f32]) -> bool {
    xs.len() >= 2 && xs.iter().all(|x| x.is_finite()) && xs.windows(2).all(|w| w[0] < w[1])
}

/// Clamp into `[lo, hi]`, mapping NaN to `lo`.
#[inline]
pub fn clamp_total(x: f32, lo: f32, hi: f32) -> f32 {
    if x.is_nan() {
        lo
    } else {
        x.clamp(lo, hi)
    }
}

/// Linear ramp from `a` to `b` at `t` in \[0, 1\].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp_total(t, 0.0, 1.0)
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = clamp_total(t, 0.0, 1.0);
    t * (2.0 - t)
}

#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = clamp_total(t, 0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
