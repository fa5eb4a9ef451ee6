//! Per-side goal distribution (discretized Weibull CDF).

/// `P(goals <= g) = 1 - exp(-((g + 1) * rate)^shape)` for `g` in `0..=max_goals`.
///
/// Non-decreasing in `g`, strictly below 1 for any positive finite rate.
pub fn weibull_cdf(rate: f64, shape: f64, max_goals: u8) -> Vec<f64> {
    (0..=max_goals)
        .map(|g| {
            let scaled = (f64::from(g) + 1.0) * rate;
            1.0 - (-scaled.powf(shape)).exp()
        })
        .collect()
}
