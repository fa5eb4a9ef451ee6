//! Frank copula used to couple the home and away marginals.

/// Below this |theta| the copula is treated as independence.
const THETA_EPSILON: f64 = 1e-9;

/// `C(u, v) = -(1/theta) * ln(1 + (e^{-theta u} - 1)(e^{-theta v} - 1) / (e^{-theta} - 1))`
///
/// Negative `theta` gives negative dependence (`C(u, v) < u * v`). Values stay
/// finite for `|theta| <= MAX_ABS_THETA`, which config validation enforces.
pub fn frank_copula(u: f64, v: f64, theta: f64) -> f64 {
    if theta.abs() < THETA_EPSILON {
        return u * v;
    }
    let num = (-theta * u).exp_m1() * (-theta * v).exp_m1();
    let den = (-theta).exp_m1();
    -(num / den).ln_1p() / theta
}
