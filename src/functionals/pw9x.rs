//! Shared pieces of the PW91-family GGA exchange functionals, plus PW91
//! exchange itself.
//!
//! The reduced gradient is carried squared (`S²`) so no square root of the
//! gradient norm is taken and the enhancement factors stay smooth at zero
//! gradient.

use std::f64::consts::PI;

use crate::densvars::DensVars;
use crate::scalar::XcScalar;

/// PW91 exchange parameters `(a, b, c, d, α, e)`.
const PW91_PARAMS: [f64; 6] = [0.19645, 7.7956, 0.2743, 0.15084, 100.0, 0.004];

/// Squared reduced gradient of one spin channel.
pub fn s2<T: XcScalar>(rho: T, grad: T) -> T {
    let k = 6f64.powf(2.0 / 3.0) / (12.0 * PI.powf(2.0 / 3.0));
    grad / rho.pow_f(8.0 / 3.0) * (k * k)
}

/// LDA exchange of one spin channel, `-(3/4)(6/π)^(1/3) ρ^(4/3)`.
pub fn prefactor<T: XcScalar>(rho: T) -> T {
    let c = -0.75 * 2f64.cbrt() * (3.0 * PI * PI).cbrt() / PI;
    rho.pow_f(4.0 / 3.0) * c
}

/// PW91 enhancement factor.
pub fn pw91_enhancement<T: XcScalar>(p: &[f64; 6], rho: T, grad: T) -> T {
    let st2 = s2(rho, grad);
    let t1 = (st2 * (p[1] * p[1])).sqrtx_asinh_sqrtx() * (p[0] / p[1]) + 1.0;
    let t2 = st2 * ((st2 * -p[4]).exp() * -p[3] + p[2]);
    (t1 + t2) / (t1 + st2 * st2 * p[5])
}

/// PW91 exchange.
pub fn pw91x<T: XcScalar>(d: &DensVars<T>) -> T {
    prefactor(d.a) * pw91_enhancement(&PW91_PARAMS, d.a, d.gaa)
        + prefactor(d.b) * pw91_enhancement(&PW91_PARAMS, d.b, d.gbb)
}
