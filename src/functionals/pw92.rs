//! Perdew-Wang 1992 LDA correlation.

use super::ufunc;
use crate::densvars::DensVars;
use crate::scalar::XcScalar;

/// Fit parameters `(A, α₁, β₁, β₂, β₃, β₄)` for the paramagnetic,
/// ferromagnetic and spin-stiffness channels.
const PARAMS: [[f64; 6]; 3] = [
    [0.03109070, 0.21370, 7.59570, 3.5876, 1.63820, 0.49294],
    [0.01554535, 0.20548, 14.1189, 6.1977, 3.36620, 0.62517],
    [0.01688690, 0.11125, 10.3570, 3.6231, 0.88026, 0.49671],
];

fn eopt<T: XcScalar>(sqrtr: T, t: &[f64; 6]) -> T {
    let poly = sqrtr * ((((sqrtr * t[5] + t[4]) * sqrtr + t[3]) * sqrtr) + t[2]);
    let log = (poly * t[0]).recip() * 0.5 + 1.0;
    (sqrtr * sqrtr * t[1] + 1.0) * log.ln() * (-2.0 * t[0])
}

fn two_cbrt2_m2() -> f64 {
    2.0 * 2f64.cbrt() - 2.0
}

/// Spin interpolation `ω(ζ)`.
fn omega<T: XcScalar>(zeta: T) -> T {
    (ufunc(zeta, 4.0 / 3.0) - 2.0) / two_cbrt2_m2()
}

/// Correlation energy per particle.
pub fn pw92eps<T: XcScalar>(d: &DensVars<T>) -> T {
    let c = 8.0 / (9.0 * two_cbrt2_m2());
    let zeta4 = d.zeta.powi(4);
    let omegaval = omega(d.zeta);
    let sqrtr = d.r_s.sqrt();
    let e0 = eopt(sqrtr, &PARAMS[0]);
    let e1 = eopt(sqrtr, &PARAMS[1]);
    let e2 = eopt(sqrtr, &PARAMS[2]);
    e0 - e2 * omegaval * (T::one() - zeta4) / c + (e1 - e0) * omegaval * zeta4
}

/// Correlation energy density `n ε(n, ζ)`.
pub fn pw92c<T: XcScalar>(d: &DensVars<T>) -> T {
    d.n * pw92eps(d)
}
