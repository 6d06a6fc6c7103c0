//! Becke 1988 exchange.

use std::f64::consts::PI;

use crate::densvars::DensVars;
use crate::scalar::XcScalar;

const D: f64 = 0.0042;

/// Gradient correction of one spin channel.
fn b88<T: XcScalar>(na43: T, gaa: T) -> T {
    let chi = gaa.sqrt() / na43;
    -(na43 * chi * chi * D) / (chi * chi.asinh() * (6.0 * D) + 1.0)
}

fn spin<T: XcScalar>(na: T, gaa: T, lda: bool) -> T {
    let c = (81.0 / (4.0 * PI)).cbrt() / 2.0;
    let na43 = na.pow_f(4.0 / 3.0);
    let corr = b88(na43, gaa);
    if lda {
        corr - na43 * c
    } else {
        corr
    }
}

/// Full Becke exchange: Slater plus the B88 gradient correction.
pub fn beckex<T: XcScalar>(d: &DensVars<T>) -> T {
    spin(d.a, d.gaa, true) + spin(d.b, d.gbb, true)
}

/// The B88 gradient correction alone.
pub fn beckecorrx<T: XcScalar>(d: &DensVars<T>) -> T {
    spin(d.a, d.gaa, false) + spin(d.b, d.gbb, false)
}
