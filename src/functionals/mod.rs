//! Exchange-correlation energy densities.
//!
//! Every formula is generic over [`XcScalar`](crate::XcScalar) and reads a
//! [`DensVars`](crate::DensVars) point, so one definition serves plain `f64`
//! energies and every Taylor instantiation the evaluator differentiates with.

pub mod becke;
pub mod lyp;
pub mod pbe;
pub mod pw92;
pub mod pw9x;
pub mod slater;

/// Physical constants shared by several functionals.
pub mod constants {
    use std::f64::consts::PI;

    /// Slater exchange prefactor `(81 / 32π)^(1/3)`.
    pub fn c_slater() -> f64 {
        (81.0 / (32.0 * PI)).cbrt()
    }

    /// Thomas-Fermi kinetic constant `0.3 (3π²)^(2/3)`.
    pub fn cf() -> f64 {
        0.3 * (3.0 * PI * PI).powf(2.0 / 3.0)
    }

    /// PBE correlation `γ = (1 - ln 2) / π²`.
    pub fn gamma() -> f64 {
        (1.0 - std::f64::consts::LN_2) / (PI * PI)
    }

    pub const BETA: f64 = 0.06672455060314922;

    pub fn beta_gamma() -> f64 {
        BETA / gamma()
    }
}

use crate::scalar::XcScalar;

/// `(1 + z)^p + (1 - z)^p`, with a vanishing base contributing zero.
pub(crate) fn ufunc<T: XcScalar>(z: T, p: f64) -> T {
    let one = T::one();
    let pos = |x: T| if x > 0.0 { x.pow_f(p) } else { T::zero() };
    pos(one + z) + pos(one - z)
}
