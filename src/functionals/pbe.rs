//! PBE exchange and correlation, and the revPBE and RPBE exchange variants.

use std::f64::consts::PI;

use super::constants::{beta_gamma, gamma};
use super::pw92::pw92eps;
use super::pw9x::{prefactor, s2};
use crate::densvars::DensVars;
use crate::scalar::XcScalar;

pub const MU: f64 = 0.2195149727645171;
pub const R_PBE: f64 = 0.804;
pub const R_REVPBE: f64 = 1.245;

/// `1 + R - R / (1 + μ S² / R)`.
pub fn enhancement<T: XcScalar>(r: f64, rho: T, grad: T) -> T {
    let st2 = s2(rho, grad);
    -((st2 * (MU / r) + 1.0).recip() * r) + (1.0 + r)
}

/// RPBE form `1 - R expm1(-μ S² / R)`.
pub fn rpbe_enhancement<T: XcScalar>(rho: T, grad: T) -> T {
    let st2 = s2(rho, grad);
    -((st2 * (-MU / R_PBE)).exp_m1() * R_PBE) + 1.0
}

fn spin_sum<T: XcScalar>(d: &DensVars<T>, f: impl Fn(T, T) -> T) -> T {
    prefactor(d.a) * f(d.a, d.gaa) + prefactor(d.b) * f(d.b, d.gbb)
}

pub fn pbex<T: XcScalar>(d: &DensVars<T>) -> T {
    spin_sum(d, |rho, g| enhancement(R_PBE, rho, g))
}

pub fn revpbex<T: XcScalar>(d: &DensVars<T>) -> T {
    spin_sum(d, |rho, g| enhancement(R_REVPBE, rho, g))
}

pub fn rpbex<T: XcScalar>(d: &DensVars<T>) -> T {
    spin_sum(d, rpbe_enhancement)
}

/// Spin-scaling factor `φ = ((1+ζ)^(2/3) + (1-ζ)^(2/3)) / 2`, written through
/// `a^(4/3)` and `b^(4/3)`.
fn phi<T: XcScalar>(d: &DensVars<T>) -> T {
    d.n_m13 * d.n_m13 * (d.a_43.sqrt() + d.b_43.sqrt()) * 2f64.powf(-1.0 / 3.0)
}

/// Gradient correction `H(d², ε, φ³)`.
fn h<T: XcScalar>(d2: T, eps: T, u3: T) -> T {
    let a = (-eps / (u3 * gamma())).exp_m1().recip() * beta_gamma();
    let d2a = d2 * a;
    let ratio = d2 * (d2a + 1.0) / (d2a * (d2a + 1.0) + 1.0);
    u3 * (ratio * beta_gamma() + 1.0).ln() * gamma()
}

/// PBE correlation energy per particle.
pub fn pbec_eps<T: XcScalar>(d: &DensVars<T>) -> T {
    let eps = pw92eps(d);
    let u = phi(d);
    let k = 1.0 / 12.0 * 3f64.powf(5.0 / 6.0) / PI.powf(-1.0 / 6.0);
    let d2 = d.gnn * (k * k) / (u * u * d.n.pow_f(7.0 / 3.0));
    eps + h(d2, eps, u * u * u)
}

pub fn pbec<T: XcScalar>(d: &DensVars<T>) -> T {
    d.n * pbec_eps(d)
}
