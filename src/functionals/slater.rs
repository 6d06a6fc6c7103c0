//! Slater (LDA) exchange.

use super::constants::c_slater;
use crate::densvars::DensVars;
use crate::scalar::XcScalar;

/// `-c (a^(4/3) + b^(4/3))`.
pub fn slaterx<T: XcScalar>(d: &DensVars<T>) -> T {
    -(d.a_43 + d.b_43) * c_slater()
}
