//! Cube-layout Taylor type: `CubeTaylor<F, LEN>`.
//!
//! One coefficient per subset of the variable set: `coeffs[mask]` multiplies
//! `∏_{k ∈ mask} x_k`, so every variable appears at most linearly and
//! `LEN = 2^NVAR`. The first half of the array does not depend on the last
//! variable, the second half carries its first-order dependence, recursively.
//!
//! This is the layout the functional evaluator uses: seeding one variable per
//! derivative direction yields the energy, every first derivative and all
//! mixed derivatives up to order `NVAR` in a single pass.

use std::fmt::{self, Display};

use crate::polymul;
use crate::taylor::Taylor;
use crate::taylor_ops::SERIES_CAP;
use crate::Float;

/// Mask of the constant term.
pub const CNST: usize = 0;
/// Mask of the first variable.
pub const VAR0: usize = 1;
pub const VAR1: usize = 2;
pub const VAR2: usize = 4;
pub const VAR3: usize = 8;

/// Stack-allocated cube-layout Taylor number with `LEN = 2^NVAR` coefficients.
#[derive(Clone, Copy, Debug)]
pub struct CubeTaylor<F: Float, const LEN: usize> {
    pub coeffs: [F; LEN],
}

// ══════════════════════════════════════════════
//  Subset kernels
// ══════════════════════════════════════════════

/// `dst += x * y` over cube layouts of equal length.
pub(crate) fn cube_mul_acc<F: Float>(dst: &mut [F], x: &[F], y: &[F]) {
    let n = dst.len();
    if n == 1 {
        dst[0] = dst[0] + x[0] * y[0];
        return;
    }
    let h = n / 2;
    let (lo, hi) = dst.split_at_mut(h);
    let (xlo, xhi) = x.split_at(h);
    let (ylo, yhi) = y.split_at(h);
    cube_mul_acc(lo, xlo, ylo);
    cube_mul_acc(hi, xlo, yhi);
    cube_mul_acc(hi, xhi, ylo);
}

/// `dst *= y` in place.
pub(crate) fn cube_multo<F: Float>(dst: &mut [F], y: &[F]) {
    let n = dst.len();
    if n == 1 {
        dst[0] = dst[0] * y[0];
        return;
    }
    let h = n / 2;
    let (lo, hi) = dst.split_at_mut(h);
    let (ylo, yhi) = y.split_at(h);
    cube_multo(hi, ylo);
    cube_mul_acc(hi, lo, yhi);
    cube_multo(lo, ylo);
}

/// `dst *= (y - y[0])` in place.
pub(crate) fn cube_multo_skipconst<F: Float>(dst: &mut [F], y: &[F]) {
    let n = dst.len();
    if n == 1 {
        dst[0] = F::zero();
        return;
    }
    let h = n / 2;
    let (lo, hi) = dst.split_at_mut(h);
    let (ylo, yhi) = y.split_at(h);
    cube_multo_skipconst(hi, ylo);
    cube_mul_acc(hi, lo, yhi);
    cube_multo_skipconst(lo, ylo);
}

// ══════════════════════════════════════════════
//  CubeTaylor<F, LEN>
// ══════════════════════════════════════════════

impl<F: Float, const LEN: usize> Default for CubeTaylor<F, LEN> {
    fn default() -> Self {
        CubeTaylor::zero()
    }
}

impl<F: Float, const LEN: usize> Display for CubeTaylor<F, LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coeffs[0])?;
        for (mask, c) in self.coeffs.iter().enumerate().skip(1) {
            write!(f, " + {}", c)?;
            for k in 0..Self::NVAR {
                if mask & (1 << k) != 0 {
                    write!(f, "·x{}", k)?;
                }
            }
        }
        Ok(())
    }
}

impl<F: Float, const LEN: usize> From<F> for CubeTaylor<F, LEN> {
    #[inline]
    fn from(val: F) -> Self {
        CubeTaylor::new(val)
    }
}

impl<F: Float, const LEN: usize> CubeTaylor<F, LEN> {
    const LAYOUT: () = assert!(
        LEN.is_power_of_two() && (LEN.trailing_zeros() as usize) < SERIES_CAP,
        "CubeTaylor: LEN must be a power of two"
    );

    /// Number of variables.
    pub const NVAR: usize = LEN.trailing_zeros() as usize;

    /// Truncation order (each variable at most linear, so the total degree is `NVAR`).
    pub const DEGREE: usize = LEN.trailing_zeros() as usize;

    #[inline]
    pub fn from_coeffs(coeffs: [F; LEN]) -> Self {
        let () = Self::LAYOUT;
        CubeTaylor { coeffs }
    }

    /// Create a constant.
    #[inline]
    pub fn new(val: F) -> Self {
        let mut coeffs = [F::zero(); LEN];
        coeffs[0] = val;
        Self::from_coeffs(coeffs)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_coeffs([F::zero(); LEN])
    }

    /// Create independent variable `var`: c₀ = val, `coeffs[1 << var] = 1`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= NVAR`.
    #[inline]
    pub fn variable(val: F, var: usize) -> Self {
        Self::variable_with(val, var, F::one())
    }

    /// Like [`variable`](Self::variable) with an arbitrary seed.
    ///
    /// # Panics
    ///
    /// Panics if `var >= NVAR`.
    pub fn variable_with(val: F, var: usize, seed: F) -> Self {
        assert!(
            var < Self::NVAR,
            "CubeTaylor::variable: variable {} out of range",
            var
        );
        let mut t = Self::new(val);
        t.coeffs[1 << var] = seed;
        t
    }

    #[inline]
    pub fn value(&self) -> F {
        self.coeffs[0]
    }

    /// Coefficient of the variable subset `mask`.
    ///
    /// # Panics
    ///
    /// Panics if `mask >= LEN`.
    #[inline]
    pub fn get(&self, mask: usize) -> F {
        assert!(mask < LEN, "CubeTaylor::get: mask {} out of range", mask);
        self.coeffs[mask]
    }

    /// # Panics
    ///
    /// Panics if `mask >= LEN`.
    #[inline]
    pub fn set(&mut self, mask: usize, val: F) {
        assert!(mask < LEN, "CubeTaylor::set: mask {} out of range", mask);
        self.coeffs[mask] = val;
    }

    /// Mixed partial derivative over the variables in `mask`.
    ///
    /// Every variable appears at most linearly, so this is the coefficient itself.
    #[inline]
    pub fn derivative(&self, mask: usize) -> F {
        self.get(mask)
    }

    /// Compose a 1-D series expanded around the constant term (Horner).
    ///
    /// # Panics
    ///
    /// Panics if `series` is empty.
    pub fn compose(&self, series: &[F]) -> Self {
        assert!(!series.is_empty(), "CubeTaylor::compose: empty coefficient series");
        let n = series.len() - 1;
        let mut out = Self::new(series[n]);
        for &c in series[..n].iter().rev() {
            cube_multo_skipconst(&mut out.coeffs, &self.coeffs);
            out.coeffs[0] = out.coeffs[0] + c;
        }
        out
    }

    /// `self *= p` in place, without a temporary.
    #[inline]
    pub fn multo(&mut self, p: &Self) {
        cube_multo(&mut self.coeffs, &p.coeffs);
    }

    /// `self *= (p - p₀)` in place.
    #[inline]
    pub fn multo_skipconst(&mut self, p: &Self) {
        cube_multo_skipconst(&mut self.coeffs, &p.coeffs);
    }

    elementary_fns!();

    /// Expand into the dense layout with the same variables and degree `N == NVAR`.
    ///
    /// # Panics
    ///
    /// Panics if `N != NVAR`.
    pub fn to_dense<const N: usize, const DLEN: usize>(&self) -> Taylor<F, N, N, DLEN> {
        assert_eq!(N, Self::NVAR, "CubeTaylor::to_dense: variable count mismatch");
        let mut out = Taylor::<F, N, N, DLEN>::zero();
        let mut exps = [0usize; SERIES_CAP];
        for (mask, &c) in self.coeffs.iter().enumerate() {
            for (k, e) in exps[..N].iter_mut().enumerate() {
                *e = (mask >> k) & 1;
            }
            out.coeffs[polymul::term_index(&exps[..N])] = c;
        }
        out
    }

    /// Take the multilinear terms of a dense expansion; squares and higher
    /// powers of a single variable are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `N != NVAR`.
    pub fn from_dense<const N: usize, const D: usize, const DLEN: usize>(
        dense: &Taylor<F, N, D, DLEN>,
    ) -> Self {
        assert_eq!(N, Self::NVAR, "CubeTaylor::from_dense: variable count mismatch");
        let mut out = Self::zero();
        let mut exps = [0usize; SERIES_CAP];
        for (mask, c) in out.coeffs.iter_mut().enumerate() {
            if (mask.count_ones() as usize) > D {
                continue;
            }
            for (k, e) in exps[..N].iter_mut().enumerate() {
                *e = (mask >> k) & 1;
            }
            *c = dense.coeffs[polymul::term_index(&exps[..N])];
        }
        out
    }
}
