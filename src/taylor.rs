//! Const-generic multivariate truncated Taylor type: `Taylor<F, NVAR, NDEG, LEN>`.
//!
//! A `Taylor` holds every coefficient of a polynomial in `NVAR` variables up to
//! total degree `NDEG`, in the graded lexicographic layout of
//! [`polymul`](crate::polymul). `coeffs[0]` is the value; the coefficient of
//! `x^e` is `∂^|e| f / ∏ e_i! ∂x^e` (scaled Taylor coefficient).
//!
//! `LEN` must equal `polylen(NVAR, NDEG)`; this is checked when a value is
//! constructed. The [`taylor!`](crate::taylor!) macro fills it in.
//!
//! Stack-allocated, `Copy`. Implements [`Scalar`](crate::Scalar), so every
//! functional formula runs on it unchanged.

use std::fmt::{self, Display};

use crate::polymul::{self, polylen};
use crate::polynomial::Polynomial;
use crate::taylor_ops::{self, SERIES_CAP};
use crate::Float;

/// Stack-allocated multivariate Taylor expansion.
///
/// `coeffs[0]` = value, `coeffs[1 + i]` = ∂f/∂xᵢ, then the scaled second-order
/// terms `x₀², x₀x₁, …`, and so on.
#[derive(Clone, Copy, Debug)]
pub struct Taylor<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> {
    pub coeffs: [F; LEN],
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Default
    for Taylor<F, NVAR, NDEG, LEN>
{
    fn default() -> Self {
        Taylor::zero()
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Display
    for Taylor<F, NVAR, NDEG, LEN>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coeffs[0])?;
        let mut exps = [0usize; SERIES_CAP];
        let exps = &mut exps[..NVAR];
        for c in self.coeffs.iter().skip(1) {
            polymul::next_exponents(exps);
            write!(f, " + {}", c)?;
            for (i, &e) in exps.iter().enumerate() {
                match e {
                    0 => {}
                    1 => write!(f, "·x{}", i)?,
                    _ => write!(f, "·x{}^{}", i, e)?,
                }
            }
        }
        Ok(())
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> From<F>
    for Taylor<F, NVAR, NDEG, LEN>
{
    #[inline]
    fn from(val: F) -> Self {
        Taylor::new(val)
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize>
    Taylor<F, NVAR, NDEG, LEN>
{
    const LAYOUT: () = assert!(
        LEN == polylen(NVAR, NDEG) && NDEG < SERIES_CAP && NVAR < SERIES_CAP,
        "Taylor: LEN must equal polylen(NVAR, NDEG) and NDEG must stay below SERIES_CAP"
    );

    /// Truncation order.
    pub const DEGREE: usize = NDEG;

    /// Create a Taylor number from raw coefficients.
    #[inline]
    pub fn from_coeffs(coeffs: [F; LEN]) -> Self {
        let () = Self::LAYOUT;
        Taylor { coeffs }
    }

    /// Create a constant (zero higher-order coefficients).
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

    /// Create independent variable `var`: c₀ = val, ∂/∂x_var = 1.
    ///
    /// # Panics
    ///
    /// Panics if `var >= NVAR`.
    #[inline]
    pub fn variable(val: F, var: usize) -> Self {
        Self::variable_with(val, var, F::one())
    }

    /// Like [`variable`](Self::variable) with an arbitrary first-order seed.
    ///
    /// # Panics
    ///
    /// Panics if `var >= NVAR`.
    pub fn variable_with(val: F, var: usize, seed: F) -> Self {
        assert!(var < NVAR, "Taylor::variable: variable {} out of range", var);
        let mut t = Self::new(val);
        if NDEG > 0 {
            t.coeffs[1 + var] = seed;
        }
        t
    }

    /// Primal value (coefficient 0).
    #[inline]
    pub fn value(&self) -> F {
        self.coeffs[0]
    }

    /// Coefficient at linear index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= LEN`.
    #[inline]
    pub fn get(&self, i: usize) -> F {
        assert!(i < LEN, "Taylor::get: index {} out of range", i);
        self.coeffs[i]
    }

    /// Overwrite the coefficient at linear index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= LEN`.
    #[inline]
    pub fn set(&mut self, i: usize, val: F) {
        assert!(i < LEN, "Taylor::set: index {} out of range", i);
        self.coeffs[i] = val;
    }

    /// Coefficient of the monomial with the given exponents.
    ///
    /// # Panics
    ///
    /// Panics if `exps.len() != NVAR` or the total degree exceeds `NDEG`.
    pub fn term(&self, exps: &[usize]) -> F {
        assert_eq!(exps.len(), NVAR, "Taylor::term: need one exponent per variable");
        self.get(polymul::term_index(exps))
    }

    /// The partial derivative for the given exponents: the coefficient times `∏ eᵢ!`.
    pub fn derivative(&self, exps: &[usize]) -> F {
        let fact = |n: usize| (2..=n).fold(F::one(), |acc, k| acc * F::from_usize_lossy(k));
        exps.iter().fold(self.term(exps), |acc, &e| acc * fact(e))
    }

    /// Compose a 1-D series `Σ cᵢ tⁱ`, expanded around this number's constant
    /// term, with this number: `Σ cᵢ (self - c₀)ⁱ`.
    ///
    /// # Panics
    ///
    /// Panics if `series` is empty.
    #[inline]
    pub fn compose(&self, series: &[F]) -> Self {
        let mut c = [F::zero(); LEN];
        polymul::compose0(NVAR, NDEG, &mut c, &self.coeffs, series);
        Self::from_coeffs(c)
    }

    /// `1/x` by Newton iteration, doubling the number of correct orders per step.
    ///
    /// Agrees with [`recip`](Self::recip) up to round-off.
    ///
    /// # Panics
    ///
    /// Panics if the constant term is zero.
    pub fn reciprocal_newton(self) -> Self {
        let a0 = self.coeffs[0];
        assert!(a0 != F::zero(), "reciprocal_newton: constant term is zero");
        let t0 = F::one() / a0;
        let mut t = Self::zero();
        t.coeffs[0] = t0;
        for (tc, &ac) in t.coeffs.iter_mut().zip(self.coeffs.iter()).skip(1) {
            *tc = -t0 * t0 * ac;
        }
        let two = F::lit(2.0);
        let mut correct = 2;
        while correct <= NDEG {
            let mut tmp = self * t;
            tmp.coeffs[0] = tmp.coeffs[0] - two;
            t = -(tmp * t);
            correct *= 2;
        }
        t
    }

    elementary_fns!();

    // ── Polynomial views ──

    /// The coefficients as a [`Polynomial`] of the same shape.
    #[inline]
    pub fn to_polynomial(&self) -> Polynomial<F, NVAR, NDEG, LEN> {
        Polynomial::from_coeffs(self.coeffs)
    }

    /// Evaluate the truncated expansion at displacement `x`.
    #[inline]
    pub fn eval(&self, x: &[F]) -> F {
        polymul::eval(NVAR, NDEG, &self.coeffs, x)
    }

    /// Substitute `x_i = Σ_j t[i·M + j] y_j`, producing an expansion in `M` new variables.
    ///
    /// # Panics
    ///
    /// Panics if `t.len() != NVAR * M`.
    pub fn linear_transform<const M: usize, const MLEN: usize>(
        &self,
        t: &[F],
    ) -> Taylor<F, M, NDEG, MLEN> {
        let mut out = Taylor::<F, M, NDEG, MLEN>::zero();
        polymul::linear_transform(M, &mut out.coeffs, NVAR, &self.coeffs, NDEG, t);
        out
    }

    /// Scale each coefficient by `∏ eᵢ!`, giving the partial derivatives.
    pub fn deriv_facs(mut self) -> Self {
        polymul::deriv_facs(NVAR, NDEG, &mut self.coeffs);
        self
    }

    /// `f(x) → f(alpha·x)`.
    pub fn stretch(mut self, alpha: F) -> Self {
        polymul::stretch(NVAR, NDEG, &mut self.coeffs, alpha);
        self
    }

    /// Keep only the homogeneous part of total degree `d`.
    pub fn pick_order(&self, d: usize) -> Self {
        let mut out = Self::zero();
        polymul::pick_order(NVAR, NDEG, &self.coeffs, d, &mut out.coeffs);
        out
    }

    /// Copy into another layout, truncating or zero-filling.
    pub fn convert_to<const N2: usize, const D2: usize, const L2: usize>(
        &self,
    ) -> Taylor<F, N2, D2, L2> {
        let mut out = Taylor::<F, N2, D2, L2>::zero();
        polymul::convert(N2, D2, &mut out.coeffs, NVAR, NDEG, &self.coeffs);
        out
    }

    /// The degree-`d` part as a full symmetric tensor of `NVAR^d` entries.
    pub fn to_tensor(&self, d: usize) -> Vec<F> {
        let mut out = vec![F::zero(); NVAR.pow(d as u32)];
        polymul::to_tensor(NVAR, NDEG, &self.coeffs, d, &mut out);
        out
    }

    /// Replace the degree-`d` part with the contents of a `NVAR^d` tensor.
    pub fn set_tensor(&mut self, d: usize, tensor: &[F]) {
        polymul::from_tensor(NVAR, NDEG, &mut self.coeffs, d, tensor);
    }

    /// Re-center a one-variable expansion at `x₀ + dx`.
    ///
    /// # Panics
    ///
    /// Panics unless `NVAR == 1`.
    pub fn shift(&self, dx: F) -> Self {
        assert_eq!(NVAR, 1, "Taylor::shift: only defined for one variable");
        let mut out = Self::zero();
        taylor_ops::shift(&self.coeffs, dx, &mut out.coeffs);
        out
    }

    /// Antiderivative of a one-variable expansion with zero constant term;
    /// the top coefficient is lost.
    ///
    /// # Panics
    ///
    /// Panics unless `NVAR == 1`.
    pub fn integrate(mut self) -> Self {
        assert_eq!(NVAR, 1, "Taylor::integrate: only defined for one variable");
        taylor_ops::integrate(&mut self.coeffs);
        self
    }
}
