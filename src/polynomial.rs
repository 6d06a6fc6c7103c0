//! Dense truncated multivariate polynomial: `Polynomial<F, NVAR, NDEG, LEN>`.
//!
//! The storage twin of [`Taylor`](crate::Taylor) for callers that want the
//! kernel operations directly: exact products into a wider degree,
//! differentiation, contraction and changes of variables.

use std::ops::{Add, Neg, Sub};

use crate::polymul::{self, polylen};
use crate::taylor::Taylor;
use crate::Float;

/// Coefficients of a polynomial in `NVAR` variables of total degree ≤ `NDEG`,
/// in graded lexicographic order. `LEN == polylen(NVAR, NDEG)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polynomial<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> {
    pub coeffs: [F; LEN],
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize>
    Polynomial<F, NVAR, NDEG, LEN>
{
    const LAYOUT: () = assert!(
        LEN == polylen(NVAR, NDEG),
        "Polynomial: LEN must equal polylen(NVAR, NDEG)"
    );

    #[inline]
    pub fn from_coeffs(coeffs: [F; LEN]) -> Self {
        let () = Self::LAYOUT;
        Polynomial { coeffs }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_coeffs([F::zero(); LEN])
    }

    #[inline]
    pub fn constant(val: F) -> Self {
        let mut p = Self::zero();
        p.coeffs[0] = val;
        p
    }

    /// Coefficient of the monomial with exponents `exps`.
    pub fn term(&self, exps: &[usize]) -> F {
        assert_eq!(exps.len(), NVAR, "Polynomial::term: need one exponent per variable");
        self.coeffs[polymul::term_index(exps)]
    }

    pub fn set_term(&mut self, exps: &[usize], val: F) {
        assert_eq!(exps.len(), NVAR, "Polynomial::set_term: need one exponent per variable");
        self.coeffs[polymul::term_index(exps)] = val;
    }

    /// Value at the point `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != NVAR`.
    #[inline]
    pub fn eval(&self, x: &[F]) -> F {
        polymul::eval(NVAR, NDEG, &self.coeffs, x)
    }

    /// Exact product, truncated to the result degree `D3`.
    pub fn mul<const D2: usize, const L2: usize, const D3: usize, const L3: usize>(
        &self,
        other: &Polynomial<F, NVAR, D2, L2>,
    ) -> Polynomial<F, NVAR, D3, L3> {
        let mut out = Polynomial::<F, NVAR, D3, L3>::zero();
        polymul::mul_acc(NVAR, &mut out.coeffs, D3, &self.coeffs, NDEG, &other.coeffs, D2);
        out
    }

    /// Partial derivative with respect to `var`, one degree lower.
    ///
    /// # Panics
    ///
    /// Panics if `var >= NVAR` or `D + 1 != NDEG`.
    pub fn differentiate<const D: usize, const DLEN: usize>(
        &self,
        var: usize,
    ) -> Polynomial<F, NVAR, D, DLEN> {
        assert_eq!(D + 1, NDEG, "Polynomial::differentiate: result degree must be NDEG - 1");
        let mut out = Polynomial::<F, NVAR, D, DLEN>::zero();
        polymul::differentiate(NVAR, NDEG, &self.coeffs, var, &mut out.coeffs);
        out
    }

    /// The polynomial `q` of degree `D1` with `dot(P·p2, self) == dot(P, q)`
    /// for every `P` of degree `D1`.
    pub fn contract<const D1: usize, const L1: usize, const D2: usize, const L2: usize>(
        &self,
        p2: &Polynomial<F, NVAR, D2, L2>,
    ) -> Polynomial<F, NVAR, D1, L1> {
        let mut out = Polynomial::<F, NVAR, D1, L1>::zero();
        polymul::contract(NVAR, &mut out.coeffs, D1, &p2.coeffs, D2, &self.coeffs, NDEG);
        out
    }

    /// Coefficient-wise dot product.
    pub fn dot(&self, other: &Self) -> F {
        self.coeffs
            .iter()
            .zip(other.coeffs.iter())
            .fold(F::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Substitute `x_i = Σ_j t[i·M + j] y_j`.
    pub fn linear_transform<const M: usize, const MLEN: usize>(
        &self,
        t: &[F],
    ) -> Polynomial<F, M, NDEG, MLEN> {
        let mut out = Polynomial::<F, M, NDEG, MLEN>::zero();
        polymul::linear_transform(M, &mut out.coeffs, NVAR, &self.coeffs, NDEG, t);
        out
    }

    pub fn deriv_facs(mut self) -> Self {
        polymul::deriv_facs(NVAR, NDEG, &mut self.coeffs);
        self
    }

    /// Reinterpret as a Taylor number of the same shape.
    #[inline]
    pub fn to_taylor(&self) -> Taylor<F, NVAR, NDEG, LEN> {
        Taylor::from_coeffs(self.coeffs)
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Add
    for Polynomial<F, NVAR, NDEG, LEN>
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Polynomial::from_coeffs(std::array::from_fn(|i| self.coeffs[i] + rhs.coeffs[i]))
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Sub
    for Polynomial<F, NVAR, NDEG, LEN>
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Polynomial::from_coeffs(std::array::from_fn(|i| self.coeffs[i] - rhs.coeffs[i]))
    }
}

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Neg
    for Polynomial<F, NVAR, NDEG, LEN>
{
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Polynomial::from_coeffs(std::array::from_fn(|i| -self.coeffs[i]))
    }
}
