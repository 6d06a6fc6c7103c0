//! `std::ops` implementations for `Taylor<F, NVAR, NDEG, LEN>` and `CubeTaylor<F, LEN>`.

use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::ctaylor::{self, CubeTaylor};
use crate::float::Float;
use crate::polymul;
use crate::taylor::Taylor;

/// Coefficient-wise and comparison impls common to both types. The product
/// kernel is passed in as `$mul`, called as `$mul(&mut dst, &a, &b)`.
macro_rules! impl_series_ops {
    ([$($g:tt)*] $ty:ty, $mul:expr) => {
        impl<$($g)*> Add for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::from_coeffs(std::array::from_fn(|i| self.coeffs[i] + rhs.coeffs[i]))
            }
        }

        impl<$($g)*> Sub for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self::from_coeffs(std::array::from_fn(|i| self.coeffs[i] - rhs.coeffs[i]))
            }
        }

        // Truncated product through the layout's multiplication kernel
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<$($g)*> Mul for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                let mut out = Self::zero();
                let mul = $mul;
                mul(&mut out.coeffs, &self.coeffs, &rhs.coeffs);
                out
            }
        }

        // Division composes the reciprocal series with the divisor
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<$($g)*> Div for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self {
                self * rhs.recip()
            }
        }

        impl<$($g)*> Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self::from_coeffs(std::array::from_fn(|i| -self.coeffs[i]))
            }
        }

        impl<$($g)*> Rem for $ty {
            type Output = Self;
            #[inline]
            fn rem(self, rhs: Self) -> Self {
                let mut r = self;
                r.coeffs[0] = self.coeffs[0] % rhs.coeffs[0];
                r
            }
        }

        impl<$($g)*> AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<$($g)*> SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<$($g)*> MulAssign for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<$($g)*> DivAssign for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        impl<$($g)*> RemAssign for $ty {
            #[inline]
            fn rem_assign(&mut self, rhs: Self) {
                *self = *self % rhs;
            }
        }

        // Comparisons look at the constant term only.
        impl<$($g)*> PartialEq for $ty {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.coeffs[0] == other.coeffs[0]
            }
        }

        impl<$($g)*> PartialOrd for $ty {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.coeffs[0].partial_cmp(&other.coeffs[0])
            }
        }

        impl<$($g)*> PartialEq<F> for $ty {
            #[inline]
            fn eq(&self, other: &F) -> bool {
                self.coeffs[0] == *other
            }
        }

        impl<$($g)*> PartialOrd<F> for $ty {
            #[inline]
            fn partial_cmp(&self, other: &F) -> Option<Ordering> {
                self.coeffs[0].partial_cmp(other)
            }
        }
    };
}

impl_series_ops!(
    [F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize]
    Taylor<F, NVAR, NDEG, LEN>,
    |dst: &mut [F], a: &[F], b: &[F]| polymul::taylor_mul_acc(NVAR, NDEG, dst, a, b)
);

impl_series_ops!(
    [F: Float, const LEN: usize]
    CubeTaylor<F, LEN>,
    |dst: &mut [F], a: &[F], b: &[F]| ctaylor::cube_mul_acc(dst, a, b)
);

// ══════════════════════════════════════════════
//  Mixed operations with primitive floats
// ══════════════════════════════════════════════

macro_rules! impl_series_scalar_ops {
    ($f:ty; [$($g:tt)*] $ty:ty) => {
        impl<$($g)*> Add<$f> for $ty {
            type Output = Self;
            #[inline]
            fn add(mut self, rhs: $f) -> Self {
                self.coeffs[0] += rhs;
                self
            }
        }

        impl<$($g)*> Add<$ty> for $f {
            type Output = $ty;
            #[inline]
            fn add(self, rhs: $ty) -> $ty {
                rhs + self
            }
        }

        impl<$($g)*> Sub<$f> for $ty {
            type Output = Self;
            #[inline]
            fn sub(mut self, rhs: $f) -> Self {
                self.coeffs[0] -= rhs;
                self
            }
        }

        impl<$($g)*> Sub<$ty> for $f {
            type Output = $ty;
            #[inline]
            fn sub(self, rhs: $ty) -> $ty {
                -rhs + self
            }
        }

        impl<$($g)*> Mul<$f> for $ty {
            type Output = Self;
            #[inline]
            fn mul(mut self, rhs: $f) -> Self {
                for c in self.coeffs.iter_mut() {
                    *c *= rhs;
                }
                self
            }
        }

        impl<$($g)*> Mul<$ty> for $f {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        // Division by a plain scalar is a coefficient-wise scale
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<$($g)*> Div<$f> for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $f) -> Self {
                let inv: $f = 1.0 / rhs;
                self * inv
            }
        }

        impl<$($g)*> Div<$ty> for $f {
            type Output = $ty;
            #[inline]
            fn div(self, rhs: $ty) -> $ty {
                rhs.recip() * self
            }
        }

        impl<$($g)*> AddAssign<$f> for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: $f) {
                self.coeffs[0] += rhs;
            }
        }

        impl<$($g)*> SubAssign<$f> for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: $f) {
                self.coeffs[0] -= rhs;
            }
        }

        impl<$($g)*> MulAssign<$f> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: $f) {
                *self = *self * rhs;
            }
        }

        impl<$($g)*> DivAssign<$f> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: $f) {
                *self = *self / rhs;
            }
        }

        impl<$($g)*> PartialEq<$ty> for $f {
            #[inline]
            fn eq(&self, other: &$ty) -> bool {
                *self == other.coeffs[0]
            }
        }

        impl<$($g)*> PartialOrd<$ty> for $f {
            #[inline]
            fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                self.partial_cmp(&other.coeffs[0])
            }
        }
    };
}

impl_series_scalar_ops!(f32; [const NVAR: usize, const NDEG: usize, const LEN: usize] Taylor<f32, NVAR, NDEG, LEN>);
impl_series_scalar_ops!(f64; [const NVAR: usize, const NDEG: usize, const LEN: usize] Taylor<f64, NVAR, NDEG, LEN>);
impl_series_scalar_ops!(f32; [const LEN: usize] CubeTaylor<f32, LEN>);
impl_series_scalar_ops!(f64; [const LEN: usize] CubeTaylor<f64, LEN>);
