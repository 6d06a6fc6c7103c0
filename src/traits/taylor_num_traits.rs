//! `num_traits` implementations for `Taylor<F, NVAR, NDEG, LEN>` and `CubeTaylor<F, LEN>`.
//!
//! Predicates and conversions read the constant term; the arithmetic methods
//! forward to the inherent elementary functions.

use std::num::FpCategory;

use num_traits::{
    Float as NumFloat, FloatConst, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero,
};

use crate::ctaylor::CubeTaylor;
use crate::float::Float;
use crate::taylor::Taylor;

macro_rules! impl_series_num_traits {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)*> Zero for $ty {
            #[inline]
            fn zero() -> Self {
                <$ty>::new(F::zero())
            }
            #[inline]
            fn is_zero(&self) -> bool {
                self.coeffs[0].is_zero()
            }
        }

        impl<$($g)*> One for $ty {
            #[inline]
            fn one() -> Self {
                <$ty>::new(F::one())
            }
        }

        impl<$($g)*> Num for $ty {
            type FromStrRadixErr = F::FromStrRadixErr;
            fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
                F::from_str_radix(str, radix).map(<$ty>::new)
            }
        }

        impl<$($g)*> FromPrimitive for $ty {
            #[inline]
            fn from_i64(n: i64) -> Option<Self> {
                F::from_i64(n).map(<$ty>::new)
            }
            #[inline]
            fn from_u64(n: u64) -> Option<Self> {
                F::from_u64(n).map(<$ty>::new)
            }
            #[inline]
            fn from_f32(n: f32) -> Option<Self> {
                F::from_f32(n).map(<$ty>::new)
            }
            #[inline]
            fn from_f64(n: f64) -> Option<Self> {
                F::from_f64(n).map(<$ty>::new)
            }
        }

        impl<$($g)*> ToPrimitive for $ty {
            #[inline]
            fn to_i64(&self) -> Option<i64> {
                self.coeffs[0].to_i64()
            }
            #[inline]
            fn to_u64(&self) -> Option<u64> {
                self.coeffs[0].to_u64()
            }
            #[inline]
            fn to_f32(&self) -> Option<f32> {
                self.coeffs[0].to_f32()
            }
            #[inline]
            fn to_f64(&self) -> Option<f64> {
                self.coeffs[0].to_f64()
            }
        }

        impl<$($g)*> NumCast for $ty {
            #[inline]
            fn from<T: ToPrimitive>(n: T) -> Option<Self> {
                <F as NumCast>::from(n).map(<$ty>::new)
            }
        }

        impl<$($g)*> Signed for $ty {
            #[inline]
            fn abs(&self) -> Self {
                <$ty>::abs(*self)
            }
            #[inline]
            fn abs_sub(&self, other: &Self) -> Self {
                if self.coeffs[0] > other.coeffs[0] {
                    *self - *other
                } else {
                    <$ty>::zero()
                }
            }
            #[inline]
            fn signum(&self) -> Self {
                <$ty>::signum(*self)
            }
            #[inline]
            fn is_positive(&self) -> bool {
                self.coeffs[0].is_sign_positive()
            }
            #[inline]
            fn is_negative(&self) -> bool {
                self.coeffs[0].is_sign_negative()
            }
        }

        impl<$($g)*> FloatConst for $ty {
            fn E() -> Self { <$ty>::new(F::E()) }
            fn FRAC_1_PI() -> Self { <$ty>::new(F::FRAC_1_PI()) }
            fn FRAC_1_SQRT_2() -> Self { <$ty>::new(F::FRAC_1_SQRT_2()) }
            fn FRAC_2_PI() -> Self { <$ty>::new(F::FRAC_2_PI()) }
            fn FRAC_2_SQRT_PI() -> Self { <$ty>::new(F::FRAC_2_SQRT_PI()) }
            fn FRAC_PI_2() -> Self { <$ty>::new(F::FRAC_PI_2()) }
            fn FRAC_PI_3() -> Self { <$ty>::new(F::FRAC_PI_3()) }
            fn FRAC_PI_4() -> Self { <$ty>::new(F::FRAC_PI_4()) }
            fn FRAC_PI_6() -> Self { <$ty>::new(F::FRAC_PI_6()) }
            fn FRAC_PI_8() -> Self { <$ty>::new(F::FRAC_PI_8()) }
            fn LN_10() -> Self { <$ty>::new(F::LN_10()) }
            fn LN_2() -> Self { <$ty>::new(F::LN_2()) }
            fn LOG10_E() -> Self { <$ty>::new(F::LOG10_E()) }
            fn LOG2_E() -> Self { <$ty>::new(F::LOG2_E()) }
            fn PI() -> Self { <$ty>::new(F::PI()) }
            fn SQRT_2() -> Self { <$ty>::new(F::SQRT_2()) }
            fn TAU() -> Self { <$ty>::new(F::TAU()) }
            fn LOG10_2() -> Self { <$ty>::new(F::LOG10_2()) }
            fn LOG2_10() -> Self { <$ty>::new(F::LOG2_10()) }
        }

        impl<$($g)*> NumFloat for $ty {
            fn nan() -> Self { <$ty>::new(F::nan()) }
            fn infinity() -> Self { <$ty>::new(F::infinity()) }
            fn neg_infinity() -> Self { <$ty>::new(F::neg_infinity()) }
            fn neg_zero() -> Self { <$ty>::new(F::neg_zero()) }
            fn min_value() -> Self { <$ty>::new(F::min_value()) }
            fn min_positive_value() -> Self { <$ty>::new(F::min_positive_value()) }
            fn max_value() -> Self { <$ty>::new(F::max_value()) }
            fn epsilon() -> Self { <$ty>::new(F::epsilon()) }

            fn is_nan(self) -> bool { self.coeffs[0].is_nan() }
            fn is_infinite(self) -> bool { self.coeffs[0].is_infinite() }
            fn is_finite(self) -> bool { self.coeffs[0].is_finite() }
            fn is_normal(self) -> bool { self.coeffs[0].is_normal() }
            fn is_sign_positive(self) -> bool { self.coeffs[0].is_sign_positive() }
            fn is_sign_negative(self) -> bool { self.coeffs[0].is_sign_negative() }
            fn classify(self) -> FpCategory { self.coeffs[0].classify() }

            fn floor(self) -> Self { <$ty>::floor(self) }
            fn ceil(self) -> Self { <$ty>::ceil(self) }
            fn round(self) -> Self { <$ty>::round(self) }
            fn trunc(self) -> Self { <$ty>::trunc(self) }
            fn fract(self) -> Self { <$ty>::fract(self) }
            fn abs(self) -> Self { <$ty>::abs(self) }
            fn signum(self) -> Self { <$ty>::signum(self) }
            fn mul_add(self, a: Self, b: Self) -> Self { <$ty>::mul_add(self, a, b) }
            fn recip(self) -> Self { <$ty>::recip(self) }
            fn powi(self, n: i32) -> Self { <$ty>::powi(self, n) }
            fn powf(self, n: Self) -> Self { <$ty>::powf(self, n) }
            fn sqrt(self) -> Self { <$ty>::sqrt(self) }
            fn cbrt(self) -> Self { <$ty>::cbrt(self) }
            fn exp(self) -> Self { <$ty>::exp(self) }
            fn exp2(self) -> Self { <$ty>::exp2(self) }
            fn exp_m1(self) -> Self { <$ty>::expm1(self) }
            fn ln(self) -> Self { <$ty>::ln(self) }
            fn log2(self) -> Self { <$ty>::log2(self) }
            fn log10(self) -> Self { <$ty>::log10(self) }
            fn ln_1p(self) -> Self { <$ty>::ln_1p(self) }
            fn log(self, base: Self) -> Self { <$ty>::log(self, base) }
            fn sin(self) -> Self { <$ty>::sin(self) }
            fn cos(self) -> Self { <$ty>::cos(self) }
            fn tan(self) -> Self { <$ty>::tan(self) }
            fn sin_cos(self) -> (Self, Self) { <$ty>::sin_cos(self) }
            fn asin(self) -> Self { <$ty>::asin(self) }
            fn acos(self) -> Self { <$ty>::acos(self) }
            fn atan(self) -> Self { <$ty>::atan(self) }
            fn atan2(self, other: Self) -> Self { <$ty>::atan2(self, other) }
            fn sinh(self) -> Self { <$ty>::sinh(self) }
            fn cosh(self) -> Self { <$ty>::cosh(self) }
            fn tanh(self) -> Self { <$ty>::tanh(self) }
            fn asinh(self) -> Self { <$ty>::asinh(self) }
            fn acosh(self) -> Self { <$ty>::acosh(self) }
            fn atanh(self) -> Self { <$ty>::atanh(self) }
            fn hypot(self, other: Self) -> Self { <$ty>::hypot(self, other) }
            fn max(self, other: Self) -> Self { <$ty>::max(self, other) }
            fn min(self, other: Self) -> Self { <$ty>::min(self, other) }

            fn abs_sub(self, other: Self) -> Self {
                if self.coeffs[0] > other.coeffs[0] {
                    self - other
                } else {
                    <$ty>::zero()
                }
            }

            fn integer_decode(self) -> (u64, i16, i8) {
                self.coeffs[0].integer_decode()
            }

            fn to_degrees(self) -> Self {
                let factor = F::lit(180.0) / F::PI();
                let mut r = self * <$ty>::new(factor);
                r.coeffs[0] = self.coeffs[0].to_degrees();
                r
            }

            fn to_radians(self) -> Self {
                let factor = F::PI() / F::lit(180.0);
                let mut r = self * <$ty>::new(factor);
                r.coeffs[0] = self.coeffs[0].to_radians();
                r
            }
        }
    };
}

impl_series_num_traits!(
    [F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize]
    Taylor<F, NVAR, NDEG, LEN>
);
impl_series_num_traits!([F: Float, const LEN: usize] CubeTaylor<F, LEN>);
