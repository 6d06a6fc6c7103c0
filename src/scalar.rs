//! The [`Scalar`] trait for writing AD-generic numeric code.
//!
//! Functions written as `fn f<T: Scalar>(x: T) -> T` work transparently with
//! plain `f64`, [`Taylor`](crate::Taylor) and [`CubeTaylor`](crate::CubeTaylor).
//! Every exchange-correlation formula in [`functionals`](crate::functionals)
//! is written once against [`XcScalar`] and differentiated by instantiating it
//! with a Taylor type.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

use num_traits::FromPrimitive;

use crate::ctaylor::CubeTaylor;
use crate::float::Float;
use crate::taylor::Taylor;
use crate::taylor_ops;

/// The central trait for AD-generic numeric code.
pub trait Scalar:
    num_traits::Float
    + num_traits::FloatConst
    + FromPrimitive
    + Copy
    + Default
    + Debug
    + Display
    + Send
    + 'static
{
    /// The underlying primitive float type.
    type Float: Float;

    /// Lift a plain float to this scalar (constant, zero derivatives).
    fn from_f(val: Self::Float) -> Self;

    /// Extract the primal value.
    fn value(&self) -> Self::Float;

    /// Overwrite the primal value, keeping every derivative coefficient.
    fn set_value(&mut self, val: Self::Float);

    /// The error function.
    fn erf(self) -> Self;

    /// `√x·asinh(√x)`, stable around `x = 0`.
    fn sqrtx_asinh_sqrtx(self) -> Self;

    /// Real power with a plain-float exponent.
    fn pow_f(self, p: Self::Float) -> Self;
}

/// A [`Scalar`] over `f64` that mixes freely with `f64` on the right-hand side.
///
/// The exchange-correlation formulas are written against this trait so
/// literal constants can appear as `x * 0.5` or `x > 1e-14`.
pub trait XcScalar:
    Scalar<Float = f64>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + PartialOrd<f64>
    + Sync
{
}

impl<T> XcScalar for T where
    T: Scalar<Float = f64>
        + Add<f64, Output = T>
        + Sub<f64, Output = T>
        + Mul<f64, Output = T>
        + Div<f64, Output = T>
        + PartialOrd<f64>
        + Sync
{
}

macro_rules! impl_scalar_primitive {
    ($f:ty) => {
        impl Scalar for $f {
            type Float = $f;

            #[inline]
            fn from_f(val: $f) -> Self {
                val
            }

            #[inline]
            fn value(&self) -> $f {
                *self
            }

            #[inline]
            fn set_value(&mut self, val: $f) {
                *self = val;
            }

            #[inline]
            fn erf(self) -> Self {
                Float::erf(self)
            }

            #[inline]
            fn sqrtx_asinh_sqrtx(self) -> Self {
                taylor_ops::sqrtx_asinh_sqrtx_scalar(self)
            }

            #[inline]
            fn pow_f(self, p: $f) -> Self {
                self.powf(p)
            }
        }
    };
}

impl_scalar_primitive!(f32);
impl_scalar_primitive!(f64);

impl<F: Float, const NVAR: usize, const NDEG: usize, const LEN: usize> Scalar
    for Taylor<F, NVAR, NDEG, LEN>
{
    type Float = F;

    #[inline]
    fn from_f(val: F) -> Self {
        Taylor::new(val)
    }

    #[inline]
    fn value(&self) -> F {
        self.coeffs[0]
    }

    #[inline]
    fn set_value(&mut self, val: F) {
        self.coeffs[0] = val;
    }

    #[inline]
    fn erf(self) -> Self {
        Taylor::erf(self)
    }

    #[inline]
    fn sqrtx_asinh_sqrtx(self) -> Self {
        Taylor::sqrtx_asinh_sqrtx(self)
    }

    #[inline]
    fn pow_f(self, p: F) -> Self {
        self.powr(p)
    }
}

impl<F: Float, const LEN: usize> Scalar for CubeTaylor<F, LEN> {
    type Float = F;

    #[inline]
    fn from_f(val: F) -> Self {
        CubeTaylor::new(val)
    }

    #[inline]
    fn value(&self) -> F {
        self.coeffs[0]
    }

    #[inline]
    fn set_value(&mut self, val: F) {
        self.coeffs[0] = val;
    }

    #[inline]
    fn erf(self) -> Self {
        CubeTaylor::erf(self)
    }

    #[inline]
    fn sqrtx_asinh_sqrtx(self) -> Self {
        CubeTaylor::sqrtx_asinh_sqrtx(self)
    }

    #[inline]
    fn pow_f(self, p: F) -> Self {
        self.powr(p)
    }
}
