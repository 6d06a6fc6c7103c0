use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FloatConst, FromPrimitive};

/// Marker trait for base floating-point types (`f32`, `f64`).
///
/// Bundles the numeric and utility traits the series generators and the
/// Taylor types need. Only primitive float types implement this; the Taylor
/// number types do not.
pub trait Float:
    NumFloat + FloatConst + FromPrimitive + Copy + Send + Sync + Default + Debug + Display + 'static
{
    /// The error function, `erf(x) = 2/√π ∫₀ˣ exp(-t²) dt`.
    fn erf(self) -> Self;

    /// Convert a small integer (a degree, exponent or factorial factor).
    #[inline]
    fn from_usize_lossy(n: usize) -> Self {
        <Self as FromPrimitive>::from_usize(n).unwrap_or_else(Self::nan)
    }

    /// Convert an `f64` literal.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as FromPrimitive>::from_f64(x).unwrap_or_else(Self::nan)
    }
}

impl Float for f32 {
    #[inline]
    fn erf(self) -> Self {
        libm::erff(self)
    }
}

impl Float for f64 {
    #[inline]
    fn erf(self) -> Self {
        libm::erf(self)
    }
}
