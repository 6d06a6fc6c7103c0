//! Elementary functions shared by [`Taylor`](crate::Taylor) and
//! [`CubeTaylor`](crate::CubeTaylor).
//!
//! Both types expose the same lifting machinery: an associated `DEGREE`
//! (truncation order), `compose(&[F])` and `new(F)`. The methods generated
//! here expand each function as a 1-D series around the constant term (see
//! [`taylor_ops`](crate::taylor_ops)) and compose it with the argument, or
//! reduce to other methods through identities.

/// Expands to the elementary-function methods inside an inherent `impl` block
/// whose float parameter is named `F`.
macro_rules! elementary_fns {
    () => {
        /// Expand `f` around the constant term with a 1-D generator, then compose.
        #[inline]
        fn lift(self, expand: impl FnOnce(&mut [F], F)) -> Self {
            let mut t = [F::zero(); $crate::taylor_ops::SERIES_CAP];
            expand(&mut t[..=Self::DEGREE], self.coeffs[0]);
            self.compose(&t[..=Self::DEGREE])
        }

        #[inline]
        fn constant_only(&self) -> bool {
            self.coeffs[1..].iter().all(|c| c.is_zero())
        }

        /// `1/x` by composition with the reciprocal series.
        ///
        /// # Panics
        ///
        /// Panics if the constant term is zero.
        #[inline]
        pub fn recip(self) -> Self {
            self.lift($crate::taylor_ops::inv_expand)
        }

        #[inline]
        pub fn exp(self) -> Self {
            self.lift($crate::taylor_ops::exp_expand)
        }

        /// `exp(x) - 1`; the constant term avoids cancellation for small arguments.
        #[inline]
        pub fn expm1(self) -> Self {
            self.lift($crate::taylor_ops::expm1_expand)
        }

        #[inline]
        pub fn exp2(self) -> Self {
            (self * Self::new(F::LN_2())).exp()
        }

        /// Natural logarithm.
        ///
        /// # Panics
        ///
        /// Panics unless the constant term is positive.
        #[inline]
        pub fn ln(self) -> Self {
            self.lift($crate::taylor_ops::log_expand)
        }

        #[inline]
        pub fn ln_1p(self) -> Self {
            self.lift(|t, a| {
                $crate::taylor_ops::log_expand(t, F::one() + a);
                t[0] = a.ln_1p();
            })
        }

        #[inline]
        pub fn log2(self) -> Self {
            self.ln() * Self::new(F::LOG2_E())
        }

        #[inline]
        pub fn log10(self) -> Self {
            self.ln() * Self::new(F::LOG10_E())
        }

        #[inline]
        pub fn log(self, base: Self) -> Self {
            self.ln() / base.ln()
        }

        /// `x^p` for a plain-float exponent.
        ///
        /// # Panics
        ///
        /// Panics unless the constant term is positive.
        #[inline]
        pub fn powr(self, p: F) -> Self {
            self.lift(|t, a| $crate::taylor_ops::pow_expand(t, a, p))
        }

        /// `x^y`. A constant exponent goes through the power series, anything
        /// else through `exp(y·ln x)`.
        pub fn powf(self, y: Self) -> Self {
            if y.constant_only() {
                self.powr(y.coeffs[0])
            } else {
                (y * self.ln()).exp()
            }
        }

        /// Integer power. Positive exponents multiply (exact even when the
        /// constant term is zero), negative ones use the real power series.
        pub fn powi(self, n: i32) -> Self {
            match n {
                0 => Self::new(F::one()),
                n if n > 0 => {
                    let mut r = self;
                    for _ in 1..n {
                        r = r * self;
                    }
                    r
                }
                n => self.powr(F::lit(f64::from(n))),
            }
        }

        #[inline]
        pub fn sqrt(self) -> Self {
            self.lift($crate::taylor_ops::sqrt_expand)
        }

        #[inline]
        pub fn cbrt(self) -> Self {
            self.lift($crate::taylor_ops::cbrt_expand)
        }

        #[inline]
        pub fn sin(self) -> Self {
            self.lift($crate::taylor_ops::sin_expand)
        }

        #[inline]
        pub fn cos(self) -> Self {
            self.lift($crate::taylor_ops::cos_expand)
        }

        #[inline]
        pub fn sin_cos(self) -> (Self, Self) {
            (self.sin(), self.cos())
        }

        #[inline]
        pub fn tan(self) -> Self {
            self.sin() / self.cos()
        }

        #[inline]
        pub fn asin(self) -> Self {
            self.lift($crate::taylor_ops::asin_expand)
        }

        #[inline]
        pub fn acos(self) -> Self {
            self.lift($crate::taylor_ops::acos_expand)
        }

        #[inline]
        pub fn atan(self) -> Self {
            self.lift($crate::taylor_ops::atan_expand)
        }

        /// Four-quadrant arctangent of `self / x`.
        pub fn atan2(self, x: Self) -> Self {
            let (y0, x0) = (self.coeffs[0], x.coeffs[0]);
            let mut r = if x0.abs() >= y0.abs() {
                (self / x).atan()
            } else {
                -(x / self).atan()
            };
            r.coeffs[0] = y0.atan2(x0);
            r
        }

        #[inline]
        pub fn sinh(self) -> Self {
            (self.exp() - (-self).exp()) * Self::new(F::lit(0.5))
        }

        #[inline]
        pub fn cosh(self) -> Self {
            (self.exp() + (-self).exp()) * Self::new(F::lit(0.5))
        }

        #[inline]
        pub fn tanh(self) -> Self {
            let e2 = (self + self).expm1();
            e2 / (e2 + Self::new(F::lit(2.0)))
        }

        #[inline]
        pub fn asinh(self) -> Self {
            self.lift($crate::taylor_ops::asinh_expand)
        }

        #[inline]
        pub fn acosh(self) -> Self {
            let one = Self::new(F::one());
            (self + (self * self - one).sqrt()).ln()
        }

        #[inline]
        pub fn atanh(self) -> Self {
            let one = Self::new(F::one());
            ((one + self) / (one - self)).ln() * Self::new(F::lit(0.5))
        }

        #[inline]
        pub fn erf(self) -> Self {
            self.lift($crate::taylor_ops::erf_expand)
        }

        /// `sin(x)/x`, regular at `x = 0`.
        ///
        /// # Panics
        ///
        /// Panics if the degree leaves no room for the widened series near zero.
        pub fn sinc(self) -> Self {
            let a = self.coeffs[0];
            if a.abs() < F::lit(1e-3) {
                let n = Self::DEGREE;
                let wide = n + 9;
                assert!(
                    wide <= $crate::taylor_ops::SERIES_CAP,
                    "sinc: degree {} too high near zero",
                    n
                );
                let mut at0 = [F::zero(); $crate::taylor_ops::SERIES_CAP];
                $crate::taylor_ops::sinc_expand_at0(&mut at0[..wide]);
                let mut t = [F::zero(); $crate::taylor_ops::SERIES_CAP];
                $crate::taylor_ops::shift(&at0[..wide], a, &mut t[..=n]);
                self.compose(&t[..=n])
            } else {
                self.sin() / self
            }
        }

        /// `√x·asinh(√x)`, analytic at `x = 0`. Uses the shifted Padé
        /// approximant for `|x₀| < 0.5` and the direct formula otherwise.
        ///
        /// # Panics
        ///
        /// Panics unless the constant term exceeds `-0.5`, or if the Padé
        /// branch is taken above degree [`PADE_ORDER`](crate::taylor_ops::PADE_ORDER).
        pub fn sqrtx_asinh_sqrtx(self) -> Self {
            let a = self.coeffs[0];
            assert!(a > F::lit(-0.5), "sqrtx_asinh_sqrtx: argument must exceed -0.5");
            if a.abs() < F::lit(0.5) {
                self.lift($crate::taylor_ops::sqrtx_asinh_sqrtx_pade)
            } else {
                let s = self.sqrt();
                s * s.asinh()
            }
        }

        #[inline]
        pub fn hypot(self, other: Self) -> Self {
            (self * self + other * other).sqrt()
        }

        /// Absolute value: negates when the constant term is negative.
        #[inline]
        pub fn abs(self) -> Self {
            if self.coeffs[0] < F::zero() {
                -self
            } else {
                self
            }
        }

        #[inline]
        pub fn signum(self) -> Self {
            Self::new(self.coeffs[0].signum())
        }

        /// The operand with the smaller constant term, unchanged.
        #[inline]
        pub fn min(self, other: Self) -> Self {
            if self.coeffs[0] <= other.coeffs[0] {
                self
            } else {
                other
            }
        }

        /// The operand with the larger constant term, unchanged.
        #[inline]
        pub fn max(self, other: Self) -> Self {
            if self.coeffs[0] > other.coeffs[0] {
                self
            } else {
                other
            }
        }

        #[inline]
        pub fn floor(self) -> Self {
            Self::new(self.coeffs[0].floor())
        }

        #[inline]
        pub fn ceil(self) -> Self {
            Self::new(self.coeffs[0].ceil())
        }

        #[inline]
        pub fn round(self) -> Self {
            Self::new(self.coeffs[0].round())
        }

        #[inline]
        pub fn trunc(self) -> Self {
            Self::new(self.coeffs[0].trunc())
        }

        #[inline]
        pub fn fract(self) -> Self {
            let mut r = self;
            r.coeffs[0] = r.coeffs[0].fract();
            r
        }

        #[inline]
        pub fn mul_add(self, a: Self, b: Self) -> Self {
            self * a + b
        }
    };
}
