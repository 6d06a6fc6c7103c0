//! Univariate series generators and 1-D series helpers.
//!
//! Convention: `t[k] = f^(k)(x₀) / k!` (scaled Taylor coefficients of `f`
//! around the expansion point `x₀`). Every `*_expand` function fills the
//! whole output slice, so the truncation order is `t.len() - 1`.
//!
//! These are the building blocks for the elementary functions on
//! [`Taylor`](crate::Taylor) and [`CubeTaylor`](crate::CubeTaylor): a function
//! is lifted by expanding it here around the argument's constant term and
//! composing the result with the argument.

use crate::Float;

/// Largest supported series length (truncation order + 1).
///
/// Stack scratch buffers in this module and in the Taylor types are sized by
/// this constant.
pub const SERIES_CAP: usize = 32;

/// Numerator of the [8/8] Padé approximant of `√x·asinh(√x)` at `x = 0`.
const PADE_P: [f64; 9] = [
    0.0,
    3.510921856028398e3,
    1.23624388373212e4,
    1.734847003883674e4,
    1.235072285222234e4,
    4.691117148130619e3,
    9.119186273274577e2,
    7.815848629220836e1,
    1.96088643023654e0,
];

/// Denominator of the [8/8] Padé approximant of `√x·asinh(√x)` at `x = 0`.
const PADE_Q: [f64; 9] = [
    3.510921856028398e3,
    1.29475924799926e4,
    1.924308297963337e4,
    1.474357149568687e4,
    6.176496729255528e3,
    1.379806958043824e3,
    1.471833349002349e2,
    5.666278232986776e0,
    2.865104054302032e-2,
];

/// Highest truncation order the Padé branch of `sqrtx_asinh_sqrtx` supports.
pub const PADE_ORDER: usize = 8;

#[inline]
fn check_len(len: usize) {
    assert!(
        (1..=SERIES_CAP).contains(&len),
        "series length {} outside 1..={}",
        len,
        SERIES_CAP
    );
}

// ══════════════════════════════════════════════
//  1-D series arithmetic
// ══════════════════════════════════════════════

/// `c = a * b`, truncated to `c.len()` coefficients.
///
/// `c[k] = Σ_{j=0}^{k} a[j] * b[k-j]`
#[inline]
pub fn mul<F: Float>(a: &[F], b: &[F], c: &mut [F]) {
    for k in 0..c.len() {
        let mut sum = F::zero();
        for j in 0..=k {
            sum = sum + a[j] * b[k - j];
        }
        c[k] = sum;
    }
}

/// `dst *= p` in place, truncated to `dst.len()` coefficients.
#[inline]
pub fn multo<F: Float>(dst: &mut [F], p: &[F]) {
    for k in (0..dst.len()).rev() {
        let mut sum = dst[k] * p[0];
        for i in 0..k {
            sum = sum + dst[i] * p[k - i];
        }
        dst[k] = sum;
    }
}

/// `dst *= (p - p[0])` in place: the constant term of `p` is ignored.
#[inline]
pub fn multo_skipconst<F: Float>(dst: &mut [F], p: &[F]) {
    for k in (0..dst.len()).rev() {
        let mut sum = F::zero();
        for i in 0..k {
            sum = sum + dst[i] * p[k - i];
        }
        dst[k] = sum;
    }
}

/// Horner composition: `out = Σ_i coeffs[i] * (p - p[0])^i`, truncated to
/// `out.len()` coefficients.
///
/// # Panics
///
/// Panics if `p` is shorter than `out` or `coeffs` is empty.
pub fn compose<F: Float>(out: &mut [F], coeffs: &[F], p: &[F]) {
    assert!(!coeffs.is_empty(), "compose: empty coefficient series");
    assert!(p.len() >= out.len(), "compose: argument shorter than result");
    let n = coeffs.len() - 1;
    out.iter_mut().for_each(|c| *c = F::zero());
    if out.is_empty() {
        return;
    }
    out[0] = coeffs[n];
    for i in (0..n).rev() {
        multo_skipconst(out, p);
        out[0] = out[0] + coeffs[i];
    }
}

/// Term-wise integration in place: `t[i] ← t[i-1] / i`, `t[0] ← 0`.
///
/// The highest input coefficient is dropped.
#[inline]
pub fn integrate<F: Float>(t: &mut [F]) {
    for i in (1..t.len()).rev() {
        t[i] = t[i - 1] / F::from_usize_lossy(i);
    }
    if let Some(c0) = t.first_mut() {
        *c0 = F::zero();
    }
}

/// Rescale the expansion variable: `t[i] ← alpha^i * t[i]`, i.e. `f(alpha·x)`.
#[inline]
pub fn stretch<F: Float>(t: &mut [F], alpha: F) {
    let mut a = F::one();
    for c in t.iter_mut().skip(1) {
        a = a * alpha;
        *c = *c * a;
    }
}

/// Re-center a series: `out` becomes the expansion of the same function
/// around `x₀ + dx`, truncated to `out.len()` coefficients.
///
/// `out[i] = Σ_{j≥i} C(j, i) · dx^(j-i) · src[j]`
///
/// # Panics
///
/// Panics if `out` is longer than `src`.
pub fn shift<F: Float>(src: &[F], dx: F, out: &mut [F]) {
    assert!(out.len() <= src.len(), "shift: output longer than input");
    for i in 0..out.len() {
        let mut w = F::one();
        let mut acc = src[i];
        for j in i + 1..src.len() {
            w = w * dx * F::from_usize_lossy(j) / F::from_usize_lossy(j - i);
            acc = acc + w * src[j];
        }
        out[i] = acc;
    }
}

// ══════════════════════════════════════════════
//  Series generators
// ══════════════════════════════════════════════

/// `1/(a + x)`: `t[0] = 1/a`, `t[i] = -t[i-1] * t[0]`.
///
/// # Panics
///
/// Panics if `a == 0`.
pub fn inv_expand<F: Float>(t: &mut [F], a: F) {
    assert!(a != F::zero(), "inv_expand: expansion point is zero");
    let t0 = F::one() / a;
    t[0] = t0;
    for i in 1..t.len() {
        t[i] = -t[i - 1] * t0;
    }
}

/// `exp(a + x)`: `t[i] = exp(a) / i!`.
pub fn exp_expand<F: Float>(t: &mut [F], a: F) {
    t[0] = a.exp();
    for i in 1..t.len() {
        t[i] = t[i - 1] / F::from_usize_lossy(i);
    }
}

/// `exp(a + x) - 1`, with a cancellation-free constant term for small `a`.
pub fn expm1_expand<F: Float>(t: &mut [F], a: F) {
    exp_expand(t, a);
    if a.abs() > F::lit(1e-3) {
        t[0] = t[0] - F::one();
    } else {
        let half = a * F::lit(0.5);
        t[0] = F::lit(2.0) * half.exp() * half.sinh();
    }
}

/// `ln(a + x)`: `t[i] = (-1)^(i+1) / (i · aⁱ)`.
///
/// # Panics
///
/// Panics unless `a > 0`.
pub fn log_expand<F: Float>(t: &mut [F], a: F) {
    assert!(a > F::zero(), "log_expand: expansion point must be positive");
    t[0] = a.ln();
    let ainv = F::one() / a;
    let mut pw = F::one();
    for i in 1..t.len() {
        pw = pw * ainv;
        let term = pw / F::from_usize_lossy(i);
        t[i] = if i % 2 == 1 { term } else { -term };
    }
}

/// `(a + x)^p` for real `p`: `t[i] = t[i-1] · (p - i + 1) / (i · a)`.
///
/// # Panics
///
/// Panics unless `a > 0`.
pub fn pow_expand<F: Float>(t: &mut [F], a: F, p: F) {
    assert!(a > F::zero(), "pow_expand: expansion point must be positive");
    t[0] = a.powf(p);
    let ainv = F::one() / a;
    for i in 1..t.len() {
        let fi = F::from_usize_lossy(i);
        t[i] = t[i - 1] * ainv * (p - fi + F::one()) / fi;
    }
}

/// `√(a + x)`.
///
/// # Panics
///
/// Panics unless `a > 0`.
pub fn sqrt_expand<F: Float>(t: &mut [F], a: F) {
    assert!(a > F::zero(), "sqrt_expand: expansion point must be positive");
    t[0] = a.sqrt();
    let ainv = F::one() / a;
    for i in 1..t.len() {
        let fi = F::from_usize_lossy(i);
        t[i] = t[i - 1] * (F::lit(1.5) * ainv / fi - ainv);
    }
}

/// `∛(a + x)`.
///
/// # Panics
///
/// Panics unless `a > 0`.
pub fn cbrt_expand<F: Float>(t: &mut [F], a: F) {
    assert!(a > F::zero(), "cbrt_expand: expansion point must be positive");
    t[0] = a.cbrt();
    let ainv = F::one() / a;
    let four_thirds = F::lit(4.0) / F::lit(3.0);
    for i in 1..t.len() {
        let fi = F::from_usize_lossy(i);
        t[i] = t[i - 1] * (four_thirds * ainv / fi - ainv);
    }
}

/// Fill the derivative series of an inverse-trig function: the expansion
/// `base(b + u)` composed with `u = c1·x + c2·x²`, then integrated.
fn integrated_quadratic<F: Float>(
    t: &mut [F],
    c1: F,
    c2: F,
    base: impl FnOnce(&mut [F]),
) {
    let n = t.len() - 1;
    if n == 0 {
        return;
    }
    let mut s = [F::zero(); SERIES_CAP];
    let mut u = [F::zero(); SERIES_CAP + 2];
    base(&mut s[..n]);
    u[1] = c1;
    u[2] = c2;
    compose(&mut t[..n], &s[..n], &u[..n]);
    integrate(t);
}

/// `atan(a + x)`, from `d/dx atan = 1/(1 + a² + 2a·x + x²)`.
pub fn atan_expand<F: Float>(t: &mut [F], a: F) {
    check_len(t.len());
    integrated_quadratic(t, a + a, F::one(), |s| inv_expand(s, F::one() + a * a));
    t[0] = a.atan();
}

/// `asinh(a + x)`, from `d/dx asinh = (1 + a² + 2a·x + x²)^(-1/2)`.
pub fn asinh_expand<F: Float>(t: &mut [F], a: F) {
    check_len(t.len());
    integrated_quadratic(t, a + a, F::one(), |s| {
        pow_expand(s, F::one() + a * a, F::lit(-0.5))
    });
    t[0] = a.asinh();
}

/// `asin(a + x)`, from `d/dx asin = (1 - a² - 2a·x - x²)^(-1/2)`.
///
/// # Panics
///
/// Panics unless `|a| < 1` (for orders above zero).
pub fn asin_expand<F: Float>(t: &mut [F], a: F) {
    check_len(t.len());
    integrated_quadratic(t, -(a + a), -F::one(), |s| {
        pow_expand(s, F::one() - a * a, F::lit(-0.5))
    });
    t[0] = a.asin();
}

/// `acos(a + x)`: the negated `asin` derivative series with `acos(a)` on top.
pub fn acos_expand<F: Float>(t: &mut [F], a: F) {
    asin_expand(t, a);
    for c in t.iter_mut().skip(1) {
        *c = -*c;
    }
    t[0] = a.acos();
}

/// The Gaussian `exp(-(a + x)²)`, as `exp(-a²) · exp(-2a·x) · exp(-x²)`.
pub fn gauss_expand<F: Float>(t: &mut [F], a: F) {
    check_len(t.len());
    exp_expand(t, -a * a);
    stretch(t, -(a + a));
    let mut g = [F::zero(); SERIES_CAP];
    g[0] = F::one();
    let mut i = 1;
    while 2 * i < t.len() {
        g[2 * i] = -g[2 * i - 2] / F::from_usize_lossy(i);
        i += 1;
    }
    let len = t.len();
    multo(t, &g[..len]);
}

/// `erf(a + x)`: the Gaussian series scaled by `2/√π` and integrated.
pub fn erf_expand<F: Float>(t: &mut [F], a: F) {
    check_len(t.len());
    let n = t.len() - 1;
    if n > 0 {
        gauss_expand(&mut t[..n], a);
        let scale = F::FRAC_2_SQRT_PI();
        for c in t[..n].iter_mut() {
            *c = *c * scale;
        }
        integrate(t);
    }
    t[0] = a.erf();
}

/// `sin(a + x)`: coefficients cycle through `sin a, cos a, -sin a, -cos a`
/// divided by `i!`.
pub fn sin_expand<F: Float>(t: &mut [F], a: F) {
    let (s, c) = a.sin_cos();
    let cycle = [s, c, -s, -c];
    let mut fac = F::one();
    for i in 0..t.len() {
        if i > 0 {
            fac = fac / F::from_usize_lossy(i);
        }
        t[i] = fac * cycle[i % 4];
    }
}

/// `cos(a + x)`: coefficients cycle through `cos a, -sin a, -cos a, sin a`
/// divided by `i!`.
pub fn cos_expand<F: Float>(t: &mut [F], a: F) {
    let (s, c) = a.sin_cos();
    let cycle = [c, -s, -c, s];
    let mut fac = F::one();
    for i in 0..t.len() {
        if i > 0 {
            fac = fac / F::from_usize_lossy(i);
        }
        t[i] = fac * cycle[i % 4];
    }
}

/// `sin(x)/x` expanded around `x = 0`.
pub fn sinc_expand_at0<F: Float>(t: &mut [F]) {
    let ndeg = t.len() - 1;
    t[0] = F::one();
    let mut fac = F::one();
    for i in 1..=ndeg / 2 {
        fac = fac / F::from_usize_lossy(2 * i);
        t[2 * i - 1] = F::zero();
        fac = -fac / F::from_usize_lossy(2 * i + 1);
        t[2 * i] = fac;
    }
    if ndeg % 2 == 1 {
        t[ndeg] = F::zero();
    }
}

/// `√(a+x)·asinh(√(a+x))` through its [8/8] Padé approximant shifted to `a`.
///
/// Accurate for `|a| < 0.5`, where the direct formula loses precision.
///
/// # Panics
///
/// Panics if the truncation order exceeds [`PADE_ORDER`].
pub fn sqrtx_asinh_sqrtx_pade<F: Float>(t: &mut [F], a: F) {
    let len = t.len();
    assert!(
        (1..=PADE_ORDER + 1).contains(&len),
        "sqrtx_asinh_sqrtx: order {} exceeds the Padé table",
        len.saturating_sub(1)
    );
    let p: [F; 9] = std::array::from_fn(|i| F::lit(PADE_P[i]));
    let q: [F; 9] = std::array::from_fn(|i| F::lit(PADE_Q[i]));
    let mut ps = [F::zero(); 9];
    let mut qs = [F::zero(); 9];
    shift(&p, a, &mut ps);
    shift(&q, a, &mut qs);

    let mut inv = [F::zero(); 9];
    inv_expand(&mut inv[..len], qs[0]);
    compose(t, &inv[..len], &qs[..len]);
    multo(t, &ps[..len]);
}

/// Scalar `√x·asinh(√x)`: the Padé form for `|x| < 0.5`, the direct one otherwise.
///
/// # Panics
///
/// Panics unless `x > -0.5`.
pub fn sqrtx_asinh_sqrtx_scalar<F: Float>(x: F) -> F {
    assert!(x > F::lit(-0.5), "sqrtx_asinh_sqrtx: argument must exceed -0.5");
    if x.abs() < F::lit(0.5) {
        let mut t = [F::zero(); 1];
        sqrtx_asinh_sqrtx_pade(&mut t, x);
        t[0]
    } else {
        let s = x.sqrt();
        s * s.asinh()
    }
}
