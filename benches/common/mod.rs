#![allow(dead_code)]

use xctaylor::XcScalar;

// ─── Test functions ────────────────────────────────────────────────────────

/// Nested elementary functions, close to what a GGA energy density does.
pub fn gga_like<T: XcScalar>(x: &[T]) -> T {
    let n = x[0] + x[1];
    let g = x[2] * x[2] + x[3] * x[3];
    let s = g.sqrt() / n.pow_f(4.0 / 3.0);
    n.cbrt() * n * (s.asinh() * s + 1.0) / (s * s * 0.004 + 1.0) + (-n).exp()
}

pub fn rational<T: XcScalar>(x: &[T]) -> T {
    let mut acc = T::from_f(1.0);
    for &xi in x {
        acc = acc * (xi + 1.0) / (xi * xi + 2.0);
    }
    acc.ln()
}

// ─── Inputs ────────────────────────────────────────────────────────────────

pub fn make_point() -> [f64; 4] {
    [0.7, 0.5, 0.3, 0.2]
}

/// Unpolarized-ish GGA points in (a, b, gaa, gab, gbb) layout.
pub fn make_gga_grid(npoints: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(5 * npoints);
    for i in 0..npoints {
        let t = i as f64 / npoints as f64;
        out.extend_from_slice(&[
            0.1 + t,
            0.08 + 0.9 * t,
            0.01 + 0.2 * t,
            0.005 + 0.1 * t,
            0.012 + 0.15 * t,
        ]);
    }
    out
}
