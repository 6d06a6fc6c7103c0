//! Lee-Yang-Parr correlation.

use super::constants::cf;
use crate::densvars::DensVars;
use crate::scalar::XcScalar;

const A: f64 = 0.04918;
const B: f64 = 0.132;
const C: f64 = 0.2533;
const DD: f64 = 0.349;

pub fn lypc<T: XcScalar>(d: &DensVars<T>) -> T {
    let (a, b, n) = (d.a, d.b, d.n);
    let (gaa, gbb, gnn) = (d.gaa, d.gbb, d.gnn);
    let icbrtn = d.n.cbrt().recip();
    let p = (icbrtn * DD + 1.0).recip();
    let omega = (icbrtn * -C).exp() * p * n.pow_f(-11.0 / 3.0);
    let delta = icbrtn * (p * DD + C);
    let n2 = n * n;
    let ab = a * b;

    let spin_kin = (a.pow_f(8.0 / 3.0) + b.pow_f(8.0 / 3.0)) * (2f64.powf(11.0 / 3.0) * cf());
    let grad_mix = gnn * (-(delta * 7.0) + 47.0) / 18.0
        - (gaa + gbb) * (-(delta / 18.0) + 2.5)
        - (delta - 11.0) / 9.0 * (a * gaa + b * gbb) / n;
    let inner = ab * (spin_kin + grad_mix) - n2 * gnn * (2.0 / 3.0)
        + (n2 * (2.0 / 3.0) - a * a) * gbb
        + (n2 * (2.0 / 3.0) - b * b) * gaa;

    -(ab * p * 4.0 / n + omega * inner * B) * A
}
