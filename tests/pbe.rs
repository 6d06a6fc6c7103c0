//! PBE exchange-correlation in contracted mode over the (n, ∇n) variables.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use xctaylor::{Mode, Vars, XcFunctional};

const TOL: f64 = 1e-6;

// Published second and third order values differ from the exact derivatives
// of the formulas by a few parts in 1e5.
const HIGH_ORDER_TOL: f64 = 1e-4;

/// Evaluates PBE with `density[k][j]` as coefficient `k` of variable `j`
/// and returns the highest mixed coefficient.
fn contracted(order: usize, density: &[[f64; 4]]) -> f64 {
    let mut fun = XcFunctional::new();
    fun.set("pbe", 1.0).unwrap();
    fun.eval_setup(Vars::NNxNyNz, Mode::Contracted, order).unwrap();

    let len = 1 << order;
    assert_eq!(density.len(), len);
    assert_eq!(fun.input_length(), 4 * len);
    let mut input = vec![0.0; 4 * len];
    for j in 0..4 {
        for k in 0..len {
            input[j * len + k] = density[k][j];
        }
    }
    let mut out = vec![0.0; fun.output_length()];
    fun.eval(&input, &mut out);
    out[len - 1]
}

const BASE: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
const V: [f64; 4] = [5.0, 6.0, 7.0, 8.0];
const W: [f64; 4] = [9.0, 10.0, 11.0, 12.0];
const ZERO: [f64; 4] = [0.0; 4];

#[test]
fn energy() {
    let e = contracted(0, &[BASE]);
    assert_abs_diff_eq!(e, -0.86494159400066051, epsilon = TOL);
}

#[test]
fn energy_matches_partial_mode() {
    let mut fun = XcFunctional::new();
    fun.set("pbe", 1.0).unwrap();
    fun.eval_setup(Vars::NNxNyNz, Mode::PartialDerivatives, 0).unwrap();
    let mut out = [0.0];
    fun.eval(&BASE, &mut out);
    assert_relative_eq!(out[0], contracted(0, &[BASE]), max_relative = 1e-14);
}

#[test]
fn first_order_along_density_and_gradient() {
    let d = contracted(1, &[BASE, V]);
    assert_abs_diff_eq!(d, -5.1509916226154067, epsilon = TOL);
}

#[test]
fn first_order_along_one_gradient_component() {
    let d = contracted(1, &[BASE, [0.0, 0.0, 1.0, 0.0]]);
    assert_abs_diff_eq!(d, -0.013470456737102541, epsilon = TOL);
}

#[test]
fn second_order_along_one_direction() {
    let d = contracted(2, &[BASE, V, V, ZERO]);
    assert_relative_eq!(d, -9.4927931153398468, max_relative = HIGH_ORDER_TOL);
    // high-precision numerical differentiation of the same formulas
    assert_relative_eq!(d, -9.4928030521845657, max_relative = 1e-10);
}

#[test]
fn third_order_mixed_directions() {
    let d = contracted(3, &[BASE, V, W, V, W, V, W, ZERO]);
    assert_relative_eq!(d, 47.091223089835331, max_relative = HIGH_ORDER_TOL);
    assert_relative_eq!(d, 47.092072282558554, max_relative = 1e-10);
}

#[test]
fn first_order_matches_finite_difference() {
    let h = 1e-5;
    let at = |t: f64| {
        let p: [f64; 4] = std::array::from_fn(|i| BASE[i] + t * V[i]);
        contracted(0, &[p])
    };
    let fd = (at(h) - at(-h)) / (2.0 * h);
    assert_relative_eq!(contracted(1, &[BASE, V]), fd, max_relative = 1e-8);
}
