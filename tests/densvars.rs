use approx::assert_relative_eq;
use xctaylor::densvars::{regularize, DENSITY, GRADIENT, KINETIC, LAPLACIAN, TINY_DENSITY};
use xctaylor::{ctaylor, DensVars, Vars};

#[test]
fn lengths_and_provides() {
    assert_eq!(Vars::ALL.len(), 21);
    assert_eq!(Vars::AB.len(), 2);
    assert_eq!(Vars::ABGaaGabGbb.len(), 5);
    assert_eq!(Vars::NNxNyNz.len(), 4);
    assert_eq!(Vars::AB2ndTaylor.len(), 20);
    assert_eq!(Vars::N.provides(), DENSITY);
    assert_eq!(Vars::NNxNyNz.provides(), DENSITY | GRADIENT);
    assert_eq!(Vars::ABGaaGabGbbTauaTaub.provides(), DENSITY | GRADIENT | KINETIC);
    assert_ne!(Vars::ABGaaGabGbbLapaLapbTauaTaub.provides() & LAPLACIAN, 0);
}

#[test]
fn spin_densities() {
    let d = DensVars::new(Vars::ABGaaGabGbb, &[39.0, 38.0, 0.81e6, 0.82e6, 0.82e6]);
    assert_eq!(d.n, 77.0);
    assert_eq!(d.s, 1.0);
    assert_relative_eq!(d.zeta, 1.0 / 77.0, max_relative = 1e-15);
    assert_eq!(d.gnn, 0.81e6 + 2.0 * 0.82e6 + 0.82e6);
    assert_eq!(d.gns, 0.81e6 - 0.82e6);
    assert_relative_eq!(d.n_m13, 77f64.powf(-1.0 / 3.0), max_relative = 1e-15);
    assert_relative_eq!(d.a_43, 39f64.powf(4.0 / 3.0), max_relative = 1e-15);
    let rs = (3.0 / (4.0 * std::f64::consts::PI * 77.0)).cbrt();
    assert_relative_eq!(d.r_s, rs, max_relative = 1e-14);
}

#[test]
fn total_density_splits_evenly() {
    let d = DensVars::new(Vars::NNxNyNz, &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(d.a, 0.5);
    assert_eq!(d.b, 0.5);
    assert_eq!(d.gnn, 29.0);
    assert_eq!(d.gaa, 29.0 / 4.0);
    assert_eq!(d.gab, 29.0 / 4.0);
    assert_eq!(d.zeta, 0.0);

    let ns = DensVars::new(Vars::NS, &[2.0, 0.5]);
    assert_eq!(ns.a, 1.25);
    assert_eq!(ns.b, 0.75);
}

#[test]
fn gradient_components() {
    let d = DensVars::new(
        Vars::ABAxAyAzBxByBz,
        &[1.0, 2.0, 1.0, 0.0, 2.0, 0.0, 3.0, 1.0],
    );
    assert_eq!(d.gaa, 5.0);
    assert_eq!(d.gab, 2.0);
    assert_eq!(d.gbb, 10.0);
    assert_eq!(d.gnn, 19.0);
}

#[test]
fn tiny_densities_are_floored() {
    let d = DensVars::new(Vars::AB, &[0.0, 1.0]);
    assert_eq!(d.a, TINY_DENSITY);
    assert_eq!(d.b, 1.0);

    // Only the constant term moves; derivative seeds survive.
    let mut x = <ctaylor!(f64; 1)>::variable(-1.0, 0);
    regularize(&mut x);
    assert_eq!(x.coeffs, [TINY_DENSITY, 1.0]);
}

#[test]
fn kinetic_and_laplacian() {
    let d = DensVars::new(
        Vars::ABGaaGabGbbLapaLapbTauaTaub,
        &[1.0, 2.0, 0.1, 0.2, 0.3, 4.0, 5.0, 6.0, 7.0],
    );
    assert_eq!(d.lapa, 4.0);
    assert_eq!(d.lapb, 5.0);
    assert_eq!(d.taua, 6.0);
    assert_eq!(d.taub, 7.0);
    assert_eq!(d.tau, 13.0);
    assert_eq!(d.jpaa, 0.0);
}

#[test]
fn derived_quantities_carry_derivatives() {
    type C = ctaylor!(f64; 1);
    let input = [C::variable(8.0, 0), C::new(0.0)];
    let d = DensVars::new(Vars::NS, &input);
    // n^(-1/3) at 8 and its derivative -1/3 · 8^(-4/3)
    assert_relative_eq!(d.n_m13.coeffs[0], 0.5, max_relative = 1e-15);
    assert_relative_eq!(d.n_m13.coeffs[1], -1.0 / 48.0, max_relative = 1e-14);
}

#[test]
#[should_panic]
fn wrong_input_length_panics() {
    let _ = DensVars::new(Vars::ABGaaGabGbb, &[1.0, 2.0]);
}
