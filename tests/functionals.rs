use approx::assert_relative_eq;
use xctaylor::functional::{self, FunctionalId};
use xctaylor::{DensVars, Mode, Vars, XcError, XcFunctional};

const GGA_POINT: [f64; 5] = [39.0, 38.0, 0.81e6, 0.82e6, 0.82e6];

fn partial(name: &str, vars: Vars, order: usize, input: &[f64]) -> Vec<f64> {
    let mut fun = XcFunctional::new();
    fun.set(name, 1.0).unwrap();
    fun.eval_setup(vars, Mode::PartialDerivatives, order).unwrap();
    let mut out = vec![0.0; fun.output_length()];
    fun.eval(input, &mut out);
    out
}

fn assert_matches(got: &[f64], want: &[f64], threshold: f64) {
    assert_eq!(got.len(), want.len());
    for (i, (&g, &w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= (w * threshold).abs(),
            "entry {}: got {:e}, want {:e}",
            i,
            g,
            w
        );
    }
}

// ══════════════════════════════════════════════
//  1. Published references
// ══════════════════════════════════════════════

#[test]
fn self_test_passes() {
    assert!(functional::self_test().is_empty());
}

#[test]
fn self_test_covers_published_terms() {
    let covered: Vec<FunctionalId> = FunctionalId::ALL
        .into_iter()
        .filter(|id| id.reference().is_some())
        .collect();
    assert_eq!(
        covered,
        [
            FunctionalId::SlaterX,
            FunctionalId::Pw92C,
            FunctionalId::PbeX,
            FunctionalId::Pw91X,
            FunctionalId::PbeC,
            FunctionalId::BeckeX,
            FunctionalId::LypC,
        ]
    );
    for id in covered {
        let r = id.reference().unwrap();
        assert_eq!(r.output.len(), xctaylor::polymul::polylen(r.vars.len(), r.order));
    }
}

#[test]
fn every_reference_reproduced() {
    for id in FunctionalId::ALL {
        if let Some(r) = id.reference() {
            let out = partial(id.name(), r.vars, r.order, r.input);
            assert_matches(&out, r.output, r.threshold);
        }
    }
}

#[test]
fn slater_exchange() {
    let out = partial("slaterx", Vars::AB, 2, &[39.0, 38.0]);
    assert_matches(
        &out,
        &[
            -241.948147838,
            -4.20747936684,
            -4.17120618800,
            -3.59613621097e-2,
            0.0,
            -3.65895279649e-2,
        ],
        1e-11,
    );
}

#[test]
fn becke_exchange_energy_and_density_derivatives() {
    let out = partial("beckex", Vars::ABGaaGabGbb, 1, &GGA_POINT);
    assert_relative_eq!(out[0], -277.987329958, max_relative = 1e-10);
    assert_relative_eq!(out[1], -3.85951846654, max_relative = 1e-10);
    assert_relative_eq!(out[2], -3.81309494319, max_relative = 1e-10);
    assert_relative_eq!(out[3], -1.72434478018e-5, max_relative = 1e-9);
    assert_eq!(out[4], 0.0);
    assert_relative_eq!(out[5], -1.73712338362e-5, max_relative = 1e-9);
}

#[test]
fn lyp_correlation() {
    let out = partial("lypc", Vars::ABGaaGabGbb, 1, &GGA_POINT);
    assert_relative_eq!(out[0], -4.02158795173, max_relative = 1e-8);
    assert_relative_eq!(out[1], -7.62734644914e-2, max_relative = 1e-8);
    assert_relative_eq!(out[2], -8.30226435821e-2, max_relative = 1e-8);
}

#[test]
fn pbe_correlation_energy() {
    let out = partial("pbec", Vars::ABGaaGabGbb, 1, &GGA_POINT);
    assert_relative_eq!(out[0], -1.84442072405, max_relative = 1e-8);
    assert_relative_eq!(out[1], -8.14334534280e-2, max_relative = 1e-7);
    assert_relative_eq!(out[2], -8.20182123795e-2, max_relative = 1e-7);
}

// ══════════════════════════════════════════════
//  2. Cross-checks between modes and orders
// ══════════════════════════════════════════════

#[test]
fn orders_agree_on_shared_entries() {
    let o1 = partial("pbe", Vars::ABGaaGabGbb, 1, &GGA_POINT);
    let o2 = partial("pbe", Vars::ABGaaGabGbb, 2, &GGA_POINT);
    let o3 = partial("pbe", Vars::ABGaaGabGbb, 3, &GGA_POINT);
    assert_eq!(o3.len(), 56);
    for i in 0..o1.len() {
        assert_relative_eq!(o1[i], o2[i], max_relative = 1e-13);
    }
    for i in 0..o2.len() {
        assert_relative_eq!(o2[i], o3[i], max_relative = 1e-13);
    }
}

#[test]
fn third_derivative_matches_finite_difference() {
    // d³E/da³ against a central difference of d²E/da²
    let h = 1e-3;
    let d2 = |a: f64| partial("pw92c", Vars::AB, 2, &[a, 38.0])[3];
    let fd = (d2(39.0 + h) - d2(39.0 - h)) / (2.0 * h);
    let o3 = partial("pw92c", Vars::AB, 3, &[39.0, 38.0]);
    // third-order block starts after 1 + 2 + 3 entries
    assert_relative_eq!(o3[6], fd, max_relative = 1e-5);
}

#[test]
fn contracted_first_order_is_directional_derivative() {
    let mut fun = XcFunctional::new();
    fun.set("blyp", 1.0).unwrap();
    fun.eval_setup(Vars::ABGaaGabGbb, Mode::Contracted, 1).unwrap();
    let dir = [0.3, -0.2, 1e3, 2e3, -5e2];
    let input: Vec<f64> = GGA_POINT
        .iter()
        .zip(dir.iter())
        .flat_map(|(&x, &d)| [x, d])
        .collect();
    let mut out = [0.0; 2];
    fun.eval(&input, &mut out);

    let grad = partial("blyp", Vars::ABGaaGabGbb, 1, &GGA_POINT);
    let want: f64 = grad[1..].iter().zip(dir.iter()).map(|(g, d)| g * d).sum();
    assert_relative_eq!(out[0], grad[0], max_relative = 1e-14);
    assert_relative_eq!(out[1], want, max_relative = 1e-12);
}

#[test]
fn alias_is_sum_of_terms() {
    let e = |name: &str| partial(name, Vars::ABGaaGabGbb, 0, &GGA_POINT)[0];
    assert_relative_eq!(e("pbe"), e("pbex") + e("pbec"), max_relative = 1e-14);
    assert_relative_eq!(e("revpbe"), e("revpbex") + e("pbec"), max_relative = 1e-14);
    assert_relative_eq!(e("BLYP"), e("beckex") + e("lypc"), max_relative = 1e-14);
}

#[test]
fn weights_scale_energy() {
    let mut fun = XcFunctional::new();
    fun.set("slaterx", 0.5).unwrap();
    fun.set("pw92c", 2.0).unwrap();
    assert_eq!(fun.weight(FunctionalId::SlaterX), 0.5);
    assert!(!fun.is_gga());
    let d = DensVars::new(Vars::AB, &[1.0, 0.5]);
    let want = 0.5 * FunctionalId::SlaterX.energy(&d) + 2.0 * FunctionalId::Pw92C.energy(&d);
    assert_relative_eq!(fun.energy(&d), want, max_relative = 1e-15);
}

#[test]
fn exchange_variants_differ_only_in_enhancement() {
    // At zero gradient every GGA exchange reduces to Slater.
    let point = [0.6, 0.4, 0.0, 0.0, 0.0];
    let slater = partial("slaterx", Vars::ABGaaGabGbb, 0, &point)[0];
    for name in ["pbex", "revpbex", "rpbex", "pw91x"] {
        let e = partial(name, Vars::ABGaaGabGbb, 0, &point)[0];
        assert_relative_eq!(e, slater, max_relative = 1e-12);
    }
}

// ══════════════════════════════════════════════
//  3. Setup validation
// ══════════════════════════════════════════════

#[test]
fn setup_rejects_missing_gradient() {
    let mut fun = XcFunctional::new();
    fun.set("pbe", 1.0).unwrap();
    let err = fun.eval_setup(Vars::AB, Mode::PartialDerivatives, 1).unwrap_err();
    assert_eq!(err.bits(), 2);
    assert!(matches!(err, XcError::Vars { vars: Vars::AB, .. }));
}

#[test]
fn setup_rejects_high_orders() {
    let mut fun = XcFunctional::new();
    fun.set("slaterx", 1.0).unwrap();
    let err = fun.eval_setup(Vars::AB, Mode::PartialDerivatives, 4).unwrap_err();
    assert_eq!(err, XcError::Order { order: 4, max: 3 });
    assert_eq!(err.bits(), 1);
    assert!(fun.eval_setup(Vars::AB, Mode::Contracted, 4).is_ok());
    assert_eq!(fun.eval_setup(Vars::AB, Mode::Contracted, 5).unwrap_err().bits(), 1);
}

#[test]
fn setup_rejects_potential_mode() {
    let mut fun = XcFunctional::new();
    fun.set("slaterx", 1.0).unwrap();
    let err = fun.eval_setup(Vars::AB, Mode::Potential, 1).unwrap_err();
    assert_eq!(err, XcError::Mode(Mode::Potential));
    assert_eq!(err.bits(), 4);
    assert!(err.to_string().contains("Potential"));
}

#[test]
fn rejected_setup_clears_previous_one() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let mut fun = XcFunctional::new();
    fun.set("slaterx", 1.0).unwrap();
    fun.eval_setup(Vars::AB, Mode::PartialDerivatives, 1).unwrap();
    assert_eq!(fun.output_length(), 3);
    assert!(fun.eval_setup(Vars::AB, Mode::Potential, 1).is_err());
    let r = std::panic::catch_unwind(|| fun.output_length());
    assert!(r.is_err());
}

#[test]
fn unknown_name() {
    let mut fun = XcFunctional::new();
    let err = fun.set("no-such-functional", 1.0).unwrap_err();
    assert_eq!(err.bits(), -1);
}

#[test]
fn lengths_follow_setup() {
    let mut fun = XcFunctional::new();
    fun.set("pbe", 1.0).unwrap();
    fun.eval_setup(Vars::ABGaaGabGbb, Mode::PartialDerivatives, 2).unwrap();
    assert_eq!(fun.input_length(), 5);
    assert_eq!(fun.output_length(), 21);
    fun.eval_setup(Vars::NNxNyNz, Mode::Contracted, 3).unwrap();
    assert_eq!(fun.input_length(), 32);
    assert_eq!(fun.output_length(), 8);
}

#[test]
#[should_panic]
fn eval_without_setup_panics() {
    let mut fun = XcFunctional::new();
    fun.set("pbe", 1.0).unwrap();
    let mut out = [0.0];
    fun.eval(&[1.0, 1.0], &mut out);
}
