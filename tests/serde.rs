#![cfg(feature = "serde")]

use xctaylor::{FunctionalId, Mode, Vars, XcFunctional};

#[test]
fn vars_and_mode_roundtrip() {
    for vars in [Vars::A, Vars::ABGaaGabGbb, Vars::NNxNyNz] {
        let json = serde_json::to_string(&vars).unwrap();
        let back: Vars = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vars);
    }
    let json = serde_json::to_string(&Mode::Contracted).unwrap();
    assert_eq!(serde_json::from_str::<Mode>(&json).unwrap(), Mode::Contracted);
}

#[test]
fn configured_functional_roundtrip() {
    let mut fun = XcFunctional::new();
    fun.set("blyp", 0.8).unwrap();
    fun.set("slaterx", 0.2).unwrap();
    fun.eval_setup(Vars::ABGaaGabGbb, Mode::PartialDerivatives, 2)
        .unwrap();

    let json = serde_json::to_string(&fun).unwrap();
    let back: XcFunctional = serde_json::from_str(&json).unwrap();

    assert_eq!(back.weight(FunctionalId::LypC), 0.8);
    assert_eq!(back.weight(FunctionalId::SlaterX), 0.2);
    assert_eq!(back.output_length(), fun.output_length());

    let input = [0.4, 0.3, 0.05, 0.02, 0.04];
    let mut a = vec![0.0; fun.output_length()];
    let mut b = vec![0.0; back.output_length()];
    fun.eval(&input, &mut a);
    back.eval(&input, &mut b);
    assert_eq!(a, b);
}
