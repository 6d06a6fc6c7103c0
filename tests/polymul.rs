use approx::assert_relative_eq;
use xctaylor::polymul::{self, polylen};
use xctaylor::Polynomial;

// ══════════════════════════════════════════════
//  1. Index arithmetic
// ══════════════════════════════════════════════

#[test]
fn polylen_is_binomial() {
    assert_eq!(polylen(0, 7), 1);
    assert_eq!(polylen(1, 6), 7);
    assert_eq!(polylen(2, 2), 6);
    assert_eq!(polylen(3, 3), 20);
    assert_eq!(polylen(4, 5), 126);
    assert_eq!(polylen(5, 3), 56);
}

#[test]
fn graded_lex_order_three_variables() {
    // 1 x y z x² xy xz y² yz z² x³ x²y x²z xy² xyz xz² y³ y²z yz² z³
    let expected: [[usize; 3]; 20] = [
        [0, 0, 0],
        [1, 0, 0],
        [0, 1, 0],
        [0, 0, 1],
        [2, 0, 0],
        [1, 1, 0],
        [1, 0, 1],
        [0, 2, 0],
        [0, 1, 1],
        [0, 0, 2],
        [3, 0, 0],
        [2, 1, 0],
        [2, 0, 1],
        [1, 2, 0],
        [1, 1, 1],
        [1, 0, 2],
        [0, 3, 0],
        [0, 2, 1],
        [0, 1, 2],
        [0, 0, 3],
    ];
    let mut step = [0usize; 3];
    for (i, e) in expected.iter().enumerate() {
        assert_eq!(polymul::term_index(e), i, "term_index({:?})", e);
        let mut out = [0usize; 3];
        polymul::exponents(i, &mut out);
        assert_eq!(&out, e, "exponents({})", i);
        assert_eq!(step, *e, "next_exponents at {}", i);
        assert_eq!(polymul::term_degree(3, i), e.iter().sum::<usize>());
        polymul::next_exponents(&mut step);
    }
}

#[test]
fn index_round_trip_many_variables() {
    let nvar = 5;
    let mut e = vec![0usize; nvar];
    for i in 0..polylen(nvar, 4) {
        polymul::exponents(i, &mut e);
        assert_eq!(polymul::term_index(&e), i);
    }
}

#[test]
fn block_ranges_partition() {
    let mut next = 0;
    for d in 0..=4 {
        let r = polymul::block_range(3, d);
        assert_eq!(r.start, next);
        next = r.end;
    }
    assert_eq!(next, polylen(3, 4));
}

// ══════════════════════════════════════════════
//  2. Products
// ══════════════════════════════════════════════

#[test]
fn exact_product_of_linear_forms() {
    // (1 + 2x + 3y)(4 - x + y) = 4 + 7x + 13y - 2x² - xy + 3y²
    let a = [1.0, 2.0, 3.0];
    let b = [4.0, -1.0, 1.0];
    let mut c = [0.0; 6];
    polymul::mul_set(2, &mut c, 2, &a, 1, &b, 1);
    assert_eq!(c, [4.0, 7.0, 13.0, -2.0, -1.0, 3.0]);
    polymul::mul_acc(2, &mut c, 2, &a, 1, &b, 1);
    assert_eq!(c, [8.0, 14.0, 26.0, -4.0, -2.0, 6.0]);
}

#[test]
fn truncated_product_drops_high_terms() {
    let a = [1.0, 2.0, 3.0];
    let b = [4.0, -1.0, 1.0];
    let mut c = [0.0; 3];
    polymul::mul_set(2, &mut c, 1, &a, 1, &b, 1);
    assert_eq!(c, [4.0, 7.0, 13.0]);
}

#[test]
fn multo_matches_taylor_mul() {
    let nvar = 3;
    let ndeg = 3;
    let len = polylen(nvar, ndeg);
    let p: Vec<f64> = (0..len).map(|i| 1.0 + 0.5 * i as f64).collect();
    let q: Vec<f64> = (0..len).map(|i| 2.0 - 0.25 * (i % 5) as f64).collect();
    let mut want = vec![0.0; len];
    polymul::taylor_mul_set(nvar, ndeg, &mut want, &p, &q);
    let mut got = p.clone();
    polymul::multo(nvar, ndeg, &mut got, &q);
    for (g, w) in got.iter().zip(&want) {
        assert_relative_eq!(*g, *w, max_relative = 1e-14);
    }

    let mut q0 = q.clone();
    q0[0] = 0.0;
    polymul::taylor_mul_set(nvar, ndeg, &mut want, &p, &q0);
    let mut got = p.clone();
    polymul::multo_skipconst(nvar, ndeg, &mut got, &q);
    for (g, w) in got.iter().zip(&want) {
        assert_relative_eq!(*g, *w, max_relative = 1e-14, epsilon = 1e-14);
    }
}

#[test]
fn compose0_geometric_series() {
    // Σ pⁱ with p = x + y is 1/(1 - x - y)
    let p = [0.0, 1.0, 1.0, 0.0, 0.0, 0.0];
    let mut out = [0.0; 6];
    polymul::compose0(2, 2, &mut out, &p, &[1.0, 1.0, 1.0]);
    assert_eq!(out, [1.0, 1.0, 1.0, 1.0, 2.0, 1.0]);
}

// ══════════════════════════════════════════════
//  3. Evaluation, differentiation and contraction
// ══════════════════════════════════════════════

#[test]
fn polynomial_eval_and_product_identity() {
    let mut p1 = Polynomial::<f64, 4, 2, 15>::zero();
    let mut p2 = Polynomial::<f64, 4, 2, 15>::zero();
    for i in 0..10 {
        p1.coeffs[i] = (i + 1) as f64;
        p2.coeffs[i] = (i + 1 + (i & 3)) as f64;
    }
    let pp: Polynomial<f64, 4, 4, 70> = p1.mul(&p2);
    let x = [3.1, 4.0, 5.0, 6.0];
    let lhs = pp.eval(&x);
    assert!((lhs - p1.eval(&x) * p2.eval(&x)).abs() <= 1e-15 * lhs.abs());
}

#[test]
fn differentiate_each_variable() {
    // p = 1 + 2x + 3y + 4x² + 5xy + 6y²
    let p = Polynomial::<f64, 2, 2, 6>::from_coeffs([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let dx: Polynomial<f64, 2, 1, 3> = p.differentiate(0);
    let dy: Polynomial<f64, 2, 1, 3> = p.differentiate(1);
    assert_eq!(dx.coeffs, [2.0, 8.0, 5.0]);
    assert_eq!(dy.coeffs, [3.0, 5.0, 12.0]);
}

#[test]
fn contract_is_adjoint_of_mul() {
    let p2 = Polynomial::<f64, 2, 1, 3>::from_coeffs([0.5, -1.0, 2.0]);
    let p3 = Polynomial::<f64, 2, 3, 10>::from_coeffs([
        1.0, 2.0, -3.0, 0.5, 4.0, -1.5, 2.5, 1.0, -2.0, 3.0,
    ]);
    let p1: Polynomial<f64, 2, 2, 6> = p3.contract(&p2);
    // Any P of degree 2: dot(P·p2, p3) == dot(P, p1)
    let big = Polynomial::<f64, 2, 2, 6>::from_coeffs([1.5, -0.5, 2.0, 3.0, -1.0, 0.25]);
    let prod: Polynomial<f64, 2, 3, 10> = big.mul(&p2);
    assert_relative_eq!(prod.dot(&p3), big.dot(&p1), max_relative = 1e-14);
}

#[test]
fn linear_transform_rotates() {
    // p(x, y) = x² ; x = u + v, y = u - v
    let mut p = Polynomial::<f64, 2, 2, 6>::zero();
    p.set_term(&[2, 0], 1.0);
    let q: Polynomial<f64, 2, 2, 6> = p.linear_transform(&[1.0, 1.0, 1.0, -1.0]);
    // (u + v)² = u² + 2uv + v²
    assert_eq!(q.coeffs, [0.0, 0.0, 0.0, 1.0, 2.0, 1.0]);
    assert_relative_eq!(q.eval(&[0.3, 0.9]), p.eval(&[1.2, -0.6]), max_relative = 1e-15);
}

#[test]
fn deriv_facs_scales_by_factorials() {
    let p = Polynomial::<f64, 2, 3, 10>::from_coeffs([1.0; 10]);
    let d = p.deriv_facs();
    assert_eq!(d.term(&[2, 0]), 2.0);
    assert_eq!(d.term(&[1, 1]), 1.0);
    assert_eq!(d.term(&[3, 0]), 6.0);
    assert_eq!(d.term(&[2, 1]), 2.0);
    assert_eq!(d.term(&[0, 3]), 6.0);
}

#[test]
fn convert_and_pick_order() {
    let src: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    // 2 variables, degree 3 -> 3 variables, degree 2
    let mut dst = vec![0.0; polylen(3, 2)];
    polymul::convert(3, 2, &mut dst, 2, 3, &src);
    assert_eq!(dst, [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 6.0, 0.0, 0.0]);

    let mut picked = vec![0.0; 10];
    polymul::pick_order(2, 3, &src, 1, &mut picked);
    assert_eq!(picked, [0.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn stretch_scales_degree_blocks() {
    let mut p = [1.0; 6];
    polymul::stretch(2, 2, &mut p, 3.0);
    assert_eq!(p, [1.0, 3.0, 3.0, 9.0, 9.0, 9.0]);
}

#[test]
fn polynomial_to_taylor_shares_layout() {
    let p = Polynomial::<f64, 2, 2, 6>::from_coeffs([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let t = p.to_taylor();
    assert_eq!(t.to_polynomial(), p);
    assert_eq!((p + p - p).coeffs, p.coeffs);
    assert_eq!((-p).coeffs[5], -6.0);
}
