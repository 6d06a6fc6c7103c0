//! Dense truncated multivariate polynomial kernels.
//!
//! A polynomial in `nvar` variables of total degree at most `ndeg` is stored
//! as `polylen(nvar, ndeg)` coefficients in graded lexicographic order:
//! all degree-0 terms, then degree 1, and so on. Within one degree, terms are
//! ordered by decreasing power of the first variable, recursively. For three
//! variables this gives `1, x, y, z, x², xy, xz, y², yz, z², x³, x²y, …`.
//!
//! The homogeneous degree-`d` block of a polynomial in `nvar` variables has
//! exactly the layout of a full polynomial in `nvar - 1` variables of degree
//! `d` (drop the first variable's exponent). Every kernel here recurses on
//! that identity, so the index arithmetic stays O(1) per block and the
//! recursion bottoms out at zero variables (a single scalar).
//!
//! All functions take the variable count and degrees as runtime integers and
//! operate on slices.

use std::ops::Range;

use crate::Float;

/// Number of terms of a polynomial in `nvar` variables of total degree ≤ `ndeg`:
/// the binomial coefficient `C(nvar + ndeg, ndeg)`.
pub const fn polylen(nvar: usize, ndeg: usize) -> usize {
    let mut len = 1;
    let mut k = 1;
    while k <= nvar {
        len = len * (ndeg + k) / k;
        k += 1;
    }
    len
}

/// Index range of the homogeneous degree-`d` block.
///
/// For `nvar == 0` only the degree-0 block is non-empty.
#[inline]
pub fn block_range(nvar: usize, d: usize) -> Range<usize> {
    let start = if d == 0 { 0 } else { polylen(nvar, d - 1) };
    start..polylen(nvar, d)
}

/// Total degree of the term stored at linear index `idx`.
///
/// # Panics
///
/// Panics if `nvar == 0` and `idx > 0`.
pub fn term_degree(nvar: usize, idx: usize) -> usize {
    assert!(nvar > 0 || idx == 0, "term_degree: index {} out of range", idx);
    let mut d = 0;
    while polylen(nvar, d) <= idx {
        d += 1;
    }
    d
}

/// Linear index of the monomial with the given exponents.
///
/// ```
/// use xctaylor::polymul::term_index;
/// assert_eq!(term_index(&[2, 0, 1]), 12); // x²z
/// assert_eq!(term_index(&[0, 1, 1]), 8); // yz
/// ```
pub fn term_index(exps: &[usize]) -> usize {
    let nvar = exps.len();
    let mut remaining: usize = exps.iter().sum();
    let mut idx = 0;
    for (i, &e) in exps.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        idx += polylen(nvar - i, remaining - 1);
        remaining -= e;
    }
    idx
}

/// Exponents of the term at linear index `idx`; inverse of [`term_index`].
///
/// The variable count is `out.len()`.
///
/// # Panics
///
/// Panics if `out` is empty and `idx > 0`.
pub fn exponents(idx: usize, out: &mut [usize]) {
    let nvar = out.len();
    if nvar == 0 {
        assert_eq!(idx, 0, "exponents: index out of range for zero variables");
        return;
    }
    let mut d = term_degree(nvar, idx);
    let mut rest = idx - block_range(nvar, d).start;
    for i in 0..nvar {
        let m = nvar - i;
        if m == 1 {
            out[i] = d;
            break;
        }
        // Within the degree-d block of m variables, the first exponent runs
        // from d down to 0; each value k owns polylen(m - 2, d - k) terms.
        let mut k = d;
        loop {
            let cnt = polylen(m - 2, d - k);
            if rest < cnt {
                break;
            }
            rest -= cnt;
            k -= 1;
        }
        out[i] = k;
        d -= k;
    }
}

/// Step `m` to the exponents of the next term in graded lexicographic order.
pub fn next_exponents(m: &mut [usize]) {
    let nvar = m.len();
    if nvar == 0 {
        return;
    }
    let last = nvar - 1;
    if m[..last].iter().all(|&e| e == 0) {
        m[0] = m[last] + 1;
        if last > 0 {
            m[last] = 0;
        }
    } else if m[last - 1] > 0 {
        m[last] += 1;
        m[last - 1] -= 1;
    } else {
        next_exponents(&mut m[..last]);
        let tail = m[last];
        if let Some(j) = (0..last).rev().find(|&j| m[j] > 0) {
            m[j] += tail;
        }
        m[last] = 0;
    }
}

// ══════════════════════════════════════════════
//  Multiplication
// ══════════════════════════════════════════════

/// Recursive core: `dst += p1 * p2`, keeping only terms of degree ≤ `ddeg`.
fn mul_acc_rec<F: Float>(
    nvar: usize,
    dst: &mut [F],
    ddeg: usize,
    p1: &[F],
    d1: usize,
    p2: &[F],
    d2: usize,
) {
    if nvar == 0 {
        dst[0] = dst[0] + p1[0] * p2[0];
        return;
    }
    for i in 0..=d1.min(ddeg) {
        let b1 = &p1[block_range(nvar, i)];
        for j in 0..=d2.min(ddeg - i) {
            let b2 = &p2[block_range(nvar, j)];
            let bd = &mut dst[block_range(nvar, i + j)];
            mul_acc_rec(nvar - 1, bd, i + j, b1, i, b2, j);
        }
    }
}

fn check_poly<F>(what: &str, p: &[F], nvar: usize, deg: usize) {
    assert_eq!(
        p.len(),
        polylen(nvar, deg),
        "{}: expected {} coefficients for nvar={}, degree={}",
        what,
        polylen(nvar, deg),
        nvar,
        deg
    );
}

/// `dst += p1 * p2` where `dst` has degree `ddeg`; product terms above
/// `ddeg` are dropped (pass `ddeg = d1 + d2` for the exact product).
///
/// # Panics
///
/// Panics if any slice length disagrees with its declared degree.
pub fn mul_acc<F: Float>(
    nvar: usize,
    dst: &mut [F],
    ddeg: usize,
    p1: &[F],
    d1: usize,
    p2: &[F],
    d2: usize,
) {
    check_poly("mul_acc dst", dst, nvar, ddeg);
    check_poly("mul_acc p1", p1, nvar, d1);
    check_poly("mul_acc p2", p2, nvar, d2);
    mul_acc_rec(nvar, dst, ddeg, p1, d1, p2, d2);
}

/// `dst = p1 * p2` (overwriting), truncated to `dst`'s degree `ddeg`.
///
/// # Panics
///
/// Panics if any slice length disagrees with its declared degree.
pub fn mul_set<F: Float>(
    nvar: usize,
    dst: &mut [F],
    ddeg: usize,
    p1: &[F],
    d1: usize,
    p2: &[F],
    d2: usize,
) {
    dst.iter_mut().for_each(|c| *c = F::zero());
    mul_acc(nvar, dst, ddeg, p1, d1, p2, d2);
}

/// Truncated ("Taylor") product: `dst += p1 * p2`, all three of degree `ndeg`.
#[inline]
pub fn taylor_mul_acc<F: Float>(nvar: usize, ndeg: usize, dst: &mut [F], p1: &[F], p2: &[F]) {
    mul_acc(nvar, dst, ndeg, p1, ndeg, p2, ndeg);
}

/// Truncated ("Taylor") product: `dst = p1 * p2`, all three of degree `ndeg`.
#[inline]
pub fn taylor_mul_set<F: Float>(nvar: usize, ndeg: usize, dst: &mut [F], p1: &[F], p2: &[F]) {
    mul_set(nvar, dst, ndeg, p1, ndeg, p2, ndeg);
}

/// In-place truncated product `dst *= p`, both of degree `ndeg`.
///
/// Degrees are rebuilt from the top down, so each block only reads blocks
/// that still hold their old values.
pub fn multo<F: Float>(nvar: usize, ndeg: usize, dst: &mut [F], p: &[F]) {
    check_poly("multo dst", dst, nvar, ndeg);
    check_poly("multo p", p, nvar, ndeg);
    let p0 = p[0];
    if nvar == 0 {
        dst[0] = dst[0] * p0;
        return;
    }
    for k in (0..=ndeg).rev() {
        let rk = block_range(nvar, k);
        let (lo, hi) = dst.split_at_mut(rk.start);
        let bk = &mut hi[..rk.len()];
        bk.iter_mut().for_each(|c| *c = *c * p0);
        for i in 0..k {
            let j = k - i;
            mul_acc_rec(
                nvar - 1,
                bk,
                k,
                &lo[block_range(nvar, i)],
                i,
                &p[block_range(nvar, j)],
                j,
            );
        }
    }
}

/// In-place truncated product `dst *= (p - p[0])`: the constant term of `p`
/// is treated as zero, which lets the composition loop skip it entirely.
pub fn multo_skipconst<F: Float>(nvar: usize, ndeg: usize, dst: &mut [F], p: &[F]) {
    check_poly("multo_skipconst dst", dst, nvar, ndeg);
    check_poly("multo_skipconst p", p, nvar, ndeg);
    if nvar == 0 {
        dst[0] = F::zero();
        return;
    }
    for k in (1..=ndeg).rev() {
        let rk = block_range(nvar, k);
        let (lo, hi) = dst.split_at_mut(rk.start);
        let bk = &mut hi[..rk.len()];
        bk.iter_mut().for_each(|c| *c = F::zero());
        for i in 0..k {
            let j = k - i;
            mul_acc_rec(
                nvar - 1,
                bk,
                k,
                &lo[block_range(nvar, i)],
                i,
                &p[block_range(nvar, j)],
                j,
            );
        }
    }
    dst[0] = F::zero();
}

/// Horner composition: `dst = Σ_i coeffs[i] * (p - p[0])^i`, truncated to
/// degree `ndeg`.
///
/// # Panics
///
/// Panics if `coeffs` is empty or the slice lengths disagree with `ndeg`.
pub fn compose0<F: Float>(nvar: usize, ndeg: usize, dst: &mut [F], p: &[F], coeffs: &[F]) {
    assert!(!coeffs.is_empty(), "compose0: empty coefficient series");
    check_poly("compose0 dst", dst, nvar, ndeg);
    let n = coeffs.len() - 1;
    dst.iter_mut().for_each(|c| *c = F::zero());
    dst[0] = coeffs[n];
    for i in (0..n).rev() {
        multo_skipconst(nvar, ndeg, dst, p);
        dst[0] = dst[0] + coeffs[i];
    }
}

// ══════════════════════════════════════════════
//  Contraction
// ══════════════════════════════════════════════

fn contract_rec<F: Float>(
    nvar: usize,
    p1: &mut [F],
    d1: usize,
    p2: &[F],
    d2: usize,
    p3: &[F],
    d3: usize,
) {
    if nvar == 0 {
        p1[0] = p1[0] + p2[0] * p3[0];
        return;
    }
    for i in 0..=d1.min(d3) {
        let b1 = &mut p1[block_range(nvar, i)];
        for j in 0..=d2.min(d3 - i) {
            contract_rec(
                nvar - 1,
                b1,
                i,
                &p2[block_range(nvar, j)],
                j,
                &p3[block_range(nvar, i + j)],
                i + j,
            );
        }
    }
}

/// Adjoint of multiplication: fills `p1` (degree `d1`) so that
/// `dot(P * p2, p3) == dot(P, p1)` for every polynomial `P` of degree `d1`.
///
/// `p1[i] = Σ_j p2[j] · p3[index(e_i + e_j)]`, skipping products above `d3`.
///
/// # Panics
///
/// Panics if any slice length disagrees with its declared degree.
pub fn contract<F: Float>(
    nvar: usize,
    p1: &mut [F],
    d1: usize,
    p2: &[F],
    d2: usize,
    p3: &[F],
    d3: usize,
) {
    check_poly("contract p1", p1, nvar, d1);
    check_poly("contract p2", p2, nvar, d2);
    check_poly("contract p3", p3, nvar, d3);
    p1.iter_mut().for_each(|c| *c = F::zero());
    contract_rec(nvar, p1, d1, p2, d2, p3, d3);
}

// ══════════════════════════════════════════════
//  Evaluation and differentiation
// ══════════════════════════════════════════════

/// Value of the homogeneous degree-`k` block at `x`: Horner in `x[0]` over
/// the sub-blocks of the remaining variables.
fn eval_homog<F: Float>(nvar: usize, block: &[F], k: usize, x: &[F]) -> F {
    if nvar == 0 {
        return if k == 0 { block[0] } else { F::zero() };
    }
    let mut acc = F::zero();
    for e in 0..=k {
        let sub = &block[block_range(nvar - 1, e)];
        acc = acc * x[0] + eval_homog(nvar - 1, sub, e, &x[1..]);
    }
    acc
}

/// Evaluate a degree-`ndeg` polynomial at the point `x` (`x.len() == nvar`).
///
/// # Panics
///
/// Panics if `x` or `p` has the wrong length.
pub fn eval<F: Float>(nvar: usize, ndeg: usize, p: &[F], x: &[F]) -> F {
    check_poly("eval", p, nvar, ndeg);
    assert_eq!(x.len(), nvar, "eval: point has wrong dimension");
    let mut sum = F::zero();
    for k in 0..=ndeg {
        sum = sum + eval_homog(nvar, &p[block_range(nvar, k)], k, x);
    }
    sum
}

fn differentiate_rec<F: Float>(nvar: usize, src: &[F], deg: usize, var: usize, dst: &mut [F]) {
    for d in 1..=deg {
        let sb = &src[block_range(nvar, d)];
        let db = &mut dst[block_range(nvar, d - 1)];
        if var == 0 {
            // Sub-block e of the remaining variables carries x0^(d-e).
            for e in 0..d {
                let fac = F::from_usize_lossy(d - e);
                for r in block_range(nvar - 1, e) {
                    db[r] = fac * sb[r];
                }
            }
        } else {
            differentiate_rec(nvar - 1, sb, d, var - 1, db);
        }
    }
}

/// `dst = ∂src/∂x_var`, where `src` has degree `ndeg ≥ 1` and `dst` degree `ndeg - 1`.
///
/// # Panics
///
/// Panics if `var >= nvar`, `ndeg == 0`, or a slice has the wrong length.
pub fn differentiate<F: Float>(nvar: usize, ndeg: usize, src: &[F], var: usize, dst: &mut [F]) {
    assert!(var < nvar, "differentiate: variable {} out of range", var);
    assert!(ndeg > 0, "differentiate: degree must be at least 1");
    check_poly("differentiate src", src, nvar, ndeg);
    check_poly("differentiate dst", dst, nvar, ndeg - 1);
    dst.iter_mut().for_each(|c| *c = F::zero());
    differentiate_rec(nvar, src, ndeg, var, dst);
}

/// Multiply each coefficient by `∏ e_i!`, turning scaled Taylor coefficients
/// into partial derivatives.
pub fn deriv_facs<F: Float>(nvar: usize, ndeg: usize, p: &mut [F]) {
    check_poly("deriv_facs", p, nvar, ndeg);
    deriv_facs_rec(nvar, ndeg, p);
}

fn deriv_facs_rec<F: Float>(nvar: usize, ndeg: usize, p: &mut [F]) {
    if nvar == 0 {
        return;
    }
    for d in 0..=ndeg {
        let block = &mut p[block_range(nvar, d)];
        deriv_facs_rec(nvar - 1, d, block);
        let mut fac = F::one();
        // Sub-block e carries x0^(d-e); walk e downwards so fac = (d-e)!.
        for e in (0..=d).rev() {
            if d - e > 1 {
                fac = fac * F::from_usize_lossy(d - e);
            }
            for r in block_range(nvar - 1, e) {
                block[r] = block[r] * fac;
            }
        }
    }
}

/// `p(x) → p(alpha·x)`: scale the degree-`k` block by `alphaᵏ`.
pub fn stretch<F: Float>(nvar: usize, ndeg: usize, p: &mut [F], alpha: F) {
    check_poly("stretch", p, nvar, ndeg);
    let mut a = F::one();
    for k in 1..=ndeg {
        a = a * alpha;
        for c in p[block_range(nvar, k)].iter_mut() {
            *c = *c * a;
        }
    }
}

// ══════════════════════════════════════════════
//  Layout changes
// ══════════════════════════════════════════════

/// Substitute `x_i = Σ_j t[i * nvar_dst + j] · y_j` into `src` (variables `x`,
/// `nvar_src` of them) and store the result over the `y` variables in `dst`.
/// Both polynomials have degree `ndeg`.
///
/// # Panics
///
/// Panics if `t` is not `nvar_src × nvar_dst` or a slice has the wrong length.
pub fn linear_transform<F: Float>(
    nvar_dst: usize,
    dst: &mut [F],
    nvar_src: usize,
    src: &[F],
    ndeg: usize,
    t: &[F],
) {
    check_poly("linear_transform dst", dst, nvar_dst, ndeg);
    check_poly("linear_transform src", src, nvar_src, ndeg);
    assert_eq!(
        t.len(),
        nvar_src * nvar_dst,
        "linear_transform: matrix must be nvar_src × nvar_dst"
    );
    let len = dst.len();
    // The substituted linear forms, one per source variable.
    let mut forms = vec![F::zero(); nvar_src * len];
    for i in 0..nvar_src {
        let form = &mut forms[i * len..(i + 1) * len];
        if ndeg > 0 {
            for j in 0..nvar_dst {
                form[1 + j] = t[i * nvar_dst + j];
            }
        }
    }

    dst.iter_mut().for_each(|c| *c = F::zero());
    let mut exps = vec![0usize; nvar_src];
    let mut term = vec![F::zero(); len];
    for &c in src.iter() {
        if c != F::zero() {
            term.iter_mut().for_each(|v| *v = F::zero());
            term[0] = c;
            for (i, &e) in exps.iter().enumerate() {
                for _ in 0..e {
                    multo(nvar_dst, ndeg, &mut term, &forms[i * len..(i + 1) * len]);
                }
            }
            for (d, v) in dst.iter_mut().zip(term.iter()) {
                *d = *d + *v;
            }
        }
        next_exponents(&mut exps);
    }
}

/// Copy `src` into a layout with a different variable count or degree.
///
/// Terms above `ddeg` or involving variables beyond `nvar_dst` are dropped;
/// terms missing from `src` are zero.
pub fn convert<F: Float>(
    nvar_dst: usize,
    ddeg: usize,
    dst: &mut [F],
    nvar_src: usize,
    sdeg: usize,
    src: &[F],
) {
    check_poly("convert dst", dst, nvar_dst, ddeg);
    check_poly("convert src", src, nvar_src, sdeg);
    dst.iter_mut().for_each(|c| *c = F::zero());
    let mut exps = vec![0usize; nvar_src];
    let mut target = vec![0usize; nvar_dst];
    for &c in src.iter() {
        let deg: usize = exps.iter().sum();
        let dropped = exps.iter().skip(nvar_dst).any(|&e| e > 0);
        if deg <= ddeg && !dropped {
            target.iter_mut().for_each(|e| *e = 0);
            for (t, &e) in target.iter_mut().zip(exps.iter()) {
                *t = e;
            }
            dst[term_index(&target)] = c;
        }
        next_exponents(&mut exps);
    }
}

/// Keep only the homogeneous degree-`d` part of `src` (both of degree `ndeg`).
pub fn pick_order<F: Float>(nvar: usize, ndeg: usize, src: &[F], d: usize, dst: &mut [F]) {
    check_poly("pick_order src", src, nvar, ndeg);
    check_poly("pick_order dst", dst, nvar, ndeg);
    assert!(d <= ndeg, "pick_order: degree {} above {}", d, ndeg);
    dst.iter_mut().for_each(|c| *c = F::zero());
    let r = block_range(nvar, d);
    dst[r.clone()].copy_from_slice(&src[r]);
}

/// Exponent counts of the flat tensor index `flat` over `nvar^d` entries.
fn tensor_exponents(nvar: usize, d: usize, mut flat: usize, exps: &mut [usize]) {
    exps.iter_mut().for_each(|e| *e = 0);
    for _ in 0..d {
        exps[flat % nvar] += 1;
        flat /= nvar;
    }
}

fn multinomial<F: Float>(d: usize, exps: &[usize]) -> F {
    let fact = |n: usize| (2..=n).fold(F::one(), |acc, k| acc * F::from_usize_lossy(k));
    exps.iter().fold(fact(d), |acc, &e| acc / fact(e))
}

/// Expand the homogeneous degree-`d` part of `p` into a full symmetric
/// tensor with `nvar^d` entries, so that `Σ T[i₁…i_d] y_{i₁}⋯y_{i_d}`
/// reproduces that part.
pub fn to_tensor<F: Float>(nvar: usize, ndeg: usize, p: &[F], d: usize, out: &mut [F]) {
    check_poly("to_tensor", p, nvar, ndeg);
    assert!(d <= ndeg, "to_tensor: degree {} above {}", d, ndeg);
    assert_eq!(out.len(), nvar.pow(d as u32), "to_tensor: output must hold nvar^d entries");
    let mut exps = vec![0usize; nvar];
    for (flat, o) in out.iter_mut().enumerate() {
        tensor_exponents(nvar, d, flat, &mut exps);
        *o = p[term_index(&exps)] / multinomial::<F>(d, &exps);
    }
}

/// Inverse of [`to_tensor`]: accumulate a (not necessarily symmetric)
/// degree-`d` tensor into the matching block of `p`. Other blocks are untouched.
pub fn from_tensor<F: Float>(nvar: usize, ndeg: usize, p: &mut [F], d: usize, tensor: &[F]) {
    check_poly("from_tensor", p, nvar, ndeg);
    assert!(d <= ndeg, "from_tensor: degree {} above {}", d, ndeg);
    assert_eq!(tensor.len(), nvar.pow(d as u32), "from_tensor: tensor must hold nvar^d entries");
    for c in p[block_range(nvar, d)].iter_mut() {
        *c = F::zero();
    }
    let mut exps = vec![0usize; nvar];
    for (flat, &v) in tensor.iter().enumerate() {
        tensor_exponents(nvar, d, flat, &mut exps);
        let i = term_index(&exps);
        p[i] = p[i] + v;
    }
}
