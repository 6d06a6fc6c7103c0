//! Functional registry, setup validation and the derivative evaluator.
//!
//! An [`XcFunctional`] is a weighted sum of [`FunctionalId`] terms. After
//! [`eval_setup`](XcFunctional::eval_setup) fixes the input variables, the
//! output mode and the derivative order, [`eval`](XcFunctional::eval) seeds
//! [`CubeTaylor`] numbers on the inputs and reads the requested derivatives
//! back from the energy density.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::ctaylor::{CubeTaylor, CNST, VAR0, VAR1, VAR2};
use crate::densvars::{DensVars, Vars, DENSITY, GRADIENT};
use crate::functionals::{becke, lyp, pbe, pw92, pw9x, slater};
use crate::polymul::polylen;
use crate::scalar::XcScalar;
use crate::MAX_ORDER;

/// Highest order the partial-derivative mode supports.
pub const MAX_PARTIAL_ORDER: usize = 3;

// ══════════════════════════════════════════════
//  Functional terms
// ══════════════════════════════════════════════

/// One energy-density term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionalId {
    SlaterX,
    Pw92C,
    PbeX,
    RevPbeX,
    RPbeX,
    Pw91X,
    PbeC,
    BeckeX,
    BeckeCorrX,
    LypC,
}

impl FunctionalId {
    pub const COUNT: usize = 10;

    pub const ALL: [FunctionalId; Self::COUNT] = [
        FunctionalId::SlaterX,
        FunctionalId::Pw92C,
        FunctionalId::PbeX,
        FunctionalId::RevPbeX,
        FunctionalId::RPbeX,
        FunctionalId::Pw91X,
        FunctionalId::PbeC,
        FunctionalId::BeckeX,
        FunctionalId::BeckeCorrX,
        FunctionalId::LypC,
    ];

    /// Registry name (lower case).
    pub fn name(self) -> &'static str {
        match self {
            FunctionalId::SlaterX => "slaterx",
            FunctionalId::Pw92C => "pw92c",
            FunctionalId::PbeX => "pbex",
            FunctionalId::RevPbeX => "revpbex",
            FunctionalId::RPbeX => "rpbex",
            FunctionalId::Pw91X => "pw91x",
            FunctionalId::PbeC => "pbec",
            FunctionalId::BeckeX => "beckex",
            FunctionalId::BeckeCorrX => "beckecorrx",
            FunctionalId::LypC => "lypc",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FunctionalId::SlaterX => "Slater LDA exchange",
            FunctionalId::Pw92C => "PW92 LDA correlation",
            FunctionalId::PbeX => "PBE exchange",
            FunctionalId::RevPbeX => "Revised PBE exchange",
            FunctionalId::RPbeX => "RPBE exchange",
            FunctionalId::Pw91X => "Perdew-Wang 1991 GGA exchange",
            FunctionalId::PbeC => "PBE correlation",
            FunctionalId::BeckeX => "Becke 88 exchange",
            FunctionalId::BeckeCorrX => "Becke 88 exchange gradient correction",
            FunctionalId::LypC => "LYP correlation",
        }
    }

    /// Bitmask of the density quantities the term reads.
    pub fn depends(self) -> u32 {
        match self {
            FunctionalId::SlaterX | FunctionalId::Pw92C => DENSITY,
            _ => DENSITY | GRADIENT,
        }
    }

    /// Energy density of this term at one point.
    pub fn energy<T: XcScalar>(self, d: &DensVars<T>) -> T {
        match self {
            FunctionalId::SlaterX => slater::slaterx(d),
            FunctionalId::Pw92C => pw92::pw92c(d),
            FunctionalId::PbeX => pbe::pbex(d),
            FunctionalId::RevPbeX => pbe::revpbex(d),
            FunctionalId::RPbeX => pbe::rpbex(d),
            FunctionalId::Pw91X => pw9x::pw91x(d),
            FunctionalId::PbeC => pbe::pbec(d),
            FunctionalId::BeckeX => becke::beckex(d),
            FunctionalId::BeckeCorrX => becke::beckecorrx(d),
            FunctionalId::LypC => lyp::lypc(d),
        }
    }

    /// Published reference derivatives for this term, if any.
    pub fn reference(self) -> Option<Reference> {
        const SPIN_POINT: [f64; 2] = [39.0, 38.0];
        const GGA_POINT: [f64; 5] = [39.0, 38.0, 0.81e6, 0.82e6, 0.82e6];
        match self {
            FunctionalId::SlaterX => Some(Reference {
                vars: Vars::AB,
                order: 2,
                input: &SPIN_POINT,
                output: &[
                    -241.948147838,
                    -4.20747936684,
                    -4.17120618800,
                    -3.59613621097e-2,
                    0.0,
                    -3.65895279649e-2,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::Pw92C => Some(Reference {
                vars: Vars::AB,
                order: 2,
                input: &SPIN_POINT,
                output: &[
                    -8.4713855882783946,
                    -0.11861930857502517,
                    -0.12041769989725633,
                    7.5202855619095870e-4,
                    -1.0249091426230799e-3,
                    7.9516089195232130e-4,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::PbeX => Some(Reference {
                vars: Vars::ABGaaGabGbb,
                order: 2,
                input: &GGA_POINT,
                output: &[
                    -276.589791995,
                    -3.82556082420,
                    -3.78108116179,
                    -1.74145337536e-5,
                    0.0,
                    -1.75120610339e-5,
                    -4.29564214817e-2,
                    0.0,
                    1.85237729809e-7,
                    0.0,
                    0.0,
                    -4.24802511645e-2,
                    0.0,
                    0.0,
                    1.61839553501e-7,
                    7.40514207206e-12,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    7.86563034093e-12,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::Pw91X => Some(Reference {
                vars: Vars::ABGaaGabGbb,
                order: 2,
                input: &[82.0, 81.0, 4.9e6, 4.9e6, 4.9e6],
                output: &[
                    -739.934270280,
                    -5.00194130392,
                    -4.97593413511,
                    -6.61655297347e-6,
                    0.0,
                    -6.65149614704e-6,
                    -2.59426653786e-2,
                    0.0,
                    3.52029178373e-8,
                    0.0,
                    0.0,
                    -2.60706018375e-2,
                    0.0,
                    0.0,
                    3.46740334540e-8,
                    4.54242196579e-13,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    4.63780470889e-13,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::PbeC => Some(Reference {
                vars: Vars::ABGaaGabGbb,
                order: 2,
                input: &GGA_POINT,
                output: &[
                    -1.84442072405,
                    -8.14334534280e-2,
                    -8.20182123795e-2,
                    5.10839298939e-7,
                    1.02167859788e-6,
                    5.10839298939e-7,
                    -1.24297349784e-3,
                    -1.83505806584e-3,
                    1.34850158624e-8,
                    2.69700317248e-8,
                    1.34850158624e-8,
                    -1.25767116982e-3,
                    1.36189478240e-8,
                    2.72378956480e-8,
                    1.36189478240e-8,
                    -2.16571369852e-13,
                    -4.33142739704e-13,
                    -2.16571369852e-13,
                    -8.66285479407e-13,
                    -4.33142739704e-13,
                    -2.16571369852e-13,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::BeckeX => Some(Reference {
                vars: Vars::ABGaaGabGbb,
                order: 2,
                input: &GGA_POINT,
                output: &[
                    -277.987329958,
                    -3.85951846654,
                    -3.81309494319,
                    -1.72434478018e-5,
                    0.0,
                    -1.73712338362e-5,
                    -4.41426807406e-2,
                    0.0,
                    2.01415922856e-7,
                    0.0,
                    0.0,
                    -4.47245742260e-2,
                    0.0,
                    0.0,
                    1.95961359539e-7,
                    7.00742719647e-12,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    7.18678968862e-12,
                ],
                threshold: 1e-11,
            }),
            FunctionalId::LypC => Some(Reference {
                vars: Vars::ABGaaGabGbb,
                order: 2,
                input: &GGA_POINT,
                output: &[
                    -4.02158795173,
                    -7.62734644914e-2,
                    -8.30226435821e-2,
                    3.01052145436e-7,
                    2.20298633297e-7,
                    3.69624286402e-7,
                    3.31769729999e-3,
                    -2.48438749270e-3,
                    -3.98359773843e-8,
                    -3.35415277613e-9,
                    2.63970784129e-8,
                    3.84280348438e-3,
                    2.75886078235e-8,
                    -6.85474898360e-9,
                    -4.33118929134e-8,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                ],
                threshold: 1e-11,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for FunctionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference evaluation: partial derivatives of one term at one point.
#[derive(Clone, Copy, Debug)]
pub struct Reference {
    pub vars: Vars,
    pub order: usize,
    pub input: &'static [f64],
    pub output: &'static [f64],
    /// Relative tolerance per output entry.
    pub threshold: f64,
}

// ══════════════════════════════════════════════
//  Errors
// ══════════════════════════════════════════════

/// Errors from configuring an [`XcFunctional`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XcError {
    /// Requested derivative order is not supported in the chosen mode.
    Order {
        /// Requested order.
        order: usize,
        /// Highest order the mode supports.
        max: usize,
    },
    /// The input variables lack a quantity an active term depends on.
    Vars {
        vars: Vars,
        /// Dependency bits of the active terms.
        depends: u32,
    },
    /// The evaluation mode is not available.
    Mode(Mode),
    /// No functional or alias with this name.
    UnknownName(String),
}

impl XcError {
    /// Status code: `1` order, `2` variables, `4` mode, `-1` unknown name.
    pub fn bits(&self) -> i32 {
        match self {
            XcError::Order { .. } => 1,
            XcError::Vars { .. } => 2,
            XcError::Mode(_) => 4,
            XcError::UnknownName(_) => -1,
        }
    }
}

impl fmt::Display for XcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XcError::Order { order, max } => {
                write!(f, "derivative order {} not supported (max {})", order, max)
            }
            XcError::Vars { vars, depends } => write!(
                f,
                "variables {:?} provide {:#b} but the functional needs {:#b}",
                vars,
                vars.provides(),
                depends
            ),
            XcError::Mode(mode) => write!(f, "evaluation mode {:?} not supported", mode),
            XcError::UnknownName(name) => write!(f, "unknown functional or alias '{}'", name),
        }
    }
}

impl std::error::Error for XcError {}

// ══════════════════════════════════════════════
//  Registry
// ══════════════════════════════════════════════

/// A named weighted sum of terms. Plain functionals are a single term with weight 1.
#[derive(Clone, Debug)]
pub struct Entry {
    pub name: &'static str,
    pub description: &'static str,
    pub terms: Vec<(FunctionalId, f64)>,
}

/// Name table for functionals and aliases.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: BTreeMap<&'static str, Entry>,
}

impl Registry {
    /// Build the table of every functional plus the standard aliases.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for id in FunctionalId::ALL {
            entries.insert(
                id.name(),
                Entry {
                    name: id.name(),
                    description: id.description(),
                    terms: vec![(id, 1.0)],
                },
            );
        }
        let aliases: [(&'static str, &'static str, [FunctionalId; 2]); 3] = [
            ("pbe", "PBE exchange-correlation", [FunctionalId::PbeX, FunctionalId::PbeC]),
            ("blyp", "Becke exchange with LYP correlation", [FunctionalId::BeckeX, FunctionalId::LypC]),
            ("revpbe", "Revised PBE exchange-correlation", [FunctionalId::RevPbeX, FunctionalId::PbeC]),
        ];
        for (name, description, ids) in aliases {
            entries.insert(
                name,
                Entry {
                    name,
                    description,
                    terms: ids.iter().map(|&id| (id, 1.0)).collect(),
                },
            );
        }
        tracing::debug!(entries = entries.len(), "functional registry built");
        Registry { entries }
    }

    /// The process-wide table, built on first use.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::new)
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name.to_ascii_lowercase().as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// ══════════════════════════════════════════════
//  XcFunctional
// ══════════════════════════════════════════════

/// Output mode of [`XcFunctional::eval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Every partial derivative up to the order, in graded order.
    PartialDerivatives,
    /// Taylor coefficients along caller-supplied perturbation directions.
    Contracted,
    /// Exchange-correlation potential. Not supported.
    Potential,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Setup {
    vars: Vars,
    mode: Mode,
    order: usize,
}

/// A weighted combination of functional terms with an evaluation setup.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XcFunctional {
    weights: [f64; FunctionalId::COUNT],
    setup: Option<Setup>,
}

impl Default for XcFunctional {
    fn default() -> Self {
        Self::new()
    }
}

impl XcFunctional {
    /// An empty functional (all weights zero, no setup).
    pub fn new() -> Self {
        XcFunctional {
            weights: [0.0; FunctionalId::COUNT],
            setup: None,
        }
    }

    /// Set the weight of a functional, or of every term of an alias scaled by
    /// `weight`, using the global registry. Clears any previous setup.
    pub fn set(&mut self, name: &str, weight: f64) -> Result<(), XcError> {
        self.set_in(Registry::global(), name, weight)
    }

    /// Like [`set`](Self::set) with an explicit registry.
    pub fn set_in(&mut self, registry: &Registry, name: &str, weight: f64) -> Result<(), XcError> {
        let entry = registry
            .lookup(name)
            .ok_or_else(|| XcError::UnknownName(name.to_string()))?;
        for &(id, w) in &entry.terms {
            self.weights[id as usize] = weight * w;
        }
        self.setup = None;
        Ok(())
    }

    /// Current weight of a single term.
    pub fn weight(&self, id: FunctionalId) -> f64 {
        self.weights[id as usize]
    }

    /// Active terms with their weights.
    pub fn terms(&self) -> impl Iterator<Item = (FunctionalId, f64)> + '_ {
        FunctionalId::ALL
            .iter()
            .map(move |&id| (id, self.weights[id as usize]))
            .filter(|&(_, w)| w != 0.0)
    }

    /// Union of the dependency bits of the active terms.
    pub fn depends(&self) -> u32 {
        self.terms().fold(0, |acc, (id, _)| acc | id.depends())
    }

    pub fn is_gga(&self) -> bool {
        self.depends() & GRADIENT != 0
    }

    /// Validate and store an evaluation setup.
    pub fn eval_setup(&mut self, vars: Vars, mode: Mode, order: usize) -> Result<(), XcError> {
        let result = self.check_setup(vars, mode, order);
        match &result {
            Ok(()) => {
                tracing::debug!(?vars, ?mode, order, "eval setup accepted");
                self.setup = Some(Setup { vars, mode, order });
            }
            Err(err) => {
                tracing::warn!(?vars, ?mode, order, %err, "eval setup rejected");
                self.setup = None;
            }
        }
        result
    }

    fn check_setup(&self, vars: Vars, mode: Mode, order: usize) -> Result<(), XcError> {
        let depends = self.depends();
        if depends & vars.provides() != depends {
            return Err(XcError::Vars { vars, depends });
        }
        let max = match mode {
            Mode::PartialDerivatives => MAX_PARTIAL_ORDER,
            Mode::Contracted => MAX_ORDER,
            Mode::Potential => return Err(XcError::Mode(mode)),
        };
        if order > max {
            return Err(XcError::Order { order, max });
        }
        Ok(())
    }

    fn setup(&self) -> Setup {
        match self.setup {
            Some(setup) => setup,
            None => panic!("XcFunctional: eval_setup has not succeeded"),
        }
    }

    /// Number of input values per point.
    ///
    /// # Panics
    ///
    /// Panics if no setup is active.
    pub fn input_length(&self) -> usize {
        let setup = self.setup();
        match setup.mode {
            Mode::Contracted => setup.vars.len() << setup.order,
            _ => setup.vars.len(),
        }
    }

    /// Number of output values per point.
    ///
    /// # Panics
    ///
    /// Panics if no setup is active.
    pub fn output_length(&self) -> usize {
        let setup = self.setup();
        match setup.mode {
            Mode::Contracted => 1 << setup.order,
            _ => polylen(setup.vars.len(), setup.order),
        }
    }

    /// Weighted energy density at one point.
    pub fn energy<T: XcScalar>(&self, d: &DensVars<T>) -> T {
        self.terms()
            .fold(T::zero(), |acc, (id, w)| acc + id.energy(d) * w)
    }

    /// Evaluate one point.
    ///
    /// # Panics
    ///
    /// Panics if no setup is active or if `input`/`output` do not have
    /// [`input_length`](Self::input_length)/[`output_length`](Self::output_length) entries.
    pub fn eval(&self, input: &[f64], output: &mut [f64]) {
        let setup = self.setup();
        assert_eq!(
            input.len(),
            self.input_length(),
            "XcFunctional::eval: wrong input length"
        );
        assert_eq!(
            output.len(),
            self.output_length(),
            "XcFunctional::eval: wrong output length"
        );
        match setup.mode {
            Mode::PartialDerivatives => self.eval_partial(setup, input, output),
            Mode::Contracted => match setup.order {
                0 => self.eval_contracted::<1>(setup.vars, input, output),
                1 => self.eval_contracted::<2>(setup.vars, input, output),
                2 => self.eval_contracted::<4>(setup.vars, input, output),
                3 => self.eval_contracted::<8>(setup.vars, input, output),
                _ => self.eval_contracted::<16>(setup.vars, input, output),
            },
            Mode::Potential => unreachable!("potential mode is rejected at setup"),
        }
    }

    /// Evaluate `npoints` points with strides `in_pitch` and `out_pitch`.
    ///
    /// # Panics
    ///
    /// Panics if no setup is active, if a pitch is shorter than the per-point
    /// length or if the buffers are too short.
    pub fn eval_vec(
        &self,
        npoints: usize,
        input: &[f64],
        in_pitch: usize,
        output: &mut [f64],
        out_pitch: usize,
    ) {
        let (inlen, outlen) = (self.input_length(), self.output_length());
        assert!(in_pitch >= inlen, "XcFunctional::eval_vec: input pitch too small");
        assert!(out_pitch >= outlen, "XcFunctional::eval_vec: output pitch too small");
        if npoints == 0 {
            return;
        }
        assert!(
            input.len() >= (npoints - 1) * in_pitch + inlen,
            "XcFunctional::eval_vec: input buffer too short"
        );
        assert!(
            output.len() >= (npoints - 1) * out_pitch + outlen,
            "XcFunctional::eval_vec: output buffer too short"
        );

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            output
                .par_chunks_mut(out_pitch)
                .zip(input.par_chunks(in_pitch))
                .take(npoints)
                .for_each(|(out, inp)| self.eval(&inp[..inlen], &mut out[..outlen]));
        }

        #[cfg(not(feature = "parallel"))]
        for (out, inp) in output
            .chunks_mut(out_pitch)
            .zip(input.chunks(in_pitch))
            .take(npoints)
        {
            self.eval(&inp[..inlen], &mut out[..outlen]);
        }
    }

    /// Energy with `(input index, subset mask)` seeds set to one.
    fn seeded<const LEN: usize>(
        &self,
        vars: Vars,
        input: &[f64],
        seeds: &[(usize, usize)],
    ) -> CubeTaylor<f64, LEN> {
        let mut x: Vec<CubeTaylor<f64, LEN>> = input.iter().map(|&v| CubeTaylor::new(v)).collect();
        for &(i, mask) in seeds {
            x[i].set(mask, 1.0);
        }
        self.energy(&DensVars::new(vars, &x))
    }

    fn eval_partial(&self, setup: Setup, input: &[f64], output: &mut [f64]) {
        let n = input.len();
        match setup.order {
            0 => output[0] = self.energy(&DensVars::new(setup.vars, input)),
            1 => {
                for i in 0..n {
                    let r = self.seeded::<2>(setup.vars, input, &[(i, VAR0)]);
                    output[i + 1] = r.get(VAR0);
                    output[0] = r.get(CNST);
                }
            }
            2 => self.second_derivatives(setup.vars, input, output),
            _ => {
                let mut k = 1 + n + n * (n + 1) / 2;
                for i in 0..n {
                    for j in i..n {
                        for s in j..n {
                            let r = self.seeded::<8>(
                                setup.vars,
                                input,
                                &[(i, VAR0), (j, VAR1), (s, VAR2)],
                            );
                            output[k] = r.get(VAR0 | VAR1 | VAR2);
                            k += 1;
                        }
                    }
                }
                self.second_derivatives(setup.vars, input, output);
            }
        }
    }

    /// Energy, gradient and upper-triangular Hessian into the head of `output`.
    fn second_derivatives(&self, vars: Vars, input: &[f64], output: &mut [f64]) {
        let n = input.len();
        let mut k = n + 1;
        for i in 0..n {
            for j in i..n {
                let r = self.seeded::<4>(vars, input, &[(i, VAR0), (j, VAR1)]);
                output[k] = r.get(VAR0 | VAR1);
                k += 1;
                output[i + 1] = r.get(VAR0);
                output[0] = r.get(CNST);
            }
        }
    }

    fn eval_contracted<const LEN: usize>(&self, vars: Vars, input: &[f64], output: &mut [f64]) {
        let x: Vec<CubeTaylor<f64, LEN>> = input
            .chunks_exact(LEN)
            .map(|c| CubeTaylor::from_coeffs(std::array::from_fn(|k| c[k])))
            .collect();
        let r = self.energy(&DensVars::new(vars, &x));
        output.copy_from_slice(&r.coeffs);
    }
}

/// Evaluate every term that carries a [`Reference`] and return those that
/// miss it, where a miss is `|out - ref| > |ref · threshold|` on any entry.
pub fn self_test() -> Vec<FunctionalId> {
    let mut failed = Vec::new();
    for id in FunctionalId::ALL {
        let Some(reference) = id.reference() else {
            continue;
        };
        let mut fun = XcFunctional::new();
        fun.weights[id as usize] = 1.0;
        let ok = fun
            .eval_setup(reference.vars, Mode::PartialDerivatives, reference.order)
            .is_ok()
            && {
                let mut out = vec![0.0; fun.output_length()];
                fun.eval(reference.input, &mut out);
                out.iter()
                    .zip(reference.output)
                    .all(|(&o, &r)| (o - r).abs() <= (r * reference.threshold).abs())
            };
        if !ok {
            tracing::warn!(functional = id.name(), "self test failed");
            failed.push(id);
        }
    }
    failed
}
