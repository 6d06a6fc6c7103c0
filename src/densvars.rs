//! Density variables: the bridge from a flat input array to the named
//! quantities the functional formulas read.
//!
//! A [`Vars`] selector fixes the input layout (which physical quantities are
//! present, in which order). [`DensVars::new`] unpacks one input point into
//! every field that layout can provide, floors tiny densities and computes
//! the derived quantities. It is generic over the number type, so the same
//! construction serves plain energies and Taylor-seeded derivative passes.

use crate::scalar::XcScalar;

/// Densities below this value are raised to it before any formula runs.
pub const TINY_DENSITY: f64 = 1e-14;

/// The layout provides spin or total densities.
pub const DENSITY: u32 = 1;
/// The layout provides density gradients.
pub const GRADIENT: u32 = 2;
/// The layout provides density Laplacians.
pub const LAPLACIAN: u32 = 4;
/// The layout provides kinetic energy densities.
pub const KINETIC: u32 = 8;
/// The layout provides paramagnetic current densities.
pub const JP: u32 = 16;

/// Input layout selector.
///
/// `A`/`B` are the spin densities, `N = A + B` and `S = A - B`; `Gxy` are
/// gradient dot products, `Nx…` gradient components, `Tau*` kinetic energy
/// densities and `Lap*` Laplacians. The `2ndTaylor` layouts carry a density,
/// its gradient and its Cartesian Hessian `xx xy xz yy yz zz` per spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vars {
    A,
    N,
    AB,
    NS,
    AGaa,
    NGnn,
    ABGaaGabGbb,
    NSGnnGnsGss,
    ABGaaGabGbbTauaTaub,
    NSGnnGnsGssTaunTaus,
    NGnnTaun,
    NNxNyNz,
    NNxNyNzTaun,
    ABAxAyAzBxByBz,
    ABAxAyAzBxByBzTauaTaub,
    NSNxNyNzSxSySz,
    NSNxNyNzSxSySzTaunTaus,
    ABGaaGabGbbLapaLapbTauaTaub,
    ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb,
    N2ndTaylor,
    AB2ndTaylor,
}

impl Vars {
    /// Every selector, in declaration order.
    pub const ALL: [Vars; 21] = [
        Vars::A,
        Vars::N,
        Vars::AB,
        Vars::NS,
        Vars::AGaa,
        Vars::NGnn,
        Vars::ABGaaGabGbb,
        Vars::NSGnnGnsGss,
        Vars::ABGaaGabGbbTauaTaub,
        Vars::NSGnnGnsGssTaunTaus,
        Vars::NGnnTaun,
        Vars::NNxNyNz,
        Vars::NNxNyNzTaun,
        Vars::ABAxAyAzBxByBz,
        Vars::ABAxAyAzBxByBzTauaTaub,
        Vars::NSNxNyNzSxSySz,
        Vars::NSNxNyNzSxSySzTaunTaus,
        Vars::ABGaaGabGbbLapaLapbTauaTaub,
        Vars::ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb,
        Vars::N2ndTaylor,
        Vars::AB2ndTaylor,
    ];

    /// Number of input values per point.
    pub const fn len(self) -> usize {
        match self {
            Vars::A | Vars::N => 1,
            Vars::AB | Vars::NS | Vars::AGaa | Vars::NGnn => 2,
            Vars::NGnnTaun => 3,
            Vars::NNxNyNz => 4,
            Vars::ABGaaGabGbb | Vars::NSGnnGnsGss | Vars::NNxNyNzTaun => 5,
            Vars::ABGaaGabGbbTauaTaub | Vars::NSGnnGnsGssTaunTaus => 7,
            Vars::ABAxAyAzBxByBz | Vars::NSNxNyNzSxSySz => 8,
            Vars::ABGaaGabGbbLapaLapbTauaTaub => 9,
            Vars::ABAxAyAzBxByBzTauaTaub
            | Vars::NSNxNyNzSxSySzTaunTaus
            | Vars::N2ndTaylor => 10,
            Vars::ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb => 11,
            Vars::AB2ndTaylor => 20,
        }
    }

    /// Bitmask of the quantities this layout provides
    /// ([`DENSITY`], [`GRADIENT`], [`LAPLACIAN`], [`KINETIC`], [`JP`]).
    pub const fn provides(self) -> u32 {
        match self {
            Vars::A | Vars::N | Vars::AB | Vars::NS => DENSITY,
            Vars::AGaa
            | Vars::NGnn
            | Vars::ABGaaGabGbb
            | Vars::NSGnnGnsGss
            | Vars::NNxNyNz
            | Vars::ABAxAyAzBxByBz
            | Vars::NSNxNyNzSxSySz => DENSITY | GRADIENT,
            Vars::ABGaaGabGbbTauaTaub
            | Vars::NSGnnGnsGssTaunTaus
            | Vars::NGnnTaun
            | Vars::NNxNyNzTaun
            | Vars::ABAxAyAzBxByBzTauaTaub
            | Vars::NSNxNyNzSxSySzTaunTaus => DENSITY | GRADIENT | KINETIC,
            Vars::N2ndTaylor | Vars::AB2ndTaylor => DENSITY | GRADIENT | LAPLACIAN,
            Vars::ABGaaGabGbbLapaLapbTauaTaub => DENSITY | GRADIENT | LAPLACIAN | KINETIC,
            Vars::ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb => {
                DENSITY | GRADIENT | LAPLACIAN | KINETIC | JP
            }
        }
    }
}

/// Named density quantities for one grid point.
///
/// Fields the selector cannot provide are zero.
#[derive(Clone, Copy, Debug)]
pub struct DensVars<T> {
    /// Spin-up density.
    pub a: T,
    /// Spin-down density.
    pub b: T,
    pub gaa: T,
    pub gab: T,
    pub gbb: T,
    /// Total density `a + b`.
    pub n: T,
    /// Spin density `a - b`.
    pub s: T,
    pub gnn: T,
    pub gns: T,
    pub gss: T,
    pub tau: T,
    pub taua: T,
    pub taub: T,
    pub lapa: T,
    pub lapb: T,
    pub jpaa: T,
    pub jpbb: T,
    /// Spin polarization `s / n`.
    pub zeta: T,
    /// Wigner-Seitz radius `(3 / 4πn)^(1/3)`.
    pub r_s: T,
    /// `n^(-1/3)`.
    pub n_m13: T,
    /// `a^(4/3)`.
    pub a_43: T,
    /// `b^(4/3)`.
    pub b_43: T,
}

/// Raise the constant term to [`TINY_DENSITY`], leaving derivative terms alone.
#[inline]
pub fn regularize<T: XcScalar>(x: &mut T) {
    if *x < TINY_DENSITY {
        x.set_value(TINY_DENSITY);
    }
}

#[inline]
fn dot3<T: XcScalar>(x: &[T], y: &[T]) -> T {
    x[0] * y[0] + x[1] * y[1] + x[2] * y[2]
}

impl<T: XcScalar> DensVars<T> {
    fn zeroed() -> Self {
        let z = T::zero();
        DensVars {
            a: z,
            b: z,
            gaa: z,
            gab: z,
            gbb: z,
            n: z,
            s: z,
            gnn: z,
            gns: z,
            gss: z,
            tau: z,
            taua: z,
            taub: z,
            lapa: z,
            lapb: z,
            jpaa: z,
            jpbb: z,
            zeta: z,
            r_s: z,
            n_m13: z,
            a_43: z,
            b_43: z,
        }
    }

    /// Unpack one input point laid out according to `vars`.
    ///
    /// # Panics
    ///
    /// Panics if `d.len() != vars.len()`.
    pub fn new(vars: Vars, d: &[T]) -> Self {
        assert_eq!(
            d.len(),
            vars.len(),
            "DensVars::new: {:?} takes {} inputs, got {}",
            vars,
            vars.len(),
            d.len()
        );
        let mut v = Self::zeroed();
        match vars {
            Vars::A => v.single_spin(d[0]),
            Vars::AGaa => {
                v.single_spin(d[0]);
                v.gaa = d[1];
                v.gnn = d[1];
                v.gss = d[1];
                v.gns = d[1];
            }
            Vars::N => v.from_total(d[0], T::zero()),
            Vars::NGnn => {
                v.from_total(d[0], T::zero());
                v.from_total_gradient(d[1], T::zero(), T::zero());
            }
            Vars::NGnnTaun => {
                v.from_total(d[0], T::zero());
                v.from_total_gradient(d[1], T::zero(), T::zero());
                v.from_total_tau(d[2], T::zero());
            }
            Vars::NNxNyNz => {
                v.from_total(d[0], T::zero());
                v.from_total_gradient(dot3(&d[1..4], &d[1..4]), T::zero(), T::zero());
            }
            Vars::NNxNyNzTaun => {
                v.from_total(d[0], T::zero());
                v.from_total_gradient(dot3(&d[1..4], &d[1..4]), T::zero(), T::zero());
                v.from_total_tau(d[4], T::zero());
            }
            Vars::N2ndTaylor => {
                v.from_total(d[0], T::zero());
                v.from_total_gradient(dot3(&d[1..4], &d[1..4]), T::zero(), T::zero());
                v.lapa = (d[4] + d[7] + d[9]) * 0.5;
                v.lapb = v.lapa;
            }
            Vars::AB => v.from_spin(d[0], d[1]),
            Vars::ABGaaGabGbb => {
                v.from_spin(d[0], d[1]);
                v.from_spin_gradient(d[2], d[3], d[4]);
            }
            Vars::ABGaaGabGbbTauaTaub => {
                v.from_spin(d[0], d[1]);
                v.from_spin_gradient(d[2], d[3], d[4]);
                v.from_spin_tau(d[5], d[6]);
            }
            Vars::ABGaaGabGbbLapaLapbTauaTaub | Vars::ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb => {
                v.from_spin(d[0], d[1]);
                v.from_spin_gradient(d[2], d[3], d[4]);
                v.lapa = d[5];
                v.lapb = d[6];
                v.from_spin_tau(d[7], d[8]);
                if vars == Vars::ABGaaGabGbbLapaLapbTauaTaubJpaaJpbb {
                    v.jpaa = d[9];
                    v.jpbb = d[10];
                }
            }
            Vars::ABAxAyAzBxByBz | Vars::ABAxAyAzBxByBzTauaTaub => {
                v.from_spin(d[0], d[1]);
                let (ga, gb) = (&d[2..5], &d[5..8]);
                v.from_spin_gradient(dot3(ga, ga), dot3(ga, gb), dot3(gb, gb));
                if vars == Vars::ABAxAyAzBxByBzTauaTaub {
                    v.from_spin_tau(d[8], d[9]);
                }
            }
            Vars::AB2ndTaylor => {
                v.from_spin(d[0], d[10]);
                let (ga, gb) = (&d[1..4], &d[11..14]);
                v.from_spin_gradient(dot3(ga, ga), dot3(ga, gb), dot3(gb, gb));
                v.lapa = d[4] + d[7] + d[9];
                v.lapb = d[14] + d[17] + d[19];
            }
            Vars::NS => v.from_total(d[0], d[1]),
            Vars::NSGnnGnsGss => {
                v.from_total(d[0], d[1]);
                v.from_total_gradient(d[2], d[3], d[4]);
            }
            Vars::NSGnnGnsGssTaunTaus => {
                v.from_total(d[0], d[1]);
                v.from_total_gradient(d[2], d[3], d[4]);
                v.from_total_tau(d[5], d[6]);
            }
            Vars::NSNxNyNzSxSySz | Vars::NSNxNyNzSxSySzTaunTaus => {
                v.from_total(d[0], d[1]);
                let (gn, gs) = (&d[2..5], &d[5..8]);
                v.from_total_gradient(dot3(gn, gn), dot3(gn, gs), dot3(gs, gs));
                if vars == Vars::NSNxNyNzSxSySzTaunTaus {
                    v.from_total_tau(d[8], d[9]);
                }
            }
        }
        v.derive();
        v
    }

    fn single_spin(&mut self, a: T) {
        self.a = a;
        regularize(&mut self.a);
        self.n = self.a;
        self.s = self.a;
    }

    fn from_spin(&mut self, a: T, b: T) {
        self.a = a;
        regularize(&mut self.a);
        self.b = b;
        regularize(&mut self.b);
        self.n = self.a + self.b;
        self.s = self.a - self.b;
    }

    fn from_total(&mut self, n: T, s: T) {
        self.n = n;
        regularize(&mut self.n);
        self.s = s;
        self.a = (self.n + s) * 0.5;
        regularize(&mut self.a);
        self.b = (self.n - s) * 0.5;
        regularize(&mut self.b);
    }

    fn from_spin_gradient(&mut self, gaa: T, gab: T, gbb: T) {
        self.gaa = gaa;
        self.gab = gab;
        self.gbb = gbb;
        self.gnn = gaa + gab * 2.0 + gbb;
        self.gss = gaa - gab * 2.0 + gbb;
        self.gns = gaa - gbb;
    }

    fn from_total_gradient(&mut self, gnn: T, gns: T, gss: T) {
        self.gnn = gnn;
        self.gns = gns;
        self.gss = gss;
        self.gaa = (gnn + gns * 2.0 + gss) * 0.25;
        self.gab = (gnn - gss) * 0.25;
        self.gbb = (gnn - gns * 2.0 + gss) * 0.25;
    }

    fn from_spin_tau(&mut self, taua: T, taub: T) {
        self.taua = taua;
        self.taub = taub;
        self.tau = taua + taub;
    }

    fn from_total_tau(&mut self, taun: T, taus: T) {
        self.tau = taun;
        self.taua = (taun + taus) * 0.5;
        self.taub = (taun - taus) * 0.5;
    }

    fn derive(&mut self) {
        let third = 1.0 / 3.0;
        self.zeta = self.s / self.n;
        self.n_m13 = self.n.pow_f(-third);
        self.r_s = self.n_m13 * (3.0 / (4.0 * std::f64::consts::PI)).powf(third);
        let pow43 = |x: T| if x > 0.0 { x.pow_f(4.0 * third) } else { T::zero() };
        self.a_43 = pow43(self.a);
        self.b_43 = pow43(self.b);
    }
}
