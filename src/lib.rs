#[macro_use]
mod elementary;

pub mod ctaylor;
pub mod densvars;
pub mod float;
pub mod functional;
pub mod functionals;
pub mod polymul;
pub mod polynomial;
pub mod scalar;
pub mod taylor;
pub mod taylor_ops;
mod traits;

pub use ctaylor::CubeTaylor;
pub use densvars::{DensVars, Vars};
pub use float::Float;
pub use functional::{FunctionalId, Mode, Registry, XcError, XcFunctional};
pub use polynomial::Polynomial;
pub use scalar::{Scalar, XcScalar};
pub use taylor::Taylor;

/// Highest derivative order the functional evaluator supports.
pub const MAX_ORDER: usize = 4;

/// The [`Taylor`] type in `nvar` variables truncated at degree `ndeg`, with
/// the coefficient count filled in.
///
/// ```
/// use xctaylor::taylor;
/// let x = <taylor!(f64; 2, 3)>::variable(1.5, 0);
/// assert_eq!(x.coeffs.len(), 10);
/// ```
#[macro_export]
macro_rules! taylor {
    ($f:ty; $nvar:expr, $ndeg:expr) => {
        $crate::Taylor<$f, { $nvar }, { $ndeg }, { $crate::polymul::polylen($nvar, $ndeg) }>
    };
}

/// The [`CubeTaylor`] type over `nvar` variables (`2^nvar` coefficients).
#[macro_export]
macro_rules! ctaylor {
    ($f:ty; $nvar:expr) => {
        $crate::CubeTaylor<$f, { 1usize << ($nvar) }>
    };
}
