//! A uniform initial value problem (IVP) interface over the explicit
//! Runge-Kutta solver of [Sundials][].
//!
//! The solver [`Ivp`] follows a fixed life cycle: set the initial
//! value, set the right-hand side f of ẏ = f(t,y), optionally change
//! the tolerances and the user data, then integrate to as many
//! (increasing) times as desired.  The stepping itself is done by
//! ARKODE's ERKStep module with the Dormand-Prince 5(4) method.
//!
//! # Example
//!
//! The following code solves ẏ = -y, y(0) = 1, whose solution is
//! y(t) = exp(-t).
//!
//! ```
//! use sundials_ivp::Ivp;
//! # fn main() -> Result<(), sundials_ivp::Error> {
//! let mut ode = Ivp::new();
//! ode.set_initial_value(&[1.], 0.)?;
//! ode.set_rhs_fn(|_t, y, dy, _| dy[0] = -y[0])?;
//! ode.set_tolerances(1e-10, 1e-12)?;
//! let mut y = [f64::NAN];
//! ode.integrate(1., &mut y)?;
//! assert!((y[0] - (-1f64).exp()).abs() < 1e-8);
//! # Ok(()) }
//! ```
//!
//! [Sundials]: https://computing.llnl.gov/projects/sundials

use std::ptr;
use sundials_sys::*;

/// Check that `$left` and `$right` are the same up to an absolute
/// error of `$tol`.
#[cfg(test)]
macro_rules! assert_eq_tol {
    ($left: expr, $right: expr, $tol: expr) => {
        let left = $left;
        let right = $right;
        let tol = $tol;
        if !((left - right).abs() <= tol) {
            panic!("assertion failed: |left - right| ≤ tol, where\n\
                    - left:  {}\n\
                    - right: {}\n\
                    - tol: {}", left, right, tol);
        }
    }
}

mod vector;
pub mod arkode;
pub mod host;
pub mod integrator;
pub mod ivp;
pub mod settings;

pub use arkode::ErkStep;
pub use host::{Arg, ArgType, IvpInterface};
pub use integrator::{Integrator, Stats, StepFailure};
pub use ivp::{Ivp, Phase, RhsFn, UserData};
pub use settings::{Settings, Tolerances};

////////////////////////////////////////////////////////////////////////
//
// Error

/// Errors returned by the operations of this library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A malformed or wrongly typed argument was passed.
    #[error("[{op}] {msg}")]
    InvalidArgument { op: &'static str, msg: String },
    /// The operation was called out of the required order.
    #[error("[{op}] {msg}")]
    IllegalState { op: &'static str, msg: &'static str },
    /// The right-hand side function does not honor its signature.
    #[error("[{op}] Wrong signature for the right-hand side function: {msg}")]
    ContractViolation { op: &'static str, msg: String },
    /// The integrator could not reach the requested time.
    #[error("[{op}] integration to t = {t} failed: {source}")]
    IntegrationFailure {
        op: &'static str,
        t: f64,
        #[source]
        source: StepFailure,
    },
    /// The Sundials function `name` failed with the attached message.
    #[error("The function {name} failed with message: {msg}.")]
    Failure { name: &'static str, msg: &'static str },
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IllegalState,
    ContractViolation,
    IntegrationFailure,
    Failure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::IllegalState { .. } => ErrorKind::IllegalState,
            Error::ContractViolation { .. } => ErrorKind::ContractViolation,
            Error::IntegrationFailure { .. } => ErrorKind::IntegrationFailure,
            Error::Failure { .. } => ErrorKind::Failure,
        }
    }
}

////////////////////////////////////////////////////////////////////////
//
// SUNContext

/// Context is an object associated with the thread of execution.
/// Each solver owns its own context.
pub(crate) struct Context(SUNContext);

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { SUNContext_Free(&mut self.0); }
    }
}

impl Context {
    pub(crate) fn new(name: &'static str) -> Result<Self, Error> {
        let mut ctx: SUNContext = ptr::null_mut();
        // No MPI: Sundials 6 takes a null pointer, Sundials 7 an
        // integer communicator.
        #[cfg(sundials_major = "6")]
        let comm = ptr::null_mut();
        #[cfg(not(sundials_major = "6"))]
        let comm = SUN_COMM_NULL as _;
        if unsafe { SUNContext_Create(comm, &mut ctx) } < 0 {
            return Err(Error::Failure { name,
                                        msg: "Failed to create a context" })
        }
        Ok(Context(ctx))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> SUNContext {
        self.0
    }
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
