//! The capabilities an adaptive integrator must offer to be driven by
//! [`Ivp`][crate::Ivp].

use crate::{Error, Settings, Tolerances};

/// Right-hand side handed to an [`Integrator`]: `f(t, y, ẏ)` must
/// write f(t,y) into `ẏ`.
pub type Rhs = Box<dyn FnMut(f64, &[f64], &mut [f64])>;

/// Adaptive-step integrator of ẏ = f(t,y).
pub trait Integrator: Sized {
    /// Create an integrator for the initial value `y0` at time `t0`
    /// configured with the tolerances and the step budget of
    /// `settings`.
    fn create(rhs: Rhs, t0: f64, y0: &[f64], settings: &Settings)
              -> Result<Self, Error>;

    /// Change the tolerances.  The step budget is preserved.
    fn set_tolerances(&mut self, tol: Tolerances) -> Result<(), Error>;

    /// Restart the integration from `y0` at time `t0`, keeping the
    /// right-hand side and all options.
    fn reinit(&mut self, t0: f64, y0: &[f64]) -> Result<(), Error>;

    /// Advance to time `t` and write the solution into `y`.  Return
    /// the time actually reached.
    fn step_to(&mut self, t: f64, y: &mut [f64]) -> Result<f64, StepFailure>;

    /// Work done since the last (re)initialization.
    fn stats(&self) -> Stats;
}

/// Integrator statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of internal steps taken.
    pub steps: u64,
    /// Number of evaluations of the right-hand side.
    pub rhs_evals: u64,
}

/// Reasons for an integrator not to reach the requested time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepFailure {
    /// The step budget was exhausted before reaching the output time.
    #[error("too much work: the step budget was exhausted")]
    TooMuchWork,
    /// The solver could not satisfy the accuracy demanded by the user
    /// for some internal step.
    #[error("could not satisfy the desired accuracy")]
    TooMuchAcc,
    /// Error test failures occurred too many times during one
    /// internal step or with the minimum step size.
    #[error("repeated error test failures")]
    ErrFailure,
    #[error("convergence failure")]
    ConvFailure,
    /// The right-hand side function failed in an unrecoverable
    /// manner.
    #[error("the right-hand side function failed")]
    RhsFailure,
    /// An input was illegal, e.g. the output time is behind the
    /// current one past the interpolation range.
    #[error("illegal input")]
    IllInput,
    /// The output time is too close to the current time.
    #[error("the output time is too close to the current time")]
    TooClose,
    #[error("unexpected return code {0}")]
    Other(i32),
}
