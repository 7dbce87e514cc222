//! Arkode is a solver for stiff, nonstiff, mixed stiff-nonstiff, and
//! multirate ODE systems based on Runge-Kutta methods.  This module
//! wraps its explicit module, ERKStep, configured with the
//! Dormand-Prince 5(4) method.
//!
//! # Example
//!
//! ```
//! use sundials_ivp::{ErkStep, Settings};
//! let settings = Settings::default().rtol(1e-10).atol(1e-12);
//! let mut ode = ErkStep::new(0., &[1.], |_t, y, dy| dy[0] = y[0],
//!                            &settings)?;
//! let mut y = [f64::NAN];
//! ode.solve(1., &mut y).unwrap();
//! assert!((y[0] - 1f64.exp()).abs() < 1e-8);
//! # Ok::<(), sundials_ivp::Error>(())
//! ```

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    pin::Pin,
};
use libc::{c_int, c_long, c_void};
use sundials_sys::*;
use crate::{
    Context,
    Error,
    Settings,
    Tolerances,
    integrator::{Integrator, Rhs, Stats, StepFailure},
    vector::{self, SharedSerial, serial::Serial},
};

// Implement the Drop trait only on the pointer to be able to move
// values out of the structure `ErkStep`.
#[derive(Debug)]
struct ErkStepMem(*mut c_void);

impl Drop for ErkStepMem {
    fn drop(&mut self) { unsafe { ERKStepFree(&mut self.0) } }
}

struct UserData<F> {
    f: F, // Right-hand side of the equation
    // Panic raised by `f`, to be resumed once Sundials returns.
    panic: Option<Box<dyn Any + Send>>,
}

/// Explicit Runge-Kutta solver (Dormand-Prince 5(4)) for nonstiff
/// initial value problems ẏ = f(t,y).
///
/// `F` is the type of the right-hand side f.
pub struct ErkStep<F> {
    // Fields are dropped in declaration order and everything must be
    // freed before the context.
    mem: ErkStepMem,
    y: Serial, // Last solution returned, at time `t`.
    t: f64,
    tol: Tolerances,
    max_steps: usize,
    user_data: Pin<Box<UserData<F>>>,
    ctx: Context,
}

/// Return value of ERKStep functions which only signal success or
/// failure.
fn check(r: c_int, name: &'static str, msg: &'static str)
         -> Result<(), Error> {
    if r == ARK_SUCCESS as c_int { Ok(()) }
    else { Err(Error::Failure { name, msg }) }
}

const FAILURES: [(c_int, StepFailure); 11] = [
    (ARK_TOO_MUCH_WORK as c_int, StepFailure::TooMuchWork),
    (ARK_TOO_MUCH_ACC as c_int, StepFailure::TooMuchAcc),
    (ARK_ERR_FAILURE as c_int, StepFailure::ErrFailure),
    (ARK_CONV_FAILURE as c_int, StepFailure::ConvFailure),
    (ARK_RHSFUNC_FAIL as c_int, StepFailure::RhsFailure),
    (ARK_FIRST_RHSFUNC_ERR as c_int, StepFailure::RhsFailure),
    (ARK_REPTD_RHSFUNC_ERR as c_int, StepFailure::RhsFailure),
    (ARK_UNREC_RHSFUNC_ERR as c_int, StepFailure::RhsFailure),
    (ARK_ILL_INPUT as c_int, StepFailure::IllInput),
    (ARK_TOO_CLOSE as c_int, StepFailure::TooClose),
    (ARK_MEM_NULL as c_int, StepFailure::IllInput),
];

fn step_failure(r: c_int) -> StepFailure {
    FAILURES.iter()
        .find(|(code, _)| *code == r)
        .map_or(StepFailure::Other(r), |&(_, failure)| failure)
}

fn max_steps_long(n: usize) -> c_long {
    if n <= c_long::MAX as usize { n as _ } else { c_long::MAX }
}

impl<F> ErkStep<F>
where F: FnMut(f64, &[f64], &mut [f64])
{
    /// Callback for the right-hand side of the equation.
    extern "C" fn erkrhs(t: f64, nvy: N_Vector, nvdy: N_Vector,
                         user_data: *mut c_void
    ) -> c_int {
        let u = unsafe { &mut *(user_data as *mut UserData<F>) };
        // Protect against unwinding in C code.
        match panic::catch_unwind(AssertUnwindSafe(|| {
            // SAFETY: `nvy` and `nvdy` are distinct serial vectors
            // owned by Sundials for the duration of the call.
            let y = unsafe { vector::as_slice(nvy) };
            let dy = unsafe { vector::as_mut_slice(nvdy) };
            (u.f)(t, y, dy);
        })) {
            Ok(()) => 0,
            Err(e) => {
                u.panic = Some(e);
                -1 // Unrecoverable: stops the integration.
            }
        }
    }

    /// Create a solver for ẏ = `f`(t,y), y(`t0`) = `y0` with the
    /// tolerances and the maximum number of steps of `settings`.
    /// A maximum number of steps of 0 selects the Sundials default
    /// (500).
    pub fn new(t0: f64, y0: &[f64], f: F, settings: &Settings)
               -> Result<Self, Error> {
        Self::init("ErkStep::new", t0, y0, f, settings)
    }

    fn init(name: &'static str, t0: f64, y0: &[f64], f: F,
            settings: &Settings) -> Result<Self, Error> {
        let ctx = Context::new(name)?;
        // SAFETY: Once `y0` has been passed to `ERKStepCreate`, it is
        // copied to internal structures and thus can be freed.
        let nvy0 = SharedSerial::new(y0, &ctx)
            .ok_or(Error::Failure { name, msg: "vector allocation failed" })?;
        let mem = unsafe { ErkStepMem(ERKStepCreate(
            Some(Self::erkrhs), t0, nvy0.as_ptr(), ctx.as_ptr())) };
        if mem.0.is_null() {
            return Err(Error::Failure { name, msg: "Allocation failed" })
        }
        let r = unsafe { ERKStepSetTableName(
            mem.0, c"ARKODE_DORMAND_PRINCE_7_4_5".as_ptr()) };
        check(r, name, "could not select the Dormand-Prince method")?;
        let tol = settings.tolerances;
        let r = unsafe { ERKStepSStolerances(mem.0, tol.rtol, tol.atol) };
        check(r, name, "An input argument has an illegal value")?;
        let r = unsafe { ERKStepSetMaxNumSteps(
            mem.0, max_steps_long(settings.max_steps)) };
        check(r, name, "could not set the maximum number of steps")?;
        let y = Serial::from_slice(name, &ctx, y0)?;
        let mut user_data = Box::pin(UserData { f, panic: None });
        // SAFETY: the pointee is never moved out of the box.
        let user_data_ptr = unsafe {
            user_data.as_mut().get_unchecked_mut() as *mut UserData<F>
        } as *mut c_void;
        let r = unsafe { ERKStepSetUserData(mem.0, user_data_ptr) };
        check(r, name, "could not set the user data")?;
        drop(nvy0);
        Ok(ErkStep {
            mem, y, t: t0, tol,
            max_steps: settings.max_steps,
            user_data, ctx,
        })
    }

    fn user_data_mut(&mut self) -> &mut UserData<F> {
        // SAFETY: we never move the value out of the pinned box.
        unsafe { self.user_data.as_mut().get_unchecked_mut() }
    }

    /// Set new relative and absolute tolerances.  Other options (in
    /// particular the maximum number of steps) are kept.
    pub fn set_tolerances(&mut self, tol: Tolerances) -> Result<(), Error> {
        let tol = tol.checked("ErkStep::set_tolerances")?;
        let r = unsafe { ERKStepSStolerances(self.mem.0, tol.rtol, tol.atol) };
        check(r, "ErkStep::set_tolerances",
              "An input argument has an illegal value")?;
        self.tol = tol;
        Ok(())
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Restart the integration from `y0` at time `t0`.  The
    /// right-hand side, tolerances and other options are kept.
    pub fn reinit(&mut self, t0: f64, y0: &[f64]) -> Result<(), Error> {
        let name = "ErkStep::reinit";
        if y0.len() != self.y.len() {
            return Err(Error::InvalidArgument {
                op: name,
                msg: format!("expected a vector of length {}, got {}",
                             self.y.len(), y0.len()),
            })
        }
        let nvy0 = SharedSerial::new(y0, &self.ctx)
            .ok_or(Error::Failure { name, msg: "vector allocation failed" })?;
        let r = unsafe { ERKStepReInit(
            self.mem.0, Some(Self::erkrhs), t0, nvy0.as_ptr()) };
        check(r, name, "could not re-initialize the solver")?;
        drop(nvy0);
        self.y.as_mut_slice().copy_from_slice(y0);
        self.t = t0;
        Ok(())
    }

    /// Set `y` to the solution at time `t` and return the time
    /// reached (`t` on success).  Asking again for the time of the
    /// last returned solution (in particular `t0` right after
    /// initialization) returns that solution without stepping.
    ///
    /// # Panics
    /// If the right-hand side panics, the panic is resumed here.
    pub fn solve(&mut self, t: f64, y: &mut [f64])
                 -> Result<f64, StepFailure> {
        assert_eq!(y.len(), self.y.len(),
                   "ErkStep::solve: output vector has the wrong length");
        if t == self.t {
            y.copy_from_slice(self.y.as_slice());
            return Ok(t)
        }
        let mut tret = self.t;
        let r = unsafe { ERKStepEvolve(
            self.mem.0, t, self.y.as_ptr(), &mut tret, ARK_NORMAL as c_int) };
        if let Some(e) = self.user_data_mut().panic.take() {
            panic::resume_unwind(e)
        }
        if r < 0 {
            return Err(step_failure(r))
        }
        self.t = tret;
        y.copy_from_slice(self.y.as_slice());
        Ok(tret)
    }

    /// Return the solution at time `t`.
    pub fn solution(&mut self, t: f64) -> Result<Vec<f64>, StepFailure> {
        let mut y = vec![f64::NAN; self.y.len()];
        self.solve(t, &mut y)?;
        Ok(y)
    }

    /// Number of steps and of right-hand side evaluations since the
    /// last (re)initialization.
    pub fn stats(&self) -> Stats {
        let mut steps: c_long = 0;
        let mut rhs_evals: c_long = 0;
        unsafe {
            ERKStepGetNumSteps(self.mem.0, &mut steps);
            ERKStepGetNumRhsEvals(self.mem.0, &mut rhs_evals);
        }
        Stats { steps: steps.max(0) as u64, rhs_evals: rhs_evals.max(0) as u64 }
    }
}

impl Integrator for ErkStep<Rhs> {
    fn create(rhs: Rhs, t0: f64, y0: &[f64], settings: &Settings)
              -> Result<Self, Error> {
        Self::init("ErkStep::create", t0, y0, rhs, settings)
    }

    fn set_tolerances(&mut self, tol: Tolerances) -> Result<(), Error> {
        ErkStep::set_tolerances(self, tol)
    }

    fn reinit(&mut self, t0: f64, y0: &[f64]) -> Result<(), Error> {
        ErkStep::reinit(self, t0, y0)
    }

    fn step_to(&mut self, t: f64, y: &mut [f64]) -> Result<f64, StepFailure> {
        self.solve(t, y)
    }

    fn stats(&self) -> Stats {
        ErkStep::stats(self)
    }
}
