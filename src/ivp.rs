//! Stateful initial value problem solver with a fixed life cycle:
//!
//! 1. [`Ivp::set_initial_value`] fixes the dimension, y₀ and t₀;
//! 2. [`Ivp::set_rhs_fn`] checks the right-hand side and creates the
//!    integrator;
//! 3. [`Ivp::set_tolerances`] and [`Ivp::set_user_data`] may be
//!    called any number of times;
//! 4. [`Ivp::integrate`] advances the solution.
//!
//! Operations called out of order fail with
//! [`Error::IllegalState`].

use std::{
    any::Any,
    cell::RefCell,
    mem,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};
use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use crate::{
    ErkStep,
    Error,
    Settings,
    Tolerances,
    integrator::{Integrator, Rhs, Stats},
};

/// Opaque value forwarded to every evaluation of the right-hand side.
pub type UserData = Rc<dyn Any>;

/// Right-hand side `f(t, y, ẏ, user_data)` of ẏ = f(t,y).  It must
/// write all components of `ẏ`.
pub type RhsFn = Box<dyn FnMut(f64, &[f64], &mut [f64], Option<&dyn Any>)>;

/// Step of the life cycle an [`Ivp`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// The initial value is known.
    HasDimension,
    /// The right-hand side is set and the problem can be integrated.
    HasIntegrator,
    /// The last integration failed.  [`Ivp::set_tolerances`] or
    /// [`Ivp::set_initial_value`] must be called before integrating
    /// again.
    Failed,
}

struct Problem {
    y0: Vec<f64>,
    t0: f64,
}

enum State<I> {
    Uninitialized,
    HasDimension(Problem),
    HasIntegrator(Problem, I),
    Failed(Problem, I),
}

/// Shared between the solver and the closure handed to the
/// integrator, so that the user data is looked up at each call.
struct Callback {
    rhs: Option<RhsFn>,
    ydot: Vec<f64>, // scratch, len() == dimension
    user_data: Option<UserData>,
}

impl Callback {
    /// Evaluate the right-hand side at `(t, y)` in the scratch
    /// buffer.  The returned slice must not be kept past the call.
    fn eval(&mut self, t: f64, y: &[f64]) -> &[f64] {
        let Callback { rhs, ydot, user_data } = self;
        if let Some(f) = rhs {
            f(t, y, ydot, user_data.as_deref());
        }
        ydot
    }
}

fn illegal(op: &'static str, msg: &'static str) -> Error {
    Error::IllegalState { op, msg }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Initial value problem solver.
///
/// `I` is the integrator doing the time stepping, by default the
/// Sundials explicit Runge-Kutta solver [`ErkStep`].
///
/// An `Ivp` is meant to be used from a single thread; use one
/// instance per thread.
pub struct Ivp<I = ErkStep<Rhs>> {
    settings: Settings,
    state: State<I>,
    callback: Rc<RefCell<Callback>>,
    rng: StdRng,
}

impl Ivp {
    /// Return a solver with the default [`Settings`].
    pub fn new() -> Self {
        Self::with_integrator(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_integrator(settings)
    }
}

impl Default for Ivp {
    fn default() -> Self { Self::new() }
}

impl<I: Integrator> Ivp<I> {
    /// Return a solver using the integrator `I`.
    pub fn with_integrator(settings: Settings) -> Self {
        let rng = match settings.probe_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ivp {
            settings,
            state: State::Uninitialized,
            callback: Rc::new(RefCell::new(Callback {
                rhs: None, ydot: Vec::new(), user_data: None })),
            rng,
        }
    }

    /// Use `rng` to draw the state at which the right-hand side is
    /// probed.
    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Uninitialized => Phase::Uninitialized,
            State::HasDimension(_) => Phase::HasDimension,
            State::HasIntegrator(..) => Phase::HasIntegrator,
            State::Failed(..) => Phase::Failed,
        }
    }

    /// Dimension of the problem (0 until the initial value is set).
    pub fn dimension(&self) -> usize {
        match &self.state {
            State::Uninitialized => 0,
            State::HasDimension(p)
            | State::HasIntegrator(p, _)
            | State::Failed(p, _) => p.y0.len(),
        }
    }

    /// Statistics of the integrator, if any.
    pub fn stats(&self) -> Option<Stats> {
        match &self.state {
            State::HasIntegrator(_, i) | State::Failed(_, i) => Some(i.stats()),
            _ => None,
        }
    }

    /// Set the initial value `y0` at time `t0`.  This defines the
    /// dimension of the problem and discards any previously created
    /// integrator: [`Ivp::set_rhs_fn`] must be called again.
    pub fn set_initial_value(&mut self, y0: &[f64], t0: f64)
                             -> Result<(), Error> {
        const OP: &str = "set_initial_value";
        if !t0.is_finite() {
            warn!("[{OP}] rejected t0 = {t0}");
            return Err(Error::InvalidArgument {
                op: OP,
                msg: format!("Argument `t0` must be a finite \
                              floating-point number, got {t0}"),
            })
        }
        let n = y0.len();
        self.callback.borrow_mut().ydot = vec![0.; n];
        self.state = State::HasDimension(Problem { y0: y0.to_vec(), t0 });
        debug!("[{OP}] dimension = {n}, t0 = {t0}");
        Ok(())
    }

    /// Set the right-hand side `f(t, y, ẏ, user_data)` and create the
    /// integrator from the initial value.
    ///
    /// `f` is first probed once at [`Settings::probe_time`] on a
    /// random state; it must write every component of `ẏ` (which is
    /// filled with NaN before the probe) without panicking, otherwise
    /// [`Error::ContractViolation`] is returned.  A NaN left in `ẏ`
    /// cannot be told apart from an unwritten component, so a function
    /// returning NaN at the probed state is rejected too.
    pub fn set_rhs_fn<F>(&mut self, f: F) -> Result<(), Error>
    where F: FnMut(f64, &[f64], &mut [f64], Option<&dyn Any>) + 'static {
        const OP: &str = "set_rhs_fn";
        let problem = match mem::replace(&mut self.state, State::Uninitialized) {
            State::Uninitialized => {
                warn!("[{OP}] called before set_initial_value");
                return Err(illegal(OP, "`set_initial_value` must be called \
                                        before `set_rhs_fn`"))
            }
            State::HasDimension(p)
            | State::HasIntegrator(p, _)
            | State::Failed(p, _) => p,
        };
        let n = problem.y0.len();
        if n == 0 {
            self.state = State::HasDimension(problem);
            return Err(illegal(OP, "the dimension of the problem must be \
                                    positive"))
        }
        self.callback.borrow_mut().rhs = Some(Box::new(f));
        if let Err(e) = self.probe(OP, n) {
            self.callback.borrow_mut().rhs = None;
            self.state = State::HasDimension(problem);
            warn!("{e}");
            return Err(e)
        }
        let cb = Rc::clone(&self.callback);
        let rhs: Rhs = Box::new(move |t, y, dy| {
            dy.copy_from_slice(cb.borrow_mut().eval(t, y))
        });
        match I::create(rhs, problem.t0, &problem.y0, &self.settings) {
            Ok(integrator) => {
                debug!("[{OP}] integrator created (rtol = {}, atol = {}, \
                        max_steps = {})",
                       self.settings.tolerances.rtol,
                       self.settings.tolerances.atol,
                       self.settings.max_steps);
                self.state = State::HasIntegrator(problem, integrator);
                Ok(())
            }
            Err(e) => {
                self.state = State::HasDimension(problem);
                Err(e)
            }
        }
    }

    /// Evaluate the right-hand side once on a random state of
    /// dimension `n` and check all components of the derivative were
    /// written.
    fn probe(&mut self, op: &'static str, n: usize) -> Result<(), Error> {
        let y: Vec<f64> = (0 .. n).map(|_| self.rng.r#gen::<f64>()).collect();
        let t = self.settings.probe_time;
        let mut cb = self.callback.borrow_mut();
        cb.ydot.fill(f64::NAN);
        let written = panic::catch_unwind(AssertUnwindSafe(|| {
            let ydot = cb.eval(t, &y);
            ydot.iter().filter(|v| !v.is_nan()).count()
        }));
        match written {
            Ok(k) if k == n => Ok(()),
            Ok(k) => Err(Error::ContractViolation {
                op,
                msg: format!("{} of the {n} components of the derivative \
                              were not written or are NaN", n - k),
            }),
            Err(payload) => Err(Error::ContractViolation {
                op,
                msg: format!("the function panicked on a state of \
                              dimension {n}: {}", panic_message(&*payload)),
            }),
        }
    }

    /// Set new relative and absolute tolerances and restart the
    /// integration from the initial value.  The maximum number of
    /// steps is preserved.
    pub fn set_tolerances(&mut self, rtol: f64, atol: f64)
                          -> Result<(), Error> {
        const OP: &str = "set_tolerances";
        let tol = Tolerances { rtol, atol }.checked(OP)?;
        match mem::replace(&mut self.state, State::Uninitialized) {
            State::HasIntegrator(p, mut i) | State::Failed(p, mut i) => {
                let r = i.set_tolerances(tol)
                    .and_then(|()| i.reinit(p.t0, &p.y0));
                match r {
                    Ok(()) => {
                        debug!("[{OP}] rtol = {rtol}, atol = {atol}; \
                                restarted at t0 = {}", p.t0);
                        self.state = State::HasIntegrator(p, i);
                        Ok(())
                    }
                    Err(e) => {
                        self.state = State::Failed(p, i);
                        Err(e)
                    }
                }
            }
            st => {
                self.state = st;
                warn!("[{OP}] called before set_rhs_fn");
                Err(illegal(OP, "`set_rhs_fn` must be called before \
                                 `set_tolerances`"))
            }
        }
    }

    /// Set the value passed to every future evaluation of the
    /// right-hand side, whether the integrator exists yet or not.
    pub fn set_user_data(&mut self, user_data: UserData) {
        self.callback.borrow_mut().user_data = Some(user_data);
        debug!("[set_user_data] user data updated");
    }

    /// Set `y` to the solution at time `t`, continuing from the last
    /// time reached.
    ///
    /// On [`Error::IntegrationFailure`] the solver enters
    /// [`Phase::Failed`].  If the right-hand side panics, the solver
    /// also enters [`Phase::Failed`] and the panic is propagated.
    pub fn integrate(&mut self, t: f64, y: &mut [f64]) -> Result<(), Error> {
        const OP: &str = "integrate";
        let (p, i) = match &mut self.state {
            State::HasIntegrator(p, i) => (p, i),
            State::Failed(..) => {
                warn!("[{OP}] called after a failed integration");
                return Err(illegal(OP, "the previous integration failed; \
                    call `set_tolerances` or `set_initial_value` first"))
            }
            _ => {
                warn!("[{OP}] called before set_rhs_fn");
                return Err(illegal(OP, "`set_rhs_fn` must be called before \
                                        `integrate`"))
            }
        };
        if y.len() != p.y0.len() {
            return Err(Error::InvalidArgument {
                op: OP,
                msg: format!("the output vector has length {} but the \
                              dimension is {}", y.len(), p.y0.len()),
            })
        }
        if t.is_nan() {
            return Err(Error::InvalidArgument {
                op: OP, msg: "the target time is NaN".to_string() })
        }
        debug!("[{OP}] t = {t}");
        let r = panic::catch_unwind(AssertUnwindSafe(|| i.step_to(t, y)));
        match r {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(failure)) => {
                warn!("[{OP}] integration to t = {t} failed: {failure}");
                self.fail();
                Err(Error::IntegrationFailure { op: OP, t, source: failure })
            }
            Err(payload) => {
                self.fail();
                panic::resume_unwind(payload)
            }
        }
    }

    fn fail(&mut self) {
        self.state = match mem::replace(&mut self.state, State::Uninitialized) {
            State::HasIntegrator(p, i) => State::Failed(p, i),
            st => st,
        }
    }

    /// Return the solution at time `t`.
    pub fn solution(&mut self, t: f64) -> Result<Vec<f64>, Error> {
        let mut y = vec![f64::NAN; self.dimension()];
        self.integrate(t, &mut y)?;
        Ok(y)
    }

    /// Return the solution at time `t` as an array.
    #[cfg(feature = "ndarray")]
    pub fn solution_array(&mut self, t: f64)
                          -> Result<ndarray::Array1<f64>, Error> {
        self.solution(t).map(ndarray::Array1::from)
    }
}


#[cfg(test)]
mod tests {
    use std::{any::Any, cell::Cell, rc::Rc};
    use crate::{
        Error, ErrorKind, Ivp, Phase, Settings, StepFailure, Tolerances,
        integrator::{Integrator, Rhs, Stats},
    };

    /// Forward Euler with a fixed number of sub-steps, failing past
    /// `t = 10`.
    struct Euler {
        rhs: Rhs,
        t: f64,
        y: Vec<f64>,
        tol: Tolerances,
        reinits: usize,
    }

    impl Integrator for Euler {
        fn create(rhs: Rhs, t0: f64, y0: &[f64], settings: &Settings)
                  -> Result<Self, Error> {
            Ok(Euler { rhs, t: t0, y: y0.to_vec(),
                       tol: settings.tolerances, reinits: 0 })
        }

        fn set_tolerances(&mut self, tol: Tolerances) -> Result<(), Error> {
            self.tol = tol;
            Ok(())
        }

        fn reinit(&mut self, t0: f64, y0: &[f64]) -> Result<(), Error> {
            self.t = t0;
            self.y.copy_from_slice(y0);
            self.reinits += 1;
            Ok(())
        }

        fn step_to(&mut self, t: f64, y: &mut [f64])
                   -> Result<f64, StepFailure> {
            if t > 10. {
                return Err(StepFailure::TooMuchWork)
            }
            let n = 1000;
            let h = (t - self.t) / n as f64;
            let mut dy = vec![0.; self.y.len()];
            for _ in 0 .. n {
                (self.rhs)(self.t, &self.y, &mut dy);
                for (yi, di) in self.y.iter_mut().zip(&dy) {
                    *yi += h * di;
                }
                self.t += h;
            }
            self.t = t;
            y.copy_from_slice(&self.y);
            Ok(t)
        }

        fn stats(&self) -> Stats {
            Stats { steps: self.reinits as u64, rhs_evals: 0 }
        }
    }

    fn mock() -> Ivp<Euler> {
        Ivp::with_integrator(Settings::default().probe_seed(1))
    }

    fn zero(_: f64, _: &[f64], dy: &mut [f64], _: Option<&dyn Any>) {
        dy.fill(0.);
    }

    #[test]
    fn life_cycle() {
        let mut ode = mock();
        assert_eq!(ode.phase(), Phase::Uninitialized);
        assert_eq!(ode.dimension(), 0);
        ode.set_initial_value(&[1., 2.], 0.).unwrap();
        assert_eq!(ode.phase(), Phase::HasDimension);
        assert_eq!(ode.dimension(), 2);
        ode.set_rhs_fn(zero).unwrap();
        assert_eq!(ode.phase(), Phase::HasIntegrator);
        let mut y = [f64::NAN; 2];
        ode.integrate(1., &mut y).unwrap();
        assert_eq!(y, [1., 2.]);
    }

    #[test]
    fn rhs_before_initial_value() {
        let mut ode = mock();
        let e = ode.set_rhs_fn(zero).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IllegalState);
        assert_eq!(ode.phase(), Phase::Uninitialized);
    }

    #[test]
    fn rhs_with_zero_dimension() {
        let mut ode = mock();
        ode.set_initial_value(&[], 0.).unwrap();
        let e = ode.set_rhs_fn(zero).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::IllegalState);
        assert_eq!(ode.phase(), Phase::HasDimension);
    }

    #[test]
    fn tolerances_before_rhs() {
        let mut ode = mock();
        assert_eq!(ode.set_tolerances(1e-6, 1e-6).unwrap_err().kind(),
                   ErrorKind::IllegalState);
        ode.set_initial_value(&[1.], 0.).unwrap();
        assert_eq!(ode.set_tolerances(1e-6, 1e-6).unwrap_err().kind(),
                   ErrorKind::IllegalState);
    }

    #[test]
    fn integrate_before_rhs() {
        let mut ode = mock();
        let mut y = [0.];
        assert_eq!(ode.integrate(1., &mut y).unwrap_err().kind(),
                   ErrorKind::IllegalState);
        ode.set_initial_value(&[1.], 0.).unwrap();
        assert_eq!(ode.integrate(1., &mut y).unwrap_err().kind(),
                   ErrorKind::IllegalState);
    }

    #[test]
    fn non_finite_initial_time() {
        let mut ode = mock();
        for t0 in [f64::NAN, f64::INFINITY] {
            let e = ode.set_initial_value(&[1.], t0).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(ode.phase(), Phase::Uninitialized);
    }

    #[test]
    fn probe_detects_short_output() {
        let mut ode = mock();
        ode.set_initial_value(&[1., 2., 3.], 0.).unwrap();
        let e = ode.set_rhs_fn(|_, _, dy, _| dy[0] = 1.).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ContractViolation);
        assert!(e.to_string().contains("Wrong signature"));
        assert_eq!(ode.phase(), Phase::HasDimension);
    }

    #[test]
    fn nan_derivative_is_rejected() {
        let mut ode = mock();
        ode.set_initial_value(&[1., 2.], 0.).unwrap();
        let e = ode.set_rhs_fn(|_, y, dy, _| {
            dy[0] = y[0];
            dy[1] = f64::NAN;
        }).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ContractViolation);
        assert!(e.to_string().contains(
            "1 of the 2 components of the derivative were not written or \
             are NaN"));
        assert_eq!(ode.phase(), Phase::HasDimension);
    }

    #[test]
    fn probe_detects_long_output() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        let e = ode.set_rhs_fn(|_, y, dy, _| {
            dy[0] = y[0];
            dy[1] = y[1];
        }).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ContractViolation);
    }

    #[test]
    fn probe_uses_probe_time_and_unit_interval() {
        let seen = Rc::new(Cell::new((0., true)));
        let s = Rc::clone(&seen);
        let mut ode = mock();
        ode.set_initial_value(&[5., 5.], 0.).unwrap();
        ode.set_rhs_fn(move |t, y, dy, _| {
            if s.get().0 == 0. {
                s.set((t, y.iter().all(|&v| (0. .. 1.).contains(&v))));
            }
            dy.fill(0.);
        }).unwrap();
        assert_eq!(seen.get(), (42., true));
    }

    #[test]
    fn probe_is_reproducible_with_a_seed() {
        let draw = || {
            let first = Rc::new(Cell::new(f64::NAN));
            let f = Rc::clone(&first);
            let mut ode = mock();
            ode.set_initial_value(&[0.], 0.).unwrap();
            ode.set_rhs_fn(move |_, y, dy, _| {
                if f.get().is_nan() { f.set(y[0]) }
                dy[0] = 0.;
            }).unwrap();
            first.get()
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn set_tolerances_restarts_from_initial_value() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        ode.set_rhs_fn(|_, _, dy, _| dy[0] = 1.).unwrap();
        let mut y = [f64::NAN];
        ode.integrate(2., &mut y).unwrap();
        assert_eq_tol!(y[0], 3., 1e-12);
        ode.set_tolerances(1e-8, 1e-9).unwrap();
        assert_eq!(ode.stats(), Some(Stats { steps: 1, rhs_evals: 0 }));
        ode.integrate(1., &mut y).unwrap();
        assert_eq_tol!(y[0], 2., 1e-12);
    }

    #[test]
    fn bad_tolerances() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        ode.set_rhs_fn(zero).unwrap();
        let e = ode.set_tolerances(-1., 1e-6).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ode.phase(), Phase::HasIntegrator);
    }

    #[test]
    fn user_data_set_after_rhs() {
        let mut ode = mock();
        ode.set_initial_value(&[0.], 0.).unwrap();
        ode.set_rhs_fn(|_, _, dy, ud| {
            dy[0] = ud.and_then(|u| u.downcast_ref::<f64>()).copied()
                .unwrap_or(0.);
        }).unwrap();
        ode.set_user_data(Rc::new(3_f64));
        let mut y = [f64::NAN];
        ode.integrate(1., &mut y).unwrap();
        assert_eq_tol!(y[0], 3., 1e-12);
        ode.set_user_data(Rc::new(-3_f64));
        ode.integrate(2., &mut y).unwrap();
        assert_eq_tol!(y[0], 0., 1e-12);
    }

    #[test]
    fn user_data_set_before_rhs() {
        let mut ode = mock();
        ode.set_user_data(Rc::new(2_f64));
        ode.set_initial_value(&[0.], 0.).unwrap();
        ode.set_rhs_fn(|_, _, dy, ud| {
            dy[0] = *ud.unwrap().downcast_ref::<f64>().unwrap();
        }).unwrap();
        assert_eq_tol!(ode.solution(1.).unwrap()[0], 2., 1e-12);
    }

    #[test]
    fn wrong_output_length() {
        let mut ode = mock();
        ode.set_initial_value(&[1., 1.], 0.).unwrap();
        ode.set_rhs_fn(zero).unwrap();
        let mut y = [0.];
        assert_eq!(ode.integrate(1., &mut y).unwrap_err().kind(),
                   ErrorKind::InvalidArgument);
        assert_eq!(ode.phase(), Phase::HasIntegrator);
    }

    #[test]
    fn failure_requires_restart() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        ode.set_rhs_fn(zero).unwrap();
        let mut y = [f64::NAN];
        let e = ode.integrate(11., &mut y).unwrap_err();
        assert!(matches!(e, Error::IntegrationFailure {
            source: StepFailure::TooMuchWork, .. }));
        assert_eq!(ode.phase(), Phase::Failed);
        assert_eq!(ode.integrate(1., &mut y).unwrap_err().kind(),
                   ErrorKind::IllegalState);
        ode.set_tolerances(1e-6, 1e-6).unwrap();
        assert_eq!(ode.phase(), Phase::HasIntegrator);
        ode.integrate(1., &mut y).unwrap();
        assert_eq!(y, [1.]);
    }

    #[test]
    fn new_initial_value_discards_integrator() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        ode.set_rhs_fn(zero).unwrap();
        ode.set_initial_value(&[1., 2.], 0.5).unwrap();
        assert_eq!(ode.phase(), Phase::HasDimension);
        assert_eq!(ode.stats(), None);
        ode.set_rhs_fn(zero).unwrap();
        assert_eq!(ode.solution(1.).unwrap(), vec![1., 2.]);
    }

    #[test]
    fn rhs_panic_marks_failed() {
        let mut ode = mock();
        ode.set_initial_value(&[1.], 0.).unwrap();
        ode.set_rhs_fn(|t, _, dy, _| {
            if t > 0.5 && t < 10. { panic!("boom") }
            dy[0] = 0.;
        }).unwrap();
        let mut y = [f64::NAN];
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = ode.integrate(1., &mut y);
        }));
        assert!(r.is_err());
        assert_eq!(ode.phase(), Phase::Failed);
    }

    #[test]
    fn default_integrator_zero_rhs() {
        let mut ode = Ivp::with_settings(Settings::default().probe_seed(0));
        ode.set_initial_value(&[0.25, -4.], 1.5).unwrap();
        ode.set_rhs_fn(zero).unwrap();
        let mut y = [f64::NAN; 2];
        ode.integrate(1.5, &mut y).unwrap();
        assert_eq!(y, [0.25, -4.]);
    }
}
