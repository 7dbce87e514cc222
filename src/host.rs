//! Name-based entry point used by a host framework.
//!
//! A host does not call the methods of [`Ivp`] directly: it passes a
//! method name and a list of dynamically typed [`Arg`]s, and receives
//! an integer status, `0` meaning success.  Arguments are checked
//! here, in particular the initial time must be a double even if an
//! integer or a single precision value would be numerically equal.
//!
//! ```
//! use sundials_ivp::{Arg, Ivp, IvpInterface, host};
//! let mut ode = Ivp::new();
//! let y0 = [1.];
//! let st = ode.call_status("set_initial_value",
//!                          vec![Arg::ArrayF64(&y0), Arg::Int(0)]);
//! assert_eq!(st, host::STATUS_ERROR);
//! let st = ode.call_status("set_initial_value",
//!                          vec![Arg::ArrayF64(&y0), Arg::Float64(0.)]);
//! assert_eq!(st, host::STATUS_OK);
//! ```

use log::error;
use crate::{Error, ErrorKind, Ivp, RhsFn, UserData, integrator::Integrator};

pub const STATUS_OK: i32 = 0;
/// A method failed.
pub const STATUS_ERROR: i32 = -1;
/// The implementation could not be initialized.
pub const STATUS_INIT_ERROR: i32 = -2;

/// Type codes of the arguments exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ArgType {
    Int = 1,
    Float32 = 2,
    Float64 = 3,
    ArrayF64 = 5,
    Str = 6,
    Callback = 7,
    UserData = 8,
}

/// Argument of a method call.
pub enum Arg<'a> {
    Int(i64),
    Float32(f32),
    Float64(f64),
    ArrayF64(&'a [f64]),
    /// Array the method writes into.
    ArrayF64Mut(&'a mut [f64]),
    Str(&'a str),
    Callback(RhsFn),
    UserData(UserData),
}

impl Arg<'_> {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Int(_) => ArgType::Int,
            Arg::Float32(_) => ArgType::Float32,
            Arg::Float64(_) => ArgType::Float64,
            Arg::ArrayF64(_) | Arg::ArrayF64Mut(_) => ArgType::ArrayF64,
            Arg::Str(_) => ArgType::Str,
            Arg::Callback(_) => ArgType::Callback,
            Arg::UserData(_) => ArgType::UserData,
        }
    }
}

fn unexpected(op: &'static str, name: &str, expected: &str, arg: &Arg<'_>)
              -> Error {
    Error::InvalidArgument {
        op,
        msg: format!("Argument `{name}` must be {expected}, got {:?}",
                     arg.arg_type()),
    }
}

fn float(op: &'static str, name: &str, arg: Arg<'_>) -> Result<f64, Error> {
    match arg {
        Arg::Float64(x) => Ok(x),
        Arg::Float32(x) => Ok(x as f64),
        a => Err(unexpected(op, name, "floating-point number", &a)),
    }
}

/// Initial times must be genuine doubles: neither integers nor single
/// precision values are converted.
fn double(op: &'static str, name: &str, arg: Arg<'_>) -> Result<f64, Error> {
    match arg {
        Arg::Float64(x) => Ok(x),
        a => Err(unexpected(op, name, "floating-point number", &a)),
    }
}

fn unpack<'a, const N: usize>(op: &'static str, args: Vec<Arg<'a>>)
                              -> Result<[Arg<'a>; N], Error> {
    let n = args.len();
    args.try_into().map_err(|_| Error::InvalidArgument {
        op, msg: format!("expected {N} argument(s), got {n}") })
}

/// Convert the outcome of a method to a status code, logging the
/// error if any.
pub fn status(r: &Result<(), Error>) -> i32 {
    match r {
        Ok(()) => STATUS_OK,
        Err(e) => {
            error!("{e}");
            match e.kind() {
                ErrorKind::Failure => STATUS_INIT_ERROR,
                _ => STATUS_ERROR,
            }
        }
    }
}

/// Interface of initial value problem solvers seen by the host.
pub trait IvpInterface {
    fn set_initial_value(&mut self, y0: &[f64], t0: f64) -> Result<(), Error>;

    fn set_rhs_fn(&mut self, rhs: RhsFn) -> Result<(), Error>;

    fn set_tolerances(&mut self, rtol: f64, atol: f64) -> Result<(), Error>;

    fn set_user_data(&mut self, user_data: UserData);

    fn integrate(&mut self, t: f64, y: &mut [f64]) -> Result<(), Error>;

    /// Call the method named `method` with `args`.
    fn call(&mut self, method: &str, args: Vec<Arg<'_>>) -> Result<(), Error> {
        match method {
            "set_initial_value" => {
                const OP: &str = "set_initial_value";
                let [y0, t0] = unpack::<2>(OP, args)?;
                let t0 = double(OP, "t0", t0)?;
                match y0 {
                    Arg::ArrayF64(y0) => self.set_initial_value(y0, t0),
                    Arg::ArrayF64Mut(y0) => self.set_initial_value(y0, t0),
                    a => Err(unexpected(OP, "y0", "an array", &a)),
                }
            }
            "set_rhs_fn" => {
                const OP: &str = "set_rhs_fn";
                match unpack::<1>(OP, args)? {
                    [Arg::Callback(f)] => self.set_rhs_fn(f),
                    [a] => Err(unexpected(OP, "rhs", "a callback", &a)),
                }
            }
            "set_tolerances" => {
                const OP: &str = "set_tolerances";
                let [rtol, atol] = unpack::<2>(OP, args)?;
                let rtol = float(OP, "rtol", rtol)?;
                let atol = float(OP, "atol", atol)?;
                self.set_tolerances(rtol, atol)
            }
            "set_user_data" => {
                const OP: &str = "set_user_data";
                match unpack::<1>(OP, args)? {
                    [Arg::UserData(u)] => {
                        self.set_user_data(u);
                        Ok(())
                    }
                    [a] => Err(unexpected(OP, "user_data", "user data", &a)),
                }
            }
            "integrate" => {
                const OP: &str = "integrate";
                let [t, y] = unpack::<2>(OP, args)?;
                let t = float(OP, "t", t)?;
                match y {
                    Arg::ArrayF64Mut(y) => self.integrate(t, y),
                    a => Err(unexpected(OP, "y", "a mutable array", &a)),
                }
            }
            _ => Err(Error::InvalidArgument {
                op: "call",
                msg: format!("unknown method `{method}`"),
            }),
        }
    }

    /// Same as [`IvpInterface::call`] but return a status code.
    fn call_status(&mut self, method: &str, args: Vec<Arg<'_>>) -> i32 {
        status(&self.call(method, args))
    }
}

impl<I: Integrator> IvpInterface for Ivp<I> {
    fn set_initial_value(&mut self, y0: &[f64], t0: f64) -> Result<(), Error> {
        Ivp::set_initial_value(self, y0, t0)
    }

    fn set_rhs_fn(&mut self, rhs: RhsFn) -> Result<(), Error> {
        Ivp::set_rhs_fn(self, rhs)
    }

    fn set_tolerances(&mut self, rtol: f64, atol: f64) -> Result<(), Error> {
        Ivp::set_tolerances(self, rtol, atol)
    }

    fn set_user_data(&mut self, user_data: UserData) {
        Ivp::set_user_data(self, user_data)
    }

    fn integrate(&mut self, t: f64, y: &mut [f64]) -> Result<(), Error> {
        Ivp::integrate(self, t, y)
    }
}
