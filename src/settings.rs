//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::Error;

/// Relative and absolute tolerances imposed on each internal step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances { rtol: 1e-15, atol: 1e-15 }
    }
}

impl Tolerances {
    /// Return the tolerances if both are finite and non-negative.
    pub fn checked(self, op: &'static str) -> Result<Self, Error> {
        let ok = |x: f64| x.is_finite() && x >= 0.;
        if ok(self.rtol) && ok(self.atol) {
            Ok(self)
        } else {
            Err(Error::InvalidArgument {
                op,
                msg: format!("tolerances must be finite and non-negative \
                              (rtol = {}, atol = {})", self.rtol, self.atol),
            })
        }
    }
}

/// Configuration of an [`Ivp`][crate::Ivp] solver.
///
/// ```
/// use sundials_ivp::Settings;
/// let s = Settings::default().max_steps(5000).rtol(1e-8);
/// assert_eq!(s.max_steps, 5000);
/// assert_eq!(s.tolerances.atol, 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Tolerances the integrator is created with.
    pub tolerances: Tolerances,
    /// Maximum number of internal steps per call to
    /// [`Ivp::integrate`][crate::Ivp::integrate].
    pub max_steps: usize,
    /// Time at which the right-hand side is probed to check its
    /// signature.
    pub probe_time: f64,
    /// Seed of the random state used for the probe.  `None` draws
    /// the seed from the operating system.
    pub probe_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tolerances: Tolerances::default(),
            max_steps: 1000,
            probe_time: 42.,
            probe_seed: None,
        }
    }
}

impl Settings {
    pub fn rtol(mut self, rtol: f64) -> Self {
        self.tolerances.rtol = rtol;
        self
    }

    pub fn atol(mut self, atol: f64) -> Self {
        self.tolerances.atol = atol;
        self
    }

    /// Specify the maximum number of steps to be taken by the solver
    /// in its attempt to reach the next output time.  Default: 1000.
    pub fn max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn probe_time(mut self, t: f64) -> Self {
        self.probe_time = t;
        self
    }

    pub fn probe_seed(mut self, seed: u64) -> Self {
        self.probe_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Settings, Tolerances};

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.tolerances, Tolerances { rtol: 1e-15, atol: 1e-15 });
        assert_eq!(s.max_steps, 1000);
        assert_eq!(s.probe_time, 42.);
        assert_eq!(s.probe_seed, None);
    }

    #[test]
    fn reject_bad_tolerances() {
        for (rtol, atol) in [(-1., 1e-6), (1e-6, f64::NAN), (f64::INFINITY, 0.)] {
            let e = Tolerances { rtol, atol }.checked("test").unwrap_err();
            assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        }
        assert!(Tolerances { rtol: 0., atol: 1e-9 }.checked("test").is_ok());
    }
}
