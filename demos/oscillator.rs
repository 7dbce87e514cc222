use std::{f64::consts::PI, rc::Rc};
use sundials_ivp::{Arg, Ivp, IvpInterface, host};

/// Drive the solver the way a host framework does: by method name.
fn main() {
    let mut ode = Ivp::new();
    let y0 = [1., 0.];
    let omega = 2.;
    let calls = [
        ("set_initial_value", vec![Arg::ArrayF64(&y0), Arg::Float64(0.)]),
        ("set_user_data", vec![Arg::UserData(Rc::new(omega))]),
        ("set_rhs_fn", vec![Arg::Callback(Box::new(|_, y, dy, ud| {
            let w = ud.and_then(|u| u.downcast_ref::<f64>()).copied()
                .unwrap_or(1.);
            dy[0] = y[1];
            dy[1] = -w * w * y[0];
        }))]),
        ("set_tolerances", vec![Arg::Float64(1e-10), Arg::Float64(1e-12)]),
    ];
    for (method, args) in calls {
        let st = ode.call_status(method, args);
        assert_eq!(st, host::STATUS_OK, "{method} failed");
    }
    let mut y = [f64::NAN; 2];
    let st = ode.call_status("integrate",
        vec![Arg::Float64(PI), Arg::ArrayF64Mut(&mut y)]);
    println!("status = {st}, y(π) = {y:?} (expected [1, 0])");
}
