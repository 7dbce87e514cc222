use sundials_ivp::{Ivp, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ode = Ivp::with_settings(Settings::default().max_steps(5000));
    ode.set_initial_value(&[1.], 0.)?;
    ode.set_rhs_fn(|_t, y, dy, _| dy[0] = -y[0])?;
    let mut y = [f64::NAN];
    for i in 1 ..= 10 {
        let t = 0.5 * i as f64;
        ode.integrate(t, &mut y)?;
        println!("{t:4.1} {:.15e} {:.3e}", y[0], (y[0] - (-t).exp()).abs());
    }
    if let Some(st) = ode.stats() {
        println!("steps: {}, rhs evaluations: {}", st.steps, st.rhs_evals);
    }
    Ok(())
}
