/// Applies the Forchheimer inertial correction to a Darcy velocity
///
/// Solves `v (1 + β |v|) = v_darcy` with `β = cf·√k_h·ρ/μ` taken from the
/// upstream side, using the closed form
///
/// ```text
/// |v| = (−1 + √(1 + 4 β |v_darcy|)) / (2 β)
/// ```
///
/// The correction always reduces the velocity magnitude and recovers Darcy's
/// law for `cf → 0`.
pub fn forchheimer_velocity(v_darcy: f64, cf: f64, k_h: f64, rho_up: f64, mu_up: f64) -> f64 {
    if v_darcy == 0.0 {
        return v_darcy;
    }
    let beta = cf * f64::sqrt(k_h) * rho_up / mu_up;
    if beta == 0.0 {
        return v_darcy;
    }
    let magnitude = (-1.0 + f64::sqrt(1.0 + 4.0 * beta * v_darcy.abs())) / (2.0 * beta);
    magnitude * v_darcy.signum()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
