/// Tells whether the inside volume is upstream for a given volumetric drive
///
/// The tie (zero drive) resolves toward the inside being upstream, following
/// the sign bit of +0.0.
pub fn upstream_is_inside(drive: f64) -> bool {
    !f64::is_sign_negative(drive)
}

/// Computes the advective mass flow across a face by Darcy's law (two-point)
///
/// The volumetric drive is `t·(ψ_in − ψ_out)` with the transmissibility
/// `t = area·k_h/d`; the mobility `λ = kr/μ` and the density are taken from
/// the upstream side. The result is positive along the face normal (inside →
/// outside).
pub fn darcy_mass_flow(
    transmissibility: f64,
    potential_inside: f64,
    potential_outside: f64,
    mobility_inside: f64,
    mobility_outside: f64,
    rho_inside: f64,
    rho_outside: f64,
) -> f64 {
    let drive = transmissibility * (potential_inside - potential_outside);
    let (mobility, rho) = if upstream_is_inside(drive) {
        (mobility_inside, rho_inside)
    } else {
        (mobility_outside, rho_outside)
    };
    rho * mobility * drive
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
