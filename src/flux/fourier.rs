/// Computes the conductive heat flow across a face by Fourier's law (two-point)
///
/// The transmissibility is `t = area·λ_h/d` with the harmonic-mean normal
/// conductivity λ_h. The result is positive along the face normal (inside →
/// outside) when the inside is hotter.
pub fn fourier_heat_flow(transmissibility: f64, tt_inside: f64, tt_outside: f64) -> f64 {
    transmissibility * (tt_inside - tt_outside)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
