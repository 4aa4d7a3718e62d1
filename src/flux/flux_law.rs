use super::{darcy_mass_flow, forchheimer_velocity, fourier_heat_flow, upstream_is_inside};
use crate::StrError;

/// Holds the data needed to evaluate an advective flux across a face
#[derive(Clone, Copy, Debug)]
pub struct AdvectiveInput {
    /// Transmissibility t = area·k_h/d
    pub transmissibility: f64,

    /// Harmonic-mean normal permeability (needed by the Forchheimer correction)
    pub k_h: f64,

    /// Face area
    pub area: f64,

    /// Pressure potential ψ = p + ρ·g·z on the inside
    pub potential_inside: f64,

    /// Pressure potential on the outside
    pub potential_outside: f64,

    /// Phase mobility λ = kr/μ on the inside
    pub mobility_inside: f64,

    /// Phase mobility on the outside
    pub mobility_outside: f64,

    /// Phase density on the inside
    pub rho_inside: f64,

    /// Phase density on the outside
    pub rho_outside: f64,

    /// Phase dynamic viscosity on the inside (Forchheimer correction only)
    pub viscosity_inside: f64,

    /// Phase dynamic viscosity on the outside
    pub viscosity_outside: f64,
}

/// Selects the law computing fluxes across sub-control-volume faces
///
/// The advective laws (Darcy and Forchheimer) and the conductive law (Fourier)
/// are mutually exclusive: requesting the kind of flux a law does not provide
/// is a fatal error, never a silently wrong value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FluxLaw {
    /// Darcy's law (creeping flow)
    Darcy,

    /// Forchheimer's law: Darcy plus an inertial drag with coefficient cf
    Forchheimer {
        /// Forchheimer (Ergun) coefficient
        cf: f64,
    },

    /// Fourier's law (heat conduction)
    Fourier,
}

impl FluxLaw {
    /// Computes the advective mass flow across a face (positive inside → outside)
    pub fn advective_mass_flow(&self, input: &AdvectiveInput) -> Result<f64, StrError> {
        match self {
            FluxLaw::Darcy => Ok(darcy_mass_flow(
                input.transmissibility,
                input.potential_inside,
                input.potential_outside,
                input.mobility_inside,
                input.mobility_outside,
                input.rho_inside,
                input.rho_outside,
            )),
            FluxLaw::Forchheimer { cf } => {
                let drive = input.transmissibility * (input.potential_inside - input.potential_outside);
                let (mobility, rho, viscosity) = if upstream_is_inside(drive) {
                    (input.mobility_inside, input.rho_inside, input.viscosity_inside)
                } else {
                    (input.mobility_outside, input.rho_outside, input.viscosity_outside)
                };
                let v_darcy = mobility * drive / input.area;
                let v = forchheimer_velocity(v_darcy, *cf, input.k_h, rho, viscosity);
                Ok(rho * v * input.area)
            }
            FluxLaw::Fourier => Err("the Fourier law cannot compute an advective flux"),
        }
    }

    /// Computes the conductive heat flow across a face (positive inside → outside)
    pub fn conductive_heat_flow(
        &self,
        transmissibility: f64,
        tt_inside: f64,
        tt_outside: f64,
    ) -> Result<f64, StrError> {
        match self {
            FluxLaw::Darcy => Err("the Darcy law cannot compute a conductive flux"),
            FluxLaw::Forchheimer { .. } => Err("the Forchheimer law cannot compute a conductive flux"),
            FluxLaw::Fourier => Ok(fourier_heat_flow(transmissibility, tt_inside, tt_outside)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
