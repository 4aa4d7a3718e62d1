use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds the derived state of one sub-control volume
///
/// Two-entry arrays hold the liquid (index 0) and gas (index 1) phases; unused
/// phases stay at zero. Recomputing from the same primary unknowns reproduces
/// byte-identical contents (no hidden state), which keeps the caching policies
/// interchangeable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumeVariables {
    /// Index of the sub-control volume these variables belong to
    pub scv_index: usize,

    /// Phase pressures (liquid, gas)
    pub pressure: [f64; 2],

    /// Phase saturations (liquid, gas)
    pub saturation: [f64; 2],

    /// Phase intrinsic densities (liquid, gas)
    pub density: [f64; 2],

    /// Phase dynamic viscosities (liquid, gas)
    pub viscosity: [f64; 2],

    /// Phase relative permeabilities (liquid, gas)
    pub rel_permeability: [f64; 2],

    /// Phase mobilities kr/μ (liquid, gas)
    pub mobility: [f64; 2],

    /// Temperature
    pub temperature: f64,

    /// Porosity
    pub porosity: f64,

    /// Intrinsic permeability (thermal conductivity for heat conduction)
    pub permeability: Tensor2,

    /// Extrusion factor (1.0 unless a pseudo-dimension is modeled)
    pub extrusion_factor: f64,
}

impl VolumeVariables {
    /// Allocates a new instance with zeroed quantities
    pub fn new(scv_index: usize) -> Self {
        VolumeVariables {
            scv_index,
            pressure: [0.0; 2],
            saturation: [0.0; 2],
            density: [0.0; 2],
            viscosity: [0.0; 2],
            rel_permeability: [0.0; 2],
            mobility: [0.0; 2],
            temperature: 0.0,
            porosity: 1.0,
            permeability: Tensor2::new(Mandel::Symmetric2D),
            extrusion_factor: 1.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::VolumeVariables;
    use crate::StrError;

    #[test]
    fn new_and_serialization_work() -> Result<(), StrError> {
        let mut vars = VolumeVariables::new(3);
        vars.pressure = [100_000.0, 101_325.0];
        vars.saturation = [0.7, 0.3];
        let json = serde_json::to_string(&vars).map_err(|_| "cannot serialize volume variables")?;
        let back: VolumeVariables =
            serde_json::from_str(&json).map_err(|_| "cannot deserialize volume variables")?;
        let json_again = serde_json::to_string(&back).map_err(|_| "cannot serialize volume variables")?;
        assert_eq!(json, json_again);
        assert_eq!(back.scv_index, 3);
        assert_eq!(back.pressure[1], 101_325.0);
        Ok(())
    }
}
