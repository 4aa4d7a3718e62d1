use crate::base::ParamRealDensity;
use crate::StrError;

/// Implements a slightly compressible intrinsic (real) density model
///
/// ```text
/// ρ(p) = ρ_ref · (1 + C · (p − p_ref))
/// ```
pub struct ModelRealDensity {
    cc: f64,      // compressibility C
    p_ref: f64,   // reference pressure
    rho_ref: f64, // reference intrinsic density
}

impl ModelRealDensity {
    /// Allocates a new instance
    pub fn new(param: &ParamRealDensity) -> Result<Self, StrError> {
        if param.cc < 0.0 {
            return Err("compressibility parameter for the density model is invalid");
        }
        if param.rho_ref <= 0.0 {
            return Err("reference density parameter for the density model is invalid");
        }
        Ok(ModelRealDensity {
            cc: param.cc,
            p_ref: param.p_ref,
            rho_ref: param.rho_ref,
        })
    }

    /// Calculates the intrinsic density at a given pressure
    pub fn density(&self, pp: f64) -> Result<f64, StrError> {
        let rho = self.rho_ref * (1.0 + self.cc * (pp - self.p_ref));
        if rho <= 0.0 {
            return Err("intrinsic density became non-positive");
        }
        Ok(rho)
    }

    /// Returns the derivative dρ/dp (constant for this model)
    pub fn derivative(&self) -> f64 {
        self.rho_ref * self.cc
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
