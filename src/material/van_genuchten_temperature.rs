use super::{LiquidRetention, ModelVanGenuchten};
use crate::StrError;

/// Implements a regularized van Genuchten model scaled by temperature
///
/// Everything except the capillary pressure is taken from the regularized
/// van Genuchten model; pc is scaled by the empirical fit of Grant (2003):
///
/// ```text
/// pc(swe, T) = pc_vg(swe) · (β₀ + T) / (β₀ + T_ref)
/// ```
///
/// with β₀ = −413.4 and T_ref = 298.15 K. The factor is exposed through
/// [`LiquidRetention::temperature_factor`] so callers apply it to both pc
/// and dpc/dswe.
pub struct ModelVanGenuchtenOfTemperature {
    base: ModelVanGenuchten,
}

const BETA_0: f64 = -413.4; // empirical fit coefficient
const T_REF: f64 = 298.15; // reference temperature in K

impl ModelVanGenuchtenOfTemperature {
    /// Allocates a new instance
    pub fn new(
        alpha: f64,
        m: f64,
        n: f64,
        sl_min: f64,
        sl_max: f64,
        swe_low: f64,
        swe_high: f64,
    ) -> Result<Self, StrError> {
        Ok(ModelVanGenuchtenOfTemperature {
            base: ModelVanGenuchten::new(alpha, m, n, sl_min, sl_max, swe_low, swe_high)?,
        })
    }
}

impl LiquidRetention for ModelVanGenuchtenOfTemperature {
    fn saturation_limits(&self) -> (f64, f64) {
        self.base.saturation_limits()
    }

    fn pc(&self, swe: f64) -> Result<f64, StrError> {
        self.base.pc(swe)
    }

    fn dpc_dswe(&self, swe: f64) -> Result<f64, StrError> {
        self.base.dpc_dswe(swe)
    }

    fn sl(&self, pc: f64) -> Result<f64, StrError> {
        self.base.sl(pc)
    }

    fn krw(&self, swe: f64) -> Result<f64, StrError> {
        self.base.krw(swe)
    }

    fn krn(&self, swe: f64) -> Result<f64, StrError> {
        self.base.krn(swe)
    }

    fn temperature_factor(&self, temperature: f64) -> f64 {
        (BETA_0 + temperature) / (BETA_0 + T_REF)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
