use super::{ModelBrooksCorey, ModelVanGenuchten, ModelVanGenuchtenOfTemperature};
use crate::base::ParamLiquidRetention;
use crate::StrError;

/// Specifies the essential functionality of liquid retention models
///
/// All curves take the effective saturation `swe ∈ [0, 1]`; inputs outside the
/// range are silently clamped. The capillary pressure is regularized: outside
/// `[swe_low, swe_high]` the raw curve is replaced by its tangent at the
/// threshold, so `pc` and `dpc_dswe` stay finite on the whole range and match
/// the raw law with continuous first derivative at the thresholds.
pub trait LiquidRetention: Send + Sync {
    /// Returns the saturation limits (sl_min, sl_max)
    fn saturation_limits(&self) -> (f64, f64);

    /// Calculates the capillary pressure pc(swe)
    fn pc(&self, swe: f64) -> Result<f64, StrError>;

    /// Calculates the derivative dpc/dswe
    fn dpc_dswe(&self, swe: f64) -> Result<f64, StrError>;

    /// Calculates the liquid saturation sl(pc) (inverse of the regularized pc curve)
    fn sl(&self, pc: f64) -> Result<f64, StrError>;

    /// Calculates the relative permeability of the wetting phase
    fn krw(&self, swe: f64) -> Result<f64, StrError>;

    /// Calculates the relative permeability of the non-wetting phase
    fn krn(&self, swe: f64) -> Result<f64, StrError>;

    /// Converts the liquid saturation to the effective saturation (clamped to [0, 1])
    fn swe(&self, sl: f64) -> f64 {
        let (sl_min, sl_max) = self.saturation_limits();
        f64::min(f64::max((sl - sl_min) / (sl_max - sl_min), 0.0), 1.0)
    }

    /// Returns the factor scaling pc for a given temperature (1.0 unless the model depends on it)
    fn temperature_factor(&self, temperature: f64) -> f64 {
        let _ = temperature;
        1.0
    }
}

/// Allocates a liquid retention model
pub fn new_liquid_retention_model(param: &ParamLiquidRetention) -> Result<Box<dyn LiquidRetention>, StrError> {
    match param {
        &ParamLiquidRetention::BrooksCorey {
            lambda,
            pc_ae,
            sl_min,
            sl_max,
            swe_low,
            swe_high,
        } => Ok(Box::new(ModelBrooksCorey::new(
            lambda, pc_ae, sl_min, sl_max, swe_low, swe_high,
        )?)),
        &ParamLiquidRetention::VanGenuchten {
            alpha,
            m,
            n,
            sl_min,
            sl_max,
            swe_low,
            swe_high,
        } => Ok(Box::new(ModelVanGenuchten::new(
            alpha, m, n, sl_min, sl_max, swe_low, swe_high,
        )?)),
        &ParamLiquidRetention::VanGenuchtenOfTemperature {
            alpha,
            m,
            n,
            sl_min,
            sl_max,
            swe_low,
            swe_high,
        } => Ok(Box::new(ModelVanGenuchtenOfTemperature::new(
            alpha, m, n, sl_min, sl_max, swe_low, swe_high,
        )?)),
    }
}

/// Checks the common parameters of retention models
pub(crate) fn check_retention_limits(sl_min: f64, sl_max: f64, swe_low: f64, swe_high: f64) -> Result<(), StrError> {
    if sl_max <= 0.0 || sl_max > 1.0 {
        return Err("sl_max parameter for the retention model is invalid");
    }
    if sl_min < 0.0 || sl_min >= sl_max {
        return Err("sl_min parameter for the retention model is invalid");
    }
    if swe_low <= 0.0 || swe_low >= 1.0 {
        return Err("swe_low parameter for the retention model is invalid");
    }
    if swe_high <= swe_low || swe_high >= 1.0 {
        return Err("swe_high parameter for the retention model is invalid");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
