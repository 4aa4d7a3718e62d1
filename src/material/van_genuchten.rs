use super::{check_retention_limits, LiquidRetention};
use crate::StrError;

/// Implements the regularized van Genuchten model for liquid retention
///
/// The raw curve is
///
/// ```text
/// pc(swe) = (swe^(-1/m) − 1)^(1/n) / α
/// ```
///
/// which diverges for swe → 0 and has an infinite derivative for swe → 1.
/// Below `swe_low` and above `swe_high` the curve is replaced by its tangent
/// at the threshold (same value and derivative), thus pc and dpc/dswe are
/// finite on [0, 1].
///
/// The relative permeabilities follow the Mualem forms:
///
/// ```text
/// krw(swe) = √swe (1 − (1 − swe^(1/m))^m)²
/// krn(swe) = ∛(1 − swe) (1 − swe^(1/m))^(2m)
/// ```
pub struct ModelVanGenuchten {
    alpha: f64,    // α parameter (inverse of a pressure)
    m: f64,        // m parameter
    n: f64,        // n parameter
    sl_min: f64,   // residual (minimum) saturation
    sl_max: f64,   // maximum saturation
    swe_low: f64,  // lower regularization threshold
    swe_high: f64, // upper regularization threshold
}

impl ModelVanGenuchten {
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
        check_retention_limits(sl_min, sl_max, swe_low, swe_high)?;
        if alpha <= 0.0 {
            return Err("alpha parameter for the van Genuchten model is invalid");
        }
        if m <= 0.0 || m >= 1.0 {
            return Err("m parameter for the van Genuchten model is invalid");
        }
        if n <= 1.0 {
            return Err("n parameter for the van Genuchten model is invalid");
        }
        Ok(ModelVanGenuchten {
            alpha,
            m,
            n,
            sl_min,
            sl_max,
            swe_low,
            swe_high,
        })
    }

    /// Calculates the raw (non-regularized) capillary pressure
    fn pc_raw(&self, swe: f64) -> f64 {
        f64::powf(f64::powf(swe, -1.0 / self.m) - 1.0, 1.0 / self.n) / self.alpha
    }

    /// Calculates the derivative of the raw capillary pressure
    fn dpc_raw(&self, swe: f64) -> f64 {
        let inner = f64::powf(swe, -1.0 / self.m) - 1.0;
        let d_inner = -f64::powf(swe, -1.0 / self.m - 1.0) / self.m;
        f64::powf(inner, 1.0 / self.n - 1.0) * d_inner / (self.n * self.alpha)
    }
}

impl LiquidRetention for ModelVanGenuchten {
    fn saturation_limits(&self) -> (f64, f64) {
        (self.sl_min, self.sl_max)
    }

    fn pc(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        if swe < self.swe_low {
            return Ok(self.pc_raw(self.swe_low) + self.dpc_raw(self.swe_low) * (swe - self.swe_low));
        }
        if swe > self.swe_high {
            return Ok(self.pc_raw(self.swe_high) + self.dpc_raw(self.swe_high) * (swe - self.swe_high));
        }
        Ok(self.pc_raw(swe))
    }

    fn dpc_dswe(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        if swe < self.swe_low {
            return Ok(self.dpc_raw(self.swe_low));
        }
        if swe > self.swe_high {
            return Ok(self.dpc_raw(self.swe_high));
        }
        Ok(self.dpc_raw(swe))
    }

    fn sl(&self, pc: f64) -> Result<f64, StrError> {
        let pc_low = self.pc_raw(self.swe_low);
        let pc_high = self.pc_raw(self.swe_high);
        let swe = if pc >= pc_low {
            self.swe_low + (pc - pc_low) / self.dpc_raw(self.swe_low)
        } else if pc <= pc_high {
            self.swe_high + (pc - pc_high) / self.dpc_raw(self.swe_high)
        } else {
            f64::powf(1.0 + f64::powf(self.alpha * pc, self.n), -self.m)
        };
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        Ok(self.sl_min + swe * (self.sl_max - self.sl_min))
    }

    fn krw(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        let r = 1.0 - f64::powf(1.0 - f64::powf(swe, 1.0 / self.m), self.m);
        Ok(f64::sqrt(swe) * r * r)
    }

    fn krn(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        Ok(f64::cbrt(1.0 - swe) * f64::powf(1.0 - f64::powf(swe, 1.0 / self.m), 2.0 * self.m))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelVanGenuchten;
    use crate::material::LiquidRetention;
    use crate::StrError;
    use russell_lab::{approx_eq, deriv1_central5};

    fn sample() -> ModelVanGenuchten {
        ModelVanGenuchten::new(5e-4, 0.5, 2.0, 0.05, 1.0, 1e-2, 99e-2).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ModelVanGenuchten::new(0.0, 0.5, 2.0, 0.05, 1.0, 1e-2, 99e-2).err(),
            Some("alpha parameter for the van Genuchten model is invalid")
        );
        assert_eq!(
            ModelVanGenuchten::new(5e-4, 1.5, 2.0, 0.05, 1.0, 1e-2, 99e-2).err(),
            Some("m parameter for the van Genuchten model is invalid")
        );
        assert_eq!(
            ModelVanGenuchten::new(5e-4, 0.5, 1.0, 0.05, 1.0, 1e-2, 99e-2).err(),
            Some("n parameter for the van Genuchten model is invalid")
        );
    }

    #[test]
    fn pc_matches_the_raw_curve_inside_the_thresholds() -> Result<(), StrError> {
        let model = sample();
        for swe in [0.05, 0.33, 0.5, 0.9] {
            let raw = f64::powf(f64::powf(swe, -2.0) - 1.0, 0.5) / 5e-4;
            approx_eq(model.pc(swe)?, raw, 1e-10);
        }
        Ok(())
    }

    #[test]
    fn pc_is_finite_and_c1_on_the_whole_range() -> Result<(), StrError> {
        let model = sample();
        for swe in [0.0, 1e-3, 1e-2, 0.5, 0.99, 0.999, 1.0, -0.5, 1.5] {
            assert!(model.pc(swe)?.is_finite());
            assert!(model.dpc_dswe(swe)?.is_finite());
        }
        for threshold in [1e-2, 99e-2] {
            let below = model.pc(threshold - 1e-12)?;
            let above = model.pc(threshold + 1e-12)?;
            approx_eq(below, above, 1e-4);
            let num = deriv1_central5(threshold, &mut 0, |x, _| model.pc(x)).unwrap();
            approx_eq(model.dpc_dswe(threshold)? / num, 1.0, 1e-4);
        }
        Ok(())
    }

    #[test]
    fn sl_inverts_pc() -> Result<(), StrError> {
        let model = sample();
        for swe in [5e-3, 0.05, 0.33, 0.5, 0.9, 0.995] {
            let pc = model.pc(swe)?;
            let sl = model.sl(pc)?;
            approx_eq(model.swe(sl), swe, 1e-10);
        }
        Ok(())
    }

    #[test]
    fn relative_permeability_endpoints_are_correct() -> Result<(), StrError> {
        let model = sample();
        assert_eq!(model.krw(0.0)?, 0.0);
        assert_eq!(model.krw(1.0)?, 1.0);
        assert_eq!(model.krn(0.0)?, 1.0);
        assert_eq!(model.krn(1.0)?, 0.0);
        let mut previous_krw = -1.0;
        let mut previous_krn = 2.0;
        for i in 0..11 {
            let swe = (i as f64) / 10.0;
            let krw = model.krw(swe)?;
            let krn = model.krn(swe)?;
            assert!(krw >= previous_krw);
            assert!(krn <= previous_krn);
            previous_krw = krw;
            previous_krn = krn;
        }
        Ok(())
    }
}
