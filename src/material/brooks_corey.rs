use super::{check_retention_limits, LiquidRetention};
use crate::StrError;

/// Implements the regularized Brooks-Corey model for liquid retention
///
/// The raw curve is
///
/// ```text
/// pc(swe) = pc_ae · swe^(-1/λ)
/// ```
///
/// which diverges for swe → 0. Below `swe_low` and above `swe_high` the curve
/// is replaced by its tangent at the threshold (same value and derivative),
/// thus pc and dpc/dswe are finite on [0, 1].
///
/// The relative permeabilities follow the Burdine forms:
///
/// ```text
/// krw(swe) = swe^((2+3λ)/λ)
/// krn(swe) = (1 − swe)² (1 − swe^((2+λ)/λ))
/// ```
pub struct ModelBrooksCorey {
    lambda: f64,   // pore-size distribution index
    pc_ae: f64,    // air-entry pressure
    sl_min: f64,   // residual (minimum) saturation
    sl_max: f64,   // maximum saturation
    swe_low: f64,  // lower regularization threshold
    swe_high: f64, // upper regularization threshold
}

impl ModelBrooksCorey {
    /// Allocates a new instance
    pub fn new(
        lambda: f64,
        pc_ae: f64,
        sl_min: f64,
        sl_max: f64,
        swe_low: f64,
        swe_high: f64,
    ) -> Result<Self, StrError> {
        check_retention_limits(sl_min, sl_max, swe_low, swe_high)?;
        if lambda <= 0.0 {
            return Err("lambda parameter for the Brooks-Corey model is invalid");
        }
        if pc_ae <= 0.0 {
            return Err("pc_ae parameter for the Brooks-Corey model is invalid");
        }
        Ok(ModelBrooksCorey {
            lambda,
            pc_ae,
            sl_min,
            sl_max,
            swe_low,
            swe_high,
        })
    }

    /// Calculates the raw (non-regularized) capillary pressure
    fn pc_raw(&self, swe: f64) -> f64 {
        self.pc_ae * f64::powf(swe, -1.0 / self.lambda)
    }

    /// Calculates the derivative of the raw capillary pressure
    fn dpc_raw(&self, swe: f64) -> f64 {
        -self.pc_ae / self.lambda * f64::powf(swe, -1.0 / self.lambda - 1.0)
    }
}

impl LiquidRetention for ModelBrooksCorey {
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
            f64::powf(pc / self.pc_ae, -self.lambda)
        };
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        Ok(self.sl_min + swe * (self.sl_max - self.sl_min))
    }

    fn krw(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        Ok(f64::powf(swe, (2.0 + 3.0 * self.lambda) / self.lambda))
    }

    fn krn(&self, swe: f64) -> Result<f64, StrError> {
        let swe = f64::min(f64::max(swe, 0.0), 1.0);
        Ok((1.0 - swe) * (1.0 - swe) * (1.0 - f64::powf(swe, (2.0 + self.lambda) / self.lambda)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelBrooksCorey;
    use crate::material::LiquidRetention;
    use crate::StrError;
    use russell_lab::{approx_eq, deriv1_central5};

    fn sample() -> ModelBrooksCorey {
        ModelBrooksCorey::new(2.0, 5000.0, 0.05, 1.0, 1e-2, 99e-2).unwrap()
    }

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ModelBrooksCorey::new(0.0, 5000.0, 0.05, 1.0, 1e-2, 99e-2).err(),
            Some("lambda parameter for the Brooks-Corey model is invalid")
        );
        assert_eq!(
            ModelBrooksCorey::new(2.0, 0.0, 0.05, 1.0, 1e-2, 99e-2).err(),
            Some("pc_ae parameter for the Brooks-Corey model is invalid")
        );
        assert_eq!(
            ModelBrooksCorey::new(2.0, 5000.0, 0.05, 1.5, 1e-2, 99e-2).err(),
            Some("sl_max parameter for the retention model is invalid")
        );
    }

    #[test]
    fn pc_matches_the_raw_curve_inside_the_thresholds() -> Result<(), StrError> {
        let model = sample();
        for swe in [0.05, 0.33, 0.5, 0.9] {
            approx_eq(model.pc(swe)?, 5000.0 * f64::powf(swe, -0.5), 1e-12);
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
        // value and derivative match at both thresholds
        for threshold in [1e-2, 99e-2] {
            let below = model.pc(threshold - 1e-12)?;
            let above = model.pc(threshold + 1e-12)?;
            approx_eq(below, above, 1e-6);
            let num = deriv1_central5(threshold, &mut 0, |x, _| model.pc(x)).unwrap();
            approx_eq(model.dpc_dswe(threshold)?, num, 1e-4);
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
        // pc below the entry-pressure region clamps at full saturation
        assert_eq!(model.sl(0.0)?, 1.0);
        Ok(())
    }

    #[test]
    fn relative_permeability_endpoints_are_correct() -> Result<(), StrError> {
        let model = sample();
        assert_eq!(model.krw(0.0)?, 0.0);
        assert_eq!(model.krw(1.0)?, 1.0);
        assert_eq!(model.krn(0.0)?, 1.0);
        assert_eq!(model.krn(1.0)?, 0.0);
        // monotonicity
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
