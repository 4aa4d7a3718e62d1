use crate::StrError;

/// Implements the Parker-van Genuchten capillary pressure relations for three phases
///
/// The two-phase queries [`ModelParkerVanGen3P::pc`] and [`ModelParkerVanGen3P::sl`]
/// are not defined for three phases and fail with descriptive errors instead of
/// returning a silently wrong value; use `pcgw`, `pcnw`, and `pcgn`.
///
/// # Reference
///
/// * Parker JC, Lenhard RJ, Kuppusamy T (1987) A parametric model for constitutive
///   properties governing multiphase flow in porous media. Water Resources
///   Research, 23(4), 618-624
pub struct ModelParkerVanGen3P {
    alpha: f64,          // van Genuchten α parameter
    m: f64,              // van Genuchten m = 1 - 1/n
    swr: f64,            // residual wetting saturation
    snr: f64,            // residual non-wetting (liquid) saturation
    kr_regards_snr: bool, // regard snr in the non-wetting permeability (Helmig 1997)
}

impl ModelParkerVanGen3P {
    /// Allocates a new instance
    pub fn new(alpha: f64, n: f64, swr: f64, snr: f64, kr_regards_snr: bool) -> Result<Self, StrError> {
        if alpha <= 0.0 {
            return Err("alpha parameter for the Parker-van Genuchten model is invalid");
        }
        if n <= 1.0 {
            return Err("n parameter for the Parker-van Genuchten model is invalid");
        }
        if swr < 0.0 || swr >= 1.0 {
            return Err("swr parameter for the Parker-van Genuchten model is invalid");
        }
        if snr < 0.0 || snr >= 1.0 {
            return Err("snr parameter for the Parker-van Genuchten model is invalid");
        }
        Ok(ModelParkerVanGen3P {
            alpha,
            m: 1.0 - 1.0 / n,
            swr,
            snr,
            kr_regards_snr,
        })
    }

    /// Raw van Genuchten curve shared by the three pc relations
    fn pc_vg(&self, se: f64) -> f64 {
        f64::powf(f64::powf(se, -1.0 / self.m) - 1.0, 1.0 - self.m) / self.alpha
    }

    /// Two-phase capillary pressure (not defined for three phases)
    pub fn pc(&self, _swe: f64) -> Result<f64, StrError> {
        Err("capillary pressure for three phases is not defined; use pcgw, pcnw, or pcgn")
    }

    /// Two-phase inverse saturation curve (not defined for three phases)
    pub fn sl(&self, _pc: f64) -> Result<f64, StrError> {
        Err("saturation from capillary pressure for three phases is not defined")
    }

    /// Capillary pressure between the gas and wetting phases
    pub fn pcgw(&self, swe: f64) -> f64 {
        self.pc_vg(swe)
    }

    /// Capillary pressure between the non-wetting and wetting phases
    pub fn pcnw(&self, swe: f64) -> f64 {
        self.pc_vg(swe)
    }

    /// Capillary pressure between the gas and the total liquid (wetting plus non-wetting)
    pub fn pcgn(&self, ste: f64) -> f64 {
        self.pc_vg(ste)
    }

    /// Relative permeability of the wetting phase (standard two-phase Mualem form)
    pub fn krw(&self, swe: f64) -> f64 {
        let r = 1.0 - f64::powf(1.0 - f64::powf(swe, 1.0 / self.m), self.m);
        f64::sqrt(swe) * r * r
    }

    /// Relative permeability of the non-wetting liquid after Parker et al. (1987)
    pub fn krn(&self, swe: f64, sne: f64, ste: f64) -> f64 {
        let mut krn = f64::powf(1.0 - f64::powf(swe, 1.0 / self.m), self.m)
            - f64::powf(1.0 - f64::powf(ste, 1.0 / self.m), self.m);
        krn *= krn;
        if self.kr_regards_snr {
            let res_included = f64::max(f64::min(sne - self.snr / (1.0 - self.swr), 1.0), 0.0);
            krn * f64::sqrt(res_included)
        } else {
            krn * f64::sqrt(sne / (1.0 - self.swr))
        }
    }

    /// Relative permeability of the gas phase (standard two-phase form)
    pub fn krg(&self, ste: f64) -> f64 {
        f64::cbrt(1.0 - ste) * f64::powf(1.0 - f64::powf(ste, 1.0 / self.m), 2.0 * self.m)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelParkerVanGen3P;
    use crate::StrError;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ModelParkerVanGen3P::new(0.0, 2.0, 0.1, 0.05, false).err(),
            Some("alpha parameter for the Parker-van Genuchten model is invalid")
        );
        assert_eq!(
            ModelParkerVanGen3P::new(5e-4, 1.0, 0.1, 0.05, false).err(),
            Some("n parameter for the Parker-van Genuchten model is invalid")
        );
        assert_eq!(
            ModelParkerVanGen3P::new(5e-4, 2.0, 1.0, 0.05, false).err(),
            Some("swr parameter for the Parker-van Genuchten model is invalid")
        );
        assert_eq!(
            ModelParkerVanGen3P::new(5e-4, 2.0, 0.1, -0.1, false).err(),
            Some("snr parameter for the Parker-van Genuchten model is invalid")
        );
    }

    #[test]
    fn two_phase_queries_are_unsupported() -> Result<(), StrError> {
        let model = ModelParkerVanGen3P::new(5e-4, 2.0, 0.1, 0.05, false)?;
        assert_eq!(
            model.pc(0.5).err(),
            Some("capillary pressure for three phases is not defined; use pcgw, pcnw, or pcgn")
        );
        assert_eq!(
            model.sl(1000.0).err(),
            Some("saturation from capillary pressure for three phases is not defined")
        );
        Ok(())
    }

    #[test]
    fn three_phase_curves_work() -> Result<(), StrError> {
        let model = ModelParkerVanGen3P::new(5e-4, 2.0, 0.1, 0.05, false)?;
        // the three pc relations share the same raw van Genuchten curve
        assert_eq!(model.pcgw(0.5), model.pcnw(0.5));
        assert_eq!(model.pcgw(0.5), model.pcgn(0.5));
        approx_eq(model.pcgw(0.5), f64::powf(f64::powf(0.5, -2.0) - 1.0, 0.5) / 5e-4, 1e-10);
        // permeability endpoints
        assert_eq!(model.krw(0.0), 0.0);
        assert_eq!(model.krw(1.0), 1.0);
        assert_eq!(model.krg(1.0), 0.0);
        assert_eq!(model.krg(0.0), 1.0);
        // no non-wetting liquid means no non-wetting permeability
        assert_eq!(model.krn(0.5, 0.0, 0.5), 0.0);
        Ok(())
    }
}
