use crate::flux::FluxLaw;

/// Holds parameters for liquid-retention models
///
/// The regularization thresholds `swe_low` and `swe_high` delimit the range of
/// effective saturation in which the raw curve is used; outside this range the
/// law switches to a linear extension matching the value and the first
/// derivative at the threshold, so that pc and dpc/dswe stay finite on [0,1].
#[derive(Clone, Copy, Debug)]
pub enum ParamLiquidRetention {
    BrooksCorey {
        /// Pore-size distribution index λ
        lambda: f64,

        /// Air-entry (displacement) pressure
        pc_ae: f64,

        /// Residual (minimum) liquid saturation
        sl_min: f64,

        /// Maximum liquid saturation
        sl_max: f64,

        /// Lower regularization threshold for the effective saturation
        swe_low: f64,

        /// Upper regularization threshold for the effective saturation
        swe_high: f64,
    },
    VanGenuchten {
        /// α parameter (inverse of a pressure)
        alpha: f64,

        /// m parameter
        m: f64,

        /// n parameter
        n: f64,

        /// Residual (minimum) liquid saturation
        sl_min: f64,

        /// Maximum liquid saturation
        sl_max: f64,

        /// Lower regularization threshold for the effective saturation
        swe_low: f64,

        /// Upper regularization threshold for the effective saturation
        swe_high: f64,
    },
    VanGenuchtenOfTemperature {
        /// α parameter (inverse of a pressure)
        alpha: f64,

        /// m parameter
        m: f64,

        /// n parameter
        n: f64,

        /// Residual (minimum) liquid saturation
        sl_min: f64,

        /// Maximum liquid saturation
        sl_max: f64,

        /// Lower regularization threshold for the effective saturation
        swe_low: f64,

        /// Upper regularization threshold for the effective saturation
        swe_high: f64,
    },
}

impl ParamLiquidRetention {
    /// Returns a sample Brooks-Corey parameter set
    pub fn sample_brooks_corey() -> Self {
        ParamLiquidRetention::BrooksCorey {
            lambda: 2.0,
            pc_ae: 5000.0,
            sl_min: 0.05,
            sl_max: 1.0,
            swe_low: 1e-2,
            swe_high: 99e-2,
        }
    }

    /// Returns a sample van Genuchten parameter set
    pub fn sample_van_genuchten() -> Self {
        ParamLiquidRetention::VanGenuchten {
            alpha: 1.74e-4,
            m: 0.6801,
            n: 3.1257,
            sl_min: 0.05,
            sl_max: 1.0,
            swe_low: 1e-2,
            swe_high: 99e-2,
        }
    }
}

/// Holds parameters for permeability or conductivity tensors
#[derive(Clone, Copy, Debug)]
pub enum ParamConductivity {
    Constant {
        /// x-component of the tensor
        kx: f64,

        /// y-component of the tensor
        ky: f64,

        /// z-component of the tensor
        kz: f64,
    },
    IsotropicLinear {
        /// Isotropic model k = (1 + β T) kᵣ I  (I is the identity tensor)
        kr: f64,

        /// Isotropic model k = (1 + β T) kᵣ I  (I is the identity tensor)
        beta: f64,
    },
}

/// Holds parameters for intrinsic (real) density
///
/// The slightly compressible model is ρ(p) = ρᵣ (1 + C (p - pᵣ))
#[derive(Clone, Copy, Debug)]
pub struct ParamRealDensity {
    /// Compressibility C = dρReal/dp / ρᵣ
    pub cc: f64,

    /// Reference pressure p₀
    pub p_ref: f64,

    /// Reference intrinsic density ρReal₀
    pub rho_ref: f64,
}

/// Holds parameters for one fluid phase
#[derive(Clone, Copy, Debug)]
pub struct ParamFluid {
    /// Intrinsic density model
    pub density: ParamRealDensity,

    /// Dynamic viscosity μ
    pub viscosity: f64,
}

/// Holds parameters for fluids (liquid and gas)
#[derive(Clone, Copy, Debug)]
pub struct ParamFluids {
    /// Wetting (liquid) phase
    pub liquid: ParamFluid,

    /// Non-wetting (gas) phase (required by two-phase models)
    pub gas: Option<ParamFluid>,
}

impl ParamFluids {
    /// Returns parameters for incompressible water and air
    pub fn sample_water_air() -> Self {
        ParamFluids {
            liquid: ParamFluid {
                density: ParamRealDensity {
                    cc: 0.0,
                    p_ref: 0.0,
                    rho_ref: 1000.0,
                },
                viscosity: 1.0e-3,
            },
            gas: Some(ParamFluid {
                density: ParamRealDensity {
                    cc: 0.0,
                    p_ref: 0.0,
                    rho_ref: 1.2,
                },
                viscosity: 1.8e-5,
            }),
        }
    }
}

// parameters for models --------------------------------------------------------------------------

/// Holds parameters for heat conduction (diffusion) problems
#[derive(Clone, Copy, Debug)]
pub struct ParamDiffusion {
    /// Transient coefficient (e.g., MassDensity times SpecificHeatCapacity)
    pub rho: f64,

    /// Conductivity parameters
    pub conductivity: ParamConductivity,

    /// Source term
    pub source: Option<f64>,
}

impl ParamDiffusion {
    /// Returns a sample set of parameters
    pub fn sample() -> Self {
        ParamDiffusion {
            rho: 1.0,
            conductivity: ParamConductivity::Constant {
                kx: 1.0,
                ky: 1.0,
                kz: 1.0,
            },
            source: None,
        }
    }
}

/// Holds parameters for single-phase liquid flow
#[derive(Clone, Copy, Debug)]
pub struct ParamPorousLiq {
    /// Initial porosity nf₀
    pub porosity_initial: f64,

    /// Intrinsic permeability of the porous medium
    pub permeability: ParamConductivity,

    /// Advective flux law (Darcy or Forchheimer)
    pub flux_law: FluxLaw,

    /// Source term (volumetric rate per unit volume)
    pub source: Option<f64>,
}

impl ParamPorousLiq {
    /// Returns a sample set of parameters
    pub fn sample() -> Self {
        ParamPorousLiq {
            porosity_initial: 0.4,
            permeability: ParamConductivity::Constant {
                kx: 1e-12,
                ky: 1e-12,
                kz: 1e-12,
            },
            flux_law: FluxLaw::Darcy,
            source: None,
        }
    }
}

/// Holds parameters for two-phase (liquid and gas) flow
#[derive(Clone, Copy, Debug)]
pub struct ParamPorousLiqGas {
    /// Initial porosity nf₀
    pub porosity_initial: f64,

    /// Intrinsic permeability of the porous medium
    pub permeability: ParamConductivity,

    /// Liquid retention model relating pc and sl
    pub retention_liquid: ParamLiquidRetention,

    /// Advective flux law (Darcy or Forchheimer)
    pub flux_law: FluxLaw,

    /// Source term for the liquid phase
    pub source_liquid: Option<f64>,

    /// Source term for the gas phase
    pub source_gas: Option<f64>,
}

impl ParamPorousLiqGas {
    /// Returns a sample set of parameters with the Brooks-Corey model
    pub fn sample_brooks_corey() -> Self {
        ParamPorousLiqGas {
            porosity_initial: 0.3,
            permeability: ParamConductivity::Constant {
                kx: 1e-10,
                ky: 1e-10,
                kz: 1e-10,
            },
            retention_liquid: ParamLiquidRetention::sample_brooks_corey(),
            flux_law: FluxLaw::Darcy,
            source_liquid: None,
            source_gas: None,
        }
    }
}

/// Defines the available element (model) kinds
///
/// All cells of a mesh must use the same kind; mixed-kind meshes are rejected
/// at problem construction.
#[derive(Clone, Copy, Debug)]
pub enum Elem {
    /// Heat conduction with temperature as the unknown
    Diffusion(ParamDiffusion),

    /// Single-phase liquid flow with liquid pressure as the unknown
    PorousLiq(ParamPorousLiq),

    /// Two-phase flow with liquid pressure and liquid saturation as unknowns
    PorousLiqGas(ParamPorousLiqGas),
}

impl Elem {
    /// Returns the number of degrees of freedom per sub-control volume
    pub fn ndof(&self) -> usize {
        match self {
            Elem::Diffusion(..) => 1,
            Elem::PorousLiq(..) => 1,
            Elem::PorousLiqGas(..) => 2,
        }
    }

    /// Returns the degrees of freedom handled by this element kind
    pub fn dofs(&self) -> &'static [crate::base::Dof] {
        match self {
            Elem::Diffusion(..) => &[crate::base::Dof::T],
            Elem::PorousLiq(..) => &[crate::base::Dof::Pl],
            Elem::PorousLiqGas(..) => &[crate::base::Dof::Pl, crate::base::Dof::Sl],
        }
    }

    /// Returns the name of the element kind
    pub fn name(&self) -> String {
        match self {
            Elem::Diffusion(..) => "Diffusion".to_string(),
            Elem::PorousLiq(..) => "PorousLiq".to_string(),
            Elem::PorousLiqGas(..) => "PorousLiqGas".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
