use super::VolumeVariables;
use crate::base::{Config, Dof, Elem, ParamConductivity, ParamFluids, Phase};
use crate::flux::FluxLaw;
use crate::geometry::FvGridGeometry;
use crate::material::{new_liquid_retention_model, LiquidRetention, ModelRealDensity};
use crate::StrError;
use gemlab::mesh::CellAttribute;
use russell_lab::Vector;
use russell_tensor::{Mandel, Tensor2};
use std::collections::HashMap;

/// Holds the constitutive models of one element attribute
pub struct ElemModel {
    /// Element kind and parameters
    pub elem: Elem,

    /// Liquid retention model (two-phase models only)
    pub retention: Option<Box<dyn LiquidRetention>>,

    /// Intrinsic density model of the liquid phase
    pub density_liquid: Option<ModelRealDensity>,

    /// Intrinsic density model of the gas phase
    pub density_gas: Option<ModelRealDensity>,

    /// Dynamic viscosity of the liquid phase
    pub viscosity_liquid: f64,

    /// Dynamic viscosity of the gas phase
    pub viscosity_gas: f64,
}

impl ElemModel {
    /// Allocates the models for one element kind
    fn new(elem: Elem, fluids: Option<&ParamFluids>) -> Result<Self, StrError> {
        let mut model = ElemModel {
            elem,
            retention: None,
            density_liquid: None,
            density_gas: None,
            viscosity_liquid: 0.0,
            viscosity_gas: 0.0,
        };
        match elem {
            Elem::Diffusion(..) => (),
            Elem::PorousLiq(param) => {
                if param.flux_law == FluxLaw::Fourier {
                    return Err("advective models require the Darcy or Forchheimer flux law");
                }
                let fluids = fluids.ok_or("single-phase flow requires fluid parameters")?;
                model.density_liquid = Some(ModelRealDensity::new(&fluids.liquid.density)?);
                model.viscosity_liquid = fluids.liquid.viscosity;
            }
            Elem::PorousLiqGas(param) => {
                if param.flux_law == FluxLaw::Fourier {
                    return Err("advective models require the Darcy or Forchheimer flux law");
                }
                let fluids = fluids.ok_or("two-phase flow requires fluid parameters")?;
                let gas = fluids.gas.as_ref().ok_or("two-phase flow requires gas fluid parameters")?;
                model.retention = Some(new_liquid_retention_model(&param.retention_liquid)?);
                model.density_liquid = Some(ModelRealDensity::new(&fluids.liquid.density)?);
                model.density_gas = Some(ModelRealDensity::new(&gas.density)?);
                model.viscosity_liquid = fluids.liquid.viscosity;
                model.viscosity_gas = gas.viscosity;
            }
        }
        Ok(model)
    }

    /// Returns the flux law of this element kind
    pub fn flux_law(&self) -> FluxLaw {
        match self.elem {
            Elem::Diffusion(..) => FluxLaw::Fourier,
            Elem::PorousLiq(param) => param.flux_law,
            Elem::PorousLiqGas(param) => param.flux_law,
        }
    }

    /// Builds the permeability (or conductivity) tensor at a given temperature
    pub fn tensor(&self, temperature: f64) -> Tensor2 {
        let param = match self.elem {
            Elem::Diffusion(p) => p.conductivity,
            Elem::PorousLiq(p) => p.permeability,
            Elem::PorousLiqGas(p) => p.permeability,
        };
        let mut tensor = Tensor2::new(Mandel::Symmetric2D);
        match param {
            ParamConductivity::Constant { kx, ky, kz: _ } => {
                tensor.sym_set(0, 0, kx);
                tensor.sym_set(1, 1, ky);
            }
            ParamConductivity::IsotropicLinear { kr, beta } => {
                let value = (1.0 + beta * temperature) * kr;
                tensor.sym_set(0, 0, value);
                tensor.sym_set(1, 1, value);
            }
        }
        tensor
    }

    /// Returns the source term of a local dof (zero when unset)
    pub fn source(&self, local_dof: usize) -> f64 {
        match self.elem {
            Elem::Diffusion(p) => p.source.unwrap_or(0.0),
            Elem::PorousLiq(p) => p.source.unwrap_or(0.0),
            Elem::PorousLiqGas(p) => {
                if local_dof == 0 {
                    p.source_liquid.unwrap_or(0.0)
                } else {
                    p.source_gas.unwrap_or(0.0)
                }
            }
        }
    }
}

/// Holds the discretized problem: geometry, configuration, and constitutive models
///
/// All cells must use the same element kind; the kind defines the number of
/// degrees of freedom per sub-control volume and the global equation numbering
/// `eq = scv_index · ndof + local_dof`.
pub struct Problem<'a> {
    /// Configuration (validated at construction)
    pub config: &'a Config,

    /// Finite-volume geometry
    pub geometry: &'a FvGridGeometry,

    /// Degrees of freedom per sub-control volume
    pub ndof: usize,

    /// The degrees of freedom of the (single) element kind
    pub dofs: &'static [Dof],

    /// Total number of equations
    pub neq_total: usize,

    /// Constitutive models per cell attribute
    models: HashMap<CellAttribute, ElemModel>,
}

impl<'a> Problem<'a> {
    /// Allocates a new instance, validating the configuration against the geometry
    pub fn new(config: &'a Config, geometry: &'a FvGridGeometry) -> Result<Self, StrError> {
        config.validate()?;
        let mut models = HashMap::new();
        let mut first_name: Option<String> = None;
        for index in 0..geometry.num_scv() {
            let attribute = geometry.scv(index)?.attribute;
            let elem = config
                .param_elements
                .get(&attribute)
                .ok_or("element parameters are missing for a cell attribute")?;
            match &first_name {
                None => first_name = Some(elem.name()),
                Some(name) => {
                    if *name != elem.name() {
                        return Err("all cells must use the same element kind");
                    }
                }
            }
            if !models.contains_key(&attribute) {
                models.insert(attribute, ElemModel::new(*elem, config.param_fluids.as_ref())?);
            }
        }
        let any = models.values().next().ok_or("mesh must have at least one cell")?;
        let ndof = any.elem.ndof();
        let dofs = any.elem.dofs();
        Ok(Problem {
            config,
            geometry,
            ndof,
            dofs,
            neq_total: geometry.num_scv() * ndof,
            models,
        })
    }

    /// Returns the global equation number of a local dof of a sub-control volume
    pub fn eq(&self, scv_index: usize, local_dof: usize) -> usize {
        scv_index * self.ndof + local_dof
    }

    /// Returns the constitutive models of a cell attribute
    pub fn model(&self, attribute: CellAttribute) -> Result<&ElemModel, StrError> {
        self.models
            .get(&attribute)
            .ok_or("element parameters are missing for a cell attribute")
    }

    /// Computes the volume variables of a sub-control volume from the global solution
    pub fn update_volume_variables(&self, scv_index: usize, uu: &Vector) -> Result<VolumeVariables, StrError> {
        let mut primary = vec![0.0; self.ndof];
        for local in 0..self.ndof {
            primary[local] = uu[self.eq(scv_index, local)];
        }
        self.update_volume_variables_from(scv_index, &primary)
    }

    /// Computes the volume variables of a sub-control volume from given primary values
    ///
    /// Also used to build ghost variables on Dirichlet boundary faces, where
    /// the primary values come from the boundary conditions.
    pub fn update_volume_variables_from(&self, scv_index: usize, primary: &[f64]) -> Result<VolumeVariables, StrError> {
        if primary.len() != self.ndof {
            return Err("the number of primary values must match ndof");
        }
        let scv = self.geometry.scv(scv_index)?;
        let model = self.model(scv.attribute)?;
        let mut vars = VolumeVariables::new(scv_index);
        match model.elem {
            Elem::Diffusion(..) => {
                vars.temperature = primary[0];
                vars.permeability = model.tensor(vars.temperature);
            }
            Elem::PorousLiq(param) => {
                let liquid = Phase::Liquid.index();
                let pl = primary[0];
                let density = model.density_liquid.as_ref().unwrap().density(pl)?;
                vars.pressure[liquid] = pl;
                vars.saturation[liquid] = 1.0;
                vars.density[liquid] = density;
                vars.viscosity[liquid] = model.viscosity_liquid;
                vars.rel_permeability[liquid] = 1.0;
                vars.mobility[liquid] = 1.0 / model.viscosity_liquid;
                vars.porosity = param.porosity_initial;
                vars.permeability = model.tensor(vars.temperature);
            }
            Elem::PorousLiqGas(param) => {
                let (liquid, gas) = (Phase::Liquid.index(), Phase::Gas.index());
                let (pl, sl) = (primary[0], primary[1]);
                let retention = model.retention.as_ref().unwrap();
                let swe = retention.swe(sl);
                let factor = retention.temperature_factor(vars.temperature);
                let pc = retention.pc(swe)? * factor;
                let pg = pl + pc;
                let krw = retention.krw(swe)?;
                let krn = retention.krn(swe)?;
                vars.pressure[liquid] = pl;
                vars.pressure[gas] = pg;
                vars.saturation[liquid] = sl;
                vars.saturation[gas] = 1.0 - sl;
                vars.density[liquid] = model.density_liquid.as_ref().unwrap().density(pl)?;
                vars.density[gas] = model.density_gas.as_ref().unwrap().density(pg)?;
                vars.viscosity[liquid] = model.viscosity_liquid;
                vars.viscosity[gas] = model.viscosity_gas;
                vars.rel_permeability[liquid] = krw;
                vars.rel_permeability[gas] = krn;
                vars.mobility[liquid] = krw / model.viscosity_liquid;
                vars.mobility[gas] = krn / model.viscosity_gas;
                vars.porosity = param.porosity_initial;
                vars.permeability = model.tensor(vars.temperature);
            }
        }
        Ok(vars)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
