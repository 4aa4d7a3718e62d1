use super::{ElementFluxVarsCache, ElementVolumeVariables, GridVolumeVariables, Problem, VolumeVariables};
use crate::base::{Elem, Essential, Natural, Phase};
use crate::flux::AdvectiveInput;
use crate::geometry::SubControlVolumeFace;
use crate::StrError;
use russell_lab::Vector;

/// Computes the residual of one element (its single sub-control volume)
///
/// Per evaluation the element volume variables are bound first (policy-driven,
/// or always recomputed when the solution is deflected for differentiation),
/// then the flux-variables cache, then each boundary face is classified
/// against the essential/natural conditions, and finally the balance
///
/// ```text
/// r = (m(u) − m(u_old))·vol/Δt + Σ outward face fluxes − source·vol
/// ```
///
/// accumulates per degree of freedom; influx appears as a negative
/// contribution. The storage term only enters transient analyses.
pub struct LocalResidual {
    elem_vars: ElementVolumeVariables,
    elem_vars_old: ElementVolumeVariables,
    flux_cache: ElementFluxVarsCache,

    /// Residual of the element's sub-control volume (ndof entries)
    pub residual: Vec<f64>,
}

impl LocalResidual {
    /// Allocates a new instance
    pub fn new(ndof: usize) -> Self {
        LocalResidual {
            elem_vars: ElementVolumeVariables::new(),
            elem_vars_old: ElementVolumeVariables::new(),
            flux_cache: ElementFluxVarsCache::new(),
            residual: vec![0.0; ndof],
        }
    }

    /// Evaluates the residual of an element for the current solution
    ///
    /// Set `deflected` when `uu` differs from the solution the grid cache was
    /// updated with (numeric differentiation); the stencil variables are then
    /// recomputed instead of copied.
    pub fn calc(
        &mut self,
        problem: &Problem,
        essential: &Essential,
        natural: &Natural,
        grid_vars: &GridVolumeVariables,
        cell_id: usize,
        uu: &Vector,
        uu_old: &Vector,
        dt: f64,
        deflected: bool,
    ) -> Result<(), StrError> {
        if deflected {
            self.elem_vars.bind_deflected(problem, cell_id, uu)?;
        } else {
            self.elem_vars.bind(problem, grid_vars, cell_id, uu)?;
        }
        if problem.config.transient {
            self.elem_vars_old.bind_deflected(problem, cell_id, uu_old)?;
        }
        let generation = self.flux_cache.bind(problem, cell_id, &self.elem_vars)?;

        let scv = problem.geometry.scv(cell_id)?;
        let model = problem.model(scv.attribute)?;
        let law = model.flux_law();
        for value in self.residual.iter_mut() {
            *value = 0.0;
        }

        // storage
        if problem.config.transient {
            let vars = self.elem_vars.get(cell_id)?;
            let vars_old = self.elem_vars_old.get(cell_id)?;
            match model.elem {
                Elem::Diffusion(param) => {
                    let m = param.rho * vars.temperature;
                    let m_old = param.rho * vars_old.temperature;
                    self.residual[0] += (m - m_old) * scv.volume / dt;
                }
                Elem::PorousLiq(..) => {
                    let liquid = Phase::Liquid.index();
                    let m = vars.porosity * vars.density[liquid];
                    let m_old = vars_old.porosity * vars_old.density[liquid];
                    self.residual[0] += (m - m_old) * scv.volume / dt;
                }
                Elem::PorousLiqGas(..) => {
                    for phase in [Phase::Liquid, Phase::Gas] {
                        let p = phase.index();
                        let m = vars.porosity * vars.saturation[p] * vars.density[p];
                        let m_old = vars_old.porosity * vars_old.saturation[p] * vars_old.density[p];
                        self.residual[p] += (m - m_old) * scv.volume / dt;
                    }
                }
            }
        }

        // face fluxes
        for &scvf_index in problem.geometry.element_scvfs(cell_id)? {
            let face = problem.geometry.scvf(scvf_index)?;
            let (transmissibility, k_h) = self.flux_cache.get(cell_id, scvf_index, generation)?;
            match face.outside {
                Some(outside) => {
                    let sign = if face.inside == cell_id { 1.0 } else { -1.0 };
                    let inside_vars = self.elem_vars.get(face.inside)?;
                    let outside_vars = self.elem_vars.get(outside)?;
                    let z_inside = last_coordinate(&problem.geometry.scv(face.inside)?.center);
                    let z_outside = last_coordinate(&problem.geometry.scv(outside)?.center);
                    add_face_fluxes(
                        &mut self.residual,
                        problem,
                        model.elem,
                        law,
                        transmissibility,
                        k_h,
                        face,
                        inside_vars,
                        outside_vars,
                        z_inside,
                        z_outside,
                        sign,
                    )?;
                }
                None => {
                    self.add_boundary_flux(
                        problem,
                        essential,
                        natural,
                        cell_id,
                        face,
                        transmissibility,
                        k_h,
                    )?;
                }
            }
        }

        // source
        for local in 0..self.residual.len() {
            self.residual[local] -= model.source(local) * scv.volume;
        }
        Ok(())
    }

    /// Classifies a boundary face and adds its contribution
    fn add_boundary_flux(
        &mut self,
        problem: &Problem,
        essential: &Essential,
        natural: &Natural,
        cell_id: usize,
        face: &SubControlVolumeFace,
        transmissibility: f64,
        k_h: f64,
    ) -> Result<(), StrError> {
        let centroid = &face.center;
        if essential.has_any(centroid) && natural.has_any(centroid) {
            return Err("a face cannot combine essential and natural boundary conditions");
        }

        let scv = problem.geometry.scv(cell_id)?;
        let model = problem.model(scv.attribute)?;
        let law = model.flux_law();

        if essential.has_any(centroid) {
            // ghost values from the prescribed data: all dofs must be given
            let mut primary = vec![0.0; problem.ndof];
            for (local, dof) in problem.dofs.iter().enumerate() {
                match essential.value(centroid, *dof)? {
                    Some(value) => primary[local] = value,
                    None => return Err("essential boundary faces require values for every dof of the element"),
                }
            }
            let ghost = problem.update_volume_variables_from(cell_id, &primary)?;
            let cell_vars = self.elem_vars.get(cell_id)?.clone();
            let z_cell = last_coordinate(&scv.center);
            let z_face = last_coordinate(centroid);
            add_face_fluxes(
                &mut self.residual,
                problem,
                model.elem,
                law,
                transmissibility,
                k_h,
                face,
                &cell_vars,
                &ghost,
                z_cell,
                z_face,
                1.0,
            )?;
            return Ok(());
        }

        // natural conditions: prescribed outward flux density times area (default no-flow)
        for (local, dof) in problem.dofs.iter().enumerate() {
            if let Some(value) = natural.value(centroid, *dof)? {
                self.residual[local] += value * face.area;
            }
        }
        Ok(())
    }
}

/// Adds the outward fluxes of one face (all dofs) into the residual
fn add_face_fluxes(
    residual: &mut [f64],
    problem: &Problem,
    elem: Elem,
    law: crate::flux::FluxLaw,
    transmissibility: f64,
    k_h: f64,
    face: &SubControlVolumeFace,
    inside_vars: &VolumeVariables,
    outside_vars: &VolumeVariables,
    z_inside: f64,
    z_outside: f64,
    sign: f64,
) -> Result<(), StrError> {
    match elem {
        Elem::Diffusion(..) => {
            let flow = law.conductive_heat_flow(transmissibility, inside_vars.temperature, outside_vars.temperature)?;
            residual[0] += sign * flow;
        }
        Elem::PorousLiq(..) => {
            let flow = advective_flow(
                problem,
                law,
                transmissibility,
                k_h,
                face.area,
                Phase::Liquid.index(),
                inside_vars,
                outside_vars,
                z_inside,
                z_outside,
            )?;
            residual[0] += sign * flow;
        }
        Elem::PorousLiqGas(..) => {
            for phase in [Phase::Liquid, Phase::Gas] {
                let p = phase.index();
                let flow = advective_flow(
                    problem,
                    law,
                    transmissibility,
                    k_h,
                    face.area,
                    p,
                    inside_vars,
                    outside_vars,
                    z_inside,
                    z_outside,
                )?;
                residual[p] += sign * flow;
            }
        }
    }
    Ok(())
}

/// Computes the advective mass flow of one phase across a face
fn advective_flow(
    problem: &Problem,
    law: crate::flux::FluxLaw,
    transmissibility: f64,
    k_h: f64,
    area: f64,
    phase: usize,
    inside_vars: &VolumeVariables,
    outside_vars: &VolumeVariables,
    z_inside: f64,
    z_outside: f64,
) -> Result<f64, StrError> {
    // pressure potential; the face density is the arithmetic average
    let (mut psi_inside, mut psi_outside) = (inside_vars.pressure[phase], outside_vars.pressure[phase]);
    if problem.config.enable_gravity {
        let rho_face = (inside_vars.density[phase] + outside_vars.density[phase]) / 2.0;
        psi_inside += rho_face * problem.config.gravity * z_inside;
        psi_outside += rho_face * problem.config.gravity * z_outside;
    }
    law.advective_mass_flow(&AdvectiveInput {
        transmissibility,
        k_h,
        area,
        potential_inside: psi_inside,
        potential_outside: psi_outside,
        mobility_inside: inside_vars.mobility[phase],
        mobility_outside: outside_vars.mobility[phase],
        rho_inside: inside_vars.density[phase],
        rho_outside: outside_vars.density[phase],
        viscosity_inside: inside_vars.viscosity[phase],
        viscosity_outside: outside_vars.viscosity[phase],
    })
}

/// Returns the last coordinate (the axis gravity acts along, negatively)
fn last_coordinate(coords: &[f64]) -> f64 {
    coords[coords.len() - 1]
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
