use super::{GridVolumeVariables, Problem, VolumeVariables};
use crate::StrError;
use russell_lab::Vector;

/// Holds the volume variables of one element's stencil (policy-agnostic view)
///
/// [`ElementVolumeVariables::bind`] prepares the variables of the bound
/// element's stencil either by copying from the grid cache (global policy) or
/// by recomputing locally (local policy); both policies expose identical
/// accessor semantics. [`ElementVolumeVariables::bind_deflected`] always
/// recomputes, regardless of policy, and is used when the solution vector is
/// deflected for numeric differentiation (the grid cache would be stale).
pub struct ElementVolumeVariables {
    bound_cell: Option<usize>,
    indices: Vec<usize>,
    all: Vec<VolumeVariables>,
}

impl ElementVolumeVariables {
    /// Allocates a new (unbound) instance
    pub fn new() -> Self {
        ElementVolumeVariables {
            bound_cell: None,
            indices: Vec::new(),
            all: Vec::new(),
        }
    }

    /// Binds an element, preparing the volume variables of its stencil
    pub fn bind(
        &mut self,
        problem: &Problem,
        grid_vars: &GridVolumeVariables,
        cell_id: usize,
        uu: &Vector,
    ) -> Result<(), StrError> {
        self.bound_cell = Some(cell_id);
        self.indices.clear();
        self.all.clear();
        for &scv_index in problem.geometry.element_stencil(cell_id)? {
            self.indices.push(scv_index);
            if problem.config.cache_volume_variables {
                self.all.push(grid_vars.volvars(scv_index)?.clone());
            } else {
                self.all.push(problem.update_volume_variables(scv_index, uu)?);
            }
        }
        Ok(())
    }

    /// Binds an element, always recomputing the stencil variables from the given solution
    pub fn bind_deflected(&mut self, problem: &Problem, cell_id: usize, uu: &Vector) -> Result<(), StrError> {
        self.bound_cell = Some(cell_id);
        self.indices.clear();
        self.all.clear();
        for &scv_index in problem.geometry.element_stencil(cell_id)? {
            self.indices.push(scv_index);
            self.all.push(problem.update_volume_variables(scv_index, uu)?);
        }
        Ok(())
    }

    /// Returns the bound element, if any
    pub fn bound_cell(&self) -> Option<usize> {
        self.bound_cell
    }

    /// Returns the volume variables of a sub-control volume in the bound stencil
    pub fn get(&self, scv_index: usize) -> Result<&VolumeVariables, StrError> {
        match self.indices.iter().position(|i| *i == scv_index) {
            Some(local) => Ok(&self.all[local]),
            None => Err("volume variables were not bound for this sub-control volume"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
