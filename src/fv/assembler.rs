use super::{GridVolumeVariables, LocalResidual, Problem};
use crate::base::{Essential, Natural};
use crate::StrError;
use russell_lab::{deriv1_central5, vec_copy, Vector};
use russell_sparse::CooMatrix;

/// Holds the workspace to evaluate the residual inside the derivative closure
struct ArgsForNumericalJacobian<'a> {
    local: &'a mut LocalResidual,
    uu_work: &'a mut Vector,
}

/// Assembles the global residual vector and Jacobian matrix element by element
///
/// Each element contributes its sub-control-volume residual to the global
/// vector through plain accumulation (commutative, so the fixed traversal
/// order is a determinism convenience and not a correctness requirement). The
/// Jacobian is computed numerically by central differences on every stencil
/// dof; the deflected evaluations always recompute the stencil volume
/// variables, keeping the grid cache consistent with the undeflected solution.
pub struct Elements {
    local: LocalResidual,
    uu_work: Vector,

    /// Total number of equations
    pub neq_total: usize,

    /// Supremum of the number of nonzero values in the global matrix
    ///
    /// Each element owns ndof rows and its stencil provides ndof columns per
    /// stencil member; nnz_sup is the sum of ndof² times the stencil length.
    pub nnz_sup: usize,
}

impl Elements {
    /// Allocates a new instance
    pub fn new(problem: &Problem) -> Result<Self, StrError> {
        let mut nnz_sup = 0;
        for cell_id in 0..problem.geometry.num_scv() {
            nnz_sup += problem.ndof * problem.ndof * problem.geometry.element_stencil(cell_id)?.len();
        }
        Ok(Elements {
            local: LocalResidual::new(problem.ndof),
            uu_work: Vector::new(problem.neq_total),
            neq_total: problem.neq_total,
            nnz_sup,
        })
    }

    /// Assembles the global residual vector
    pub fn assemble_residual(
        &mut self,
        rr: &mut Vector,
        problem: &Problem,
        essential: &Essential,
        natural: &Natural,
        grid_vars: &GridVolumeVariables,
        uu: &Vector,
        uu_old: &Vector,
        dt: f64,
    ) -> Result<(), StrError> {
        rr.fill(0.0);
        for cell_id in 0..problem.geometry.num_scv() {
            self.local
                .calc(problem, essential, natural, grid_vars, cell_id, uu, uu_old, dt, false)?;
            for local_dof in 0..problem.ndof {
                rr[problem.eq(cell_id, local_dof)] += self.local.residual[local_dof];
            }
        }
        Ok(())
    }

    /// Assembles the global Jacobian matrix by central differences
    pub fn assemble_jacobian(
        &mut self,
        kk: &mut CooMatrix,
        problem: &Problem,
        essential: &Essential,
        natural: &Natural,
        grid_vars: &GridVolumeVariables,
        uu: &Vector,
        uu_old: &Vector,
        dt: f64,
    ) -> Result<(), StrError> {
        vec_copy(&mut self.uu_work, uu)?;
        let mut args = ArgsForNumericalJacobian {
            local: &mut self.local,
            uu_work: &mut self.uu_work,
        };
        for cell_id in 0..problem.geometry.num_scv() {
            for &col_cell in problem.geometry.element_stencil(cell_id)? {
                for j in 0..problem.ndof {
                    let col = problem.eq(col_cell, j);
                    let at_u = args.uu_work[col];
                    for i in 0..problem.ndof {
                        let row = problem.eq(cell_id, i);
                        let derivative = deriv1_central5(at_u, &mut args, |u, a| {
                            a.uu_work[col] = u;
                            a.local.calc(
                                problem, essential, natural, grid_vars, cell_id, a.uu_work, uu_old, dt, true,
                            )?;
                            Ok(a.local.residual[i])
                        })?;
                        kk.put(row, col, derivative)?;
                    }
                    args.uu_work[col] = at_u;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Elements;
    use crate::base::{Config, Dof, Elem, Essential, Natural, ParamDiffusion, SampleMeshes};
    use crate::fv::{GridVolumeVariables, Problem};
    use crate::geometry::FvGridGeometry;
    use crate::StrError;
    use russell_lab::{approx_eq, Vector};
    use russell_sparse::{CooMatrix, Sym};

    #[test]
    fn nnz_sup_counts_the_stencil_entries() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let elements = Elements::new(&problem)?;
        // stencils: [0,1], [0,1,2], [1,2] with ndof = 1
        assert_eq!(elements.nnz_sup, 2 + 3 + 2);
        assert_eq!(elements.neq_total, 3);
        Ok(())
    }

    #[test]
    fn jacobian_matches_the_analytical_tridiagonal() -> Result<(), StrError> {
        // steady diffusion on a 3-cell column: r_i = Σ t·(T_i − T_neighbor);
        // with unit conductivity and spacing, interior t = 1 and the rows of
        // the Jacobian are [1,-1,0], [-1,2,-1], [0,-1,1]
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let essential = Essential::new();
        let natural = Natural::new();
        let mut grid_vars = GridVolumeVariables::new(geo.num_scv());
        let uu = Vector::from(&[10.0, 20.0, 40.0]);
        grid_vars.update_all(&problem, &uu)?;

        let mut elements = Elements::new(&problem)?;
        let mut rr = Vector::new(3);
        elements.assemble_residual(&mut rr, &problem, &essential, &natural, &grid_vars, &uu, &uu, 1.0)?;
        approx_eq(rr[0], -10.0, 1e-12);
        approx_eq(rr[1], -10.0, 1e-12);
        approx_eq(rr[2], 20.0, 1e-12);

        let mut kk = CooMatrix::new(3, 3, elements.nnz_sup, Sym::No)?;
        elements.assemble_jacobian(&mut kk, &problem, &essential, &natural, &grid_vars, &uu, &uu, 1.0)?;
        let dense = kk.as_dense();
        approx_eq(dense.get(0, 0), 1.0, 1e-9);
        approx_eq(dense.get(0, 1), -1.0, 1e-9);
        approx_eq(dense.get(0, 2), 0.0, 1e-9);
        approx_eq(dense.get(1, 0), -1.0, 1e-9);
        approx_eq(dense.get(1, 1), 2.0, 1e-9);
        approx_eq(dense.get(1, 2), -1.0, 1e-9);
        approx_eq(dense.get(2, 1), -1.0, 1e-9);
        approx_eq(dense.get(2, 2), 1.0, 1e-9);
        Ok(())
    }

    #[test]
    fn dirichlet_faces_contribute_to_the_diagonal() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(1, 1.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let mut essential = Essential::new();
        essential.on(|x| x[0] < 1e-10, Dof::T, 100.0);
        let natural = Natural::new();
        let mut grid_vars = GridVolumeVariables::new(1);
        let uu = Vector::from(&[40.0]);
        grid_vars.update_all(&problem, &uu)?;

        let mut elements = Elements::new(&problem)?;
        let mut kk = CooMatrix::new(1, 1, elements.nnz_sup, Sym::No)?;
        elements.assemble_jacobian(&mut kk, &problem, &essential, &natural, &grid_vars, &uu, &uu, 1.0)?;
        // half-cell transmissibility t = 1/0.5 = 2
        approx_eq(kk.as_dense().get(0, 0), 2.0, 1e-9);
        Ok(())
    }
}
