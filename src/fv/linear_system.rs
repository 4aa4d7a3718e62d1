use super::Elements;
use crate::base::Config;
use crate::StrError;
use russell_lab::Vector;
use russell_sparse::{LinSolver, SparseMatrix, Sym};

/// Holds the global vectors and matrix of the linearized system
///
/// The system solved at every Newton-Raphson iteration is:
///
/// ```text
/// [K] {mdu} = {R}    with    {du} = -{mdu}
/// ```
///
/// where `K` is the (numerical) Jacobian, `R` is the residual, and `mdu` is
/// the negative of the solution increment.
pub struct LinearSystem<'a> {
    /// Total number of equations
    pub neq_total: usize,

    /// Supremum of the number of nonzero values in the global matrix
    pub nnz_sup: usize,

    /// Global residual vector
    pub rr: Vector,

    /// Global Jacobian matrix
    pub kk: SparseMatrix,

    /// Linear solver
    pub solver: LinSolver<'a>,

    /// Negative of the solution increment
    pub mdu: Vector,
}

impl<'a> LinearSystem<'a> {
    /// Allocates a new instance
    pub fn new(config: &Config, elements: &Elements) -> Result<Self, StrError> {
        let neq_total = elements.neq_total;
        let nnz_sup = elements.nnz_sup;
        // upwinding makes the Jacobian non-symmetric
        let sym = Sym::No;
        Ok(LinearSystem {
            neq_total,
            nnz_sup,
            rr: Vector::new(neq_total),
            kk: SparseMatrix::new_coo(neq_total, neq_total, nnz_sup, sym)?,
            solver: LinSolver::new(config.lin_sol_genie)?,
            mdu: Vector::new(neq_total),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
