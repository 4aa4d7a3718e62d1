//! Implements variables, caches, assembly, and the nonlinear solver

mod assembler;
mod communicator;
mod convergence;
mod element_variables;
mod file_io;
mod flux_cache;
mod grid_variables;
mod linear_system;
mod local_residual;
mod newton_solver;
mod problem;
mod state;
mod volume_variables;
pub use crate::fv::assembler::*;
pub use crate::fv::communicator::*;
pub use crate::fv::convergence::*;
pub use crate::fv::element_variables::*;
pub use crate::fv::file_io::*;
pub use crate::fv::flux_cache::*;
pub use crate::fv::grid_variables::*;
pub use crate::fv::linear_system::*;
pub use crate::fv::local_residual::*;
pub use crate::fv::newton_solver::*;
pub use crate::fv::problem::*;
pub use crate::fv::state::*;
pub use crate::fv::volume_variables::*;
