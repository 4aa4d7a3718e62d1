//! Makes available common structures needed to run a simulation
//!
//! You may write `use pmflow::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, Dof, Elem, Essential, Natural, SampleMeshes, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::base::{
    ParamConductivity, ParamDiffusion, ParamFluids, ParamLiquidRetention, ParamPorousLiq, ParamPorousLiqGas,
    ParamRealDensity,
};
pub use crate::flux::FluxLaw;
pub use crate::fv::{FileIo, FvState, NewtonSolver, Problem, SerialComm, SolveError};
pub use crate::geometry::FvGridGeometry;
