//! Implements configuration, parameters, and boundary conditions

mod config;
mod constants;
mod enums;
mod essential;
mod natural;
mod parameters;
mod sample_meshes;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::essential::*;
pub use crate::base::natural::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_meshes::*;
