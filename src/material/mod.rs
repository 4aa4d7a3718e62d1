//! Implements liquid retention and density models

mod brooks_corey;
mod liquid_retention;
mod parker_van_genuchten_3p;
mod real_density;
mod van_genuchten;
mod van_genuchten_temperature;
pub use crate::material::brooks_corey::*;
pub use crate::material::liquid_retention::*;
pub use crate::material::parker_van_genuchten_3p::*;
pub use crate::material::real_density::*;
pub use crate::material::van_genuchten::*;
pub use crate::material::van_genuchten_temperature::*;
