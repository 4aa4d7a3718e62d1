//! Implements flux laws evaluated across sub-control-volume faces

mod darcy;
mod flux_law;
mod forchheimer;
mod fourier;
mod harmonic_mean;
pub use crate::flux::darcy::*;
pub use crate::flux::flux_law::*;
pub use crate::flux::forchheimer::*;
pub use crate::flux::fourier::*;
pub use crate::flux::harmonic_mean::*;
