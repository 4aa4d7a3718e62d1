//! Implements sub-control volumes, faces, and stencils derived from a mesh

mod fv_grid_geometry;
mod sub_control_volume;
mod sub_control_volume_face;
pub use crate::geometry::fv_grid_geometry::*;
pub use crate::geometry::sub_control_volume::*;
pub use crate::geometry::sub_control_volume_face::*;
