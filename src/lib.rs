//! pmflow - Porous media flow simulator with cell-centered finite volumes
//!
//! This crate implements a cell-centered finite-volume kernel for flow in
//! porous media: constitutive (retention/conductivity) models, two-point
//! flux laws (Darcy, Forchheimer, Fourier), element-local volume/flux
//! variable caching, a local residual assembler, and a Newton-Raphson
//! nonlinear solver on top of a sparse linear-solver backend.
//!
//! The main modules are:
//!
//! * [`base`] - configuration, parameters, and boundary conditions
//! * [`geometry`] - sub-control volumes, faces, and stencils derived from a mesh
//! * [`material`] - liquid retention and density models
//! * [`flux`] - flux laws evaluated across sub-control-volume faces
//! * [`fv`] - variables, caches, assembly, and the nonlinear solver

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod flux;
pub mod fv;
pub mod geometry;
pub mod material;
pub mod prelude;
