use super::{Dof, FaceSelector};
use crate::StrError;
use std::fmt;

/// Holds natural (Neumann) boundary conditions
///
/// The value is the prescribed flux density along the outer normal (positive
/// leaves the domain); the residual contribution is value times the face area.
/// Conditions attach to boundary faces selected by a function of the face
/// centroid. The default (no matching condition) is no-flow.
pub struct Natural {
    pub all: Vec<(FaceSelector, Dof, f64)>,
}

impl Natural {
    /// Allocates a new instance
    pub fn new() -> Self {
        Natural { all: Vec::new() }
    }

    /// Sets a natural boundary condition on the faces matching the selector
    pub fn on(&mut self, selector: FaceSelector, dof: Dof, value: f64) -> &mut Self {
        self.all.push((selector, dof, value));
        self
    }

    /// Returns the prescribed flux density on a boundary face, if any
    ///
    /// Returns an error if more than one condition matches the same face and dof.
    pub fn value(&self, centroid: &[f64], dof: Dof) -> Result<Option<f64>, StrError> {
        let mut found = None;
        for (selector, d, value) in &self.all {
            if *d == dof && selector(centroid) {
                if found.is_some() {
                    return Err("more than one natural boundary condition matches the same face and dof");
                }
                found = Some(*value);
            }
        }
        Ok(found)
    }

    /// Tells whether any condition matches a boundary face (any dof)
    pub fn has_any(&self, centroid: &[f64]) -> bool {
        self.all.iter().any(|(selector, _, _)| selector(centroid))
    }
}

impl fmt::Display for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Natural boundary conditions\n").unwrap();
        write!(f, "===========================\n").unwrap();
        for (_, dof, value) in &self.all {
            write!(f, "{} : q = {:?}\n", dof, value).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
