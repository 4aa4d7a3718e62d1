use super::Dof;
use crate::StrError;
use std::fmt;

/// Selects boundary faces by their centroid coordinates
pub type FaceSelector = fn(&[f64]) -> bool;

/// Holds essential (Dirichlet) boundary conditions
///
/// In the cell-centered scheme there are no unknowns on the boundary, thus a
/// Dirichlet value does not remove an equation; it enters the residual through
/// a half-cell flux against the prescribed value. Conditions attach to boundary
/// faces selected by a function of the face centroid. The default (no matching
/// condition) is no-flow.
pub struct Essential {
    pub all: Vec<(FaceSelector, Dof, f64)>,
}

impl Essential {
    /// Allocates a new instance
    pub fn new() -> Self {
        Essential { all: Vec::new() }
    }

    /// Sets an essential boundary condition on the faces matching the selector
    pub fn on(&mut self, selector: FaceSelector, dof: Dof, value: f64) -> &mut Self {
        self.all.push((selector, dof, value));
        self
    }

    /// Returns the prescribed value on a boundary face, if any
    ///
    /// Returns an error if more than one condition matches the same face and dof.
    pub fn value(&self, centroid: &[f64], dof: Dof) -> Result<Option<f64>, StrError> {
        let mut found = None;
        for (selector, d, value) in &self.all {
            if *d == dof && selector(centroid) {
                if found.is_some() {
                    return Err("more than one essential boundary condition matches the same face and dof");
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

impl fmt::Display for Essential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essential boundary conditions\n").unwrap();
        write!(f, "=============================\n").unwrap();
        for (_, dof, value) in &self.all {
            write!(f, "{} = {:?}\n", dof, value).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Essential;
    use crate::base::Dof;
    use crate::StrError;

    #[test]
    fn essential_works() -> Result<(), StrError> {
        let mut essential = Essential::new();
        essential
            .on(|x| x[0] < 1e-10, Dof::Pl, 195_000.0)
            .on(|x| x[0] < 1e-10, Dof::Sl, 0.33)
            .on(|x| x[0] > 2.6 - 1e-10, Dof::Pl, 100_000.0);
        assert_eq!(essential.value(&[0.0, 0.0], Dof::Pl)?, Some(195_000.0));
        assert_eq!(essential.value(&[0.0, 0.0], Dof::Sl)?, Some(0.33));
        assert_eq!(essential.value(&[2.6, 0.0], Dof::Pl)?, Some(100_000.0));
        assert_eq!(essential.value(&[1.3, 0.0], Dof::Pl)?, None);
        assert!(essential.has_any(&[0.0, 0.0]));
        assert!(!essential.has_any(&[1.3, 0.0]));
        assert_eq!(
            format!("{}", essential),
            "Essential boundary conditions\n\
             =============================\n\
             Pl = 195000.0\n\
             Sl = 0.33\n\
             Pl = 100000.0\n"
        );
        Ok(())
    }

    #[test]
    fn conflicting_conditions_are_caught() {
        let mut essential = Essential::new();
        essential
            .on(|x| x[0] < 1.0, Dof::Pl, 100.0)
            .on(|x| x[0] < 2.0, Dof::Pl, 200.0);
        assert_eq!(
            essential.value(&[0.5, 0.0], Dof::Pl).err(),
            Some("more than one essential boundary condition matches the same face and dof")
        );
        // disjoint selectors are fine
        assert_eq!(essential.value(&[1.5, 0.0], Dof::Pl).unwrap(), Some(200.0));
    }
}
