use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines degrees of freedom associated with a sub-control volume
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Dof {
    /// Liquid (wetting) pressure
    Pl,

    /// Liquid (wetting) saturation
    Sl,

    /// Temperature
    T,
}

/// Defines the fluid phases
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Phase {
    /// Wetting (liquid) phase
    Liquid,

    /// Non-wetting (gas) phase
    Gas,
}

impl Phase {
    /// Returns the index of the phase (liquid = 0, gas = 1)
    pub fn index(&self) -> usize {
        match self {
            Phase::Liquid => 0,
            Phase::Gas => 1,
        }
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dof::Pl => write!(f, "Pl"),
            Dof::Sl => write!(f, "Sl"),
            Dof::T => write!(f, "T"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dof, Phase};

    #[test]
    fn derive_and_display_work() {
        let dof = Dof::Pl;
        let copy = dof;
        assert_eq!(format!("{}", copy), "Pl");
        assert_eq!(format!("{}", Dof::Sl), "Sl");
        assert_eq!(format!("{}", Dof::T), "T");
        assert!(Dof::Pl < Dof::Sl);
        assert_eq!(Phase::Liquid.index(), 0);
        assert_eq!(Phase::Gas.index(), 1);
    }
}
