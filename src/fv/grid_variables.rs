use super::{Problem, VolumeVariables};
use crate::StrError;
use russell_lab::Vector;

/// Holds the grid-wide cache of volume variables (global caching policy)
///
/// The cache is recomputed once per solution update, strictly between
/// Newton-Raphson iterations; lookups are O(1) by sub-control volume index.
pub struct GridVolumeVariables {
    all: Vec<VolumeVariables>,
}

impl GridVolumeVariables {
    /// Allocates a new instance with one entry per sub-control volume
    pub fn new(num_scv: usize) -> Self {
        GridVolumeVariables {
            all: (0..num_scv).map(VolumeVariables::new).collect(),
        }
    }

    /// Recomputes the volume variables of every sub-control volume
    pub fn update_all(&mut self, problem: &Problem, uu: &Vector) -> Result<(), StrError> {
        for index in 0..self.all.len() {
            self.all[index] = problem.update_volume_variables(index, uu)?;
        }
        Ok(())
    }

    /// Returns the cached volume variables of a sub-control volume
    pub fn volvars(&self, scv_index: usize) -> Result<&VolumeVariables, StrError> {
        self.all.get(scv_index).ok_or("volume variables index is out of range")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::GridVolumeVariables;
    use crate::base::{Config, Elem, ParamFluids, ParamPorousLiq, SampleMeshes};
    use crate::fv::Problem;
    use crate::geometry::FvGridGeometry;
    use crate::StrError;
    use russell_lab::Vector;

    #[test]
    fn update_all_and_lookup_work() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config
            .set_param_fluids(ParamFluids::sample_water_air())?
            .set_param_elements(1, Elem::PorousLiq(ParamPorousLiq::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let mut grid_vars = GridVolumeVariables::new(geo.num_scv());
        let uu = Vector::from(&[100_000.0, 150_000.0, 200_000.0]);
        grid_vars.update_all(&problem, &uu)?;
        assert_eq!(grid_vars.volvars(1)?.pressure[0], 150_000.0);
        assert_eq!(grid_vars.volvars(2)?.pressure[0], 200_000.0);
        assert_eq!(grid_vars.volvars(9).err(), Some("volume variables index is out of range"));

        // recomputing with the same solution reproduces identical contents
        let json_before = serde_json::to_string(grid_vars.volvars(1)?).map_err(|_| "serialize failed")?;
        grid_vars.update_all(&problem, &uu)?;
        let json_after = serde_json::to_string(grid_vars.volvars(1)?).map_err(|_| "serialize failed")?;
        assert_eq!(json_before, json_after);
        Ok(())
    }
}
