use super::Problem;
use crate::StrError;
use russell_lab::{vec_copy, Vector};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FvState {
    /// Time
    pub t: f64,

    /// Delta time
    pub dt: f64,

    /// Primary unknowns {U}
    ///
    /// (n_equation)
    pub uu: Vector,

    /// Primary unknowns at the beginning of the timestep {U_old}
    ///
    /// (n_equation)
    pub uu_old: Vector,
}

impl FvState {
    /// Allocates a new instance with zeroed unknowns
    pub fn new(problem: &Problem) -> Self {
        FvState {
            t: problem.config.t_ini,
            dt: (problem.config.dt)(problem.config.t_ini),
            uu: Vector::new(problem.neq_total),
            uu_old: Vector::new(problem.neq_total),
        }
    }

    /// Copies the current unknowns into the old unknowns (commits a timestep)
    pub fn commit(&mut self) -> Result<(), StrError> {
        vec_copy(&mut self.uu_old, &self.uu)
    }

    /// Reads a JSON file containing the state
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FvState;
    use crate::base::{Config, Elem, ParamDiffusion, SampleMeshes, DEFAULT_TEST_DIR};
    use crate::fv::Problem;
    use crate::geometry::FvGridGeometry;
    use crate::StrError;

    #[test]
    fn new_commit_and_json_roundtrip_work() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config
            .set_transient(true)?
            .set_t_ini(0.5)?
            .set_dt(|_| 0.25)?
            .set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let mut state = FvState::new(&problem);
        assert_eq!(state.t, 0.5);
        assert_eq!(state.dt, 0.25);
        assert_eq!(state.uu.dim(), 3);

        state.uu[0] = 10.0;
        state.uu[2] = -3.0;
        state.commit()?;
        assert_eq!(state.uu_old[0], 10.0);
        assert_eq!(state.uu_old[2], -3.0);

        let path = format!("{}/state_roundtrip.json", DEFAULT_TEST_DIR);
        state.write_json(&path)?;
        let read = FvState::read_json(&path)?;
        assert_eq!(read.t, state.t);
        assert_eq!(read.dt, state.dt);
        assert_eq!(read.uu.as_data(), state.uu.as_data());
        assert_eq!(read.uu_old.as_data(), state.uu_old.as_data());
        Ok(())
    }

    #[test]
    fn read_json_handles_missing_files() {
        assert_eq!(
            FvState::read_json("/tmp/pmflow/__does_not_exist__.json").err(),
            Some("cannot open file")
        );
    }
}
