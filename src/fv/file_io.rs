use super::FvState;
use crate::base::DEFAULT_OUT_DIR;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Assists in generating output files
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileIo {
    /// Holds a flag to enable/disable the file generation
    enabled: bool,

    /// Defines the output directory
    output_dir: String,

    /// Defines the filename stem
    filename_stem: String,

    /// Holds the count of files written
    output_count: usize,

    /// Holds the indices of the output files
    pub indices: Vec<usize>,

    /// Holds the simulation times corresponding to each output file
    pub times: Vec<f64>,
}

impl FileIo {
    /// Allocates a new instance with deactivated generation of files
    pub fn new() -> Self {
        FileIo {
            enabled: false,
            output_dir: String::new(),
            filename_stem: String::new(),
            output_count: 0,
            indices: Vec::new(),
            times: Vec::new(),
        }
    }

    /// Activates the generation of files
    ///
    /// # Input
    ///
    /// * `filename_stem` -- the last part of the filename without extension, e.g., "my_simulation"
    /// * `output_directory` -- the directory to save the output files.
    ///   None means that the default directory will be used; see [DEFAULT_OUT_DIR]
    pub fn activate(&mut self, filename_stem: &str, output_directory: Option<&str>) -> Result<(), StrError> {
        let out_dir = match output_directory {
            Some(d) => d,
            None => DEFAULT_OUT_DIR,
        };
        fs::create_dir_all(out_dir).map_err(|_| "cannot create output directory")?;
        self.enabled = true;
        self.output_dir = out_dir.to_string();
        self.filename_stem = filename_stem.to_string();
        Ok(())
    }

    /// Generates the filename path for the summary file
    pub fn path_summary(&self) -> String {
        if self.enabled {
            format!("{}/{}-summary.json", self.output_dir, self.filename_stem)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the state files
    pub fn path_state(&self, index: usize) -> String {
        if self.enabled {
            format!("{}/{}-{:0>20}.json", self.output_dir, self.filename_stem, index)
        } else {
            "".to_string()
        }
    }

    /// Reads a JSON file containing this struct
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
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(summary)
    }

    /// Writes a JSON file with this struct
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

    /// Writes the current state to a file
    ///
    /// **Note:** No output is generated if the file generation is deactivated.
    pub(crate) fn write_state(&mut self, state: &FvState) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_state(self.output_count);
            state.write_json(&path)?;
            self.indices.push(self.output_count);
            self.times.push(state.t);
            self.output_count += 1;
        }
        Ok(())
    }

    /// Writes this struct to the summary file
    pub(crate) fn write_self(&self) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_summary();
            self.write_json(&path)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FileIo;
    use crate::base::{Config, Elem, ParamDiffusion, SampleMeshes, DEFAULT_TEST_DIR};
    use crate::fv::{FvState, Problem};
    use crate::geometry::FvGridGeometry;
    use crate::StrError;

    #[test]
    fn deactivated_io_writes_nothing() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(2, 2.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let state = FvState::new(&problem);
        let mut file_io = FileIo::new();
        assert_eq!(file_io.path_state(0), "");
        assert_eq!(file_io.path_summary(), "");
        file_io.write_state(&state)?;
        file_io.write_self()?;
        assert_eq!(file_io.indices.len(), 0);
        Ok(())
    }

    #[test]
    fn activated_io_tracks_indices_and_times() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(2, 2.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let mut state = FvState::new(&problem);
        let mut file_io = FileIo::new();
        file_io.activate("test_file_io", Some(DEFAULT_TEST_DIR))?;
        file_io.write_state(&state)?;
        state.t = 1.5;
        file_io.write_state(&state)?;
        file_io.write_self()?;
        assert_eq!(file_io.indices, &[0, 1]);
        assert_eq!(file_io.times, &[0.0, 1.5]);

        let summary = FileIo::read_json(&file_io.path_summary())?;
        assert_eq!(summary.indices, &[0, 1]);
        let read = FvState::read_json(&file_io.path_state(1))?;
        assert_eq!(read.t, 1.5);
        Ok(())
    }
}
