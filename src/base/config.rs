use super::{Elem, ParamFluids};
use crate::StrError;
use gemlab::mesh::CellAttribute;
use russell_sparse::{Genie, LinSolParams};
use std::collections::HashMap;
use std::fmt;

/// Holds configuration data such as time stepping, convergence tolerances, and element parameters
///
/// All options are explicit fields with validating setters; [`Config::validate`]
/// is called at solver construction so invalid combinations fail before the
/// first assembly.
pub struct Config {
    /// Transient analysis (time derivatives in the storage term)
    pub transient: bool,

    /// Time increment Δt as a function of time
    pub dt: fn(f64) -> f64,

    /// Initial time
    pub t_ini: f64,

    /// Final time
    pub t_fin: f64,

    /// Maximum number of time steps
    pub n_max_time_steps: usize,

    /// Includes the gravity term in the face potential difference
    pub enable_gravity: bool,

    /// Gravity acceleration (acts along the negative last axis)
    pub gravity: f64,

    /// Preferred number of Newton-Raphson iterations per time step
    pub n_target_iterations: usize,

    /// Maximum number of Newton-Raphson iterations (hard ceiling)
    pub n_max_iterations: usize,

    /// Tolerance for the maximum relative shift of the primary unknowns
    pub tol_relative_shift: f64,

    /// Tolerance for the relative reduction of the residual norm
    pub tol_residual_reduction: f64,

    /// Enables the relative-shift convergence criterion
    pub enable_shift_criterion: bool,

    /// Enables the residual-reduction convergence criterion
    pub enable_residual_criterion: bool,

    /// Requires both enabled criteria to hold simultaneously
    pub satisfy_both_criteria: bool,

    /// Keeps a grid-wide cache of volume variables (otherwise recompute per element)
    pub cache_volume_variables: bool,

    /// Sparse solver kind
    pub lin_sol_genie: Genie,

    /// Sparse solver parameters
    pub lin_sol_params: LinSolParams,

    /// Parameters for elements, keyed by the cell attribute
    pub param_elements: HashMap<CellAttribute, Elem>,

    /// Parameters for fluids
    pub param_fluids: Option<ParamFluids>,

    /// Prints a line per time step
    pub verbose_timesteps: bool,

    /// Prints convergence statistics per iteration
    pub verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            transient: false,
            dt: |_| 1.0,
            t_ini: 0.0,
            t_fin: 1.0,
            n_max_time_steps: 1_000,
            enable_gravity: false,
            gravity: 0.0,
            n_target_iterations: 10,
            n_max_iterations: 18,
            tol_relative_shift: 1e-8,
            tol_residual_reduction: 1e-5,
            enable_shift_criterion: true,
            enable_residual_criterion: true,
            satisfy_both_criteria: false,
            cache_volume_variables: true,
            lin_sol_genie: Genie::Umfpack,
            lin_sol_params: LinSolParams::new(),
            param_elements: HashMap::new(),
            param_fluids: None,
            verbose_timesteps: false,
            verbose_iterations: false,
        }
    }

    /// Sets a transient analysis
    pub fn set_transient(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.transient = flag;
        Ok(self)
    }

    /// Sets the function to calculate Δt for a given time
    pub fn set_dt(&mut self, dt: fn(f64) -> f64) -> Result<&mut Self, StrError> {
        self.dt = dt;
        Ok(self)
    }

    /// Sets the initial time
    pub fn set_t_ini(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value < 0.0 {
            return Err("t_ini must be ≥ 0.0");
        }
        self.t_ini = value;
        Ok(self)
    }

    /// Sets the final time
    pub fn set_t_fin(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("t_fin must be > 0.0");
        }
        self.t_fin = value;
        Ok(self)
    }

    /// Sets the maximum number of time steps
    pub fn set_n_max_time_steps(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_time_steps must be ≥ 1");
        }
        self.n_max_time_steps = value;
        Ok(self)
    }

    /// Enables the gravity term and sets the acceleration magnitude
    pub fn set_gravity(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value < 0.0 {
            return Err("gravity must be ≥ 0.0");
        }
        self.enable_gravity = value > 0.0;
        self.gravity = value;
        Ok(self)
    }

    /// Sets the preferred number of Newton-Raphson iterations
    pub fn set_n_target_iterations(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_target_iterations must be ≥ 1");
        }
        self.n_target_iterations = value;
        Ok(self)
    }

    /// Sets the maximum number of Newton-Raphson iterations
    pub fn set_n_max_iterations(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("n_max_iterations must be ≥ 1");
        }
        self.n_max_iterations = value;
        Ok(self)
    }

    /// Sets the tolerance for the maximum relative shift
    pub fn set_tol_relative_shift(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("tol_relative_shift must be > 0.0");
        }
        self.tol_relative_shift = value;
        Ok(self)
    }

    /// Sets the tolerance for the relative residual reduction
    pub fn set_tol_residual_reduction(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("tol_residual_reduction must be > 0.0");
        }
        self.tol_residual_reduction = value;
        Ok(self)
    }

    /// Enables or disables the relative-shift convergence criterion
    pub fn set_enable_shift_criterion(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.enable_shift_criterion = flag;
        Ok(self)
    }

    /// Enables or disables the residual-reduction convergence criterion
    pub fn set_enable_residual_criterion(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.enable_residual_criterion = flag;
        Ok(self)
    }

    /// Requires both criteria to hold simultaneously for convergence
    pub fn set_satisfy_both_criteria(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.satisfy_both_criteria = flag;
        Ok(self)
    }

    /// Selects between the grid-wide cache and per-element recomputation of volume variables
    pub fn set_cache_volume_variables(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.cache_volume_variables = flag;
        Ok(self)
    }

    /// Sets the sparse solver kind
    pub fn set_lin_sol_genie(&mut self, genie: Genie) -> Result<&mut Self, StrError> {
        self.lin_sol_genie = genie;
        Ok(self)
    }

    /// Sets the sparse solver parameters
    pub fn set_lin_sol_params(&mut self, params: LinSolParams) -> Result<&mut Self, StrError> {
        self.lin_sol_params = params;
        Ok(self)
    }

    /// Sets parameters for elements with a given cell attribute
    pub fn set_param_elements(&mut self, attribute: CellAttribute, elem: Elem) -> Result<&mut Self, StrError> {
        self.param_elements.insert(attribute, elem);
        Ok(self)
    }

    /// Sets parameters for fluids
    pub fn set_param_fluids(&mut self, param_fluids: ParamFluids) -> Result<&mut Self, StrError> {
        self.param_fluids = Some(param_fluids);
        Ok(self)
    }

    /// Enables printing a line per time step
    pub fn set_verbose_timesteps(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose_timesteps = flag;
        Ok(self)
    }

    /// Enables printing convergence statistics per iteration
    pub fn set_verbose_iterations(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose_iterations = flag;
        Ok(self)
    }

    /// Validates the combination of options
    pub fn validate(&self) -> Result<(), StrError> {
        if !self.enable_shift_criterion && !self.enable_residual_criterion {
            return Err("at least one convergence criterion must be enabled");
        }
        if self.satisfy_both_criteria && !(self.enable_shift_criterion && self.enable_residual_criterion) {
            return Err("satisfy_both_criteria requires both criteria enabled");
        }
        if self.t_fin <= self.t_ini {
            return Err("t_fin must be greater than t_ini");
        }
        if self.n_target_iterations > self.n_max_iterations {
            return Err("n_target_iterations must be ≤ n_max_iterations");
        }
        if self.param_elements.is_empty() {
            return Err("config must have at least one set of element parameters");
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "transient = {:?}\n", self.transient).unwrap();
        write!(f, "t_ini = {:?}\n", self.t_ini).unwrap();
        write!(f, "t_fin = {:?}\n", self.t_fin).unwrap();
        write!(f, "enable_gravity = {:?}\n", self.enable_gravity).unwrap();
        write!(f, "gravity = {:?}\n", self.gravity).unwrap();
        write!(f, "n_target_iterations = {:?}\n", self.n_target_iterations).unwrap();
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations).unwrap();
        write!(f, "tol_relative_shift = {:?}\n", self.tol_relative_shift).unwrap();
        write!(f, "tol_residual_reduction = {:?}\n", self.tol_residual_reduction).unwrap();
        write!(f, "cache_volume_variables = {:?}\n", self.cache_volume_variables).unwrap();

        write!(f, "\nParameters for Elements\n").unwrap();
        write!(f, "=======================\n").unwrap();
        let mut keys: Vec<_> = self.param_elements.keys().copied().collect();
        keys.sort();
        for key in keys {
            let p = self.param_elements.get(&key).unwrap();
            write!(f, "{:?} → {}\n", key, p.name()).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::base::{Elem, ParamDiffusion, ParamFluids};
    use crate::StrError;

    #[test]
    fn new_and_setters_work() -> Result<(), StrError> {
        let mut config = Config::new();
        config
            .set_transient(true)?
            .set_dt(|_| 0.5)?
            .set_t_ini(0.0)?
            .set_t_fin(2.0)?
            .set_n_max_time_steps(10)?
            .set_gravity(10.0)?
            .set_n_target_iterations(8)?
            .set_n_max_iterations(20)?
            .set_tol_relative_shift(1e-9)?
            .set_tol_residual_reduction(1e-6)?
            .set_enable_shift_criterion(true)?
            .set_enable_residual_criterion(true)?
            .set_satisfy_both_criteria(false)?
            .set_cache_volume_variables(false)?
            .set_param_fluids(ParamFluids::sample_water_air())?
            .set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?
            .set_verbose_timesteps(false)?
            .set_verbose_iterations(false)?;
        assert!(config.enable_gravity);
        assert_eq!((config.dt)(123.0), 0.5);
        config.validate()?;
        assert_eq!(
            format!("{}", config),
            "Configuration data\n\
             ==================\n\
             transient = true\n\
             t_ini = 0.0\n\
             t_fin = 2.0\n\
             enable_gravity = true\n\
             gravity = 10.0\n\
             n_target_iterations = 8\n\
             n_max_iterations = 20\n\
             tol_relative_shift = 1e-9\n\
             tol_residual_reduction = 1e-6\n\
             cache_volume_variables = false\n\
             \n\
             Parameters for Elements\n\
             =======================\n\
             1 → Diffusion\n"
        );
        Ok(())
    }

    #[test]
    fn catch_some_errors() -> Result<(), StrError> {
        let mut config = Config::new();
        assert_eq!(config.set_t_ini(-1.0).err(), Some("t_ini must be ≥ 0.0"));
        assert_eq!(config.set_t_fin(0.0).err(), Some("t_fin must be > 0.0"));
        assert_eq!(config.set_n_max_time_steps(0).err(), Some("n_max_time_steps must be ≥ 1"));
        assert_eq!(config.set_gravity(-10.0).err(), Some("gravity must be ≥ 0.0"));
        assert_eq!(
            config.set_n_target_iterations(0).err(),
            Some("n_target_iterations must be ≥ 1")
        );
        assert_eq!(config.set_n_max_iterations(0).err(), Some("n_max_iterations must be ≥ 1"));
        assert_eq!(
            config.set_tol_relative_shift(0.0).err(),
            Some("tol_relative_shift must be > 0.0")
        );
        assert_eq!(
            config.set_tol_residual_reduction(0.0).err(),
            Some("tol_residual_reduction must be > 0.0")
        );
        Ok(())
    }

    #[test]
    fn validate_works() -> Result<(), StrError> {
        let mut config = Config::new();
        assert_eq!(
            config.validate().err(),
            Some("config must have at least one set of element parameters")
        );
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        config.validate()?;

        config.set_enable_shift_criterion(false)?;
        config.set_enable_residual_criterion(false)?;
        assert_eq!(
            config.validate().err(),
            Some("at least one convergence criterion must be enabled")
        );

        config.set_enable_residual_criterion(true)?;
        config.set_satisfy_both_criteria(true)?;
        assert_eq!(
            config.validate().err(),
            Some("satisfy_both_criteria requires both criteria enabled")
        );
        config.set_enable_shift_criterion(true)?;
        config.validate()?;

        config.set_t_fin(1.0)?;
        config.set_t_ini(1.0)?;
        assert_eq!(config.validate().err(), Some("t_fin must be greater than t_ini"));
        config.set_t_ini(0.0)?;

        config.set_n_target_iterations(30)?;
        assert_eq!(
            config.validate().err(),
            Some("n_target_iterations must be ≤ n_max_iterations")
        );
        Ok(())
    }
}
