use super::Communicator;
use crate::base::Config;
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};

/// Controls the convergence of the Newton-Raphson iterations
///
/// Two criteria are tracked:
///
/// 1. Maximum relative shift of the primary variables (`shift`)
/// 2. Reduction of the Euclidean residual norm with respect to the
///    initial residual of the step (`residual_reduction`)
///
/// Each criterion can be disabled in [`Config`]; by default a step is
/// accepted when ANY enabled criterion holds, or when ALL hold if
/// `satisfy_both_criteria` is set. Norms are reduced over the communicator,
/// so every process reaches the same accept/reject decision.
pub struct ConvergenceControl<'a> {
    config: &'a Config,
    iteration: usize,
    norm_rr_initial: f64,
    norm_rr: f64,
    residual_reduction: f64,
    shift: f64,
    converged_on_shift: bool,
    converged_on_residual: bool,
}

impl<'a> ConvergenceControl<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ConvergenceControl {
            config,
            iteration: 0,
            norm_rr_initial: 0.0,
            norm_rr: 0.0,
            residual_reduction: 0.0,
            shift: 0.0,
            converged_on_shift: false,
            converged_on_residual: false,
        }
    }

    /// Resets the criteria flags for a new timestep
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.norm_rr_initial = 0.0;
        self.norm_rr = 0.0;
        self.residual_reduction = 0.0;
        self.shift = 0.0;
        self.converged_on_shift = false;
        self.converged_on_residual = false;
    }

    /// Records the residual norm before the first iteration of a step
    ///
    /// The norm is floored at machine epsilon so that a converged initial
    /// state (zero residual) yields a reduction of one instead of NaN.
    pub fn analyze_initial_residual(&mut self, comm: &dyn Communicator, rr: &Vector) -> Result<(), StrError> {
        let local = vec_norm(rr, Norm::Euc);
        let norm = f64::sqrt(comm.sum(local * local));
        if !norm.is_finite() {
            return Err("found NaN or Inf in the initial residual vector");
        }
        self.norm_rr_initial = f64::max(norm, f64::EPSILON);
        self.norm_rr = self.norm_rr_initial;
        Ok(())
    }

    /// Analyzes the residual-reduction criterion after a solution update
    pub fn analyze_residual(&mut self, comm: &dyn Communicator, iteration: usize, rr: &Vector) -> Result<(), StrError> {
        self.iteration = iteration;
        let local = vec_norm(rr, Norm::Euc);
        self.norm_rr = f64::sqrt(comm.sum(local * local));
        if !self.norm_rr.is_finite() {
            return Err("found NaN or Inf in the residual vector");
        }
        self.residual_reduction = self.norm_rr / self.norm_rr_initial;
        self.converged_on_residual = if self.config.enable_residual_criterion {
            self.residual_reduction < self.config.tol_residual_reduction
        } else {
            false
        };
        Ok(())
    }

    /// Analyzes the relative-shift criterion (call before applying `mdu`)
    ///
    /// With `uu` still holding the pre-update solution, the updated value is
    /// `uu[i] - mdu[i]` and the shift of each dof is:
    ///
    /// ```text
    ///           |mdu[i]|
    /// ───────────────────────────────
    /// 1 + |uu[i] + (uu[i] - mdu[i])|/2
    /// ```
    pub fn analyze_shift(&mut self, comm: &dyn Communicator, uu: &Vector, mdu: &Vector) -> Result<(), StrError> {
        let mut local = 0.0;
        for i in 0..uu.dim() {
            let updated = uu[i] - mdu[i];
            let denominator = 1.0 + f64::abs(uu[i] + updated) / 2.0;
            local = f64::max(local, f64::abs(mdu[i]) / denominator);
        }
        self.shift = comm.max(local);
        if !self.shift.is_finite() {
            return Err("found NaN or Inf in the solution increment vector");
        }
        self.converged_on_shift = if self.config.enable_shift_criterion {
            self.shift < self.config.tol_relative_shift
        } else {
            false
        };
        Ok(())
    }

    /// Decides whether the step is accepted by the enabled criteria
    pub fn accepted(&self) -> bool {
        if self.config.satisfy_both_criteria {
            self.converged_on_shift && self.converged_on_residual
        } else {
            self.converged_on_shift || self.converged_on_residual
        }
    }

    /// Returns the latest residual norm
    pub fn norm_rr(&self) -> f64 {
        self.norm_rr
    }

    /// Returns the latest residual reduction
    pub fn residual_reduction(&self) -> f64 {
        self.residual_reduction
    }

    /// Returns the latest maximum relative shift
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Prints the header before time stepping
    pub fn print_header(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("\nTIME STEPPING AND CONVERGENCE STATISTICS");
            println!("{}", "─".repeat(69));
            println!(
                "{:>8} {:>11} {:>11} {:>5} {:>9} {:>9} {:>9}",
                "timestep", "t", "Δt", "iter", "shift", "red(R)", "‖R‖"
            );
            println!("{}", "─".repeat(69));
        }
    }

    /// Prints timestep information
    pub(crate) fn print_timestep(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps {
            println!("{:>8} {:>11.6e} {:>11.6e}", timestep + 1, t, dt);
        }
    }

    /// Prints iteration information
    pub(crate) fn print_iteration(&self) {
        if self.config.verbose_iterations {
            println!(
                "{:>8} {:>11} {:>11} {:>5} {:>9.2e} {:>9.2e} {:>9.2e}",
                "·", "·", "·", self.iteration, self.shift, self.residual_reduction, self.norm_rr
            );
        }
    }

    /// Prints the horizontal line at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_timesteps || self.config.verbose_iterations {
            println!("{}", "─".repeat(69));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
