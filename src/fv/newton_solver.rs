use super::{Communicator, ConvergenceControl, Elements, FileIo, FvState, GridVolumeVariables, LinearSystem, Problem};
use crate::base::{Essential, Natural};
use crate::StrError;
use russell_lab::vec_copy;

/// Maximum number of time-step halvings after numerical failures
const N_MAX_DT_DIVISIONS: usize = 10;

/// Distinguishes unrecoverable errors from retryable numerical failures
///
/// A `Fatal` error means the input or configuration is wrong and retrying
/// cannot help. A `Numerical` error (linear solver breakdown, NaN in a norm,
/// iteration ceiling) may succeed with a smaller time step; the time loop
/// reacts by halving Δt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolveError {
    /// Unrecoverable error (fix the input)
    Fatal(StrError),

    /// Recoverable numerical failure (retry with a smaller time step)
    Numerical(StrError),
}

/// Implements the Newton-Raphson solver for the cell-centered FV equations
///
/// The solver is generic over [`Communicator`] so the convergence decisions
/// (norm reductions, linear-solver failures) are collective; with
/// [`super::SerialComm`] the reductions are the identity.
pub struct NewtonSolver<'a, C: Communicator> {
    /// Holds the problem definition
    pub problem: &'a Problem<'a>,

    /// Holds the essential boundary conditions
    pub essential: &'a Essential,

    /// Holds the natural boundary conditions
    pub natural: &'a Natural,

    /// Holds the communicator
    pub comm: &'a C,

    /// Holds the grid-wide cache of volume variables
    pub grid_vars: GridVolumeVariables,

    /// Holds a collection of elements
    pub elements: Elements,

    /// Holds variables to solve the global linear system
    pub linear_system: LinearSystem<'a>,

    /// Holds the convergence controller
    pub control: ConvergenceControl<'a>,
}

impl<'a, C: Communicator> NewtonSolver<'a, C> {
    /// Allocates a new instance
    pub fn new(
        problem: &'a Problem<'a>,
        essential: &'a Essential,
        natural: &'a Natural,
        comm: &'a C,
    ) -> Result<Self, StrError> {
        problem.config.validate()?;
        let elements = Elements::new(problem)?;
        let linear_system = LinearSystem::new(problem.config, &elements)?;
        Ok(NewtonSolver {
            problem,
            essential,
            natural,
            comm,
            grid_vars: GridVolumeVariables::new(problem.geometry.num_scv()),
            elements,
            linear_system,
            control: ConvergenceControl::new(problem.config),
        })
    }

    /// Performs one nonlinear solve, updating `state.uu` in place
    ///
    /// The old solution `state.uu_old` enters the storage term and is not
    /// modified. Returns the number of iterations (linear solves) taken.
    pub fn solve_step(&mut self, state: &mut FvState) -> Result<usize, SolveError> {
        let config = self.problem.config;
        let rr = &mut self.linear_system.rr;
        let kk = &mut self.linear_system.kk;
        let mdu = &mut self.linear_system.mdu;

        // residual of the trial (old) solution
        self.grid_vars
            .update_all(self.problem, &state.uu)
            .map_err(SolveError::Fatal)?;
        self.elements
            .assemble_residual(
                rr,
                self.problem,
                self.essential,
                self.natural,
                &self.grid_vars,
                &state.uu,
                &state.uu_old,
                state.dt,
            )
            .map_err(SolveError::Fatal)?;
        self.control.reset();
        self.control
            .analyze_initial_residual(self.comm, rr)
            .map_err(SolveError::Numerical)?;

        // Newton-Raphson loop; one iteration = one linear solve
        let mut iterations = 0;
        loop {
            if iterations == config.n_max_iterations {
                return Err(SolveError::Numerical(
                    "Newton-Raphson did not converge within the maximum number of iterations",
                ));
            }

            // assemble the Jacobian matrix
            kk.reset().map_err(SolveError::Fatal)?;
            let kk_coo = kk.get_coo_mut().map_err(SolveError::Fatal)?;
            self.elements
                .assemble_jacobian(
                    kk_coo,
                    self.problem,
                    self.essential,
                    self.natural,
                    &self.grid_vars,
                    &state.uu,
                    &state.uu_old,
                    state.dt,
                )
                .map_err(SolveError::Fatal)?;

            // factorize and solve; a failure anywhere fails everywhere
            let mut local_ok = 1.0;
            if self
                .linear_system
                .solver
                .actual
                .factorize(kk, Some(config.lin_sol_params))
                .is_err()
            {
                local_ok = 0.0;
            } else if self.linear_system.solver.actual.solve(mdu, kk, rr, false).is_err() {
                local_ok = 0.0;
            }
            if self.comm.min(local_ok) < 0.5 {
                return Err(SolveError::Numerical("linear solver failed on at least one process"));
            }

            // relative shift (uses the pre-update solution)
            self.control
                .analyze_shift(self.comm, &state.uu, mdu)
                .map_err(SolveError::Numerical)?;

            // update the solution
            for i in 0..self.linear_system.neq_total {
                state.uu[i] -= mdu[i];
            }
            iterations += 1;

            // residual of the updated solution
            self.grid_vars
                .update_all(self.problem, &state.uu)
                .map_err(SolveError::Fatal)?;
            self.elements
                .assemble_residual(
                    rr,
                    self.problem,
                    self.essential,
                    self.natural,
                    &self.grid_vars,
                    &state.uu,
                    &state.uu_old,
                    state.dt,
                )
                .map_err(SolveError::Fatal)?;
            self.control
                .analyze_residual(self.comm, iterations, rr)
                .map_err(SolveError::Numerical)?;
            self.control.print_iteration();
            if self.control.accepted() {
                return Ok(iterations);
            }
        }
    }

    /// Suggests the next time step from the deviation to the target iterations
    pub fn suggest_next_dt(&self, dt: f64, iterations: usize) -> f64 {
        let target = self.problem.config.n_target_iterations;
        if iterations > target {
            let percent = (iterations - target) as f64 / (target as f64);
            dt / (1.0 + percent)
        } else {
            let percent = (target - iterations) as f64 / (target as f64);
            dt * (1.0 + percent / 1.2)
        }
    }

    /// Solves the associated system of partial differential equations
    ///
    /// Steady analyses perform a single nonlinear solve. Transient analyses
    /// march in time; `config.dt` provides the maximum Δt at each time and the
    /// iteration-count heuristic may shrink the step below it. After a
    /// numerical failure the step is halved and retried, up to
    /// [`N_MAX_DT_DIVISIONS`] times.
    pub fn solve(&mut self, state: &mut FvState, file_io: &mut FileIo) -> Result<(), SolveError> {
        let config = self.problem.config;
        state.commit().map_err(SolveError::Fatal)?;
        self.control.print_header();
        file_io.write_state(state).map_err(SolveError::Fatal)?;

        if !config.transient {
            self.control.print_timestep(0, state.t, state.dt);
            self.solve_step(state)?;
            state.commit().map_err(SolveError::Fatal)?;
            file_io.write_state(state).map_err(SolveError::Fatal)?;
            self.control.print_footer();
            file_io.write_self().map_err(SolveError::Fatal)?;
            return Ok(());
        }

        state.dt = (config.dt)(state.t);
        for timestep in 0..config.n_max_time_steps {
            if state.t + state.dt > config.t_fin {
                state.dt = config.t_fin - state.t;
            }
            if state.dt <= 0.0 {
                return Err(SolveError::Fatal("Δt must be positive"));
            }

            // attempt the timestep, halving Δt after numerical failures
            let mut division = 0;
            let iterations = loop {
                self.control.print_timestep(timestep, state.t + state.dt, state.dt);
                match self.solve_step(state) {
                    Ok(iterations) => break iterations,
                    Err(SolveError::Fatal(message)) => return Err(SolveError::Fatal(message)),
                    Err(SolveError::Numerical(_)) => {
                        division += 1;
                        if division > N_MAX_DT_DIVISIONS {
                            return Err(SolveError::Numerical(
                                "Newton-Raphson did not converge even with the smallest time step",
                            ));
                        }
                        vec_copy(&mut state.uu, &state.uu_old).map_err(SolveError::Fatal)?;
                        state.dt /= 2.0;
                    }
                }
            };

            // commit and output
            state.t += state.dt;
            state.commit().map_err(SolveError::Fatal)?;
            file_io.write_state(state).map_err(SolveError::Fatal)?;
            if state.t >= config.t_fin {
                break;
            }

            // next time step
            let suggested = self.suggest_next_dt(state.dt, iterations);
            state.dt = f64::min(suggested, (config.dt)(state.t));
        }

        self.control.print_footer();
        file_io.write_self().map_err(SolveError::Fatal)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{NewtonSolver, SolveError};
    use crate::base::{Config, Dof, Elem, Essential, Natural, ParamDiffusion, SampleMeshes};
    use crate::fv::{FvState, Problem, SerialComm};
    use crate::geometry::FvGridGeometry;
    use crate::StrError;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_config_errors() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(2, 2.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config
            .set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?
            .set_enable_shift_criterion(false)?
            .set_enable_residual_criterion(false)?;
        let problem = Problem::new(&config, &geo)?;
        let essential = Essential::new();
        let natural = Natural::new();
        let comm = SerialComm::new();
        assert_eq!(
            NewtonSolver::new(&problem, &essential, &natural, &comm).err(),
            Some("at least one convergence criterion must be enabled")
        );
        Ok(())
    }

    #[test]
    fn suggest_next_dt_follows_the_iteration_count() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(2, 2.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let essential = Essential::new();
        let natural = Natural::new();
        let comm = SerialComm::new();
        let solver = NewtonSolver::new(&problem, &essential, &natural, &comm)?;
        // target is 10: more iterations shrink Δt, fewer grow it
        approx_eq(solver.suggest_next_dt(1.0, 15), 1.0 / 1.5, 1e-15);
        approx_eq(solver.suggest_next_dt(1.0, 10), 1.0, 1e-15);
        approx_eq(solver.suggest_next_dt(1.0, 4), 1.0 + 0.6 / 1.2, 1e-15);
        Ok(())
    }

    #[test]
    fn steady_linear_problem_converges_in_one_iteration() -> Result<(), StrError> {
        // 3-cell column with T = 0 at x = 0 and T = 30 at x = 3;
        // the exact profile is linear: T(x) = 10 x
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let mut config = Config::new();
        config.set_param_elements(1, Elem::Diffusion(ParamDiffusion::sample()))?;
        let problem = Problem::new(&config, &geo)?;
        let mut essential = Essential::new();
        essential.on(|x| x[0] < 1e-10, Dof::T, 0.0);
        essential.on(|x| x[0] > 3.0 - 1e-10, Dof::T, 30.0);
        let natural = Natural::new();
        let comm = SerialComm::new();
        let mut solver = NewtonSolver::new(&problem, &essential, &natural, &comm).unwrap();
        let mut state = FvState::new(&problem);
        let iterations = solver.solve_step(&mut state).map_err(|e| match e {
            SolveError::Fatal(m) => m,
            SolveError::Numerical(m) => m,
        })?;
        assert_eq!(iterations, 1);
        approx_eq(state.uu[0], 5.0, 1e-10);
        approx_eq(state.uu[1], 15.0, 1e-10);
        approx_eq(state.uu[2], 25.0, 1e-10);
        Ok(())
    }
}
