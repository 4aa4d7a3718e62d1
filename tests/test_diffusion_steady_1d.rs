use pmflow::prelude::*;
use pmflow::StrError;
use russell_lab::approx_eq;

// Steady heat conduction along a 1-D column with fixed end temperatures
//
// TEST GOAL
//
// This test verifies the cell-centered FV discretization and the nonlinear
// solver on a linear problem: the solution must be the exact linear profile
// and Newton-Raphson must converge in exactly one iteration.
//
// MESH
//
// o---o---o---o---o---o---o---o---o---o---o
// 0                <- L = 10 ->          10
//
// BOUNDARY CONDITIONS
//
// Temperature T = 0   at x = 0
// Temperature T = 100 at x = L
//
// CONFIGURATION AND PARAMETERS
//
// Steady simulation; constant unit conductivity; no source

#[test]
fn test_diffusion_steady_1d() -> Result<(), StrError> {
    // constants
    const L: f64 = 10.0;
    const N_CELL: usize = 10;

    // mesh and geometry
    let mesh = SampleMeshes::column_lin2(N_CELL, L);
    let geometry = FvGridGeometry::new(&mesh)?;

    // parameters and configuration
    let p1 = ParamDiffusion {
        rho: 1.0,
        conductivity: ParamConductivity::Constant {
            kx: 1.0,
            ky: 1.0,
            kz: 1.0,
        },
        source: None,
    };
    let mut config = Config::new();
    config.set_param_elements(1, Elem::Diffusion(p1))?;
    let problem = Problem::new(&config, &geometry)?;

    // essential boundary conditions
    let mut essential = Essential::new();
    essential.on(|x| x[0] < 1e-10, Dof::T, 0.0);
    essential.on(|x| x[0] > L - 1e-10, Dof::T, 100.0);

    // natural boundary conditions
    let natural = Natural::new();

    // solve the problem
    let comm = SerialComm::new();
    let mut solver = NewtonSolver::new(&problem, &essential, &natural, &comm)?;
    let mut state = FvState::new(&problem);
    let iterations = solver.solve_step(&mut state).map_err(|e| match e {
        SolveError::Fatal(m) => m,
        SolveError::Numerical(m) => m,
    })?;

    // a linear problem takes exactly one iteration
    assert_eq!(iterations, 1);

    // compare with the exact linear profile at the cell centers
    for cell_id in 0..N_CELL {
        let x = geometry.scv(cell_id)?.center[0];
        approx_eq(state.uu[cell_id], 100.0 * x / L, 1e-10);
    }
    Ok(())
}
