/// Defines the collective reductions needed by the nonlinear solver
///
/// Convergence checks and failure handling reduce scalars across processes.
/// The solver is generic over this trait so the serial build and a
/// message-passing build share the same control flow.
pub trait Communicator {
    /// Returns the number of processes
    fn size(&self) -> usize;

    /// Returns the rank of this process
    fn rank(&self) -> usize;

    /// Returns the sum of the given value over all processes
    fn sum(&self, value: f64) -> f64;

    /// Returns the minimum of the given value over all processes
    fn min(&self, value: f64) -> f64;

    /// Returns the maximum of the given value over all processes
    fn max(&self, value: f64) -> f64;
}

/// Implements the communicator for a single process (identity reductions)
pub struct SerialComm {}

impl SerialComm {
    /// Allocates a new instance
    pub fn new() -> Self {
        SerialComm {}
    }
}

impl Communicator for SerialComm {
    fn size(&self) -> usize {
        1
    }
    fn rank(&self) -> usize {
        0
    }
    fn sum(&self, value: f64) -> f64 {
        value
    }
    fn min(&self, value: f64) -> f64 {
        value
    }
    fn max(&self, value: f64) -> f64 {
        value
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
