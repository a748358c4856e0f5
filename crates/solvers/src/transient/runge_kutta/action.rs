/// Control actions supported by the Runge-Kutta solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Abort the run, discarding the partial trace.
    Cancel,
}
