use verhulst_core::Sample;

/// Event emitted by the Runge-Kutta solver for each recorded sample.
///
/// Step 0 is the initial sample at the start of the range.
/// Steps 1..N follow each integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The step number (0 for the initial sample).
    pub step: usize,

    /// The sample just recorded.
    pub sample: Sample,
}
