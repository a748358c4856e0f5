use thiserror::Error;

use verhulst_core::State;

/// Errors that can occur during Runge-Kutta integration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The range was empty, reversed, or not finite. Checked on entry,
    /// before any evaluation.
    #[error("invalid range: `to` ({to}) must be finite and greater than `from` ({from})")]
    InvalidRange { from: f64, to: f64 },

    /// The requested minimum resolution was not a positive, finite number.
    /// Checked on entry, before any evaluation.
    #[error("invalid resolution: {resolution} (must be positive and finite)")]
    InvalidResolution { resolution: f64 },

    /// A formula failed to evaluate.
    #[error("model error: {0}")]
    Model(#[from] verhulst_core::Error),

    /// A stage slope, state variable, or captured value stopped being
    /// finite. Carries the last time and state at which everything was
    /// still finite.
    #[error("`{name}` became non-finite after t = {time}")]
    NonFinite { name: String, time: f64, state: State },

    /// The observer cancelled the run; the partial trace is discarded.
    #[error("integration cancelled at t = {time}")]
    Cancelled { time: f64 },
}
