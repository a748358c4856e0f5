//! Core types for the Verhulst framework.
//!
//! This crate defines the shared pieces that solvers, renderers, and example
//! models build on:
//!
//! - [`Model`] — named state variables, auxiliary formulas, and derivative
//!   bindings, evaluated at a given state and time
//! - [`State`] — the integrated variables, owned and stepped by a solver
//! - [`Trace`] — the recorded time series produced by one integration run
//! - [`Observer`] — receives solver events and optionally returns control
//!   actions
//!
//! # Features
//!
//! - `serde` — Enables `Serialize`/`Deserialize` on [`State`], [`Sample`],
//!   and [`Trace`], so a completed trace can be handed to an out-of-process
//!   renderer.

mod error;
mod model;
mod observer;
mod state;
mod trace;

pub use error::Error;
pub use model::{BuildError, Builder, Formula, Model, Scope};
pub use observer::Observer;
pub use state::State;
pub use trace::{Sample, Trace};
