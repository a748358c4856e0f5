//! Numerical solvers for the Verhulst framework.
//!
//! # Modules
//!
//! - [`transient`] — time integration of [`Model`]s
//!
//! [`Model`]: verhulst_core::Model

pub mod transient;
