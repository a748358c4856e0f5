//! Time integration of models.

pub mod runge_kutta;
