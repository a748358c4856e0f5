//! Rendering collaborators for the Verhulst framework.
//!
//! Solvers produce a [`Trace`]; this crate defines how a completed trace is
//! handed off to whatever draws it. The handoff carries two pieces of
//! pass-through metadata: a destination identifier (a window or file name,
//! interpreted by the backend) and a human-readable title. The solver side
//! performs no I/O of its own.
//!
//! # Modules
//!
//! - [`render`] — the [`Renderer`] collaborator interface and
//!   [`RenderOptions`]
//!
//! # Features
//!
//! - `plot` — Enables [`PlotRenderer`], which draws every captured series in
//!   an interactive egui window. This feature adds dependencies on `eframe`
//!   and `egui_plot`.
//!
//! [`Trace`]: verhulst_core::Trace

pub mod render;

pub use render::{RenderOptions, Renderer};

#[cfg(feature = "plot")]
mod plot;

#[cfg(feature = "plot")]
pub use plot::PlotRenderer;
