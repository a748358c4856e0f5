//! The three classic population-growth models, integrated and plotted.
//!
//! # Usage
//!
//! ```text
//! cargo run --example growth --features plot -- malthus
//! cargo run --example growth --features plot -- logistic
//! cargo run --example growth --features plot -- allee
//! ```
//!
//! # Modes
//!
//! - **malthus** — Unbounded exponential growth, dx/dt = g·x. A population
//!   of 3 doubles forever; the curve leaves the axes quickly.
//!
//! - **logistic** — Verhulst growth, dx/dt = g·x·(1 − x/k). Growth slows as
//!   the population approaches the carrying capacity k and saturates there.
//!
//! - **allee** — Cubic growth with an Allee threshold,
//!   dx/dt = g·x·(x/a − 1)·(1 − x/k). A population starting below the
//!   threshold `a` collapses toward extinction; one starting above it
//!   settles at the capacity `k`.

use std::error::Error;

use verhulst_core::Model;
use verhulst_observers::{PlotRenderer, RenderOptions, Renderer};
use verhulst_solvers::transient::runge_kutta;

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "logistic".into());
    match mode.as_str() {
        "malthus" => malthus(),
        "logistic" => logistic(),
        "allee" => allee(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: growth [malthus|logistic|allee]");
            std::process::exit(1);
        }
    }
}

/// Exponential growth: a population of 3 with growth constant 1, simulated
/// for 8 time units.
fn malthus() -> Result<(), Box<dyn Error>> {
    let model = Model::builder()
        .state("x", 3.0)
        .formula("growth_constant", |_| Ok(1.0))
        .derivative("velocity", "x", |s| {
            Ok(s.var("growth_constant")? * s.var("x")?)
        })
        .capture("x")
        .build()?;

    let trace = runge_kutta::solve_unobserved(&model, 0.0, 8.0, 0.1)?;

    PlotRenderer::new().render(
        &trace,
        "malthus",
        &RenderOptions::new("Malthusian growth: dx/dt = g·x"),
    )?;

    Ok(())
}

/// Logistic growth: the population saturates at the carrying capacity.
///
/// The crowding factor is captured alongside the population to show the
/// brake engaging as x approaches k.
fn logistic() -> Result<(), Box<dyn Error>> {
    let growth = 0.7;
    let capacity = 100.0;

    let model = Model::builder()
        .state("x", 5.0)
        .formula("crowding", move |s| Ok(1.0 - s.var("x")? / capacity))
        .derivative("velocity", "x", move |s| {
            Ok(growth * s.var("x")? * s.var("crowding")?)
        })
        .capture("x")
        .capture("crowding")
        .build()?;

    let trace = runge_kutta::solve_unobserved(&model, 0.0, 20.0, 0.1)?;

    PlotRenderer::new().render(
        &trace,
        "logistic",
        &RenderOptions::new("Logistic growth: dx/dt = g·x·(1 − x/k)").legend(),
    )?;

    Ok(())
}

/// Allee-effect growth: a population of 15 below the threshold of 20
/// collapses instead of recovering.
///
/// The threshold and capacity are captured as constant formulas so the plot
/// shows them as reference lines.
fn allee() -> Result<(), Box<dyn Error>> {
    let growth = 0.7;
    let threshold = 20.0;
    let capacity = 100.0;

    let model = Model::builder()
        .state("x", 15.0)
        .formula("threshold", move |_| Ok(threshold))
        .formula("capacity", move |_| Ok(capacity))
        .derivative("velocity", "x", move |s| {
            let x = s.var("x")?;
            Ok(growth * x * (x / s.var("threshold")? - 1.0) * (1.0 - x / s.var("capacity")?))
        })
        .capture("x")
        .capture("threshold")
        .capture("capacity")
        .build()?;

    let trace = runge_kutta::solve_unobserved(&model, 0.0, 100.0, 0.1)?;

    PlotRenderer::new().render(
        &trace,
        "allee",
        &RenderOptions::new("Allee effect: dx/dt = g·x·(x/a − 1)·(1 − x/k)").legend(),
    )?;

    Ok(())
}
