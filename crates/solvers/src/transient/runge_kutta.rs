//! Fixed-step 4th-order Runge-Kutta solver.
//!
//! This module advances a model's state across a time range with the classic
//! RK4 scheme, recording captured variables at a resolution no coarser than
//! requested:
//!
//! ```text
//! k1 = f(t,       y)
//! k2 = f(t + h/2, y + h/2 * k1)
//! k3 = f(t + h/2, y + h/2 * k2)
//! k4 = f(t + h,   y + h   * k3)
//! y += h/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use verhulst_solvers::transient::runge_kutta;
//!
//! let trace = runge_kutta::solve_unobserved(&model, 0.0, 8.0, 0.5)?;
//!
//! for sample in trace.samples() {
//!     println!("t={}: {:?}", sample.time, sample.values);
//! }
//! ```

mod action;
mod error;
mod event;

pub use action::Action;
pub use error::Error;
pub use event::Event;

use verhulst_core::{Model, Observer, Sample, Trace};

/// Integrates a model from `from` to `to` with fixed-step RK4.
///
/// # Algorithm
///
/// 1. Choose the step count as `ceil((to - from) / min_resolution)` and
///    shrink the step size to divide the range evenly, so `h <=
///    min_resolution` and the run never overshoots `to`.
/// 2. Record the sample at `from` before any stepping.
/// 3. For each step, evaluate the four stage slopes, advance the state by
///    their weighted average, re-evaluate the captured names at the new time
///    and state, and append the sample.
///
/// Sample times are recomputed from the step index rather than accumulated,
/// so the final sample lands on `to` exactly. The model is never mutated;
/// the solver owns a private copy of the initial state.
///
/// # Observer
///
/// The observer receives an [`Event`] for every recorded sample (step 0 is
/// the initial sample) and may return [`Action::Cancel`] to abort the run.
/// Cancellation surfaces as [`Error::Cancelled`] and the partial trace is
/// discarded.
///
/// # Errors
///
/// - [`Error::InvalidRange`] if the range is not finite with `to > from`,
///   checked before any evaluation.
/// - [`Error::InvalidResolution`] if `min_resolution` is not a positive,
///   finite number, checked before any evaluation.
/// - [`Error::Model`] if a formula fails to evaluate.
/// - [`Error::NonFinite`] if a stage slope, an updated state variable, or a
///   captured value stops being finite. Nothing is clamped or skipped; the
///   error carries the last fully valid time and state.
/// - [`Error::Cancelled`] if the observer cancels.
pub fn solve<Obs>(
    model: &Model,
    from: f64,
    to: f64,
    min_resolution: f64,
    mut observer: Obs,
) -> Result<Trace, Error>
where
    Obs: Observer<Event, Action>,
{
    if !from.is_finite() || !to.is_finite() || to <= from {
        return Err(Error::InvalidRange { from, to });
    }
    if !min_resolution.is_finite() || min_resolution <= 0.0 {
        return Err(Error::InvalidResolution {
            resolution: min_resolution,
        });
    }

    let span = to - from;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (span / min_resolution).ceil() as usize;
    let h = span / steps as f64;

    let mut state = model.initial_state();
    let mut trace = Trace::new(model.captures().to_vec());

    // Initial sample, taken before any stepping.
    let values = model.capture_values(&state, from)?;
    if let Some(name) = non_finite_capture(model.captures(), &values) {
        return Err(Error::NonFinite {
            name,
            time: from,
            state,
        });
    }
    trace.record(from, values.clone());

    let event = Event {
        step: 0,
        sample: Sample { time: from, values },
    };
    if let Some(Action::Cancel) = observer.observe(&event) {
        return Err(Error::Cancelled { time: from });
    }

    for step in 1..=steps {
        let t = from + (step - 1) as f64 * h;
        let half = 0.5 * h;

        let k1 = model.derivative_vector(&state, t)?;
        let k2 = model.derivative_vector(&state.step(&k1, half), t + half)?;
        let k3 = model.derivative_vector(&state.step(&k2, half), t + half)?;
        let k4 = model.derivative_vector(&state.step(&k3, h), t + h)?;

        for stage in [&k1, &k2, &k3, &k4] {
            if let Some((name, _)) = stage.iter().find(|(_, slope)| !slope.is_finite()) {
                return Err(Error::NonFinite {
                    name: (*name).to_string(),
                    time: t,
                    state,
                });
            }
        }

        let mut combined = Vec::with_capacity(k1.len());
        for (index, &(name, s1)) in k1.iter().enumerate() {
            let s2 = k2[index].1;
            let s3 = k3[index].1;
            let s4 = k4[index].1;
            combined.push((name, (s1 + 2.0 * s2 + 2.0 * s3 + s4) / 6.0));
        }

        let next = state.step(&combined, h);
        if let Some((name, _)) = next.iter().find(|(_, value)| !value.is_finite()) {
            return Err(Error::NonFinite {
                name: name.to_string(),
                time: t,
                state,
            });
        }

        // Recomputed from the index so the final sample lands on `to`.
        let time = if step == steps {
            to
        } else {
            from + step as f64 * h
        };

        let values = model.capture_values(&next, time)?;
        if let Some(name) = non_finite_capture(model.captures(), &values) {
            return Err(Error::NonFinite {
                name,
                time: t,
                state,
            });
        }

        state = next;
        trace.record(time, values.clone());

        let event = Event {
            step,
            sample: Sample { time, values },
        };
        if let Some(Action::Cancel) = observer.observe(&event) {
            return Err(Error::Cancelled { time });
        }
    }

    Ok(trace)
}

/// Integrates a model with fixed-step RK4 without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns the same errors as [`solve`], except [`Error::Cancelled`].
pub fn solve_unobserved(
    model: &Model,
    from: f64,
    to: f64,
    min_resolution: f64,
) -> Result<Trace, Error> {
    solve(model, from, to, min_resolution, ())
}

fn non_finite_capture(names: &[String], values: &[f64]) -> Option<String> {
    names
        .iter()
        .zip(values)
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name.clone())
}
