mod builder;

pub use builder::{BuildError, Builder};

use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, State};

/// Name reserved for the simulation clock inside formulas.
pub(crate) const TIME: &str = "time";

/// A named quantity computed from the current state and time.
///
/// Formulas read other named quantities through the [`Scope`] passed to them
/// and must be pure: no side effects, same inputs, same value. They are
/// re-evaluated many times per integration step.
pub struct Formula {
    eval: Box<dyn Fn(&mut Scope<'_>) -> Result<f64, Error> + Send + Sync>,
}

impl Formula {
    /// Wraps a closure as a formula.
    pub fn new<F>(eval: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<f64, Error> + Send + Sync + 'static,
    {
        Self {
            eval: Box::new(eval),
        }
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formula")
    }
}

/// A system of named quantities: integrated state variables, auxiliary
/// formulas, and the derivative formulas that drive the state.
///
/// A model is immutable once built. Solvers copy the initial state with
/// [`initial_state`][Model::initial_state], evolve it themselves, and ask
/// the model to evaluate formulas against it.
///
/// Build one with [`Model::builder`]:
///
/// ```
/// use verhulst_core::Model;
///
/// let model = Model::builder()
///     .state("x", 3.0)
///     .formula("growth_constant", |_| Ok(1.0))
///     .derivative("velocity", "x", |s| Ok(s.var("growth_constant")? * s.var("x")?))
///     .capture("x")
///     .build()?;
/// # Ok::<(), verhulst_core::BuildError>(())
/// ```
#[derive(Debug)]
pub struct Model {
    initials: BTreeMap<String, f64>,
    derivatives: BTreeMap<String, String>,
    formulas: BTreeMap<String, Formula>,
    captures: Vec<String>,
}

impl Model {
    /// Starts building a model.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns a fresh copy of the state at the start of integration.
    #[must_use]
    pub fn initial_state(&self) -> State {
        State::new(self.initials.clone())
    }

    /// The ordered list of names recorded per sample.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Evaluates every formula at the given state and time.
    ///
    /// Formulas may reference each other in any order; each one is computed
    /// at most once per call, resolved on demand rather than in declaration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] if a formula reads an unknown
    /// name, or [`Error::CyclicFormula`] if resolution re-enters a formula
    /// that is already being evaluated.
    pub fn evaluate(&self, state: &State, time: f64) -> Result<BTreeMap<String, f64>, Error> {
        let mut scope = Scope::new(self, state, time);

        self.formulas
            .keys()
            .map(|name| Ok((name.clone(), scope.var(name)?)))
            .collect()
    }

    /// Evaluates each derivative formula and pairs it with the state
    /// variable it drives.
    ///
    /// This is exactly the right-hand side vector one integration stage
    /// needs. The order is deterministic (derivative name order).
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`evaluate`][Model::evaluate].
    pub fn derivative_vector(&self, state: &State, time: f64) -> Result<Vec<(&str, f64)>, Error> {
        let mut scope = Scope::new(self, state, time);
        let mut slopes = Vec::with_capacity(self.derivatives.len());

        for (name, target) in &self.derivatives {
            slopes.push((target.as_str(), scope.var(name)?));
        }

        Ok(slopes)
    }

    /// Evaluates the captured names for one sample, in capture order.
    ///
    /// Formulas shared between captures are computed once per call.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`evaluate`][Model::evaluate].
    pub fn capture_values(&self, state: &State, time: f64) -> Result<Vec<f64>, Error> {
        let mut scope = Scope::new(self, state, time);

        self.captures.iter().map(|name| scope.var(name)).collect()
    }
}

/// Evaluation context handed to formulas.
///
/// A scope resolves names against one fixed `(state, time)` pair. Formula
/// results are memoized for the lifetime of the scope, so a quantity shared
/// by several formulas is computed once per evaluation pass.
pub struct Scope<'a> {
    model: &'a Model,
    state: &'a State,
    time: f64,
    cache: BTreeMap<String, f64>,
    stack: Vec<String>,
}

impl<'a> Scope<'a> {
    fn new(model: &'a Model, state: &'a State, time: f64) -> Self {
        Self {
            model,
            state,
            time,
            cache: BTreeMap::new(),
            stack: Vec::new(),
        }
    }

    /// The current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Resolves a name to its value.
    ///
    /// Resolution order: the reserved name `time`, then state variables,
    /// then formulas (evaluated on demand and memoized for this pass).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedReference`] for unknown names, and
    /// [`Error::CyclicFormula`] if resolution re-enters a formula that is
    /// already being evaluated in this pass.
    pub fn var(&mut self, name: &str) -> Result<f64, Error> {
        if name == TIME {
            return Ok(self.time);
        }
        if let Some(value) = self.state.get(name) {
            return Ok(value);
        }
        if let Some(value) = self.cache.get(name) {
            return Ok(*value);
        }

        let model = self.model;
        let Some(formula) = model.formulas.get(name) else {
            return Err(Error::UnresolvedReference {
                name: name.to_string(),
            });
        };

        if self.stack.iter().any(|pending| pending == name) {
            return Err(Error::CyclicFormula {
                name: name.to_string(),
            });
        }

        self.stack.push(name.to_string());
        let result = (formula.eval)(self);
        self.stack.pop();

        let value = result?;
        self.cache.insert(name.to_string(), value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_relative_eq;

    /// dx/dt = g * x, with the rate exposed as an auxiliary formula.
    fn malthus() -> Model {
        Model::builder()
            .state("x", 3.0)
            .formula("growth_constant", |_| Ok(1.0))
            .derivative("velocity", "x", |s| {
                Ok(s.var("growth_constant")? * s.var("x")?)
            })
            .capture("x")
            .capture("velocity")
            .build()
            .unwrap()
    }

    #[test]
    fn evaluates_every_formula() {
        let model = malthus();
        let state = model.initial_state();

        let values = model.evaluate(&state, 0.0).unwrap();

        assert_eq!(values.len(), 2);
        assert_relative_eq!(values["growth_constant"], 1.0);
        assert_relative_eq!(values["velocity"], 3.0);
    }

    #[test]
    fn formulas_resolve_out_of_declaration_order() {
        // `velocity` is declared before the formula it reads.
        let model = Model::builder()
            .state("x", 2.0)
            .derivative("velocity", "x", |s| Ok(s.var("rate")? * s.var("x")?))
            .formula("rate", |_| Ok(0.5))
            .build()
            .unwrap();

        let slopes = model
            .derivative_vector(&model.initial_state(), 0.0)
            .unwrap();

        assert_eq!(slopes, vec![("x", 1.0)]);
    }

    #[test]
    fn formulas_can_read_the_clock() {
        let model = Model::builder()
            .state("x", 0.0)
            .derivative("velocity", "x", |s| Ok(2.0 * s.time()))
            .formula("elapsed", |s| s.var("time"))
            .build()
            .unwrap();

        let state = model.initial_state();
        let values = model.evaluate(&state, 1.5).unwrap();

        assert_relative_eq!(values["elapsed"], 1.5);
        assert_relative_eq!(values["velocity"], 3.0);
    }

    #[test]
    fn shared_formulas_evaluate_once_per_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let model = Model::builder()
            .state("x", 1.0)
            .formula("shared", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(4.0)
            })
            .formula("a", |s| Ok(s.var("shared")? + 1.0))
            .formula("b", |s| Ok(s.var("shared")? + 2.0))
            .build()
            .unwrap();

        let state = model.initial_state();
        model.evaluate(&state, 0.0).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // A fresh pass re-evaluates.
        model.evaluate(&state, 1.0).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let model = Model::builder()
            .state("x", 1.0)
            .formula("broken", |s| s.var("missing"))
            .build()
            .unwrap();

        let error = model.evaluate(&model.initial_state(), 0.0).unwrap_err();

        assert_eq!(
            error,
            Error::UnresolvedReference {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn mutual_recursion_is_a_cycle() {
        let model = Model::builder()
            .formula("a", |s| s.var("b"))
            .formula("b", |s| s.var("a"))
            .build()
            .unwrap();

        let error = model.evaluate(&State::default(), 0.0).unwrap_err();

        assert!(matches!(error, Error::CyclicFormula { .. }));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let model = Model::builder()
            .formula("a", |s| s.var("a"))
            .build()
            .unwrap();

        let error = model.evaluate(&State::default(), 0.0).unwrap_err();

        assert_eq!(
            error,
            Error::CyclicFormula {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn derivative_vector_pairs_slopes_with_driven_variables() {
        let model = Model::builder()
            .state("x", 1.0)
            .state("y", 2.0)
            .derivative("vx", "x", |s| Ok(s.var("y")?))
            .derivative("vy", "y", |s| Ok(-s.var("x")?))
            .build()
            .unwrap();

        let slopes = model
            .derivative_vector(&model.initial_state(), 0.0)
            .unwrap();

        assert_eq!(slopes, vec![("x", 2.0), ("y", -1.0)]);
    }

    #[test]
    fn capture_values_follow_capture_order() {
        let model = malthus();
        let state = model.initial_state();

        let values = model.capture_values(&state, 0.0).unwrap();

        // Captures are ["x", "velocity"].
        assert_eq!(values, vec![3.0, 3.0]);
    }
}
