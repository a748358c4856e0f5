use std::collections::BTreeMap;

use thiserror::Error;

use super::{Formula, Model, Scope, TIME};
use crate::Error as EvalError;

/// Errors that can occur when building a [`Model`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A derivative was bound to a state variable that was never declared.
    #[error("derivative `{name}` drives unknown state variable `{target}`")]
    UnknownTarget { name: String, target: String },

    /// A capture names neither a state variable nor a formula.
    #[error("capture `{name}` does not name a state variable or formula")]
    UnknownCapture { name: String },

    /// The same name was declared as both a state variable and a formula.
    #[error("`{name}` is declared as both a state variable and a formula")]
    DuplicateName { name: String },

    /// `time` is provided by the framework and cannot be redeclared.
    #[error("`time` is reserved for the simulation clock")]
    ReservedTime,
}

/// Builds a [`Model`], validating it before any evaluation happens.
///
/// Declaration order does not matter: formulas may reference names declared
/// later. Validation covers the model's structure (bindings and names);
/// whether a formula's references resolve is checked on first evaluation,
/// since formula bodies are opaque closures.
#[derive(Debug, Default)]
pub struct Builder {
    initials: BTreeMap<String, f64>,
    derivatives: BTreeMap<String, String>,
    formulas: BTreeMap<String, Formula>,
    captures: Vec<String>,
}

impl Builder {
    /// Creates an empty builder. Equivalent to [`Model::builder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a state variable and its value at the start of integration.
    #[must_use]
    pub fn state(mut self, name: impl Into<String>, initial: f64) -> Self {
        self.initials.insert(name.into(), initial);
        self
    }

    /// Declares an auxiliary formula.
    #[must_use]
    pub fn formula<F>(mut self, name: impl Into<String>, eval: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<f64, EvalError> + Send + Sync + 'static,
    {
        self.formulas.insert(name.into(), Formula::new(eval));
        self
    }

    /// Declares a derivative formula and binds it to the state variable it
    /// integrates into.
    #[must_use]
    pub fn derivative<F>(mut self, name: impl Into<String>, drives: impl Into<String>, eval: F) -> Self
    where
        F: Fn(&mut Scope<'_>) -> Result<f64, EvalError> + Send + Sync + 'static,
    {
        let name = name.into();
        self.derivatives.insert(name.clone(), drives.into());
        self.formulas.insert(name, Formula::new(eval));
        self
    }

    /// Appends a name to the capture list.
    ///
    /// Captured names are recorded at every retained sample, in the order
    /// they were appended.
    #[must_use]
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.captures.push(name.into());
        self
    }

    /// Validates the declarations and builds the model.
    ///
    /// # Errors
    ///
    /// - [`BuildError::ReservedTime`] if `time` was declared as a state
    ///   variable or formula.
    /// - [`BuildError::DuplicateName`] if a name is both a state variable
    ///   and a formula.
    /// - [`BuildError::UnknownTarget`] if a derivative drives a state
    ///   variable that was never declared.
    /// - [`BuildError::UnknownCapture`] if a capture resolves to nothing.
    pub fn build(self) -> Result<Model, BuildError> {
        if self.initials.contains_key(TIME) || self.formulas.contains_key(TIME) {
            return Err(BuildError::ReservedTime);
        }

        for name in self.formulas.keys() {
            if self.initials.contains_key(name) {
                return Err(BuildError::DuplicateName { name: name.clone() });
            }
        }

        for (name, target) in &self.derivatives {
            if !self.initials.contains_key(target) {
                return Err(BuildError::UnknownTarget {
                    name: name.clone(),
                    target: target.clone(),
                });
            }
        }

        for name in &self.captures {
            let known = name == TIME
                || self.initials.contains_key(name)
                || self.formulas.contains_key(name);
            if !known {
                return Err(BuildError::UnknownCapture { name: name.clone() });
            }
        }

        Ok(Model {
            initials: self.initials,
            derivatives: self.derivatives,
            formulas: self.formulas,
            captures: self.captures,
        })
    }
}
