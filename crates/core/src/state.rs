use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The integrated variables of a model at one instant.
///
/// A solver seeds a `State` from [`Model::initial_state`] and owns it for
/// the rest of the run; the model itself is never mutated. Variables iterate
/// in name order, so runs with identical inputs are bit-for-bit identical.
///
/// [`Model::initial_state`]: crate::Model::initial_state
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    values: BTreeMap<String, f64>,
}

impl State {
    pub(crate) fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    /// Returns the value of a state variable, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Iterates over the variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Returns the number of state variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the state holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns this state stepped by `slopes * delta`.
    ///
    /// Slopes naming anything other than a state variable are ignored; the
    /// model builder guarantees derivative bindings only drive state
    /// variables.
    #[must_use]
    pub fn step(&self, slopes: &[(&str, f64)], delta: f64) -> Self {
        let mut next = self.clone();
        for (name, slope) in slopes {
            if let Some(value) = next.values.get_mut(*name) {
                *value += slope * delta;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn state(entries: &[(&str, f64)]) -> State {
        State::new(
            entries
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value))
                .collect(),
        )
    }

    #[test]
    fn step_advances_each_variable() {
        let current = state(&[("x", 1.0), ("y", 2.0)]);

        let next = current.step(&[("x", 0.5), ("y", -1.0)], 2.0);

        assert_relative_eq!(next.get("x").unwrap(), 2.0);
        assert_relative_eq!(next.get("y").unwrap(), 0.0);
    }

    #[test]
    fn step_leaves_unmentioned_variables_alone() {
        let current = state(&[("x", 1.0), ("y", 2.0)]);

        let next = current.step(&[("x", 1.0)], 1.0);

        assert_relative_eq!(next.get("x").unwrap(), 2.0);
        assert_relative_eq!(next.get("y").unwrap(), 2.0);
    }

    #[test]
    fn step_does_not_mutate_the_original() {
        let current = state(&[("x", 1.0)]);

        let _ = current.step(&[("x", 1.0)], 1.0);

        assert_relative_eq!(current.get("x").unwrap(), 1.0);
    }

    #[test]
    fn iterates_in_name_order() {
        let current = state(&[("b", 2.0), ("a", 1.0), ("c", 3.0)]);

        let names: Vec<&str> = current.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
