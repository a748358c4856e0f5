use thiserror::Error;

/// Errors that can occur while evaluating model formulas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A formula referenced a name that is not a state variable, a formula,
    /// or the reserved name `time`.
    #[error("formula references unknown name `{name}`")]
    UnresolvedReference { name: String },

    /// Resolution re-entered a formula that is already being evaluated.
    #[error("formula `{name}` depends on its own value")]
    CyclicFormula { name: String },
}
