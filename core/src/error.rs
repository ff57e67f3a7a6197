// stepwise/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepwiseError {
    /// A value meant to become a step is not a function binding.
    #[error("Not a function: {repr}")]
    InvalidStep { repr: String },

    #[error("Function not found: {name}")]
    FunctionNotFound { name: String },

    #[error("Duplicate step name: {name}")]
    DuplicateStep { name: String },

    /// A step declares a parameter that no earlier step (nor the run arguments) produced.
    #[error("Step '{step_name}' needs '{key}', which is not in the state")]
    MissingState { step_name: String, key: String },

    #[error("State has no key '{key}'")]
    KeyNotFound { key: String },

    #[error("'{key}' is a reserved state key and cannot be set by {origin}")]
    ReservedKey { origin: String, key: String },

    #[error("Step '{step_name}' did not declare '{key}' as a parameter")]
    UndeclaredParameter { step_name: String, key: String },

    #[error("Type mismatch for state key '{key}' (expected {expected}, found {found})")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    #[error("No module named '{name}'")]
    ModuleNotFound { name: String },

    #[error("Failed to load module '{name}'. Source: {source}")]
    ModuleLoad {
        name: String,
        #[source]
        source: AnyhowError,
    },

    #[error("Import cycle detected while loading module '{name}'")]
    ImportCycle { name: String },

    #[error("Cannot import name '{name}' from '{module}'")]
    ImportName { module: String, name: String },

    /// Only produced when a run is configured to raise immediately.
    #[error("Step '{step_name}' failed. Source: {source}")]
    StepFailed {
        step_name: String,
        #[source]
        source: AnyhowError,
    },
}

pub type StepwiseResult<T, E = StepwiseError> = std::result::Result<T, E>;
