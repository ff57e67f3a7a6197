// stepwise/src/pipeline/invoke.rs

//! Calling one step against the current state.

use crate::core::args::Args;
use crate::core::exc_info::ExcInfo;
use crate::core::state::State;
use crate::core::step::Step;
use crate::core::value::Values;
use crate::error::{StepwiseError, StepwiseResult};
use std::panic::{self, AssertUnwindSafe};

/// What a step did when called.
pub(crate) enum Outcome {
  /// The step finished; `None` means it had nothing to merge.
  Returned(Option<Values>),
  /// The step returned an error or panicked.
  Raised(ExcInfo),
}

/// Checks that every declared parameter is available, then calls the step.
///
/// A missing parameter is an authoring error and is returned as
/// `StepwiseError::MissingState`; failures of the step itself come back as
/// `Outcome::Raised`.
pub(crate) fn invoke(step: &Step, state: &State) -> StepwiseResult<Outcome> {
  if let Some(missing) = step.params().iter().find(|p| !state.contains_key(p)) {
    return Err(StepwiseError::MissingState {
      step_name: step.name().to_string(),
      key: missing.clone(),
    });
  }

  let args = Args::new(step, state);
  let outcome = match panic::catch_unwind(AssertUnwindSafe(|| step.call(&args))) {
    Ok(Ok(output)) => Outcome::Returned(output),
    Ok(Err(error)) => Outcome::Raised(ExcInfo::from_error(step.name(), error)),
    Err(payload) => Outcome::Raised(ExcInfo::from_panic(step.name(), payload)),
  };
  Ok(outcome)
}
