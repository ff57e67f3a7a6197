// stepwise/src/core/args.rs

//! `Args`, the view of the state a step body receives.

use super::exc_info::ExcInfo;
use super::state::{State, ALGORITHM, EXC_INFO, STATE};
use super::step::Step;
use crate::error::{StepwiseError, StepwiseResult};
use crate::pipeline::definition::Pipeline;
use std::any::Any;

/// Hands a step the state entries it declared, by name.
///
/// Lookups of keys the step did not declare fail with
/// `StepwiseError::UndeclaredParameter`, so a step's parameter list stays the
/// single source of truth for what it depends on. Errors returned here are
/// ordinary step errors once propagated with `?`.
pub struct Args<'a> {
  step: &'a Step,
  state: &'a State,
}

impl<'a> Args<'a> {
  pub(crate) fn new(step: &'a Step, state: &'a State) -> Self {
    Self { step, state }
  }

  pub fn step_name(&self) -> &'a str {
    self.step.name()
  }

  /// Returns the value injected for `key`, downcast to `T`.
  pub fn get<T: Any>(&self, key: &str) -> StepwiseResult<&'a T> {
    if !self.step.declares(key) {
      return Err(StepwiseError::UndeclaredParameter {
        step_name: self.step.name().to_string(),
        key: key.to_string(),
      });
    }
    self.state.try_get::<T>(key)
  }

  /// Clones the injected value for `key`.
  pub fn cloned<T: Any + Clone>(&self, key: &str) -> StepwiseResult<T> {
    self.get::<T>(key).cloned()
  }

  /// The whole state. Requires the `state` parameter.
  pub fn state(&self) -> StepwiseResult<&'a State> {
    self.get::<State>(STATE)
  }

  /// The running pipeline. Requires the `algorithm` parameter.
  pub fn algorithm(&self) -> StepwiseResult<&'a Pipeline> {
    self.get::<Pipeline>(ALGORITHM)
  }

  /// The pending error. Requires the `exc_info` parameter.
  pub fn exc_info(&self) -> StepwiseResult<Option<&'a ExcInfo>> {
    self.get::<Option<ExcInfo>>(EXC_INFO).map(Option::as_ref)
  }
}
