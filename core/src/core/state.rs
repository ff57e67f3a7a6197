// stepwise/src/core/state.rs

//! The per-run state threaded through every step.

use super::exc_info::ExcInfo;
use super::value::Values;
use crate::error::{StepwiseError, StepwiseResult};
use crate::pipeline::definition::Pipeline;
use std::any::Any;
use std::fmt;

/// Reserved key resolving to the state itself.
pub const STATE: &str = "state";
/// Reserved key resolving to the pipeline being run.
pub const ALGORITHM: &str = "algorithm";
/// Reserved key holding the pending error, if any.
pub const EXC_INFO: &str = "exc_info";

pub const RESERVED_KEYS: [&str; 3] = [STATE, ALGORITHM, EXC_INFO];

pub fn is_reserved(key: &str) -> bool {
  RESERVED_KEYS.contains(&key)
}

/// Mapping from state keys to values, built fresh for every run and handed
/// back to the caller when the run ends.
///
/// Besides the values supplied as run arguments and merged from step outputs,
/// a state always answers to three reserved keys:
///  - `state`: the `State` itself,
///  - `algorithm`: the [`Pipeline`] that produced it,
///  - `exc_info`: an `Option<ExcInfo>`, `Some` while a step failure is pending.
pub struct State {
  values: Values,
  algorithm: Pipeline,
  exc_info: Option<ExcInfo>,
}

impl State {
  pub(crate) fn new(algorithm: Pipeline, initial: Values) -> StepwiseResult<Self> {
    if let Some(key) = initial.keys().find(|k| is_reserved(k)) {
      return Err(StepwiseError::ReservedKey {
        origin: "run arguments".to_string(),
        key: key.to_string(),
      });
    }
    Ok(Self {
      values: initial,
      algorithm,
      exc_info: None,
    })
  }

  /// Looks up `key` and downcasts it to `T`.
  ///
  /// Reserved keys downcast to `State`, `Pipeline` and `Option<ExcInfo>`.
  pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
    self.lookup(key).and_then(|(value, _)| value.downcast_ref::<T>())
  }

  /// Same as [`State::get`] but says why a lookup failed.
  pub fn try_get<T: Any>(&self, key: &str) -> StepwiseResult<&T> {
    let (value, found) = self
      .lookup(key)
      .ok_or_else(|| StepwiseError::KeyNotFound { key: key.to_string() })?;
    value.downcast_ref::<T>().ok_or_else(|| StepwiseError::TypeMismatch {
      key: key.to_string(),
      expected: std::any::type_name::<T>().to_string(),
      found: found.to_string(),
    })
  }

  fn lookup(&self, key: &str) -> Option<(&dyn Any, &'static str)> {
    match key {
      STATE => Some((self as &dyn Any, std::any::type_name::<State>())),
      ALGORITHM => Some((&self.algorithm as &dyn Any, std::any::type_name::<Pipeline>())),
      EXC_INFO => Some((&self.exc_info as &dyn Any, std::any::type_name::<Option<ExcInfo>>())),
      _ => self.values.get_value(key).map(|v| (v.as_any(), v.type_name())),
    }
  }

  pub fn contains_key(&self, key: &str) -> bool {
    is_reserved(key) || self.values.contains_key(key)
  }

  /// Reserved keys first, then user keys in insertion order.
  pub fn keys(&self) -> Vec<&str> {
    let mut keys: Vec<&str> = RESERVED_KEYS.to_vec();
    keys.extend(self.values.keys());
    keys
  }

  pub fn len(&self) -> usize {
    RESERVED_KEYS.len() + self.values.len()
  }

  /// A state always holds the reserved keys.
  pub fn is_empty(&self) -> bool {
    false
  }

  pub fn algorithm(&self) -> &Pipeline {
    &self.algorithm
  }

  pub fn exc_info(&self) -> Option<&ExcInfo> {
    self.exc_info.as_ref()
  }

  /// Values supplied as run arguments or merged from step outputs.
  pub fn values(&self) -> &Values {
    &self.values
  }

  pub fn into_values(self) -> Values {
    self.values
  }

  pub(crate) fn set_exc_info(&mut self, exc_info: Option<ExcInfo>) {
    self.exc_info = exc_info;
  }

  /// Merges a step's output, overwriting keys that already exist.
  ///
  /// `exc_info` may be written, as an `Option<ExcInfo>`, to set or clear the
  /// pending error. `state` and `algorithm` may not.
  pub(crate) fn merge(&mut self, step_name: &str, mut output: Values) -> StepwiseResult<()> {
    if let Some(key) = output.keys().find(|k| *k != EXC_INFO && is_reserved(k)) {
      return Err(StepwiseError::ReservedKey {
        origin: format!("step '{}'", step_name),
        key: key.to_string(),
      });
    }
    if let Some(value) = output.remove(EXC_INFO) {
      let exc_info = value
        .downcast_ref::<Option<ExcInfo>>()
        .cloned()
        .ok_or_else(|| StepwiseError::TypeMismatch {
          key: EXC_INFO.to_string(),
          expected: std::any::type_name::<Option<ExcInfo>>().to_string(),
          found: value.type_name().to_string(),
        })?;
      self.exc_info = exc_info;
    }
    self.values.merge(output);
    Ok(())
  }
}

impl fmt::Debug for State {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("State")
      .field("values", &self.values)
      .field("algorithm", &self.algorithm)
      .field("exc_info", &self.exc_info)
      .finish()
  }
}
