// stepwise/src/namespace/binding.rs

//! Values that can be bound to a name in a namespace (or handed to
//! `Pipeline::new`). Only `Binding::Function` ever becomes a step.

use crate::core::step::Step;
use crate::core::value::Value;
use std::any::Any;
use std::fmt;

#[derive(Clone)]
pub enum Binding {
  /// A plain step function, the only kind a pipeline accepts.
  Function(Step),
  /// A type. Callable in its own way, but never collected.
  Class { name: String },
  /// Something provided by the host rather than defined as a step.
  Builtin { name: String },
  /// Any other value, with its debug representation.
  Value { repr: String, value: Value },
}

impl Binding {
  pub fn class<N: Into<String>>(name: N) -> Self {
    Binding::Class { name: name.into() }
  }

  pub fn builtin<N: Into<String>>(name: N) -> Self {
    Binding::Builtin { name: name.into() }
  }

  pub fn value<T: Any + Send + Sync + fmt::Debug>(value: T) -> Self {
    Binding::Value {
      repr: format!("{:?}", value),
      value: Value::new(value),
    }
  }

  pub fn as_step(&self) -> Option<&Step> {
    match self {
      Binding::Function(step) => Some(step),
      _ => None,
    }
  }

  /// Textual representation used in error messages.
  pub fn repr(&self) -> String {
    match self {
      Binding::Function(step) => format!("<function {}>", step.name()),
      Binding::Class { name } => format!("<class '{}'>", name),
      Binding::Builtin { name } => format!("<built-in function {}>", name),
      Binding::Value { repr, .. } => repr.clone(),
    }
  }
}

impl fmt::Debug for Binding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.repr())
  }
}

impl From<Step> for Binding {
  fn from(step: Step) -> Self {
    Binding::Function(step)
  }
}

impl From<&str> for Binding {
  fn from(s: &str) -> Self {
    Binding::value(s.to_string())
  }
}

impl From<String> for Binding {
  fn from(s: String) -> Self {
    Binding::value(s)
  }
}
