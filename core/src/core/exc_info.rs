// stepwise/src/core/exc_info.rs

//! The in-flight error carrier stored under the `exc_info` state key.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcKind {
  /// The step body returned `Err`.
  Error,
  /// The step body panicked.
  Panic,
}

/// Describes a failure raised by a step: which step, how it failed, and the
/// error itself. The anyhow cause chain stands in for a traceback.
#[derive(Clone)]
pub struct ExcInfo {
  step_name: String,
  kind: ExcKind,
  error: Arc<anyhow::Error>,
}

impl ExcInfo {
  pub(crate) fn from_error(step_name: &str, error: anyhow::Error) -> Self {
    Self {
      step_name: step_name.to_string(),
      kind: ExcKind::Error,
      error: Arc::new(error),
    }
  }

  pub(crate) fn from_panic(step_name: &str, payload: Box<dyn Any + Send>) -> Self {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
      (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "Box<dyn Any>".to_string()
    };
    Self {
      step_name: step_name.to_string(),
      kind: ExcKind::Panic,
      error: Arc::new(anyhow::anyhow!("step panicked: {}", message)),
    }
  }

  /// Takes the error back out; falls back to a copy of its message if the
  /// descriptor has been cloned.
  pub(crate) fn into_error(self) -> anyhow::Error {
    Arc::try_unwrap(self.error).unwrap_or_else(|shared| anyhow::anyhow!("{:#}", shared))
  }

  /// Name of the step that raised.
  pub fn step_name(&self) -> &str {
    &self.step_name
  }

  pub fn kind(&self) -> ExcKind {
    self.kind
  }

  pub fn error(&self) -> &anyhow::Error {
    &self.error
  }

  pub fn message(&self) -> String {
    self.error.to_string()
  }

  /// Outermost error first, root cause last.
  pub fn traceback(&self) -> Vec<String> {
    self.error.chain().map(|e| e.to_string()).collect()
  }

  pub fn is<E>(&self) -> bool
  where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
  {
    self.error.is::<E>()
  }

  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
  {
    self.error.downcast_ref::<E>()
  }

  fn kind_label(&self) -> &'static str {
    match self.kind {
      ExcKind::Error => "error",
      ExcKind::Panic => "panic",
    }
  }
}

impl fmt::Display for ExcInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} in step '{}': {}", self.kind_label(), self.step_name, self.error)
  }
}

impl fmt::Debug for ExcInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ExcInfo")
      .field("step_name", &self.step_name)
      .field("kind", &self.kind)
      .field("traceback", &self.traceback())
      .finish()
  }
}
