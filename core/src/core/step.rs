// stepwise/src/core/step.rs

//! Defines the structure for a single step within a pipeline.

use super::args::Args;
use super::value::Values;
use std::panic::Location;
use std::sync::Arc;

/// The callable behind a step. Uses Arc so clones of a step share one callable,
/// which is what step identity is based on.
pub type StepFn = Arc<dyn Fn(&Args<'_>) -> anyhow::Result<Option<Values>> + Send + Sync + 'static>;

/// Conversion from what a step body returns into the engine's view of it.
///
/// `()` means "nothing to merge", `Values` is merged into the state, and
/// `Option<Values>` covers both.
pub trait IntoOutput {
  fn into_output(self) -> Option<Values>;
}

impl IntoOutput for () {
  fn into_output(self) -> Option<Values> {
    None
  }
}

impl IntoOutput for Values {
  fn into_output(self) -> Option<Values> {
    Some(self)
  }
}

impl IntoOutput for Option<Values> {
  fn into_output(self) -> Option<Values> {
    self
  }
}

/// Source location a step was defined at. Collection from a namespace orders
/// steps by `line`, across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
  pub file: &'static str,
  pub line: u32,
}

/// A named pipeline step: a callable plus the state keys it wants injected.
#[derive(Clone)]
pub struct Step {
  name: Arc<str>,
  params: Arc<[String]>,
  func: StepFn,
  origin: Origin,
}

impl Step {
  /// Creates a step. `params` are the state keys handed to the body through
  /// [`Args`]; repeated names collapse to their first occurrence.
  ///
  /// The step's origin is the caller's source location. Collection from a
  /// namespace sorts by origin line only, ignoring the file, so for steps
  /// built in different files the order is meaningful only when origins are
  /// set with [`Step::at`].
  #[track_caller]
  pub fn new<N, F, R>(name: N, params: &[&str], func: F) -> Self
  where
    N: Into<String>,
    F: Fn(&Args<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
    R: IntoOutput,
  {
    let caller = Location::caller();
    let mut unique: Vec<String> = Vec::with_capacity(params.len());
    for param in params {
      if !unique.iter().any(|p| p == param) {
        unique.push((*param).to_string());
      }
    }

    let name: String = name.into();
    Self {
      name: name.into(),
      params: unique.into(),
      func: Arc::new(move |args: &Args<'_>| func(args).map(IntoOutput::into_output)),
      origin: Origin {
        file: caller.file(),
        line: caller.line(),
      },
    }
  }

  /// Overrides the recorded origin.
  pub fn at(mut self, file: &'static str, line: u32) -> Self {
    self.origin = Origin { file, line };
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn params(&self) -> &[String] {
    &self.params
  }

  pub fn origin(&self) -> Origin {
    self.origin
  }

  pub fn declares(&self, key: &str) -> bool {
    self.params.iter().any(|p| p == key)
  }

  /// A handler is a step that asks for `exc_info`; only handlers run while an
  /// error is pending.
  pub fn is_handler(&self) -> bool {
    self.declares(crate::core::state::EXC_INFO)
  }

  pub(crate) fn call(&self, args: &Args<'_>) -> anyhow::Result<Option<Values>> {
    (self.func)(args)
  }

  /// True when both steps share the same callable.
  pub fn ptr_eq(a: &Step, b: &Step) -> bool {
    Arc::ptr_eq(&a.func, &b.func)
  }
}

impl PartialEq for Step {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name && Step::ptr_eq(self, other)
  }
}

impl Eq for Step {}

// StepFn (Arc<dyn Fn...>) doesn't implement Debug.
impl std::fmt::Debug for Step {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Step")
      .field("name", &self.name)
      .field("params", &self.params)
      .field("origin", &self.origin)
      .finish()
  }
}
