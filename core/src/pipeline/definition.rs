// stepwise/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and methods for its
//! construction and structural modification.

use crate::core::step::Step;
use crate::error::{StepwiseError, StepwiseResult};
use crate::namespace::{collect_steps, Binding, Namespace};
use crate::registry::Loader;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// An ordered list of uniquely named steps.
///
/// `Pipeline` is a shared handle: clones refer to the same step list, which is
/// how a running step reaches "its" pipeline through the `algorithm` state key.
/// Structural changes take an internal write lock; a run works on a snapshot
/// of the list taken when it starts, so changes show up in later runs only.
#[derive(Clone)]
pub struct Pipeline {
  /// Ordered list of steps for this pipeline.
  pub(crate) steps: Arc<RwLock<Vec<Step>>>,
}

impl Pipeline {
  /// Creates a pipeline from an explicit list.
  ///
  /// Every item must be a function binding (e.g. a [`Step`]); anything else
  /// fails with `StepwiseError::InvalidStep` naming the offending value.
  pub fn new<I, B>(items: I) -> StepwiseResult<Self>
  where
    I: IntoIterator<Item = B>,
    B: Into<Binding>,
  {
    let mut steps = Vec::new();
    for item in items {
      match item.into() {
        Binding::Function(step) => steps.push(step),
        other => {
          event!(Level::ERROR, repr = %other.repr(), "Pipeline item is not a function.");
          return Err(StepwiseError::InvalidStep { repr: other.repr() });
        }
      }
    }
    Self::from_steps(steps)
  }

  fn from_steps(steps: Vec<Step>) -> StepwiseResult<Self> {
    for (idx, step) in steps.iter().enumerate() {
      if steps[..idx].iter().any(|s| s.name() == step.name()) {
        return Err(StepwiseError::DuplicateStep {
          name: step.name().to_string(),
        });
      }
    }
    Ok(Self {
      steps: Arc::new(RwLock::new(steps)),
    })
  }

  /// Collects the public steps of `namespace`, in definition-line order.
  pub fn from_namespace(namespace: &Namespace) -> StepwiseResult<Self> {
    Self::from_steps(collect_steps(namespace)?)
  }

  /// Loads the namespace at `dotted_name` through `loader` and collects its steps.
  pub fn from_dotted_name(loader: &dyn Loader, dotted_name: &str) -> StepwiseResult<Self> {
    let namespace = loader.load(dotted_name)?;
    Self::from_namespace(&namespace)
  }

  /// Snapshot of the current steps. Clones share their callables, so they
  /// compare equal to the steps the pipeline was built from.
  pub fn steps(&self) -> Vec<Step> {
    self.steps.read().clone()
  }

  pub fn names(&self) -> Vec<String> {
    self.steps.read().iter().map(|s| s.name().to_string()).collect()
  }

  pub fn len(&self) -> usize {
    self.steps.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.read().is_empty()
  }

  pub fn contains(&self, step_name: &str) -> bool {
    self.steps.read().iter().any(|s| s.name() == step_name)
  }

  /// True when both handles refer to the same pipeline.
  pub fn ptr_eq(a: &Pipeline, b: &Pipeline) -> bool {
    Arc::ptr_eq(&a.steps, &b.steps)
  }

  // --- Basic Step Manipulation Methods ---

  fn position(steps: &[Step], step_name: &str) -> StepwiseResult<usize> {
    steps
      .iter()
      .position(|s| s.name() == step_name)
      .ok_or_else(|| StepwiseError::FunctionNotFound {
        name: step_name.to_string(),
      })
  }

  fn insert_at_offset(&self, existing_step_name: &str, step: Step, offset: usize) -> StepwiseResult<()> {
    let mut steps = self.steps.write();
    let idx = Self::position(&steps, existing_step_name)?;
    if steps.iter().any(|s| s.name() == step.name()) {
      return Err(StepwiseError::DuplicateStep {
        name: step.name().to_string(),
      });
    }
    event!(Level::DEBUG, existing = existing_step_name, new = step.name(), offset, "Inserting step.");
    steps.insert(idx + offset, step);
    Ok(())
  }

  /// Inserts `step` right before the step named `existing_step_name`.
  pub fn insert_before(&self, existing_step_name: &str, step: Step) -> StepwiseResult<()> {
    self.insert_at_offset(existing_step_name, step, 0)
  }

  /// Inserts `step` right after the step named `existing_step_name`.
  pub fn insert_after(&self, existing_step_name: &str, step: Step) -> StepwiseResult<()> {
    self.insert_at_offset(existing_step_name, step, 1)
  }

  /// Removes and returns the named step.
  pub fn remove(&self, step_name: &str) -> StepwiseResult<Step> {
    let mut steps = self.steps.write();
    let idx = Self::position(&steps, step_name)?;
    event!(Level::DEBUG, step = step_name, "Removing step.");
    Ok(steps.remove(idx))
  }
}

impl fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline").field("steps", &self.names()).finish()
  }
}
