// stepwise/src/namespace/collector.rs

//! Picks the steps out of a namespace and puts them in running order.

use super::Namespace;
use crate::core::step::Step;
use crate::error::{StepwiseError, StepwiseResult};
use tracing::{event, Level};

/// Collects the public function bindings of `namespace`.
///
/// Rules, in order:
///  1. only `Binding::Function` entries count;
///  2. names starting with `_` are private and dropped, whatever the step's own name is;
///  3. the rest are stably sorted by the line each step was defined on.
///
/// The sort key is the step's own origin line, compared across files. A step
/// imported from another file keeps the line from that file, so imported and
/// local steps can interleave in a way that matches neither file.
///
/// A step bound under several public names is collected once. Two different
/// steps sharing a name is an error.
pub fn collect_steps(namespace: &Namespace) -> StepwiseResult<Vec<Step>> {
  let mut steps: Vec<Step> = Vec::new();

  for (bound_name, binding) in namespace.iter() {
    let Some(step) = binding.as_step() else {
      event!(Level::TRACE, namespace = namespace.name(), name = bound_name, "Not a function, ignored.");
      continue;
    };
    if bound_name.starts_with('_') {
      event!(Level::TRACE, namespace = namespace.name(), name = bound_name, "Private binding, ignored.");
      continue;
    }
    if steps.iter().any(|s| Step::ptr_eq(s, step)) {
      continue;
    }
    if steps.iter().any(|s| s.name() == step.name()) {
      return Err(StepwiseError::DuplicateStep {
        name: step.name().to_string(),
      });
    }
    steps.push(step.clone());
  }

  steps.sort_by_key(|s| s.origin().line);

  event!(
    Level::DEBUG,
    namespace = namespace.name(),
    num_steps = steps.len(),
    "Collected steps from namespace."
  );
  Ok(steps)
}
