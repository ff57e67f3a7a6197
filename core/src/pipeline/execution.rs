// stepwise/src/pipeline/execution.rs

//! Contains the `Pipeline::run*()` methods, responsible for executing the
//! pipeline's steps and carrying step failures through the run.

use crate::core::state::{State, EXC_INFO};
use crate::core::value::Values;
use crate::error::{StepwiseError, StepwiseResult};
use crate::pipeline::definition::Pipeline;
use crate::pipeline::invoke::{invoke, Outcome};
use crate::pipeline::options::RunOptions;
use tracing::{event, instrument, span, Level};

impl Pipeline {
  /// Runs every step with `initial` as the starting values.
  pub fn run(&self, initial: Values) -> StepwiseResult<State> {
    self.run_with(initial, RunOptions::default())
  }

  /// Runs up to and including the step named `step_name`.
  pub fn run_through<S: Into<String>>(&self, initial: Values, step_name: S) -> StepwiseResult<State> {
    self.run_with(initial, RunOptions::new().through(step_name))
  }

  /// Executes the pipeline and returns the final state.
  ///
  /// Steps run in order, each receiving the state entries it declared. While
  /// no error is pending every step runs. When a step fails, its error is
  /// stored under `exc_info` and steps that don't declare `exc_info` are
  /// skipped until one that does (a handler) runs. A handler that finishes
  /// without failing clears `exc_info`, unless its output sets `exc_info`
  /// itself; one that fails replaces it. Any step may return an `exc_info`
  /// entry (an `Option<ExcInfo>`) to set or clear the pending error. An error
  /// still pending at the end is left in the returned state rather than
  /// returned as `Err`.
  ///
  /// `Err` is reserved for authoring problems: an unknown `through` step,
  /// reserved keys in `initial`, `state` or `algorithm` in a step's output,
  /// an `exc_info` output of the wrong type, and steps asking for state
  /// nobody produced. With `raise_immediately`, step failures are returned
  /// as `StepwiseError::StepFailed` too.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            num_steps = tracing::field::Empty,
            through = options.through.as_deref(),
            raise_immediately = options.raise_immediately,
        ),
        err(Display)
    )]
  pub fn run_with(&self, initial: Values, options: RunOptions) -> StepwiseResult<State> {
    let steps = self.steps();
    tracing::Span::current().record("num_steps", steps.len());

    if let Some(through) = options.through.as_deref() {
      if !steps.iter().any(|s| s.name() == through) {
        event!(Level::ERROR, through, "Cannot run through an unknown step.");
        return Err(StepwiseError::FunctionNotFound {
          name: through.to_string(),
        });
      }
    }

    let mut state = State::new(self.clone(), initial)?;
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step) in steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step.name(),
        step_index = step_idx,
        handler = step.is_handler()
      );
      let _step_span_guard = step_span.enter();

      if state.exc_info().is_some() && !step.is_handler() {
        event!(Level::INFO, "Step skipped: an error is pending and the step is not a handler.");
      } else {
        event!(Level::DEBUG, "Processing step.");
        match invoke(step, &state)? {
          Outcome::Returned(output) => {
            let mut sets_exc_info = false;
            if let Some(output) = output {
              sets_exc_info = output.contains_key(EXC_INFO);
              state.merge(step.name(), output)?;
            }
            // An explicit `exc_info` in the output wins over the auto-clear.
            if step.is_handler() && !sets_exc_info && state.exc_info().is_some() {
              event!(Level::INFO, "Handler completed; pending error cleared.");
              state.set_exc_info(None);
            }
            event!(Level::DEBUG, "Step processing finished successfully.");
          }
          Outcome::Raised(exc_info) => {
            event!(Level::WARN, error = %exc_info, "Step raised.");
            if options.raise_immediately {
              return Err(StepwiseError::StepFailed {
                step_name: step.name().to_string(),
                source: exc_info.into_error(),
              });
            }
            state.set_exc_info(Some(exc_info));
          }
        }
      }

      if options.through.as_deref() == Some(step.name()) {
        event!(Level::INFO, "Reached the 'through' step; stopping.");
        break;
      }
    }

    match state.exc_info() {
      Some(exc_info) => event!(Level::WARN, error = %exc_info, "Pipeline finished with an unhandled error."),
      None => event!(Level::DEBUG, "Pipeline execution completed successfully."),
    }
    Ok(state)
  }
}
