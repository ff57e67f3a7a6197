// stepwise/src/pipeline/options.rs

/// Per-run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
  /// Stop right after the step with this name has been processed.
  pub through: Option<String>,
  /// Return a step's error from `run` instead of carrying it in `exc_info`.
  pub raise_immediately: bool,
}

impl RunOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn through<S: Into<String>>(mut self, step_name: S) -> Self {
    self.through = Some(step_name.into());
    self
  }

  pub fn raise_immediately(mut self, raise: bool) -> Self {
    self.raise_immediately = raise;
    self
  }
}
