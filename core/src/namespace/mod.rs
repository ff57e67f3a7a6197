// stepwise/src/namespace/mod.rs

//! Named collections of bindings that pipelines can be collected from.
//!
//! A `Namespace` plays the part of a loaded module: steps are *defined* in it
//! (bound under their own name) or *imported* from another namespace, possibly
//! under an alias. Bindings keep the order they were made in.

pub mod binding;
pub mod collector;

pub use binding::Binding;
pub use collector::collect_steps;

use crate::core::step::Step;
use crate::error::{StepwiseError, StepwiseResult};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Namespace {
  name: String,
  bindings: IndexMap<String, Binding>,
}

impl Namespace {
  pub fn new<N: Into<String>>(name: N) -> Self {
    Self {
      name: name.into(),
      bindings: IndexMap::new(),
    }
  }

  /// Dotted name of the namespace, e.g. `foo.bar`.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Binds `step` under its own name.
  pub fn define(mut self, step: Step) -> Self {
    self.bindings.insert(step.name().to_string(), Binding::Function(step));
    self
  }

  /// Binds anything under `name`. Rebinding a name replaces the old binding
  /// but keeps its position.
  pub fn bind<N: Into<String>, B: Into<Binding>>(mut self, name: N, binding: B) -> Self {
    self.bindings.insert(name.into(), binding.into());
    self
  }

  /// Copies `name` from `other`, bound as `alias` when given.
  pub fn import(self, other: &Namespace, name: &str, alias: Option<&str>) -> StepwiseResult<Self> {
    let binding = other.get(name).cloned().ok_or_else(|| StepwiseError::ImportName {
      module: other.name.clone(),
      name: name.to_string(),
    })?;
    Ok(self.bind(alias.unwrap_or(name), binding))
  }

  pub fn get(&self, name: &str) -> Option<&Binding> {
    self.bindings.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.bindings.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
    self.bindings.iter().map(|(k, v)| (k.as_str(), v))
  }
}
