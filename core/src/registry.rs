// stepwise/src/registry.rs

//! Resolving dotted names to namespaces.
//!
//! `Loader` is the seam `Pipeline::from_dotted_name` goes through.
//! `ModuleRegistry` is an in-memory loader: namespaces are registered up front,
//! either ready-made or as factories that build them on first load (and may
//! load other modules to import from them). Loaded namespaces are cached, so a
//! factory runs at most once per registry. A thread loading a module that
//! another thread is already building waits for that build to finish.

use crate::error::{StepwiseError, StepwiseResult};
use crate::namespace::Namespace;

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{event, instrument, Level};

/// Turns a dotted name into a namespace.
pub trait Loader: Send + Sync {
  fn load(&self, dotted_name: &str) -> StepwiseResult<Arc<Namespace>>;
}

type Factory = Arc<dyn Fn(&ModuleRegistry) -> anyhow::Result<Namespace> + Send + Sync + 'static>;

#[derive(Default)]
pub struct ModuleRegistry {
  factories: Mutex<HashMap<String, Factory>>,
  loaded: Mutex<HashMap<String, Arc<Namespace>>>,
  loading: Mutex<InFlight>,
  load_finished: Condvar,
}

/// Factories currently running, and which thread runs each.
#[derive(Default)]
struct InFlight {
  owners: HashMap<String, ThreadId>,
  // Module each loading thread is blocked on, if any.
  waiting: HashMap<ThreadId, String>,
}

impl InFlight {
  /// True when `me` waiting for `name` would close a loop of threads
  /// waiting on each other's modules.
  fn would_cycle(&self, name: &str, me: ThreadId) -> bool {
    let mut next = name;
    for _ in 0..=self.waiting.len() {
      match self.owners.get(next) {
        Some(owner) if *owner == me => return true,
        Some(owner) => match self.waiting.get(owner) {
          Some(module) => next = module,
          None => return false,
        },
        None => return false,
      }
    }
    false
  }
}

/// Releases a module's in-flight entry, even if its factory panics.
struct LoadingGuard<'a> {
  registry: &'a ModuleRegistry,
  name: &'a str,
}

impl Drop for LoadingGuard<'_> {
  fn drop(&mut self) {
    self.registry.loading.lock().owners.remove(self.name);
    self.registry.load_finished.notify_all();
  }
}

impl ModuleRegistry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a ready-made namespace under its own name.
  pub fn register_namespace(&self, namespace: Namespace) {
    let name = namespace.name().to_string();
    event!(Level::DEBUG, module = %name, "Registering namespace.");
    self.factories.lock().remove(&name);
    self.loaded.lock().insert(name, Arc::new(namespace));
  }

  /// Registers a factory that builds the namespace for `name` on first load.
  pub fn register<N, F>(&self, name: N, factory: F)
  where
    N: Into<String>,
    F: Fn(&ModuleRegistry) -> anyhow::Result<Namespace> + Send + Sync + 'static,
  {
    let name: String = name.into();
    event!(Level::DEBUG, module = %name, "Registering module factory.");
    self.loaded.lock().remove(&name);
    self.factories.lock().insert(name, Arc::new(factory));
  }

  pub fn is_loaded(&self, name: &str) -> bool {
    self.loaded.lock().contains_key(name)
  }

  /// Drops the cached namespace for `name`; a registered factory will run
  /// again on the next load. Ready-made namespaces are gone for good.
  pub fn unload(&self, name: &str) -> bool {
    self.loaded.lock().remove(name).is_some()
  }

  #[instrument(name = "ModuleRegistry::load", skip(self), err(Display))]
  fn load_module(&self, name: &str) -> StepwiseResult<Arc<Namespace>> {
    if let Some(namespace) = self.loaded.lock().get(name).cloned() {
      event!(Level::TRACE, "Module already loaded.");
      return Ok(namespace);
    }

    let factory = self.factories.lock().get(name).cloned().ok_or_else(|| {
      event!(Level::ERROR, "No module registered under this name.");
      StepwiseError::ModuleNotFound { name: name.to_string() }
    })?;

    let me = thread::current().id();
    {
      let mut in_flight = self.loading.lock();
      loop {
        // Checked under the in-flight lock: a finished load is cached before
        // its entry is released.
        if let Some(namespace) = self.loaded.lock().get(name).cloned() {
          return Ok(namespace);
        }
        if !in_flight.owners.contains_key(name) {
          in_flight.owners.insert(name.to_string(), me);
          break;
        }
        if in_flight.would_cycle(name, me) {
          return Err(StepwiseError::ImportCycle { name: name.to_string() });
        }
        event!(Level::DEBUG, "Module is being loaded by another thread; waiting.");
        in_flight.waiting.insert(me, name.to_string());
        self.load_finished.wait(&mut in_flight);
        in_flight.waiting.remove(&me);
      }
    }
    let _guard = LoadingGuard { registry: self, name };

    // No lock is held while the factory runs: it may load other modules.
    let namespace = factory(self).map_err(|source| StepwiseError::ModuleLoad {
      name: name.to_string(),
      source,
    })?;

    event!(Level::DEBUG, bindings = namespace.len(), "Module loaded.");
    let namespace = self
      .loaded
      .lock()
      .entry(name.to_string())
      .or_insert_with(|| Arc::new(namespace))
      .clone();
    Ok(namespace)
  }
}

impl Loader for ModuleRegistry {
  fn load(&self, dotted_name: &str) -> StepwiseResult<Arc<Namespace>> {
    self.load_module(dotted_name)
  }
}
