// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use stepwise::{Namespace, Step, Values};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test step failed: {0}")]
  Step(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

// --- Common Step Creators ---

/// A step that sets `val` to `val`.
pub fn set_val(name: &'static str, val: i32) -> Step {
  Step::new(name, &[], move |_| {
    tracing::debug!(target: "test_steps", step = name, val, "setting val");
    Ok(Values::new().with("val", val))
  })
}

/// A step that records its name under `trail`.
pub fn record(name: &'static str) -> Step {
  Step::new(name, &["trail"], move |args| {
    let mut trail: Vec<String> = args.cloned("trail")?;
    trail.push(name.to_string());
    Ok(Values::new().with("trail", trail))
  })
}

/// A step that always fails with `TestError::Step`.
pub fn failing(name: &'static str, message: &'static str) -> Step {
  Step::new(name, &[], move |_| {
    tracing::warn!(target: "test_steps", step = name, "failing with: '{}'", message);
    Err::<(), _>(TestError::Step(message.to_string()).into())
  })
}

/// A handler that records its name under `trail` and notes the error it saw.
pub fn recording_handler(name: &'static str) -> Step {
  Step::new(name, &["exc_info", "trail"], move |args| {
    let seen = args.exc_info()?.map(|e| e.message());
    let mut trail: Vec<String> = args.cloned("trail")?;
    trail.push(name.to_string());
    Ok(Values::new().with("trail", trail).with("seen", seen))
  })
}

/// The `foo` module: `bar`, `baz` and `buz` on lines 1 to 3, each setting `val`.
pub fn foo_module() -> Namespace {
  Namespace::new("foo")
    .define(set_val("bar", 1).at("foo.rs", 1))
    .define(set_val("baz", 2).at("foo.rs", 2))
    .define(set_val("buz", 3).at("foo.rs", 3))
}

pub fn empty_trail() -> Values {
  Values::new().with("trail", Vec::<String>::new())
}

pub fn trail(state: &stepwise::State) -> Vec<String> {
  state.get::<Vec<String>>("trail").cloned().unwrap_or_default()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static STEP_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static FACTORY_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STEP_EXEC_COUNTER.store(0, Ordering::SeqCst);
  FACTORY_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

/// A step that bumps `STEP_EXEC_COUNTER` and returns nothing.
pub fn counting(name: &'static str) -> Step {
  Step::new(name, &[], |_| {
    STEP_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    Ok(())
  })
}
