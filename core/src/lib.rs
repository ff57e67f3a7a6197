// stepwise/src/lib.rs

//! Stepwise: a small, synchronous step pipeline engine for Rust.
//!
//! A pipeline is an ordered list of named steps. Running it:
//!  - hands each step only the state entries it declares, by name;
//!  - merges whatever a step returns back into the shared state;
//!  - carries a failing step's error in the state (`exc_info`) so that later
//!    handler steps can observe and recover from it instead of aborting the run;
//!  - can stop early, right after a named step.
//!
//! Pipelines are built from an explicit list of steps, from a `Namespace`, or
//! from a dotted name resolved through a `Loader`, and can be edited by
//! inserting or removing steps by name.

pub mod core;
pub mod error;
pub mod namespace;
pub mod pipeline;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::args::Args;
pub use crate::core::exc_info::{ExcInfo, ExcKind};
pub use crate::core::state::State;
pub use crate::core::step::{IntoOutput, Origin, Step};
pub use crate::core::value::{Value, Values};

pub use crate::namespace::{Binding, Namespace};
pub use crate::pipeline::{Pipeline, RunOptions};
pub use crate::registry::{Loader, ModuleRegistry};

pub use crate::error::{StepwiseError, StepwiseResult};

/*
    Core Workflow:
    1. Write steps with `Step::new(name, &["keys", "it", "needs"], |args| ...)`.
       A body returns `Ok(())` for "nothing to merge" or `Ok(Values)` to update the state.
    2. Build a `Pipeline` from a list of steps, or collect one from a `Namespace`
       (public function bindings, ordered by the line they were defined on).
    3. Optionally `insert_after` / `insert_before` / `remove` steps by name.
    4. `pipeline.run(Values::new().with("key", value))` returns the final `State`.
       Check `state.exc_info()` to see whether a step failure went unhandled.
*/
