pub mod args;
pub mod exc_info;
pub mod state;
pub mod step;
pub mod value;

// Re-export key types for easier access from other modules (and lib.rs)
pub use args::Args;
pub use exc_info::{ExcInfo, ExcKind};
pub use state::State;
pub use step::{IntoOutput, Origin, Step, StepFn};
pub use value::{Value, Values};
