// stepwise/examples/error_handling.rs

use stepwise::{Pipeline, Step, Values};
use tracing::{info, warn};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  let pipeline = Pipeline::new([
    Step::new("step_one", &[], |_| {
      info!("Executing step_one");
      Ok(Values::new().with("processed", vec!["step_one".to_string()]))
    }),
    Step::new("step_two_fails", &[], |_| {
      info!("Executing step_two_fails - this will error");
      Err::<(), _>(ExampleAppError::CustomError("Something went wrong in step_two!".to_string()).into())
    }),
    Step::new("step_three", &["processed"], |_| {
      // Skipped: an error is pending and this step doesn't take `exc_info`.
      warn!("Executing step_three (should not be reached)");
      Ok(())
    }),
    Step::new("recover", &["exc_info", "processed"], |args| {
      let mut processed: Vec<String> = args.cloned("processed")?;
      if let Some(exc_info) = args.exc_info()? {
        info!("Recovering from {}", exc_info);
        processed.push(format!("recovered from {}", exc_info.step_name()));
      }
      Ok(Values::new().with("processed", processed))
    }),
    Step::new("step_four", &["processed"], |args| {
      let mut processed: Vec<String> = args.cloned("processed")?;
      processed.push("step_four".to_string());
      Ok(Values::new().with("processed", processed))
    }),
  ])?;

  let state = pipeline.run(Values::new())?;
  info!("Processed: {:?}", state.try_get::<Vec<String>>("processed")?);
  assert!(state.exc_info().is_none());
  assert_eq!(
    state.get::<Vec<String>>("processed"),
    Some(&vec![
      "step_one".to_string(),
      "recovered from step_two_fails".to_string(),
      "step_four".to_string(),
    ])
  );

  // Without the handler the error is still there at the end.
  pipeline.remove("recover")?;
  let state = pipeline.run(Values::new())?;
  match state.exc_info() {
    Some(exc_info) => info!("Pipeline finished with unhandled error: {}", exc_info),
    None => warn!("Pipeline unexpectedly finished cleanly"),
  }
  assert!(state
    .exc_info()
    .and_then(|e| e.downcast_ref::<ExampleAppError>())
    .is_some());

  Ok(())
}
