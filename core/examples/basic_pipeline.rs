// stepwise/examples/basic_pipeline.rs

use stepwise::{Pipeline, Step, StepwiseError, Values};
use tracing::info;

fn main() -> Result<(), StepwiseError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 1. Define the steps. Each one names the state keys it needs.
  let alpha = Step::new("step_alpha", &["counter"], |args| {
    let counter = args.get::<i32>("counter")? + 1;
    info!("Alpha executed: counter = {}", counter);
    Ok(Values::new().with("counter", counter))
  });

  let beta = Step::new("step_beta", &["counter"], |args| {
    let counter = args.get::<i32>("counter")? * 2;
    info!("Beta executed: counter = {}", counter);
    Ok(Values::new().with("counter", counter))
  });

  let gamma = Step::new("step_gamma", &["counter"], |args| {
    let counter = args.get::<i32>("counter")? - 1;
    info!("Gamma executed: counter = {}", counter);
    Ok(Values::new().with("counter", counter))
  });

  // 2. Build the pipeline from an explicit list
  let pipeline = Pipeline::new([alpha, beta, gamma])?;

  // 3. Run it
  info!("Starting pipeline execution...");
  let state = pipeline.run(Values::new().with("counter", 5))?;

  // Expected: (5+1)*2 - 1 = 11
  let counter = state.try_get::<i32>("counter")?;
  info!("Final counter value: {}", counter);
  assert_eq!(*counter, 11);

  // 4. Partial run: stop after step_beta
  let partial = pipeline.run_through(Values::new().with("counter", 5), "step_beta")?;
  info!("Counter after step_beta: {}", partial.try_get::<i32>("counter")?);
  assert_eq!(partial.get::<i32>("counter"), Some(&12));

  // 5. Insert a step and run again
  pipeline.insert_after(
    "step_gamma",
    Step::new("step_delta", &["counter"], |args| {
      Ok(Values::new().with("counter", args.get::<i32>("counter")? * 10))
    }),
  )?;
  let state = pipeline.run(Values::new().with("counter", 5))?;
  info!("Steps: {:?}, final counter: {}", pipeline.names(), state.try_get::<i32>("counter")?);
  assert_eq!(state.get::<i32>("counter"), Some(&110));

  Ok(())
}
