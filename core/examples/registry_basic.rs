// stepwise/examples/registry_basic.rs

use stepwise::{Loader, ModuleRegistry, Namespace, Pipeline, Step, Values};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Module Registry Example ---");

  // 1. Create a registry
  let registry = ModuleRegistry::new();

  // 2. A shared module with a validation step
  registry.register_namespace(Namespace::new("checks").define(Step::new("validate_user", &["user_id"], |args| {
    let user_id = args.get::<String>("user_id")?;
    anyhow::ensure!(!user_id.is_empty(), "User ID cannot be empty");
    info!("User validated: {}", user_id);
    Ok(())
  })));

  // 3. A module built on first load, importing from `checks`
  registry.register("users.signup", |modules| {
    let checks = modules.load("checks")?;
    Ok(
      Namespace::new("users.signup")
        .import(&checks, "validate_user", None)?
        .define(Step::new("create_account", &["user_id"], |args| {
          let account = format!("account-for-{}", args.get::<String>("user_id")?);
          info!("Created {}", account);
          Ok(Values::new().with("account", account))
        }))
        .define(Step::new("_helper", &[], |_| Ok(()))),
    )
  });

  // 4. Build and run the pipeline by dotted name
  let pipeline = Pipeline::from_dotted_name(&registry, "users.signup")?;
  info!("Collected steps: {:?}", pipeline.names());

  let state = pipeline.run(Values::new().with("user_id", "alice".to_string()))?;
  info!("Account: {}", state.try_get::<String>("account")?);

  let state = pipeline.run(Values::new().with("user_id", String::new()))?;
  if let Some(exc_info) = state.exc_info() {
    info!("Signup failed as expected: {}", exc_info);
  }

  Ok(())
}
