// tests/pipeline_definition_tests.rs
mod common;

use common::*;
use stepwise::{Binding, Pipeline, Step, StepwiseError};

#[test]
fn test_pipeline_can_be_built_from_an_explicit_list() {
  setup_tracing();
  let foo = Step::new("foo", &[], |_| Ok(()));
  let pipeline = Pipeline::new([foo.clone()]).unwrap();
  assert_eq!(pipeline.steps(), vec![foo]);
}

#[test]
fn test_explicit_list_keeps_order_and_identity() {
  setup_tracing();
  let a = set_val("a", 1);
  let b = set_val("b", 2);
  let c = set_val("c", 3);
  let pipeline = Pipeline::new([c.clone(), a.clone(), b.clone()]).unwrap();

  let steps = pipeline.steps();
  assert_eq!(steps, vec![c, a, b]);
  assert_eq!(pipeline.names(), vec!["c", "a", "b"]);

  // Same name and body, different step.
  let other_a = set_val("a", 1);
  assert_ne!(steps[1], other_a);
}

#[test]
fn test_pipeline_cant_be_built_from_a_string() {
  setup_tracing();
  let err = Pipeline::new(["foo.bar"]).unwrap_err();
  assert!(matches!(err, StepwiseError::InvalidStep { .. }));
  assert_eq!(err.to_string(), "Not a function: \"foo.bar\"");
}

#[test]
fn test_pipeline_rejects_classes_builtins_and_values() {
  setup_tracing();
  let step = set_val("ok", 1);

  let err = Pipeline::new(vec![Binding::from(step.clone()), Binding::class("Widget")]).unwrap_err();
  assert_eq!(err.to_string(), "Not a function: <class 'Widget'>");

  let err = Pipeline::new(vec![Binding::builtin("len")]).unwrap_err();
  assert_eq!(err.to_string(), "Not a function: <built-in function len>");

  let err = Pipeline::new(vec![Binding::value(42_u8)]).unwrap_err();
  assert_eq!(err.to_string(), "Not a function: 42");
}

#[test]
fn test_pipeline_rejects_duplicate_names() {
  setup_tracing();
  let err = Pipeline::new([set_val("same", 1), set_val("same", 2)]).unwrap_err();
  match err {
    StepwiseError::DuplicateStep { name } => assert_eq!(name, "same"),
    other => panic!("Expected DuplicateStep, got {:?}", other),
  }
}

#[test]
fn test_insert_after_places_step_right_after_target() {
  setup_tracing();
  let pipeline = Pipeline::from_namespace(&foo_module()).unwrap();
  pipeline.insert_after("bar", set_val("biz", 4)).unwrap();
  assert_eq!(pipeline.names(), vec!["bar", "biz", "baz", "buz"]);

  pipeline.insert_after("buz", set_val("end", 5)).unwrap();
  assert_eq!(pipeline.names(), vec!["bar", "biz", "baz", "buz", "end"]);
}

#[test]
fn test_insert_before_and_remove() {
  setup_tracing();
  let pipeline = Pipeline::from_namespace(&foo_module()).unwrap();
  pipeline.insert_before("bar", set_val("start", 0)).unwrap();
  assert_eq!(pipeline.names(), vec!["start", "bar", "baz", "buz"]);

  let removed = pipeline.remove("baz").unwrap();
  assert_eq!(removed.name(), "baz");
  assert_eq!(pipeline.names(), vec!["start", "bar", "buz"]);
  assert!(!pipeline.contains("baz"));
  assert_eq!(pipeline.len(), 3);
}

#[test]
fn test_structural_changes_on_unknown_step_fail() {
  setup_tracing();
  let pipeline = Pipeline::from_namespace(&foo_module()).unwrap();

  for err in [
    pipeline.insert_after("nope", set_val("x", 0)).unwrap_err(),
    pipeline.insert_before("nope", set_val("x", 0)).unwrap_err(),
    pipeline.remove("nope").unwrap_err(),
  ] {
    match err {
      StepwiseError::FunctionNotFound { name } => assert_eq!(name, "nope"),
      other => panic!("Expected FunctionNotFound, got {:?}", other),
    }
  }
  assert_eq!(pipeline.names(), vec!["bar", "baz", "buz"]);
}

#[test]
fn test_inserting_an_existing_name_fails() {
  setup_tracing();
  let pipeline = Pipeline::from_namespace(&foo_module()).unwrap();
  let err = pipeline.insert_after("bar", set_val("buz", 9)).unwrap_err();
  assert!(matches!(err, StepwiseError::DuplicateStep { ref name } if name == "buz"));
  assert_eq!(pipeline.len(), 3);
}

#[test]
fn test_clones_share_the_step_list() {
  setup_tracing();
  let pipeline = Pipeline::from_namespace(&foo_module()).unwrap();
  let handle = pipeline.clone();
  handle.insert_after("buz", set_val("biz", 4)).unwrap();

  assert!(Pipeline::ptr_eq(&pipeline, &handle));
  assert_eq!(pipeline.names(), vec!["bar", "baz", "buz", "biz"]);

  let other = Pipeline::from_namespace(&foo_module()).unwrap();
  assert!(!Pipeline::ptr_eq(&pipeline, &other));
}

#[test]
fn test_step_parameters_are_an_ordered_set() {
  let step = Step::new("s", &["b", "a", "b", "exc_info", "a"], |_| Ok(()));
  assert_eq!(step.params(), ["b", "a", "exc_info"]);
  assert!(step.declares("a"));
  assert!(step.is_handler());
  assert!(!set_val("plain", 1).is_handler());
}
