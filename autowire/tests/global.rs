//! Tests for the process-wide container and the `resolve!` macro.
//!
//! Every test here swaps the global container, so they run serially.

use fibre_autowire::{global, resolve, set_global, Container, Injectable, Resolver, TypeInfo};
use serial_test::serial;
use std::sync::Arc;

// --- Test Fixtures ---

struct MacroTestService {
  value: i32,
}

#[derive(Default)]
struct Clock;

impl Injectable for Clock {
  fn type_info() -> TypeInfo {
    TypeInfo::of_default::<Self>()
  }
}

struct UnregisteredService;

fn fresh_global() -> Arc<Container> {
  set_global(Container::new());
  global()
}

// --- Global Accessor Tests ---

#[test]
#[serial]
fn test_global_is_created_once() {
  let first = global();
  let second = global();

  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
#[serial]
fn test_set_global_replaces_container() {
  // Arrange
  let before = fresh_global();
  before.instance("marker", Arc::new(String::from("old")));

  // Act
  let replaced = set_global(Container::new());

  // Assert
  assert!(Arc::ptr_eq(&replaced, &before));
  assert!(!Arc::ptr_eq(&global(), &before));
  assert!(!global().has("marker"));
  // The previous container is not torn down.
  assert_eq!(*before.make::<String>("marker").unwrap(), "old");
}

#[test]
#[serial]
fn test_global_registrations_are_visible_everywhere() {
  fresh_global();
  global().singleton("answer", Resolver::factory(|_| Ok(MacroTestService { value: 42 })));

  let from_thread = std::thread::spawn(|| global().make::<MacroTestService>("answer").unwrap())
    .join()
    .unwrap();
  let here = global().make::<MacroTestService>("answer").unwrap();

  assert!(Arc::ptr_eq(&from_thread, &here));
}

// --- Macro Tests ---

#[test]
#[serial]
fn test_resolve_named_binding() {
  fresh_global();
  global().bind("named", Resolver::factory(|_| Ok(MacroTestService { value: 43 })));

  assert_eq!(resolve!(MacroTestService, "named").value, 43);
}

#[test]
#[serial]
fn test_resolve_evaluates_the_name_once() {
  fresh_global();
  global().bind("counted", Resolver::factory(|_| Ok(MacroTestService { value: 7 })));
  let mut lookups = 0;

  let service = resolve!(MacroTestService, {
    lookups += 1;
    "counted"
  });

  assert_eq!(service.value, 7);
  assert_eq!(lookups, 1);
}

#[test]
#[serial]
fn test_resolve_injectable_type() {
  fresh_global();

  let first = resolve!(Clock);
  let second = resolve!(Clock);

  // Unbound types are transient.
  assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
#[serial]
fn test_resolve_prefers_binding_for_type_name() {
  fresh_global();
  let seeded = Arc::new(Clock);
  global().instance("Clock", seeded.clone());

  assert!(Arc::ptr_eq(&resolve!(Clock), &seeded));
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required service with name 'missing'")]
fn test_resolve_panics_on_missing_service() {
  fresh_global();
  resolve!(UnregisteredService, "missing");
}
