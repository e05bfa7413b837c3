use fibre_autowire::{global, resolve, BuildError, ContainerError, Injectable, TypeInfo};
use std::panic;

struct UnregisteredService;

// A mailer that cannot be built without a host.
struct Mailer {
  host: String,
}

impl Injectable for Mailer {
  fn type_info() -> TypeInfo {
    TypeInfo::constructor(Self::type_name())
      .scalar("host")
      .build(|deps| Ok(Mailer { host: deps.value("host")? }))
  }
}

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService, "unregistered");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `make()` method ---
  println!("\nNow, attempting to resolve using the fallible `make()` method...");

  match global().make::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }

  // --- Auto-wiring failures name what is missing ---
  match global().make_type::<Mailer>() {
    Ok(mailer) => panic!("Should not have built a mailer for {}", mailer.host),
    Err(ContainerError::Build(BuildError::MissingParameter { parameter, .. })) => {
      println!("Mailer needs an explicit value for `{}`.", parameter);
      assert_eq!(parameter, "host");
    }
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
