use fibre_autowire::{Args, Container, Injectable, Resolver, TypeInfo};
use std::sync::Arc;

// --- Injectable Types ---
struct Repository {
  table: &'static str,
}

impl Injectable for Repository {
  fn type_info() -> TypeInfo {
    TypeInfo::no_constructor(Self::type_name(), || Repository { table: "users" })
  }
}

struct Service {
  repo: Arc<Repository>,
  name: String,
}

impl Injectable for Service {
  fn type_info() -> TypeInfo {
    TypeInfo::constructor(Self::type_name())
      .class::<Repository>("repo")
      .scalar_or("name", String::from("default"))
      .build(|deps| {
        Ok(Service {
          repo: deps.get("repo")?,
          name: deps.value("name")?,
        })
      })
  }
}

fn main() {
  let container = Container::new();
  container.register_type::<Service>();

  // --- Zero configuration ---
  // Nothing is bound, yet `Service` and its `Repository` are built from metadata.
  let service = container.make::<Service>("Service").unwrap();
  println!("{} service reads from '{}'", service.name, service.repo.table);
  assert_eq!(service.name, "default");

  // --- Explicit arguments ---
  // Arguments override auto-wiring for parameters of the same name.
  let args = Args::new().with("name", String::from("billing"));
  let billing = container.make_with::<Service>("Service", &args).unwrap();
  println!("{} service reads from '{}'", billing.name, billing.repo.table);
  assert_eq!(billing.name, "billing");

  // --- Shared auto-wired binding ---
  container.singleton("service", Resolver::of::<Service>());
  let a = container.make::<Service>("service").unwrap();
  let b = container.make::<Service>("service").unwrap();
  assert!(Arc::ptr_eq(&a, &b));
  println!("The shared binding hands out one instance.");
}
