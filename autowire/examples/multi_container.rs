use fibre_autowire::{Container, ContainerConfig, Resolver};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct Clock {
  now: u64,
}

// Production wiring: the clock reads the system time on every request.
fn configure(container: &Container) {
  container.bind(
    "clock",
    Resolver::factory(|_| {
      let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
      Ok(Clock { now })
    }),
  );
}

fn main() {
  let production = Container::new();
  configure(&production);

  // A second, shallower container for a test run with the same wiring.
  let fixture = Container::with_config(ContainerConfig::new().with_max_depth(8));
  configure(&fixture);

  // --- Shadowing a binding with an instance ---
  // A stored instance wins over whatever is bound to the same name.
  let frozen = Arc::new(Clock { now: 1_700_000_000 });
  fixture.instance("clock", frozen.clone());

  let fixed = fixture.make::<Clock>("clock").unwrap();
  assert!(Arc::ptr_eq(&fixed, &frozen));
  println!("fixture clock: {}", fixed.now);

  // The production container is untouched and still runs its factory.
  let live = production.make::<Clock>("clock").unwrap();
  assert!(!production.is_resolved("clock"));
  println!("production clock: {}", live.now);

  // --- Dropping the shadow ---
  // Forgetting the instance lets the binding take over again.
  fixture.forget_instance("clock");
  let unfrozen = fixture.make::<Clock>("clock").unwrap();
  assert_ne!(*unfrozen, *frozen);
  println!("fixture clock after forget: {}", unfrozen.now);
}
