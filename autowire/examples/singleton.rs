use fibre_autowire::{global, resolve, Injectable, Resolver, TypeInfo};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static CONNECTIONS_OPENED: AtomicUsize = AtomicUsize::new(0);

// --- Injectable Types ---

// Opening a pool is expensive, so the application wants exactly one.
struct Pool {
  serial: usize,
}

impl Injectable for Pool {
  fn type_info() -> TypeInfo {
    TypeInfo::no_constructor(Self::type_name(), || Pool {
      serial: CONNECTIONS_OPENED.fetch_add(1, Ordering::SeqCst),
    })
  }
}

// A unit of work per request, always built fresh around the shared pool.
struct UnitOfWork {
  pool: Arc<Pool>,
}

impl Injectable for UnitOfWork {
  fn type_info() -> TypeInfo {
    TypeInfo::constructor(Self::type_name())
      .class::<Pool>("pool")
      .build(|deps| Ok(UnitOfWork { pool: deps.get("pool")? }))
  }
}

fn main() {
  // Both names auto-wire from metadata. Only the binding kind differs.
  global().singleton("pool", Resolver::of::<Pool>());
  global().bind("unit_of_work", Resolver::of::<UnitOfWork>());

  println!("--- Shared type binding ---");
  let p1 = resolve!(Pool, "pool");
  let p2 = resolve!(Pool, "pool");
  println!("pool serials: {} and {}", p1.serial, p2.serial);
  assert!(Arc::ptr_eq(&p1, &p2));
  assert!(global().is_resolved("pool"));

  println!("--- Transient type binding ---");
  let u1 = resolve!(UnitOfWork, "unit_of_work");
  let u2 = resolve!(UnitOfWork, "unit_of_work");
  assert!(!Arc::ptr_eq(&u1, &u2));
  println!(
    "two units of work on pools {} and {}",
    u1.pool.serial, u2.pool.serial
  );

  // Auto-wiring builds class parameters directly. It does not go through the
  // `pool` binding, so each unit of work got a pool of its own.
  assert!(!Arc::ptr_eq(&u1.pool, &p1));
  println!("{} pools opened in total", CONNECTIONS_OPENED.load(Ordering::SeqCst));
}
