//! The process-wide container and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

// Created empty on first access. `set_global` swaps the whole container out.
static GLOBAL_CONTAINER: Lazy<RwLock<Arc<Container>>> =
  Lazy::new(|| RwLock::new(Arc::new(Container::default())));

/// Returns the process-wide container, creating an empty one on first use.
///
/// Prefer passing a [`Container`] explicitly to the code that needs it; the
/// global slot exists for call sites where that is impractical.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, Resolver};
///
/// global().singleton("greeting", Resolver::factory(|_| Ok(String::from("Hello from global!"))));
/// let greeting = global().make::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "Hello from global!");
/// ```
pub fn global() -> Arc<Container> {
  GLOBAL_CONTAINER.read().clone()
}

/// Replaces the process-wide container and returns the previous one.
///
/// Nothing is torn down: whoever still holds the previous container keeps
/// using it, and its shared instances live as long as it does.
pub fn set_global(container: impl Into<Arc<Container>>) -> Arc<Container> {
  std::mem::replace(&mut *GLOBAL_CONTAINER.write(), container.into())
}
