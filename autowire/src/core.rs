//! Core, non-public data structures for the container.

use crate::error::{ContainerError, Result};
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A type-erased, shareable object produced or stored by the container.
pub type Instance = Arc<dyn Any + Send + Sync>;

static NEXT_CONTAINER_ID: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn next_container_id() -> usize {
  NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed)
}

thread_local! {
  // Everything currently being resolved on this thread, outermost first.
  // Entries from different containers are kept apart by `ResolutionKey::container`.
  static RESOLVING_STACK: RefCell<Vec<ResolutionKey>> = const { RefCell::new(Vec::new()) };
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum KeyKind {
  /// A binding whose factory is running.
  Binding,
  /// A type whose constructor dependencies are being assembled.
  Type,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct ResolutionKey {
  pub(crate) container: usize,
  pub(crate) kind: KeyKind,
  pub(crate) name: String,
  // Set for types described by `Injectable`, so same-named types stay apart.
  pub(crate) type_id: Option<TypeId>,
}

impl ResolutionKey {
  pub(crate) fn binding(container: usize, name: &str) -> Self {
    Self {
      container,
      kind: KeyKind::Binding,
      name: name.to_owned(),
      type_id: None,
    }
  }

  pub(crate) fn of_type(container: usize, name: &str, type_id: Option<TypeId>) -> Self {
    Self {
      container,
      kind: KeyKind::Type,
      name: name.to_owned(),
      type_id,
    }
  }
}

impl fmt::Debug for ResolutionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      KeyKind::Binding => write!(f, "Key(Container({}), Binding({}))", self.container, self.name),
      KeyKind::Type => write!(f, "Key(Container({}), Type({}))", self.container, self.name),
    }
  }
}

/// An RAII guard that turns runaway recursion into an error.
///
/// Entering pushes a key onto the thread-local resolution stack. If the key is
/// already on the stack the request is circular; if the container already has
/// `max_depth` frames on the stack the request is too deep. Dropping the guard
/// pops the key again, including when resolution bails out early with `?`.
pub(crate) struct ResolutionGuard {
  key: ResolutionKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: ResolutionKey, max_depth: usize) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let frames = stack.iter().filter(|k| k.container == key.container);

      if stack.contains(&key) {
        let mut chain: Vec<String> = frames
          .skip_while(|k| **k != key)
          .map(|k| k.name.clone())
          .collect();
        chain.push(key.name.clone());
        return Err(ContainerError::CircularDependency {
          name: key.name.clone(),
          chain,
        });
      }

      if frames.count() >= max_depth {
        return Err(ContainerError::DepthExceeded {
          name: key.name.clone(),
          limit: max_depth,
        });
      }

      stack.push(key.clone());
      Ok(())
    })?;
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack.iter().rposition(|k| *k == self.key) {
        stack.remove(pos);
      }
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guard_pops_on_drop() {
    let id = next_container_id();
    {
      let _outer = ResolutionGuard::enter(ResolutionKey::of_type(id, "A", None), 8).unwrap();
      let _inner = ResolutionGuard::enter(ResolutionKey::of_type(id, "B", None), 8).unwrap();
    }
    // Both frames are gone, so entering A again is not circular.
    assert!(ResolutionGuard::enter(ResolutionKey::of_type(id, "A", None), 8).is_ok());
  }

  #[test]
  fn reentering_a_key_reports_the_cycle() {
    let id = next_container_id();
    let _a = ResolutionGuard::enter(ResolutionKey::of_type(id, "A", None), 8).unwrap();
    let _b = ResolutionGuard::enter(ResolutionKey::of_type(id, "B", None), 8).unwrap();

    match ResolutionGuard::enter(ResolutionKey::of_type(id, "A", None), 8) {
      Err(ContainerError::CircularDependency { name, chain }) => {
        assert_eq!(name, "A");
        assert_eq!(chain, vec!["A", "B", "A"]);
      }
      other => panic!("expected a circular dependency, got {:?}", other.err()),
    }
  }

  #[test]
  fn binding_and_type_keys_do_not_collide() {
    let id = next_container_id();
    let _binding = ResolutionGuard::enter(ResolutionKey::binding(id, "Service"), 8).unwrap();
    assert!(ResolutionGuard::enter(ResolutionKey::of_type(id, "Service", None), 8).is_ok());
  }

  #[test]
  fn same_named_types_do_not_collide() {
    mod left {
      pub struct Config;
    }
    mod right {
      pub struct Config;
    }

    let id = next_container_id();
    let left = Some(TypeId::of::<left::Config>());
    let right = Some(TypeId::of::<right::Config>());
    let _outer = ResolutionGuard::enter(ResolutionKey::of_type(id, "Config", left), 8).unwrap();
    assert!(ResolutionGuard::enter(ResolutionKey::of_type(id, "Config", right), 8).is_ok());
    assert!(matches!(
      ResolutionGuard::enter(ResolutionKey::of_type(id, "Config", left), 8),
      Err(ContainerError::CircularDependency { .. })
    ));
  }

  #[test]
  fn other_containers_do_not_count_towards_depth() {
    let first = next_container_id();
    let second = next_container_id();
    let _a = ResolutionGuard::enter(ResolutionKey::of_type(first, "A", None), 1).unwrap();
    assert!(ResolutionGuard::enter(ResolutionKey::of_type(second, "A", None), 1).is_ok());
  }

  #[test]
  fn depth_limit_is_enforced() {
    let id = next_container_id();
    let _a = ResolutionGuard::enter(ResolutionKey::of_type(id, "A", None), 2).unwrap();
    let _b = ResolutionGuard::enter(ResolutionKey::of_type(id, "B", None), 2).unwrap();
    assert!(matches!(
      ResolutionGuard::enter(ResolutionKey::of_type(id, "C", None), 2),
      Err(ContainerError::DepthExceeded { limit: 2, .. })
    ));
  }
}
