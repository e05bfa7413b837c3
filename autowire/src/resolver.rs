//! How a binding produces its value.

use crate::container::Container;
use crate::core::Instance;
use crate::error::Result;
use crate::reflect::{Injectable, TypeRef};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The closure type behind [`Resolver::Factory`].
pub type FactoryFn = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

/// The construction strategy of a binding.
#[derive(Clone)]
pub enum Resolver {
  /// A closure that receives the container and returns the object.
  Factory(FactoryFn),
  /// A type that is auto-wired from its constructor metadata.
  Type(TypeRef),
}

impl Resolver {
  /// Wraps a factory closure. The closure may resolve other services from the
  /// container it is handed.
  pub fn factory<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Resolver::Factory(Arc::new(move |container: &Container| {
      factory(container).map(|value| Arc::new(value) as Instance)
    }))
  }

  /// A factory that returns an already type-erased instance, e.g. one that
  /// hands out an existing `Arc`.
  pub fn factory_instance<F>(factory: F) -> Self
  where
    F: Fn(&Container) -> Result<Instance> + Send + Sync + 'static,
  {
    Resolver::Factory(Arc::new(factory))
  }

  /// Auto-wires `T` using its [`Injectable`] metadata.
  pub fn of<T: Injectable + ?Sized>() -> Self {
    Resolver::Type(TypeRef::of::<T>())
  }

  /// Auto-wires the catalogued type called `name`.
  pub fn type_name(name: impl Into<String>) -> Self {
    Resolver::Type(TypeRef::named(name))
  }
}

impl fmt::Debug for Resolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Resolver::Factory(_) => f.write_str("Resolver::Factory(..)"),
      Resolver::Type(type_ref) => write!(f, "Resolver::Type({})", type_ref.name()),
    }
  }
}

/// A registered association between a name and a resolver.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
  pub(crate) resolver: Resolver,
  pub(crate) shared: bool,
}
