//! Constructor metadata used for auto-wiring.
//!
//! Rust has no runtime reflection, so every type that should be built by the
//! container describes its own constructor: its parameters in declaration
//! order, what each one depends on, and how to invoke it once the
//! dependencies are assembled. Types usually do this by implementing
//! [`Injectable`]; name-only types can be catalogued with
//! [`Container::register_type_info`](crate::Container::register_type_info).
//!
//! ```
//! use fibre_autowire::{Container, Injectable, TypeInfo};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Repository;
//!
//! impl Injectable for Repository {
//!   fn type_info() -> TypeInfo {
//!     TypeInfo::of_default::<Self>()
//!   }
//! }
//!
//! struct Service {
//!   repo: Arc<Repository>,
//!   name: String,
//! }
//!
//! impl Injectable for Service {
//!   fn type_info() -> TypeInfo {
//!     TypeInfo::constructor(Self::type_name())
//!       .class::<Repository>("repo")
//!       .scalar_or("name", String::from("default"))
//!       .build(|deps| {
//!         Ok(Service {
//!           repo: deps.get("repo")?,
//!           name: deps.value("name")?,
//!         })
//!       })
//!   }
//! }
//!
//! let container = Container::new();
//! let service = container.build_type::<Service>().unwrap();
//! assert_eq!(service.name, "default");
//! ```

use crate::args::Dependencies;
use crate::core::Instance;
use crate::error::Result;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Returns the metadata of a type on demand.
pub type Reflect = fn() -> TypeInfo;

pub(crate) type ConstructorFn = Arc<dyn Fn(Dependencies) -> Result<Instance> + Send + Sync>;
pub(crate) type InstantiateFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// A type the container knows how to describe and, if concrete, construct.
pub trait Injectable: 'static {
  /// The name the type is catalogued under. Defaults to the type's name
  /// without module paths, e.g. `Service` for `my_app::services::Service`.
  fn type_name() -> String {
    short_type_name::<Self>()
  }

  fn type_info() -> TypeInfo;
}

/// Strips module paths from `std::any::type_name`, keeping generics intact:
/// `alloc::vec::Vec<app::User>` becomes `Vec<User>`.
pub fn short_type_name<T: ?Sized>() -> String {
  let full = std::any::type_name::<T>();
  let mut out = String::with_capacity(full.len());
  let mut segment_start = 0;
  let mut chars = full.chars().peekable();

  while let Some(c) = chars.next() {
    if c == ':' && chars.peek() == Some(&':') {
      chars.next();
      out.truncate(segment_start);
    } else {
      out.push(c);
      if !(c.is_alphanumeric() || c == '_') {
        segment_start = out.len();
      }
    }
  }
  out
}

/// A reference to a type, by name and optionally with its metadata attached.
///
/// A reference without metadata is looked up in the container's type
/// catalogue when it is resolved.
#[derive(Clone)]
pub struct TypeRef {
  name: String,
  reflect: Option<(Reflect, TypeId)>,
}

impl TypeRef {
  pub fn of<T: Injectable + ?Sized>() -> Self {
    Self {
      name: T::type_name(),
      reflect: Some((T::type_info as Reflect, TypeId::of::<T>())),
    }
  }

  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      reflect: None,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The attached metadata, stamped with the identity of the type it describes.
  pub(crate) fn reflect(&self) -> Option<TypeInfo> {
    self
      .reflect
      .map(|(reflect, type_id)| reflect().with_type_id(type_id))
  }
}

impl fmt::Debug for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeRef")
      .field("name", &self.name)
      .field("has_metadata", &self.reflect.is_some())
      .finish()
  }
}

/// What a constructor parameter depends on.
#[derive(Debug, Clone)]
pub enum ParamKind {
  /// Another type, built recursively.
  Class(TypeRef),
  /// A plain value that has to come from explicit arguments or a default.
  Scalar,
}

/// One constructor parameter.
#[derive(Clone)]
pub struct Param {
  name: String,
  kind: ParamKind,
  default: Option<Instance>,
}

impl Param {
  pub fn class<T: Injectable + ?Sized>(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParamKind::Class(TypeRef::of::<T>()),
      default: None,
    }
  }

  /// A class parameter whose type is only known by name.
  pub fn class_named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParamKind::Class(TypeRef::named(type_name)),
      default: None,
    }
  }

  pub fn scalar(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParamKind::Scalar,
      default: None,
    }
  }

  /// Declares a default value. Only scalar parameters fall back to it;
  /// class parameters are always built.
  pub fn with_default<T: Any + Send + Sync>(mut self, value: T) -> Self {
    self.default = Some(Arc::new(value));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &ParamKind {
    &self.kind
  }

  pub fn default_value(&self) -> Option<&Instance> {
    self.default.as_ref()
  }
}

impl fmt::Debug for Param {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Param")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("has_default", &self.default.is_some())
      .finish()
  }
}

pub(crate) enum Shape {
  Abstract,
  Interface,
  NoConstructor(InstantiateFn),
  Constructor {
    params: Vec<Param>,
    invoke: ConstructorFn,
  },
}

/// Everything the container needs to know to construct a type.
pub struct TypeInfo {
  name: String,
  type_id: Option<TypeId>,
  shape: Shape,
}

impl TypeInfo {
  /// An abstract type. Building it fails with `NotInstantiable`.
  pub fn abstract_type(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_id: None,
      shape: Shape::Abstract,
    }
  }

  /// An interface, e.g. a trait object type. Building it fails with `NotInstantiable`.
  pub fn interface(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_id: None,
      shape: Shape::Interface,
    }
  }

  /// A type without constructor parameters, created by `instantiate`.
  pub fn no_constructor<T, F>(name: impl Into<String>, instantiate: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self {
      name: name.into(),
      type_id: None,
      shape: Shape::NoConstructor(Arc::new(move || Arc::new(instantiate()) as Instance)),
    }
  }

  /// A parameterless type created through its `Default` impl.
  pub fn of_default<T>() -> Self
  where
    T: Injectable + Default + Send + Sync,
  {
    Self::no_constructor(T::type_name(), T::default)
  }

  /// Starts describing a constructor with parameters.
  pub fn constructor(name: impl Into<String>) -> ConstructorBuilder {
    ConstructorBuilder {
      name: name.into(),
      params: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_instantiable(&self) -> bool {
    !matches!(self.shape, Shape::Abstract | Shape::Interface)
  }

  /// The constructor parameters in declaration order, if there is a constructor.
  pub fn params(&self) -> Option<&[Param]> {
    match &self.shape {
      Shape::Constructor { params, .. } => Some(params),
      _ => None,
    }
  }

  /// The Rust type this metadata belongs to. `None` for metadata that was
  /// registered by name only.
  pub(crate) fn type_id(&self) -> Option<TypeId> {
    self.type_id
  }

  pub(crate) fn with_type_id(mut self, type_id: TypeId) -> Self {
    self.type_id = Some(type_id);
    self
  }

  pub(crate) fn shape(&self) -> &Shape {
    &self.shape
  }
}

impl fmt::Debug for TypeInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let shape = match &self.shape {
      Shape::Abstract => "Abstract",
      Shape::Interface => "Interface",
      Shape::NoConstructor(_) => "NoConstructor",
      Shape::Constructor { .. } => "Constructor",
    };
    f.debug_struct("TypeInfo")
      .field("name", &self.name)
      .field("shape", &shape)
      .field("params", &self.params())
      .finish()
  }
}

/// Builder returned by [`TypeInfo::constructor`].
pub struct ConstructorBuilder {
  name: String,
  params: Vec<Param>,
}

impl ConstructorBuilder {
  pub fn param(mut self, param: Param) -> Self {
    self.params.push(param);
    self
  }

  pub fn class<T: Injectable + ?Sized>(self, name: impl Into<String>) -> Self {
    self.param(Param::class::<T>(name))
  }

  pub fn class_named(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
    self.param(Param::class_named(name, type_name))
  }

  pub fn scalar(self, name: impl Into<String>) -> Self {
    self.param(Param::scalar(name))
  }

  pub fn scalar_or<T: Any + Send + Sync>(self, name: impl Into<String>, default: T) -> Self {
    self.param(Param::scalar(name).with_default(default))
  }

  /// Finishes the description. `invoke` receives the resolved parameters in
  /// declaration order.
  pub fn build<T, F>(self, invoke: F) -> TypeInfo
  where
    T: Any + Send + Sync,
    F: Fn(Dependencies) -> Result<T> + Send + Sync + 'static,
  {
    TypeInfo {
      name: self.name,
      type_id: None,
      shape: Shape::Constructor {
        params: self.params,
        invoke: Arc::new(move |deps: Dependencies| {
          invoke(deps).map(|value| Arc::new(value) as Instance)
        }),
      },
    }
  }
}
