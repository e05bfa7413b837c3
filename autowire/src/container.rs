//! The main `Container` struct and its associated methods.

use crate::args::{Args, Dependencies};
use crate::config::ContainerConfig;
use crate::core::{next_container_id, Instance, ResolutionGuard, ResolutionKey};
use crate::error::{BuildError, ContainerError, ReflectionError, Result};
use crate::reflect::{Injectable, Param, ParamKind, Shape, TypeInfo, TypeRef};
use crate::resolver::{Binding, Resolver};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The dependency injection container.
///
/// Holds named bindings, the cache of shared instances, and a catalogue of
/// type metadata used to auto-wire types that were never bound. All methods
/// take `&self`, so a container can be shared behind an `Arc` and factories
/// can resolve further services from the container they are handed.
pub struct Container {
  id: usize,
  config: ContainerConfig,
  bindings: DashMap<String, Binding>,
  shared: DashMap<String, Instance>,
  types: DashMap<String, Arc<TypeInfo>>,
}

impl Default for Container {
  fn default() -> Self {
    Self::with_config(ContainerConfig::default())
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      id: next_container_id(),
      config,
      bindings: DashMap::new(),
      shared: DashMap::new(),
      types: DashMap::new(),
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- PRIVATE HELPERS ---

  fn bind_internal(&self, name: String, resolver: Resolver, shared: bool) {
    trace!(name = %name, ?resolver, shared, "registering binding");
    if let Some(previous) = self.bindings.insert(name.clone(), Binding { resolver, shared }) {
      debug!(
        name = %name,
        previous = ?previous.resolver,
        "overwrote existing binding"
      );
    }
  }

  /// Finds the metadata behind a type reference. References that carry their
  /// own metadata always use it, and are catalogued under their name only if
  /// that name is still free.
  fn lookup_type(&self, type_ref: &TypeRef) -> Option<Arc<TypeInfo>> {
    match type_ref.reflect() {
      Some(info) => {
        let info = Arc::new(info);
        self
          .types
          .entry(type_ref.name().to_owned())
          .or_insert_with(|| info.clone());
        Some(info)
      }
      None => self.types.get(type_ref.name()).map(|entry| entry.value().clone()),
    }
  }

  fn build_ref(&self, type_ref: &TypeRef, args: &Args) -> Result<Instance> {
    let info = self
      .lookup_type(type_ref)
      .ok_or_else(|| ContainerError::UnknownType(type_ref.name().to_owned()))?;
    self.build_from(&info, args)
  }

  fn build_from(&self, info: &TypeInfo, args: &Args) -> Result<Instance> {
    let type_name = info.name();

    match info.shape() {
      Shape::Abstract | Shape::Interface => {
        Err(ContainerError::NotInstantiable(type_name.to_owned()))
      }
      Shape::NoConstructor(instantiate) => {
        trace!(type_name, "instantiating type without constructor");
        Ok(instantiate())
      }
      Shape::Constructor { params, invoke } => {
        let _guard = ResolutionGuard::enter(
          ResolutionKey::of_type(self.id, type_name, info.type_id()),
          self.config.max_depth,
        )?;
        trace!(type_name, params = params.len(), "auto-wiring constructor");

        let mut values = Vec::with_capacity(params.len());
        for param in params {
          let value = self.resolve_param(type_name, param, args)?;
          values.push((param.name().to_owned(), value));
        }
        invoke(Dependencies::new(type_name, values))
      }
    }
  }

  fn resolve_param(&self, type_name: &str, param: &Param, args: &Args) -> Result<Instance> {
    if let Some(value) = args.get(param.name()) {
      return Ok(value.clone());
    }

    match param.kind() {
      ParamKind::Class(type_ref) => {
        let info = self.lookup_type(type_ref).ok_or_else(|| BuildError::Reflection {
          type_name: type_name.to_owned(),
          source: ReflectionError::UnknownParameterType {
            parameter: param.name().to_owned(),
            declared: type_ref.name().to_owned(),
          },
        })?;
        self.build_from(&info, &Args::new())
      }
      ParamKind::Scalar => param.default_value().cloned().ok_or_else(|| {
        BuildError::MissingParameter {
          type_name: type_name.to_owned(),
          parameter: param.name().to_owned(),
        }
        .into()
      }),
    }
  }

  fn downcast<T: Any + Send + Sync>(name: &str, instance: Instance) -> Result<Arc<T>> {
    instance
      .downcast::<T>()
      .map_err(|_| ContainerError::type_mismatch::<T>(name))
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers a transient binding: every `make` runs the resolver again.
  /// Binding a name twice replaces the earlier binding.
  pub fn bind(&self, name: impl Into<String>, resolver: Resolver) {
    self.bind_internal(name.into(), resolver, false);
  }

  /// Registers a shared binding: the first `make` caches its result and every
  /// later `make` returns that same instance.
  pub fn singleton(&self, name: impl Into<String>, resolver: Resolver) {
    self.bind_internal(name.into(), resolver, true);
  }

  /// Stores an existing object as the shared instance for `name`. From now on
  /// `make(name)` returns exactly this object, whatever is bound to the name.
  pub fn instance<T: Any + Send + Sync>(&self, name: impl Into<String>, value: Arc<T>) {
    let name = name.into();
    trace!(name = %name, "storing shared instance");
    self.shared.insert(name, value);
  }

  /// Catalogues `T` under its [`Injectable::type_name`] so it can be
  /// requested by that name without a binding.
  pub fn register_type<T: Injectable + ?Sized>(&self) {
    self.register_type_info(T::type_info().with_type_id(TypeId::of::<T>()));
  }

  /// Catalogues hand-written type metadata under its name, replacing any
  /// earlier entry of the same name.
  pub fn register_type_info(&self, info: TypeInfo) {
    trace!(type_name = info.name(), "registering type metadata");
    self.types.insert(info.name().to_owned(), Arc::new(info));
  }

  /// Drops the cached shared instance for `name`, returning it. A singleton
  /// binding of the same name is rebuilt on the next `make`.
  pub fn forget_instance(&self, name: &str) -> Option<Instance> {
    self.shared.remove(name).map(|(_, value)| value)
  }

  // --- Queries ---

  /// Whether `make(name)` has anything to go on: a shared instance, a
  /// binding, or a catalogued type.
  pub fn has(&self, name: &str) -> bool {
    self.is_resolved(name) || self.is_bound(name) || self.types.contains_key(name)
  }

  pub fn is_bound(&self, name: &str) -> bool {
    self.bindings.contains_key(name)
  }

  /// Whether `name` resolves to a shared value, either through a singleton
  /// binding or an instance already cached.
  pub fn is_shared(&self, name: &str) -> bool {
    self.is_resolved(name) || self.bindings.get(name).map_or(false, |b| b.shared)
  }

  /// Whether a shared instance for `name` is currently cached.
  pub fn is_resolved(&self, name: &str) -> bool {
    self.shared.contains_key(name)
  }

  // --- Resolution ---

  /// Resolves `name` into a type-erased instance.
  ///
  /// A cached shared instance wins. Otherwise the binding's resolver runs, or,
  /// for unbound names, `name` is auto-wired as a catalogued type. `args`
  /// are forwarded to auto-wiring and ignored by factories.
  pub fn make_instance(&self, name: &str, args: &Args) -> Result<Instance> {
    if let Some(hit) = self.shared.get(name) {
      trace!(name = %name, "shared instance cache hit");
      return Ok(hit.value().clone());
    }

    let (resolver, shared) = match self.bindings.get(name) {
      Some(binding) => (binding.resolver.clone(), binding.shared),
      None => (Resolver::type_name(name), false),
    };

    let object = match resolver {
      Resolver::Factory(factory) => {
        let _guard =
          ResolutionGuard::enter(ResolutionKey::binding(self.id, name), self.config.max_depth)?;
        trace!(name = %name, shared, "invoking factory");
        factory(self)?
      }
      Resolver::Type(type_ref) => self.build_ref(&type_ref, args)?,
    };

    if shared {
      // Keep whatever landed first so every caller sees one identity.
      let stored = self
        .shared
        .entry(name.to_owned())
        .or_insert(object)
        .value()
        .clone();
      return Ok(stored);
    }
    Ok(object)
  }

  /// Resolves `name` and downcasts it to `T`.
  pub fn make<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.make_with(name, &Args::new())
  }

  /// Resolves `name` with explicit constructor arguments and downcasts it to `T`.
  pub fn make_with<T: Any + Send + Sync>(&self, name: &str, args: &Args) -> Result<Arc<T>> {
    Self::downcast(name, self.make_instance(name, args)?)
  }

  /// Resolves `T` by its type name, honouring any binding or shared instance
  /// registered under that name. Otherwise `T` is auto-wired from its own
  /// metadata, even if another type is catalogued under the same name.
  pub fn make_type<T: Injectable + Send + Sync>(&self) -> Result<Arc<T>> {
    let name = T::type_name();
    if self.is_resolved(&name) || self.is_bound(&name) {
      return self.make(&name);
    }
    Self::downcast(&name, self.build_ref(&TypeRef::of::<T>(), &Args::new())?)
  }

  /// Constructs a new instance of the catalogued type `type_name`, bypassing
  /// bindings and the shared cache.
  pub fn build_instance(&self, type_name: &str, args: &Args) -> Result<Instance> {
    self.build_ref(&TypeRef::named(type_name), args)
  }

  pub fn build<T: Any + Send + Sync>(&self, type_name: &str) -> Result<Arc<T>> {
    self.build_with(type_name, &Args::new())
  }

  pub fn build_with<T: Any + Send + Sync>(&self, type_name: &str, args: &Args) -> Result<Arc<T>> {
    Self::downcast(type_name, self.build_instance(type_name, args)?)
  }

  /// Constructs a new `T` from its own metadata. No prior registration needed.
  pub fn build_type<T: Injectable + Send + Sync>(&self) -> Result<Arc<T>> {
    self.build_type_with(&Args::new())
  }

  pub fn build_type_with<T: Injectable + Send + Sync>(&self, args: &Args) -> Result<Arc<T>> {
    let type_ref = TypeRef::of::<T>();
    Self::downcast(type_ref.name(), self.build_ref(&type_ref, args)?)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("id", &self.id)
      .field("config", &self.config)
      .field("bindings", &self.bindings.len())
      .field("shared", &self.shared.len())
      .field("types", &self.types.len())
      .finish()
  }
}
