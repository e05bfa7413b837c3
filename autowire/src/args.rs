//! Explicit arguments passed into a resolution, and the resolved
//! dependencies handed to a constructor.

use crate::core::Instance;
use crate::error::{BuildError, ContainerError, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named values that override auto-wiring for constructor parameters of the
/// same name. Values are used verbatim, even for class-typed parameters.
#[derive(Clone, Default)]
pub struct Args {
  values: HashMap<String, Instance>,
}

impl Args {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
    self.insert(name, value);
    self
  }

  /// Like [`Args::with`], but passes an existing shared object so the
  /// constructor receives that exact instance.
  pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
    self.values.insert(name.into(), value);
    self
  }

  pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
    self.values.insert(name.into(), Arc::new(value));
  }

  pub fn get(&self, name: &str) -> Option<&Instance> {
    self.values.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl fmt::Debug for Args {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.values.keys()).finish()
  }
}

/// The resolved constructor parameters of one type, in declaration order.
pub struct Dependencies {
  type_name: String,
  values: Vec<(String, Instance)>,
}

impl Dependencies {
  pub(crate) fn new(type_name: &str, values: Vec<(String, Instance)>) -> Self {
    Self {
      type_name: type_name.to_owned(),
      values,
    }
  }

  /// The type these dependencies are being assembled for.
  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The untyped value of a parameter.
  pub fn instance(&self, name: &str) -> Option<&Instance> {
    self
      .values
      .iter()
      .find(|(param, _)| param == name)
      .map(|(_, value)| value)
  }

  /// The parameter called `name`, downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let value = self.instance(name).ok_or_else(|| self.missing(name))?;
    self.downcast(name, value)
  }

  /// Clones the parameter called `name` out of its shared slot. Handy for
  /// scalars such as `String` or integers.
  pub fn value<T: Any + Send + Sync + Clone>(&self, name: &str) -> Result<T> {
    self.get::<T>(name).map(|value| (*value).clone())
  }

  /// The parameter at position `index`, downcast to `T`.
  pub fn at<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let (name, value) = self
      .values
      .get(index)
      .ok_or_else(|| self.missing(&format!("#{}", index)))?;
    self.downcast(name, value)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Instance)> {
    self.values.iter().map(|(name, value)| (name.as_str(), value))
  }

  fn downcast<T: Any + Send + Sync>(&self, name: &str, value: &Instance) -> Result<Arc<T>> {
    value
      .clone()
      .downcast::<T>()
      .map_err(|_| ContainerError::type_mismatch::<T>(format!("{}::{}", self.type_name, name)))
  }

  fn missing(&self, name: &str) -> ContainerError {
    BuildError::MissingParameter {
      type_name: self.type_name.clone(),
      parameter: name.to_owned(),
    }
    .into()
  }
}

impl fmt::Debug for Dependencies {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Dependencies")
      .field("type_name", &self.type_name)
      .field("params", &self.values.iter().map(|(n, _)| n).collect::<Vec<_>>())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn deps() -> Dependencies {
    Dependencies::new(
      "Mailer",
      vec![
        ("host".to_string(), Arc::new(String::from("localhost")) as Instance),
        ("port".to_string(), Arc::new(25u16) as Instance),
      ],
    )
  }

  #[test]
  fn lookup_by_name_and_position() {
    let deps = deps();
    assert_eq!(deps.value::<String>("host").unwrap(), "localhost");
    assert_eq!(*deps.at::<u16>(1).unwrap(), 25);
    assert_eq!(deps.len(), 2);
  }

  #[test]
  fn wrong_type_is_a_mismatch() {
    match deps().get::<u32>("port") {
      Err(ContainerError::TypeMismatch { name, .. }) => assert_eq!(name, "Mailer::port"),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn unknown_parameter_is_missing() {
    assert!(matches!(
      deps().get::<String>("user"),
      Err(ContainerError::Build(BuildError::MissingParameter { .. }))
    ));
    assert!(deps().at::<String>(7).is_err());
  }

  #[test]
  fn args_keep_shared_instances_verbatim() {
    let shared: Instance = Arc::new(42u64);
    let args = Args::new()
      .with("name", "x".to_string())
      .with_instance("id", shared.clone());

    assert!(args.contains("name"));
    assert!(Arc::ptr_eq(args.get("id").unwrap(), &shared));
    assert_eq!(args.len(), 2);
  }
}
