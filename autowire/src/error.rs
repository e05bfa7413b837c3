use thiserror::Error;

/// The main error type for the `fibre_autowire` library.
#[derive(Debug, Error)]
pub enum ContainerError {
  /// The requested type is abstract, an interface, or otherwise has no way
  /// to be constructed directly.
  #[error("[{0}] is not instantiable")]
  NotInstantiable(String),

  /// Auto-wiring a constructor failed.
  #[error(transparent)]
  Build(#[from] BuildError),

  /// Neither a binding nor a catalogued type carries this name.
  #[error("[{0}] is neither bound nor a known type")]
  UnknownType(String),

  /// A binding or type was requested again while it was still being resolved.
  #[error("Circular dependency detected while resolving [{name}]: {}", .chain.join(" -> "))]
  CircularDependency { name: String, chain: Vec<String> },

  #[error("Resolution of [{name}] exceeded the maximum depth of {limit}")]
  DepthExceeded { name: String, limit: usize },

  /// A resolved value was not of the type the caller asked for.
  #[error("[{name}] does not hold a value of type {expected}")]
  TypeMismatch { name: String, expected: &'static str },

  /// An error raised by user code inside a factory or constructor.
  #[error("Factory failed")]
  Factory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ContainerError {
  /// Wraps an arbitrary error raised by a factory or constructor.
  pub fn factory<E>(error: E) -> Self
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    ContainerError::Factory(error.into())
  }

  pub(crate) fn type_mismatch<T: ?Sized>(name: impl Into<String>) -> Self {
    ContainerError::TypeMismatch {
      name: name.into(),
      expected: std::any::type_name::<T>(),
    }
  }
}

/// Failures while auto-wiring a constructor.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The declared type of a constructor parameter could not be resolved.
  #[error("Unable to build [{type_name}]: {source}")]
  Reflection {
    type_name: String,
    #[source]
    source: ReflectionError,
  },

  /// A scalar parameter has neither an explicit argument nor a default value.
  #[error("Unable to build [{type_name}]: please provide the value of the parameter [{parameter}]")]
  MissingParameter { type_name: String, parameter: String },
}

/// Failures of the type metadata lookup behind auto-wiring.
#[derive(Debug, Error)]
pub enum ReflectionError {
  #[error("parameter [{parameter}] declares type [{declared}] which is not registered")]
  UnknownParameterType { parameter: String, declared: String },
}

/// A specialized `Result` type for `fibre_autowire` operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
