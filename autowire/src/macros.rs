//! Public macros for ergonomic service resolution.

/// Resolves a service from the global container.
///
/// This macro is meant for dependencies that must be present. It panics if
/// the requested service cannot be resolved, with the underlying error in the
/// message.
///
/// # Panics
///
/// Panics on any resolution error. For a fallible version, use
/// `global().make(...)` or `global().make_type()` directly.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, resolve, Resolver};
///
/// // Resolve a named binding as a concrete type.
/// global().bind("motd", Resolver::factory(|_| Ok(String::from("hello"))));
/// let message = resolve!(String, "motd");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use fibre_autowire::{resolve, Injectable, TypeInfo};
///
/// #[derive(Default)]
/// struct Clock;
///
/// impl Injectable for Clock {
///   fn type_info() -> TypeInfo {
///     TypeInfo::of_default::<Self>()
///   }
/// }
///
/// // Auto-wire an injectable type without any binding.
/// let _clock = resolve!(Clock);
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving an injectable type by its type name: resolve!(MyService)
  ($type:ty) => {
    $crate::global()
      .make_type::<$type>()
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service {}: {}",
          std::any::type_name::<$type>(),
          err
        )
      })
  };

  // Arm for resolving a named binding: resolve!(MyService, "name")
  ($type:ty, $name:expr) => {{
    let name = $name;
    $crate::global()
      .make::<$type>(name)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service with name '{}': {}",
          name, err
        )
      })
  }};
}
