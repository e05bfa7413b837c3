//! # Fibre Autowire
//!
//! A small dependency injection container with named bindings, singleton
//! caching and constructor auto-wiring.
//!
//! Callers ask the container for an object by name; the container finds out
//! how to build it and builds its dependencies along the way. Types that were
//! never bound can still be requested: the container reads their constructor
//! metadata and resolves every parameter from explicit arguments, by building
//! the parameter's type, or from its default value.
//!
//! ## Core Concepts
//!
//! - **Container**: The registry of bindings, shared instances and type metadata.
//! - **Binding**: A name associated with a [`Resolver`], either a factory closure or
//!   a type to auto-wire. Bindings are transient (`bind`) or shared (`singleton`).
//! - **Injectable**: Types describe their constructor through [`TypeInfo`] so they
//!   can be auto-wired.
//! - **Global Container**: A lazily created process-wide container, accessible via
//!   [`global()`] and replaceable with [`set_global()`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_autowire::{Container, Injectable, Resolver, TypeInfo};
//! use std::sync::Arc;
//!
//! struct Connection {
//!   dsn: String,
//! }
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
//!       .build(|deps| Ok(Service { repo: deps.get("repo")?, name: deps.value("name")? }))
//!   }
//! }
//!
//! let container = Container::new();
//!
//! // One connection for the whole application.
//! container.singleton(
//!   "db",
//!   Resolver::factory(|_| Ok(Connection { dsn: "sqlite::memory:".into() })),
//! );
//! let a = container.make::<Connection>("db").unwrap();
//! let b = container.make::<Connection>("db").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.dsn, "sqlite::memory:");
//!
//! // No binding needed: `Service` and its `Repository` are auto-wired.
//! container.register_type::<Service>();
//! let service = container.make::<Service>("Service").unwrap();
//! assert_eq!(service.name, "default");
//! ```

mod args;
mod config;
mod container;
mod core;
mod error;
mod global;
mod macros;
mod reflect;
mod resolver;

pub use args::{Args, Dependencies};
pub use config::{ContainerConfig, DEFAULT_MAX_DEPTH};
pub use container::Container;
pub use self::core::Instance;
pub use error::{BuildError, ContainerError, ReflectionError, Result};
pub use global::{global, set_global};
pub use reflect::{
  short_type_name, ConstructorBuilder, Injectable, Param, ParamKind, Reflect, TypeInfo, TypeRef,
};
pub use resolver::{FactoryFn, Resolver};
