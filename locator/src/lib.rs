//! # Fibre Locator
//!
//! A hierarchical, thread-safe service locator for Rust.
//!
//! Containers bind contract types (trait objects such as `dyn Logger`),
//! optionally qualified by a name, to either a singleton instance or an
//! implementation type that is constructed on every resolution. Containers
//! form a tree: resolving from a container walks up through its ancestors
//! and the nearest binding wins, so a child container can shadow a
//! production registration without modifying it.
//!
//! ## Core Concepts
//!
//! - **Container**: a node of the tree owning bindings, configuration,
//!   precluded types and child containers.
//! - **ServiceLocator**: a container tree plus the *ambient* container that
//!   locator-level calls are routed through. The process-wide locator is
//!   available via `global()`.
//! - **Contracts**: declared with `contract!`; implementation types are
//!   described with `implementation!` or `ImplementationType::builder`.
//! - **Registrars**: components submit one `ServiceRegistrar` with
//!   `register_services!`, invoked at bootstrap.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{contract, implementation, ServiceLocator};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn log(&self, message: &str) -> String;
//! }
//! contract!(dyn Logger);
//!
//! #[derive(Default)]
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!   fn log(&self, message: &str) -> String {
//!     format!("[console] {}", message)
//!   }
//! }
//!
//! struct MockLogger;
//! impl Logger for MockLogger {
//!   fn log(&self, _message: &str) -> String {
//!     "[mock]".to_string()
//!   }
//! }
//!
//! let locator = ServiceLocator::new();
//! let root = locator.root_container();
//! root
//!   .register_implementation::<dyn Logger>(&implementation!(ConsoleLogger => dyn Logger), None)
//!   .unwrap();
//!
//! // Overlay a mock for the duration of a test.
//! let test = root.create_child_container("test").unwrap();
//! test.register_instance::<dyn Logger>(Arc::new(MockLogger), None).unwrap();
//! locator.set_ambient_container(&test).unwrap();
//! assert_eq!(locator.resolve::<dyn Logger>(None).unwrap().log("hi"), "[mock]");
//!
//! // Disposing the ambient container reverts to the root.
//! test.dispose().unwrap();
//! assert_eq!(locator.resolve::<dyn Logger>(None).unwrap().log("hi"), "[console] hi");
//! ```

mod binding;
mod config;
mod container;
mod contract;
mod error;
mod event;
mod global;
mod guard;
mod implementation;
mod key;
mod locator;
mod macros;
mod preclusion;
pub mod registrar;
mod scoped;
mod store;

pub use binding::{BindingInfo, Resolved};
pub use config::{ConfigurationSetting, ContainerConfiguration, LockedError};
pub use container::{Container, ContainerId};
pub use contract::{Contract, ContractInfo, TypeKind};
pub use error::{BoxError, LocatorError, RegistrarError, Result};
pub use event::{EventListener, ListenerId, LocatorEvent};
pub use global::global;
pub use implementation::{ImplementationBuilder, ImplementationType};
pub use key::RegistrationKey;
pub use locator::{ServiceLocator, ROOT_CONTAINER_NAME};
pub use registrar::{Registrar, RegistrarDescriptor, ServiceRegistrar};
pub use scoped::ScopedContainer;

#[doc(hidden)]
pub mod __private {
  pub use inventory;
}
