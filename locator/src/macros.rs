//! Public macros for declaring contracts and resolving services.

/// Resolves a service from the global locator's ambient container.
///
/// This macro panics if the requested service cannot be resolved. For a
/// non-panicking version, use `global().resolve(...)` or
/// `global().try_resolve(...)` directly.
///
/// # Panics
///
/// Panics with the resolution error if no binding is found, the contract is
/// precluded, or construction fails.
///
/// # Examples
///
/// ```
/// use fibre_locator::{contract, global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// contract!(dyn Greeter);
///
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global()
///   .root_container()
///   .register_instance::<dyn Greeter>(Arc::new(EnglishGreeter), Some("english"))
///   .unwrap();
///
/// let greeter = resolve!(trait Greeter, "english");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving a trait object: resolve!(trait MyTrait)
  (trait $trait_ident:ident) => {
    $crate::resolve!(dyn $trait_ident)
  };

  // Arm for resolving a named trait object: resolve!(trait MyTrait, "name")
  (trait $trait_ident:ident, $name:expr) => {
    $crate::resolve!(dyn $trait_ident, $name)
  };

  // Arm for resolving any contract type: resolve!(dyn MyTrait)
  ($type:ty) => {
    $crate::global()
      .resolve::<$type>(None)
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };

  // Arm for resolving a named contract type: resolve!(dyn MyTrait, "name")
  ($type:ty, $name:expr) => {
    $crate::global()
      .resolve::<$type>(Some($name))
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };
}

/// Declares one or more trait object types as interface contracts.
///
/// ```
/// use fibre_locator::{contract, Contract, TypeKind};
///
/// trait Reader: Send + Sync {}
/// trait Writer: Send + Sync {}
/// contract!(dyn Reader, dyn Writer);
///
/// assert_eq!(<dyn Writer as Contract>::KIND, TypeKind::Interface);
/// ```
///
/// Only `dyn Trait` types are accepted. A sized type has to implement
/// [`Contract`](crate::Contract) by hand and say what kind it is.
///
/// ```compile_fail
/// use fibre_locator::contract;
///
/// struct Plain;
/// contract!(Plain);
/// ```
#[macro_export]
macro_rules! contract {
  ($(dyn $contract:path),+ $(,)?) => {
    $(impl $crate::Contract for dyn $contract {})+
  };
}

/// Describes a `Default`-constructible implementation type and the
/// contracts it serves.
///
/// ```
/// use fibre_locator::{contract, implementation, ServiceLocator};
///
/// trait Counter: Send + Sync { fn start(&self) -> u32; }
/// contract!(dyn Counter);
///
/// #[derive(Default)]
/// struct ZeroCounter;
/// impl Counter for ZeroCounter { fn start(&self) -> u32 { 0 } }
///
/// let locator = ServiceLocator::new();
/// let root = locator.root_container();
/// root.register_implementation::<dyn Counter>(&implementation!(ZeroCounter => dyn Counter), None).unwrap();
/// assert_eq!(root.resolve::<dyn Counter>(None).unwrap().start(), 0);
/// ```
#[macro_export]
macro_rules! implementation {
  ($implementation:ty => $($contract:ty),+ $(,)?) => {
    $crate::ImplementationType::builder::<$implementation>()
      .default_constructor()
      $(
        .implements::<$contract>(
          |it: ::std::sync::Arc<$implementation>| -> ::std::sync::Arc<$contract> { it },
        )
      )+
      .build()
  };
}

/// Submits a registrar type for discovery by
/// [`ServiceLocator::bootstrap`](crate::ServiceLocator::bootstrap).
///
/// The registrar must implement `ServiceRegistrar` and `Default`. Its
/// assembly is the package name of the crate invoking the macro, so each
/// package may use this macro once.
///
/// ```ignore
/// #[derive(Default)]
/// struct StorageServices;
///
/// impl ServiceRegistrar for StorageServices {
///   fn register_service_instances(&self, registrar: &Registrar<'_>) -> fibre_locator::Result<()> {
///     registrar.register_instance::<dyn Storage>(Arc::new(MemoryStorage::default()), None)
///   }
/// }
///
/// register_services!(StorageServices);
/// ```
#[macro_export]
macro_rules! register_services {
  ($registrar:ty) => {
    $crate::__private::inventory::submit! {
      $crate::RegistrarDescriptor::new(
        env!("CARGO_PKG_NAME"),
        stringify!($registrar),
        $crate::registrar::construct::<$registrar>,
      )
    }
  };
}
