//! The global service locator instance and access function.

use crate::locator::ServiceLocator;
use once_cell::sync::Lazy;

// The one and only global locator. Its root container is created on first
// access and lives for the rest of the process.
static GLOBAL_LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

/// Provides a reference to the process-wide locator.
///
/// # Examples
///
/// ```
/// use fibre_locator::{contract, global, implementation};
///
/// trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
/// contract!(dyn Clock);
///
/// #[derive(Default)]
/// struct FixedClock;
/// impl Clock for FixedClock {
///   fn now(&self) -> u64 { 42 }
/// }
///
/// global()
///   .root_container()
///   .register_implementation::<dyn Clock>(&implementation!(FixedClock => dyn Clock), None)
///   .unwrap();
///
/// assert_eq!(global().resolve::<dyn Clock>(None).unwrap().now(), 42);
/// ```
pub fn global() -> &'static ServiceLocator {
  &GLOBAL_LOCATOR
}
