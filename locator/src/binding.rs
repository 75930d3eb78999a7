//! What a registration key is bound to.

use crate::contract::Contract;
use crate::implementation::ImplementationType;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased service handle. It always wraps an `Arc<C>` for the
/// contract `C` it was created for.
pub(crate) type Handle = Arc<dyn Any + Send + Sync>;

pub(crate) fn wrap_handle<C: ?Sized + Contract>(service: Arc<C>) -> Handle {
  Arc::new(service)
}

pub(crate) enum Binding {
  /// A pre-built singleton, registered for `contract`.
  Instance {
    handle: Handle,
    contract: &'static str,
  },
  /// A type constructed on every resolution.
  Implementation(Arc<ImplementationType>),
}

impl Binding {
  pub(crate) fn info(&self) -> BindingInfo {
    match self {
      Binding::Instance { contract, .. } => BindingInfo::Instance {
        contract: *contract,
      },
      Binding::Implementation(implementation) => BindingInfo::Implementation {
        type_name: implementation.type_name(),
      },
    }
  }
}

/// A description of a binding, carried by registration events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingInfo {
  /// An instance bound under `contract`. Its concrete type is erased.
  Instance { contract: &'static str },
  Implementation { type_name: &'static str },
}

impl fmt::Display for BindingInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BindingInfo::Instance { contract } => write!(f, "instance for {}", contract),
      BindingInfo::Implementation { type_name } => write!(f, "implementation {}", type_name),
    }
  }
}

/// The result of a type-erased resolution.
///
/// Use [`Resolved::downcast`] with the contract type that was requested to
/// recover the service.
#[derive(Clone)]
pub struct Resolved {
  handle: Handle,
  contract: &'static str,
}

impl Resolved {
  pub(crate) fn new(handle: Handle, contract: &'static str) -> Self {
    Self { handle, contract }
  }

  /// The name of the contract this service was resolved for.
  pub fn contract_name(&self) -> &'static str {
    self.contract
  }

  pub fn downcast<C: ?Sized + Contract>(&self) -> Option<Arc<C>> {
    self.handle.downcast_ref::<Arc<C>>().cloned()
  }
}

impl fmt::Debug for Resolved {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Resolved")
      .field("contract", &self.contract)
      .finish_non_exhaustive()
  }
}
