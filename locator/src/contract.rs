//! Runtime descriptions of contract types.
//!
//! Rust has no runtime reflection, so the shape of a contract (is it an
//! abstraction, is it an open generic family) is declared through the
//! [`Contract`] trait. Trait objects are the natural contracts; the
//! [`contract!`](crate::contract) macro declares them in one line.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

/// The kind of a type as far as service location is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
  /// A pure abstraction, normally a `dyn Trait`.
  Interface,
  /// A partially implemented abstraction that cannot be constructed on its own.
  Abstract,
  /// A constructible type.
  Concrete,
}

impl TypeKind {
  pub fn is_abstraction(self) -> bool {
    matches!(self, TypeKind::Interface | TypeKind::Abstract)
  }
}

impl fmt::Display for TypeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TypeKind::Interface => write!(f, "interface"),
      TypeKind::Abstract => write!(f, "abstract"),
      TypeKind::Concrete => write!(f, "concrete"),
    }
  }
}

/// A type that can be used as the contract side of a binding.
///
/// Resolved services are handed out as `Arc<Self>`, so contracts are usually
/// unsized trait objects:
///
/// ```
/// use fibre_locator::{Contract, TypeKind};
///
/// trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
///
/// impl Contract for dyn Clock {}
///
/// assert_eq!(<dyn Clock as Contract>::KIND, TypeKind::Interface);
/// ```
pub trait Contract: Send + Sync + 'static {
  /// Defaults to [`TypeKind::Interface`], which is only right for trait
  /// objects. Sized types must set this themselves; a concrete type left on
  /// the default would be accepted as a contract.
  const KIND: TypeKind = TypeKind::Interface;

  /// Marks a contract that stands for a whole family of instantiations
  /// rather than a single type. Such contracts cannot be bound.
  const OPEN_GENERIC: bool = false;
}

/// Everything the container needs to know about a contract at runtime.
#[derive(Clone, Copy)]
pub struct ContractInfo {
  type_id: TypeId,
  type_name: &'static str,
  kind: TypeKind,
  open_generic: bool,
  handle_type_id: TypeId,
}

impl ContractInfo {
  pub fn of<C: ?Sized + Contract>() -> Self {
    Self {
      type_id: TypeId::of::<C>(),
      type_name: type_name::<C>(),
      kind: C::KIND,
      open_generic: C::OPEN_GENERIC,
      handle_type_id: TypeId::of::<Arc<C>>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn kind(&self) -> TypeKind {
    self.kind
  }

  pub fn is_open_generic(&self) -> bool {
    self.open_generic
  }

  /// The `TypeId` of `Arc<C>`, which is what every stored handle wraps.
  pub(crate) fn handle_type_id(&self) -> TypeId {
    self.handle_type_id
  }
}

impl PartialEq for ContractInfo {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ContractInfo {}

impl fmt::Debug for ContractInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContractInfo")
      .field("type_name", &self.type_name)
      .field("kind", &self.kind)
      .field("open_generic", &self.open_generic)
      .finish()
  }
}
