//! Descriptors for implementation types.
//!
//! An [`ImplementationType`] stands in for the "implementation type token" of
//! a reflective container: it knows the concrete type, how to build it with
//! no arguments, and which contracts it can be served as.

use crate::binding::{wrap_handle, Handle};
use crate::contract::{Contract, ContractInfo, TypeKind};
use crate::error::{BoxError, LocatorError, Result};

use core::fmt;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

type Constructor =
  Arc<dyn Fn() -> std::result::Result<Arc<dyn Any + Send + Sync>, BoxError> + Send + Sync>;
type Upcast = Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Handle> + Send + Sync>;

/// A concrete type that can be registered against one or more contracts.
#[derive(Clone)]
pub struct ImplementationType {
  type_id: TypeId,
  type_name: &'static str,
  kind: TypeKind,
  constructor: Option<Constructor>,
  upcasts: HashMap<TypeId, Upcast>,
}

impl ImplementationType {
  /// Starts describing the implementation type `T`.
  pub fn builder<T: Any + Send + Sync>() -> ImplementationBuilder<T> {
    ImplementationBuilder {
      kind: TypeKind::Concrete,
      constructor: None,
      upcasts: HashMap::new(),
      _marker: PhantomData,
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

  pub fn has_default_constructor(&self) -> bool {
    self.constructor.is_some()
  }

  /// Returns `true` if this type declared an upcast to `contract`.
  pub fn implements(&self, contract: &ContractInfo) -> bool {
    self.upcasts.contains_key(&contract.type_id())
  }

  /// Checks that this type can back a binding for `contract`.
  pub(crate) fn validate_for(&self, contract: &ContractInfo) -> Result<()> {
    if self.kind != TypeKind::Concrete || !self.implements(contract) {
      return Err(LocatorError::ImplementationContractMismatch {
        contract: contract.type_name(),
        implementation: self.type_name,
      });
    }
    if self.constructor.is_none() {
      return Err(LocatorError::NoDefaultConstructor {
        implementation: self.type_name,
      });
    }
    Ok(())
  }

  /// Builds a fresh instance and serves it as `contract`.
  pub(crate) fn instantiate(&self, contract: &ContractInfo) -> Result<Handle> {
    let constructor = self
      .constructor
      .as_ref()
      .ok_or(LocatorError::NoDefaultConstructor {
        implementation: self.type_name,
      })?;
    let upcast = self.upcasts.get(&contract.type_id()).ok_or(
      LocatorError::ImplementationContractMismatch {
        contract: contract.type_name(),
        implementation: self.type_name,
      },
    )?;

    let concrete = constructor().map_err(|source| LocatorError::ConstructionFailed {
      implementation: self.type_name,
      source,
    })?;

    upcast(concrete).ok_or(LocatorError::ImplementationContractMismatch {
      contract: contract.type_name(),
      implementation: self.type_name,
    })
  }
}

impl fmt::Debug for ImplementationType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ImplementationType")
      .field("type_name", &self.type_name)
      .field("kind", &self.kind)
      .field("has_default_constructor", &self.constructor.is_some())
      .field("contracts", &self.upcasts.len())
      .finish()
  }
}

/// A builder for [`ImplementationType`].
pub struct ImplementationBuilder<T> {
  kind: TypeKind,
  constructor: Option<Constructor>,
  upcasts: HashMap<TypeId, Upcast>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ImplementationBuilder<T> {
  /// Overrides the kind of the type. Anything but `Concrete` makes the
  /// descriptor unusable as a binding target.
  pub fn kind(mut self, kind: TypeKind) -> Self {
    self.kind = kind;
    self
  }

  /// Uses `T::default()` as the zero-argument constructor.
  pub fn default_constructor(self) -> Self
  where
    T: Default,
  {
    self.constructor(T::default)
  }

  /// Sets the zero-argument constructor.
  pub fn constructor(mut self, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
    self.constructor = Some(Arc::new(move || {
      Ok(Arc::new(factory()) as Arc<dyn Any + Send + Sync>)
    }));
    self
  }

  /// Sets a zero-argument constructor that may fail. Failures surface from
  /// resolution as [`LocatorError::ConstructionFailed`].
  pub fn fallible_constructor<E>(
    mut self,
    factory: impl Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
  ) -> Self
  where
    E: Into<BoxError>,
  {
    self.constructor = Some(Arc::new(move || {
      factory()
        .map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)
        .map_err(Into::into)
    }));
    self
  }

  /// Declares that `T` can be served as contract `C`.
  ///
  /// `cast` performs the unsizing, usually `|it| it as Arc<dyn C>`.
  pub fn implements<C: ?Sized + Contract>(
    mut self,
    cast: impl Fn(Arc<T>) -> Arc<C> + Send + Sync + 'static,
  ) -> Self {
    let upcast: Upcast = Arc::new(move |any: Arc<dyn Any + Send + Sync>| {
      any
        .downcast::<T>()
        .ok()
        .map(|concrete| wrap_handle::<C>(cast(concrete)))
    });
    self.upcasts.insert(TypeId::of::<C>(), upcast);
    self
  }

  pub fn build(self) -> ImplementationType {
    ImplementationType {
      type_id: TypeId::of::<T>(),
      type_name: type_name::<T>(),
      kind: self.kind,
      constructor: self.constructor,
      upcasts: self.upcasts,
    }
  }
}

impl<T> fmt::Debug for ImplementationBuilder<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ImplementationBuilder")
      .field("type_name", &type_name::<T>())
      .field("kind", &self.kind)
      .field("has_constructor", &self.constructor.is_some())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fmt::Display;

  trait Shape: Send + Sync {
    fn area(&self) -> u32;
  }
  trait Named: Send + Sync {}
  impl Contract for dyn Shape {}
  impl Contract for dyn Named {}

  #[derive(Default)]
  struct Square;
  impl Shape for Square {
    fn area(&self) -> u32 {
      4
    }
  }

  #[derive(Debug)]
  struct Broken;
  impl Display for Broken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "broken")
    }
  }
  impl std::error::Error for Broken {}

  #[test]
  fn instantiates_through_the_declared_upcast() {
    let square = ImplementationType::builder::<Square>()
      .default_constructor()
      .implements::<dyn Shape>(|it| it as Arc<dyn Shape>)
      .build();
    let contract = ContractInfo::of::<dyn Shape>();

    assert!(square.validate_for(&contract).is_ok());
    let handle = square.instantiate(&contract).unwrap();
    let shape = handle.downcast_ref::<Arc<dyn Shape>>().unwrap();
    assert_eq!(shape.area(), 4);
  }

  #[test]
  fn validation_distinguishes_mismatch_from_missing_constructor() {
    let no_ctor = ImplementationType::builder::<Square>()
      .implements::<dyn Shape>(|it| it as Arc<dyn Shape>)
      .build();
    assert!(matches!(
      no_ctor.validate_for(&ContractInfo::of::<dyn Shape>()),
      Err(LocatorError::NoDefaultConstructor { .. })
    ));

    let square = ImplementationType::builder::<Square>()
      .default_constructor()
      .build();
    assert!(matches!(
      square.validate_for(&ContractInfo::of::<dyn Named>()),
      Err(LocatorError::ImplementationContractMismatch { .. })
    ));

    let abstract_square = ImplementationType::builder::<Square>()
      .kind(TypeKind::Abstract)
      .default_constructor()
      .implements::<dyn Shape>(|it| it as Arc<dyn Shape>)
      .build();
    assert!(matches!(
      abstract_square.validate_for(&ContractInfo::of::<dyn Shape>()),
      Err(LocatorError::ImplementationContractMismatch { .. })
    ));
  }

  #[test]
  fn fallible_constructor_errors_are_wrapped() {
    let broken = ImplementationType::builder::<Square>()
      .fallible_constructor(|| Err::<Square, _>(Broken))
      .implements::<dyn Shape>(|it| it as Arc<dyn Shape>)
      .build();
    let err = broken
      .instantiate(&ContractInfo::of::<dyn Shape>())
      .unwrap_err();
    assert!(matches!(err, LocatorError::ConstructionFailed { .. }));
    assert!(err.to_string().contains("broken"));
  }
}
