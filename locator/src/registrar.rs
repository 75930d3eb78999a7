//! Self-registration of services at bootstrap.
//!
//! A component exposes one [`ServiceRegistrar`] and submits it with
//! [`register_services!`](crate::register_services). Descriptors are
//! collected through `inventory`, and each one carries the package
//! ("assembly") it came from.
//!
//! Before anything runs, the whole set is validated:
//!
//! - an assembly may declare at most one registrar,
//! - a registrar must be concrete,
//! - a registrar must have a default constructor.
//!
//! Every problem is reported together as [`LocatorError::Bootstrap`]; bad
//! registrars are never skipped. Valid sets are invoked sorted by assembly
//! and type name, each registrar at most once per container.

use crate::container::Container;
use crate::contract::{Contract, TypeKind};
use crate::error::{LocatorError, RegistrarError, Result};
use crate::event::LocatorEvent;
use crate::implementation::ImplementationType;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The single registration entry point of a component.
pub trait ServiceRegistrar: Send + Sync {
  fn register_service_instances(&self, registrar: &Registrar<'_>) -> Result<()>;
}

/// A discoverable registrar type.
pub struct RegistrarDescriptor {
  /// The package the registrar belongs to.
  pub assembly: &'static str,
  pub type_name: &'static str,
  pub kind: TypeKind,
  pub constructor: Option<fn() -> Box<dyn ServiceRegistrar>>,
}

impl RegistrarDescriptor {
  pub const fn new(
    assembly: &'static str,
    type_name: &'static str,
    constructor: fn() -> Box<dyn ServiceRegistrar>,
  ) -> Self {
    Self {
      assembly,
      type_name,
      kind: TypeKind::Concrete,
      constructor: Some(constructor),
    }
  }

  fn identity(&self) -> (&'static str, &'static str) {
    (self.assembly, self.type_name)
  }
}

impl fmt::Debug for RegistrarDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegistrarDescriptor")
      .field("assembly", &self.assembly)
      .field("type_name", &self.type_name)
      .field("kind", &self.kind)
      .field("has_constructor", &self.constructor.is_some())
      .finish()
  }
}

inventory::collect!(RegistrarDescriptor);

/// The default constructor used by [`register_services!`](crate::register_services).
pub fn construct<R: ServiceRegistrar + Default + 'static>() -> Box<dyn ServiceRegistrar> {
  Box::new(R::default())
}

/// Every registrar submitted in this binary.
pub fn discovered_registrars() -> Vec<&'static RegistrarDescriptor> {
  inventory::iter::<RegistrarDescriptor>.into_iter().collect()
}

/// The registration-only view of a container handed to registrars.
#[derive(Debug, Clone, Copy)]
pub struct Registrar<'a> {
  container: &'a Container,
}

impl<'a> Registrar<'a> {
  pub(crate) fn new(container: &'a Container) -> Self {
    Self { container }
  }

  /// The container being populated.
  pub fn container(&self) -> &'a Container {
    self.container
  }

  pub fn register_implementation<C: ?Sized + Contract>(
    &self,
    implementation: &ImplementationType,
    name: Option<&str>,
  ) -> Result<()> {
    self
      .container
      .register_implementation::<C>(implementation, name)
  }

  pub fn register_instance<C: ?Sized + Contract>(
    &self,
    instance: Arc<C>,
    name: Option<&str>,
  ) -> Result<()> {
    self.container.register_instance::<C>(instance, name)
  }

  pub fn unregister<C: ?Sized + Contract>(&self, name: Option<&str>) -> Result<()> {
    self.container.unregister::<C>(name)
  }

  pub fn is_registered<C: ?Sized + Contract>(&self, name: Option<&str>) -> bool {
    self.container.is_registered::<C>(name)
  }
}

/// Checks a registrar set and returns it in invocation order.
pub(crate) fn validate<'a>(
  registrars: &[&'a RegistrarDescriptor],
) -> Result<Vec<&'a RegistrarDescriptor>> {
  let mut ordered = registrars.to_vec();
  ordered.sort_by_key(|descriptor| descriptor.identity());
  ordered.dedup_by_key(|descriptor| descriptor.identity());

  let mut errors = Vec::new();

  let mut by_assembly: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
  for descriptor in &ordered {
    by_assembly
      .entry(descriptor.assembly)
      .or_default()
      .push(descriptor.type_name);
  }
  for (assembly, names) in by_assembly {
    if names.len() > 1 {
      errors.push(RegistrarError::MultipleRegistrarsInAssembly {
        assembly,
        registrars: names,
      });
    }
  }

  for descriptor in &ordered {
    if descriptor.kind != TypeKind::Concrete {
      errors.push(RegistrarError::AbstractRegistrar {
        registrar: descriptor.type_name,
      });
    } else if descriptor.constructor.is_none() {
      errors.push(RegistrarError::RegistrarMissingDefaultConstructor {
        registrar: descriptor.type_name,
      });
    }
  }

  if errors.is_empty() {
    Ok(ordered)
  } else {
    Err(LocatorError::Bootstrap(errors))
  }
}

pub(crate) fn invoke_registrars(
  container: &Container,
  registrars: &[&RegistrarDescriptor],
) -> Result<usize> {
  let ordered = validate(registrars)?;

  container.emit(LocatorEvent::BeforeCollectionRegistrarsInvoked {
    container: container.id().clone(),
    registrars: ordered.len(),
  });

  let mut invoked = 0;
  for descriptor in ordered {
    let Some(constructor) = descriptor.constructor else {
      continue;
    };
    if !container.mark_registrar_invoked(descriptor.assembly, descriptor.type_name)? {
      trace!(container = %container.id(), registrar = descriptor.type_name, "registrar already invoked");
      continue;
    }

    container.emit(LocatorEvent::BeforeSingleRegistrarInvoked {
      container: container.id().clone(),
      registrar: descriptor.type_name,
      assembly: descriptor.assembly,
    });

    if let Err(source) = constructor().register_service_instances(&container.registrar()) {
      // Unmark it so a later run retries.
      container.forget_registrar_invoked(descriptor.assembly, descriptor.type_name);
      return Err(LocatorError::RegistrarFailed {
        registrar: descriptor.type_name,
        source: Box::new(source),
      });
    }

    container.emit(LocatorEvent::AfterSingleRegistrarInvoked {
      container: container.id().clone(),
      registrar: descriptor.type_name,
      assembly: descriptor.assembly,
    });
    invoked += 1;
  }

  debug!(container = %container.id(), invoked, "registrars invoked");
  container.emit(LocatorEvent::AfterCollectionRegistrarsInvoked {
    container: container.id().clone(),
    invoked,
  });
  Ok(invoked)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Noop;
  impl ServiceRegistrar for Noop {
    fn register_service_instances(&self, _registrar: &Registrar<'_>) -> Result<()> {
      Ok(())
    }
  }

  static FIRST: RegistrarDescriptor = RegistrarDescriptor::new("b_crate", "First", construct::<Noop>);
  static SECOND: RegistrarDescriptor = RegistrarDescriptor::new("a_crate", "Second", construct::<Noop>);
  static SAME_ASSEMBLY: RegistrarDescriptor =
    RegistrarDescriptor::new("a_crate", "Third", construct::<Noop>);

  #[test]
  fn validation_sorts_and_deduplicates() {
    let ordered = validate(&[&FIRST, &SECOND, &FIRST]).unwrap();
    let names: Vec<_> = ordered.iter().map(|d| d.type_name).collect();
    assert_eq!(names, vec!["Second", "First"]);
  }

  #[test]
  fn validation_rejects_two_registrars_in_one_assembly() {
    let err = validate(&[&SECOND, &SAME_ASSEMBLY]).unwrap_err();
    match err {
      LocatorError::Bootstrap(errors) => assert_eq!(
        errors,
        vec![RegistrarError::MultipleRegistrarsInAssembly {
          assembly: "a_crate",
          registrars: vec!["Second", "Third"],
        }]
      ),
      other => panic!("unexpected error: {other}"),
    }
  }
}
