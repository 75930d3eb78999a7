//! The `ServiceLocator`: a container tree with a root and an ambient container.

use crate::binding::Resolved;
use crate::config::ContainerConfiguration;
use crate::container::{Container, ContainerInner};
use crate::contract::{Contract, ContractInfo};
use crate::error::{LocatorError, Result};
use crate::event::{EventListener, ListenerId, ListenerSet, LocatorEvent};
use crate::registrar;

use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;
use uuid::Uuid;

/// The name given to every locator's root container.
pub const ROOT_CONTAINER_NAME: &str = "root";

pub(crate) struct LocatorShared {
  root: Arc<ContainerInner>,
  root_configuration: ContainerConfiguration,
  ambient: RwLock<Arc<ContainerInner>>,
  // Live containers of this tree, for membership checks and lookup by uid.
  containers: DashMap<Uuid, Weak<ContainerInner>>,
  listeners: ListenerSet,
}

impl LocatorShared {
  pub(crate) fn emit(&self, event: &LocatorEvent) {
    self.listeners.emit(event);
  }

  pub(crate) fn track(&self, container: &Arc<ContainerInner>) {
    self
      .containers
      .insert(container.id().uid(), Arc::downgrade(container));
  }

  /// Forgets a disposed container. If it was ambient, ambient reverts to root.
  pub(crate) fn release(&self, container: &Arc<ContainerInner>) {
    self.containers.remove(&container.id().uid());

    let previous = {
      let mut ambient = self.ambient.write();
      if Arc::ptr_eq(&ambient, container) {
        Some(std::mem::replace(&mut *ambient, self.root.clone()))
      } else {
        None
      }
    };

    if let Some(previous) = previous {
      debug!(previous = %previous.id(), "ambient container disposed, reverting to root");
      self.emit(&LocatorEvent::AmbientContainerChanged {
        previous: previous.id().clone(),
        current: self.root.id().clone(),
      });
    }
  }
}

/// A container tree plus the ambient container pointer.
///
/// Calls such as [`ServiceLocator::resolve`] are forwarded to the ambient
/// container, which defaults to the root. Pointing the ambient container at a
/// child lets tests overlay mocks without touching production registrations.
///
/// `ServiceLocator` is a cheap, cloneable handle. A process-wide instance is
/// available through [`global()`](crate::global).
#[derive(Clone)]
pub struct ServiceLocator {
  shared: Arc<LocatorShared>,
}

impl ServiceLocator {
  /// Creates a locator whose root uses the default configuration.
  pub fn new() -> Self {
    Self::with_configuration(ContainerConfiguration::default())
  }

  /// Creates a locator whose root starts with `configuration`.
  pub fn with_configuration(configuration: ContainerConfiguration) -> Self {
    let shared = Arc::new_cyclic(|locator: &Weak<LocatorShared>| {
      let root = ContainerInner::new(ROOT_CONTAINER_NAME, None, locator.clone(), configuration);
      let containers = DashMap::new();
      containers.insert(root.id().uid(), Arc::downgrade(&root));
      LocatorShared {
        ambient: RwLock::new(root.clone()),
        root,
        root_configuration: configuration,
        containers,
        listeners: ListenerSet::default(),
      }
    });
    Self { shared }
  }

  pub(crate) fn from_shared(shared: Arc<LocatorShared>) -> Self {
    Self { shared }
  }

  pub fn root_container(&self) -> Container {
    Container::from_inner(self.shared.root.clone())
  }

  pub fn ambient_container(&self) -> Container {
    Container::from_inner(self.shared.ambient.read().clone())
  }

  /// Routes subsequent locator calls, on every thread, to `container`.
  /// Resolutions already in flight are unaffected.
  pub fn set_ambient_container(&self, container: &Container) -> Result<()> {
    let inner = container.inner();
    let member = inner.belongs_to(&self.shared)
      && self.shared.containers.contains_key(&inner.id().uid())
      && !container.is_disposed();
    if !member {
      return Err(LocatorError::InvalidAmbientContainer {
        container: inner.id().to_string(),
      });
    }

    let previous = std::mem::replace(&mut *self.shared.ambient.write(), inner.clone());
    debug!(previous = %previous.id(), current = %inner.id(), "ambient container changed");
    self.shared.emit(&LocatorEvent::AmbientContainerChanged {
      previous: previous.id().clone(),
      current: inner.id().clone(),
    });

    // Lost a race with disposal: fall back to root like disposal would have.
    if container.is_disposed() {
      self.shared.release(inner);
    }
    Ok(())
  }

  /// Points the ambient container back at the root.
  pub fn reset_ambient_container(&self) {
    let root = self.shared.root.clone();
    let previous = std::mem::replace(&mut *self.shared.ambient.write(), root.clone());
    if !Arc::ptr_eq(&previous, &root) {
      debug!(previous = %previous.id(), "ambient container reset to root");
      self.shared.emit(&LocatorEvent::AmbientContainerChanged {
        previous: previous.id().clone(),
        current: root.id().clone(),
      });
    }
  }

  // --- Resolution (forwarded to the ambient container) ---

  pub fn resolve<C: ?Sized + Contract>(&self, name: Option<&str>) -> Result<Arc<C>> {
    self.ambient_container().resolve::<C>(name)
  }

  pub fn try_resolve<C: ?Sized + Contract>(&self, name: Option<&str>) -> Option<Arc<C>> {
    self.ambient_container().try_resolve::<C>(name)
  }

  pub fn resolve_erased(&self, contract: &ContractInfo, name: Option<&str>) -> Result<Resolved> {
    self.ambient_container().resolve_erased(contract, name)
  }

  pub fn try_resolve_erased(&self, contract: &ContractInfo, name: Option<&str>) -> Option<Resolved> {
    self.ambient_container().try_resolve_erased(contract, name)
  }

  // --- Tree inspection ---

  pub fn find_container(&self, uid: Uuid) -> Option<Container> {
    self
      .shared
      .containers
      .get(&uid)
      .and_then(|entry| entry.value().upgrade())
      .map(Container::from_inner)
  }

  /// The number of live containers in the tree, root included.
  pub fn container_count(&self) -> usize {
    self.shared.containers.len()
  }

  // --- Events ---

  /// Subscribes to every event raised anywhere in this tree.
  pub fn subscribe(&self, listener: impl EventListener + 'static) -> ListenerId {
    self.shared.listeners.add(Arc::new(listener))
  }

  pub fn unsubscribe(&self, id: ListenerId) -> bool {
    self.shared.listeners.remove(id)
  }

  // --- Bootstrap & reset ---

  /// Invokes every registrar submitted with
  /// [`register_services!`](crate::register_services) against `container`.
  pub fn bootstrap(&self, container: &Container) -> Result<usize> {
    container.invoke_registrars(&registrar::discovered_registrars())
  }

  /// Returns the tree to its initial state: every child of the root is
  /// disposed, the root is emptied and gets its initial configuration back
  /// (unlocked, unless it started locked), ambient points at the root and
  /// all locator listeners are dropped.
  ///
  /// Meant for test isolation around the [`global()`](crate::global) locator.
  pub fn reset(&self) {
    self.reset_ambient_container();
    self
      .root_container()
      .reset_contents(self.shared.root_configuration);
    self.shared.listeners.clear();
    debug!("service locator reset");
  }
}

impl Default for ServiceLocator {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for ServiceLocator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceLocator")
      .field("root", self.shared.root.id())
      .field("ambient", self.shared.ambient.read().id())
      .field("containers", &self.shared.containers.len())
      .finish()
  }
}
