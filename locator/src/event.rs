//! Notifications raised by containers and the locator.
//!
//! Delivery is synchronous and happens on the thread that performed the
//! operation, after the container's lock has been released. Listeners may
//! therefore call back into the container.

use crate::binding::BindingInfo;
use crate::config::ConfigurationSetting;
use crate::container::ContainerId;
use crate::key::RegistrationKey;

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorEvent {
  RegistrationAdded {
    container: ContainerId,
    key: RegistrationKey,
    binding: BindingInfo,
    /// `true` when an existing binding for the key was overwritten.
    replaced: bool,
  },
  RegistrationRemoved {
    container: ContainerId,
    key: RegistrationKey,
  },
  ChildContainerAdded {
    container: ContainerId,
    child: ContainerId,
  },
  ChildContainerRemoved {
    container: ContainerId,
    child: ContainerId,
  },
  ConfigurationChanged {
    container: ContainerId,
    setting: ConfigurationSetting,
    value: bool,
  },
  PrecludedTypeAdded {
    container: ContainerId,
    contract: &'static str,
  },
  PrecludedTypeRemoved {
    container: ContainerId,
    contract: &'static str,
  },
  AmbientContainerChanged {
    previous: ContainerId,
    current: ContainerId,
  },
  BeforeCollectionRegistrarsInvoked {
    container: ContainerId,
    registrars: usize,
  },
  BeforeSingleRegistrarInvoked {
    container: ContainerId,
    registrar: &'static str,
    assembly: &'static str,
  },
  AfterSingleRegistrarInvoked {
    container: ContainerId,
    registrar: &'static str,
    assembly: &'static str,
  },
  AfterCollectionRegistrarsInvoked {
    container: ContainerId,
    invoked: usize,
  },
}

impl LocatorEvent {
  /// The container the event is about. For ambient changes this is the new
  /// ambient container.
  pub fn container(&self) -> &ContainerId {
    match self {
      LocatorEvent::RegistrationAdded { container, .. }
      | LocatorEvent::RegistrationRemoved { container, .. }
      | LocatorEvent::ChildContainerAdded { container, .. }
      | LocatorEvent::ChildContainerRemoved { container, .. }
      | LocatorEvent::ConfigurationChanged { container, .. }
      | LocatorEvent::PrecludedTypeAdded { container, .. }
      | LocatorEvent::PrecludedTypeRemoved { container, .. }
      | LocatorEvent::BeforeCollectionRegistrarsInvoked { container, .. }
      | LocatorEvent::BeforeSingleRegistrarInvoked { container, .. }
      | LocatorEvent::AfterSingleRegistrarInvoked { container, .. }
      | LocatorEvent::AfterCollectionRegistrarsInvoked { container, .. } => container,
      LocatorEvent::AmbientContainerChanged { current, .. } => current,
    }
  }
}

/// Receives [`LocatorEvent`]s.
///
/// Any `Fn(&LocatorEvent) + Send + Sync` closure is a listener.
pub trait EventListener: Send + Sync {
  fn on_event(&self, event: &LocatorEvent);
}

impl<F> EventListener for F
where
  F: Fn(&LocatorEvent) + Send + Sync,
{
  fn on_event(&self, event: &LocatorEvent) {
    self(event)
  }
}

/// Returned by `subscribe`; pass it to `unsubscribe` to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Default)]
pub(crate) struct ListenerSet {
  listeners: RwLock<Vec<(ListenerId, Arc<dyn EventListener>)>>,
}

impl ListenerSet {
  pub(crate) fn add(&self, listener: Arc<dyn EventListener>) -> ListenerId {
    let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
    self.listeners.write().push((id, listener));
    id
  }

  pub(crate) fn remove(&self, id: ListenerId) -> bool {
    let mut listeners = self.listeners.write();
    let before = listeners.len();
    listeners.retain(|(existing, _)| *existing != id);
    listeners.len() != before
  }

  pub(crate) fn clear(&self) {
    self.listeners.write().clear();
  }

  pub(crate) fn emit(&self, event: &LocatorEvent) {
    // Snapshot so listeners can subscribe or unsubscribe re-entrantly.
    let snapshot: Vec<Arc<dyn EventListener>> = self
      .listeners
      .read()
      .iter()
      .map(|(_, listener)| listener.clone())
      .collect();
    for listener in snapshot {
      listener.on_event(event);
    }
  }
}
