//! The `Container` handle and the container tree.
//!
//! Every container owns one `parking_lot::Mutex` guarding its store,
//! configuration, preclusion set, children and lifecycle. No operation holds
//! more than one container lock at a time:
//!
//! - Resolution walks from a container up to the root, releasing each lock
//!   before taking the parent's. A registration made in an ancestor while a
//!   walk is in flight may or may not be observed.
//! - Disposal marks the container under its own lock, disposes children with
//!   no lock held, then detaches from the parent under the parent's lock.
//! - User constructors and event listeners always run with no lock held.

use crate::binding::{wrap_handle, Binding, BindingInfo, Handle, Resolved};
use crate::config::{ConfigurationSetting, ContainerConfiguration};
use crate::contract::{Contract, ContractInfo};
use crate::error::{LocatorError, Result};
use crate::event::{EventListener, ListenerId, ListenerSet, LocatorEvent};
use crate::guard::ResolutionGuard;
use crate::implementation::ImplementationType;
use crate::key::RegistrationKey;
use crate::locator::{LocatorShared, ServiceLocator};
use crate::preclusion::PreclusionSet;
use crate::registrar::{self, Registrar, RegistrarDescriptor};
use crate::scoped::ScopedContainer;

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};
use uuid::Uuid;

/// The identity of a container: a unique id plus its human-readable name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContainerId {
  uid: Uuid,
  name: Arc<str>,
}

impl ContainerId {
  fn new(name: &str) -> Self {
    Self {
      uid: Uuid::new_v4(),
      name: Arc::from(name),
    }
  }

  pub fn uid(&self) -> Uuid {
    self.uid
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

impl fmt::Debug for ContainerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ContainerId({}, {})", self.name, self.uid)
  }
}

impl fmt::Display for ContainerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.uid)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
  Active,
  Disposing,
  Disposed,
}

struct ContainerState {
  lifecycle: Lifecycle,
  store: crate::store::RegistrationStore,
  configuration: ContainerConfiguration,
  preclusions: PreclusionSet,
  children: Vec<Arc<ContainerInner>>,
  invoked_registrars: HashSet<(&'static str, &'static str)>,
}

pub(crate) struct ContainerInner {
  id: ContainerId,
  parent: Option<Weak<ContainerInner>>,
  locator: Weak<LocatorShared>,
  state: Mutex<ContainerState>,
  listeners: ListenerSet,
}

impl ContainerInner {
  pub(crate) fn new(
    name: &str,
    parent: Option<Weak<ContainerInner>>,
    locator: Weak<LocatorShared>,
    configuration: ContainerConfiguration,
  ) -> Arc<Self> {
    Arc::new(Self {
      id: ContainerId::new(name),
      parent,
      locator,
      state: Mutex::new(ContainerState {
        lifecycle: Lifecycle::Active,
        store: Default::default(),
        configuration,
        preclusions: PreclusionSet::default(),
        children: Vec::new(),
        invoked_registrars: HashSet::new(),
      }),
      listeners: ListenerSet::default(),
    })
  }

  pub(crate) fn id(&self) -> &ContainerId {
    &self.id
  }

  pub(crate) fn belongs_to(&self, locator: &Arc<LocatorShared>) -> bool {
    std::ptr::eq(self.locator.as_ptr(), Arc::as_ptr(locator))
  }

  fn parent_inner(&self) -> Option<Arc<ContainerInner>> {
    self.parent.as_ref().and_then(Weak::upgrade)
  }
}

// What a single level of the resolution walk found.
enum Hit {
  Instance(Handle),
  Implementation(Arc<ImplementationType>),
}

/// A node in the container tree.
///
/// `Container` is a cheap, cloneable handle. The tree owns the containers:
/// a parent keeps its children alive and a child only holds a weak reference
/// to its parent. Once a container is disposed, every operation on a
/// remaining handle fails with [`LocatorError::ContainerDisposed`].
#[derive(Clone)]
pub struct Container {
  inner: Arc<ContainerInner>,
}

impl Container {
  pub(crate) fn from_inner(inner: Arc<ContainerInner>) -> Self {
    Self { inner }
  }

  pub(crate) fn inner(&self) -> &Arc<ContainerInner> {
    &self.inner
  }

  // --- PRIVATE HELPERS ---

  fn disposed_error(&self) -> LocatorError {
    LocatorError::ContainerDisposed {
      container: self.inner.id.to_string(),
    }
  }

  fn ensure_active(&self, lifecycle: Lifecycle) -> Result<()> {
    if lifecycle == Lifecycle::Active {
      Ok(())
    } else {
      Err(self.disposed_error())
    }
  }

  pub(crate) fn emit(&self, event: LocatorEvent) {
    self.inner.listeners.emit(&event);
    if let Some(locator) = self.inner.locator.upgrade() {
      locator.emit(&event);
    }
  }

  fn validate_contract(contract: &ContractInfo) -> Result<()> {
    if !contract.kind().is_abstraction() {
      return Err(LocatorError::InvalidContractType {
        contract: contract.type_name(),
      });
    }
    if contract.is_open_generic() {
      return Err(LocatorError::OpenGenericNotSupported {
        contract: contract.type_name(),
      });
    }
    Ok(())
  }

  /// The nearest ancestor that precludes `contract`, if any.
  fn precluding_ancestor(&self, contract: TypeId) -> Option<ContainerId> {
    let mut current = self.inner.parent_inner();
    while let Some(node) = current {
      if node.state.lock().preclusions.contains(contract) {
        return Some(node.id.clone());
      }
      current = node.parent_inner();
    }
    None
  }

  fn register_binding(
    &self,
    contract: &ContractInfo,
    name: Option<&str>,
    binding: Binding,
  ) -> Result<()> {
    let key = RegistrationKey::for_contract(contract, name);
    let info = binding.info();
    // Ancestors are checked first so their locks are never taken while ours is held.
    let precluded_above = self.precluding_ancestor(contract.type_id());

    let previous = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;

      if !key.is_default() && !state.configuration.allows_named_implementations() {
        return Err(LocatorError::NamedRegistrationDisabled {
          container: self.inner.id.to_string(),
          contract: contract.type_name(),
          name: key.name().to_owned(),
        });
      }

      let precluded_in = if state.preclusions.contains(contract.type_id()) {
        Some(self.inner.id.clone())
      } else {
        precluded_above
      };
      if let Some(container) = precluded_in {
        return Err(LocatorError::TypePrecluded {
          container: container.to_string(),
          contract: contract.type_name(),
        });
      }

      if state.configuration.throws_on_registration_collision() {
        if !state.store.add(key.clone(), binding) {
          return Err(LocatorError::RegistrationCollision {
            container: self.inner.id.to_string(),
            contract: contract.type_name(),
            name: key.name().to_owned(),
          });
        }
        None
      } else {
        state.store.add_or_update(key.clone(), binding)
      }
    };

    let replaced = previous.is_some();
    drop(previous);
    debug!(container = %self.inner.id, key = %key, binding = %info, replaced, "registration added");
    self.emit(LocatorEvent::RegistrationAdded {
      container: self.inner.id.clone(),
      key,
      binding: info,
      replaced,
    });
    Ok(())
  }

  fn remove_binding(&self, key: &RegistrationKey) -> Result<bool> {
    let removed = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      state.store.remove(key)
    };
    if removed.is_none() {
      return Ok(false);
    }
    drop(removed);
    debug!(container = %self.inner.id, key = %key, "registration removed");
    self.emit(LocatorEvent::RegistrationRemoved {
      container: self.inner.id.clone(),
      key: key.clone(),
    });
    Ok(true)
  }

  fn update_setting(&self, setting: ConfigurationSetting, value: bool) -> Result<()> {
    let mut events = Vec::new();
    {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      let previous = state
        .configuration
        .set(setting, value)
        .map_err(|_| LocatorError::ConfigurationLocked {
          container: self.inner.id.to_string(),
        })?;
      events.push(LocatorEvent::ConfigurationChanged {
        container: self.inner.id.clone(),
        setting,
        value,
      });

      if previous && !value {
        match setting {
          ConfigurationSetting::AllowNamedImplementations => {
            for key in state.store.remove_named() {
              events.push(LocatorEvent::RegistrationRemoved {
                container: self.inner.id.clone(),
                key,
              });
            }
          }
          ConfigurationSetting::AllowPreclusionOfTypes => {
            for contract in state.preclusions.clear() {
              events.push(LocatorEvent::PrecludedTypeRemoved {
                container: self.inner.id.clone(),
                contract,
              });
            }
          }
          _ => {}
        }
      }
    }

    debug!(container = %self.inner.id, %setting, value, "configuration changed");
    for event in events {
      self.emit(event);
    }
    Ok(())
  }

  // --- PUBLIC API ---

  // --- Identity & tree ---

  pub fn id(&self) -> &ContainerId {
    &self.inner.id
  }

  pub fn uid(&self) -> Uuid {
    self.inner.id.uid
  }

  pub fn name(&self) -> &str {
    &self.inner.id.name
  }

  pub fn is_root(&self) -> bool {
    self.inner.parent.is_none()
  }

  pub fn is_disposed(&self) -> bool {
    self.inner.state.lock().lifecycle != Lifecycle::Active
  }

  pub fn parent(&self) -> Option<Container> {
    self.inner.parent_inner().map(Container::from_inner)
  }

  pub fn children(&self) -> Vec<Container> {
    let state = self.inner.state.lock();
    state
      .children
      .iter()
      .cloned()
      .map(Container::from_inner)
      .collect()
  }

  /// The locator that owns this container's tree, if it is still alive.
  pub fn locator(&self) -> Option<ServiceLocator> {
    self.inner.locator.upgrade().map(ServiceLocator::from_shared)
  }

  // --- Configuration ---

  /// A snapshot of the current configuration.
  pub fn configuration(&self) -> ContainerConfiguration {
    self.inner.state.lock().configuration
  }

  /// Enables or disables named registrations. Disabling removes every named
  /// binding in this container; default bindings are kept.
  pub fn set_allow_named_implementations(&self, allow: bool) -> Result<()> {
    self.update_setting(ConfigurationSetting::AllowNamedImplementations, allow)
  }

  /// Enables or disables type preclusion. Disabling clears the preclusion set.
  pub fn set_allow_preclusion_of_types(&self, allow: bool) -> Result<()> {
    self.update_setting(ConfigurationSetting::AllowPreclusionOfTypes, allow)
  }

  pub fn set_throw_on_registration_collision(&self, throw: bool) -> Result<()> {
    self.update_setting(ConfigurationSetting::ThrowOnRegistrationCollision, throw)
  }

  /// Locks the configuration, returning the previous lock state.
  pub fn lock_configuration(&self) -> Result<bool> {
    let previous = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      state.configuration.lock()
    };
    if !previous {
      debug!(container = %self.inner.id, "configuration locked");
      self.emit(LocatorEvent::ConfigurationChanged {
        container: self.inner.id.clone(),
        setting: ConfigurationSetting::Locked,
        value: true,
      });
    }
    Ok(previous)
  }

  /// Applies every flag of `configuration` through the regular setters, then
  /// locks if `configuration` is locked.
  pub fn apply_configuration(&self, configuration: &ContainerConfiguration) -> Result<()> {
    self.update_setting(
      ConfigurationSetting::AllowNamedImplementations,
      configuration.allows_named_implementations(),
    )?;
    self.update_setting(
      ConfigurationSetting::AllowPreclusionOfTypes,
      configuration.allows_preclusion_of_types(),
    )?;
    self.update_setting(
      ConfigurationSetting::ThrowOnRegistrationCollision,
      configuration.throws_on_registration_collision(),
    )?;
    if configuration.is_locked() {
      self.lock_configuration()?;
    }
    Ok(())
  }

  // --- Preclusion ---

  pub fn add_precluded_type<C: ?Sized + Contract>(&self) -> Result<()> {
    self.add_precluded_contract(&ContractInfo::of::<C>())
  }

  /// Forbids `contract` from being registered in, or resolved through, this
  /// container. Fails if preclusion is disabled or the contract is already
  /// registered here.
  pub fn add_precluded_contract(&self, contract: &ContractInfo) -> Result<()> {
    let added = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      if !state.configuration.allows_preclusion_of_types() {
        return Err(LocatorError::PreclusionDisabled {
          container: self.inner.id.to_string(),
        });
      }
      if state.store.contains_contract(contract.type_id()) {
        return Err(LocatorError::PreclusionConflict {
          container: self.inner.id.to_string(),
          contract: contract.type_name(),
        });
      }
      state.preclusions.insert(contract)
    };
    if added {
      debug!(container = %self.inner.id, contract = contract.type_name(), "type precluded");
      self.emit(LocatorEvent::PrecludedTypeAdded {
        container: self.inner.id.clone(),
        contract: contract.type_name(),
      });
    }
    Ok(())
  }

  pub fn remove_precluded_type<C: ?Sized + Contract>(&self) -> Result<bool> {
    self.remove_precluded_contract(&ContractInfo::of::<C>())
  }

  pub fn remove_precluded_contract(&self, contract: &ContractInfo) -> Result<bool> {
    let removed = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      state.preclusions.remove(contract.type_id())
    };
    if removed {
      self.emit(LocatorEvent::PrecludedTypeRemoved {
        container: self.inner.id.clone(),
        contract: contract.type_name(),
      });
    }
    Ok(removed)
  }

  pub fn is_precluded<C: ?Sized + Contract>(&self) -> bool {
    self
      .inner
      .state
      .lock()
      .preclusions
      .contains(TypeId::of::<C>())
  }

  pub fn precluded_types(&self) -> Vec<&'static str> {
    self.inner.state.lock().preclusions.names()
  }

  // --- Registration ---

  /// Binds `implementation` to contract `C`. Each resolution constructs a
  /// new instance.
  pub fn register_implementation<C: ?Sized + Contract>(
    &self,
    implementation: &ImplementationType,
    name: Option<&str>,
  ) -> Result<()> {
    self.register_implementation_erased(&ContractInfo::of::<C>(), implementation, name)
  }

  pub fn try_register_implementation<C: ?Sized + Contract>(
    &self,
    implementation: &ImplementationType,
    name: Option<&str>,
  ) -> bool {
    match self.register_implementation::<C>(implementation, name) {
      Ok(()) => true,
      Err(err) => {
        trace!(container = %self.inner.id, error = %err, "registration rejected");
        false
      }
    }
  }

  pub fn register_implementation_erased(
    &self,
    contract: &ContractInfo,
    implementation: &ImplementationType,
    name: Option<&str>,
  ) -> Result<()> {
    Self::validate_contract(contract)?;
    implementation.validate_for(contract)?;
    self.register_binding(
      contract,
      name,
      Binding::Implementation(Arc::new(implementation.clone())),
    )
  }

  /// Binds a singleton instance to contract `C`. Every resolution returns
  /// the same `Arc`.
  pub fn register_instance<C: ?Sized + Contract>(
    &self,
    instance: Arc<C>,
    name: Option<&str>,
  ) -> Result<()> {
    self.register_instance_erased(&ContractInfo::of::<C>(), wrap_handle::<C>(instance), name)
  }

  pub fn try_register_instance<C: ?Sized + Contract>(
    &self,
    instance: Arc<C>,
    name: Option<&str>,
  ) -> bool {
    match self.register_instance::<C>(instance, name) {
      Ok(()) => true,
      Err(err) => {
        trace!(container = %self.inner.id, error = %err, "registration rejected");
        false
      }
    }
  }

  /// Registers a type-erased instance. `instance` must wrap an `Arc<C>` for
  /// the contract `C` described by `contract`, e.g.
  /// `Arc::new(logger as Arc<dyn Logger>)`.
  pub fn register_instance_erased(
    &self,
    contract: &ContractInfo,
    instance: Arc<dyn Any + Send + Sync>,
    name: Option<&str>,
  ) -> Result<()> {
    Self::validate_contract(contract)?;
    if (*instance).type_id() != contract.handle_type_id() {
      return Err(LocatorError::InstanceContractMismatch {
        contract: contract.type_name(),
      });
    }
    self.register_binding(
      contract,
      name,
      Binding::Instance {
        handle: instance,
        contract: contract.type_name(),
      },
    )
  }

  /// Removes a binding from this container. Fails with
  /// [`LocatorError::NotRegistered`] if there is none.
  pub fn unregister<C: ?Sized + Contract>(&self, name: Option<&str>) -> Result<()> {
    let key = RegistrationKey::new::<C>(name);
    if self.remove_binding(&key)? {
      Ok(())
    } else {
      Err(LocatorError::NotRegistered {
        container: self.inner.id.to_string(),
        contract: key.contract_name(),
        name: key.name().to_owned(),
      })
    }
  }

  /// Removes a binding if present. Returns whether anything was removed.
  pub fn try_unregister<C: ?Sized + Contract>(&self, name: Option<&str>) -> bool {
    matches!(self.remove_binding(&RegistrationKey::new::<C>(name)), Ok(true))
  }

  /// Checks this container only; ancestors are not consulted.
  pub fn is_registered<C: ?Sized + Contract>(&self, name: Option<&str>) -> bool {
    let key = RegistrationKey::new::<C>(name);
    self.inner.state.lock().store.contains_key(&key)
  }

  /// Every binding held by this container, sorted by key.
  pub fn registrations(&self) -> Vec<(RegistrationKey, BindingInfo)> {
    let mut registrations: Vec<_> = {
      let state = self.inner.state.lock();
      state
        .store
        .iter()
        .map(|(key, binding)| (key.clone(), binding.info()))
        .collect()
    };
    registrations.sort_by(|a, b| a.0.cmp(&b.0));
    registrations
  }

  pub fn registration_count(&self) -> usize {
    self.inner.state.lock().store.len()
  }

  /// A registration-only view of this container, as handed to registrars.
  pub fn registrar(&self) -> Registrar<'_> {
    Registrar::new(self)
  }

  // --- Resolution ---

  /// Resolves contract `C`, walking from this container up to the root.
  /// The nearest container with a matching binding wins.
  pub fn resolve<C: ?Sized + Contract>(&self, name: Option<&str>) -> Result<Arc<C>> {
    let contract = ContractInfo::of::<C>();
    let resolved = self.resolve_erased(&contract, name)?;
    resolved
      .downcast::<C>()
      .ok_or(LocatorError::InstanceContractMismatch {
        contract: contract.type_name(),
      })
  }

  pub fn try_resolve<C: ?Sized + Contract>(&self, name: Option<&str>) -> Option<Arc<C>> {
    self.resolve::<C>(name).ok()
  }

  pub fn resolve_erased(&self, contract: &ContractInfo, name: Option<&str>) -> Result<Resolved> {
    let key = RegistrationKey::for_contract(contract, name);
    let mut blocked_at: Option<ContainerId> = None;
    let mut current = Some(self.inner.clone());

    while let Some(node) = current {
      let hit = {
        let state = node.state.lock();
        if state.lifecycle != Lifecycle::Active {
          if Arc::ptr_eq(&node, &self.inner) {
            return Err(self.disposed_error());
          }
          // A disposed ancestor ends the chain.
          break;
        }
        if blocked_at.is_none() && state.preclusions.contains(contract.type_id()) {
          blocked_at = Some(node.id.clone());
        }
        state.store.get(&key).map(|binding| match binding {
          Binding::Instance { handle, .. } => Hit::Instance(handle.clone()),
          Binding::Implementation(implementation) => Hit::Implementation(implementation.clone()),
        })
      };

      if let Some(hit) = hit {
        if let Some(container) = blocked_at {
          trace!(key = %key, precluded_in = %container, "resolution blocked by preclusion");
          return Err(LocatorError::TypePrecluded {
            container: container.to_string(),
            contract: contract.type_name(),
          });
        }
        let handle = match hit {
          Hit::Instance(handle) => handle,
          Hit::Implementation(implementation) => {
            let _guard = ResolutionGuard::enter(node.id.uid, &key)?;
            implementation.instantiate(contract)?
          }
        };
        trace!(key = %key, requested_in = %self.inner.id, resolved_in = %node.id, "resolved");
        return Ok(Resolved::new(handle, contract.type_name()));
      }

      current = node.parent_inner();
    }

    trace!(key = %key, requested_in = %self.inner.id, "resolution failed");
    Err(LocatorError::Resolution {
      contract: contract.type_name(),
      name: key.name().to_owned(),
    })
  }

  pub fn try_resolve_erased(&self, contract: &ContractInfo, name: Option<&str>) -> Option<Resolved> {
    self.resolve_erased(contract, name).ok()
  }

  // --- Lifecycle ---

  /// Creates a child container with an empty store and default configuration.
  pub fn create_child_container(&self, name: &str) -> Result<Container> {
    let child = {
      let mut state = self.inner.state.lock();
      self.ensure_active(state.lifecycle)?;
      let child = ContainerInner::new(
        name,
        Some(Arc::downgrade(&self.inner)),
        self.inner.locator.clone(),
        ContainerConfiguration::default(),
      );
      state.children.push(child.clone());
      child
    };

    if let Some(locator) = self.inner.locator.upgrade() {
      locator.track(&child);
    }
    debug!(container = %self.inner.id, child = %child.id, "child container added");
    self.emit(LocatorEvent::ChildContainerAdded {
      container: self.inner.id.clone(),
      child: child.id.clone(),
    });
    Ok(Container::from_inner(child))
  }

  /// Creates a child container that is disposed when the guard is dropped.
  pub fn create_scoped_child(&self, name: &str) -> Result<ScopedContainer> {
    self.create_child_container(name).map(ScopedContainer::new)
  }

  /// Disposes this container and, depth-first, all of its descendants.
  ///
  /// Disposing twice is a no-op. If this container is the ambient container
  /// of its locator, the ambient container reverts to the root. The root
  /// container cannot be disposed.
  pub fn dispose(&self) -> Result<()> {
    if self.is_root() {
      return Err(LocatorError::RootContainerDisposal);
    }
    self.dispose_tree();
    Ok(())
  }

  fn dispose_tree(&self) {
    let (children, owner) = {
      let mut state = self.inner.state.lock();
      match state.lifecycle {
        Lifecycle::Disposed => return,
        // Someone else is disposing this container, from another thread or
        // further up our own stack. Its remaining subtree still has to be gone
        // before our caller finishes.
        Lifecycle::Disposing => (state.children.clone(), false),
        Lifecycle::Active => {
          state.lifecycle = Lifecycle::Disposing;
          (state.children.clone(), true)
        }
      }
    };

    for child in children {
      Container::from_inner(child).dispose_tree();
    }

    if !owner {
      return;
    }

    let (cleared, orphaned) = {
      let mut state = self.inner.state.lock();
      let cleared = state.store.clear();
      state.preclusions.clear();
      state.invoked_registrars.clear();
      state.lifecycle = Lifecycle::Disposed;
      // Children whose own disposal has not detached them yet.
      let orphaned = std::mem::take(&mut state.children);
      (cleared, orphaned)
    };

    for child in orphaned {
      self.emit(LocatorEvent::ChildContainerRemoved {
        container: self.inner.id.clone(),
        child: child.id.clone(),
      });
    }

    if let Some(locator) = self.inner.locator.upgrade() {
      locator.release(&self.inner);
    }

    if let Some(parent) = self.inner.parent_inner() {
      let detached = {
        let mut state = parent.state.lock();
        let before = state.children.len();
        state
          .children
          .retain(|child| !Arc::ptr_eq(child, &self.inner));
        state.children.len() != before
      };
      if detached {
        let parent = Container::from_inner(parent);
        parent.emit(LocatorEvent::ChildContainerRemoved {
          container: parent.inner.id.clone(),
          child: self.inner.id.clone(),
        });
      }
    }

    debug!(container = %self.inner.id, registrations = cleared.len(), "container disposed");
  }

  /// Empties the root container for a locator reset: children are disposed
  /// and registrations, preclusions, registrar history and configuration
  /// are restored to their initial state.
  pub(crate) fn reset_contents(&self, configuration: ContainerConfiguration) {
    let children = self.inner.state.lock().children.clone();
    for child in children {
      Container::from_inner(child).dispose_tree();
    }

    let mut state = self.inner.state.lock();
    state.store.clear();
    state.preclusions.clear();
    state.invoked_registrars.clear();
    state.configuration = configuration;
  }

  // --- Registrars ---

  /// Validates and invokes `registrars` against this container. See
  /// [`registrar`](crate::registrar) for the rules.
  pub fn invoke_registrars(&self, registrars: &[&RegistrarDescriptor]) -> Result<usize> {
    registrar::invoke_registrars(self, registrars)
  }

  /// Records that a registrar ran here. Returns `false` if it already had.
  pub(crate) fn mark_registrar_invoked(
    &self,
    assembly: &'static str,
    registrar: &'static str,
  ) -> Result<bool> {
    let mut state = self.inner.state.lock();
    self.ensure_active(state.lifecycle)?;
    Ok(state.invoked_registrars.insert((assembly, registrar)))
  }

  pub(crate) fn forget_registrar_invoked(&self, assembly: &'static str, registrar: &'static str) {
    self
      .inner
      .state
      .lock()
      .invoked_registrars
      .remove(&(assembly, registrar));
  }

  // --- Events ---

  /// Subscribes to events raised by this container.
  pub fn subscribe(&self, listener: impl EventListener + 'static) -> ListenerId {
    self.inner.listeners.add(Arc::new(listener))
  }

  pub fn unsubscribe(&self, id: ListenerId) -> bool {
    self.inner.listeners.remove(id)
  }
}

impl PartialEq for Container {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Eq for Container {}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("id", &self.inner.id)
      .field("is_root", &self.is_root())
      .finish_non_exhaustive()
  }
}
