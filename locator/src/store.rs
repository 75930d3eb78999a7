//! Per-container binding storage.
//!
//! The store is not thread-safe on its own; the owning container guards it
//! with its lock.

use crate::binding::Binding;
use crate::key::RegistrationKey;

use std::any::TypeId;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct RegistrationStore {
  bindings: HashMap<RegistrationKey, Binding>,
}

impl RegistrationStore {
  /// Inserts `binding` only if `key` is free. Returns `false` on a duplicate.
  pub(crate) fn add(&mut self, key: RegistrationKey, binding: Binding) -> bool {
    if self.bindings.contains_key(&key) {
      return false;
    }
    self.bindings.insert(key, binding);
    true
  }

  /// Inserts or replaces, returning the replaced binding.
  pub(crate) fn add_or_update(&mut self, key: RegistrationKey, binding: Binding) -> Option<Binding> {
    self.bindings.insert(key, binding)
  }

  pub(crate) fn remove(&mut self, key: &RegistrationKey) -> Option<Binding> {
    self.bindings.remove(key)
  }

  pub(crate) fn get(&self, key: &RegistrationKey) -> Option<&Binding> {
    self.bindings.get(key)
  }

  pub(crate) fn contains_key(&self, key: &RegistrationKey) -> bool {
    self.bindings.contains_key(key)
  }

  /// Returns `true` if any binding, default or named, exists for `contract`.
  pub(crate) fn contains_contract(&self, contract: TypeId) -> bool {
    self.bindings.keys().any(|key| key.contract() == contract)
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&RegistrationKey, &Binding)> {
    self.bindings.iter()
  }

  pub(crate) fn len(&self) -> usize {
    self.bindings.len()
  }

  pub(crate) fn clear(&mut self) -> Vec<RegistrationKey> {
    self.bindings.drain().map(|(key, _)| key).collect()
  }

  /// Drops every named binding, keeping the defaults.
  pub(crate) fn remove_named(&mut self) -> Vec<RegistrationKey> {
    let named: Vec<RegistrationKey> = self
      .bindings
      .keys()
      .filter(|key| !key.is_default())
      .cloned()
      .collect();
    for key in &named {
      self.bindings.remove(key);
    }
    named
  }
}
