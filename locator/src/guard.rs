//! Re-entrancy protection for implementation construction.

use crate::error::{LocatorError, Result};
use crate::key::RegistrationKey;

use std::cell::RefCell;
use std::collections::HashSet;
use uuid::Uuid;

thread_local! {
  // Bindings currently being constructed on this thread, keyed by the
  // container that owns the binding. A child binding that resolves the same
  // key from its parent is a different entry and is allowed.
  static CONSTRUCTING: RefCell<HashSet<(Uuid, RegistrationKey)>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking a binding as under construction on this thread.
///
/// Entering the same binding twice before the first guard drops means a
/// constructor resolved itself, which would otherwise recurse forever.
pub(crate) struct ResolutionGuard {
  entry: (Uuid, RegistrationKey),
}

impl ResolutionGuard {
  pub(crate) fn enter(container: Uuid, key: &RegistrationKey) -> Result<Self> {
    let entry = (container, key.clone());
    let inserted = CONSTRUCTING.with(|constructing| constructing.borrow_mut().insert(entry.clone()));
    if !inserted {
      return Err(LocatorError::CircularResolution {
        contract: key.contract_name(),
        name: key.name().to_owned(),
      });
    }
    Ok(Self { entry })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    CONSTRUCTING.with(|constructing| {
      constructing.borrow_mut().remove(&self.entry);
    });
  }
}
