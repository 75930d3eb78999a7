//! The key that identifies a binding inside a container.

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::contract::{Contract, ContractInfo};

/// Identifies a binding: a contract type plus an optional name.
///
/// The name is normalized on construction, so `None` and `Some("")` both
/// denote the default registration for the contract. Equality, hashing and
/// ordering only look at the contract's `TypeId` and the normalized name.
#[derive(Clone)]
pub struct RegistrationKey {
  contract: TypeId,
  contract_name: &'static str,
  name: String,
}

impl RegistrationKey {
  pub fn new<C: ?Sized + Contract>(name: Option<&str>) -> Self {
    Self::for_contract(&ContractInfo::of::<C>(), name)
  }

  pub fn for_contract(contract: &ContractInfo, name: Option<&str>) -> Self {
    Self {
      contract: contract.type_id(),
      contract_name: contract.type_name(),
      name: name.unwrap_or_default().to_owned(),
    }
  }

  pub fn contract(&self) -> TypeId {
    self.contract
  }

  pub fn contract_name(&self) -> &'static str {
    self.contract_name
  }

  /// The normalized name; empty for the default registration.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_default(&self) -> bool {
    self.name.is_empty()
  }
}

impl PartialEq for RegistrationKey {
  fn eq(&self, other: &Self) -> bool {
    self.contract == other.contract && self.name == other.name
  }
}

impl Eq for RegistrationKey {}

impl Hash for RegistrationKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.contract.hash(state);
    self.name.hash(state);
  }
}

impl PartialOrd for RegistrationKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for RegistrationKey {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .contract
      .cmp(&other.contract)
      .then_with(|| self.name.cmp(&other.name))
  }
}

impl fmt::Debug for RegistrationKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_default() {
      write!(f, "Key({})", self.contract_name)
    } else {
      write!(f, "Key({}, Name({}))", self.contract_name, self.name)
    }
  }
}

impl fmt::Display for RegistrationKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_default() {
      f.write_str(self.contract_name)
    } else {
      write!(f, "{}[{}]", self.contract_name, self.name)
    }
  }
}
