//! The set of contracts a container refuses to register or resolve.

use crate::contract::ContractInfo;

use std::any::TypeId;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct PreclusionSet {
  types: HashMap<TypeId, &'static str>,
}

impl PreclusionSet {
  pub(crate) fn insert(&mut self, contract: &ContractInfo) -> bool {
    self
      .types
      .insert(contract.type_id(), contract.type_name())
      .is_none()
  }

  pub(crate) fn remove(&mut self, contract: TypeId) -> bool {
    self.types.remove(&contract).is_some()
  }

  pub(crate) fn contains(&self, contract: TypeId) -> bool {
    self.types.contains_key(&contract)
  }

  pub(crate) fn names(&self) -> Vec<&'static str> {
    let mut names: Vec<_> = self.types.values().copied().collect();
    names.sort_unstable();
    names
  }

  pub(crate) fn clear(&mut self) -> Vec<&'static str> {
    self.types.drain().map(|(_, name)| name).collect()
  }
}
