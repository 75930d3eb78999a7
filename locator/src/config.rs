//! Per-container configuration flags.

use std::fmt;

/// Identifies one configuration flag in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationSetting {
  AllowNamedImplementations,
  AllowPreclusionOfTypes,
  ThrowOnRegistrationCollision,
  Locked,
}

impl fmt::Display for ConfigurationSetting {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigurationSetting::AllowNamedImplementations => write!(f, "allow_named_implementations"),
      ConfigurationSetting::AllowPreclusionOfTypes => write!(f, "allow_preclusion_of_types"),
      ConfigurationSetting::ThrowOnRegistrationCollision => {
        write!(f, "throw_on_registration_collision")
      }
      ConfigurationSetting::Locked => write!(f, "locked"),
    }
  }
}

/// Raised when a setter is called on a locked configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedError;

/// The behavior flags of a single container.
///
/// By default named implementations and type preclusion are allowed, and a
/// second registration for the same key silently replaces the first. Once
/// [locked](ContainerConfiguration::lock), every setter fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(default)
)]
pub struct ContainerConfiguration {
  allow_named_implementations: bool,
  allow_preclusion_of_types: bool,
  throw_on_registration_collision: bool,
  locked: bool,
}

impl Default for ContainerConfiguration {
  fn default() -> Self {
    Self {
      allow_named_implementations: true,
      allow_preclusion_of_types: true,
      throw_on_registration_collision: false,
      locked: false,
    }
  }
}

impl ContainerConfiguration {
  pub fn new() -> Self {
    Self::default()
  }

  // --- Builder-style construction ---

  pub fn with_named_implementations(mut self, allow: bool) -> Self {
    self.allow_named_implementations = allow;
    self
  }

  pub fn with_preclusion_of_types(mut self, allow: bool) -> Self {
    self.allow_preclusion_of_types = allow;
    self
  }

  pub fn with_registration_collision_errors(mut self, throw: bool) -> Self {
    self.throw_on_registration_collision = throw;
    self
  }

  pub fn locked(mut self) -> Self {
    self.locked = true;
    self
  }

  // --- Getters ---

  pub fn allows_named_implementations(&self) -> bool {
    self.allow_named_implementations
  }

  pub fn allows_preclusion_of_types(&self) -> bool {
    self.allow_preclusion_of_types
  }

  pub fn throws_on_registration_collision(&self) -> bool {
    self.throw_on_registration_collision
  }

  pub fn is_locked(&self) -> bool {
    self.locked
  }

  pub fn get(&self, setting: ConfigurationSetting) -> bool {
    match setting {
      ConfigurationSetting::AllowNamedImplementations => self.allow_named_implementations,
      ConfigurationSetting::AllowPreclusionOfTypes => self.allow_preclusion_of_types,
      ConfigurationSetting::ThrowOnRegistrationCollision => self.throw_on_registration_collision,
      ConfigurationSetting::Locked => self.locked,
    }
  }

  // --- Setters ---
  // Each returns the previous value.

  pub fn set_allow_named_implementations(&mut self, allow: bool) -> Result<bool, LockedError> {
    self.set(ConfigurationSetting::AllowNamedImplementations, allow)
  }

  pub fn set_allow_preclusion_of_types(&mut self, allow: bool) -> Result<bool, LockedError> {
    self.set(ConfigurationSetting::AllowPreclusionOfTypes, allow)
  }

  pub fn set_throw_on_registration_collision(&mut self, throw: bool) -> Result<bool, LockedError> {
    self.set(ConfigurationSetting::ThrowOnRegistrationCollision, throw)
  }

  /// Locks the configuration and returns the previous lock state. Locking
  /// twice is a no-op that returns `true`.
  pub fn lock(&mut self) -> bool {
    std::mem::replace(&mut self.locked, true)
  }

  pub(crate) fn set(&mut self, setting: ConfigurationSetting, value: bool) -> Result<bool, LockedError> {
    if self.locked {
      return Err(LockedError);
    }
    let slot = match setting {
      ConfigurationSetting::AllowNamedImplementations => &mut self.allow_named_implementations,
      ConfigurationSetting::AllowPreclusionOfTypes => &mut self.allow_preclusion_of_types,
      ConfigurationSetting::ThrowOnRegistrationCollision => {
        &mut self.throw_on_registration_collision
      }
      ConfigurationSetting::Locked => return Ok(self.lock()),
    };
    Ok(std::mem::replace(slot, value))
  }
}
