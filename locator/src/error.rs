use thiserror::Error;

/// A boxed error returned by fallible constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the `fibre_locator` library.
#[derive(Debug, Error)]
pub enum LocatorError {
  // --- Contract shape ---
  #[error("Contract type '{contract}' must be an interface or abstract type")]
  InvalidContractType { contract: &'static str },

  #[error("Open generic contract type '{contract}' is not supported")]
  OpenGenericNotSupported { contract: &'static str },

  #[error("Implementation '{implementation}' does not satisfy contract '{contract}'")]
  ImplementationContractMismatch {
    contract: &'static str,
    implementation: &'static str,
  },

  #[error("Implementation '{implementation}' has no default constructor")]
  NoDefaultConstructor { implementation: &'static str },

  #[error("Instance is not assignable to contract '{contract}'")]
  InstanceContractMismatch { contract: &'static str },

  // --- Policy ---
  #[error("Named registration '{name}' for '{contract}' rejected: named implementations are disabled in container '{container}'")]
  NamedRegistrationDisabled {
    container: String,
    contract: &'static str,
    name: String,
  },

  #[error("Type preclusion is disabled in container '{container}'")]
  PreclusionDisabled { container: String },

  #[error("Contract '{contract}' is precluded in container '{container}'")]
  TypePrecluded {
    container: String,
    contract: &'static str,
  },

  #[error("Contract '{contract}' is registered in container '{container}' and cannot be precluded")]
  PreclusionConflict {
    container: String,
    contract: &'static str,
  },

  #[error("Configuration of container '{container}' is locked")]
  ConfigurationLocked { container: String },

  // --- Collision ---
  #[error("A registration for '{contract}' (name: '{name}') already exists in container '{container}'")]
  RegistrationCollision {
    container: String,
    contract: &'static str,
    name: String,
  },

  // --- Resolution ---
  #[error("Failed to resolve '{contract}' (name: '{name}')")]
  Resolution { contract: &'static str, name: String },

  #[error("No registration for '{contract}' (name: '{name}') in container '{container}'")]
  NotRegistered {
    container: String,
    contract: &'static str,
    name: String,
  },

  #[error("Circular resolution detected for '{contract}' (name: '{name}')")]
  CircularResolution { contract: &'static str, name: String },

  #[error("Constructing '{implementation}' failed: {source}")]
  ConstructionFailed {
    implementation: &'static str,
    #[source]
    source: BoxError,
  },

  // --- Bootstrap ---
  #[error("Registrar bootstrap failed with {} error(s)", .0.len())]
  Bootstrap(Vec<RegistrarError>),

  #[error("Registrar '{registrar}' failed: {source}")]
  RegistrarFailed {
    registrar: &'static str,
    #[source]
    source: Box<LocatorError>,
  },

  // --- Lifecycle ---
  #[error("The root container cannot be disposed")]
  RootContainerDisposal,

  #[error("Container '{container}' has been disposed")]
  ContainerDisposed { container: String },

  #[error("Container '{container}' does not belong to this locator's container tree")]
  InvalidAmbientContainer { container: String },
}

/// A single problem found while validating registrars for a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
  #[error("Assembly '{assembly}' declares more than one registrar: {registrars:?}")]
  MultipleRegistrarsInAssembly {
    assembly: &'static str,
    registrars: Vec<&'static str>,
  },

  #[error("Registrar '{registrar}' has no default constructor")]
  RegistrarMissingDefaultConstructor { registrar: &'static str },

  #[error("Registrar '{registrar}' is abstract")]
  AbstractRegistrar { registrar: &'static str },
}

/// A specialized `Result` type for `fibre_locator` operations.
pub type Result<T, E = LocatorError> = std::result::Result<T, E>;
