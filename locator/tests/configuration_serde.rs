use fibre_locator::{ContainerConfiguration, ServiceLocator};
use pretty_assertions::assert_eq;

#[test]
fn test_configuration_from_json() {
  let json = r#"{ "throw_on_registration_collision": true, "allow_named_implementations": false }"#;
  let configuration: ContainerConfiguration = serde_json::from_str(json).unwrap();

  // Missing fields take their defaults.
  assert_eq!(
    configuration,
    ContainerConfiguration::new()
      .with_named_implementations(false)
      .with_registration_collision_errors(true)
  );
}

#[test]
fn test_empty_json_is_the_default_configuration() {
  let configuration: ContainerConfiguration = serde_json::from_str("{}").unwrap();
  assert_eq!(configuration, ContainerConfiguration::default());
}

#[test]
fn test_configuration_survives_serialization() {
  let locked = ContainerConfiguration::new()
    .with_preclusion_of_types(false)
    .locked();
  let json = serde_json::to_string(&locked).unwrap();
  assert!(json.contains("\"locked\":true"));

  let restored: ContainerConfiguration = serde_json::from_str(&json).unwrap();
  let locator = ServiceLocator::with_configuration(restored);
  let root = locator.root_container();
  assert_eq!(root.configuration(), locked);
  assert!(root.set_allow_preclusion_of_types(true).is_err());
}
