mod common;

use common::*;
use fibre_locator::{
  BindingInfo, Contract, ContractInfo, ImplementationType, LocatorError, LocatorEvent,
  RegistrationKey, ServiceLocator, TypeKind,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// A concrete type pretending to be a contract.
struct PlainValue;
impl Contract for PlainValue {
  const KIND: TypeKind = TypeKind::Concrete;
}

// A contract standing for a generic family.
trait Repository: Send + Sync {}
impl Contract for dyn Repository {
  const OPEN_GENERIC: bool = true;
}

// Both concrete and open generic; the concrete check comes first.
struct PlainFamily;
impl Contract for PlainFamily {
  const KIND: TypeKind = TypeKind::Concrete;
  const OPEN_GENERIC: bool = true;
}

// An abstract base that cannot be constructed directly.
trait Shape: Send + Sync {
  fn sides(&self) -> u32;
}
impl Contract for dyn Shape {
  const KIND: TypeKind = TypeKind::Abstract;
}

#[derive(Default)]
struct Triangle;
impl Shape for Triangle {
  fn sides(&self) -> u32 {
    3
  }
}

#[test]
fn test_concrete_contract_is_rejected() {
  let locator = ServiceLocator::new();
  let err = locator
    .root_container()
    .register_instance::<PlainValue>(Arc::new(PlainValue), None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::InvalidContractType { .. }));

  let err = locator
    .root_container()
    .register_instance::<PlainFamily>(Arc::new(PlainFamily), None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::InvalidContractType { .. }));
}

#[test]
fn test_open_generic_contract_is_rejected() {
  struct Users;
  impl Repository for Users {}

  let locator = ServiceLocator::new();
  let err = locator
    .root_container()
    .register_instance::<dyn Repository>(Arc::new(Users), None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::OpenGenericNotSupported { .. }));
}

#[test]
fn test_abstract_contract_is_accepted() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  let triangle = ImplementationType::builder::<Triangle>()
    .default_constructor()
    .implements::<dyn Shape>(|it| it as Arc<dyn Shape>)
    .build();

  root.register_implementation::<dyn Shape>(&triangle, None).unwrap();
  assert_eq!(root.resolve::<dyn Shape>(None).unwrap().sides(), 3);
}

#[test]
fn test_implementation_must_satisfy_the_contract() {
  let locator = ServiceLocator::new();
  let err = locator
    .root_container()
    .register_implementation::<dyn Logger>(&basic_widget(), None)
    .unwrap_err();
  assert!(matches!(
    err,
    LocatorError::ImplementationContractMismatch { .. }
  ));
}

#[test]
fn test_implementation_must_have_a_default_constructor() {
  let locator = ServiceLocator::new();
  let no_constructor = ImplementationType::builder::<ConsoleLogger>()
    .implements::<dyn Logger>(|it| it as Arc<dyn Logger>)
    .build();

  let err = locator
    .root_container()
    .register_implementation::<dyn Logger>(&no_constructor, None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::NoDefaultConstructor { .. }));
}

#[test]
fn test_erased_instance_must_match_the_contract() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  let logger = ContractInfo::of::<dyn Logger>();

  let widget: Arc<dyn Widget> = Arc::new(FancyWidget);
  let err = root
    .register_instance_erased(&logger, Arc::new(widget), None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::InstanceContractMismatch { .. }));

  let console: Arc<dyn Logger> = Arc::new(ConsoleLogger);
  root
    .register_instance_erased(&logger, Arc::new(console), None)
    .unwrap();
  assert_eq!(root.resolve::<dyn Logger>(None).unwrap().label(), "console");
}

#[test]
fn test_named_registration_requires_named_support() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  root.set_allow_named_implementations(false).unwrap();

  let err = root
    .register_implementation::<dyn Logger>(&console_logger(), Some("audit"))
    .unwrap_err();
  assert!(matches!(err, LocatorError::NamedRegistrationDisabled { .. }));

  // An empty name is the default registration, not a named one.
  root
    .register_implementation::<dyn Logger>(&console_logger(), Some(""))
    .unwrap();
  assert!(root.is_registered::<dyn Logger>(None));
}

#[test]
fn test_collision_throws_when_configured() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  root.set_throw_on_registration_collision(true).unwrap();

  root
    .register_implementation::<dyn Widget>(&basic_widget(), None)
    .unwrap();
  let err = root
    .register_implementation::<dyn Widget>(&fancy_widget(), None)
    .unwrap_err();
  assert!(matches!(err, LocatorError::RegistrationCollision { .. }));

  // The first binding is untouched.
  assert_eq!(root.resolve::<dyn Widget>(None).unwrap().kind(), "basic");
}

#[test]
fn test_collision_overwrites_when_not_configured() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  root.set_throw_on_registration_collision(false).unwrap();

  root
    .register_implementation::<dyn Widget>(&basic_widget(), None)
    .unwrap();
  root
    .register_implementation::<dyn Widget>(&fancy_widget(), None)
    .unwrap();

  assert_eq!(root.resolve::<dyn Widget>(None).unwrap().kind(), "fancy");
  assert_eq!(root.registration_count(), 1);
}

#[test]
fn test_try_variants_report_failure_as_false() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  root.set_throw_on_registration_collision(true).unwrap();

  assert!(root.try_register_implementation::<dyn Widget>(&basic_widget(), None));
  assert!(!root.try_register_implementation::<dyn Widget>(&fancy_widget(), None));
  assert!(root.try_register_instance::<dyn Logger>(Arc::new(MockLogger { tag: "a" }), None));
  assert!(!root.try_register_instance::<dyn Logger>(Arc::new(MockLogger { tag: "b" }), None));
  assert!(!root.try_register_instance::<PlainValue>(Arc::new(PlainValue), None));
}

#[test]
fn test_unregister() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();

  assert!(matches!(
    root.unregister::<dyn Logger>(None),
    Err(LocatorError::NotRegistered { .. })
  ));
  assert!(!root.try_unregister::<dyn Logger>(None));

  root
    .register_implementation::<dyn Logger>(&console_logger(), Some("audit"))
    .unwrap();
  assert!(root.is_registered::<dyn Logger>(Some("audit")));
  assert!(!root.is_registered::<dyn Logger>(None));

  root.unregister::<dyn Logger>(Some("audit")).unwrap();
  assert!(!root.is_registered::<dyn Logger>(Some("audit")));
  assert!(root.try_resolve::<dyn Logger>(Some("audit")).is_none());
}

#[test]
fn test_registrations_are_listed_in_key_order() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  root
    .register_implementation::<dyn Logger>(&console_logger(), Some("b"))
    .unwrap();
  root
    .register_implementation::<dyn Logger>(&console_logger(), Some("a"))
    .unwrap();
  root
    .register_instance::<dyn Logger>(Arc::new(MockLogger { tag: "default" }), None)
    .unwrap();

  let names: Vec<String> = root
    .registrations()
    .into_iter()
    .map(|(key, _)| key.name().to_owned())
    .collect();
  assert_eq!(names, vec!["", "a", "b"]);
}

#[test]
fn test_registration_events() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  let recorder = EventRecorder::default();
  root.subscribe(recorder.clone());

  root
    .register_implementation::<dyn Widget>(&basic_widget(), None)
    .unwrap();
  root
    .register_implementation::<dyn Widget>(&fancy_widget(), None)
    .unwrap();
  root.unregister::<dyn Widget>(None).unwrap();

  let key = RegistrationKey::new::<dyn Widget>(None);
  assert_eq!(
    recorder.events(),
    vec![
      LocatorEvent::RegistrationAdded {
        container: root.id().clone(),
        key: key.clone(),
        binding: BindingInfo::Implementation {
          type_name: std::any::type_name::<BasicWidget>(),
        },
        replaced: false,
      },
      LocatorEvent::RegistrationAdded {
        container: root.id().clone(),
        key: key.clone(),
        binding: BindingInfo::Implementation {
          type_name: std::any::type_name::<FancyWidget>(),
        },
        replaced: true,
      },
      LocatorEvent::RegistrationRemoved {
        container: root.id().clone(),
        key,
      },
    ]
  );
}

#[test]
fn test_instance_event_names_the_contract() {
  let locator = ServiceLocator::new();
  let root = locator.root_container();
  let recorder = EventRecorder::default();
  root.subscribe(recorder.clone());

  root
    .register_instance::<dyn Logger>(Arc::new(MockLogger { tag: "named" }), None)
    .unwrap();

  let binding = BindingInfo::Instance {
    contract: std::any::type_name::<dyn Logger>(),
  };
  assert_eq!(
    recorder.events(),
    vec![LocatorEvent::RegistrationAdded {
      container: root.id().clone(),
      key: RegistrationKey::new::<dyn Logger>(None),
      binding,
      replaced: false,
    }]
  );
  assert_eq!(
    binding.to_string(),
    format!("instance for {}", std::any::type_name::<dyn Logger>())
  );
}

#[test]
fn test_locator_listeners_see_events_from_every_container() {
  let locator = ServiceLocator::new();
  let recorder = EventRecorder::default();
  let id = locator.subscribe(recorder.clone());

  let child = locator.root_container().create_child_container("child").unwrap();
  child
    .register_instance::<dyn Logger>(Arc::new(MockLogger { tag: "child" }), None)
    .unwrap();

  let events = recorder.events();
  assert_eq!(events.len(), 2);
  assert!(matches!(events[0], LocatorEvent::ChildContainerAdded { .. }));
  assert_eq!(events[1].container(), child.id());

  assert!(locator.unsubscribe(id));
  child.unregister::<dyn Logger>(None).unwrap();
  assert_eq!(recorder.events().len(), 2);
}
