use fibre_locator::{
  contract, global, implementation, register_services, resolve, LocatorEvent, Registrar,
  ServiceRegistrar,
};
use tracing_subscriber::EnvFilter;

trait Clock: Send + Sync {
  fn now(&self) -> u64;
}
contract!(dyn Clock);

#[derive(Default)]
struct FixedClock;
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    1_700_000_000
  }
}

// The one registrar of this package. Bootstrap finds it without any
// explicit wiring in `main`.
#[derive(Default)]
struct DemoServices;

impl ServiceRegistrar for DemoServices {
  fn register_service_instances(&self, registrar: &Registrar<'_>) -> fibre_locator::Result<()> {
    registrar.register_implementation::<dyn Clock>(&implementation!(FixedClock => dyn Clock), None)
  }
}

register_services!(DemoServices);

fn main() -> fibre_locator::Result<()> {
  // RUST_LOG=fibre_locator=debug shows the locator's own diagnostics.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  global().subscribe(|event: &LocatorEvent| {
    if let LocatorEvent::BeforeSingleRegistrarInvoked { registrar, assembly, .. } = event {
      println!("invoking {} from {}", registrar, assembly);
    }
  });

  let invoked = global().bootstrap(&global().root_container())?;
  println!("{} registrar(s) invoked", invoked);

  assert_eq!(resolve!(trait Clock).now(), 1_700_000_000);
  Ok(())
}
