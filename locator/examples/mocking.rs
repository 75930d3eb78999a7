use fibre_locator::{contract, implementation, ServiceLocator};
use std::sync::Arc;

trait PaymentGateway: Send + Sync {
  fn charge(&self, cents: u64) -> String;
}
contract!(dyn PaymentGateway);

#[derive(Default)]
struct StripeGateway;
impl PaymentGateway for StripeGateway {
  fn charge(&self, cents: u64) -> String {
    format!("charged {} cents through the card network", cents)
  }
}

struct RecordingGateway;
impl PaymentGateway for RecordingGateway {
  fn charge(&self, cents: u64) -> String {
    format!("recorded a {} cent charge", cents)
  }
}

// Application code only knows the locator.
fn checkout(locator: &ServiceLocator) -> String {
  locator
    .resolve::<dyn PaymentGateway>(None)
    .map(|gateway| gateway.charge(1999))
    .unwrap_or_else(|err| format!("checkout unavailable: {}", err))
}

fn main() -> fibre_locator::Result<()> {
  let locator = ServiceLocator::new();
  let production = locator.root_container();
  production.register_implementation::<dyn PaymentGateway>(
    &implementation!(StripeGateway => dyn PaymentGateway),
    None,
  )?;
  println!("production: {}", checkout(&locator));

  // --- Overlay a mock without touching the production registration ---
  let test = production.create_scoped_child("test")?;
  test.register_instance::<dyn PaymentGateway>(Arc::new(RecordingGateway), None)?;
  locator.set_ambient_container(&test)?;

  let result = checkout(&locator);
  println!("under test: {}", result);
  assert!(result.starts_with("recorded"));

  // Dropping the scope disposes the overlay, and the ambient container
  // falls back to the root.
  drop(test);
  let result = checkout(&locator);
  println!("after test: {}", result);
  assert!(result.contains("card network"));
  Ok(())
}
