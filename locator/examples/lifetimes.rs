use fibre_locator::{contract, ImplementationType, ServiceLocator};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

trait RequestTracker: Send + Sync {
  fn id(&self) -> usize;
}
contract!(dyn RequestTracker);

struct Tracker {
  id: usize,
}

impl RequestTracker for Tracker {
  fn id(&self) -> usize {
    self.id
  }
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next_tracker() -> Tracker {
  println!("Creating Tracker...");
  Tracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }
}

fn main() -> fibre_locator::Result<()> {
  let locator = ServiceLocator::new();
  let root = locator.root_container();

  // --- Instance registration ---
  // Built once, here; every resolution returns the same Arc.
  root.register_instance::<dyn RequestTracker>(Arc::new(next_tracker()), Some("instance"))?;

  // --- Implementation registration ---
  // The constructor runs on EVERY resolution.
  let per_call = ImplementationType::builder::<Tracker>()
    .constructor(next_tracker)
    .implements::<dyn RequestTracker>(|it| it as Arc<dyn RequestTracker>)
    .build();
  root.register_implementation::<dyn RequestTracker>(&per_call, Some("per_call"))?;

  println!("--- Resolving instances ---");
  let s1 = locator.resolve::<dyn RequestTracker>(Some("instance"))?;
  let s2 = locator.resolve::<dyn RequestTracker>(Some("instance"))?;
  println!("Instance 1 ID: {}, Instance 2 ID: {}", s1.id(), s2.id());
  assert!(Arc::ptr_eq(&s1, &s2), "Instance bindings should be shared");

  println!("--- Resolving implementations ---");
  let t1 = locator.resolve::<dyn RequestTracker>(Some("per_call"))?;
  let t2 = locator.resolve::<dyn RequestTracker>(Some("per_call"))?;
  println!("Implementation 1 ID: {}, Implementation 2 ID: {}", t1.id(), t2.id());
  assert_eq!(t1.id(), 1);
  assert_eq!(t2.id(), 2);
  assert!(
    !Arc::ptr_eq(&t1, &t2),
    "Implementation bindings should construct a new instance each time"
  );
  Ok(())
}
