//! An RAII guard that disposes a child container when dropped.

use crate::container::Container;

use std::ops::Deref;
use tracing::warn;

/// A child container that is disposed when this guard goes out of scope.
///
/// Created by [`Container::create_scoped_child`]. Dereferences to the
/// underlying [`Container`].
#[derive(Debug)]
pub struct ScopedContainer {
  container: Container,
}

impl ScopedContainer {
  pub(crate) fn new(container: Container) -> Self {
    Self { container }
  }

  pub fn container(&self) -> &Container {
    &self.container
  }
}

impl Deref for ScopedContainer {
  type Target = Container;

  fn deref(&self) -> &Container {
    &self.container
  }
}

impl Drop for ScopedContainer {
  fn drop(&mut self) {
    if let Err(err) = self.container.dispose() {
      warn!(container = %self.container.id(), error = %err, "failed to dispose scoped container");
    }
  }
}
