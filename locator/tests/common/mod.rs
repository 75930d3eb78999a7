#![allow(dead_code)]

use fibre_locator::{contract, implementation, EventListener, ImplementationType, LocatorEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Logger ---

pub trait Logger: Send + Sync {
  fn label(&self) -> String;
}

contract!(dyn Logger);

#[derive(Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
  fn label(&self) -> String {
    "console".to_string()
  }
}

pub struct MockLogger {
  pub tag: &'static str,
}

impl Logger for MockLogger {
  fn label(&self) -> String {
    format!("mock:{}", self.tag)
  }
}

pub fn console_logger() -> ImplementationType {
  implementation!(ConsoleLogger => dyn Logger)
}

// --- Widget ---

pub trait Widget: Send + Sync {
  fn serial(&self) -> usize;
  fn kind(&self) -> &'static str;
}

contract!(dyn Widget);

static WIDGET_SERIALS: AtomicUsize = AtomicUsize::new(0);

pub struct BasicWidget {
  serial: usize,
}

impl Default for BasicWidget {
  fn default() -> Self {
    Self {
      serial: WIDGET_SERIALS.fetch_add(1, Ordering::SeqCst),
    }
  }
}

impl Widget for BasicWidget {
  fn serial(&self) -> usize {
    self.serial
  }
  fn kind(&self) -> &'static str {
    "basic"
  }
}

#[derive(Default)]
pub struct FancyWidget;

impl Widget for FancyWidget {
  fn serial(&self) -> usize {
    usize::MAX
  }
  fn kind(&self) -> &'static str {
    "fancy"
  }
}

pub fn basic_widget() -> ImplementationType {
  implementation!(BasicWidget => dyn Widget)
}

pub fn fancy_widget() -> ImplementationType {
  implementation!(FancyWidget => dyn Widget)
}

// --- Secret ---

pub trait Secret: Send + Sync {
  fn reveal(&self) -> &'static str;
}

contract!(dyn Secret);

#[derive(Default)]
pub struct SecretImpl;

impl Secret for SecretImpl {
  fn reveal(&self) -> &'static str {
    "hunter2"
  }
}

pub fn secret_impl() -> ImplementationType {
  implementation!(SecretImpl => dyn Secret)
}

// --- Event recording ---

#[derive(Clone, Default)]
pub struct EventRecorder {
  events: Arc<Mutex<Vec<LocatorEvent>>>,
}

impl EventRecorder {
  pub fn events(&self) -> Vec<LocatorEvent> {
    self.events.lock().unwrap().clone()
  }

  pub fn clear(&self) {
    self.events.lock().unwrap().clear();
  }
}

impl EventListener for EventRecorder {
  fn on_event(&self, event: &LocatorEvent) {
    self.events.lock().unwrap().push(event.clone());
  }
}
