use fibre_locator::{contract, global, implementation, resolve};

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}
contract!(dyn MessageSender);

#[derive(Default)]
struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

#[derive(Default)]
struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() -> fibre_locator::Result<()> {
  let root = global().root_container();

  // Both implementations live side by side under different names.
  root.register_implementation::<dyn MessageSender>(
    &implementation!(EmailSender => dyn MessageSender),
    Some("email"),
  )?;
  root.register_implementation::<dyn MessageSender>(
    &implementation!(SmsSender => dyn MessageSender),
    Some("sms"),
  )?;

  // The caller picks one at the point of resolution.
  let email_notifier = resolve!(trait MessageSender, "email");
  let sms_notifier = resolve!(trait MessageSender, "sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));

  // There is no default binding, only the named ones.
  assert!(global().try_resolve::<dyn MessageSender>(None).is_none());
  Ok(())
}
