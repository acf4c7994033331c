//! User-facing failure notifications.

use log::*;
use std::sync::Mutex;

/// Receives fire-and-forget failure toasts.
///
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that reports toasts through the log.
///
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Notifier that keeps every toast in memory, oldest first.
///
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the toasts received so far.
    ///
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn error(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(message.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.error("first");
        notifier.error("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn log_notifier_is_usable_as_trait_object() {
        let notifier: Box<dyn Notifier> = Box::new(LogNotifier);
        notifier.error("ignored");
    }
}
