use alloc::sync::Arc;
use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;

use crate::core::{cancel_handle::CancelHandle, subscription::Subscription};

/// Subscription slot shared between a [`BaseConsumer`](crate::core::BaseConsumer)
/// and the hooks it dispatches.
///
/// Hooks receive `&ConsumerControl` so they can request demand or cancel from
/// inside any callback without owning the consumer.
pub struct ConsumerControl {
  subscription: Mutex<Option<Arc<dyn Subscription>>>,
  cancelled:    AtomicBool,
}

impl ConsumerControl {
  /// Creates an empty slot awaiting `on_subscribe`.
  #[must_use]
  pub const fn new() -> Self {
    Self { subscription: Mutex::new(None), cancelled: AtomicBool::new(false) }
  }

  /// Stores the incoming subscription; a late arrival after cancellation is
  /// cancelled immediately.
  pub fn install(&self, subscription: Arc<dyn Subscription>) {
    if self.cancelled.load(Ordering::Acquire) {
      subscription.cancel();
      return;
    }
    *self.subscription.lock() = Some(subscription);
  }

  /// Forwards demand to the stored subscription.
  pub fn request(&self, n: u64) {
    let subscription = self.subscription.lock().clone();
    if let Some(subscription) = subscription {
      subscription.request(n);
    }
  }

  /// Cancels the stored subscription and drops it. Idempotent.
  pub fn cancel(&self) -> bool {
    if self.cancelled.swap(true, Ordering::AcqRel) {
      return false;
    }
    let subscription = self.subscription.lock().take();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
    true
  }

  /// Drops the stored subscription after a terminal signal.
  pub(crate) fn release(&self) {
    self.subscription.lock().take();
  }

  /// Returns a weak cancellation-only handle to the stored subscription.
  #[must_use]
  pub fn cancel_handle(&self) -> CancelHandle {
    match self.subscription.lock().as_ref() {
      | Some(subscription) => CancelHandle::new(subscription),
      | None => CancelHandle::detached(),
    }
  }
}

impl Default for ConsumerControl {
  fn default() -> Self {
    Self::new()
  }
}
