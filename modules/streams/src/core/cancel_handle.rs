
use alloc::sync::{Arc, Weak};

use crate::core::{disposable::Disposable, subscription::Subscription};

/// Shared, weak handle exposing only cancellation of a live subscription.
///
/// Ownership of the subscription state stays with the consumer; the handle
/// becomes a no-op once the chain has been torn down.
#[derive(Clone)]
pub struct CancelHandle {
  subscription: Weak<dyn Subscription>,
}

impl CancelHandle {
  /// Creates a handle aliasing `subscription` without keeping it alive.
  #[must_use]
  pub fn new(subscription: &Arc<dyn Subscription>) -> Self {
    Self { subscription: Arc::downgrade(subscription) }
  }

  /// Creates a handle that is already dead.
  #[must_use]
  pub fn detached() -> Self {
    Self { subscription: Weak::<DetachedSubscription>::new() }
  }

  /// Cancels the subscription when it is still alive.
  pub fn cancel(&self) {
    if let Some(subscription) = self.subscription.upgrade() {
      subscription.cancel();
    }
  }

  /// Returns `true` while the underlying subscription is still reachable.
  #[must_use]
  pub fn is_live(&self) -> bool {
    self.subscription.strong_count() > 0
  }
}

impl Disposable for CancelHandle {
  fn dispose(&self) {
    self.cancel();
  }
}

struct DetachedSubscription;

impl Subscription for DetachedSubscription {
  fn request(&self, _n: u64) {}

  fn cancel(&self) {}
}
