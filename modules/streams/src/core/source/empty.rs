#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use core::marker::PhantomData;
use portable_atomic::{AtomicBool, Ordering};

use crate::core::{
  publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Publisher that completes right after `on_subscribe` returns.
pub struct Empty<T> {
  _pd: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
  /// Creates an immediately completing publisher.
  #[must_use]
  pub const fn new() -> Self {
    Self { _pd: PhantomData }
  }
}

impl<T> Default for Empty<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Publisher<T> for Empty<T>
where
  T: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(ImmediateSubscription::new());
    subscriber.on_subscribe(subscription.clone());
    subscription.finish(|outcome| match outcome {
      | ImmediateOutcome::Terminate => subscriber.on_complete(),
      | ImmediateOutcome::InvalidDemand => subscriber.on_error(StreamError::InvalidDemand { requested: 0 }),
    });
  }
}

/// Outcome observed once the consumer returns from `on_subscribe`.
pub(in crate::core::source) enum ImmediateOutcome {
  /// Deliver the source's own terminal signal.
  Terminate,
  /// The consumer issued a zero request before the terminal went out.
  InvalidDemand,
}

/// Subscription handed out by sources that terminate immediately.
///
/// Demand is irrelevant; the subscription only records cancellation and
/// zero-demand misuse occurring inside `on_subscribe`.
pub(in crate::core::source) struct ImmediateSubscription {
  cancelled: AtomicBool,
  rejected:  AtomicBool,
}

impl ImmediateSubscription {
  pub(in crate::core::source) const fn new() -> Self {
    Self { cancelled: AtomicBool::new(false), rejected: AtomicBool::new(false) }
  }

  /// Runs `deliver` with the pending outcome unless the consumer cancelled.
  pub(in crate::core::source) fn finish(&self, deliver: impl FnOnce(ImmediateOutcome)) {
    if self.cancelled.load(Ordering::Acquire) {
      return;
    }
    if self.rejected.load(Ordering::Acquire) {
      deliver(ImmediateOutcome::InvalidDemand);
    } else {
      deliver(ImmediateOutcome::Terminate);
    }
  }
}

impl Subscription for ImmediateSubscription {
  fn request(&self, n: u64) {
    if n == 0 {
      self.rejected.store(true, Ordering::Release);
    }
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}
