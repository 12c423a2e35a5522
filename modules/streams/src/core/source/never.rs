#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use core::marker::PhantomData;
use portable_atomic::{AtomicBool, Ordering};

use crate::core::{
  publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Publisher that delivers `on_subscribe` and then nothing, ever.
pub struct Never<T> {
  _pd: PhantomData<fn() -> T>,
}

impl<T> Never<T> {
  /// Creates a publisher that never emits and never terminates.
  #[must_use]
  pub const fn new() -> Self {
    Self { _pd: PhantomData }
  }
}

impl<T> Default for Never<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Publisher<T> for Never<T>
where
  T: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(NeverSubscription::new(subscriber.clone()));
    subscriber.on_subscribe(subscription);
  }
}

struct NeverSubscription<T> {
  subscriber: Arc<dyn Subscriber<T>>,
  cancelled:  AtomicBool,
  terminated: AtomicBool,
}

impl<T> NeverSubscription<T> {
  fn new(subscriber: Arc<dyn Subscriber<T>>) -> Self {
    Self { subscriber, cancelled: AtomicBool::new(false), terminated: AtomicBool::new(false) }
  }
}

impl<T> Subscription for NeverSubscription<T>
where
  T: Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if n > 0 || self.cancelled.load(Ordering::Acquire) {
      return;
    }
    if !self.terminated.swap(true, Ordering::AcqRel) {
      self.subscriber.on_error(StreamError::InvalidDemand { requested: n });
    }
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}
