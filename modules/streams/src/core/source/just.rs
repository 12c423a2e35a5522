
use alloc::sync::Arc;
use portable_atomic::{AtomicU8, Ordering};
use spin::Mutex;

use crate::core::{
  publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

const IDLE: u8 = 0;
const EMITTED: u8 = 1;
const CANCELLED: u8 = 2;

/// Publisher emitting a single value on first positive demand.
pub struct Just<T> {
  value: T,
}

impl<T> Just<T> {
  /// Creates a single-value publisher.
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self { value }
  }
}

impl<T> Publisher<T> for Just<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(ScalarSubscription {
      subscriber: subscriber.clone(),
      value:      Mutex::new(Some(self.value.clone())),
      state:      AtomicU8::new(IDLE),
    });
    subscriber.on_subscribe(subscription);
  }
}

/// One-shot subscription: the value is handed over on the first request and
/// the slot is emptied so cancellation can release it eagerly.
struct ScalarSubscription<T> {
  subscriber: Arc<dyn Subscriber<T>>,
  value:      Mutex<Option<T>>,
  state:      AtomicU8,
}

impl<T> Subscription for ScalarSubscription<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if self.state.compare_exchange(IDLE, EMITTED, Ordering::AcqRel, Ordering::Acquire).is_err() {
      return;
    }
    if n == 0 {
      self.value.lock().take();
      self.subscriber.on_error(StreamError::InvalidDemand { requested: n });
      return;
    }
    let value = self.value.lock().take();
    if let Some(value) = value {
      self.subscriber.on_next(value);
      if self.state.load(Ordering::Acquire) != CANCELLED {
        self.subscriber.on_complete();
      }
    }
  }

  fn cancel(&self) {
    self.state.store(CANCELLED, Ordering::Release);
    self.value.lock().take();
  }
}
