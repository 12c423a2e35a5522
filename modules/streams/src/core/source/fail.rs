
use alloc::sync::Arc;
use core::marker::PhantomData;

use crate::core::{
  publisher::Publisher,
  source::empty::{ImmediateOutcome, ImmediateSubscription},
  stream_error::StreamError,
  subscriber::Subscriber,
};

/// Publisher that fails with a fixed error right after `on_subscribe` returns.
pub struct Fail<T> {
  error: StreamError,
  _pd:   PhantomData<fn() -> T>,
}

impl<T> Fail<T> {
  /// Creates a publisher that terminates every subscription with `error`.
  #[must_use]
  pub const fn new(error: StreamError) -> Self {
    Self { error, _pd: PhantomData }
  }
}

impl<T> Publisher<T> for Fail<T>
where
  T: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(ImmediateSubscription::new());
    subscriber.on_subscribe(subscription.clone());
    subscription.finish(|outcome| match outcome {
      | ImmediateOutcome::Terminate | ImmediateOutcome::InvalidDemand => subscriber.on_error(self.error.clone()),
    });
  }
}
