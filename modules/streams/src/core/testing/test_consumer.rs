use alloc::{sync::Arc, vec::Vec};
use spin::Mutex;

use crate::core::{
  signal::Signal, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Recording subscriber used to pin downstream observations in tests.
///
/// Captures every signal in arrival order and forwards a configurable initial
/// demand from `on_subscribe`; further demand is issued through [`request`].
///
/// [`request`]: TestConsumer::request
pub struct TestConsumer<T> {
  initial_demand: u64,
  signals:        Mutex<Vec<Signal<T>>>,
  subscription:   Mutex<Option<Arc<dyn Subscription>>>,
}

impl<T> TestConsumer<T> {
  /// Creates a consumer that requests the unbounded sentinel on subscribe.
  #[must_use]
  pub fn unbounded() -> Arc<Self> {
    Self::with_demand(u64::MAX)
  }

  /// Creates a consumer that requests `initial_demand` on subscribe; zero
  /// defers all demand to explicit `request` calls.
  #[must_use]
  pub fn with_demand(initial_demand: u64) -> Arc<Self> {
    Arc::new(Self { initial_demand, signals: Mutex::new(Vec::new()), subscription: Mutex::new(None) })
  }

  /// Requests further demand from the recorded subscription.
  pub fn request(&self, n: u64) {
    let subscription = self.subscription.lock().clone();
    if let Some(subscription) = subscription {
      subscription.request(n);
    }
  }

  /// Cancels the recorded subscription; later `request` calls still reach it
  /// so post-cancel no-op behavior can be asserted.
  pub fn cancel(&self) {
    let subscription = self.subscription.lock().clone();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
  }

  /// Returns every recorded signal in arrival order.
  #[must_use]
  pub fn signals(&self) -> Vec<Signal<T>>
  where
    T: Clone, {
    self.signals.lock().clone()
  }

  /// Returns the recorded values in arrival order.
  #[must_use]
  pub fn values(&self) -> Vec<T>
  where
    T: Clone, {
    self.signals.lock().iter().filter_map(|signal| match signal {
      | Signal::Next(value) => Some(value.clone()),
      | Signal::Complete | Signal::Error(_) => None,
    }).collect()
  }

  /// Returns `true` when exactly one `Complete` terminal was recorded.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.signals.lock().iter().filter(|signal| matches!(signal, Signal::Complete)).count() == 1
  }

  /// Returns the recorded error, if the stream failed.
  #[must_use]
  pub fn error(&self) -> Option<StreamError> {
    self.signals.lock().iter().find_map(|signal| match signal {
      | Signal::Error(error) => Some(error.clone()),
      | Signal::Next(_) | Signal::Complete => None,
    })
  }

  /// Returns the number of recorded terminal signals.
  #[must_use]
  pub fn terminal_count(&self) -> usize {
    self.signals.lock().iter().filter(|signal| signal.is_terminal()).count()
  }

  /// Returns `true` while no terminal signal has been recorded.
  #[must_use]
  pub fn is_live(&self) -> bool {
    self.terminal_count() == 0
  }
}

impl<T> Subscriber<T> for TestConsumer<T>
where
  T: Send + Sync + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    *self.subscription.lock() = Some(subscription);
    if self.initial_demand > 0 {
      self.request(self.initial_demand);
    }
  }

  fn on_next(&self, value: T) {
    self.signals.lock().push(Signal::Next(value));
  }

  fn on_complete(&self) {
    self.signals.lock().push(Signal::Complete);
  }

  fn on_error(&self, error: StreamError) {
    self.signals.lock().push(Signal::Error(error));
  }
}
