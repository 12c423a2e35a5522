
use alloc::sync::Arc;
use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;

use crate::core::{
  demand_counter::DemandCounter,
  publisher::{DynPublisher, Publisher},
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Publisher draining one upstream to completion, then a second.
///
/// Unconsumed downstream demand is carried across the switch; an error in
/// either upstream terminates the whole stream.
pub struct Concat<T> {
  first:  DynPublisher<T>,
  second: DynPublisher<T>,
}

impl<T> Concat<T> {
  /// Creates a sequential concatenation of two publishers.
  #[must_use]
  pub fn new(first: DynPublisher<T>, second: DynPublisher<T>) -> Self {
    Self { first, second }
  }
}

impl<T> Publisher<T> for Concat<T>
where
  T: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let coordinator = Arc::new(ConcatCoordinator {
      downstream: subscriber.clone(),
      requested:  DemandCounter::new(),
      current:    Mutex::new(None),
      second:     Mutex::new(Some(self.second.clone())),
      cancelled:  AtomicBool::new(false),
      done:       AtomicBool::new(false),
    });
    subscriber.on_subscribe(coordinator.clone());
    self.first.subscribe(Arc::new(StageSubscriber { coordinator }));
  }
}

/// Downstream-facing subscription spanning both upstream stages.
struct ConcatCoordinator<T> {
  downstream: Arc<dyn Subscriber<T>>,
  requested:  DemandCounter,
  current:    Mutex<Option<Arc<dyn Subscription>>>,
  second:     Mutex<Option<DynPublisher<T>>>,
  cancelled:  AtomicBool,
  done:       AtomicBool,
}

impl<T> ConcatCoordinator<T>
where
  T: Send + Sync + 'static,
{
  fn is_stopped(&self) -> bool {
    self.cancelled.load(Ordering::Acquire) || self.done.load(Ordering::Acquire)
  }

  fn terminate(&self, error: Option<StreamError>) {
    if self.done.swap(true, Ordering::AcqRel) {
      return;
    }
    self.current.lock().take();
    self.second.lock().take();
    match error {
      | Some(error) => self.downstream.on_error(error),
      | None => self.downstream.on_complete(),
    }
  }
}

impl<T> Subscription for ConcatCoordinator<T>
where
  T: Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if self.is_stopped() {
      return;
    }
    if n == 0 {
      self.cancelled.store(true, Ordering::Release);
      let upstream = self.current.lock().take();
      if let Some(upstream) = upstream {
        upstream.cancel();
      }
      self.terminate(Some(StreamError::InvalidDemand { requested: n }));
      return;
    }
    self.requested.add(n);
    let upstream = self.current.lock().clone();
    if let Some(upstream) = upstream {
      upstream.request(n);
    }
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
    let upstream = self.current.lock().take();
    if let Some(upstream) = upstream {
      upstream.cancel();
    }
    self.second.lock().take();
  }
}

/// Upstream-facing subscriber reused for both stages.
struct StageSubscriber<T> {
  coordinator: Arc<ConcatCoordinator<T>>,
}

impl<T> Subscriber<T> for StageSubscriber<T>
where
  T: Send + Sync + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    if self.coordinator.is_stopped() {
      subscription.cancel();
      return;
    }
    *self.coordinator.current.lock() = Some(subscription.clone());
    let outstanding = self.coordinator.requested.current();
    if outstanding > 0 {
      subscription.request(outstanding);
    }
  }

  fn on_next(&self, value: T) {
    if self.coordinator.is_stopped() {
      return;
    }
    self.coordinator.requested.consume(1);
    self.coordinator.downstream.on_next(value);
  }

  fn on_complete(&self) {
    if self.coordinator.is_stopped() {
      return;
    }
    self.coordinator.current.lock().take();
    let next = self.coordinator.second.lock().take();
    match next {
      | Some(publisher) => {
        publisher.subscribe(Arc::new(StageSubscriber { coordinator: self.coordinator.clone() }));
      },
      | None => self.coordinator.terminate(None),
    }
  }

  fn on_error(&self, error: StreamError) {
    if self.coordinator.is_stopped() {
      return;
    }
    self.coordinator.terminate(Some(error));
  }
}
