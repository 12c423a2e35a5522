
use alloc::{sync::Arc, vec::Vec};
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::core::{
  demand::UNBOUNDED,
  demand_counter::DemandCounter,
  publisher::Publisher,
  source::empty::{ImmediateOutcome, ImmediateSubscription},
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Publisher emitting a fixed sequence of values under demand.
pub struct JustAll<T> {
  values: Arc<[T]>,
}

impl<T> JustAll<T> {
  /// Creates a fixed-sequence publisher.
  #[must_use]
  pub fn new(values: Vec<T>) -> Self {
    Self { values: values.into() }
  }
}

impl<T> Publisher<T> for JustAll<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    if self.values.is_empty() {
      let subscription = Arc::new(ImmediateSubscription::new());
      subscriber.on_subscribe(subscription.clone());
      subscription.finish(|outcome| match outcome {
        | ImmediateOutcome::Terminate => subscriber.on_complete(),
        | ImmediateOutcome::InvalidDemand => subscriber.on_error(StreamError::InvalidDemand { requested: 0 }),
      });
      return;
    }
    let subscription = Arc::new(SequenceSubscription {
      subscriber: subscriber.clone(),
      values:     self.values.clone(),
      cursor:     AtomicUsize::new(0),
      requested:  DemandCounter::new(),
      cancelled:  AtomicBool::new(false),
      done:       AtomicBool::new(false),
    });
    subscriber.on_subscribe(subscription);
  }
}

/// Demand-driven emitter over a shared slice; same drain election as the
/// range source.
struct SequenceSubscription<T> {
  subscriber: Arc<dyn Subscriber<T>>,
  values:     Arc<[T]>,
  cursor:     AtomicUsize,
  requested:  DemandCounter,
  cancelled:  AtomicBool,
  done:       AtomicBool,
}

impl<T> SequenceSubscription<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn reject(&self, requested: u64) {
    if self.done.swap(true, Ordering::AcqRel) {
      return;
    }
    self.cancelled.store(true, Ordering::Release);
    self.subscriber.on_error(StreamError::InvalidDemand { requested });
  }

  fn complete(&self) {
    if !self.cancelled.load(Ordering::Acquire) && !self.done.swap(true, Ordering::AcqRel) {
      self.subscriber.on_complete();
    }
  }

  fn drain(&self) {
    let len = self.values.len();
    let mut cursor = self.cursor.load(Ordering::Relaxed);
    loop {
      let requested = self.requested.current();
      if requested == UNBOUNDED {
        while cursor != len {
          if self.cancelled.load(Ordering::Acquire) {
            self.cursor.store(cursor, Ordering::Relaxed);
            return;
          }
          self.subscriber.on_next(self.values[cursor].clone());
          cursor += 1;
        }
        self.cursor.store(cursor, Ordering::Relaxed);
        self.complete();
        return;
      }

      let mut emitted = 0_u64;
      while emitted < requested && cursor != len {
        if self.cancelled.load(Ordering::Acquire) {
          self.cursor.store(cursor, Ordering::Relaxed);
          return;
        }
        self.subscriber.on_next(self.values[cursor].clone());
        cursor += 1;
        emitted += 1;
      }
      self.cursor.store(cursor, Ordering::Relaxed);
      if cursor == len {
        self.complete();
        return;
      }
      if self.requested.consume(emitted) == 0 {
        return;
      }
    }
  }
}

impl<T> Subscription for SequenceSubscription<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn request(&self, n: u64) {
    if self.cancelled.load(Ordering::Acquire) || self.done.load(Ordering::Acquire) {
      return;
    }
    if n == 0 {
      self.reject(n);
      return;
    }
    if self.requested.add(n) == 0 {
      self.drain();
    }
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}
