
use alloc::sync::Arc;
use core::marker::PhantomData;
use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;

use crate::core::{
  demand::UNBOUNDED, demand_counter::DemandCounter, publisher::Publisher, stream_error::StreamError,
  subscriber::Subscriber, subscription::Subscription,
};

/// Publisher pulling from a restartable lazy sequence under demand.
///
/// The factory runs once per subscription, so every subscriber observes the
/// sequence from its start.
pub struct FromIter<F, I> {
  factory: F,
  _pd:     PhantomData<fn() -> I>,
}

impl<F, I> FromIter<F, I> {
  /// Creates an iterator-backed publisher.
  #[must_use]
  pub const fn new(factory: F) -> Self {
    Self { factory, _pd: PhantomData }
  }
}

fn ok_item<T>(value: T) -> Result<T, StreamError> {
  Ok(value)
}

impl<F, I> Publisher<I::Item> for FromIter<F, I>
where
  F: Fn() -> I + Send + Sync + 'static,
  I: IntoIterator,
  I::IntoIter: Send + 'static,
  I::Item: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<I::Item>>) {
    let iter = (self.factory)().into_iter().map(ok_item as fn(I::Item) -> Result<I::Item, StreamError>);
    let subscription = Arc::new(IterSubscription::new(subscriber.clone(), iter));
    subscriber.on_subscribe(subscription);
  }
}

/// Publisher pulling from a fallible lazy sequence; an `Err` item cancels the
/// pull and surfaces as `on_error`.
pub struct FromTryIter<F, I> {
  factory: F,
  _pd:     PhantomData<fn() -> I>,
}

impl<F, I> FromTryIter<F, I> {
  /// Creates a fallible iterator-backed publisher.
  #[must_use]
  pub const fn new(factory: F) -> Self {
    Self { factory, _pd: PhantomData }
  }
}

impl<F, I, T> Publisher<T> for FromTryIter<F, I>
where
  F: Fn() -> I + Send + Sync + 'static,
  I: IntoIterator<Item = Result<T, StreamError>>,
  I::IntoIter: Send + 'static,
  T: Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let iter = (self.factory)().into_iter();
    let subscription = Arc::new(IterSubscription::new(subscriber.clone(), iter));
    subscriber.on_subscribe(subscription);
  }
}

/// Pull-based emitter; the iterator slot is dropped on termination or
/// cancellation so the sequence is released eagerly.
struct IterSubscription<It, T> {
  subscriber: Arc<dyn Subscriber<T>>,
  iter:       Mutex<Option<It>>,
  requested:  DemandCounter,
  cancelled:  AtomicBool,
  done:       AtomicBool,
}

impl<It, T> IterSubscription<It, T>
where
  It: Iterator<Item = Result<T, StreamError>> + Send + 'static,
  T: Send + Sync + 'static,
{
  fn new(subscriber: Arc<dyn Subscriber<T>>, iter: It) -> Self {
    Self {
      subscriber,
      iter: Mutex::new(Some(iter)),
      requested: DemandCounter::new(),
      cancelled: AtomicBool::new(false),
      done: AtomicBool::new(false),
    }
  }

  fn reject(&self, requested: u64) {
    if self.done.swap(true, Ordering::AcqRel) {
      return;
    }
    self.cancelled.store(true, Ordering::Release);
    if let Some(mut guard) = self.iter.try_lock() {
      guard.take();
    }
    self.subscriber.on_error(StreamError::InvalidDemand { requested });
  }

  fn drain(&self) {
    let mut guard = self.iter.lock();
    loop {
      let requested = self.requested.current();
      let mut emitted = 0_u64;
      while requested == UNBOUNDED || emitted < requested {
        if self.cancelled.load(Ordering::Acquire) {
          guard.take();
          return;
        }
        let item = guard.as_mut().and_then(Iterator::next);
        match item {
          | Some(Ok(value)) => {
            self.subscriber.on_next(value);
            emitted += 1;
          },
          | Some(Err(error)) => {
            guard.take();
            if !self.done.swap(true, Ordering::AcqRel) {
              self.cancelled.store(true, Ordering::Release);
              self.subscriber.on_error(error);
            }
            return;
          },
          | None => {
            guard.take();
            if !self.cancelled.load(Ordering::Acquire) && !self.done.swap(true, Ordering::AcqRel) {
              self.subscriber.on_complete();
            }
            return;
          },
        }
      }
      if self.requested.consume(emitted) == 0 {
        return;
      }
    }
  }
}

impl<It, T> Subscription for IterSubscription<It, T>
where
  It: Iterator<Item = Result<T, StreamError>> + Send + 'static,
  T: Send + Sync + 'static,
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
    if let Some(mut guard) = self.iter.try_lock() {
      guard.take();
    }
  }
}
