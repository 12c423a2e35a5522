#[cfg(test)]
mod tests;

use alloc::sync::Arc;
use portable_atomic::{AtomicBool, AtomicI64, Ordering};

use crate::core::{
  demand::UNBOUNDED,
  demand_counter::DemandCounter,
  publisher::Publisher,
  source::empty::{ImmediateOutcome, ImmediateSubscription},
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Publisher emitting `start, start + 1, …` for a fixed number of values.
pub struct Range {
  start: i64,
  end:   i64,
}

impl Range {
  /// Creates an arithmetic sequence source.
  ///
  /// # Errors
  ///
  /// Returns `StreamError::InvalidArgument` when `start + count` overflows the
  /// signed 64-bit cursor.
  pub fn new(start: i64, count: u64) -> Result<Self, StreamError> {
    if count > i64::MAX as u64 {
      return Err(StreamError::InvalidArgument { name: "count" });
    }
    match start.checked_add(count as i64) {
      | Some(end) => Ok(Self { start, end }),
      | None => Err(StreamError::InvalidArgument { name: "count" }),
    }
  }
}

impl Publisher<i64> for Range {
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<i64>>) {
    if self.start == self.end {
      let subscription = Arc::new(ImmediateSubscription::new());
      subscriber.on_subscribe(subscription.clone());
      subscription.finish(|outcome| match outcome {
        | ImmediateOutcome::Terminate => subscriber.on_complete(),
        | ImmediateOutcome::InvalidDemand => subscriber.on_error(StreamError::InvalidDemand { requested: 0 }),
      });
      return;
    }
    let subscription = Arc::new(RangeSubscription {
      subscriber: subscriber.clone(),
      cursor:     AtomicI64::new(self.start),
      end:        self.end,
      requested:  DemandCounter::new(),
      cancelled:  AtomicBool::new(false),
      done:       AtomicBool::new(false),
    });
    subscriber.on_subscribe(subscription);
  }
}

/// Demand-driven emitter state.
///
/// The demand counter doubles as the drain election: the thread whose request
/// lifts it from zero runs the emission loop, and re-entrant requests merely
/// extend the counter the loop re-reads each lap.
struct RangeSubscription {
  subscriber: Arc<dyn Subscriber<i64>>,
  cursor:     AtomicI64,
  end:        i64,
  requested:  DemandCounter,
  cancelled:  AtomicBool,
  done:       AtomicBool,
}

impl RangeSubscription {
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
    let end = self.end;
    let mut cursor = self.cursor.load(Ordering::Relaxed);
    loop {
      let requested = self.requested.current();
      if requested == UNBOUNDED {
        while cursor != end {
          if self.cancelled.load(Ordering::Acquire) {
            self.cursor.store(cursor, Ordering::Relaxed);
            return;
          }
          self.subscriber.on_next(cursor);
          cursor += 1;
        }
        self.cursor.store(cursor, Ordering::Relaxed);
        self.complete();
        return;
      }

      let mut emitted = 0_u64;
      while emitted < requested && cursor != end {
        if self.cancelled.load(Ordering::Acquire) {
          self.cursor.store(cursor, Ordering::Relaxed);
          return;
        }
        self.subscriber.on_next(cursor);
        cursor += 1;
        emitted += 1;
      }
      self.cursor.store(cursor, Ordering::Relaxed);
      if cursor == end {
        self.complete();
        return;
      }
      if self.requested.consume(emitted) == 0 {
        return;
      }
    }
  }
}

impl Subscription for RangeSubscription {
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
