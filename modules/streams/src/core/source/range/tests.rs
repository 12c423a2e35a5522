use alloc::sync::Arc;

use spin::Mutex;

use crate::core::{
  publisher::Publisher, signal::Signal, source, stream_error::StreamError, subscriber::Subscriber,
  subscription::Subscription, testing::TestConsumer,
};

#[test]
fn emits_the_sequence_in_construction_order() {
  let consumer = TestConsumer::unbounded();
  source::range(1, 5).expect("range").subscribe(consumer.clone());

  assert_eq!(consumer.values(), [1, 2, 3, 4, 5]);
  assert!(consumer.is_completed());
}

#[test]
fn an_empty_range_completes_immediately() {
  let consumer = TestConsumer::with_demand(0);
  source::range(10, 0).expect("range").subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Complete]);
}

#[test]
fn demand_gates_emission() {
  let consumer = TestConsumer::with_demand(0);
  source::range(1, 4).expect("range").subscribe(consumer.clone());
  assert!(consumer.signals().is_empty());

  consumer.request(2);
  assert_eq!(consumer.values(), [1, 2]);
  assert!(consumer.is_live());

  consumer.request(2);
  assert_eq!(consumer.values(), [1, 2, 3, 4]);
  assert!(consumer.is_completed());
}

#[test]
fn negative_starts_are_supported() {
  let consumer = TestConsumer::unbounded();
  source::range(-2, 4).expect("range").subscribe(consumer.clone());

  assert_eq!(consumer.values(), [-2, -1, 0, 1]);
}

#[test]
fn overflowing_bounds_are_rejected_synchronously() {
  let result = source::range(i64::MAX, 2);
  assert_eq!(result.err(), Some(StreamError::InvalidArgument { name: "count" }));
}

#[test]
fn zero_demand_errors_the_stream() {
  let consumer = TestConsumer::with_demand(0);
  source::range(1, 4).expect("range").subscribe(consumer.clone());
  consumer.request(0);

  assert_eq!(consumer.error(), Some(StreamError::InvalidDemand { requested: 0 }));
  consumer.request(1);
  assert_eq!(consumer.terminal_count(), 1);
  assert!(consumer.values().is_empty());
}

#[test]
fn cancellation_from_on_next_stops_emission() {
  struct CancelAfterTwo {
    seen:         Mutex<u64>,
    subscription: Mutex<Option<Arc<dyn Subscription>>>,
  }

  impl Subscriber<i64> for CancelAfterTwo {
    fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
      *self.subscription.lock() = Some(subscription.clone());
      subscription.request(u64::MAX);
    }

    fn on_next(&self, _value: i64) {
      let mut seen = self.seen.lock();
      *seen += 1;
      if *seen == 2 {
        if let Some(subscription) = self.subscription.lock().as_ref() {
          subscription.cancel();
        }
      }
    }

    fn on_complete(&self) {
      *self.seen.lock() = u64::MAX;
    }

    fn on_error(&self, _error: StreamError) {
      *self.seen.lock() = u64::MAX;
    }
  }

  let consumer = Arc::new(CancelAfterTwo { seen: Mutex::new(0), subscription: Mutex::new(None) });
  source::range(1, 100).expect("range").subscribe(consumer.clone());

  assert_eq!(*consumer.seen.lock(), 2);
}

#[test]
fn concurrent_requests_never_break_serialization() {
  extern crate std;

  let consumer = TestConsumer::with_demand(0);
  source::range(0, 100).expect("range").subscribe(consumer.clone());

  let workers: alloc::vec::Vec<_> = (0..4)
    .map(|_| {
      let consumer = consumer.clone();
      std::thread::spawn(move || {
        for _ in 0..25 {
          consumer.request(1);
        }
      })
    })
    .collect();
  for worker in workers {
    worker.join().expect("join");
  }

  assert_eq!(consumer.values(), (0..100).collect::<alloc::vec::Vec<_>>());
  assert_eq!(consumer.terminal_count(), 1);
  assert!(consumer.is_completed());
}

#[test]
fn reentrant_requests_extend_the_running_drain() {
  struct OneByOne {
    values:       Mutex<alloc::vec::Vec<i64>>,
    completed:    Mutex<bool>,
    subscription: Mutex<Option<Arc<dyn Subscription>>>,
  }

  impl Subscriber<i64> for OneByOne {
    fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
      *self.subscription.lock() = Some(subscription.clone());
      subscription.request(1);
    }

    fn on_next(&self, value: i64) {
      self.values.lock().push(value);
      if let Some(subscription) = self.subscription.lock().as_ref() {
        subscription.request(1);
      }
    }

    fn on_complete(&self) {
      *self.completed.lock() = true;
    }

    fn on_error(&self, _error: StreamError) {}
  }

  let consumer = Arc::new(OneByOne {
    values:       Mutex::new(alloc::vec::Vec::new()),
    completed:    Mutex::new(false),
    subscription: Mutex::new(None),
  });
  source::range(0, 6).expect("range").subscribe(consumer.clone());

  assert_eq!(*consumer.values.lock(), [0, 1, 2, 3, 4, 5]);
  assert!(*consumer.completed.lock());
}
