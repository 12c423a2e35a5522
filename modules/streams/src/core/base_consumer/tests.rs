use alloc::{sync::Arc, vec, vec::Vec};

use spin::Mutex;

use super::BaseConsumer;
use crate::core::{
  consumer_control::ConsumerControl, consumer_hooks::ConsumerHooks, signal_kind::SignalKind, source,
  stream_error::StreamError, subscriber::Subscriber,
};

#[derive(Default)]
struct RecordingHooks {
  values:    Mutex<Vec<u64>>,
  pathways:  Mutex<Vec<SignalKind>>,
  cancelled: Mutex<bool>,
}

impl ConsumerHooks<u64> for Arc<RecordingHooks> {
  fn on_subscribe(&self, control: &ConsumerControl) {
    control.request(u64::MAX);
  }

  fn on_next(&self, _control: &ConsumerControl, value: u64) {
    self.values.lock().push(value);
  }

  fn on_cancel(&self) {
    *self.cancelled.lock() = true;
  }

  fn on_finally(&self, kind: SignalKind) {
    self.pathways.lock().push(kind);
  }
}

#[test]
fn completion_runs_finally_exactly_once() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::just_all(vec![1_u64, 2, 3]).subscribe(consumer);

  assert_eq!(*hooks.values.lock(), [1, 2, 3]);
  assert_eq!(*hooks.pathways.lock(), [SignalKind::Complete]);
}

#[test]
fn failure_runs_finally_with_the_error_tag() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::fail::<u64>(StreamError::upstream("boom")).subscribe(consumer);

  assert!(hooks.values.lock().is_empty());
  assert_eq!(*hooks.pathways.lock(), [SignalKind::Error]);
}

#[test]
fn cancellation_runs_the_cancel_pathway() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::never::<u64>().subscribe(consumer.clone());

  consumer.cancel();
  consumer.cancel();

  assert!(*hooks.cancelled.lock());
  assert_eq!(*hooks.pathways.lock(), [SignalKind::Cancel]);
}

#[test]
fn cancel_after_completion_is_a_no_op() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::empty::<u64>().subscribe(consumer.clone());
  consumer.cancel();

  assert_eq!(*hooks.pathways.lock(), [SignalKind::Complete]);
  assert!(!*hooks.cancelled.lock());
}

#[test]
fn values_after_finalization_are_dropped() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::empty::<u64>().subscribe(consumer.clone());

  consumer.on_next(9);
  assert!(hooks.values.lock().is_empty());
}

#[test]
fn cancel_handle_reaches_the_live_subscription() {
  let hooks = Arc::new(RecordingHooks::default());
  let consumer = Arc::new(BaseConsumer::new(hooks.clone()));
  source::never::<u64>().subscribe(consumer.clone());

  let handle = consumer.cancel_handle();
  assert!(handle.is_live());
  handle.cancel();
  consumer.cancel();
  assert_eq!(*hooks.pathways.lock(), [SignalKind::Cancel]);
}
