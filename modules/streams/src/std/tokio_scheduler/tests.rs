extern crate std;

use std::{boxed::Box, time::Duration};

use alloc::sync::Arc;
use portable_atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use super::TokioScheduler;
use crate::core::{Disposable, Scheduler, StreamError};

#[tokio::test(flavor = "current_thread")]
async fn immediate_tasks_run_on_the_runtime() {
  let scheduler = TokioScheduler::new().expect("scheduler");
  let notify = Arc::new(Notify::new());
  let done = notify.clone();
  scheduler.schedule(Box::new(move || done.notify_one())).expect("schedule");

  tokio::time::timeout(Duration::from_secs(5), notify.notified()).await.expect("task ran");
}

#[tokio::test(flavor = "current_thread")]
async fn delayed_tasks_wait_for_their_deadline() {
  tokio::time::pause();
  let scheduler = TokioScheduler::new().expect("scheduler");
  let runs = Arc::new(AtomicUsize::new(0));
  let counter = runs.clone();
  scheduler
    .schedule_once(Duration::from_millis(100), Box::new(move || {
      counter.fetch_add(1, Ordering::AcqRel);
    }))
    .expect("schedule_once");

  tokio::time::sleep(Duration::from_millis(50)).await;
  assert_eq!(runs.load(Ordering::Acquire), 0);
  tokio::time::sleep(Duration::from_millis(100)).await;
  assert_eq!(runs.load(Ordering::Acquire), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn periodic_tasks_repeat_until_disposed() {
  tokio::time::pause();
  let scheduler = TokioScheduler::new().expect("scheduler");
  let runs = Arc::new(AtomicUsize::new(0));
  let counter = runs.clone();
  let handle = scheduler
    .schedule_at_fixed_rate(Duration::from_millis(10), Box::new(move || {
      counter.fetch_add(1, Ordering::AcqRel);
    }))
    .expect("schedule_at_fixed_rate");

  tokio::time::sleep(Duration::from_millis(35)).await;
  let observed = runs.load(Ordering::Acquire);
  assert!(observed >= 3);

  handle.dispose();
  tokio::time::sleep(Duration::from_millis(50)).await;
  assert_eq!(runs.load(Ordering::Acquire), observed);
}

#[tokio::test(flavor = "current_thread")]
async fn dispose_aborts_pending_tasks() {
  let scheduler = TokioScheduler::new().expect("scheduler");
  let runs = Arc::new(AtomicUsize::new(0));
  let counter = runs.clone();
  scheduler
    .schedule_once(Duration::from_secs(60), Box::new(move || {
      counter.fetch_add(1, Ordering::AcqRel);
    }))
    .expect("schedule_once");

  scheduler.dispose();
  let result = scheduler.schedule(Box::new(|| {}));
  assert_eq!(result.err(), Some(StreamError::ExecutorUnavailable));
  assert_eq!(runs.load(Ordering::Acquire), 0);
}

#[test]
fn construction_outside_a_runtime_is_rejected() {
  let result = TokioScheduler::new();
  assert!(matches!(result.err(), Some(StreamError::ExecutorUnavailable)));
}
