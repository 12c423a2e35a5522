extern crate std;

use std::{boxed::Box, sync::mpsc, time::Duration, vec::Vec};

use super::ThreadScheduler;
use crate::{
  core::{Disposable, Scheduler, StreamError},
  std::thread_scheduler_config::ThreadSchedulerConfig,
};

#[test]
fn immediate_tasks_run_on_the_worker() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  scheduler
    .schedule(Box::new(move || {
      let _ = sender.send(std::thread::current().name().map(std::string::ToString::to_string));
    }))
    .expect("schedule");

  let name = receiver.recv_timeout(Duration::from_secs(5)).expect("task ran");
  assert_eq!(name.as_deref(), Some("rheo-scheduler"));
}

#[test]
fn the_worker_thread_name_is_configurable() {
  let scheduler = ThreadScheduler::new(&ThreadSchedulerConfig::new("timer-worker")).expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  scheduler
    .schedule(Box::new(move || {
      let _ = sender.send(std::thread::current().name().map(std::string::ToString::to_string));
    }))
    .expect("schedule");

  let name = receiver.recv_timeout(Duration::from_secs(5)).expect("task ran");
  assert_eq!(name.as_deref(), Some("timer-worker"));
}

#[test]
fn delayed_tasks_wait_for_their_deadline() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  let started = std::time::Instant::now();
  scheduler
    .schedule_once(
      Duration::from_millis(50),
      Box::new(move || {
        let _ = sender.send(());
      }),
    )
    .expect("schedule_once");

  receiver.recv_timeout(Duration::from_secs(5)).expect("task ran");
  assert!(started.elapsed() >= Duration::from_millis(50));
}

#[test]
fn deadlines_are_served_in_order() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  let late = sender.clone();
  scheduler
    .schedule_once(
      Duration::from_millis(80),
      Box::new(move || {
        let _ = late.send("late");
      }),
    )
    .expect("schedule_once");
  scheduler
    .schedule_once(
      Duration::from_millis(10),
      Box::new(move || {
        let _ = sender.send("early");
      }),
    )
    .expect("schedule_once");

  let mut order = Vec::new();
  order.push(receiver.recv_timeout(Duration::from_secs(5)).expect("first"));
  order.push(receiver.recv_timeout(Duration::from_secs(5)).expect("second"));
  assert_eq!(order, ["early", "late"]);
}

#[test]
fn periodic_tasks_repeat_until_their_handle_is_disposed() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  let handle = scheduler
    .schedule_at_fixed_rate(
      Duration::from_millis(5),
      Box::new(move || {
        let _ = sender.send(());
      }),
    )
    .expect("schedule_at_fixed_rate");

  for _ in 0..3 {
    receiver.recv_timeout(Duration::from_secs(5)).expect("tick");
  }
  handle.dispose();
  while receiver.recv_timeout(Duration::from_millis(100)).is_ok() {}
  assert!(receiver.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn disposed_handles_never_run() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  let handle = scheduler
    .schedule_once(
      Duration::from_millis(100),
      Box::new(move || {
        let _ = sender.send(());
      }),
    )
    .expect("schedule_once");
  handle.dispose();

  assert!(receiver.recv_timeout(Duration::from_millis(300)).is_err());
}

#[test]
fn scheduling_after_dispose_is_rejected() {
  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  scheduler.dispose();
  scheduler.dispose();

  let result = scheduler.schedule(Box::new(|| {}));
  assert_eq!(result.err(), Some(StreamError::ExecutorUnavailable));
}
