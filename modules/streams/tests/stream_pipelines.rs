use std::{
  sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc,
  },
  time::Duration,
  vec::Vec,
};

use rheo_streams_rs::{
  core::{
    source, testing::TestConsumer, BaseConsumer, Buffer, ConsumerControl, ConsumerHooks, FlatMapSignal, MapSignal,
    Publisher, PublisherMappers, Scheduler, SignalKind, SignalMappers, StreamError,
  },
  std::ThreadScheduler,
};

#[test]
fn operators_compose_across_a_full_chain() {
  let consumer = TestConsumer::unbounded();
  let doubled = MapSignal::new(source::range(1, 8).expect("range"), SignalMappers::new().next(|value: i64| value * 2))
    .expect("map_signal");
  let windows = Buffer::new(Arc::new(doubled), 3, 3).expect("buffer");
  windows.subscribe(consumer.clone());

  assert_eq!(consumer.values(), [vec![2, 4, 6], vec![8, 10, 12], vec![14, 16]]);
  assert!(consumer.is_completed());
}

#[test]
fn flat_map_feeds_windows_under_explicit_demand() {
  let consumer = TestConsumer::with_demand(0);
  let expanded = FlatMapSignal::new(
    source::just_all(vec![0_u32, 10]),
    PublisherMappers::new().next(|value: u32| source::just_all(vec![value + 1, value + 2])),
  )
  .expect("flat_map_signal");
  let windows = Buffer::new(Arc::new(expanded), 2, 2).expect("buffer");
  windows.subscribe(consumer.clone());
  assert!(consumer.signals().is_empty());

  consumer.request(1);
  assert_eq!(consumer.values(), [vec![1, 2]]);
  assert!(consumer.is_live());

  consumer.request(1);
  assert_eq!(consumer.values(), [vec![1, 2], vec![11, 12]]);
  assert!(consumer.is_completed());
}

#[test]
fn the_base_consumer_drives_a_chain_with_hook_demand() {
  struct WindowHooks {
    windows:  spin::Mutex<Vec<Vec<i64>>>,
    pathways: spin::Mutex<Vec<SignalKind>>,
  }

  struct WindowHooksHandle(Arc<WindowHooks>);

  impl ConsumerHooks<Vec<i64>> for WindowHooksHandle {
    fn on_subscribe(&self, control: &ConsumerControl) {
      control.request(1);
    }

    fn on_next(&self, control: &ConsumerControl, window: Vec<i64>) {
      self.0.windows.lock().push(window);
      control.request(1);
    }

    fn on_finally(&self, kind: SignalKind) {
      self.0.pathways.lock().push(kind);
    }
  }

  let hooks = Arc::new(WindowHooks { windows: spin::Mutex::new(Vec::new()), pathways: spin::Mutex::new(Vec::new()) });
  let consumer = Arc::new(BaseConsumer::new(WindowHooksHandle(hooks.clone())));
  let windows = Buffer::new(source::range(1, 10).expect("range"), 2, 3).expect("buffer");
  windows.subscribe(consumer);

  assert_eq!(*hooks.windows.lock(), [vec![1, 2], vec![4, 5], vec![7, 8], vec![10]]);
  assert_eq!(*hooks.pathways.lock(), [SignalKind::Complete]);
}

#[test]
fn a_scheduler_can_drive_demand_from_another_thread() {
  let consumer = TestConsumer::with_demand(0);
  source::range(0, 5).expect("range").subscribe(consumer.clone());

  let scheduler = ThreadScheduler::with_defaults().expect("scheduler");
  let (sender, receiver) = mpsc::channel();
  let remaining = Arc::new(AtomicUsize::new(5));
  let driver = consumer.clone();
  let handle = scheduler
    .schedule_at_fixed_rate(
      Duration::from_millis(2),
      Box::new(move || {
        if remaining.fetch_sub(1, Ordering::AcqRel) > 0 {
          driver.request(1);
        } else {
          let _ = sender.send(());
        }
      }),
    )
    .expect("schedule_at_fixed_rate");

  receiver.recv_timeout(Duration::from_secs(5)).expect("ticks delivered");
  scheduler.dispose();
  drop(handle);

  assert_eq!(consumer.values(), (0..5).collect::<Vec<_>>());
  assert!(consumer.is_completed());
}

#[test]
fn construction_errors_surface_before_any_signal() {
  assert_eq!(
    Buffer::new(source::never::<u32>(), 0, 2).err(),
    Some(StreamError::InvalidArgument { name: "size" })
  );
  assert_eq!(
    MapSignal::<u32, u32>::new(source::never::<u32>(), SignalMappers::new()).err(),
    Some(StreamError::InvalidArgument { name: "mappers" })
  );
}
