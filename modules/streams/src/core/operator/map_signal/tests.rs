use alloc::{sync::Arc, vec};

use super::MapSignal;
use crate::core::{
  operator::signal_mappers::SignalMappers, publisher::Publisher, signal::Signal, source,
  stream_error::StreamError, testing::TestConsumer,
};

#[test]
fn construction_requires_at_least_one_mapping() {
  let result = MapSignal::<u32, u32>::new(source::just(1_u32), SignalMappers::new());
  assert_eq!(result.err(), Some(StreamError::InvalidArgument { name: "mappers" }));
}

#[test]
fn maps_values_while_running() {
  let consumer = TestConsumer::unbounded();
  let operator = MapSignal::new(source::just_all(vec![1_u32, 2, 3]), SignalMappers::new().next(|value: u32| value * 2))
    .expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.values(), [2, 4, 6]);
  assert!(consumer.is_completed());
}

#[test]
fn identity_next_mapping_is_transparent() {
  let consumer = TestConsumer::unbounded();
  let operator =
    MapSignal::new(source::range(1, 5).expect("range"), SignalMappers::new().next(|value: i64| value)).expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.values(), [1, 2, 3, 4, 5]);
  assert!(consumer.is_completed());
}

#[test]
fn complete_only_mapping_is_backpressured() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  let operator = MapSignal::new(source::empty::<u32>(), SignalMappers::new().complete(|| 1_u32)).expect("operator");
  operator.subscribe(consumer.clone());

  assert!(consumer.signals().is_empty());

  consumer.request(1);
  assert_eq!(consumer.signals(), [Signal::Next(1), Signal::Complete]);
}

#[test]
fn error_only_mapping_is_backpressured() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  let operator = MapSignal::new(
    source::fail::<u32>(StreamError::upstream("boom")),
    SignalMappers::new().error(|_error| 1_u32),
  )
  .expect("operator");
  operator.subscribe(consumer.clone());

  assert!(consumer.signals().is_empty());

  consumer.request(1);
  assert_eq!(consumer.signals(), [Signal::Next(1), Signal::Complete]);
}

#[test]
fn synthetic_terminal_flows_immediately_under_demand() {
  let consumer = TestConsumer::<u32>::unbounded();
  let operator = MapSignal::new(source::empty::<u32>(), SignalMappers::new().complete(|| 9_u32)).expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Next(9), Signal::Complete]);
}

#[test]
fn unmapped_error_passes_through() {
  let consumer = TestConsumer::<u32>::unbounded();
  let operator =
    MapSignal::new(source::fail::<u32>(StreamError::upstream("boom")), SignalMappers::new().next(|value: u32| value))
      .expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.error(), Some(StreamError::upstream("boom")));
  assert_eq!(consumer.terminal_count(), 1);
}

#[test]
fn unmapped_complete_passes_through() {
  let consumer = TestConsumer::<u32>::unbounded();
  let operator = MapSignal::new(source::empty::<u32>(), SignalMappers::new().next(|value: u32| value)).expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Complete]);
}

#[test]
fn swallowed_values_still_acknowledge_upstream() {
  let consumer = TestConsumer::<u32>::unbounded();
  let operator =
    MapSignal::new(source::just_all(vec![1_u32, 2, 3]), SignalMappers::new().complete(|| 10_u32)).expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Next(10), Signal::Complete]);
}

#[test]
fn mapped_error_is_absorbed_into_completion() {
  let consumer = TestConsumer::<u32>::unbounded();
  let operator = MapSignal::new(
    source::concat(source::just_all(vec![1_u32, 2]), source::fail(StreamError::upstream("boom"))),
    SignalMappers::new().next(|value: u32| value).error(|_error| 99_u32),
  )
  .expect("operator");
  operator.subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Next(1), Signal::Next(2), Signal::Next(99), Signal::Complete]);
}

#[test]
fn second_subscription_is_rejected() {
  let operator = Arc::new(
    MapSignal::new(source::just(1_u32), SignalMappers::new().next(|value: u32| value)).expect("operator"),
  );
  let first = TestConsumer::unbounded();
  let second = TestConsumer::unbounded();
  operator.subscribe(first.clone());
  operator.subscribe(second.clone());

  assert_eq!(first.values(), [1]);
  assert_eq!(second.error(), Some(StreamError::AlreadySubscribed));
}

#[test]
fn zero_demand_errors_the_stream() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  let operator = MapSignal::new(source::just(1_u32), SignalMappers::new().next(|value: u32| value)).expect("operator");
  operator.subscribe(consumer.clone());
  consumer.request(0);

  assert_eq!(consumer.error(), Some(StreamError::InvalidDemand { requested: 0 }));
  assert_eq!(consumer.terminal_count(), 1);
}

#[test]
fn cancellation_suppresses_the_parked_terminal() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  let operator = MapSignal::new(source::empty::<u32>(), SignalMappers::new().complete(|| 1_u32)).expect("operator");
  operator.subscribe(consumer.clone());

  consumer.cancel();
  consumer.request(1);
  assert!(consumer.signals().is_empty());
}
