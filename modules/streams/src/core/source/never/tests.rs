use crate::core::{source, stream_error::StreamError, testing::TestConsumer};

#[test]
fn stays_silent_under_demand() {
  let consumer = TestConsumer::<u32>::unbounded();
  source::never::<u32>().subscribe(consumer.clone());

  assert!(consumer.signals().is_empty());
  assert!(consumer.is_live());
}

#[test]
fn zero_demand_errors_the_stream() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  source::never::<u32>().subscribe(consumer.clone());
  consumer.request(0);

  assert_eq!(consumer.error(), Some(StreamError::InvalidDemand { requested: 0 }));
  assert_eq!(consumer.terminal_count(), 1);
}

#[test]
fn cancellation_is_accepted() {
  let consumer = TestConsumer::<u32>::unbounded();
  source::never::<u32>().subscribe(consumer.clone());
  consumer.cancel();

  assert!(consumer.signals().is_empty());
}
