use crate::core::{signal::Signal, source, testing::TestConsumer};

#[test]
fn completes_without_emitting() {
  let consumer = TestConsumer::<u32>::unbounded();
  source::empty::<u32>().subscribe(consumer.clone());

  assert_eq!(consumer.signals(), [Signal::Complete]);
}

#[test]
fn completes_even_without_demand() {
  let consumer = TestConsumer::<u32>::with_demand(0);
  source::empty::<u32>().subscribe(consumer.clone());

  assert!(consumer.is_completed());
}

#[test]
fn each_subscription_terminates_independently() {
  let first = TestConsumer::<u32>::unbounded();
  let second = TestConsumer::<u32>::unbounded();
  let publisher = source::empty::<u32>();
  publisher.subscribe(first.clone());
  publisher.subscribe(second.clone());

  assert!(first.is_completed());
  assert!(second.is_completed());
}
